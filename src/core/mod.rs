pub mod errors;
pub mod models;
pub mod utils;

pub use errors::CariaError;
pub use models::{
    FieldKind,
    FieldValue,
    Record,
    RecordId,
    RecordSchema,
};
