//! Local draft persistence for admin forms.
//!
//! A form's working state is snapshotted to the local store on a debounce timer so an
//! accidental close does not lose edits. On the next mount the form is offered the draft
//! back; a successful submit always clears it.

mod debounce;
pub mod key;
mod manager;
pub mod status;

pub use debounce::Debouncer;
pub use key::{
    DraftKey,
    EntityIdentity,
};
pub use manager::{
    DraftManager,
    DraftStore,
};
pub use status::{
    DraftPhase,
    DraftStatus,
    MountOutcome,
    SaveStatus,
};
