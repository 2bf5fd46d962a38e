use thiserror::Error;

use crate::persistence::StoreError;

#[derive(Error, Debug)]
pub enum CariaError {
    #[error("I/O error: {0}")]
    Io(Box<std::io::Error>),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl From<std::io::Error> for CariaError {
    fn from(error: std::io::Error) -> Self {
        CariaError::Io(Box::new(error))
    }
}
