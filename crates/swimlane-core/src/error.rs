use thiserror::Error;

#[derive(Error, Debug)]
pub enum SwimlaneError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Backend returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl SwimlaneError {
    /// Validation and lookup failures leave state untouched and are
    /// ignored by interactive front ends.
    pub fn is_user_noop(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::NotFound(_))
    }
}
