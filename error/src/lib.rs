use thiserror::Error as ThisError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(ThisError, Debug)]
pub enum Error {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    NotFound(String),
    #[error("Image processing failed: {0}")]
    Processing(String),
    #[error("{0}")]
    Duplicate(String),
    #[error("{0}")]
    Internal(String),
}

impl Error {
    pub fn is_client_error(&self) -> bool {
        !matches!(self, Self::Internal(_))
    }
}

// Classified errors raised below the service layer travel inside anyhow and
// are recovered here; anything else is an unclassified failure.
impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        match err.downcast::<Self>() {
            Ok(err) => err,
            Err(err) => Self::Internal(err.to_string()),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Internal(err.to_string())
    }
}
