use thiserror::Error;

use crate::protocol::response::ReplyError;

#[derive(Debug, Error)]
pub enum Error {
    #[error("RETS Server Error: {0}")]
    Reply(#[from] ReplyError),

    #[error(transparent)]
    Processing(#[from] ProcessingError),
}

/// Failures outside the RETS status vocabulary.
///
/// Everything here is fatal to the parse except `MalformedRow` and `InvalidCount`,
/// which the decoder reports per element and then keeps going.
#[derive(Debug, Error)]
pub enum ProcessingError {
    #[error("Unexpected results. Please check the RETS URL: root element is <{0}>")]
    UnexpectedResults(String),

    #[error("XML parsing error: {0}")]
    Xml(String),

    #[error("Invalid DELIMITER value {0:?}")]
    InvalidDelimiter(String),

    #[error("Malformed DATA row: {fields} fields for {columns} columns")]
    MalformedRow { columns: usize, fields: usize },

    #[error("Invalid COUNT Records value {0:?}")]
    InvalidCount(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Bad config error: {0}")]
    BadConfig(String),

    #[error("Handler error: {0}")]
    Handler(String),
}

/// Coarse classification of [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Reply,
    Processing,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Reply(_) => ErrorKind::Reply,
            Error::Processing(_) => ErrorKind::Processing,
        }
    }

    /// Whether this error ends the parse that produced it.
    pub fn is_fatal(&self) -> bool {
        match self {
            Error::Reply(_) => false,
            Error::Processing(err) => !matches!(
                err,
                ProcessingError::MalformedRow { .. } | ProcessingError::InvalidCount(_)
            ),
        }
    }

    /// Error raised by a [`RetsHandler`](crate::protocol::RetsHandler) to abort decoding
    pub fn handler(message: impl std::fmt::Display) -> Self {
        Error::Processing(ProcessingError::Handler(message.to_string()))
    }

    pub(crate) fn xml(diagnostic: impl std::fmt::Display) -> Self {
        Error::Processing(ProcessingError::Xml(diagnostic.to_string()))
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Processing(ProcessingError::Io(err))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
