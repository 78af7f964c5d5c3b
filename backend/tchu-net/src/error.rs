use std::num::ParseIntError;
use std::string::FromUtf8Error;
use tchu::error::TchuError;
use tchu::player::PlayerError;
use thiserror::Error;

/// Ways a line received from a peer can fail to decode, or a value can fail to encode.
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("Unknown message: {0:?}")]
    UnknownMessage(String),
    #[error("Expected {expected} fields, found {found}.")]
    FieldCount { expected: usize, found: usize },
    #[error("Invalid integer {text:?}: {source}")]
    InvalidInteger {
        text: String,
        source: ParseIntError,
    },
    #[error("No {kind} at index {index} of the catalog.")]
    OutOfCatalog { kind: &'static str, index: usize },
    #[error("{0} is not part of the catalog.")]
    NotInCatalog(String),
    #[error("Invalid base64 text: {0}")]
    InvalidBase64(#[from] base64::DecodeError),
    #[error("Invalid UTF-8 text: {0}")]
    InvalidUtf8(#[from] FromUtf8Error),
    #[error("Invalid record: {0}")]
    InvalidRecord(#[from] TchuError),
}

pub type ProtocolResult<T> = Result<T, ProtocolError>;

impl From<ProtocolError> for PlayerError {
    fn from(error: ProtocolError) -> Self {
        PlayerError::Protocol(error.to_string())
    }
}
