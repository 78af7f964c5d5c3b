use thiserror::Error;

/// Errors raised by the rules engine when a caller breaks the contract of an operation.
///
/// These are never retried: the orchestrator propagates them, which aborts the game.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum TchuError {
    /// A precondition of the operation does not hold, e.g. claiming a route without enough cars.
    #[error("{0}")]
    InvalidArgument(String),
    /// An index (face-up slot, multiset element, catalog entry) is out of range.
    #[error("Index {index} is out of bounds (size {size}).")]
    IndexOutOfBounds { index: usize, size: usize },
}

pub type TchuResult<T> = Result<T, TchuError>;

/// Returns `Err(TchuError::InvalidArgument)` with the given message unless `condition` holds.
#[inline]
pub(crate) fn check_argument(condition: bool, message: impl FnOnce() -> String) -> TchuResult<()> {
    if condition {
        Ok(())
    } else {
        Err(TchuError::InvalidArgument(message()))
    }
}

/// Returns `Err(TchuError::IndexOutOfBounds)` unless `index < size`.
#[inline]
pub(crate) fn check_index(index: usize, size: usize) -> TchuResult<usize> {
    if index < size {
        Ok(index)
    } else {
        Err(TchuError::IndexOutOfBounds { index, size })
    }
}
