//! Crate error type shared by every collection.

use thiserror::Error;

/// Failures returned at the call site. Misses (duplicate `add`, absent key on
/// `remove`/`lookup`) are not errors and never show up here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    /// Bad constructor or configuration input.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),
    /// Index at or past the current length.
    #[error("index {index} out of range for length {len}")]
    OutOfRange { index: usize, len: usize },
    /// Removal from an empty container.
    #[error("underflow: {0} is empty")]
    Underflow(&'static str),
}

pub type Result<T> = core::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::Error;

    #[test]
    fn messages_name_the_failure() {
        assert_eq!(
            Error::OutOfRange { index: 4, len: 2 }.to_string(),
            "index 4 out of range for length 2"
        );
        assert_eq!(
            Error::Underflow("array").to_string(),
            "underflow: array is empty"
        );
        assert_eq!(
            Error::InvalidArgument("capacity must be at least 1").to_string(),
            "invalid argument: capacity must be at least 1"
        );
    }
}
