//! Errors raised by transforms and their helpers.
use thiserror::Error;

/// Failure of a transform call or a display helper.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FftError {
    /// A complex-packed sequence has odd length where re/im pairing is required.
    #[error("invalid input shape: complex-packed sequence has odd length {len}")]
    InvalidInputShape {
        /// Offending number of doubles.
        len: usize,
    },
    /// The backend could not provide a buffer or plan of the requested size.
    #[error("backend allocation failure: could not reserve {requested} bytes")]
    BackendAllocationFailure {
        /// Requested size in bytes.
        requested: usize,
    },
}

/// Shorthand used throughout the crate.
pub type FftResult<T> = Result<T, FftError>;

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn messages_name_the_offending_size() {
        let err = FftError::InvalidInputShape { len: 7 };
        assert_eq!(
            err.to_string(),
            "invalid input shape: complex-packed sequence has odd length 7"
        );
        let err = FftError::BackendAllocationFailure { requested: 64 };
        assert!(err.to_string().contains("64 bytes"));
    }
}
