use thiserror::Error;

/// A result with a selector [`Error`].
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// An error raised by a misconfigured selector or memoized function.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The number of equality checks or key functions does not match the
    /// number of bundle positions.
    #[error("{strategy} memoize: expected {expected} arguments, got {found}")]
    ArityMismatch {
        strategy: &'static str,
        expected: usize,
        found: usize,
    },
}
