//! Crate-wide error types.
//!
//! Every fallible operation in this crate returns [`DocValuesError`]. I/O
//! failures are fatal and propagate untouched, while invariant violations
//! (a caller passing a malformed ordinal stream) are reported as
//! [`DocValuesError::Internal`] rather than panicking, so a host segment
//! writer can still abort cleanly.
//!
//! GCD overflow and term-dictionary overflow are **not** represented here:
//! both are local, silent degradations of the statistics tracker and never
//! surface as an `Err`.

use std::io;

use thiserror::Error;

/// Errors produced while writing a doc-values segment.
#[derive(Debug, Error)]
pub enum DocValuesError {
    /// The underlying `data` or `meta` stream refused a write.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A caller-supplied invariant was violated (e.g. an ordinal stream
    /// with a nonzero minimum). This indicates a bug in the caller, not a
    /// corrupt or adversarial input, and is never recoverable.
    #[error("internal invariant violated: {0}")]
    Internal(String),

    /// Flushing the segment-framing stand-in's header, trailer, or
    /// sentinel to the caller-supplied output failed partway through.
    #[error("segment framing I/O error: {0}")]
    Framing(#[source] io::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, DocValuesError>;
