//! Emission errors.

use thiserror::Error;

/// Failure while writing generated source.
///
/// Tree queries never fail; only the output sink can.
#[derive(Debug, Error)]
pub enum EmitError {
    /// The formatter sink rejected a write.
    #[error("output sink rejected a write")]
    Sink(#[from] core::fmt::Error),
    /// The underlying writer of an [`IoSink`](crate::IoSink) failed.
    #[cfg(feature = "std")]
    #[error("failed to write generated source: {0}")]
    Io(#[from] std::io::Error),
}
