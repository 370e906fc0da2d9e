//! Error and result types for the KD-tree crate.
//!
//! Searches never fail: an empty tree or a query without an eligible
//! candidate yields `None`. Errors are reserved for invalid arguments and for
//! batch workers that did not run to completion.

use thiserror::Error;

/// Errors that can occur in KD-tree operations
#[derive(Debug, Error)]
pub enum KdTreeError {
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    #[error("Worker failed: {0}")]
    WorkerFailed(String),
}

/// Result type for KD-tree operations
pub type KdTreeResult<T> = Result<T, KdTreeError>;
