//! Error types for tola-reconcile.
//!
//! Host adapters report failures as [`HostError`]; the renderer wraps them
//! (and its own fail-fast checks) in [`ReconcileError`].

use thiserror::Error;

use crate::id::InstanceId;
use crate::node::VNodeKind;

/// Failure reported by a host adapter.
#[derive(Debug, Error)]
#[error("host operation `{op}` failed: {message}")]
pub struct HostError {
    op: &'static str,
    message: String,
}

impl HostError {
    /// Create an error for the named host operation.
    pub fn new(op: &'static str, message: impl Into<String>) -> Self {
        Self {
            op,
            message: message.into(),
        }
    }

    /// Create an error from any error type raised by the adapter.
    pub fn from_source(op: &'static str, err: impl std::error::Error) -> Self {
        Self::new(op, err.to_string())
    }

    /// Name of the failed operation (e.g. `"insert"`).
    pub fn op(&self) -> &'static str {
        self.op
    }

    /// Adapter-provided description.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Errors that can occur while patching.
///
/// None of these are recovered internally. After an error the host tree
/// may be partially patched; callers needing atomicity must snapshot and
/// roll back on their side.
#[derive(Debug, Error)]
pub enum ReconcileError {
    /// A host operation failed.
    #[error(transparent)]
    Host(#[from] HostError),

    /// An old node was treated as mounted but carries no host handle.
    #[error("{kind} node was patched or moved before it was mounted")]
    NotMounted {
        /// Kind of the offending node
        kind: VNodeKind,
    },

    /// A component handle does not belong to this renderer.
    #[error("component instance {0} is not registered with this renderer")]
    UnknownInstance(InstanceId),

    /// Tree nesting exceeded [`ReconcileConfig::max_depth`](crate::ReconcileConfig::max_depth).
    #[error("patch depth exceeded the configured limit of {limit}")]
    DepthLimitExceeded {
        /// Configured limit
        limit: usize,
    },
}

/// Result type alias for renderer operations.
pub type ReconcileResult<T> = Result<T, ReconcileError>;

/// Result type alias for host adapter operations.
pub type HostResult<T> = Result<T, HostError>;
