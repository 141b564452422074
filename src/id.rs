//! Handles that tie virtual nodes to state living outside the VNode tree.
//!
//! A mounted [`VNode`](crate::VNode) never points at a host object or at a
//! component instance directly. It stores one of these small `Copy`
//! handles instead:
//!
//! - [`HostRef`]: index into the host adapter's node store
//! - [`InstanceId`]: index into the renderer's component registry
//!
//! Both are plain integers, so the tree stays acyclic and `Clone`-able
//! without any shared ownership.

use std::fmt;

// =============================================================================
// HostRef
// =============================================================================

/// Opaque handle to a host node, allocated by a [`HostOps`](crate::HostOps)
/// adapter.
///
/// The engine only copies, compares, and passes these back to the adapter.
/// What the number means is entirely up to the adapter.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[must_use]
pub struct HostRef(u64);

impl HostRef {
    /// Create a handle from a raw adapter value.
    #[inline]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Get the raw adapter value.
    #[inline]
    pub const fn as_raw(&self) -> u64 {
        self.0
    }
}

impl fmt::Debug for HostRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HostRef({})", self.0)
    }
}

impl fmt::Display for HostRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.0)
    }
}

// =============================================================================
// InstanceId
// =============================================================================

/// Handle to a live component instance in a [`Renderer`](crate::Renderer).
///
/// Ids are never reused within one renderer, so a stale id reliably fails
/// with [`ReconcileError::UnknownInstance`](crate::ReconcileError::UnknownInstance).
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[must_use]
pub struct InstanceId(pub(crate) u64);

impl InstanceId {
    /// Get the raw id.
    #[inline]
    pub const fn as_raw(&self) -> u64 {
        self.0
    }
}

impl fmt::Debug for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "InstanceId({})", self.0)
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// =============================================================================
// Tests
// =============================================================================
