//! Prelude module for common imports.
//!
//! ```
//! use tola_reconcile::prelude::*;
//!
//! let node = VNode::element("p").with_key(1).with_text("hi");
//! assert_eq!(node.kind(), VNodeKind::Element);
//! ```

// Node model
pub use crate::node::{Children, ChildrenShape, VNode, VNodeKind, VNodeType};

// Host capability
pub use crate::host::HostOps;

#[cfg(feature = "memory-host")]
pub use crate::host::{HostCall, MemoryHost};

// Renderer
pub use crate::renderer::{Container, PatchStats, ReconcileConfig, Renderer};

// Components
pub use crate::component::{Component, ComponentDef};

// Props
pub use crate::props::{ListenerId, PropValue, Props};

// Identity
pub use crate::id::{HostRef, InstanceId};
pub use crate::key::Key;

// Algorithms
pub use crate::algo::longest_increasing_subsequence;

// Error
pub use crate::error::{HostError, ReconcileError, ReconcileResult};
