//! tola-reconcile - Host-agnostic virtual tree reconciliation
//!
//! ## Core Concepts
//!
//! **VNode trees**: every render pass builds a fresh tree of [`VNode`]s
//! (elements, text, comments, fragments, components). The [`Renderer`]
//! patches the previously rendered tree into the new one and applies the
//! difference to a real tree through a [`HostOps`] adapter.
//!
//! **Identity**: two siblings are the same node across renders iff their
//! kind, type, and key match (two absent keys match). Same nodes keep their
//! host node; anything else is unmounted and mounted fresh.
//!
//! **Keyed children diff**: sibling lists are reconciled in five phases
//! (prefix, suffix, pure mount, pure unmount, unknown middle). The middle
//! uses a longest increasing subsequence so only out-of-order nodes move.
//!
//! ## Modules
//! - `node`: VNode model
//! - `host`: host-operations capability and the in-memory reference host
//! - `renderer`: patch dispatcher, per-kind patchers, children diff
//! - `component`: component definitions and the instance registry
//! - `props`: prop values and prop diffing
//! - `algo`: longest increasing subsequence
//!
//! ## Usage
//!
//! ```
//! # #[cfg(feature = "memory-host")]
//! # fn main() -> Result<(), tola_reconcile::ReconcileError> {
//! use tola_reconcile::{Container, MemoryHost, Renderer, VNode};
//!
//! let mut host = MemoryHost::new();
//! let root = host.create_root("div");
//! let mut container = Container::new(root);
//! let mut renderer = Renderer::new(host);
//!
//! let list = |keys: &[i64]| {
//!     VNode::element("ul").with_children(
//!         keys.iter().map(|&k| VNode::element("li").with_key(k).with_text(k.to_string())),
//!     )
//! };
//!
//! renderer.render(Some(list(&[1, 2, 3])), &mut container)?;
//! renderer.render(Some(list(&[3, 1, 2])), &mut container)?;
//!
//! assert_eq!(renderer.stats().moved, 1);
//! assert_eq!(
//!     renderer.host().inner_html(root),
//!     "<ul><li>3</li><li>1</li><li>2</li></ul>"
//! );
//! # Ok(())
//! # }
//! # #[cfg(not(feature = "memory-host"))]
//! # fn main() {}
//! ```

// =============================================================================
// Modules
// =============================================================================

/// VNode model: VNode, VNodeType, VNodeKind, Children
pub mod node;

/// Host-operations capability and reference host
pub mod host;

/// Patch dispatcher and children diff
pub mod renderer;

/// Component definitions and instances
pub mod component;

/// Prop values and prop diffing
pub mod props;

/// Sibling identity keys
pub mod key;

/// Host and instance handles
pub mod id;

/// Algorithms: longest increasing subsequence
pub mod algo;

/// Error types
pub mod error;

/// Prelude for common imports
pub mod prelude;

// =============================================================================
// Re-exports
// =============================================================================

// Node model
pub use node::{Children, ChildrenShape, Tag, VNode, VNodeKind, VNodeType};

// Host capability
pub use host::HostOps;

#[cfg(feature = "memory-host")]
pub use host::{HostCall, MemoryHost};

// Renderer
pub use renderer::{Container, PatchStats, ReconcileConfig, Renderer};

// Components
pub use component::{Component, ComponentDef, ComponentInstance, InstanceRegistry};

// Props
pub use props::{ListenerId, PropDelta, PropKey, PropValue, Props};

// Identity
pub use id::{HostRef, InstanceId};
pub use key::Key;

// Error types
pub use error::{HostError, HostResult, ReconcileError, ReconcileResult};
