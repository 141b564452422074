//! Host-operations capability.
//!
//! The engine never touches a real tree. Every mutation goes through a
//! [`HostOps`] adapter supplied by the caller (browser DOM, terminal UI,
//! native widgets, ...), addressed by [`HostRef`] handles the adapter
//! allocates.
//!
//! - `memory`: in-memory reference adapter with call recording
//! - `html`: HTML serialisation of a [`MemoryHost`] tree

use crate::error::HostResult;
use crate::id::HostRef;
use crate::props::PropValue;

#[cfg(feature = "memory-host")]
mod html;
#[cfg(feature = "memory-host")]
mod memory;

#[cfg(feature = "memory-host")]
pub use memory::{HostCall, MemoryHost};

/// Operations the engine needs from a host tree.
///
/// Handles passed in are always ones the adapter returned earlier (or a
/// container the caller registered). The engine calls these synchronously,
/// one at a time, and propagates any error unchanged.
pub trait HostOps {
    /// Allocate a detached element of the given tag.
    fn create_element(&mut self, tag: &str) -> HostResult<HostRef>;

    /// Allocate a detached text node.
    fn create_text(&mut self, content: &str) -> HostResult<HostRef>;

    /// Allocate a detached comment node.
    fn create_comment(&mut self, content: &str) -> HostResult<HostRef>;

    /// Replace all rendered content of an element with plain text.
    fn set_element_text(&mut self, node: HostRef, text: &str) -> HostResult<()>;

    /// Replace the content of a text (or comment) node.
    fn set_text(&mut self, node: HostRef, text: &str) -> HostResult<()>;

    /// Insert `node` into `container` immediately before `anchor`, or at
    /// the end when `anchor` is `None`.
    ///
    /// Inserting an attached node moves it. Adapters must relocate the
    /// existing node, never recreate it.
    fn insert(&mut self, node: HostRef, container: HostRef, anchor: Option<HostRef>) -> HostResult<()>;

    /// Detach `node` from its parent. Succeeds silently if it is already
    /// detached.
    fn remove(&mut self, node: HostRef) -> HostResult<()>;

    /// Apply one prop delta. `new == None` means removal.
    fn patch_prop(
        &mut self,
        node: HostRef,
        key: &str,
        old: Option<&PropValue>,
        new: Option<&PropValue>,
    ) -> HostResult<()>;

    /// Following sibling of an attached node. The renderer uses it to find
    /// the insertion point right after a mounted subtree.
    fn next_sibling(&self, node: HostRef) -> Option<HostRef>;
}
