//! Virtual node model.
//!
//! - `VNode`: one declared node with its key, props, and children
//! - `VNodeType` / `VNodeKind`: closed kind variant (with and without payload)
//! - `Children` / `ChildrenShape`: children payload and its derived shape tag

mod children;
mod types;
mod vnode;

pub use children::{Children, ChildrenShape};
pub use types::{Tag, VNodeKind, VNodeType};
pub use vnode::VNode;
