//! Children payload of a VNode
//!
//! The shape tag is derived from the payload on demand, so the two can
//! never disagree.

use compact_str::CompactString;

use super::VNode;

/// Children description of a VNode.
#[derive(Debug, Clone, Default)]
pub enum Children {
    /// No children
    #[default]
    None,
    /// A single text payload (element text content, or the content of a
    /// Text/Comment leaf)
    Text(CompactString),
    /// Ordered child nodes
    Array(Vec<VNode>),
    /// Slot content handed to a component's render
    Slots(Vec<VNode>),
}

/// Shape of a [`Children`] payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChildrenShape {
    None,
    Text,
    Array,
    Slots,
}

impl Children {
    /// Shape tag of this payload.
    #[inline]
    pub fn shape(&self) -> ChildrenShape {
        match self {
            Self::None => ChildrenShape::None,
            Self::Text(_) => ChildrenShape::Text,
            Self::Array(_) => ChildrenShape::Array,
            Self::Slots(_) => ChildrenShape::Slots,
        }
    }

    /// Get the text payload.
    #[inline]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Get child nodes (array or slots); empty for the other shapes.
    #[inline]
    pub fn nodes(&self) -> &[VNode] {
        match self {
            Self::Array(nodes) | Self::Slots(nodes) => nodes,
            Self::None | Self::Text(_) => &[],
        }
    }

    /// Check if this payload holds child nodes.
    #[inline]
    pub fn is_list(&self) -> bool {
        matches!(self, Self::Array(_) | Self::Slots(_))
    }

    pub(crate) fn nodes_mut(&mut self) -> Option<&mut Vec<VNode>> {
        match self {
            Self::Array(nodes) | Self::Slots(nodes) => Some(nodes),
            Self::None | Self::Text(_) => None,
        }
    }
}
