//! Node type sum type
//!
//! `VNodeType` folds a node's kind and its type payload into one closed
//! variant, so dispatch is an exhaustive `match` and an element can never
//! carry a component definition (or vice versa).

use std::fmt;

use compact_str::CompactString;

use crate::component::ComponentDef;

/// Element tag name.
pub type Tag = CompactString;

/// Kind and type payload of a VNode.
#[derive(Debug, Clone)]
pub enum VNodeType {
    /// Host element with its tag
    Element(Tag),
    /// Text leaf
    Text,
    /// Comment leaf (placeholders for conditionally absent content)
    Comment,
    /// Children without a host node of their own
    Fragment,
    /// Component with its definition
    Component(ComponentDef),
}

impl VNodeType {
    /// Get the payload-free kind.
    #[inline]
    pub fn kind(&self) -> VNodeKind {
        match self {
            Self::Element(_) => VNodeKind::Element,
            Self::Text => VNodeKind::Text,
            Self::Comment => VNodeKind::Comment,
            Self::Fragment => VNodeKind::Fragment,
            Self::Component(_) => VNodeKind::Component,
        }
    }

    /// Kind and type equality (the key-free half of the identity rule).
    pub fn same_type(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Element(a), Self::Element(b)) => a == b,
            (Self::Component(a), Self::Component(b)) => a.ptr_eq(b),
            (Self::Text, Self::Text)
            | (Self::Comment, Self::Comment)
            | (Self::Fragment, Self::Fragment) => true,
            _ => false,
        }
    }
}

/// Payload-free node kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VNodeKind {
    Element,
    Text,
    Comment,
    Fragment,
    Component,
}

impl VNodeKind {
    /// Lowercase name for diagnostics.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Element => "element",
            Self::Text => "text",
            Self::Comment => "comment",
            Self::Fragment => "fragment",
            Self::Component => "component",
        }
    }

    /// Kinds that own exactly one host node.
    #[inline]
    pub const fn owns_host_node(self) -> bool {
        matches!(self, Self::Element | Self::Text | Self::Comment)
    }
}

impl fmt::Display for VNodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
