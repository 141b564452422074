//! VNode - one node of a declared tree for one render pass
//!
//! Built with consuming builder methods, then handed to the renderer. Once
//! built, the structural fields (type, key, props, children) are only
//! readable; the renderer alone writes the host and instance handles.

use std::cell::Cell;

use compact_str::CompactString;

use crate::component::ComponentDef;
use crate::id::{HostRef, InstanceId};
use crate::key::Key;
use crate::props::{PropKey, PropValue, Props};

use super::{Children, ChildrenShape, Tag, VNodeKind, VNodeType};

// =============================================================================
// VNode
// =============================================================================

/// Virtual node.
///
/// # Cloning
///
/// `clone()` copies the structure only. The copy is unmounted: it carries
/// no host or instance handle, so it can be mounted somewhere else without
/// aliasing the original's host nodes.
#[derive(Debug)]
pub struct VNode {
    node_type: VNodeType,
    key: Option<Key>,
    props: Props,
    children: Children,
    host: Cell<Option<HostRef>>,
    instance: Cell<Option<InstanceId>>,
}

impl VNode {
    fn with_type(node_type: VNodeType, children: Children) -> Self {
        Self {
            node_type,
            key: None,
            props: Props::new(),
            children,
            host: Cell::new(None),
            instance: Cell::new(None),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Constructors
    // ─────────────────────────────────────────────────────────────────────────

    /// Create an element node.
    pub fn element(tag: impl Into<Tag>) -> Self {
        Self::with_type(VNodeType::Element(tag.into()), Children::None)
    }

    /// Create a text leaf.
    pub fn text(content: impl Into<CompactString>) -> Self {
        Self::with_type(VNodeType::Text, Children::Text(content.into()))
    }

    /// Create a comment leaf.
    pub fn comment(content: impl Into<CompactString>) -> Self {
        Self::with_type(VNodeType::Comment, Children::Text(content.into()))
    }

    /// Create a fragment from child nodes.
    pub fn fragment(children: impl IntoIterator<Item = VNode>) -> Self {
        Self::with_type(VNodeType::Fragment, Children::Array(children.into_iter().collect()))
    }

    /// Create a component node.
    pub fn component(def: ComponentDef) -> Self {
        Self::with_type(VNodeType::Component(def), Children::None)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Builder
    // ─────────────────────────────────────────────────────────────────────────

    /// Set the sibling identity key.
    pub fn with_key(mut self, key: impl Into<Key>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Set one prop (replacing an existing prop of the same name).
    pub fn with_prop(mut self, name: impl Into<PropKey>, value: impl Into<PropValue>) -> Self {
        self.props.set(name, value);
        self
    }

    /// Set all props at once.
    pub fn with_props(mut self, props: Props) -> Self {
        self.props = props;
        self
    }

    /// Set element text content.
    ///
    /// On Text/Comment leaves this replaces the leaf content.
    pub fn with_text(mut self, text: impl Into<CompactString>) -> Self {
        self.children = Children::Text(text.into());
        self
    }

    /// Set child nodes.
    ///
    /// Components receive them as slot content; everything else as an
    /// ordered child list.
    pub fn with_children(mut self, children: impl IntoIterator<Item = VNode>) -> Self {
        let nodes = children.into_iter().collect();
        self.children = match self.node_type {
            VNodeType::Component(_) => Children::Slots(nodes),
            _ => Children::Array(nodes),
        };
        self
    }

    /// Append one child node.
    pub fn child(mut self, child: VNode) -> Self {
        if let Some(nodes) = self.children.nodes_mut() {
            nodes.push(child);
            return self;
        }
        self.with_children([child])
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    /// Kind and type payload.
    #[inline]
    pub fn node_type(&self) -> &VNodeType {
        &self.node_type
    }

    /// Payload-free kind.
    #[inline]
    pub fn kind(&self) -> VNodeKind {
        self.node_type.kind()
    }

    /// Element tag, if this is an element.
    pub fn tag(&self) -> Option<&str> {
        match &self.node_type {
            VNodeType::Element(tag) => Some(tag),
            _ => None,
        }
    }

    /// Component definition, if this is a component.
    pub fn component_def(&self) -> Option<&ComponentDef> {
        match &self.node_type {
            VNodeType::Component(def) => Some(def),
            _ => None,
        }
    }

    /// Sibling identity key.
    #[inline]
    pub fn key(&self) -> Option<&Key> {
        self.key.as_ref()
    }

    /// Props (empty when absent).
    #[inline]
    pub fn props(&self) -> &Props {
        &self.props
    }

    /// Children payload.
    #[inline]
    pub fn children(&self) -> &Children {
        &self.children
    }

    /// Derived children shape.
    #[inline]
    pub fn shape(&self) -> ChildrenShape {
        self.children.shape()
    }

    /// Child nodes (array or slots); empty for other shapes.
    #[inline]
    pub fn child_nodes(&self) -> &[VNode] {
        self.children.nodes()
    }

    /// Text payload: leaf content for Text/Comment, text content for elements.
    #[inline]
    pub fn text_content(&self) -> Option<&str> {
        self.children.as_text()
    }

    /// Host node produced by the last mount or patch of this node.
    ///
    /// Fragments never own a host node. Components mirror their
    /// subtree's root as of the last patch that went through this node;
    /// [`Renderer::host_node`](crate::Renderer::host_node) resolves the
    /// current one after a re-render.
    #[inline]
    pub fn host_ref(&self) -> Option<HostRef> {
        self.host.get()
    }

    /// Component instance handle (components only, once mounted).
    #[inline]
    pub fn instance(&self) -> Option<InstanceId> {
        self.instance.get()
    }

    /// Identity rule: same kind, same type, same key (both absent counts).
    #[inline]
    pub fn is_same_node(&self, other: &VNode) -> bool {
        self.key == other.key && self.node_type.same_type(&other.node_type)
    }

    pub(crate) fn set_host(&self, host: Option<HostRef>) {
        self.host.set(host);
    }

    pub(crate) fn set_instance(&self, id: InstanceId) {
        self.instance.set(Some(id));
    }
}

impl Clone for VNode {
    fn clone(&self) -> Self {
        Self {
            node_type: self.node_type.clone(),
            key: self.key.clone(),
            props: self.props.clone(),
            children: self.children.clone(),
            host: Cell::new(None),
            instance: Cell::new(None),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::Component;

    struct Empty;

    impl Component for Empty {
        fn render(&self, _props: &Props, _slots: &[VNode]) -> VNode {
            VNode::fragment([])
        }
    }

    #[test]
    fn test_element_builder() {
        let node = VNode::element("ul")
            .with_key("list")
            .with_prop("class", "items")
            .child(VNode::element("li").with_text("a"))
            .child(VNode::element("li").with_text("b"));

        assert_eq!(node.kind(), VNodeKind::Element);
        assert_eq!(node.tag(), Some("ul"));
        assert_eq!(node.key(), Some(&Key::from("list")));
        assert_eq!(node.shape(), ChildrenShape::Array);
        assert_eq!(node.child_nodes().len(), 2);
        assert_eq!(node.child_nodes()[1].text_content(), Some("b"));
        assert!(node.host_ref().is_none());
    }

    #[test]
    fn test_shape_follows_children() {
        assert_eq!(VNode::element("p").shape(), ChildrenShape::None);
        assert_eq!(VNode::element("p").with_text("hi").shape(), ChildrenShape::Text);
        assert_eq!(VNode::text("hi").shape(), ChildrenShape::Text);
        assert_eq!(VNode::fragment([]).shape(), ChildrenShape::Array);

        let comp = VNode::component(ComponentDef::new(Empty)).child(VNode::text("slot"));
        assert_eq!(comp.shape(), ChildrenShape::Slots);
    }

    #[test]
    fn test_identity_rule() {
        let a = VNode::element("li").with_key(1);
        assert!(a.is_same_node(&VNode::element("li").with_key(1).with_text("changed")));
        assert!(!a.is_same_node(&VNode::element("li").with_key(2)));
        assert!(!a.is_same_node(&VNode::element("div").with_key(1)));
        assert!(!a.is_same_node(&VNode::text("li").with_key(1)));
        assert!(!a.is_same_node(&VNode::element("li")));

        assert!(VNode::element("li").is_same_node(&VNode::element("li")));
        assert!(VNode::text("a").is_same_node(&VNode::text("b")));
        assert!(!VNode::text("a").is_same_node(&VNode::comment("a")));
    }

    #[test]
    fn test_component_identity_by_definition() {
        let def = ComponentDef::new(Empty);
        let other = ComponentDef::new(Empty);
        assert!(VNode::component(def.clone()).is_same_node(&VNode::component(def)));
        assert!(!VNode::component(other.clone()).is_same_node(&VNode::component(ComponentDef::new(Empty))));
    }

    #[test]
    fn test_clone_is_unmounted() {
        let node = VNode::element("div");
        node.set_host(Some(HostRef::from_raw(3)));
        node.set_instance(InstanceId(1));

        let copy = node.clone();
        assert_eq!(node.host_ref(), Some(HostRef::from_raw(3)));
        assert!(copy.host_ref().is_none());
        assert!(copy.instance().is_none());
        assert!(copy.is_same_node(&node));
    }

    #[test]
    fn test_vnode_is_not_sync() {
        static_assertions::assert_not_impl_any!(VNode: Sync);
    }
}
