//! Component definitions and the renderer-owned instance registry.
//!
//! A component is the one place where the engine calls out to user code to
//! (re)compute a subtree. Everything else about component lifecycles is
//! out of scope: the engine only keeps enough per-instance state to diff a
//! fresh render against the previous one.
//!
//! # Ownership
//!
//! A Component [`VNode`] holds an [`InstanceId`], not the instance itself.
//! Instances live in an [`InstanceRegistry`] owned by the
//! [`Renderer`](crate::Renderer), and the previous rendered subtree is
//! stashed there between renders. An instance whose subtree renders nothing
//! keeps an empty text node in the host tree so it can be re-rendered in
//! place.

use std::fmt;
use std::rc::Rc;

use rustc_hash::FxHashMap;

use crate::id::{HostRef, InstanceId};
use crate::node::VNode;
use crate::props::Props;

// =============================================================================
// Component trait
// =============================================================================

/// User-provided component definition.
///
/// Components may keep their own state behind interior mutability and ask
/// the renderer to [`rerender`](crate::Renderer::rerender) them when it
/// changes.
pub trait Component {
    /// Name used in diagnostics.
    fn name(&self) -> &str {
        "Anonymous"
    }

    /// Produce the subtree for the given props and slot content.
    fn render(&self, props: &Props, slots: &[VNode]) -> VNode;

    /// Decide whether a parent update with new props requires a re-render.
    ///
    /// Slot content always forces a re-render, regardless of this hook.
    fn should_update(&self, old_props: &Props, new_props: &Props) -> bool {
        old_props != new_props
    }
}

/// Shared handle to a component definition.
///
/// Two definitions are the same component type iff they are the same
/// allocation, mirroring how element types compare by tag.
#[derive(Clone)]
pub struct ComponentDef(Rc<dyn Component>);

impl ComponentDef {
    /// Wrap a component definition.
    pub fn new(component: impl Component + 'static) -> Self {
        Self(Rc::new(component))
    }

    /// Wrap an already shared definition.
    pub fn from_rc(component: Rc<dyn Component>) -> Self {
        Self(component)
    }

    /// Check whether both handles refer to the same definition.
    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        std::ptr::addr_eq(Rc::as_ptr(&self.0), Rc::as_ptr(&other.0))
    }

    /// Component name.
    pub fn name(&self) -> &str {
        self.0.name()
    }

    pub(crate) fn render(&self, props: &Props, slots: &[VNode]) -> VNode {
        self.0.render(props, slots)
    }

    pub(crate) fn should_update(&self, old_props: &Props, new_props: &Props) -> bool {
        self.0.should_update(old_props, new_props)
    }
}

impl fmt::Debug for ComponentDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ComponentDef({})", self.name())
    }
}

// =============================================================================
// Instances
// =============================================================================

/// Live state of one mounted component.
#[derive(Debug)]
pub struct ComponentInstance {
    pub(crate) def: ComponentDef,
    pub(crate) props: Props,
    pub(crate) slots: Vec<VNode>,
    /// Host container the subtree is mounted into
    pub(crate) container: HostRef,
    /// Previous rendered subtree; `None` while it is being patched
    pub(crate) sub_tree: Option<VNode>,
    /// Empty text node marking the instance's position while its subtree
    /// produces no host node
    pub(crate) placeholder: Option<HostRef>,
    pub(crate) render_count: u64,
}

impl ComponentInstance {
    pub(crate) fn new(def: ComponentDef, props: Props, slots: Vec<VNode>, container: HostRef) -> Self {
        Self {
            def,
            props,
            slots,
            container,
            sub_tree: None,
            placeholder: None,
            render_count: 0,
        }
    }

    /// Component definition.
    pub fn def(&self) -> &ComponentDef {
        &self.def
    }

    /// Props of the last update.
    pub fn props(&self) -> &Props {
        &self.props
    }

    /// Currently mounted subtree.
    pub fn sub_tree(&self) -> Option<&VNode> {
        self.sub_tree.as_ref()
    }

    /// Host node holding the instance's position while its subtree renders
    /// nothing (e.g. an empty fragment).
    pub fn placeholder(&self) -> Option<HostRef> {
        self.placeholder
    }

    /// How many times the subtree has been rendered.
    pub fn render_count(&self) -> u64 {
        self.render_count
    }
}

/// Registry of live component instances.
#[derive(Debug, Default)]
pub struct InstanceRegistry {
    instances: FxHashMap<InstanceId, ComponentInstance>,
    next_id: u64,
}

impl InstanceRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, instance: ComponentInstance) -> InstanceId {
        self.next_id += 1;
        let id = InstanceId(self.next_id);
        self.instances.insert(id, instance);
        id
    }

    /// Look up an instance.
    pub fn get(&self, id: InstanceId) -> Option<&ComponentInstance> {
        self.instances.get(&id)
    }

    pub(crate) fn get_mut(&mut self, id: InstanceId) -> Option<&mut ComponentInstance> {
        self.instances.get_mut(&id)
    }

    pub(crate) fn remove(&mut self, id: InstanceId) -> Option<ComponentInstance> {
        self.instances.remove(&id)
    }

    /// Number of live instances.
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    /// Check if no instance is alive.
    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Label;

    impl Component for Label {
        fn name(&self) -> &str {
            "Label"
        }

        fn render(&self, _props: &Props, _slots: &[VNode]) -> VNode {
            VNode::text("label")
        }
    }

    #[test]
    fn test_def_identity_is_by_allocation() {
        let a = ComponentDef::new(Label);
        let b = ComponentDef::new(Label);
        assert!(a.ptr_eq(&a.clone()));
        assert!(!a.ptr_eq(&b));
        assert_eq!(format!("{a:?}"), "ComponentDef(Label)");
    }

    #[test]
    fn test_registry_ids_are_not_reused() {
        let mut registry = InstanceRegistry::new();
        let def = ComponentDef::new(Label);
        let root = HostRef::from_raw(1);

        let first = registry.insert(ComponentInstance::new(def.clone(), Props::new(), Vec::new(), root));
        registry.remove(first);
        let second = registry.insert(ComponentInstance::new(def, Props::new(), Vec::new(), root));

        assert_ne!(first, second);
        assert!(registry.get(first).is_none());
        assert_eq!(registry.len(), 1);
    }
}
