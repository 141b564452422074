//! Renderer - applies a new VNode tree to a host tree
//!
//! # Architecture
//!
//! ```text
//! render(vnode?, container)
//!       |
//!       v
//! patch(old?, new) --- dispatch on kind ---> text / comment / fragment
//!       |                                    element  (props + children)
//!       |                                    component (instance registry)
//!       v
//! patch_keyed_children(old[], new[])  -- five phases, LIS for moves
//!       |
//!       v
//! HostOps (create / insert / remove / patch_prop / ...)
//! ```
//!
//! The renderer owns the host adapter and the component instance registry.
//! The previously rendered tree lives on the [`Container`] passed to
//! [`Renderer::render`], so one renderer can drive several containers.
//!
//! Host handles flow forward: a patched node copies its host handle from
//! the old node it was matched with. A host node is only ever created on
//! mount and only ever destroyed by unmount; moves re-insert it.

mod children;
mod component;
mod element;
mod unmount;

use tracing::{debug, instrument, trace};

use crate::component::{ComponentInstance, InstanceRegistry};
use crate::error::{ReconcileError, ReconcileResult};
use crate::host::HostOps;
use crate::id::{HostRef, InstanceId};
use crate::node::{VNode, VNodeKind, VNodeType};

/// Default maximum nesting depth of a single patch pass.
const DEFAULT_MAX_DEPTH: usize = 512;

// =============================================================================
// Configuration and statistics
// =============================================================================

/// Configuration for a renderer.
///
/// ```
/// use tola_reconcile::ReconcileConfig;
///
/// let config = ReconcileConfig {
///     max_depth: 64,
///     ..ReconcileConfig::PROD
/// };
/// assert!(!config.check_duplicate_keys);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReconcileConfig {
    /// Maximum node nesting depth before patching fails with
    /// [`ReconcileError::DepthLimitExceeded`].
    /// Default: 512
    pub max_depth: usize,
    /// Warn when keyless children had to be reordered.
    pub warn_unkeyed_moves: bool,
    /// Warn when new siblings share a key.
    pub check_duplicate_keys: bool,
}

impl Default for ReconcileConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            warn_unkeyed_moves: cfg!(debug_assertions),
            check_duplicate_keys: cfg!(debug_assertions),
        }
    }
}

impl ReconcileConfig {
    /// Every diagnostic enabled.
    pub const DEV: Self = Self {
        max_depth: DEFAULT_MAX_DEPTH,
        warn_unkeyed_moves: true,
        check_duplicate_keys: true,
    };

    /// No diagnostics.
    pub const PROD: Self = Self {
        max_depth: DEFAULT_MAX_DEPTH,
        warn_unkeyed_moves: false,
        check_duplicate_keys: false,
    };

    /// Create config with a custom depth limit.
    pub fn new(max_depth: usize) -> Self {
        Self {
            max_depth,
            ..Self::default()
        }
    }
}

/// Counters for the last top-level call ([`Renderer::render`] or
/// [`Renderer::rerender`]).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub struct PatchStats {
    /// Nodes mounted fresh
    pub mounted: usize,
    /// Nodes patched in place
    pub patched: usize,
    /// Nodes unmounted
    pub unmounted: usize,
    /// Matched children relocated by the keyed diff
    pub moved: usize,
    /// Prop deltas applied
    pub props_patched: usize,
    /// Text content updates
    pub text_updates: usize,
    /// Component subtree renders
    pub components_rendered: usize,
}

// =============================================================================
// Container
// =============================================================================

/// A host container plus the tree last rendered into it.
#[derive(Debug)]
pub struct Container {
    host: HostRef,
    previous: Option<VNode>,
}

impl Container {
    /// Wrap a host node the caller owns. Nothing has been rendered into it.
    pub fn new(host: HostRef) -> Self {
        Self { host, previous: None }
    }

    /// Host node of the container.
    #[inline]
    pub fn host(&self) -> HostRef {
        self.host
    }

    /// Tree stored by the last render, if any.
    #[inline]
    pub fn previous(&self) -> Option<&VNode> {
        self.previous.as_ref()
    }
}

// =============================================================================
// Renderer
// =============================================================================

/// Reconciliation engine bound to one host adapter.
#[derive(Debug)]
pub struct Renderer<H> {
    host: H,
    instances: InstanceRegistry,
    config: ReconcileConfig,
    stats: PatchStats,
    depth: usize,
}

impl<H: HostOps> Renderer<H> {
    /// Create a renderer with default config.
    pub fn new(host: H) -> Self {
        Self::with_config(host, ReconcileConfig::default())
    }

    /// Create a renderer with custom config.
    pub fn with_config(host: H, config: ReconcileConfig) -> Self {
        Self {
            host,
            instances: InstanceRegistry::new(),
            config,
            stats: PatchStats::default(),
            depth: 0,
        }
    }

    #[inline]
    pub fn host(&self) -> &H {
        &self.host
    }

    #[inline]
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn into_host(self) -> H {
        self.host
    }

    #[inline]
    pub fn config(&self) -> &ReconcileConfig {
        &self.config
    }

    /// Counters of the last top-level call.
    #[inline]
    pub fn stats(&self) -> PatchStats {
        self.stats
    }

    /// Live component instances.
    #[inline]
    pub fn instances(&self) -> &InstanceRegistry {
        &self.instances
    }

    /// First host node currently produced by a mounted `node`.
    ///
    /// Unlike [`VNode::host_ref`], components are resolved through their
    /// live instance, so the answer stays current after
    /// [`rerender`](Self::rerender). An instance that renders nothing
    /// answers with its placeholder.
    pub fn host_node(&self, node: &VNode) -> Option<HostRef> {
        self.first_host(node)
    }

    /// First host node currently produced by a component instance.
    pub fn instance_host(&self, instance: InstanceId) -> Option<HostRef> {
        let instance = self.instances.get(instance)?;
        instance
            .sub_tree()
            .and_then(|sub_tree| self.first_host(sub_tree))
            .or(instance.placeholder())
    }

    /// Render `vnode` into `container`.
    ///
    /// - `Some(tree)`: patch the stored tree (if any) into `tree`, then store
    ///   `tree` as the container's previous tree.
    /// - `None`: unmount the stored tree and clear it.
    ///
    /// On error the host tree is left partially patched and the container
    /// stores the new tree anyway; rendering again re-attempts from there.
    #[instrument(level = "debug", skip_all, fields(container = %container.host()))]
    pub fn render(&mut self, vnode: Option<VNode>, container: &mut Container) -> ReconcileResult<()> {
        self.stats = PatchStats::default();

        let result = match vnode {
            None => match container.previous.take() {
                Some(previous) => self.unmount(&previous),
                None => Ok(()),
            },
            Some(vnode) => {
                let result = self.patch(container.previous.as_ref(), &vnode, container.host, None);
                container.previous = Some(vnode);
                result
            }
        };

        debug!(stats = ?self.stats, ok = result.is_ok(), "render finished");
        result
    }

    /// Patch `old` into `new` inside `container`.
    ///
    /// `old == None` mounts `new` before `anchor` (or at the end). When `old`
    /// is not the same node as `new` it is unmounted and `new` is mounted at
    /// its position.
    pub fn patch(
        &mut self,
        old: Option<&VNode>,
        new: &VNode,
        container: HostRef,
        anchor: Option<HostRef>,
    ) -> ReconcileResult<()> {
        let mut old = old;
        let mut anchor = anchor;

        if let Some(prev) = old {
            if std::ptr::eq(prev, new) {
                return Ok(());
            }
            if !prev.is_same_node(new) {
                anchor = self.next_host_node(prev).or(anchor);
                self.unmount(prev)?;
                old = None;
            }
        }

        if self.depth >= self.config.max_depth {
            return Err(ReconcileError::DepthLimitExceeded {
                limit: self.config.max_depth,
            });
        }

        self.depth += 1;
        let result = match new.node_type() {
            VNodeType::Text | VNodeType::Comment => self.process_leaf(old, new, container, anchor),
            VNodeType::Fragment => self.process_fragment(old, new, container, anchor),
            VNodeType::Element(tag) => self.process_element(old, new, tag, container, anchor),
            VNodeType::Component(def) => self.process_component(old, new, def, container, anchor),
        };
        self.depth -= 1;

        result
    }

    /// Re-render a component instance in place, e.g. after its own state
    /// changed.
    ///
    /// The component vnode in the stored tree keeps its old host handle;
    /// use [`host_node`](Self::host_node) or
    /// [`instance_host`](Self::instance_host) for the current one.
    #[instrument(level = "debug", skip(self))]
    pub fn rerender(&mut self, instance: InstanceId) -> ReconcileResult<()> {
        self.stats = PatchStats::default();
        if self.instances.get(instance).is_none() {
            return Err(ReconcileError::UnknownInstance(instance));
        }
        let result = self.render_instance(instance, None);
        debug!(stats = ?self.stats, ok = result.is_ok(), "rerender finished");
        result
    }

    /// Unmount `node` and its whole subtree, removing its host nodes.
    pub fn unmount(&mut self, node: &VNode) -> ReconcileResult<()> {
        self.unmount_with(node, true)
    }

    /// Relocate the host nodes of a mounted `node` before `anchor` in
    /// `container`. Nothing is recreated.
    pub fn move_node(
        &mut self,
        node: &VNode,
        container: HostRef,
        anchor: Option<HostRef>,
    ) -> ReconcileResult<()> {
        match node.kind() {
            VNodeKind::Element | VNodeKind::Text | VNodeKind::Comment => {
                let host = node.host_ref().ok_or(ReconcileError::NotMounted { kind: node.kind() })?;
                trace!(node = %host, "move");
                self.host.insert(host, container, anchor)?;
            }
            VNodeKind::Fragment => {
                for child in node.child_nodes() {
                    self.move_node(child, container, anchor)?;
                }
            }
            VNodeKind::Component => {
                let id = node.instance().ok_or(ReconcileError::NotMounted {
                    kind: VNodeKind::Component,
                })?;
                let instance = self.instances.get_mut(id).ok_or(ReconcileError::UnknownInstance(id))?;
                let placeholder = instance.placeholder;
                let sub_tree = instance.sub_tree.take();
                if let Some(sub_tree) = sub_tree {
                    let result = self.move_node(&sub_tree, container, anchor);
                    if let Some(instance) = self.instances.get_mut(id) {
                        instance.sub_tree = Some(sub_tree);
                    }
                    result?;
                }
                if let Some(placeholder) = placeholder {
                    self.host.insert(placeholder, container, anchor)?;
                }
            }
        }
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Leaves and fragments
    // ─────────────────────────────────────────────────────────────────────────

    fn process_leaf(
        &mut self,
        old: Option<&VNode>,
        new: &VNode,
        container: HostRef,
        anchor: Option<HostRef>,
    ) -> ReconcileResult<()> {
        let content = new.text_content().unwrap_or_default();

        let Some(old) = old else {
            let host = match new.kind() {
                VNodeKind::Comment => self.host.create_comment(content)?,
                _ => self.host.create_text(content)?,
            };
            new.set_host(Some(host));
            trace!(kind = %new.kind(), node = %host, "mount");
            self.host.insert(host, container, anchor)?;
            self.stats.mounted += 1;
            return Ok(());
        };

        let host = old.host_ref().ok_or(ReconcileError::NotMounted { kind: old.kind() })?;
        new.set_host(Some(host));
        if old.text_content() != new.text_content() {
            self.host.set_text(host, content)?;
            self.stats.text_updates += 1;
        }
        self.stats.patched += 1;
        Ok(())
    }

    fn process_fragment(
        &mut self,
        old: Option<&VNode>,
        new: &VNode,
        container: HostRef,
        anchor: Option<HostRef>,
    ) -> ReconcileResult<()> {
        match old {
            None => {
                self.mount_children(new.child_nodes(), container, anchor)?;
                self.stats.mounted += 1;
            }
            Some(old) => {
                self.patch_keyed_children(old.child_nodes(), new.child_nodes(), container, anchor)?;
                self.stats.patched += 1;
            }
        }
        Ok(())
    }

    fn mount_children(
        &mut self,
        children: &[VNode],
        container: HostRef,
        anchor: Option<HostRef>,
    ) -> ReconcileResult<()> {
        for child in children {
            self.patch(None, child, container, anchor)?;
        }
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Host positions
    // ─────────────────────────────────────────────────────────────────────────

    /// First host node produced by `node`. Empty fragments produce none.
    fn first_host(&self, node: &VNode) -> Option<HostRef> {
        match node.kind() {
            VNodeKind::Element | VNodeKind::Text | VNodeKind::Comment => node.host_ref(),
            VNodeKind::Fragment => node.child_nodes().iter().find_map(|c| self.first_host(c)),
            VNodeKind::Component => match self.live_instance(node) {
                Some(instance) => match instance.sub_tree() {
                    Some(sub_tree) => self.first_host(sub_tree).or(instance.placeholder()),
                    None => instance.placeholder().or(node.host_ref()),
                },
                None => node.host_ref(),
            },
        }
    }

    /// Last host node produced by `node`.
    fn last_host(&self, node: &VNode) -> Option<HostRef> {
        match node.kind() {
            VNodeKind::Element | VNodeKind::Text | VNodeKind::Comment => node.host_ref(),
            VNodeKind::Fragment => node.child_nodes().iter().rev().find_map(|c| self.last_host(c)),
            VNodeKind::Component => match self.live_instance(node) {
                Some(instance) => match instance.sub_tree() {
                    Some(sub_tree) => self.last_host(sub_tree).or(instance.placeholder()),
                    None => instance.placeholder().or(node.host_ref()),
                },
                None => node.host_ref(),
            },
        }
    }

    fn live_instance(&self, node: &VNode) -> Option<&ComponentInstance> {
        self.instances.get(node.instance()?)
    }

    /// Host node right after everything `node` produced.
    fn next_host_node(&self, node: &VNode) -> Option<HostRef> {
        self.last_host(node).and_then(|host| self.host.next_sibling(host))
    }

    /// First host node among `siblings[from..]`, else `fallback`.
    fn anchor_at(&self, siblings: &[VNode], from: usize, fallback: Option<HostRef>) -> Option<HostRef> {
        siblings
            .get(from..)
            .and_then(|rest| rest.iter().find_map(|n| self.first_host(n)))
            .or(fallback)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(all(test, feature = "memory-host"))]
mod tests {
    use super::*;
    use crate::host::MemoryHost;

    fn setup() -> (Renderer<MemoryHost>, Container) {
        let mut host = MemoryHost::new();
        let root = host.create_root("div");
        (Renderer::with_config(host, ReconcileConfig::DEV), Container::new(root))
    }

    #[test]
    fn test_mount_and_clear() {
        let (mut r, mut c) = setup();
        let tree = VNode::element("p")
            .with_prop("class", "intro")
            .child(VNode::text("hello"))
            .child(VNode::comment("marker"));

        r.render(Some(tree), &mut c).unwrap();
        assert_eq!(
            r.host().inner_html(c.host()),
            "<p class=\"intro\">hello<!--marker--></p>"
        );
        assert_eq!(r.stats().mounted, 3);
        assert!(c.previous().is_some());

        r.render(None, &mut c).unwrap();
        assert_eq!(r.host().inner_html(c.host()), "");
        assert!(c.previous().is_none());
        assert_eq!(r.stats().unmounted, 3);
        // Only the <p> itself is removed from the host.
        assert_eq!(r.host().remove_count(), 1);
    }

    #[test]
    fn test_render_none_into_empty_container() {
        let (mut r, mut c) = setup();
        r.render(None, &mut c).unwrap();
        assert!(r.host().calls().is_empty());
    }

    #[test]
    fn test_rerender_same_tree_is_idempotent() {
        let (mut r, mut c) = setup();
        let tree = || {
            VNode::element("ul").with_children((0..3i64).map(|i| {
                VNode::element("li")
                    .with_key(i)
                    .with_prop("data-i", i)
                    .with_prop("opacity", f64::NAN)
                    .with_text(format!("item {i}"))
            }))
        };

        r.render(Some(tree()), &mut c).unwrap();
        let html = r.host().inner_html(c.host());
        r.host_mut().clear_calls();

        r.render(Some(tree()), &mut c).unwrap();
        assert!(r.host().calls().is_empty());
        assert_eq!(r.host().inner_html(c.host()), html);
        assert_eq!(r.stats().patched, 4);
    }

    #[test]
    fn test_text_update_keeps_host_node() {
        let (mut r, mut c) = setup();
        r.render(Some(VNode::text("a")), &mut c).unwrap();
        let before = c.previous().and_then(VNode::host_ref);

        r.render(Some(VNode::text("b")), &mut c).unwrap();
        let after = c.previous().and_then(VNode::host_ref);

        assert_eq!(before, after);
        assert_eq!(r.host().inner_html(c.host()), "b");
        assert_eq!(r.stats().text_updates, 1);
    }

    #[test]
    fn test_root_kind_change_replaces_in_place() {
        let (mut r, mut c) = setup();
        r.render(Some(VNode::element("span").with_text("x")), &mut c).unwrap();
        r.render(Some(VNode::comment("gone")), &mut c).unwrap();

        assert_eq!(r.host().inner_html(c.host()), "<!--gone-->");
        assert_eq!(r.stats().unmounted, 1);
        assert_eq!(r.stats().mounted, 1);
    }

    #[test]
    fn test_replacement_keeps_position_among_siblings() {
        let (mut r, mut c) = setup();
        let tree = |middle: VNode| VNode::fragment([VNode::text("a"), middle, VNode::text("c")]);

        r.render(Some(tree(VNode::element("b"))), &mut c).unwrap();
        r.render(Some(tree(VNode::element("i"))), &mut c).unwrap();

        assert_eq!(r.host().inner_html(c.host()), "a<i></i>c");
    }

    #[test]
    fn test_nested_fragments_mount_in_order() {
        let (mut r, mut c) = setup();
        let tree = VNode::fragment([
            VNode::text("1"),
            VNode::fragment([]),
            VNode::fragment([VNode::text("2"), VNode::fragment([VNode::text("3")])]),
            VNode::text("4"),
        ]);

        r.render(Some(tree), &mut c).unwrap();
        assert_eq!(r.host().inner_html(c.host()), "1234");

        r.render(None, &mut c).unwrap();
        assert!(r.host().children(c.host()).is_empty());
    }

    #[test]
    fn test_depth_limit() {
        let mut host = MemoryHost::new();
        let root = host.create_root("div");
        let mut c = Container::new(root);
        let mut r = Renderer::with_config(host, ReconcileConfig::new(3));

        let mut tree = VNode::text("leaf");
        for _ in 0..4 {
            tree = VNode::element("div").child(tree);
        }

        let err = r.render(Some(tree), &mut c).unwrap_err();
        assert!(matches!(err, ReconcileError::DepthLimitExceeded { limit: 3 }));
    }

    #[test]
    fn test_host_error_propagates() {
        let mut host = MemoryHost::new();
        let root = host.create_root("div");
        let text = host.create_text("not a container").unwrap();
        let mut r = Renderer::new(host);
        let mut c = Container::new(root);

        let mut bogus = Container::new(text);
        let err = r.render(Some(VNode::element("p")), &mut bogus).unwrap_err();
        assert!(matches!(err, ReconcileError::Host(ref e) if e.op() == "insert"));
        // The tree is stored even though patching failed.
        assert!(bogus.previous().is_some());

        r.render(Some(VNode::element("p")), &mut c).unwrap();
        assert_eq!(r.host().inner_html(root), "<p></p>");
    }

    #[test]
    fn test_move_fragment() {
        let (mut r, mut c) = setup();
        let group = VNode::fragment([VNode::text("a"), VNode::text("b")]);
        let tail = VNode::text("z");
        r.patch(None, &group, c.host(), None).unwrap();
        r.patch(None, &tail, c.host(), None).unwrap();
        assert_eq!(r.host().inner_html(c.host()), "abz");

        let anchor = r.first_host(&group);
        r.move_node(&tail, c.host(), anchor).unwrap();
        assert_eq!(r.host().inner_html(c.host()), "zab");
        assert_eq!(r.host().move_count(), 1);

        r.move_node(&group, c.host(), None).unwrap();
        assert_eq!(r.host().inner_html(c.host()), "zab");
        assert_eq!(r.host().created_count(), 3);
    }

    #[test]
    fn test_move_unmounted_node_fails() {
        let (mut r, c) = setup();
        let err = r.move_node(&VNode::text("x"), c.host(), None).unwrap_err();
        assert!(matches!(err, ReconcileError::NotMounted { kind: VNodeKind::Text }));
    }
}
