//! Element mount and update.

use tracing::trace;

use crate::error::{ReconcileError, ReconcileResult};
use crate::host::HostOps;
use crate::id::HostRef;
use crate::node::{Children, VNode, VNodeKind};

use super::Renderer;

impl<H: HostOps> Renderer<H> {
    pub(super) fn process_element(
        &mut self,
        old: Option<&VNode>,
        new: &VNode,
        tag: &str,
        container: HostRef,
        anchor: Option<HostRef>,
    ) -> ReconcileResult<()> {
        match old {
            None => self.mount_element(new, tag, container, anchor),
            Some(old) => self.patch_element(old, new),
        }
    }

    fn mount_element(
        &mut self,
        new: &VNode,
        tag: &str,
        container: HostRef,
        anchor: Option<HostRef>,
    ) -> ReconcileResult<()> {
        let el = self.host.create_element(tag)?;
        new.set_host(Some(el));
        trace!(tag, node = %el, "mount");

        for (key, value) in new.props().iter() {
            self.host.patch_prop(el, key, None, Some(value))?;
            self.stats.props_patched += 1;
        }

        // Children go in while the element is still detached.
        match new.children() {
            Children::Text(text) => self.host.set_element_text(el, text)?,
            Children::Array(nodes) | Children::Slots(nodes) => self.mount_children(nodes, el, None)?,
            Children::None => {}
        }

        self.host.insert(el, container, anchor)?;
        self.stats.mounted += 1;
        Ok(())
    }

    fn patch_element(&mut self, old: &VNode, new: &VNode) -> ReconcileResult<()> {
        let el = old.host_ref().ok_or(ReconcileError::NotMounted {
            kind: VNodeKind::Element,
        })?;
        new.set_host(Some(el));

        for delta in old.props().diff(new.props()) {
            self.host.patch_prop(el, delta.key, delta.old, delta.new)?;
            self.stats.props_patched += 1;
        }

        self.patch_children(old, new, el)?;
        self.stats.patched += 1;
        Ok(())
    }

    /// Reconcile element children by shape.
    ///
    /// | old \ new | none        | text             | list                   |
    /// |-----------|-------------|------------------|------------------------|
    /// | none      | -           | set text         | mount all              |
    /// | text      | clear text  | set if changed   | clear text, mount all  |
    /// | list      | unmount all | unmount, set     | keyed diff             |
    fn patch_children(&mut self, old: &VNode, new: &VNode, el: HostRef) -> ReconcileResult<()> {
        match (old.children(), new.children()) {
            (Children::None, Children::None) => {}
            (Children::Text(prev), Children::Text(next)) => {
                if prev != next {
                    self.set_element_text(el, next)?;
                }
            }
            (Children::Text(_), Children::None) => self.set_element_text(el, "")?,
            (Children::None, Children::Text(next)) => self.set_element_text(el, next)?,
            (Children::Text(_), _) => {
                self.set_element_text(el, "")?;
                self.mount_children(new.child_nodes(), el, None)?;
            }
            (Children::None, _) => self.mount_children(new.child_nodes(), el, None)?,
            (_, Children::Text(next)) => {
                self.unmount_children(old.child_nodes())?;
                self.set_element_text(el, next)?;
            }
            (_, Children::None) => self.unmount_children(old.child_nodes())?,
            (_, _) => self.patch_keyed_children(old.child_nodes(), new.child_nodes(), el, None)?,
        }
        Ok(())
    }

    fn set_element_text(&mut self, el: HostRef, text: &str) -> ReconcileResult<()> {
        self.host.set_element_text(el, text)?;
        self.stats.text_updates += 1;
        Ok(())
    }

    fn unmount_children(&mut self, children: &[VNode]) -> ReconcileResult<()> {
        for child in children {
            self.unmount(child)?;
        }
        Ok(())
    }
}
