//! Unmount primitive.
//!
//! Runs over an explicit worklist so deep trees cannot exhaust the stack.
//! The visiting order matches plain recursion: children are unmounted
//! depth-first before their parent's host node is removed.

use tracing::trace;

use crate::error::{ReconcileError, ReconcileResult};
use crate::host::HostOps;
use crate::node::{VNode, VNodeKind};

use super::Renderer;

enum Step<'a> {
    /// Unmount a node; `remove` says whether its own host nodes must be
    /// detached (false when an ancestor's removal takes them along).
    Enter(&'a VNode, bool),
    /// Detach an element after its children were unmounted.
    Remove(&'a VNode),
}

impl<H: HostOps> Renderer<H> {
    pub(super) fn unmount_with(&mut self, root: &VNode, remove: bool) -> ReconcileResult<()> {
        let mut stack = vec![Step::Enter(root, remove)];

        while let Some(step) = stack.pop() {
            match step {
                Step::Remove(node) => self.remove_host(node)?,
                Step::Enter(node, remove) => {
                    self.stats.unmounted += 1;
                    trace!(kind = %node.kind(), node = ?node.host_ref(), remove, "unmount");

                    match node.kind() {
                        VNodeKind::Text | VNodeKind::Comment => {
                            if remove {
                                self.remove_host(node)?;
                            }
                        }
                        VNodeKind::Element => {
                            if remove {
                                stack.push(Step::Remove(node));
                            }
                            for child in node.child_nodes().iter().rev() {
                                stack.push(Step::Enter(child, false));
                            }
                        }
                        VNodeKind::Fragment => {
                            for child in node.child_nodes().iter().rev() {
                                stack.push(Step::Enter(child, remove));
                            }
                        }
                        VNodeKind::Component => self.unmount_component(node, remove)?,
                    }
                }
            }
        }

        Ok(())
    }

    fn unmount_component(&mut self, node: &VNode, remove: bool) -> ReconcileResult<()> {
        let Some(id) = node.instance() else {
            // Never mounted (e.g. an earlier render failed before reaching it).
            return Ok(());
        };
        let instance = self.instances.remove(id).ok_or(ReconcileError::UnknownInstance(id))?;
        trace!(component = instance.def.name(), %id, "release instance");

        if let Some(sub_tree) = &instance.sub_tree {
            self.unmount_with(sub_tree, remove)?;
        }
        if remove && let Some(placeholder) = instance.placeholder {
            self.host.remove(placeholder)?;
        }
        Ok(())
    }

    fn remove_host(&mut self, node: &VNode) -> ReconcileResult<()> {
        let host = node.host_ref().ok_or(ReconcileError::NotMounted { kind: node.kind() })?;
        self.host.remove(host)?;
        Ok(())
    }
}
