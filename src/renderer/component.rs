//! Component mount, update and re-render.
//!
//! A component's rendered subtree lives in its [`ComponentInstance`], not in
//! the parent tree. Patching it means taking it out of the registry, patching
//! against a fresh render, and storing the fresh render back.

use tracing::trace;

use crate::component::{ComponentDef, ComponentInstance};
use crate::error::{ReconcileError, ReconcileResult};
use crate::host::HostOps;
use crate::id::{HostRef, InstanceId};
use crate::node::{VNode, VNodeKind};

use super::Renderer;

impl<H: HostOps> Renderer<H> {
    pub(super) fn process_component(
        &mut self,
        old: Option<&VNode>,
        new: &VNode,
        def: &ComponentDef,
        container: HostRef,
        anchor: Option<HostRef>,
    ) -> ReconcileResult<()> {
        match old {
            None => self.mount_component(new, def, container, anchor),
            Some(old) => self.update_component(old, new, def, container, anchor),
        }
    }

    fn mount_component(
        &mut self,
        new: &VNode,
        def: &ComponentDef,
        container: HostRef,
        anchor: Option<HostRef>,
    ) -> ReconcileResult<()> {
        let instance = ComponentInstance::new(
            def.clone(),
            new.props().clone(),
            new.child_nodes().to_vec(),
            container,
        );
        let id = self.instances.insert(instance);
        new.set_instance(id);
        trace!(component = def.name(), %id, "mount component");

        self.render_instance(id, anchor)?;
        new.set_host(self.first_host(new));
        self.stats.mounted += 1;
        Ok(())
    }

    fn update_component(
        &mut self,
        old: &VNode,
        new: &VNode,
        def: &ComponentDef,
        container: HostRef,
        anchor: Option<HostRef>,
    ) -> ReconcileResult<()> {
        let id = old.instance().ok_or(ReconcileError::NotMounted {
            kind: VNodeKind::Component,
        })?;
        new.set_instance(id);

        let has_slots = !old.child_nodes().is_empty() || !new.child_nodes().is_empty();
        if !has_slots && !def.should_update(old.props(), new.props()) {
            new.set_host(self.first_host(new));
            self.stats.patched += 1;
            return Ok(());
        }

        let instance = self.instances.get_mut(id).ok_or(ReconcileError::UnknownInstance(id))?;
        instance.props = new.props().clone();
        instance.slots = new.child_nodes().to_vec();
        instance.container = container;

        self.render_instance(id, anchor)?;
        new.set_host(self.first_host(new));
        self.stats.patched += 1;
        Ok(())
    }

    /// Render the instance again and patch its previous subtree into the
    /// result. The previous output's position wins over `anchor`.
    pub(super) fn render_instance(&mut self, id: InstanceId, anchor: Option<HostRef>) -> ReconcileResult<()> {
        let instance = self.instances.get_mut(id).ok_or(ReconcileError::UnknownInstance(id))?;
        let next = instance.def.render(&instance.props, &instance.slots);
        instance.render_count += 1;
        let container = instance.container;
        let placeholder = instance.placeholder;
        let previous = instance.sub_tree.take();
        self.stats.components_rendered += 1;

        // Host node right after the previous output, or the placeholder
        // when that output was empty.
        let anchor = match &previous {
            Some(prev) => self.next_host_node(prev).or(placeholder).or(anchor),
            None => anchor,
        };
        let result = self
            .patch(previous.as_ref(), &next, container, anchor)
            .and_then(|()| self.sync_placeholder(id, &next, container, anchor));

        if let Some(instance) = self.instances.get_mut(id) {
            instance.sub_tree = Some(next);
        }
        result
    }

    /// Keep a placeholder in the host tree iff `output` produced no host
    /// node.
    fn sync_placeholder(
        &mut self,
        id: InstanceId,
        output: &VNode,
        container: HostRef,
        anchor: Option<HostRef>,
    ) -> ReconcileResult<()> {
        let empty = self.first_host(output).is_none();
        let Some(instance) = self.instances.get_mut(id) else {
            return Ok(());
        };

        match (empty, instance.placeholder) {
            (false, Some(placeholder)) => {
                instance.placeholder = None;
                trace!(%id, node = %placeholder, "drop placeholder");
                self.host.remove(placeholder)?;
            }
            (true, None) => {
                let placeholder = self.host.create_text("")?;
                instance.placeholder = Some(placeholder);
                trace!(%id, node = %placeholder, "placeholder");
                self.host.insert(placeholder, container, anchor)?;
            }
            _ => {}
        }
        Ok(())
    }
}
