//! In-memory reference host.
//!
//! `MemoryHost` keeps an arena of element/text/comment nodes and records
//! every call the engine makes, so tests can assert both the final tree and
//! the exact operations that produced it (how many moves, which nodes were
//! recreated, ...).

use compact_str::CompactString;

use crate::error::{HostError, HostResult};
use crate::id::HostRef;
use crate::node::Tag;
use crate::props::{PropValue, Props};

use super::HostOps;

// =============================================================================
// Recorded calls
// =============================================================================

/// One recorded [`HostOps`] call.
#[derive(Debug, Clone, PartialEq)]
pub enum HostCall {
    CreateElement { node: HostRef, tag: Tag },
    CreateText { node: HostRef, content: CompactString },
    CreateComment { node: HostRef, content: CompactString },
    SetElementText { node: HostRef, text: CompactString },
    SetText { node: HostRef, text: CompactString },
    /// `moved` is true when the node was attached before the call
    Insert {
        node: HostRef,
        container: HostRef,
        anchor: Option<HostRef>,
        moved: bool,
    },
    Remove { node: HostRef },
    PatchProp {
        node: HostRef,
        key: CompactString,
        old: Option<PropValue>,
        new: Option<PropValue>,
    },
}

impl HostCall {
    /// Check if this call relocated an attached node.
    pub fn is_move(&self) -> bool {
        matches!(self, Self::Insert { moved: true, .. })
    }

    /// Check if this call allocated a node.
    pub fn is_create(&self) -> bool {
        matches!(
            self,
            Self::CreateElement { .. } | Self::CreateText { .. } | Self::CreateComment { .. }
        )
    }
}

// =============================================================================
// Node storage
// =============================================================================

#[derive(Debug, Clone)]
pub(super) enum NodeData {
    Element { tag: Tag, props: Props },
    Text(CompactString),
    Comment(CompactString),
}

#[derive(Debug, Clone)]
pub(super) struct MemoryNode {
    pub(super) data: NodeData,
    pub(super) parent: Option<HostRef>,
    pub(super) children: Vec<HostRef>,
}

impl MemoryNode {
    fn new(data: NodeData) -> Self {
        Self {
            data,
            parent: None,
            children: Vec::new(),
        }
    }
}

/// In-memory host tree with call recording.
#[derive(Debug, Default)]
pub struct MemoryHost {
    nodes: Vec<MemoryNode>,
    calls: Vec<HostCall>,
}

impl MemoryHost {
    /// Create an empty host.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a detached element to use as a render container.
    ///
    /// Not recorded in the call log.
    pub fn create_root(&mut self, tag: &str) -> HostRef {
        self.alloc(NodeData::Element {
            tag: tag.into(),
            props: Props::new(),
        })
    }

    fn alloc(&mut self, data: NodeData) -> HostRef {
        let node = HostRef::from_raw(self.nodes.len() as u64);
        self.nodes.push(MemoryNode::new(data));
        node
    }

    pub(super) fn node(&self, node: HostRef) -> Option<&MemoryNode> {
        self.nodes.get(node.as_raw() as usize)
    }

    fn node_mut(&mut self, node: HostRef) -> Option<&mut MemoryNode> {
        self.nodes.get_mut(node.as_raw() as usize)
    }

    fn expect_node(&self, op: &'static str, node: HostRef) -> HostResult<&MemoryNode> {
        self.node(node)
            .ok_or_else(|| HostError::new(op, format!("unknown node {node}")))
    }

    fn expect_element(&self, op: &'static str, node: HostRef) -> HostResult<()> {
        match self.expect_node(op, node)?.data {
            NodeData::Element { .. } => Ok(()),
            _ => Err(HostError::new(op, format!("{node} is not an element"))),
        }
    }

    /// Unlink `node` from its parent's child list.
    fn detach(&mut self, node: HostRef) {
        let Some(parent) = self.node(node).and_then(|n| n.parent) else {
            return;
        };
        if let Some(p) = self.node_mut(parent) {
            p.children.retain(|&c| c != node);
        }
        if let Some(n) = self.node_mut(node) {
            n.parent = None;
        }
    }

    fn is_ancestor_or_self(&self, candidate: HostRef, mut node: HostRef) -> bool {
        loop {
            if candidate == node {
                return true;
            }
            match self.node(node).and_then(|n| n.parent) {
                Some(parent) => node = parent,
                None => return false,
            }
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Inspection
    // ─────────────────────────────────────────────────────────────────────────

    /// Recorded calls, oldest first.
    pub fn calls(&self) -> &[HostCall] {
        &self.calls
    }

    /// Take the recorded calls, leaving the log empty.
    pub fn take_calls(&mut self) -> Vec<HostCall> {
        std::mem::take(&mut self.calls)
    }

    /// Clear the call log.
    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }

    /// Number of allocated nodes (attached or not).
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Child handles of a node.
    pub fn children(&self, node: HostRef) -> &[HostRef] {
        self.node(node).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// Parent of a node.
    pub fn parent(&self, node: HostRef) -> Option<HostRef> {
        self.node(node).and_then(|n| n.parent)
    }

    /// Element tag.
    pub fn tag(&self, node: HostRef) -> Option<&str> {
        match &self.node(node)?.data {
            NodeData::Element { tag, .. } => Some(tag),
            _ => None,
        }
    }

    /// Content of a text or comment node.
    pub fn text(&self, node: HostRef) -> Option<&str> {
        match &self.node(node)?.data {
            NodeData::Text(text) | NodeData::Comment(text) => Some(text),
            NodeData::Element { .. } => None,
        }
    }

    /// Current value of an element prop.
    pub fn prop(&self, node: HostRef, key: &str) -> Option<&PropValue> {
        match &self.node(node)?.data {
            NodeData::Element { props, .. } => props.get(key),
            _ => None,
        }
    }

    /// Concatenated text of all descendant text nodes.
    pub fn text_content(&self, node: HostRef) -> String {
        let mut buf = String::new();
        self.collect_text(node, &mut buf);
        buf
    }

    fn collect_text(&self, node: HostRef, buf: &mut String) {
        let Some(n) = self.node(node) else {
            return;
        };
        match &n.data {
            NodeData::Text(text) => buf.push_str(text),
            NodeData::Comment(_) => {}
            NodeData::Element { .. } => {
                for &child in &n.children {
                    self.collect_text(child, buf);
                }
            }
        }
    }

    /// Number of recorded moves.
    pub fn move_count(&self) -> usize {
        self.calls.iter().filter(|c| c.is_move()).count()
    }

    /// Number of recorded inserts of detached nodes.
    pub fn insert_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, HostCall::Insert { moved: false, .. }))
            .count()
    }

    /// Number of recorded removals.
    pub fn remove_count(&self) -> usize {
        self.calls.iter().filter(|c| matches!(c, HostCall::Remove { .. })).count()
    }

    /// Number of recorded prop patches.
    pub fn prop_patch_count(&self) -> usize {
        self.calls.iter().filter(|c| matches!(c, HostCall::PatchProp { .. })).count()
    }

    /// Number of recorded node allocations.
    pub fn created_count(&self) -> usize {
        self.calls.iter().filter(|c| c.is_create()).count()
    }
}

impl HostOps for MemoryHost {
    fn create_element(&mut self, tag: &str) -> HostResult<HostRef> {
        let node = self.alloc(NodeData::Element {
            tag: tag.into(),
            props: Props::new(),
        });
        self.calls.push(HostCall::CreateElement { node, tag: tag.into() });
        Ok(node)
    }

    fn create_text(&mut self, content: &str) -> HostResult<HostRef> {
        let node = self.alloc(NodeData::Text(content.into()));
        self.calls.push(HostCall::CreateText {
            node,
            content: content.into(),
        });
        Ok(node)
    }

    fn create_comment(&mut self, content: &str) -> HostResult<HostRef> {
        let node = self.alloc(NodeData::Comment(content.into()));
        self.calls.push(HostCall::CreateComment {
            node,
            content: content.into(),
        });
        Ok(node)
    }

    fn set_element_text(&mut self, node: HostRef, text: &str) -> HostResult<()> {
        self.expect_element("set_element_text", node)?;

        let old_children = self
            .node_mut(node)
            .map(|n| std::mem::take(&mut n.children))
            .unwrap_or_default();
        for child in old_children {
            if let Some(c) = self.node_mut(child) {
                c.parent = None;
            }
        }

        if !text.is_empty() {
            let text_node = self.alloc(NodeData::Text(text.into()));
            if let Some(t) = self.node_mut(text_node) {
                t.parent = Some(node);
            }
            if let Some(n) = self.node_mut(node) {
                n.children.push(text_node);
            }
        }

        self.calls.push(HostCall::SetElementText { node, text: text.into() });
        Ok(())
    }

    fn set_text(&mut self, node: HostRef, text: &str) -> HostResult<()> {
        let target = self
            .node_mut(node)
            .ok_or_else(|| HostError::new("set_text", format!("unknown node {node}")))?;
        match &mut target.data {
            NodeData::Text(content) | NodeData::Comment(content) => *content = text.into(),
            NodeData::Element { .. } => {
                return Err(HostError::new("set_text", format!("{node} is an element")));
            }
        }
        self.calls.push(HostCall::SetText { node, text: text.into() });
        Ok(())
    }

    fn insert(&mut self, node: HostRef, container: HostRef, anchor: Option<HostRef>) -> HostResult<()> {
        self.expect_node("insert", node)?;
        self.expect_element("insert", container)?;
        if self.is_ancestor_or_self(node, container) {
            return Err(HostError::new(
                "insert",
                format!("{node} cannot be inserted into its own subtree"),
            ));
        }
        if let Some(anchor) = anchor
            && self.parent(anchor) != Some(container)
        {
            return Err(HostError::new(
                "insert",
                format!("anchor {anchor} is not a child of {container}"),
            ));
        }

        let moved = self.parent(node).is_some();
        let call = HostCall::Insert {
            node,
            container,
            anchor,
            moved,
        };

        // Inserting a node before itself leaves it in place.
        if anchor == Some(node) {
            self.calls.push(call);
            return Ok(());
        }

        self.detach(node);
        let siblings = self.children(container);
        let index = match anchor {
            Some(anchor) => siblings
                .iter()
                .position(|&c| c == anchor)
                .unwrap_or(siblings.len()),
            None => siblings.len(),
        };
        if let Some(c) = self.node_mut(container) {
            c.children.insert(index, node);
        }
        if let Some(n) = self.node_mut(node) {
            n.parent = Some(container);
        }

        self.calls.push(call);
        Ok(())
    }

    fn remove(&mut self, node: HostRef) -> HostResult<()> {
        self.expect_node("remove", node)?;
        self.detach(node);
        self.calls.push(HostCall::Remove { node });
        Ok(())
    }

    fn patch_prop(
        &mut self,
        node: HostRef,
        key: &str,
        old: Option<&PropValue>,
        new: Option<&PropValue>,
    ) -> HostResult<()> {
        let target = self
            .node_mut(node)
            .ok_or_else(|| HostError::new("patch_prop", format!("unknown node {node}")))?;
        let NodeData::Element { props, .. } = &mut target.data else {
            return Err(HostError::new("patch_prop", format!("{node} is not an element")));
        };
        match new {
            Some(value) => props.set(key, value.clone()),
            None => {
                props.remove(key);
            }
        }

        self.calls.push(HostCall::PatchProp {
            node,
            key: key.into(),
            old: old.cloned(),
            new: new.cloned(),
        });
        Ok(())
    }

    fn next_sibling(&self, node: HostRef) -> Option<HostRef> {
        let siblings = self.children(self.parent(node)?);
        let index = siblings.iter().position(|&c| c == node)?;
        siblings.get(index + 1).copied()
    }
}

// =============================================================================
// Tests
// =============================================================================
