//! HTML serialisation of a `MemoryHost` tree.
//!
//! Used to assert on rendered output in tests. Boolean props render as bare
//! attributes when true and are omitted when false; listener props are not
//! rendered at all.

use crate::id::HostRef;
use crate::props::{PropValue, Props};

use super::memory::{MemoryHost, NodeData};

impl MemoryHost {
    /// Render the children of `node` to HTML.
    pub fn inner_html(&self, node: HostRef) -> String {
        let mut output = String::new();
        for &child in self.children(node) {
            self.render_node(child, &mut output);
        }
        output
    }

    /// Render `node` itself (with its children) to HTML.
    pub fn outer_html(&self, node: HostRef) -> String {
        let mut output = String::new();
        self.render_node(node, &mut output);
        output
    }

    fn render_node(&self, node: HostRef, output: &mut String) {
        let Some(n) = self.node(node) else {
            return;
        };

        match &n.data {
            NodeData::Text(text) => output.push_str(&escape_html(text)),
            NodeData::Comment(text) => {
                output.push_str("<!--");
                output.push_str(text);
                output.push_str("-->");
            }
            NodeData::Element { tag, props } => {
                output.push('<');
                output.push_str(tag);
                render_props(props, output);

                if is_void_element(tag) {
                    output.push_str(" />");
                    return;
                }

                output.push('>');
                for &child in &n.children {
                    self.render_node(child, output);
                }
                output.push_str("</");
                output.push_str(tag);
                output.push('>');
            }
        }
    }
}

/// Render props as HTML attributes.
fn render_props(props: &Props, output: &mut String) {
    for (name, value) in props.iter() {
        match value {
            PropValue::Bool(false) | PropValue::Listener(_) => {}
            PropValue::Bool(true) => {
                output.push(' ');
                output.push_str(name);
            }
            PropValue::Str(_) | PropValue::Int(_) | PropValue::Float(_) => {
                output.push(' ');
                output.push_str(name);
                output.push_str("=\"");
                output.push_str(&escape_attr(&value.to_string()));
                output.push('"');
            }
        }
    }
}

/// Escape HTML special characters.
fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            _ => result.push(c),
        }
    }
    result
}

/// Escape attribute value special characters.
fn escape_attr(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '"' => result.push_str("&quot;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            _ => result.push(c),
        }
    }
    result
}

/// Check if element is a void element (self-closing).
fn is_void_element(tag: &str) -> bool {
    matches!(
        tag,
        "area"
            | "base"
            | "br"
            | "col"
            | "embed"
            | "hr"
            | "img"
            | "input"
            | "link"
            | "meta"
            | "param"
            | "source"
            | "track"
            | "wbr"
    )
}
