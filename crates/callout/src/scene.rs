//! Scene descriptions and built scenes.
//!
//! A scene is written in TOML as a list of `[[node]]` tables. Each table
//! names a node `type`, an optional inline `attrs` table and optional
//! nested `children`:
//!
//! ```toml
//! [[node]]
//! type = "Label"
//! attrs = { x = 170, y = 75 }
//!
//! [[node.children]]
//! type = "Tag"
//! attrs = { fill = "black", pointerDirection = "down", pointerWidth = 10, pointerHeight = 10 }
//!
//! [[node.children]]
//! type = "Text"
//! attrs = { text = "Tooltip pointing down", fill = "white", padding = 5 }
//! ```

use indexmap::IndexMap;
use serde::Deserialize;

use callout_core::{Node, NodeKind, attr::AttrValue, group::Group};

/// The parsed form of a scene file.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SceneDescription {
    #[serde(default, rename = "node")]
    nodes: Vec<NodeDescription>,
}

impl SceneDescription {
    pub fn new(nodes: Vec<NodeDescription>) -> Self {
        Self { nodes }
    }

    /// Top-level nodes, in drawing order.
    pub fn nodes(&self) -> &[NodeDescription] {
        &self.nodes
    }
}

/// One node and its subtree.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NodeDescription {
    #[serde(rename = "type")]
    kind: String,

    #[serde(default)]
    attrs: IndexMap<String, AttrValue>,

    #[serde(default)]
    children: Vec<NodeDescription>,
}

impl NodeDescription {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            attrs: IndexMap::new(),
            children: Vec::new(),
        }
    }

    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.attrs.insert(name.into(), value.into());
        self
    }

    pub fn with_child(mut self, child: NodeDescription) -> Self {
        self.children.push(child);
        self
    }

    /// The node class name, such as `"Label"`.
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Attributes in the order they were written.
    pub fn attrs(&self) -> &IndexMap<String, AttrValue> {
        &self.attrs
    }

    pub fn children(&self) -> &[NodeDescription] {
        &self.children
    }
}

/// A built scene: a root group holding the described nodes.
#[derive(Debug, Clone)]
pub struct Scene {
    root: Group,
}

impl Scene {
    pub(crate) fn new(root: Group) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Group {
        &self.root
    }

    /// All nodes below the root, depth first.
    pub fn descendants(&self) -> Vec<Node> {
        fn walk(node: &Node, out: &mut Vec<Node>) {
            for child in node.children() {
                out.push(child.clone());
                walk(&child, out);
            }
        }

        let mut out = Vec::new();
        walk(self.root.node(), &mut out);
        out
    }
}
