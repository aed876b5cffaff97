//! Nodes, and the ordered namespace that holds them.

use crate::backends::dot::{quote_string, render_attributes};
use crate::core::attributes::Attributes;
use crate::core::format::{RenderBackend, RenderContext, Renderable};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    name: String,
    attributes: Attributes,
}

impl Node {
    pub fn new(name: &str, attributes: Attributes) -> Self {
        Self {
            name: name.to_string(),
            attributes,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    pub fn attributes_mut(&mut self) -> &mut Attributes {
        &mut self.attributes
    }
}

impl Renderable for Node {
    fn render(
        &self,
        depth: usize,
        ctx: &RenderContext,
        canvas: &mut dyn RenderBackend,
    ) {
        let name = quote_string(&self.name);
        if self.attributes.is_empty() || ctx.in_subgraph {
            canvas.write_line(depth, &format!("{};", name));
            return;
        }
        canvas.write_line(depth, &format!("{} [", name));
        render_attributes(&self.attributes, depth + 1, canvas);
        canvas.write_line(depth, "];");
    }
}

/// Maps node names to nodes, and remembers the order in which the nodes were
/// declared, because hashmap does not maintain a persistent iteration order.
#[derive(Debug, Clone, Default)]
pub struct NodeMap {
    nodes: Vec<Node>,
    index: HashMap<String, usize>,
}

impl NodeMap {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            index: HashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&Node> {
        self.index.get(name).map(|idx| &self.nodes[*idx])
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Node> {
        match self.index.get(name) {
            Some(idx) => Some(&mut self.nodes[*idx]),
            None => None,
        }
    }

    /// Declares the node \p name, or merges \p attrs into the existing node.
    pub fn add(&mut self, name: &str, attrs: &Attributes) {
        if let Some(node) = self.get_mut(name) {
            node.attributes.merge(attrs);
            return;
        }
        self.index.insert(name.to_string(), self.nodes.len());
        self.nodes.push(Node::new(name, attrs.clone()));
    }

    pub fn remove(&mut self, name: &str) -> Option<Node> {
        let idx = self.index.remove(name)?;
        let node = self.nodes.remove(idx);
        for (i, n) in self.nodes.iter().enumerate().skip(idx) {
            self.index.insert(n.name.clone(), i);
        }
        Some(node)
    }

    pub fn iter(&self) -> std::slice::Iter<Node> {
        self.nodes.iter()
    }
}

#[test]
fn test_node_map() {
    let mut map = NodeMap::new();
    let red = Attributes::from_pairs(vec![("color", "red")]).unwrap();
    let boxed = Attributes::from_pairs(vec![("shape", "box")]).unwrap();
    map.add("a", &red);
    map.add("b", &Attributes::new());
    map.add("c", &Attributes::new());
    map.add("a", &boxed);
    assert_eq!(map.len(), 3);
    assert_eq!(map.get("a").unwrap().attributes().len(), 2);

    assert!(map.remove("a").is_some());
    assert!(map.remove("a").is_none());
    assert_eq!(map.get("c").unwrap().name(), "c");
    let names: Vec<&str> = map.iter().map(|n| n.name()).collect();
    assert_eq!(names, vec!["b", "c"]);
}
