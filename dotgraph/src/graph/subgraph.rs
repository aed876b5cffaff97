//! Subgraphs: named or anonymous groups of nodes that form a tree.
//!
//! A subgraph owns its children, so each subgraph has exactly one parent and
//! the tree can't contain cycles. Edges are never stored in subgraphs, they
//! belong to the top-level graph.

use super::node::{Node, NodeMap};
use crate::backends::dot::{quote_string, render_attributes};
use crate::core::attributes::{AttrValue, Attributes};
use crate::core::error::DotError;
use crate::core::format::{RenderBackend, RenderContext, Renderable};

#[derive(Debug, Clone, Default)]
pub struct SubGraph {
    name: String,
    attributes: Attributes,
    nodes: NodeMap,
    subgraphs: Vec<SubGraph>,
}

/// Pre-order iterator over a subgraph and all of its descendants.
#[derive(Debug)]
pub struct HierarchyIterator<'a> {
    stack: Vec<&'a SubGraph>,
}

impl<'a> Iterator for HierarchyIterator<'a> {
    type Item = &'a SubGraph;

    fn next(&mut self) -> Option<Self::Item> {
        let curr = self.stack.pop()?;
        for child in curr.subgraphs.iter().rev() {
            self.stack.push(child);
        }
        Some(curr)
    }
}

impl SubGraph {
    pub fn new(name: &str) -> Self {
        Self::with_attributes(name, Attributes::new())
    }

    pub fn with_attributes(name: &str, attributes: Attributes) -> Self {
        Self {
            name: name.to_string(),
            attributes,
            nodes: NodeMap::new(),
            subgraphs: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_anonymous(&self) -> bool {
        self.name.is_empty()
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    pub fn attributes_mut(&mut self) -> &mut Attributes {
        &mut self.attributes
    }

    pub fn set_attribute<V: Into<AttrValue>>(
        &mut self,
        name: &str,
        value: V,
    ) -> Result<(), DotError> {
        self.attributes.set(name, value)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn nodes(&self) -> std::slice::Iter<Node> {
        self.nodes.iter()
    }

    pub fn get_node(&self, name: &str) -> Option<&Node> {
        self.nodes.get(name)
    }

    pub fn get_node_mut(&mut self, name: &str) -> Option<&mut Node> {
        self.nodes.get_mut(name)
    }

    pub fn has_node(&self, name: &str) -> bool {
        self.nodes.contains(name)
    }

    /// Declares the node \p name in this subgraph, or merges \p attrs into
    /// the node if it's already there.
    pub fn add_node(&mut self, name: &str, attrs: Attributes) {
        self.nodes.add(name, &attrs);
    }

    /// Removes the node from this subgraph only.
    pub fn remove_node(&mut self, name: &str) -> Option<Node> {
        self.nodes.remove(name)
    }

    /// Removes the node from this subgraph and from all of its descendants.
    pub(crate) fn purge_node(&mut self, name: &str) -> Option<Node> {
        for child in self.subgraphs.iter_mut() {
            child.purge_node(name);
        }
        self.nodes.remove(name)
    }

    pub fn subgraphs(&self) -> &[SubGraph] {
        &self.subgraphs
    }

    /// Walks this subgraph and every descendant, parents first.
    pub fn iter_hierarchy(&self) -> HierarchyIterator {
        HierarchyIterator { stack: vec![self] }
    }

    /// \returns the names of the nodes in the whole hierarchy, in the order
    /// in which they are first seen.
    pub fn node_names(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        for graph in self.iter_hierarchy() {
            for node in graph.nodes() {
                if !names.iter().any(|n| n == node.name()) {
                    names.push(node.name().to_string());
                }
            }
        }
        names
    }

    /// Finds a descendant by name. Anonymous subgraphs can't be found.
    pub fn get_subgraph(&self, name: &str) -> Option<&SubGraph> {
        if name.is_empty() {
            return None;
        }
        self.iter_hierarchy().skip(1).find(|g| g.name == name)
    }

    pub fn get_subgraph_mut(&mut self, name: &str) -> Option<&mut SubGraph> {
        if name.is_empty() {
            return None;
        }
        for child in self.subgraphs.iter_mut() {
            if child.name == name {
                return Some(child);
            }
            if let Some(found) = child.get_subgraph_mut(name) {
                return Some(found);
            }
        }
        None
    }

    /// Attaches \p sub as a child of this subgraph, treating this subgraph as
    /// the root of its own tree. See `attach_under`.
    pub fn add_subgraph(&mut self, sub: SubGraph) {
        self.attach_under(None, sub);
    }

    /// Attaches \p sub below the descendant \p parent (or below this
    /// subgraph when \p parent is None). Every node in the hierarchy of \p sub
    /// is copied into this subgraph's namespace, merging attributes. If a
    /// subgraph with the same name is already in the tree, the contents of
    /// \p sub are merged into it instead of adding a second copy.
    /// \returns false if \p parent could not be found; nothing is changed.
    pub(crate) fn attach_under(
        &mut self,
        parent: Option<&str>,
        sub: SubGraph,
    ) -> bool {
        if let Some(p) = parent {
            if self.get_subgraph(p).is_none() {
                return false;
            }
        }

        for graph in sub.iter_hierarchy() {
            for node in graph.nodes() {
                self.nodes.add(node.name(), node.attributes());
            }
        }

        if let Some(existing) = self.get_subgraph_mut(&sub.name) {
            #[cfg(feature = "log")]
            log::debug!("Merging duplicate subgraph \"{}\"", sub.name);
            existing.absorb(sub);
            return true;
        }

        let target = match parent {
            Some(p) => match self.get_subgraph_mut(p) {
                Some(t) => t,
                None => return false,
            },
            None => self,
        };
        target.subgraphs.push(sub);
        true
    }

    /// Merges the attributes, nodes and children of \p other into this
    /// subgraph.
    pub(crate) fn absorb(&mut self, other: SubGraph) {
        self.attributes.merge(&other.attributes);
        for node in other.nodes() {
            self.nodes.add(node.name(), node.attributes());
        }
        for child in other.subgraphs {
            match self.get_subgraph_mut(&child.name) {
                Some(existing) => existing.absorb(child),
                None => self.subgraphs.push(child),
            }
        }
    }

    /// Detaches the first subgraph named \p name from anywhere in the tree.
    /// The nodes of the subgraph stay in the namespace.
    pub fn remove_subgraph(&mut self, name: &str) -> Option<SubGraph> {
        if name.is_empty() {
            return None;
        }
        if let Some(idx) = self.subgraphs.iter().position(|g| g.name == name) {
            return Some(self.subgraphs.remove(idx));
        }
        for child in self.subgraphs.iter_mut() {
            if let Some(found) = child.remove_subgraph(name) {
                return Some(found);
            }
        }
        None
    }

    /// Writes the attributes, nodes and subgraphs of this graph.
    pub(crate) fn render_body(
        &self,
        depth: usize,
        ctx: &RenderContext,
        canvas: &mut dyn RenderBackend,
    ) {
        render_attributes(&self.attributes, depth, canvas);
        for node in self.nodes() {
            node.render(depth, ctx, canvas);
        }
        let inner = ctx.subgraph();
        for sub in self.subgraphs.iter() {
            sub.render(depth, &inner, canvas);
        }
    }
}

impl Renderable for SubGraph {
    fn render(
        &self,
        depth: usize,
        ctx: &RenderContext,
        canvas: &mut dyn RenderBackend,
    ) {
        if self.is_anonymous() {
            canvas.write_line(depth, "subgraph {");
        } else {
            let header = format!("subgraph {} {{", quote_string(&self.name));
            canvas.write_line(depth, &header);
        }
        self.render_body(depth + 1, &ctx.subgraph(), canvas);
        canvas.write_line(depth, "}");
    }
}
