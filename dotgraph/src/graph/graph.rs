//! The top-level graph: the root of the subgraph tree and the owner of all
//! edges.

use super::edge::{Edge, Endpoint};
use super::node::Node;
use super::subgraph::{HierarchyIterator, SubGraph};
use crate::backends::dot::{quote_string, DotWriter};
use crate::core::attributes::{AttrValue, Attributes};
use crate::core::error::DotError;
use crate::core::format::{RenderBackend, RenderContext, Renderable};
use std::fmt;

/// Selects one of the four kinds of DOT graphs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GraphKind {
    /// Edges have a direction ('->') rather than none ('--').
    pub directed: bool,
    /// At most one edge per pair of nodes.
    pub strict: bool,
}

impl GraphKind {
    pub const GRAPH: GraphKind = GraphKind::new(false, false);
    pub const DIGRAPH: GraphKind = GraphKind::new(true, false);
    pub const STRICT_GRAPH: GraphKind = GraphKind::new(false, true);
    pub const STRICT_DIGRAPH: GraphKind = GraphKind::new(true, true);

    pub const fn new(directed: bool, strict: bool) -> Self {
        Self { directed, strict }
    }

    pub fn keyword(&self) -> &'static str {
        if self.directed {
            "digraph"
        } else {
            "graph"
        }
    }

    pub fn edge_op(&self) -> &'static str {
        if self.directed {
            "->"
        } else {
            "--"
        }
    }
}

impl fmt::Display for GraphKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.strict {
            write!(f, "strict ")?;
        }
        write!(f, "{}", self.keyword())
    }
}

#[derive(Debug, Clone)]
pub struct Graph {
    kind: GraphKind,
    // The name, attributes, nodes and subgraphs of the root.
    body: SubGraph,
    edges: Vec<Edge>,
}

impl Graph {
    pub fn new(name: &str, kind: GraphKind) -> Self {
        Self {
            kind,
            body: SubGraph::new(name),
            edges: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        self.body.name()
    }

    pub fn kind(&self) -> GraphKind {
        self.kind
    }

    pub fn is_directed(&self) -> bool {
        self.kind.directed
    }

    pub fn is_strict(&self) -> bool {
        self.kind.strict
    }

    pub fn attributes(&self) -> &Attributes {
        self.body.attributes()
    }

    pub fn attributes_mut(&mut self) -> &mut Attributes {
        self.body.attributes_mut()
    }

    pub fn set_attribute<V: Into<AttrValue>>(
        &mut self,
        name: &str,
        value: V,
    ) -> Result<(), DotError> {
        self.body.set_attribute(name, value)
    }

    /// The root of the subgraph tree.
    pub fn root(&self) -> &SubGraph {
        &self.body
    }

    // Nodes.

    pub fn node_count(&self) -> usize {
        self.body.node_count()
    }

    pub fn nodes(&self) -> std::slice::Iter<Node> {
        self.body.nodes()
    }

    pub fn get_node(&self, name: &str) -> Option<&Node> {
        self.body.get_node(name)
    }

    pub fn get_node_mut(&mut self, name: &str) -> Option<&mut Node> {
        self.body.get_node_mut(name)
    }

    pub fn has_node(&self, name: &str) -> bool {
        self.body.has_node(name)
    }

    /// Declares the node \p name, or merges \p attrs into the existing node.
    pub fn add_node(&mut self, name: &str, attrs: Attributes) {
        self.body.add_node(name, attrs);
    }

    /// Removes the node from the graph and from every subgraph, along with
    /// all of the edges that reference it.
    pub fn remove_node(&mut self, name: &str) -> Option<Node> {
        let node = self.body.purge_node(name);
        let before = self.edges.len();
        self.edges.retain(|e| !e.touches(name));
        #[cfg(feature = "log")]
        log::debug!(
            "Removed node \"{}\" and {} edges",
            name,
            before - self.edges.len()
        );
        #[cfg(not(feature = "log"))]
        let _ = before;
        node
    }

    // Edges.

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn edges(&self) -> std::slice::Iter<Edge> {
        self.edges.iter()
    }

    /// Adds an edge between the nodes \p a and \p b, declaring them if needed.
    pub fn add_edge(&mut self, a: &str, b: &str, attrs: Attributes) {
        self.add_edge_between(Endpoint::new(a), Endpoint::new(b), attrs);
    }

    /// Adds an edge between two endpoints, declaring the nodes if needed.
    /// In a strict graph an existing edge between the same pair of nodes
    /// absorbs \p attrs instead.
    pub fn add_edge_between(
        &mut self,
        source: Endpoint,
        destination: Endpoint,
        attrs: Attributes,
    ) {
        if !self.has_node(&source.node) {
            self.add_node(&source.node, Attributes::new());
        }
        if !self.has_node(&destination.node) {
            self.add_node(&destination.node, Attributes::new());
        }

        if self.kind.strict {
            if let Some(edge) =
                self.get_edge_mut(&source.node, &destination.node)
            {
                edge.attributes_mut().merge(&attrs);
                return;
            }
        }
        self.edges.push(Edge::new(source, destination, attrs));
    }

    /// \returns the first edge from \p a to \p b (or between them, in
    /// undirected graphs).
    pub fn get_edge(&self, a: &str, b: &str) -> Option<&Edge> {
        let directed = self.kind.directed;
        self.edges.iter().find(|e| e.connects(a, b, directed))
    }

    pub fn get_edge_mut(&mut self, a: &str, b: &str) -> Option<&mut Edge> {
        let directed = self.kind.directed;
        self.edges.iter_mut().find(|e| e.connects(a, b, directed))
    }

    pub fn has_edge(&self, a: &str, b: &str) -> bool {
        self.get_edge(a, b).is_some()
    }

    /// Removes the first edge that matches the pair. The nodes are kept.
    /// Removing an edge that does not exist does nothing.
    pub fn remove_edge(&mut self, a: &str, b: &str) -> Option<Edge> {
        let directed = self.kind.directed;
        let idx = self.edges.iter().position(|e| e.connects(a, b, directed))?;
        Some(self.edges.remove(idx))
    }

    /// Lazily visits the edges that match the filter. A None filter matches
    /// any node. In undirected graphs an edge matches in either orientation.
    pub fn iter_edges<'a>(
        &'a self,
        source: Option<&'a str>,
        destination: Option<&'a str>,
    ) -> impl Iterator<Item = &'a Edge> + 'a {
        let directed = self.kind.directed;
        let matches = |filter: Option<&str>, name: &str| {
            filter.map_or(true, |f| f == name)
        };
        self.edges.iter().filter(move |e| {
            let forward = matches(source, e.source())
                && matches(destination, e.destination());
            if directed || forward {
                return forward;
            }
            matches(source, e.destination()) && matches(destination, e.source())
        })
    }

    /// The nodes that have an edge leading to \p node.
    pub fn predecessors(&self, node: &str) -> Vec<&str> {
        if !self.kind.directed {
            return self.neighbors(node);
        }
        let mut res: Vec<&str> = Vec::new();
        for e in self.edges.iter().filter(|e| e.destination() == node) {
            push_unique(&mut res, e.source());
        }
        res
    }

    /// The nodes that have an edge coming from \p node.
    pub fn successors(&self, node: &str) -> Vec<&str> {
        if !self.kind.directed {
            return self.neighbors(node);
        }
        let mut res: Vec<&str> = Vec::new();
        for e in self.edges.iter().filter(|e| e.source() == node) {
            push_unique(&mut res, e.destination());
        }
        res
    }

    /// The union of the predecessors and the successors of \p node.
    pub fn neighbors(&self, node: &str) -> Vec<&str> {
        let mut res: Vec<&str> = Vec::new();
        for e in self.edges.iter() {
            if e.destination() == node {
                push_unique(&mut res, e.source());
            } else if e.source() == node {
                push_unique(&mut res, e.destination());
            }
        }
        res
    }

    // Subgraphs.

    pub fn subgraphs(&self) -> &[SubGraph] {
        self.body.subgraphs()
    }

    /// Attaches \p sub to the root of the graph. The nodes of \p sub are
    /// promoted into the graph's namespace.
    pub fn add_subgraph(&mut self, sub: SubGraph) {
        self.body.attach_under(None, sub);
    }

    /// Attaches \p sub below the subgraph named \p parent.
    /// \returns false if there is no such subgraph.
    pub fn add_subgraph_to(&mut self, parent: &str, sub: SubGraph) -> bool {
        self.body.attach_under(Some(parent), sub)
    }

    pub fn get_subgraph(&self, name: &str) -> Option<&SubGraph> {
        self.body.get_subgraph(name)
    }

    pub fn get_subgraph_mut(&mut self, name: &str) -> Option<&mut SubGraph> {
        self.body.get_subgraph_mut(name)
    }

    /// Detaches a subgraph from its parent. Its nodes stay in the graph.
    pub fn remove_subgraph(&mut self, name: &str) -> Option<SubGraph> {
        self.body.remove_subgraph(name)
    }

    /// Walks the root and every subgraph, parents first. The first item is
    /// the root, which carries the name and attributes of the graph.
    pub fn iter_hierarchy(&self) -> HierarchyIterator {
        self.body.iter_hierarchy()
    }

    /// \returns the graph in the DOT format.
    pub fn to_dot(&self) -> String {
        let mut writer = DotWriter::new();
        let ctx = RenderContext::new(self.kind.directed);
        self.render(0, &ctx, &mut writer);
        writer.finalize()
    }
}

fn push_unique<'a>(list: &mut Vec<&'a str>, name: &'a str) {
    if !list.contains(&name) {
        list.push(name);
    }
}

impl Renderable for Graph {
    fn render(
        &self,
        depth: usize,
        ctx: &RenderContext,
        canvas: &mut dyn RenderBackend,
    ) {
        let mut header = self.kind.to_string();
        if !self.name().is_empty() {
            header.push(' ');
            header.push_str(&quote_string(self.name()));
        }
        header.push_str(" {");
        canvas.write_line(depth, &header);

        self.body.render_body(depth + 1, ctx, canvas);
        for edge in self.edges.iter() {
            edge.render(depth + 1, ctx, canvas);
        }
        canvas.write_line(depth, "}");
    }
}

impl fmt::Display for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_dot())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attrs(pairs: &[(&str, &str)]) -> Attributes {
        Attributes::from_pairs(pairs.iter().cloned()).unwrap()
    }

    #[test]
    fn strict_edges_merge() {
        let mut g = Graph::new("g", GraphKind::STRICT_DIGRAPH);
        g.add_edge("a", "b", attrs(&[("color", "red")]));
        g.add_edge("a", "b", attrs(&[("label", "x")]));
        assert_eq!(g.edge_count(), 1);
        let e = g.get_edge("a", "b").unwrap();
        assert_eq!(e.attributes().len(), 2);

        // The opposite direction is a different edge.
        g.add_edge("b", "a", Attributes::new());
        assert_eq!(g.edge_count(), 2);
    }

    #[test]
    fn multi_edges_accumulate() {
        let mut g = Graph::new("", GraphKind::DIGRAPH);
        g.add_edge("a", "b", Attributes::new());
        g.add_edge("a", "b", Attributes::new());
        assert_eq!(g.edge_count(), 2);
        assert_eq!(g.iter_edges(Some("a"), Some("b")).count(), 2);
        assert_eq!(g.node_count(), 2);
    }

    #[test]
    fn undirected_identity() {
        let mut g = Graph::new("", GraphKind::STRICT_GRAPH);
        g.add_edge("a", "b", Attributes::new());
        g.add_edge("b", "a", attrs(&[("color", "blue")]));
        assert_eq!(g.edge_count(), 1);
        assert!(g.has_edge("a", "b"));
        assert!(g.has_edge("b", "a"));
        assert_eq!(g.iter_edges(Some("b"), None).count(), 1);
        assert!(g.remove_edge("b", "a").is_some());
        assert!(!g.has_edge("a", "b"));
        assert!(g.remove_edge("b", "a").is_none());
        assert_eq!(g.node_count(), 2);
    }

    #[test]
    fn cascade_delete() {
        let mut g = Graph::new("", GraphKind::DIGRAPH);
        g.add_node("keep", attrs(&[("shape", "box")]));
        g.add_edge("a", "b", Attributes::new());
        g.add_edge("b", "c", Attributes::new());
        g.add_edge("c", "keep", Attributes::new());
        g.add_edge("b", "b", Attributes::new());

        let mut sub = SubGraph::new("s");
        sub.add_node("b", Attributes::new());
        g.add_subgraph(sub);

        assert!(g.remove_node("b").is_some());
        assert_eq!(g.node_count(), 3);
        assert_eq!(g.edge_count(), 1);
        assert!(g.has_edge("c", "keep"));
        assert_eq!(g.get_node("keep").unwrap().attributes().len(), 1);
        assert!(!g.get_subgraph("s").unwrap().has_node("b"));
        assert!(g.remove_node("b").is_none());
    }

    #[test]
    fn directed_queries() {
        let mut g = Graph::new("", GraphKind::DIGRAPH);
        g.add_edge("j", "k", Attributes::new());
        g.add_edge("k", "l", Attributes::new());
        g.add_edge("j", "k", Attributes::new());
        assert_eq!(g.predecessors("k"), vec!["j"]);
        assert_eq!(g.successors("k"), vec!["l"]);
        assert_eq!(g.neighbors("k"), vec!["j", "l"]);
        assert_eq!(g.iter_edges(None, Some("k")).count(), 2);
        assert_eq!(g.iter_edges(None, None).count(), 3);
    }

    #[test]
    fn undirected_self_loop_counted_once() {
        let mut g = Graph::new("", GraphKind::GRAPH);
        g.add_edge("k", "k", Attributes::new());
        g.add_edge("l", "k", Attributes::new());
        assert_eq!(g.neighbors("k"), vec!["k", "l"]);
        assert_eq!(g.predecessors("k"), g.successors("k"));
    }

    #[test]
    fn subgraph_promotion() {
        let mut g = Graph::new("", GraphKind::DIGRAPH);
        let mut sub = SubGraph::new("cluster_x");
        sub.add_node("x", attrs(&[("color", "red")]));
        sub.add_node("y", Attributes::new());
        g.add_subgraph(sub);
        assert!(g.has_node("x"));
        assert!(g.has_node("y"));
        assert!(g.get_node("x").unwrap().attributes().contains("color"));

        let mut nested = SubGraph::new("inner");
        nested.add_node("z", Attributes::new());
        assert!(g.add_subgraph_to("cluster_x", nested));
        assert!(g.has_node("z"));
        assert!(!g.add_subgraph_to("missing", SubGraph::new("w")));

        assert!(g.remove_subgraph("cluster_x").is_some());
        assert!(g.has_node("x"));
        assert!(g.has_node("z"));
        assert!(g.get_subgraph("inner").is_none());
    }

    #[test]
    fn render_graph() {
        let mut g = Graph::new("G", GraphKind::STRICT_DIGRAPH);
        g.set_attribute("bgcolor", "gray").unwrap();
        g.add_node("a", attrs(&[("label", "say \"hi\"")]));
        let mut sub = SubGraph::new("s");
        sub.add_node("a", Attributes::new());
        g.add_subgraph(sub);
        g.add_edge("a", "b", Attributes::new());

        let expected = r#"strict digraph "G" {
    bgcolor="gray";
    "a" [
        label="say \"hi\"";
    ];
    "b";
    subgraph "s" {
        "a";
    }
    "a" -> "b";
}
"#;
        assert_eq!(g.to_dot(), expected);
        assert_eq!(g.to_string(), expected);
    }
}
