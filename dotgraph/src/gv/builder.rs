//! A graph builder that receives construction calls from the parser.

use super::scope::{AttrCategory, ScopeStack};
use crate::core::attributes::{AttrValue, Attributes};
use crate::core::error::DotError;
use crate::graph::{Endpoint, Graph, GraphKind, SubGraph};

// The methods in this file are responsible for applying the DOT statements,
// as the parser recognizes them, to the Graph data-structure. The builder owns
// the attribute scopes, which are pushed and popped at graph bodies.

/// One side of an edge operator: a single node, or the nodes of a subgraph.
#[derive(Debug, Clone)]
pub enum Operand {
    Node(Endpoint),
    Group(Vec<String>),
}

impl Operand {
    fn endpoints(&self) -> Vec<Endpoint> {
        match self {
            Operand::Node(ep) => vec![ep.clone()],
            Operand::Group(names) => {
                names.iter().map(|n| Endpoint::new(n)).collect()
            }
        }
    }
}

/// This class constructs a graph from the statements of a DOT file.
#[derive(Debug)]
pub struct GraphBuilder {
    graph: Graph,
    // Subgraphs whose bodies are being read, innermost last.
    open: Vec<SubGraph>,
    scopes: ScopeStack,
}

impl GraphBuilder {
    pub fn new(name: &str, kind: GraphKind) -> Self {
        Self {
            graph: Graph::new(name, kind),
            open: Vec::new(),
            scopes: ScopeStack::new(),
        }
    }

    pub fn kind(&self) -> GraphKind {
        self.graph.kind()
    }

    pub fn enter_scope(&mut self) {
        self.scopes.push();
    }

    pub fn leave_scope(&mut self) {
        self.scopes.pop();
    }

    fn current_has_node(&self, name: &str) -> bool {
        match self.open.last() {
            Some(sub) => sub.has_node(name),
            None => self.graph.has_node(name),
        }
    }

    fn current_add_node(&mut self, name: &str, attrs: Attributes) {
        match self.open.last_mut() {
            Some(sub) => sub.add_node(name, attrs),
            None => self.graph.add_node(name, attrs),
        }
    }

    fn current_attributes_mut(&mut self) -> &mut Attributes {
        match self.open.last_mut() {
            Some(sub) => sub.attributes_mut(),
            None => self.graph.attributes_mut(),
        }
    }

    /// ID '=' ID
    pub fn set_graph_attribute(
        &mut self,
        name: &str,
        value: AttrValue,
    ) -> Result<(), DotError> {
        self.current_attributes_mut().set(name, value)
    }

    /// (graph | node | edge) [ ... ]
    pub fn set_defaults(&mut self, category: AttrCategory, attrs: &Attributes) {
        self.scopes.merge(category, attrs);
        if category == AttrCategory::Graph {
            self.current_attributes_mut().merge(attrs);
        }
    }

    /// node-name [ ... ]
    pub fn declare_node(&mut self, name: &str, explicit: &Attributes) {
        let mut attrs = self.scopes.inherited(AttrCategory::Node);
        attrs.merge(explicit);
        self.current_add_node(name, attrs);
    }

    // Makes sure that a node that is mentioned by an edge exists in the root
    // and in the current subgraph.
    fn touch_node(&mut self, name: &str) {
        if !self.graph.has_node(name) {
            let inherited = self.scopes.inherited(AttrCategory::Node);
            self.graph.add_node(name, inherited);
        }
        if !self.open.is_empty() && !self.current_has_node(name) {
            self.current_add_node(name, Attributes::new());
        }
    }

    /// a -> b -> {c d} [...]
    /// Connects every pair of neighboring operands.
    pub fn connect(&mut self, chain: &[Operand], explicit: &Attributes) {
        let mut attrs = self.scopes.inherited(AttrCategory::Edge);
        attrs.merge(explicit);

        for pair in chain.windows(2) {
            let sources = pair[0].endpoints();
            let destinations = pair[1].endpoints();
            for src in sources.iter() {
                for dst in destinations.iter() {
                    self.touch_node(&src.node);
                    self.touch_node(&dst.node);
                    self.graph.add_edge_between(
                        src.clone(),
                        dst.clone(),
                        attrs.clone(),
                    );
                }
            }
        }
    }

    /// subgraph [ ID ] '{'
    pub fn open_subgraph(&mut self, name: &str) {
        let inherited = self.scopes.inherited(AttrCategory::Graph);
        self.open.push(SubGraph::with_attributes(name, inherited));
        self.enter_scope();
    }

    /// '}' of a subgraph. Attaches the subgraph to the enclosing graph and
    /// returns the names of the nodes in it.
    pub fn close_subgraph(&mut self) -> Vec<String> {
        self.leave_scope();
        let sub = match self.open.pop() {
            Some(sub) => sub,
            None => return Vec::new(),
        };
        let names = sub.node_names();
        #[cfg(feature = "log")]
        log::debug!(
            "Closing subgraph \"{}\" with {} nodes",
            sub.name(),
            names.len()
        );
        self.attach(sub);
        names
    }

    fn attach(&mut self, sub: SubGraph) {
        if self.open.is_empty() {
            self.graph.add_subgraph(sub);
            return;
        }
        if let Some(sub) = self.merge_reopened(sub) {
            if let Some(parent) = self.open.last_mut() {
                parent.add_subgraph(sub);
            }
        }
    }

    // Merges \p sub into an earlier subgraph with the same name, which can be
    // in the finished part of the graph or in one of the open subgraphs. The
    // nodes of \p sub are copied into every open subgraph, since its body
    // was read inside them.
    // \returns \p sub if there is no earlier subgraph with its name.
    fn merge_reopened(&mut self, sub: SubGraph) -> Option<SubGraph> {
        let name = sub.name().to_string();
        let known = self.graph.get_subgraph(&name).is_some()
            || self.open.iter().any(|g| {
                (!name.is_empty() && g.name() == name)
                    || g.get_subgraph(&name).is_some()
            });
        if !known {
            return Some(sub);
        }

        #[cfg(feature = "log")]
        log::debug!("Reopening subgraph \"{}\"", name);
        for graph in sub.iter_hierarchy() {
            for node in graph.nodes() {
                for open in self.open.iter_mut() {
                    open.add_node(node.name(), node.attributes().clone());
                }
            }
        }

        if let Some(existing) = self.graph.get_subgraph_mut(&name) {
            existing.absorb(sub);
            return None;
        }
        for open in self.open.iter_mut().rev() {
            if open.name() == name {
                open.absorb(sub);
                return None;
            }
            if let Some(existing) = open.get_subgraph_mut(&name) {
                existing.absorb(sub);
                return None;
            }
        }
        Some(sub)
    }

    /// subgraph ID
    /// Returns the nodes of the subgraph with this name, looking at the whole
    /// tree and at the subgraphs that are still open. An unknown name declares
    /// a new, empty subgraph.
    pub fn reference_subgraph(&mut self, name: &str) -> Vec<String> {
        if let Some(sub) = self.graph.get_subgraph(name) {
            return sub.node_names();
        }
        for open in self.open.iter().rev() {
            if open.name() == name && !name.is_empty() {
                return open.node_names();
            }
            if let Some(sub) = open.get_subgraph(name) {
                return sub.node_names();
            }
        }
        let inherited = self.scopes.inherited(AttrCategory::Graph);
        self.attach(SubGraph::with_attributes(name, inherited));
        Vec::new()
    }

    pub fn finish(self) -> Graph {
        self.graph
    }
}
