//! The attribute scopes that are active while a DOT file is being read.
//!
//! Every graph body (the root and each subgraph) opens a scope. The
//! statements `graph [...]`, `node [...]` and `edge [...]` record defaults in
//! the innermost scope, and nodes, edges and subgraphs that are created later
//! inherit the defaults of every open scope, with inner scopes winning.

use crate::adt::map::ScopedMap;
use crate::core::attributes::{Attribute, Attributes};

/// (graph | node | edge)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttrCategory {
    Graph,
    Node,
    Edge,
}

/// Three parallel stacks of default attributes.
#[derive(Debug, Clone, Default)]
pub struct ScopeStack {
    graph_attr: ScopedMap<String, Attribute>,
    node_attr: ScopedMap<String, Attribute>,
    edge_attr: ScopedMap<String, Attribute>,
}

impl ScopeStack {
    pub fn new() -> Self {
        Self {
            graph_attr: ScopedMap::new(),
            node_attr: ScopedMap::new(),
            edge_attr: ScopedMap::new(),
        }
    }

    pub fn push(&mut self) {
        self.graph_attr.push();
        self.node_attr.push();
        self.edge_attr.push();
    }

    pub fn pop(&mut self) {
        self.graph_attr.pop();
        self.node_attr.pop();
        self.edge_attr.pop();
    }

    /// The number of open scopes.
    pub fn depth(&self) -> usize {
        self.node_attr.len()
    }

    fn stack(&self, category: AttrCategory) -> &ScopedMap<String, Attribute> {
        match category {
            AttrCategory::Graph => &self.graph_attr,
            AttrCategory::Node => &self.node_attr,
            AttrCategory::Edge => &self.edge_attr,
        }
    }

    fn stack_mut(
        &mut self,
        category: AttrCategory,
    ) -> &mut ScopedMap<String, Attribute> {
        match category {
            AttrCategory::Graph => &mut self.graph_attr,
            AttrCategory::Node => &mut self.node_attr,
            AttrCategory::Edge => &mut self.edge_attr,
        }
    }

    /// Records \p attrs as defaults of the innermost scope.
    pub fn merge(&mut self, category: AttrCategory, attrs: &Attributes) {
        let stack = self.stack_mut(category);
        for attr in attrs.iter() {
            stack.insert(&attr.name().to_string(), attr);
        }
    }

    /// \returns the defaults that apply to a new entity of \p category.
    pub fn inherited(&self, category: AttrCategory) -> Attributes {
        let mut attrs = Attributes::new();
        for (_, attr) in self.stack(category).flatten() {
            attrs.insert(attr);
        }
        attrs
    }
}

#[cfg(test)]
use crate::core::attributes::AttrValue;

#[test]
fn test_scope_inheritance() {
    let mut scopes = ScopeStack::new();
    scopes.push();
    let outer =
        Attributes::from_pairs(vec![("color", "blue"), ("shape", "box")])
            .unwrap();
    scopes.merge(AttrCategory::Node, &outer);

    scopes.push();
    assert_eq!(scopes.depth(), 2);
    let inner = Attributes::from_pairs(vec![("color", "red")]).unwrap();
    scopes.merge(AttrCategory::Node, &inner);

    let node = scopes.inherited(AttrCategory::Node);
    assert_eq!(node.get("color"), Some(&AttrValue::from("red")));
    assert_eq!(node.get("shape"), Some(&AttrValue::from("box")));
    assert!(scopes.inherited(AttrCategory::Edge).is_empty());

    scopes.pop();
    let node = scopes.inherited(AttrCategory::Node);
    assert_eq!(node.get("color"), Some(&AttrValue::from("blue")));
    scopes.pop();
    assert!(scopes.inherited(AttrCategory::Node).is_empty());
}

#[test]
fn test_scope_keeps_first_order() {
    let mut scopes = ScopeStack::new();
    scopes.push();
    let outer = Attributes::from_pairs(vec![("a", "1"), ("b", "2")]).unwrap();
    scopes.merge(AttrCategory::Edge, &outer);
    scopes.push();
    let inner = Attributes::from_pairs(vec![("c", "3"), ("a", "4")]).unwrap();
    scopes.merge(AttrCategory::Edge, &inner);

    let edge = scopes.inherited(AttrCategory::Edge);
    let pairs: Vec<(&str, &str)> =
        edge.iter().map(|x| (x.name(), x.value().as_str())).collect();
    assert_eq!(pairs, vec![("a", "4"), ("b", "2"), ("c", "3")]);
}
