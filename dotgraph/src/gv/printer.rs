//! A collection of methods for printing a readable summary of a graph.

use crate::core::attributes::Attributes;
use crate::graph::{Edge, Graph, SubGraph};
use std::fmt::Write;

fn print_attribute_list(out: &mut String, attrs: &Attributes, indent: usize) {
    for (i, att) in attrs.iter().enumerate() {
        let _ = writeln!(
            out,
            "{}{})\"{}\" = \"{}\"",
            " ".repeat(indent),
            i,
            att.name(),
            att.value()
        );
    }
}

fn print_edge(out: &mut String, e: &Edge, op: &str, indent: usize) {
    let _ = writeln!(
        out,
        "{}Edge {} {} {}",
        " ".repeat(indent),
        e.source_endpoint().to_dot(),
        op,
        e.destination_endpoint().to_dot()
    );
    print_attribute_list(out, e.attributes(), indent + 1);
}

fn print_subgraph(out: &mut String, sub: &SubGraph, indent: usize) {
    let name = if sub.is_anonymous() {
        "(anonymous)"
    } else {
        sub.name()
    };
    let _ = writeln!(out, "{}Subgraph: {}", " ".repeat(indent), name);
    print_attribute_list(out, sub.attributes(), indent + 1);
    for node in sub.nodes() {
        let _ = writeln!(out, "{}Node {}", " ".repeat(indent + 1), node.name());
    }
    for child in sub.subgraphs() {
        print_subgraph(out, child, indent + 1);
    }
}

/// \returns a listing of the graph: its attributes, nodes, subgraph tree and
/// edges, one entity per line.
pub fn format_summary(graph: &Graph) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Graph: {} ({}, {} nodes, {} edges)",
        graph.name(),
        graph.kind(),
        graph.node_count(),
        graph.edge_count()
    );
    print_attribute_list(&mut out, graph.attributes(), 1);
    for node in graph.nodes() {
        let _ = writeln!(out, " Node {}", node.name());
        print_attribute_list(&mut out, node.attributes(), 2);
    }
    for sub in graph.subgraphs() {
        print_subgraph(&mut out, sub, 1);
    }
    let op = graph.kind().edge_op();
    for e in graph.edges() {
        print_edge(&mut out, e, op, 1);
    }
    out
}

pub fn dump_graph(graph: &Graph) {
    print!("{}", format_summary(graph));
}

#[test]
fn test_summary() {
    use crate::graph::GraphKind;

    let mut g = Graph::new("G", GraphKind::DIGRAPH);
    let attrs = Attributes::from_pairs(vec![("color", "red")]).unwrap();
    g.add_edge("a", "b", attrs);
    let mut sub = SubGraph::new("");
    sub.add_node("a", Attributes::new());
    g.add_subgraph(sub);

    let expected = "Graph: G (digraph, 2 nodes, 1 edges)
 Node a
 Node b
 Subgraph: (anonymous)
  Node a
 Edge \"a\" -> \"b\"
  0)\"color\" = \"red\"
";
    assert_eq!(format_summary(&g), expected);
}
