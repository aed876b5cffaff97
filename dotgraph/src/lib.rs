/*!
This crate provides a library for parsing, building and writing GraphViz
(DOT) files. It supports the four kinds of DOT graphs (strict or not,
directed or not), nested subgraphs, ports and compass points, attribute
inheritance through `node`/`edge`/`graph` defaults, and HTML-like attribute
values.

For more specific details on the API, see the documentation for the specific
sub modules.

The project also comes with a command line utility that reads .DOT files and
writes them back in a canonical form.

# Parser example: parse a dot file

This crate provides an API for parsing DOT files. For example, to load,
parse and print a graph:

```rust
    use dotgraph::gv;

    let contents = "digraph { a -> b [label=\"foo\"]; }";
    let mut parser = gv::DotParser::new(&contents);
    let tree = parser.process();

    match tree {
        Result::Err(err) => {
            if let Some(diag) = parser.format_error(&err) {
                print!("{}", diag);
            }
            println!("Error: {}", err);
        }

        Result::Ok(g) => {
            gv::dump_graph(&g);
        }
    }
```

The example above would print a summary of the graph, or a readable error
message, such as:

```txt
digraph {
    a -> b -> ;
              ^
Error: syntax error at byte 24 (line 2, column 15): unexpected ';', expected a node or a subgraph
```

# Builder example: build a graph and write it as DOT

```rust
    use dotgraph::core::attributes::Attributes;
    use dotgraph::graph::{Graph, GraphKind, SubGraph};

    let mut g = Graph::new("G", GraphKind::DIGRAPH);
    let red = Attributes::from_pairs(vec![("color", "red")]).unwrap();
    g.add_node("a", red);
    g.add_edge("a", "b", Attributes::new());

    // Group the nodes in a cluster.
    let mut cluster = SubGraph::new("cluster0");
    cluster.add_node("a", Attributes::new());
    cluster.add_node("b", Attributes::new());
    g.add_subgraph(cluster);

    let text = g.to_dot();
    let again = dotgraph::parse(&text).unwrap();
    assert_eq!(again.node_count(), 2);
    assert!(again.get_subgraph("cluster0").is_some());
```

*/

pub mod adt;
pub mod backends;
pub mod core;
pub mod graph;
pub mod gv;

use crate::core::error::DotError;
use crate::graph::Graph;

/// Parses the DOT document \p input into a graph.
pub fn parse(input: &str) -> Result<Graph, DotError> {
    gv::DotParser::new(input).process()
}
