//! Property tests: graphs built through the API survive a trip through the
//! DOT text form.

use dotgraph::backends::dot::is_quotable;
use dotgraph::core::attributes::Attributes;
use dotgraph::graph::{Edge, Endpoint, Graph, GraphKind, SubGraph};
use proptest::prelude::*;

fn kind_strategy() -> impl Strategy<Value = GraphKind> {
    (any::<bool>(), any::<bool>()).prop_map(|(d, s)| GraphKind::new(d, s))
}

// Node names, including keywords and names that need quotes.
fn name_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-zA-Z_][a-zA-Z0-9_]{0,6}",
        "[a-z0-9 .-]{1,8}",
        Just("node".to_string()),
        Just("Graph".to_string()),
    ]
}

// Values with backslashes that can't be written back are rejected by
// `Attributes::set`, so they are left out here.
fn value_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 \\\\\"<>{};=,.:-]{0,10}"
        .prop_filter("quotable", |v| is_quotable(v))
}

fn attrs_strategy() -> impl Strategy<Value = Vec<(String, String)>> {
    prop::collection::vec(("[a-z][a-z_]{0,7}", value_strategy()), 0..3)
}

fn edge_key(e: &Edge) -> (Endpoint, Endpoint, Attributes) {
    (
        e.source_endpoint().clone(),
        e.destination_endpoint().clone(),
        e.attributes().clone(),
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Property: serializing a graph and parsing it back preserves the nodes,
    /// the edges and the subgraph membership.
    #[test]
    fn prop_dot_roundtrip(
        kind in kind_strategy(),
        name in name_strategy(),
        nodes in prop::collection::vec((name_strategy(), attrs_strategy()), 1..8),
        edges in prop::collection::vec(
            (0usize..8, 0usize..8, prop::option::of("p[0-9]{1,2}"), attrs_strategy()),
            0..12
        ),
        members in prop::collection::vec(0usize..8, 0..4)
    ) {
        let mut g = Graph::new(&name, kind);
        for (node, attrs) in nodes.iter() {
            let attrs = Attributes::from_pairs(attrs.clone())
                .map_err(|e| TestCaseError::fail(e.to_string()))?;
            g.add_node(node, attrs);
        }
        let names: Vec<String> = g.nodes().map(|n| n.name().to_string()).collect();

        for (a, b, port, attrs) in edges.iter() {
            let a = &names[a % names.len()];
            let b = &names[b % names.len()];
            let source = match port {
                Some(p) => Endpoint::with_port(a, p),
                None => Endpoint::new(a),
            };
            let attrs = Attributes::from_pairs(attrs.clone())
                .map_err(|e| TestCaseError::fail(e.to_string()))?;
            g.add_edge_between(source, Endpoint::new(b), attrs);
        }

        let mut cluster = SubGraph::new("cluster_0");
        for m in members.iter() {
            cluster.add_node(&names[m % names.len()], Attributes::new());
        }
        let expected_members = cluster.node_names();
        g.add_subgraph(cluster);

        let text = g.to_dot();
        let parsed = dotgraph::parse(&text)
            .map_err(|e| TestCaseError::fail(format!("{}\n{}", e, text)))?;

        prop_assert_eq!(parsed.kind(), kind);
        prop_assert_eq!(parsed.name(), name.as_str());

        let before: Vec<(String, Attributes)> = g
            .nodes()
            .map(|n| (n.name().to_string(), n.attributes().clone()))
            .collect();
        let after: Vec<(String, Attributes)> = parsed
            .nodes()
            .map(|n| (n.name().to_string(), n.attributes().clone()))
            .collect();
        prop_assert_eq!(before, after);

        let before: Vec<_> = g.edges().map(edge_key).collect();
        let after: Vec<_> = parsed.edges().map(edge_key).collect();
        prop_assert_eq!(before, after);

        let cluster = parsed.get_subgraph("cluster_0");
        prop_assert!(cluster.is_some());
        if let Some(cluster) = cluster {
            prop_assert_eq!(cluster.node_names(), expected_members);
        }
    }

    /// Property: writing is stable; the text of a parsed graph parses back
    /// to the same text.
    #[test]
    fn prop_dot_idempotent(
        kind in kind_strategy(),
        edges in prop::collection::vec(("[a-d]", "[a-d]"), 0..10)
    ) {
        let mut g = Graph::new("", kind);
        for (a, b) in edges.iter() {
            g.add_edge(a, b, Attributes::new());
        }
        let text = g.to_dot();
        let parsed = dotgraph::parse(&text)
            .map_err(|e| TestCaseError::fail(e.to_string()))?;
        prop_assert_eq!(parsed.to_dot(), text);
    }
}
