#[cfg(test)]
mod tests {

    use dotgraph::core::attributes::{AttrValue, Attributes};
    use dotgraph::core::error::DotError;
    use dotgraph::graph::{Compass, Graph, GraphKind};
    use dotgraph::gv::DotParser;
    use dotgraph::gv::Lexer;
    use dotgraph::gv::Token;

    fn is_identifier(t: Token, target: &str) -> bool {
        match t {
            Token::Identifier(name) => target == name,
            _ => false,
        }
    }

    fn get_sample_program() -> String {
        r##"/* The stages of a small build pipeline */
        strict digraph "pipeline" {
            graph [rankdir=LR, fontname="Helvetica"];
            node [shape=box, style=filled];
            edge [color=gray];

            subgraph cluster_sources {
                label = "Sources";
                node [fillcolor=lightblue];
                lexer; parser [label="Parser" + " (LL)"];
            }
            subgraph cluster_outputs {
                label = <<b>Outputs</b>>;
                dot [shape=note]; summary
            }
            lexer -> parser -> subgraph cluster_outputs [weight=2];
            parser:out:e -> dot:in;
            lexer -> parser [color=red];
        }
        "##
        .to_string()
    }

    fn parse_or_panic(program: &str) -> Graph {
        let mut parser = DotParser::new(program);
        match parser.process() {
            Result::Ok(g) => g,
            Result::Err(err) => {
                if let Some(diag) = parser.format_error(&err) {
                    print!("{}", diag);
                }
                println!("Error: {}", err);
                panic!();
            }
        }
    }

    fn value(g: &Graph, node: &str, attr: &str) -> Option<String> {
        let attrs = g.get_node(node)?.attributes();
        attrs.get(attr).map(|v| v.as_str().to_string())
    }

    #[test]
    fn simple() {
        let mut lexer = Lexer::new("a -> b");
        let (t0, _) = lexer.next_token().unwrap();
        let (t1, _) = lexer.next_token().unwrap();
        let (t2, l2) = lexer.next_token().unwrap();
        assert!(is_identifier(t0, "a"));
        assert!(matches!(t1, Token::ArrowRight));
        assert!(is_identifier(t2, "b"));
        assert_eq!(l2.offset, 5);
        assert!(matches!(lexer.next_token().unwrap().0, Token::EOF));
    }

    #[test]
    fn simple_program() {
        let toks: Vec<Token> = Lexer::new("digraph { a -> b; } ")
            .map(|r| r.unwrap().0)
            .collect();
        assert_eq!(toks.len(), 8);
        assert!(matches!(toks[0], Token::DigraphKW));
        assert!(matches!(toks[1], Token::OpenBrace));
        assert!(matches!(toks[2], Token::Identifier(_)));
        assert!(matches!(toks[3], Token::ArrowRight));
        assert!(matches!(toks[4], Token::Identifier(_)));
        assert!(matches!(toks[5], Token::Semicolon));
        assert!(matches!(toks[6], Token::CloseBrace));
        assert!(matches!(toks[7], Token::EOF));
    }

    #[test]
    fn lex_program() {
        let program = get_sample_program();
        let mut counter = 0;
        for tok in Lexer::new(&program) {
            if let Err(err) = tok {
                println!("Error: {}", err);
                panic!();
            }
            counter += 1;
        }
        assert!(counter > 50);
    }

    #[test]
    fn parse_program0() {
        let g = parse_or_panic("digraph { a -> b; b -> c;}");
        assert_eq!(g.node_count(), 3);
        assert_eq!(g.edge_count(), 2);
    }

    #[test]
    fn parse_program1() {
        let g = parse_or_panic("graph { a -- b -- c; }");
        assert_eq!(g.edge_count(), 2);
        assert!(g.has_edge("c", "b"));
        assert!(!g.has_edge("a", "c"));
    }

    #[test]
    fn parse_sample_program() {
        let g = parse_or_panic(&get_sample_program());
        assert_eq!(g.kind(), GraphKind::STRICT_DIGRAPH);
        assert_eq!(g.name(), "pipeline");
        assert_eq!(g.node_count(), 4);
        assert_eq!(g.edge_count(), 3);

        let names: Vec<&str> = g.nodes().map(|n| n.name()).collect();
        assert_eq!(names, vec!["lexer", "parser", "dot", "summary"]);

        assert_eq!(value(&g, "parser", "label").unwrap(), "Parser (LL)");
        assert_eq!(value(&g, "lexer", "fillcolor").unwrap(), "lightblue");
        assert_eq!(value(&g, "dot", "shape").unwrap(), "note");
        assert_eq!(value(&g, "dot", "style").unwrap(), "filled");
        assert_eq!(value(&g, "summary", "fillcolor"), None);

        // Repeated edges are merged into the existing ones.
        let e = g.get_edge("lexer", "parser").unwrap();
        assert_eq!(e.attributes().len(), 2);
        assert_eq!(e.attributes().get("color"), Some(&AttrValue::from("red")));
        let e = g.get_edge("parser", "dot").unwrap();
        assert_eq!(e.attributes().get("weight"), Some(&AttrValue::from("2")));

        let sources = g.get_subgraph("cluster_sources").unwrap();
        assert_eq!(sources.node_names(), vec!["lexer", "parser"]);
        let label = sources.attributes().get("label").unwrap();
        assert_eq!(label.as_str(), "Sources");
        assert!(sources.attributes().contains("rankdir"));

        let outputs = g.get_subgraph("cluster_outputs").unwrap();
        let label = outputs.attributes().get("label").unwrap();
        assert!(label.is_markup());
        assert_eq!(label.as_str(), "<b>Outputs</b>");
    }

    #[test]
    fn round_trip_program() {
        let g = parse_or_panic(&get_sample_program());
        let text = g.to_dot();
        let g2 = parse_or_panic(&text);
        assert_eq!(g2.to_dot(), text);
        assert_eq!(g2.node_count(), g.node_count());
        assert_eq!(g2.edge_count(), g.edge_count());
    }

    #[test]
    fn strict_graph_scenario() {
        let g =
            parse_or_panic("strict digraph \"G\" { A[color=red]; A->B; B->A; }");
        assert_eq!(g.node_count(), 2);
        assert_eq!(g.edge_count(), 2);
        assert_eq!(value(&g, "A", "color").unwrap(), "red");
    }

    #[test]
    fn cluster_scenario() {
        let g = parse_or_panic("digraph { subgraph cluster0 { A; B; } A->B; }");
        assert!(g.has_node("A"));
        assert!(g.has_node("B"));
        assert_eq!(g.subgraphs().len(), 1);
        let c = &g.subgraphs()[0];
        assert_eq!(c.name(), "cluster0");
        assert!(c.has_node("A"));
        assert!(c.has_node("B"));
        assert_eq!(g.edge_count(), 1);
        assert!(g.has_edge("A", "B"));
    }

    #[test]
    fn attribute_precedence() {
        let g = parse_or_panic("graph { node[color=blue]; A; A[shape=box]; }");
        let expected =
            Attributes::from_pairs(vec![("color", "blue"), ("shape", "box")])
                .unwrap();
        assert_eq!(g.get_node("A").unwrap().attributes(), &expected);
    }

    #[test]
    fn scopes_end_with_subgraphs() {
        let g = parse_or_panic(
            "digraph { subgraph s { node [color=red]; a; } b; edge [w=1] }",
        );
        assert_eq!(value(&g, "a", "color").unwrap(), "red");
        assert_eq!(value(&g, "b", "color"), None);
        assert_eq!(g.edge_count(), 0);
    }

    #[test]
    fn subgraph_operands() {
        let g = parse_or_panic("graph { a -- { b c } -- d }");
        assert_eq!(g.edge_count(), 4);
        for (x, y) in &[("a", "b"), ("a", "c"), ("b", "d"), ("c", "d")] {
            assert!(g.has_edge(x, y));
        }
        assert_eq!(g.subgraphs().len(), 1);
        assert!(g.subgraphs()[0].is_anonymous());

        let g = parse_or_panic("graph { subgraph s { a; b; } c -- subgraph s }");
        assert_eq!(g.edge_count(), 2);
        assert!(g.has_edge("a", "c"));
        assert!(g.has_edge("b", "c"));
    }

    #[test]
    fn nested_subgraphs() {
        let g = parse_or_panic(
            "digraph { subgraph outer { subgraph inner { x; } y; } }",
        );
        assert!(g.has_node("x"));
        assert!(g.has_node("y"));
        let outer = g.get_subgraph("outer").unwrap();
        assert!(outer.has_node("x"));
        assert_eq!(outer.subgraphs().len(), 1);
        assert!(g.get_subgraph("inner").is_some());
        let names: Vec<&str> = g.iter_hierarchy().map(|s| s.name()).collect();
        assert_eq!(names, vec!["", "outer", "inner"]);
    }

    #[test]
    fn reopened_subgraph() {
        let g = parse_or_panic("digraph { subgraph s { a; } subgraph s { b; } }");
        assert_eq!(g.subgraphs().len(), 1);
        assert_eq!(g.get_subgraph("s").unwrap().node_names(), vec!["a", "b"]);
    }

    #[test]
    fn reopened_subgraph_in_nested_body() {
        let g = parse_or_panic(
            "digraph { subgraph s { a; } subgraph t { subgraph s { b; } } }",
        );
        let names: Vec<&str> = g.iter_hierarchy().map(|s| s.name()).collect();
        assert_eq!(names, vec!["", "s", "t"]);
        assert_eq!(g.get_subgraph("s").unwrap().node_names(), vec!["a", "b"]);
        let t = g.get_subgraph("t").unwrap();
        assert!(t.has_node("b"));
        assert!(t.subgraphs().is_empty());
        assert!(g.has_node("b"));

        // The written form reads back to the same tree.
        let text = g.to_dot();
        assert_eq!(parse_or_panic(&text).to_dot(), text);
    }

    #[test]
    fn graph_attributes() {
        let g = parse_or_panic("graph { bgcolor=gray; graph [label=\"x\"] }");
        assert_eq!(g.attributes().len(), 2);
        assert_eq!(g.attributes().get("bgcolor").unwrap().as_str(), "gray");
    }

    #[test]
    fn ports() {
        let g = parse_or_panic("digraph { a:p1:n -> b:sw; c:ne -> d }");
        let e = g.get_edge("a", "b").unwrap();
        assert_eq!(e.source_endpoint().port.as_deref(), Some("p1"));
        assert_eq!(e.source_endpoint().compass, Some(Compass::N));
        assert_eq!(e.destination_endpoint().compass, Some(Compass::SW));
        let e = g.get_edge("c", "d").unwrap();
        assert_eq!(e.source_endpoint().port, None);
        assert_eq!(e.source_endpoint().compass, Some(Compass::NE));
        assert!(g.to_dot().contains("\"a\":\"p1\":n -> \"b\":sw;"));
    }

    #[test]
    fn html_values() {
        let g = parse_or_panic("graph { a [label=<<i>x<br/>y</i>>] }");
        let label = g.get_node("a").unwrap().attributes().get("label").unwrap();
        assert!(label.is_markup());
        assert!(g.to_dot().contains("label=<<i>x<br/>y</i>>;"));
    }

    #[test]
    fn parse_program_fail() {
        let mut parser = DotParser::new("graph { } s");
        match parser.process() {
            Err(DotError::Syntax { token, .. }) => {
                assert_eq!(token, "identifier 's'");
            }
            _ => panic!(),
        }
    }

    #[test]
    fn edge_operator_mismatch() {
        let err = DotParser::new("digraph { a -- b }").process().unwrap_err();
        assert!(matches!(err, DotError::Semantic { .. }));
        let loc = err.location().unwrap();
        assert_eq!((loc.offset, loc.line, loc.column), (12, 1, 13));

        let err = DotParser::new("graph { a -> b }").process().unwrap_err();
        assert!(matches!(err, DotError::Semantic { .. }));
    }

    #[test]
    fn lexical_errors() {
        let inputs = [
            "graph { a [label=\"open] }",
            "graph { a [label=<<b>x</i>>] }",
            "graph { /* a }",
            "graph { a @ b }",
        ];
        for input in inputs.iter() {
            let err = DotParser::new(input).process().unwrap_err();
            assert!(matches!(err, DotError::Lexical { .. }), "{}", input);
        }
    }

    #[test]
    fn caret_diagnostic() {
        let program = "graph {\n  a -- ;\n}";
        let mut parser = DotParser::new(program);
        let err = parser.process().unwrap_err();
        let diag = parser.format_error(&err).unwrap();
        assert_eq!(diag, "graph {\n  a -- ;\n       ^\n");
    }

    #[test]
    fn convenience_parse() {
        let g = dotgraph::parse("digraph { a -> a }").unwrap();
        assert_eq!(g.successors("a"), vec!["a"]);
        assert!(dotgraph::parse("digraph {").is_err());
    }
}
