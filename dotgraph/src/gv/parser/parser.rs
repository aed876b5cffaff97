use super::lexer::Lexer;
use super::lexer::Token;
use crate::core::attributes::{AttrValue, Attributes};
use crate::core::error::{DotError, Location};
use crate::graph::{Compass, Endpoint, Graph, GraphKind};
use crate::gv::builder::{GraphBuilder, Operand};
use crate::gv::scope::AttrCategory;

// An ID in the DOT grammar. HTML strings are kept apart because they turn
// into markup attribute values.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Id {
    Text(String),
    Html(String),
}

impl Id {
    fn into_text(self) -> String {
        match self {
            Id::Text(x) | Id::Html(x) => x,
        }
    }

    fn into_value(self) -> AttrValue {
        match self {
            Id::Text(x) => AttrValue::String(x),
            Id::Html(x) => AttrValue::Markup(x),
        }
    }
}

/// The deepest subgraph nesting that the parser accepts.
pub const MAX_NESTING: usize = 128;

#[derive(Debug, Clone)]
pub struct DotParser<'a> {
    lexer: Lexer<'a>,
    tok: Token,
    loc: Location,
    // The number of subgraph bodies that are open.
    depth: usize,
}

impl<'a> DotParser<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            lexer: Lexer::new(input),
            tok: Token::EOF,
            loc: Location::default(),
            depth: 0,
        }
    }

    /// \returns the source lines up to the location of \p err, with a marker
    /// under the offending column, or None if the error has no location.
    pub fn format_error(&self, err: &DotError) -> Option<String> {
        err.location().map(|loc| self.lexer.format_error(&loc))
    }

    pub fn lex(&mut self) -> Result<(), DotError> {
        let (tok, loc) = self.lexer.next_token()?;
        self.tok = tok;
        self.loc = loc;
        Ok(())
    }

    /// Creates a syntax error that points at the current token.
    fn unexpected<T>(&self, message: &str) -> Result<T, DotError> {
        Err(DotError::syntax(&self.tok.to_string(), message, self.loc))
    }

    fn expect(&mut self, tok: Token, message: &str) -> Result<(), DotError> {
        if self.tok != tok {
            return self.unexpected(message);
        }
        self.lex()
    }

    fn is_edge_token(&self) -> bool {
        matches!(self.tok, Token::ArrowLine | Token::ArrowRight)
    }

    // graph : [ strict ] (graph | digraph) [ ID ] '{' stmt_list '}'
    fn parse_graph(&mut self) -> Result<Graph, DotError> {
        let mut strict = false;
        if self.tok == Token::StrictKW {
            strict = true;
            self.lex()?;
        }

        let directed = match self.tok {
            Token::GraphKW => false,
            Token::DigraphKW => true,
            _ => {
                return self.unexpected("expected 'graph' or 'digraph'");
            }
        };
        self.lex()?;

        // Consume the optional graph name.
        let mut name = String::new();
        if self.tok.is_id() {
            name = self.parse_id()?.into_text();
        }

        self.expect(Token::OpenBrace, "expected '{'")?;

        let mut gb = GraphBuilder::new(&name, GraphKind::new(directed, strict));
        gb.enter_scope();
        self.parse_stmt_list(&mut gb)?;
        gb.leave_scope();
        Ok(gb.finish())
    }

    // stmt_list : [ stmt [ ';' ] stmt_list ]
    // Consumes the closing '}'.
    fn parse_stmt_list(&mut self, gb: &mut GraphBuilder) -> Result<(), DotError> {
        loop {
            match self.tok {
                Token::CloseBrace => {
                    return self.lex();
                }
                Token::EOF => {
                    return self.unexpected("expected '}'");
                }
                _ => {}
            }
            self.parse_stmt(gb)?;
            if self.tok == Token::Semicolon {
                self.lex()?;
            }
        }
    }

    // stmt : node_stmt | edge_stmt | attr_stmt | ID '=' ID | subgraph
    fn parse_stmt(&mut self, gb: &mut GraphBuilder) -> Result<(), DotError> {
        match self.tok {
            //attr_stmt : (graph | node | edge) attr_list
            Token::GraphKW | Token::NodeKW | Token::EdgeKW => {
                let category = match self.tok {
                    Token::GraphKW => AttrCategory::Graph,
                    Token::NodeKW => AttrCategory::Node,
                    _ => AttrCategory::Edge,
                };
                self.lex()?;
                if self.tok != Token::OpenBracket {
                    return self.unexpected("expected '['");
                }
                let attrs = self.parse_attr_list()?;
                gb.set_defaults(category, &attrs);
                Ok(())
            }
            Token::SubgraphKW | Token::OpenBrace => {
                let names = self.parse_subgraph(gb)?;
                if self.is_edge_token() {
                    return self.parse_edge_stmt(gb, Operand::Group(names));
                }
                Ok(())
            }
            _ if self.tok.is_id() => {
                let loc = self.loc;
                let id = self.parse_id()?;

                // ID '=' ID
                if self.tok == Token::Equal {
                    self.lex()?;
                    if !self.tok.is_id() {
                        return self.unexpected("expected a value after '='");
                    }
                    let value = self.parse_id()?.into_value();
                    let name = id.into_text();
                    return gb
                        .set_graph_attribute(&name, value)
                        .map_err(|err| err.located(loc));
                }

                let endpoint = self.parse_port(id.into_text())?;
                if self.is_edge_token() {
                    return self.parse_edge_stmt(gb, Operand::Node(endpoint));
                }

                // node_stmt : node_id [ attr_list ]
                let mut attrs = Attributes::new();
                if self.tok == Token::OpenBracket {
                    attrs = self.parse_attr_list()?;
                }
                gb.declare_node(&endpoint.node, &attrs);
                Ok(())
            }
            _ => self.unexpected("expected a statement"),
        }
    }

    // ID : identifier | numeral | quoted-string ('+' quoted-string)* | html
    fn parse_id(&mut self) -> Result<Id, DotError> {
        let id = match self.tok.clone() {
            Token::Identifier(x) | Token::Numeral(x) => Id::Text(x),
            Token::HtmlString(x) => Id::Html(x),
            Token::QuotedString(mut x) => {
                self.lex()?;
                while self.tok == Token::Plus {
                    self.lex()?;
                    if let Token::QuotedString(y) = self.tok.clone() {
                        x.push_str(&y);
                        self.lex()?;
                    } else {
                        return self
                            .unexpected("expected a quoted string after '+'");
                    }
                }
                return Ok(Id::Text(x));
            }
            _ => {
                return self.unexpected("expected an ID");
            }
        };
        self.lex()?;
        Ok(id)
    }

    // port : ':' ID [ ':' compass_pt ] | ':' compass_pt
    fn parse_port(&mut self, node: String) -> Result<Endpoint, DotError> {
        let mut endpoint = Endpoint::new(&node);
        if self.tok != Token::Colon {
            return Ok(endpoint);
        }
        self.lex()?;

        let quoted = matches!(self.tok, Token::QuotedString(_));
        let first = self.parse_id()?.into_text();

        if self.tok == Token::Colon {
            self.lex()?;
            let compass = match &self.tok {
                Token::Identifier(x) => Compass::from_name(x),
                _ => None,
            };
            let compass = match compass {
                Some(c) => c,
                None => {
                    return self.unexpected("expected a compass point");
                }
            };
            self.lex()?;
            endpoint.port = Some(first);
            endpoint.compass = Some(compass);
            return Ok(endpoint);
        }

        // A lone qualifier is a compass point if it's spelled like one.
        if !quoted {
            if let Some(compass) = Compass::from_name(&first) {
                endpoint.compass = Some(compass);
                return Ok(endpoint);
            }
        }
        endpoint.port = Some(first);
        Ok(endpoint)
    }

    //attr_list : '[' [ a_list ] ']' [ attr_list ]
    //a_list : ID '=' ID [ (';' | ',') ] [ a_list ]
    fn parse_attr_list(&mut self) -> Result<Attributes, DotError> {
        let mut attrs = Attributes::new();

        while self.tok == Token::OpenBracket {
            self.lex()?;
            loop {
                if self.tok == Token::CloseBracket {
                    self.lex()?;
                    break;
                }
                if !self.tok.is_id() {
                    return self
                        .unexpected("expected an attribute name or ']'");
                }

                let loc = self.loc;
                let name = self.parse_id()?.into_text();
                self.expect(Token::Equal, "expected '='")?;
                if !self.tok.is_id() {
                    return self.unexpected("expected a value after '='");
                }
                let value = self.parse_id()?.into_value();
                attrs
                    .set(&name, value)
                    .map_err(|err| err.located(loc))?;

                // Skip the separator.
                if matches!(self.tok, Token::Semicolon | Token::Comma) {
                    self.lex()?;
                }
            }
        }
        Ok(attrs)
    }

    // subgraph : [ subgraph [ ID ] ] '{' stmt_list '}'
    // \returns the names of the nodes in the subgraph.
    fn parse_subgraph(
        &mut self,
        gb: &mut GraphBuilder,
    ) -> Result<Vec<String>, DotError> {
        let mut name = String::new();
        if self.tok == Token::SubgraphKW {
            self.lex()?;
            if self.tok.is_id() {
                name = self.parse_id()?.into_text();
            }
            // A reference to a subgraph, without a body.
            if self.tok != Token::OpenBrace && !name.is_empty() {
                return Ok(gb.reference_subgraph(&name));
            }
        }

        if self.tok == Token::OpenBrace && self.depth >= MAX_NESTING {
            return self.unexpected("subgraphs are nested too deeply");
        }
        self.expect(Token::OpenBrace, "expected '{'")?;
        self.depth += 1;
        gb.open_subgraph(&name);
        self.parse_stmt_list(gb)?;
        self.depth -= 1;
        Ok(gb.close_subgraph())
    }

    //edge_stmt : (node_id | subgraph) edgeRHS [ attr_list ]
    //edgeRHS : edgeop (node_id | subgraph) [ edgeRHS ]
    fn parse_edge_stmt(
        &mut self,
        gb: &mut GraphBuilder,
        first: Operand,
    ) -> Result<(), DotError> {
        let kind = gb.kind();
        let expected = if kind.directed {
            Token::ArrowRight
        } else {
            Token::ArrowLine
        };

        let mut chain = vec![first];
        while self.is_edge_token() {
            if self.tok != expected {
                let msg = format!(
                    "{} is not allowed in a {}, use '{}'",
                    self.tok,
                    kind.keyword(),
                    kind.edge_op()
                );
                return Err(DotError::semantic(&msg, self.loc));
            }
            // Consume the arrow.
            self.lex()?;

            let operand = match self.tok {
                Token::SubgraphKW | Token::OpenBrace => {
                    Operand::Group(self.parse_subgraph(gb)?)
                }
                _ if self.tok.is_id() => {
                    let name = self.parse_id()?.into_text();
                    Operand::Node(self.parse_port(name)?)
                }
                _ => {
                    return self.unexpected("expected a node or a subgraph");
                }
            };
            chain.push(operand);
        }

        // Parse the optional attribute list.
        let mut attrs = Attributes::new();
        if self.tok == Token::OpenBracket {
            attrs = self.parse_attr_list()?;
        }
        gb.connect(&chain, &attrs);
        Ok(())
    }

    /// Parses dot files, as specified here:
    /// <https://graphviz.org/doc/info/lang.html>
    pub fn process(&mut self) -> Result<Graph, DotError> {
        self.lex()?;
        let graph = self.parse_graph()?;
        if self.tok != Token::EOF {
            return self.unexpected("expected the end of the input");
        }
        #[cfg(feature = "log")]
        log::info!(
            "Parsed {} with {} nodes and {} edges",
            graph.kind(),
            graph.node_count(),
            graph.edge_count()
        );
        Ok(graph)
    }
}
