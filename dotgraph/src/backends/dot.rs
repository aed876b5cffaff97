//! DOT rendering backend that accepts lines and builds the output text.

use crate::core::attributes::{AttrValue, Attribute, Attributes};
use crate::core::format::RenderBackend;

static INDENT: &str = "    ";

/// Wraps \p x in double quotes, escaping embedded quotes.
pub fn quote_string(x: &str) -> String {
    let mut res = String::with_capacity(x.len() + 2);
    res.push('"');
    for c in x.chars() {
        if c == '"' {
            res.push_str("\\\"");
        } else {
            res.push(c);
        }
    }
    res.push('"');
    res
}

/// \returns true if \p x reads back unchanged after `quote_string`. The
/// lexer keeps `\c` escapes as they are, so an odd run of backslashes can't
/// come right before a quote, a line break or the end of the string.
pub fn is_quotable(x: &str) -> bool {
    let mut run = 0;
    for c in x.chars() {
        match c {
            '\\' => {
                run += 1;
                continue;
            }
            '"' | '\n' | '\r' if run % 2 == 1 => return false,
            _ => {}
        }
        run = 0;
    }
    run % 2 == 0
}

// Attribute names are written bare unless they would be read back as
// something else (a keyword, a number, or several tokens).
fn attribute_name(name: &str) -> String {
    let keywords = ["graph", "node", "edge", "digraph", "strict", "subgraph"];
    let mut chars = name.chars();
    let plain = match chars.next() {
        Some(c) => c.is_ascii_alphabetic() || c == '_',
        None => false,
    } && chars.all(|c| c.is_ascii_alphanumeric() || c == '_');
    if plain && !keywords.iter().any(|kw| name.eq_ignore_ascii_case(kw)) {
        return name.to_string();
    }
    quote_string(name)
}

/// \returns the `name=value;` form of an attribute.
pub fn attribute_line(attr: &Attribute) -> String {
    let name = attribute_name(attr.name());
    match attr.value() {
        AttrValue::String(s) => format!("{}={};", name, quote_string(s)),
        AttrValue::Markup(m) => format!("{}=<{}>;", name, m),
    }
}

/// Writes one attribute per line.
pub fn render_attributes(
    attrs: &Attributes,
    depth: usize,
    canvas: &mut dyn RenderBackend,
) {
    for attr in attrs.iter() {
        canvas.write_line(depth, &attribute_line(attr));
    }
}

#[derive(Debug, Default)]
pub struct DotWriter {
    content: String,
    lines: usize,
}

impl DotWriter {
    pub fn new() -> DotWriter {
        DotWriter {
            content: String::new(),
            lines: 0,
        }
    }

    pub fn line_count(&self) -> usize {
        self.lines
    }

    pub fn finalize(self) -> String {
        self.content
    }
}

impl RenderBackend for DotWriter {
    fn write_line(&mut self, depth: usize, text: &str) {
        for _ in 0..depth {
            self.content.push_str(INDENT);
        }
        self.content.push_str(text);
        self.content.push('\n');
        self.lines += 1;
    }
}

#[test]
fn test_quote_string() {
    assert_eq!(quote_string("abc"), "\"abc\"");
    assert_eq!(quote_string("a\"b"), "\"a\\\"b\"");
    assert_eq!(quote_string(""), "\"\"");
}

#[test]
fn test_quotable_reads_back() {
    use crate::gv::{Lexer, Token};
    let read_back = |x: &str| {
        let quoted = quote_string(x);
        match Lexer::new(&quoted).next_token() {
            Ok((Token::QuotedString(s), _)) => Some(s),
            _ => None,
        }
    };
    let inputs = ["a\\b", "a\\\\", "x\\\\\"y", "a\\", "a\\\"b", "a\\\nb"];
    for x in inputs.iter() {
        let same = read_back(x).as_deref() == Some(*x);
        assert_eq!(same, is_quotable(x), "{:?}", x);
    }
}

#[test]
fn test_writer_indent() {
    let mut w = DotWriter::new();
    w.write_line(0, "graph {");
    w.write_line(1, "\"a\";");
    w.write_line(0, "}");
    assert_eq!(w.line_count(), 3);
    assert_eq!(w.finalize(), "graph {\n    \"a\";\n}\n");
}

#[test]
fn test_attribute_line() {
    let attr = Attribute::new("color", AttrValue::from("red")).unwrap();
    assert_eq!(attribute_line(&attr), "color=\"red\";");
    let attr = Attribute::new("node", AttrValue::from("x")).unwrap();
    assert_eq!(attribute_line(&attr), "\"node\"=\"x\";");
    let attr = Attribute::new("a b", AttrValue::markup("<b/>").unwrap());
    assert_eq!(attribute_line(&attr.unwrap()), "\"a b\"=<<b/>>;");
}
