//! The Lexer implementation for the GraphViz file format.

use crate::core::error::{DotError, Location};
use crate::gv::html::validate_html_string;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    EOF,
    Identifier(String),
    Numeral(String),
    QuotedString(String),
    HtmlString(String),
    GraphKW,
    NodeKW,
    EdgeKW,
    DigraphKW,
    StrictKW,
    SubgraphKW,
    Equal,
    Colon,
    Comma,
    Semicolon,
    Plus,
    ArrowRight,
    ArrowLine,
    OpenBracket,
    CloseBracket,
    OpenBrace,
    CloseBrace,
}

impl Token {
    /// \returns true for the tokens that can start an ID.
    pub fn is_id(&self) -> bool {
        matches!(
            self,
            Token::Identifier(_)
                | Token::Numeral(_)
                | Token::QuotedString(_)
                | Token::HtmlString(_)
        )
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::EOF => write!(f, "end of input"),
            Token::Identifier(x) => write!(f, "identifier '{}'", x),
            Token::Numeral(x) => write!(f, "numeral '{}'", x),
            Token::QuotedString(x) => write!(f, "string \"{}\"", x),
            Token::HtmlString(_) => write!(f, "html string"),
            Token::GraphKW => write!(f, "'graph'"),
            Token::NodeKW => write!(f, "'node'"),
            Token::EdgeKW => write!(f, "'edge'"),
            Token::DigraphKW => write!(f, "'digraph'"),
            Token::StrictKW => write!(f, "'strict'"),
            Token::SubgraphKW => write!(f, "'subgraph'"),
            Token::Equal => write!(f, "'='"),
            Token::Colon => write!(f, "':'"),
            Token::Comma => write!(f, "','"),
            Token::Semicolon => write!(f, "';'"),
            Token::Plus => write!(f, "'+'"),
            Token::ArrowRight => write!(f, "'->'"),
            Token::ArrowLine => write!(f, "'--'"),
            Token::OpenBracket => write!(f, "'['"),
            Token::CloseBracket => write!(f, "']'"),
            Token::OpenBrace => write!(f, "'{{'"),
            Token::CloseBrace => write!(f, "'}}'"),
        }
    }
}

fn is_identifier_start(ch: u8) -> bool {
    ch.is_ascii_alphabetic() || ch == b'_' || ch >= 0x80
}

fn is_identifier_char(ch: u8) -> bool {
    is_identifier_start(ch) || ch.is_ascii_digit()
}

#[derive(Debug, Clone)]
pub struct Lexer<'a> {
    input: &'a str,
    bytes: &'a [u8],
    pos: usize,
    line: usize,
    col: usize,
    // Set after EOF or after an error, to end the iteration.
    done: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            bytes: input.as_bytes(),
            pos: 0,
            line: 1,
            col: 1,
            done: false,
        }
    }

    pub fn location(&self) -> Location {
        Location::new(self.pos, self.line, self.col)
    }

    /// Renders the source up to the line of \p loc, followed by a line with a
    /// '^' marker under the offending column.
    pub fn format_error(&self, loc: &Location) -> String {
        let mut res = String::new();
        for (i, line) in self.input.lines().enumerate() {
            res.push_str(line);
            res.push('\n');
            if i + 1 == loc.line {
                for _ in 1..loc.column {
                    res.push(' ');
                }
                res.push_str("^\n");
                return res;
            }
        }
        // The error is past the last line break.
        for _ in 1..loc.column {
            res.push(' ');
        }
        res.push_str("^\n");
        res
    }

    pub fn has_next(&self) -> bool {
        self.pos < self.bytes.len()
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<u8> {
        self.bytes.get(self.pos + offset).copied()
    }

    fn read_char(&mut self) {
        self.pos += 1;
        self.col += 1;
    }

    // Consumes a line break ("\n", "\r\n" or "\r") if there is one.
    fn read_newline(&mut self) -> bool {
        match self.peek() {
            Some(b'\r') => {
                self.pos += 1;
                if self.peek() == Some(b'\n') {
                    self.pos += 1;
                }
            }
            Some(b'\n') => {
                self.pos += 1;
            }
            _ => return false,
        }
        self.line += 1;
        self.col = 1;
        true
    }

    fn skip_whitespace(&mut self) -> bool {
        let mut changed = false;
        loop {
            match self.peek() {
                Some(b' ') | Some(b'\t') => self.read_char(),
                _ => {
                    if !self.read_newline() {
                        return changed;
                    }
                }
            }
            changed = true;
        }
    }

    fn skip_to_end_of_line(&mut self) {
        while let Some(ch) = self.peek() {
            if ch == b'\n' || ch == b'\r' {
                break;
            }
            self.read_char();
        }
    }

    fn skip_comment(&mut self) -> Result<bool, DotError> {
        match (self.peek(), self.peek_at(1)) {
            (Some(b'#'), _) if self.col == 1 => {
                self.skip_to_end_of_line();
                Ok(true)
            }
            (Some(b'/'), Some(b'/')) => {
                self.skip_to_end_of_line();
                Ok(true)
            }
            (Some(b'/'), Some(b'*')) => {
                let start = self.location();
                self.read_char();
                self.read_char();
                loop {
                    match self.peek() {
                        None => {
                            return Err(DotError::lexical(
                                "unterminated block comment",
                                start,
                            ));
                        }
                        Some(b'*') if self.peek_at(1) == Some(b'/') => {
                            self.read_char();
                            self.read_char();
                            return Ok(true);
                        }
                        _ => {
                            if !self.read_newline() {
                                self.read_char();
                            }
                        }
                    }
                }
            }
            _ => Ok(false),
        }
    }

    fn read_identifier(&mut self) -> Token {
        let start = self.pos;
        while self.peek().map_or(false, is_identifier_char) {
            self.read_char();
        }
        let name = &self.input[start..self.pos];
        let keywords = [
            ("graph", Token::GraphKW),
            ("node", Token::NodeKW),
            ("edge", Token::EdgeKW),
            ("digraph", Token::DigraphKW),
            ("strict", Token::StrictKW),
            ("subgraph", Token::SubgraphKW),
        ];
        for (kw, tok) in keywords.iter() {
            if name.eq_ignore_ascii_case(kw) {
                return tok.clone();
            }
        }
        Token::Identifier(name.to_string())
    }

    // -?(\.[0-9]+|[0-9]+(\.[0-9]*)?)
    fn read_number(&mut self) -> Option<Token> {
        let start = self.pos;
        let mut len = 0;
        if self.peek() == Some(b'-') {
            len += 1;
        }
        let digit_at = |l: usize| {
            self.bytes.get(start + l).map_or(false, |c| c.is_ascii_digit())
        };
        if self.bytes.get(start + len) == Some(&b'.') {
            if !digit_at(len + 1) {
                return None;
            }
            len += 1;
            while digit_at(len) {
                len += 1;
            }
        } else {
            if !digit_at(len) {
                return None;
            }
            while digit_at(len) {
                len += 1;
            }
            if self.bytes.get(start + len) == Some(&b'.') {
                len += 1;
                while digit_at(len) {
                    len += 1;
                }
            }
        }
        self.pos += len;
        self.col += len;
        Some(Token::Numeral(self.input[start..self.pos].to_string()))
    }

    fn read_string(&mut self) -> Result<Token, DotError> {
        let start = self.location();
        let mut result: Vec<u8> = Vec::new();
        // Consume the opening quote.
        self.read_char();
        loop {
            match self.peek() {
                None => {
                    return Err(DotError::lexical(
                        "unterminated quoted string",
                        start,
                    ));
                }
                Some(b'"') => {
                    self.read_char();
                    break;
                }
                Some(b'\r') | Some(b'\n') => {
                    self.read_newline();
                    result.push(b'\n');
                }
                Some(b'\\') => {
                    self.read_char();
                    match self.peek() {
                        None => {
                            return Err(DotError::lexical(
                                "unterminated quoted string",
                                start,
                            ));
                        }
                        Some(b'"') => {
                            self.read_char();
                            result.push(b'"');
                        }
                        Some(b'\r') | Some(b'\n') => {
                            // Line continuation.
                            self.read_newline();
                        }
                        Some(ch) => {
                            self.read_char();
                            result.push(b'\\');
                            result.push(ch);
                        }
                    }
                }
                Some(ch) => {
                    self.read_char();
                    result.push(ch);
                }
            }
        }
        Ok(Token::QuotedString(String::from_utf8_lossy(&result).into_owned()))
    }

    fn read_html(&mut self) -> Result<Token, DotError> {
        let start = self.location();
        // Consume the opening bracket.
        self.read_char();
        let content_start = self.pos;
        let mut depth = 1;
        loop {
            match self.peek() {
                None => {
                    return Err(DotError::lexical(
                        "unterminated html string",
                        start,
                    ));
                }
                Some(b'<') => {
                    depth += 1;
                    self.read_char();
                }
                Some(b'>') => {
                    depth -= 1;
                    self.read_char();
                    if depth == 0 {
                        break;
                    }
                }
                _ => {
                    if !self.read_newline() {
                        self.read_char();
                    }
                }
            }
        }
        let content = &self.input[content_start..self.pos - 1];
        if let Err(reason) = validate_html_string(content) {
            let msg = format!("invalid markup in html string: {}", reason);
            return Err(DotError::lexical(&msg, start));
        }
        Ok(Token::HtmlString(content.to_string()))
    }

    /// Lexes the next token and returns it with its location.
    pub fn next_token(&mut self) -> Result<(Token, Location), DotError> {
        while self.skip_comment()? || self.skip_whitespace() {}
        let loc = self.location();

        let ch = match self.peek() {
            Some(ch) => ch,
            None => return Ok((Token::EOF, loc)),
        };

        let tok = match ch {
            b'-' if self.peek_at(1) == Some(b'>') => {
                self.read_char();
                self.read_char();
                Token::ArrowRight
            }
            b'-' if self.peek_at(1) == Some(b'-') => {
                self.read_char();
                self.read_char();
                Token::ArrowLine
            }
            b'-' | b'.' | b'0'..=b'9' => match self.read_number() {
                Some(tok) => tok,
                None => {
                    return Err(DotError::lexical(
                        &format!("unexpected character '{}'", ch as char),
                        loc,
                    ));
                }
            },
            b'"' => self.read_string()?,
            b'<' => self.read_html()?,
            _ if is_identifier_start(ch) => self.read_identifier(),
            _ => {
                let tok = match ch {
                    b'=' => Token::Equal,
                    b';' => Token::Semicolon,
                    b':' => Token::Colon,
                    b',' => Token::Comma,
                    b'+' => Token::Plus,
                    b'[' => Token::OpenBracket,
                    b']' => Token::CloseBracket,
                    b'{' => Token::OpenBrace,
                    b'}' => Token::CloseBrace,
                    _ => {
                        let msg = format!("unexpected byte 0x{:02x}", ch);
                        return Err(DotError::lexical(&msg, loc));
                    }
                };
                self.read_char();
                tok
            }
        };
        Ok((tok, loc))
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Result<(Token, Location), DotError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let res = self.next_token();
        match &res {
            Ok((Token::EOF, _)) | Err(_) => {
                self.done = true;
            }
            _ => {}
        }
        Some(res)
    }
}
