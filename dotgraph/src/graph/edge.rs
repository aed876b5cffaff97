//! Edges and their endpoints.

use crate::backends::dot::{quote_string, render_attributes};
use crate::core::attributes::Attributes;
use crate::core::format::{RenderBackend, RenderContext, Renderable};
use std::fmt;

/// The side of a node that an edge attaches to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Compass {
    N,
    NE,
    E,
    SE,
    S,
    SW,
    W,
    NW,
    C,
    Default,
}

impl Compass {
    pub fn from_name(name: &str) -> Option<Compass> {
        let c = match name {
            "n" => Compass::N,
            "ne" => Compass::NE,
            "e" => Compass::E,
            "se" => Compass::SE,
            "s" => Compass::S,
            "sw" => Compass::SW,
            "w" => Compass::W,
            "nw" => Compass::NW,
            "c" => Compass::C,
            "_" => Compass::Default,
            _ => {
                return None;
            }
        };
        Some(c)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Compass::N => "n",
            Compass::NE => "ne",
            Compass::E => "e",
            Compass::SE => "se",
            Compass::S => "s",
            Compass::SW => "sw",
            Compass::W => "w",
            Compass::NW => "nw",
            Compass::C => "c",
            Compass::Default => "_",
        }
    }

    pub fn is_compass(name: &str) -> bool {
        Self::from_name(name).is_some()
    }
}

impl fmt::Display for Compass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// "first":"port":ne
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub node: String,
    pub port: Option<String>,
    pub compass: Option<Compass>,
}

impl Endpoint {
    pub fn new(node: &str) -> Self {
        Self {
            node: node.to_string(),
            port: None,
            compass: None,
        }
    }

    pub fn with_port(node: &str, port: &str) -> Self {
        Self {
            node: node.to_string(),
            port: Some(port.to_string()),
            compass: None,
        }
    }

    pub fn with_compass(mut self, compass: Compass) -> Self {
        self.compass = Some(compass);
        self
    }

    /// \returns the DOT form of the endpoint. A port that looks like a compass
    /// point is followed by an explicit '_' compass, so that readers don't
    /// mistake it for a compass point.
    pub fn to_dot(&self) -> String {
        let mut res = quote_string(&self.node);
        if let Some(port) = &self.port {
            res.push(':');
            res.push_str(&quote_string(port));
            if self.compass.is_none() && Compass::is_compass(port) {
                res.push_str(":_");
            }
        }
        if let Some(compass) = &self.compass {
            res.push(':');
            res.push_str(compass.as_str());
        }
        res
    }
}

impl From<&str> for Endpoint {
    fn from(node: &str) -> Self {
        Endpoint::new(node)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    source: Endpoint,
    destination: Endpoint,
    attributes: Attributes,
}

impl Edge {
    pub fn new(
        source: Endpoint,
        destination: Endpoint,
        attributes: Attributes,
    ) -> Self {
        Self {
            source,
            destination,
            attributes,
        }
    }

    pub fn source(&self) -> &str {
        &self.source.node
    }

    pub fn destination(&self) -> &str {
        &self.destination.node
    }

    pub fn source_endpoint(&self) -> &Endpoint {
        &self.source
    }

    pub fn destination_endpoint(&self) -> &Endpoint {
        &self.destination
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    pub fn attributes_mut(&mut self) -> &mut Attributes {
        &mut self.attributes
    }

    pub fn touches(&self, node: &str) -> bool {
        self.source.node == node || self.destination.node == node
    }

    /// \returns true if this edge connects \p a to \p b. Undirected edges
    /// match in both orientations.
    pub fn connects(&self, a: &str, b: &str, directed: bool) -> bool {
        let forward = self.source.node == a && self.destination.node == b;
        if directed {
            return forward;
        }
        forward || (self.source.node == b && self.destination.node == a)
    }
}

impl Renderable for Edge {
    fn render(
        &self,
        depth: usize,
        ctx: &RenderContext,
        canvas: &mut dyn RenderBackend,
    ) {
        let op = if ctx.directed { "->" } else { "--" };
        let head = format!(
            "{} {} {}",
            self.source.to_dot(),
            op,
            self.destination.to_dot()
        );
        if self.attributes.is_empty() {
            canvas.write_line(depth, &format!("{};", head));
            return;
        }
        canvas.write_line(depth, &format!("{} [", head));
        render_attributes(&self.attributes, depth + 1, canvas);
        canvas.write_line(depth, "];");
    }
}

#[test]
fn test_endpoint_to_dot() {
    assert_eq!(Endpoint::new("a").to_dot(), "\"a\"");
    assert_eq!(Endpoint::with_port("a", "f0").to_dot(), "\"a\":\"f0\"");
    let ep = Endpoint::with_port("a", "f0").with_compass(Compass::NE);
    assert_eq!(ep.to_dot(), "\"a\":\"f0\":ne");
    // A port named like a compass point gets an explicit default compass.
    assert_eq!(Endpoint::with_port("a", "n").to_dot(), "\"a\":\"n\":_");
    let ep = Endpoint::new("a").with_compass(Compass::S);
    assert_eq!(ep.to_dot(), "\"a\":s");
}

#[test]
fn test_edge_connects() {
    let e = Edge::new("a".into(), "b".into(), Attributes::new());
    assert!(e.connects("a", "b", true));
    assert!(!e.connects("b", "a", true));
    assert!(e.connects("b", "a", false));
    assert!(e.touches("b"));
    assert!(!e.touches("c"));
}
