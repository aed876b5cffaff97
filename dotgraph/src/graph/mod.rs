//! The in-memory graph model: a root graph that owns the edges, and a tree of
//! subgraphs that group nodes.

pub mod edge;
#[allow(clippy::module_inception)]
pub mod graph;
pub mod node;
pub mod subgraph;

pub use edge::{Compass, Edge, Endpoint};
pub use graph::{Graph, GraphKind};
pub use node::Node;
pub use subgraph::SubGraph;
