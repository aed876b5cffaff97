//! Defines the interfaces for writing graph entities as DOT text.

/// Describes where an entity is being rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderContext {
    /// Edges use '->' when set and '--' otherwise.
    pub directed: bool,
    /// Nodes inside of subgraphs only list their names; the attributes are
    /// written once, by the root graph.
    pub in_subgraph: bool,
}

impl RenderContext {
    pub fn new(directed: bool) -> Self {
        Self {
            directed,
            in_subgraph: false,
        }
    }

    pub fn subgraph(&self) -> Self {
        Self {
            directed: self.directed,
            in_subgraph: true,
        }
    }
}

/// This is the trait that all entities that can be written to a DOT file
/// need to implement.
pub trait Renderable {
    /// Render the entity into \p canvas at the nesting level \p depth.
    fn render(
        &self,
        depth: usize,
        ctx: &RenderContext,
        canvas: &mut dyn RenderBackend,
    );
}

/// This is the trait that all text backends need to implement.
pub trait RenderBackend {
    /// Emit one line of text, indented to the nesting level \p depth.
    fn write_line(&mut self, depth: usize, text: &str);
}
