pub mod display_width;
pub mod error;
pub mod graph_ast;
pub mod graph_layout;
pub mod graph_parser;
pub mod graph_renderer;
pub mod grid;

pub use error::ParseError;
pub use graph_renderer::RenderOptions;

/// Leads the text [`render_to_tui`] returns when parsing fails. A rendered grid
/// never starts with it: its first row is box border or padding.
pub const ERROR_PREFIX: &str = "Error: ";

pub fn render(input: &str) -> Result<String, ParseError> {
    render_with_options(input, &RenderOptions::default())
}

/// Parse, lay out and draw a flowchart. Only parsing can fail.
pub fn render_with_options(input: &str, options: &RenderOptions) -> Result<String, ParseError> {
    let mut graph = graph_parser::parse_graph(input)?;
    graph_layout::layout(&mut graph);
    Ok(graph_renderer::render(&graph, options))
}

/// Like [`render_with_options`], but folds failures into the text itself as
/// `Error: <message>` so callers always get something printable.
pub fn render_to_tui(input: &str, options: &RenderOptions) -> String {
    render_with_options(input, options).unwrap_or_else(|e| format!("{ERROR_PREFIX}{e}"))
}
