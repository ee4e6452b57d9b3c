//! # markdown-trickle-render
//!
//! Concrete [`RenderSink`](markdown_trickle_parser::RenderSink)
//! implementations for the streaming parser.
//!
//! - [`Document`]: an arena-backed tree, built the way an incremental DOM
//!   renderer would build it, with [`to_html`] and [`to_plain_text`]
//!   serialisers
//! - [`TerminalSink`]: ANSI-styled output written as events arrive
//!
//! ```
//! use markdown_trickle_render::render_html;
//!
//! assert_eq!(render_html("# Hi *there*"), "<h1>Hi <em>there</em></h1>");
//! ```

pub mod document;
pub mod html;
pub mod terminal;

pub use document::{Document, Node, NodeId, NodeKind, to_plain_text};
pub use html::to_html;
pub use terminal::TerminalSink;

/// Parse a complete markdown string straight to HTML.
pub fn render_html(input: &str) -> String {
    to_html(&Document::from_markdown(input))
}
