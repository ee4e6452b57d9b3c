//! # Render Events
//!
//! Events are the only output of the parser. Instead of building a tree,
//! the parser describes structure as a **flat, ordered sequence** of
//! open/close/append instructions, delivered to a [`RenderSink`] one at a
//! time as characters arrive.
//!
//! ## Event Protocol
//!
//! ```text
//! OpenBlock(Heading { level: 1 })   ← begin an <h1>
//!   Text("Title")
//! CloseBlock                        ← end the heading
//! OpenBlock(Paragraph)
//!   Text("Some ")
//!   OpenInline(Bold)
//!     Text("bold")
//!   CloseInline(Bold)
//!   Text("\n")
//! ```
//!
//! The protocol is deliberately loose in two places, both inherited from
//! incremental DOM rendering:
//!
//! - `CloseBlock` implicitly ends every inline span still open inside the
//!   block. Emphasis never survives a block boundary.
//! - `CloseInline(kind)` closes the *nearest* open span of that kind, which
//!   is not necessarily the innermost one. `**a *b** c*` closes Bold while
//!   Italic is nominally on top.
//!
//! Text is not guaranteed to arrive in runs: the parser appends literal
//! characters one call at a time. Use [`EventLog`](crate::EventLog) to
//! observe merged text runs.
//!
//! [`RenderSink`]: crate::RenderSink

use std::fmt;

/// A block-level container.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BlockKind {
    /// Plain text. Consecutive lines, blank lines included, share one
    /// paragraph until a heading, list item, or fence interrupts it.
    Paragraph,
    /// `#` to `######`.
    Heading { level: u8 },
    /// `- ` or `N. ` at line start.
    ListItem { ordered: bool },
    /// Triple-backtick fence. `None` when no info string was given.
    CodeBlock { language: Option<String> },
}

/// An inline span inside a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InlineKind {
    Bold,
    Italic,
    InlineCode,
}

/// A structural rendering instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    OpenBlock(BlockKind),
    CloseBlock,
    OpenInline(InlineKind),
    CloseInline(InlineKind),
    Text(String),
}

impl Event {
    /// Create a text event.
    pub fn text(text: impl Into<String>) -> Self {
        Event::Text(text.into())
    }

    /// Check if this event opens a block or inline span.
    pub fn is_open(&self) -> bool {
        matches!(self, Event::OpenBlock(_) | Event::OpenInline(_))
    }

    /// Check if this event closes a block or inline span.
    pub fn is_close(&self) -> bool {
        matches!(self, Event::CloseBlock | Event::CloseInline(_))
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockKind::Paragraph => f.write_str("paragraph"),
            BlockKind::Heading { level } => write!(f, "h{level}"),
            BlockKind::ListItem { ordered: false } => f.write_str("item(-)"),
            BlockKind::ListItem { ordered: true } => f.write_str("item(1.)"),
            BlockKind::CodeBlock { language: None } => f.write_str("fence"),
            BlockKind::CodeBlock {
                language: Some(lang),
            } => write!(f, "fence({lang})"),
        }
    }
}

impl fmt::Display for InlineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            InlineKind::Bold => "bold",
            InlineKind::Italic => "italic",
            InlineKind::InlineCode => "code",
        })
    }
}

/// Compact trace form: `+h1 "Title" -block`.
impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::OpenBlock(kind) => write!(f, "+{kind}"),
            Event::CloseBlock => f.write_str("-block"),
            Event::OpenInline(kind) => write!(f, "+{kind}"),
            Event::CloseInline(kind) => write!(f, "-{kind}"),
            Event::Text(text) => write!(f, "{text:?}"),
        }
    }
}

/// Render a sequence of events in trace form, space separated.
pub fn trace(events: &[Event]) -> String {
    events
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}
