//! # markdown-trickle-parser
//!
//! An incremental markdown parser for text that arrives a few characters at
//! a time, such as tokens streamed from a language model.
//!
//! ## Why Character-at-a-Time?
//!
//! A batch parser needs the whole document (or at least a whole block)
//! before it can say anything. When text trickles in, that means either
//! re-parsing the growing buffer on every chunk or showing nothing until a
//! block finishes. This crate instead commits to structure as early as a
//! single character allows and reports it straight away:
//!
//! - **Chunk invariant**: the events produced depend only on the
//!   concatenated input, never on how it was split into chunks
//! - **Append-only**: nothing already emitted is revised
//! - **Bounded lookahead**: at most one pending marker run per kind is held
//!   back, waiting for the character that disambiguates it
//!
//! ## Architecture Overview
//!
//! ```text
//! chunks → StreamParser → RenderSink
//!          (per-char       (Document tree, terminal,
//!           dispatch)       EventLog, Vec<Event>)
//! ```
//!
//! ### 1. Marker resolution ([`markers`] module)
//!
//! `#`, `*`, `` ` ``, and list markers are buffered and resolved by pure
//! functions once the following character is known.
//!
//! ### 2. Dispatch ([`parser`] module)
//!
//! [`StreamParser`] routes each character through a fixed priority order
//! and tracks the current [`BlockState`] and [`InlineStack`].
//!
//! ### 3. Sinks ([`sink`] module)
//!
//! Anything implementing [`RenderSink`] can receive the output. The
//! [`Event`] enum mirrors the sink calls one-to-one for recording.
//!
//! ## Module Structure
//!
//! ```text
//! markdown-trickle-parser/
//! ├── lib.rs          # This file - public API
//! ├── event.rs        # Event, BlockKind, InlineKind and the trace format
//! ├── sink.rs         # RenderSink trait, Vec<Event> and EventLog sinks
//! ├── markers.rs      # Marker buffers and their resolution rules
//! ├── state.rs        # BlockState and InlineStack
//! ├── error.rs        # Lifecycle errors
//! └── parser/
//!     ├── mod.rs         # StreamParser and the character dispatcher
//!     ├── transitions.rs # Opening and closing blocks and spans
//!     └── finalize.rs    # End of stream
//! ```
//!
//! ## Quick Start
//!
//! ```
//! use markdown_trickle_parser::{EventLog, StreamParser};
//!
//! let mut parser = StreamParser::new();
//! let mut log = EventLog::new();
//!
//! for chunk in ["Some **bo", "ld** te", "xt\n"] {
//!     parser.feed(chunk, &mut log).unwrap();
//! }
//! parser.finish(&mut log).unwrap();
//!
//! assert_eq!(
//!     log.trace(),
//!     r#"+paragraph "Some " +bold "bold" -bold " text\n""#
//! );
//! ```
//!
//! ## Supported Syntax
//!
//! Headings (`#` to `######`), unordered (`- `) and ordered (`N. `) list
//! items, `*italic*`, `**bold**`, `` `inline code` ``, and triple-backtick
//! fenced code with an optional language. Everything else is literal text.

pub mod error;
pub mod event;
pub mod markers;
pub mod parser;
pub mod sink;
pub mod state;

pub use error::StreamError;
pub use event::{BlockKind, Event, InlineKind, trace};
pub use parser::StreamParser;
pub use sink::{EventLog, RenderSink};
pub use state::{BlockState, InlineStack, Resume};

/// Parse a complete document in one go, returning the merged event log.
///
/// Equivalent to feeding `input` as a single chunk and finishing.
pub fn parse(input: &str) -> EventLog {
    let mut log = EventLog::new();
    let mut parser = StreamParser::new();
    parser.consume(input, &mut log);
    parser.resolve_end(&mut log);
    log
}
