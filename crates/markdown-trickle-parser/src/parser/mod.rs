//! # Streaming Parser
//!
//! [`StreamParser`] consumes markdown one `char` at a time and drives a
//! [`RenderSink`] as it goes. It never looks back at consumed input and
//! never waits for more: anything ambiguous is held in a small marker
//! buffer until the next character decides it.
//!
//! ## Dispatch Order
//!
//! Each character walks a fixed priority list and stops at the first step
//! that consumes it:
//!
//! ```text
//!  1. inside a fence         only backticks matter; language or verbatim text
//!  2. inside inline code     only backticks matter; verbatim text
//!  3. backtick               flush #/*/list buffers, start a backtick run
//!  4. pending backticks      resolve; re-dispatch if we entered code
//!  5. newline                flush buffers, end heading/list item, emit "\n"
//!  6. '#' at line start      start a hash run
//!  7. pending hashes         ' ' opens a heading, anything else flushes
//!  8. list char at line start  start a list marker
//!  9. pending list marker    "- " / "N. " opens an item, else literal
//! 10. '*'                    start an asterisk run
//! 11. pending asterisks      toggle Bold per pair, then Italic
//! 12. literal                append to the innermost open container
//! ```
//!
//! ## Re-dispatch
//!
//! Resolving a backtick run can move the parser into or out of a code
//! mode, and the character that triggered the resolution then belongs to
//! the new mode. That character is dispatched exactly once more. The
//! second pass always finds the backtick buffer empty, so it cannot ask
//! for a third.
//!
//! ## Lifecycle
//!
//! ```
//! use markdown_trickle_parser::{EventLog, StreamParser};
//!
//! let mut parser = StreamParser::new();
//! let mut log = EventLog::new();
//!
//! parser.feed("# Ti", &mut log).unwrap();
//! parser.feed("tle\n", &mut log).unwrap();
//! parser.finish(&mut log).unwrap();
//!
//! assert_eq!(log.trace(), r#"+h1 "Title" -block +paragraph "\n""#);
//! ```

mod finalize;
mod transitions;


use crate::error::StreamError;
use crate::event::{BlockKind, InlineKind};
use crate::markers::{
    self, ASTERISK, BACKTICK, HASH, HashOutcome, ListOutcome, MAX_HEADING_LEVEL, MarkerBuffers,
};
use crate::sink::RenderSink;
use crate::state::{BlockState, InlineStack};

/// Whether a dispatch pass consumed the character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Consumed,
    /// A buffer flush changed mode; run the same character again.
    Redispatch,
}

/// Incremental markdown parser for one stream.
///
/// All state lives in the instance. Independent streams need independent
/// parsers; one parser must not be fed from two places at once.
#[derive(Debug, Clone)]
pub struct StreamParser {
    state: BlockState,
    buffers: MarkerBuffers,
    inline: InlineStack,
    /// The block container currently open in the sink, if any.
    block: Option<BlockKind>,
    at_line_start: bool,
    finished: bool,
}

impl StreamParser {
    /// Create a parser ready to accept a fresh stream.
    pub fn new() -> Self {
        Self {
            state: BlockState::Text,
            buffers: MarkerBuffers::default(),
            inline: InlineStack::default(),
            block: None,
            at_line_start: true,
            finished: false,
        }
    }

    /// Discard all state and begin a new stream.
    pub fn start_stream(&mut self) {
        log::debug!("starting new stream");
        *self = Self::new();
    }

    /// Process a chunk of any size, including empty chunks and chunks that
    /// split a marker run.
    pub fn feed<S: RenderSink + ?Sized>(
        &mut self,
        chunk: &str,
        sink: &mut S,
    ) -> Result<(), StreamError> {
        if self.finished {
            return Err(StreamError::FeedAfterFinish);
        }
        self.consume(chunk, sink);
        Ok(())
    }

    pub fn block_state(&self) -> &BlockState {
        &self.state
    }

    /// Open inline spans, oldest first.
    pub fn inline_spans(&self) -> &[InlineKind] {
        self.inline.as_slice()
    }

    pub fn current_block(&self) -> Option<&BlockKind> {
        self.block.as_ref()
    }

    pub fn at_line_start(&self) -> bool {
        self.at_line_start
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Whether any marker run is waiting for a disambiguating character.
    pub fn has_pending_markers(&self) -> bool {
        !self.buffers.is_empty()
    }

    pub(crate) fn consume<S: RenderSink + ?Sized>(&mut self, chunk: &str, sink: &mut S) {
        for ch in chunk.chars() {
            self.push_char(ch, sink);
        }
    }

    fn push_char<S: RenderSink + ?Sized>(&mut self, ch: char, sink: &mut S) {
        if self.dispatch(ch, sink) == Flow::Redispatch {
            let flow = self.dispatch(ch, sink);
            debug_assert_eq!(flow, Flow::Consumed, "{ch:?} re-dispatched twice");
        }
    }

    fn dispatch<S: RenderSink + ?Sized>(&mut self, ch: char, sink: &mut S) -> Flow {
        if self.state.in_fence() {
            return self.fence_char(ch, sink);
        }
        if self.state.in_inline_code() {
            return self.inline_code_char(ch, sink);
        }

        if ch == BACKTICK {
            self.flush_line_markers(sink);
            self.buffers.backticks.push();
            return Flow::Consumed;
        }

        if !self.buffers.backticks.is_empty() {
            self.flush_backticks(sink);
            if self.state.is_code() {
                return Flow::Redispatch;
            }
        }

        if ch == '\n' {
            self.newline(sink);
            return Flow::Consumed;
        }

        if self.at_line_start && ch == HASH {
            self.buffers.hashes.push();
            return Flow::Consumed;
        }

        if !self.buffers.hashes.is_empty() {
            if ch == ' ' && self.buffers.hashes.len() <= MAX_HEADING_LEVEL {
                self.flush_hashes(sink);
                return Flow::Consumed;
            }
            if ch == HASH {
                self.buffers.hashes.push();
                return Flow::Consumed;
            }
            self.flush_hashes(sink);
        }

        if self.at_line_start && markers::is_list_marker_char(ch) {
            self.buffers.list_marker.push(ch);
            return Flow::Consumed;
        }

        if !self.buffers.list_marker.is_empty() {
            if markers::is_list_marker_char(ch) {
                self.buffers.list_marker.push(ch);
                return Flow::Consumed;
            }
            if self.flush_list_marker(Some(ch), sink) {
                return Flow::Consumed;
            }
        }

        if ch == ASTERISK {
            self.buffers.asterisks.push();
            return Flow::Consumed;
        }

        if !self.buffers.asterisks.is_empty() {
            self.flush_asterisks(sink);
        }

        self.at_line_start = false;
        self.ensure_text_block(sink);
        append_char(ch, sink);
        Flow::Consumed
    }

    /// Fence language or fenced content.
    fn fence_char<S: RenderSink + ?Sized>(&mut self, ch: char, sink: &mut S) -> Flow {
        if ch == BACKTICK {
            self.buffers.backticks.push();
            return Flow::Consumed;
        }

        if !self.buffers.backticks.is_empty() {
            self.flush_backticks(sink);
            if !self.state.in_fence() {
                return Flow::Redispatch;
            }
        }

        match &mut self.state {
            BlockState::CodeBlockLang { language } => {
                if ch == '\n' {
                    let language = std::mem::take(language);
                    self.open_code_block(language.trim(), sink);
                } else {
                    language.push(ch);
                }
            }
            _ => append_char(ch, sink),
        }
        Flow::Consumed
    }

    fn inline_code_char<S: RenderSink + ?Sized>(&mut self, ch: char, sink: &mut S) -> Flow {
        if ch == BACKTICK {
            self.buffers.backticks.push();
            return Flow::Consumed;
        }

        if !self.buffers.backticks.is_empty() {
            self.flush_backticks(sink);
            if !self.state.in_inline_code() {
                return Flow::Redispatch;
            }
        }

        append_char(ch, sink);
        Flow::Consumed
    }

    fn newline<S: RenderSink + ?Sized>(&mut self, sink: &mut S) {
        self.flush_line_markers(sink);
        if self.state.is_line_block() {
            self.close_block(sink);
            self.state = BlockState::Text;
        }
        self.ensure_text_block(sink);
        sink.append_text("\n");
        self.at_line_start = true;
    }

    /// Force-flush the hash, asterisk, and list buffers as if a
    /// non-matching character had arrived.
    fn flush_line_markers<S: RenderSink + ?Sized>(&mut self, sink: &mut S) {
        if !self.buffers.hashes.is_empty() {
            self.flush_hashes(sink);
        }
        if !self.buffers.asterisks.is_empty() {
            self.flush_asterisks(sink);
        }
        if !self.buffers.list_marker.is_empty() {
            self.flush_list_marker(None, sink);
        }
    }

    fn flush_hashes<S: RenderSink + ?Sized>(&mut self, sink: &mut S) {
        let count = self.buffers.hashes.take();
        match markers::resolve_hashes(count, self.at_line_start) {
            HashOutcome::Heading { level } => self.open_heading(level, sink),
            HashOutcome::Literal { count } => {
                log::debug!("{count} hashes are literal text");
                self.ensure_text_block(sink);
                sink.append_text(&HASH.to_string().repeat(count));
            }
        }
        self.at_line_start = false;
    }

    fn flush_asterisks<S: RenderSink + ?Sized>(&mut self, sink: &mut S) {
        let count = self.buffers.asterisks.take();
        for kind in markers::emphasis_toggles(count) {
            if self.inline.contains(kind) {
                self.close_inline(kind, sink);
            } else {
                self.ensure_text_block(sink);
                self.open_inline(kind, sink);
            }
        }
    }

    /// Returns true if the marker became a list item and `next` (the space)
    /// was consumed with it.
    fn flush_list_marker<S: RenderSink + ?Sized>(
        &mut self,
        next: Option<char>,
        sink: &mut S,
    ) -> bool {
        let marker = std::mem::take(&mut self.buffers.list_marker);
        let opened = match markers::resolve_list_marker(marker, next, self.at_line_start) {
            ListOutcome::Item { ordered } => {
                self.open_list_item(ordered, sink);
                true
            }
            ListOutcome::Literal(text) => {
                log::debug!("list marker {text:?} is literal text");
                self.ensure_text_block(sink);
                sink.append_text(&text);
                false
            }
        };
        self.at_line_start = false;
        opened
    }

    fn flush_backticks<S: RenderSink + ?Sized>(&mut self, sink: &mut S) {
        let count = self.buffers.backticks.take();
        let outcome = markers::resolve_backticks(count, self.state.tick_context());
        log::debug!("{count} backticks in {:?} resolved to {outcome:?}", self.state);
        self.apply_tick_outcome(outcome, sink);
    }
}

impl Default for StreamParser {
    fn default() -> Self {
        Self::new()
    }
}

fn append_char<S: RenderSink + ?Sized>(ch: char, sink: &mut S) {
    let mut buf = [0u8; 4];
    sink.append_text(ch.encode_utf8(&mut buf));
}
