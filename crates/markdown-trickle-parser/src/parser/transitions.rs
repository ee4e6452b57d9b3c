//! Block and inline transitions. Every sink open/close goes through here so
//! the parser's view of the open containers never drifts from the sink's.

use super::StreamParser;
use crate::event::{BlockKind, InlineKind};
use crate::markers::{BACKTICK, TickOutcome};
use crate::sink::RenderSink;
use crate::state::BlockState;

impl StreamParser {
    /// Open a block container, closing the current one first.
    ///
    /// A new block starts with no inline spans open.
    pub(super) fn open_block<S: RenderSink + ?Sized>(&mut self, kind: BlockKind, sink: &mut S) {
        if self.block.take().is_some() {
            sink.close_block();
        }
        log::trace!("open block {kind}");
        sink.open_block(&kind);
        self.block = Some(kind);
        self.inline.clear();
    }

    /// Close the current block. Inline spans still open inside it end with it.
    pub(super) fn close_block<S: RenderSink + ?Sized>(&mut self, sink: &mut S) {
        if let Some(kind) = self.block.take() {
            log::trace!("close block {kind}");
            sink.close_block();
        }
        self.inline.clear();
    }

    /// Open a paragraph if there is no block to write into.
    pub(super) fn ensure_text_block<S: RenderSink + ?Sized>(&mut self, sink: &mut S) {
        if self.block.is_none() && self.state == BlockState::Text {
            self.open_block(BlockKind::Paragraph, sink);
        }
    }

    pub(super) fn open_heading<S: RenderSink + ?Sized>(&mut self, level: u8, sink: &mut S) {
        self.open_block(BlockKind::Heading { level }, sink);
        self.state = BlockState::Heading { level };
    }

    pub(super) fn open_list_item<S: RenderSink + ?Sized>(&mut self, ordered: bool, sink: &mut S) {
        self.open_block(BlockKind::ListItem { ordered }, sink);
        self.state = BlockState::ListItem { ordered };
    }

    /// Enter the fenced block proper. An empty language is recorded as none.
    pub(super) fn open_code_block<S: RenderSink + ?Sized>(&mut self, language: &str, sink: &mut S) {
        let language = (!language.is_empty()).then(|| language.to_string());
        self.open_block(
            BlockKind::CodeBlock {
                language: language.clone(),
            },
            sink,
        );
        self.state = BlockState::CodeBlock { language };
    }

    /// Leave the fence. The next character counts as the start of a line.
    pub(super) fn close_code_block<S: RenderSink + ?Sized>(&mut self, sink: &mut S) {
        self.close_block(sink);
        self.state = BlockState::Text;
        self.at_line_start = true;
    }

    pub(super) fn open_inline<S: RenderSink + ?Sized>(&mut self, kind: InlineKind, sink: &mut S) {
        log::trace!("open inline {kind}");
        self.inline.push(kind);
        sink.open_inline(kind);
    }

    /// Close the nearest open span of `kind`; nothing happens if none is open.
    pub(super) fn close_inline<S: RenderSink + ?Sized>(&mut self, kind: InlineKind, sink: &mut S) {
        if self.inline.remove_nearest(kind) {
            log::trace!("close inline {kind}");
            sink.close_inline(kind);
        }
    }

    pub(super) fn open_inline_code<S: RenderSink + ?Sized>(&mut self, sink: &mut S) {
        self.ensure_text_block(sink);
        let resume = self.state.resume_point();
        self.open_inline(InlineKind::InlineCode, sink);
        self.state = BlockState::InlineCode { resume };
    }

    pub(super) fn close_inline_code<S: RenderSink + ?Sized>(&mut self, sink: &mut S) {
        self.close_inline(InlineKind::InlineCode, sink);
        if let BlockState::InlineCode { resume } = self.state {
            self.state = resume.into();
        }
    }

    /// Carry out a resolved backtick run.
    pub(super) fn apply_tick_outcome<S: RenderSink + ?Sized>(
        &mut self,
        outcome: TickOutcome,
        sink: &mut S,
    ) {
        match outcome {
            TickOutcome::BeginFence => {
                self.state = BlockState::CodeBlockLang {
                    language: String::new(),
                };
            }
            TickOutcome::OpenEmptyFence => self.open_code_block("", sink),
            TickOutcome::OpenInlineCode { leading_tick } => {
                self.open_inline_code(sink);
                if leading_tick {
                    append_ticks(1, sink);
                }
            }
            TickOutcome::CloseFence { trailing } => {
                self.close_code_block(sink);
                append_ticks(trailing, sink);
            }
            TickOutcome::CloseInlineCode { trailing } => {
                self.close_inline_code(sink);
                append_ticks(trailing, sink);
            }
            TickOutcome::Literal { count } => append_ticks(count, sink),
        }
    }
}

fn append_ticks<S: RenderSink + ?Sized>(count: usize, sink: &mut S) {
    if count > 0 {
        sink.append_text(&BACKTICK.to_string().repeat(count));
    }
}
