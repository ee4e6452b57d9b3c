//! Render sinks: the consumers of parser events.

use crate::event::{BlockKind, Event, InlineKind};

/// Receives structural events from the parser, synchronously and in order.
///
/// Implementations own whatever they render into (a DOM-like tree, a
/// terminal, a string buffer). The parser never reads back from the sink.
///
/// Text is appended to the innermost open inline span, else the current
/// block, else a root container. A sink that tracks containers must apply
/// the same "nearest span of kind" rule as the parser when closing inlines.
pub trait RenderSink {
    fn open_block(&mut self, kind: &BlockKind);
    fn close_block(&mut self);
    fn open_inline(&mut self, kind: InlineKind);
    fn close_inline(&mut self, kind: InlineKind);
    fn append_text(&mut self, text: &str);
}

impl<S: RenderSink + ?Sized> RenderSink for &mut S {
    fn open_block(&mut self, kind: &BlockKind) {
        (**self).open_block(kind);
    }

    fn close_block(&mut self) {
        (**self).close_block();
    }

    fn open_inline(&mut self, kind: InlineKind) {
        (**self).open_inline(kind);
    }

    fn close_inline(&mut self, kind: InlineKind) {
        (**self).close_inline(kind);
    }

    fn append_text(&mut self, text: &str) {
        (**self).append_text(text);
    }
}

/// Records every call verbatim, one `Text` event per append.
impl RenderSink for Vec<Event> {
    fn open_block(&mut self, kind: &BlockKind) {
        self.push(Event::OpenBlock(kind.clone()));
    }

    fn close_block(&mut self) {
        self.push(Event::CloseBlock);
    }

    fn open_inline(&mut self, kind: InlineKind) {
        self.push(Event::OpenInline(kind));
    }

    fn close_inline(&mut self, kind: InlineKind) {
        self.push(Event::CloseInline(kind));
    }

    fn append_text(&mut self, text: &str) {
        self.push(Event::Text(text.to_string()));
    }
}

/// Records events with consecutive appends merged into one text run.
///
/// A run ends at any open or close, so each `Text` in the log is exactly
/// the content of one text node in a DOM-style renderer.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct EventLog {
    events: Vec<Event>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn into_events(self) -> Vec<Event> {
        self.events
    }

    /// All appended text, concatenated in emission order.
    pub fn text(&self) -> String {
        self.events
            .iter()
            .filter_map(|event| match event {
                Event::Text(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Events in trace form (see [`crate::event::trace`]).
    pub fn trace(&self) -> String {
        crate::event::trace(&self.events)
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl RenderSink for EventLog {
    fn open_block(&mut self, kind: &BlockKind) {
        self.events.open_block(kind);
    }

    fn close_block(&mut self) {
        self.events.close_block();
    }

    fn open_inline(&mut self, kind: InlineKind) {
        self.events.open_inline(kind);
    }

    fn close_inline(&mut self, kind: InlineKind) {
        self.events.close_inline(kind);
    }

    fn append_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        if let Some(Event::Text(run)) = self.events.last_mut() {
            run.push_str(text);
        } else {
            self.events.append_text(text);
        }
    }
}
