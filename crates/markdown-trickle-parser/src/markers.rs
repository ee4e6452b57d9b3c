//! Marker buffers and their resolution rules.
//!
//! Markdown delimiters are ambiguous until the character *after* them
//! arrives: `#` may open a heading or be literal, `*` may be italic or half
//! of bold, `` ` `` may be inline code or a fence. The parser accumulates
//! each kind of marker greedily and resolves the run here once a
//! disambiguating character (or end of stream) shows up.
//!
//! Every function in this module is pure. The parser owns the buffers and
//! applies the returned decisions.

use std::sync::OnceLock;

use regex::Regex;

use crate::event::InlineKind;

pub const HASH: char = '#';
pub const ASTERISK: char = '*';
pub const BACKTICK: char = '`';
pub const DASH: char = '-';

/// Deepest heading level; longer hash runs are literal.
pub const MAX_HEADING_LEVEL: usize = 6;
/// Backticks needed to open or close a fence.
pub const FENCE_LEN: usize = 3;

/// A run of one repeated marker character.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MarkerRun {
    count: usize,
}

impl MarkerRun {
    pub fn push(&mut self) {
        self.count += 1;
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Empty the run, returning how many markers it held.
    pub fn take(&mut self) -> usize {
        std::mem::take(&mut self.count)
    }
}

/// The four independent marker accumulators.
///
/// `hashes` and `list_marker` only start growing at line start;
/// `asterisks` and `backticks` grow anywhere.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarkerBuffers {
    pub hashes: MarkerRun,
    pub asterisks: MarkerRun,
    pub backticks: MarkerRun,
    pub list_marker: String,
}

impl MarkerBuffers {
    pub fn is_empty(&self) -> bool {
        self.hashes.is_empty()
            && self.asterisks.is_empty()
            && self.backticks.is_empty()
            && self.list_marker.is_empty()
    }
}

/// What a run of `#` turns into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashOutcome {
    Heading { level: u8 },
    Literal { count: usize },
}

/// Resolve a hash run. Any run of one to six hashes still at line start
/// opens a heading, whether or not a space follows.
pub fn resolve_hashes(count: usize, at_line_start: bool) -> HashOutcome {
    if at_line_start && (1..=MAX_HEADING_LEVEL).contains(&count) {
        HashOutcome::Heading { level: count as u8 }
    } else {
        HashOutcome::Literal { count }
    }
}

/// The inline toggles an asterisk run performs, in order: one Bold per
/// pair, then one Italic for an odd leftover.
///
/// `***` toggles Bold then Italic; `****` toggles Bold twice.
pub fn emphasis_toggles(count: usize) -> impl Iterator<Item = InlineKind> {
    std::iter::repeat_n(InlineKind::Bold, count / 2)
        .chain((count % 2 == 1).then_some(InlineKind::Italic))
}

/// Characters that may extend a list marker buffer.
pub fn is_list_marker_char(ch: char) -> bool {
    ch == DASH || ch == '.' || ch.is_ascii_digit()
}

fn ordered_marker() -> &'static Regex {
    static ORDERED_MARKER: OnceLock<Regex> = OnceLock::new();
    ORDERED_MARKER.get_or_init(|| Regex::new(r"^\d+\.$").expect("Invalid ordered marker regex"))
}

/// What a buffered list marker turns into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListOutcome {
    /// The marker was confirmed; the following space is consumed.
    Item { ordered: bool },
    /// Not a list marker; emit the buffered text and keep processing.
    Literal(String),
}

/// Resolve a list marker buffer against the character that ended it.
///
/// `next` is `None` when the buffer is force-flushed (newline, backtick),
/// which never confirms a marker.
pub fn resolve_list_marker(marker: String, next: Option<char>, at_line_start: bool) -> ListOutcome {
    if next == Some(' ') && at_line_start {
        if marker == "-" {
            return ListOutcome::Item { ordered: false };
        }
        if ordered_marker().is_match(&marker) {
            return ListOutcome::Item { ordered: true };
        }
    }
    ListOutcome::Literal(marker)
}

/// The context a backtick run is resolved in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickContext {
    /// Text, heading, or list item.
    Plain,
    /// Reading a fence's language, or inside the fenced block.
    Fence,
    InlineCode,
}

/// What a backtick run turns into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Start reading a fence's language name.
    BeginFence,
    /// Open a fenced block immediately, with no language (end of stream).
    OpenEmptyFence,
    /// Open inline code. With `leading_tick` the second backtick of a
    /// double run becomes the first character of the code content.
    OpenInlineCode { leading_tick: bool },
    /// Close the fence, then emit `trailing` literal backticks.
    CloseFence { trailing: usize },
    /// Close inline code, then emit `trailing` literal backticks.
    CloseInlineCode { trailing: usize },
    Literal { count: usize },
}

/// Resolve a backtick run ended by a non-backtick character.
pub fn resolve_backticks(count: usize, context: TickContext) -> TickOutcome {
    match context {
        TickContext::Plain if count >= FENCE_LEN => TickOutcome::BeginFence,
        TickContext::Plain => TickOutcome::OpenInlineCode {
            leading_tick: count == 2,
        },
        TickContext::Fence if count >= FENCE_LEN => TickOutcome::CloseFence {
            trailing: count - FENCE_LEN,
        },
        TickContext::Fence => TickOutcome::Literal { count },
        TickContext::InlineCode => TickOutcome::CloseInlineCode {
            trailing: count.saturating_sub(1),
        },
    }
}

/// Resolve a backtick run still pending when the stream ends.
///
/// No language can follow, so a plain fence opens empty, and no extra
/// backticks are re-emitted after a close.
pub fn finalize_backticks(count: usize, context: TickContext) -> TickOutcome {
    match context {
        TickContext::Plain if count >= FENCE_LEN => TickOutcome::OpenEmptyFence,
        TickContext::Plain => TickOutcome::OpenInlineCode {
            leading_tick: false,
        },
        TickContext::Fence if count >= FENCE_LEN => TickOutcome::CloseFence { trailing: 0 },
        TickContext::Fence => TickOutcome::Literal { count },
        TickContext::InlineCode => TickOutcome::CloseInlineCode { trailing: 0 },
    }
}
