//! Block-level mode and the inline nesting stack.

use crate::event::InlineKind;
use crate::markers::TickContext;

/// The current block-level mode. Exactly one is active at a time.
///
/// The code modes (`CodeBlockLang`, `CodeBlock`, `InlineCode`) suppress
/// all heading, list, and emphasis detection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum BlockState {
    #[default]
    Text,
    Heading {
        level: u8,
    },
    ListItem {
        ordered: bool,
    },
    /// Seen an opening fence, reading the language name up to the newline.
    CodeBlockLang {
        language: String,
    },
    CodeBlock {
        language: Option<String>,
    },
    /// Inside inline code; `resume` is the mode it interrupted.
    InlineCode {
        resume: Resume,
    },
}

/// A plain mode that inline code can interrupt and return to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Resume {
    #[default]
    Text,
    Heading {
        level: u8,
    },
    ListItem {
        ordered: bool,
    },
}

impl BlockState {
    /// Reading a fence language or inside a fenced block.
    pub fn in_fence(&self) -> bool {
        matches!(
            self,
            BlockState::CodeBlockLang { .. } | BlockState::CodeBlock { .. }
        )
    }

    pub fn in_inline_code(&self) -> bool {
        matches!(self, BlockState::InlineCode { .. })
    }

    /// Any mode where markdown markers are not recognised.
    pub fn is_code(&self) -> bool {
        self.in_fence() || self.in_inline_code()
    }

    /// Heading or list item: both end at the next newline.
    pub fn is_line_block(&self) -> bool {
        matches!(
            self,
            BlockState::Heading { .. } | BlockState::ListItem { .. }
        )
    }

    pub(crate) fn tick_context(&self) -> TickContext {
        match self {
            BlockState::CodeBlockLang { .. } | BlockState::CodeBlock { .. } => TickContext::Fence,
            BlockState::InlineCode { .. } => TickContext::InlineCode,
            BlockState::Text | BlockState::Heading { .. } | BlockState::ListItem { .. } => {
                TickContext::Plain
            }
        }
    }

    /// The plain mode to return to after inline code opened from here.
    pub(crate) fn resume_point(&self) -> Resume {
        match self {
            BlockState::Heading { level } => Resume::Heading { level: *level },
            BlockState::ListItem { ordered } => Resume::ListItem { ordered: *ordered },
            _ => Resume::Text,
        }
    }
}

impl From<Resume> for BlockState {
    fn from(resume: Resume) -> Self {
        match resume {
            Resume::Text => BlockState::Text,
            Resume::Heading { level } => BlockState::Heading { level },
            Resume::ListItem { ordered } => BlockState::ListItem { ordered },
        }
    }
}

/// Currently open inline spans, in open order.
///
/// Not a strict stack: closing removes the nearest span of the requested
/// kind searching from the top, leaving spans opened before or after it in
/// place. `**a *b** c*` closes Bold while Italic is still open.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InlineStack {
    spans: Vec<InlineKind>,
}

impl InlineStack {
    pub fn push(&mut self, kind: InlineKind) {
        self.spans.push(kind);
    }

    pub fn contains(&self, kind: InlineKind) -> bool {
        self.spans.contains(&kind)
    }

    /// Remove the span of `kind` nearest the top. Returns false if none is open.
    pub fn remove_nearest(&mut self, kind: InlineKind) -> bool {
        match self.spans.iter().rposition(|&open| open == kind) {
            Some(idx) => {
                self.spans.remove(idx);
                true
            }
            None => false,
        }
    }

    pub fn as_slice(&self) -> &[InlineKind] {
        &self.spans
    }

    pub fn len(&self) -> usize {
        self.spans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    pub fn clear(&mut self) {
        self.spans.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remove_nearest_skips_spans_above() {
        let mut stack = InlineStack::default();
        stack.push(InlineKind::Bold);
        stack.push(InlineKind::Italic);

        assert!(stack.remove_nearest(InlineKind::Bold));
        assert_eq!(stack.as_slice(), &[InlineKind::Italic]);
    }

    #[test]
    fn remove_nearest_takes_topmost_duplicate() {
        let mut stack = InlineStack::default();
        stack.push(InlineKind::Italic);
        stack.push(InlineKind::Bold);
        stack.push(InlineKind::Italic);

        assert!(stack.remove_nearest(InlineKind::Italic));
        assert_eq!(stack.as_slice(), &[InlineKind::Italic, InlineKind::Bold]);
    }

    #[test]
    fn remove_missing_kind_is_a_no_op() {
        let mut stack = InlineStack::default();
        stack.push(InlineKind::Bold);
        assert!(!stack.remove_nearest(InlineKind::InlineCode));
        assert_eq!(stack.len(), 1);
        assert_eq!(stack.as_slice(), &[InlineKind::Bold]);
    }

    #[test]
    fn code_modes() {
        assert!(BlockState::CodeBlockLang { language: String::new() }.in_fence());
        assert!(BlockState::CodeBlock { language: None }.is_code());
        assert!(BlockState::InlineCode { resume: Resume::Text }.is_code());
        assert!(!BlockState::Heading { level: 1 }.is_code());
        assert!(BlockState::ListItem { ordered: true }.is_line_block());
        assert!(!BlockState::Text.is_line_block());
    }

    #[test]
    fn tick_context_per_mode() {
        assert_eq!(BlockState::Text.tick_context(), TickContext::Plain);
        assert_eq!(BlockState::Heading { level: 2 }.tick_context(), TickContext::Plain);
        assert_eq!(BlockState::CodeBlock { language: None }.tick_context(), TickContext::Fence);
        assert_eq!(
            BlockState::InlineCode { resume: Resume::Text }.tick_context(),
            TickContext::InlineCode
        );
    }

    #[test]
    fn resume_round_trips_plain_modes() {
        for state in [
            BlockState::Text,
            BlockState::Heading { level: 4 },
            BlockState::ListItem { ordered: false },
        ] {
            assert_eq!(BlockState::from(state.resume_point()), state);
        }
    }
}
