//! Progressive ANSI terminal output.
//!
//! [`TerminalSink`] writes text the moment it arrives, switching styles on
//! every open and close. There is no tree and no lookahead, so the output
//! is exactly as incremental as the parser.

use std::io::{self, Write};

use crossterm::queue;
use crossterm::style::{Attribute, Color, ResetColor, SetAttribute, SetForegroundColor};
use markdown_trickle_parser::{BlockKind, InlineKind, RenderSink};

const BULLET: &str = "• ";
const CODE_BLOCK_COLOR: Color = Color::DarkYellow;
const INLINE_CODE_COLOR: Color = Color::Yellow;

/// Streams styled output to any writer.
///
/// Write errors cannot be returned through [`RenderSink`], so the first one
/// is kept and later output is skipped. Call [`finish`](Self::finish) to
/// get it back.
pub struct TerminalSink<W: Write> {
    out: W,
    block: Option<BlockKind>,
    spans: Vec<InlineKind>,
    /// Number of the last ordered item printed in the current list run.
    ordinal: usize,
    error: Option<io::Error>,
}

impl<W: Write> TerminalSink<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            block: None,
            spans: Vec::new(),
            ordinal: 0,
            error: None,
        }
    }

    /// Reset styling and flush, returning the first write error if any.
    pub fn finish(&mut self) -> io::Result<()> {
        if let Some(err) = self.error.take() {
            return Err(err);
        }
        queue!(self.out, SetAttribute(Attribute::Reset), ResetColor)?;
        self.out.flush()
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn record(&mut self, result: io::Result<()>) {
        if let Err(err) = result {
            log::warn!("terminal output failed: {err}");
            self.error = Some(err);
        }
    }

    fn failed(&self) -> bool {
        self.error.is_some()
    }

    fn restyle(&mut self) {
        if self.failed() {
            return;
        }
        let result = write_style(&mut self.out, self.block.as_ref(), &self.spans);
        self.record(result);
    }

    fn write_str(&mut self, text: &str) {
        if self.failed() {
            return;
        }
        let result = self
            .out
            .write_all(text.as_bytes())
            .and_then(|()| self.out.flush());
        self.record(result);
    }
}

/// Reset, then apply the style of the block and every open span.
fn write_style<W: Write>(
    out: &mut W,
    block: Option<&BlockKind>,
    spans: &[InlineKind],
) -> io::Result<()> {
    queue!(out, SetAttribute(Attribute::Reset), ResetColor)?;
    match block {
        Some(BlockKind::Heading { .. }) => {
            queue!(
                out,
                SetAttribute(Attribute::Bold),
                SetAttribute(Attribute::Underlined)
            )?;
        }
        Some(BlockKind::CodeBlock { .. }) => {
            queue!(out, SetForegroundColor(CODE_BLOCK_COLOR))?;
        }
        _ => {}
    }
    for span in spans {
        match span {
            InlineKind::Bold => queue!(out, SetAttribute(Attribute::Bold))?,
            InlineKind::Italic => queue!(out, SetAttribute(Attribute::Italic))?,
            InlineKind::InlineCode => queue!(out, SetForegroundColor(INLINE_CODE_COLOR))?,
        }
    }
    Ok(())
}

impl<W: Write> RenderSink for TerminalSink<W> {
    fn open_block(&mut self, kind: &BlockKind) {
        self.block = Some(kind.clone());
        self.spans.clear();
        self.restyle();
        match kind {
            BlockKind::ListItem { ordered: false } => self.write_str(BULLET),
            BlockKind::ListItem { ordered: true } => {
                self.ordinal += 1;
                let marker = format!("{}. ", self.ordinal);
                self.write_str(&marker);
            }
            _ => {}
        }
    }

    fn close_block(&mut self) {
        self.block = None;
        self.spans.clear();
        self.restyle();
    }

    fn open_inline(&mut self, kind: InlineKind) {
        self.spans.push(kind);
        self.restyle();
    }

    fn close_inline(&mut self, kind: InlineKind) {
        if let Some(pos) = self.spans.iter().rposition(|open| *open == kind) {
            self.spans.remove(pos);
        }
        self.restyle();
    }

    fn append_text(&mut self, text: &str) {
        let in_list = matches!(self.block, Some(BlockKind::ListItem { .. }));
        if !in_list && !text.trim().is_empty() {
            self.ordinal = 0;
        }
        self.write_str(text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use markdown_trickle_parser::StreamParser;

    fn render(input: &str) -> String {
        let mut sink = TerminalSink::new(Vec::new());
        let mut parser = StreamParser::new();
        parser.feed(input, &mut sink).unwrap();
        parser.finish(&mut sink).unwrap();
        sink.finish().unwrap();
        String::from_utf8(sink.into_inner()).unwrap()
    }

    /// Drop CSI escape sequences, leaving the visible text.
    fn strip_ansi(styled: &str) -> String {
        let mut plain = String::new();
        let mut chars = styled.chars();
        while let Some(ch) = chars.next() {
            if ch == '\u{1b}' {
                for next in chars.by_ref() {
                    if next.is_ascii_alphabetic() {
                        break;
                    }
                }
            } else {
                plain.push(ch);
            }
        }
        plain
    }

    #[test]
    fn bullets_and_numbers() {
        let plain = strip_ansi(&render("- a\n1. b\n1. c\n"));
        assert_eq!(plain, "• a\n1. b\n2. c\n");
    }

    #[test]
    fn numbering_restarts_after_visible_text() {
        let plain = strip_ansi(&render("1. a\n1. b\ntext\n1. c\n"));
        assert_eq!(plain, "1. a\n2. b\ntext\n1. c\n");
    }

    #[test]
    fn text_arrives_unstyled_between_markers() {
        let styled = render("plain **bold**");
        assert!(styled.contains("plain "));
        assert!(styled.contains("bold"));
        assert_eq!(strip_ansi(&styled), "plain bold");
    }

    #[test]
    fn bold_uses_the_bold_attribute() {
        let styled = render("**x**\n");
        let bold = format!("{}", SetAttribute(Attribute::Bold));
        assert!(styled.contains(&format!("{bold}x")));
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn first_write_error_is_reported_by_finish() {
        let mut sink = TerminalSink::new(BrokenPipe);
        let mut parser = StreamParser::new();
        parser.feed("# a\nb", &mut sink).unwrap();

        let err = sink.finish().unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    }
}
