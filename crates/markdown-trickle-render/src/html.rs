//! HTML serialisation of a [`Document`].
//!
//! Paragraphs become `<div>` (their text keeps its newlines), list items
//! directly under the root are grouped into `<ul>`/`<ol>` runs, and fenced
//! code becomes `<pre><code class="language-…">`.

use markdown_trickle_parser::{BlockKind, InlineKind};

use crate::document::{Document, Node, NodeKind};

/// Serialise the whole document.
pub fn to_html(doc: &Document) -> String {
    let mut out = String::new();
    // Ordered-ness of the list group currently open, if any.
    let mut list: Option<bool> = None;

    for node in doc.root().children() {
        let item = match node.kind() {
            NodeKind::Block(BlockKind::ListItem { ordered }) => Some(*ordered),
            _ => None,
        };
        if item != list {
            if let Some(ordered) = list {
                out.push_str(list_tag(ordered, true));
            }
            if let Some(ordered) = item {
                out.push_str(list_tag(ordered, false));
            }
            list = item;
        }
        write_node(node, &mut out);
    }

    if let Some(ordered) = list {
        out.push_str(list_tag(ordered, true));
    }
    out
}

fn list_tag(ordered: bool, close: bool) -> &'static str {
    match (ordered, close) {
        (false, false) => "<ul>",
        (false, true) => "</ul>",
        (true, false) => "<ol>",
        (true, true) => "</ol>",
    }
}

fn write_node(node: Node<'_>, out: &mut String) {
    match node.kind() {
        NodeKind::Root => write_children(node, out),
        NodeKind::Text(text) => {
            html_escape::encode_text_to_string(text, out);
        }
        NodeKind::Block(kind) => {
            open_block_tag(kind, out);
            write_children(node, out);
            close_block_tag(kind, out);
        }
        NodeKind::Inline(kind) => {
            let tag = inline_tag(*kind);
            out.push_str(&format!("<{tag}>"));
            write_children(node, out);
            out.push_str(&format!("</{tag}>"));
        }
    }
}

fn write_children(node: Node<'_>, out: &mut String) {
    for child in node.children() {
        write_node(child, out);
    }
}

fn open_block_tag(kind: &BlockKind, out: &mut String) {
    match kind {
        BlockKind::Paragraph => out.push_str("<div>"),
        BlockKind::Heading { level } => out.push_str(&format!("<h{level}>")),
        BlockKind::ListItem { .. } => out.push_str("<li>"),
        BlockKind::CodeBlock { language: None } => out.push_str("<pre><code>"),
        BlockKind::CodeBlock {
            language: Some(language),
        } => {
            out.push_str("<pre><code class=\"language-");
            html_escape::encode_double_quoted_attribute_to_string(language, out);
            out.push_str("\">");
        }
    }
}

fn close_block_tag(kind: &BlockKind, out: &mut String) {
    match kind {
        BlockKind::Paragraph => out.push_str("</div>"),
        BlockKind::Heading { level } => out.push_str(&format!("</h{level}>")),
        BlockKind::ListItem { .. } => out.push_str("</li>"),
        BlockKind::CodeBlock { .. } => out.push_str("</code></pre>"),
    }
}

fn inline_tag(kind: InlineKind) -> &'static str {
    match kind {
        InlineKind::Bold => "strong",
        InlineKind::Italic => "em",
        InlineKind::InlineCode => "code",
    }
}
