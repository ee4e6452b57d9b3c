//! A DOM-like document tree built from parser events.
//!
//! The tree uses an index-based arena so nodes can point at their parent
//! without reference cycles. [`Document`] implements [`RenderSink`] and
//! keeps the same handles an incremental DOM renderer would: the current
//! block node, the open inline span nodes, and the text node that the next
//! append extends.
//!
//! # Example
//!
//! ```
//! use markdown_trickle_render::Document;
//!
//! let doc = Document::from_markdown("# Hello\nworld");
//! let kinds: Vec<_> = doc.root().children().map(|node| node.kind().clone()).collect();
//! assert_eq!(kinds.len(), 2);
//! assert_eq!(doc.root().all_text(), "Hello\nworld");
//! ```

use markdown_trickle_parser::{BlockKind, EventLog, InlineKind, RenderSink, StreamParser};

/// Index into the document's node arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(u32);

impl NodeId {
    fn new(index: usize) -> Self {
        NodeId(index as u32)
    }

    fn index(self) -> usize {
        self.0 as usize
    }
}

/// The kind of node in the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Root,
    Block(BlockKind),
    Inline(InlineKind),
    Text(String),
}

#[derive(Debug, Clone)]
struct NodeData {
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    kind: NodeKind,
}

/// Document tree plus the live handles used while it is being built.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<NodeData>,
    block: Option<NodeId>,
    /// Open inline spans in open order, mirroring the parser's stack.
    inline: Vec<(InlineKind, NodeId)>,
    /// The text node the next append extends, if the container hasn't changed.
    text_run: Option<NodeId>,
}

impl Document {
    pub fn new() -> Self {
        Self {
            nodes: vec![NodeData {
                parent: None,
                children: Vec::new(),
                kind: NodeKind::Root,
            }],
            block: None,
            inline: Vec::new(),
            text_run: None,
        }
    }

    /// Parse a complete markdown string into a document.
    pub fn from_markdown(input: &str) -> Self {
        let mut doc = Self::new();
        for event in markdown_trickle_parser::parse(input).into_events() {
            doc.apply(&event);
        }
        doc
    }

    /// Replay a recorded log into a fresh document.
    pub fn from_log(log: &EventLog) -> Self {
        let mut doc = Self::new();
        for event in log.events() {
            doc.apply(event);
        }
        doc
    }

    /// Feed `chunks` through a fresh parser into a new document.
    pub fn from_chunks<'c>(chunks: impl IntoIterator<Item = &'c str>) -> Self {
        let mut doc = Self::new();
        let mut parser = StreamParser::new();
        for chunk in chunks {
            // A fresh parser is never finished, so feed cannot fail here.
            if let Err(err) = parser.feed(chunk, &mut doc) {
                log::error!("unexpected stream error: {err}");
            }
        }
        if let Err(err) = parser.finish(&mut doc) {
            log::error!("unexpected stream error: {err}");
        }
        doc
    }

    fn apply(&mut self, event: &markdown_trickle_parser::Event) {
        use markdown_trickle_parser::Event;
        match event {
            Event::OpenBlock(kind) => self.open_block(kind),
            Event::CloseBlock => self.close_block(),
            Event::OpenInline(kind) => self.open_inline(*kind),
            Event::CloseInline(kind) => self.close_inline(*kind),
            Event::Text(text) => self.append_text(text),
        }
    }

    pub fn root(&self) -> Node<'_> {
        Node {
            doc: self,
            id: NodeId::new(0),
        }
    }

    pub fn get(&self, id: NodeId) -> Option<Node<'_>> {
        (id.index() < self.nodes.len()).then_some(Node { doc: self, id })
    }

    /// Number of nodes, including the root.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    /// The block currently receiving text, if any.
    pub fn current_block(&self) -> Option<Node<'_>> {
        self.block.and_then(|id| self.get(id))
    }

    /// Kinds of the open inline spans, oldest first.
    pub fn open_spans(&self) -> Vec<InlineKind> {
        self.inline.iter().map(|(kind, _)| *kind).collect()
    }

    fn node_data(&self, id: NodeId) -> &NodeData {
        &self.nodes[id.index()]
    }

    /// Innermost open container: top inline span, else block, else root.
    fn container(&self) -> NodeId {
        self.inline
            .last()
            .map(|(_, id)| *id)
            .or(self.block)
            .unwrap_or(NodeId::new(0))
    }

    fn push_node(&mut self, parent: NodeId, kind: NodeKind) -> NodeId {
        let id = NodeId::new(self.nodes.len());
        self.nodes.push(NodeData {
            parent: Some(parent),
            children: Vec::new(),
            kind,
        });
        self.nodes[parent.index()].children.push(id);
        id
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderSink for Document {
    fn open_block(&mut self, kind: &BlockKind) {
        let id = self.push_node(NodeId::new(0), NodeKind::Block(kind.clone()));
        self.block = Some(id);
        self.inline.clear();
        self.text_run = None;
    }

    fn close_block(&mut self) {
        self.block = None;
        self.inline.clear();
        self.text_run = None;
    }

    fn open_inline(&mut self, kind: InlineKind) {
        let parent = self.container();
        let id = self.push_node(parent, NodeKind::Inline(kind));
        self.inline.push((kind, id));
        self.text_run = None;
    }

    fn close_inline(&mut self, kind: InlineKind) {
        if let Some(pos) = self.inline.iter().rposition(|(open, _)| *open == kind) {
            self.inline.remove(pos);
        }
        self.text_run = None;
    }

    fn append_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        if let Some(run) = self.text_run
            && let NodeKind::Text(content) = &mut self.nodes[run.index()].kind
        {
            content.push_str(text);
            return;
        }
        let parent = self.container();
        self.text_run = Some(self.push_node(parent, NodeKind::Text(text.to_string())));
    }
}

/// A borrowed view of one node.
#[derive(Clone, Copy)]
pub struct Node<'doc> {
    doc: &'doc Document,
    id: NodeId,
}

impl<'doc> Node<'doc> {
    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn kind(&self) -> &'doc NodeKind {
        let doc = self.doc;
        &doc.node_data(self.id).kind
    }

    pub fn parent(&self) -> Option<Node<'doc>> {
        let doc = self.doc;
        doc.node_data(self.id).parent.map(|id| Node { doc, id })
    }

    pub fn children(&self) -> impl Iterator<Item = Node<'doc>> + use<'doc> {
        let doc = self.doc;
        doc.node_data(self.id)
            .children
            .iter()
            .map(move |&id| Node { doc, id })
    }

    /// Text of a text node; `None` for containers.
    pub fn text_content(&self) -> Option<&'doc str> {
        match self.kind() {
            NodeKind::Text(text) => Some(text.as_str()),
            _ => None,
        }
    }

    /// All text beneath this node, in document order.
    pub fn all_text(&self) -> String {
        let mut buf = String::new();
        self.collect_text(&mut buf);
        buf
    }

    fn collect_text(&self, buf: &mut String) {
        match self.kind() {
            NodeKind::Text(text) => buf.push_str(text),
            _ => {
                for child in self.children() {
                    child.collect_text(buf);
                }
            }
        }
    }
}

impl std::fmt::Debug for Node<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Node")
            .field("id", &self.id)
            .field("kind", self.kind())
            .finish()
    }
}

/// Concatenated text content of the whole document.
pub fn to_plain_text(doc: &Document) -> String {
    doc.root().all_text()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn child_kinds(node: Node<'_>) -> Vec<NodeKind> {
        node.children().map(|child| child.kind().clone()).collect()
    }

    #[test]
    fn blocks_hang_off_the_root() {
        let doc = Document::from_markdown("# A\nb");
        assert_eq!(
            child_kinds(doc.root()),
            vec![
                NodeKind::Block(BlockKind::Heading { level: 1 }),
                NodeKind::Block(BlockKind::Paragraph),
            ]
        );
    }

    #[test]
    fn text_extends_the_current_run() {
        let mut doc = Document::new();
        doc.open_block(&BlockKind::Paragraph);
        doc.append_text("a");
        doc.append_text("b");

        let block = doc.current_block().unwrap();
        assert_eq!(child_kinds(block), vec![NodeKind::Text("ab".to_string())]);
    }

    #[test]
    fn closing_a_span_starts_a_new_run() {
        let doc = Document::from_markdown("a *b* c");
        let block = doc.root().children().next().unwrap();
        assert_eq!(
            child_kinds(block),
            vec![
                NodeKind::Text("a ".to_string()),
                NodeKind::Inline(InlineKind::Italic),
                NodeKind::Text(" c".to_string()),
            ]
        );
    }

    #[test]
    fn spans_nest_inside_the_innermost_span() {
        let doc = Document::from_markdown("**a *b***\n");
        let block = doc.root().children().next().unwrap();
        let bold = block.children().next().unwrap();
        assert_eq!(bold.kind(), &NodeKind::Inline(InlineKind::Bold));
        assert_eq!(
            child_kinds(bold),
            vec![
                NodeKind::Text("a ".to_string()),
                NodeKind::Inline(InlineKind::Italic),
            ]
        );
    }

    #[test]
    fn overlapping_close_keeps_outer_span_open() {
        let doc = Document::from_chunks(["**a *b** c"]);
        assert_eq!(doc.open_spans(), vec![InlineKind::Italic]);

        // " c" lands in the italic span, which is nested in bold.
        let italic = doc
            .root()
            .children()
            .flat_map(|block| block.children())
            .flat_map(|span| span.children())
            .find(|node| node.kind() == &NodeKind::Inline(InlineKind::Italic))
            .unwrap();
        assert_eq!(italic.all_text(), "b c");
    }

    #[test]
    fn text_without_a_block_goes_to_the_root() {
        let doc = Document::from_markdown("```\nx\n````\n");
        assert_eq!(
            child_kinds(doc.root()),
            vec![
                NodeKind::Block(BlockKind::CodeBlock { language: None }),
                NodeKind::Text("`".to_string()),
                NodeKind::Block(BlockKind::Paragraph),
            ]
        );
    }

    #[test]
    fn parent_links() {
        let doc = Document::from_markdown("- `x`");
        let item = doc.root().children().next().unwrap();
        let code = item.children().next().unwrap();
        assert_eq!(code.parent().unwrap().id(), item.id());
        assert_eq!(item.parent().unwrap().kind(), &NodeKind::Root);
        assert!(doc.root().parent().is_none());
        assert_eq!(code.all_text(), "x");
    }

    #[test]
    fn chunking_does_not_change_the_tree() {
        let input = "## T*i*\n1. `a` **b**\n```py\npass\n```\n";
        let whole = Document::from_markdown(input);
        let split = Document::from_chunks(input.split_inclusive(['*', '`', '\n', ' ']));
        assert_eq!(to_plain_text(&whole), to_plain_text(&split));
        assert_eq!(whole.len(), split.len());
    }

    #[test]
    fn empty_document() {
        let doc = Document::new();
        assert!(doc.is_empty());
        assert_eq!(to_plain_text(&doc), "");
        assert!(doc.current_block().is_none());
    }
}
