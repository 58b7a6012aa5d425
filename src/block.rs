use serde::Serialize;

/// Inline text spans with formatting.
///
/// Bold, italic and code carry their inner text literally; only link labels
/// are resolved into further spans.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Span {
    Text(String),
    Bold(String),
    Italic(String),
    Code(String),
    Link { label: Vec<Span>, url: String },
}

/// A single list item. Items are always one source line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListItem {
    pub content: Vec<Span>,
}

/// A list (ordered or unordered)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct List {
    pub ordered: bool,
    pub items: Vec<ListItem>,
}

/// Block-level elements parsed from Markdown
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Block {
    Heading {
        /// 1, 2 or 3
        level: u8,
        content: Vec<Span>,
    },
    Paragraph {
        content: Vec<Span>,
    },
    CodeBlock {
        /// Info string after the opening fence, if any.
        language: Option<String>,
        /// Verbatim lines between the fences.
        lines: Vec<String>,
    },
    List(List),
    Rule,
}
