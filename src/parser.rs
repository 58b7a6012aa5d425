use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;

use crate::block::{Block, List, ListItem};
use crate::inline::resolve_spans;

static ORDERED_MARKER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]+\.\s+").unwrap());

const FENCE: &str = "```";

/// Order in which a pending list and a following paragraph are emitted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockOrder {
    /// A text line right after a list item keeps the list open; at the next
    /// flush the paragraph is emitted first, then the list.
    #[default]
    Compatible,
    /// A text line closes any open list, so blocks follow source order.
    Source,
}

/// Options controlling the block scanner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanOptions {
    pub block_order: BlockOrder,
}

/// Parse markdown text into a list of blocks
pub fn parse(markdown: &str) -> Vec<Block> {
    parse_with_options(markdown, &ScanOptions::default())
}

/// Parse markdown text into a list of blocks using the given options.
pub fn parse_with_options(markdown: &str, options: &ScanOptions) -> Vec<Block> {
    let mut state = ScanState::new(*options);
    let mut line_count = 0;

    for line in markdown.split('\n') {
        line_count += 1;
        state.process_line(line);
    }

    let blocks = state.finish();
    log::debug!("scanned {line_count} lines into {} blocks", blocks.len());
    blocks
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum ListKind {
    Unordered,
    Ordered,
}

struct ScanState {
    options: ScanOptions,
    blocks: Vec<Block>,

    // Paragraph lines, or code lines while inside a fence
    pending: Vec<String>,

    // Code block state
    in_code: bool,
    code_language: Option<String>,

    // List state
    pending_items: Vec<String>,
    list_kind: Option<ListKind>,
}

impl ScanState {
    fn new(options: ScanOptions) -> Self {
        Self {
            options,
            blocks: Vec::new(),
            pending: Vec::new(),
            in_code: false,
            code_language: None,
            pending_items: Vec::new(),
            list_kind: None,
        }
    }

    fn process_line(&mut self, line: &str) {
        let trimmed = line.trim();

        // Code fence toggle
        if let Some(info) = trimmed.strip_prefix(FENCE) {
            if self.in_code {
                self.emit_code_block();
            } else {
                self.flush_paragraph();
                self.flush_list();
                self.in_code = true;
                let info = info.trim();
                self.code_language = (!info.is_empty()).then(|| info.to_string());
            }
            return;
        }

        if self.in_code {
            self.pending.push(line.to_string());
            return;
        }

        // Headings
        if let Some((level, text)) = heading(trimmed) {
            self.flush_paragraph();
            self.flush_list();
            self.emit(Block::Heading {
                level,
                content: resolve_spans(text),
            });
            return;
        }

        // Horizontal rule
        if trimmed == "---" {
            self.flush_paragraph();
            self.flush_list();
            self.emit(Block::Rule);
            return;
        }

        // Unordered list item
        if let Some(item) = trimmed
            .strip_prefix("- ")
            .or_else(|| trimmed.strip_prefix("* "))
        {
            self.push_item(ListKind::Unordered, item);
            return;
        }

        // Ordered list item
        if let Some(marker) = ORDERED_MARKER_RE.find(trimmed) {
            self.push_item(ListKind::Ordered, &trimmed[marker.end()..]);
            return;
        }

        // Blank line
        if trimmed.is_empty() {
            self.flush_paragraph();
            self.flush_list();
            return;
        }

        // Regular text
        if self.options.block_order == BlockOrder::Source {
            self.flush_list();
        }
        self.pending.push(line.to_string());
    }

    fn push_item(&mut self, kind: ListKind, item: &str) {
        self.flush_paragraph();
        if self.list_kind.is_some_and(|current| current != kind) {
            self.flush_list();
        }
        self.list_kind = Some(kind);
        self.pending_items.push(item.to_string());
    }

    fn emit(&mut self, block: Block) {
        log::trace!("emit {block:?}");
        self.blocks.push(block);
    }

    fn emit_code_block(&mut self) {
        let lines = std::mem::take(&mut self.pending);
        let language = self.code_language.take();
        self.in_code = false;
        self.emit(Block::CodeBlock { language, lines });
    }

    fn flush_paragraph(&mut self) {
        if self.pending.is_empty() {
            return;
        }
        let lines = std::mem::take(&mut self.pending);
        let text = lines.join(" ");
        let text = text.trim();
        if !text.is_empty() {
            self.emit(Block::Paragraph {
                content: resolve_spans(text),
            });
        }
    }

    fn flush_list(&mut self) {
        let kind = self.list_kind.take();
        if self.pending_items.is_empty() {
            return;
        }
        let items = std::mem::take(&mut self.pending_items)
            .iter()
            .map(|item| ListItem {
                content: resolve_spans(item),
            })
            .collect();
        self.emit(Block::List(List {
            ordered: kind == Some(ListKind::Ordered),
            items,
        }));
    }

    fn finish(mut self) -> Vec<Block> {
        // End of input closes an open fence
        if self.in_code {
            log::debug!("unterminated code fence closed at end of input");
            self.emit_code_block();
        }
        self.flush_paragraph();
        self.flush_list();
        self.blocks
    }
}

/// Match the `# `, `## ` and `### ` prefixes, in that order.
fn heading(trimmed: &str) -> Option<(u8, &str)> {
    ["# ", "## ", "### "]
        .into_iter()
        .zip(1u8..)
        .find_map(|(prefix, level)| trimmed.strip_prefix(prefix).map(|text| (level, text)))
}
