//! Style mapping seam.
//!
//! A [`Renderer`] turns each block and span variant into an output node. The
//! walk over the tree lives here so renderers only decide presentation.

use crate::block::{Block, Span};

/// One rendering function per block variant and per span variant.
pub trait Renderer {
    type Output;

    fn heading(&self, level: u8, content: Vec<Self::Output>) -> Self::Output;
    fn paragraph(&self, content: Vec<Self::Output>) -> Self::Output;
    fn code_block(&self, language: Option<&str>, lines: &[String]) -> Self::Output;
    fn list(&self, ordered: bool, items: Vec<Vec<Self::Output>>) -> Self::Output;
    fn rule(&self) -> Self::Output;

    fn text(&self, value: &str) -> Self::Output;
    fn bold(&self, value: &str) -> Self::Output;
    fn italic(&self, value: &str) -> Self::Output;
    fn code(&self, value: &str) -> Self::Output;
    fn link(&self, label: Vec<Self::Output>, url: &str) -> Self::Output;
}

/// Render every block in order.
pub fn render<R: Renderer>(renderer: &R, blocks: &[Block]) -> Vec<R::Output> {
    blocks
        .iter()
        .map(|block| render_block(renderer, block))
        .collect()
}

pub fn render_block<R: Renderer>(renderer: &R, block: &Block) -> R::Output {
    match block {
        Block::Heading { level, content } => {
            renderer.heading(*level, render_spans(renderer, content))
        }
        Block::Paragraph { content } => renderer.paragraph(render_spans(renderer, content)),
        Block::CodeBlock { language, lines } => renderer.code_block(language.as_deref(), lines),
        Block::List(list) => {
            let items = list
                .items
                .iter()
                .map(|item| render_spans(renderer, &item.content))
                .collect();
            renderer.list(list.ordered, items)
        }
        Block::Rule => renderer.rule(),
    }
}

/// Render spans, skipping empty text.
pub fn render_spans<R: Renderer>(renderer: &R, spans: &[Span]) -> Vec<R::Output> {
    spans
        .iter()
        .filter(|span| !matches!(span, Span::Text(t) if t.is_empty()))
        .map(|span| match span {
            Span::Text(value) => renderer.text(value),
            Span::Bold(value) => renderer.bold(value),
            Span::Italic(value) => renderer.italic(value),
            Span::Code(value) => renderer.code(value),
            Span::Link { label, url } => renderer.link(render_spans(renderer, label), url),
        })
        .collect()
}
