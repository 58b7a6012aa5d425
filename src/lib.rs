mod block;
mod config;
mod error;
mod inline;
mod parser;
pub mod render;
mod typst;

pub use block::{Block, List, ListItem, Span};
pub use config::{Config, ConfigError, LayoutConfig, LinksConfig, PageConfig, ParserConfig};
pub use error::{Error, Result};
pub use inline::resolve_spans;
pub use parser::{BlockOrder, ScanOptions};
pub use render::Renderer;
pub use typst::TypstRenderer;

use typst_as_lib::TypstEngine;
use typst_as_lib::typst_kit_options::TypstKitFontOptions;
use typst_pdf::PdfOptions;

/// Parse markdown text into a vector of blocks.
pub fn parse(markdown: &str) -> Vec<Block> {
    parser::parse(markdown)
}

/// Parse markdown text with explicit scanner options.
pub fn parse_with_options(markdown: &str, options: &ScanOptions) -> Vec<Block> {
    parser::parse_with_options(markdown, options)
}

/// Convert markdown to Typst markup using default config.
pub fn markdown_to_typst(markdown: &str) -> String {
    markdown_to_typst_with_config(markdown, &Config::compiled_default())
}

/// Convert markdown to Typst markup with custom config.
pub fn markdown_to_typst_with_config(markdown: &str, config: &Config) -> String {
    let blocks = parse_with_options(markdown, &config.scan_options());
    typst::blocks_to_typst(&blocks, config)
}

/// Convert markdown to a pretty-printed JSON block tree.
pub fn markdown_to_json(markdown: &str, options: &ScanOptions) -> Result<String> {
    let blocks = parse_with_options(markdown, options);
    Ok(serde_json::to_string_pretty(&blocks)?)
}

/// Convert markdown to PDF bytes using default config.
pub fn markdown_to_pdf(markdown: &str) -> Result<Vec<u8>> {
    markdown_to_pdf_with_config(markdown, &Config::compiled_default())
}

/// Convert markdown to PDF bytes with custom config.
pub fn markdown_to_pdf_with_config(markdown: &str, config: &Config) -> Result<Vec<u8>> {
    use typst_library::layout::PagedDocument;

    let typst_content = markdown_to_typst_with_config(markdown, config);

    let font_options = TypstKitFontOptions::new()
        .include_embedded_fonts(true)
        .include_system_fonts(false);

    let engine = TypstEngine::builder()
        .main_file(typst_content)
        .search_fonts_with(font_options)
        .build();

    log::debug!("compiling document with typst");
    let compiled = engine.compile();
    for warning in &compiled.warnings {
        log::warn!("typst: {}", warning.message);
    }

    let doc: PagedDocument = compiled
        .output
        .map_err(|e| Error::Compile(format!("{:?}", e)))?;

    typst_pdf::pdf(&doc, &PdfOptions::default()).map_err(|e| Error::Pdf(format!("{:?}", e)))
}
