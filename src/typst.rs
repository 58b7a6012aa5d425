use crate::block::Block;
use crate::config::Config;
use crate::render::{Renderer, render_block};

/// Maps blocks and spans onto Typst markup.
pub struct TypstRenderer<'a> {
    config: &'a Config,
}

impl<'a> TypstRenderer<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }
}

/// Convert blocks to Typst markup
pub fn blocks_to_typst(blocks: &[Block], config: &Config) -> String {
    let renderer = TypstRenderer::new(config);
    let mut out = preamble(config);

    let mut i = 0;
    while i < blocks.len() {
        let block = &blocks[i];

        match block {
            Block::Heading { .. } if config.layout.keep_headings_with_content => {
                // Keep heading with following content using a block that prevents breaks
                out.push_str("#block(breakable: false)[\n");
                out.push_str(&render_block(&renderer, block));

                if i + 1 < blocks.len() {
                    i += 1;
                    out.push_str(&render_block(&renderer, &blocks[i]));
                }
                out.push_str("]\n\n");
            }
            _ => out.push_str(&render_block(&renderer, block)),
        }

        i += 1;
    }

    out
}

fn preamble(config: &Config) -> String {
    let mut out = String::new();

    // Set up paragraph settings to prevent widows/orphans
    out.push_str("#set par(linebreaks: \"optimized\")\n");
    if config.page.numbers {
        out.push_str("#set page(numbering: \"1\")\n");
    }
    out.push_str(&format!(
        "#show link: set text(fill: rgb({}))\n",
        string_literal(&config.links.color)
    ));
    if config.links.underline {
        out.push_str("#show link: underline\n");
    }
    out.push('\n');

    out
}

impl Renderer for TypstRenderer<'_> {
    type Output = String;

    fn heading(&self, level: u8, content: Vec<String>) -> String {
        format!("{} {}\n\n", "=".repeat(level as usize), content.concat())
    }

    fn paragraph(&self, content: Vec<String>) -> String {
        format!("{}\n\n", content.concat())
    }

    fn code_block(&self, language: Option<&str>, lines: &[String]) -> String {
        let body = lines.join("\n");
        let fence = "`".repeat(fence_len(&body));
        let lang = language
            .and_then(|l| l.split_whitespace().next())
            .unwrap_or("");

        // Keep code blocks together when possible
        let mut out = format!("#block(breakable: false)[\n{fence}{lang}\n");
        out.push_str(&body);
        if !body.is_empty() {
            out.push('\n');
        }
        out.push_str(&fence);
        out.push_str("\n]\n\n");
        out
    }

    fn list(&self, ordered: bool, items: Vec<Vec<String>>) -> String {
        let prefix = if ordered { "+" } else { "-" };
        let keep_together = items.len() <= self.config.layout.keep_list_together_max;

        let mut body = String::new();
        for item in items {
            body.push_str(prefix);
            body.push(' ');
            body.push_str(&item.concat());
            body.push('\n');
        }

        // Wrap list to keep together when small, allow breaks when large
        if keep_together {
            format!("#block(breakable: false)[\n{body}]\n\n")
        } else {
            format!("{body}\n")
        }
    }

    fn rule(&self) -> String {
        "#line(length: 100%)\n\n".to_string()
    }

    fn text(&self, value: &str) -> String {
        escape(value)
    }

    // Function calls rather than `*`/`_` markup, which only delimits at word
    // boundaries. `;` ends each call.
    fn bold(&self, value: &str) -> String {
        format!("#strong[{}];", escape(value))
    }

    fn italic(&self, value: &str) -> String {
        format!("#emph[{}];", escape(value))
    }

    fn code(&self, value: &str) -> String {
        // Inline code never contains a backtick
        format!("`{value}`")
    }

    fn link(&self, label: Vec<String>, url: &str) -> String {
        // `;` ends the call so following text is not read as arguments
        format!("#link({})[{}];", string_literal(url), label.concat())
    }
}

/// Escape special Typst markup characters
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '#' | '*' | '_' | '@' | '$' | '\\' | '`' | '<' | '>' | '[' | ']' | '/' | '=' | '-'
            | '+' | '~' => {
                out.push('\\');
                out.push(ch);
            }
            _ => out.push(ch),
        }
    }
    out
}

/// Quote a value as a Typst string literal.
fn string_literal(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for ch in value.chars() {
        match ch {
            '"' | '\\' => {
                out.push('\\');
                out.push(ch);
            }
            _ => out.push(ch),
        }
    }
    out.push('"');
    out
}

/// A raw block fence longer than any backtick run in the body.
fn fence_len(body: &str) -> usize {
    let longest = body
        .split(|c: char| c != '`')
        .map(str::len)
        .max()
        .unwrap_or(0);
    (longest + 1).max(3)
}
