//! Inline span resolution.
//!
//! Text is split in four passes with fixed precedence: links, bold, inline
//! code, italic. Each pass only sees the plain segments left over by the pass
//! before it. Link labels are resolved again from the top; bold, code and
//! italic contents are kept literally.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::block::Span;

// Delimited content never crosses a line terminator: `\r`, `\n`, U+2028 or U+2029.
static LINK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[([^\r\n\u{2028}\u{2029}]*?)\]\(([^\r\n\u{2028}\u{2029}]*?)\)").unwrap()
});
static BOLD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*([^\r\n\u{2028}\u{2029}]*?)\*\*").unwrap());
static CODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"`([^\r\n\u{2028}\u{2029}]*?)`").unwrap());
static ITALIC_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*([^\r\n\u{2028}\u{2029}]*?)\*").unwrap());

/// A segment produced by splitting on a delimiter pattern.
enum Piece<'t> {
    /// Text between matches (possibly empty).
    Plain(&'t str),
    /// A full delimiter match.
    Delimited(Captures<'t>),
}

/// Split `text` on every non-overlapping match of `re`, keeping the matches.
fn split_keep<'t>(re: &Regex, text: &'t str) -> Vec<Piece<'t>> {
    let mut pieces = Vec::new();
    let mut last = 0;

    for caps in re.captures_iter(text) {
        let whole = caps.get(0).map_or(last..last, |m| m.range());
        pieces.push(Piece::Plain(&text[last..whole.start]));
        last = whole.end;
        pieces.push(Piece::Delimited(caps));
    }
    pieces.push(Piece::Plain(&text[last..]));

    pieces
}

/// Group text of a capture, empty if the group did not participate.
fn group<'t>(caps: &Captures<'t>, index: usize) -> &'t str {
    caps.get(index).map_or("", |m| m.as_str())
}

/// Resolve a line (or joined paragraph) into inline spans.
pub fn resolve_spans(text: &str) -> Vec<Span> {
    let mut spans = Vec::new();
    resolve_links(text, &mut spans);
    spans
}

fn resolve_links(text: &str, out: &mut Vec<Span>) {
    for piece in split_keep(&LINK_RE, text) {
        match piece {
            Piece::Delimited(caps) => out.push(Span::Link {
                label: resolve_spans(group(&caps, 1)),
                url: group(&caps, 2).to_string(),
            }),
            Piece::Plain(segment) => resolve_bold(segment, out),
        }
    }
}

fn resolve_bold(text: &str, out: &mut Vec<Span>) {
    for piece in split_keep(&BOLD_RE, text) {
        match piece {
            Piece::Delimited(caps) => out.push(Span::Bold(group(&caps, 1).to_string())),
            Piece::Plain(segment) => resolve_code(segment, out),
        }
    }
}

fn resolve_code(text: &str, out: &mut Vec<Span>) {
    for piece in split_keep(&CODE_RE, text) {
        match piece {
            Piece::Delimited(caps) => out.push(Span::Code(group(&caps, 1).to_string())),
            Piece::Plain(segment) => resolve_italic(segment, out),
        }
    }
}

fn resolve_italic(text: &str, out: &mut Vec<Span>) {
    for piece in split_keep(&ITALIC_RE, text) {
        match piece {
            // A bare "**" also matches; it stays plain text.
            Piece::Delimited(caps) if group(&caps, 0).len() > 2 => {
                out.push(Span::Italic(group(&caps, 1).to_string()))
            }
            Piece::Delimited(caps) => push_text(group(&caps, 0), out),
            Piece::Plain(segment) => push_text(segment, out),
        }
    }
}

fn push_text(text: &str, out: &mut Vec<Span>) {
    if !text.is_empty() {
        out.push(Span::Text(text.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn text(s: &str) -> Span {
        Span::Text(s.to_string())
    }

    fn bold(s: &str) -> Span {
        Span::Bold(s.to_string())
    }

    fn italic(s: &str) -> Span {
        Span::Italic(s.to_string())
    }

    fn code(s: &str) -> Span {
        Span::Code(s.to_string())
    }

    fn plain_text(span: &Span) -> String {
        match span {
            Span::Text(t) | Span::Bold(t) | Span::Italic(t) | Span::Code(t) => t.clone(),
            Span::Link { label, .. } => label.iter().map(plain_text).collect(),
        }
    }

    fn link(label: Vec<Span>, url: &str) -> Span {
        Span::Link {
            label,
            url: url.to_string(),
        }
    }

    #[rstest]
    #[case("plain words", vec![text("plain words")])]
    #[case("Hello **world**.", vec![text("Hello "), bold("world"), text(".")])]
    #[case("an *emphasised* word", vec![text("an "), italic("emphasised"), text(" word")])]
    #[case("run `cargo` now", vec![text("run "), code("cargo"), text(" now")])]
    #[case("**a** and **b**", vec![bold("a"), text(" and "), bold("b")])]
    fn resolves_single_tier(#[case] input: &str, #[case] expected: Vec<Span>) {
        assert_eq!(resolve_spans(input), expected);
    }

    #[test]
    fn empty_input_has_no_spans() {
        assert_eq!(resolve_spans(""), Vec::<Span>::new());
    }

    #[test]
    fn link_label_is_resolved() {
        assert_eq!(
            resolve_spans("[**hi**](http://x)"),
            vec![link(vec![bold("hi")], "http://x")]
        );
    }

    #[test]
    fn link_in_sentence() {
        assert_eq!(
            resolve_spans("see [the docs](https://example.com) for *more*"),
            vec![
                text("see "),
                link(vec![text("the docs")], "https://example.com"),
                text(" for "),
                italic("more"),
            ]
        );
    }

    #[test]
    fn link_label_can_hold_code_and_italic() {
        assert_eq!(
            resolve_spans("[`fn` is *neat*](u)"),
            vec![link(vec![code("fn"), text(" is "), italic("neat")], "u")]
        );
    }

    #[test]
    fn links_split_before_bold() {
        assert_eq!(
            resolve_spans("**a *b* [c](d)**"),
            vec![
                text("**"),
                text("a "),
                italic("b"),
                text(" "),
                link(vec![text("c")], "d"),
                text("**"),
            ]
        );
    }

    #[test]
    fn bold_content_is_literal() {
        assert_eq!(resolve_spans("**x *y* `z`**"), vec![bold("x *y* `z`")]);
    }

    #[test]
    fn code_content_is_literal() {
        assert_eq!(resolve_spans("`*not italic*`"), vec![code("*not italic*")]);
    }

    #[test]
    fn bold_runs_before_code() {
        assert_eq!(
            resolve_spans("`**x**`"),
            vec![text("`"), bold("x"), text("`")]
        );
    }

    #[test]
    fn bare_double_asterisk_is_text() {
        assert_eq!(
            resolve_spans("a ** b"),
            vec![text("a "), text("**"), text(" b")]
        );
    }

    #[rstest]
    #[case("**unterminated")]
    #[case("[label](no-close")]
    #[case("[no-paren]")]
    #[case("`open")]
    #[case("*lonely")]
    fn unmatched_delimiters_are_text(#[case] input: &str) {
        let spans = resolve_spans(input);
        let joined: String = spans.iter().map(plain_text).collect();
        assert_eq!(joined, input);
        assert!(spans.iter().all(|s| matches!(s, Span::Text(_))));
    }

    #[test]
    fn delimiters_do_not_span_carriage_returns() {
        assert_eq!(
            resolve_spans("**a\r b**"),
            vec![text("**"), text("a\r b"), text("**")]
        );
        assert_eq!(resolve_spans("`a\u{2028}b`"), vec![text("`a\u{2028}b`")]);
        assert_eq!(
            resolve_spans("[a\rb](u)"),
            vec![text("[a\rb](u)")]
        );
    }

    #[test]
    fn link_label_is_non_greedy() {
        assert_eq!(
            resolve_spans("[a](b) [c](d)"),
            vec![
                link(vec![text("a")], "b"),
                text(" "),
                link(vec![text("c")], "d"),
            ]
        );
    }
}
