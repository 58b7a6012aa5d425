//! Property-based tests for the block scanner and inline resolver.

use blockdown::{Block, BlockOrder, ScanOptions, Span, parse, parse_with_options, resolve_spans};
use proptest::prelude::*;

proptest! {
    #[test]
    fn parse_never_panics(input in any::<String>()) {
        let _ = parse(&input);
    }

    #[test]
    fn parse_never_panics_on_markup_soup(input in "[-*#`\\[\\]()0-9. a\n]{0,200}") {
        let _ = parse(&input);
        let _ = parse_with_options(&input, &ScanOptions { block_order: BlockOrder::Source });
    }

    #[test]
    fn fenced_code_is_reproduced_verbatim(lines in prop::collection::vec("[^`\n]{0,30}", 1..10)) {
        let input = format!("```\n{}\n```", lines.join("\n"));
        prop_assert_eq!(
            parse(&input),
            vec![Block::CodeBlock { language: None, lines }]
        );
    }

    #[test]
    fn unordered_items_stay_in_one_list(words in prop::collection::vec("[a-z]{1,8}", 1..12)) {
        let input: Vec<String> = words.iter().map(|w| format!("- {w}")).collect();
        let blocks = parse(&input.join("\n"));
        prop_assert_eq!(blocks.len(), 1);
        match &blocks[0] {
            Block::List(list) => {
                prop_assert!(!list.ordered);
                prop_assert_eq!(list.items.len(), words.len());
            }
            other => prop_assert!(false, "expected a list, got {:?}", other),
        }
    }

    #[test]
    fn ordered_items_stay_in_one_list(words in prop::collection::vec("[a-z]{1,8}", 1..12)) {
        let input: Vec<String> = words
            .iter()
            .enumerate()
            .map(|(i, w)| format!("{}. {w}", i + 1))
            .collect();
        let blocks = parse(&input.join("\n"));
        prop_assert_eq!(blocks.len(), 1);
        match &blocks[0] {
            Block::List(list) => {
                prop_assert!(list.ordered);
                let items: Vec<Vec<Span>> = list.items.iter().map(|i| i.content.clone()).collect();
                let expected: Vec<Vec<Span>> = words.iter().map(|w| vec![Span::Text(w.clone())]).collect();
                prop_assert_eq!(items, expected);
            }
            other => prop_assert!(false, "expected a list, got {:?}", other),
        }
    }

    #[test]
    fn bold_contents_are_literal(inner in "[a-z `()#_]{1,20}") {
        prop_assert_eq!(resolve_spans(&format!("**{inner}**")), vec![Span::Bold(inner)]);
    }

    #[test]
    fn code_contents_are_literal(inner in "[a-z _]{0,5}\\*[a-z]{1,5}\\*[a-z _]{0,5}") {
        prop_assert_eq!(resolve_spans(&format!("`{inner}`")), vec![Span::Code(inner)]);
    }

    #[test]
    fn plain_text_survives_resolution(input in "[a-zA-Z0-9 .,!?]{1,60}") {
        prop_assert_eq!(resolve_spans(&input), vec![Span::Text(input)]);
    }
}
