//! Property-based tests over generated sentences of the sample language.

use lrkit::{ParserOptions, Token};
use lrkit_tests::{parse, parse_with, Lexer};
use proptest::prelude::*;

/// Whitespace or a bracketed comment.
fn trivia() -> impl Strategy<Value = String> {
    prop_oneof!["[ \t\n]{1,3}", "\\[[a-z ]{0,8}\\]"]
}

/// Nothing, or some trivia.
fn gap() -> impl Strategy<Value = String> {
    prop_oneof![Just(String::new()), trivia()]
}

/// Generates a unit, with trivia between its tokens.
///
/// The unit always ends with a significant character.
fn unit() -> impl Strategy<Value = String> {
    let leaf = "[0-9]{1,3}";
    leaf.prop_recursive(4, 32, 2, |inner| {
        (
            gap(),
            prop::sample::select(vec!['^', '*', '+']),
            gap(),
            inner.clone(),
            trivia(),
            inner,
            gap(),
        )
            .prop_map(|(a, op, b, lhs, c, rhs, d)| format!("({a}{op}{b}{lhs}{c}{rhs}{d})"))
    })
}

/// A unit surrounded by trivia.
fn sentence() -> impl Strategy<Value = String> {
    (gap(), unit(), gap()).prop_map(|(before, unit, after)| format!("{before}{unit}{after}"))
}

/// The tokens the parser is fed, trivia left out.
fn significant_tokens(src: &str) -> Vec<Token> {
    Lexer::new(src)
        .map(|res| res.unwrap())
        .filter(|tok| !tok.is_trivia())
        .collect()
}

proptest! {
    #[test]
    fn sentences_are_accepted(src in sentence()) {
        let tree = parse(&src).unwrap();

        prop_assert_eq!(tree.rule_index(), 1);
        prop_assert_eq!(tree.children().len(), 3);
    }

    #[test]
    fn tokens_survive_the_round_trip(src in sentence()) {
        let tree = parse(&src).unwrap();
        let leaves: Vec<Token> = tree.tokens().cloned().collect();

        prop_assert_eq!(leaves, significant_tokens(&src));
    }

    #[test]
    fn memoization_is_transparent(src in sentence()) {
        let memoized = parse(&src);
        let plain = parse_with(&src, ParserOptions { memoize_closures: false });

        prop_assert_eq!(memoized, plain);
    }

    #[test]
    fn truncated_sentences_are_rejected(src in unit().prop_filter("nested", |s| s.starts_with('('))) {
        let truncated = &src[..src.len() - 1];

        prop_assert!(parse(truncated).unwrap_err().is_syntax_error());
    }
}
