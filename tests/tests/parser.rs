use lrkit::{
    Child, ErrorKind, Filebound, Grammar, GrammarSymbol, LexErrorKind, NodeKind, NodeRegistry,
    Parser, ParserOptions, Position, Production,
};
use lrkit_tests::{grammar, parse, parse_with, Lexer, GOAL, UNIT};
use rstest::rstest;

#[test]
fn test_empty_source_yields_file_bounds() {
    let tree = parse("").unwrap();

    assert_eq!(tree.tag(), Some("Goal"));
    assert_eq!(tree.children().len(), 2);
    for child in tree.children() {
        let tok = child.as_token().unwrap();
        assert_eq!(tok.tag, "FILEBOUND");
    }
    assert_eq!(tree.source(), format!("{} {}", Filebound::SOT, Filebound::EOT));
}

#[test]
fn test_nested_units() {
    let tree = parse("(+ (* 2 3) 5)").unwrap();

    let unit = tree.children()[1].as_node().unwrap();
    assert_eq!(unit.tag(), Some("Unit"));
    assert_eq!(unit.source(), "( + ( * 2 3 ) 5 )");
    assert_eq!(unit.position(), Position::new(0, 1, 1));

    let product = unit.children()[2].as_node().unwrap();
    assert_eq!(product.source(), "( * 2 3 )");
    assert_eq!(product.position(), Position::new(3, 1, 4));

    let five = unit.children()[3].as_node().unwrap();
    assert_eq!(five.rule_index(), 0);
    assert_eq!(five.position(), Position::new(11, 1, 12));

    let sources: Vec<_> = tree.tokens().map(|tok| tok.source.as_str()).collect();
    assert_eq!(
        sources,
        vec![Filebound::SOT, "(", "+", "(", "*", "2", "3", ")", "5", ")", Filebound::EOT]
    );
}

#[test]
fn test_trivia_is_skipped() {
    let plain = parse("(^ 2 10)").unwrap();
    let noisy = parse("  (^ [base] 2\n\t10 [exponent])\n").unwrap();

    assert_eq!(plain.source(), noisy.source());
}

#[test]
fn test_unexpected_token() {
    let err = parse("(+ 3 4 5)").unwrap_err();

    assert!(err.is_syntax_error());
    assert_eq!(err.code(), 1201);
    assert_eq!(err.position(), Some(Position::new(7, 1, 8)));
    assert!(matches!(
        err.kind(),
        ErrorKind::UnexpectedToken { text, .. } if text == "5"
    ));
    assert!(err.to_string().ends_with("at line 1 col 8"));
}

#[rstest]
#[case::missing_operand("(+ 3)", ")")]
#[case::missing_operator("(3 4)", "3")]
#[case::unbalanced(")", ")")]
#[case::bare_operator("+", "+")]
#[case::two_units("1 2", "2")]
fn test_rejects_non_sentences(#[case] src: &str, #[case] offending: &str) {
    let err = parse(src).unwrap_err();

    assert!(err.is_syntax_error(), "{err}");
    match err.kind() {
        ErrorKind::UnexpectedToken { text, .. } => assert_eq!(text, offending),
        kind => panic!("unexpected error kind {kind:?}"),
    }
}

#[test]
fn test_unterminated_unit_is_unexpected_end_of_text() {
    let err = parse("(+ 3 4").unwrap_err();

    assert!(err.is_syntax_error());
    assert!(matches!(
        err.kind(),
        ErrorKind::UnexpectedToken { text, .. } if text == Filebound::EOT
    ));
}

#[test]
fn test_lex_errors_are_forwarded() {
    let err = parse("(+ 1 -2)").unwrap_err();

    assert!(!err.is_syntax_error());
    assert_eq!(err.code(), 1101);
    match err.kind() {
        ErrorKind::Lex(lex) => {
            assert_eq!(lex.kind(), &LexErrorKind::UnrecognizedChar('-'));
            assert_eq!(lex.position(), Position::new(5, 1, 6));
        }
        kind => panic!("unexpected error kind {kind:?}"),
    }

    let err = parse("(+ 1 [never closed").unwrap_err();
    assert_eq!(err.code(), 1102);
}

#[test]
fn test_unregistered_productions_are_generic() {
    let grammar = grammar();
    let registry = NodeRegistry::new().register(&UNIT, "Unit");
    let mut parser = Parser::new(Lexer::new("7"), &grammar, &registry);

    let tree = parser.parse().unwrap();
    assert_eq!(tree.kind(), NodeKind::Generic);
    assert_eq!(tree.production(), &GOAL);
    assert_eq!(tree.children()[1].as_node().unwrap().kind(), NodeKind::Named("Unit"));
}

#[test]
fn test_options_do_not_change_the_tree() {
    let src = "(+ (* 2 (^ 3 2)) (+ (* 1 1) 1))";
    let memoized = parse_with(src, ParserOptions::default()).unwrap();
    let plain = parse_with(
        src,
        ParserOptions {
            memoize_closures: false,
        },
    )
    .unwrap();

    assert_eq!(memoized, plain);
}

#[test]
fn test_stack_survives_failure() {
    let grammar = grammar();
    let registry = NodeRegistry::new();
    let mut parser = Parser::new(Lexer::new("(+ 3 4 5)"), &grammar, &registry);

    assert!(parser.parse().is_err());

    let view = parser.view_stack();
    // SOT ( + Unit(3) 4
    assert_eq!(view.len(), 5);
    assert!(view.to_string().contains("NUMBER `4`"));
}

static STATEMENT: Production = Production::new(
    "Statement",
    &[
        &[GrammarSymbol::text("if"), GrammarSymbol::production("Statement")],
        &[
            GrammarSymbol::text("if"),
            GrammarSymbol::production("Statement"),
            GrammarSymbol::text("else"),
            GrammarSymbol::production("Statement"),
        ],
        &[GrammarSymbol::text("x")],
    ],
);

fn words(src: &str) -> Vec<lrkit::Token> {
    src.split_whitespace()
        .map(|word| lrkit::Token::new("WORD", word, Default::default()))
        .collect()
}

#[test]
fn test_dangling_else_binds_to_the_nearest_if() {
    let grammar = Grammar::new([&STATEMENT], &STATEMENT).unwrap();
    let registry = NodeRegistry::new();
    let mut parser = Parser::new(lrkit::buffered(words("if if x else x")), &grammar, &registry);

    let tree = parser.parse().unwrap();
    assert_eq!(tree.rule_index(), 0);

    let inner = tree.children()[1].as_node().unwrap();
    assert_eq!(inner.rule_index(), 1);
    assert_eq!(inner.source(), "if x else x");
    assert!(matches!(inner.children()[0], Child::Token(_)));
}

static AMBIGUOUS: Production = Production::new(
    "Ambiguous",
    &[&[GrammarSymbol::production("Left")], &[GrammarSymbol::production("Right")]],
);
static LEFT: Production = Production::new("Left", &[&[GrammarSymbol::text("x")]]);
static RIGHT: Production = Production::new("Right", &[&[GrammarSymbol::text("x")]]);

#[test]
fn test_reduce_reduce_conflict_is_reported() {
    let grammar = Grammar::new([&AMBIGUOUS, &LEFT, &RIGHT], &AMBIGUOUS).unwrap();
    let registry = NodeRegistry::new();
    let mut parser = Parser::new(lrkit::buffered(words("x")), &grammar, &registry);

    let err = parser.parse().unwrap_err();
    assert!(err.is_grammar_ambiguity());
    assert_eq!(err.code(), 1301);
}
