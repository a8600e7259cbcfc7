use lrkit::{
    Configuration, Grammar, GrammarError, GrammarSymbol, Lookahead, LookaheadSet, Production, Rule,
};
use lrkit_tests::{grammar, GOAL, NUMBER, UNIT};

#[test]
fn test_production_display() {
    assert_eq!(
        UNIT.to_string(),
        "Unit ::= NUMBER | \"(\" OPERATOR Unit Unit \")\""
    );
    assert_eq!(GOAL.rules().count(), 2);
}

#[test]
fn test_initial_closure_does_not_expand_units() {
    let state = grammar().closure();

    // Unit only comes after the start of text.
    assert_eq!(state.len(), 2);
    assert!(state
        .iter()
        .all(|config| config.rule().production() == &GOAL && config.dot() == 0));
}

#[test]
fn test_closure_inside_a_unit() {
    let grammar = grammar();
    let rule = Rule::new(&UNIT, 1).unwrap();
    let kernel = Configuration::new(rule, 3, LookaheadSet::from_iter([Lookahead::Text(")")]))
        .unwrap();

    let state = grammar.closure_of([kernel]);
    assert_eq!(state.len(), 3);

    // The second operand is followed by the closing parenthesis.
    for config in state.iter().filter(|config| config.dot() == 0) {
        assert_eq!(
            config.lookaheads(),
            &LookaheadSet::from_iter([Lookahead::Text(")")]),
            "{config}"
        );
    }
}

#[test]
fn test_first_of_unit() {
    let grammar = grammar();

    assert_eq!(
        grammar.first(&UNIT.symbol()),
        LookaheadSet::from_iter([
            Lookahead::Text("("),
            Lookahead::Terminal(lrkit::TerminalRef::new(&NUMBER)),
        ])
    );
}

static LIST: Production = Production::new(
    "List",
    &[
        &[GrammarSymbol::text("["), GrammarSymbol::production("Items"), GrammarSymbol::text("]")],
    ],
);

#[test]
fn test_unknown_production_is_rejected() {
    assert_eq!(
        Grammar::new([&LIST], &LIST).unwrap_err(),
        GrammarError::UnknownProduction("Items".into())
    );
    assert_eq!(
        Grammar::new([&UNIT], &LIST).unwrap_err(),
        GrammarError::MissingGoal("List".into())
    );
}
