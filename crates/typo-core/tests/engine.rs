use pretty_assertions::assert_eq;
use typo_core::{
    CheckMode, Diagnostic, DiagnosticRange, DiagnosticSeverity, GrammarRule, RuleSeverity, check,
};

#[test]
fn test_complete_match_with_suggestion() {
    let rules = vec![GrammarRule::complete(
        "teh",
        RuleSeverity::Warn,
        "Misspelled word",
        "the",
    )];

    let diagnostics = check("I saw teh dog", &rules).unwrap();
    assert_eq!(
        diagnostics,
        vec![Diagnostic {
            range: DiagnosticRange::new(6, 9),
            severity: DiagnosticSeverity::Warning,
            message: "Misspelled word\nthe".to_string(),
        }]
    );
}

#[test]
fn test_incomplete_rule_flags_missing_companion() {
    let rules = vec![GrammarRule::incomplete(
        CheckMode::LeftIncomplete,
        "ve",
        "ei",
        RuleSeverity::Error,
        "Did you mean 'receive'?",
        "",
    )];

    let diagnostics = check("recieve receive", &rules).unwrap();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].range, DiagnosticRange::new(5, 7));
    assert_eq!(diagnostics[0].severity, DiagnosticSeverity::Error);
    assert_eq!(diagnostics[0].message, "Did you mean 'receive'?");
    assert_eq!(diagnostics[0].suggestion(), None);
}

#[test]
fn test_rule_order_then_position_order() {
    let rules = vec![
        GrammarRule::complete("b", RuleSeverity::Hint, "second letter", ""),
        GrammarRule::complete("a", RuleSeverity::Info, "first letter", ""),
        GrammarRule::complete("ab", RuleSeverity::Info, "pair", ""),
    ];

    let diagnostics = check("ab ab", &rules).unwrap();
    let summary: Vec<(usize, &str)> = diagnostics
        .iter()
        .map(|d| (d.range.start, d.message.as_str()))
        .collect();
    assert_eq!(
        summary,
        vec![
            (1, "second letter"),
            (4, "second letter"),
            (0, "first letter"),
            (3, "first letter"),
            (0, "pair"),
            (3, "pair"),
        ]
    );
}

#[test]
fn test_matches_inside_comments_are_ignored() {
    let rules = vec![GrammarRule::complete("teh", RuleSeverity::Warn, "Typo", "the")];

    assert!(check("fine <!-- teh --> text", &rules).unwrap().is_empty());

    // Spans refer to the comment-stripped text.
    let diagnostics = check("<!-- x -->teh", &rules).unwrap();
    assert_eq!(diagnostics[0].range, DiagnosticRange::new(0, 3));
}

#[test]
fn test_check_is_idempotent() {
    let rules = vec![
        GrammarRule::complete("teh", RuleSeverity::Warn, "Typo", "the"),
        GrammarRule::incomplete(
            CheckMode::RightIncomplete,
            "rec",
            "ei",
            RuleSeverity::Error,
            "i before e",
            "recei",
        ),
    ];
    let text = "teh recieve and teh receive";

    assert_eq!(check(text, &rules).unwrap(), check(text, &rules).unwrap());
}

#[test]
fn test_invalid_pattern_aborts_whole_check() {
    let rules = vec![
        GrammarRule::complete("teh", RuleSeverity::Warn, "Typo", "the"),
        GrammarRule::complete("[", RuleSeverity::Warn, "broken", ""),
    ];

    let err = check("teh", &rules).unwrap_err();
    assert_eq!(err.pattern, "[");
}

#[test]
fn test_severity_mapping() {
    let cases = [
        (RuleSeverity::Hint, DiagnosticSeverity::Hint),
        (RuleSeverity::Info, DiagnosticSeverity::Information),
        (RuleSeverity::Warn, DiagnosticSeverity::Warning),
        (RuleSeverity::Error, DiagnosticSeverity::Error),
    ];
    for (rule_severity, expected) in cases {
        let rules = vec![GrammarRule::complete("x", rule_severity, "m", "")];
        assert_eq!(check("x", &rules).unwrap()[0].severity, expected);
    }
}

#[test]
fn test_suggestion_round_trips_through_message() {
    let rules = vec![GrammarRule::complete(
        "teh",
        RuleSeverity::Warn,
        "Misspelled\nword",
        "th\r\ne",
    )];

    let diagnostics = check("teh", &rules).unwrap();
    assert_eq!(diagnostics[0].message, "Misspelledword\nthe");
    assert_eq!(diagnostics[0].message.lines().next(), Some("Misspelledword"));
    assert_eq!(diagnostics[0].suggestion(), Some("the"));
}
