use ccs_guard::config::{CheckerConfig, EvaluationMode, GuardConfig, ParserConfig};
use ccs_guard::{check_guardedness, Error, ParseError};

fn config(evaluation: EvaluationMode) -> GuardConfig {
    GuardConfig {
        checker: CheckerConfig {
            evaluation,
            short_circuit: false,
        },
        ..GuardConfig::default()
    }
}

#[tokio::test]
async fn it_rejects_bare_recursion() {
    assert!(!check_guardedness("rec x. x", &GuardConfig::default())
        .await
        .unwrap());
}

#[tokio::test]
async fn it_accepts_variable_under_prefix() {
    assert!(check_guardedness("rec x. a.x+b", &GuardConfig::default())
        .await
        .unwrap());
}

#[tokio::test]
async fn it_rejects_variable_in_composition() {
    assert!(!check_guardedness("rec x. (a|x)+b", &GuardConfig::default())
        .await
        .unwrap());
}

#[tokio::test]
async fn it_rejects_inner_exposed_variable() {
    assert!(!check_guardedness("rec x. a.rec y. x+y", &GuardConfig::default())
        .await
        .unwrap());
}

#[tokio::test]
async fn it_accepts_both_variables_under_prefixes() {
    assert!(check_guardedness("rec x. a.rec y. x|b.y", &GuardConfig::default())
        .await
        .unwrap());
}

#[tokio::test]
async fn it_fails_on_trailing_dot() {
    let result = check_guardedness("a.", &GuardConfig::default()).await;
    assert!(matches!(
        result,
        Err(Error::Parse(ParseError::UnexpectedEndOfInput { .. }))
    ));
}

#[tokio::test]
async fn it_accepts_a_trailing_newline() {
    assert!(check_guardedness("rec x. a.x\n", &GuardConfig::default())
        .await
        .unwrap());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn it_agrees_across_evaluation_modes() {
    let cases = [
        ("nil", true),
        ("x", true),
        ("rec x. x", false),
        ("rec x. a.x+b", true),
        ("rec x. (a|x)+b", false),
        ("rec x. a.rec y. x+y", false),
        ("rec x. a.rec y. x|b.y", true),
        ("rec x. a|b.x", true),
        ("rec x. a.rec y. x", true),
        ("rec x. a.rec y. x|y", false),
        ("rec x. (x\\a)[f]", false),
        ("rec x. (a.x)\\x", true),
        ("(rec x. a.x)|(rec y. y)", false),
    ];
    for (source, expected) in cases {
        for mode in [
            EvaluationMode::Concurrent,
            EvaluationMode::Inline,
            EvaluationMode::Sequential,
        ] {
            let result = check_guardedness(source, &config(mode)).await.unwrap();
            assert_eq!(result, expected, "{} in {:?} mode", source, mode);
        }
    }
}

#[tokio::test]
async fn it_is_idempotent() {
    let config = GuardConfig::default();
    for source in ["rec x. a.rec y. x+y", "rec x. a.rec y. x|b.y"] {
        let first = check_guardedness(source, &config).await.unwrap();
        let second = check_guardedness(source, &config).await.unwrap();
        assert_eq!(first, second);
    }
}

#[tokio::test]
async fn it_checks_wide_terms() {
    // Many concurrent branches, one of them exposed at the far right.
    let mut source = String::from("rec x. ");
    for _ in 0..200 {
        source.push_str("(a.x)|");
    }
    source.push('x');
    assert!(!check_guardedness(&source, &GuardConfig::default())
        .await
        .unwrap());

    let guarded = source.trim_end_matches('x').to_string() + "b.x";
    assert!(check_guardedness(&guarded, &GuardConfig::default())
        .await
        .unwrap());
}

#[tokio::test]
async fn it_checks_deep_terms() {
    let mut source = String::new();
    for _ in 0..300 {
        source.push_str("rec x. a.");
    }
    source.push('x');
    assert!(check_guardedness(&source, &GuardConfig::default())
        .await
        .unwrap());
}

#[tokio::test]
async fn it_checks_terms_nested_deeper_than_the_thread_stack() {
    const DEPTH: usize = 20_000;

    let prefixes = format!("rec x. {}x", "rec y. a.".repeat(DEPTH));
    let exposed_at_bottom = format!("rec x. {}x", "(nil)\\a[f]|".repeat(DEPTH));
    let parenthesized = format!("rec x. {}a.x{}", "(".repeat(DEPTH), ")".repeat(DEPTH));

    for mode in [
        EvaluationMode::Concurrent,
        EvaluationMode::Inline,
        EvaluationMode::Sequential,
    ] {
        let config = config(mode);
        assert!(
            check_guardedness(&prefixes, &config).await.unwrap(),
            "prefix chain in {:?} mode",
            mode
        );
        assert!(
            !check_guardedness(&exposed_at_bottom, &config).await.unwrap(),
            "composition chain in {:?} mode",
            mode
        );
        assert!(
            check_guardedness(&parenthesized, &config).await.unwrap(),
            "nested parentheses in {:?} mode",
            mode
        );
    }
}

#[tokio::test]
async fn it_ignores_trailing_input_by_default() {
    // Parsing stops after `nil`; the rest of the line is never checked.
    let config = GuardConfig::default();
    assert!(check_guardedness("nil + rec x. x", &config).await.unwrap());
    assert!(check_guardedness("a b", &config).await.unwrap());
    assert!(check_guardedness("a#", &config).await.unwrap());
    assert!(!check_guardedness("rec x. x )", &config).await.unwrap());
}

#[tokio::test]
async fn it_can_require_end_of_input() {
    let strict = GuardConfig {
        parser: ParserConfig {
            require_end_of_input: true,
        },
        ..GuardConfig::default()
    };
    let result = check_guardedness("nil + rec x. x", &strict).await;
    assert!(matches!(
        result,
        Err(Error::Parse(ParseError::TrailingInput { .. }))
    ));
    assert!(check_guardedness("rec x. a.x\n", &strict).await.unwrap());
}

#[tokio::test]
async fn it_reports_illegal_characters() {
    let result = check_guardedness("rec x1. x", &GuardConfig::default()).await;
    assert!(matches!(
        result,
        Err(Error::Parse(ParseError::IllegalCharacter { ref character, .. })) if character == "1"
    ));
}

#[tokio::test]
async fn it_short_circuits_without_changing_answers() {
    let short = GuardConfig {
        checker: CheckerConfig {
            evaluation: EvaluationMode::Concurrent,
            short_circuit: true,
        },
        ..GuardConfig::default()
    };
    assert!(!check_guardedness("rec x. x + a.x", &short).await.unwrap());
    assert!(!check_guardedness("rec x. (a.x) + x", &short).await.unwrap());
    assert!(check_guardedness("rec x. (a.x|b.x)", &short).await.unwrap());
}
