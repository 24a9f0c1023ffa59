//! Property-based tests for the analysis pipeline.
//!
//! Analysis must never panic, whatever the source text, and every reported
//! error must point inside the input.

use proptest::prelude::*;

use coolc::{analyze_source, semantic::options::SemanticOptions};

/// Near-valid Cool fragments, structurally richer than random strings.
const FRAGMENTS: &[&str] = &[
    "class Main inherits IO { main(): Object { out_string(\"hi\") }; };",
    "class A { x: Int <- 1; f(y: Int): Int { x + y }; };",
    "class B inherits A { g(): Bool { not isvoid self }; };",
    "class C inherits C {};",
    "class D inherits Int {};",
    "class E inherits Nowhere { h(): Object { abort() }; };",
    "class F { f(): Int { let a: Int <- 1, b: Int <- a in a * b }; };",
    "class G { f(): Object { case 1 of i: Int => i; s: String => s; esac }; };",
    "class H { f(): Object { while true loop 1 pool }; };",
    "class I { f(): SELF_TYPE { self@Object.copy() }; };",
    "class J { f(x: SELF_TYPE): Foo { y }; };",
    "class K { f(): String { \"a\".concat(\"b\") }; };",
];

fn valid_fragment() -> impl Strategy<Value = String> {
    prop::sample::select(FRAGMENTS).prop_map(std::string::ToString::to_string)
}

/// Fragments, truncated fragments and concatenations of fragments.
fn near_valid_cool() -> impl Strategy<Value = String> {
    prop_oneof![
        valid_fragment(),
        (valid_fragment(), 0usize..80).prop_map(|(source, keep)| {
            source.chars().take(keep).collect::<String>()
        }),
        (valid_fragment(), valid_fragment()).prop_map(|(a, b)| format!("{a}\n{b}")),
        (valid_fragment(), valid_fragment(), valid_fragment())
            .prop_map(|(a, b, c)| format!("{a}\n{b}\n{c}")),
    ]
}

fn proptest_config() -> ProptestConfig {
    let default = ProptestConfig::default();
    ProptestConfig {
        cases: default.cases.max(256),
        ..default
    }
}

proptest! {
    #![proptest_config(proptest_config())]

    /// `analyze_source` never panics on arbitrary input.
    #[test]
    fn analysis_never_panics(input in "\\PC{0,300}") {
        let _result = analyze_source(&input, "fuzz.cl", &SemanticOptions::default());
    }

    /// `analyze_source` never panics on near-valid programs.
    #[test]
    fn analysis_never_panics_near_valid(input in near_valid_cool()) {
        let _result = analyze_source(&input, "fuzz.cl", &SemanticOptions::default());
    }

    /// Fail-fast analysis reports at most one error.
    #[test]
    fn fail_fast_reports_one_error(input in near_valid_cool()) {
        let options = SemanticOptions { fail_fast: true, ..SemanticOptions::default() };
        if let Err(diagnostics) = analyze_source(&input, "fuzz.cl", &options) {
            prop_assert_eq!(diagnostics.errors.len(), 1);
        }
    }

    /// Error positions lie within the input.
    #[test]
    fn error_positions_within_input(input in near_valid_cool()) {
        if let Err(diagnostics) = analyze_source(&input, "fuzz.cl", &SemanticOptions::default()) {
            for error in &diagnostics.errors {
                prop_assert!(
                    error.get_position().0 as usize <= input.len(),
                    "position {} past input of length {} for {:?}: {}",
                    error.get_position().0,
                    input.len(),
                    input,
                    error,
                );
            }
        }
    }
}
