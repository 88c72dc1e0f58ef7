//! End-to-end exercise of the full Builder → Processor → Generator →
//! rendered-source pipeline against a JSON-shaped grammar, in the spirit of
//! the teaching toolkit's own `examples::json` demonstration module.
use langgen::config::Config;
use langgen::error::Error;
use langgen::ir::raw::{
    RawAlternative as Alt, RawAtom as Atom, RawBody, RawEntry, RawGrammar, RawPart as Part, Suffix,
};
use langgen::pipeline;

fn atom(atom: Atom) -> Part {
    Part::Atom {
        binding: None,
        atom,
        suffix: None,
    }
}

/// A parenthesized, suffixed inline group: `(<parts>)<suffix>`.
fn group(parts: Vec<Part>, suffix: Suffix) -> Part {
    Part::Group {
        binding: None,
        bracketed: false,
        body: RawBody(vec![Alt(parts)]),
        suffix: Some(suffix),
    }
}

fn token_rule(name: &str, literal: &str) -> RawEntry {
    RawEntry::TokenRule {
        name: name.to_string(),
        literal: literal.to_string(),
    }
}

/// A JSON-shaped grammar: `value: dict | list | STRING | NUMBER | "true" |
/// "false" | "null"`, plus supporting `pair`/`list` rules, matching §8's
/// concrete scenarios.
fn json_grammar() -> RawGrammar {
    RawGrammar(vec![
        token_rule("LBRACE", "{"),
        token_rule("RBRACE", "}"),
        token_rule("LBRACKET", "["),
        token_rule("RBRACKET", "]"),
        token_rule("COLON", ":"),
        token_rule("COMMA", ","),
        token_rule("TRUE", "true"),
        token_rule("FALSE", "false"),
        token_rule("NULL", "null"),
        RawEntry::Rule {
            name: "value".to_string(),
            body: RawBody(vec![
                Alt(vec![atom(Atom::Rule("dict".to_string()))]),
                Alt(vec![atom(Atom::Rule("list".to_string()))]),
                Alt(vec![atom(Atom::Token("STRING".to_string()))]),
                Alt(vec![atom(Atom::Token("NUMBER".to_string()))]),
                Alt(vec![atom(Atom::Literal("true".to_string()))]),
                Alt(vec![atom(Atom::Literal("false".to_string()))]),
                Alt(vec![atom(Atom::Literal("null".to_string()))]),
            ]),
        },
        RawEntry::Rule {
            name: "pair".to_string(),
            body: RawBody(vec![Alt(vec![
                atom(Atom::Token("STRING".to_string())),
                atom(Atom::Literal(":".to_string())),
                atom(Atom::Rule("value".to_string())),
            ])]),
        },
        RawEntry::Rule {
            name: "dict".to_string(),
            body: RawBody(vec![Alt(vec![Part::Group {
                binding: None,
                bracketed: true,
                suffix: None,
                body: RawBody(vec![Alt(vec![
                    atom(Atom::Rule("pair".to_string())),
                    group(
                        vec![
                            atom(Atom::Literal(",".to_string())),
                            atom(Atom::Rule("pair".to_string())),
                        ],
                        Suffix::Star,
                    ),
                ])]),
            }])]),
        },
        RawEntry::Rule {
            name: "list".to_string(),
            body: RawBody(vec![Alt(vec![Part::Group {
                binding: None,
                bracketed: true,
                suffix: None,
                body: RawBody(vec![Alt(vec![
                    atom(Atom::Rule("value".to_string())),
                    group(
                        vec![
                            atom(Atom::Literal(",".to_string())),
                            atom(Atom::Rule("value".to_string())),
                        ],
                        Suffix::Star,
                    ),
                ])]),
            }])]),
        },
    ])
}

#[test]
fn value_rule_tries_every_alternative_without_a_sub_function() {
    let output = pipeline::generate(json_grammar(), &Config::new()).expect("grammar has no errors");
    assert!(output.parser_source.contains("fn parse_value"));
    // Every alternative of `value` is a single atom, so no `inner<N>` function
    // should have been spawned for it.
    assert!(!output.parser_source.contains("_parse_value_inner"));
}

#[test]
fn list_rule_spawns_two_inner_sub_functions() {
    let output = pipeline::generate(json_grammar(), &Config::new()).expect("grammar has no errors");
    assert!(output.parser_source.contains("fn parse_list"));
    assert!(output.parser_source.contains("fn _parse_list_inner1"));
    assert!(output.parser_source.contains("fn _parse_list_inner2"));
}

#[test]
fn inner_sub_functions_precede_their_parent_in_output() {
    let output = pipeline::generate(json_grammar(), &Config::new()).expect("grammar has no errors");
    let inner_pos = output
        .parser_source
        .find("fn _parse_list_inner1")
        .expect("inner1 must be emitted");
    let parent_pos = output
        .parser_source
        .find("fn parse_list")
        .expect("parse_list must be emitted");
    assert!(inner_pos < parent_pos, "callee must precede its caller");
}

#[test]
fn token_alphabet_contains_every_declared_and_required_terminal() {
    let output = pipeline::generate(json_grammar(), &Config::new()).expect("grammar has no errors");
    for name in [
        "LBRACE", "RBRACE", "LBRACKET", "RBRACKET", "COLON", "COMMA", "TRUE", "FALSE", "NULL",
        "STRING", "NUMBER", "EOF", "ILLEGAL",
    ] {
        assert!(
            output.tokens_source.contains(name),
            "token alphabet missing {}",
            name
        );
    }
}

#[test]
fn grammar_with_undeclared_literal_reports_exactly_that_error() {
    let raw = RawGrammar(vec![RawEntry::Rule {
        name: "x".to_string(),
        body: RawBody(vec![Alt(vec![atom(Atom::Literal("undeclared".to_string()))])]),
    }]);

    let err = pipeline::generate(raw, &Config::new()).unwrap_err();
    match err {
        Error::Grammar(errors) => {
            assert_eq!(errors.len(), 1);
            assert_eq!(
                errors[0].to_string(),
                "ERROR: Literal \"undeclared\" does not have corresponding token rule"
            );
        }
        other => panic!("expected Error::Grammar, got {:?}", other),
    }
}
