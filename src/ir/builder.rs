//! Folds a [RawGrammar](super::raw::RawGrammar) into [Grammar](super::Grammar) IR.
//!
//! The fold is purely mechanical: map surface atoms to `RuleRef`/`TokenRef`/
//! `TokenLit`, split alternatives on `|`, wrap suffixed atoms in the matching
//! repetition node, and hoist single-child `Alternatives`/`MultipartBody`
//! constructs (invariant 4). Grounded on the reference front-end's
//! `rule_body`/`rule_part` tree-transformer methods.
use std::rc::Rc;

use super::raw::{RawAlternative, RawAtom, RawBody, RawEntry, RawGrammar, RawPart, Suffix};
use super::{Grammar, Node, Rule, TokenRule};

/// Build grammar IR from a raw tree supplied by the external front-end.
pub fn build_grammar(raw: RawGrammar) -> Grammar {
    let mut rules = Vec::new();
    let mut token_rules = Vec::new();

    for entry in raw.0 {
        match entry {
            RawEntry::Rule { name, body } => rules.push(Rule {
                name,
                body: build_body(body),
            }),
            RawEntry::TokenRule { name, literal } => token_rules.push(TokenRule {
                name,
                literal: strip_quotes(&literal),
            }),
        }
    }

    Grammar { rules, token_rules }
}

fn build_body(body: RawBody) -> Rc<Node> {
    let alts = body.0.into_iter().map(build_alternative).collect();
    Node::alternatives(alts)
}

fn build_alternative(alt: RawAlternative) -> Rc<Node> {
    let parts = alt.0.into_iter().map(build_part).collect();
    Node::multipart(parts)
}

fn build_part(part: RawPart) -> Rc<Node> {
    match part {
        RawPart::Atom {
            binding,
            atom,
            suffix,
        } => wrap_suffixed(binding, wrap_atom(None, atom), suffix, false),
        RawPart::Group {
            binding,
            bracketed,
            body,
            suffix,
        } => wrap_suffixed(binding, build_body(body), suffix, bracketed),
    }
}

/// Shared suffix-wrapping logic for both bare atoms and parenthesized groups:
/// `*`/`+`/`?` wrap in the matching repetition node; no suffix leaves the leaf
/// as-is (an atom) or wraps it in `ZeroOrOne` (a bracketed group, always
/// optional even without a trailing `?`).
fn wrap_suffixed(
    binding: Option<String>,
    leaf: Rc<Node>,
    suffix: Option<Suffix>,
    bracketed: bool,
) -> Rc<Node> {
    match suffix {
        None if bracketed => Rc::new(Node::ZeroOrOne {
            binding,
            node: leaf,
            brackets: true,
        }),
        None => leaf.with_binding_rc(binding),
        Some(Suffix::Star) => Rc::new(Node::ZeroOrMore {
            binding,
            node: leaf,
        }),
        Some(Suffix::Plus) => Rc::new(Node::OneOrMore {
            binding,
            node: leaf,
        }),
        Some(Suffix::Question) => Rc::new(Node::ZeroOrOne {
            binding,
            node: leaf,
            brackets: false,
        }),
    }
}

fn wrap_atom(binding: Option<String>, atom: RawAtom) -> Rc<Node> {
    Rc::new(match atom {
        RawAtom::Rule(name) => Node::RuleRef { binding, name },
        RawAtom::Token(name) => Node::TokenRef {
            binding,
            name,
            replaced_lit: None,
        },
        RawAtom::Literal(literal) => Node::TokenLit {
            binding,
            literal: strip_quotes(&literal),
        },
    })
}

/// Strip one layer of surrounding `'` or `"` quotes, if present.
fn strip_quotes(s: &str) -> String {
    let bytes = s.as_bytes();
    if bytes.len() >= 2 {
        let first = bytes[0];
        let last = bytes[bytes.len() - 1];
        if (first == b'"' || first == b'\'') && first == last {
            return s[1..s.len() - 1].to_string();
        }
    }
    s.to_string()
}

trait WithBindingRc {
    fn with_binding_rc(self, binding: Option<String>) -> Rc<Node>;
}

impl WithBindingRc for Rc<Node> {
    fn with_binding_rc(self, binding: Option<String>) -> Rc<Node> {
        if binding.is_none() {
            return self;
        }
        match Rc::try_unwrap(self) {
            Ok(node) => Rc::new(node.with_binding(binding)),
            Err(rc) => Rc::new((*rc).clone().with_binding(binding)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::raw::{RawAlternative as Alt, RawAtom as Atom, RawBody, RawEntry, RawPart as Part};

    fn rule(name: &str, body: RawBody) -> RawEntry {
        RawEntry::Rule {
            name: name.to_string(),
            body,
        }
    }

    fn atom_part(atom: Atom) -> Part {
        Part::Atom {
            binding: None,
            atom,
            suffix: None,
        }
    }

    #[test]
    fn single_alternative_single_part_hoists_twice() {
        // value: STRING
        let raw = RawGrammar(vec![rule(
            "value",
            RawBody(vec![Alt(vec![atom_part(Atom::Token("STRING".into()))])]),
        )]);

        let grammar = build_grammar(raw);
        assert_eq!(grammar.rules.len(), 1);
        assert!(matches!(grammar.rules[0].body.as_ref(), Node::TokenRef { name, .. } if name == "STRING"));
    }

    #[test]
    fn literal_parts_are_stored_unquoted() {
        // pair: STRING ":" value
        let raw = RawGrammar(vec![rule(
            "pair",
            RawBody(vec![Alt(vec![
                atom_part(Atom::Token("STRING".into())),
                atom_part(Atom::Literal("\":\"".into())),
                atom_part(Atom::Rule("value".into())),
            ])]),
        )]);

        let grammar = build_grammar(raw);
        let Node::MultipartBody { nodes, .. } = grammar.rules[0].body.as_ref() else {
            panic!("expected a MultipartBody");
        };
        assert!(matches!(nodes[1].as_ref(), Node::TokenLit { literal, .. } if literal == ":"));
    }

    #[test]
    fn token_rule_literal_is_stored_unquoted() {
        let raw = RawGrammar(vec![RawEntry::TokenRule {
            name: "COLON".to_string(),
            literal: "\":\"".to_string(),
        }]);

        let grammar = build_grammar(raw);
        assert_eq!(grammar.token_rules[0].literal, ":");
    }

    #[test]
    fn bracketed_body_becomes_zero_or_one_with_brackets_true() {
        // list: "[" [value ("," value)*] "]"
        let inner = RawBody(vec![Alt(vec![
            atom_part(Atom::Rule("value".into())),
            Part::Group {
                binding: None,
                bracketed: false,
                body: RawBody(vec![Alt(vec![
                    atom_part(Atom::Literal(",".into())),
                    atom_part(Atom::Rule("value".into())),
                ])]),
                suffix: Some(Suffix::Star),
            },
        ])]);
        let raw = RawGrammar(vec![rule(
            "list",
            RawBody(vec![Alt(vec![Part::Group {
                binding: None,
                bracketed: true,
                body: inner,
                suffix: None,
            }])]),
        )]);

        let grammar = build_grammar(raw);
        match grammar.rules[0].body.as_ref() {
            Node::ZeroOrOne { brackets, node, .. } => {
                assert!(brackets);
                let Node::MultipartBody { nodes, .. } = node.as_ref() else {
                    panic!("expected the bracketed body to be a MultipartBody");
                };
                assert!(matches!(nodes[1].as_ref(), Node::ZeroOrMore { .. }));
            }
            other => panic!("expected ZeroOrOne, got {:?}", other),
        }
    }
}
