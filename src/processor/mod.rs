//! The semantic pass between the IR builder and the generator: resolves string
//! literals to token references, collects the terminal alphabet, validates the
//! top-level-binding constraint, and rewrites the tree copy-on-change.
//!
//! Grounded on the reference generator's `Process` class: a literal→token-name
//! map seeded from the token rules, a first-seen token-name list, and a
//! structural walk that returns the original node whenever nothing changed.
use std::collections::HashMap;
use std::rc::Rc;

use once_cell::unsync::OnceCell;

use crate::error::IrError;
use crate::ir::{Grammar, Node, Rule};
use crate::util::Log;

const EOF: &str = "EOF";
const ILLEGAL: &str = "ILLEGAL";

struct LiteralEntry {
    token_name: String,
    /// Lazily built the first time this literal is seen unbound; every later
    /// unbound occurrence shares it (see [Node]'s ownership note on why this
    /// is safe: the IR is read-only once the processor has finished).
    cached_ref: OnceCell<Rc<Node>>,
}

/// Normalizes and validates a [Grammar], producing the token-name alphabet and
/// any accumulated [IrError]s alongside the rewritten tree.
pub struct Processor {
    literals: HashMap<String, LiteralEntry>,
    token_names: Vec<String>,
    errors: Vec<IrError>,
    log: Log<String>,
}

impl Processor {
    pub fn new(log: Log<String>) -> Self {
        Processor {
            literals: HashMap::new(),
            token_names: Vec::new(),
            errors: Vec::new(),
            log,
        }
    }

    /// Run the pass, consuming `self`. Returns the rewritten grammar, the
    /// token-name list in first-seen order (`EOF`/`ILLEGAL` guaranteed present),
    /// and every error accumulated along the way.
    pub fn process(mut self, grammar: Grammar) -> (Grammar, Vec<String>, Vec<IrError>) {
        for token_rule in &grammar.token_rules {
            self.literals
                .entry(token_rule.literal.clone())
                .or_insert_with(|| LiteralEntry {
                    token_name: token_rule.name.clone(),
                    cached_ref: OnceCell::new(),
                });
        }

        let rules = grammar
            .rules
            .into_iter()
            .map(|rule| self.process_rule(rule))
            .collect();

        if !self.token_names.contains(&EOF.to_string()) {
            self.token_names.push(EOF.to_string());
        }
        if !self.token_names.contains(&ILLEGAL.to_string()) {
            self.token_names.push(ILLEGAL.to_string());
        }

        (
            Grammar {
                rules,
                token_rules: grammar.token_rules,
            },
            self.token_names,
            self.errors,
        )
    }

    fn process_rule(&mut self, rule: Rule) -> Rule {
        self.log.trace_function(true, &rule.name);
        let body = self.process_node(rule.body, 0);
        if let Some(binding) = body.binding() {
            self.errors
                .push(IrError::IllegalTopLevelBinding(binding.to_string()));
        }
        self.log.trace_function(false, &rule.name);
        Rule { name: rule.name, body }
    }

    fn process_node(&mut self, node: Rc<Node>, depth: usize) -> Rc<Node> {
        self.log.trace_node(depth, node_kind_name(&node), &node.comment());
        match node.as_ref() {
            Node::Alternatives { binding, nodes } => {
                let binding = binding.clone();
                let rebuilt = self.process_children(nodes, depth);
                match rebuilt {
                    None => node,
                    Some(nodes) => Rc::new(Node::Alternatives { binding, nodes }),
                }
            }
            Node::MultipartBody { binding, nodes } => {
                let binding = binding.clone();
                let rebuilt = self.process_children(nodes, depth);
                match rebuilt {
                    None => node,
                    Some(nodes) => Rc::new(Node::MultipartBody { binding, nodes }),
                }
            }
            Node::ZeroOrMore { binding, node: inner } => {
                let binding = binding.clone();
                let new_inner = self.process_node(inner.clone(), depth + 1);
                if Rc::ptr_eq(&new_inner, inner) {
                    node
                } else {
                    Rc::new(Node::ZeroOrMore { binding, node: new_inner })
                }
            }
            Node::OneOrMore { binding, node: inner } => {
                let binding = binding.clone();
                let new_inner = self.process_node(inner.clone(), depth + 1);
                if Rc::ptr_eq(&new_inner, inner) {
                    node
                } else {
                    Rc::new(Node::OneOrMore { binding, node: new_inner })
                }
            }
            Node::ZeroOrOne { binding, node: inner, brackets } => {
                let binding = binding.clone();
                let brackets = *brackets;
                let new_inner = self.process_node(inner.clone(), depth + 1);
                if Rc::ptr_eq(&new_inner, inner) {
                    node
                } else {
                    Rc::new(Node::ZeroOrOne {
                        binding,
                        node: new_inner,
                        brackets,
                    })
                }
            }
            Node::RuleRef { .. } => node,
            Node::TokenRef { name, .. } => {
                self.record_token_name(name);
                node
            }
            Node::TokenLit { literal, binding } => {
                let literal = literal.clone();
                let binding = binding.clone();
                self.resolve_literal(&literal, binding, node)
            }
        }
    }

    /// Process every child, returning `None` if none of them changed (so the
    /// caller can return the original `Rc` untouched) or `Some` rebuilt list.
    fn process_children(&mut self, nodes: &[Rc<Node>], depth: usize) -> Option<Vec<Rc<Node>>> {
        let mut changed = false;
        let mut rebuilt = Vec::with_capacity(nodes.len());
        for child in nodes {
            let new_child = self.process_node(child.clone(), depth + 1);
            if !Rc::ptr_eq(&new_child, child) {
                changed = true;
            }
            rebuilt.push(new_child);
        }
        if changed {
            Some(rebuilt)
        } else {
            None
        }
    }

    fn record_token_name(&mut self, name: &str) {
        if !self.token_names.iter().any(|n| n == name) {
            self.token_names.push(name.to_string());
        }
    }

    fn resolve_literal(
        &mut self,
        literal: &str,
        binding: Option<String>,
        original: Rc<Node>,
    ) -> Rc<Node> {
        let Some(token_name) = self.literals.get(literal).map(|entry| entry.token_name.clone())
        else {
            self.errors
                .push(IrError::UnresolvedLiteral(literal.to_string()));
            return original;
        };

        self.record_token_name(&token_name);

        let entry = self.literals.get(literal).expect("looked up above");
        if binding.is_none() {
            return entry
                .cached_ref
                .get_or_init(|| {
                    Rc::new(Node::TokenRef {
                        binding: None,
                        name: token_name.clone(),
                        replaced_lit: Some(literal.to_string()),
                    })
                })
                .clone();
        }

        Rc::new(Node::TokenRef {
            binding,
            name: token_name,
            replaced_lit: Some(literal.to_string()),
        })
    }
}

fn node_kind_name(node: &Node) -> &'static str {
    match node {
        Node::Alternatives { .. } => "Alternatives",
        Node::MultipartBody { .. } => "MultipartBody",
        Node::ZeroOrMore { .. } => "ZeroOrMore",
        Node::OneOrMore { .. } => "OneOrMore",
        Node::ZeroOrOne { .. } => "ZeroOrOne",
        Node::RuleRef { .. } => "RuleRef",
        Node::TokenRef { .. } => "TokenRef",
        Node::TokenLit { .. } => "TokenLit",
    }
}
