//! The parser-function generator: walks validated IR and drives an
//! [EmissionSink] to produce one or more functions per rule, with callees
//! always emitted before their callers.
//!
//! Grounded on the reference generator's `_ParserFuncGen`/`ParserGen`: a fresh
//! walker per rule, a per-rule sub-function counter shared across recursion
//! depths, and the exact top-level dispatch table reproduced in the doc
//! comments below.
pub mod sink;

use crate::ir::{Grammar, Node};
use crate::util::Log;

pub use sink::{EmissionSink, Match, TerminalKind};

/// Walks one [Grammar] rule at a time, driving a sink through the dispatch
/// table. A fresh instance is used per rule so the sub-function counter
/// starts over.
pub struct ParserFunctionGenerator<'a, S: EmissionSink> {
    sink: &'a mut S,
    log: Log<String>,
    rule_name: String,
    counter: u32,
}

impl<'a, S: EmissionSink> ParserFunctionGenerator<'a, S> {
    pub fn new(sink: &'a mut S, log: Log<String>) -> Self {
        ParserFunctionGenerator {
            sink,
            log,
            rule_name: String::new(),
            counter: 0,
        }
    }

    /// Generate every function for one rule, emitting them into the sink.
    /// Sub-functions spawned while walking the rule's body are started and
    /// ended before the rule's own top-level function is ended, so a sink
    /// that appends on `end_function` naturally places callees first.
    pub fn generate_rule(&mut self, grammar: &Grammar, rule_name: &str) {
        self.rule_name = rule_name.to_string();
        self.counter = 0;

        let rule = grammar
            .rules
            .iter()
            .find(|r| r.name == rule_name)
            .expect("rule_name must name a rule present in the grammar");

        let top_name = self.sink.make_function_name(rule_name, None, None);
        self.counter += 1;
        self.start_and_walk(&top_name, rule.body.as_ref(), None);
    }

    /// Start a function rooted at `node`, walking it as a top-level body, then
    /// end the function. `early_ret` follows the node kind: anything but a
    /// `MultipartBody` gets the short-circuit return hint.
    fn start_and_walk(&mut self, name: &str, node: &Node, forced_mode: Option<Match>) {
        let early_ret = !matches!(node, Node::MultipartBody { .. });
        self.log.trace_function(true, name);
        let mut ctx = self.sink.start_function(name, early_ret, &node.comment());
        self.walk_top_level(&mut ctx, node, forced_mode);
        self.sink.end_function(ctx);
        self.log.trace_function(false, name);
    }

    /// Dispatch a node that sits at the root of the current function.
    fn walk_top_level(&mut self, ctx: &mut S::FuncCtx, node: &Node, forced_mode: Option<Match>) {
        self.log.trace_node(0, node_kind_name(node), &node.comment());
        match node {
            Node::Alternatives { nodes, .. } => {
                for alt in nodes {
                    self.walk_nested(ctx, alt.as_ref(), Match::ZeroOrOnce, 1);
                }
            }
            Node::MultipartBody { nodes, .. } => {
                for part in nodes {
                    self.walk_nested(ctx, part.as_ref(), Match::Once, 1);
                }
            }
            // A single-child body reaching the top level directly (already
            // hoisted by the IR builder) is walked in whatever mode the
            // caller forced, defaulting to Once for a fresh top-level function.
            other => self.walk_nested(ctx, other, forced_mode.unwrap_or(Match::Once), 1),
        }
    }

    /// Dispatch a node that is *not* the root of the current function.
    fn walk_nested(&mut self, ctx: &mut S::FuncCtx, node: &Node, mode: Match, depth: usize) {
        self.log.trace_node(depth, node_kind_name(node), &node.comment());
        match node {
            Node::Alternatives { .. } | Node::MultipartBody { .. } => {
                let sub_name = self.spawn_sub_function(node, None);
                self.sink.emit(ctx, TerminalKind::Rule, mode, &sub_name, &node.comment());
            }
            Node::ZeroOrMore { node: inner, .. } => {
                self.walk_nested(ctx, inner.as_ref(), Match::ZeroOrMore, depth);
            }
            Node::OneOrMore { node: inner, .. } => {
                self.walk_nested(ctx, inner.as_ref(), Match::OnceOrMore, depth);
            }
            Node::ZeroOrOne { node: inner, .. } => {
                self.walk_nested(ctx, inner.as_ref(), Match::ZeroOrOnce, depth);
            }
            Node::RuleRef { name, .. } => {
                let call_target = format!("parse_{}", name);
                self.sink
                    .emit(ctx, TerminalKind::Rule, mode, &call_target, &node.comment());
            }
            Node::TokenRef { name, .. } => {
                self.sink.emit(ctx, TerminalKind::Token, mode, name, &node.comment());
            }
            Node::TokenLit { .. } => {
                panic!(
                    "StructurallyUnknownNode: a TokenLit reached the generator for rule `{}` \
                     — the processor must replace every literal before generation",
                    self.rule_name
                );
            }
        }
    }

    /// Spawn (and immediately emit) a sub-function for a nested
    /// `Alternatives`/`MultipartBody`, returning its name for the caller's
    /// `emit` call. The counter always advances, even for a bound sub-node
    /// whose number never appears in its rendered name.
    fn spawn_sub_function(&mut self, node: &Node, binding: Option<&str>) -> String {
        let binding = binding.or_else(|| node.binding());
        let sub_index = self.counter;
        self.counter += 1;

        let name = self
            .sink
            .make_function_name(&self.rule_name, binding, Some(sub_index));
        self.start_and_walk(&name, node, None);
        name
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

/// Generate every rule of a processed [Grammar] into `sink`, in input order.
pub fn generate(grammar: &Grammar, sink: &mut impl EmissionSink, log: Log<String>) {
    for rule in &grammar.rules {
        ParserFunctionGenerator::new(sink, log.clone()).generate_rule(grammar, &rule.name);
    }
}
