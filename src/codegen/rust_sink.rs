//! Renders the parser-function generator's emission calls into Rust source
//! text for a `DefaultParser`-shaped runtime.
//!
//! Grounded on the reference generator's `PyParserFuncCodeGen`/`PyParserCodeGen`:
//! a fresh-variable allocator that suffixes on collision, a `_func_actions`
//! lookup consulted before falling back to default tree construction, and one
//! snippet shape per `(TerminalKind, Match)` pair — translated from the
//! Jinja2/Python templates into `std::fmt::Write`-built Rust text, the same
//! buffer-building idiom this codebase already uses for its own `build_grammar`.
//!
//! Early-return discipline (`_MATCH_*` templates at
//! `hwpg/runtime/python/parser_codegen.py:28-117`): a function whose root is
//! not a `MultipartBody` returns as soon as one alternative matches, instead
//! of trying every alternative and building a tree from whichever locals
//! happen to be bound. `emit_single` branches on `ctx.early_ret` for exactly
//! this reason; a sequential (`MultipartBody`-rooted) function still binds
//! every local and only decides its return value once, at the end.
use std::collections::HashSet;
use std::fmt::Write as _;
use std::rc::Rc;

use crate::actions::{strip_function_prefix, ParserActions};
use crate::generator::{EmissionSink, Match};

/// Per-function emission state: the body text built so far, every local
/// variable introduced (name, type), and the set of names already taken.
pub struct FuncCtx {
    name: String,
    early_ret: bool,
    comment: String,
    body: String,
    locals: Vec<(String, String)>,
    used_names: HashSet<String>,
}

/// Emits Rust source for a `DefaultParser`-shaped runtime: generated
/// functions are inherent methods on a `Parser` struct parameterized over a
/// [Tokenizer](crate::tokens::Tokenizer) implementation.
pub struct RustSink {
    functions: Vec<String>,
    make_parse_tree: bool,
    actions: Option<Rc<dyn ParserActions>>,
    /// Stripped names of functions that needed an action (parse-tree
    /// construction disabled) but had none. Checked by the pipeline before
    /// any output is written — see `crate::pipeline::generate_with_log`.
    missing_actions: Vec<String>,
}

impl RustSink {
    pub fn new(make_parse_tree: bool, actions: Option<Rc<dyn ParserActions>>) -> Self {
        RustSink {
            functions: Vec::new(),
            make_parse_tree,
            actions,
            missing_actions: Vec::new(),
        }
    }

    /// Stripped names of every function seen so far that had no matching
    /// action while parse-tree construction was disabled.
    pub fn missing_actions(&self) -> &[String] {
        &self.missing_actions
    }

    fn new_var(&self, ctx: &mut FuncCtx, base: &str) -> String {
        let mut candidate = base.to_string();
        let mut suffix = 1;
        while ctx.used_names.contains(&candidate) {
            candidate = format!("{}{}", base, suffix);
            suffix += 1;
        }
        ctx.used_names.insert(candidate.clone());
        candidate
    }

    /// The default return expression: a `ParseTreeNode` built from every local
    /// this function bound, used when no user action overrides it.
    fn default_return(&self, ctx: &FuncCtx) -> String {
        let mut out = String::new();
        writeln!(out, "        ParseTreeNode::new(\"{}\", vec![", ctx.name).unwrap();
        for (name, _) in &ctx.locals {
            writeln!(out, "            ({:?}, {}.into_tree()),", name, name).unwrap();
        }
        write!(out, "        ])").unwrap();
        out
    }

    fn render_function(&mut self, ctx: FuncCtx) -> String {
        let stripped = strip_function_prefix(&ctx.name).to_string();
        let action = self.actions.as_ref().and_then(|a| a.action_for(&stripped));
        if !self.make_parse_tree && action.is_none() {
            self.missing_actions.push(stripped.clone());
        }

        let mut out = String::new();
        writeln!(out, "    /// {}", ctx.comment).unwrap();
        if ctx.early_ret {
            writeln!(out, "    /// Short-circuits on the first successful match.").unwrap();
        }
        writeln!(
            out,
            "    fn {}(&self, parser: &mut impl Parser) -> Result<ParseTreeNode, ParseError> {{",
            ctx.name
        )
        .unwrap();
        write!(out, "{}", ctx.body).unwrap();

        if ctx.early_ret {
            // Every alternative above returns on its own success; reaching
            // this line means none of them matched.
            writeln!(
                out,
                "        Err(ParseError::new(parser.position(), \"no alternative of `{}` matched\".to_string()))",
                stripped
            )
            .unwrap();
        } else {
            match action {
                Some((snippet, _return_type)) => {
                    writeln!(out, "        Ok({})", snippet).unwrap();
                }
                None if self.make_parse_tree => {
                    writeln!(out, "        Ok({})", self.default_return(&ctx)).unwrap();
                }
                None => {
                    writeln!(
                        out,
                        "        Err(ParseError::new(parser.position(), \"missing parser action for `{}`\".to_string()))",
                        stripped
                    )
                    .unwrap();
                }
            }
        }

        writeln!(out, "    }}").unwrap();
        out
    }

    /// Emit `return Ok(<tree built from just this one local>);`, guarded by
    /// `guard` when given, whenever `ctx.early_ret` is set. A required match
    /// (`Once`/`OnceOrMore`, already enforced by the `?` above it) returns
    /// unconditionally; an optional one (`ZeroOrOnce`/`ZeroOrMore`) only
    /// returns once it actually matched something.
    fn emit_early_return(&self, ctx: &mut FuncCtx, var: &str, guard: Option<String>) {
        if !ctx.early_ret {
            return;
        }
        let expr = format!(
            "Ok(ParseTreeNode::new({:?}, vec![({:?}, {}.into_tree())]))",
            ctx.name, var, var
        );
        match guard {
            Some(cond) => {
                writeln!(ctx.body, "        if {} {{", cond).unwrap();
                writeln!(ctx.body, "            return {};", expr).unwrap();
                writeln!(ctx.body, "        }}").unwrap();
            }
            None => {
                writeln!(ctx.body, "        return {};", expr).unwrap();
            }
        }
    }

    fn emit_single(&self, ctx: &mut FuncCtx, kind_expr: &str, mode: Match, name: &str, comment: &str) {
        let var = self.new_var(ctx, &var_base_name(name));
        writeln!(ctx.body, "        // {}", comment).unwrap();
        match (kind_expr, mode) {
            ("token", Match::Once) => {
                writeln!(
                    ctx.body,
                    "        let {} = parser.match_token_or_rollback(TokenType::{})?;",
                    var, name
                )
                .unwrap();
                self.emit_early_return(ctx, &var, None);
                ctx.locals.push((var, "Token".to_string()));
            }
            ("token", Match::ZeroOrOnce) => {
                writeln!(
                    ctx.body,
                    "        let {} = parser.try_match_token(TokenType::{});",
                    var, name
                )
                .unwrap();
                self.emit_early_return(ctx, &var, Some(format!("{}.is_some()", var)));
                ctx.locals.push((var, "Option<Token>".to_string()));
            }
            ("token", Match::ZeroOrMore) => {
                writeln!(
                    ctx.body,
                    "        let {} = parser.try_match_tokens(TokenType::{});",
                    var, name
                )
                .unwrap();
                self.emit_early_return(ctx, &var, Some(format!("!{}.is_empty()", var)));
                ctx.locals.push((var, "Vec<Token>".to_string()));
            }
            ("token", Match::OnceOrMore) => {
                writeln!(
                    ctx.body,
                    "        let {} = parser.match_tokens_or_rollback(TokenType::{})?;",
                    var, name
                )
                .unwrap();
                self.emit_early_return(ctx, &var, None);
                ctx.locals.push((var, "Vec<Token>".to_string()));
            }
            ("rule", Match::Once) => {
                writeln!(ctx.body, "        let {} = self.{}(parser)?;", var, name).unwrap();
                self.emit_early_return(ctx, &var, None);
                ctx.locals.push((var, "ParseTreeNode".to_string()));
            }
            ("rule", Match::ZeroOrOnce) => {
                writeln!(ctx.body, "        let checkpoint = parser.position();").unwrap();
                writeln!(
                    ctx.body,
                    "        let {} = match self.{}(parser) {{",
                    var, name
                )
                .unwrap();
                writeln!(ctx.body, "            Ok(v) => Some(v),").unwrap();
                writeln!(ctx.body, "            Err(_) => {{ parser.seek(checkpoint); None }}").unwrap();
                writeln!(ctx.body, "        }};").unwrap();
                self.emit_early_return(ctx, &var, Some(format!("{}.is_some()", var)));
                ctx.locals.push((var, "Option<ParseTreeNode>".to_string()));
            }
            ("rule", Match::ZeroOrMore) => {
                writeln!(ctx.body, "        let mut {} = Vec::new();", var).unwrap();
                writeln!(ctx.body, "        loop {{").unwrap();
                writeln!(ctx.body, "            let checkpoint = parser.position();").unwrap();
                writeln!(ctx.body, "            match self.{}(parser) {{", name).unwrap();
                writeln!(ctx.body, "                Ok(v) => {}.push(v),", var).unwrap();
                writeln!(
                    ctx.body,
                    "                Err(_) => {{ parser.seek(checkpoint); break; }}"
                )
                .unwrap();
                writeln!(ctx.body, "            }}").unwrap();
                writeln!(ctx.body, "        }}").unwrap();
                self.emit_early_return(ctx, &var, Some(format!("!{}.is_empty()", var)));
                ctx.locals.push((var, "Vec<ParseTreeNode>".to_string()));
            }
            ("rule", Match::OnceOrMore) => {
                writeln!(ctx.body, "        let mut {} = vec![self.{}(parser)?];", var, name).unwrap();
                writeln!(ctx.body, "        loop {{").unwrap();
                writeln!(ctx.body, "            let checkpoint = parser.position();").unwrap();
                writeln!(ctx.body, "            match self.{}(parser) {{", name).unwrap();
                writeln!(ctx.body, "                Ok(v) => {}.push(v),", var).unwrap();
                writeln!(
                    ctx.body,
                    "                Err(_) => {{ parser.seek(checkpoint); break; }}"
                )
                .unwrap();
                writeln!(ctx.body, "            }}").unwrap();
                writeln!(ctx.body, "        }}").unwrap();
                self.emit_early_return(ctx, &var, None);
                ctx.locals.push((var, "Vec<ParseTreeNode>".to_string()));
            }
            _ => unreachable!("kind_expr is always \"token\" or \"rule\""),
        }
    }
}

/// Derives a readable local-variable base name from a token or rule
/// identifier: lowercase, with a leading `parse_` call-target prefix removed.
fn var_base_name(name: &str) -> String {
    strip_function_prefix(name).to_lowercase()
}

impl EmissionSink for RustSink {
    type FuncCtx = FuncCtx;

    fn start_function(&mut self, name: &str, early_ret: bool, comment: &str) -> FuncCtx {
        FuncCtx {
            name: name.to_string(),
            early_ret,
            comment: comment.to_string(),
            body: String::new(),
            locals: Vec::new(),
            used_names: HashSet::new(),
        }
    }

    fn end_function(&mut self, ctx: FuncCtx) {
        let rendered = self.render_function(ctx);
        self.functions.push(rendered);
    }

    fn emit_token_once(&mut self, ctx: &mut FuncCtx, name: &str, comment: &str) {
        self.emit_single(ctx, "token", Match::Once, name, comment);
    }

    fn emit_token_zero_or_once(&mut self, ctx: &mut FuncCtx, name: &str, comment: &str) {
        self.emit_single(ctx, "token", Match::ZeroOrOnce, name, comment);
    }

    fn emit_token_zero_or_more(&mut self, ctx: &mut FuncCtx, name: &str, comment: &str) {
        self.emit_single(ctx, "token", Match::ZeroOrMore, name, comment);
    }

    fn emit_token_once_or_more(&mut self, ctx: &mut FuncCtx, name: &str, comment: &str) {
        self.emit_single(ctx, "token", Match::OnceOrMore, name, comment);
    }

    fn emit_rule_once(&mut self, ctx: &mut FuncCtx, name: &str, comment: &str) {
        self.emit_single(ctx, "rule", Match::Once, name, comment);
    }

    fn emit_rule_zero_or_once(&mut self, ctx: &mut FuncCtx, name: &str, comment: &str) {
        self.emit_single(ctx, "rule", Match::ZeroOrOnce, name, comment);
    }

    fn emit_rule_zero_or_more(&mut self, ctx: &mut FuncCtx, name: &str, comment: &str) {
        self.emit_single(ctx, "rule", Match::ZeroOrMore, name, comment);
    }

    fn emit_rule_once_or_more(&mut self, ctx: &mut FuncCtx, name: &str, comment: &str) {
        self.emit_single(ctx, "rule", Match::OnceOrMore, name, comment);
    }

    fn make_function_name(&self, rule_name: &str, binding: Option<&str>, sub_index: Option<u32>) -> String {
        match (binding, sub_index) {
            (_, None) => format!("parse_{}", rule_name),
            (Some(binding), Some(_)) => format!("_parse_{}_{}", rule_name, binding),
            (None, Some(n)) => format!("_parse_{}_inner{}", rule_name, n),
        }
    }

    fn render(&self) -> String {
        let mut out = String::new();
        writeln!(out, "// Generated parser. Do not edit by hand.").unwrap();
        writeln!(out).unwrap();
        writeln!(out, "pub struct GeneratedParser;").unwrap();
        writeln!(out).unwrap();
        writeln!(out, "impl GeneratedParser {{").unwrap();
        for function in &self.functions {
            writeln!(out).unwrap();
            write!(out, "{}", function).unwrap();
        }
        writeln!(out, "}}").unwrap();
        out
    }

    fn filename(&self) -> String {
        "parser.rs".to_string()
    }

    fn package_marker_filename(&self) -> Option<String> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sub_function_naming_follows_the_scheme() {
        let sink = RustSink::new(true, None);
        assert_eq!(sink.make_function_name("value", None, None), "parse_value");
        assert_eq!(
            sink.make_function_name("list", None, Some(1)),
            "_parse_list_inner1"
        );
        assert_eq!(
            sink.make_function_name("list", Some("items"), Some(3)),
            "_parse_list_items"
        );
    }

    #[test]
    fn fresh_variable_allocator_suffixes_on_collision() {
        let sink = RustSink::new(true, None);
        let mut ctx = FuncCtx {
            name: "parse_pair".to_string(),
            early_ret: true,
            comment: String::new(),
            body: String::new(),
            locals: Vec::new(),
            used_names: HashSet::new(),
        };
        let first = sink.new_var(&mut ctx, "value");
        let second = sink.new_var(&mut ctx, "value");
        assert_eq!(first, "value");
        assert_eq!(second, "value1");
    }

    #[test]
    fn render_wraps_functions_in_one_impl_block() {
        let mut sink = RustSink::new(true, None);
        let mut ctx = sink.start_function("parse_value", true, "STRING");
        sink.emit_token_once(&mut ctx, "STRING", "STRING");
        sink.end_function(ctx);

        let rendered = sink.render();
        assert!(rendered.contains("impl GeneratedParser"));
        assert!(rendered.contains("fn parse_value"));
        assert!(rendered.contains("match_token_or_rollback(TokenType::STRING)"));
    }

    #[test]
    fn early_ret_alternative_returns_immediately_on_match() {
        let mut sink = RustSink::new(true, None);
        let mut ctx = sink.start_function("parse_value", true, "STRING | NUMBER");
        sink.emit_token_zero_or_once(&mut ctx, "STRING", "STRING");
        sink.emit_token_zero_or_once(&mut ctx, "NUMBER", "NUMBER");
        sink.end_function(ctx);

        let rendered = sink.render();
        assert!(rendered.contains("if string.is_some() {"));
        assert!(rendered.contains("return Ok(ParseTreeNode::new(\"parse_value\""));
        assert!(rendered.contains("Err(ParseError::new(parser.position(), \"no alternative of `value` matched\".to_string()))"));
    }

    #[test]
    fn sequential_function_still_builds_tree_from_every_local() {
        let mut sink = RustSink::new(true, None);
        let mut ctx = sink.start_function("parse_pair", false, "STRING COLON value");
        sink.emit_token_once(&mut ctx, "STRING", "STRING");
        sink.emit_token_once(&mut ctx, "COLON", "COLON");
        sink.end_function(ctx);

        let rendered = sink.render();
        assert!(!rendered.contains("return Ok(ParseTreeNode"));
        assert!(rendered.contains("Ok(ParseTreeNode::new(\"parse_pair\""));
        assert!(rendered.contains("(\"string\", string.into_tree())"));
        assert!(rendered.contains("(\"colon\", colon.into_tree())"));
    }

    #[test]
    fn missing_action_is_recorded_when_parse_tree_disabled() {
        let mut sink = RustSink::new(false, None);
        let mut ctx = sink.start_function("parse_pair", false, "STRING COLON value");
        sink.emit_token_once(&mut ctx, "STRING", "STRING");
        sink.end_function(ctx);

        assert_eq!(sink.missing_actions(), &["pair".to_string()]);
    }
}
