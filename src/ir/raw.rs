//! The shape of the raw parse tree the external grammar front-end is assumed to
//! supply, mirrored directly off the surface syntax:
//!
//! ```text
//! grammar     := (rule | token_rule)+
//! rule        := RULE_NAME ":" rule_body
//! token_rule  := TOKEN_NAME ":" TOKEN_LIT
//! rule_body   := part+ ("|" part+)*
//! part        := [binding] atom suffix?
//!              | [binding] "[" rule_body "]"
//!              | [binding] "(" rule_body ")" suffix?
//! binding     := IDENT "="
//! atom        := RULE_NAME | TOKEN_NAME | TOKEN_LIT
//! suffix      := "*" | "+" | "?"
//! ```
//!
//! The parenthesized-group production is this crate's own addition: the
//! bracket form alone cannot express a suffixed inline group such as
//! `("," value)*`, which nonetheless appears as a worked example of the
//! dispatch table this generator implements. [RawPart::Group] covers both
//! forms; `bracketed` records which literal punctuation the front-end saw,
//! purely so the IR builder can set [Node::ZeroOrOne]'s `brackets` flag.
//!
//! This module carries no semantics of its own — it is a data-only mirror of the
//! grammar text, which is what lets [super::builder] be a pure, mechanical fold
//! rather than anything resembling a parser.

/// An atomic grammar symbol as the front-end lexed it: a rule reference, a token
/// reference, or a bare literal (still quoted, exactly as it appeared in source).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawAtom {
    Rule(String),
    Token(String),
    Literal(String),
}

/// A repetition suffix following an atom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Suffix {
    Star,
    Plus,
    Question,
}

/// One `part` of a rule body alternative.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawPart {
    /// A bare atom, optionally suffixed.
    Atom {
        binding: Option<String>,
        atom: RawAtom,
        suffix: Option<Suffix>,
    },
    /// A parenthesized or bracketed sub-body, optionally suffixed.
    /// `bracketed` is true for `[ rule_body ]` (always rendered with
    /// `suffix: None`, mapping to `ZeroOrOne { brackets: true }`) and false
    /// for `( rule_body )`, which may carry any suffix.
    Group {
        binding: Option<String>,
        bracketed: bool,
        body: RawBody,
        suffix: Option<Suffix>,
    },
}

/// One alternative: a non-empty sequence of parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawAlternative(pub Vec<RawPart>);

/// A rule body: one or more alternatives separated by `|`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawBody(pub Vec<RawAlternative>);

/// One top-level entry: either a parse rule or a token rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawEntry {
    Rule { name: String, body: RawBody },
    TokenRule { name: String, literal: String },
}

/// The whole raw grammar, in source order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawGrammar(pub Vec<RawEntry>);
