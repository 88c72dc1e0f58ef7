//! A parser generator: given an EBNF-style grammar, compiles it into the
//! source text of a complete recursive-descent parser module in a target
//! language.
//!
//! # Overview
//!
//! A grammar is a set of parse rules and token rules. Each parse rule's body
//! is an expression over sequencing, alternation, optional, and repetition
//! over references to other rules or to named terminals. This crate turns
//! that grammar, already parsed into a raw tree by an external front-end,
//! into a validated [intermediate representation](ir), then walks that IR to
//! drive an [emission sink](generator::EmissionSink) that renders one
//! function per parse rule (plus sub-functions for any nested construct) in
//! the target language.
//!
//! # Design
//!
//! The three load-bearing pieces are:
//! - [ir] — the grammar's typed tree (`Node`, `Rule`, `Grammar`), built from a
//!   [raw tree](ir::raw) by [ir::build_grammar].
//! - [processor] — a single structural pass that resolves string literals to
//!   named tokens, collects the token alphabet, and validates the grammar,
//!   rewriting the tree copy-on-change.
//! - [generator] — the walker that drives an [EmissionSink](generator::EmissionSink)
//!   through the dispatch table that decides when a nested construct needs
//!   its own sub-function.
//!
//! [codegen::RustSink] is this crate's one concrete sink, emitting Rust
//! source for a `DefaultParser`-shaped runtime; [tokens] renders the
//! accompanying token-alphabet file. [pipeline::generate] wires the whole
//! thing together, and [pipeline::write_output] performs the file I/O.
//!
//! # Example
//!
//! ```
//! use langgen::config::Config;
//! use langgen::ir::raw::{RawAlternative, RawAtom, RawBody, RawEntry, RawGrammar, RawPart};
//! use langgen::pipeline;
//!
//! let raw = RawGrammar(vec![RawEntry::Rule {
//!     name: "value".to_string(),
//!     body: RawBody(vec![RawAlternative(vec![RawPart::Atom {
//!         binding: None,
//!         atom: RawAtom::Token("STRING".to_string()),
//!         suffix: None,
//!     }])]),
//! }]);
//!
//! let output = pipeline::generate(raw, &Config::new()).expect("grammar has no errors");
//! assert!(output.parser_source.contains("fn parse_value"));
//! ```
pub mod actions;
pub mod codegen;
pub mod config;
pub mod error;
pub mod generator;
pub mod ir;
pub mod pipeline;
pub mod processor;
pub mod tokens;
pub mod util;

pub use config::Config;
pub use error::Error;
