//! Error types for this crate.
//!
//! Matches the grammar-level errors the [processor](crate::processor) accumulates
//! ([IrError]) against the pipeline-level failures a whole invocation can produce
//! ([Error]). Neither implements [std::error::Error]; both are plain structs/enums
//! with a hand-written [Display] impl, the same style this crate's IR and generator
//! modules use for their own internal errors.
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

/// A grammar-level error recorded by the [processor](crate::processor::Processor).
///
/// The processor never stops at the first error: it keeps walking the IR and
/// returns every [IrError] it found, so a user sees the whole list of problems
/// with their grammar in a single pass instead of one-at-a-time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IrError {
    /// A `TokenLit` literal has no backing `TokenRule`.
    UnresolvedLiteral(String),
    /// A rule's root node carries a binding, which is meaningless (renaming the
    /// rule has the same effect).
    IllegalTopLevelBinding(String),
}

impl Display for IrError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            IrError::UnresolvedLiteral(literal) => write!(
                f,
                "ERROR: Literal \"{}\" does not have corresponding token rule",
                literal
            ),
            IrError::IllegalTopLevelBinding(name) => {
                write!(f, "ERROR: Top level binding '{}' is not allowed", name)
            }
        }
    }
}

/// A pipeline-level failure: bad configuration, grammar errors, or I/O.
#[derive(Debug)]
pub enum Error {
    /// `Config::target_language` names a language this crate has no sink for.
    UnsupportedTarget(String),
    /// `Config::output_type` names an output this crate does not (yet) produce.
    UnsupportedOutputType(String),
    /// A user supplied `parser_actions`, parse-tree construction is disabled, and
    /// no action method matches a generated function's stripped name.
    MissingAction(String),
    /// The generator walked into a node kind it cannot emit (a `TokenLit` that
    /// survived processing). Always indicates a bug in this crate, not user input.
    StructurallyUnknownNode(&'static str),
    /// Grammar processing produced one or more [IrError]s; no code was emitted.
    Grammar(Vec<IrError>),
    /// Reading the grammar or writing generated output failed.
    Io { path: PathBuf, source: std::io::Error },
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::UnsupportedTarget(lang) => write!(f, "unsupported target language: {}", lang),
            Error::UnsupportedOutputType(kind) => write!(f, "unsupported output type: {}", kind),
            Error::MissingAction(name) => write!(
                f,
                "parser actions missing function for '{}' and make_parse_tree is disabled",
                name
            ),
            Error::StructurallyUnknownNode(kind) => {
                write!(f, "internal error: unknown node kind reached the generator: {}", kind)
            }
            Error::Grammar(errors) => {
                writeln!(f, "Errors:")?;
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 {
                        writeln!(f)?;
                    }
                    write!(f, "{}", err)?;
                }
                Ok(())
            }
            Error::Io { path, source } => {
                write!(f, "I/O error at {}: {}", path.display(), source)
            }
        }
    }
}
