//! Pipeline configuration.
//!
//! Grounded on the reference generator's `Config`/`Lang`/`OutputType`: a plain
//! data object with sane defaults, constructed by field assignment rather than
//! a file-based loader — there is no config *file* format in scope, only an
//! in-process options object (§6).
use std::rc::Rc;

use crate::actions::ParserActions;

/// Which target language's [EmissionSink](crate::generator::EmissionSink) the
/// pipeline should instantiate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetLanguage {
    Rust,
    Python,
    JavaScript,
}

impl Default for TargetLanguage {
    fn default() -> Self {
        TargetLanguage::Rust
    }
}

/// Which artifacts the pipeline should produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputType {
    Parser,
    Lexer,
    Both,
}

impl Default for OutputType {
    fn default() -> Self {
        OutputType::Parser
    }
}

/// Options accepted by [crate::pipeline::generate].
#[derive(Clone)]
pub struct Config {
    pub target_language: TargetLanguage,
    pub output_type: OutputType,
    /// Pass-through flag into the parser template; this crate does not itself
    /// implement memoization, it only forwards the choice.
    pub memoize: bool,
    /// When false, a generated function with no matching [ParserActions] entry
    /// is an error (`MissingAction`) instead of falling back to default
    /// parse-tree construction.
    pub make_parse_tree: bool,
    pub parser_actions: Option<Rc<dyn ParserActions>>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            target_language: TargetLanguage::default(),
            output_type: OutputType::default(),
            memoize: true,
            make_parse_tree: true,
            parser_actions: None,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Config::default()
    }

    pub fn with_target_language(mut self, target_language: TargetLanguage) -> Self {
        self.target_language = target_language;
        self
    }

    pub fn with_output_type(mut self, output_type: OutputType) -> Self {
        self.output_type = output_type;
        self
    }

    pub fn with_memoize(mut self, memoize: bool) -> Self {
        self.memoize = memoize;
        self
    }

    pub fn with_make_parse_tree(mut self, make_parse_tree: bool) -> Self {
        self.make_parse_tree = make_parse_tree;
        self
    }

    pub fn with_parser_actions(mut self, actions: Rc<dyn ParserActions>) -> Self {
        self.parser_actions = Some(actions);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_configuration() {
        let config = Config::new();
        assert_eq!(config.target_language, TargetLanguage::Rust);
        assert_eq!(config.output_type, OutputType::Parser);
        assert!(config.memoize);
        assert!(config.make_parse_tree);
        assert!(config.parser_actions.is_none());
    }
}
