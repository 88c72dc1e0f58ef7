//! Token-alphabet emission: renders the dense, zero-free `TokenType`
//! enumeration plus the `Token`/`Tokenizer` contract generated parsers are
//! written against.
//!
//! Grounded on the reference generator's `TokensGen`/`Jinja2TokensCodeGen` for
//! the responsibility split (one file, one enum, `EOF`/`ILLEGAL` guaranteed),
//! and on this codebase's `ITokenization`/`TokenImpl` for the shape of a
//! Rust-idiomatic tokenizer contract to render.
use std::fmt::Write as _;

/// Renders the Rust source of a token-alphabet file from a first-seen-ordered
/// list of token names (as returned by [Processor::process](crate::processor::Processor::process)).
///
/// `names` must already contain `EOF` and `ILLEGAL`; this function does not
/// add them; the processor is responsible for that guarantee.
pub fn render_token_file(names: &[String]) -> String {
    let mut out = String::new();

    writeln!(out, "// Generated token alphabet. Do not edit by hand.").unwrap();
    writeln!(out).unwrap();
    writeln!(out, "#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]").unwrap();
    writeln!(out, "pub enum TokenType {{").unwrap();
    for name in names {
        writeln!(out, "    {},", name).unwrap();
    }
    writeln!(out, "}}").unwrap();
    writeln!(out).unwrap();

    writeln!(out, "/// One lexed token: its type and the source slice it covers.").unwrap();
    writeln!(out, "pub trait Token {{").unwrap();
    writeln!(out, "    fn token_type(&self) -> TokenType;").unwrap();
    writeln!(out, "    fn text(&self) -> &str;").unwrap();
    writeln!(out, "}}").unwrap();
    writeln!(out).unwrap();

    writeln!(out, "/// Supplies the token stream a generated parser consumes.").unwrap();
    writeln!(out, "pub trait Tokenizer {{").unwrap();
    writeln!(out, "    type Tok: Token;").unwrap();
    writeln!(out).unwrap();
    writeln!(out, "    /// Returns the next token without advancing, or the `EOF` token").unwrap();
    writeln!(out, "    /// once the input is exhausted.").unwrap();
    writeln!(out, "    fn peek(&mut self) -> &Self::Tok;").unwrap();
    writeln!(out).unwrap();
    writeln!(out, "    /// Consumes and returns the next token.").unwrap();
    writeln!(out, "    fn next_token(&mut self) -> Self::Tok;").unwrap();
    writeln!(out).unwrap();
    writeln!(out, "    /// The current cursor position, for rollback.").unwrap();
    writeln!(out, "    fn position(&self) -> usize;").unwrap();
    writeln!(out).unwrap();
    writeln!(out, "    /// Resets the cursor to a position previously returned by `position`.").unwrap();
    writeln!(out, "    fn seek(&mut self, position: usize);").unwrap();
    writeln!(out, "}}").unwrap();

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_one_variant_per_name_in_order() {
        let names = vec!["STRING".to_string(), "EOF".to_string(), "ILLEGAL".to_string()];
        let rendered = render_token_file(&names);
        let string_pos = rendered.find("STRING,").unwrap();
        let eof_pos = rendered.find("EOF,").unwrap();
        let illegal_pos = rendered.find("ILLEGAL,").unwrap();
        assert!(string_pos < eof_pos);
        assert!(eof_pos < illegal_pos);
    }

    #[test]
    fn declares_token_and_tokenizer_traits() {
        let rendered = render_token_file(&["EOF".to_string(), "ILLEGAL".to_string()]);
        assert!(rendered.contains("pub trait Token"));
        assert!(rendered.contains("pub trait Tokenizer"));
    }
}
