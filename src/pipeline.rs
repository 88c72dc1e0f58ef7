//! End-to-end orchestration: raw grammar → IR → validated IR → generated
//! source, plus the file-I/O described in §6.
//!
//! Grounded on the reference generator's `hwpg()` CLI function body (the
//! sequencing, minus the `click` argument parsing, which belongs to the
//! out-of-scope CLI wrapper), and on this codebase's `DefaultParser::new` for
//! the "construct once, hand back a `Result`" shape.
use std::fs;
use std::path::Path;

use crate::codegen::RustSink;
use crate::config::{Config, OutputType, TargetLanguage};
use crate::error::Error;
use crate::generator;
use crate::ir::raw::RawGrammar;
use crate::ir::build_grammar;
use crate::processor::Processor;
use crate::tokens::render_token_file;
use crate::util::Log;

/// Everything a pipeline run produced, ready to be written to disk by
/// [write_output] or inspected directly by a caller that doesn't want files.
pub struct GeneratedOutput {
    pub parser_filename: String,
    pub parser_source: String,
    pub tokens_filename: String,
    pub tokens_source: String,
    pub package_marker_filename: Option<String>,
}

/// Runs the whole pipeline: build IR, process it, and — if processing found
/// no errors — drive a target sink to produce source text. Returns
/// `Err(Error::Grammar(_))` without emitting anything if the grammar has
/// errors, matching the "no partial output" policy in §7.
pub fn generate(raw: RawGrammar, config: &Config) -> Result<GeneratedOutput, Error> {
    generate_with_log(raw, config, Log::None)
}

/// Same as [generate], but threading a debug log level through the processor
/// and generator.
pub fn generate_with_log(
    raw: RawGrammar,
    config: &Config,
    log: Log<String>,
) -> Result<GeneratedOutput, Error> {
    if config.target_language != TargetLanguage::Rust {
        return Err(Error::UnsupportedTarget(format!("{:?}", config.target_language)));
    }
    if config.output_type != OutputType::Parser {
        return Err(Error::UnsupportedOutputType(format!("{:?}", config.output_type)));
    }

    let grammar = build_grammar(raw);
    let (grammar, token_names, errors) = Processor::new(log.clone()).process(grammar);
    if !errors.is_empty() {
        return Err(Error::Grammar(errors));
    }

    let mut sink = RustSink::new(config.make_parse_tree, config.parser_actions.clone());
    generator::generate(&grammar, &mut sink, log);

    if !sink.missing_actions().is_empty() {
        return Err(Error::MissingAction(sink.missing_actions().join(", ")));
    }

    Ok(GeneratedOutput {
        parser_filename: sink.filename(),
        parser_source: sink.render(),
        tokens_filename: "tokens.rs".to_string(),
        tokens_source: render_token_file(&token_names),
        package_marker_filename: sink.package_marker_filename(),
    })
}

/// Writes a [GeneratedOutput] to `dir`, creating it if absent and overwriting
/// any pre-existing files of the same names, per §6.
pub fn write_output(output: &GeneratedOutput, dir: &Path) -> Result<(), Error> {
    fs::create_dir_all(dir).map_err(|source| Error::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let parser_path = dir.join(&output.parser_filename);
    fs::write(&parser_path, &output.parser_source).map_err(|source| Error::Io {
        path: parser_path.clone(),
        source,
    })?;

    let tokens_path = dir.join(&output.tokens_filename);
    fs::write(&tokens_path, &output.tokens_source).map_err(|source| Error::Io {
        path: tokens_path.clone(),
        source,
    })?;

    if let Some(marker_name) = &output.package_marker_filename {
        let marker_path = dir.join(marker_name);
        fs::write(&marker_path, "").map_err(|source| Error::Io {
            path: marker_path.clone(),
            source,
        })?;
    }

    Ok(())
}
