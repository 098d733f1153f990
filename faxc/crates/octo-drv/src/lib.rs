//! octo-drv - the compiler driver (spec §6's external interface).
//!
//! Owns the one thing none of the phase crates are allowed to: the
//! filesystem. Everything else — tokenizing, parsing, analyzing, emitting —
//! is `octo-lex`/`octo-par`/`octo-sem`/`octo-gen` called in the order spec
//! §2's data flow diagram gives: Source Map → Tokenizer → Parser →
//! Semantic Analyzer → Code Emitter, stopping at the first stage that
//! reports diagnostics (spec §7).

mod error;

pub use error::{DriverError, Result};

use std::io::Write;
use std::path::Path;

use octo_util::diagnostic::Handler;
use octo_util::symbol::SharedInterner;
use octo_util::SourceMap;

/// Which stage's output to write. `C` is the normal end state; the earlier
/// stages exist so the front-end can be inspected on its own, independent
/// of code generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Tokens,
    Ast,
    C,
}

/// Loads `path` from disk (spec §6's `load_source`) and runs it through the
/// pipeline up to `stage`.
pub fn compile_file<W: Write>(path: &Path, stage: Stage, out: &mut W) -> Result<()> {
    let source = SourceMap::load(path).map_err(|source| DriverError::Read {
        path: path.display().to_string(),
        source,
    })?;
    compile(source, stage, out)
}

/// Runs an already-loaded [`SourceMap`] through the pipeline. Exposed
/// separately from [`compile_file`] so callers (tests, embedders) that
/// already have source text in hand can skip the filesystem entirely.
pub fn compile<W: Write>(source: SourceMap, stage: Stage, out: &mut W) -> Result<()> {
    let interner = SharedInterner::new();
    let handler = Handler::new();

    let tokens = octo_lex::tokenize(&source, &interner, &handler);
    if handler.has_errors() {
        return Err(DriverError::Diagnostics(handler.render_all(&source)));
    }
    if stage == Stage::Tokens {
        for token in &tokens {
            writeln!(out, "{token:?}")?;
        }
        return Ok(());
    }

    let mut ast = octo_par::parse(tokens, &handler, &interner);
    if handler.has_errors() {
        return Err(DriverError::Diagnostics(handler.render_all(&source)));
    }
    if stage == Stage::Ast {
        for stmt in &ast {
            writeln!(out, "{stmt:#?}")?;
        }
        return Ok(());
    }

    let context = octo_sem::analyze(&mut ast, &handler);
    if handler.has_errors() {
        return Err(DriverError::Diagnostics(handler.render_all(&source)));
    }

    octo_gen::emit_c(&ast, &context, out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(src: &str, stage: Stage) -> Result<String> {
        let source = SourceMap::from_source("t.oc", src.to_string());
        let mut out = Vec::new();
        compile(source, stage, &mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[test]
    fn full_pipeline_emits_c() {
        let c = run(
            "func add(a: i32, b: i32) -> i32 { return a + b; }",
            Stage::C,
        )
        .unwrap();
        assert!(c.contains("int32_t add(int32_t a, int32_t b) {"));
    }

    #[test]
    fn tokenizer_errors_stop_before_parsing() {
        let err = run("let x = 'ab';", Stage::C).unwrap_err();
        assert!(matches!(err, DriverError::Diagnostics(_)));
        assert!(err.to_string().contains("multi-character"));
    }

    #[test]
    fn analysis_errors_stop_before_emission() {
        let err = run("let x: i32 = 5; let x: i32 = 6;", Stage::C).unwrap_err();
        assert!(err.to_string().contains("redeclared"));
    }

    #[test]
    fn tokens_stage_stops_before_parsing() {
        let out = run("let x: i32 = 5;", Stage::Tokens).unwrap();
        assert!(out.lines().count() > 1);
    }

    #[test]
    fn ast_stage_stops_before_analysis() {
        let out = run("let x: i32 = 5;", Stage::Ast).unwrap();
        assert!(out.contains("VariableDeclaration"));
    }
}
