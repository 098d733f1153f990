//! octoc - command-line entry point for the compiler (spec §6).
//!
//! Parses arguments, initializes logging, then hands off to
//! [`octo_drv::compile_file`]. All compiler logic lives in the library
//! crate; this binary is just the process boundary.

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use octo_drv::Stage;

/// octoc - compiles source files to C.
#[derive(Parser, Debug)]
#[command(name = "octoc")]
#[command(author = "Fax Team")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Compiles source files to C", long_about = None)]
struct Cli {
    /// Source file to compile
    input: PathBuf,

    /// Write output here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Which stage's output to print
    #[arg(long, value_enum, default_value_t = EmitKind::C)]
    emit: EmitKind,

    /// Enable verbose (debug-level) logging
    #[arg(short, long, env = "OCTOC_VERBOSE")]
    verbose: bool,

    /// Disable color output
    #[arg(long, env = "OCTOC_NO_COLOR")]
    no_color: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum EmitKind {
    Tokens,
    Ast,
    C,
}

impl From<EmitKind> for Stage {
    fn from(kind: EmitKind) -> Self {
        match kind {
            EmitKind::Tokens => Stage::Tokens,
            EmitKind::Ast => Stage::Ast,
            EmitKind::C => Stage::C,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.no_color);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("octoc: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> octo_drv::Result<()> {
    let stage = Stage::from(cli.emit);

    match &cli.output {
        Some(path) => {
            let mut file: std::fs::File = std::fs::File::create(path)?;
            octo_drv::compile_file(&cli.input, stage, &mut file)
        }
        None => {
            let mut out = io::stdout().lock();
            octo_drv::compile_file(&cli.input, stage, &mut out)
        }
    }
}

fn init_logging(verbose: bool, no_color: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };

    let subscriber = fmt::layer()
        .with_ansi(!no_color)
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false);

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(subscriber)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_c_emission_and_stdout() {
        let cli = Cli::parse_from(["octoc", "in.oc"]);
        assert_eq!(cli.emit, EmitKind::C);
        assert!(cli.output.is_none());
        assert!(!cli.verbose);
    }

    #[test]
    fn accepts_emit_stage_override() {
        let cli = Cli::parse_from(["octoc", "in.oc", "--emit", "tokens"]);
        assert_eq!(cli.emit, EmitKind::Tokens);
    }

    #[test]
    fn accepts_output_path() {
        let cli = Cli::parse_from(["octoc", "in.oc", "-o", "out.c"]);
        assert_eq!(cli.output, Some(PathBuf::from("out.c")));
    }
}
