//! Errors the driver surfaces at the process boundary. Everything upstream
//! (lexer, parser, analyzer, emitter) reports through their own closed
//! taxonomies; this type only wraps what's left once that's rendered to
//! text, plus the I/O the library crates deliberately stay clear of.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DriverError {
    #[error("could not read '{path}'")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// One or more stages reported diagnostics (spec §7's propagation
    /// policy: the pipeline stops before the next stage runs). The payload
    /// is already rendered against the source, ready to print as-is.
    #[error("{0}")]
    Diagnostics(String),

    #[error(transparent)]
    Emit(#[from] octo_gen::EmitError),

    #[error("failed to write output")]
    Write(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, DriverError>;
