//! Errors the emitter can hit (spec §6's `emit_c` contract).
//!
//! Every variant here indicates a tree that should never reach this stage:
//! either a `Type::ToInfer`/`NumericLiteral` slot the analyzer should have
//! resolved, or a write failure on the caller's `Writer`. Callers are
//! expected to check `Handler::has_errors()` after analysis and skip
//! emission entirely when it returns `true` (spec §7's propagation policy);
//! these errors are a defensive backstop, not a diagnostic channel.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EmitError {
    #[error("unresolved type reached code generation for {what}")]
    UnresolvedType { what: String },

    #[error("failed to write generated C")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, EmitError>;
