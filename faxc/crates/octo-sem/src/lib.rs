//! octo-sem - the semantic analyzer (spec §4.5, §4.6).
//!
//! Consumes the `octo-par` tree `&mut` and resolves every type slot on it
//! in place, accumulating diagnostics in the caller's [`octo_util::diagnostic::Handler`].
//! Nothing here mutates the tree's shape, only its `resolved_type` fields.

mod analysis;
mod symtab;

pub use analysis::{analyze, SemanticContext};
pub use symtab::{SymbolEntry, SymbolTable};
