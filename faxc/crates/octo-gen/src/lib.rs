//! octo-gen - the C code emitter (spec §6).
//!
//! A mechanical, one-pass tree walk: it does not check anything the
//! semantic analyzer didn't already check. Callers must confirm analysis
//! produced no diagnostics before calling [`emit_c`] — this stage assumes
//! every `resolved_type` slot on the tree is filled in.

mod emit;
mod error;
mod types;

pub use emit::emit_c;
pub use error::{EmitError, Result};
