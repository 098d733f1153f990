//! octo-util - Core Utilities and Foundation Types
//!
//! Shared plumbing used by every phase of the front-end: source positions
//! (`span`), the closed diagnostic taxonomy (`diagnostic`), and lexeme text
//! (`symbol`). Nothing in this crate is phase-specific; `octo-lex`,
//! `octo-par`, and `octo-sem` all depend on it and nothing else in the
//! workspace depends on them.

pub mod diagnostic;
pub mod span;
pub mod symbol;
pub mod types;

pub use diagnostic::{Diagnostic, Error, ErrorKind, Handler, Level};
pub use span::{SourceMap, Span};
pub use symbol::{Interner, Symbol};
pub use types::{NumericLiteralKind, Type};
