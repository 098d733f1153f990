//! octo-lex - the Mealy-machine tokenizer (spec §4.2).
//!
//! Consumes a [`octo_util::SourceMap`] and produces a stream of [`Token`]s
//! bracketed by a synthetic `{`/`}` pair and terminated by `Eof`, so the
//! parser can always treat a whole program as one compound statement.

mod cursor;
mod lexer;
mod token;

pub use lexer::tokenize;
pub use token::{Payload, Token, TokenKind};
