//! octo-par - the recursive-descent parser (spec §4.3).
//!
//! Turns a [`octo_lex::Token`] stream into the tagged-union [`Ast`]. Takes
//! ownership of the tokens; hands ownership of the resulting tree to
//! whatever calls [`parse`], which for this workspace is `octo-sem`.

mod ast;
mod parser;

pub use ast::{Ast, BinOp, CompoundMember, Expr, ExprKind, Param, UnOp};
pub use parser::parse;
