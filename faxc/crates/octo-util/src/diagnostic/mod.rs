//! The closed diagnostic taxonomy and the reporter that formats it.
//!
//! `ErrorKind` is closed by design (spec §7): every diagnosable condition in
//! the lexer, parser, and semantic analyzer is a named variant here, never
//! a free-form string. `Handler` is the sink every phase reports through;
//! it never throws and never swallows — every `Error` pushed onto it is
//! guaranteed to reach [`Handler::render_all`] exactly once.

use std::cell::RefCell;
use std::fmt;

use crate::span::{SourceMap, Span};
use thiserror::Error as ThisError;

/// One entry in the closed error taxonomy (spec §7). Message wording here
/// is load-bearing: it is what the reporter prints after `error: `.
#[derive(Debug, Clone, ThisError, PartialEq)]
pub enum ErrorKind {
    #[error("invalid symbol '{symbol}'")]
    InvalidSymbol { symbol: String },

    #[error("multi-character character literal")]
    MultiCharacterCharacter,

    #[error("mismatched parentheses")]
    MismatchedParens,

    #[error("unclosed parentheses")]
    UnclosedParens,

    #[error("unexpected symbol: expected {expected}, found '{found}'")]
    UnexpectedSymbol { expected: String, found: String },

    #[error("symbol '{name}' redeclared in this scope")]
    SymbolRedeclaration { name: String },

    #[error("invalid operation '{op}' for types {left} and {right}")]
    InvalidBinaryOperation {
        op: String,
        left: String,
        right: String,
    },

    #[error("invalid operation '{op}' for type {operand}")]
    InvalidUnaryOperation { op: String, operand: String },

    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: String, found: String },

    #[error("invalid implicit cast from {from} to {to}")]
    InvalidImplicitCast { from: String, to: String },

    #[error("undeclared symbol '{name}'")]
    UndeclaredSymbol { name: String },

    #[error("'{name}' is not a type")]
    NotAType { name: String },

    #[error("cannot use type '{name}' as a value")]
    CannotUseTypeAsValue { name: String },

    #[error("type '{ty}' is not a compound type")]
    NotCompound { ty: String },

    #[error("no member '{member}' in type '{ty}'")]
    MissingMember { member: String, ty: String },

    #[error("invalid compound literal: {reason}")]
    InvalidCompoundLiteral { reason: String },

    #[error("type '{ty}' is not an iterator")]
    NotAnIterator { ty: String },

    #[error("type '{ty}' is not an array")]
    NotAnArray { ty: String },

    #[error("invalid array subscript of type '{ty}'")]
    InvalidArraySubscript { ty: String },

    #[error("zero-length array")]
    ZeroLengthArray,

    #[error("array length mismatch: expected {expected}, found {found}")]
    ArrayLengthMismatch { expected: usize, found: usize },

    #[error("cannot infer array length")]
    CannotInferArrayLength,

    #[error("invalid lvalue")]
    InvalidLvalue,

    #[error("cannot get address of expression")]
    InvalidAddressOf,

    #[error("function '{name}' is missing a body")]
    MissingFunctionBody { name: String },

    #[error("extern function '{name}' must not have a body")]
    ExternWithBody { name: String },

    #[error("'while' must not have an 'else' clause")]
    WhileWithElse,

    #[error("'void' is not a valid variable or parameter type")]
    VoidVariable,

    #[error("invalid argument count: expected {expected}, found {found}")]
    InvalidArgumentCount { expected: usize, found: usize },
}

/// Severity. Only `Error` is ever produced by the closed taxonomy above;
/// `Note` is used for the secondary "first declared here" pointer spec §4.7
/// describes, and is carried alongside an `Error` rather than emitted on
/// its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Error,
    Note,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::Error => write!(f, "error"),
            Level::Note => write!(f, "note"),
        }
    }
}

/// An `ErrorKind` pinned to the token that triggered it, with an optional
/// secondary note (e.g. redeclaration's "first declared here").
#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    pub kind: ErrorKind,
    pub span: Span,
    pub note: Option<(String, Span)>,
}

impl Error {
    pub fn new(kind: ErrorKind, span: Span) -> Self {
        Self {
            kind,
            span,
            note: None,
        }
    }

    pub fn with_note(mut self, message: impl Into<String>, span: Span) -> Self {
        self.note = Some((message.into(), span));
        self
    }
}

/// A rendered diagnostic, ready to print: message line, an optional
/// trailing note block, each carrying the (line, column) they point at so
/// the caller can pull the matching source line out of a `SourceMap`.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub level: Level,
    pub message: String,
    pub span: Span,
}

/// Central error sink. Every phase is handed a `&Handler`, pushes `Error`s
/// into it, and keeps running where the spec says it is safe to (lexer
/// always, parser subtree-by-subtree, analyzer node-by-node). Nothing ever
/// panics through this type; `has_errors` is how callers decide whether to
/// advance to the next phase.
#[derive(Debug, Default)]
pub struct Handler {
    errors: RefCell<Vec<Error>>,
}

impl Handler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn report(&self, error: Error) {
        self.errors.borrow_mut().push(error);
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.borrow().is_empty()
    }

    pub fn error_count(&self) -> usize {
        self.errors.borrow().len()
    }

    pub fn errors(&self) -> Vec<Error> {
        self.errors.borrow().clone()
    }

    pub fn into_errors(self) -> Vec<Error> {
        self.errors.into_inner()
    }

    /// Renders every accumulated error against `source_map` in the format
    /// from spec §4.7/§6:
    ///
    /// ```text
    /// <path>:<line>:<col>: error: <message>
    ///     5 | let x: i32 = ;
    ///         ^
    /// ```
    pub fn render_all(&self, source_map: &SourceMap) -> String {
        let mut out = String::new();
        for error in self.errors.borrow().iter() {
            out.push_str(&render_one(
                Level::Error,
                &error.kind.to_string(),
                error.span,
                source_map,
            ));
            if let Some((note, note_span)) = &error.note {
                out.push_str(&render_one(Level::Note, note, *note_span, source_map));
            }
        }
        out
    }
}

fn render_one(level: Level, message: &str, span: Span, source_map: &SourceMap) -> String {
    let path = source_map.path().display();
    let line_text = source_map.line_text(span.line);
    let mut s = String::new();
    s.push_str(&format!(
        "{}:{}:{}: {}: {}\n",
        path, span.line, span.column, level, message
    ));
    s.push_str(&format!("{:>5} | {}\n", span.line, line_text));
    s.push_str(&" ".repeat(8));
    s.push_str(&" ".repeat(span.column.saturating_sub(1) as usize));
    s.push_str("^\n");
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handler_starts_empty() {
        let handler = Handler::new();
        assert!(!handler.has_errors());
        assert_eq!(handler.error_count(), 0);
    }

    #[test]
    fn report_accumulates() {
        let handler = Handler::new();
        handler.report(Error::new(
            ErrorKind::UndeclaredSymbol {
                name: "x".into(),
            },
            Span::new(1, 1),
        ));
        assert!(handler.has_errors());
        assert_eq!(handler.error_count(), 1);
    }

    #[test]
    fn render_matches_format() {
        let source_map = SourceMap::from_source("t.oc", "let x = y;\n");
        let handler = Handler::new();
        handler.report(Error::new(
            ErrorKind::UndeclaredSymbol {
                name: "y".into(),
            },
            Span::new(1, 9),
        ));
        let rendered = handler.render_all(&source_map);
        let mut lines = rendered.lines();
        assert_eq!(
            lines.next().unwrap(),
            "t.oc:1:9: error: undeclared symbol 'y'"
        );
        assert_eq!(lines.next().unwrap(), "    1 | let x = y;");
        let caret_line = lines.next().unwrap();
        assert_eq!(caret_line.len() - caret_line.trim_start().len(), 8 + 8);
        assert!(caret_line.ends_with('^'));
    }

    #[test]
    fn note_renders_after_error() {
        let source_map = SourceMap::from_source("t.oc", "let x = 1;\nlet x = 2;\n");
        let handler = Handler::new();
        handler.report(
            Error::new(
                ErrorKind::SymbolRedeclaration { name: "x".into() },
                Span::new(2, 5),
            )
            .with_note("first declared here", Span::new(1, 5)),
        );
        let rendered = handler.render_all(&source_map);
        assert!(rendered.contains("error: symbol 'x' redeclared in this scope"));
        assert!(rendered.contains("note: first declared here"));
    }
}
