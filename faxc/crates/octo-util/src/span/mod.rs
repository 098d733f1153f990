//! Source positions.

mod source_map;

pub use source_map::SourceMap;

/// A 1-based (line, column) pair pointing at the first character of some
/// lexeme or node. Columns and lines are never zero; `(1, 1)` is the first
/// character of the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    pub line: u32,
    pub column: u32,
}

impl Span {
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

impl std::fmt::Display for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}
