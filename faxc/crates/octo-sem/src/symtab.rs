//! The symbol table (spec §4.5): an ordered, append-only list of declared
//! names plus a stack of scope boundaries. Lookup always scans backward so
//! the innermost matching declaration wins; `pop_scope` truncates back to
//! the boundary `push_scope` recorded, which is cheaper than a `Vec` of
//! per-scope `HashMap`s and keeps declaration order around for free (which
//! diagnostics need, for "first declared here" notes).

use octo_util::diagnostic::{Error, ErrorKind};
use octo_util::{Span, Type};

#[derive(Debug, Clone)]
pub struct SymbolEntry {
    pub name: String,
    pub span: Span,
    pub ty: Type,
}

#[derive(Debug)]
pub struct SymbolTable {
    entries: Vec<SymbolEntry>,
    scope_stack: Vec<usize>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            scope_stack: vec![0],
        }
    }

    pub fn push_scope(&mut self) {
        self.scope_stack.push(self.entries.len());
    }

    pub fn pop_scope(&mut self) {
        let boundary = self
            .scope_stack
            .pop()
            .expect("pop_scope called without a matching push_scope");
        self.entries.truncate(boundary);
    }

    /// Declares `name` in the innermost scope. Fails if `name` is already
    /// declared anywhere from that scope's boundary to the end of the
    /// table — shadowing an outer scope is fine, redeclaring within the
    /// same one is not (spec §4.5, §4.6).
    pub fn declare(&mut self, name: String, span: Span, ty: Type) -> Result<(), Error> {
        let boundary = *self.scope_stack.last().unwrap_or(&0);
        if let Some(existing) = self.entries[boundary..].iter().find(|e| e.name == name) {
            return Err(Error::new(
                ErrorKind::SymbolRedeclaration { name },
                span,
            )
            .with_note("first declared here", existing.span));
        }
        self.entries.push(SymbolEntry { name, span, ty });
        Ok(())
    }

    /// Scans backward from the end so the innermost declaration of a
    /// shadowed name is the one found.
    pub fn lookup(&self, name: &str) -> Option<&SymbolEntry> {
        self.entries.iter().rev().find(|e| e.name == name)
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}
