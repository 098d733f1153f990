//! Interned identifier and keyword text.
//!
//! The spec's concurrency model (§5) is single-threaded and non-suspending:
//! there is exactly one compilation context, and it never shares state
//! across threads. That rules out the lock-free, `DashMap`-backed interner
//! a multi-threaded front-end would want; a plain `RefCell<HashMap>` behind
//! one owner is both simpler and a closer match to the resource model.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

/// A handle to interned text. Cheap to copy and compare; the backing text
/// is only ever read through [`Interner::resolve`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Symbol(u32);

/// Owns the single copy of each distinct string seen during a compilation.
/// One `Interner` is created per [`crate::SourceMap`]-scoped compilation and
/// dropped with it; nothing about it outlives the compilation context.
#[derive(Debug, Default)]
pub struct Interner {
    strings: Vec<Rc<str>>,
    lookup: HashMap<Rc<str>, u32>,
}

impl Interner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn intern(&mut self, text: &str) -> Symbol {
        if let Some(&id) = self.lookup.get(text) {
            return Symbol(id);
        }
        let id = self.strings.len() as u32;
        let rc: Rc<str> = Rc::from(text);
        self.strings.push(rc.clone());
        self.lookup.insert(rc, id);
        Symbol(id)
    }

    pub fn resolve(&self, symbol: Symbol) -> &str {
        &self.strings[symbol.0 as usize]
    }

    pub fn len(&self) -> usize {
        self.strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }
}

/// A shared handle to an [`Interner`], used where a single owner is
/// inconvenient (e.g. threaded through both the lexer and the parser).
/// Still single-threaded: `Rc`, not `Arc`.
#[derive(Debug, Clone)]
pub struct SharedInterner(Rc<RefCell<Interner>>);

impl SharedInterner {
    pub fn new() -> Self {
        Self(Rc::new(RefCell::new(Interner::new())))
    }

    pub fn intern(&self, text: &str) -> Symbol {
        self.0.borrow_mut().intern(text)
    }

    pub fn resolve(&self, symbol: Symbol) -> String {
        self.0.borrow().resolve(symbol).to_string()
    }
}

impl Default for SharedInterner {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_string_interns_to_same_symbol() {
        let mut interner = Interner::new();
        let a = interner.intern("foo");
        let b = interner.intern("foo");
        assert_eq!(a, b);
    }

    #[test]
    fn different_strings_intern_differently() {
        let mut interner = Interner::new();
        let a = interner.intern("foo");
        let b = interner.intern("bar");
        assert_ne!(a, b);
    }

    #[test]
    fn resolve_roundtrips() {
        let mut interner = Interner::new();
        let sym = interner.intern("identifier_name");
        assert_eq!(interner.resolve(sym), "identifier_name");
    }

    #[test]
    fn shared_interner_is_cloneable_and_consistent() {
        let shared = SharedInterner::new();
        let other = shared.clone();
        let a = shared.intern("x");
        let b = other.intern("x");
        assert_eq!(a, b);
    }
}
