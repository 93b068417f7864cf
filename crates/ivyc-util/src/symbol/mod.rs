//! String interning.
//!
//! [`Symbol`] is a 4-byte handle to an interned string. The lexer interns
//! every identifier and string literal it reads, so the rest of the
//! pipeline compares names in O(1) instead of re-hashing strings at every
//! scope lookup.
//!
//! # Examples
//!
//! ```
//! use ivyc_util::Symbol;
//!
//! let a = Symbol::intern("balance");
//! let b = Symbol::intern("balance");
//! assert_eq!(a, b);
//! assert_eq!(a.as_str(), "balance");
//! ```

use parking_lot::Mutex;
use rustc_hash::FxHashMap;
use std::fmt;
use std::sync::OnceLock;

fn interner() -> &'static Mutex<Interner> {
    static TABLE: OnceLock<Mutex<Interner>> = OnceLock::new();
    TABLE.get_or_init(|| Mutex::new(Interner::new()))
}

struct Interner {
    strings: Vec<&'static str>,
    lookup: FxHashMap<&'static str, u32>,
}

impl Interner {
    fn new() -> Self {
        Self {
            strings: Vec::new(),
            lookup: FxHashMap::default(),
        }
    }

    fn intern(&mut self, s: &str) -> u32 {
        if let Some(&id) = self.lookup.get(s) {
            return id;
        }
        let id = self.strings.len() as u32;
        // Strings live for the whole process; the pipeline never unloads
        // a compilation, so leaking is the simplest correct allocator here.
        let leaked: &'static str = Box::leak(s.to_owned().into_boxed_str());
        self.strings.push(leaked);
        self.lookup.insert(leaked, id);
        id
    }

    fn resolve(&self, id: u32) -> &'static str {
        self.strings[id as usize]
    }
}

/// A handle to an interned string.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Symbol(u32);

impl Symbol {
    /// Interns `s`, returning the existing handle if it was seen before.
    pub fn intern(s: &str) -> Self {
        Symbol(interner().lock().intern(s))
    }

    /// Returns the original string this symbol was interned from.
    pub fn as_str(&self) -> &'static str {
        interner().lock().resolve(self.0)
    }

    #[inline]
    pub fn as_u32(&self) -> u32 {
        self.0
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol({:?})", self.as_str())
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<&str> for Symbol {
    fn from(s: &str) -> Self {
        Symbol::intern(s)
    }
}

impl From<String> for Symbol {
    fn from(s: String) -> Self {
        Symbol::intern(&s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_text_interns_to_the_same_symbol() {
        let a = Symbol::intern("balance");
        let b = Symbol::intern("balance");
        assert_eq!(a, b);
    }

    #[test]
    fn different_text_interns_to_different_symbols() {
        let a = Symbol::intern("balance");
        let b = Symbol::intern("deposit");
        assert_ne!(a, b);
    }

    #[test]
    fn as_str_round_trips() {
        let sym = Symbol::intern("withdraw");
        assert_eq!(sym.as_str(), "withdraw");
    }
}
