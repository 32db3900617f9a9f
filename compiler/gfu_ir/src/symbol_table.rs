//! Per-context symbol interner.
//!
//! One table belongs to one global context. Interning goes through `&self`
//! so the reader and primitives can intern while the context is shared;
//! a `RwLock` keeps that sound if an embedder moves the context across
//! threads between sessions.

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::{Sym, Tag};

/// Interning failed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InternError {
    /// Every `u32` tag has been handed out.
    #[error("symbol table exhausted after {count} symbols")]
    TagOverflow { count: usize },
}

#[derive(Default)]
struct Tables {
    by_name: FxHashMap<Box<str>, Sym>,
    by_tag: Vec<Sym>,
}

/// Name/tag bijection for one context.
#[derive(Default)]
pub struct SymbolTable {
    tables: RwLock<Tables>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern `name`, returning the existing symbol if it was seen before.
    pub fn try_intern(&self, name: &str) -> Result<Sym, InternError> {
        // Fast path: already interned
        if let Some(sym) = self.tables.read().by_name.get(name) {
            return Ok(sym.clone());
        }

        let mut tables = self.tables.write();

        // Double-check after acquiring the write lock
        if let Some(sym) = tables.by_name.get(name) {
            return Ok(sym.clone());
        }

        let count = tables.by_tag.len();
        let raw = u32::try_from(count).map_err(|_| InternError::TagOverflow { count })?;
        let sym = Sym::new(name.into(), Tag::new(raw));
        tables.by_tag.push(sym.clone());
        tables.by_name.insert(name.into(), sym.clone());
        Ok(sym)
    }

    /// Intern `name`.
    ///
    /// # Panics
    /// Panics once more than `u32::MAX` distinct names have been interned.
    pub fn intern(&self, name: &str) -> Sym {
        self.try_intern(name).unwrap_or_else(|e| panic!("{e}"))
    }

    /// Look up a symbol by name without interning it.
    pub fn get(&self, name: &str) -> Option<Sym> {
        self.tables.read().by_name.get(name).cloned()
    }

    /// Look up a symbol by tag.
    pub fn by_tag(&self, tag: Tag) -> Option<Sym> {
        self.tables.read().by_tag.get(tag.index()).cloned()
    }

    pub fn len(&self) -> usize {
        self.tables.read().by_tag.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
