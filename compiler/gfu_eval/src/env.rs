//! Lexical environments.
//!
//! An [`Env`] is a shared handle to one frame of bindings chained to its
//! parent. Closures keep their defining frame alive by holding the handle.
//!
//! A frame never holds a strong handle to itself: a function bound in the
//! frame it closes over is stored without its environment and gets it back
//! on lookup. Named functions and `let`-bound closures are therefore freed
//! together with their frame.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use gfu_ir::{Sym, Tag};
use rustc_hash::FxHashMap;

use crate::value::{Closure, Fun};
use crate::Val;

enum Slot {
    Val(Val),
    /// A function closing over the frame holding this slot.
    Local(Rc<Fun>),
}

struct Frame {
    /// Keyed by tag; symbols are unique per context so the tag is enough.
    bindings: FxHashMap<Tag, Slot>,
    parent: Option<Env>,
}

/// Shared, single-threaded handle to a binding frame.
#[derive(Clone)]
pub struct Env(Rc<RefCell<Frame>>);

impl Env {
    /// A root frame with no parent.
    pub fn new() -> Self {
        Env(Rc::new(RefCell::new(Frame {
            bindings: FxHashMap::default(),
            parent: None,
        })))
    }

    /// A fresh frame whose lookups fall back to `self`.
    pub fn child(&self) -> Self {
        Env(Rc::new(RefCell::new(Frame {
            bindings: FxHashMap::default(),
            parent: Some(self.clone()),
        })))
    }

    /// Bind `sym` in this frame, shadowing any outer binding.
    pub fn define(&self, sym: &Sym, val: Val) {
        let local = match &val {
            Val::Fun(closure) if closure.env.ptr_eq(self) => Some(Rc::clone(&closure.fun)),
            _ => None,
        };
        let slot = local.map_or(Slot::Val(val), Slot::Local);
        // Released after the borrow ends.
        let shadowed = self.0.borrow_mut().bindings.insert(sym.tag(), slot);
        drop(shadowed);
    }

    /// Look `sym` up through the parent chain.
    pub fn lookup(&self, sym: &Sym) -> Option<Val> {
        let frame = self.0.borrow();
        match frame.bindings.get(&sym.tag()) {
            Some(Slot::Val(val)) => Some(val.clone()),
            Some(Slot::Local(fun)) => Some(Val::Fun(Closure {
                fun: Rc::clone(fun),
                env: self.clone(),
            })),
            None => frame.parent.as_ref()?.lookup(sym),
        }
    }

    /// Whether both handles refer to the same frame.
    #[inline]
    pub fn ptr_eq(&self, other: &Env) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Whether `sym` is bound in this frame, ignoring parents.
    pub fn is_local(&self, sym: &Sym) -> bool {
        self.0.borrow().bindings.contains_key(&sym.tag())
    }

    pub fn parent(&self) -> Option<Env> {
        self.0.borrow().parent.clone()
    }
}

impl Default for Env {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Env {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let frame = self.0.borrow();
        f.debug_struct("Env")
            .field("bindings", &frame.bindings.len())
            .field("has_parent", &frame.parent.is_some())
            .finish()
    }
}
