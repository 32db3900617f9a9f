//! Runtime values.
//!
//! [`Val`] is a closed sum over the built-in kinds plus [`Val::Ext`] for
//! kinds registered by the host. Truthiness and rendering are uniform per
//! kind: built-ins decide by pattern matching, host kinds through their
//! [`Type`].

use std::any::Any;
use std::fmt;
use std::mem;
use std::rc::Rc;

use gfu_diagnostic::{Dump, DumpResult, Dumped, E};
use gfu_ir::{BuiltinType, Form, Sym, TypeId};
use gfu_stack::ensure_sufficient_stack;

use crate::env::Env;
use crate::types::{Meta, Type};
use crate::G;

/// Host implementation of a primitive.
///
/// Receives the argument forms unevaluated.
pub type PrimFn = fn(g: &G, args: &[Form], env: &Env) -> Result<Val, E>;

/// A runtime value.
#[derive(Clone)]
pub enum Val {
    Nil,
    Bool(bool),
    Int(i64),
    Vec(Rc<[Val]>),
    /// `x..`; holds the iterable being spread.
    Splat(Rc<Val>),
    Fun(Closure),
    Prim(Rc<Prim>),
    Meta(Meta),
    Ext(ExtVal),
}

impl Val {
    /// Which kind this value is, for the built-in ones.
    pub fn builtin_type(&self) -> Option<BuiltinType> {
        Some(match self {
            Val::Nil => BuiltinType::Nil,
            Val::Bool(_) => BuiltinType::Bool,
            Val::Int(_) => BuiltinType::Int,
            Val::Vec(_) => BuiltinType::Vec,
            Val::Splat(_) => BuiltinType::Splat,
            Val::Fun(_) => BuiltinType::Fun,
            Val::Prim(_) => BuiltinType::Prim,
            Val::Meta(_) => BuiltinType::Meta,
            Val::Ext(_) => return None,
        })
    }

    pub fn type_id(&self) -> TypeId {
        match self {
            Val::Ext(ext) => ext.meta().id(),
            _ => self.builtin_type().map_or(TypeId::NIL, BuiltinType::type_id),
        }
    }

    /// Only nil and `F` are falsy among the built-ins.
    pub fn is_truthy(&self) -> bool {
        match self {
            Val::Nil => false,
            Val::Bool(b) => *b,
            Val::Ext(ext) => ext.ty().is_truthy(ext),
            Val::Int(_)
            | Val::Vec(_)
            | Val::Splat(_)
            | Val::Fun(_)
            | Val::Prim(_)
            | Val::Meta(_) => true,
        }
    }

    #[inline]
    pub fn is_nil(&self) -> bool {
        matches!(self, Val::Nil)
    }

    /// Items of an iterable value.
    ///
    /// Nil iterates as an empty sequence; vectors and splats yield their
    /// items. Everything else is not iterable and returns `None`.
    pub fn iter(&self) -> Option<std::slice::Iter<'_, Val>> {
        match self {
            Val::Nil => Some(<&[Val]>::default().iter()),
            Val::Vec(items) => Some(items.iter()),
            Val::Splat(inner) => inner.iter(),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Val::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn vec(items: impl Into<Rc<[Val]>>) -> Self {
        Val::Vec(items.into())
    }

    /// Structural equality for data, identity for functions and host values.
    pub fn is_eq(&self, other: &Val) -> bool {
        ensure_sufficient_stack(|| match (self, other) {
            (Val::Nil, Val::Nil) => true,
            (Val::Bool(a), Val::Bool(b)) => a == b,
            (Val::Int(a), Val::Int(b)) => a == b,
            (Val::Vec(a), Val::Vec(b)) => {
                a.len() == b.len() && a.iter().zip(b.iter()).all(|(x, y)| x.is_eq(y))
            }
            (Val::Splat(a), Val::Splat(b)) => a.is_eq(b),
            (Val::Fun(a), Val::Fun(b)) => Rc::ptr_eq(&a.fun, &b.fun),
            (Val::Prim(a), Val::Prim(b)) => Rc::ptr_eq(a, b),
            (Val::Meta(a), Val::Meta(b)) => a == b,
            (Val::Ext(a), Val::Ext(b)) => Rc::ptr_eq(&a.data, &b.data),
            _ => false,
        })
    }
}

/// Uniquely owned children are moved onto a heap work list, so dropping a
/// deeply nested vector does not recurse once per level.
impl Drop for Val {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        detach_children(self, &mut pending);
        while let Some(mut val) = pending.pop() {
            detach_children(&mut val, &mut pending);
        }
    }
}

fn detach_children(val: &mut Val, pending: &mut Vec<Val>) {
    match val {
        Val::Vec(items) => {
            if let Some(items) = Rc::get_mut(items) {
                pending.extend(items.iter_mut().map(|item| mem::replace(item, Val::Nil)));
            }
        }
        Val::Splat(inner) => {
            if let Some(inner) = Rc::get_mut(inner) {
                pending.push(mem::replace(inner, Val::Nil));
            }
        }
        _ => {}
    }
}

impl PartialEq for Val {
    fn eq(&self, other: &Self) -> bool {
        self.is_eq(other)
    }
}

fn dump_items(items: &[Val], out: &mut dyn fmt::Write) -> DumpResult {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            out.write_char(' ')?;
        }
        item.dump(out)?;
    }
    Ok(())
}

impl Dump for Val {
    fn dump(&self, out: &mut dyn fmt::Write) -> DumpResult {
        ensure_sufficient_stack(|| -> DumpResult {
            match self {
                Val::Nil => out.write_char('_')?,
                Val::Bool(true) => out.write_char('T')?,
                Val::Bool(false) => out.write_char('F')?,
                Val::Int(n) => write!(out, "{n}")?,
                Val::Vec(items) => {
                    out.write_char('[')?;
                    dump_items(items, out)?;
                    out.write_char(']')?;
                }
                Val::Splat(inner) => {
                    inner.dump(out)?;
                    out.write_str("..")?;
                }
                Val::Fun(closure) => closure.fun.dump(out)?,
                Val::Prim(prim) => write!(out, "Prim({})", prim.name)?,
                Val::Meta(meta) => out.write_str(meta.name())?,
                Val::Ext(ext) => ext.ty().dump(ext, out)?,
            }
            Ok(())
        })
    }
}

impl fmt::Display for Val {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&Dumped(self), f)
    }
}

impl fmt::Debug for Val {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&Dumped(self), f)
    }
}

/// A function value: one `fun` definition plus the frame it closes over.
///
/// Values are compared by definition, so every handle produced from one
/// evaluation of `fun` is the same function.
#[derive(Clone)]
pub struct Closure {
    pub fun: Rc<Fun>,
    pub env: Env,
}

impl Closure {
    pub fn new(fun: Fun, env: Env) -> Self {
        Closure {
            fun: Rc::new(fun),
            env,
        }
    }
}

/// The definition part of a function created by `fun`.
pub struct Fun {
    pub name: Option<Sym>,
    pub params: Vec<Sym>,
    /// Trailing `rest..` parameter collecting surplus arguments.
    pub rest: Option<Sym>,
    pub body: Rc<[Form]>,
}

impl Fun {
    /// Minimum argument count.
    #[inline]
    pub fn min_args(&self) -> usize {
        self.params.len()
    }

    /// Maximum argument count, `None` when a rest parameter is present.
    #[inline]
    pub fn max_args(&self) -> Option<usize> {
        match self.rest {
            Some(_) => None,
            None => Some(self.params.len()),
        }
    }
}

impl Dump for Fun {
    fn dump(&self, out: &mut dyn fmt::Write) -> DumpResult {
        out.write_str("(fun ")?;
        if let Some(name) = &self.name {
            write!(out, "{name} ")?;
        }
        out.write_char('(')?;
        let names = self.params.iter().map(|p| (p, ""));
        let rest = self.rest.iter().map(|p| (p, ".."));
        for (i, (param, suffix)) in names.chain(rest).enumerate() {
            if i > 0 {
                out.write_char(' ')?;
            }
            write!(out, "{param}{suffix}")?;
        }
        out.write_str(") ...)")?;
        Ok(())
    }
}

/// A host primitive with its accepted argument-count range.
pub struct Prim {
    pub name: &'static str,
    pub min_args: usize,
    /// `None` for no upper bound.
    pub max_args: Option<usize>,
    pub imp: PrimFn,
}

impl Prim {
    pub fn new(name: &'static str, min_args: usize, max_args: Option<usize>, imp: PrimFn) -> Self {
        Prim {
            name,
            min_args,
            max_args,
            imp,
        }
    }
}

/// Value of a host-registered kind: its [`Meta`] plus opaque data.
#[derive(Clone)]
pub struct ExtVal {
    meta: Meta,
    ty: Rc<dyn Type>,
    data: Rc<dyn Any>,
}

impl ExtVal {
    /// Wrap `data` as a value of the kind described by `meta`.
    ///
    /// Returns `None` if `meta` is a built-in kind, which have no capability
    /// table to dispatch through.
    pub fn new<T: Any>(meta: Meta, data: T) -> Option<Self> {
        let ty = Rc::clone(meta.ext()?);
        Some(ExtVal {
            meta,
            ty,
            data: Rc::new(data),
        })
    }

    pub fn meta(&self) -> &Meta {
        &self.meta
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.data.downcast_ref()
    }

    #[inline]
    fn ty(&self) -> &dyn Type {
        self.ty.as_ref()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
