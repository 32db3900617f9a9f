//! Parsed syntax nodes.

use std::{fmt, mem};

use gfu_stack::ensure_sufficient_stack;

use crate::{Pos, Sym};

/// One parsed node plus the position of its first character.
///
/// Nesting depth is bounded only by the source, so cloning, comparing,
/// formatting and dropping never recurse on the native stack unguarded.
pub struct Form {
    pub kind: FormKind,
    pub pos: Pos,
}

#[derive(Clone, Debug, PartialEq)]
pub enum FormKind {
    /// `_`
    Nil,
    /// `T` / `F`
    Bool(bool),
    /// Integer literal
    Int(i64),
    /// Identifier, resolved against the environment at evaluation time
    Id(Sym),
    /// `(head args...)`
    Expr(Vec<Form>),
    /// `[items...]`
    Vec(Vec<Form>),
    /// `form..`
    Splat(Box<Form>),
}

impl Form {
    #[inline]
    pub fn new(kind: FormKind, pos: Pos) -> Self {
        Form { kind, pos }
    }

    /// The identifier this form names, if it is one.
    pub fn as_id(&self) -> Option<&Sym> {
        match &self.kind {
            FormKind::Id(sym) => Some(sym),
            _ => None,
        }
    }

    /// The items of a `(...)` or `[...]` form.
    pub fn items(&self) -> Option<&[Form]> {
        match &self.kind {
            FormKind::Expr(items) | FormKind::Vec(items) => Some(items),
            _ => None,
        }
    }
}

impl Clone for Form {
    fn clone(&self) -> Self {
        ensure_sufficient_stack(|| Form {
            kind: self.kind.clone(),
            pos: self.pos.clone(),
        })
    }
}

impl PartialEq for Form {
    fn eq(&self, other: &Self) -> bool {
        ensure_sufficient_stack(|| self.kind == other.kind && self.pos == other.pos)
    }
}

impl fmt::Debug for Form {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        ensure_sufficient_stack(|| {
            f.debug_struct("Form")
                .field("kind", &self.kind)
                .field("pos", &self.pos)
                .finish()
        })
    }
}

/// Children are moved onto a heap work list and dropped one level at a time.
impl Drop for FormKind {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        detach_children(self, &mut pending);
        while let Some(mut kind) = pending.pop() {
            detach_children(&mut kind, &mut pending);
        }
    }
}

fn detach_children(kind: &mut FormKind, pending: &mut Vec<FormKind>) {
    match kind {
        FormKind::Expr(items) | FormKind::Vec(items) => {
            let kinds = items
                .drain(..)
                .map(|mut item| mem::replace(&mut item.kind, FormKind::Nil));
            pending.extend(kinds);
        }
        FormKind::Splat(inner) => {
            pending.push(mem::replace(&mut inner.kind, FormKind::Nil));
        }
        FormKind::Nil | FormKind::Bool(_) | FormKind::Int(_) | FormKind::Id(_) => {}
    }
}

fn write_items(f: &mut fmt::Formatter<'_>, items: &[Form]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(" ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

/// Renders forms back to source syntax.
impl fmt::Display for Form {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        ensure_sufficient_stack(|| match &self.kind {
            FormKind::Nil => f.write_str("_"),
            FormKind::Bool(true) => f.write_str("T"),
            FormKind::Bool(false) => f.write_str("F"),
            FormKind::Int(n) => write!(f, "{n}"),
            FormKind::Id(sym) => write!(f, "{sym}"),
            FormKind::Expr(items) => {
                f.write_str("(")?;
                write_items(f, items)?;
                f.write_str(")")
            }
            FormKind::Vec(items) => {
                f.write_str("[")?;
                write_items(f, items)?;
                f.write_str("]")
            }
            FormKind::Splat(inner) => write!(f, "{inner}.."),
        })
    }
}
