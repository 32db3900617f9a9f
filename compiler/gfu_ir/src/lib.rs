//! g-fu IR - the data the reader produces and everything downstream shares.
//!
//! - [`Pos`]: source locations (source id, 1-based row and column)
//! - [`Sym`] / [`Tag`]: interned symbols and their unique integer tags
//! - [`SymbolTable`]: the per-context interner
//! - [`Form`]: parsed syntax nodes
//! - [`BuiltinType`] / [`TypeId`]: identities of the built-in value kinds
//!
//! Nothing in this crate evaluates anything. Symbols compare by tag, so two
//! symbols from different tables must never be mixed.

mod builtin_type;
mod form;
mod pos;
mod sym;
mod symbol_table;

pub use builtin_type::{BuiltinType, TypeId};
pub use form::{Form, FormKind};
pub use pos::Pos;
pub use sym::{Sym, Tag};
pub use symbol_table::{InternError, SymbolTable};
