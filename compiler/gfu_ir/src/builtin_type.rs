//! Identities of the built-in value kinds.
//!
//! `BuiltinType` names the closed set of kinds the evaluator dispatches on
//! by pattern matching. Each one is pre-registered in a context's type
//! registry under a fixed [`TypeId`]; host-registered kinds get ids from
//! [`TypeId::FIRST_EXTENSION`] upward.

use std::fmt;

/// Type registry index.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct TypeId(u32);

impl TypeId {
    pub const BOOL: TypeId = TypeId(0);
    pub const FUN: TypeId = TypeId(1);
    pub const INT: TypeId = TypeId(2);
    pub const META: TypeId = TypeId(3);
    pub const NIL: TypeId = TypeId(4);
    pub const PRIM: TypeId = TypeId(5);
    pub const SPLAT: TypeId = TypeId(6);
    pub const VEC: TypeId = TypeId(7);

    /// First id handed to a host-registered kind.
    pub const FIRST_EXTENSION: u32 = 8;

    #[inline]
    pub const fn new(raw: u32) -> Self {
        TypeId(raw)
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn is_builtin(self) -> bool {
        self.0 < Self::FIRST_EXTENSION
    }
}

impl fmt::Debug for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match BuiltinType::from_type_id(*self) {
            Some(builtin) => write!(f, "TypeId({})", builtin.name()),
            None => write!(f, "TypeId({})", self.0),
        }
    }
}

/// The built-in value kinds.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum BuiltinType {
    /// `T` and `F`
    Bool,
    /// User functions created by `fun`
    Fun,
    /// 64-bit signed integers
    Int,
    /// Types as values
    Meta,
    /// `_`
    Nil,
    /// Host primitives
    Prim,
    /// `x..` markers awaiting expansion
    Splat,
    /// `[...]`
    Vec,
}

impl BuiltinType {
    /// All built-in kinds, in `TypeId` order.
    pub const ALL: [BuiltinType; 8] = [
        Self::Bool,
        Self::Fun,
        Self::Int,
        Self::Meta,
        Self::Nil,
        Self::Prim,
        Self::Splat,
        Self::Vec,
    ];

    #[must_use]
    pub const fn from_type_id(id: TypeId) -> Option<Self> {
        match id.raw() {
            0 => Some(Self::Bool),
            1 => Some(Self::Fun),
            2 => Some(Self::Int),
            3 => Some(Self::Meta),
            4 => Some(Self::Nil),
            5 => Some(Self::Prim),
            6 => Some(Self::Splat),
            7 => Some(Self::Vec),
            _ => None,
        }
    }

    #[must_use]
    pub const fn type_id(self) -> TypeId {
        match self {
            Self::Bool => TypeId::BOOL,
            Self::Fun => TypeId::FUN,
            Self::Int => TypeId::INT,
            Self::Meta => TypeId::META,
            Self::Nil => TypeId::NIL,
            Self::Prim => TypeId::PRIM,
            Self::Splat => TypeId::SPLAT,
            Self::Vec => TypeId::VEC,
        }
    }

    /// Name as rendered by `dump` of the kind's metadata value.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Bool => "Bool",
            Self::Fun => "Fun",
            Self::Int => "Int",
            Self::Meta => "Meta",
            Self::Nil => "Nil",
            Self::Prim => "Prim",
            Self::Splat => "Splat",
            Self::Vec => "Vec",
        }
    }
}

impl fmt::Display for BuiltinType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
