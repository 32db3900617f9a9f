//! Type registry and the extension point for host-registered kinds.
//!
//! Built-in kinds dispatch by matching on [`Val`]; they still get a [`Meta`]
//! entry here so `(type x)` and embedders can name them. Host kinds implement
//! [`Type`] and are reached through virtual dispatch from [`Val::Ext`].
//!
//! [`Val`]: crate::Val
//! [`Val::Ext`]: crate::Val::Ext

use std::fmt;
use std::rc::Rc;

use gfu_diagnostic::DumpResult;
use gfu_ir::{BuiltinType, TypeId};
use rustc_hash::FxHashMap;

use crate::value::ExtVal;

/// Capability table of a host-registered value kind.
///
/// Both capabilities are required.
pub trait Type {
    /// Registry name, also how the type renders as a value.
    fn name(&self) -> &str;

    /// Truthiness of `val`, consulted by conditionals.
    fn is_truthy(&self, val: &ExtVal) -> bool;

    /// Render `val`.
    fn dump(&self, val: &ExtVal, out: &mut dyn fmt::Write) -> DumpResult;
}

struct MetaData {
    id: TypeId,
    name: Box<str>,
    ext: Option<Rc<dyn Type>>,
}

/// A registered type; also the payload of type values.
///
/// Cheap to clone. Two metas are equal when they carry the same [`TypeId`].
#[derive(Clone)]
pub struct Meta(Rc<MetaData>);

impl Meta {
    fn builtin(builtin: BuiltinType) -> Self {
        Meta(Rc::new(MetaData {
            id: builtin.type_id(),
            name: builtin.name().into(),
            ext: None,
        }))
    }

    fn extension(id: TypeId, ty: Rc<dyn Type>) -> Self {
        Meta(Rc::new(MetaData {
            id,
            name: ty.name().into(),
            ext: Some(ty),
        }))
    }

    #[inline]
    pub fn id(&self) -> TypeId {
        self.0.id
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.0.name
    }

    /// The capability table, for host kinds only.
    pub fn ext(&self) -> Option<&Rc<dyn Type>> {
        self.0.ext.as_ref()
    }
}

impl PartialEq for Meta {
    fn eq(&self, other: &Self) -> bool {
        self.0.id == other.0.id
    }
}

impl Eq for Meta {}

impl fmt::Debug for Meta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Meta({}, {:?})", self.0.name, self.0.id)
    }
}

/// Why [`TypeRegistry::register`] refused a type.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RegisterError {
    #[error("duplicate type: {0}")]
    Duplicate(String),
    #[error("type registry is full")]
    Full,
}

/// All types known to one context, by name and by id.
pub struct TypeRegistry {
    by_name: FxHashMap<Box<str>, Meta>,
    by_id: Vec<Meta>,
}

impl TypeRegistry {
    /// A registry holding the eight built-in kinds, in [`TypeId`] order.
    pub fn new() -> Self {
        let mut registry = TypeRegistry {
            by_name: FxHashMap::default(),
            by_id: Vec::with_capacity(BuiltinType::ALL.len()),
        };
        for builtin in BuiltinType::ALL {
            registry.insert(Meta::builtin(builtin));
        }
        registry
    }

    fn insert(&mut self, meta: Meta) {
        debug_assert_eq!(meta.id().raw() as usize, self.by_id.len());
        self.by_name.insert(meta.name().into(), meta.clone());
        self.by_id.push(meta);
    }

    /// Register a host kind under its [`Type::name`].
    pub fn register(&mut self, ty: Rc<dyn Type>) -> Result<Meta, RegisterError> {
        if self.by_name.contains_key(ty.name()) {
            return Err(RegisterError::Duplicate(ty.name().to_owned()));
        }
        let raw = u32::try_from(self.by_id.len()).map_err(|_| RegisterError::Full)?;
        let meta = Meta::extension(TypeId::new(raw), ty);
        tracing::debug!(name = meta.name(), id = raw, "registered type");
        self.insert(meta.clone());
        Ok(meta)
    }

    pub fn get(&self, name: &str) -> Option<&Meta> {
        self.by_name.get(name)
    }

    pub fn by_id(&self, id: TypeId) -> Option<&Meta> {
        self.by_id.get(id.raw() as usize)
    }

    /// Meta of a built-in kind. Always present.
    pub fn builtin(&self, builtin: BuiltinType) -> Meta {
        match self.by_id(builtin.type_id()) {
            Some(meta) => meta.clone(),
            None => Meta::builtin(builtin),
        }
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}
