//! Interned symbols.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Unique integer identity of an interned symbol.
///
/// Tags are handed out in interning order by one [`SymbolTable`] and are
/// never reused.
///
/// [`SymbolTable`]: crate::SymbolTable
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct Tag(u32);

impl Tag {
    #[inline]
    pub const fn new(raw: u32) -> Self {
        Tag(raw)
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    #[inline]
    pub(crate) const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tag({})", self.0)
    }
}

struct SymData {
    name: Box<str>,
    tag: Tag,
}

/// An interned symbol: a name plus its [`Tag`].
///
/// Cloning is a reference-count bump. Equality, ordering and hashing use the
/// tag only.
#[derive(Clone)]
pub struct Sym(Arc<SymData>);

impl Sym {
    pub(crate) fn new(name: Box<str>, tag: Tag) -> Self {
        Sym(Arc::new(SymData { name, tag }))
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.0.name
    }

    #[inline]
    pub fn tag(&self) -> Tag {
        self.0.tag
    }
}

impl PartialEq for Sym {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.0.tag == other.0.tag
    }
}

impl Eq for Sym {}

impl Hash for Sym {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.tag.hash(state);
    }
}

impl fmt::Debug for Sym {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Sym({}, {})", self.0.name, self.0.tag.0)
    }
}

impl fmt::Display for Sym {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.name)
    }
}
