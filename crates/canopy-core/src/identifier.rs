//! Node identifiers backed by a string interner.
//!
//! Node ids are compared on every lookup and hashed into the tree index, so
//! they are interned once and passed around as a copyable symbol.

use std::{
    fmt,
    sync::{Mutex, MutexGuard, OnceLock},
};

use string_interner::{DefaultStringInterner, DefaultSymbol};

/// Global string interner for identifier storage.
static INTERNER: OnceLock<Mutex<DefaultStringInterner>> = OnceLock::new();

fn interner() -> MutexGuard<'static, DefaultStringInterner> {
    INTERNER
        .get_or_init(|| Mutex::new(DefaultStringInterner::new()))
        .lock()
        // The interner is append-only, so a poisoned lock still holds valid data.
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Interned identifier of a diagram node.
///
/// # Examples
///
/// ```
/// use canopy_core::identifier::Id;
///
/// let pump = Id::new("comp-pump");
/// assert_eq!(pump, "comp-pump");
/// assert_eq!(pump, Id::new("comp-pump"));
/// assert_eq!(pump.to_string(), "comp-pump");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Id(DefaultSymbol);

impl Id {
    /// Creates an `Id` from &str, interning it on first use.
    pub fn new(name: &str) -> Self {
        Self(interner().get_or_intern(name))
    }

    /// Looks up an already-interned identifier without interning `name`.
    ///
    /// Returns `None` when no `Id` was ever created for `name`, which also
    /// means no node can carry it.
    pub fn lookup(name: &str) -> Option<Self> {
        interner().get(name).map(Self)
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let interner = interner();
        let value = interner.resolve(self.0).unwrap_or_default();
        f.write_str(value)
    }
}

impl From<&str> for Id {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl PartialEq<str> for Id {
    fn eq(&self, other: &str) -> bool {
        interner().resolve(self.0) == Some(other)
    }
}

impl PartialEq<&str> for Id {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}
