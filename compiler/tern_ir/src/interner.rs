//! String interner for identifiers and string literals.
//!
//! Interned strings are leaked and live for the rest of the process, so a
//! `Name` can always be turned back into a `&'static str`.

use super::Name;
use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use std::sync::Arc;

struct InternTable {
    map: FxHashMap<&'static str, Name>,
    strings: Vec<&'static str>,
}

/// String interner shared by the lexer, parser and interpreter.
///
/// Lookups of already-interned strings only take the read lock.
pub struct StringInterner {
    table: RwLock<InternTable>,
}

impl StringInterner {
    /// Create a new interner with the language keywords and protocol
    /// method names already interned.
    pub fn new() -> Self {
        let mut map = FxHashMap::default();
        map.insert("", Name::EMPTY);
        let interner = Self {
            table: RwLock::new(InternTable {
                map,
                strings: vec![""],
            }),
        };
        interner.pre_intern_well_known();
        interner
    }

    /// Intern `s`.
    ///
    /// # Panics
    /// Panics if more than 2^32 distinct strings are interned.
    pub fn intern(&self, s: &str) -> Name {
        if let Some(&name) = self.table.read().map.get(s) {
            return name;
        }

        let mut table = self.table.write();
        // Another writer may have won the race between the two locks.
        if let Some(&name) = table.map.get(s) {
            return name;
        }

        let index = u32::try_from(table.strings.len())
            .unwrap_or_else(|_| panic!("string interner exceeded {} entries", u32::MAX));
        let name = Name::from_raw(index);
        let leaked: &'static str = Box::leak(s.to_owned().into_boxed_str());
        table.strings.push(leaked);
        table.map.insert(leaked, name);
        name
    }

    /// Look up the string for a Name.
    pub fn lookup(&self, name: Name) -> &'static str {
        self.table.read().strings.get(name.index()).copied().unwrap_or("")
    }

    fn pre_intern_well_known(&self) {
        const WELL_KNOWN: &[&str] = &[
            // Keywords
            "and", "class", "else", "false", "fn", "for", "if", "in", "nil", "or", "return",
            "self", "super", "true", "var", "while",
            // Protocol methods
            "__init__", "__iter__", "__next__", "__getitem__", "__setitem__",
            // Built-in methods and globals
            "map", "filter", "collect", "push", "pop", "len", "print", "Sentinel", "Iter",
            "Vec", "Range", "String",
            // Frame names
            "script", "lambda",
        ];
        for word in WELL_KNOWN {
            self.intern(word);
        }
    }

    /// Number of interned strings, including the empty string.
    pub fn len(&self) -> usize {
        self.table.read().strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() <= 1
    }
}

impl Default for StringInterner {
    fn default() -> Self {
        Self::new()
    }
}

/// Read-only access to interned names.
///
/// Display code takes `&impl StringLookup` so it does not depend on who owns
/// the interner.
pub trait StringLookup {
    fn lookup(&self, name: Name) -> &str;
}

impl StringLookup for StringInterner {
    fn lookup(&self, name: Name) -> &str {
        StringInterner::lookup(self, name)
    }
}

/// Cheaply clonable handle to a `StringInterner`.
///
/// The lexer, parser and interpreter of one session all hold a clone of the
/// same handle so that their `Name`s agree.
#[derive(Clone, Default)]
pub struct SharedInterner(Arc<StringInterner>);

impl SharedInterner {
    pub fn new() -> Self {
        SharedInterner(Arc::new(StringInterner::new()))
    }
}

impl std::ops::Deref for SharedInterner {
    type Target = StringInterner;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl StringLookup for SharedInterner {
    fn lookup(&self, name: Name) -> &str {
        self.0.lookup(name)
    }
}
