//! Names interned once at `Interpreter` construction.
//!
//! Dispatch compares `Name`s (`u32 == u32`) instead of interning strings
//! on every attribute access.

use tern_ir::{Name, StringInterner};

/// Receiver, superclass and protocol method names.
#[derive(Clone, Copy)]
pub(crate) struct ProtocolNames {
    pub(crate) self_: Name,
    pub(crate) super_: Name,
    pub(crate) init: Name,
    pub(crate) iter: Name,
    pub(crate) next: Name,
    pub(crate) getitem: Name,
    pub(crate) setitem: Name,
}

impl ProtocolNames {
    pub(crate) fn new(interner: &StringInterner) -> Self {
        Self {
            self_: interner.intern("self"),
            super_: interner.intern("super"),
            init: interner.intern("__init__"),
            iter: interner.intern("__iter__"),
            next: interner.intern("__next__"),
            getitem: interner.intern("__getitem__"),
            setitem: interner.intern("__setitem__"),
        }
    }
}

/// Built-in method and global names.
#[derive(Clone, Copy)]
pub(crate) struct BuiltinNames {
    pub(crate) push: Name,
    pub(crate) pop: Name,
    pub(crate) len: Name,
    pub(crate) map: Name,
    pub(crate) filter: Name,
    pub(crate) collect: Name,
    pub(crate) find: Name,
    pub(crate) split: Name,
    pub(crate) replace: Name,
    pub(crate) starts_with: Name,
    pub(crate) ends_with: Name,
    pub(crate) as_num: Name,
    pub(crate) script: Name,
    pub(crate) print: Name,
    pub(crate) sentinel: Name,
    pub(crate) iter_class: Name,
}

impl BuiltinNames {
    pub(crate) fn new(interner: &StringInterner) -> Self {
        Self {
            push: interner.intern("push"),
            pop: interner.intern("pop"),
            len: interner.intern("len"),
            map: interner.intern("map"),
            filter: interner.intern("filter"),
            collect: interner.intern("collect"),
            find: interner.intern("find"),
            split: interner.intern("split"),
            replace: interner.intern("replace"),
            starts_with: interner.intern("starts_with"),
            ends_with: interner.intern("ends_with"),
            as_num: interner.intern("as_num"),
            script: interner.intern("script"),
            print: interner.intern("print"),
            sentinel: interner.intern("Sentinel"),
            iter_class: interner.intern("Iter"),
        }
    }
}
