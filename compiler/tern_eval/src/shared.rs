//! Single-threaded shared mutable storage.
//!
//! Environments and vector contents are aliased by every closure, iterator
//! and value that refers to them, and writes through one alias must be seen
//! by all others. `Shared<T>` is the one place that pairs `Rc` with
//! `RefCell` for that purpose.

use std::cell::{BorrowError, Ref, RefCell, RefMut};
use std::fmt;
use std::rc::{Rc, Weak};

#[repr(transparent)]
pub struct Shared<T>(Rc<RefCell<T>>);

impl<T> Shared<T> {
    #[inline]
    pub fn new(value: T) -> Self {
        Shared(Rc::new(RefCell::new(value)))
    }

    #[inline]
    pub fn borrow(&self) -> Ref<'_, T> {
        self.0.borrow()
    }

    #[inline]
    pub fn borrow_mut(&self) -> RefMut<'_, T> {
        self.0.borrow_mut()
    }

    #[inline]
    pub fn try_borrow(&self) -> Result<Ref<'_, T>, BorrowError> {
        self.0.try_borrow()
    }

    /// Identity comparison.
    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    #[inline]
    pub(crate) fn downgrade(&self) -> Weak<RefCell<T>> {
        Rc::downgrade(&self.0)
    }

    #[inline]
    pub(crate) fn as_ptr(&self) -> *const RefCell<T> {
        Rc::as_ptr(&self.0)
    }
}

impl<T: Clone> Shared<T> {
    /// Copy of the current contents.
    pub fn get(&self) -> T {
        self.0.borrow().clone()
    }
}

impl<T> Clone for Shared<T> {
    #[inline]
    fn clone(&self) -> Self {
        Shared(Rc::clone(&self.0))
    }
}

impl<T: fmt::Debug> fmt::Debug for Shared<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.try_borrow() {
            Ok(inner) => f.debug_tuple("Shared").field(&*inner).finish(),
            Err(_) => f.write_str("Shared(<borrowed>)"),
        }
    }
}

impl<T: Default> Default for Shared<T> {
    fn default() -> Self {
        Shared::new(T::default())
    }
}
