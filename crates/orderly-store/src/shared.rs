//! Ownership of a store's backing data.
//!
//! A store either owns its [`Array`] outright or is an aliased view over a
//! [`SharedArray`] held by the caller. Both modes hand out the same guard
//! types, so operations are written once against `&Array` / `&mut Array`.
//!
//! ```text
//!   Store::from_array(a)        Store::alias(&shared)
//!         │                            │
//!   Backing::Owned(Array)       Backing::Aliased(SharedArray) ──┐
//!                                                               │ Rc<RefCell<Array>>
//!                                      caller's SharedArray ────┘
//! ```

use std::cell::{Ref, RefCell, RefMut};
use std::fmt;
use std::ops::{Deref, DerefMut};
use std::rc::Rc;

use orderly_core::Array;
use serde::{Deserialize, Serialize};

/// Caller-owned backing data that aliased stores view.
///
/// Cloning a `SharedArray` clones the handle, not the data. The data lives
/// until the last handle (including aliased stores) is dropped.
pub struct SharedArray<V> {
    inner: Rc<RefCell<Array<V>>>,
}

impl<V> SharedArray<V> {
    /// Wrap an array for sharing.
    pub fn new(array: Array<V>) -> Self {
        Self {
            inner: Rc::new(RefCell::new(array)),
        }
    }

    /// Immutably borrow the data.
    ///
    /// # Panics
    ///
    /// Panics if the data is currently mutably borrowed.
    pub fn borrow(&self) -> Ref<'_, Array<V>> {
        self.inner.borrow()
    }

    /// Mutably borrow the data.
    ///
    /// # Panics
    ///
    /// Panics if the data is currently borrowed.
    pub fn borrow_mut(&self) -> RefMut<'_, Array<V>> {
        self.inner.borrow_mut()
    }

    /// Number of live handles, aliased stores included.
    pub fn holders(&self) -> usize {
        Rc::strong_count(&self.inner)
    }

    /// Whether two handles share the same data.
    pub fn ptr_eq(&self, other: &SharedArray<V>) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<V: Clone> SharedArray<V> {
    /// Copy of the current data.
    pub fn snapshot(&self) -> Array<V> {
        self.inner.borrow().clone()
    }
}

impl<V> Clone for SharedArray<V> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<V> Default for SharedArray<V> {
    fn default() -> Self {
        Self::new(Array::new())
    }
}

impl<V> From<Array<V>> for SharedArray<V> {
    fn from(array: Array<V>) -> Self {
        Self::new(array)
    }
}

impl<V: fmt::Debug> fmt::Debug for SharedArray<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SharedArray").field(&*self.inner.borrow()).finish()
    }
}

/// Sharing mode of a store's backing data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ownership {
    /// The store exclusively owns its data.
    Owned,
    /// The store is a view over a caller-owned [`SharedArray`].
    Aliased,
}

pub(crate) enum Backing<V> {
    Owned(Array<V>),
    Aliased(SharedArray<V>),
}

impl<V> Backing<V> {
    pub(crate) fn ownership(&self) -> Ownership {
        match self {
            Backing::Owned(_) => Ownership::Owned,
            Backing::Aliased(_) => Ownership::Aliased,
        }
    }

    pub(crate) fn read(&self) -> ArrayRef<'_, V> {
        match self {
            Backing::Owned(array) => ArrayRef(RefInner::Owned(array)),
            Backing::Aliased(shared) => ArrayRef(RefInner::Aliased(shared.borrow())),
        }
    }

    pub(crate) fn write(&mut self) -> ArrayMut<'_, V> {
        match self {
            Backing::Owned(array) => ArrayMut::owned(array),
            Backing::Aliased(shared) => ArrayMut::aliased(shared.borrow_mut()),
        }
    }
}

impl<V: Clone> Clone for Backing<V> {
    /// Owned data is deep-copied; an aliased handle is shared.
    fn clone(&self) -> Self {
        match self {
            Backing::Owned(array) => Backing::Owned(array.clone()),
            Backing::Aliased(shared) => Backing::Aliased(shared.clone()),
        }
    }
}

/// Read guard over a store's backing data.
pub struct ArrayRef<'a, V>(RefInner<'a, V>);

enum RefInner<'a, V> {
    Owned(&'a Array<V>),
    Aliased(Ref<'a, Array<V>>),
}

impl<V> Deref for ArrayRef<'_, V> {
    type Target = Array<V>;

    fn deref(&self) -> &Array<V> {
        match &self.0 {
            RefInner::Owned(array) => array,
            RefInner::Aliased(guard) => guard,
        }
    }
}

/// Write guard over a store's (or any unwrapped) backing data.
pub struct ArrayMut<'a, V>(MutInner<'a, V>);

enum MutInner<'a, V> {
    Owned(&'a mut Array<V>),
    Aliased(RefMut<'a, Array<V>>),
}

impl<'a, V> ArrayMut<'a, V> {
    pub(crate) fn owned(array: &'a mut Array<V>) -> Self {
        ArrayMut(MutInner::Owned(array))
    }

    pub(crate) fn aliased(guard: RefMut<'a, Array<V>>) -> Self {
        ArrayMut(MutInner::Aliased(guard))
    }
}

impl<V> Deref for ArrayMut<'_, V> {
    type Target = Array<V>;

    fn deref(&self) -> &Array<V> {
        match &self.0 {
            MutInner::Owned(array) => array,
            MutInner::Aliased(guard) => guard,
        }
    }
}

impl<V> DerefMut for ArrayMut<'_, V> {
    fn deref_mut(&mut self) -> &mut Array<V> {
        match &mut self.0 {
            MutInner::Owned(array) => array,
            MutInner::Aliased(guard) => guard,
        }
    }
}
