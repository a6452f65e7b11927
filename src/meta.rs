// This file is part of cow-element-list.
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Element metadata: kind id, payload size and shared delegates.
//!
//! [`ElementMeta`] is a reference-counted handle. Cloning it (or
//! [`ElementMeta::copy_into`]) aliases the same metadata and bumps the count;
//! dropping a handle releases one reference. The delegate set, if any, is
//! released together with the last handle.

// Crate imports
use crate::{
    delegate::{CompareFn, DelegateSet, DisposeFn},
    error::Error,
};

// Alloc imports
use alloc::rc::Rc;

// Core imports
use core::fmt;

struct MetaInner {
    id: i64,
    size: usize,
    delegates: Option<Rc<DelegateSet>>,
}

/// Shared description of one element kind.
///
/// Every [`Element`](crate::Element) built from a metadata handle keeps an
/// alias of it, so thousands of elements of one kind share a single
/// allocation.
///
/// # Constructors
///
/// | constructor                        | required delegates        |
/// |------------------------------------|---------------------------|
/// | [`new`](Self::new)                 | none                      |
/// | [`with_dispose`](Self::with_dispose)   | dispose               |
/// | [`with_eq`](Self::with_eq)         | dispose, eq               |
/// | [`with_ordering`](Self::with_ordering) | dispose, eq, lt, gt   |
/// | [`with_delegates`](Self::with_delegates) | an existing set     |
///
/// All of them return [`Error::NullPointer`] for a missing required delegate
/// and then [`Error::Range`] for `size == 0`.
///
/// `id` is not checked for uniqueness. Two unrelated kinds may share an id,
/// and lists treat them as the same kind.
#[derive(Clone)]
pub struct ElementMeta {
    inner: Rc<MetaInner>,
}

impl ElementMeta {
    /// Metadata with no delegates: elements are neither disposed nor comparable.
    pub fn new(id: i64, size: usize) -> Result<Self, Error> {
        Self::build(id, size, None)
    }

    /// Metadata whose elements are disposed with `dispose`.
    pub fn with_dispose(id: i64, size: usize, dispose: Option<DisposeFn>) -> Result<Self, Error> {
        let dispose = dispose.ok_or(Error::NullPointer)?;
        let delegates = DelegateSet::new(Some(dispose), None, None, None)?;
        Self::build(id, size, Some(delegates))
    }

    /// Metadata whose elements are disposed and support equality.
    pub fn with_eq(
        id: i64,
        size: usize,
        dispose: Option<DisposeFn>,
        eq: Option<CompareFn>,
    ) -> Result<Self, Error> {
        let (dispose, eq) = (
            dispose.ok_or(Error::NullPointer)?,
            eq.ok_or(Error::NullPointer)?,
        );
        let delegates = DelegateSet::new(Some(dispose), Some(eq), None, None)?;
        Self::build(id, size, Some(delegates))
    }

    /// Metadata whose elements are disposed, support equality and are ordered.
    pub fn with_ordering(
        id: i64,
        size: usize,
        dispose: Option<DisposeFn>,
        eq: Option<CompareFn>,
        lt: Option<CompareFn>,
        gt: Option<CompareFn>,
    ) -> Result<Self, Error> {
        if dispose.is_none() || eq.is_none() || lt.is_none() || gt.is_none() {
            return Err(Error::NullPointer);
        }
        let delegates = DelegateSet::new(dispose, eq, lt, gt)?;
        Self::build(id, size, Some(delegates))
    }

    /// Metadata sharing an already built delegate set.
    ///
    /// The set's strong count grows by one for as long as this metadata lives.
    pub fn with_delegates(
        id: i64,
        size: usize,
        delegates: Rc<DelegateSet>,
    ) -> Result<Self, Error> {
        Self::build(id, size, Some(delegates))
    }

    fn build(id: i64, size: usize, delegates: Option<Rc<DelegateSet>>) -> Result<Self, Error> {
        if size == 0 {
            return Err(Error::Range);
        }
        Ok(Self {
            inner: Rc::new(MetaInner {
                id,
                size,
                delegates,
            }),
        })
    }

    /// Aliases `self` into an empty slot.
    ///
    /// Returns [`Error::State`] if `dst` already holds metadata; copying never
    /// overwrites. On success `dst` compares equal to `self` and the refcount
    /// has grown by one.
    pub fn copy_into(&self, dst: &mut Option<Self>) -> Result<(), Error> {
        if dst.is_some() {
            return Err(Error::State);
        }
        *dst = Some(self.clone());
        Ok(())
    }

    /// Releases the handle held in `slot`, if any.
    ///
    /// An empty slot is a no-op.
    #[inline]
    pub fn free(slot: &mut Option<Self>) {
        slot.take();
    }

    /// The client-chosen kind id.
    #[inline]
    pub fn id(&self) -> i64 {
        self.inner.id
    }

    /// Payload size in bytes (always `> 0`).
    #[inline]
    pub fn size(&self) -> usize {
        self.inner.size
    }

    /// The shared delegate set, or `None` for bare metadata.
    #[inline]
    pub fn delegates(&self) -> Option<&Rc<DelegateSet>> {
        self.inner.delegates.as_ref()
    }

    /// Number of live handles to this metadata.
    #[inline]
    pub fn refcount(&self) -> usize {
        Rc::strong_count(&self.inner)
    }

    /// Returns `true` if both handles alias the same metadata.
    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    pub(crate) fn dispose(&self, payload: &mut [u8]) {
        if let Some(d) = &self.inner.delegates {
            d.dispose(payload);
        }
    }

    pub(crate) fn delegates_or_unsupported(&self) -> Result<&DelegateSet, Error> {
        self.inner.delegates.as_deref().ok_or(Error::State)
    }
}

impl PartialEq for ElementMeta {
    fn eq(&self, other: &Self) -> bool {
        let same_delegates = match (self.delegates(), other.delegates()) {
            (None, None) => true,
            (Some(a), Some(b)) => Rc::ptr_eq(a, b),
            _ => false,
        };
        self.id() == other.id() && self.size() == other.size() && same_delegates
    }
}
impl Eq for ElementMeta {}

impl fmt::Debug for ElementMeta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ElementMeta")
            .field("id", &self.id())
            .field("size", &self.size())
            .field("delegates", &self.delegates())
            .field("refcount", &self.refcount())
            .finish()
    }
}
