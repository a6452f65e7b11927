// This file is part of cow-element-list.
// SPDX-License-Identifier: MIT OR Apache-2.0

//! A single payload cell tied to shared [`ElementMeta`].
//!
//! An [`Element`] owns exactly `meta.size()` bytes. Copies always duplicate
//! the bytes and only alias the metadata, so every element can be mutated
//! independently while its kind stays shared.

// Crate imports
use crate::{delegate::DelegateSet, error::Error, meta::ElementMeta};

// Alloc imports
use alloc::vec::Vec;

// Core imports
use core::fmt;

/// One payload cell plus a retained reference to its metadata.
///
/// Dropping an element runs the kind's dispose delegate on the payload (if
/// the kind has one) and then releases the metadata reference.
#[derive(Clone)]
pub struct Element {
    meta: ElementMeta,
    payload: Vec<u8>,
}

impl Element {
    /// Creates an element of kind `meta` from the first `meta.size()` bytes of
    /// `initial`.
    ///
    /// - Returns [`Error::NullPointer`] if `initial` is empty.
    /// - Returns [`Error::Range`] if `initial` is shorter than `meta.size()`.
    /// - Returns [`Error::Heap`] if the payload cannot be allocated.
    ///
    /// Bytes past `meta.size()` are ignored.
    pub fn new(meta: &ElementMeta, initial: &[u8]) -> Result<Self, Error> {
        let payload = alloc_payload(meta.size(), initial)?;
        Ok(Self {
            meta: meta.clone(),
            payload,
        })
    }

    /// Deep-copies the payload and aliases the metadata.
    pub fn try_clone(&self) -> Result<Self, Error> {
        Self::new(&self.meta, &self.payload)
    }

    /// Writes a deep copy of `self` into `dst`.
    ///
    /// Whatever `dst` held before is dropped, which disposes it.
    pub fn copy_into(&self, dst: &mut Option<Self>) -> Result<(), Error> {
        *dst = Some(self.try_clone()?);
        Ok(())
    }

    /// The kind id, read from the metadata.
    #[inline]
    pub fn id(&self) -> i64 {
        self.meta.id()
    }

    /// The payload size, read from the metadata.
    #[inline]
    pub fn size(&self) -> usize {
        self.meta.size()
    }

    /// The payload bytes; always exactly [`size`](Self::size) long.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.payload
    }

    /// The shared metadata.
    #[inline]
    pub fn meta(&self) -> &ElementMeta {
        &self.meta
    }

    /// Overwrites the payload with the first `size()` bytes of `data`.
    ///
    /// Validation matches [`Element::new`]. The old bytes are not disposed and
    /// the metadata is untouched.
    pub fn set_data(&mut self, data: &[u8]) -> Result<(), Error> {
        let size = check_payload(self.size(), data)?;
        self.payload.copy_from_slice(&data[..size]);
        Ok(())
    }

    /// `self < rhs` according to the kind's less-than delegate.
    pub fn is_lt(&self, rhs: &Self) -> Result<bool, Error> {
        self.same_kind(rhs)?.less(&self.payload, &rhs.payload)
    }

    /// `self == rhs` according to the kind's equality delegate.
    pub fn is_eq(&self, rhs: &Self) -> Result<bool, Error> {
        self.same_kind(rhs)?.equals(&self.payload, &rhs.payload)
    }

    /// `self > rhs` according to the kind's greater-than delegate.
    pub fn is_gt(&self, rhs: &Self) -> Result<bool, Error> {
        self.same_kind(rhs)?.greater(&self.payload, &rhs.payload)
    }

    fn same_kind(&self, rhs: &Self) -> Result<&DelegateSet, Error> {
        if self.id() != rhs.id() {
            tracing::debug!(
                lhs = self.id(),
                rhs = rhs.id(),
                "comparing elements of different kinds"
            );
            return Err(Error::State);
        }
        self.meta.delegates_or_unsupported()
    }
}

fn check_payload(size: usize, src: &[u8]) -> Result<usize, Error> {
    if src.is_empty() {
        return Err(Error::NullPointer);
    }
    if src.len() < size {
        return Err(Error::Range);
    }
    Ok(size)
}

fn alloc_payload(size: usize, src: &[u8]) -> Result<Vec<u8>, Error> {
    let size = check_payload(size, src)?;
    let mut buf = Vec::new();
    buf.try_reserve_exact(size)?;
    buf.extend_from_slice(&src[..size]);
    Ok(buf)
}

impl Drop for Element {
    fn drop(&mut self) {
        self.meta.dispose(&mut self.payload);
    }
}

impl fmt::Debug for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Element")
            .field("id", &self.id())
            .field("data", &self.data())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    // Imports
    use super::Element;
    use crate::{ElementMeta, Error};
    use alloc::format;
    use std::cell::Cell;

    std::thread_local! {
        static DISPOSED: Cell<usize> = const { Cell::new(0) };
    }

    fn count_dispose(_: &mut [u8]) {
        DISPOSED.with(|c| c.set(c.get() + 1));
    }

    fn disposed() -> usize {
        DISPOSED.with(Cell::get)
    }

    fn u32_eq(a: &[u8], b: &[u8]) -> Result<bool, Error> {
        Ok(a == b)
    }

    fn u32_lt(a: &[u8], b: &[u8]) -> Result<bool, Error> {
        Ok(read_u32(a)? < read_u32(b)?)
    }

    fn u32_gt(a: &[u8], b: &[u8]) -> Result<bool, Error> {
        Ok(read_u32(a)? > read_u32(b)?)
    }

    fn read_u32(b: &[u8]) -> Result<u32, Error> {
        let bytes: [u8; 4] = b.try_into().map_err(|_| Error::Range)?;
        Ok(u32::from_le_bytes(bytes))
    }

    fn u32_meta(id: i64) -> ElementMeta {
        ElementMeta::with_ordering(
            id,
            4,
            Some(count_dispose),
            Some(u32_eq),
            Some(u32_lt),
            Some(u32_gt),
        )
        .unwrap()
    }

    #[test]
    fn test_new_copies_exactly_size_bytes() {
        let m = ElementMeta::new(1, 4).unwrap();
        let e = Element::new(&m, &[1, 2, 3, 4, 5, 6]).unwrap();
        assert_eq!(e.data(), &[1, 2, 3, 4]);
        assert_eq!(e.size(), 4);
        assert_eq!(e.id(), 1);
        assert_eq!(m.refcount(), 2);
        drop(e);
        assert_eq!(m.refcount(), 1);
    }

    #[test]
    fn test_new_rejects_absent_and_short_payloads() {
        let m = ElementMeta::new(1, 4).unwrap();
        assert_eq!(Element::new(&m, &[]).unwrap_err(), Error::NullPointer);
        assert_eq!(Element::new(&m, &[1, 2]).unwrap_err(), Error::Range);
        assert_eq!(m.refcount(), 1);
    }

    #[test]
    fn test_copy_is_deep_for_payload_and_shallow_for_meta() {
        let m = ElementMeta::new(1, 2).unwrap();
        let a = Element::new(&m, &[1, 2]).unwrap();
        let mut slot = None;
        a.copy_into(&mut slot).unwrap();
        let mut b = slot.unwrap();
        assert!(b.meta().ptr_eq(a.meta()));
        assert_eq!(m.refcount(), 3);

        b.set_data(&[9, 9]).unwrap();
        assert_eq!(a.data(), &[1, 2]);
        assert_eq!(b.data(), &[9, 9]);
        assert_eq!(b.set_data(&[1]), Err(Error::Range));
        assert_eq!(b.set_data(&[]), Err(Error::NullPointer));
        assert_eq!(b.data(), &[9, 9]);
    }

    #[test]
    fn test_drop_disposes_once_per_element() {
        let m = u32_meta(2);
        let before = disposed();
        let a = Element::new(&m, &7u32.to_le_bytes()).unwrap();
        let b = a.try_clone().unwrap();
        let c = a.clone();
        drop(a);
        drop(b);
        drop(c);
        assert_eq!(disposed(), before + 3);
    }

    #[test]
    fn test_copy_into_disposes_replaced_element() {
        let m = u32_meta(2);
        let a = Element::new(&m, &1u32.to_le_bytes()).unwrap();
        let mut slot = Some(Element::new(&m, &2u32.to_le_bytes()).unwrap());
        let before = disposed();
        a.copy_into(&mut slot).unwrap();
        assert_eq!(disposed(), before + 1);
        assert_eq!(slot.as_ref().unwrap().data(), a.data());
    }

    #[test]
    fn test_comparisons_delegate_to_meta() {
        let m = u32_meta(3);
        let one = Element::new(&m, &1u32.to_le_bytes()).unwrap();
        let two = Element::new(&m, &2u32.to_le_bytes()).unwrap();
        assert_eq!(one.is_lt(&two), Ok(true));
        assert_eq!(one.is_gt(&two), Ok(false));
        assert_eq!(two.is_gt(&one), Ok(true));
        assert_eq!(one.is_eq(&one.clone()), Ok(true));
        assert_eq!(one.is_eq(&two), Ok(false));
    }

    #[test]
    fn test_comparing_different_kinds_is_state_error() {
        let one = Element::new(&u32_meta(3), &1u32.to_le_bytes()).unwrap();
        let other = Element::new(&u32_meta(4), &1u32.to_le_bytes()).unwrap();
        assert_eq!(one.is_eq(&other), Err(Error::State));
        assert_eq!(one.is_lt(&other), Err(Error::State));
    }

    #[test]
    fn test_unsupported_comparison_is_state_error() {
        let bare = ElementMeta::new(1, 1).unwrap();
        let a = Element::new(&bare, &[1]).unwrap();
        assert_eq!(a.is_eq(&a.clone()), Err(Error::State));

        let eq_only = ElementMeta::with_eq(1, 1, Some(count_dispose), Some(u32_eq)).unwrap();
        let b = Element::new(&eq_only, &[1]).unwrap();
        assert_eq!(b.is_eq(&b.clone()), Ok(true));
        assert_eq!(b.is_lt(&b.clone()), Err(Error::State));
    }

    #[test]
    fn test_delegate_error_propagates() {
        // Payloads are 2 bytes, the ordering delegate expects 4.
        let m = ElementMeta::with_ordering(
            9,
            2,
            Some(count_dispose),
            Some(u32_eq),
            Some(u32_lt),
            Some(u32_gt),
        )
        .unwrap();
        let a = Element::new(&m, &[1, 2]).unwrap();
        assert_eq!(a.is_lt(&a.clone()), Err(Error::Range));
    }

    #[test]
    fn test_debug_shows_id_and_data() {
        let m = ElementMeta::new(5, 2).unwrap();
        let e = Element::new(&m, &[1, 2]).unwrap();
        let dbg = format!("{e:?}");
        assert!(dbg.contains("Element"));
        assert!(dbg.contains("id: 5"));
        assert!(dbg.contains("[1, 2]"));
    }
}
