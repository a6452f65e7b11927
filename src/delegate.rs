// This file is part of cow-element-list.
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-kind callbacks: dispose, equals, less-than and greater-than.
//!
//! A [`DelegateSet`] is built once per element kind and handed out as an
//! `Rc<DelegateSet>`. Every [`ElementMeta`](crate::ElementMeta) that refers to
//! it holds one strong reference, so retaining is `Rc::clone` and releasing is
//! dropping the `Rc`.

// Crate imports
use crate::error::Error;

// Alloc imports
use alloc::rc::Rc;

// Core imports
use core::fmt;

/// Releases whatever a payload refers to. Called exactly once per element,
/// right before its bytes are freed.
pub type DisposeFn = fn(&mut [u8]);

/// Compares two payloads of the same kind.
///
/// Errors returned here are propagated unchanged to the caller of the
/// comparison.
pub type CompareFn = fn(&[u8], &[u8]) -> Result<bool, Error>;

/// Callbacks shared by every element of one kind.
///
/// Three shapes are accepted:
///
/// - dispose only;
/// - dispose and equality;
/// - dispose, equality, less-than and greater-than.
///
/// A missing comparator answers with [`Error::State`].
#[derive(Clone, Copy)]
pub struct DelegateSet {
    dispose: DisposeFn,
    eq: Option<CompareFn>,
    lt: Option<CompareFn>,
    gt: Option<CompareFn>,
}

impl DelegateSet {
    /// Builds a shared delegate set.
    ///
    /// Returns [`Error::NullPointer`] if `dispose` is absent, if only one of
    /// `lt`/`gt` is given, or if the ordering pair is given without `eq`.
    pub fn new(
        dispose: Option<DisposeFn>,
        eq: Option<CompareFn>,
        lt: Option<CompareFn>,
        gt: Option<CompareFn>,
    ) -> Result<Rc<Self>, Error> {
        let dispose = dispose.ok_or(Error::NullPointer)?;
        match (eq, lt, gt) {
            (_, None, None) | (Some(_), Some(_), Some(_)) => {}
            _ => return Err(Error::NullPointer),
        }
        Ok(Rc::new(Self {
            dispose,
            eq,
            lt,
            gt,
        }))
    }

    /// Returns `true` if the kind supports equality.
    #[inline]
    pub fn has_eq(&self) -> bool {
        self.eq.is_some()
    }

    /// Returns `true` if the kind supports less-than and greater-than.
    #[inline]
    pub fn has_ordering(&self) -> bool {
        self.lt.is_some() && self.gt.is_some()
    }

    /// Runs the dispose callback on `payload`.
    #[inline]
    pub fn dispose(&self, payload: &mut [u8]) {
        (self.dispose)(payload)
    }

    /// Forwards to the equality callback.
    pub fn equals(&self, a: &[u8], b: &[u8]) -> Result<bool, Error> {
        Self::invoke(self.eq, a, b)
    }

    /// Forwards to the less-than callback.
    pub fn less(&self, a: &[u8], b: &[u8]) -> Result<bool, Error> {
        Self::invoke(self.lt, a, b)
    }

    /// Forwards to the greater-than callback.
    pub fn greater(&self, a: &[u8], b: &[u8]) -> Result<bool, Error> {
        Self::invoke(self.gt, a, b)
    }

    fn invoke(f: Option<CompareFn>, a: &[u8], b: &[u8]) -> Result<bool, Error> {
        match f {
            Some(f) => f(a, b),
            None => Err(Error::State),
        }
    }
}

impl fmt::Debug for DelegateSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DelegateSet")
            .field("eq", &self.has_eq())
            .field("ordering", &self.has_ordering())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    // Imports
    use super::DelegateSet;
    use crate::Error;
    use alloc::rc::Rc;
    use std::cell::Cell;

    std::thread_local! {
        static DISPOSED: Cell<usize> = const { Cell::new(0) };
    }

    fn count_dispose(_: &mut [u8]) {
        DISPOSED.with(|c| c.set(c.get() + 1));
    }

    fn bytes_eq(a: &[u8], b: &[u8]) -> Result<bool, Error> {
        Ok(a == b)
    }

    fn bytes_lt(a: &[u8], b: &[u8]) -> Result<bool, Error> {
        Ok(a < b)
    }

    fn bytes_gt(a: &[u8], b: &[u8]) -> Result<bool, Error> {
        Ok(a > b)
    }

    fn failing_eq(_: &[u8], _: &[u8]) -> Result<bool, Error> {
        Err(Error::Range)
    }

    #[test]
    fn test_dispose_is_required() {
        let err = DelegateSet::new(None, Some(bytes_eq), None, None).unwrap_err();
        assert_eq!(err, Error::NullPointer);
    }

    #[test]
    fn test_ordering_pair_needs_eq_and_both_halves() {
        assert_eq!(
            DelegateSet::new(Some(count_dispose), Some(bytes_eq), Some(bytes_lt), None)
                .unwrap_err(),
            Error::NullPointer
        );
        assert_eq!(
            DelegateSet::new(Some(count_dispose), None, Some(bytes_lt), Some(bytes_gt))
                .unwrap_err(),
            Error::NullPointer
        );
    }

    #[test]
    fn test_forwarding_and_unsupported() {
        let only_eq = DelegateSet::new(Some(count_dispose), Some(bytes_eq), None, None).unwrap();
        assert!(only_eq.has_eq());
        assert!(!only_eq.has_ordering());
        assert_eq!(only_eq.equals(&[1, 2], &[1, 2]), Ok(true));
        assert_eq!(only_eq.less(&[1], &[2]), Err(Error::State));
        assert_eq!(only_eq.greater(&[1], &[2]), Err(Error::State));

        let full = DelegateSet::new(
            Some(count_dispose),
            Some(bytes_eq),
            Some(bytes_lt),
            Some(bytes_gt),
        )
        .unwrap();
        assert_eq!(full.less(&[1], &[2]), Ok(true));
        assert_eq!(full.greater(&[1], &[2]), Ok(false));
    }

    #[test]
    fn test_callback_errors_propagate() {
        let ds = DelegateSet::new(Some(count_dispose), Some(failing_eq), None, None).unwrap();
        assert_eq!(ds.equals(&[0], &[0]), Err(Error::Range));
    }

    #[test]
    fn test_dispose_invokes_callback() {
        let ds = DelegateSet::new(Some(count_dispose), None, None, None).unwrap();
        let before = DISPOSED.with(Cell::get);
        ds.dispose(&mut [0u8; 4]);
        assert_eq!(DISPOSED.with(Cell::get), before + 1);
    }

    #[test]
    fn test_retain_release_tracks_strong_count() {
        let ds = DelegateSet::new(Some(count_dispose), None, None, None).unwrap();
        let alias = Rc::clone(&ds);
        assert_eq!(Rc::strong_count(&ds), 2);
        drop(alias);
        assert_eq!(Rc::strong_count(&ds), 1);
    }
}
