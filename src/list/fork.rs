// This file is part of cow-element-list.
// SPDX-License-Identifier: MIT OR Apache-2.0

// Crate imports
use crate::{
    error::Error,
    list::{Chain, List},
};

// Alloc imports
use alloc::rc::Rc;

impl List {
    /// Aliases `self` into `dst` in `O(1)`, releasing whatever `dst` held.
    ///
    /// Equivalent to `*dst = Some(self.clone())`.
    #[inline]
    pub fn copy_into(&self, dst: &mut Option<Self>) {
        *dst = Some(self.clone());
    }

    /// Makes the chain private to this handle and returns it for mutation.
    ///
    /// An unshared chain is returned as is. A shared one is rebuilt element
    /// by element; the new chain replaces this handle's share of the old one
    /// and keeps the cursor at the same offset. On error the handle still
    /// points at the shared chain.
    pub(crate) fn fork(&mut self) -> Result<&mut Chain, Error> {
        if Rc::strong_count(&self.chain) > 1 {
            tracing::trace!(
                len = self.chain.len,
                refcount = Rc::strong_count(&self.chain),
                "forking shared list"
            );
            let forked = self.chain.replay()?;
            self.chain = Rc::new(forked);
        }
        Rc::get_mut(&mut self.chain).ok_or(Error::State)
    }
}

impl Chain {
    /// Deep-copies every element, in order, into a fresh chain.
    fn replay(&self) -> Result<Self, Error> {
        let offset = self.cursor.and_then(|c| self.offset_of(c));
        let mut out = Self::default();
        out.reserve(self.len)?;
        for element in self.elements() {
            out.append(element.try_clone()?)?;
        }
        out.cursor = offset.and_then(|o| out.nth(o));
        Ok(out)
    }
}
