// This file is part of cow-element-list.
// SPDX-License-Identifier: MIT OR Apache-2.0

// Crate imports
use crate::{element::Element, error::Error, list::List};

impl List {
    /// Replaces the element under the cursor with a deep copy of `element`.
    ///
    /// - Returns [`Error::State`] if the list is unpositioned or `element`
    ///   has a different kind id than the element it would replace. Nothing
    ///   is forked in that case.
    /// - Returns [`Error::Heap`] if the copy cannot be allocated.
    ///
    /// Forks first if shared. The replaced element is disposed.
    pub fn set_elem(&mut self, element: &Element) -> Result<(), Error> {
        let current = self.current()?;
        if current.id() != element.id() {
            tracing::debug!(
                list = current.id(),
                element = element.id(),
                "set_elem rejected: element kind differs from list"
            );
            return Err(Error::State);
        }
        let copy = element.try_clone()?;
        let chain = self.fork()?;
        let cursor = chain.cursor.ok_or(Error::State)?;
        let node = chain.node_mut(cursor).ok_or(Error::State)?;
        node.element = copy;
        Ok(())
    }
}
