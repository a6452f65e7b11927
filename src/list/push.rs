// This file is part of cow-element-list.
// SPDX-License-Identifier: MIT OR Apache-2.0

// Crate imports
use crate::{element::Element, error::Error, list::List};

impl List {
    /// Appends a deep copy of `element` at the tail.
    ///
    /// - Returns [`Error::State`] if the list is non-empty and `element` has a
    ///   different kind id. The list is left untouched and is not forked.
    /// - Returns [`Error::Heap`] if the copy or the node cannot be allocated.
    ///
    /// Forks first if the chain is shared. The cursor does not move.
    pub fn push(&mut self, element: &Element) -> Result<(), Error> {
        if let Some(kind) = self.kind() {
            if kind != element.id() {
                tracing::debug!(
                    list = kind,
                    element = element.id(),
                    "push rejected: element kind differs from list"
                );
                return Err(Error::State);
            }
        }
        let copy = element.try_clone()?;
        self.fork()?.append(copy)?;
        Ok(())
    }
}
