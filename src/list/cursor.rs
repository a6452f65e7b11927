// This file is part of cow-element-list.
// SPDX-License-Identifier: MIT OR Apache-2.0

// Crate imports
use crate::{element::Element, error::Error, list::List};

impl List {
    /// Moves the cursor to the head. Forks first if shared.
    ///
    /// An empty list stays unpositioned.
    pub fn start(&mut self) -> Result<(), Error> {
        let chain = self.fork()?;
        chain.cursor = chain.head;
        Ok(())
    }

    /// Moves the cursor one element towards the tail. Forks first if shared.
    ///
    /// Returns [`Error::State`] if the list is unpositioned or the cursor is
    /// already on the tail; the cursor is left where it was and nothing is
    /// forked.
    pub fn next(&mut self) -> Result<(), Error> {
        let has_next = self
            .chain
            .cursor
            .and_then(|c| self.chain.next_of(c))
            .is_some();
        if !has_next {
            tracing::debug!(position = ?self.position(), "cursor cannot advance");
            return Err(Error::State);
        }
        let chain = self.fork()?;
        let next = chain.cursor.and_then(|c| chain.next_of(c));
        chain.cursor = next;
        Ok(())
    }

    /// Moves the cursor to the tail. Forks first if shared.
    ///
    /// An empty list stays unpositioned.
    pub fn end(&mut self) -> Result<(), Error> {
        let chain = self.fork()?;
        chain.cursor = chain.tail;
        Ok(())
    }

    /// Borrows the element under the cursor.
    ///
    /// Returns [`Error::State`] if the list is unpositioned.
    pub fn current(&self) -> Result<&Element, Error> {
        self.chain
            .cursor
            .and_then(|c| self.chain.node(c))
            .map(|n| &n.element)
            .ok_or(Error::State)
    }

    /// Returns a deep copy of the element under the cursor. Never forks.
    ///
    /// Returns [`Error::State`] if the list is unpositioned.
    pub fn elem(&self) -> Result<Element, Error> {
        self.current()?.try_clone()
    }
}
