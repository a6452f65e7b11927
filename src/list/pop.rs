// This file is part of cow-element-list.
// SPDX-License-Identifier: MIT OR Apache-2.0

// Crate imports
use crate::{element::Element, error::Error, list::List};

impl List {
    /// Removes the tail element and returns it, or `None` if empty.
    ///
    /// Forks first if the chain is shared. The new tail is found by walking
    /// from the head, so this is `O(len)`. Afterwards the cursor sits on the
    /// head (unpositioned once the list is empty).
    ///
    /// The removed element is disposed when the returned value is dropped.
    pub fn pop(&mut self) -> Result<Option<Element>, Error> {
        let chain = self.fork()?;
        let popped = chain.unlink_tail();
        if popped.is_some() {
            chain.cursor = chain.head;
        }
        Ok(popped)
    }
}
