// This file is part of cow-element-list.
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # `cow-element-list`
//!
//! A `no_std` + `alloc` runtime for **homogeneous collections of element
//! kinds chosen at runtime**: type-erased elements that share their metadata,
//! stored in a reference-counted, copy-on-write, singly-linked list.
//!
//! ## Building blocks
//!
//! - [`DelegateSet`]: the dispose / equals / less-than / greater-than
//!   callbacks for one element kind, shared through `Rc`.
//! - [`ElementMeta`]: kind id, payload size and an optional delegate set.
//!   Cloning a handle aliases the metadata; it is freed with its last handle.
//! - [`Element`]: `meta.size()` owned payload bytes plus a metadata alias.
//!   Copies duplicate the bytes; dropping disposes them exactly once.
//! - [`List`]: a chain of elements of one kind with a single cursor. Cloning
//!   a list is `O(1)`; the first mutation through a shared handle forks a
//!   private copy.
//!
//! ## Errors
//!
//! Every fallible operation returns [`Error`]. Preconditions are checked
//! before anything is forked or allocated, so a rejected call leaves every
//! handle as it was. Teardown is `Drop` and never fails.
//!
//! ## Features
//!
//! - `serde`
//!   - Enables `Serialize` for [`Element`] and [`List`].
//!   - Adds `ElementSeed` / `ListSeed`, which decode with the metadata the
//!     caller supplies.
//!
//! ## Logging
//!
//! Forks and rejected operations emit `tracing` events (`trace` and `debug`
//! levels). The crate never installs a subscriber.
//!
//! ## Threading
//!
//! Handles are `Rc`-based and therefore neither `Send` nor `Sync`.
//!
//! ## Example
//!
//! ```rust
//! use cow_element_list::{Element, ElementMeta, Error, List};
//!
//! fn u16_eq(a: &[u8], b: &[u8]) -> Result<bool, Error> {
//!     Ok(a == b)
//! }
//! fn forget(_: &mut [u8]) {}
//!
//! let meta = ElementMeta::with_eq(1, 2, Some(forget), Some(u16_eq)).unwrap();
//! let mut list = List::new();
//! list.push(&Element::new(&meta, &7u16.to_le_bytes()).unwrap()).unwrap();
//! list.push(&Element::new(&meta, &9u16.to_le_bytes()).unwrap()).unwrap();
//!
//! let snapshot = list.clone();
//! list.end().unwrap();
//! list.set_elem(&Element::new(&meta, &1u16.to_le_bytes()).unwrap()).unwrap();
//!
//! assert_eq!(list.elem().unwrap().data(), &1u16.to_le_bytes());
//! assert_eq!(snapshot.position(), None);
//! assert_eq!(snapshot.len(), 2);
//! ```

#![forbid(unsafe_code)]
#![cfg_attr(not(test), no_std)]

extern crate alloc;

// Modules
mod delegate;
mod element;
mod error;
mod list;
mod meta;
#[cfg(feature = "serde")]
mod serde;

// Public exports (crate API surface)
pub use delegate::{CompareFn, DelegateSet, DisposeFn};
pub use element::Element;
pub use error::Error;
pub use list::List;
pub use meta::ElementMeta;
#[cfg(feature = "serde")]
pub use crate::serde::{ElementSeed, ListSeed};
