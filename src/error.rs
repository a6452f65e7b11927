// This file is part of cow-element-list.
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for elements, metadata and lists.
//!
//! Every fallible operation in the crate returns one of these kinds.
//! They are `Copy` and implement `core::error::Error`, so client comparison
//! delegates can return them as well.

// Alloc imports
use alloc::collections::TryReserveError;

// Core imports
use core::{error::Error as CoreError, fmt};

/// Errors returned by operations on [`Element`](crate::Element),
/// [`ElementMeta`](crate::ElementMeta) and [`List`](crate::List).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// A required argument was absent: a delegate passed as `None`, or an
    /// empty initial payload.
    NullPointer,
    /// A numeric argument was out of range.
    ///
    /// Used for a zero payload size and for payloads shorter than the
    /// element size.
    Range,
    /// The operation is not allowed in the current state.
    ///
    /// Covers copying into an occupied slot, mixing element kinds in one list,
    /// dereferencing or advancing an unpositioned cursor, and asking a kind
    /// for a comparison it does not support.
    State,
    /// Allocation failed.
    Heap,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NullPointer => f.write_str("required argument is absent"),
            Self::Range => f.write_str("value out of range"),
            Self::State => f.write_str("operation not allowed in current state"),
            Self::Heap => f.write_str("allocation failed"),
        }
    }
}

impl CoreError for Error {}

impl From<TryReserveError> for Error {
    fn from(_: TryReserveError) -> Self {
        Self::Heap
    }
}
