// This file is part of cow-element-list.
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `serde` support for [`Element`](crate::Element) and [`List`](crate::List).
//!
//! - **Serialize**: an element as the sequence of its payload bytes; a list
//!   as the sequence of its elements, head to tail. Cursor and refcount are
//!   not part of the encoding.
//! - **Deserialize**: element kinds are only known at runtime, so decoding is
//!   seeded with the metadata to build elements from. Use [`ElementSeed`] and
//!   [`ListSeed`] with [`serde::de::DeserializeSeed`].
//!
//! Payload validation is the same as [`Element::new`](crate::Element::new):
//! an empty or short payload is rejected with a custom error.

// Crate imports
use crate::{element::Element, list::List, meta::ElementMeta};

// Alloc imports
use alloc::vec::Vec;

// Core imports
use core::fmt;

// External imports - serde
use serde::{Deserializer, Serialize, Serializer, de};

impl Serialize for Element {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.collect_seq(self.data())
    }
}

impl Serialize for List {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeSeq;
        let mut seq = s.serialize_seq(Some(self.len()))?;
        for element in self.chain.elements() {
            seq.serialize_element(element)?;
        }
        seq.end()
    }
}

/// Decodes one [`Element`] of the given kind.
#[derive(Clone, Copy, Debug)]
pub struct ElementSeed<'m>(pub &'m ElementMeta);

impl<'de> de::DeserializeSeed<'de> for ElementSeed<'_> {
    type Value = Element;

    fn deserialize<D: Deserializer<'de>>(self, d: D) -> Result<Self::Value, D::Error> {
        let bytes: Vec<u8> = de::Deserialize::deserialize(d)?;
        Element::new(self.0, &bytes).map_err(|e| {
            de::Error::custom(format_args!(
                "invalid payload for element kind {}: {e}",
                self.0.id()
            ))
        })
    }
}

/// Decodes a fresh, unpositioned [`List`] whose elements all have the given
/// kind.
#[derive(Clone, Copy, Debug)]
pub struct ListSeed<'m>(pub &'m ElementMeta);

struct ListVisitor<'m>(&'m ElementMeta);

impl<'de> de::Visitor<'de> for ListVisitor<'_> {
    type Value = List;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "sequence of {}-byte payloads of element kind {}",
            self.0.size(),
            self.0.id()
        )
    }

    fn visit_seq<A: de::SeqAccess<'de>>(self, mut a: A) -> Result<Self::Value, A::Error> {
        let mut out = List::new();
        while let Some(element) = a.next_element_seed(ElementSeed(self.0))? {
            out.push(&element).map_err(de::Error::custom)?;
        }
        Ok(out)
    }
}

impl<'de> de::DeserializeSeed<'de> for ListSeed<'_> {
    type Value = List;

    fn deserialize<D: Deserializer<'de>>(self, d: D) -> Result<Self::Value, D::Error> {
        d.deserialize_seq(ListVisitor(self.0))
    }
}
