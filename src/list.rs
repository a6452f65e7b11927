// This file is part of cow-element-list.
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The `List` type and its inherent API.
//!
//! A [`List`] is a handle to a shared, singly-linked chain of [`Element`]s.
//! Cloning the handle is `O(1)` and aliases the chain. The first mutation
//! through a handle whose chain is shared forks a private copy (see
//! [`List::push`] and friends), so other holders never observe the change.
//!
//! Nodes live in a slot arena and link to their successor by index. There are
//! no back-pointers, so removing the tail re-walks the chain from the head.

mod cursor;
mod fork;
mod pop;
mod push;
mod set;

// Crate imports
use crate::{element::Element, error::Error};

// Alloc imports
use alloc::{rc::Rc, vec::Vec};

// Core imports
use core::fmt;

pub(crate) type NodeId = usize;

pub(crate) struct Node {
    pub(crate) element: Element,
    pub(crate) next: Option<NodeId>,
}

/// The shared part of a list: nodes, links, cursor and length.
#[derive(Default)]
pub(crate) struct Chain {
    slots: Vec<Option<Node>>,
    vacant: Vec<NodeId>,
    pub(crate) head: Option<NodeId>,
    pub(crate) tail: Option<NodeId>,
    pub(crate) cursor: Option<NodeId>,
    pub(crate) len: usize,
}

/// A reference-counted, copy-on-write, singly-linked list of elements of one
/// kind, with a single movable cursor.
///
/// # States
///
/// - **Empty**: `len() == 0`, no position.
/// - **Unpositioned**: elements present but the cursor was never placed.
///   Freshly built lists stay here while you only `push`.
/// - **Positioned**: the cursor names one element; see [`position`].
///
/// # Sharing
///
/// `clone()` increments the refcount and aliases the chain. Every operation
/// that changes the chain or the cursor (`push`, `pop`, `set_elem`, `start`,
/// `next`, `end`) first checks the refcount: if the chain is shared, the
/// handle rebuilds a private copy element by element (an `O(n)` fork) and
/// keeps the cursor at the same offset. Read accessors never fork.
///
/// # Kind homogeneity
///
/// All elements carry the same metadata id. Pushing or storing an element of
/// another id fails with [`Error::State`](crate::Error::State). Only the id is
/// compared, not the metadata itself.
///
/// # Examples
///
/// ```rust
/// use cow_element_list::{Element, ElementMeta, List};
///
/// let meta = ElementMeta::new(5, 4).unwrap();
/// let mut a = List::new();
/// a.push(&Element::new(&meta, &[1, 2, 3, 4]).unwrap()).unwrap();
///
/// let mut b = a.clone();
/// assert_eq!(a.refcount(), 2);
///
/// b.push(&Element::new(&meta, &[5, 6, 7, 8]).unwrap()).unwrap();
/// assert_eq!(a.len(), 1);
/// assert_eq!(b.len(), 2);
/// assert_eq!(a.refcount(), 1);
/// ```
///
/// [`position`]: List::position
#[derive(Clone, Default)]
pub struct List {
    pub(crate) chain: Rc<Chain>,
}

impl List {
    /// Creates an empty, unshared list.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.chain.len
    }

    /// Returns `true` if `len() == 0`.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.chain.len == 0
    }

    /// Number of handles sharing this list's chain.
    #[inline]
    pub fn refcount(&self) -> usize {
        Rc::strong_count(&self.chain)
    }

    /// Returns `true` if the next mutation through this handle will fork.
    #[inline]
    pub fn is_shared(&self) -> bool {
        self.refcount() > 1
    }

    /// Returns `true` if both handles alias the same chain.
    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.chain, &other.chain)
    }

    /// Offset of the cursor from the head, or `None` when unpositioned.
    pub fn position(&self) -> Option<usize> {
        self.chain.cursor.and_then(|c| self.chain.offset_of(c))
    }

    /// The metadata id shared by every element, or `None` when empty.
    pub fn kind(&self) -> Option<i64> {
        self.chain.kind()
    }
}

impl Chain {
    #[inline]
    pub(crate) fn node(&self, id: NodeId) -> Option<&Node> {
        self.slots.get(id).and_then(Option::as_ref)
    }

    #[inline]
    pub(crate) fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.slots.get_mut(id).and_then(Option::as_mut)
    }

    #[inline]
    pub(crate) fn next_of(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).and_then(|n| n.next)
    }

    /// Walks node ids from the head.
    pub(crate) fn links(&self) -> Links<'_> {
        Links {
            chain: self,
            at: self.head,
        }
    }

    /// Walks elements from the head.
    pub(crate) fn elements(&self) -> impl Iterator<Item = &Element> + '_ {
        self.links().filter_map(move |id| self.node(id).map(|n| &n.element))
    }

    pub(crate) fn offset_of(&self, id: NodeId) -> Option<usize> {
        self.links().position(|n| n == id)
    }

    pub(crate) fn nth(&self, offset: usize) -> Option<NodeId> {
        self.links().nth(offset)
    }

    pub(crate) fn kind(&self) -> Option<i64> {
        self.head.and_then(|h| self.node(h)).map(|n| n.element.id())
    }

    /// Links `element` after the current tail. The cursor is untouched.
    pub(crate) fn append(&mut self, element: Element) -> Result<NodeId, Error> {
        let node = Node {
            element,
            next: None,
        };
        let id = match self.vacant.pop() {
            Some(id) => {
                self.slots[id] = Some(node);
                id
            }
            None => {
                self.slots.try_reserve(1)?;
                self.slots.push(Some(node));
                self.slots.len() - 1
            }
        };
        match self.tail.and_then(|t| self.node_mut(t)) {
            Some(tail) => tail.next = Some(id),
            None => self.head = Some(id),
        }
        self.tail = Some(id);
        self.len += 1;
        Ok(id)
    }

    /// Unlinks the tail and hands back its element.
    ///
    /// The predecessor is found by walking from the head.
    pub(crate) fn unlink_tail(&mut self) -> Option<Element> {
        let tail = self.tail?;
        let before = self.links().find(|&id| self.next_of(id) == Some(tail));
        let node = self.slots.get_mut(tail)?.take()?;
        match before.and_then(|b| self.node_mut(b)) {
            Some(prev) => prev.next = None,
            None => self.head = None,
        }
        self.tail = before;
        if self.cursor == Some(tail) {
            self.cursor = None;
        }
        self.len -= 1;
        self.vacant.push(tail);
        Some(node.element)
    }

    pub(crate) fn reserve(&mut self, additional: usize) -> Result<(), Error> {
        self.slots.try_reserve_exact(additional)?;
        Ok(())
    }
}

/// Iterator over node ids, head to tail.
pub(crate) struct Links<'a> {
    chain: &'a Chain,
    at: Option<NodeId>,
}

impl Iterator for Links<'_> {
    type Item = NodeId;
    fn next(&mut self) -> Option<NodeId> {
        let id = self.at?;
        self.at = self.chain.next_of(id);
        Some(id)
    }
}

impl fmt::Debug for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.elements()).finish()
    }
}

impl fmt::Debug for List {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("List")
            .field("len", &self.len())
            .field("refcount", &self.refcount())
            .field("position", &self.position())
            .field("elements", &*self.chain)
            .finish()
    }
}
