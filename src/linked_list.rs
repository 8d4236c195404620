//! A singly linked list whose nodes live in an index-addressed arena.
//!
//! Links are `Option<NodeId>` instead of pointers. Removed nodes leave a
//! vacant slot behind which is threaded onto a free list and reused by the
//! next insertion.

use core::fmt;
use core::mem;

use tracing::trace;

use crate::error::InvariantError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct NodeId(usize);

struct Node<T> {
    value: T,
    next: Option<NodeId>,
}

enum Slot<T> {
    Occupied(Node<T>),
    Vacant { next_free: Option<NodeId> },
}

pub struct LinkedList<T> {
    slots: Vec<Slot<T>>,
    free: Option<NodeId>,
    head: Option<NodeId>,
    tail: Option<NodeId>,
    len: usize,
}

impl<T> LinkedList<T> {
    /// Separator used by [`print`](Self::print) and the `Display` impl.
    pub const DELIMITER: &'static str = " => ";

    pub fn new() -> Self {
        LinkedList {
            slots: Vec::new(),
            free: None,
            head: None,
            tail: None,
            len: 0,
        }
    }

    /// Creates an empty list whose arena can hold `capacity` nodes before
    /// reallocating.
    pub fn with_capacity(capacity: usize) -> Self {
        LinkedList {
            slots: Vec::with_capacity(capacity),
            ..Self::new()
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Appends `value` after the current tail and returns a reference to the
    /// stored value.
    pub fn push(&mut self, value: T) -> &mut T {
        let id = self.store(Node { value, next: None });

        match self.tail {
            Some(tail) => {
                if let Some(node) = self.node_mut(tail) {
                    node.next = Some(id);
                }
            }
            None => self.head = Some(id),
        }

        self.tail = Some(id);
        self.len += 1;
        self.value_mut(id)
    }

    /// Prepends `value` before the current head.
    pub fn push_front(&mut self, value: T) -> &mut T {
        let id = self.store(Node {
            value,
            next: self.head,
        });

        if self.tail.is_none() {
            self.tail = Some(id);
        }

        self.head = Some(id);
        self.len += 1;
        self.value_mut(id)
    }

    /// Removes the last node and returns its value.
    ///
    /// Without back links the new tail has to be found by walking from the
    /// head, so this takes *O*(n) time.
    pub fn pop(&mut self) -> Option<T> {
        let tail = self.tail?;

        if self.head == Some(tail) {
            self.head = None;
            self.tail = None;
            self.len = 0;
            return self.release(tail);
        }

        let mut previous = self.head?;
        let mut steps = 0usize;
        while self.successor(previous) != Some(tail) {
            previous = self.successor(previous)?;
            steps += 1;
        }
        trace!(steps, len = self.len, "walked to penultimate node");

        self.node_mut(previous)?.next = None;
        self.tail = Some(previous);
        self.len -= 1;
        self.release(tail)
    }

    pub fn pop_front(&mut self) -> Option<T> {
        let head = self.head?;

        self.head = self.successor(head);
        if self.head.is_none() {
            self.tail = None;
        }

        self.len -= 1;
        self.release(head)
    }

    pub fn front(&self) -> Option<&T> {
        self.head.and_then(|id| self.node(id)).map(|node| &node.value)
    }

    pub fn front_mut(&mut self) -> Option<&mut T> {
        let id = self.head?;
        self.node_mut(id).map(|node| &mut node.value)
    }

    pub fn back(&self) -> Option<&T> {
        self.tail.and_then(|id| self.node(id)).map(|node| &node.value)
    }

    pub fn back_mut(&mut self) -> Option<&mut T> {
        let id = self.tail?;
        self.node_mut(id).map(|node| &mut node.value)
    }

    /// Returns the value at the 0-based `index`, or `None` unless
    /// `0 <= index < len`.
    ///
    /// Any integer type is accepted so that negative indices are simply out
    /// of range.
    pub fn get(&self, index: impl TryInto<usize>) -> Option<&T> {
        let id = self.id_at(self.position(index)?)?;
        self.node(id).map(|node| &node.value)
    }

    pub fn get_mut(&mut self, index: impl TryInto<usize>) -> Option<&mut T> {
        let id = self.id_at(self.position(index)?)?;
        self.node_mut(id).map(|node| &mut node.value)
    }

    /// Inserts `value` so that it ends up at `index`. Valid positions are
    /// `0..=len`; anything else leaves the list untouched and returns `false`.
    pub fn insert(&mut self, index: impl TryInto<usize>, value: T) -> bool {
        let index = match index.try_into() {
            Ok(index) if index <= self.len => index,
            _ => return false,
        };

        if index == 0 {
            self.push_front(value);
            return true;
        }

        if index == self.len {
            self.push(value);
            return true;
        }

        let Some(previous) = self.id_at(index - 1) else {
            return false;
        };
        let id = self.store(Node {
            value,
            next: self.successor(previous),
        });
        if let Some(node) = self.node_mut(previous) {
            node.next = Some(id);
        }
        self.len += 1;
        true
    }

    /// Removes the node at `index` and returns its value. Same bounds as
    /// [`get`](Self::get).
    pub fn delete(&mut self, index: impl TryInto<usize>) -> Option<T> {
        let index = self.position(index)?;

        if index == 0 {
            return self.pop_front();
        }

        let previous = self.id_at(index - 1)?;
        let target = self.successor(previous)?;
        let after = self.successor(target);

        self.node_mut(previous)?.next = after;
        if self.tail == Some(target) {
            self.tail = Some(previous);
        }

        self.len -= 1;
        self.release(target)
    }

    /// Drops every node. The arena keeps its allocation.
    pub fn clear(&mut self) {
        trace!(len = self.len, slots = self.slots.len(), "clearing list");
        self.slots.clear();
        self.free = None;
        self.head = None;
        self.tail = None;
        self.len = 0;
    }

    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            list: self,
            current: self.head,
            remaining: self.len,
        }
    }

    /// Renders the values front to back joined by [`DELIMITER`](Self::DELIMITER).
    pub fn print(&self) -> String
    where
        T: fmt::Display,
    {
        self.print_with(Self::DELIMITER)
    }

    pub fn print_with(&self, delimiter: &str) -> String
    where
        T: fmt::Display,
    {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = self.write_joined(&mut out, delimiter);
        out
    }

    /// Walks the chain from `head` and verifies that the recorded `head`,
    /// `tail` and length describe it exactly.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        match (self.head, self.tail) {
            (None, None) if self.len == 0 => return self.check_orphans(),
            (Some(_), Some(_)) if self.len > 0 => {}
            (head, tail) => {
                return Err(InvariantError::EmptinessMismatch {
                    len: self.len,
                    has_head: head.is_some(),
                    has_tail: tail.is_some(),
                })
            }
        }

        let mut visited = vec![false; self.slots.len()];
        let mut current = self.head;
        let mut last = None;
        let mut count = 0;

        while let Some(id) = current {
            let node = self
                .node(id)
                .ok_or(InvariantError::DanglingLink { slot: id.0 })?;
            if mem::replace(&mut visited[id.0], true) {
                return Err(InvariantError::Cycle { slot: id.0 });
            }
            count += 1;
            last = Some(id);
            current = node.next;
        }

        if count != self.len {
            return Err(InvariantError::LengthMismatch {
                recorded: self.len,
                actual: count,
            });
        }
        if last != self.tail {
            return Err(InvariantError::TailMismatch);
        }
        self.check_orphans()
    }

    fn check_orphans(&self) -> Result<(), InvariantError> {
        let occupied = self
            .slots
            .iter()
            .filter(|slot| matches!(slot, Slot::Occupied(_)))
            .count();
        if occupied == self.len {
            Ok(())
        } else {
            Err(InvariantError::OrphanedNodes {
                occupied,
                len: self.len,
            })
        }
    }

    fn write_joined<W: fmt::Write>(&self, out: &mut W, delimiter: &str) -> fmt::Result
    where
        T: fmt::Display,
    {
        for (i, value) in self.iter().enumerate() {
            if i > 0 {
                out.write_str(delimiter)?;
            }
            write!(out, "{value}")?;
        }
        Ok(())
    }

    fn position(&self, index: impl TryInto<usize>) -> Option<usize> {
        index.try_into().ok().filter(|&index| index < self.len)
    }

    fn id_at(&self, index: usize) -> Option<NodeId> {
        let mut current = self.head;
        for _ in 0..index {
            current = self.successor(current?);
        }
        current
    }

    fn successor(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).and_then(|node| node.next)
    }

    fn node(&self, id: NodeId) -> Option<&Node<T>> {
        match self.slots.get(id.0) {
            Some(Slot::Occupied(node)) => Some(node),
            _ => None,
        }
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut Node<T>> {
        match self.slots.get_mut(id.0) {
            Some(Slot::Occupied(node)) => Some(node),
            _ => None,
        }
    }

    fn value_mut(&mut self, id: NodeId) -> &mut T {
        match self.slots.get_mut(id.0) {
            Some(Slot::Occupied(node)) => &mut node.value,
            _ => unreachable!("slot {} was filled by the current insertion", id.0),
        }
    }

    /// Places `node` in a vacant slot, reusing the free list before growing
    /// the arena.
    fn store(&mut self, node: Node<T>) -> NodeId {
        let Some(id) = self.free else {
            self.slots.push(Slot::Occupied(node));
            return NodeId(self.slots.len() - 1);
        };

        let slot = &mut self.slots[id.0];
        if let Slot::Vacant { next_free } = *slot {
            self.free = next_free;
        }
        *slot = Slot::Occupied(node);
        trace!(slot = id.0, "reusing vacant slot");
        id
    }

    /// Vacates the slot behind `id` and hands back the value it held.
    fn release(&mut self, id: NodeId) -> Option<T> {
        let slot = self.slots.get_mut(id.0)?;
        match mem::replace(slot, Slot::Vacant { next_free: self.free }) {
            Slot::Occupied(node) => {
                self.free = Some(id);
                Some(node.value)
            }
            vacant => {
                *slot = vacant;
                None
            }
        }
    }
}

impl<T> Default for LinkedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for LinkedList<T> {
    /// The copy is compacted: vacant slots of the original are not carried over.
    fn clone(&self) -> Self {
        let mut new_list = LinkedList::with_capacity(self.len);
        new_list.extend(self.iter().cloned());
        new_list
    }
}

impl<T: PartialEq> PartialEq for LinkedList<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for LinkedList<T> {}

impl<T: fmt::Debug> fmt::Debug for LinkedList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: fmt::Display> fmt::Display for LinkedList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_joined(f, Self::DELIMITER)
    }
}

impl<T> Extend<T> for LinkedList<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.push(value);
        }
    }
}

impl<T> FromIterator<T> for LinkedList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = LinkedList::new();
        list.extend(iter);
        list
    }
}

pub struct Iter<'a, T> {
    list: &'a LinkedList<T>,
    current: Option<NodeId>,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.list.node(self.current?)?;
        self.current = node.next;
        self.remaining = self.remaining.saturating_sub(1);
        Some(&node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<'a, T> IntoIterator for &'a LinkedList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

pub struct IntoIter<T> {
    list: LinkedList<T>,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.list.pop_front()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.list.len(), Some(self.list.len()))
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> IntoIterator for LinkedList<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter { list: self }
    }
}

#[cfg(feature = "serde")]
mod serde_impl {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use super::LinkedList;

    impl<T: Serialize> Serialize for LinkedList<T> {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            serializer.collect_seq(self.iter())
        }
    }

    impl<'de, T: Deserialize<'de>> Deserialize<'de> for LinkedList<T> {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            Vec::<T>::deserialize(deserializer).map(|values| values.into_iter().collect())
        }
    }
}
