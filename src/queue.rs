use crate::linked_list::{self, LinkedList};

/// FIFO queue over a [`LinkedList`]: values enter at the tail and leave from
/// the head, both in *O*(1).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Queue<T> {
    items: LinkedList<T>,
}

impl<T> Queue<T> {
    pub fn new() -> Self {
        Queue {
            items: LinkedList::new(),
        }
    }

    pub fn enqueue(&mut self, value: T) {
        self.items.push(value);
    }

    pub fn dequeue(&mut self) -> Option<T> {
        self.items.pop_front()
    }

    /// The value that the next [`dequeue`](Self::dequeue) would return.
    pub fn peek(&self) -> Option<&T> {
        self.items.front()
    }

    /// The most recently enqueued value.
    pub fn back(&self) -> Option<&T> {
        self.items.back()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn iter(&self) -> linked_list::Iter<'_, T> {
        self.items.iter()
    }
}

impl<T> Default for Queue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Extend<T> for Queue<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.items.extend(iter);
    }
}

impl<T> FromIterator<T> for Queue<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Queue {
            items: iter.into_iter().collect(),
        }
    }
}
