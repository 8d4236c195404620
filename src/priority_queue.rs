use tracing::trace;

use crate::queue::Queue;

/// Lane selector for [`PriorityQueue`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Priority {
    High,
    #[default]
    Low,
}

/// Two-tier priority queue.
///
/// Values are kept in one of two FIFO lanes. Removal always drains the high
/// lane before touching the low one; order within a lane is insertion order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PriorityQueue<T> {
    high: Queue<T>,
    low: Queue<T>,
}

impl<T> PriorityQueue<T> {
    pub fn new() -> Self {
        PriorityQueue {
            high: Queue::new(),
            low: Queue::new(),
        }
    }

    /// Enqueues `value` with [`Priority::Low`].
    pub fn enqueue(&mut self, value: T) {
        self.enqueue_with_priority(value, Priority::default());
    }

    pub fn enqueue_with_priority(&mut self, value: T, priority: Priority) {
        trace!(?priority, "enqueue");
        self.lane_mut(priority).enqueue(value);
    }

    pub fn dequeue(&mut self) -> Option<T> {
        if self.high.is_empty() {
            self.low.dequeue()
        } else {
            self.high.dequeue()
        }
    }

    pub fn peek(&self) -> Option<&T> {
        self.high.peek().or_else(|| self.low.peek())
    }

    /// Total number of values across both lanes.
    pub fn len(&self) -> usize {
        self.high.len() + self.low.len()
    }

    pub fn len_of(&self, priority: Priority) -> usize {
        self.lane(priority).len()
    }

    pub fn is_empty(&self) -> bool {
        self.high.is_empty() && self.low.is_empty()
    }

    pub fn clear(&mut self) {
        self.high.clear();
        self.low.clear();
    }

    fn lane(&self, priority: Priority) -> &Queue<T> {
        match priority {
            Priority::High => &self.high,
            Priority::Low => &self.low,
        }
    }

    fn lane_mut(&mut self, priority: Priority) -> &mut Queue<T> {
        match priority {
            Priority::High => &mut self.high,
            Priority::Low => &mut self.low,
        }
    }
}

impl<T> Default for PriorityQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}
