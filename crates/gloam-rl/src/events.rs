//! FIFO event queue for player commands.
//!
//! The input layer pushes events, the turn scheduler pops them one at a
//! time in arrival order. Nothing is ever dropped except by an explicit
//! [`clear`](EventQueue::clear).

use std::collections::VecDeque;

/// A first-in, first-out event queue.
#[derive(Debug, Clone)]
pub struct EventQueue<E> {
    events: VecDeque<E>,
}

impl<E> EventQueue<E> {
    /// Create an empty event queue.
    pub fn new() -> Self {
        Self {
            events: VecDeque::new(),
        }
    }

    /// Append an event.
    pub fn push(&mut self, event: E) {
        self.events.push_back(event);
    }

    /// Pop the oldest event.
    pub fn pop(&mut self) -> Option<E> {
        self.events.pop_front()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Drop every queued event.
    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// Queued events, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &E> + '_ {
        self.events.iter()
    }
}

impl<E> Default for EventQueue<E> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fifo_order() {
        let mut q = EventQueue::new();
        q.push("first");
        q.push("second");
        q.push("third");

        assert_eq!(q.iter().next(), Some(&"first"));
        assert_eq!(q.pop(), Some("first"));
        assert_eq!(q.pop(), Some("second"));
        assert_eq!(q.pop(), Some("third"));
        assert_eq!(q.pop(), None);
    }

    #[test]
    fn test_iter_does_not_consume() {
        let mut q = EventQueue::new();
        for i in 1..=3 {
            q.push(i);
        }
        assert_eq!(q.iter().copied().collect::<Vec<_>>(), vec![1, 2, 3]);
        assert_eq!(q.len(), 3);
        assert_eq!(q.pop(), Some(1));
    }

    #[test]
    fn test_clear_and_len() {
        let mut q = EventQueue::<i32>::default();
        assert!(q.is_empty());
        q.push(1);
        q.push(2);
        assert_eq!(q.len(), 2);
        q.clear();
        assert!(q.is_empty());
        assert_eq!(q.pop(), None);
    }
}
