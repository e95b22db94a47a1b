// BoundedStack - fixed-capacity LIFO history

use std::collections::VecDeque;

/// Stack that discards its oldest entry once full
///
/// The most recent entry is at the back.
#[derive(Debug, Clone)]
pub struct BoundedStack<T> {
    items: VecDeque<T>,
    capacity: usize,
}

impl<T> BoundedStack<T> {
    pub fn new(capacity: usize) -> Self {
        Self {
            items: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Push an item, dropping the oldest one if the stack is full
    ///
    /// Returns the discarded item, if any.
    pub fn push(&mut self, item: T) -> Option<T> {
        if self.capacity == 0 {
            return Some(item);
        }

        let discarded = if self.items.len() >= self.capacity {
            self.items.pop_front()
        } else {
            None
        };

        self.items.push_back(item);
        discarded
    }

    pub fn pop(&mut self) -> Option<T> {
        self.items.pop_back()
    }

    pub fn peek(&self) -> Option<&T> {
        self.items.back()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.items.len() == self.capacity
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lifo_order() {
        let mut stack = BoundedStack::new(4);
        stack.push(1);
        stack.push(2);
        assert_eq!(stack.peek(), Some(&2));
        assert_eq!(stack.pop(), Some(2));
        assert_eq!(stack.pop(), Some(1));
        assert_eq!(stack.pop(), None);
    }

    #[test]
    fn test_discards_oldest_past_capacity() {
        let mut stack = BoundedStack::new(100);
        for i in 0..100 {
            assert_eq!(stack.push(i), None);
        }
        assert!(stack.is_full());

        assert_eq!(stack.push(100), Some(0));
        assert_eq!(stack.len(), 100);
        assert_eq!(stack.peek(), Some(&100));

        let mut last = None;
        while let Some(item) = stack.pop() {
            last = Some(item);
        }
        assert_eq!(last, Some(1));
    }

    #[test]
    fn test_zero_capacity_keeps_nothing() {
        let mut stack = BoundedStack::new(0);
        assert_eq!(stack.push('a'), Some('a'));
        assert!(stack.is_empty());
    }
}
