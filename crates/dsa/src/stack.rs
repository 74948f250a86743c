use crate::node::Node;
use serde::{Serialize, Serializer};

/// LIFO stack over a singly linked chain owned from the top.
#[derive(Debug)]
pub struct Stack<T> {
    top: Option<Box<Node<T>>>,
    len: usize,
}

impl<T> Stack<T> {
    pub fn new() -> Self {
        Stack { top: None, len: 0 }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.top.is_none()
    }

    pub fn push(&mut self, data: T) {
        self.top = Some(Node::new(data, self.top.take()));
        self.len += 1;
    }

    /// Detach and return the top; `None` on an empty stack
    pub fn pop(&mut self) -> Option<T> {
        let node = self.top.take()?;
        self.top = node.next;
        self.len -= 1;
        Some(node.data)
    }

    pub fn peek(&self) -> Option<&T> {
        self.top.as_ref().map(|node| &node.data)
    }

    fn iter(&self) -> impl Iterator<Item = &T> {
        let mut cursor = self.top.as_deref();
        std::iter::from_fn(move || {
            let node = cursor?;
            cursor = node.next.as_deref();
            Some(&node.data)
        })
    }
}

impl<T> Default for Stack<T> {
    fn default() -> Self {
        Self::new()
    }
}

// Pushes in iteration order, so the last item ends up on top
impl<T> FromIterator<T> for Stack<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut stack = Stack::new();
        stack.extend(iter);
        stack
    }
}

impl<T> Extend<T> for Stack<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for data in iter {
            self.push(data);
        }
    }
}

// Top-to-bottom snapshot
impl<T: Serialize> Serialize for Stack<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

impl<T> Drop for Stack<T> {
    fn drop(&mut self) {
        let mut cursor = self.top.take();
        while let Some(mut node) = cursor {
            cursor = node.next.take();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_single_element() {
        let mut stack = Stack::new();
        stack.push(10);

        assert_eq!(stack.peek(), Some(&10));
        assert!(stack.top.as_ref().unwrap().next.is_none());
    }

    #[test]
    fn test_push_multiple_elements() {
        let stack: Stack<i32> = [10, 20, 30].into_iter().collect();

        assert_eq!(stack.peek(), Some(&30));
        assert_eq!(stack.iter().copied().collect::<Vec<_>>(), vec![30, 20, 10]);
        assert_eq!(stack.len(), 3);
    }

    #[test]
    fn test_peek_is_non_destructive() {
        let mut stack = Stack::new();
        stack.push("a");
        stack.push("b");

        assert_eq!(stack.peek(), Some(&"b"));
        assert_eq!(stack.peek(), Some(&"b"));
        assert_eq!(stack.len(), 2);
    }

    #[test]
    fn test_peek_on_empty_stack() {
        let stack: Stack<i32> = Stack::new();
        assert_eq!(stack.peek(), None);
    }

    #[test]
    fn test_pop_single_element() {
        let mut stack = Stack::new();
        stack.push(99);

        assert_eq!(stack.pop(), Some(99));
        assert!(stack.top.is_none());
    }

    #[test]
    fn test_pop_follows_lifo() {
        let mut stack: Stack<i32> = [10, 20, 30].into_iter().collect();

        assert_eq!(stack.pop(), Some(30));
        assert_eq!(stack.pop(), Some(20));
        assert_eq!(stack.pop(), Some(10));
        assert!(stack.is_empty());
        assert!(stack.top.is_none());
    }

    #[test]
    fn test_pop_on_empty_stack() {
        let mut stack: Stack<i32> = Stack::new();
        assert_eq!(stack.pop(), None);
        assert_eq!(stack.len(), 0);
    }

    #[test]
    fn test_drop_long_chain() {
        let stack: Stack<u64> = (0..1_000_000).collect();
        assert_eq!(stack.len(), 1_000_000);
        drop(stack);
    }

    #[test]
    fn test_serialize_layout() {
        let stack: Stack<i32> = [1, 2, 3].into_iter().collect();
        assert_eq!(
            serde_json::to_value(&stack).unwrap(),
            serde_json::json!([3, 2, 1])
        );
    }
}
