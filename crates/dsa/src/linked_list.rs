use crate::keyed::{parse_key, Keyed};
use crate::node::Slot;
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Singly linked list with head and tail tracking
///
/// Nodes live in an arena and link to each other by index. `head` owns the
/// chain's entry point; `tail` is a plain index into the same chain, so
/// appending is O(1) without a second owner.
///
/// The tail node never has a successor, and an empty head implies an empty tail.
#[derive(Debug)]
pub struct LinkedList<T> {
    nodes: Vec<Slot<T>>,
    head: Option<usize>,
    tail: Option<usize>,
}

impl<T> LinkedList<T> {
    pub fn new() -> Self {
        LinkedList {
            nodes: Vec::new(),
            head: None,
            tail: None,
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    pub fn head(&self) -> Option<&T> {
        self.head.map(|index| &self.nodes[index].data)
    }

    pub fn tail(&self) -> Option<&T> {
        self.tail.map(|index| &self.nodes[index].data)
    }

    pub fn add_to_head(&mut self, data: T) {
        let index = self.nodes.len();
        self.nodes.push(Slot {
            data,
            next: self.head,
        });

        self.head = Some(index);
        if self.tail.is_none() {
            self.tail = Some(index);
        }
    }

    pub fn add_to_tail(&mut self, data: T) {
        let Some(old_tail) = self.tail else {
            self.add_to_head(data);
            return;
        };

        let index = self.nodes.len();
        self.nodes.push(Slot { data, next: None });
        self.nodes[old_tail].next = Some(index);
        self.tail = Some(index);
    }

    /// Walk from head to tail
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            list: self,
            cursor: self.head,
        }
    }

    /// Copy every payload, head to tail, into a new vector
    pub fn to_sequence(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.iter().cloned().collect()
    }
}

impl<T: Keyed> LinkedList<T> {
    /// Linear scan for the first payload whose identifier equals `id`
    /// once coerced to the key type.
    pub fn find_by_id(&self, id: &str) -> Option<&T>
    where
        T::Key: FromStr,
    {
        let key = parse_key::<T::Key>(id)?;
        self.find_by_key(&key)
    }

    pub fn find_by_key(&self, key: &T::Key) -> Option<&T> {
        self.iter()
            .find(|data| data.key().as_ref() == Some(key))
    }
}

impl<T> Default for LinkedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

// Collecting appends at the tail, preserving iteration order
impl<T> FromIterator<T> for LinkedList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = LinkedList::new();
        list.extend(iter);
        list
    }
}

impl<T> Extend<T> for LinkedList<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for data in iter {
            self.add_to_tail(data);
        }
    }
}

pub struct Iter<'a, T> {
    list: &'a LinkedList<T>,
    cursor: Option<usize>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let node = &self.list.nodes[self.cursor?];
        self.cursor = node.next;
        Some(&node.data)
    }
}

impl<'a, T> IntoIterator for &'a LinkedList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<T: fmt::Display> fmt::Display for LinkedList<T> {
    // `[ a ] -> [ b ] -> None`, or just `None` when empty
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for data in self {
            write!(f, "[ {data} ] -> ")?;
        }
        write!(f, "None")
    }
}

impl<T: Serialize> Serialize for LinkedList<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    // Tail invariant: the tail slot has no successor and is reachable from head
    fn assert_tail_invariant<T>(list: &LinkedList<T>) {
        match (list.head, list.tail) {
            (None, None) => {}
            (Some(_), Some(tail)) => {
                assert!(list.nodes[tail].next.is_none());
                let mut cursor = list.head;
                let mut last = None;
                while let Some(index) = cursor {
                    last = Some(index);
                    cursor = list.nodes[index].next;
                }
                assert_eq!(last, Some(tail));
            }
            other => panic!("head and tail disagree: {other:?}"),
        }
    }

    #[test]
    fn test_initial_state() {
        let list: LinkedList<&str> = LinkedList::new();
        assert!(list.head().is_none());
        assert!(list.tail().is_none());
        assert_eq!(list.to_string(), "None");
        assert_tail_invariant(&list);
    }

    #[test]
    fn test_add_to_head_on_empty_list() {
        let mut list = LinkedList::new();
        list.add_to_head("A");

        assert_eq!(list.head(), Some(&"A"));
        assert_eq!(list.tail(), Some(&"A"));
        assert_tail_invariant(&list);
    }

    #[test]
    fn test_add_to_head_on_non_empty_list() {
        let mut list = LinkedList::new();
        list.add_to_head("A");
        list.add_to_head("B");

        assert_eq!(list.head(), Some(&"B"));
        assert_eq!(list.tail(), Some(&"A"));
        assert_eq!(list.to_sequence(), vec!["B", "A"]);
        assert_tail_invariant(&list);
    }

    #[test]
    fn test_display_after_head_inserts() {
        let mut list = LinkedList::new();
        for data in ["C", "B", "A"] {
            list.add_to_head(data);
        }
        assert_eq!(list.to_string(), "[ A ] -> [ B ] -> [ C ] -> None");
    }

    #[test]
    fn test_add_to_tail() {
        let mut list = LinkedList::new();

        list.add_to_tail("a");
        assert_eq!(list.head(), Some(&"a"));
        assert_eq!(list.tail(), Some(&"a"));
        assert_tail_invariant(&list);

        list.add_to_tail("b");
        assert_eq!(list.head(), Some(&"a"));
        assert_eq!(list.tail(), Some(&"b"));
        assert_tail_invariant(&list);

        list.add_to_tail("c");
        assert_eq!(list.to_sequence(), vec!["a", "b", "c"]);
        assert_eq!(list.tail(), Some(&"c"));
        assert_tail_invariant(&list);

        assert_eq!(list.to_string(), "[ a ] -> [ b ] -> [ c ] -> None");
    }

    #[test]
    fn test_mixed_inserts_keep_tail_consistent() {
        let mut list = LinkedList::new();
        list.add_to_tail(2);
        list.add_to_head(1);
        list.add_to_tail(3);
        list.add_to_head(0);

        assert_eq!(list.to_sequence(), vec![0, 1, 2, 3]);
        assert_eq!(list.tail(), Some(&3));
        assert_tail_invariant(&list);
    }

    #[test]
    fn test_to_sequence_is_non_destructive() {
        let list: LinkedList<i32> = (1..=4).collect();
        assert_eq!(list.to_sequence(), vec![1, 2, 3, 4]);
        assert_eq!(list.to_sequence(), vec![1, 2, 3, 4]);
        assert_eq!(list.len(), 4);
    }

    #[test]
    fn test_find_by_id() {
        let list: LinkedList<Value> = (1..=5)
            .map(|id| json!({ "id": id, "username": format!("user{id}") }))
            .collect();

        assert_eq!(list.find_by_id("3").unwrap()["username"], "user3");
        assert_eq!(list.find_by_id(" 5 ").unwrap()["id"], 5);
        assert!(list.find_by_id("42").is_none());
        assert!(list.find_by_id("abc").is_none());
    }

    #[test]
    fn test_find_by_id_returns_first_match() {
        let mut list = LinkedList::new();
        list.add_to_tail(json!({ "id": 1, "title": "first" }));
        list.add_to_tail(json!({ "id": 1, "title": "second" }));

        assert_eq!(list.find_by_id("1").unwrap()["title"], "first");
    }

    #[test]
    fn test_serialize_layout() {
        let mut list = LinkedList::new();
        list.add_to_head(2);
        list.add_to_head(1);
        assert_eq!(serde_json::to_value(&list).unwrap(), json!([1, 2]));
    }
}
