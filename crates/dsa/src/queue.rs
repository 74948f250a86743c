use crate::node::Slot;
use serde::{Serialize, Serializer};

/// FIFO queue over a singly linked chain.
///
/// Enqueue appends at the tail, dequeue detaches the head. Slots freed by
/// dequeue are reused, so the arena never outgrows the longest the queue has
/// been. Draining the queue resets both ends and releases the arena.
#[derive(Debug)]
pub struct Queue<T> {
    slots: Vec<Option<Slot<T>>>,
    // Vacated slot indices, reused before the arena grows
    free: Vec<usize>,
    head: Option<usize>,
    tail: Option<usize>,
    len: usize,
}

impl<T> Queue<T> {
    pub fn new() -> Self {
        Queue {
            slots: Vec::new(),
            free: Vec::new(),
            head: None,
            tail: None,
            len: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    pub fn enqueue(&mut self, data: T) {
        let slot = Some(Slot { data, next: None });
        let index = match self.free.pop() {
            Some(index) => {
                self.slots[index] = slot;
                index
            }
            None => {
                self.slots.push(slot);
                self.slots.len() - 1
            }
        };

        match self.tail {
            Some(tail) => {
                if let Some(slot) = self.slots[tail].as_mut() {
                    slot.next = Some(index);
                }
            }
            None => self.head = Some(index),
        }

        self.tail = Some(index);
        self.len += 1;
    }

    /// Detach and return the head; `None` on an empty queue
    pub fn dequeue(&mut self) -> Option<T> {
        let index = self.head?;
        let slot = self.slots[index].take()?;
        self.head = slot.next;
        self.len -= 1;

        if self.head.is_none() {
            self.tail = None;
            self.slots.clear();
            self.free.clear();
        } else {
            self.free.push(index);
        }

        Some(slot.data)
    }

    pub fn peek(&self) -> Option<&T> {
        self.slots[self.head?].as_ref().map(|slot| &slot.data)
    }

    fn iter(&self) -> impl Iterator<Item = &T> {
        let mut cursor = self.head;
        std::iter::from_fn(move || {
            let slot = self.slots[cursor?].as_ref()?;
            cursor = slot.next;
            Some(&slot.data)
        })
    }
}

impl<T> Default for Queue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromIterator<T> for Queue<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut queue = Queue::new();
        queue.extend(iter);
        queue
    }
}

impl<T> Extend<T> for Queue<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for data in iter {
            self.enqueue(data);
        }
    }
}

// Head-to-tail snapshot
impl<T: Serialize> Serialize for Queue<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}
