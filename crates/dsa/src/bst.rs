use crate::keyed::{parse_key, Keyed};
use crate::node::TreeNode;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;
use std::cmp::Ordering;
use std::str::FromStr;

/// Unbalanced binary search tree keyed by record identifier
///
/// Every left-subtree key is less than its parent's, every right-subtree key
/// greater. Equal keys are never stored twice: the first insert wins.
///
/// No rebalancing happens after insertion. Batches that arrive sorted by id
/// (the store's default order) should go through [`Bst::from_shuffled`],
/// otherwise the tree degenerates into a chain of height n.
#[derive(Debug, Serialize)]
pub struct Bst<T> {
    root: Option<Box<TreeNode<T>>>,
    #[serde(skip)]
    len: usize,
}

impl<T> Bst<T> {
    pub fn new() -> Self {
        Bst { root: None, len: 0 }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn root(&self) -> Option<&TreeNode<T>> {
        self.root.as_deref()
    }

    /// Number of nodes on the longest root-to-leaf path (0 when empty)
    pub fn height(&self) -> usize {
        let mut deepest = 0;
        let mut pending: Vec<(&TreeNode<T>, usize)> =
            self.root().map(|n| (n, 1)).into_iter().collect();

        while let Some((node, depth)) = pending.pop() {
            deepest = deepest.max(depth);
            pending.extend(node.left().map(|n| (n, depth + 1)));
            pending.extend(node.right().map(|n| (n, depth + 1)));
        }

        deepest
    }

    /// Records in ascending key order
    pub fn in_order(&self) -> Vec<&T> {
        let mut out = Vec::with_capacity(self.len);
        let mut spine: Vec<&TreeNode<T>> = Vec::new();
        let mut current = self.root();

        loop {
            while let Some(node) = current {
                spine.push(node);
                current = node.left();
            }
            match spine.pop() {
                Some(node) => {
                    out.push(node.data());
                    current = node.right();
                }
                None => break,
            }
        }

        out
    }
}

impl<T: Keyed> Bst<T> {
    /// Shuffle a record batch, then insert it
    ///
    /// Approximates a random build order so the expected height stays near
    /// O(log n). Worst case is still O(n).
    pub fn from_shuffled<R: Rng + ?Sized>(mut records: Vec<T>, rng: &mut R) -> Self {
        records.shuffle(rng);
        records.into_iter().collect()
    }

    /// Insert a record, descending left on smaller keys and right on larger.
    ///
    /// Returns `false` without touching the tree when the key is already
    /// present or the record has no key.
    pub fn insert(&mut self, record: T) -> bool {
        let Some(key) = record.key() else {
            return false;
        };

        let mut cursor = &mut self.root;
        while let Some(node) = cursor {
            let Some(existing) = node.data.key() else {
                return false;
            };
            cursor = match key.cmp(&existing) {
                Ordering::Less => &mut node.left,
                Ordering::Greater => &mut node.right,
                Ordering::Equal => return false,
            };
        }

        *cursor = Some(TreeNode::new(record));
        self.len += 1;
        true
    }

    /// Look up a record by a string-typed identifier.
    ///
    /// An identifier that does not coerce to the key type is simply absent.
    pub fn search(&self, id: &str) -> Option<&T>
    where
        T::Key: FromStr,
    {
        let key = parse_key::<T::Key>(id)?;
        self.search_key(&key)
    }

    pub fn search_key(&self, key: &T::Key) -> Option<&T> {
        let mut cursor = self.root();

        while let Some(node) = cursor {
            cursor = match key.cmp(&node.data.key()?) {
                Ordering::Less => node.left(),
                Ordering::Greater => node.right(),
                Ordering::Equal => return Some(node.data()),
            };
        }

        None
    }
}

impl<T> Default for Bst<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Keyed> FromIterator<T> for Bst<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Bst::new();
        tree.extend(iter);
        tree
    }
}

impl<T: Keyed> Extend<T> for Bst<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for record in iter {
            self.insert(record);
        }
    }
}

// Unlink iteratively; a degenerate tree would otherwise recurse n levels deep
impl<T> Drop for Bst<T> {
    fn drop(&mut self) {
        let mut pending: Vec<Box<TreeNode<T>>> = self.root.take().into_iter().collect();
        while let Some(mut node) = pending.pop() {
            pending.extend(node.take_children().into_iter().flatten());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use serde_json::{json, Value};

    fn record(id: i64) -> Value {
        json!({ "id": id, "username": format!("user{id}") })
    }

    #[test]
    fn test_insert_root() {
        let mut bst = Bst::new();
        assert!(bst.insert(10));

        let root = bst.root().unwrap();
        assert_eq!(*root.data(), 10);
        assert!(root.left().is_none());
        assert!(root.right().is_none());
    }

    #[test]
    fn test_insert_left_and_right_children() {
        let bst: Bst<i64> = [10, 5, 15].into_iter().collect();

        let root = bst.root().unwrap();
        assert_eq!(*root.left().unwrap().data(), 5);
        assert_eq!(*root.right().unwrap().data(), 15);
    }

    #[test]
    fn test_insert_multiple_levels() {
        let bst: Bst<i64> = [10, 5, 15, 2, 7, 12, 20].into_iter().collect();

        let root = bst.root().unwrap();
        assert_eq!(*root.data(), 10);

        let left = root.left().unwrap();
        assert_eq!(*left.data(), 5);
        assert_eq!(*left.left().unwrap().data(), 2);
        assert_eq!(*left.right().unwrap().data(), 7);

        let right = root.right().unwrap();
        assert_eq!(*right.data(), 15);
        assert_eq!(*right.left().unwrap().data(), 12);
        assert_eq!(*right.right().unwrap().data(), 20);

        assert_eq!(bst.height(), 3);
    }

    #[test]
    fn test_duplicate_insert_is_dropped() {
        let mut bst = Bst::new();
        bst.insert(10);
        bst.insert(5);
        assert!(!bst.insert(10));

        let root = bst.root().unwrap();
        assert_eq!(*root.data(), 10);
        assert_eq!(*root.left().unwrap().data(), 5);
        assert!(root.right().is_none());
        assert_eq!(bst.len(), 2);
    }

    #[test]
    fn test_duplicate_does_not_overwrite_payload() {
        let mut bst = Bst::new();
        bst.insert(json!({ "id": 3, "title": "first" }));
        bst.insert(json!({ "id": 3, "title": "second" }));

        assert_eq!(bst.len(), 1);
        assert_eq!(bst.search("3").unwrap()["title"], "first");
    }

    #[test]
    fn test_search_records_by_string_id() {
        let bst: Bst<Value> = [10, 5, 15, 2, 7, 12, 20]
            .into_iter()
            .map(record)
            .collect();

        let found = bst.search("12").unwrap();
        assert_eq!(found["id"], 12);
        assert_eq!(found["username"], "user12");

        assert!(bst.search("99").is_none());
        assert!(bst.search("twelve").is_none());
    }

    #[test]
    fn test_search_empty_tree() {
        let bst: Bst<Value> = Bst::new();
        assert!(bst.is_empty());
        assert!(bst.search("1").is_none());
        assert_eq!(bst.height(), 0);
    }

    #[test]
    fn test_falsy_payload_is_distinguishable_from_absence() {
        let bst: Bst<Value> = [json!({ "id": 0, "active": false })].into_iter().collect();

        let found = bst.search("0").unwrap();
        assert_eq!(found["active"], false);
        assert!(bst.search("1").is_none());
    }

    #[test]
    fn test_records_without_id_are_skipped() {
        let mut bst = Bst::new();
        assert!(!bst.insert(json!({ "title": "orphan" })));
        assert!(bst.is_empty());
    }

    #[test]
    fn test_sorted_batch_degenerates_without_shuffle() {
        let sorted: Bst<i64> = (1..=64).collect();
        assert_eq!(sorted.height(), 64);
    }

    #[test]
    fn test_shuffled_build_keeps_every_record() {
        let mut rng = StdRng::seed_from_u64(7);
        let batch: Vec<Value> = (1..=500).map(record).collect();
        let bst = Bst::from_shuffled(batch, &mut rng);

        assert_eq!(bst.len(), 500);
        assert!(bst.height() < 500);
        for id in 1..=500 {
            assert_eq!(bst.search(&id.to_string()).unwrap()["id"], id);
        }

        let ids: Vec<i64> = bst
            .in_order()
            .iter()
            .map(|r| r["id"].as_i64().unwrap())
            .collect();
        assert_eq!(ids, (1..=500).collect::<Vec<_>>());
    }

    #[test]
    fn test_serialize_layout() {
        let bst: Bst<i64> = [2, 1, 3].into_iter().collect();
        let layout = serde_json::to_value(&bst).unwrap();

        assert_eq!(layout["root"]["data"], 2);
        assert_eq!(layout["root"]["left"]["data"], 1);
        assert_eq!(layout["root"]["right"]["data"], 3);
        assert_eq!(layout["root"]["left"]["left"], Value::Null);
    }
}
