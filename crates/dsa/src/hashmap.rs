use crate::error::DsaError;
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};
use std::fmt;

// Bucket entry; owned by the bucket slot or by the previous entry in the chain
#[derive(Debug)]
struct Entry<V> {
    key: String,
    value: V,
    next: Option<Box<Entry<V>>>,
}

type Bucket<V> = Option<Box<Entry<V>>>;

/// Fixed-bucket chained hash table keyed by strings
///
/// The bucket count never changes after construction, so chains grow with
/// load and lookups degrade to a linear walk of one chain.
///
/// Writing an existing key appends a second entry instead of replacing the
/// first, and reads resolve to the entry nearest the head of the chain:
/// once a key is written, later writes to it are never observed.
#[derive(Debug)]
pub struct HashMap<V> {
    buckets: Vec<Bucket<V>>,
    len: usize,
}

impl<V> HashMap<V> {
    pub fn new(bucket_count: usize) -> Result<Self, DsaError> {
        if bucket_count == 0 {
            return Err(DsaError::InvalidConfiguration(
                "hash map bucket count must be positive".to_string(),
            ));
        }

        let mut buckets = Vec::with_capacity(bucket_count);
        buckets.resize_with(bucket_count, || None);

        Ok(HashMap { buckets, len: 0 })
    }

    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Total entries stored, duplicates included
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn load_factor(&self) -> f64 {
        self.len as f64 / self.bucket_count() as f64
    }

    /// Sum of the key's code points, modulo the bucket count
    pub fn hash(&self, key: &str) -> usize {
        let sum: u64 = key.chars().map(|c| u64::from(u32::from(c))).sum();
        (sum % self.bucket_count() as u64) as usize
    }

    /// Append an entry to the tail of the key's bucket chain
    pub fn put(&mut self, key: impl Into<String>, value: V) {
        let key = key.into();
        let index = self.hash(&key);

        let mut cursor = &mut self.buckets[index];
        while let Some(entry) = cursor {
            cursor = &mut entry.next;
        }
        *cursor = Some(Box::new(Entry {
            key,
            value,
            next: None,
        }));

        self.len += 1;
    }

    /// First entry in the key's chain whose key matches
    pub fn get(&self, key: &str) -> Option<&V> {
        self.chain(self.hash(key))
            .find(|entry| entry.key == key)
            .map(|entry| &entry.value)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Number of entries chained in one bucket
    pub fn bucket_len(&self, index: usize) -> usize {
        if index >= self.bucket_count() {
            return 0;
        }
        self.chain(index).count()
    }

    fn chain(&self, index: usize) -> impl Iterator<Item = &Entry<V>> {
        let mut cursor = self.buckets[index].as_deref();
        std::iter::from_fn(move || {
            let entry = cursor?;
            cursor = entry.next.as_deref();
            Some(entry)
        })
    }
}

impl<V: fmt::Display> fmt::Display for HashMap<V> {
    // One line per bucket: `[i] [ key : value ] -> ... -> None`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[")?;
        for index in 0..self.bucket_count() {
            write!(f, "  [{index}] ")?;
            if self.buckets[index].is_none() {
                writeln!(f, "None")?;
                continue;
            }
            for entry in self.chain(index) {
                write!(f, "[ {} : {} ] -> ", entry.key, entry.value)?;
            }
            writeln!(f, "None")?;
        }
        write!(f, "]")
    }
}

// Snapshot as an array of buckets, each an array of entries in chain order
impl<V: Serialize> Serialize for HashMap<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.bucket_count()))?;
        for index in 0..self.bucket_count() {
            seq.serialize_element(&ChainView(self, index))?;
        }
        seq.end()
    }
}

struct ChainView<'a, V>(&'a HashMap<V>, usize);

impl<V: Serialize> Serialize for ChainView<'_, V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let ChainView(map, index) = *self;
        let mut seq = serializer.serialize_seq(Some(map.bucket_len(index)))?;
        for entry in map.chain(index) {
            seq.serialize_element(&EntryView(entry))?;
        }
        seq.end()
    }
}

struct EntryView<'a, V>(&'a Entry<V>);

impl<V: Serialize> Serialize for EntryView<'_, V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry("key", &self.0.key)?;
        map.serialize_entry("value", &self.0.value)?;
        map.end()
    }
}

impl<V> Drop for HashMap<V> {
    fn drop(&mut self) {
        for bucket in &mut self.buckets {
            let mut cursor = bucket.take();
            while let Some(mut entry) = cursor {
                cursor = entry.next.take();
            }
        }
    }
}
