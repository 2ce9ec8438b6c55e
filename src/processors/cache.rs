use crate::error::Result;
use sha2::{Digest, Sha256};
use std::collections::{HashMap, VecDeque};
use std::hash::Hash;
use std::sync::Arc;
use tracing::debug;

/// Hex SHA-256 of the raw input, used as its content identity
pub fn content_digest(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

/// Memoizes computed values by key for as long as its owner lives. Unbounded
/// by default; a bounded cache evicts the oldest entry first.
#[derive(Debug)]
pub struct MemoCache<K, V> {
    entries: HashMap<K, Arc<V>>,
    order: VecDeque<K>,
    capacity: Option<usize>,
    hits: usize,
    misses: usize,
}

impl<K, V> MemoCache<K, V>
where
    K: Eq + Hash + Clone + std::fmt::Debug,
{
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
            order: VecDeque::new(),
            capacity: None,
            hits: 0,
            misses: 0,
        }
    }

    /// Keep at most `capacity` entries (minimum 1)
    pub fn bounded(capacity: usize) -> Self {
        Self {
            capacity: Some(capacity.max(1)),
            ..Self::new()
        }
    }

    /// Return the cached value for `key`, or compute and store it.
    /// A failed computation stores nothing.
    pub fn get_or_try_insert_with<F>(&mut self, key: &K, compute: F) -> Result<Arc<V>>
    where
        F: FnOnce() -> Result<V>,
    {
        if let Some(value) = self.entries.get(key) {
            self.hits += 1;
            debug!("cache hit for {:?}", key);
            return Ok(Arc::clone(value));
        }

        self.misses += 1;
        debug!("cache miss for {:?}", key);
        let value = Arc::new(compute()?);

        if let Some(capacity) = self.capacity {
            while self.entries.len() >= capacity {
                match self.order.pop_front() {
                    Some(oldest) => {
                        debug!("evicting {:?}", oldest);
                        self.entries.remove(&oldest);
                    }
                    None => break,
                }
            }
        }

        self.entries.insert(key.clone(), Arc::clone(&value));
        self.order.push_back(key.clone());
        Ok(value)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn hits(&self) -> usize {
        self.hits
    }

    pub fn misses(&self) -> usize {
        self.misses
    }
}

impl<K, V> Default for MemoCache<K, V>
where
    K: Eq + Hash + Clone + std::fmt::Debug,
{
    fn default() -> Self {
        Self::new()
    }
}
