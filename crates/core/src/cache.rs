//! Bounded response cache with FIFO eviction.

use std::collections::{HashMap, VecDeque};

/// Default cache bound, enforced on every insert.
pub const DEFAULT_CAPACITY: usize = 1000;

/// Prompt-keyed response cache.
///
/// Keys are exact prompt strings, compared by equality with no
/// normalization. Eviction is FIFO on insertion order: a lookup never
/// refreshes an entry, and overwriting an existing key keeps its original
/// position in the eviction queue.
#[derive(Debug)]
pub struct ResponseCache {
    entries: HashMap<String, String>,
    order: VecDeque<String>,
    capacity: usize,
}

impl ResponseCache {
    /// Create a cache with the default bound.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Create a cache bounded at `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: HashMap::new(),
            order: VecDeque::new(),
            capacity,
        }
    }

    /// Look up a cached response by exact prompt text.
    pub fn get(&self, prompt: &str) -> Option<&str> {
        self.entries.get(prompt).map(String::as_str)
    }

    /// Insert a response, evicting the oldest-inserted entry at capacity.
    pub fn put(&mut self, prompt: impl Into<String>, response: impl Into<String>) {
        let prompt = prompt.into();
        if let Some(slot) = self.entries.get_mut(&prompt) {
            *slot = response.into();
            return;
        }

        while self.entries.len() >= self.capacity {
            let Some(oldest) = self.order.pop_front() else {
                break;
            };
            tracing::trace!("evicting cached response for {oldest:?}");
            self.entries.remove(&oldest);
        }

        self.order.push_back(prompt.clone());
        self.entries.insert(prompt, response.into());
    }

    /// Number of cached entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for ResponseCache {
    fn default() -> Self {
        Self::new()
    }
}
