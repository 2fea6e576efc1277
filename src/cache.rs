//! Bounded memoization of generated series, keyed by product code

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use tracing::trace;

use crate::demand::SeriesGenerator;
use crate::models::MonthlyRecord;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
}

/// Least-recently-used cache in front of a `SeriesGenerator`.
/// Generation is pure, so a hit returns exactly what regeneration would.
pub struct SeriesCache {
    generator: SeriesGenerator,
    capacity: usize,
    entries: HashMap<String, Arc<[MonthlyRecord]>>,
    recency: VecDeque<String>, // front = least recently used
    stats: CacheStats,
}

impl SeriesCache {
    /// A capacity of 0 disables caching
    pub fn new(generator: SeriesGenerator, capacity: usize) -> Self {
        SeriesCache {
            generator,
            capacity,
            entries: HashMap::with_capacity(capacity),
            recency: VecDeque::with_capacity(capacity),
            stats: CacheStats::default(),
        }
    }

    pub fn get_or_generate(&mut self, code: &str) -> Arc<[MonthlyRecord]> {
        if let Some(records) = self.entries.get(code) {
            let records = Arc::clone(records);
            self.stats.hits += 1;
            self.touch(code);
            trace!(code, "series cache hit");
            return records;
        }

        self.stats.misses += 1;
        let records: Arc<[MonthlyRecord]> = self.generator.generate(code).into();
        if self.capacity == 0 {
            return records;
        }

        if self.entries.len() >= self.capacity {
            if let Some(evicted) = self.recency.pop_front() {
                self.entries.remove(&evicted);
                trace!(code = evicted.as_str(), "series cache eviction");
            }
        }
        self.entries.insert(code.to_string(), Arc::clone(&records));
        self.recency.push_back(code.to_string());
        records
    }

    fn touch(&mut self, code: &str) {
        if let Some(position) = self.recency.iter().position(|c| c == code) {
            if let Some(key) = self.recency.remove(position) {
                self.recency.push_back(key);
            }
        }
    }

    pub fn contains(&self, code: &str) -> bool {
        self.entries.contains_key(code)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.recency.clear();
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    pub fn generator(&self) -> &SeriesGenerator {
        &self.generator
    }
}
