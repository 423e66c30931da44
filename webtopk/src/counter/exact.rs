// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::counter::TopResource;
use crate::event::Event;

/// Exact occurrence count and cumulative size of one key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyStats {
    count: u64,
    size: u64,
}

impl KeyStats {
    /// Returns the number of events seen for the key.
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Returns the sum of the amounts seen for the key.
    pub fn size(&self) -> u64 {
        self.size
    }

    fn record(&mut self, amount: u64) {
        self.count += 1;
        self.size = self.size.saturating_add(amount);
    }
}

/// Ground-truth counter holding full statistics for every distinct key.
///
/// # Examples
///
/// ```
/// # use webtopk::counter::ExactCounter;
/// # use webtopk::event::Event;
/// let mut counter = ExactCounter::new();
/// counter.update(&Event::new("/a", 100));
/// counter.update(&Event::new("/a", 20));
/// counter.update(&Event::new("/b", 5));
///
/// let stats = counter.stats("/a").unwrap();
/// assert_eq!((stats.count(), stats.size()), (2, 120));
/// assert_eq!(counter.top_k(1)[0].key(), "/a");
/// ```
#[derive(Debug, Clone, Default)]
pub struct ExactCounter {
    counts: HashMap<String, KeyStats>,
    events_seen: u64,
}

impl ExactCounter {
    /// Creates an empty counter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one occurrence and `event.amount()` bytes to the event's key.
    pub fn update(&mut self, event: &Event) {
        self.events_seen += 1;
        if let Some(stats) = self.counts.get_mut(event.key()) {
            stats.record(event.amount());
            return;
        }
        let mut stats = KeyStats::default();
        stats.record(event.amount());
        self.counts.insert(event.key().to_string(), stats);
    }

    /// Returns the number of events counted.
    pub fn events_seen(&self) -> u64 {
        self.events_seen
    }

    /// Returns the number of distinct keys held.
    pub fn distinct_keys(&self) -> usize {
        self.counts.len()
    }

    /// Returns the statistics of `key`, if it was seen.
    pub fn stats(&self, key: &str) -> Option<KeyStats> {
        self.counts.get(key).copied()
    }

    /// Returns the `k` keys with the highest counts, count descending and key
    /// ascending, each with its exact cumulative size.
    pub fn top_k(&self, k: usize) -> Vec<TopResource> {
        let mut entries: Vec<(&String, &KeyStats)> = self.counts.iter().collect();
        if k < entries.len() {
            if k == 0 {
                entries.clear();
            } else {
                entries.select_nth_unstable_by(k - 1, by_rank);
                entries.truncate(k);
            }
        }
        entries.sort_unstable_by(by_rank);

        tracing::debug!(
            events = self.events_seen,
            distinct_keys = self.counts.len(),
            emitted = entries.len(),
            "exact top-k computed"
        );

        entries
            .into_iter()
            .map(|(key, stats)| TopResource::new(key.as_str(), stats.size))
            .collect()
    }
}

impl Extend<Event> for ExactCounter {
    fn extend<I: IntoIterator<Item = Event>>(&mut self, events: I) {
        for event in events {
            self.update(&event);
        }
    }
}

fn by_rank(a: &(&String, &KeyStats), b: &(&String, &KeyStats)) -> Ordering {
    b.1.count.cmp(&a.1.count).then_with(|| a.0.cmp(b.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(results: &[TopResource]) -> Vec<&str> {
        results.iter().map(TopResource::key).collect()
    }

    #[test]
    fn test_ranks_by_count_not_size() {
        let mut counter = ExactCounter::new();
        counter.extend([
            Event::new("/big", 1_000_000),
            Event::new("/hot", 1),
            Event::new("/hot", 1),
        ]);
        let results = counter.top_k(2);
        assert_eq!(keys(&results), ["/hot", "/big"]);
        assert_eq!(results[0].size(), 2);
        assert_eq!(results[1].size(), 1_000_000);
    }

    #[test]
    fn test_ties_by_key() {
        let mut counter = ExactCounter::new();
        let paths = ["/c", "/a", "/d", "/b"];
        counter.extend(paths.map(|k| Event::new(k, 1)));
        assert_eq!(keys(&counter.top_k(2)), ["/a", "/b"]);
        assert_eq!(keys(&counter.top_k(10)), ["/a", "/b", "/c", "/d"]);
    }

    #[test]
    fn test_selection_matches_full_sort() {
        let mut counter = ExactCounter::new();
        for i in 0..200u64 {
            for _ in 0..(i % 17) {
                counter.update(&Event::new(format!("/r{i}"), i));
            }
        }
        let full = counter.top_k(usize::MAX);
        for k in [0, 1, 5, 17, 100, 199, 200] {
            assert_eq!(counter.top_k(k), full[..k.min(full.len())].to_vec());
        }
    }

    #[test]
    fn test_counts_amounts_and_events() {
        let mut counter = ExactCounter::new();
        counter.extend([Event::new("/a", 0), Event::new("/a", 7)]);
        assert_eq!(counter.events_seen(), 2);
        assert_eq!(counter.distinct_keys(), 1);
        assert_eq!(counter.stats("/a").map(|s| s.count()), Some(2));
        assert_eq!(counter.stats("/a").map(|s| s.size()), Some(7));
        assert_eq!(counter.stats("/b"), None);
    }
}
