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

use crate::counter::TopResource;
use crate::countmin::CountMinSketch;
use crate::error::Error;
use crate::event::Event;
use crate::topk::TopKSelector;

const DEFAULT_K: usize = 10;
const DEFAULT_DEPTH: usize = 10;
const DEFAULT_WIDTH: usize = 10_000;
const DEFAULT_SEED: u64 = 0;

/// Parameters of an approximate counting run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApproximateConfig {
    /// Number of resources reported.
    pub k: usize,
    /// Number of hash rows of each sketch.
    pub depth: usize,
    /// Number of buckets per sketch row.
    pub width: usize,
    /// Seed the row hashes are derived from.
    pub seed: u64,
}

impl Default for ApproximateConfig {
    fn default() -> Self {
        Self {
            k: DEFAULT_K,
            depth: DEFAULT_DEPTH,
            width: DEFAULT_WIDTH,
            seed: DEFAULT_SEED,
        }
    }
}

impl ApproximateConfig {
    /// Checks that both sketch dimensions are positive.
    pub fn validate(&self) -> Result<(), Error> {
        if self.depth == 0 || self.width == 0 {
            let err = Error::config("sketch depth and width must be positive")
                .with_context("depth", self.depth)
                .with_context("width", self.width);
            return Err(err);
        }
        Ok(())
    }

    fn sketch_compatible(&self, other: &Self) -> bool {
        self.depth == other.depth && self.width == other.width && self.seed == other.seed
    }
}

/// Streaming top-K estimator backed by two Count-Min sketches.
///
/// One sketch counts occurrences, the other accumulates bytes. Both share
/// dimensions and seed, so a key collides with the same set of keys in
/// either sketch. The occurrence estimate drives a bounded
/// [`TopKSelector`]; sizes are read from the byte sketch only when results
/// are produced.
///
/// # Examples
///
/// ```
/// # use webtopk::counter::ApproximateCounter;
/// # use webtopk::event::Event;
/// let mut counter = ApproximateCounter::builder()
///     .k(2)
///     .depth(5)
///     .width(512)
///     .build()
///     .unwrap();
/// counter.extend([
///     Event::new("/a", 10),
///     Event::new("/b", 20),
///     Event::new("/a", 10),
///     Event::new("/c", 1),
/// ]);
///
/// let results = counter.finish();
/// assert_eq!(results[0].key(), "/a");
/// assert!(results[0].size() >= 20);
/// ```
#[derive(Debug, Clone)]
pub struct ApproximateCounter {
    config: ApproximateConfig,
    counts: CountMinSketch,
    sizes: CountMinSketch,
    candidates: TopKSelector,
    events_seen: u64,
}

impl ApproximateCounter {
    /// Creates a counter for `config`.
    ///
    /// Fails with [`ConfigInvalid`](crate::error::ErrorKind::ConfigInvalid)
    /// when the sketch dimensions are not positive.
    pub fn new(config: ApproximateConfig) -> Result<Self, Error> {
        config.validate()?;
        Ok(Self {
            config,
            counts: CountMinSketch::new(config.depth, config.width, config.seed)?,
            sizes: CountMinSketch::new(config.depth, config.width, config.seed)?,
            candidates: TopKSelector::new(config.k),
            events_seen: 0,
        })
    }

    /// Returns a builder starting from [`ApproximateConfig::default`].
    pub fn builder() -> ApproximateCounterBuilder {
        ApproximateCounterBuilder::default()
    }

    /// Returns the configuration of this counter.
    pub fn config(&self) -> &ApproximateConfig {
        &self.config
    }

    /// Returns the number of events applied, including merged ones.
    pub fn events_seen(&self) -> u64 {
        self.events_seen
    }

    /// Returns the occurrence sketch.
    pub fn count_sketch(&self) -> &CountMinSketch {
        &self.counts
    }

    /// Returns the byte-size sketch.
    pub fn size_sketch(&self) -> &CountMinSketch {
        &self.sizes
    }

    /// Returns the current candidate set.
    pub fn candidates(&self) -> &TopKSelector {
        &self.candidates
    }

    /// Applies one event: both sketches are incremented, then the key is
    /// re-ranked with its fresh occurrence estimate.
    pub fn update(&mut self, event: &Event) {
        self.events_seen += 1;
        self.counts.increment(event.key(), 1);
        self.sizes.increment(event.key(), event.amount());
        let estimate = self.counts.estimate(event.key());
        self.candidates.upsert(event.key(), estimate);
    }

    /// Merges a counter that ran over a disjoint shard of the stream.
    ///
    /// Both sketch pairs are added together, then every candidate of either
    /// counter is re-ranked against the merged occurrence sketch; estimates
    /// recorded per shard are discarded. The sketches of both counters must
    /// share depth, width and seed; `k` is kept from `self`.
    pub fn merge(&mut self, other: &Self) -> Result<(), Error> {
        if !self.config.sketch_compatible(&other.config) {
            let err = Error::config("cannot merge counters with different sketches")
                .with_context("self", format!("{:?}", self.config))
                .with_context("other", format!("{:?}", other.config));
            return Err(err);
        }
        self.counts.merge(&other.counts)?;
        self.sizes.merge(&other.sizes)?;
        self.events_seen += other.events_seen;

        let mut keys: Vec<String> = self
            .candidates
            .drain()
            .into_iter()
            .map(|candidate| candidate.key().to_string())
            .collect();
        keys.extend(other.candidates.keys().map(str::to_string));
        for key in &keys {
            let estimate = self.counts.estimate(key);
            self.candidates.upsert(key, estimate);
        }

        tracing::debug!(
            events = self.events_seen,
            candidates = self.candidates.len(),
            "merged approximate counters"
        );
        Ok(())
    }

    /// Returns the current ranking with sizes read from the byte sketch.
    pub fn results(&self) -> Vec<TopResource> {
        self.candidates
            .snapshot()
            .into_iter()
            .map(|candidate| {
                let size = self.sizes.estimate(candidate.key());
                TopResource::new(candidate.key(), size)
            })
            .collect()
    }

    /// Ends the run and returns at most `k` resources, estimated count
    /// descending and key ascending.
    ///
    /// Each size is queried from the byte sketch at this point, never cached
    /// while the stream was read.
    pub fn finish(self) -> Vec<TopResource> {
        let results = self.results();
        tracing::debug!(
            k = self.config.k,
            depth = self.config.depth,
            width = self.config.width,
            seed = self.config.seed,
            events = self.events_seen,
            emitted = results.len(),
            "approximate top-k computed"
        );
        results
    }
}

impl Extend<Event> for ApproximateCounter {
    fn extend<I: IntoIterator<Item = Event>>(&mut self, events: I) {
        for event in events {
            self.update(&event);
        }
    }
}

/// Builder for [`ApproximateCounter`].
#[derive(Debug, Clone, Default)]
pub struct ApproximateCounterBuilder {
    config: ApproximateConfig,
}

impl ApproximateCounterBuilder {
    /// Set the number of resources reported.
    pub fn k(mut self, k: usize) -> Self {
        self.config.k = k;
        self
    }

    /// Set the number of hash rows.
    pub fn depth(mut self, depth: usize) -> Self {
        self.config.depth = depth;
        self
    }

    /// Set the number of buckets per row.
    pub fn width(mut self, width: usize) -> Self {
        self.config.width = width;
        self
    }

    /// Set the hash seed.
    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = seed;
        self
    }

    /// Build the counter.
    ///
    /// # Examples
    ///
    /// ```
    /// # use webtopk::counter::ApproximateCounter;
    /// # use webtopk::error::ErrorKind;
    /// let err = ApproximateCounter::builder().width(0).build().unwrap_err();
    /// assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
    /// ```
    pub fn build(self) -> Result<ApproximateCounter, Error> {
        ApproximateCounter::new(self.config)
    }
}
