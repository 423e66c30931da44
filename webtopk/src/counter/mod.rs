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

//! Exact and approximate top-K counting.
//!
//! Both strategies consume the same [`Event`](crate::event::Event) stream and
//! emit at most `k` [`TopResource`]s ranked by (estimated) occurrence count
//! descending, ties broken by key ascending.
//!
//! # Usage
//!
//! ```rust
//! # use webtopk::counter::{approximate_top_k, exact_top_k};
//! # use webtopk::event::Event;
//! let events = || {
//!     let mut events = vec![Event::new("/a", 100); 3];
//!     events.extend(vec![Event::new("/b", 50); 2]);
//!     events
//! };
//!
//! let exact = exact_top_k(events(), 1);
//! assert_eq!(exact.len(), 1);
//! assert_eq!((exact[0].key(), exact[0].size()), ("/a", 300));
//!
//! let approximate = approximate_top_k(events(), 1, 10, 1_000, 0).unwrap();
//! assert_eq!(approximate, exact);
//! ```

mod approximate;
mod exact;

pub use self::approximate::ApproximateConfig;
pub use self::approximate::ApproximateCounter;
pub use self::approximate::ApproximateCounterBuilder;
pub use self::exact::ExactCounter;
pub use self::exact::KeyStats;

use crate::error::Error;
use crate::event::Event;

/// A ranked resource and the bytes attributed to it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TopResource {
    key: String,
    size: u64,
}

impl TopResource {
    /// Creates a result entry.
    pub fn new(key: impl Into<String>, size: u64) -> Self {
        Self {
            key: key.into(),
            size,
        }
    }

    /// Returns the resource key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns the cumulative (or estimated cumulative) bytes of the resource.
    pub fn size(&self) -> u64 {
        self.size
    }
}

/// Counts `events` exactly and returns the `k` most frequent keys with their
/// total sizes.
///
/// Memory grows with the number of distinct keys.
pub fn exact_top_k<I>(events: I, k: usize) -> Vec<TopResource>
where
    I: IntoIterator<Item = Event>,
{
    let mut counter = ExactCounter::new();
    counter.extend(events);
    counter.top_k(k)
}

/// Estimates the `k` most frequent keys of `events` and their sizes with two
/// `depth × width` Count-Min sketches seeded with `seed`.
///
/// The configuration is validated before any event is consumed.
pub fn approximate_top_k<I>(
    events: I,
    k: usize,
    depth: usize,
    width: usize,
    seed: u64,
) -> Result<Vec<TopResource>, Error>
where
    I: IntoIterator<Item = Event>,
{
    let mut counter = ApproximateCounter::new(ApproximateConfig {
        k,
        depth,
        width,
        seed,
    })?;
    counter.extend(events);
    Ok(counter.finish())
}
