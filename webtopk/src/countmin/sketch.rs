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

use crate::error::Error;
use crate::hash::bucket_of;
use crate::hash::derive_row_seeds;

/// Count-Min sketch over string keys with `u64` counters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountMinSketch {
    num_hashes: usize,
    num_buckets: usize,
    seed: u64,
    row_seeds: Vec<u32>,
    counters: Vec<u64>,
    total_weight: u64,
}

impl CountMinSketch {
    /// Creates a zeroed sketch with `depth` rows of `width` counters each.
    ///
    /// The per-row hash seeds are derived from `seed`, so two sketches built
    /// with the same arguments hash every key identically.
    ///
    /// Returns a [`ConfigInvalid`](crate::error::ErrorKind::ConfigInvalid)
    /// error if `depth` or `width` is zero, or if the matrix size overflows.
    ///
    /// # Examples
    ///
    /// ```
    /// # use webtopk::countmin::CountMinSketch;
    /// # use webtopk::error::ErrorKind;
    /// let sketch = CountMinSketch::new(10, 2_000, 0).unwrap();
    /// assert_eq!(sketch.num_hashes(), 10);
    /// assert!(sketch.is_empty());
    ///
    /// let err = CountMinSketch::new(0, 2_000, 0).unwrap_err();
    /// assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
    /// ```
    pub fn new(depth: usize, width: usize, seed: u64) -> Result<Self, Error> {
        if depth == 0 {
            let err = Error::config("depth must be positive");
            return Err(err.with_context("depth", depth));
        }
        if width == 0 {
            let err = Error::config("width must be positive");
            return Err(err.with_context("width", width));
        }
        let cells = depth.checked_mul(width).ok_or_else(|| {
            Error::config("sketch size overflows")
                .with_context("depth", depth)
                .with_context("width", width)
        })?;

        Ok(Self {
            num_hashes: depth,
            num_buckets: width,
            seed,
            row_seeds: derive_row_seeds(seed, depth),
            counters: vec![0; cells],
            total_weight: 0,
        })
    }

    /// Returns the number of hash rows (depth).
    pub fn num_hashes(&self) -> usize {
        self.num_hashes
    }

    /// Returns the number of buckets per row (width).
    pub fn num_buckets(&self) -> usize {
        self.num_buckets
    }

    /// Returns the seed the row hashes were derived from.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Returns the sum of all amounts added to the sketch.
    pub fn total_weight(&self) -> u64 {
        self.total_weight
    }

    /// Returns true if nothing has been added to the sketch.
    pub fn is_empty(&self) -> bool {
        self.total_weight == 0
    }

    /// Returns the relative error `e / width` of a single estimate.
    pub fn relative_error(&self) -> f64 {
        std::f64::consts::E / self.num_buckets as f64
    }

    /// Suggests the number of buckets for a target relative error.
    ///
    /// # Panics
    ///
    /// Panics if `relative_error` is not in `(0, 1)`.
    pub fn suggest_num_buckets(relative_error: f64) -> usize {
        assert!(
            relative_error > 0.0 && relative_error < 1.0,
            "relative_error must be in (0, 1), got {relative_error}"
        );
        (std::f64::consts::E / relative_error).ceil() as usize
    }

    /// Suggests the number of hash rows for a target confidence.
    ///
    /// # Panics
    ///
    /// Panics if `confidence` is not in `(0, 1)`.
    pub fn suggest_num_hashes(confidence: f64) -> usize {
        assert!(
            confidence > 0.0 && confidence < 1.0,
            "confidence must be in (0, 1), got {confidence}"
        );
        ((1.0 / (1.0 - confidence)).ln().ceil() as usize).max(1)
    }

    /// Adds `amount` to the counter of `key` in every row.
    ///
    /// Counters saturate at `u64::MAX` instead of wrapping.
    ///
    /// # Examples
    ///
    /// ```
    /// # use webtopk::countmin::CountMinSketch;
    /// let mut sketch = CountMinSketch::new(3, 64, 7).unwrap();
    /// sketch.increment("/a", 2);
    /// sketch.increment("/a", 5);
    /// assert_eq!(sketch.estimate("/a"), 7);
    /// assert_eq!(sketch.total_weight(), 7);
    /// ```
    pub fn increment(&mut self, key: &str, amount: u64) {
        self.total_weight = self.total_weight.saturating_add(amount);
        for row in 0..self.num_hashes {
            let index = self.cell(row, key);
            self.counters[index] = self.counters[index].saturating_add(amount);
        }
    }

    /// Returns the estimated cumulative amount of `key`.
    ///
    /// The estimate is the minimum over rows and is never below the true
    /// cumulative amount; hash collisions can only inflate it.
    pub fn estimate(&self, key: &str) -> u64 {
        (0..self.num_hashes)
            .map(|row| self.counters[self.cell(row, key)])
            .min()
            .unwrap_or(0)
    }

    /// Returns an upper bound on the true amount of `key` that holds with the
    /// sketch's configured confidence.
    pub fn upper_bound(&self, key: &str) -> u64 {
        let slack = self.relative_error() * self.total_weight as f64;
        self.estimate(key).saturating_add(slack as u64)
    }

    /// Adds the counters of `other` into this sketch.
    ///
    /// Both sketches must share depth, width and seed; otherwise the rows
    /// would not describe the same buckets and a
    /// [`ConfigInvalid`](crate::error::ErrorKind::ConfigInvalid) error is
    /// returned and `self` is left untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// # use webtopk::countmin::CountMinSketch;
    /// let mut left = CountMinSketch::new(3, 64, 0).unwrap();
    /// let mut right = CountMinSketch::new(3, 64, 0).unwrap();
    /// left.increment("/a", 10);
    /// right.increment("/a", 4);
    /// left.merge(&right).unwrap();
    /// assert!(left.estimate("/a") >= 14);
    /// ```
    pub fn merge(&mut self, other: &Self) -> Result<(), Error> {
        if self.num_hashes != other.num_hashes
            || self.num_buckets != other.num_buckets
            || self.seed != other.seed
        {
            let depth = format!("{} vs {}", self.num_hashes, other.num_hashes);
            let width = format!("{} vs {}", self.num_buckets, other.num_buckets);
            let seed = format!("{} vs {}", self.seed, other.seed);
            let err = Error::config("incompatible sketch configuration")
                .with_context("depth", depth)
                .with_context("width", width)
                .with_context("seed", seed);
            return Err(err);
        }
        for (mine, theirs) in self.counters.iter_mut().zip(other.counters.iter()) {
            *mine = mine.saturating_add(*theirs);
        }
        self.total_weight = self.total_weight.saturating_add(other.total_weight);
        Ok(())
    }

    #[inline]
    fn cell(&self, row: usize, key: &str) -> usize {
        row * self.num_buckets + bucket_of(key, self.row_seeds[row], self.num_buckets)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_rejects_zero_dimensions() {
        let err = CountMinSketch::new(0, 10, 0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
        assert_eq!(err.context("depth"), Some("0"));

        let err = CountMinSketch::new(10, 0, 0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
        assert_eq!(err.context("width"), Some("0"));

        let err = CountMinSketch::new(usize::MAX, 2, 0).unwrap_err();
        assert_eq!(err.message(), "sketch size overflows");
    }

    #[test]
    fn test_missing_key_is_zero() {
        let sketch = CountMinSketch::new(4, 32, 1).unwrap();
        assert_eq!(sketch.estimate("/nothing"), 0);
        assert_eq!(sketch.upper_bound("/nothing"), 0);
    }

    #[test]
    fn test_single_bucket_sums_everything() {
        let mut sketch = CountMinSketch::new(3, 1, 0).unwrap();
        sketch.increment("/a", 3);
        sketch.increment("/b", 4);
        assert_eq!(sketch.estimate("/a"), 7);
        assert_eq!(sketch.estimate("/b"), 7);
    }

    #[test]
    fn test_saturates() {
        let mut sketch = CountMinSketch::new(2, 8, 0).unwrap();
        sketch.increment("/a", u64::MAX);
        sketch.increment("/a", 1);
        assert_eq!(sketch.estimate("/a"), u64::MAX);
        assert_eq!(sketch.total_weight(), u64::MAX);
    }

    #[test]
    fn test_merge_rejects_mismatch() {
        let mut left = CountMinSketch::new(3, 64, 0).unwrap();
        left.increment("/a", 1);
        let before = left.clone();

        for other in [
            CountMinSketch::new(4, 64, 0).unwrap(),
            CountMinSketch::new(3, 65, 0).unwrap(),
            CountMinSketch::new(3, 64, 1).unwrap(),
        ] {
            let err = left.merge(&other).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
        }
        assert_eq!(left, before);
    }

    #[test]
    fn test_merge_equals_single_stream() {
        let keys = ["/a", "/b", "/c", "/d", "/e"];
        let mut whole = CountMinSketch::new(4, 16, 9).unwrap();
        let mut left = CountMinSketch::new(4, 16, 9).unwrap();
        let mut right = CountMinSketch::new(4, 16, 9).unwrap();
        for (i, key) in keys.iter().cycle().take(50).enumerate() {
            let amount = i as u64 * 3;
            whole.increment(key, amount);
            if i % 2 == 0 {
                left.increment(key, amount);
            } else {
                right.increment(key, amount);
            }
        }
        left.merge(&right).unwrap();
        assert_eq!(left, whole);
    }

    #[test]
    fn test_parameter_suggestions() {
        assert_eq!(CountMinSketch::suggest_num_buckets(0.2), 14);
        assert_eq!(CountMinSketch::suggest_num_buckets(0.1), 28);
        assert_eq!(CountMinSketch::suggest_num_buckets(0.01), 272);

        assert_eq!(CountMinSketch::suggest_num_hashes(0.682689492), 2);
        assert_eq!(CountMinSketch::suggest_num_hashes(0.954499736), 4);
        assert_eq!(CountMinSketch::suggest_num_hashes(0.997300204), 6);
    }
}
