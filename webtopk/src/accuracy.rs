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

//! Accuracy of an approximate top-K result against the exact one.
//!
//! * `recall` is the share of ground-truth keys that the candidate list
//!   reports.
//! * `precision` is the mean size agreement `min / max` over the keys the two
//!   lists share.
//! * `f1` is the harmonic mean of both.
//!
//! A metric whose denominator would be zero is undefined and reported as
//! `None`, never as zero.
//!
//! # Usage
//!
//! ```rust
//! # use webtopk::accuracy::evaluate;
//! # use webtopk::counter::TopResource;
//! let truth = vec![TopResource::new("/a", 100), TopResource::new("/b", 50)];
//! let found = vec![TopResource::new("/a", 110), TopResource::new("/c", 40)];
//!
//! let accuracy = evaluate(&truth, &found);
//! assert_eq!(accuracy.recall, Some(0.5));
//! assert_eq!(accuracy.precision, Some(100.0 / 110.0));
//! assert!(accuracy.f1.unwrap() > 0.6);
//! ```

use std::collections::HashMap;
use std::collections::HashSet;

use crate::counter::TopResource;

/// Recall, precision and F1 of one comparison.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Accuracy {
    /// Share of ground-truth keys present in the candidate list.
    pub recall: Option<f64>,
    /// Mean size agreement over shared keys.
    pub precision: Option<f64>,
    /// Harmonic mean of recall and precision.
    pub f1: Option<f64>,
}

/// Compares `results` against the ground truth `truth`.
pub fn evaluate(truth: &[TopResource], results: &[TopResource]) -> Accuracy {
    let recall = recall(truth, results);
    let precision = precision(truth, results);
    let f1 = match (precision, recall) {
        (Some(p), Some(r)) => f1(p, r),
        _ => None,
    };
    Accuracy {
        recall,
        precision,
        f1,
    }
}

/// Returns `|results ∩ truth| / |truth|`, or `None` when `truth` is empty.
pub fn recall(truth: &[TopResource], results: &[TopResource]) -> Option<f64> {
    if truth.is_empty() {
        return None;
    }
    let keys: HashSet<&str> = truth.iter().map(TopResource::key).collect();
    let hits = results.iter().filter(|r| keys.contains(r.key())).count();
    Some(hits as f64 / truth.len() as f64)
}

/// Returns the mean of `min(t, r) / max(t, r)` over the sizes of keys present
/// in both lists, or `None` when they share no key.
///
/// A shared key whose sizes are both zero agrees perfectly.
pub fn precision(truth: &[TopResource], results: &[TopResource]) -> Option<f64> {
    let sizes: HashMap<&str, u64> = truth.iter().map(|t| (t.key(), t.size())).collect();
    let mut total = 0.0;
    let mut matched = 0usize;
    for result in results {
        let Some(&expected) = sizes.get(result.key()) else {
            continue;
        };
        let (low, high) = if expected <= result.size() {
            (expected, result.size())
        } else {
            (result.size(), expected)
        };
        total += if high == 0 {
            1.0
        } else {
            low as f64 / high as f64
        };
        matched += 1;
    }
    (matched > 0).then(|| total / matched as f64)
}

/// Returns `2pr / (p + r)`, or `None` when `p + r` is zero.
pub fn f1(precision: f64, recall: f64) -> Option<f64> {
    let sum = precision + recall;
    (sum > 0.0).then(|| 2.0 * precision * recall / sum)
}
