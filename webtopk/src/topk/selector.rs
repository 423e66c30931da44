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

use std::cmp::Reverse;
use std::collections::BTreeSet;
use std::collections::HashMap;
use std::hash::Hash;
use std::hash::Hasher;

/// A resource key together with its current estimate.
///
/// Two candidates are equal when their keys are equal, whatever their
/// estimates: a key occupies exactly one slot of a [`TopKSelector`].
#[derive(Debug, Clone, Eq)]
pub struct Candidate {
    key: String,
    estimate: u64,
}

impl Candidate {
    /// Creates a candidate.
    pub fn new(key: impl Into<String>, estimate: u64) -> Self {
        Self {
            key: key.into(),
            estimate,
        }
    }

    /// Returns the resource key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns the estimate the candidate was ranked with.
    pub fn estimate(&self) -> u64 {
        self.estimate
    }
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Hash for Candidate {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

const PREALLOCATED_SLOTS: usize = 1024;

// Ranking position: the first element of the set is the best candidate and
// the last one is the next to be evicted.
type Rank = (Reverse<u64>, String);

/// Capacity-limited set of the best candidates seen so far.
#[derive(Debug, Clone, Default)]
pub struct TopKSelector {
    k: usize,
    index: HashMap<String, u64>,
    order: BTreeSet<Rank>,
}

impl TopKSelector {
    /// Creates an empty selector holding at most `k` candidates.
    ///
    /// A selector with `k == 0` accepts upserts but never retains anything.
    pub fn new(k: usize) -> Self {
        Self {
            k,
            index: HashMap::with_capacity(k.min(PREALLOCATED_SLOTS) + 1),
            order: BTreeSet::new(),
        }
    }

    /// Returns the maximum number of candidates retained.
    pub fn capacity(&self) -> usize {
        self.k
    }

    /// Returns the number of candidates currently retained.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Returns true if no candidate is retained.
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Returns true if `key` is currently retained.
    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Returns the estimate `key` is currently ranked with, if retained.
    pub fn estimate_of(&self, key: &str) -> Option<u64> {
        self.index.get(key).copied()
    }

    /// Returns the retained keys in ranking order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(|(_, key)| key.as_str())
    }

    /// Inserts `key` with `estimate`, replacing any entry already held for
    /// `key` whatever its previous estimate.
    ///
    /// If the selector then holds more than `k` candidates, the one with the
    /// smallest estimate is evicted and returned; among equal estimates the
    /// lexically greatest key goes first. The evicted candidate may be the
    /// one just inserted.
    pub fn upsert(&mut self, key: &str, estimate: u64) -> Option<Candidate> {
        match self.index.get_mut(key) {
            Some(current) => {
                let previous = std::mem::replace(current, estimate);
                self.order.remove(&(Reverse(previous), key.to_string()));
            }
            None => {
                self.index.insert(key.to_string(), estimate);
            }
        }
        self.order.insert((Reverse(estimate), key.to_string()));

        if self.index.len() <= self.k {
            return None;
        }
        let (Reverse(evicted), key) = self.order.pop_last()?;
        self.index.remove(&key);
        Some(Candidate {
            key,
            estimate: evicted,
        })
    }

    /// Returns the retained candidates, estimate descending and key
    /// ascending. Does not modify the selector.
    pub fn snapshot(&self) -> Vec<Candidate> {
        self.order
            .iter()
            .map(|(Reverse(estimate), key)| Candidate {
                key: key.clone(),
                estimate: *estimate,
            })
            .collect()
    }

    /// Removes and returns all candidates in ranking order.
    pub(crate) fn drain(&mut self) -> Vec<Candidate> {
        self.index.clear();
        std::mem::take(&mut self.order)
            .into_iter()
            .map(|(Reverse(estimate), key)| Candidate { key, estimate })
            .collect()
    }
}
