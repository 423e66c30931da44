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

//! Synthetic access-log streams shared by the integration tests.

#![allow(dead_code)]

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;
use webtopk::event::AccessRecord;
use webtopk::event::Event;
use webtopk::event::SuccessfulGet;
use webtopk::event::qualifying_events;

/// Recurring requests: a small set of popular resources with fixed sizes.
///
/// Keep this table and the record generator below identical to
/// `demos/src/synthetic.rs`, so the `accuracy` demo reproduces the numbers
/// these tests assert.
const POPULAR: [(&str, &str, u16, u64); 9] = [
    ("GET", "/images/opf-logo.gif", 200, 32511),
    ("GET", "/images/ksclogosmall.gif", 200, 3635),
    ("GET", "/images/ksclogosmall.gif", 403, 298),
    ("GET", "/images/example.variable.gif", 200, 5512),
    ("GET", "/images/example.variable.gif", 200, 4125),
    ("GET", "/home.html", 200, 5326),
    ("POST", "/postFile", 201, 3255125),
    ("GET", "/live-lb", 200, 10),
    ("GET", "/live-lb", 404, 10),
];

/// Number of distinct keys in [`POPULAR`] that pass [`SuccessfulGet`].
pub const POPULAR_QUALIFYING_KEYS: usize = 5;

/// Generates `num_events` records. A `noise` share of them are one-off
/// requests for random resources with random methods, statuses and sizes.
pub fn random_records(num_events: usize, seed: u64, noise: f64) -> Vec<AccessRecord> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..num_events)
        .map(|_| {
            if rng.random_bool(noise) {
                let method = if rng.random_bool(0.5) { "GET" } else { "PUT" };
                let path = format!("/{}", rng.random::<i32>());
                let status = if rng.random_bool(0.5) { 200 } else { 400 };
                AccessRecord::new(method, path, status, rng.random_range(0..200_000))
            } else {
                let (method, path, status, size) = POPULAR[rng.random_range(0..POPULAR.len())];
                AccessRecord::new(method, path, status, size)
            }
        })
        .collect()
}

/// Generates the qualifying events of [`random_records`].
pub fn random_events(num_events: usize, seed: u64, noise: f64) -> Vec<Event> {
    let records = random_records(num_events, seed, noise);
    qualifying_events(records, SuccessfulGet).collect()
}

/// Generates events over `num_keys` keys where key `i` occurs roughly in
/// proportion to `1 / (i + 1)`, with sizes drawn per event.
pub fn skewed_events(num_events: usize, num_keys: usize, seed: u64) -> Vec<Event> {
    let mut rng = StdRng::seed_from_u64(seed);
    let weights: Vec<f64> = (0..num_keys).map(|i| 1.0 / (i + 1) as f64).collect();
    let total: f64 = weights.iter().sum();
    (0..num_events)
        .map(|_| {
            let mut target = rng.random_range(0.0..total);
            let mut key = num_keys - 1;
            for (i, weight) in weights.iter().enumerate() {
                if target < *weight {
                    key = i;
                    break;
                }
                target -= weight;
            }
            Event::new(format!("/resource/{key}"), rng.random_range(1..5_000))
        })
        .collect()
}
