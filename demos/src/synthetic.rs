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

//! Synthetic access logs: a fixed mix of popular requests plus a share of
//! one-off requests that inflates key cardinality.

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;
use webtopk::event::AccessRecord;

// Mirrored in `webtopk/tests/common/mod.rs`; change both together.
const POPULAR: [(&str, &str, u16, u64); 9] = [
    ("GET", "/images/opf-logo.gif", 200, 32511),
    ("GET", "/images/ksclogosmall.gif", 200, 3635),
    ("GET", "/images/ksclogosmall.gif", 403, 298),
    ("GET", "/images/example.variable.gif", 200, 5512),
    ("GET", "/images/example.variable.gif", 200, 4125),
    ("GET", "/home.html", 200, 5326),
    ("POST", "/postFile", 201, 3255125),
    // small sizes are the most sensitive to colliding bytes
    ("GET", "/live-lb", 200, 10),
    ("GET", "/live-lb", 404, 10),
];

/// Iterator over synthetic access records.
#[derive(Debug)]
pub struct RandomRecords {
    rng: StdRng,
    noise: f64,
    remaining: usize,
}

/// Returns `num_events` records; each is a one-off random request with
/// probability `noise`.
///
/// # Panics
///
/// Panics if `noise` is not in `[0, 1]`.
pub fn random_records(num_events: usize, seed: u64, noise: f64) -> RandomRecords {
    assert!(
        (0.0..=1.0).contains(&noise),
        "noise must be in [0, 1], got {noise}"
    );
    RandomRecords {
        rng: StdRng::seed_from_u64(seed),
        noise,
        remaining: num_events,
    }
}

impl Iterator for RandomRecords {
    type Item = AccessRecord;

    fn next(&mut self) -> Option<AccessRecord> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;

        let rng = &mut self.rng;
        if rng.random_bool(self.noise) {
            let method = if rng.random_bool(0.5) { "GET" } else { "PUT" };
            let path = format!("/{}", rng.random::<i32>());
            let status = if rng.random_bool(0.5) { 200 } else { 400 };
            let size = rng.random_range(0..200_000);
            Some(AccessRecord::new(method, path, status, size))
        } else {
            let (method, path, status, size) = POPULAR[rng.random_range(0..POPULAR.len())];
            Some(AccessRecord::new(method, path, status, size))
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}
