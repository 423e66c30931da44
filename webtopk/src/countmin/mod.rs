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

//! Count-Min sketch used as the frequency sketch of the approximate counter.
//!
//! The sketch keeps a fixed `depth × width` matrix of counters. Updates add to
//! one counter per row and queries take the minimum across rows, so estimates
//! can only overstate the true cumulative amount of a key.
//!
//! # Usage
//!
//! ```rust
//! # use webtopk::countmin::CountMinSketch;
//! let mut sketch = CountMinSketch::new(5, 256, 0).unwrap();
//! sketch.increment("/index.html", 1);
//! sketch.increment("/logo.gif", 3635);
//! assert!(sketch.estimate("/logo.gif") >= 3635);
//! ```
//!
//! # Configuration Helpers
//!
//! ```rust
//! # use webtopk::countmin::CountMinSketch;
//! let width = CountMinSketch::suggest_num_buckets(0.01);
//! let depth = CountMinSketch::suggest_num_hashes(0.99);
//! let sketch = CountMinSketch::new(depth, width, 0).unwrap();
//! assert!(sketch.relative_error() <= 0.01);
//! ```

mod sketch;
pub use self::sketch::CountMinSketch;
