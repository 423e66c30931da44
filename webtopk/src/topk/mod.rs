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

//! Bounded top-K candidate selection.
//!
//! [`TopKSelector`] keeps at most `k` [`Candidate`]s, unique by key, ranked by
//! estimate descending and then key ascending. Ties are resolved by key order
//! alone, so results never depend on insertion order or hash iteration order.
//!
//! # Usage
//!
//! ```rust
//! # use webtopk::topk::TopKSelector;
//! let mut selector = TopKSelector::new(2);
//! selector.upsert("/a", 5);
//! selector.upsert("/b", 3);
//! selector.upsert("/a", 9);
//! selector.upsert("/c", 4);
//!
//! let ranked: Vec<_> = selector
//!     .snapshot()
//!     .into_iter()
//!     .map(|c| (c.key().to_string(), c.estimate()))
//!     .collect();
//! assert_eq!(ranked, [("/a".to_string(), 9), ("/c".to_string(), 4)]);
//! ```

mod selector;

pub use self::selector::Candidate;
pub use self::selector::TopKSelector;
