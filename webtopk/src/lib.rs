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

//! # webtopk
//!
//! Single-pass estimation of the most requested web resources and the bytes
//! transferred for each.
//!
//! Two strategies share one decoded event stream:
//!
//! - [`counter::exact_top_k`] keeps full per-key statistics. Its memory grows
//!   with the number of distinct resources, which makes it the ground truth
//!   for small inputs.
//! - [`counter::approximate_top_k`] drives a bounded top-K candidate set from
//!   two Count-Min sketches. Its memory is fixed by the sketch dimensions.
//!
//! [`accuracy::evaluate`] compares the two results.

#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod accuracy;
pub mod counter;
pub mod countmin;
pub mod error;
pub mod event;
pub mod topk;

mod hash;
