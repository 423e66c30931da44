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

//! Decoded access-log records and the predicate that selects which of them
//! are counted.
//!
//! Decoding raw log lines is left to the caller. Both counting strategies
//! consume the same [`Event`] stream produced by [`qualifying_events`], so
//! their inputs are identical.
//!
//! # Usage
//!
//! ```rust
//! # use webtopk::event::{qualifying_events, AccessRecord, SuccessfulGet};
//! let records = vec![
//!     AccessRecord::new("GET", "/index.html", 200, 5326),
//!     AccessRecord::new("POST", "/upload", 201, 3255125),
//!     AccessRecord::new("GET", "/index.html", 404, 10),
//! ];
//! let events: Vec<_> = qualifying_events(records, SuccessfulGet).collect();
//! assert_eq!(events.len(), 1);
//! assert_eq!(events[0].key(), "/index.html");
//! assert_eq!(events[0].amount(), 5326);
//! ```

/// One decoded access-log line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessRecord {
    method: String,
    path: String,
    status: u16,
    size: u64,
}

impl AccessRecord {
    /// Creates a record from its decoded fields.
    pub fn new(method: impl Into<String>, path: impl Into<String>, status: u16, size: u64) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
            status,
            size,
        }
    }

    /// Returns the request method, e.g. `GET`.
    pub fn method(&self) -> &str {
        &self.method
    }

    /// Returns the requested resource.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the response status code.
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Returns the number of bytes transferred.
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Projects the record onto the counted key and amount.
    pub fn into_event(self) -> Event {
        Event {
            key: self.path,
            amount: self.size,
        }
    }
}

/// A counted event: the resource key and the amount added to its size.
///
/// Each event contributes exactly one to its key's occurrence count.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Event {
    key: String,
    amount: u64,
}

impl Event {
    /// Creates an event for `key` carrying `amount` bytes.
    pub fn new(key: impl Into<String>, amount: u64) -> Self {
        Self {
            key: key.into(),
            amount,
        }
    }

    /// Returns the resource key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns the amount added to the key's size.
    pub fn amount(&self) -> u64 {
        self.amount
    }
}

/// Predicate deciding whether a decoded record is counted.
pub trait EventFilter {
    /// Returns true if `record` should be counted.
    fn accept(&self, record: &AccessRecord) -> bool;
}

impl<F> EventFilter for F
where
    F: Fn(&AccessRecord) -> bool,
{
    fn accept(&self, record: &AccessRecord) -> bool {
        self(record)
    }
}

/// Accepts successful `GET` requests: method `GET` and a 2xx status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SuccessfulGet;

impl EventFilter for SuccessfulGet {
    fn accept(&self, record: &AccessRecord) -> bool {
        record.method == "GET" && (200..300).contains(&record.status)
    }
}

/// Filters `records` with `filter` and projects the survivors onto events.
pub fn qualifying_events<I, F>(records: I, filter: F) -> impl Iterator<Item = Event>
where
    I: IntoIterator<Item = AccessRecord>,
    F: EventFilter,
{
    records
        .into_iter()
        .filter(move |record| filter.accept(record))
        .map(AccessRecord::into_event)
}
