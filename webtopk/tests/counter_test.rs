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

mod common;

use common::random_events;
use common::skewed_events;
use googletest::assert_that;
use googletest::prelude::eq;
use googletest::prelude::ge;
use webtopk::accuracy::evaluate;
use webtopk::counter::ApproximateCounter;
use webtopk::counter::ExactCounter;
use webtopk::counter::TopResource;
use webtopk::counter::approximate_top_k;
use webtopk::counter::exact_top_k;
use webtopk::error::ErrorKind;
use webtopk::event::Event;

fn scenario_a() -> Vec<Event> {
    let mut events = vec![Event::new("/a", 100); 3];
    events.extend(vec![Event::new("/b", 50); 2]);
    events
}

#[test]
fn test_exact_scenario() {
    let top = exact_top_k(scenario_a(), 1);
    assert_eq!(top, vec![TopResource::new("/a", 300)]);
    assert_eq!(
        exact_top_k(scenario_a(), 5),
        vec![TopResource::new("/a", 300), TopResource::new("/b", 100)]
    );
}

#[test]
fn test_zero_k_is_empty_for_both() {
    let events = random_events(1_000, 1, 0.2);
    assert!(!events.is_empty());
    assert!(exact_top_k(events.clone(), 0).is_empty());
    let approximate = approximate_top_k(events, 0, 10, 100, 0).unwrap();
    assert!(approximate.is_empty());
}

#[test]
fn test_single_key_is_exact_for_any_dimensions() {
    let events: Vec<Event> = (0..250u64).map(|i| Event::new("/only", i % 13)).collect();
    let exact = exact_top_k(events.clone(), 3);
    for (depth, width) in [(1, 1), (1, 7), (10, 1), (4, 10_000)] {
        let approximate = approximate_top_k(events.clone(), 3, depth, width, 99);
        let approximate = approximate.unwrap();
        assert_eq!(approximate, exact, "depth {depth}, width {width}");
    }
}

#[test]
fn test_wide_sketch_matches_exact_top_five() {
    let distinct = 400;
    let events = skewed_events(20_000, distinct, 5);
    let exact = exact_top_k(events.clone(), 5);
    let approximate = approximate_top_k(events, 5, 10, 10 * distinct, 0).unwrap();

    let accuracy = evaluate(&exact, &approximate);
    assert_that!(accuracy.recall, eq(Some(1.0)));
    assert_that!(accuracy.precision.unwrap(), ge(0.95));
}

#[test]
fn test_approximate_is_deterministic() {
    let events = random_events(20_000, 3, 0.3);
    let first = approximate_top_k(events.clone(), 10, 4, 300, 12).unwrap();
    let second = approximate_top_k(events, 10, 4, 300, 12).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.len(), 10);
}

#[test]
fn test_sizes_never_underestimated() {
    let events = skewed_events(10_000, 2_000, 17);
    let mut exact = ExactCounter::new();
    exact.extend(events.clone());
    let approximate = approximate_top_k(events, 20, 3, 200, 0).unwrap();
    for resource in &approximate {
        let stats = exact.stats(resource.key()).unwrap();
        assert_that!(resource.size(), ge(stats.size()));
    }
}

#[test]
fn test_invalid_configuration() {
    let err = approximate_top_k(scenario_a(), 1, 10, 0, 0).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
    assert_eq!(err.context("width"), Some("0"));
}

#[test]
fn test_sharded_counting_matches_single_pass() {
    // Eight resources dominate every shard; the long tail stays far below.
    let mut events = Vec::new();
    for hot in 0..8u64 {
        let copies = 2_000 - 100 * hot as usize;
        let event = Event::new(format!("/hot{hot}"), 100 + hot);
        events.extend(vec![event; copies]);
    }
    events.extend(skewed_events(4_000, 300, 9));
    let build = || {
        ApproximateCounter::builder()
            .k(8)
            .depth(10)
            .width(3_000)
            .seed(4)
            .build()
            .unwrap()
    };

    let mut single = build();
    single.extend(events.clone());

    let mut shards = [build(), build(), build(), build()];
    for (i, event) in events.into_iter().enumerate() {
        shards[i % 4].update(&event);
    }
    let [mut merged, rest @ ..] = shards;
    for shard in &rest {
        merged.merge(shard).unwrap();
    }

    assert_eq!(merged.count_sketch(), single.count_sketch());
    assert_eq!(merged.size_sketch(), single.size_sketch());
    assert_eq!(merged.events_seen(), single.events_seen());
    assert_eq!(merged.finish(), single.finish());
}
