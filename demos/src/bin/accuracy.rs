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

//! Compares the approximate strategy against the exact one on a synthetic
//! access log and reports recall, precision and F1.

use clap::Parser;
use demos::synthetic::random_records;
use webtopk::accuracy::evaluate;
use webtopk::counter::TopResource;
use webtopk::counter::approximate_top_k;
use webtopk::counter::exact_top_k;
use webtopk::event::Event;
use webtopk::event::SuccessfulGet;
use webtopk::event::qualifying_events;

#[derive(Debug, Parser)]
#[command(about = "Accuracy of sketch-based top-K on a synthetic log")]
struct Args {
    /// Number of log lines generated.
    #[arg(long, default_value_t = 200_000)]
    events: usize,
    /// Share of one-off random requests, in [0, 1].
    #[arg(long, default_value_t = 0.2)]
    noise: f64,
    /// Seed of the log generator.
    #[arg(long, default_value_t = 0)]
    log_seed: u64,
    /// Number of resources compared.
    #[arg(long, default_value_t = 5)]
    k: usize,
    /// Sketch depth (hash rows).
    #[arg(long, default_value_t = 10)]
    depth: usize,
    /// Sketch width (buckets per row).
    #[arg(long, default_value_t = 2_000)]
    width: usize,
    /// Sketch hash seed.
    #[arg(long, default_value_t = 0)]
    seed: u64,
}

fn main() -> anyhow::Result<()> {
    demos::init_logging();
    let args = Args::parse();
    anyhow::ensure!(
        (0.0..=1.0).contains(&args.noise),
        "noise must be in [0, 1], got {}",
        args.noise
    );

    tracing::info!(events = args.events, noise = args.noise, "generating log");
    let records = random_records(args.events, args.log_seed, args.noise);
    let events: Vec<Event> = qualifying_events(records, SuccessfulGet).collect();
    tracing::info!(qualifying = events.len(), "counting");

    let exact = exact_top_k(events.clone(), args.k);
    let approximate = approximate_top_k(events, args.k, args.depth, args.width, args.seed)?;

    print_results("exact", &exact);
    print_results("approximate", &approximate);

    let accuracy = evaluate(&exact, &approximate);
    println!(
        "recall: {}  precision: {}  f1: {}",
        format_metric(accuracy.recall),
        format_metric(accuracy.precision),
        format_metric(accuracy.f1)
    );
    Ok(())
}

fn print_results(label: &str, results: &[TopResource]) {
    println!("{label}:");
    for result in results {
        println!("  {} {}", result.key(), result.size());
    }
}

fn format_metric(metric: Option<f64>) -> String {
    match metric {
        Some(value) => format!("{value:.4}"),
        None => "undefined".to_string(),
    }
}
