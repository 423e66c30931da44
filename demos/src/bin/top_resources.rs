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

//! Finds the most frequently requested resources of an access log and their
//! cumulative bytes transferred.
//!
//! ```text
//! cargo run --bin top_resources -- access.log deterministic
//! cargo run --bin top_resources -- access.log probabilistic --width 20000
//! ```

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use clap::ValueEnum;
use demos::clf::LogRecords;
use webtopk::counter::ApproximateConfig;
use webtopk::counter::approximate_top_k;
use webtopk::counter::exact_top_k;
use webtopk::event::SuccessfulGet;
use webtopk::event::qualifying_events;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Mode {
    /// Count every resource exactly.
    Deterministic,
    /// Estimate with Count-Min sketches in bounded memory.
    Probabilistic,
}

#[derive(Debug, Parser)]
#[command(about = "Top requested resources and their bytes transferred")]
struct Args {
    /// Access log in Common Log Format.
    file: PathBuf,
    /// Counting strategy.
    #[arg(value_enum, default_value_t = Mode::Probabilistic)]
    mode: Mode,
    /// Number of resources to report.
    #[arg(long, default_value_t = ApproximateConfig::default().k)]
    k: usize,
    /// Sketch depth (hash rows).
    #[arg(long, default_value_t = ApproximateConfig::default().depth)]
    depth: usize,
    /// Sketch width (buckets per row).
    #[arg(long, default_value_t = ApproximateConfig::default().width)]
    width: usize,
    /// Sketch hash seed.
    #[arg(long, default_value_t = ApproximateConfig::default().seed)]
    seed: u64,
}

fn main() -> anyhow::Result<()> {
    demos::init_logging();
    let args = Args::parse();

    let file = File::open(&args.file)
        .with_context(|| format!("could not open {}", args.file.display()))?;
    let mut records = LogRecords::new(BufReader::new(file));
    let events = qualifying_events(&mut records, SuccessfulGet);

    let results = match args.mode {
        Mode::Deterministic => exact_top_k(events, args.k),
        Mode::Probabilistic => {
            approximate_top_k(events, args.k, args.depth, args.width, args.seed)?
        }
    };
    let skipped = records
        .finish()
        .with_context(|| format!("could not read {}", args.file.display()))?;
    if skipped > 0 {
        tracing::info!(skipped, "finished with undecodable lines");
    }

    for result in results {
        println!("{} {}", result.key(), result.size());
    }
    Ok(())
}
