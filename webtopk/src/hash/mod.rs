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

//! Hash family used by the frequency sketches.
//!
//! Every sketch row owns a 32-bit MurmurHash3 seed. The row seeds are derived
//! from the single configured seed with SplitMix64, so two sketches built with
//! the same `(depth, seed)` hash every key to the same columns on every run.

mod murmurhash;

pub(crate) use self::murmurhash::bucket_of;

/// Derives `depth` row seeds from `seed`.
///
/// Row `r` takes the low 32 bits of the `r + 1`-th SplitMix64 output when the
/// generator starts at `seed`.
pub(crate) fn derive_row_seeds(seed: u64, depth: usize) -> Vec<u32> {
    let mut state = seed;
    (0..depth).map(|_| splitmix64(&mut state) as u32).collect()
}

fn splitmix64(state: &mut u64) -> u64 {
    *state = state.wrapping_add(0x9e37_79b9_7f4a_7c15);
    let mut z = *state;
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_splitmix64_reference_sequence() {
        let mut state = 0;
        assert_eq!(splitmix64(&mut state), 0xe220_a839_7b1d_cdaf);
        assert_eq!(splitmix64(&mut state), 0x6e78_9e6a_a1b9_65f4);
    }

    #[test]
    fn test_row_seeds_are_reproducible() {
        let a = derive_row_seeds(42, 10);
        let b = derive_row_seeds(42, 10);
        assert_eq!(a, b);
        assert_eq!(a.len(), 10);

        let prefix = derive_row_seeds(42, 3);
        assert_eq!(&a[..3], prefix.as_slice());
    }

    #[test]
    fn test_row_seeds_are_distinct() {
        let seeds = derive_row_seeds(0, 16);
        let mut sorted = seeds.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), seeds.len());
        assert_ne!(derive_row_seeds(0, 4), derive_row_seeds(1, 4));
    }
}
