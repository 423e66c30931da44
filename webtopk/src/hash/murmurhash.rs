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

/// Maps `key` to a column in `[0, width)` for the row seeded with `seed`.
///
/// The column is the first 64-bit half of MurmurHash3 x64-128 over the UTF-8
/// bytes of the key, reduced modulo `width`. `width` must be positive.
#[inline]
pub(crate) fn bucket_of(key: &str, seed: u32, width: usize) -> usize {
    let (h1, _) = mur3::murmurhash3_x64_128(key.as_bytes(), seed);
    (h1 % width as u64) as usize
}

#[cfg(test)]
mod tests {
    use super::bucket_of;

    #[test]
    fn test_reference_vectors() {
        // remainder > 8
        let key = "The quick brown fox jumps over the lazy dog";
        let (h1, h2) = mur3::murmurhash3_x64_128(key.as_bytes(), 0);
        assert_eq!(h1, 0xe34bbc7bbc071b6c);
        assert_eq!(h2, 0x7a433ca9c49a9347);

        // remainder = 0
        let key = "The quick brown fox jumps over t";
        let (h1, h2) = mur3::murmurhash3_x64_128(key.as_bytes(), 0);
        assert_eq!(h1, 0xdf6af91bb29bdacf);
        assert_eq!(h2, 0x91a341c58df1f3a6);
    }

    #[test]
    fn test_bucket_uses_first_half() {
        let key = "The quick brown fox jumps over the lazy dog";
        assert_eq!(
            bucket_of(key, 0, 1000),
            (0xe34bbc7bbc071b6cu64 % 1000) as usize
        );
    }

    #[test]
    fn test_bucket_in_range() {
        for width in [1usize, 2, 7, 100, 10_000] {
            for path in ["/", "/index.html", "/images/ksclogosmall.gif", ""] {
                assert!(bucket_of(path, 17, width) < width);
            }
        }
        assert_eq!(bucket_of("/anything", 3, 1), 0);
    }
}
