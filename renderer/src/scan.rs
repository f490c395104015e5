// facet/renderer/src/scan.rs
//
// Copyright © 2024 The Facet Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Multi-level exclusive prefix sums.
//!
//! Each workgroup scans its own chunk of the input and reduces it to a total (the upsweep). The
//! totals are scanned the same way, recursively, and then added back into every chunk (the
//! downsweep). With 256-wide workgroups three levels cover sixteen million items, which is the
//! limit a single dispatch level can address.

use facet_arrangement::concurrent::executor::Executor;

pub const WORKGROUP_SIZE: usize = 256;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScanResult {
    /// `offsets[i]` is the sum of `counts[..i]`.
    pub offsets: Vec<u32>,
    pub total: u32,
}

pub fn exclusive_scan<E>(counts: &[u32], workgroup_size: usize, executor: &E) -> ScanResult
                         where E: Executor {
    let workgroup_size = workgroup_size.max(2);
    let chunk_count = (counts.len() + workgroup_size - 1) / workgroup_size;

    let chunks: Vec<(Vec<u32>, u32)> = executor.build_vector(chunk_count, |chunk_index| {
        let start = chunk_index * workgroup_size;
        let end = (start + workgroup_size).min(counts.len());
        let mut sum = 0;
        let mut offsets = Vec::with_capacity(end - start);
        for &count in &counts[start..end] {
            offsets.push(sum);
            sum += count;
        }
        (offsets, sum)
    });

    let reductions: Vec<u32> = chunks.iter().map(|&(_, reduction)| reduction).collect();
    let chunk_offsets = if reductions.len() <= 1 {
        ScanResult {
            offsets: vec![0; reductions.len()],
            total: reductions.first().cloned().unwrap_or(0),
        }
    } else {
        exclusive_scan(&reductions, workgroup_size, executor)
    };

    let offsets = executor.flatten_into_vector(chunk_count, |chunk_index| {
        let base = chunk_offsets.offsets[chunk_index];
        chunks[chunk_index].0.iter().map(|&offset| base + offset).collect()
    });
    ScanResult { offsets, total: chunk_offsets.total }
}

#[cfg(test)]
mod test {
    use super::{exclusive_scan, WORKGROUP_SIZE};
    use facet_arrangement::concurrent::executor::SequentialExecutor;
    use facet_arrangement::concurrent::rayon::RayonExecutor;

    fn reference(counts: &[u32]) -> (Vec<u32>, u32) {
        let mut sum = 0;
        let offsets = counts.iter().map(|&count| {
            let offset = sum;
            sum += count;
            offset
        }).collect();
        (offsets, sum)
    }

    #[test]
    fn test_multiple_levels() {
        let counts: Vec<u32> = (0..100).map(|index| index % 7).collect();
        let result = exclusive_scan(&counts, 4, &SequentialExecutor);
        let (offsets, total) = reference(&counts);
        assert_eq!(result.offsets, offsets);
        assert_eq!(result.total, total);
    }

    #[test]
    fn test_empty() {
        let result = exclusive_scan(&[], WORKGROUP_SIZE, &SequentialExecutor);
        assert!(result.offsets.is_empty());
        assert_eq!(result.total, 0);
    }

    #[test]
    fn test_matches_sequential_prefix_sum() {
        fn prop(counts: Vec<u8>, workgroup_size: u8) -> bool {
            let counts: Vec<u32> = counts.into_iter().map(|count| count as u32).collect();
            let workgroup_size = workgroup_size as usize % 9 + 2;
            let (offsets, total) = reference(&counts);
            let sequential = exclusive_scan(&counts, workgroup_size, &SequentialExecutor);
            let parallel = exclusive_scan(&counts, workgroup_size, &RayonExecutor);
            sequential.offsets == offsets && sequential.total == total && sequential == parallel
        }
        quickcheck::quickcheck(prop as fn(Vec<u8>, u8) -> bool);
    }
}
