//! Static partitioning of the file list into per-worker segments.
//!
//! Segments are contiguous and in input order. Every segment but the last
//! holds `len / workers` items; the last one also takes the remainder. With
//! fewer items than workers the leading segments are empty.

use std::ops::Range;

use crate::error::{LexIndexError, Result};

/// Splits an ordered item list into one contiguous segment per worker.
#[derive(Debug, Clone, Copy)]
pub struct SegmentPartitioner {
    worker_count: usize,
}

impl SegmentPartitioner {
    /// Create a partitioner for `worker_count` workers.
    pub fn new(worker_count: usize) -> Result<Self> {
        if worker_count == 0 {
            return Err(LexIndexError::invalid_argument(
                "Partition count cannot be zero",
            ));
        }
        Ok(Self { worker_count })
    }

    /// Number of segments produced.
    pub fn worker_count(&self) -> usize {
        self.worker_count
    }

    /// Index ranges of each segment for a list of `len` items.
    pub fn segments(&self, len: usize) -> Vec<Range<usize>> {
        let segment_len = len / self.worker_count;
        (0..self.worker_count)
            .map(|i| {
                let start = segment_len * i;
                let end = if i + 1 == self.worker_count {
                    len
                } else {
                    start + segment_len
                };
                start..end
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_workers_rejected() {
        assert!(matches!(
            SegmentPartitioner::new(0),
            Err(LexIndexError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_last_segment_absorbs_remainder() {
        let partitioner = SegmentPartitioner::new(3).unwrap();
        assert_eq!(partitioner.segments(10), vec![0..3, 3..6, 6..10]);
    }

    #[test]
    fn test_fewer_items_than_workers() {
        let partitioner = SegmentPartitioner::new(4).unwrap();
        let segments = partitioner.segments(2);

        assert_eq!(segments.len(), 4);
        assert!(segments[..3].iter().all(|s| s.is_empty()));
        assert_eq!(segments[3], 0..2);
    }

    #[test]
    fn test_single_worker_takes_everything() {
        let partitioner = SegmentPartitioner::new(1).unwrap();
        assert_eq!(partitioner.segments(7), vec![0..7]);
    }

    #[test]
    fn test_coverage_for_many_shapes() {
        for len in 0..40 {
            let items: Vec<usize> = (0..len).collect();
            for workers in 1..12 {
                let partitioner = SegmentPartitioner::new(workers).unwrap();
                let segments: Vec<&[usize]> = partitioner
                    .segments(len)
                    .into_iter()
                    .map(|range| &items[range])
                    .collect();
                assert_eq!(segments.len(), workers);

                let flattened: Vec<usize> = segments.concat();
                assert_eq!(flattened, items, "len={len} workers={workers}");

                let base = len / workers;
                for segment in &segments[..workers - 1] {
                    assert_eq!(segment.len(), base);
                }
                assert_eq!(segments[workers - 1].len(), len - base * (workers - 1));
            }
        }
    }
}
