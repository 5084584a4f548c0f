use std::ops::Range;

use bstr::ByteSlice;

pub(crate) const NEWLINE: u8 = 10;

/// Splits `buffer` into `workers` contiguous, line-aligned ranges.
///
/// Every inner boundary sits just past the first newline at or after the even
/// split point, or at the end of the buffer when there is none. Ranges may be
/// empty; together they cover the buffer exactly once.
pub fn find_chunk_boundaries(buffer: &[u8], workers: usize) -> Vec<Range<usize>> {
    let workers = workers.max(1);
    let size: usize = buffer.len();

    let mut starts: Vec<usize> = (0..workers)
        .map(| worker | split_point(size, worker, workers))
        .collect();

    for i in 1..workers {
        starts[i] = find_next_newline(starts[i], buffer);
    }

    let mut ends: Vec<usize> = vec![0; workers];
    ends[..(workers - 1)].copy_from_slice(&starts[1..workers]);
    ends[workers - 1] = size;

    starts
        .into_iter()
        .zip(ends)
        .map(| (start, end) | start..end)
        .collect()
}

fn split_point(size: usize, worker: usize, workers: usize) -> usize {
    (size / workers) * worker + (size % workers) * worker / workers
}

fn find_next_newline(start: usize, buffer: &[u8]) -> usize {
    match buffer[start..].find_byte(NEWLINE) {
        Some(position) => start + position + 1,
        None => buffer.len()
    }
}
