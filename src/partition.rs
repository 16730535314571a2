// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Row partitioning.  A `Policy` turns an image height and a thread
//! count into a `PartitionPlan`: an ascending sequence of half-open
//! row ranges that are pairwise disjoint and together cover every row
//! exactly once.  The threaded renderer then cuts the output buffer
//! along those ranges, so each worker holds the only mutable
//! reference to its rows.

use std::fmt;
use std::ops::Range;
use std::str::FromStr;

/// Rows handed out per claim by the dynamic policy unless told
/// otherwise.
pub const DEFAULT_BLOCK_ROWS: usize = 4;

/// A half-open interval of rows, `[start, start + count)`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RowRange {
    /// First row.
    pub start: usize,
    /// Number of rows.
    pub count: usize,
}

impl RowRange {
    /// Constructor.
    pub fn new(start: usize, count: usize) -> RowRange {
        RowRange { start, count }
    }

    /// One past the last row.
    pub fn end(&self) -> usize {
        self.start + self.count
    }

    /// True if the range holds no rows.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// The rows, as an iterator.
    pub fn iter(&self) -> Range<usize> {
        self.start..self.end()
    }
}

/// How rows are assigned to workers.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Policy {
    /// One contiguous range per thread, sized `height / threads`, with
    /// the remainder spread one row apiece over the first ranges.
    Static,
    /// Fixed-size blocks of rows handed out on demand to whichever
    /// worker is free, which evens out the cost of rows near the
    /// boundary of the set.
    Dynamic {
        /// Rows per block.  Zero is treated as one.
        block_rows: usize,
    },
}

impl Default for Policy {
    fn default() -> Self {
        Policy::Static
    }
}

impl Policy {
    /// Produce the plan for an image of `height` rows.  A thread count
    /// of zero is treated as one.
    pub fn plan(&self, height: usize, threads: usize) -> PartitionPlan {
        let threads = threads.max(1);
        match *self {
            Policy::Static => PartitionPlan::equal_chunks(height, threads),
            Policy::Dynamic { block_rows } => PartitionPlan::blocks(height, block_rows.max(1)),
        }
    }

    /// True if ranges are claimed at run time rather than assigned one
    /// per thread up front.
    pub fn is_dynamic(&self) -> bool {
        match *self {
            Policy::Static => false,
            Policy::Dynamic { .. } => true,
        }
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Policy::Static => write!(f, "static"),
            Policy::Dynamic { block_rows } => write!(f, "dynamic({} rows)", block_rows),
        }
    }
}

impl FromStr for Policy {
    type Err = String;

    /// Parses `static` or `dynamic`; the latter gets the default block
    /// size.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "static" => Ok(Policy::Static),
            "dynamic" => Ok(Policy::Dynamic {
                block_rows: DEFAULT_BLOCK_ROWS,
            }),
            _ => Err(format!("Unknown partitioning policy '{}'", s)),
        }
    }
}

/// An ordered sequence of row ranges covering `[0, height)`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PartitionPlan {
    height: usize,
    ranges: Vec<RowRange>,
}

impl PartitionPlan {
    fn equal_chunks(height: usize, threads: usize) -> PartitionPlan {
        let base = height / threads;
        let remainder = height % threads;
        let mut start = 0;
        let ranges = (0..threads)
            .map(|i| {
                let count = base + if i < remainder { 1 } else { 0 };
                let range = RowRange::new(start, count);
                start += count;
                range
            })
            .collect();
        PartitionPlan { height, ranges }
    }

    fn blocks(height: usize, block_rows: usize) -> PartitionPlan {
        let ranges = (0..height)
            .step_by(block_rows)
            .map(|start| RowRange::new(start, block_rows.min(height - start)))
            .collect();
        PartitionPlan { height, ranges }
    }

    /// The rows covered by this plan.
    pub fn height(&self) -> usize {
        self.height
    }

    /// The ranges, in ascending row order.
    pub fn ranges(&self) -> &[RowRange] {
        &self.ranges
    }

    /// Number of ranges, including empty ones.
    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    /// True if the plan holds no ranges at all.
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Cut the first `height * width` cells of `buffer` into one
    /// mutable band per range.  Cells past the plan's rows are not
    /// handed out.
    pub fn split<'a>(
        &self,
        buffer: &'a mut [u32],
        width: usize,
    ) -> Vec<(RowRange, &'a mut [u32])> {
        let (mut rest, _) = buffer.split_at_mut(self.height * width);
        let mut bands = Vec::with_capacity(self.ranges.len());
        for range in &self.ranges {
            let (band, tail) = std::mem::take(&mut rest).split_at_mut(range.count * width);
            bands.push((*range, band));
            rest = tail;
        }
        bands
    }
}
