// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Exact comparison of two rendered buffers.

use itertools::iproduct;
use log::debug;
use std::fmt;

/// The most mismatches a single verification will enumerate.
pub const MISMATCH_LIMIT: usize = 5;

/// One cell where the two buffers disagree.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Mismatch {
    /// Row of the cell.
    pub row: usize,
    /// Column of the cell.
    pub col: usize,
    /// Value in the reference buffer.
    pub expected: u32,
    /// Value in the buffer under test.
    pub actual: u32,
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Mismatch : [{}][{}], Expected : {}, Actual : {}",
            self.row, self.col, self.expected, self.actual
        )
    }
}

/// The outcome of comparing two buffers.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Verification {
    mismatches: Vec<Mismatch>,
    truncated: bool,
}

impl Verification {
    /// True if not a single cell differed.
    pub fn passed(&self) -> bool {
        self.mismatches.is_empty()
    }

    /// The mismatches found, in row-major order, at most
    /// `MISMATCH_LIMIT` of them.
    pub fn mismatches(&self) -> &[Mismatch] {
        &self.mismatches
    }

    /// True if scanning stopped early because there were more
    /// mismatches than the limit.
    pub fn truncated(&self) -> bool {
        self.truncated
    }
}

impl fmt::Display for Verification {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for m in &self.mismatches {
            writeln!(f, "{}", m)?;
        }
        if self.truncated {
            writeln!(f, " ...")?;
        }
        Ok(())
    }
}

/// Compare `expected` against `actual` over `height` rows of `width`
/// cells, row by row.  Both buffers must hold at least
/// `width * height` cells.
pub fn verify(expected: &[u32], actual: &[u32], width: usize, height: usize) -> Verification {
    let mut report = Verification::default();
    for (row, col) in iproduct!(0..height, 0..width) {
        let offset = row * width + col;
        if expected[offset] == actual[offset] {
            continue;
        }
        if report.mismatches.len() == MISMATCH_LIMIT {
            report.truncated = true;
            break;
        }
        let mismatch = Mismatch {
            row,
            col,
            expected: expected[offset],
            actual: actual[offset],
        };
        debug!("{}", mismatch);
        report.mismatches.push(mismatch);
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_buffers_pass() {
        let a: Vec<u32> = (0..60).collect();
        let report = verify(&a, &a.clone(), 10, 6);
        assert!(report.passed());
        assert!(!report.truncated());
        assert_eq!(report.to_string(), "");
    }

    #[test]
    fn single_mismatch_is_located() {
        let a = vec![3; 12];
        let mut b = a.clone();
        b[7] = 9;
        let report = verify(&a, &b, 4, 3);
        assert!(!report.passed());
        assert_eq!(
            report.mismatches(),
            &[Mismatch {
                row: 1,
                col: 3,
                expected: 3,
                actual: 9
            }]
        );
        assert_eq!(
            report.to_string(),
            "Mismatch : [1][3], Expected : 3, Actual : 9\n"
        );
    }

    #[test]
    fn exactly_the_limit_is_not_truncated() {
        let a = vec![0; 20];
        let mut b = a.clone();
        for i in 0..MISMATCH_LIMIT {
            b[i * 3] = 1;
        }
        let report = verify(&a, &b, 5, 4);
        assert_eq!(report.mismatches().len(), MISMATCH_LIMIT);
        assert!(!report.truncated());
    }

    #[test]
    fn enumeration_stops_past_the_limit() {
        let a = vec![0; 100];
        let b = vec![1; 100];
        let report = verify(&a, &b, 10, 10);
        assert!(!report.passed());
        assert!(report.truncated());
        assert_eq!(report.mismatches().len(), MISMATCH_LIMIT);
        let last = report.mismatches()[MISMATCH_LIMIT - 1];
        assert_eq!((last.row, last.col), (0, 4));
        assert!(report.to_string().ends_with(" ...\n"));
    }

    #[test]
    fn cells_past_the_shape_are_ignored() {
        let a = vec![0; 12];
        let mut b = a.clone();
        b[11] = 5;
        assert!(verify(&a, &b, 4, 2).passed());
    }
}
