// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The escape-time kernel.
use num::Complex;

/// Squared escape radius.  A point whose orbit has a squared norm
/// strictly greater than this has escaped.
pub const ESCAPE_NORM_SQR: f64 = 4.0;

/// This is our classic iterator function: starting from zero,
/// repeatedly square and add `c`, and return the number of
/// iterations completed before the orbit escaped.  A return value of
/// `limit` means the point never escaped and is treated as inside
/// the set.
#[inline]
pub fn escape_time(c: Complex<f64>, limit: u32) -> u32 {
    let mut z = Complex { re: 0.0, im: 0.0 };
    for i in 0..limit {
        if z.norm_sqr() > ESCAPE_NORM_SQR {
            return i;
        }
        z = z * z + c;
    }
    limit
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origin_never_escapes() {
        for limit in &[1, 2, 17, 256, 5000] {
            assert_eq!(escape_time(Complex::new(0.0, 0.0), *limit), *limit);
        }
    }

    #[test]
    fn two_escapes_immediately() {
        // z: 0 -> 2 (|z|^2 == 4, still inside) -> 6.
        for limit in &[3, 256, 100_000] {
            assert_eq!(escape_time(Complex::new(2.0, 0.0), *limit), 2);
        }
    }

    #[test]
    fn limit_caps_the_count() {
        assert_eq!(escape_time(Complex::new(2.0, 0.0), 1), 1);
        assert_eq!(escape_time(Complex::new(2.0, 0.0), 0), 0);
    }

    #[test]
    fn far_points_escape_after_one_step() {
        assert_eq!(escape_time(Complex::new(10.0, -10.0), 256), 1);
    }

    #[test]
    fn known_interior_points_stay_bounded() {
        // -1 cycles between -1 and 0; the main cardioid contains -0.1+0.1i.
        assert_eq!(escape_time(Complex::new(-1.0, 0.0), 1000), 1000);
        assert_eq!(escape_time(Complex::new(-0.1, 0.1), 1000), 1000);
    }
}
