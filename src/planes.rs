// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Contains the PlaneMapper struct, which describes a relationship
//! between a rectangle on the integral plane with an origin at 0,0,
//! and a rectangle on the complex plane bounded by a Viewport.
//! Rows run along the imaginary axis, columns along the real axis.
use num::Complex;

/// Four real bounds defining a rectangle in the complex plane, with
/// `x` as the real component and `y` as the imaginary component.
/// Callers are expected to keep `x0 < x1` and `y0 < y1`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Viewport {
    /// Left (real) bound.
    pub x0: f64,
    /// Lower (imaginary) bound.
    pub y0: f64,
    /// Right (real) bound.
    pub x1: f64,
    /// Upper (imaginary) bound.
    pub y1: f64,
}

impl Viewport {
    /// Constructor, in `x0, y0, x1, y1` order.
    pub fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Viewport {
        Viewport { x0, y0, x1, y1 }
    }

    /// Scales all four bounds about the origin, then translates the
    /// real bounds by `shift_x` and the imaginary bounds by `shift_y`.
    pub fn scale_and_shift(&self, scale: f64, shift_x: f64, shift_y: f64) -> Viewport {
        Viewport {
            x0: self.x0 * scale + shift_x,
            y0: self.y0 * scale + shift_y,
            x1: self.x1 * scale + shift_x,
            y1: self.y1 * scale + shift_y,
        }
    }

    /// True if the bounds describe a non-degenerate rectangle.
    pub fn is_well_formed(&self) -> bool {
        self.x0 < self.x1 && self.y0 < self.y1
    }
}

/// Describes the width and height of an integral plane that is assumed to start at
/// 0,0 and all values are assumed to be non-negative integers.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Resolution {
    /// Number of columns.
    pub width: usize,
    /// Number of rows.
    pub height: usize,
}

impl Resolution {
    /// Constructor.
    pub fn new(width: usize, height: usize) -> Resolution {
        Resolution { width, height }
    }

    /// The total number of cells in the integral grid.
    pub fn len(&self) -> usize {
        self.width * self.height
    }

    /// Describes that the integral plane is of a size.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Maps pixels on the integral plane to points on the complex plane.
/// Every evaluator, serial or threaded, must go through the same
/// mapper, since the verifier demands bit-exact results.
#[derive(Debug, Clone)]
pub struct PlaneMapper {
    /// The integral plane.
    pub resolution: Resolution,
    /// The complex plane.
    pub viewport: Viewport,
    // Size of one pixel step along the real and imaginary axes.
    steps: (f64, f64),
}

impl PlaneMapper {
    /// Constructor.  The viewport is not checked here; see
    /// `Config::validate`.
    pub fn new(resolution: Resolution, viewport: Viewport) -> PlaneMapper {
        let steps = (
            (viewport.x1 - viewport.x0) / (resolution.width as f64),
            (viewport.y1 - viewport.y0) / (resolution.height as f64),
        );
        PlaneMapper {
            resolution,
            viewport,
            steps,
        }
    }

    /// Number of columns in a row.
    pub fn width(&self) -> usize {
        self.resolution.width
    }

    /// Number of rows in the image.
    pub fn height(&self) -> usize {
        self.resolution.height
    }

    /// The distance between adjacent pixels, real then imaginary.
    pub fn steps(&self) -> (f64, f64) {
        self.steps
    }

    /// Given the row and column of a pixel on the integral plane,
    /// return the complex number at its corresponding location.
    #[inline]
    pub fn pixel_to_point(&self, row: usize, col: usize) -> Complex<f64> {
        Complex::new(
            self.viewport.x0 + (col as f64) * self.steps.0,
            self.viewport.y0 + (row as f64) * self.steps.1,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_view() -> Viewport {
        Viewport::new(-2.167, -1.0, 1.167, 1.0)
    }

    #[test]
    fn viewport_rejects_bad_shape() {
        assert!(!Viewport::new(1.0, -1.0, -1.0, 1.0).is_well_formed());
        assert!(!Viewport::new(-1.0, 1.0, 1.0, -1.0).is_well_formed());
        assert!(!Viewport::new(-1.0, 0.0, 1.0, 0.0).is_well_formed());
        assert!(default_view().is_well_formed());
    }

    #[test]
    fn scale_and_shift_applies_to_all_bounds() {
        let v = default_view().scale_and_shift(0.01, 0.0, 0.0);
        assert!((v.x0 - -0.02167).abs() < 1e-12);
        assert!((v.x1 - 0.01167).abs() < 1e-12);
        assert!((v.y0 - -0.01).abs() < 1e-12);
        assert!((v.y1 - 0.01).abs() < 1e-12);

        let v = Viewport::new(-1.0, -1.0, 1.0, 1.0).scale_and_shift(2.0, 0.5, -0.25);
        assert_eq!(v, Viewport::new(-1.5, -2.25, 2.5, 1.75));
    }

    #[test]
    fn origin_pixel_maps_to_lower_left_corner() {
        let pm = PlaneMapper::new(Resolution::new(600, 600), default_view());
        assert_eq!(pm.pixel_to_point(0, 0), Complex::new(-2.167, -1.0));
    }

    #[test]
    fn last_pixel_is_one_step_short_of_upper_bound() {
        let view = default_view();
        let pm = PlaneMapper::new(Resolution::new(600, 600), view);
        let (dx, dy) = pm.steps();
        let p = pm.pixel_to_point(599, 599);
        assert!(p.re < view.x1 && p.im < view.y1);
        assert!((p.re - (view.x1 - dx)).abs() < 1e-9);
        assert!((p.im - (view.y1 - dy)).abs() < 1e-9);
    }

    #[test]
    fn pixel_to_point_on_positive_planes() {
        let pm = PlaneMapper::new(Resolution::new(5, 5), Viewport::new(0.0, 0.0, 5.0, 5.0));
        assert_eq!(pm.pixel_to_point(0, 0), Complex::new(0.0, 0.0));
        assert_eq!(pm.pixel_to_point(2, 2), Complex::new(2.0, 2.0));
        assert_eq!(pm.pixel_to_point(4, 3), Complex::new(3.0, 4.0));
    }

    #[test]
    fn pixel_to_points_on_mixed_planes() {
        let pm = PlaneMapper::new(Resolution::new(4, 4), Viewport::new(-2.0, -2.0, 2.0, 2.0));
        assert_eq!(pm.pixel_to_point(2, 2), Complex::new(0.0, 0.0));
        assert_eq!(pm.pixel_to_point(0, 0), Complex::new(-2.0, -2.0));
        assert_eq!(pm.pixel_to_point(4, 4), Complex::new(2.0, 2.0));
    }

    #[test]
    fn resolution_reports_size() {
        assert_eq!(Resolution::new(600, 599).len(), 359_400);
        assert!(Resolution::new(0, 5).is_empty());
        assert!(!Resolution::new(1, 1).is_empty());
    }
}
