#![deny(missing_docs)]
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Fork-join Mandelbrot renderer
//!
//! The Mandelbrot set is the set of points `c` on the complex plane
//! for which the orbit of zero under `z -> z^2 + c` stays bounded.
//! The escape-time rendering gives each pixel the number of
//! iterations its point took to leave the circle of radius two, up to
//! some cap; points that never leave are given the cap itself.
//!
//! Every pixel is independent of every other, which makes the image
//! embarrassingly parallel.  This crate renders it twice: once on a
//! single thread, and once split by rows across a number of scoped
//! worker threads.  The two buffers must be bit-for-bit identical,
//! and the harness checks that they are while measuring how much
//! faster the threaded run was.
//!
//! Rows are not equally expensive; the ones that cross the boundary
//! of the set cost many more iterations than the ones that don't.
//! The `partition` module offers both a static split (one equal band
//! per thread) and a dynamic one (small blocks claimed on demand).

pub mod bench;
pub mod config;
pub mod errors;
pub mod escape;
pub mod image_out;
pub mod parallel;
pub mod partition;
pub mod planes;
pub mod serial;
pub mod verify;
pub mod views;

pub use crate::bench::{compare, Comparison, Job, Timing, Variant};
pub use crate::config::Config;
pub use crate::errors::{Error, Result};
pub use crate::escape::escape_time;
pub use crate::parallel::mandelbrot_threaded;
pub use crate::partition::{PartitionPlan, Policy, RowRange};
pub use crate::planes::{PlaneMapper, Resolution, Viewport};
pub use crate::serial::{mandelbrot_serial, render_serial};
pub use crate::verify::{verify, Mismatch, Verification};

/// Allocate a zeroed output buffer of `cells` cells, reporting
/// failure instead of aborting.
pub fn allocate(cells: usize) -> Result<Vec<u32>> {
    let mut buffer = Vec::new();
    buffer
        .try_reserve_exact(cells)
        .map_err(|_| Error::Allocation { cells })?;
    buffer.resize(cells, 0);
    Ok(buffer)
}
