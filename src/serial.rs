// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The serial evaluator.  Used on its own as the baseline, and by every
//! worker of the threaded renderer on its own band of rows.

use crate::errors::Result;
use crate::escape::escape_time;
use crate::partition::RowRange;
use crate::planes::PlaneMapper;

/// Fill `band`, a row-aligned slice holding exactly the rows of
/// `rows`, with escape counts.  `band[0]` is the first column of row
/// `rows.start`.
pub fn render_band(plane: &PlaneMapper, rows: RowRange, limit: u32, band: &mut [u32]) {
    let width = plane.width();
    debug_assert_eq!(band.len(), rows.count * width);
    if width == 0 {
        return;
    }
    for (row, line) in rows.iter().zip(band.chunks_mut(width)) {
        for (col, cell) in line.iter_mut().enumerate() {
            *cell = escape_time(plane.pixel_to_point(row, col), limit);
        }
    }
}

/// Compute rows `start_row..start_row + num_rows` into a full-image
/// buffer laid out row-major, `buffer[row * width + col]`.  Cells
/// outside those rows are left alone.
pub fn mandelbrot_serial(
    plane: &PlaneMapper,
    start_row: usize,
    num_rows: usize,
    limit: u32,
    buffer: &mut [u32],
) {
    let width = plane.width();
    let rows = RowRange::new(start_row, num_rows);
    render_band(plane, rows, limit, &mut buffer[rows.start * width..rows.end() * width]);
}

/// Allocate a buffer for the whole image and compute every row of it
/// on the calling thread.
pub fn render_serial(plane: &PlaneMapper, limit: u32) -> Result<Vec<u32>> {
    let mut buffer = crate::allocate(plane.resolution.len())?;
    mandelbrot_serial(plane, 0, plane.height(), limit, &mut buffer);
    Ok(buffer)
}
