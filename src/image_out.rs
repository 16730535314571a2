// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Writes a rendered buffer out as a binary PPM.

use image::pnm::PNMEncoder;
use image::pnm::{PNMSubtype, SampleEncoding};
use image::ColorType;
use std::fs::File;
use std::iter;
use std::path::Path;

use crate::errors::Result;

/// Map an escape count to a gray level.  The square root of the
/// count, normalized to 256 iterations, brightens the slow-escaping
/// fringe; anything at or past 256 iterations is white.
pub fn intensity(count: u32, limit: u32) -> u8 {
    let mapped = (f64::from(count.min(limit)) / 256.0).sqrt();
    (255.0 * mapped).min(255.0) as u8
}

/// Turn `width * height` escape counts into RGB triples of equal gray.
pub fn pixelate(buffer: &[u32], width: usize, height: usize, limit: u32) -> Vec<u8> {
    buffer[..width * height]
        .iter()
        .flat_map(|&count| iter::repeat(intensity(count, limit)).take(3))
        .collect()
}

/// Write the first `width * height` cells of `buffer` to `path`.
pub fn write_image<P: AsRef<Path>>(
    path: P,
    buffer: &[u32],
    width: usize,
    height: usize,
    limit: u32,
) -> Result<()> {
    let pixels = pixelate(buffer, width, height, limit);
    let output = File::create(path.as_ref())?;
    let mut encoder =
        PNMEncoder::new(output).with_subtype(PNMSubtype::Pixmap(SampleEncoding::Binary));
    encoder.encode(&pixels[..], width as u32, height as u32, ColorType::RGB(8))?;
    Ok(())
}
