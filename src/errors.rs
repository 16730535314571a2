// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Error type shared by the renderer, the harness and the driver.

use failure::Fail;
use std::io;

/// Everything that can go wrong outside the kernel itself.  A failed
/// verification is not an error; see `verify::Verification`.
#[derive(Debug, Fail)]
pub enum Error {
    /// The configuration breaks one of the renderer's preconditions.
    #[fail(display = "Invalid configuration: {}", _0)]
    InvalidConfig(String),

    /// An output buffer could not be allocated.
    #[fail(display = "Could not allocate a buffer of {} cells", cells)]
    Allocation {
        /// Requested size.
        cells: usize,
    },

    /// At least one worker panicked before the join.
    #[fail(display = "A render worker panicked")]
    WorkerPanicked,

    /// Writing an image failed.
    #[fail(display = "I/O error: {}", _0)]
    Io(#[cause] io::Error),
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Error::Io(e)
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
