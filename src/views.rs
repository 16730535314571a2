// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Preset views.  Each one zooms and pans the base viewport to some
//! region worth looking at.

use crate::planes::Viewport;

/// The base viewport every view is derived from.  It frames the whole
/// set.
pub const BASE_VIEWPORT: Viewport = Viewport {
    x0: -2.167,
    y0: -1.0,
    x1: 1.167,
    y1: 1.0,
};

/// A zoom factor and a pan, applied to the base viewport.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct View {
    /// Multiplier for all four bounds.
    pub scale: f64,
    /// Added to the real bounds after scaling.
    pub shift_x: f64,
    /// Added to the imaginary bounds after scaling.
    pub shift_y: f64,
}

/// The presets, by index.
pub const VIEWS: [View; 7] = [
    View { scale: 0.01, shift_x: 0.0, shift_y: 0.0 },
    View { scale: 1.0, shift_x: 0.0, shift_y: 0.0 },
    View { scale: 0.015, shift_x: -0.98, shift_y: 0.30 },
    View { scale: 0.02, shift_x: 0.35, shift_y: 0.05 },
    View { scale: 0.02, shift_x: 0.0, shift_y: 0.73 },
    View { scale: 0.02, shift_x: -1.5, shift_y: 0.0 },
    View { scale: 0.002, shift_x: -1.4, shift_y: 0.0 },
];

/// Look up a preset by index.
pub fn view(index: usize) -> Option<View> {
    VIEWS.get(index).copied()
}

impl View {
    /// Transform `base` by this view.
    pub fn apply(&self, base: &Viewport) -> Viewport {
        base.scale_and_shift(self.scale, self.shift_x, self.shift_y)
    }
}
