// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The run configuration.  Built once per invocation and read-only
//! from then on; every component gets what it needs from here
//! explicitly.

use std::path::PathBuf;
use std::str::FromStr;

use crate::bench::Job;
use crate::errors::{Error, Result};
use crate::partition::Policy;
use crate::planes::{PlaneMapper, Resolution, Viewport};
use crate::views::{self, BASE_VIEWPORT};

/// Given a string and a separator, returns the two values
/// separated by the separator.
pub fn parse_pair<T>(s: &str, separator: char) -> Option<(T, T)>
where
    T: FromStr,
{
    match s.find(separator) {
        None => None,
        Some(index) => match (T::from_str(&s[..index]), T::from_str(&s[index + 1..])) {
            (Ok(l), Ok(r)) => Some((l, r)),
            _ => None,
        },
    }
}

/// Parses a field of the form `x0:y0:x1:y1`.
pub fn parse_field(s: &str) -> Option<Viewport> {
    let bounds: Vec<f64> = s
        .split(':')
        .map(f64::from_str)
        .collect::<std::result::Result<_, _>>()
        .ok()?;
    match bounds.as_slice() {
        [x0, y0, x1, y1] => Some(Viewport::new(*x0, *y0, *x1, *y1)),
        _ => None,
    }
}

/// Everything one invocation needs.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// The region to render, after the view transform.
    pub viewport: Viewport,
    /// Which preset produced `viewport`.  Used to name output files.
    pub view: usize,
    /// Columns.
    pub width: usize,
    /// Rows allocated.  The image itself is one row shorter; the last
    /// row is a guard that no renderer may touch.
    pub canvas_height: usize,
    /// Iteration cap.
    pub limit: u32,
    /// Worker threads, caller included.
    pub threads: usize,
    /// Row assignment policy.
    pub policy: Policy,
    /// Timed runs per variant.
    pub runs: usize,
    /// When set, skip the comparison, render once with threads and
    /// write the image here.
    pub output: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            viewport: views::VIEWS[0].apply(&BASE_VIEWPORT),
            view: 0,
            width: 600,
            canvas_height: 600,
            limit: 256,
            threads: 2,
            policy: Policy::Static,
            runs: 3,
            output: None,
        }
    }
}

impl Config {
    /// Build the viewport from an optional explicit field and a preset
    /// index.  The preset's transform applies to the field too.
    pub fn viewport_for(field: Option<Viewport>, view: usize) -> Result<Viewport> {
        let preset = views::view(view).ok_or_else(|| {
            Error::InvalidConfig(format!(
                "Invalid view index {}, must be between 0 and {}",
                view,
                views::VIEWS.len() - 1
            ))
        })?;
        Ok(preset.apply(&field.unwrap_or(BASE_VIEWPORT)))
    }

    /// Check the preconditions the renderer relies on but does not
    /// itself check.
    pub fn validate(self) -> Result<Config> {
        let problem = if self.threads == 0 {
            Some("thread count must be at least 1".to_string())
        } else if self.width == 0 {
            Some("width must be at least 1".to_string())
        } else if self.canvas_height < 2 {
            Some("height must be at least 2".to_string())
        } else if self.limit == 0 {
            Some("iteration count must be at least 1".to_string())
        } else if self.runs == 0 {
            Some("run count must be at least 1".to_string())
        } else if !self.viewport.is_well_formed() {
            Some(format!(
                "field {}:{}:{}:{} must have x0 < x1 and y0 < y1",
                self.viewport.x0, self.viewport.y0, self.viewport.x1, self.viewport.y1
            ))
        } else {
            None
        };
        match problem {
            Some(p) => Err(Error::InvalidConfig(p)),
            None => Ok(self),
        }
    }

    /// Rows actually computed.
    pub fn image_height(&self) -> usize {
        self.canvas_height - 1
    }

    /// The pixel mapping for the image rows.
    pub fn plane(&self) -> PlaneMapper {
        PlaneMapper::new(
            Resolution::new(self.width, self.image_height()),
            self.viewport,
        )
    }

    /// The harness job for this configuration.
    pub fn job(&self) -> Job {
        Job {
            plane: self.plane(),
            limit: self.limit,
            canvas_height: self.canvas_height,
            runs: self.runs,
        }
    }

    /// File name for the serial image in comparison mode.
    pub fn serial_filename(&self) -> String {
        format!("mandelbrot-v{}-serial.ppm", self.view)
    }

    /// File name for the threaded image in comparison mode.
    pub fn thread_filename(&self) -> String {
        format!("mandelbrot-v{}-thread-{}.ppm", self.view, self.threads)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_pair_splits_on_separator() {
        assert_eq!(parse_pair::<usize>("600x599", 'x'), Some((600, 599)));
        assert_eq!(parse_pair::<f64>("-1.5,0.25", ','), Some((-1.5, 0.25)));
        assert_eq!(parse_pair::<usize>("600", 'x'), None);
        assert_eq!(parse_pair::<usize>("ax5", 'x'), None);
    }

    #[test]
    fn parse_field_needs_four_numbers() {
        assert_eq!(
            parse_field("-2.167:-1:1.167:1"),
            Some(Viewport::new(-2.167, -1.0, 1.167, 1.0))
        );
        assert_eq!(parse_field("-2:-1:1"), None);
        assert_eq!(parse_field("-2:-1:1:1:3"), None);
        assert_eq!(parse_field("-2:-1:one:1"), None);
    }

    #[test]
    fn default_config_is_valid() {
        let c = Config::default().validate().unwrap();
        assert_eq!(c.image_height(), 599);
        assert_eq!(c.plane().resolution, Resolution::new(600, 599));
        assert_eq!(c.job().cells(), 600 * 600);
    }

    #[test]
    fn validate_rejects_each_precondition() {
        let bad = vec![
            Config { threads: 0, ..Config::default() },
            Config { width: 0, ..Config::default() },
            Config { canvas_height: 1, ..Config::default() },
            Config { limit: 0, ..Config::default() },
            Config { runs: 0, ..Config::default() },
            Config {
                viewport: Viewport::new(1.0, -1.0, -1.0, 1.0),
                ..Config::default()
            },
            Config {
                viewport: Viewport::new(-1.0, 1.0, 1.0, -1.0),
                ..Config::default()
            },
        ];
        for c in bad {
            match c.clone().validate() {
                Err(Error::InvalidConfig(_)) => {}
                other => panic!("{:?} should be rejected, got {:?}", c, other),
            }
        }
    }

    #[test]
    fn viewport_applies_the_view_to_the_field() {
        let field = Viewport::new(-1.0, -1.0, 1.0, 1.0);
        assert_eq!(Config::viewport_for(Some(field), 1).unwrap(), field);
        let v = Config::viewport_for(None, 0).unwrap();
        assert!((v.x0 - -0.02167).abs() < 1e-12);
        assert!(Config::viewport_for(None, 7).is_err());
    }

    #[test]
    fn filenames_carry_view_and_threads() {
        let c = Config {
            view: 2,
            threads: 8,
            ..Config::default()
        };
        assert_eq!(c.serial_filename(), "mandelbrot-v2-serial.ppm");
        assert_eq!(c.thread_filename(), "mandelbrot-v2-thread-8.ppm");
    }
}
