// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The benchmark harness.  Runs the serial and threaded renderers a
//! few times each, keeps the fastest run of each as the representative
//! timing, and checks the two outputs against one another.

use log::info;
use std::fmt;
use std::time::{Duration, Instant};

use crate::errors::Result;
use crate::parallel::mandelbrot_threaded;
use crate::partition::Policy;
use crate::planes::PlaneMapper;
use crate::serial::mandelbrot_serial;
use crate::verify::{verify, Verification};

/// A single measured run.
pub type RunSample = Duration;

/// Which renderer to time.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Variant {
    /// The whole image on the calling thread.
    Serial,
    /// The threaded renderer.
    Parallel {
        /// Worker count, caller included.
        threads: usize,
        /// How rows are handed out.
        policy: Policy,
    },
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Variant::Serial => write!(f, "serial"),
            Variant::Parallel { threads, policy } => {
                write!(f, "thread x{} ({})", threads, policy)
            }
        }
    }
}

/// Everything a run needs besides the variant.
#[derive(Clone, Debug)]
pub struct Job {
    /// The image to compute.
    pub plane: PlaneMapper,
    /// Iteration cap.
    pub limit: u32,
    /// Rows allocated in the output buffer.  At least the image height;
    /// any extra rows must come back untouched.
    pub canvas_height: usize,
    /// Runs per variant.  Zero is treated as one.
    pub runs: usize,
}

impl Job {
    /// Number of cells in an output buffer.
    pub fn cells(&self) -> usize {
        self.plane.width() * self.canvas_height
    }

    /// Render once with `variant` into `buffer`.
    pub fn run(&self, variant: Variant, buffer: &mut [u32]) -> Result<()> {
        match variant {
            Variant::Serial => {
                mandelbrot_serial(&self.plane, 0, self.plane.height(), self.limit, buffer);
                Ok(())
            }
            Variant::Parallel { threads, policy } => {
                mandelbrot_threaded(threads, policy, &self.plane, self.limit, buffer)
            }
        }
    }
}

/// The samples collected for one variant, plus the output of its last
/// run.
#[derive(Clone, Debug)]
pub struct Timing {
    /// What was timed.
    pub variant: Variant,
    /// One sample per run, in run order.
    pub samples: Vec<RunSample>,
    /// The rendered buffer, `width * canvas_height` cells.
    pub output: Vec<u32>,
}

impl Timing {
    /// The fastest run.
    pub fn min(&self) -> Duration {
        self.samples.iter().min().cloned().unwrap_or_default()
    }

    /// The fastest run in milliseconds.
    pub fn min_ms(&self) -> f64 {
        self.min().as_secs_f64() * 1000.0
    }
}

/// Time `variant` over `job.runs` runs.  The buffer is allocated once
/// and cleared before every run; the clearing is not timed.
pub fn benchmark(job: &Job, variant: Variant) -> Result<Timing> {
    let mut output = crate::allocate(job.cells())?;
    let runs = job.runs.max(1);
    let mut samples = Vec::with_capacity(runs);
    for run in 0..runs {
        output.iter_mut().for_each(|cell| *cell = 0);
        let start = Instant::now();
        job.run(variant, &mut output)?;
        let sample = start.elapsed();
        info!(
            "{} run {}/{}: {:.3} ms",
            variant,
            run + 1,
            runs,
            sample.as_secs_f64() * 1000.0
        );
        samples.push(sample);
    }
    Ok(Timing {
        variant,
        samples,
        output,
    })
}

/// A serial run and a threaded run of the same job, and whether they
/// agreed.
#[derive(Clone, Debug)]
pub struct Comparison {
    /// The baseline.
    pub serial: Timing,
    /// The threaded run.
    pub parallel: Timing,
    /// The threaded output checked against the baseline over the
    /// whole canvas.
    pub verification: Verification,
}

impl Comparison {
    /// How many times faster the best threaded run was than the best
    /// serial run.
    pub fn speedup(&self) -> f64 {
        self.serial.min().as_secs_f64() / self.parallel.min().as_secs_f64()
    }

    /// True if the outputs were identical.
    pub fn passed(&self) -> bool {
        self.verification.passed()
    }

    /// The closing lines of a comparison: the mismatch report and an
    /// error line if the outputs differ, otherwise the speedup.
    pub fn verdict(&self, threads: usize) -> String {
        if self.passed() {
            format!(
                "++++\t\t\t\t({:.2}x speedup from {} threads)\n",
                self.speedup(),
                threads
            )
        } else {
            format!(
                "{}ERROR : Output from threads does not match serial output\n",
                self.verification
            )
        }
    }
}

/// Time the serial renderer, then the threaded one, then verify.
pub fn compare(job: &Job, threads: usize, policy: Policy) -> Result<Comparison> {
    let serial = benchmark(job, Variant::Serial)?;
    let parallel = benchmark(job, Variant::Parallel { threads, policy })?;
    let verification = verify(
        &serial.output,
        &parallel.output,
        job.plane.width(),
        job.canvas_height,
    );
    Ok(Comparison {
        serial,
        parallel,
        verification,
    })
}
