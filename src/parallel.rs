// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The threaded renderer.  Each call forks a fresh set of scoped
//! threads, one of which is the caller itself, and joins them all
//! before returning.  Nothing outlives the call.
//!
//! The output buffer is cut into per-range bands before anything is
//! spawned, so the only shared state is the buffer's borrow, and the
//! join at the end of the scope is the only synchronization the
//! pixels need.  Under the dynamic policy the bands sit behind a
//! mutex-guarded iterator from which workers claim the next one; the
//! lock is held only for the hand-off, never while rendering.

use log::debug;
use std::sync::Mutex;

use crate::errors::{Error, Result};
use crate::partition::{Policy, RowRange};
use crate::planes::PlaneMapper;
use crate::serial::render_band;

type Band<'a> = (RowRange, &'a mut [u32]);

/// Render every row of `plane` into `buffer` using `threads` workers
/// assigned rows by `policy`.  `buffer` must hold at least
/// `width * height` cells; anything past that is left untouched.
/// The result is identical to `mandelbrot_serial` over the whole
/// image, whatever the thread count or policy.
pub fn mandelbrot_threaded(
    threads: usize,
    policy: Policy,
    plane: &PlaneMapper,
    limit: u32,
    buffer: &mut [u32],
) -> Result<()> {
    let threads = threads.max(1);
    let plan = policy.plan(plane.height(), threads);
    debug!(
        "rendering {}x{} with {} threads, {} policy, {} ranges",
        plane.width(),
        plane.height(),
        threads,
        policy,
        plan.len()
    );
    let bands = plan.split(buffer, plane.width());
    if policy.is_dynamic() {
        claim_bands(threads.min(bands.len()), plane, limit, bands)
    } else {
        assign_bands(plane, limit, bands)
    }
}

/// One band per worker, fixed up front.  Empty bands get no thread.
fn assign_bands(plane: &PlaneMapper, limit: u32, bands: Vec<Band>) -> Result<()> {
    let mut bands = bands.into_iter().filter(|(rows, _)| !rows.is_empty());
    let first = bands.next();
    crossbeam::scope(|spawner| {
        for (rows, band) in bands {
            spawner.spawn(move |_| {
                debug!("worker on rows {}..{}", rows.start, rows.end());
                render_band(plane, rows, limit, band);
            });
        }
        if let Some((rows, band)) = first {
            debug!("calling thread on rows {}..{}", rows.start, rows.end());
            render_band(plane, rows, limit, band);
        }
    })
    .map_err(|_| Error::WorkerPanicked)
}

/// Workers pull bands off a shared queue until it runs dry.
fn claim_bands(workers: usize, plane: &PlaneMapper, limit: u32, bands: Vec<Band>) -> Result<()> {
    let queue = Mutex::new(bands.into_iter());
    let queue = &queue;
    crossbeam::scope(|spawner| {
        for worker in 1..workers {
            spawner.spawn(move |_| {
                let rows = drain(queue, plane, limit);
                debug!("worker {} rendered {} rows", worker, rows);
            });
        }
        let rows = drain(queue, plane, limit);
        debug!("calling thread rendered {} rows", rows);
    })
    .map_err(|_| Error::WorkerPanicked)
}

fn drain<'a, I>(queue: &Mutex<I>, plane: &PlaneMapper, limit: u32) -> usize
where
    I: Iterator<Item = Band<'a>>,
{
    let mut rendered = 0;
    loop {
        // A poisoned queue means another worker has already panicked;
        // the scope reports that, so just stop claiming.
        let band = queue.lock().map(|mut q| q.next()).unwrap_or(None);
        match band {
            Some((rows, band)) => {
                render_band(plane, rows, limit, band);
                rendered += rows.count;
            }
            None => break,
        }
    }
    rendered
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planes::{Resolution, Viewport};
    use crate::serial::render_serial;
    use crate::verify::verify;

    const THREAD_COUNTS: [usize; 6] = [1, 2, 3, 4, 7, 16];

    fn plane(width: usize, height: usize) -> PlaneMapper {
        PlaneMapper::new(
            Resolution::new(width, height),
            Viewport::new(-2.167, -1.0, 1.167, 1.0),
        )
    }

    fn threaded(threads: usize, policy: Policy, pm: &PlaneMapper, limit: u32) -> Vec<u32> {
        let mut buffer = vec![0; pm.resolution.len()];
        mandelbrot_threaded(threads, policy, pm, limit, &mut buffer).unwrap();
        buffer
    }

    #[test]
    fn static_policy_matches_serial() {
        let pm = plane(97, 61);
        let gold = render_serial(&pm, 200).unwrap();
        for &k in THREAD_COUNTS.iter() {
            assert_eq!(threaded(k, Policy::Static, &pm, 200), gold, "{} threads", k);
        }
    }

    #[test]
    fn dynamic_policy_matches_serial() {
        let pm = plane(97, 61);
        let gold = render_serial(&pm, 200).unwrap();
        for &block_rows in &[1, 3, 8, 100] {
            let policy = Policy::Dynamic { block_rows };
            for &k in THREAD_COUNTS.iter() {
                assert_eq!(threaded(k, policy, &pm, 200), gold, "{} threads, {}", k, policy);
            }
        }
    }

    #[test]
    fn more_threads_than_rows() {
        let pm = plane(13, 3);
        let gold = render_serial(&pm, 64).unwrap();
        assert_eq!(threaded(16, Policy::Static, &pm, 64), gold);
        assert_eq!(threaded(16, Policy::Dynamic { block_rows: 2 }, &pm, 64), gold);
    }

    #[test]
    fn zero_threads_runs_on_the_caller() {
        let pm = plane(20, 10);
        let gold = render_serial(&pm, 64).unwrap();
        assert_eq!(threaded(0, Policy::Static, &pm, 64), gold);
    }

    #[test]
    fn guard_row_is_never_written() {
        let (width, canvas) = (600, 600);
        let pm = plane(width, canvas - 1);
        for policy in &[Policy::Static, Policy::Dynamic { block_rows: 7 }] {
            let mut buffer = vec![0; width * canvas];
            mandelbrot_threaded(8, *policy, &pm, 32, &mut buffer).unwrap();
            assert!(buffer[width * (canvas - 1)..].iter().all(|&v| v == 0));
        }
    }

    #[test]
    fn default_view_verifies_with_eight_threads() {
        let (width, height) = (600, 599);
        let pm = plane(width, height);
        let serial = render_serial(&pm, 256).unwrap();
        let parallel = threaded(8, Policy::Static, &pm, 256);
        let report = verify(&serial, &parallel, width, height);
        assert!(report.passed());
        assert!(report.mismatches().is_empty());
    }
}
