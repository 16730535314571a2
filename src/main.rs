// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use clap::{App, Arg, ArgMatches};
use log::debug;
use std::path::{Path, PathBuf};
use std::process;
use std::str::FromStr;

use mandelfork::config::{parse_field, parse_pair};
use mandelfork::image_out::write_image;
use mandelfork::{compare, mandelbrot_threaded, Config, Policy, Result};

fn validate_pair<T: FromStr>(
    s: &str,
    separator: char,
    err: &str,
) -> std::result::Result<(), String> {
    match parse_pair::<T>(s, separator) {
        Some(_) => Ok(()),
        None => Err(err.to_string()),
    }
}

fn validate_range<T: FromStr + Ord>(
    s: &str,
    low: T,
    high: T,
    isnotanumber_err: &str,
    isnotinrange_err: &str,
) -> std::result::Result<(), String> {
    match T::from_str(s) {
        Ok(i) => {
            if i >= low && i <= high {
                Ok(())
            } else {
                Err(isnotinrange_err.to_string())
            }
        }
        Err(_) => Err(isnotanumber_err.to_string()),
    }
}

const THREADS: &str = "threads";
const VIEW: &str = "view";
const FIELD: &str = "field";
const OUT: &str = "out";
const SIZE: &str = "size";
const ITERATIONS: &str = "iterations";
const RUNS: &str = "runs";
const POLICY: &str = "policy";
const BLOCK: &str = "block";

fn args<'a>() -> ArgMatches<'a> {
    let thread_cap = num_cpus::get().max(64);

    App::new("mandelfork")
        .version("0.1.0")
        .about("Threaded Mandelbrot renderer, verified against a serial baseline")
        .arg(
            Arg::with_name(THREADS)
                .long(THREADS)
                .short("t")
                .takes_value(true)
                .default_value("2")
                .validator(move |s| {
                    validate_range(
                        &s,
                        1,
                        thread_cap,
                        "Could not parse thread count",
                        &format!("Thread count must be between 1 and {}", thread_cap),
                    )
                })
                .help("Use N threads"),
        )
        .arg(
            Arg::with_name(VIEW)
                .long(VIEW)
                .short("v")
                .takes_value(true)
                .default_value("0")
                .validator(|s| {
                    validate_range(
                        &s,
                        0,
                        6,
                        "Could not parse view index",
                        "View index must be between 0 and 6",
                    )
                })
                .help("Use specified view settings (0-6)"),
        )
        .arg(
            Arg::with_name(FIELD)
                .long(FIELD)
                .short("f")
                .takes_value(true)
                .allow_hyphen_values(true)
                .validator(|s| match parse_field(&s) {
                    Some(_) => Ok(()),
                    None => Err(format!("Couldn't extract field from '{}'", s)),
                })
                .help("Specify set boundaries as x0:y0:x1:y1"),
        )
        .arg(
            Arg::with_name(OUT)
                .long(OUT)
                .short("o")
                .takes_value(true)
                .help("Render once with threads and write the image to this file"),
        )
        .arg(
            Arg::with_name(SIZE)
                .long(SIZE)
                .short("s")
                .takes_value(true)
                .default_value("600x600")
                .validator(|s| validate_pair::<u16>(&s, 'x', "Could not parse canvas size"))
                .help("Canvas size; the image is one row shorter"),
        )
        .arg(
            Arg::with_name(ITERATIONS)
                .long(ITERATIONS)
                .short("i")
                .takes_value(true)
                .default_value("256")
                .validator(|s| {
                    validate_range(
                        &s,
                        1,
                        1_000_000,
                        "Could not parse iteration count",
                        "Iteration count must be between 1 and 1000000",
                    )
                })
                .help("Maximum iterations per pixel"),
        )
        .arg(
            Arg::with_name(RUNS)
                .long(RUNS)
                .short("r")
                .takes_value(true)
                .default_value("3")
                .validator(|s| {
                    validate_range(
                        &s,
                        1,
                        100,
                        "Could not parse run count",
                        "Run count must be between 1 and 100",
                    )
                })
                .help("Timed runs per variant; the fastest is reported"),
        )
        .arg(
            Arg::with_name(POLICY)
                .long(POLICY)
                .short("p")
                .takes_value(true)
                .possible_values(&["static", "dynamic"])
                .default_value("static")
                .help("How rows are assigned to threads"),
        )
        .arg(
            Arg::with_name(BLOCK)
                .long(BLOCK)
                .short("b")
                .takes_value(true)
                .default_value("4")
                .validator(|s| {
                    validate_range(
                        &s,
                        1,
                        65_536,
                        "Could not parse block size",
                        "Block size must be between 1 and 65536",
                    )
                })
                .help("Rows claimed at a time under the dynamic policy"),
        )
        .get_matches()
}

// The validators have already run, so parse failures here can only
// come from values they let through.
fn value<T: FromStr>(matches: &ArgMatches, name: &str) -> Result<T> {
    matches
        .value_of(name)
        .and_then(|s| T::from_str(s).ok())
        .ok_or_else(|| mandelfork::Error::InvalidConfig(format!("Could not parse --{}", name)))
}

fn configure(matches: &ArgMatches) -> Result<Config> {
    let (width, canvas_height): (usize, usize) = matches
        .value_of(SIZE)
        .and_then(|s| parse_pair(s, 'x'))
        .ok_or_else(|| mandelfork::Error::InvalidConfig("Could not parse canvas size".into()))?;
    let view = value(matches, VIEW)?;
    let field = matches.value_of(FIELD).and_then(parse_field);
    let policy = match value::<Policy>(matches, POLICY)? {
        Policy::Dynamic { .. } => Policy::Dynamic {
            block_rows: value(matches, BLOCK)?,
        },
        p => p,
    };
    Config {
        viewport: Config::viewport_for(field, view)?,
        view,
        width,
        canvas_height,
        limit: value(matches, ITERATIONS)?,
        threads: value(matches, THREADS)?,
        policy,
        runs: value(matches, RUNS)?,
        output: matches.value_of(OUT).map(PathBuf::from),
    }
    .validate()
}

/// Render once with threads and write the image, no timing.
fn fast_path(config: &Config, path: &Path) -> Result<()> {
    let plane = config.plane();
    let mut buffer = mandelfork::allocate(config.width * config.canvas_height)?;
    mandelbrot_threaded(config.threads, config.policy, &plane, config.limit, &mut buffer)?;
    write_image(path, &buffer, config.width, config.canvas_height, config.limit)
}

/// Time both renderers, write both images, and report.  Returns
/// whether the outputs matched.
fn comparison(config: &Config) -> Result<bool> {
    let c = compare(&config.job(), config.threads, config.policy)?;

    println!("[mandelbrot serial]:\t\t[{:.3}] ms", c.serial.min_ms());
    write_image(
        config.serial_filename(),
        &c.serial.output,
        config.width,
        config.canvas_height,
        config.limit,
    )?;

    println!("[mandelbrot thread]:\t\t[{:.3}] ms", c.parallel.min_ms());
    write_image(
        config.thread_filename(),
        &c.parallel.output,
        config.width,
        config.canvas_height,
        config.limit,
    )?;

    print!("{}", c.verdict(config.threads));
    Ok(c.passed())
}

fn run(config: &Config) -> Result<bool> {
    debug!("{:?}", config);
    match config.output {
        Some(ref path) => fast_path(config, path).map(|_| true),
        None => comparison(config),
    }
}

fn main() {
    env_logger::init();

    let matches = args();
    let config = match configure(&matches) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            process::exit(1);
        }
    };

    match run(&config) {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            eprintln!("Render failure: {}", e);
            process::exit(1);
        }
    }
}
