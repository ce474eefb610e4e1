//! Compares integer and floating-point accumulation over a synthetic image buffer.
//!
//! Logging of the profiler is visible with `RUST_LOG=scope_timings=debug`.
//!
//! Run with: `cargo run --example scope_timings_cli -- --iterations 400 --unit us`
#![expect(
    clippy::arithmetic_side_effects,
    clippy::cast_possible_truncation,
    reason = "this is example code that does not need production-level safety"
)]

use std::hint::black_box;
use std::process::ExitCode;

use argh::FromArgs;
use scope_timings::{Unit, open_scope, print_report};
use tracing_subscriber::EnvFilter;

/// Profiles integer and floating-point accumulation over a synthetic grayscale image.
#[derive(FromArgs)]
struct Args {
    /// how many times each variant is executed
    #[argh(option, default = "400")]
    iterations: u32,

    /// unit of the report (ms, us, ns)
    #[argh(option, default = "Unit::Microseconds")]
    unit: Unit,

    /// edge length of the square image, in pixels
    #[argh(option, default = "512")]
    size: usize,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args: Args = argh::from_env();

    let pixels_u8 = (0..args.size * args.size)
        .map(|i| (i % 251) as u8)
        .collect::<Vec<_>>();
    let pixels_f32 = pixels_u8
        .iter()
        .map(|p| f32::from(*p) / 255.0)
        .collect::<Vec<_>>();

    for _ in 0..args.iterations {
        let Ok(_scope) = open_scope("accumulate_u8", args.unit) else {
            return ExitCode::FAILURE;
        };

        black_box(pixels_u8.iter().map(|p| u32::from(*p)).sum::<u32>());
    }

    for _ in 0..args.iterations {
        let Ok(_scope) = open_scope("accumulate_f32", args.unit) else {
            return ExitCode::FAILURE;
        };

        black_box(pixels_f32.iter().sum::<f32>());
    }

    print_report(args.unit);

    ExitCode::SUCCESS
}
