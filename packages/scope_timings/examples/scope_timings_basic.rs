//! Simplified example demonstrating nested scopes aggregated by path.
//!
//! This example shows how to use the main types in the `scope_timings` package:
//! - `ProfilerContext`: Owns the configuration and the registry of one profiler
//! - `ScopeGuard`: Measures one region from creation until it is dropped
//!
//! Run with: `cargo run --example scope_timings_basic`.
use std::fmt::Write;
use std::hint::black_box;

use scope_timings::{ProfilerContext, Unit};

fn main() {
    let profiler = ProfilerContext::new(Unit::Microseconds);

    for frame in 0..50_u64 {
        let _frame = profiler.open_scope("frame").unwrap();

        {
            let _update = profiler.open_scope("update").unwrap();

            let mut state = frame;
            for _ in 0..10_000 {
                state = state.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1);
            }
            black_box(state);
        }

        {
            let _render = profiler.open_scope("render").unwrap();

            let mut text = String::new();
            for line in 0..200 {
                writeln!(text, "frame {frame} line {line}").unwrap();
            }
            black_box(text);
        }
    }

    // Rows: frame, frame/render, frame/update - 50 samples each.
    profiler.print_report();
}
