//! Demonstrating multi-threaded use of `scope_timings`.
//!
//! Every thread has its own scope stack, so nesting is only observed within one thread,
//! while samples of all threads are merged per path in the shared registry.
//!
//! Run with: `cargo run --example scope_timings_threaded`
use std::hint::black_box;
use std::thread;

use scope_timings::{ProfilerContext, Report, Unit};

fn main() {
    let profiler = ProfilerContext::new(Unit::Nanoseconds);

    let handles = (0..4)
        .map(|worker| {
            let profiler = profiler.clone();
            thread::spawn(move || {
                for item in 0..100_u64 {
                    let _job = profiler.open_scope("job").unwrap();

                    let hash = profiler
                        .measure("hash", || {
                            (0..1_000_u64).fold(item ^ worker, |acc, x| {
                                acc.rotate_left(5) ^ x.wrapping_mul(0x9E37_79B9_7F4A_7C15)
                            })
                        })
                        .unwrap();

                    black_box(hash);
                }
            })
        })
        .collect::<Vec<_>>();

    for handle in handles {
        handle.join().unwrap();
    }

    println!("Shared profiler (4 threads):");
    profiler.print_report();

    // Independent profilers can be combined after the fact.
    let local = ProfilerContext::new(Unit::Nanoseconds);
    for _ in 0..10 {
        local.measure("job", || black_box(0)).unwrap();
    }

    let merged = Report::merge(&profiler.to_report(), &local.to_report()).unwrap();

    println!();
    println!("Merged with a local profiler:");
    merged.print_to_stdout();
}
