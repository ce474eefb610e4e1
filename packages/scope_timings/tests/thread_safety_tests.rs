//! Thread safety integration tests for `scope_timings`.
//!
//! These tests verify that the public API types can be moved between threads where
//! intended and that guards stay on the thread that opened them.

use std::sync::Arc;
use std::thread;

use scope_timings::{PathStatistics, ProfilerContext, Report, ScopeGuard, TimingRegistry, Unit};

static_assertions::assert_impl_all!(ProfilerContext: Send, Sync, Clone);
static_assertions::assert_impl_all!(TimingRegistry: Send, Sync);
static_assertions::assert_impl_all!(Report: Send, Sync);
static_assertions::assert_impl_all!(PathStatistics: Send, Sync);
static_assertions::assert_not_impl_any!(ScopeGuard: Send, Sync);

#[test]
fn context_can_be_moved_between_threads() {
    let profiler = ProfilerContext::new(Unit::Nanoseconds);

    let handle = thread::spawn(move || {
        {
            let _scope = profiler.open_scope("cross_thread_work").unwrap();
            std::hint::black_box((0..1000).sum::<u64>());
        }

        profiler.to_report()
    });

    let report = handle.join().unwrap();
    assert_eq!(report.get("cross_thread_work").unwrap().count(), 1);
}

#[test]
fn report_can_be_shared_across_threads() {
    let profiler = ProfilerContext::new(Unit::Nanoseconds);
    profiler.measure("shared", || {}).unwrap();

    let report = Arc::new(profiler.to_report());

    let handles = (0..2)
        .map(|_| {
            let report = Arc::clone(&report);
            thread::spawn(move || report.get("shared").map(PathStatistics::count))
        })
        .collect::<Vec<_>>();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), Some(1));
    }
}

#[test]
fn nesting_is_only_observed_within_one_thread() {
    let profiler = ProfilerContext::new(Unit::Microseconds);

    let outer = profiler.open_scope("request").unwrap();

    let worker = profiler.clone();
    let worker_path = thread::spawn(move || {
        let scope = worker.open_scope("background").unwrap();
        scope.path().to_string()
    })
    .join()
    .unwrap();

    assert_eq!(worker_path, "background");
    assert_eq!(profiler.stack_depth(), 1);

    let inner = profiler.open_scope("handler").unwrap();
    assert_eq!(inner.path(), "request/handler");

    drop(inner);
    drop(outer);
}

#[test]
fn shared_registry_merges_reports_from_threads() {
    let registry = Arc::new(TimingRegistry::new(Unit::Microseconds));

    let handles = (0..3)
        .map(|_| {
            let registry = Arc::clone(&registry);
            thread::spawn(move || {
                let profiler = ProfilerContext::builder()
                    .registry(registry)
                    .build()
                    .unwrap();

                for _ in 0..10 {
                    profiler.measure("tick", || {}).unwrap();
                }
            })
        })
        .collect::<Vec<_>>();

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(registry.snapshot().get("tick").unwrap().count(), 30);
}

#[test]
fn reports_from_threads_can_be_merged() {
    let handles = (0..2)
        .map(|_| {
            thread::spawn(|| {
                let profiler = ProfilerContext::new(Unit::Nanoseconds);
                for _ in 0..5 {
                    profiler.measure("work", || {}).unwrap();
                }
                profiler.to_report()
            })
        })
        .collect::<Vec<_>>();

    let reports = handles
        .into_iter()
        .map(|handle| handle.join().unwrap())
        .collect::<Vec<_>>();

    let [first, second] = reports.as_slice() else {
        panic!("expected one report per thread");
    };

    let merged = Report::merge(first, second).unwrap();
    assert_eq!(merged.get("work").unwrap().count(), 10);
}
