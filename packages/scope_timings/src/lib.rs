//! Hierarchical scoped wall-clock profiler.
//!
//! This package measures the wall-clock duration of nested code regions, aggregates repeated
//! measurements by the structural path of the region and renders summary statistics as an
//! aligned table.
//!
//! The core functionality includes:
//! - [`ProfilerContext`] - Owns the configuration and the timing registry of one profiler
//! - [`ScopeGuard`] - Measures one region from creation until it is dropped
//! - [`TimingRegistry`] - Accumulates samples per qualified path
//! - [`Report`] - Snapshot of the registry with min/max/mean/count per path
//!
//! # Simple usage
//!
//! ```
//! use scope_timings::{ProfilerContext, Unit};
//!
//! let profiler = ProfilerContext::new(Unit::Microseconds);
//!
//! for _ in 0..10 {
//!     let _outer = profiler.open_scope("frame").unwrap();
//!
//!     {
//!         let _inner = profiler.open_scope("physics").unwrap();
//!         std::hint::black_box((0..1000).sum::<u64>());
//!     }
//! }
//!
//! // Prints rows for "frame" and "frame/physics", 10 samples each.
//! profiler.print_report();
//! ```
//!
//! # Qualified paths
//!
//! Every open scope pushes its name onto a stack. The qualified path of a scope is the
//! `/`-joined list of all scope names open at the moment it was opened, outer to inner.
//! Scopes that produce the same path, for example the body of a loop, are aggregated into
//! one row of the report.
//!
//! # Threading
//!
//! Each thread has its own scope stack per profiler, so nesting is only ever observed within
//! one thread. The timing registry is shared and synchronized: samples recorded on different
//! threads under the same qualified path are merged. A [`ScopeGuard`] cannot leave the thread
//! that opened it.
//!
//! # Process-wide profilers
//!
//! For quick instrumentation without passing a context around, [`open_scope()`] and
//! [`print_report()`] use one lazily created profiler per [`Unit`]:
//!
//! ```
//! use scope_timings::{Unit, open_scope, print_report};
//!
//! {
//!     let _scope = open_scope("startup", Unit::Milliseconds).unwrap();
//! }
//!
//! print_report(Unit::Milliseconds);
//! ```

mod constants;
mod context;
mod context_builder;
mod error;
mod format;
mod global;
mod pal;
mod registry;
mod report;
mod scope_guard;
mod scope_stack;
mod statistics;
mod unit;

pub(crate) use constants::*;
pub use constants::PATH_SEPARATOR;
pub use context::*;
pub use context_builder::*;
pub use error::*;
pub use global::*;
pub use registry::*;
pub use report::*;
pub use scope_guard::*;
pub(crate) use scope_stack::*;
pub use unit::*;
