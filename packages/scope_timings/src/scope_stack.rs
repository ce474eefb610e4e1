use std::cell::RefCell;
use std::sync::atomic::{self, AtomicU64};

use foldhash::{HashMap, HashMapExt};

use crate::{Error, Result};

/// Ordered sequence of the scope names currently open on one thread, outer to inner.
///
/// Names are only ever appended to or removed from the tail.
#[derive(Debug, Default)]
pub(crate) struct ScopeStack {
    names: Vec<String>,
}

impl ScopeStack {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, name: impl Into<String>) {
        self.names.push(name.into());
    }

    /// Removes the innermost name.
    ///
    /// Returns [`Error::StackUnderflow`] if no name is on the stack.
    pub(crate) fn pop(&mut self) -> Result<String> {
        self.names.pop().ok_or(Error::StackUnderflow)
    }

    /// Joins all names on the stack, outer to inner, with `separator` between each pair.
    pub(crate) fn current_path(&self, separator: &str) -> String {
        self.names.join(separator)
    }

    pub(crate) fn len(&self) -> usize {
        self.names.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Identifies the profiler that a thread-local scope stack belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) struct StackKey(u64);

impl StackKey {
    pub(crate) fn next() -> Self {
        static NEXT_KEY: AtomicU64 = AtomicU64::new(0);

        Self(NEXT_KEY.fetch_add(1, atomic::Ordering::Relaxed))
    }
}

thread_local! {
    // Stacks are removed again once they become empty, so profilers that are dropped
    // do not leave entries behind on long-lived threads.
    static THREAD_STACKS: RefCell<HashMap<StackKey, ScopeStack>> = RefCell::new(HashMap::new());
}

/// Executes `f` with the scope stack that the current thread holds for the profiler `key`.
///
/// Returns `None` without executing `f` if thread-local storage is already being torn down,
/// which happens when a guard is dropped by the destructor of another thread-local value.
pub(crate) fn with_thread_stack<R>(
    key: StackKey,
    f: impl FnOnce(&mut ScopeStack) -> R,
) -> Option<R> {
    THREAD_STACKS
        .try_with(|stacks| {
            let mut stacks = stacks.borrow_mut();
            let stack = stacks.entry(key).or_default();

            let result = f(stack);

            if stack.is_empty() {
                stacks.remove(&key);
            }

            result
        })
        .ok()
}
