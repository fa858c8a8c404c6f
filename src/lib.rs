//! Guarded vs. unguarded shared counters.
//!
//! The library holds the one reusable piece of the pitfall demos: a counter
//! incremented by two threads, either under a mutex or with a deliberately
//! racy load/store pair. The other demos are standalone binaries.

pub mod cli;
pub mod counter;
pub mod error;

pub use counter::{
    run, ConcurrentCounter, Mode, RunReport, WorkerState, DEFAULT_ITERATIONS, WORKERS,
};
pub use error::{CounterError, Result};
