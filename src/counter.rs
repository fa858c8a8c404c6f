//! Two workers, one shared counter.
//!
//! `Mode::Guarded` wraps every increment in a `MutexGuard`, so the 2×N
//! read-modify-write steps are linearized and the result is exact.
//! `Mode::Unguarded` splits each increment into a separate load and store, so
//! concurrent workers overwrite each other's progress and updates get lost.
//! The unguarded result is non-deterministic on purpose: it is only ever
//! bounded, never asserted.

use std::array;
use std::fmt;
use std::num::NonZeroU64;
use std::panic;
use std::sync::atomic::{AtomicU64, AtomicU8, Ordering};
use std::sync::{Mutex, PoisonError};
use std::thread;
use std::time::{Duration, Instant};

use clap::ValueEnum;
use log::{debug, info, warn};
use serde::{Serialize, Serializer};

use crate::error::{CounterError, Result};

/// Number of workers sharing one counter.
pub const WORKERS: usize = 2;

/// Increments per worker when the caller does not choose.
pub const DEFAULT_ITERATIONS: i64 = 100_000;

// =============================================================================
// Mode and worker state
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// No synchronization; lost updates are expected.
    Unguarded,
    /// One mutex acquisition per increment.
    Guarded,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Unguarded => "unguarded",
            Mode::Guarded => "guarded",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum WorkerState {
    NotStarted = 0,
    Running = 1,
    Done = 2,
}

/// State slot written by the worker it belongs to, read by the coordinator.
struct WorkerSlot(AtomicU8);

impl WorkerSlot {
    fn new() -> Self {
        WorkerSlot(AtomicU8::new(WorkerState::NotStarted as u8))
    }

    fn set(&self, state: WorkerState) {
        self.0.store(state as u8, Ordering::Release);
    }

    fn get(&self) -> WorkerState {
        match self.0.load(Ordering::Acquire) {
            0 => WorkerState::NotStarted,
            1 => WorkerState::Running,
            _ => WorkerState::Done,
        }
    }
}

// =============================================================================
// Shared storage
// =============================================================================

enum SharedCounter {
    Unguarded(AtomicU64),
    Guarded(Mutex<u64>),
}

impl SharedCounter {
    fn new(mode: Mode) -> Self {
        match mode {
            Mode::Unguarded => SharedCounter::Unguarded(AtomicU64::new(0)),
            Mode::Guarded => SharedCounter::Guarded(Mutex::new(0)),
        }
    }

    fn increment(&self) {
        match self {
            SharedCounter::Unguarded(cell) => {
                // Not a fetch_add: a store from the other worker between
                // these two lines is overwritten.
                let current = cell.load(Ordering::Relaxed);
                cell.store(current + 1, Ordering::Relaxed);
            }
            SharedCounter::Guarded(lock) => {
                // The guard is dropped at the end of this arm, even on unwind.
                let mut value = lock.lock().unwrap_or_else(PoisonError::into_inner);
                *value += 1;
            }
        }
    }

    fn into_value(self) -> u64 {
        match self {
            SharedCounter::Unguarded(cell) => cell.into_inner(),
            SharedCounter::Guarded(lock) => {
                lock.into_inner().unwrap_or_else(PoisonError::into_inner)
            }
        }
    }
}

// =============================================================================
// Run report
// =============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub mode: Mode,
    pub iterations: u64,
    pub final_value: u64,
    pub expected: u64,
    pub lost_updates: u64,
    #[serde(rename = "elapsed_ms", serialize_with = "serialize_millis")]
    pub elapsed: Duration,
    /// Last state each worker recorded for itself.
    pub workers: [WorkerState; WORKERS],
}

fn serialize_millis<S: Serializer>(
    elapsed: &Duration,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_f64(elapsed.as_secs_f64() * 1000.0)
}

impl RunReport {
    pub fn is_exact(&self) -> bool {
        self.final_value == self.expected
    }

    /// Smallest value an unguarded run can end with.
    ///
    /// With a single increment per worker both can read 0 and store 1.
    /// From two increments on, the last store of some worker always lands
    /// after the other worker's first store was read, which leaves at least 2.
    pub fn lower_bound(&self) -> u64 {
        if self.iterations >= 2 {
            2
        } else {
            1
        }
    }

    pub fn within_bounds(&self) -> bool {
        (self.lower_bound()..=self.expected).contains(&self.final_value)
    }
}

// =============================================================================
// ConcurrentCounter
// =============================================================================

/// A validated, one-shot counter run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConcurrentCounter {
    mode: Mode,
    iterations: NonZeroU64,
}

impl ConcurrentCounter {
    /// Rejects `n_iterations <= 0` before anything is spawned.
    pub fn new(mode: Mode, n_iterations: i64) -> Result<Self> {
        let iterations = u64::try_from(n_iterations)
            .ok()
            .and_then(NonZeroU64::new)
            .ok_or_else(|| {
                CounterError::invalid_argument(
                    "iterations",
                    n_iterations,
                    "must be greater than zero",
                )
            })?;

        Ok(ConcurrentCounter { mode, iterations })
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn iterations(&self) -> u64 {
        self.iterations.get()
    }

    pub fn expected(&self) -> u64 {
        self.iterations.get() * WORKERS as u64
    }

    /// Spawns both workers, joins them, then reads the counter once.
    ///
    /// Panics only if a worker panicked, after both have been joined.
    pub fn run(self) -> RunReport {
        let counter = SharedCounter::new(self.mode);
        let iterations = self.iterations.get();
        let slots: [WorkerSlot; WORKERS] = array::from_fn(|_| WorkerSlot::new());
        let mut worker_panic = None;

        info!(
            "starting {} run: {} workers x {} iterations",
            self.mode, WORKERS, iterations
        );
        let started = Instant::now();

        thread::scope(|scope| {
            let handles: Vec<_> = slots
                .iter()
                .enumerate()
                .map(|(id, slot)| {
                    let counter = &counter;
                    scope.spawn(move || {
                        slot.set(WorkerState::Running);
                        debug!("worker {id} running");
                        for _ in 0..iterations {
                            counter.increment();
                        }
                        slot.set(WorkerState::Done);
                        debug!("worker {id} done");
                    })
                })
                .collect();

            for (id, handle) in handles.into_iter().enumerate() {
                if let Err(payload) = handle.join() {
                    warn!("worker {id} panicked in state {:?}", slots[id].get());
                    if worker_panic.is_none() {
                        worker_panic = Some(payload);
                    }
                }
            }
        });

        if let Some(payload) = worker_panic {
            panic::resume_unwind(payload);
        }

        let elapsed = started.elapsed();
        let workers = array::from_fn(|id| slots[id].get());
        let final_value = counter.into_value();
        let expected = self.expected();
        let lost_updates = expected.saturating_sub(final_value);

        if lost_updates > 0 {
            warn!(
                "{} run lost {} of {} updates",
                self.mode, lost_updates, expected
            );
        }
        info!("{} run finished with {} in {:?}", self.mode, final_value, elapsed);

        RunReport {
            mode: self.mode,
            iterations,
            final_value,
            expected,
            lost_updates,
            elapsed,
            workers,
        }
    }
}

/// Runs two workers over a fresh counter and returns its final value.
pub fn run(mode: Mode, n_iterations: i64) -> Result<u64> {
    let counter = ConcurrentCounter::new(mode, n_iterations)?;
    Ok(counter.run().final_value)
}
