use pitfall_demos::{run, ConcurrentCounter, Mode, WorkerState, WORKERS};
use proptest::prelude::*;
use std::thread;

#[test]
fn test_guarded_is_deterministic_over_trials() {
    for trial in 0..100 {
        assert_eq!(run(Mode::Guarded, 1_000).unwrap(), 2_000, "trial {trial}");
    }
}

#[test]
fn test_guarded_default_size() {
    assert_eq!(run(Mode::Guarded, 100_000).unwrap(), 200_000);
}

// Only the bounds are checked: the exact unguarded value depends on interleaving.
#[test]
fn test_unguarded_default_size_within_bounds() {
    for _ in 0..5 {
        let report = ConcurrentCounter::new(Mode::Unguarded, 100_000).unwrap().run();
        assert!(
            (2..=200_000).contains(&report.final_value),
            "final value {}",
            report.final_value
        );
        assert_eq!(report.final_value + report.lost_updates, 200_000);
        assert_eq!(report.workers, [WorkerState::Done; WORKERS]);
    }
}

// A single core only interleaves workers at preemption points, which can leave
// every run exact, so the lost-update check needs real parallelism.
#[test]
fn test_unguarded_loses_updates_on_parallel_hardware() {
    let cores = thread::available_parallelism().map_or(1, |n| n.get());
    if cores < 2 {
        eprintln!("skipping: {cores} core(s) available");
        return;
    }

    let lossy_run = (0..20).find_map(|_| {
        let report = ConcurrentCounter::new(Mode::Unguarded, 100_000).unwrap().run();
        (report.lost_updates > 0).then_some(report)
    });

    let report = lossy_run.expect("20 unguarded runs of 2 x 100000 never lost an update");
    assert!(report.final_value < 200_000);
    assert!(!report.is_exact());
    assert!(report.within_bounds());
}

#[test]
fn test_sequential_runs_do_not_share_state() {
    assert_eq!(run(Mode::Guarded, 10).unwrap(), 20);
    assert_eq!(run(Mode::Guarded, 10).unwrap(), 20);
    assert_eq!(run(Mode::Guarded, 3).unwrap(), 6);
}

#[test]
fn test_single_iteration() {
    assert_eq!(run(Mode::Guarded, 1).unwrap(), 2);
    let value = run(Mode::Unguarded, 1).unwrap();
    assert!((1..=2).contains(&value), "final value {value}");
}

#[test]
fn test_non_positive_iterations_rejected() {
    for mode in [Mode::Guarded, Mode::Unguarded] {
        assert!(run(mode, 0).unwrap_err().is_invalid_argument());
        assert!(run(mode, -5).unwrap_err().is_invalid_argument());
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_guarded_counts_every_increment(n in 1i64..2_000) {
        prop_assert_eq!(run(Mode::Guarded, n).unwrap(), 2 * n as u64);
    }

    #[test]
    fn prop_unguarded_never_exceeds_expected(n in 2i64..2_000) {
        let report = ConcurrentCounter::new(Mode::Unguarded, n).unwrap().run();
        prop_assert!(report.within_bounds());
        prop_assert!(report.final_value >= 2);
    }

    #[test]
    fn prop_non_positive_rejected(n in i64::MIN..=0) {
        prop_assert!(ConcurrentCounter::new(Mode::Guarded, n).unwrap_err().is_invalid_argument());
    }
}
