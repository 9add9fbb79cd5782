//! Contains constants used throughout this crate

/// number of measured runs (run indices `1..=run_count`) used when none is specified.
/// The unmeasured priming run (index 0) comes on top of this
pub const DEFAULT_RUN_COUNT: u32 = 1_000;

/// number of full passes over all run indices -- their per-run measurements are summed to damp noise
pub const DEFAULT_TEST_COUNT: u32 = 5;

/// the highest-order coefficient of a candidate model must be greater than this to have that model accepted
/// -- rejects terms that are technically non-zero but were produced purely by fitting noise
pub const DEFAULT_COEFFICIENT_THRESHOLD: f64 = 1e-6;

/// below this number of runs the `O(log(n))` & `O(n.log(n))` curves are hard to tell apart from the others
pub const MIN_RELIABLE_LOG_RUN_COUNT: u32 = 20;

/// pause between the reattempts of [crate::runners::standard::test_complexity()] -- letting the machine settle down
pub const RETRY_DELAY: std::time::Duration = std::time::Duration::from_secs(1);
