//! Contains code for handling the Cargo features used to compile this crate.

use std::io::{stdout,stderr,Write};
use crate::metrics_allocator::MetricsAllocator;

#[cfg(any(feature = "tolerance_5_percent", not(any(feature = "tolerance_10_percent", feature = "tolerance_25_percent"))))]
/// default proportional improvement a more complex model must achieve over every simpler one to be accepted
pub const DEFAULT_ERROR_THRESHOLD: f64 = 0.05;

#[cfg(all(feature = "tolerance_10_percent", not(feature = "tolerance_5_percent")))]
/// default proportional improvement a more complex model must achieve over every simpler one to be accepted
pub const DEFAULT_ERROR_THRESHOLD: f64 = 0.10;

#[cfg(all(feature = "tolerance_25_percent", not(any(feature = "tolerance_5_percent", feature = "tolerance_10_percent"))))]
/// default proportional improvement a more complex model must achieve over every simpler one to be accepted
pub const DEFAULT_ERROR_THRESHOLD: f64 = 0.25;

#[cfg(all(feature = "report_stdout", not(feature = "no_report")))]
/// Function to output an `&str` -- used to sink analysis reports -- controlled by the crate's features (stdout, stderr, no_report)
pub const OUTPUT: fn(&str) = stdout_write;

#[cfg(all(feature = "report_stderr", not(any(feature = "report_stdout", feature = "no_report"))))]
/// Function to output an `&str` -- used to sink analysis reports -- controlled by the crate's features (stdout, stderr, no_report)
pub const OUTPUT: fn(&str) = stderr_write;

#[cfg(any(feature = "no_report", not(any(feature = "report_stdout", feature = "report_stderr"))))]
/// Function to output an `&str` -- used to sink analysis reports -- controlled by the crate's features (stdout, stderr, no_report)
pub const OUTPUT: fn(&str) = null_write;

/// Allows access to the metrics allocator -- replacing the Global Allocator
/// unless the `no_allocator_metrics` feature is enabled, in which case it is never fed
/// and [crate::runners::standard::analyse_space_complexity()] will only see a flat series.
/// NOTE: if you want to use this crate in integration tests only, you should have a feature
///       in your project to only include this crate when compiling them
#[cfg_attr(not(feature = "no_allocator_metrics"), global_allocator)]
pub static ALLOC: MetricsAllocator = MetricsAllocator::new();


#[allow(dead_code)]
fn stdout_write(buf: &str) {
    sync_outputs();
    print!("{}", buf);
    sync_outputs();
}

#[allow(dead_code)]
fn stderr_write(buf: &str) {
    sync_outputs();
    eprint!("{}", buf);
    sync_outputs();
}

/// Flushes both stdout and stderr so the next output will be in sync with everything that came before
fn sync_outputs() {
    _ = stdout().flush();
    _ = stderr().flush();
}

#[allow(dead_code)]
fn null_write(_buf: &str) {
    // release compilations will optimize out this call for '_buf' is not used
}
