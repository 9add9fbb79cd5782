//! Knows how to run & measure operations for the purpose of having their complexities analysed.\
//! See `tests/big_o_tests.rs` for examples.

use std::time::Instant;
use keen_retry::{loggable_retry_errors, ResolvedResult, RetryProducerResult, RetryResult};
use once_cell::sync::Lazy;
use crate::{
    api::{
        builder::ComplexityAnalyzerBuilder,
        types::ComplexityAnalysisConfig,
    },
    configs::{MIN_RELIABLE_LOG_RUN_COUNT, RETRY_DELAY},
    error::BigOError,
    features::{ALLOC, OUTPUT},
    low_level_analysis::{
        self,
        curve_fitting::fit_models,
        types::{BigOAlgorithmComplexity, ComplexityAnalysis, MetricKind},
    },
    runners::common::run_passes_verbosely,
};


/// Reference point for [time_metric()]
static TIME_ORIGIN: Lazy<Instant> = Lazy::new(Instant::now);

/// RELATIVE metric for time analysis: nanoseconds elapsed since the first time it was read
pub fn time_metric(_run: u32) -> f64 {
    TIME_ORIGIN.elapsed().as_nanos() as f64
}

/// ABSOLUTE metric for space analysis: the heap bytes currently in use, as seen by [crate::ALLOC]
pub fn space_metric(_run: u32) -> f64 {
    ALLOC.current_used_memory() as f64
}

/// Runs the harness described by `config`, fits every candidate model to the costs and classifies them,
/// reporting the progress & the full analysis through [OUTPUT]
pub fn analyse_complexity(config: &ComplexityAnalysisConfig) -> Result<ComplexityAnalysis, BigOError> {
    config.validate()?;
    if config.run_count < MIN_RELIABLE_LOG_RUN_COUNT {
        OUTPUT(&format!("  (with only {} runs, logarithmic complexities can hardly be told apart from the others)\n", config.run_count));
    }
    let series = run_passes_verbosely(config, OUTPUT)?;
    let fits = fit_models(&series)?;
    let complexity = low_level_analysis::classify(&fits, &config.thresholds);
    let analysis = ComplexityAnalysis {
        measurement_name: config.measurement_name.clone(),
        metric_kind:      config.metric_kind,
        metric_unit:      config.metric_unit,
        test_count:       config.test_count,
        series,
        fits,
        complexity,
    };
    OUTPUT(&format!("{}\n", analysis));
    Ok(analysis)
}

/// Analyses the time complexity of the operation configured in `builder` -- replacing whatever metric it had
pub fn analyse_time_complexity(builder: ComplexityAnalyzerBuilder) -> Result<ComplexityAnalysis, BigOError> {
    analyse_complexity(&builder.with_time_metric().build()?)
}

/// Analyses the space complexity of the operation configured in `builder` -- replacing whatever metric it had.\
/// The measured quantity is the heap memory in use after each run, so an operation that retains a constant
/// amount of memory on each run is `O(n)`, while one that retains nothing is `O(1)`
pub fn analyse_space_complexity(builder: ComplexityAnalyzerBuilder) -> Result<ComplexityAnalysis, BigOError> {
    analyse_complexity(&builder.with_space_metric().build()?)
}

/// Runs [analyse_complexity()], checking the observed complexity is not worse than `expected_complexity`
/// -- retrying as much as `max_retry_attempts` for [MetricKind::Relative] metrics (like time) to avoid flaky test results.\
/// [MetricKind::Absolute] metrics (like space) are deterministic, so they are never retried.\
/// Panics on rejection -- intended to be used in tests -- with the detailed analysis already sent to [OUTPUT].
pub fn test_complexity(config:              &ComplexityAnalysisConfig,
                       max_retry_attempts:  u32,
                       expected_complexity: BigOAlgorithmComplexity) {
    let result = attempt_complexity(config, expected_complexity)
        .retry_with(|_| attempt_complexity(config, expected_complexity))
        .with_delays((0..max_retry_attempts).map(|_| RETRY_DELAY));
    let failure_msg = match result {
        ResolvedResult::Ok { .. } => None,
        ResolvedResult::Fatal { error, .. } => Some(error),
        ResolvedResult::Recovered { .. } => None,
        ResolvedResult::GivenUp { retry_errors, fatal_error, .. } => Some(format!("Given up with '{}' after {max_retry_attempts} attempts. Previous transient errors: {}", fatal_error, loggable_retry_errors(&retry_errors))),
        ResolvedResult::Unrecoverable { retry_errors, fatal_error, .. } => Some(format!("Stopped after retrying for {max_retry_attempts} attempts due to the fatal outcome '{}'. Previous transient errors: {}", fatal_error, loggable_retry_errors(&retry_errors))),
    };
    if let Some(failure_msg) = failure_msg {
        panic!("{}", failure_msg);
    }
}

/// Internal version of [test_complexity()], allowing retries
fn attempt_complexity(config:              &ComplexityAnalysisConfig,
                      expected_complexity: BigOAlgorithmComplexity)
                     -> RetryProducerResult<BigOAlgorithmComplexity, String> {
    let observed_complexity = match analyse_complexity(config) {
        Ok(analysis) => analysis.complexity,
        Err(error) => {
            let msg = format!("\n ** Aborted '{}' analysis: {}\n\n", config.measurement_name, error);
            OUTPUT(&msg);
            return RetryResult::Fatal { input: (), error: msg }
        },
    };
    if observed_complexity <= expected_complexity {
        return RetryResult::Ok { reported_input: (), output: observed_complexity }
    }
    match config.metric_kind {
        MetricKind::Absolute => {
            let msg = format!("\n ** Aborted due to an ABSOLUTE metric complexity mismatch on '{}': maximum: {}, measured: {}\n\n", config.measurement_name, expected_complexity, observed_complexity);
            OUTPUT(&msg);
            RetryResult::Fatal { input: (), error: msg }
        },
        MetricKind::Relative => {
            let msg = format!("\n ** RELATIVE metric complexity mismatch on '{}': maximum: {}, measured: {} -- a reattempt may be performed...\n\n", config.measurement_name, expected_complexity, observed_complexity);
            OUTPUT(&msg);
            RetryResult::Transient { input: (), error: msg }
        },
    }
}
