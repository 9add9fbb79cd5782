//! The harness: runs the operation under analysis over all run indexes, for all test passes, producing the [CostSeries].

use crate::{
    api::types::{ComplexityAnalysisConfig, OpFn},
    error::BigOError,
    low_level_analysis::types::{CostSeries, MetricKind},
};
use std::time::Instant;


/// wrap around the original [run_passes()] to output progress & intermediate results
pub fn run_passes_verbosely(config:     &ComplexityAnalysisConfig,
                            mut output: impl FnMut(&str))
                           -> Result<CostSeries, BigOError> {
    output(&format!("Running '{}' over {} runs x {} tests: ", config.measurement_name, config.run_count, config.test_count));
    let start = Instant::now();
    let mut on_pass_end = |test: u32| output(&format!("{}{}", if test > 1 { ", " } else { "" }, test));
    let series = run_passes(config, &mut on_pass_end)?;
    output(&format!(" -- done in {:?}\n", start.elapsed()));
    Ok(series)
}

/// Runs all test passes described by `config`, calling `on_pass_end` with the 1-based test number after each one.\
/// Each pass calls `init_test(test)` and then, for the unmeasured priming run `0` followed by the measured runs `1..=run_count`:
///   1. `init_op(run)` -- for [MetricKind::Absolute] metrics, whatever it changes in the metric is accumulated in `adjustment`;
///   2. reads the `metric` before the run -- only for [MetricKind::Relative] metrics & measured runs;
///   3. `op(run)`;
///   4. for measured runs, adds `metric(run) - start - adjustment` to the cost of `run`;
///   5. `post_op(run)`.
///
/// Any callback error aborts the whole thing.
pub fn run_passes(config:          &ComplexityAnalysisConfig,
                  mut on_pass_end: impl FnMut(u32))
                 -> Result<CostSeries, BigOError> {
    config.validate()?;
    let (Some(metric), Some(op)) = (&config.metric, &config.op) else {
        return Err(BigOError::invalid_configuration("both `metric` & `op` callbacks are required"))
    };
    let read_metric = |run: u32| -> Result<f64, BigOError> {
        let reading = metric(run)?;
        if reading.is_finite() {
            Ok(reading)
        } else {
            Err(BigOError::NonFiniteMeasurement { run })
        }
    };

    let mut series = vec![0.0_f64; config.run_count as usize];
    for test in 1..=config.test_count {
        run_optional(&config.init_test, test)?;
        let mut adjustment = 0.0;
        for run in 0..=config.run_count {
            if config.init_op.is_some() {
                match config.metric_kind {
                    MetricKind::Absolute => {
                        let before = read_metric(run)?;
                        run_optional(&config.init_op, run)?;
                        adjustment += read_metric(run)? - before;
                    },
                    MetricKind::Relative => run_optional(&config.init_op, run)?,
                }
            }
            let start = match config.metric_kind {
                MetricKind::Relative if run > 0 => read_metric(run)?,
                _ => 0.0,
            };
            op(run)?;
            if run > 0 {
                series[run as usize - 1] += read_metric(run)? - start - adjustment;
            }
            run_optional(&config.post_op, run)?;
        }
        on_pass_end(test);
    }
    Ok(series.into())
}

fn run_optional(callback: &Option<OpFn>, index: u32) -> Result<(), BigOError> {
    match callback {
        Some(callback) => Ok(callback(index)?),
        None => Ok(()),
    }
}


#[cfg(test)]
mod tests {

    //! Unit tests for the [common](super) module: the harness is driven by simulated metrics, so no real measurements are taken

    use super::*;
    use crate::{
        api::builder::ComplexityAnalyzerBuilder,
        error::{CallbackError, CallbackResult},
    };
    use std::cell::{Cell, RefCell};

    #[test]
    fn relative_metrics_measure_only_the_op() {
        let clock = Cell::new(0.0);
        let config = ComplexityAnalyzerBuilder::new("simulated clock")
            .with_metric(MetricKind::Relative, |_| clock.get())
            .with_run_count(5)
            .with_test_count(1)
            .init_op(|run| clock.set(clock.get() + 1000.0 * run as f64))
            .op(|run| clock.set(clock.get() + 2.0 * run as f64))
            .post_op(|_| clock.set(clock.get() + 333.0))
            .build().expect("valid config");
        let series = run_passes(&config, |_| {}).expect("harness should succeed");
        assert_eq!(series.as_slice(), &[2.0, 4.0, 6.0, 8.0, 10.0], "only the time spent in `op` should be accounted for");
    }

    #[test]
    fn absolute_metric_isolation() {
        let size = Cell::new(0.0);
        let config = ComplexityAnalyzerBuilder::new("simulated size")
            .with_metric(MetricKind::Absolute, |_| size.get())
            .with_run_count(10)
            .with_test_count(1)
            .init_test(|_| size.set(0.0))
            .init_op(|run| size.set(size.get() + run as f64))
            .op(|_| {})
            .build().expect("valid config");
        let series = run_passes(&config, |_| {}).expect("harness should succeed");
        assert_eq!(series.len(), 10);
        assert!(series.as_slice().iter().all(|&cost| cost.abs() < 1e-9), "growth caused by `init_op` should be discounted: {:?}", series);
    }

    #[test]
    fn absolute_metrics_accumulate_what_op_retains() {
        let size = Cell::new(0.0);
        let config = ComplexityAnalyzerBuilder::new("cumulative size")
            .with_metric(MetricKind::Absolute, |_| size.get())
            .with_run_count(4)
            .with_test_count(1)
            .init_test(|_| size.set(0.0))
            .init_op(|_| size.set(size.get() + 100.0))
            .op(|run| size.set(size.get() + run as f64))
            .build().expect("valid config");
        let series = run_passes(&config, |_| {}).expect("harness should succeed");
        // priming run adds 0; then 1, 3, 6, 10 are retained by `op`
        assert_eq!(series.as_slice(), &[1.0, 3.0, 6.0, 10.0]);
    }

    #[test]
    fn passes_are_summed() {
        let size = Cell::new(0.0);
        let tests_seen = RefCell::new(vec![]);
        let passes_ended = RefCell::new(vec![]);
        let config = ComplexityAnalyzerBuilder::new("summed")
            .with_metric(MetricKind::Absolute, |_| size.get())
            .with_run_count(3)
            .with_test_count(3)
            .init_test(|test| { tests_seen.borrow_mut().push(test); size.set(0.0) })
            .op(|run| size.set(run as f64 * 10.0))
            .build().expect("valid config");
        let series = run_passes(&config, |test| passes_ended.borrow_mut().push(test)).expect("harness should succeed");
        assert_eq!(series.as_slice(), &[30.0, 60.0, 90.0], "costs of all passes should be summed per run");
        assert_eq!(*tests_seen.borrow(), vec![1, 2, 3], "`init_test` should receive 1-based test numbers");
        assert_eq!(*passes_ended.borrow(), vec![1, 2, 3]);
    }

    #[test]
    fn priming_run_is_executed_but_not_measured() {
        let runs = RefCell::new(vec![]);
        let config = ComplexityAnalyzerBuilder::new("priming")
            .with_metric(MetricKind::Absolute, |_| 1.0)
            .with_run_count(3)
            .with_test_count(2)
            .op(|run| runs.borrow_mut().push(run))
            .build().expect("valid config");
        let series = run_passes(&config, |_| {}).expect("harness should succeed");
        assert_eq!(*runs.borrow(), vec![0, 1, 2, 3, 0, 1, 2, 3]);
        assert_eq!(series.len(), 3, "the priming run must not be in the series");
    }

    #[test]
    fn negative_costs_are_kept() {
        let size = Cell::new(1000.0);
        let config = ComplexityAnalyzerBuilder::new("shrinking")
            .with_metric(MetricKind::Relative, |_| size.get())
            .with_run_count(3)
            .with_test_count(1)
            .op(|_| size.set(size.get() - 5.0))
            .build().expect("valid config");
        let series = run_passes(&config, |_| {}).expect("harness should succeed");
        assert_eq!(series.as_slice(), &[-5.0, -5.0, -5.0]);
    }

    #[test]
    fn callback_errors_abort_the_analysis() {
        let calls = Cell::new(0);
        let config = ComplexityAnalyzerBuilder::new("failing")
            .with_metric(MetricKind::Relative, |_| 0.0)
            .with_run_count(10)
            .with_test_count(1)
            .try_op(|run| {
                calls.set(calls.get() + 1);
                if run == 4 { Err(CallbackError::from("op failed on run 4")) } else { Ok(()) }
            })
            .build().expect("valid config");
        match run_passes(&config, |_| {}) {
            Err(BigOError::Callback(error)) => assert_eq!(error.to_string(), "op failed on run 4"),
            other => panic!("Expected the callback error to be propagated, got {:?}", other),
        }
        assert_eq!(calls.get(), 5, "no run should happen after the failure");
    }

    #[derive(Debug, thiserror::Error)]
    #[error("{callback} failed on #{index}")]
    struct CollaboratorFailure {
        callback: &'static str,
        index:    u32,
    }

    /// Runs the harness with every callback logging its calls, making `failing_callback` fail on `failing_index`.\
    /// Asserts the original error is given back and that nothing was called after the failure.
    fn assert_aborts_on(failing_callback: &'static str, failing_index: u32) {
        let log = RefCell::new(Vec::<(&'static str, u32)>::new());
        let call = |callback: &'static str, index: u32| -> CallbackResult {
            log.borrow_mut().push((callback, index));
            if callback == failing_callback && index == failing_index {
                Err(CollaboratorFailure { callback, index }.into())
            } else {
                Ok(())
            }
        };
        let config = ComplexityAnalyzerBuilder::new("logged callbacks")
            .with_try_metric(MetricKind::Absolute, |run| call("metric", run).map(|_| 0.0))
            .with_run_count(5)
            .with_test_count(2)
            .try_init_test(|test| call("init_test", test))
            .try_init_op(|run| call("init_op", run))
            .try_op(|run| call("op", run))
            .try_post_op(|run| call("post_op", run))
            .build().expect("valid config");
        match run_passes(&config, |_| {}) {
            Err(BigOError::Callback(error)) => {
                assert!(error.is::<CollaboratorFailure>(), "the original `{}` error should be given back: {:?}", failing_callback, error);
                assert_eq!(error.to_string(), format!("{} failed on #{}", failing_callback, failing_index));
            },
            other => panic!("Expected the `{}` error to be propagated, got {:?}", failing_callback, other),
        }
        let log = log.borrow();
        assert_eq!(log.last(), Some(&(failing_callback, failing_index)), "no callback should be called after `{}` failed. Calls: {:?}", failing_callback, log);
    }

    #[test]
    fn metric_errors_abort_the_analysis() {
        assert_aborts_on("metric", 3);
    }

    #[test]
    fn init_test_errors_abort_the_analysis() {
        assert_aborts_on("init_test", 2);
    }

    #[test]
    fn init_op_errors_abort_the_analysis() {
        assert_aborts_on("init_op", 2);
    }

    #[test]
    fn op_errors_abort_the_analysis() {
        assert_aborts_on("op", 4);
    }

    #[test]
    fn post_op_errors_abort_the_analysis() {
        assert_aborts_on("post_op", 3);
    }

    #[test]
    fn harness_runs_on_its_own() {
        let size = Cell::new(0.0);
        let config = ComplexityAnalyzerBuilder::new("harness only")
            .with_metric(MetricKind::Absolute, |_| size.get())
            .with_run_count(3)
            .with_test_count(2)
            .init_test(|_| size.set(0.0))
            .op(|_| size.set(size.get() + 1.0))
            .build().expect("valid config");
        let series = config.run_harness().expect("harness should succeed");
        assert_eq!(series.as_slice(), &[4.0, 6.0, 8.0], "each pass retains 1 per run, priming run included");
    }

    #[test]
    fn non_finite_metrics_abort_the_analysis() {
        let config = ComplexityAnalyzerBuilder::new("nan")
            .with_metric(MetricKind::Absolute, |run| if run == 2 { f64::NAN } else { 0.0 })
            .with_run_count(5)
            .op(|_| {})
            .build().expect("valid config");
        assert!(matches!(run_passes(&config, |_| {}), Err(BigOError::NonFiniteMeasurement { run: 2 })));
    }

    #[test]
    fn verbose_runs_report_progress() {
        let mut report = String::new();
        let config = ComplexityAnalyzerBuilder::new("verbose")
            .with_metric(MetricKind::Absolute, |_| 0.0)
            .with_run_count(2)
            .with_test_count(3)
            .op(|_| {})
            .build().expect("valid config");
        run_passes_verbosely(&config, |text| report.push_str(text)).expect("harness should succeed");
        assert!(report.starts_with("Running 'verbose' over 2 runs x 3 tests: 1, 2, 3 -- done in "), "unexpected report: '{}'", report);
    }
}
