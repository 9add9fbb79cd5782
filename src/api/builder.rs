//! Defines our main API (using the Builder Pattern)
//!
//! ```ignore
//! ComplexityAnalyzerBuilder::new("Vec::push()")
//!     .with_space_metric()
//!     .with_run_count(1000)
//!     .init_test(|_test| {vec.borrow_mut().clear(); })
//!     .op(|run| vec.borrow_mut().push(run))
//!     .build()?
//!     .run()?;
//! ```

use crate::{
    api::types::{ComplexityAnalysisConfig, MetricFn, OpFn},
    configs::{DEFAULT_RUN_COUNT, DEFAULT_TEST_COUNT},
    error::{BigOError, CallbackResult},
    low_level_analysis::types::{ClassificationThresholds, MetricKind},
    runners::standard::{space_metric, time_metric},
    utils::presentable_measurements::MetricUnit,
};


/// Accumulates the configuration for a complexity analysis, producing an immutable [ComplexityAnalysisConfig] on [Self::build()].\
/// Callbacks come in 2 flavours: infallible (`op()`, `init_op()`, ...) and fallible (`try_op()`, `try_init_op()`, ...) --
/// whose errors abort the analysis and are given back untouched.
pub struct ComplexityAnalyzerBuilder<'a> {
    config: ComplexityAnalysisConfig<'a>,
}

impl<'a> ComplexityAnalyzerBuilder<'a> {

    /// Starts a configuration with default run & test counts and thresholds, but with no `metric` nor `op` callbacks
    pub fn new(measurement_name: impl Into<String>) -> Self {
        Self {
            config: ComplexityAnalysisConfig {
                measurement_name: measurement_name.into(),
                run_count:        DEFAULT_RUN_COUNT,
                test_count:       DEFAULT_TEST_COUNT,
                metric_kind:      MetricKind::Relative,
                metric_unit:      MetricUnit::Custom(""),
                thresholds:       ClassificationThresholds::default(),
                metric:           None,
                op:               None,
                init_test:        None,
                init_op:          None,
                post_op:          None,
            },
        }
    }

    /// The quantity to measure, read before & after each run for [MetricKind::Relative] metrics
    /// or only after each run for [MetricKind::Absolute] ones
    pub fn with_metric(self, metric_kind: MetricKind, metric: impl Fn(u32) -> f64 + 'a) -> Self {
        self.with_try_metric(metric_kind, move |run| Ok(metric(run)))
    }

    /// Fallible version of [Self::with_metric()]
    pub fn with_try_metric(mut self, metric_kind: MetricKind, metric: impl Fn(u32) -> CallbackResult<f64> + 'a) -> Self {
        self.config.metric_kind = metric_kind;
        self.config.metric.replace(Box::new(metric) as MetricFn<'a>);
        self
    }

    /// Measures the elapsed time of each run, in nanoseconds
    pub fn with_time_metric(self) -> Self {
        self.with_metric(MetricKind::Relative, time_metric)
            .with_metric_unit(MetricUnit::Nanoseconds)
    }

    /// Measures the heap memory in use after each run, in bytes
    pub fn with_space_metric(self) -> Self {
        self.with_metric(MetricKind::Absolute, space_metric)
            .with_metric_unit(MetricUnit::Bytes)
    }

    /// Presentation only: how the reported costs should be scaled & suffixed
    pub fn with_metric_unit(mut self, metric_unit: MetricUnit) -> Self {
        self.config.metric_unit = metric_unit;
        self
    }

    pub fn with_name(mut self, measurement_name: impl Into<String>) -> Self {
        self.config.measurement_name = measurement_name.into();
        self
    }

    /// Number of measured runs -- the unmeasured priming run comes on top of it
    pub fn with_run_count(mut self, run_count: u32) -> Self {
        self.config.run_count = run_count;
        self
    }

    /// Number of passes over all runs, whose costs are summed
    pub fn with_test_count(mut self, test_count: u32) -> Self {
        self.config.test_count = test_count;
        self
    }

    pub fn with_error_threshold(mut self, error_threshold: f64) -> Self {
        self.config.thresholds.error_threshold = error_threshold;
        self
    }

    pub fn with_coefficient_threshold(mut self, coefficient_threshold: f64) -> Self {
        self.config.thresholds.coefficient_threshold = coefficient_threshold;
        self
    }

    /// The operation under analysis, receiving the run index
    pub fn op(self, op: impl Fn(u32) + 'a) -> Self {
        self.try_op(infallible(op))
    }

    pub fn try_op(mut self, op: impl Fn(u32) -> CallbackResult + 'a) -> Self {
        self.config.op.replace(Box::new(op) as OpFn<'a>);
        self
    }

    /// Called at the start of each test pass with the 1-based test number -- usually to reset the collaborator
    pub fn init_test(self, init_test: impl Fn(u32) + 'a) -> Self {
        self.try_init_test(infallible(init_test))
    }

    pub fn try_init_test(mut self, init_test: impl Fn(u32) -> CallbackResult + 'a) -> Self {
        self.config.init_test.replace(Box::new(init_test) as OpFn<'a>);
        self
    }

    /// Unmeasured setup before each run -- for absolute metrics, whatever it adds is discounted from the costs
    pub fn init_op(self, init_op: impl Fn(u32) + 'a) -> Self {
        self.try_init_op(infallible(init_op))
    }

    pub fn try_init_op(mut self, init_op: impl Fn(u32) -> CallbackResult + 'a) -> Self {
        self.config.init_op.replace(Box::new(init_op) as OpFn<'a>);
        self
    }

    /// Unmeasured teardown after each run
    pub fn post_op(self, post_op: impl Fn(u32) + 'a) -> Self {
        self.try_post_op(infallible(post_op))
    }

    pub fn try_post_op(mut self, post_op: impl Fn(u32) -> CallbackResult + 'a) -> Self {
        self.config.post_op.replace(Box::new(post_op) as OpFn<'a>);
        self
    }

    /// Validates & returns the immutable configuration
    pub fn build(self) -> Result<ComplexityAnalysisConfig<'a>, BigOError> {
        self.config.validate()?;
        Ok(self.config)
    }
}

fn infallible<'a>(callback: impl Fn(u32) + 'a) -> impl Fn(u32) -> CallbackResult + 'a {
    move |index| {
        callback(index);
        Ok(())
    }
}
