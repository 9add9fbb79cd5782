//! Contains common types used throughout our API

use crate::{
    error::{BigOError, CallbackResult},
    low_level_analysis::types::{ClassificationThresholds, ComplexityAnalysis, CostSeries, MetricKind},
    runners,
    utils::presentable_measurements::MetricUnit,
};
use std::fmt::{Debug, Formatter};


/// Signature for the `op`, `init_op`, `post_op` & `init_test` callbacks: receives the run index (or, for `init_test`,
/// the 1-based test number) and may fail -- aborting the whole analysis with [BigOError::Callback]
pub type OpFn<'a> = Box<dyn Fn(u32) -> CallbackResult + 'a>;

/// Signature for the `metric` callback: receives the run index and returns the current reading of the measured quantity
pub type MetricFn<'a> = Box<dyn Fn(u32) -> CallbackResult<f64> + 'a>;

/// Everything needed for a complexity analysis. Built by [crate::api::builder::ComplexityAnalyzerBuilder]
/// and never mutated afterwards -- so the same configuration may be [run](Self::run()) any number of times.
pub struct ComplexityAnalysisConfig<'a> {
    pub(crate) measurement_name: String,
    pub(crate) run_count:        u32,
    pub(crate) test_count:       u32,
    pub(crate) metric_kind:      MetricKind,
    pub(crate) metric_unit:      MetricUnit,
    pub(crate) thresholds:       ClassificationThresholds,
    pub(crate) metric:           Option<MetricFn<'a>>,
    pub(crate) op:               Option<OpFn<'a>>,
    pub(crate) init_test:        Option<OpFn<'a>>,
    pub(crate) init_op:          Option<OpFn<'a>>,
    pub(crate) post_op:          Option<OpFn<'a>>,
}

impl<'a> ComplexityAnalysisConfig<'a> {

    /// Runs the harness, fits every candidate model to the resulting costs and classifies them
    /// -- reporting the progress & results through [crate::OUTPUT]
    pub fn run(&self) -> Result<ComplexityAnalysis, BigOError> {
        runners::standard::analyse_complexity(self)
    }

    /// Runs the harness only, returning the cost of each run summed across all test passes
    pub fn run_harness(&self) -> Result<CostSeries, BigOError> {
        runners::common::run_passes(self, |_test| {})
    }

    pub fn measurement_name(&self) -> &str {
        &self.measurement_name
    }

    pub fn run_count(&self) -> u32 {
        self.run_count
    }

    pub fn test_count(&self) -> u32 {
        self.test_count
    }

    pub fn metric_kind(&self) -> MetricKind {
        self.metric_kind
    }

    pub fn metric_unit(&self) -> MetricUnit {
        self.metric_unit
    }

    pub fn thresholds(&self) -> &ClassificationThresholds {
        &self.thresholds
    }

    /// Checks every constraint on the configuration, so the analysis may fail before any callback is called
    pub fn validate(&self) -> Result<(), BigOError> {
        if self.run_count < 2 {
            return Err(BigOError::invalid_configuration(format!("`run_count` must be at least 2 -- {} given", self.run_count)));
        }
        if self.test_count < 1 {
            return Err(BigOError::invalid_configuration("`test_count` must be at least 1"));
        }
        if self.op.is_none() {
            return Err(BigOError::invalid_configuration("the `op` callback is required"));
        }
        if self.metric.is_none() {
            return Err(BigOError::invalid_configuration("the `metric` callback is required"));
        }
        let ClassificationThresholds { error_threshold, coefficient_threshold } = self.thresholds;
        if !error_threshold.is_finite() || error_threshold <= 0.0 {
            return Err(BigOError::invalid_configuration(format!("`error_threshold` must be a positive number -- {} given", error_threshold)));
        }
        if !coefficient_threshold.is_finite() || coefficient_threshold < 0.0 {
            return Err(BigOError::invalid_configuration(format!("`coefficient_threshold` must be a non-negative number -- {} given", coefficient_threshold)));
        }
        Ok(())
    }
}

impl Debug for ComplexityAnalysisConfig<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        fn presence<T>(callback: &Option<T>) -> &'static str {
            if callback.is_some() { "present" } else { "absent" }
        }
        f.debug_struct("ComplexityAnalysisConfig")
            .field("measurement_name", &self.measurement_name)
            .field("run_count", &self.run_count)
            .field("test_count", &self.test_count)
            .field("metric_kind", &self.metric_kind)
            .field("metric_unit", &self.metric_unit)
            .field("thresholds", &self.thresholds)
            .field("metric", &presence(&self.metric))
            .field("op", &presence(&self.op))
            .field("init_test", &presence(&self.init_test))
            .field("init_op", &presence(&self.init_op))
            .field("post_op", &presence(&self.post_op))
            .finish()
    }
}
