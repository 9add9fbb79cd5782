//! Defines traits, enums & structs returned / shared by this crate's functions.

use crate::{
    configs::DEFAULT_COEFFICIENT_THRESHOLD,
    features::DEFAULT_ERROR_THRESHOLD,
    utils::presentable_measurements::MetricUnit,
};
use std::fmt::{Display, Formatter};


/// Possible time & space complexity analysis results, in big-O notation.\
/// Variants are declared from the simplest to the most complex, so they may be compared with `<` & `>`.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy)]
pub enum BigOAlgorithmComplexity {
    O1,
    OLogN,
    ON,
    ONLogN,
    ON2,
}
impl BigOAlgorithmComplexity {
    /// big-O notation for each enum element
    pub fn as_pretty_str(&self) -> &'static str {
        match self {
            Self::O1     => "O(1)",
            Self::OLogN  => "O(log n)",
            Self::ON     => "O(n)",
            Self::ONLogN => "O(n log n)",
            Self::ON2    => "O(n^2)",
        }
    }
    /// same as [Self::as_pretty_str()], with additional info for time analysis
    pub fn as_time_pretty_str(&self) -> &'static str {
        match self {
            Self::ON2 => "O(n^2) -- really bad algorithm or CPU cache sizes might be playing a role?",
            _ => self.as_pretty_str(),
        }
    }
    /// same as [Self::as_pretty_str()], with additional info for space analysis -- where the measured
    /// quantity is the memory footprint after each run, not what each run alone allocated
    pub fn as_space_pretty_str(&self) -> &'static str {
        match self {
            Self::O1  => "O(1) -- no memory is retained by the operation",
            Self::ON  => "O(n) -- each operation retains a constant amount of memory",
            Self::ON2 => "O(n^2) -- each operation retains memory proportional to `n`. Is there a hidden bug?",
            _ => self.as_pretty_str(),
        }
    }
}
impl Display for BigOAlgorithmComplexity {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_pretty_str())
    }
}

/// How the quantity returned by the `metric` callback should be interpreted
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum MetricKind {
    /// Meaningfully measured as the difference between two readings -- elapsed time, for instance.
    /// The cost of a run is `metric(after op) - metric(before op)`
    Relative,
    /// Meaningfully measured as a standalone reading -- the memory footprint, for instance.
    /// The cost of a run is `metric(after op)`, discounted from whatever the `init_op` setup added so far
    Absolute,
}

/// One cost sample per measured run index -- `series[i]` is the (summed across test passes) cost of run `i+1`.
/// The priming run (index 0) is never included.
#[derive(Debug, Clone, PartialEq)]
pub struct CostSeries(pub Vec<f64>);
impl CostSeries {
    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }
}
impl From<Vec<f64>> for CostSeries {
    fn from(samples: Vec<f64>) -> Self {
        Self(samples)
    }
}

/// One asymptotic-complexity hypothesis: the run index `x` is transformed by `transform` and then
/// a polynomial of degree `degree` is fitted against the costs
#[derive(Clone, Copy)]
pub struct CandidateModel {
    pub complexity: BigOAlgorithmComplexity,
    pub degree:     usize,
    pub transform:  fn(f64) -> f64,
}
impl std::fmt::Debug for CandidateModel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CandidateModel")
            .field("complexity", &self.complexity)
            .field("degree", &self.degree)
            .finish()
    }
}

/// The fixed set of hypotheses, ordered from the most to the least complex --
/// the order in which [crate::low_level_analysis::classify()] considers them
pub const CANDIDATE_MODELS: [CandidateModel; 5] = [
    CandidateModel { complexity: BigOAlgorithmComplexity::ON2,    degree: 2, transform: |x: f64| x },
    CandidateModel { complexity: BigOAlgorithmComplexity::ONLogN, degree: 1, transform: |x: f64| x * x.ln() },
    CandidateModel { complexity: BigOAlgorithmComplexity::ON,     degree: 1, transform: |x: f64| x },
    CandidateModel { complexity: BigOAlgorithmComplexity::OLogN,  degree: 1, transform: |x: f64| x.ln() },
    CandidateModel { complexity: BigOAlgorithmComplexity::O1,     degree: 0, transform: |x: f64| x },
];

/// How well a [CandidateModel] explains a [CostSeries]
#[derive(Debug, Clone, PartialEq)]
pub struct ModelFit {
    pub complexity:          BigOAlgorithmComplexity,
    /// root-mean-square of the residuals
    pub residual_error:      f64,
    /// magnitude of the highest-order fitted coefficient, relative to the model's transformed run index
    /// -- zero, by definition, for `O(1)`
    pub leading_coefficient: f64,
    /// all fitted coefficients, from the constant term up to the highest order one
    pub coefficients:        Vec<f64>,
}

/// Thresholds for the nested model selection done by [crate::low_level_analysis::classify()]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassificationThresholds {
    /// proportional improvement over every simpler model a more complex one must have to be accepted
    pub error_threshold:       f64,
    /// minimum magnitude the highest-order coefficient must have to be accepted
    pub coefficient_threshold: f64,
}
impl Default for ClassificationThresholds {
    fn default() -> Self {
        Self {
            error_threshold:       DEFAULT_ERROR_THRESHOLD,
            coefficient_threshold: DEFAULT_COEFFICIENT_THRESHOLD,
        }
    }
}

/// Result of a complete classification: the label, as well as everything that lead to it
#[derive(Debug, Clone)]
pub struct ComplexityAnalysis {
    /// a name for these measurements, for presentation purposes
    pub measurement_name: String,
    pub metric_kind:      MetricKind,
    pub metric_unit:      MetricUnit,
    pub test_count:       u32,
    pub series:           CostSeries,
    /// one entry per [CANDIDATE_MODELS], in the same order
    pub fits:             Vec<ModelFit>,
    pub complexity:       BigOAlgorithmComplexity,
}
impl Display for ComplexityAnalysis {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let runs = self.series.as_slice();
        // sums across test passes are presented as averages
        let average = |sample: f64| sample / self.test_count.max(1) as f64;
        let first = runs.first().map(|&sample| self.metric_unit.present(average(sample)).to_string()).unwrap_or_default();
        let last  = runs.last().map(|&sample| self.metric_unit.present(average(sample)).to_string()).unwrap_or_default();
        writeln!(f, "'{}' {} measurements over {} runs x {} tests: Δ₁={}; Δₙ={}",
                 self.measurement_name,
                 match self.metric_kind { MetricKind::Relative => "relative", MetricKind::Absolute => "absolute" },
                 runs.len(), self.test_count, first, last)?;
        writeln!(f, "model          residual rms        |leading coef|")?;
        for fit in &self.fits {
            writeln!(f, "{:<11}  {:>14.6e}  {:>20.6e}{}",
                     fit.complexity.as_pretty_str(), fit.residual_error, fit.leading_coefficient,
                     if fit.complexity == self.complexity { "  <--" } else { "" })?;
        }
        let pretty_complexity = match self.metric_kind {
            MetricKind::Relative => self.complexity.as_time_pretty_str(),
            MetricKind::Absolute => self.complexity.as_space_pretty_str(),
        };
        writeln!(f, "--> Algorithm Complexity Analysis: {}", pretty_complexity)
    }
}
