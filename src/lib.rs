#![doc = include_str!("../README.md")]

pub mod features;
pub mod configs;
pub mod error;
pub mod metrics_allocator;
pub mod low_level_analysis;
pub mod api;
pub mod runners;
pub mod utils;


// exported symbols
pub use {
    features::{ALLOC, OUTPUT},
    error::{BigOError, CallbackError, CallbackResult, ElementNotFound},
    api::{
        builder::ComplexityAnalyzerBuilder,
        types::ComplexityAnalysisConfig,
    },
    low_level_analysis::types::{
        BigOAlgorithmComplexity,
        ClassificationThresholds,
        ComplexityAnalysis,
        CostSeries,
        MetricKind,
    },
    runners::{
        standard::{analyse_complexity, analyse_time_complexity, analyse_space_complexity, test_complexity},
        collection::{analyse_collection_complexity, BigOCollection, CollectionMetric, CollectionOperation},
    },
    utils::presentable_measurements::MetricUnit,
};
