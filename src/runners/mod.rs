//! Contains executors of the operations under analysis, gathering the metrics to pass to
//! [crate::low_level_analysis] in order to have their complexities classified

pub(crate) mod common;
pub mod standard;
pub mod collection;
