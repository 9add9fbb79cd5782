//! Helpers for presenting measurements in reports

pub mod presentable_measurements;
