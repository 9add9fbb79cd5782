//! Turns a cost series into a complexity label. See:
//!   - [curve_fitting] -- least-squares fit of every candidate model
//!   - [classify()] -- nested selection of the simplest well-supported candidate
//!   - [types]

mod low_level_analysis;
pub use low_level_analysis::*;
pub mod types;
pub mod curve_fitting;
