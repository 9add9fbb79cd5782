//! The configuration of a complexity analysis & the builder producing it

pub mod types;
pub mod builder;
