//! Core data structures: the input [dataset::Dataset], the enumerations
//! used across the analysis and the per-biomarker result records.

pub mod dataset;
pub mod enums;
pub mod results;
