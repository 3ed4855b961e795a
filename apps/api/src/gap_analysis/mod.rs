// Gap analysis: compares a parsed resume against extracted job requirements,
// then ranks what is missing and turns it into recommendations.

pub mod analyzer;
pub mod handlers;
pub mod priority;
pub mod recommendations;

pub use analyzer::{analyze_gap, GapAnalysisResult};
