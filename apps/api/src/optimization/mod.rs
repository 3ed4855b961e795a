// Whole-resume optimization against a job analysis: ATS keyword tables and
// scoring, an industry-aware rewrite of every section, and the endpoints that
// expose them.

pub mod ats;
pub mod handlers;
pub mod optimizer;
pub mod prompts;
