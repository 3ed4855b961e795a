pub mod job_analysis;
pub mod lenient;
pub mod project;
pub mod resume;
