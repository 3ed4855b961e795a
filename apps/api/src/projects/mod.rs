// Learning-project generation: turns the missing skills of a gap analysis
// into a phased portfolio project, via LLM when one is configured and from
// built-in templates otherwise.

pub mod generator;
pub mod handlers;
pub mod prompts;
pub mod templates;
