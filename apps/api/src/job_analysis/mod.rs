// Job description analysis: requirement extraction through an ordered
// provider chain (OpenAI → Gemini → rule-based), plus the HTTP handlers
// that persist analyses per user.

pub mod analyzer;
pub mod handlers;
pub mod prompts;
pub mod requirements;
pub mod rule_based;
