// Prompt fragments shared by every caller of the completion providers.
// Feature-specific prompts live in the feature's own prompts.rs.

/// Appended to every system prompt; `complete_json` still strips code fences
/// in case a model ignores it.
const JSON_ONLY_INSTRUCTION: &str = "Respond with a single valid JSON object only. \
    Do not wrap it in markdown code fences. \
    Do not add commentary before or after it.";

/// Builds a system prompt from a one-sentence role description.
pub fn json_system_prompt(role: &str) -> String {
    format!("{} {JSON_ONLY_INSTRUCTION}", role.trim())
}
