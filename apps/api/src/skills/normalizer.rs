//! Canonical text form used by every skill comparison.

/// Lower-cases a skill and strips everything except word characters,
/// whitespace, `+`, `#` and `.`, then collapses whitespace runs.
///
/// `"  Node.js "` → `"node.js"`, `"C++"` → `"c++"`, `"CI/CD"` → `"cicd"`.
pub fn normalize_skill(skill: &str) -> String {
    let kept: String = skill
        .to_lowercase()
        .chars()
        .filter(|c| is_kept_char(*c))
        .collect();

    kept.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn is_kept_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c.is_whitespace() || matches!(c, '+' | '#' | '.')
}
