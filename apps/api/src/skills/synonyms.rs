//! Canonical skill name → known aliases.
//!
//! Aliases are stored already normalized (see `normalize_skill`), so lookups
//! compare normalized input against them directly.

pub const SKILL_SYNONYMS: &[(&str, &[&str])] = &[
    ("javascript", &["js", "ecmascript", "javascript"]),
    ("typescript", &["ts", "typescript"]),
    ("python", &["python", "python3", "py"]),
    ("java", &["java", "openjdk"]),
    ("react", &["react.js", "reactjs", "react"]),
    ("node", &["node.js", "nodejs", "node"]),
    ("postgresql", &["postgres", "postgresql", "psql"]),
    ("mongodb", &["mongo", "mongodb"]),
    ("aws", &["amazon web services", "aws"]),
    ("gcp", &["google cloud", "gcp", "google cloud platform"]),
    ("azure", &["microsoft azure", "azure"]),
    ("docker", &["docker", "containerization"]),
    ("kubernetes", &["k8s", "kubernetes"]),
    ("fastapi", &["fastapi", "fast api"]),
    ("django", &["django"]),
    ("flask", &["flask"]),
    ("express", &["express.js", "expressjs", "express"]),
    ("redis", &["redis"]),
    ("git", &["git", "version control"]),
    (
        "ci/cd",
        &[
            "cicd",
            "continuous integration",
            "continuous deployment",
            "devops",
        ],
    ),
];

/// True when both normalized skills appear in the alias list of the same entry.
pub fn share_synonym_group(a: &str, b: &str) -> bool {
    SKILL_SYNONYMS
        .iter()
        .any(|(_, aliases)| aliases.contains(&a) && aliases.contains(&b))
}
