// Industry awareness: detects the industry a job belongs to and exposes the
// per-industry profile (skill weights, action verbs, section priorities) the
// optimizers tailor their output with.

pub mod profiles;

pub use profiles::{
    calculate_skill_weights, detect_industry, industry_alignment, industry_profile,
    IndustryProfile, IndustryType,
};
