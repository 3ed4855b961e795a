// Skill matching core: normalization, synonym resolution, fuzzy matching and
// resume skill extraction. Everything here is pure and synchronous.

pub mod extractor;
pub mod normalizer;
pub mod similarity;
pub mod synonyms;

pub use similarity::find_skill_matches;
