use crate::gap_analysis::analyzer::GapAnalysisResult;

/// Human-readable next steps, in a fixed order: experience, seniority, then
/// skills by category. Long lists are cut to their first few entries.
pub fn generate_recommendations(gap: &GapAnalysisResult) -> Vec<String> {
    let mut recommendations = Vec::new();

    if let Some(years) = gap.experience_gap.filter(|&y| y > 0) {
        recommendations.push(format!("Gain {years} more years of relevant experience"));
    }

    if !gap.experience_level_match {
        recommendations.push(
            "Consider taking on more senior responsibilities or leadership roles".to_string(),
        );
    }

    if !gap.missing_required_skills.is_empty() {
        recommendations.push(format!(
            "Learn these critical skills: {}",
            head(&gap.missing_required_skills, 3)
        ));
    }

    if !gap.missing_languages.is_empty() {
        recommendations.push(format!(
            "Consider learning: {}",
            head(&gap.missing_languages, 2)
        ));
    }

    if !gap.missing_frameworks.is_empty() {
        recommendations.push(format!(
            "Gain experience with: {}",
            head(&gap.missing_frameworks, 2)
        ));
    }

    if !gap.missing_databases.is_empty() {
        recommendations.push(format!(
            "Learn database technologies: {}",
            gap.missing_databases.join(", ")
        ));
    }

    if !gap.missing_cloud_platforms.is_empty() {
        recommendations.push(format!(
            "Get cloud platform experience: {}",
            gap.missing_cloud_platforms.join(", ")
        ));
    }

    recommendations
}

fn head(items: &[String], n: usize) -> String {
    items[..items.len().min(n)].join(", ")
}
