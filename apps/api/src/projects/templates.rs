use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectCategory {
    WebDevelopment,
    DataScience,
    MobileDevelopment,
    Devops,
}

impl ProjectCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::WebDevelopment => "web_development",
            Self::DataScience => "data_science",
            Self::MobileDevelopment => "mobile_development",
            Self::Devops => "devops",
        }
    }
}

/// Trigger keywords per category, checked in order. A skill triggers a
/// category only when it equals a keyword (case-insensitive).
const CATEGORY_KEYWORDS: &[(ProjectCategory, &[&str])] = &[
    (
        ProjectCategory::WebDevelopment,
        &["react", "vue", "angular", "javascript", "typescript", "web"],
    ),
    (
        ProjectCategory::DataScience,
        &["python", "data", "analytics", "pandas", "numpy"],
    ),
    (
        ProjectCategory::MobileDevelopment,
        &["mobile", "android", "ios", "flutter", "react native"],
    ),
    (
        ProjectCategory::Devops,
        &["docker", "kubernetes", "devops", "ci/cd", "deployment"],
    ),
];

/// Picks the category whose keywords the target skills hit first.
/// Falls back to web development.
pub fn determine_project_category<S: AsRef<str>>(skills: &[S]) -> ProjectCategory {
    let lowered: Vec<String> = skills.iter().map(|s| s.as_ref().trim().to_lowercase()).collect();

    CATEGORY_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|kw| lowered.iter().any(|s| s == kw)))
        .map(|(category, _)| *category)
        .unwrap_or(ProjectCategory::WebDevelopment)
}

#[derive(Debug)]
pub struct PhaseTemplate {
    pub name: &'static str,
    pub skills: &'static [&'static str],
    pub duration_weeks: u32,
}

#[derive(Debug)]
pub struct ProjectTemplate {
    pub id: &'static str,
    pub category: ProjectCategory,
    /// May contain `{technologies}`.
    pub title: &'static str,
    pub description: &'static str,
    pub phases: &'static [PhaseTemplate],
}

pub const PROJECT_TEMPLATES: &[ProjectTemplate] = &[
    ProjectTemplate {
        id: "fullstack_ecommerce",
        category: ProjectCategory::WebDevelopment,
        title: "E-commerce Platform with {technologies}",
        description: "Build a complete e-commerce platform with user authentication, product \
                      catalog, shopping cart, and payment processing",
        phases: &[
            PhaseTemplate { name: "Backend API Development", skills: &["API design", "database modeling"], duration_weeks: 2 },
            PhaseTemplate { name: "Frontend Development", skills: &["UI/UX", "state management"], duration_weeks: 2 },
            PhaseTemplate { name: "Payment Integration", skills: &["payment processing", "security"], duration_weeks: 1 },
            PhaseTemplate { name: "Testing & Deployment", skills: &["testing", "deployment"], duration_weeks: 1 },
        ],
    },
    ProjectTemplate {
        id: "portfolio_website",
        category: ProjectCategory::WebDevelopment,
        title: "Professional Portfolio Website",
        description: "Create a responsive portfolio website showcasing your projects and skills",
        phases: &[
            PhaseTemplate { name: "Design & Planning", skills: &["UI design", "planning"], duration_weeks: 1 },
            PhaseTemplate { name: "Frontend Development", skills: &["HTML/CSS", "responsive design"], duration_weeks: 2 },
            PhaseTemplate { name: "CMS Integration", skills: &["content management", "dynamic content"], duration_weeks: 1 },
        ],
    },
    ProjectTemplate {
        id: "sales_analytics",
        category: ProjectCategory::DataScience,
        title: "Sales Performance Analytics Dashboard",
        description: "Build a comprehensive analytics dashboard to track and visualize sales \
                      performance metrics",
        phases: &[
            PhaseTemplate { name: "Data Collection & Cleaning", skills: &["data cleaning", "ETL"], duration_weeks: 1 },
            PhaseTemplate { name: "Analysis & Modeling", skills: &["statistical analysis", "predictive modeling"], duration_weeks: 2 },
            PhaseTemplate { name: "Dashboard Development", skills: &["data visualization", "dashboard design"], duration_weeks: 2 },
        ],
    },
    ProjectTemplate {
        id: "task_manager_app",
        category: ProjectCategory::MobileDevelopment,
        title: "Cross-Platform Task Management App",
        description: "Develop a mobile app for task management with offline support and cloud sync",
        phases: &[
            PhaseTemplate { name: "App Architecture", skills: &["mobile architecture", "state management"], duration_weeks: 1 },
            PhaseTemplate { name: "Core Features", skills: &["mobile UI", "local storage"], duration_weeks: 2 },
            PhaseTemplate { name: "Cloud Integration", skills: &["API integration", "sync mechanisms"], duration_weeks: 1 },
        ],
    },
    ProjectTemplate {
        id: "ci_cd_pipeline",
        category: ProjectCategory::Devops,
        title: "Complete CI/CD Pipeline with {technologies}",
        description: "Set up automated CI/CD pipeline with testing, building, and deployment",
        phases: &[
            PhaseTemplate { name: "Pipeline Setup", skills: &["CI/CD", "automation"], duration_weeks: 1 },
            PhaseTemplate { name: "Testing Integration", skills: &["automated testing", "quality gates"], duration_weeks: 1 },
            PhaseTemplate { name: "Deployment Automation", skills: &["deployment", "monitoring"], duration_weeks: 1 },
        ],
    },
];

/// First template of the category, or the first template overall.
pub fn select_template(category: ProjectCategory) -> &'static ProjectTemplate {
    PROJECT_TEMPLATES
        .iter()
        .find(|t| t.category == category)
        .unwrap_or(&PROJECT_TEMPLATES[0])
}
