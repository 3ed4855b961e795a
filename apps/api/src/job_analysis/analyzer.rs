//! Requirement extraction through an ordered chain of providers.
//!
//! The chain is OpenAI → Gemini → rule-based. Every provider reports a
//! [`ProviderOutcome`]; the first `Success` wins. The rule-based provider
//! never fails, so the chain always produces requirements for non-blank text.

use async_trait::async_trait;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::errors::AppError;
use crate::job_analysis::prompts::{build_job_analysis_prompt, job_analysis_system};
use crate::job_analysis::requirements::JobRequirements;
use crate::job_analysis::rule_based::{clean_job_description, extract_basic_requirements};
use crate::llm_client::{complete_json, CompletionOptions, LlmError, SharedProvider};

pub const RULE_BASED_PROVIDER: &str = "rule_based";

/// What a single provider did with a job description.
#[derive(Debug)]
pub enum ProviderOutcome {
    Success(JobRequirements),
    Failed { provider: &'static str, reason: String },
    Skipped { provider: &'static str },
}

#[async_trait]
pub trait RequirementsProvider: Send + Sync {
    fn name(&self) -> &'static str;

    async fn extract(&self, job_description: &str) -> ProviderOutcome;
}

/// Asks an LLM for the full requirements JSON.
pub struct LlmRequirementsProvider {
    llm: SharedProvider,
}

impl LlmRequirementsProvider {
    pub fn new(llm: SharedProvider) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl RequirementsProvider for LlmRequirementsProvider {
    fn name(&self) -> &'static str {
        self.llm.name()
    }

    async fn extract(&self, job_description: &str) -> ProviderOutcome {
        let provider = self.name();
        if !self.llm.is_configured() {
            return ProviderOutcome::Skipped { provider };
        }

        let prompt = build_job_analysis_prompt(job_description);
        let result: Result<JobRequirements, LlmError> = complete_json(
            self.llm.as_ref(),
            &job_analysis_system(),
            &prompt,
            CompletionOptions::EXTRACTION,
        )
        .await;

        match result {
            Ok(requirements) => ProviderOutcome::Success(requirements),
            Err(LlmError::NotConfigured { .. }) => ProviderOutcome::Skipped { provider },
            Err(e) => ProviderOutcome::Failed {
                provider,
                reason: e.to_string(),
            },
        }
    }
}

/// Keyword and regex extraction. Always succeeds.
pub struct RuleBasedProvider;

#[async_trait]
impl RequirementsProvider for RuleBasedProvider {
    fn name(&self) -> &'static str {
        RULE_BASED_PROVIDER
    }

    async fn extract(&self, job_description: &str) -> ProviderOutcome {
        ProviderOutcome::Success(extract_basic_requirements(job_description))
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalyzedRequirements {
    pub requirements: JobRequirements,
    /// Name of the provider whose output was used.
    pub provider: &'static str,
    pub confidence_score: f64,
}

pub struct RequirementsAnalyzer {
    providers: Vec<Box<dyn RequirementsProvider>>,
}

impl RequirementsAnalyzer {
    pub fn new(providers: Vec<Box<dyn RequirementsProvider>>) -> Self {
        Self { providers }
    }

    /// One LLM-backed provider per completion provider, in the given order,
    /// followed by the rule-based fallback.
    pub fn from_llm(llm_providers: &[SharedProvider]) -> Self {
        let mut providers: Vec<Box<dyn RequirementsProvider>> = llm_providers
            .iter()
            .map(|llm| Box::new(LlmRequirementsProvider::new(llm.clone())) as Box<dyn RequirementsProvider>)
            .collect();
        providers.push(Box::new(RuleBasedProvider));
        Self::new(providers)
    }

    pub fn provider_names(&self) -> Vec<&'static str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    /// Cleans the description and runs the provider chain.
    ///
    /// Rejects blank text. Provider failures are logged and skipped; the result
    /// is validated before it is returned.
    pub async fn analyze_job_description(
        &self,
        job_description: &str,
    ) -> Result<AnalyzedRequirements, AppError> {
        if job_description.trim().is_empty() {
            return Err(AppError::Validation(
                "Job description cannot be empty".to_string(),
            ));
        }

        let cleaned = clean_job_description(job_description);

        for provider in &self.providers {
            match provider.extract(&cleaned).await {
                ProviderOutcome::Success(requirements) => {
                    let requirements = requirements.validate();
                    let confidence_score = requirements.confidence_score();
                    info!(
                        provider = provider.name(),
                        confidence_score, "Job description analyzed"
                    );
                    return Ok(AnalyzedRequirements {
                        requirements,
                        provider: provider.name(),
                        confidence_score,
                    });
                }
                ProviderOutcome::Skipped { provider } => {
                    debug!("{provider} not configured, skipping");
                }
                ProviderOutcome::Failed { provider, reason } => {
                    warn!("{provider} requirement extraction failed: {reason}");
                }
            }
        }

        // Only reachable with a chain that lacks the rule-based provider.
        let requirements = extract_basic_requirements(&cleaned).validate();
        let confidence_score = requirements.confidence_score();
        Ok(AnalyzedRequirements {
            requirements,
            provider: RULE_BASED_PROVIDER,
            confidence_score,
        })
    }
}
