//! Resume scoring against an optional job description.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::ats::prompts::{
    ATS_OUTPUT_FORMAT, ATS_ROLE, MAX_JOB_DESCRIPTION_CHARS, NO_JOB_DESCRIPTION,
};
use crate::errors::AppError;
use crate::llm_client::prompts::JSON_ONLY_INSTRUCTION;
use crate::llm_client::{LlmClient, Part};

/// Resume content as submitted: plain text or a base64 data URI (PDF, DOCX…).
#[derive(Debug, Clone, PartialEq)]
pub enum ResumeInput {
    Text(String),
    Inline { mime_type: String, data: String },
}

impl ResumeInput {
    /// Anything starting with `data:` must be `data:<type>/<subtype>;base64,<payload>`.
    pub fn parse(raw: &str) -> Result<Self, AppError> {
        let Some(rest) = raw.strip_prefix("data:") else {
            if raw.trim().is_empty() {
                return Err(AppError::Validation("Resume content is empty.".to_string()));
            }
            return Ok(ResumeInput::Text(raw.to_string()));
        };

        let invalid = || AppError::Validation("Invalid file format.".to_string());
        let (mime_type, data) = rest.split_once(";base64,").ok_or_else(invalid)?;
        if !is_valid_mime(mime_type) || data.is_empty() || data.contains(['\n', '\r']) {
            return Err(invalid());
        }

        Ok(ResumeInput::Inline {
            mime_type: mime_type.to_string(),
            data: data.to_string(),
        })
    }

    fn into_part(self) -> Part {
        match self {
            ResumeInput::Text(text) => Part::text(text),
            ResumeInput::Inline { mime_type, data } => Part::inline(mime_type, data),
        }
    }
}

fn is_valid_mime(mime: &str) -> bool {
    let Some((kind, subtype)) = mime.split_once('/') else {
        return false;
    };
    !kind.is_empty()
        && kind.chars().all(|c| c.is_ascii_alphanumeric())
        && !subtype.is_empty()
        && subtype
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '.' | '+'))
}

/// The model's verdict on a resume.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AtsAnalysis {
    /// 0 – 100
    pub score: u8,
    pub summary: String,
    pub missing_skills: Vec<String>,
    pub suggestions: Vec<String>,
}

/// Answer as returned by the model, before range checks.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawAnalysis {
    score: f64,
    #[serde(default)]
    summary: String,
    #[serde(default)]
    missing_skills: Vec<String>,
    #[serde(default)]
    suggestions: Vec<String>,
}

impl TryFrom<RawAnalysis> for AtsAnalysis {
    type Error = AppError;

    fn try_from(raw: RawAnalysis) -> Result<Self, Self::Error> {
        if !raw.score.is_finite() {
            return Err(AppError::Analysis(
                "Failed to analyze resume: score is not a number".to_string(),
            ));
        }
        Ok(AtsAnalysis {
            score: raw.score.round().clamp(0.0, 100.0) as u8,
            summary: raw.summary,
            missing_skills: raw.missing_skills,
            suggestions: raw.suggestions,
        })
    }
}

/// Builds the instruction text that follows the resume part.
pub fn build_prompt(job_description: &str) -> String {
    let job_section = if job_description.trim().is_empty() {
        NO_JOB_DESCRIPTION.to_string()
    } else {
        let truncated: String = job_description
            .chars()
            .take(MAX_JOB_DESCRIPTION_CHARS)
            .collect();
        format!("Job Description:\n{truncated}")
    };

    format!("{ATS_ROLE}\n\n{job_section}\n\n{ATS_OUTPUT_FORMAT}\n\n{JSON_ONLY_INSTRUCTION}")
}

/// Scores a resume with a single completion call.
///
/// Every failure (missing key, bad input, transport, unparseable answer)
/// comes back as one `AppError` whose message is safe to show the user.
pub async fn analyze_resume(
    llm: Option<&LlmClient>,
    resume: &str,
    job_description: &str,
) -> Result<AtsAnalysis, AppError> {
    let llm = llm.ok_or_else(|| {
        AppError::NotConfigured(
            "API Key not configured. Please add GEMINI_API_KEY to the environment.".to_string(),
        )
    })?;

    let input = ResumeInput::parse(resume)?;
    let parts = [input.into_part(), Part::text(build_prompt(job_description))];

    let raw: RawAnalysis = llm
        .generate_json(&parts)
        .await
        .map_err(|e| AppError::Analysis(format!("Failed to analyze resume: {e}")))?;
    let analysis = AtsAnalysis::try_from(raw)?;

    info!(
        "Resume analyzed with {}: score {}, {} missing skills",
        llm.model(),
        analysis.score,
        analysis.missing_skills.len()
    );
    Ok(analysis)
}
