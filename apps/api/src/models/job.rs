use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

/// Raw row of the `jobs` table. `data` is the posting document as written,
/// including fields from older schema revisions.
#[derive(Debug, Clone, FromRow)]
pub struct JobRow {
    pub id: Uuid,
    pub employer_id: Option<String>,
    pub data: Value,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobType {
    FullTime,
    PartTime,
    Contract,
    Internship,
    Remote,
}

impl JobType {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobType::FullTime => "FULL_TIME",
            JobType::PartTime => "PART_TIME",
            JobType::Contract => "CONTRACT",
            JobType::Internship => "INTERNSHIP",
            JobType::Remote => "REMOTE",
        }
    }

    /// Case-insensitive parse of the stored label.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_uppercase().as_str() {
            "FULL_TIME" => Some(JobType::FullTime),
            "PART_TIME" => Some(JobType::PartTime),
            "CONTRACT" => Some(JobType::Contract),
            "INTERNSHIP" => Some(JobType::Internship),
            "REMOTE" => Some(JobType::Remote),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub about: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
}

/// A job posting after normalisation. Every field except `id` may be absent;
/// absent fields never match a search criterion.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobRecord {
    pub id: Uuid,
    pub title: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub job_type: Option<JobType>,
    /// Upper-cased values of `jobType` and the legacy `type` field.
    #[serde(skip)]
    pub type_aliases: Vec<String>,
    pub experience_level: Option<String>,
    pub skills: Vec<String>,
    pub salary: Option<String>,
    pub company: Company,
    pub employer_id: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

impl JobRecord {
    /// Normalises a stored document. Never fails: mistyped fields are dropped.
    pub fn from_document(
        id: Uuid,
        employer_id: Option<String>,
        created_at: Option<DateTime<Utc>>,
        data: &Value,
    ) -> Self {
        let mut type_aliases = Vec::new();
        for key in ["jobType", "type"] {
            if let Some(raw) = str_field(data, key) {
                let upper = raw.to_uppercase();
                if !type_aliases.contains(&upper) {
                    type_aliases.push(upper);
                }
            }
        }
        let job_type = type_aliases.iter().find_map(|t| JobType::parse(t));

        let company_doc = data.get("company");
        let company = Company {
            name: company_doc
                .and_then(|c| str_field(c, "name"))
                .or_else(|| str_field(data, "companyName")),
            logo: company_doc
                .and_then(|c| str_field(c, "logo"))
                .or_else(|| str_field(data, "companyLogo")),
            website: company_doc
                .and_then(|c| str_field(c, "website"))
                .or_else(|| str_field(data, "companyWebsite")),
            about: company_doc
                .and_then(|c| str_field(c, "about"))
                .or_else(|| str_field(data, "companyDescription")),
            industry: company_doc
                .and_then(|c| str_field(c, "industry"))
                .or_else(|| str_field(data, "industry")),
            size: company_doc
                .and_then(|c| str_field(c, "size"))
                .or_else(|| str_field(data, "companySize")),
        };

        let skills = data
            .get("skills")
            .and_then(|v| v.as_array())
            .map(|items| {
                items
                    .iter()
                    .filter_map(|s| s.as_str().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default();

        JobRecord {
            id,
            title: str_field(data, "title"),
            description: str_field(data, "description"),
            location: str_field(data, "location"),
            job_type,
            type_aliases,
            experience_level: str_field(data, "experienceLevel"),
            skills,
            salary: str_field(data, "salary"),
            company,
            employer_id: employer_id.or_else(|| str_field(data, "employerId")),
            created_at,
        }
    }

    /// Location for display; postings without one are listed as remote.
    pub fn display_location(&self) -> &str {
        self.location.as_deref().unwrap_or("Remote")
    }
}

impl From<JobRow> for JobRecord {
    fn from(row: JobRow) -> Self {
        JobRecord::from_document(row.id, row.employer_id, Some(row.created_at), &row.data)
    }
}

fn str_field(doc: &Value, key: &str) -> Option<String> {
    doc.get(key).and_then(|v| v.as_str()).map(str::to_string)
}

/// Body of `POST /api/v1/jobs`, stored verbatim as the job document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewJob {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    pub job_type: JobType,
    #[serde(default)]
    pub experience_level: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub salary: Option<String>,
    #[serde(default)]
    pub company: Company,
}
