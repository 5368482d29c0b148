use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::models::job::JobType;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SchoolRecord {
    pub school: Option<String>,
    pub year: Option<String>,
    pub percentage: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GraduationRecord {
    pub college: Option<String>,
    pub degree: Option<String>,
    pub year: Option<String>,
    pub score: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Education {
    pub tenth: SchoolRecord,
    pub twelfth: SchoolRecord,
    pub graduation: GraduationRecord,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JobPreferences {
    pub location: Option<String>,
    pub salary: Option<String>,
    pub job_type: JobType,
    pub role: Option<String>,
}

impl Default for JobPreferences {
    fn default() -> Self {
        Self {
            location: None,
            salary: None,
            job_type: JobType::FullTime,
            role: None,
        }
    }
}

/// A candidate's profile as stored in `profiles.data`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CandidateProfile {
    pub name: Option<String>,
    pub title: Option<String>,
    pub bio: Option<String>,
    pub phone: Option<String>,
    pub education: Education,
    pub skills: Vec<String>,
    /// Free-text summary of past roles.
    pub experience: Option<String>,
    pub preferences: JobPreferences,
    pub resume_url: Option<String>,
    /// Set once the candidate has saved the profile.
    pub profile_completed: bool,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Body of `PUT /api/v1/profile`. Replaces the whole profile.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub title: Option<String>,
    pub bio: Option<String>,
    pub phone: Option<String>,
    pub education: Education,
    /// A list, or one comma-separated string as the web form sends it.
    #[serde(deserialize_with = "skills_list")]
    pub skills: Vec<String>,
    pub experience: Option<String>,
    pub preferences: JobPreferences,
    pub resume_url: Option<String>,
}

fn skills_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Skills {
        List(Vec<String>),
        Text(String),
    }

    Ok(match Option::<Skills>::deserialize(deserializer)? {
        Some(Skills::List(items)) => items,
        Some(Skills::Text(text)) => text.split(',').map(str::to_string).collect(),
        None => Vec::new(),
    })
}
