use serde::Deserialize;

use crate::models::job::{JobRecord, JobType};

/// Legacy filter label meaning "no job-type filter".
const ALL_TYPES: &str = "All Types";
const REMOTE_TOKEN: &str = "remote";

/// Query string of `GET /api/v1/jobs`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct JobSearchParams {
    pub q: Option<String>,
    pub location: Option<String>,
    #[serde(rename = "type")]
    pub job_type: Option<String>,
    pub level: Option<String>,
}

/// Committed search criteria. Text criteria are stored lower-cased, the
/// job type upper-cased; experience level is kept verbatim (exact match).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchCriteria {
    pub query: Option<String>,
    pub location: Option<String>,
    pub job_type: Option<String>,
    pub experience_level: Option<String>,
}

impl From<&JobSearchParams> for SearchCriteria {
    fn from(params: &JobSearchParams) -> Self {
        SearchCriteria {
            query: set(&params.q).map(|q| q.to_lowercase()),
            location: set(&params.location).map(|l| l.to_lowercase()),
            job_type: set(&params.job_type)
                .filter(|t| *t != ALL_TYPES)
                .map(|t| t.to_uppercase()),
            experience_level: set(&params.level).map(str::to_string),
        }
    }
}

fn set(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

fn contains_lower(haystack: Option<&str>, needle: &str) -> bool {
    haystack
        .map(|h| h.to_lowercase().contains(needle))
        .unwrap_or(false)
}

impl SearchCriteria {
    pub fn is_empty(&self) -> bool {
        self.query.is_none()
            && self.location.is_none()
            && self.job_type.is_none()
            && self.experience_level.is_none()
    }

    /// All four criteria must hold; an unset criterion always holds.
    pub fn matches(&self, job: &JobRecord) -> bool {
        self.matches_query(job)
            && self.matches_location(job)
            && self.matches_job_type(job)
            && self.matches_level(job)
    }

    /// Keeps matching records in their original order.
    pub fn apply(&self, jobs: Vec<JobRecord>) -> Vec<JobRecord> {
        if self.is_empty() {
            return jobs;
        }
        jobs.into_iter().filter(|job| self.matches(job)).collect()
    }

    fn matches_query(&self, job: &JobRecord) -> bool {
        let Some(q) = self.query.as_deref() else {
            return true;
        };
        contains_lower(job.title.as_deref(), q)
            || contains_lower(job.company.name.as_deref(), q)
            || contains_lower(job.description.as_deref(), q)
            || job.skills.iter().any(|s| s.to_lowercase().contains(q))
    }

    fn matches_location(&self, job: &JobRecord) -> bool {
        let Some(loc) = self.location.as_deref() else {
            return true;
        };
        if contains_lower(job.location.as_deref(), loc) {
            return true;
        }
        loc == REMOTE_TOKEN
            && (job.job_type == Some(JobType::Remote)
                || contains_lower(job.location.as_deref(), REMOTE_TOKEN))
    }

    fn matches_job_type(&self, job: &JobRecord) -> bool {
        match self.job_type.as_deref() {
            None => true,
            Some(t) => job.type_aliases.iter().any(|alias| alias == t),
        }
    }

    fn matches_level(&self, job: &JobRecord) -> bool {
        match self.experience_level.as_deref() {
            None => true,
            Some(level) => job.experience_level.as_deref() == Some(level),
        }
    }
}
