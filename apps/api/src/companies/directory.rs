use serde::Serialize;

use crate::models::job::JobRecord;

pub const UNKNOWN_COMPANY: &str = "Unknown Company";
pub const DEFAULT_LOCATION: &str = "Remote";

/// One directory entry. Profile fields come from the first (newest) posting
/// seen for the company.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanySummary {
    pub slug: String,
    pub name: String,
    pub logo: Option<String>,
    pub website: Option<String>,
    pub about: Option<String>,
    pub industry: Option<String>,
    pub size: Option<String>,
    pub location: String,
    pub job_count: usize,
}

/// Lower-cased name with whitespace runs replaced by `-`.
pub fn company_slug(name: &str) -> String {
    name.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}

fn company_name(job: &JobRecord) -> &str {
    job.company.name.as_deref().unwrap_or(UNKNOWN_COMPANY)
}

/// Groups postings by company name, most postings first. Ties keep the
/// order in which companies were first seen.
pub fn build_directory(jobs: &[JobRecord]) -> Vec<CompanySummary> {
    let mut companies: Vec<CompanySummary> = Vec::new();

    for job in jobs {
        let name = company_name(job);
        match companies.iter_mut().find(|c| c.name == name) {
            Some(existing) => existing.job_count += 1,
            None => companies.push(CompanySummary {
                slug: company_slug(name),
                name: name.to_string(),
                logo: job.company.logo.clone(),
                website: job.company.website.clone(),
                about: job.company.about.clone(),
                industry: job.company.industry.clone(),
                size: job.company.size.clone(),
                location: job
                    .location
                    .clone()
                    .unwrap_or_else(|| DEFAULT_LOCATION.to_string()),
                job_count: 1,
            }),
        }
    }

    companies.sort_by(|a, b| b.job_count.cmp(&a.job_count));
    companies
}

/// The company whose slug is `slug`, with its postings in input order.
pub fn find_company(jobs: Vec<JobRecord>, slug: &str) -> Option<(CompanySummary, Vec<JobRecord>)> {
    let company = build_directory(&jobs)
        .into_iter()
        .find(|c| c.slug == slug)?;
    let postings = jobs
        .into_iter()
        .filter(|job| company_slug(company_name(job)) == company.slug)
        .collect();
    Some((company, postings))
}
