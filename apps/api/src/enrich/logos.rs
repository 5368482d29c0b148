use std::collections::HashMap;

use serde_json::json;
use tracing::{debug, info, warn};

use crate::errors::AppError;
use crate::models::job::{Company, JobRecord};
use crate::search::store::JobStore;

/// Hand-picked logos for well-known employers, checked in order.
const KNOWN_LOGOS: &[(&str, &str)] = &[
    ("Google", "https://upload.wikimedia.org/wikipedia/commons/2/2f/Google_2015_logo.svg"),
    ("Microsoft", "https://upload.wikimedia.org/wikipedia/commons/4/44/Microsoft_logo.svg"),
    ("Amazon", "https://upload.wikimedia.org/wikipedia/commons/a/a9/Amazon_logo.svg"),
    ("Apple", "https://upload.wikimedia.org/wikipedia/commons/f/fa/Apple_logo_black.svg"),
    ("Meta", "https://upload.wikimedia.org/wikipedia/commons/0/0a/Meta_Platforms_Inc._logo.svg"),
    ("Netflix", "https://upload.wikimedia.org/wikipedia/commons/0/08/Netflix_2015_logo.svg"),
    ("IBM", "https://upload.wikimedia.org/wikipedia/commons/5/51/IBM_logo.svg"),
    ("Oracle", "https://upload.wikimedia.org/wikipedia/commons/5/50/Oracle_logo.svg"),
    ("Intel", "https://upload.wikimedia.org/wikipedia/commons/c/c9/Intel-logo.svg"),
    ("Adobe", "https://upload.wikimedia.org/wikipedia/commons/a/ac/Adobe_Inc._logo.svg"),
    ("Deloitte", "https://upload.wikimedia.org/wikipedia/commons/5/56/Deloitte.svg"),
    ("BOEING", "https://upload.wikimedia.org/wikipedia/commons/4/4f/Boeing_full_logo.svg"),
    ("NetApp", "https://upload.wikimedia.org/wikipedia/commons/3/3e/NetApp_logo.svg"),
    ("TCS", "https://upload.wikimedia.org/wikipedia/commons/b/b1/Tata_Consultancy_Services_Logo.svg"),
    ("Infosys", "https://upload.wikimedia.org/wikipedia/commons/9/95/Infosys_logo.svg"),
    ("Wipro", "https://upload.wikimedia.org/wikipedia/commons/a/a0/Wipro_Primary_Logo_Color_RGB.svg"),
];

/// Where logo lookups go. Overridable so tests can point at a mock server.
#[derive(Debug, Clone)]
pub struct LogoSources {
    pub clearbit_base: String,
    pub favicon_base: String,
}

impl Default for LogoSources {
    fn default() -> Self {
        Self {
            clearbit_base: "https://logo.clearbit.com".to_string(),
            favicon_base: "https://www.google.com/s2/favicons".to_string(),
        }
    }
}

impl LogoSources {
    fn clearbit_url(&self, domain: &str) -> String {
        format!("{}/{domain}", self.clearbit_base)
    }

    fn favicon_url(&self, domain: &str) -> String {
        format!("{}?domain={domain}&sz=128", self.favicon_base)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LogoPlan {
    /// Known employer: always use the curated logo.
    Mapped(&'static str),
    /// Leave the posting alone.
    Keep,
    /// Look the guessed domain up remotely.
    Lookup { domain: String },
}

pub fn known_logo(company: &str) -> Option<&'static str> {
    let company = company.to_lowercase();
    KNOWN_LOGOS.iter().find_map(|(name, url)| {
        let name = name.to_lowercase();
        (company.contains(&name) || name.contains(&company)).then_some(*url)
    })
}

/// "Acme Corp." → "acmecorp.com"
pub fn guess_domain(company: &str) -> Option<String> {
    let stem: String = company
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect();
    (!stem.is_empty()).then(|| format!("{stem}.com"))
}

pub fn plan_logo(company: &str, existing_logo: Option<&str>) -> LogoPlan {
    let company = company.trim();
    if company.is_empty() {
        return LogoPlan::Keep;
    }
    if let Some(url) = known_logo(company) {
        return LogoPlan::Mapped(url);
    }
    if existing_logo.is_some_and(|logo| logo.starts_with("http")) {
        return LogoPlan::Keep;
    }
    match guess_domain(company) {
        Some(domain) => LogoPlan::Lookup { domain },
        None => LogoPlan::Keep,
    }
}

/// Clearbit if it has the domain, otherwise the favicon service (which
/// always answers, possibly with a generic globe).
pub async fn resolve_logo(http: &reqwest::Client, sources: &LogoSources, domain: &str) -> String {
    let clearbit = sources.clearbit_url(domain);
    match http.get(&clearbit).send().await {
        Ok(resp) if resp.status().is_success() => clearbit,
        Ok(resp) => {
            debug!("No clearbit logo for {domain} (status {})", resp.status());
            sources.favicon_url(domain)
        }
        Err(e) => {
            warn!("Logo lookup for {domain} failed: {e}");
            sources.favicon_url(domain)
        }
    }
}

/// Fills `company.logo` on every posting that needs one.
/// Returns the number of postings updated.
pub async fn enrich_logos(
    store: &dyn JobStore,
    http: &reqwest::Client,
    sources: &LogoSources,
    jobs: &[JobRecord],
) -> Result<usize, AppError> {
    // One lookup per distinct guessed domain.
    let mut resolved: HashMap<String, String> = HashMap::new();
    let mut updated = 0;

    for job in jobs {
        let Some(company) = job.company.name.as_deref() else {
            continue;
        };

        let logo = match plan_logo(company, job.company.logo.as_deref()) {
            LogoPlan::Keep => continue,
            LogoPlan::Mapped(url) => url.to_string(),
            LogoPlan::Lookup { domain } => match resolved.get(&domain) {
                Some(url) => url.clone(),
                None => {
                    let url = resolve_logo(http, sources, &domain).await;
                    resolved.insert(domain, url.clone());
                    url
                }
            },
        };

        // The normalised company (legacy top-level fields folded in) is
        // written back as one object.
        let company = Company {
            logo: Some(logo),
            ..job.company.clone()
        };
        let patch = json!({ "company": company });
        if store.update_job(job.id, &patch).await? {
            updated += 1;
        }
    }

    info!("Logo enrichment updated {updated} of {} jobs", jobs.len());
    Ok(updated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::testing::{doc_job, MemoryJobStore};
    use httpmock::prelude::*;

    fn sources(server: &MockServer) -> LogoSources {
        LogoSources {
            clearbit_base: server.url("/clearbit"),
            favicon_base: server.url("/favicons"),
        }
    }

    #[test]
    fn test_known_logo_matches_both_directions() {
        assert!(known_logo("Microsoft Corporation").is_some_and(|u| u.contains("Microsoft_logo")));
        assert!(known_logo("boeing").is_some_and(|u| u.contains("Boeing")));
        // Company name contained in a map key.
        assert!(known_logo("Net").is_some_and(|u| u.contains("Netflix")));
        assert_eq!(known_logo("Acme"), None);
    }

    #[test]
    fn test_guess_domain() {
        assert_eq!(guess_domain("Acme Corp."), Some("acmecorp.com".to_string()));
        assert_eq!(guess_domain("Café 42"), Some("caf42.com".to_string()));
        assert_eq!(guess_domain("!!!"), None);
    }

    #[test]
    fn test_mapped_logo_overrides_existing_one() {
        let plan = plan_logo("Google LLC", Some("https://old.example/logo.png"));
        assert!(matches!(plan, LogoPlan::Mapped(url) if url.contains("Google")));
    }

    #[test]
    fn test_existing_http_logo_is_kept() {
        assert_eq!(
            plan_logo("Acme", Some("https://acme.test/logo.png")),
            LogoPlan::Keep
        );
    }

    #[test]
    fn test_relative_logo_is_replaced() {
        assert_eq!(
            plan_logo("Acme", Some("/img/acme.png")),
            LogoPlan::Lookup {
                domain: "acme.com".to_string()
            }
        );
        assert_eq!(plan_logo("  ", None), LogoPlan::Keep);
    }

    #[tokio::test]
    async fn test_resolve_prefers_clearbit() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/clearbit/acme.com");
                then.status(200).body("png");
            })
            .await;

        let url = resolve_logo(&reqwest::Client::new(), &sources(&server), "acme.com").await;
        assert_eq!(url, server.url("/clearbit/acme.com"));
    }

    #[tokio::test]
    async fn test_resolve_falls_back_to_favicon() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/clearbit/unknown.com");
                then.status(404);
            })
            .await;

        let url = resolve_logo(&reqwest::Client::new(), &sources(&server), "unknown.com").await;
        assert_eq!(
            url,
            format!("{}?domain=unknown.com&sz=128", server.url("/favicons"))
        );
    }

    #[tokio::test]
    async fn test_enrichment_updates_only_jobs_that_need_a_logo() {
        let server = MockServer::start_async().await;
        let clearbit = server
            .mock_async(|when, then| {
                when.method(GET).path("/clearbit/acme.com");
                then.status(200).body("png");
            })
            .await;

        let jobs = vec![
            doc_job(json!({"title": "A", "company": {"name": "Acme", "industry": "Tools"}})),
            doc_job(json!({"title": "B", "company": {"name": "Acme"}})),
            doc_job(json!({"title": "C", "companyName": "Microsoft"})),
            doc_job(json!({"title": "D", "company": {"name": "Keep", "logo": "https://keep.test/l.png"}})),
            doc_job(json!({"title": "E"})),
        ];
        let store = MemoryJobStore::with_jobs(jobs.clone());

        let count = enrich_logos(&store, &reqwest::Client::new(), &sources(&server), &jobs)
            .await
            .unwrap();

        assert_eq!(count, 3);
        clearbit.assert_hits_async(1).await;
        let acme = store.job(jobs[0].id).unwrap();
        assert_eq!(acme.company.logo, Some(server.url("/clearbit/acme.com")));
        assert_eq!(acme.company.industry.as_deref(), Some("Tools"));
        let microsoft = store.job(jobs[2].id).unwrap();
        assert_eq!(microsoft.company.name.as_deref(), Some("Microsoft"));
        assert!(microsoft.company.logo.is_some_and(|l| l.contains("Microsoft_logo")));
        let kept = store.job(jobs[3].id).unwrap();
        assert_eq!(kept.company.logo.as_deref(), Some("https://keep.test/l.png"));
    }
}
