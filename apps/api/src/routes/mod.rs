pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, patch, post},
    Router,
};

use crate::applications::handlers as applications;
use crate::ats::handlers as ats;
use crate::companies::handlers as companies;
use crate::enrich::handlers as enrich;
use crate::postings::handlers as postings;
use crate::profiles::handlers as profiles;
use crate::search::handlers as search;
use crate::state::AppState;
use crate::uploads::handlers as uploads;
use crate::uploads::resume::MAX_RESUME_BYTES;

/// Multipart framing on top of the file itself.
const UPLOAD_OVERHEAD_BYTES: usize = 64 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Search & browse
        .route(
            "/api/v1/jobs",
            get(search::handle_search_jobs).post(postings::handle_create_job),
        )
        .route(
            "/api/v1/jobs/:id",
            get(search::handle_get_job)
                .patch(postings::handle_update_job)
                .delete(postings::handle_delete_job),
        )
        .route("/api/v1/suggest/titles", get(search::handle_suggest_titles))
        .route(
            "/api/v1/suggest/locations",
            get(search::handle_suggest_locations),
        )
        .route("/api/v1/companies", get(companies::handle_list_companies))
        .route("/api/v1/companies/:slug", get(companies::handle_get_company))
        // Applications & saved jobs
        .route("/api/v1/jobs/:id/apply", post(applications::handle_apply))
        .route(
            "/api/v1/jobs/:id/save",
            post(applications::handle_save_job).delete(applications::handle_unsave_job),
        )
        .route(
            "/api/v1/jobs/:id/applications",
            get(applications::handle_job_applications),
        )
        .route(
            "/api/v1/applications/:id/status",
            patch(applications::handle_update_status),
        )
        // Dashboards
        .route(
            "/api/v1/dashboard/candidate",
            get(applications::handle_candidate_dashboard),
        )
        .route(
            "/api/v1/dashboard/employer",
            get(postings::handle_employer_dashboard),
        )
        .route(
            "/api/v1/profile",
            get(profiles::handle_get_profile).put(profiles::handle_put_profile),
        )
        // Resumes
        .route(
            "/api/v1/uploads/resume",
            post(uploads::handle_upload_resume)
                .layer(DefaultBodyLimit::max(MAX_RESUME_BYTES + UPLOAD_OVERHEAD_BYTES)),
        )
        .route("/api/v1/ats/analyze", post(ats::handle_analyze))
        // Admin
        .route("/api/v1/admin/enrich-logos", post(enrich::handle_enrich_logos))
        .route(
            "/api/v1/admin/search-cache/reset",
            post(search::handle_reset_search_cache),
        )
        .with_state(state)
}
