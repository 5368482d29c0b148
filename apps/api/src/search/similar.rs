use tracing::error;
use uuid::Uuid;

use crate::models::job::JobRecord;
use crate::search::store::JobStore;

/// How many recent postings are scanned for "similar" candidates.
const SIMILAR_SCAN: i64 = 10;
pub const SIMILAR_SHOWN: usize = 3;

/// Recent postings other than `current`, shown beside a job's detail page.
/// Store failures are logged and produce an empty list.
pub async fn similar_jobs(store: &dyn JobStore, current: Uuid) -> Vec<JobRecord> {
    match store.list_jobs(Some(SIMILAR_SCAN)).await {
        Ok(jobs) => jobs
            .into_iter()
            .filter(|job| job.id != current)
            .take(SIMILAR_SHOWN)
            .collect(),
        Err(e) => {
            error!("Error fetching similar jobs for {current}: {e}");
            Vec::new()
        }
    }
}
