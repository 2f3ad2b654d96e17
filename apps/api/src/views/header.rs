use serde::Serialize;
use tracing::error;

use crate::people_client::CandidateSource;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct HeaderView {
    pub job_title: String,
    pub candidate_count: usize,
}

/// Candidate count for the page header. Never fails: an upstream error is
/// logged and shown as zero candidates.
pub async fn load_header(source: &dyn CandidateSource, job_title: &str) -> HeaderView {
    let candidate_count = match source.list_people().await {
        Ok(people) => people.len(),
        Err(e) => {
            error!("Error fetching candidates for header: {e}");
            0
        }
    };

    HeaderView {
        job_title: job_title.to_string(),
        candidate_count,
    }
}
