//! People client: the single point of entry for all Candidate API calls.
//!
//! Views never build upstream requests themselves; they go through
//! `CandidateSource`, which `PeopleClient` implements over HTTP.
//!
//! Both endpoints are read-only and unauthenticated. No retries: a failed
//! request is reported once and the caller decides how to degrade.
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::models::candidate::{CandidateDetail, CandidateSummary};

#[derive(Debug, Error)]
pub enum PeopleApiError {
    #[error("{0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP error! status: {status}")]
    Status { status: u16 },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid Candidate API URL '{0}'")]
    InvalidBaseUrl(String),
}

/// Read access to candidates. `PeopleClient` is the production backend; tests
/// substitute in-memory fakes.
///
/// Carried in `AppState` as `Arc<dyn CandidateSource>`.
#[async_trait]
pub trait CandidateSource: Send + Sync {
    /// `GET /people/`
    async fn list_people(&self) -> Result<Vec<CandidateSummary>, PeopleApiError>;

    /// `GET /people/{id}`
    async fn get_person(&self, id: &str) -> Result<CandidateDetail, PeopleApiError>;
}

#[derive(Clone)]
pub struct PeopleClient {
    client: Client,
    base_url: Url,
}

impl PeopleClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, PeopleApiError> {
        let base_url =
            Url::parse(base_url).map_err(|_| PeopleApiError::InvalidBaseUrl(base_url.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(PeopleApiError::InvalidBaseUrl(base_url.to_string()));
        }

        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            base_url,
        })
    }

    /// `<base>/people/`
    fn list_url(&self) -> Url {
        self.people_url("")
    }

    /// `<base>/people/<id>` with `id` percent-encoded as a single segment.
    fn detail_url(&self, id: &str) -> Url {
        self.people_url(id)
    }

    fn people_url(&self, last: &str) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().extend(["people", last]);
        }
        url
    }

    async fn get_json(&self, url: Url) -> Result<Value, PeopleApiError> {
        debug!("GET {url}");

        let response = self.client.get(url).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(PeopleApiError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl CandidateSource for PeopleClient {
    async fn list_people(&self) -> Result<Vec<CandidateSummary>, PeopleApiError> {
        let body = self.get_json(self.list_url()).await?;
        let people: Vec<CandidateSummary> = serde_json::from_value(body)?;
        debug!("Fetched {} candidate summaries", people.len());
        Ok(people)
    }

    async fn get_person(&self, id: &str) -> Result<CandidateDetail, PeopleApiError> {
        let body = self.get_json(self.detail_url(id)).await?;
        Ok(CandidateDetail::from_value(body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> PeopleClient {
        PeopleClient::new(base, Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_list_url_has_trailing_slash() {
        let c = client("https://forinterview.onrender.com");
        assert_eq!(
            c.list_url().as_str(),
            "https://forinterview.onrender.com/people/"
        );
    }

    #[test]
    fn test_detail_url_with_base_path() {
        let c = client("http://localhost:9000/api/");
        assert_eq!(
            c.detail_url("abc123").as_str(),
            "http://localhost:9000/api/people/abc123"
        );
    }

    #[test]
    fn test_detail_url_encodes_id() {
        let c = client("http://localhost:9000");
        assert_eq!(
            c.detail_url("a/b c").as_str(),
            "http://localhost:9000/people/a%2Fb%20c"
        );
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        assert!(matches!(
            PeopleClient::new("not a url", Duration::from_secs(1)),
            Err(PeopleApiError::InvalidBaseUrl(_))
        ));
        assert!(matches!(
            PeopleClient::new("mailto:someone@example.com", Duration::from_secs(1)),
            Err(PeopleApiError::InvalidBaseUrl(_))
        ));
    }

    #[test]
    fn test_status_error_message() {
        let err = PeopleApiError::Status { status: 503 };
        assert_eq!(err.to_string(), "HTTP error! status: 503");
    }
}
