//! Thin client for the hosted database service.
//!
//! Covers exactly the three capabilities the page needs: range-bounded
//! ordered reads, a single-row insert that returns the stored row, and the
//! realtime insert subscription (see [`realtime`]). The service URL and
//! public key are baked in at compile time; when either is missing the
//! constructor returns `None` and the page runs in a degraded
//! "not connected" mode where every remote operation is skipped.

use std::fmt;

use gloo_net::http::Request;

use common::model::review::{NewReview, Review};

pub mod realtime;

/// Table holding the feedback rows.
pub const REVIEWS_TABLE: &str = "reviews";

/// Failure from the REST layer. The message is shown to the user verbatim,
/// whether it came from the transport or from the service's error body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceError(pub String);

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<gloo_net::Error> for ServiceError {
    fn from(err: gloo_net::Error) -> Self {
        ServiceError(err.to_string())
    }
}

/// Connection handle: base URL plus the public (anon) API key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Supabase {
    url: String,
    key: String,
}

impl Supabase {
    /// Builds the client from compile-time configuration.
    ///
    /// Returns `None` when `SUPABASE_URL` or `SUPABASE_ANON_KEY` was not set
    /// at build time — the feature-flagged "not connected" mode, not an
    /// error.
    pub fn from_env() -> Option<Self> {
        let url = option_env!("SUPABASE_URL")?;
        let key = option_env!("SUPABASE_ANON_KEY")?;
        if url.is_empty() || key.is_empty() {
            return None;
        }
        Some(Self {
            url: url.trim_end_matches('/').to_string(),
            key: key.to_string(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    fn rest_endpoint(&self) -> String {
        format!("{}/rest/v1/{}", self.url, REVIEWS_TABLE)
    }

    /// Fetches rows `from..=to` of the table, newest first.
    pub async fn fetch_page(&self, from: usize, to: usize) -> Result<Vec<Review>, ServiceError> {
        let url = format!("{}?select=*&order=created_at.desc", self.rest_endpoint());
        let response = Request::get(&url)
            .header("apikey", &self.key)
            .header("Authorization", &format!("Bearer {}", self.key))
            .header("Range", &format!("{}-{}", from, to))
            .send()
            .await?;

        // 206 Partial Content is the normal answer to a ranged read.
        if !response.ok() {
            return Err(ServiceError(error_body(response).await));
        }
        Ok(response.json::<Vec<Review>>().await?)
    }

    /// Inserts one review and returns the stored row, including the
    /// server-assigned id and timestamp.
    pub async fn insert_review(&self, review: &NewReview) -> Result<Review, ServiceError> {
        let response = Request::post(&self.rest_endpoint())
            .header("apikey", &self.key)
            .header("Authorization", &format!("Bearer {}", self.key))
            .header("Prefer", "return=representation")
            .json(review)?
            .send()
            .await?;

        if !response.ok() {
            return Err(ServiceError(error_body(response).await));
        }
        let mut rows = response.json::<Vec<Review>>().await?;
        if rows.is_empty() {
            return Err(ServiceError(
                "The service accepted the review but returned no row.".to_string(),
            ));
        }
        Ok(rows.remove(0))
    }
}

/// Best-effort extraction of the service's error text for verbatim display.
async fn error_body(response: gloo_net::http::Response) -> String {
    let status = response.status();
    match response.text().await {
        Ok(body) if !body.is_empty() => body,
        _ => format!("Request failed with status {}", status),
    }
}
