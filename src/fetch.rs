//! Blocking page fetch.
//!
//! One request per invocation, no retries: a failed fetch is reported and the
//! user runs the command again.

use passgrab::EncodingHints;
use reqwest::header::CONTENT_TYPE;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Network error: could not build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Network error: server answered {status} for {url}")]
    Status { status: u16, url: String },
}

pub struct FetchConfig<'a> {
    pub url: &'a str,
    pub user_agent: &'a str,
    pub timeout: Duration,
}

pub struct FetchedPage {
    /// Final URL after redirects.
    pub url: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl FetchedPage {
    pub fn hints(&self) -> EncodingHints {
        self.content_type.as_deref().map(EncodingHints::from_content_type).unwrap_or_default()
    }
}

pub fn fetch_page(config: &FetchConfig<'_>) -> Result<FetchedPage, FetchError> {
    let start = Instant::now();
    let client = reqwest::blocking::Client::builder()
        .timeout(config.timeout)
        .user_agent(config.user_agent)
        .build()
        .map_err(FetchError::Client)?;

    let resp = client.get(config.url).send()?;
    let status = resp.status();
    let url = resp.url().to_string();
    if !status.is_success() {
        return Err(FetchError::Status { status: status.as_u16(), url });
    }

    let content_type = resp.headers().get(CONTENT_TYPE).and_then(|v| v.to_str().ok()).map(str::to_owned);
    let bytes = resp.bytes()?.to_vec();

    info!(
        url = %url,
        status = status.as_u16(),
        bytes = bytes.len(),
        content_type = content_type.as_deref().unwrap_or("-"),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "fetched page"
    );

    Ok(FetchedPage { url, content_type, bytes })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_errors_read_as_network_failures() {
        let err = FetchError::Status { status: 503, url: "https://example.test/".into() };
        assert_eq!(err.to_string(), "Network error: server answered 503 for https://example.test/");
    }

    #[test]
    fn content_type_feeds_encoding_hints() {
        let page = FetchedPage {
            url: String::new(),
            content_type: Some("text/html; charset=iso-8859-1".into()),
            bytes: Vec::new(),
        };
        assert_eq!(page.hints().charset.as_deref(), Some("iso-8859-1"));

        let bare = FetchedPage { url: String::new(), content_type: None, bytes: Vec::new() };
        assert_eq!(bare.hints().charset, None);
        assert!(bare.hints().allow_latin1_fallback);
    }
}
