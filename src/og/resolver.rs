use std::time::Duration;

use reqwest::redirect::Policy;
use reqwest::{Client as ReqwestClient, Response};
use url::Url;

use super::extract::{extract_og_data, normalize_image_url};
use super::target::{is_blocked_host, ValidatedTarget};
use super::{FetchOutcome, UpstreamFailure};
use crate::models::OgResult;

pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";
pub const DEFAULT_MAX_BODY_BYTES: usize = 2 * 1024 * 1024;
pub const DEFAULT_MAX_REDIRECTS: usize = 5;

/// Knobs for the outbound fetch.
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    /// Deadline covering connect, headers and body.
    pub timeout: Duration,
    pub user_agent: String,
    /// Bytes of body read before the rest is dropped.
    pub max_body_bytes: usize,
    pub max_redirects: usize,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        ResolverConfig {
            timeout: DEFAULT_FETCH_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            max_redirects: DEFAULT_MAX_REDIRECTS,
        }
    }
}

/// A page body plus the URL it was finally served from.
struct FetchedPage {
    url: Url,
    html: String,
}

/// Fetches pages and turns them into [`FetchOutcome`]s.
///
/// Holds nothing but a pooled HTTP client, so one instance is shared by
/// every request and calls never influence each other.
#[derive(Clone)]
pub struct OgResolver {
    client: ReqwestClient,
    max_body_bytes: usize,
}

impl OgResolver {
    pub fn new(config: &ResolverConfig) -> Result<Self, reqwest::Error> {
        let max_redirects = config.max_redirects;
        let redirect_policy = Policy::custom(move |attempt| {
            if attempt.previous().len() > max_redirects {
                attempt.error("too many redirects")
            } else if attempt.url().host_str().map_or(true, is_blocked_host) {
                attempt.error("redirect to blocked host")
            } else {
                attempt.follow()
            }
        });

        let builder = ReqwestClient::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.as_str())
            .redirect(redirect_policy);

        // Unit tests talk to an in-process server; keep any proxy env out of it.
        #[cfg(test)]
        let builder = builder.no_proxy();

        let client = builder.build()?;

        Ok(OgResolver {
            client,
            max_body_bytes: config.max_body_bytes,
        })
    }

    /// Validate `raw_url`, fetch it and extract preview metadata.
    ///
    /// Always returns a classified outcome; no error escapes.
    pub async fn resolve(&self, raw_url: Option<&str>) -> FetchOutcome {
        match ValidatedTarget::parse(raw_url) {
            Ok(target) => self.resolve_target(&target).await,
            Err(e) => {
                tracing::debug!(error = %e, "Rejected OG lookup input");
                FetchOutcome::InvalidInput(e)
            }
        }
    }

    /// Fetch an already validated target and extract preview metadata.
    pub async fn resolve_target(&self, target: &ValidatedTarget) -> FetchOutcome {
        let page = match self.fetch_page(target).await {
            Ok(Some(page)) => page,
            Ok(None) => return FetchOutcome::NotFound,
            Err(failure) => return FetchOutcome::UpstreamError(failure),
        };

        let fields = extract_og_data(&page.html);

        let Some(image) = fields.image else {
            tracing::debug!(url = %target.as_str(), "No preview image on page");
            return FetchOutcome::NotFound;
        };

        FetchOutcome::Success(OgResult {
            image: normalize_image_url(&image, &page.url),
            title: fields.title,
            description: fields.description,
        })
    }

    /// `Ok(None)` means the server answered but there is nothing to parse.
    async fn fetch_page(
        &self,
        target: &ValidatedTarget,
    ) -> Result<Option<FetchedPage>, UpstreamFailure> {
        let mut response = self
            .client
            .get(target.url().clone())
            .send()
            .await
            .map_err(|e| {
                let failure = classify(&e, UpstreamFailure::Transport);
                tracing::warn!(
                    error = %e,
                    url = %target.as_str(),
                    outcome = failure.as_str(),
                    "Failed to fetch URL for OG data"
                );
                failure
            })?;

        let status = response.status();
        if !status.is_success() {
            tracing::info!(
                url = %target.as_str(),
                status = status.as_u16(),
                "Upstream returned non-success status"
            );
            return Ok(None);
        }

        let page_url = response.url().clone();
        let body = self.read_body(&mut response).await.map_err(|e| {
            let failure = classify(&e, UpstreamFailure::Body);
            tracing::warn!(
                error = %e,
                url = %target.as_str(),
                outcome = failure.as_str(),
                "Failed to read OG response body"
            );
            failure
        })?;

        let html = String::from_utf8_lossy(&body).into_owned();
        if html.trim().is_empty() {
            tracing::info!(url = %target.as_str(), "Upstream returned an empty body");
            return Ok(None);
        }

        Ok(Some(FetchedPage {
            url: page_url,
            html,
        }))
    }

    /// Read at most `max_body_bytes`; the remainder is never pulled off the
    /// socket.
    async fn read_body(&self, response: &mut Response) -> Result<Vec<u8>, reqwest::Error> {
        let mut body = Vec::new();
        while let Some(chunk) = response.chunk().await? {
            let remaining = self.max_body_bytes - body.len();
            if chunk.len() >= remaining {
                body.extend_from_slice(&chunk[..remaining]);
                tracing::debug!(
                    limit = self.max_body_bytes,
                    "Truncated OG response body at limit"
                );
                break;
            }
            body.extend_from_slice(&chunk);
        }
        Ok(body)
    }
}

fn classify(e: &reqwest::Error, otherwise: UpstreamFailure) -> UpstreamFailure {
    if e.is_timeout() {
        UpstreamFailure::Timeout
    } else {
        otherwise
    }
}
