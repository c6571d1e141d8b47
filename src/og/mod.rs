//! Open Graph metadata resolver.
//!
//! Validates a caller-supplied URL, fetches the page once within a bounded
//! time budget, and extracts a preview image (plus title and description).
//! Nothing here depends on axum; the HTTP mapping lives in `handlers::og`.

mod extract;
mod resolver;
mod target;

pub use extract::{extract_og_data, normalize_image_url, OgFields};
pub use resolver::{
    OgResolver, ResolverConfig, DEFAULT_FETCH_TIMEOUT, DEFAULT_MAX_BODY_BYTES,
    DEFAULT_MAX_REDIRECTS, DEFAULT_USER_AGENT,
};
pub use target::{is_blocked_host, InputError, ValidatedTarget};

use crate::models::OgResult;

/// Why an outbound fetch produced nothing. Only ever logged; callers see
/// the same "no data" outcome for every variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpstreamFailure {
    Timeout,
    Transport,
    Body,
}

impl UpstreamFailure {
    pub fn as_str(self) -> &'static str {
        match self {
            UpstreamFailure::Timeout => "timeout",
            UpstreamFailure::Transport => "transport",
            UpstreamFailure::Body => "body",
        }
    }
}

/// Result of a single resolve call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    Success(OgResult),
    NotFound,
    InvalidInput(InputError),
    UpstreamError(UpstreamFailure),
}

impl FetchOutcome {
    /// Short label used in log fields.
    pub fn label(&self) -> &'static str {
        match self {
            FetchOutcome::Success(_) => "success",
            FetchOutcome::NotFound => "not_found",
            FetchOutcome::InvalidInput(_) => "invalid_input",
            FetchOutcome::UpstreamError(f) => f.as_str(),
        }
    }
}
