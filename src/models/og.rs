use serde::{Deserialize, Serialize};

/// Preview metadata returned by `GET /api/og`.
///
/// `image` is always an absolute URL. `title` and `description` are
/// best-effort and left out of the JSON when the page has neither.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OgResult {
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}
