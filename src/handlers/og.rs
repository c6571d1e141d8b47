use axum::extract::{RawQuery, State};
use axum::Json;

use crate::error::{AppError, AppResult};
use crate::models::OgResult;
use crate::og::FetchOutcome;
use crate::state::AppState;

pub const NO_OG_DATA: &str = "No OG data found";

/// GET|POST /api/og?url=<encoded-url>
///
/// Returns the page's preview image (absolute) plus optional title and
/// description. Upstream failures and pages without an image both surface
/// as 404 so callers never see transport details.
pub async fn get_og_data(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> AppResult<Json<OgResult>> {
    let raw_url = first_url_param(query.as_deref());

    let outcome = state.resolver.resolve(raw_url.as_deref()).await;
    tracing::info!(outcome = outcome.label(), "OG lookup finished");

    outcome_to_response(outcome)
}

/// First `url` value in the query string; later repeats are ignored.
fn first_url_param(query: Option<&str>) -> Option<String> {
    url::form_urlencoded::parse(query?.as_bytes())
        .find(|(key, _)| key == "url")
        .map(|(_, value)| value.into_owned())
}

fn outcome_to_response(outcome: FetchOutcome) -> AppResult<Json<OgResult>> {
    match outcome {
        FetchOutcome::Success(result) => Ok(Json(result)),
        FetchOutcome::InvalidInput(e) => Err(AppError::Validation(e.to_string())),
        FetchOutcome::NotFound | FetchOutcome::UpstreamError(_) => {
            Err(AppError::NotFound(NO_OG_DATA.into()))
        }
    }
}
