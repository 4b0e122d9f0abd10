use axum::{
    extract::{Json, Query, State},
    http::StatusCode,
};
use serde::Serialize;
use tracing::{error, info};

use nonprofit_search_core::query::{BackendQuery, SearchParams};
use nonprofit_search_core::run_search;
use nonprofit_search_core::types::OrgRecord;

use crate::AppContext;

type ApiError = (StatusCode, Json<serde_json::Value>);

fn internal_error(message: impl std::fmt::Display) -> ApiError {
    (StatusCode::INTERNAL_SERVER_ERROR, Json(serde_json::json!({ "error": message.to_string() })))
}

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

/// `GET /search?q=&state=&international_only=` — ranked, title-cased matches.
pub async fn api_search(
    State(ctx): State<AppContext>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<OrgRecord>>, ApiError> {
    let query = BackendQuery::from(&params);
    info!(
        term = query.term.as_str(),
        state = params.state.as_str(),
        international_only = params.international_only.as_deref().unwrap_or("false"),
        "Search request"
    );

    // Matching walks every record; keep it off the async workers.
    let index = ctx.index.clone();
    let results = tokio::task::spawn_blocking(move || run_search(&index, &query))
        .await
        .map_err(|e| {
            error!(error = %e, "Search task failed");
            internal_error(e)
        })?;

    Ok(Json(results))
}

// ---------------------------------------------------------------------------
// Static data endpoints
// ---------------------------------------------------------------------------

/// `GET /api/states` — location codes for the state filter, sorted, without `INT`.
pub async fn api_states(State(ctx): State<AppContext>) -> Json<Vec<String>> {
    Json(ctx.index.state_codes())
}

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    datasets: usize,
    records: usize,
    international: bool,
    #[serde(rename = "uptimeSecs")]
    uptime_secs: u64,
}

/// `GET /health`
pub async fn api_health(State(ctx): State<AppContext>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        datasets: ctx.index.datasets.len(),
        records: ctx.index.record_count(),
        international: ctx.index.has_international(),
        uptime_secs: ctx.start_time.elapsed().as_secs(),
    })
}
