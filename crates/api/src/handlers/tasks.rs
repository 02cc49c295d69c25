//! Handlers for task discovery and claims.
//!
//! Both delegate to the engine in `explora_core` over a [`PgTaskStore`]
//! built from the request's pool.
//!
//! [`PgTaskStore`]: explora_db::PgTaskStore

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use explora_core::claim::{claim, ClaimOutcome, ClaimRequest};
use explora_core::discovery::{discover, DiscoveryQuery};
use explora_core::types::DbId;
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for `GET /tasks/today`.
#[derive(Debug, Deserialize)]
pub struct TodayParams {
    pub lat: f64,
    pub lng: f64,
    #[serde(default)]
    pub show_all: bool,
}

/// Request body for `POST /tasks/{task_id}/claim`.
#[derive(Debug, Deserialize)]
pub struct ClaimBody {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Serialize)]
pub struct ClaimResponse {
    #[serde(flatten)]
    pub outcome: ClaimOutcome,
    pub message: String,
}

/// GET /api/v1/tasks/today
///
/// Active tasks for events within walking range, filtered by the caller's
/// preferences unless `show_all` is set.
pub async fn today(
    auth: AuthUser,
    State(state): State<AppState>,
    AppQuery(params): AppQuery<TodayParams>,
) -> AppResult<impl IntoResponse> {
    let query = DiscoveryQuery {
        user_id: auth.user_id,
        lat: params.lat,
        lng: params.lng,
        show_all: params.show_all,
    };
    let result = discover(&state.task_store(), &query).await?;

    tracing::debug!(
        user_id = auth.user_id,
        tasks = result.tasks.len(),
        filtered = result.filtered_count,
        total = result.total_count,
        "Tasks discovered",
    );

    Ok(Json(DataResponse { data: result }))
}

/// POST /api/v1/tasks/{task_id}/claim
///
/// Every adjudicated outcome is a 200; inspect `status`.
pub async fn claim_task(
    auth: AuthUser,
    State(state): State<AppState>,
    AppPath(task_id): AppPath<DbId>,
    AppJson(body): AppJson<ClaimBody>,
) -> AppResult<impl IntoResponse> {
    let request = ClaimRequest {
        user_id: auth.user_id,
        task_id,
        lat: body.lat,
        lng: body.lng,
    };
    let outcome = claim(&state.task_store(), &request).await?;

    match &outcome {
        ClaimOutcome::Success {
            points_awarded,
            was_first,
            ..
        } => tracing::info!(
            user_id = auth.user_id,
            task_id,
            points = points_awarded,
            was_first,
            "Task claimed",
        ),
        ClaimOutcome::FailedDistance { distance_meters } => tracing::info!(
            user_id = auth.user_id,
            task_id,
            distance_m = distance_meters,
            "Claim rejected: too far",
        ),
        ClaimOutcome::AlreadyCompleted => tracing::debug!(
            user_id = auth.user_id,
            task_id,
            "Repeat claim ignored",
        ),
    }

    Ok(Json(DataResponse {
        data: ClaimResponse {
            message: outcome.message(),
            outcome,
        },
    }))
}
