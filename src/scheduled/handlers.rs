use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::Response,
    Json,
};
use chrono::Utc;
use tracing::{info, instrument, warn};

use super::ActionRequest;
use crate::core::verify::verify_bearer;
use crate::shared::{AppError, AppState};

/// Refuses scheduler requests without the configured `Authorization: Bearer` secret
pub async fn require_actions_token(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let Some(token) = state.actions_token.as_deref() else {
        warn!("No actions token configured, refusing action request");
        return Err(AppError::Unauthorized("Actions are disabled".to_string()));
    };
    if let Err(err) = verify_bearer(request.headers(), token) {
        warn!(error = %err, "Rejected action request");
        return Err(AppError::Unauthorized("Could not verify request".to_string()));
    }
    Ok(next.run(request).await)
}

/// HTTP handler for scheduler triggered actions
///
/// POST /actions
/// Body: `{"action_type": "<code>"}`
#[instrument(name = "run_action", skip(state))]
pub async fn run_action(
    State(state): State<AppState>,
    Json(request): Json<ActionRequest>,
) -> Result<StatusCode, AppError> {
    let Some(action) = state.actions.get(&request.action_type) else {
        warn!(action_type = %request.action_type, "Unknown action type");
        return Err(AppError::BadRequest(format!(
            "Unknown action type {}",
            request.action_type
        )));
    };

    info!(action_type = %request.action_type, "Running action");
    action
        .run(Utc::now().naive_utc())
        .await
        .map_err(|source| AppError::Action {
            action_type: request.action_type.clone(),
            source,
        })?;

    Ok(StatusCode::OK)
}
