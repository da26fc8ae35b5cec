use axum::{body::Bytes, extract::State, http::HeaderMap, Json};
use serde_json::Value;
use tracing::{info, instrument, warn};

use super::command::{CommandError, Interaction};
use super::response::ResponseBody;
use crate::shared::{AppError, AppState};

const PING: u8 = 1;
const APPLICATION_COMMAND: u8 = 2;

/// Webhook for chat platform interactions
///
/// POST /interactions
/// Verifies the signature, answers pings and dispatches slash commands
#[instrument(name = "interactions", skip_all)]
pub async fn interactions(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<ResponseBody>, AppError> {
    if let Err(err) = state.verifier.verify(&headers, &body) {
        warn!(error = %err, "Rejected interaction");
        return Err(AppError::Unauthorized("Could not verify request".to_string()));
    }

    let interaction: Interaction = serde_json::from_slice(&body)
        .map_err(|err| AppError::BadRequest(format!("Malformed interaction payload: {err}")))?;

    let response = match interaction.kind {
        PING => ResponseBody::Pong,
        APPLICATION_COMMAND => dispatch(&state, &interaction).await?,
        kind => {
            warn!(kind, "Unknown interaction type");
            return Err(AppError::BadRequest("Unknown interaction type".to_string()));
        }
    };

    Ok(Json(response))
}

async fn dispatch(state: &AppState, interaction: &Interaction) -> Result<ResponseBody, AppError> {
    let name = interaction.command_name().unwrap_or_default();
    let Some(command) = state.registry.get(name) else {
        warn!(command = %name, "Unknown command");
        return Err(AppError::BadRequest("Unknown command".to_string()));
    };

    info!(command = %name, "Handling command");
    match command.handle(interaction).await {
        Ok(response) => Ok(response),
        Err(err) if err.is_user_facing() => {
            info!(command = %name, reason = %err, "Command rejected");
            Ok(ResponseBody::ephemeral(err.to_string()))
        }
        Err(CommandError::MalformedPayload(reason)) => Err(AppError::BadRequest(format!(
            "Malformed interaction payload: {reason}"
        ))),
        Err(err) => Err(err.into()),
    }
}

/// Registration payloads for every command
///
/// GET /commands
#[instrument(name = "list_commands", skip(state))]
pub async fn list_commands(State(state): State<AppState>) -> Json<Vec<Value>> {
    Json(
        state
            .registry
            .all()
            .iter()
            .map(|command| command.definition())
            .collect(),
    )
}

/// GET /health
pub async fn health() -> &'static str {
    "OK"
}
