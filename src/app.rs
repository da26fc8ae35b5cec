use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use thiserror::Error;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::config::{Settings, StorageKind, VerifierKind};
use crate::core::handlers::{health, interactions, list_commands};
use crate::core::registry::{CommandRegistry, RegistryError};
use crate::core::verify::{Ed25519Verifier, NoopVerifier, Verifier, VerifyError};
use crate::match_tracker::commands::{EditMatchCommand, MatchQueryCommand, RecordMatchCommand};
use crate::match_tracker::{MatchRepository, StoredMatchRepository};
use crate::notify::{DiscordClient, Notifier};
use crate::scheduled::handlers::{require_actions_token, run_action};
use crate::scheduled::{ActionRegistry, ActionRegistryError, PromptSessionBooking};
use crate::sessions::commands::BookSessionCommand;
use crate::sessions::{SessionRepository, StoredSessionRepository};
use crate::shared::AppState;
use crate::storage::{InMemoryStorage, LocalStorage, StorageBackend};
use crate::timetable::commands::ListTimetableCommand;
use crate::timetable::{LeisureCentreTimetable, Timetable};

#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Actions(#[from] ActionRegistryError),

    #[error("Invalid public key: {0}")]
    Verify(#[from] VerifyError),
}

/// Every slash command the bot serves
pub fn build_registry(
    matches: Arc<dyn MatchRepository>,
    sessions: Arc<dyn SessionRepository>,
    timetable: Arc<dyn Timetable>,
) -> Result<CommandRegistry, RegistryError> {
    CommandRegistry::builder()
        .with_command(Arc::new(RecordMatchCommand::new(matches.clone())))
        .with_command(Arc::new(EditMatchCommand::new(matches.clone())))
        .with_command(Arc::new(MatchQueryCommand::show_matches(matches.clone())))
        .with_command(Arc::new(MatchQueryCommand::league_table(matches.clone())))
        .with_command(Arc::new(MatchQueryCommand::head_to_head(matches.clone())))
        .with_command(Arc::new(MatchQueryCommand::session_summary(matches)))
        .with_command(Arc::new(BookSessionCommand::new(sessions)))
        .with_command(Arc::new(ListTimetableCommand::new(timetable)))
        .build()
}

pub fn build_state(settings: &Settings) -> Result<AppState, StartupError> {
    let storage: Arc<dyn StorageBackend> = match settings.storage_backend {
        StorageKind::Local => Arc::new(LocalStorage::new()),
        StorageKind::Memory => Arc::new(InMemoryStorage::new()),
    };
    let verifier: Arc<dyn Verifier> = match settings.verifier {
        VerifierKind::Ed25519 => Arc::new(Ed25519Verifier::from_hex(&settings.public_key)?),
        VerifierKind::Noop => Arc::new(NoopVerifier),
    };
    info!(storage = %settings.storage_backend, verifier = %settings.verifier, "Configured backends");

    let matches = Arc::new(StoredMatchRepository::new(
        storage.clone(),
        &settings.match_results_path,
        &settings.match_results_file,
    ));
    let sessions = Arc::new(StoredSessionRepository::new(
        storage,
        &settings.sessions_path,
        &settings.sessions_file,
    ));
    let timetable: Arc<dyn Timetable> = Arc::new(LeisureCentreTimetable::new(
        &settings.timetable_api_url,
        &settings.timetable_activity_id,
        &settings.timetable_location_id,
    ));
    let notifier: Arc<dyn Notifier> = Arc::new(DiscordClient::new(&settings.bot_token));

    let registry = build_registry(matches, sessions, timetable.clone())?;
    let actions = ActionRegistry::builder()
        .with_action(Arc::new(PromptSessionBooking::new(
            timetable,
            notifier,
            settings.prompt_session_booking_channel_ids.clone(),
        )))
        .build()?;
    if settings.actions_token.is_none() {
        warn!("ACTIONS_TOKEN is not set, POST /actions will refuse every request");
    }

    Ok(AppState::new(registry, verifier, actions)
        .with_actions_token(settings.actions_token.clone()))
}

pub fn router(state: AppState) -> Router {
    let actions = Router::new()
        .route("/actions", post(run_action))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_actions_token,
        ));

    Router::new()
        .route("/interactions", post(interactions))
        .merge(actions)
        .route("/commands", get(list_commands))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
