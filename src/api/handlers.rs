//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use tracing::{error, info, warn};

use crate::{
    entries::{EntryError, RowEdit},
    events::StartOutcome,
    state::AppState,
    tasks::DriverCommand,
    timer::TimerDefinition,
};
use super::responses::{ApiResponse, EntryResponse, HealthResponse, NewEntry, StatusResponse};

/// Map an entry list failure to an HTTP status
fn entry_error_status(e: &EntryError) -> StatusCode {
    match e {
        EntryError::NotFound(_) => StatusCode::NOT_FOUND,
        EntryError::EmptyName | EntryError::DurationTooLong(_) => StatusCode::BAD_REQUEST,
        EntryError::Io { .. } | EntryError::Parse { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Handle POST /timers/:index/start - Start the timer in row `index`
pub async fn start_handler(
    State(state): State<Arc<AppState>>,
    Path(index): Path<usize>,
) -> Result<Json<ApiResponse>, StatusCode> {
    match state
        .request("start", |reply| DriverCommand::Start { index, reply })
        .await
    {
        Ok(Ok(StartOutcome::Started)) => {
            let timer = state.get_timer_state();
            let name = timer.name.clone().unwrap_or_default();
            info!("Start endpoint called - timer '{}' running", name);
            Ok(Json(ApiResponse::running(
                format!("Timer '{}' started", name),
                timer,
            )))
        }
        Ok(Ok(StartOutcome::Ignored)) => {
            info!("Start endpoint called - timer #{} has no positive duration", index);
            Ok(Json(ApiResponse::ignored(
                "Timer has no positive duration, nothing started".to_string(),
                state.get_timer_state(),
            )))
        }
        Ok(Err(e)) => {
            warn!("Failed to start timer #{}: {}", index, e);
            Err(entry_error_status(&e))
        }
        Err(e) => {
            error!("Failed to reach timer driver: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /stop - Stop the countdown and any reminders
pub async fn stop_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    match state.request("stop", |reply| DriverCommand::Stop { reply }).await {
        Ok(was_active) => {
            info!("Stop endpoint called - timer was active: {}", was_active);
            let message = if was_active { "Timer stopped" } else { "No timer was active" };
            Ok(Json(ApiResponse::stopped(
                message.to_string(),
                state.get_timer_state(),
            )))
        }
        Err(e) => {
            error!("Failed to reach timer driver: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /focus - The timer window came to the foreground
pub async fn focus_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    match state.request("focus", |reply| DriverCommand::Focus { reply }).await {
        Ok(true) => {
            info!("Focus endpoint called - finished timer acknowledged");
            Ok(Json(ApiResponse::stopped(
                "Finished timer acknowledged".to_string(),
                state.get_timer_state(),
            )))
        }
        Ok(false) => Ok(Json(ApiResponse::ignored(
            "Nothing to acknowledge".to_string(),
            state.get_timer_state(),
        ))),
        Err(e) => {
            error!("Failed to reach timer driver: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle GET /entries - List the timer rows
pub async fn list_entries_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<EntryResponse>>, StatusCode> {
    match state
        .request("list-entries", |reply| DriverCommand::ListEntries { reply })
        .await
    {
        Ok(entries) => Ok(Json(
            entries
                .into_iter()
                .enumerate()
                .map(|(index, definition)| EntryResponse::new(index, definition))
                .collect(),
        )),
        Err(e) => {
            error!("Failed to reach timer driver: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /entries - Append a timer row
pub async fn add_entry_handler(
    State(state): State<Arc<AppState>>,
    Json(entry): Json<NewEntry>,
) -> Result<(StatusCode, Json<EntryResponse>), StatusCode> {
    let definition = TimerDefinition::new(entry.name, entry.duration);

    match state
        .request("add-entry", |reply| DriverCommand::AddEntry {
            definition: definition.clone(),
            reply,
        })
        .await
    {
        Ok(Ok(index)) => Ok((
            StatusCode::CREATED,
            Json(EntryResponse::new(index, definition)),
        )),
        Ok(Err(e)) => {
            warn!("Failed to add timer: {}", e);
            Err(entry_error_status(&e))
        }
        Err(e) => {
            error!("Failed to reach timer driver: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle PATCH /entries/:index - Edit a timer row in place
pub async fn edit_entry_handler(
    State(state): State<Arc<AppState>>,
    Path(index): Path<usize>,
    Json(edit): Json<RowEdit>,
) -> Result<Json<EntryResponse>, StatusCode> {
    match state
        .request("edit-entry", |reply| DriverCommand::EditEntry { index, edit, reply })
        .await
    {
        Ok(Ok(definition)) => Ok(Json(EntryResponse::new(index, definition))),
        Ok(Err(e)) => {
            warn!("Failed to edit timer #{}: {}", index, e);
            Err(entry_error_status(&e))
        }
        Err(e) => {
            error!("Failed to reach timer driver: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle DELETE /entries/:index - Remove a timer row
pub async fn delete_entry_handler(
    State(state): State<Arc<AppState>>,
    Path(index): Path<usize>,
) -> Result<Json<EntryResponse>, StatusCode> {
    match state
        .request("delete-entry", |reply| DriverCommand::DeleteEntry { index, reply })
        .await
    {
        Ok(Ok(definition)) => Ok(Json(EntryResponse::new(index, definition))),
        Ok(Err(e)) => {
            warn!("Failed to delete timer #{}: {}", index, e);
            Err(entry_error_status(&e))
        }
        Err(e) => {
            error!("Failed to reach timer driver: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle GET /status - Return the current timer state
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    let (last_action, last_action_time) = state.get_last_action();

    Json(StatusResponse {
        timer: state.get_timer_state(),
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    })
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
