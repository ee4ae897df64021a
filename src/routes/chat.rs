//! Chat panel routes

use std::convert::Infallible;

use axum::{
    extract::{Path, State},
    response::{
        sse::{Event, KeepAlive, Sse},
        Json,
    },
};
use futures::Stream;
use serde::Deserialize;
use uuid::Uuid;

use crate::core::chat::{ChatView, Key};
use crate::AppState;

use super::{lookup, ApiError};

#[derive(Debug, Deserialize)]
pub struct InputRequest {
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct KeyRequest {
    pub key: Key,
    #[serde(default)]
    pub shift: bool,
}

#[derive(Debug, Deserialize)]
pub struct SuggestionRequest {
    pub chip: String,
}

pub async fn view(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ChatView>, ApiError> {
    let session = lookup(&state, id).await?;
    Ok(Json(session.chat().await))
}

pub async fn set_input(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<InputRequest>,
) -> Result<Json<ChatView>, ApiError> {
    let session = lookup(&state, id).await?;
    Ok(Json(session.set_input(request.text).await))
}

pub async fn key_press(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<KeyRequest>,
) -> Result<Json<ChatView>, ApiError> {
    let session = lookup(&state, id).await?;
    Ok(Json(session.key_press(request.key, request.shift).await))
}

pub async fn suggestion(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<SuggestionRequest>,
) -> Result<Json<ChatView>, ApiError> {
    let session = lookup(&state, id).await?;
    session
        .apply_suggestion(&request.chip)
        .await
        .map(Json)
        .ok_or_else(|| ApiError::BadRequest(format!("unknown suggestion '{}'", request.chip)))
}

/// Submitting is answered with the current view either way; a rejected
/// submission simply leaves it unchanged.
pub async fn submit(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<InputRequest>,
) -> Result<Json<ChatView>, ApiError> {
    let session = lookup(&state, id).await?;
    Ok(Json(session.submit_message(&request.text).await))
}

/// Server-sent chat views: the current one first, then one per change
pub async fn events(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Sse<impl Stream<Item = Result<Event, Infallible>>>, ApiError> {
    let session = lookup(&state, id).await?;
    let mut rx = session.subscribe_chat();
    drop(session);

    let stream = async_stream::stream! {
        loop {
            let view = rx.borrow_and_update().clone();
            match Event::default().event("chat").json_data(&view) {
                Ok(event) => yield Ok::<_, Infallible>(event),
                Err(e) => tracing::warn!(error = %e, "Failed to encode chat view"),
            }
            // Sender gone: the session was closed
            if rx.changed().await.is_err() {
                break;
            }
        }
    };

    Ok(Sse::new(stream).keep_alive(KeepAlive::default()))
}
