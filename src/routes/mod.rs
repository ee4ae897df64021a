//! API routes

mod chat;
mod panels;

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{delete, get, post, put},
    Router,
};
use serde::Serialize;
use serde_json::json;
use uuid::Uuid;

use crate::core::contact::ContactError;
use crate::core::navigation::SidebarView;
use crate::core::{Session, SessionError};
use crate::AppState;

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
    sessions: usize,
}

#[derive(Debug, Serialize)]
pub struct CreateSessionResponse {
    pub session_id: Uuid,
    pub sidebar: SidebarView,
}

/// Errors surfaced to HTTP clients
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Session not found: {0}")]
    SessionNotFound(Uuid),

    #[error("Unknown hobby: {0}")]
    UnknownHobby(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error(transparent)]
    InvalidContact(#[from] ContactError),

    #[error(transparent)]
    Session(#[from] SessionError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::SessionNotFound(_) | ApiError::UnknownHobby(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::InvalidContact(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Session(SessionError::Restore(_)) => StatusCode::CONFLICT,
            ApiError::Session(SessionError::Carousel(_)) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }

        let body = match &self {
            ApiError::InvalidContact(ContactError::Invalid(fields)) => json!({
                "error": self.to_string(),
                "fields": fields,
            }),
            _ => json!({ "error": self.to_string() }),
        };

        (status, Json(body)).into_response()
    }
}

/// Resolve a session id or fail with 404
pub(crate) async fn lookup(state: &AppState, id: Uuid) -> Result<Arc<Session>, ApiError> {
    state
        .sessions
        .get(&id)
        .await
        .ok_or(ApiError::SessionNotFound(id))
}

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        sessions: state.sessions.len().await,
    })
}

async fn create_session(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<CreateSessionResponse>), ApiError> {
    let session = state.sessions.create().await?;
    Ok((
        StatusCode::CREATED,
        Json(CreateSessionResponse {
            session_id: session.id(),
            sidebar: session.sidebar().await,
        }),
    ))
}

async fn close_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    if state.sessions.remove(&id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::SessionNotFound(id))
    }
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/v1/sessions", post(create_session))
        .route("/v1/sessions/:id", delete(close_session))
        // Sidebar
        .route("/v1/sessions/:id/sidebar", get(panels::sidebar))
        .route("/v1/sessions/:id/navigate", post(panels::navigate))
        .route("/v1/sessions/:id/theme", post(panels::toggle_theme))
        .route("/v1/sessions/:id/menu", post(panels::toggle_menu))
        // Chat
        .route("/v1/sessions/:id/chat", get(chat::view))
        .route("/v1/sessions/:id/chat/input", put(chat::set_input))
        .route("/v1/sessions/:id/chat/key", post(chat::key_press))
        .route("/v1/sessions/:id/chat/suggestion", post(chat::suggestion))
        .route("/v1/sessions/:id/chat/messages", post(chat::submit))
        .route("/v1/sessions/:id/chat/events", get(chat::events))
        // Content panels
        .route("/v1/sessions/:id/projects", get(panels::projects))
        .route("/v1/sessions/:id/projects/filter", post(panels::set_filter))
        .route("/v1/sessions/:id/experience", get(panels::experience))
        .route("/v1/sessions/:id/fun", get(panels::fun))
        .route("/v1/sessions/:id/fun/hobbies/:hobby", post(panels::toggle_hobby))
        .route("/v1/sessions/:id/reviews", get(panels::reviews))
        .route("/v1/sessions/:id/reviews/next", post(panels::next_review))
        .route("/v1/sessions/:id/reviews/prev", post(panels::prev_review))
        .route("/v1/sessions/:id/reviews/jump", post(panels::jump_review))
        .route("/v1/sessions/:id/contact", get(panels::contact))
        .route("/v1/sessions/:id/contact/fields", put(panels::update_contact))
        .route("/v1/sessions/:id/contact/submit", post(panels::submit_contact))
        // Save/load boundary
        .route(
            "/v1/sessions/:id/snapshot",
            get(panels::snapshot).put(panels::restore),
        )
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use axum::body::{self, Body};
    use axum::http::Request;
    use serde_json::Value;
    use tower::ServiceExt;

    use super::*;
    use crate::config::SiteContent;
    use crate::core::SessionRegistry;
    use crate::providers::CannedReplies;

    fn app() -> Router {
        let content = Arc::new(SiteContent::builtin().unwrap());
        let replies = Arc::new(CannedReplies::from_content(&content.chat).with_seed(3));
        let state = AppState {
            sessions: Arc::new(SessionRegistry::new(content, replies)),
        };
        router().with_state(state)
    }

    async fn send(
        app: &Router,
        method: &str,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .unwrap();

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    async fn new_session(app: &Router) -> String {
        let (status, body) = send(app, "POST", "/v1/sessions", None).await;
        assert_eq!(status, StatusCode::CREATED);
        body["session_id"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_health() {
        let app = app();
        let (status, body) = send(&app, "GET", "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["sessions"], 0);
    }

    #[tokio::test]
    async fn test_session_lifecycle() {
        let app = app();
        let id = new_session(&app).await;

        let uri = format!("/v1/sessions/{id}/sidebar");
        let (status, body) = send(&app, "GET", &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["active"], "chat");

        let (status, _) = send(&app, "DELETE", &format!("/v1/sessions/{id}"), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let uri = format!("/v1/sessions/{id}/chat");
        let (status, body) = send(&app, "GET", &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body["error"].as_str().unwrap().contains("Session not found"));
    }

    #[tokio::test]
    async fn test_navigate_unknown_section_goes_to_chat() {
        let app = app();
        let id = new_session(&app).await;
        let uri = format!("/v1/sessions/{id}/navigate");

        let (_, body) = send(&app, "POST", &uri, Some(json!({ "section": "review" }))).await;
        assert_eq!(body["active"], "reviews");

        let (_, body) = send(&app, "POST", &uri, Some(json!({ "section": "blog" }))).await;
        assert_eq!(body["active"], "chat");
    }

    #[tokio::test(start_paused = true)]
    async fn test_chat_round_trip() {
        let app = app();
        let id = new_session(&app).await;
        let uri = format!("/v1/sessions/{id}/chat/messages");

        let (status, body) = send(
            &app,
            "POST",
            &uri,
            Some(json!({ "text": "Tell me about yourself" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["messages"].as_array().unwrap().len(), 2);
        assert_eq!(body["pending_reply"], true);
        assert_eq!(body["scroll_to"]["kind"], "typing_indicator");

        // Rejected while the reply is pending
        let (_, body) = send(&app, "POST", &uri, Some(json!({ "text": "again" }))).await;
        assert_eq!(body["messages"].as_array().unwrap().len(), 2);

        tokio::time::sleep(Duration::from_millis(3000)).await;

        let (_, body) = send(&app, "GET", &format!("/v1/sessions/{id}/chat"), None).await;
        let messages = body["messages"].as_array().unwrap();
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[2]["sender"], "system");
        assert_eq!(body["pending_reply"], false);
    }

    #[tokio::test]
    async fn test_blank_message_ignored() {
        let app = app();
        let id = new_session(&app).await;

        let (status, body) = send(
            &app,
            "POST",
            &format!("/v1/sessions/{id}/chat/messages"),
            Some(json!({ "text": "   " })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["messages"].as_array().unwrap().len(), 1);
        assert_eq!(body["pending_reply"], false);
    }

    #[tokio::test]
    async fn test_unknown_suggestion_is_bad_request() {
        let app = app();
        let id = new_session(&app).await;
        let uri = format!("/v1/sessions/{id}/chat/suggestion");

        let chip = json!({ "chip": "Experience" });
        let (status, body) = send(&app, "POST", &uri, Some(chip)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["input"], "Experience");
        assert_eq!(body["can_send"], true);

        let (status, _) = send(&app, "POST", &uri, Some(json!({ "chip": "Nope" }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_project_filter() {
        let app = app();
        let id = new_session(&app).await;
        let uri = format!("/v1/sessions/{id}/projects/filter");

        let filter = json!({ "filter": "backend" });
        let (status, body) = send(&app, "POST", &uri, Some(filter)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["active"], "backend");
        assert_eq!(body["projects"].as_array().unwrap().len(), 1);

        let filter = json!({ "filter": "desktop" });
        let (status, _) = send(&app, "POST", &uri, Some(filter)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_review_carousel_routes() {
        let app = app();
        let id = new_session(&app).await;

        let uri = format!("/v1/sessions/{id}/reviews/prev");
        let (_, body) = send(&app, "POST", &uri, None).await;
        assert_eq!(body["selected_index"], 4);

        let (_, body) = send(
            &app,
            "POST",
            &format!("/v1/sessions/{id}/reviews/jump"),
            Some(json!({ "index": 2 })),
        )
        .await;
        assert_eq!(body["selected_index"], 2);
        assert_eq!(body["selected"]["name"], "Emily Watson");
        assert_eq!(body["average_rating"], 5.0);
    }

    #[tokio::test]
    async fn test_unknown_hobby_not_found() {
        let app = app();
        let id = new_session(&app).await;

        let uri = format!("/v1/sessions/{id}/fun/hobbies/base-jumping");
        let (status, _) = send(&app, "POST", &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let uri = format!("/v1/sessions/{id}/fun/hobbies/coffee");
        let (status, body) = send(&app, "POST", &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["hobbies"][0]["active"], true);
    }

    #[tokio::test]
    async fn test_invalid_contact_lists_fields() {
        let app = app();
        let id = new_session(&app).await;

        send(
            &app,
            "PUT",
            &format!("/v1/sessions/{id}/contact/fields"),
            Some(json!({ "field": "email", "value": "not-an-email" })),
        )
        .await;

        let uri = format!("/v1/sessions/{id}/contact/submit");
        let (status, body) = send(&app, "POST", &uri, None).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["fields"], json!(["name", "email", "subject", "message"]));
    }

    #[tokio::test]
    async fn test_snapshot_moves_between_sessions() {
        let app = app();
        let source = new_session(&app).await;
        let target = new_session(&app).await;

        send(&app, "POST", &format!("/v1/sessions/{source}/reviews/next"), None).await;
        let (status, snapshot) = send(
            &app,
            "GET",
            &format!("/v1/sessions/{source}/snapshot"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(snapshot["review_index"], 1);

        let uri = format!("/v1/sessions/{target}/snapshot");
        let (status, restored) = send(&app, "PUT", &uri, Some(snapshot)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(restored["review_index"], 1);
        assert_eq!(restored["conversation"]["messages"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_restore_while_reply_pending_conflicts() {
        let app = app();
        let id = new_session(&app).await;
        let uri = format!("/v1/sessions/{id}/snapshot");
        let (_, saved) = send(&app, "GET", &uri, None).await;

        let messages = format!("/v1/sessions/{id}/chat/messages");
        send(&app, "POST", &messages, Some(json!({ "text": "hi" }))).await;

        let (status, body) = send(&app, "PUT", &uri, Some(saved)).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert!(body["error"].as_str().unwrap().contains("reply is pending"));

        let (_, chat) = send(&app, "GET", &format!("/v1/sessions/{id}/chat"), None).await;
        assert_eq!(chat["messages"].as_array().unwrap().len(), 2);
        assert_eq!(chat["pending_reply"], true);
    }

    #[tokio::test]
    async fn test_restore_malformed_history_conflicts() {
        let app = app();
        let id = new_session(&app).await;
        let snapshot = json!({
            "section": "chat",
            "review_index": 0,
            "conversation": {
                "pending_reply": false,
                "messages": [
                    { "id": 7, "content": "", "sender": "system",
                      "timestamp": "2024-01-01T00:00:00Z" },
                    { "id": 7, "content": "dup id", "sender": "system",
                      "timestamp": "2024-01-01T00:00:00Z" },
                    { "id": 3, "content": "dangling user", "sender": "user",
                      "timestamp": "2024-01-01T00:00:00Z" }
                ]
            }
        });

        let uri = format!("/v1/sessions/{id}/snapshot");
        let (status, body) = send(&app, "PUT", &uri, Some(snapshot)).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert!(body["error"].as_str().unwrap().contains("history is invalid"));

        let (_, chat) = send(&app, "GET", &format!("/v1/sessions/{id}/chat"), None).await;
        assert_eq!(chat["messages"].as_array().unwrap().len(), 1);
        assert_eq!(chat["messages"][0]["id"], 1);
    }

    #[tokio::test]
    async fn test_restore_section_alias_and_unknown() {
        let app = app();
        let id = new_session(&app).await;
        let uri = format!("/v1/sessions/{id}/snapshot");
        let (_, mut snapshot) = send(&app, "GET", &uri, None).await;

        snapshot["section"] = json!("review");
        let (status, restored) = send(&app, "PUT", &uri, Some(snapshot.clone())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(restored["section"], "reviews");

        snapshot["section"] = json!("blog");
        let (status, restored) = send(&app, "PUT", &uri, Some(snapshot)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(restored["section"], "chat");
    }

    #[tokio::test]
    async fn test_chat_events_stream_current_view() {
        use futures::StreamExt;

        let app = app();
        let id = new_session(&app).await;
        let request = Request::get(format!("/v1/sessions/{id}/chat/events"))
            .body(Body::empty())
            .unwrap();

        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()["content-type"],
            "text/event-stream"
        );

        let mut frames = response.into_body().into_data_stream();
        let first = frames.next().await.unwrap().unwrap();
        let text = String::from_utf8(first.to_vec()).unwrap();
        assert!(text.contains("event: chat"));
        assert!(text.contains("\"pending_reply\":false"));
    }
}
