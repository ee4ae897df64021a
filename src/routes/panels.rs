//! Sidebar and content panel routes

use axum::{
    extract::{Path, State},
    response::Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::core::catalog::{ExperienceView, FunView, ProjectFilter, ProjectsView, ReviewsView};
use crate::core::contact::{ContactField, ContactView};
use crate::core::navigation::{Section, SidebarView};
use crate::core::SessionSnapshot;
use crate::AppState;

use super::{lookup, ApiError};

#[derive(Debug, Deserialize)]
pub struct NavigateRequest {
    pub section: String,
}

#[derive(Debug, Deserialize)]
pub struct FilterRequest {
    pub filter: String,
}

#[derive(Debug, Deserialize)]
pub struct JumpRequest {
    pub index: usize,
}

#[derive(Debug, Deserialize)]
pub struct FieldRequest {
    pub field: ContactField,
    pub value: String,
}

pub async fn sidebar(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SidebarView>, ApiError> {
    let session = lookup(&state, id).await?;
    Ok(Json(session.sidebar().await))
}

pub async fn navigate(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<NavigateRequest>,
) -> Result<Json<SidebarView>, ApiError> {
    let session = lookup(&state, id).await?;
    let section = Section::from_name(&request.section);
    Ok(Json(session.navigate(section).await))
}

pub async fn toggle_theme(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SidebarView>, ApiError> {
    let session = lookup(&state, id).await?;
    Ok(Json(session.toggle_theme().await))
}

pub async fn toggle_menu(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SidebarView>, ApiError> {
    let session = lookup(&state, id).await?;
    Ok(Json(session.toggle_mobile_menu().await))
}

pub async fn projects(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ProjectsView>, ApiError> {
    let session = lookup(&state, id).await?;
    Ok(Json(session.projects().await))
}

pub async fn set_filter(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<FilterRequest>,
) -> Result<Json<ProjectsView>, ApiError> {
    let session = lookup(&state, id).await?;
    let filter = ProjectFilter::parse(&request.filter)
        .ok_or_else(|| ApiError::BadRequest(format!("unknown filter '{}'", request.filter)))?;
    Ok(Json(session.set_project_filter(filter).await))
}

pub async fn experience(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ExperienceView>, ApiError> {
    let session = lookup(&state, id).await?;
    Ok(Json(session.experience()))
}

pub async fn fun(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<FunView>, ApiError> {
    let session = lookup(&state, id).await?;
    Ok(Json(session.fun().await))
}

pub async fn toggle_hobby(
    State(state): State<AppState>,
    Path((id, hobby)): Path<(Uuid, String)>,
) -> Result<Json<FunView>, ApiError> {
    let session = lookup(&state, id).await?;
    session
        .toggle_hobby(&hobby)
        .await
        .map(Json)
        .ok_or(ApiError::UnknownHobby(hobby))
}

pub async fn reviews(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ReviewsView>, ApiError> {
    let session = lookup(&state, id).await?;
    Ok(Json(session.reviews().await))
}

pub async fn next_review(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ReviewsView>, ApiError> {
    let session = lookup(&state, id).await?;
    Ok(Json(session.next_review().await))
}

pub async fn prev_review(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ReviewsView>, ApiError> {
    let session = lookup(&state, id).await?;
    Ok(Json(session.prev_review().await))
}

pub async fn jump_review(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<JumpRequest>,
) -> Result<Json<ReviewsView>, ApiError> {
    let session = lookup(&state, id).await?;
    Ok(Json(session.jump_to_review(request.index).await))
}

pub async fn contact(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ContactView>, ApiError> {
    let session = lookup(&state, id).await?;
    Ok(Json(session.contact().await))
}

pub async fn update_contact(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<FieldRequest>,
) -> Result<Json<ContactView>, ApiError> {
    let session = lookup(&state, id).await?;
    Ok(Json(
        session.update_contact_field(request.field, request.value).await,
    ))
}

pub async fn submit_contact(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ContactView>, ApiError> {
    let session = lookup(&state, id).await?;
    Ok(Json(session.submit_contact().await?))
}

pub async fn snapshot(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionSnapshot>, ApiError> {
    let session = lookup(&state, id).await?;
    Ok(Json(session.snapshot().await))
}

pub async fn restore(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(snapshot): Json<SessionSnapshot>,
) -> Result<Json<SessionSnapshot>, ApiError> {
    let session = lookup(&state, id).await?;
    Ok(Json(session.restore(snapshot).await?))
}
