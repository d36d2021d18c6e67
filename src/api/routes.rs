//! API route handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Extension, Json,
};
use serde::Serialize;

use super::extract::{parse_id, ValidJson};
use super::server::SharedState;
use crate::auth::{JwtResponse, LoginRequest, MessageResponse, SignupRequest, UserPrincipal};
use crate::dto::{SessionDto, TeacherDto, UserDto};
use crate::error::{Error, Result};
use crate::models::User;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

// Health check

pub async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
    })
}

// Auth routes

pub async fn login(
    State(state): State<SharedState>,
    ValidJson(req): ValidJson<LoginRequest>,
) -> Result<Json<JwtResponse>> {
    let bad_credentials = || Error::Unauthorized("Bad credentials".to_string());

    let principal = match state.user_details.load_user_by_username(&req.email).await {
        Ok(principal) => principal,
        Err(Error::UsernameNotFound(email)) => {
            tracing::debug!("Login attempt for unknown user {}", email);
            return Err(bad_credentials());
        }
        Err(e) => return Err(e),
    };

    if !state.passwords.matches(&req.password, &principal.password).await? {
        tracing::debug!("Wrong password for {}", principal.username);
        return Err(bad_credentials());
    }

    let token = state.jwt.generate_token(&principal)?;
    tracing::info!("User {} logged in", principal.username);

    Ok(Json(JwtResponse::new(token, &principal)))
}

pub async fn register(
    State(state): State<SharedState>,
    ValidJson(req): ValidJson<SignupRequest>,
) -> Result<Response> {
    if state.users.exists_by_email(&req.email).await? {
        return Ok((
            StatusCode::BAD_REQUEST,
            Json(MessageResponse::new("Error: Email is already taken!")),
        )
            .into_response());
    }

    let hash = state.passwords.encode(&req.password).await?;
    state
        .users
        .create(User::new(req.email, req.last_name, req.first_name, hash, false))
        .await?;

    Ok(Json(MessageResponse::new("User registered successfully!")).into_response())
}

// Session routes

/// Unknown teachers resolve to no teacher
async fn resolve_teacher(state: &SharedState, teacher_id: Option<i64>) -> Result<Option<i64>> {
    match teacher_id {
        Some(id) => Ok(state.teachers.find_by_id(id).await?.and_then(|t| t.id)),
        None => Ok(None),
    }
}

pub async fn list_sessions(State(state): State<SharedState>) -> Result<Json<Vec<SessionDto>>> {
    let sessions = state.sessions.find_all().await?;
    Ok(Json(sessions.iter().map(SessionDto::from).collect()))
}

pub async fn get_session(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<SessionDto>> {
    let id = parse_id(&id)?;
    let session = state
        .sessions
        .get_by_id(id)
        .await?
        .ok_or_else(|| Error::NotFound(format!("Session {} not found", id)))?;

    Ok(Json(SessionDto::from(&session)))
}

pub async fn create_session(
    State(state): State<SharedState>,
    ValidJson(dto): ValidJson<SessionDto>,
) -> Result<Json<SessionDto>> {
    tracing::debug!("Creating session {:?}", dto.name);
    let teacher_id = resolve_teacher(&state, dto.teacher_id).await?;
    let session = state.sessions.create(dto.into_entity(teacher_id)?).await?;

    Ok(Json(SessionDto::from(&session)))
}

pub async fn update_session(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    ValidJson(dto): ValidJson<SessionDto>,
) -> Result<Json<SessionDto>> {
    let id = parse_id(&id)?;
    let teacher_id = resolve_teacher(&state, dto.teacher_id).await?;
    let session = state.sessions.update(id, dto.into_entity(teacher_id)?).await?;

    Ok(Json(SessionDto::from(&session)))
}

pub async fn delete_session(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    let id = parse_id(&id)?;
    state.sessions.delete(id).await?;
    Ok(StatusCode::OK)
}

pub async fn participate(
    State(state): State<SharedState>,
    Path((id, user_id)): Path<(String, String)>,
) -> Result<StatusCode> {
    let (id, user_id) = (parse_id(&id)?, parse_id(&user_id)?);
    state.sessions.participate(id, user_id).await?;
    Ok(StatusCode::OK)
}

pub async fn no_longer_participate(
    State(state): State<SharedState>,
    Path((id, user_id)): Path<(String, String)>,
) -> Result<StatusCode> {
    let (id, user_id) = (parse_id(&id)?, parse_id(&user_id)?);
    state.sessions.no_longer_participate(id, user_id).await?;
    Ok(StatusCode::OK)
}

// Teacher routes

pub async fn list_teachers(State(state): State<SharedState>) -> Result<Json<Vec<TeacherDto>>> {
    let teachers = state.teachers.find_all().await?;
    Ok(Json(teachers.iter().map(TeacherDto::from).collect()))
}

pub async fn get_teacher(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<TeacherDto>> {
    let id = parse_id(&id)?;
    let teacher = state
        .teachers
        .find_by_id(id)
        .await?
        .ok_or_else(|| Error::NotFound(format!("Teacher {} not found", id)))?;

    Ok(Json(TeacherDto::from(&teacher)))
}

// User routes

pub async fn get_user(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<UserDto>> {
    let id = parse_id(&id)?;
    let user = state
        .users
        .find_by_id(id)
        .await?
        .ok_or_else(|| Error::NotFound(format!("User {} not found", id)))?;

    Ok(Json(UserDto::from(&user)))
}

/// Users may only delete their own account
pub async fn delete_user(
    State(state): State<SharedState>,
    Extension(principal): Extension<UserPrincipal>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    let id = parse_id(&id)?;
    let user = state
        .users
        .find_by_id(id)
        .await?
        .ok_or_else(|| Error::NotFound(format!("User {} not found", id)))?;

    if principal.username != user.email {
        tracing::warn!("{} tried to delete user {}", principal.username, id);
        return Err(Error::Unauthorized(
            "You can only delete your own account".to_string(),
        ));
    }

    state.users.delete(id).await?;
    Ok(StatusCode::OK)
}
