use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;
use talentgate_core::{ActorIdentity, AppError};
use tower_sessions::Session;
use uuid::Uuid;

use crate::dto::ActorIdentityResponse;
use crate::error::ApiResult;
use crate::state::AppState;

pub const SESSION_USER_KEY: &str = "actor_identity";

#[derive(Debug, Deserialize)]
pub struct BootstrapRequest {
    pub user_id: Uuid,
    pub token: String,
}

/// Establishes a session for an already-provisioned user.
///
/// Credential verification lives upstream; this endpoint trusts a shared
/// bootstrap token and only resolves the user's access profile.
pub async fn bootstrap_handler(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<BootstrapRequest>,
) -> ApiResult<StatusCode> {
    if payload.token != state.bootstrap_token {
        return Err(AppError::Unauthorized("invalid bootstrap token".to_owned()).into());
    }

    let profile = state
        .user_directory
        .find_access_profile(payload.user_id)
        .await?
        .ok_or_else(|| {
            AppError::Unauthorized(format!("user '{}' is not provisioned", payload.user_id))
        })?;

    let identity = ActorIdentity::new(
        profile.user_id,
        profile.system_role,
        profile.is_super_admin,
        profile.is_company_admin,
        profile.company_id,
    );

    session
        .cycle_id()
        .await
        .map_err(|error| AppError::Internal(format!("failed to cycle session id: {error}")))?;

    session
        .insert(SESSION_USER_KEY, &identity)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to persist session identity: {error}"))
        })?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn me_handler(session: Session) -> ApiResult<Json<ActorIdentityResponse>> {
    let identity = session
        .get::<ActorIdentity>(SESSION_USER_KEY)
        .await
        .map_err(|error| AppError::Internal(format!("failed to read session identity: {error}")))?
        .ok_or_else(|| AppError::Unauthorized("authentication required".to_owned()))?;

    Ok(Json(ActorIdentityResponse::from(identity)))
}

pub async fn logout_handler(session: Session) -> ApiResult<StatusCode> {
    session
        .delete()
        .await
        .map_err(|error| AppError::Internal(format!("failed to delete session: {error}")))?;

    Ok(StatusCode::NO_CONTENT)
}
