use axum::extract::{Extension, Request, State};
use axum::http::{HeaderMap, header};
use axum::middleware::Next;
use axum::response::Response;
use talentgate_core::{ActorIdentity, AppError};
use talentgate_domain::{Action, ResourceType};
use tower_sessions::Session;

use crate::auth::SESSION_USER_KEY;
use crate::error::ApiResult;
use crate::state::AppState;

/// Access requirement attached to a route group.
///
/// Routes carrying this extension are gated by `enforce_access` before the
/// handler runs; the handler itself never re-checks the route-level rule.
#[derive(Debug, Clone, Copy)]
pub struct RequiredAccess {
    pub action: Action,
    pub resource_type: ResourceType,
}

impl RequiredAccess {
    pub fn new(action: Action, resource_type: ResourceType) -> Self {
        Self {
            action,
            resource_type,
        }
    }
}

pub async fn require_auth(
    session: Session,
    mut request: Request,
    next: Next,
) -> ApiResult<Response> {
    let identity = session
        .get::<ActorIdentity>(SESSION_USER_KEY)
        .await
        .map_err(|error| AppError::Internal(format!("failed to read session identity: {error}")))?
        .ok_or_else(|| AppError::Unauthorized("authentication required".to_owned()))?;

    request.extensions_mut().insert(identity);
    Ok(next.run(request).await)
}

pub async fn enforce_access(
    State(state): State<AppState>,
    Extension(required): Extension<RequiredAccess>,
    Extension(actor): Extension<ActorIdentity>,
    request: Request,
    next: Next,
) -> ApiResult<Response> {
    state
        .authorization_service
        .require(
            actor.user_id(),
            required.action,
            required.resource_type,
            None,
        )
        .await?;

    Ok(next.run(request).await)
}

/// Rejects mutating requests whose headers do not tie them to the frontend.
///
/// Safe methods pass through untouched so cached GETs and health checks are
/// never affected by the browser's header behavior.
pub async fn require_same_origin_for_mutations(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> ApiResult<Response> {
    if request.method().is_safe() {
        return Ok(next.run(request).await);
    }

    check_mutation_origin(request.headers(), state.frontend_url.as_str())?;
    Ok(next.run(request).await)
}

fn check_mutation_origin(headers: &HeaderMap, trusted_origin: &str) -> Result<(), AppError> {
    let fetch_site = headers
        .get("sec-fetch-site")
        .and_then(|value| value.to_str().ok());
    if fetch_site == Some("cross-site") {
        return Err(AppError::Unauthorized(
            "mutation rejected: cross-site fetch metadata".to_owned(),
        ));
    }

    let origin_matches =
        header_text(headers, header::ORIGIN).is_some_and(|origin| origin == trusted_origin);
    let referer_matches = header_text(headers, header::REFERER)
        .is_some_and(|referer| referer.starts_with(trusted_origin));

    if origin_matches || referer_matches {
        Ok(())
    } else {
        Err(AppError::Unauthorized(
            "mutation rejected: request origin is not trusted".to_owned(),
        ))
    }
}

fn header_text(headers: &HeaderMap, name: header::HeaderName) -> Option<&str> {
    headers.get(name).and_then(|value| value.to_str().ok())
}
