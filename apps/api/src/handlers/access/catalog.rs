use talentgate_application::AuditEvent;
use talentgate_domain::AuditAction;

use super::*;

pub async fn list_catalog_handler(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<PermissionResponse>>> {
    let permissions = state
        .catalog_service
        .list_catalog()
        .await?
        .into_iter()
        .map(PermissionResponse::from)
        .collect();

    Ok(Json(permissions))
}

pub async fn bootstrap_catalog_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<ActorIdentity>,
) -> ApiResult<Json<CatalogBootstrapResponse>> {
    let seeded = state.catalog_service.bootstrap().await?;

    if seeded {
        state
            .audit_repository
            .append_event(AuditEvent {
                company_id: actor.company_id(),
                actor_user_id: actor.user_id(),
                action: AuditAction::CatalogSeeded,
                resource_type: "permission_catalog".to_owned(),
                resource_id: "default".to_owned(),
                detail: None,
            })
            .await?;
    }

    Ok(Json(CatalogBootstrapResponse { seeded }))
}
