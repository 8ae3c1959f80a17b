use serde::Deserialize;
use talentgate_application::{ResourcePermissionFilter, UpsertResourcePermissionInput};
use talentgate_domain::{Action, ResourceType};

use super::*;

#[derive(Debug, Deserialize)]
pub struct ResourcePermissionQuery {
    pub user_id: Option<String>,
    pub resource_type: Option<String>,
    pub resource_id: Option<String>,
    pub action: Option<String>,
}

pub async fn upsert_resource_permission_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<ActorIdentity>,
    Json(payload): Json<UpsertResourcePermissionRequest>,
) -> ApiResult<(StatusCode, Json<ResourcePermissionResponse>)> {
    let user_id = parse_uuid(&payload.user_id, "user id")?;
    let resource_type = payload.resource_type.parse::<ResourceType>()?;
    let action = payload.action.parse::<Action>()?;

    let row = state
        .resource_permission_service
        .upsert(
            &actor,
            UpsertResourcePermissionInput {
                user_id,
                resource_type,
                resource_id: payload.resource_id,
                action,
                is_granted: payload.is_granted,
            },
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ResourcePermissionResponse::from(row)),
    ))
}

pub async fn list_resource_permissions_handler(
    State(state): State<AppState>,
    Query(query): Query<ResourcePermissionQuery>,
) -> ApiResult<Json<Vec<ResourcePermissionResponse>>> {
    let filter = ResourcePermissionFilter {
        user_id: query
            .user_id
            .as_deref()
            .map(|value| parse_uuid(value, "user id"))
            .transpose()?,
        resource_type: query
            .resource_type
            .as_deref()
            .map(str::parse::<ResourceType>)
            .transpose()?,
        resource_id: query.resource_id,
        action: query
            .action
            .as_deref()
            .map(str::parse::<Action>)
            .transpose()?,
    };

    let rows = state
        .resource_permission_service
        .list(filter)
        .await?
        .into_iter()
        .map(ResourcePermissionResponse::from)
        .collect();

    Ok(Json(rows))
}

pub async fn get_resource_permission_handler(
    State(state): State<AppState>,
    Path(permission_id): Path<String>,
) -> ApiResult<Json<ResourcePermissionResponse>> {
    let id = ResourcePermissionId::from_uuid(parse_uuid(&permission_id, "permission id")?);
    let row = state.resource_permission_service.get(id).await?;

    Ok(Json(ResourcePermissionResponse::from(row)))
}

pub async fn delete_resource_permission_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<ActorIdentity>,
    Path(permission_id): Path<String>,
) -> ApiResult<StatusCode> {
    let id = ResourcePermissionId::from_uuid(parse_uuid(&permission_id, "permission id")?);
    state.resource_permission_service.delete(&actor, id).await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete_resource_overrides_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<ActorIdentity>,
    Path((resource_type, resource_id)): Path<(String, String)>,
) -> ApiResult<Json<OverridePurgeResponse>> {
    let resource_type = resource_type.parse::<ResourceType>()?;
    let removed = state
        .resource_permission_service
        .delete_all_for_resource(&actor, resource_type, &resource_id)
        .await?;

    Ok(Json(OverridePurgeResponse { removed }))
}
