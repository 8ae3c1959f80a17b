use talentgate_application::{CreateCustomRoleInput, UpdateCustomRoleInput};
use talentgate_core::CompanyId;

use super::*;

pub async fn list_roles_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<ActorIdentity>,
) -> ApiResult<Json<Vec<CustomRoleResponse>>> {
    let roles = state
        .custom_role_service
        .list(&actor)
        .await?
        .into_iter()
        .map(CustomRoleResponse::from)
        .collect();

    Ok(Json(roles))
}

pub async fn create_role_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<ActorIdentity>,
    Json(payload): Json<CreateCustomRoleRequest>,
) -> ApiResult<(StatusCode, Json<CustomRoleResponse>)> {
    let company_id = payload
        .company_id
        .as_deref()
        .map(|value| parse_uuid(value, "company id").map(CompanyId::from_uuid))
        .transpose()?;
    let permission_ids = parse_permission_ids(&payload.permission_ids)?;

    let role = state
        .custom_role_service
        .create(
            &actor,
            CreateCustomRoleInput {
                name: payload.name,
                description: payload.description.unwrap_or_default(),
                company_id,
                permission_ids,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(CustomRoleResponse::from(role))))
}

pub async fn get_role_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<ActorIdentity>,
    Path(role_id): Path<String>,
) -> ApiResult<Json<CustomRoleResponse>> {
    let role_id = CustomRoleId::from_uuid(parse_uuid(&role_id, "role id")?);
    let role = state.custom_role_service.get(&actor, role_id).await?;

    Ok(Json(CustomRoleResponse::from(role)))
}

pub async fn update_role_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<ActorIdentity>,
    Path(role_id): Path<String>,
    Json(payload): Json<UpdateCustomRoleRequest>,
) -> ApiResult<Json<CustomRoleResponse>> {
    let role_id = CustomRoleId::from_uuid(parse_uuid(&role_id, "role id")?);
    let permission_ids = parse_permission_ids(&payload.permission_ids)?;

    let role = state
        .custom_role_service
        .update(
            &actor,
            role_id,
            UpdateCustomRoleInput {
                name: payload.name,
                description: payload.description.unwrap_or_default(),
                permission_ids,
            },
        )
        .await?;

    Ok(Json(CustomRoleResponse::from(role)))
}

pub async fn deactivate_role_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<ActorIdentity>,
    Path(role_id): Path<String>,
) -> ApiResult<StatusCode> {
    let role_id = CustomRoleId::from_uuid(parse_uuid(&role_id, "role id")?);
    state.custom_role_service.deactivate(&actor, role_id).await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_role_permissions_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<ActorIdentity>,
    Path(role_id): Path<String>,
) -> ApiResult<Json<Vec<PermissionResponse>>> {
    let role_id = CustomRoleId::from_uuid(parse_uuid(&role_id, "role id")?);
    let permissions = state
        .custom_role_service
        .permissions_of(&actor, role_id)
        .await?
        .into_iter()
        .map(PermissionResponse::from)
        .collect();

    Ok(Json(permissions))
}

pub async fn assign_role_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<ActorIdentity>,
    Json(payload): Json<AssignRoleRequest>,
) -> ApiResult<StatusCode> {
    let user_id = parse_uuid(&payload.user_id, "user id")?;
    let role_id = CustomRoleId::from_uuid(parse_uuid(&payload.role_id, "role id")?);

    state
        .custom_role_service
        .assign(&actor, user_id, role_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn set_role_users_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<ActorIdentity>,
    Path(role_id): Path<String>,
    Json(payload): Json<SetRoleUsersRequest>,
) -> ApiResult<StatusCode> {
    let role_id = CustomRoleId::from_uuid(parse_uuid(&role_id, "role id")?);
    let user_ids = payload
        .user_ids
        .iter()
        .map(|value| parse_uuid(value, "user id"))
        .collect::<Result<Vec<_>, _>>()?;

    state
        .custom_role_service
        .set_role_users(&actor, role_id, user_ids)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn set_user_roles_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<ActorIdentity>,
    Path(user_id): Path<String>,
    Json(payload): Json<SetUserRolesRequest>,
) -> ApiResult<StatusCode> {
    let user_id = parse_uuid(&user_id, "user id")?;
    let role_ids = payload
        .role_ids
        .iter()
        .map(|value| parse_uuid(value, "role id").map(CustomRoleId::from_uuid))
        .collect::<Result<Vec<_>, _>>()?;

    state
        .custom_role_service
        .set_user_roles(&actor, user_id, role_ids)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_user_roles_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<ActorIdentity>,
    Path(user_id): Path<String>,
) -> ApiResult<Json<Vec<CustomRoleResponse>>> {
    let user_id = parse_uuid(&user_id, "user id")?;
    let roles = state
        .custom_role_service
        .roles_of_user(&actor, user_id)
        .await?
        .into_iter()
        .map(CustomRoleResponse::from)
        .collect();

    Ok(Json(roles))
}
