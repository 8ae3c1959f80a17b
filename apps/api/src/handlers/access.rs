use axum::Json;
use axum::extract::{Extension, Path, Query, State};
use axum::http::StatusCode;
use uuid::Uuid;

use talentgate_core::{ActorIdentity, AppError};
use talentgate_domain::{CustomRoleId, PermissionId, ResourcePermissionId};

use crate::dto::{
    AccessCheckRequest, AccessCheckResponse, AssignRoleRequest, CatalogBootstrapResponse,
    CreateCustomRoleRequest, CustomRoleResponse, OverridePurgeResponse, PermissionResponse,
    ResourcePermissionResponse, SetRoleUsersRequest, SetUserRolesRequest,
    UpdateCustomRoleRequest, UpsertResourcePermissionRequest,
};
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

mod catalog;
mod check;
mod overrides;
mod roles;

pub use catalog::{bootstrap_catalog_handler, list_catalog_handler};
pub use check::check_access_handler;
pub use overrides::{
    delete_resource_overrides_handler, delete_resource_permission_handler,
    get_resource_permission_handler, list_resource_permissions_handler,
    upsert_resource_permission_handler,
};
pub use roles::{
    assign_role_handler, create_role_handler, deactivate_role_handler, get_role_handler,
    list_role_permissions_handler, list_roles_handler, list_user_roles_handler,
    set_role_users_handler, set_user_roles_handler, update_role_handler,
};

fn parse_uuid(value: &str, field: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(value)
        .map_err(|error| AppError::Validation(format!("invalid {field}: {error}")).into())
}

fn parse_permission_ids(values: &[String]) -> Result<Vec<PermissionId>, ApiError> {
    values
        .iter()
        .map(|value| parse_uuid(value, "permission id").map(PermissionId::from_uuid))
        .collect()
}
