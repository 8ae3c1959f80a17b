use serde::{Deserialize, Serialize};
use talentgate_core::ActorIdentity;
use talentgate_domain::{CustomRole, Permission, ResourcePermission};
use ts_rs::TS;

/// Health response payload.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/health-response.ts"
)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// API representation of a catalog permission.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/permission-response.ts"
)]
pub struct PermissionResponse {
    pub permission_id: String,
    pub action: String,
    pub resource_type: String,
    pub name: String,
    pub description: String,
}

/// Outcome of a catalog bootstrap request.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/catalog-bootstrap-response.ts"
)]
pub struct CatalogBootstrapResponse {
    pub seeded: bool,
}

/// Incoming payload for custom role creation.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/create-custom-role-request.ts"
)]
pub struct CreateCustomRoleRequest {
    pub name: String,
    pub description: Option<String>,
    pub company_id: Option<String>,
    pub permission_ids: Vec<String>,
}

/// Incoming payload for custom role updates.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/update-custom-role-request.ts"
)]
pub struct UpdateCustomRoleRequest {
    pub name: String,
    pub description: Option<String>,
    pub permission_ids: Vec<String>,
}

/// API representation of a custom role.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/custom-role-response.ts"
)]
pub struct CustomRoleResponse {
    pub role_id: String,
    pub company_id: String,
    pub name: String,
    pub description: String,
    pub is_active: bool,
}

/// Incoming payload for a single role assignment.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/assign-role-request.ts"
)]
pub struct AssignRoleRequest {
    pub user_id: String,
    pub role_id: String,
}

/// Incoming payload replacing a role's member set.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/set-role-users-request.ts"
)]
pub struct SetRoleUsersRequest {
    pub user_ids: Vec<String>,
}

/// Incoming payload replacing a user's role set.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/set-user-roles-request.ts"
)]
pub struct SetUserRolesRequest {
    pub role_ids: Vec<String>,
}

/// Incoming payload for a per-instance override.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/upsert-resource-permission-request.ts"
)]
pub struct UpsertResourcePermissionRequest {
    pub user_id: String,
    pub resource_type: String,
    pub resource_id: String,
    pub action: String,
    pub is_granted: Option<bool>,
}

/// API representation of a per-instance override.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/resource-permission-response.ts"
)]
pub struct ResourcePermissionResponse {
    pub permission_id: String,
    pub user_id: String,
    pub resource_type: String,
    pub resource_id: String,
    pub action: String,
    pub is_granted: bool,
    pub updated_at: String,
}

/// Outcome of purging every override on a resource instance.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/override-purge-response.ts"
)]
pub struct OverridePurgeResponse {
    #[ts(type = "number")]
    pub removed: u64,
}

/// Incoming payload for an access probe.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/access-check-request.ts"
)]
pub struct AccessCheckRequest {
    pub user_id: String,
    pub action: String,
    pub resource_type: String,
    pub resource_id: Option<String>,
}

/// Outcome of an access probe.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/access-check-response.ts"
)]
pub struct AccessCheckResponse {
    pub decision: String,
    pub granted: bool,
}

/// API representation of the session's actor.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/actor-identity-response.ts"
)]
pub struct ActorIdentityResponse {
    pub user_id: String,
    pub system_role: String,
    pub is_super_admin: bool,
    pub is_company_admin: bool,
    pub company_id: String,
}

impl From<Permission> for PermissionResponse {
    fn from(value: Permission) -> Self {
        Self {
            permission_id: value.id.to_string(),
            action: value.action.as_str().to_owned(),
            resource_type: value.resource_type.as_str().to_owned(),
            name: value.name,
            description: value.description,
        }
    }
}

impl From<CustomRole> for CustomRoleResponse {
    fn from(value: CustomRole) -> Self {
        Self {
            role_id: value.id.to_string(),
            company_id: value.company_id.to_string(),
            name: value.name,
            description: value.description,
            is_active: value.is_active,
        }
    }
}

impl From<ResourcePermission> for ResourcePermissionResponse {
    fn from(value: ResourcePermission) -> Self {
        Self {
            permission_id: value.id.to_string(),
            user_id: value.user_id.to_string(),
            resource_type: value.resource_type.as_str().to_owned(),
            resource_id: value.resource_id,
            action: value.action.as_str().to_owned(),
            is_granted: value.is_granted,
            updated_at: value.updated_at.to_rfc3339(),
        }
    }
}

impl From<ActorIdentity> for ActorIdentityResponse {
    fn from(value: ActorIdentity) -> Self {
        Self {
            user_id: value.user_id().to_string(),
            system_role: value.system_role().as_str().to_owned(),
            is_super_admin: value.is_super_admin(),
            is_company_admin: value.is_company_admin(),
            company_id: value.company_id().to_string(),
        }
    }
}
