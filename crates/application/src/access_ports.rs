//! Repository ports consumed by the access-control services.

use async_trait::async_trait;
use talentgate_core::{AppResult, CompanyId, SystemRole};
use talentgate_domain::{
    Action, CustomRole, CustomRoleId, Permission, PermissionId, ResourcePermission,
    ResourcePermissionId, ResourceType, UserAccessProfile,
};
use uuid::Uuid;

/// One seeded role-map row linking a system role to a catalog pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SystemRoleGrant {
    /// The system role receiving the grant.
    pub role: SystemRole,
    /// The granted action.
    pub action: Action,
    /// The resource type the grant applies to.
    pub resource_type: ResourceType,
}

/// Write payload for a resource-level override upsert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourcePermissionUpsert {
    /// The user the override applies to.
    pub user_id: Uuid,
    /// Resource type of the concrete instance.
    pub resource_type: ResourceType,
    /// Identifier of the concrete instance.
    pub resource_id: String,
    /// The single action the override covers.
    pub action: Action,
    /// Grant when true, authoritative denial when false.
    pub is_granted: bool,
}

/// Optional filters for override listings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourcePermissionFilter {
    /// Restrict to one user.
    pub user_id: Option<Uuid>,
    /// Restrict to one resource type.
    pub resource_type: Option<ResourceType>,
    /// Restrict to one resource instance.
    pub resource_id: Option<String>,
    /// Restrict to one action.
    pub action: Option<Action>,
}

/// Port resolving user identifiers to the attributes the engine reads.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Returns the access profile for a user, or `None` for unknown ids.
    async fn find_access_profile(&self, user_id: Uuid) -> AppResult<Option<UserAccessProfile>>;
}

/// Port for the global permission catalog and the system-role map.
#[async_trait]
pub trait PermissionCatalogRepository: Send + Sync {
    /// Returns the number of catalog rows; the bootstrap idempotence guard.
    async fn count_permissions(&self) -> AppResult<u64>;

    /// Inserts the catalog and the derived role-map rows in one transaction.
    async fn seed(
        &self,
        catalog: &[Permission],
        role_grants: &[SystemRoleGrant],
    ) -> AppResult<()>;

    /// Lists the full catalog.
    async fn list_permissions(&self) -> AppResult<Vec<Permission>>;

    /// Returns the catalog entries matching the given ids.
    async fn find_permissions_by_ids(&self, ids: &[PermissionId]) -> AppResult<Vec<Permission>>;

    /// Returns the role-map actions for one `(role, resource_type)` pair.
    async fn list_role_actions(
        &self,
        role: SystemRole,
        resource_type: ResourceType,
    ) -> AppResult<Vec<Action>>;
}

/// Port for tenant-scoped custom roles, their grants, and their assignments.
#[async_trait]
pub trait CustomRoleRepository: Send + Sync {
    /// Inserts a role and its initial permission links atomically.
    async fn create(&self, role: &CustomRole, permission_ids: &[PermissionId]) -> AppResult<()>;

    /// Finds a role by id, active or not.
    async fn find(&self, role_id: CustomRoleId) -> AppResult<Option<CustomRole>>;

    /// Lists active roles of a company, sorted by name.
    async fn list_active_by_company(&self, company_id: CompanyId) -> AppResult<Vec<CustomRole>>;

    /// Updates name/description and replaces the permission set atomically.
    async fn update(
        &self,
        role_id: CustomRoleId,
        name: &str,
        description: &str,
        permission_ids: &[PermissionId],
    ) -> AppResult<()>;

    /// Flips `is_active` to false; link rows stay in place.
    async fn deactivate(&self, role_id: CustomRoleId) -> AppResult<()>;

    /// Returns exactly the permissions currently linked to the role.
    async fn list_permissions_for_role(&self, role_id: CustomRoleId)
    -> AppResult<Vec<Permission>>;

    /// Links one role to one user; a no-op when the link already exists.
    async fn assign_role_to_user(&self, user_id: Uuid, role_id: CustomRoleId) -> AppResult<()>;

    /// Replaces the user's role links with exactly the given set, atomically.
    async fn set_user_roles(&self, user_id: Uuid, role_ids: &[CustomRoleId]) -> AppResult<()>;

    /// Replaces the role's user links with exactly the given set, atomically.
    async fn set_role_users(&self, role_id: CustomRoleId, user_ids: &[Uuid]) -> AppResult<()>;

    /// Lists the user's assigned roles, active ones only.
    async fn list_active_roles_for_user(&self, user_id: Uuid) -> AppResult<Vec<CustomRole>>;

    /// Returns the actions granted to a user on a resource type through
    /// active custom roles.
    async fn list_user_actions(
        &self,
        user_id: Uuid,
        resource_type: ResourceType,
    ) -> AppResult<Vec<Action>>;
}

/// Port for per-user, per-instance permission overrides.
#[async_trait]
pub trait ResourcePermissionRepository: Send + Sync {
    /// Inserts or overwrites the row for the override's four-part key.
    async fn upsert(&self, input: ResourcePermissionUpsert) -> AppResult<ResourcePermission>;

    /// Point lookup of the exact `(user, type, instance, action)` tuple.
    async fn find_override(
        &self,
        user_id: Uuid,
        resource_type: ResourceType,
        resource_id: &str,
        action: Action,
    ) -> AppResult<Option<ResourcePermission>>;

    /// Finds an override by id.
    async fn find(&self, id: ResourcePermissionId) -> AppResult<Option<ResourcePermission>>;

    /// Lists overrides matching the filter.
    async fn list(&self, filter: ResourcePermissionFilter) -> AppResult<Vec<ResourcePermission>>;

    /// Deletes one override by id; `NotFound` when absent.
    async fn delete(&self, id: ResourcePermissionId) -> AppResult<()>;

    /// Deletes every override for one resource instance, returning the count.
    async fn delete_all_for_resource(
        &self,
        resource_type: ResourceType,
        resource_id: &str,
    ) -> AppResult<u64>;
}
