//! In-memory port implementations shared by the service tests.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use chrono::Utc;
use talentgate_core::{AppError, AppResult, CompanyId, SystemRole};
use talentgate_domain::{
    Action, CustomRole, CustomRoleId, Permission, PermissionId, ResourcePermission,
    ResourcePermissionId, ResourceType, UserAccessProfile,
};
use uuid::Uuid;

use crate::access_ports::{
    CustomRoleRepository, PermissionCatalogRepository, ResourcePermissionFilter,
    ResourcePermissionRepository, ResourcePermissionUpsert, SystemRoleGrant, UserDirectory,
};
use crate::audit::{AuditEvent, AuditRepository};

pub(crate) fn profile(
    user_id: Uuid,
    system_role: SystemRole,
    is_super_admin: bool,
    is_company_admin: bool,
    company_id: CompanyId,
) -> UserAccessProfile {
    UserAccessProfile {
        user_id,
        system_role,
        is_super_admin,
        is_company_admin,
        company_id,
    }
}

pub(crate) fn catalog_permission(action: Action, resource_type: ResourceType) -> Permission {
    Permission {
        id: PermissionId::new(),
        action,
        resource_type,
        name: format!("{} {}", action.as_str(), resource_type.as_str()),
        description: String::new(),
    }
}

pub(crate) fn custom_role(company_id: CompanyId, name: &str, is_active: bool) -> CustomRole {
    CustomRole {
        id: CustomRoleId::new(),
        company_id,
        name: name.to_owned(),
        description: String::new(),
        is_active,
    }
}

fn locked<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[derive(Default)]
pub(crate) struct InMemoryUserDirectory {
    users: Mutex<HashMap<Uuid, UserAccessProfile>>,
}

impl InMemoryUserDirectory {
    pub(crate) fn insert(&self, profile: UserAccessProfile) {
        locked(&self.users).insert(profile.user_id, profile);
    }
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn find_access_profile(&self, user_id: Uuid) -> AppResult<Option<UserAccessProfile>> {
        Ok(locked(&self.users).get(&user_id).copied())
    }
}

#[derive(Default)]
pub(crate) struct InMemoryPermissionCatalog {
    permissions: Mutex<Vec<Permission>>,
    role_grants: Mutex<Vec<SystemRoleGrant>>,
}

impl InMemoryPermissionCatalog {
    pub(crate) fn grant_role(&self, role: SystemRole, action: Action, resource_type: ResourceType) {
        locked(&self.role_grants).push(SystemRoleGrant {
            role,
            action,
            resource_type,
        });
    }

    pub(crate) fn add_permission(&self, permission: Permission) {
        locked(&self.permissions).push(permission);
    }
}

#[async_trait]
impl PermissionCatalogRepository for InMemoryPermissionCatalog {
    async fn count_permissions(&self) -> AppResult<u64> {
        Ok(locked(&self.permissions).len() as u64)
    }

    async fn seed(
        &self,
        catalog: &[Permission],
        role_grants: &[SystemRoleGrant],
    ) -> AppResult<()> {
        locked(&self.permissions).extend_from_slice(catalog);
        locked(&self.role_grants).extend_from_slice(role_grants);
        Ok(())
    }

    async fn list_permissions(&self) -> AppResult<Vec<Permission>> {
        Ok(locked(&self.permissions).clone())
    }

    async fn find_permissions_by_ids(&self, ids: &[PermissionId]) -> AppResult<Vec<Permission>> {
        Ok(locked(&self.permissions)
            .iter()
            .filter(|permission| ids.contains(&permission.id))
            .cloned()
            .collect())
    }

    async fn list_role_actions(
        &self,
        role: SystemRole,
        resource_type: ResourceType,
    ) -> AppResult<Vec<Action>> {
        Ok(locked(&self.role_grants)
            .iter()
            .filter(|grant| grant.role == role && grant.resource_type == resource_type)
            .map(|grant| grant.action)
            .collect())
    }
}

#[derive(Default)]
pub(crate) struct InMemoryCustomRoles {
    roles: Mutex<HashMap<CustomRoleId, CustomRole>>,
    links: Mutex<HashMap<CustomRoleId, Vec<PermissionId>>>,
    assignments: Mutex<Vec<(Uuid, CustomRoleId)>>,
    known_permissions: Mutex<HashMap<PermissionId, Permission>>,
}

impl InMemoryCustomRoles {
    pub(crate) fn register_permission(&self, permission: &Permission) {
        locked(&self.known_permissions).insert(permission.id, permission.clone());
    }

    pub(crate) fn has_link(&self, user_id: Uuid, role_id: CustomRoleId) -> bool {
        locked(&self.assignments)
            .iter()
            .any(|(linked_user, linked_role)| *linked_user == user_id && *linked_role == role_id)
    }
}

#[async_trait]
impl CustomRoleRepository for InMemoryCustomRoles {
    async fn create(&self, role: &CustomRole, permission_ids: &[PermissionId]) -> AppResult<()> {
        locked(&self.roles).insert(role.id, role.clone());
        locked(&self.links).insert(role.id, permission_ids.to_vec());
        Ok(())
    }

    async fn find(&self, role_id: CustomRoleId) -> AppResult<Option<CustomRole>> {
        Ok(locked(&self.roles).get(&role_id).cloned())
    }

    async fn list_active_by_company(&self, company_id: CompanyId) -> AppResult<Vec<CustomRole>> {
        let mut roles: Vec<_> = locked(&self.roles)
            .values()
            .filter(|role| role.company_id == company_id && role.is_active)
            .cloned()
            .collect();
        roles.sort_by(|left, right| left.name.cmp(&right.name));
        Ok(roles)
    }

    async fn update(
        &self,
        role_id: CustomRoleId,
        name: &str,
        description: &str,
        permission_ids: &[PermissionId],
    ) -> AppResult<()> {
        let mut roles = locked(&self.roles);
        let role = roles
            .get_mut(&role_id)
            .ok_or_else(|| AppError::NotFound(format!("custom role '{role_id}' was not found")))?;
        role.name = name.to_owned();
        role.description = description.to_owned();
        locked(&self.links).insert(role_id, permission_ids.to_vec());
        Ok(())
    }

    async fn deactivate(&self, role_id: CustomRoleId) -> AppResult<()> {
        let mut roles = locked(&self.roles);
        let role = roles
            .get_mut(&role_id)
            .ok_or_else(|| AppError::NotFound(format!("custom role '{role_id}' was not found")))?;
        role.is_active = false;
        Ok(())
    }

    async fn list_permissions_for_role(
        &self,
        role_id: CustomRoleId,
    ) -> AppResult<Vec<Permission>> {
        let known = locked(&self.known_permissions);
        Ok(locked(&self.links)
            .get(&role_id)
            .map(|ids| {
                ids.iter()
                    .filter_map(|id| known.get(id).cloned())
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn assign_role_to_user(&self, user_id: Uuid, role_id: CustomRoleId) -> AppResult<()> {
        let mut assignments = locked(&self.assignments);
        if !assignments
            .iter()
            .any(|(linked_user, linked_role)| *linked_user == user_id && *linked_role == role_id)
        {
            assignments.push((user_id, role_id));
        }
        Ok(())
    }

    async fn set_user_roles(&self, user_id: Uuid, role_ids: &[CustomRoleId]) -> AppResult<()> {
        let mut assignments = locked(&self.assignments);
        assignments.retain(|(linked_user, _)| *linked_user != user_id);
        assignments.extend(role_ids.iter().map(|role_id| (user_id, *role_id)));
        Ok(())
    }

    async fn set_role_users(&self, role_id: CustomRoleId, user_ids: &[Uuid]) -> AppResult<()> {
        let mut assignments = locked(&self.assignments);
        assignments.retain(|(_, linked_role)| *linked_role != role_id);
        assignments.extend(user_ids.iter().map(|user_id| (*user_id, role_id)));
        Ok(())
    }

    async fn list_active_roles_for_user(&self, user_id: Uuid) -> AppResult<Vec<CustomRole>> {
        let roles = locked(&self.roles);
        let mut assigned: Vec<_> = locked(&self.assignments)
            .iter()
            .filter(|(linked_user, _)| *linked_user == user_id)
            .filter_map(|(_, role_id)| roles.get(role_id))
            .filter(|role| role.is_active)
            .cloned()
            .collect();
        assigned.sort_by(|left, right| left.name.cmp(&right.name));
        Ok(assigned)
    }

    async fn list_user_actions(
        &self,
        user_id: Uuid,
        resource_type: ResourceType,
    ) -> AppResult<Vec<Action>> {
        let active_roles = self.list_active_roles_for_user(user_id).await?;
        let links = locked(&self.links);
        let known = locked(&self.known_permissions);

        let mut actions = Vec::new();
        for role in active_roles {
            let Some(ids) = links.get(&role.id) else {
                continue;
            };
            for id in ids {
                if let Some(permission) = known.get(id)
                    && permission.resource_type == resource_type
                {
                    actions.push(permission.action);
                }
            }
        }

        Ok(actions)
    }
}

#[derive(Default)]
pub(crate) struct InMemoryOverrides {
    rows: Mutex<Vec<ResourcePermission>>,
}

impl InMemoryOverrides {
    pub(crate) fn put(&self, input: ResourcePermissionUpsert) {
        let mut rows = locked(&self.rows);
        if let Some(row) = rows.iter_mut().find(|row| {
            row.user_id == input.user_id
                && row.resource_type == input.resource_type
                && row.resource_id == input.resource_id
                && row.action == input.action
        }) {
            row.is_granted = input.is_granted;
            row.updated_at = Utc::now();
        } else {
            rows.push(ResourcePermission {
                id: ResourcePermissionId::new(),
                user_id: input.user_id,
                resource_type: input.resource_type,
                resource_id: input.resource_id,
                action: input.action,
                is_granted: input.is_granted,
                updated_at: Utc::now(),
            });
        }
    }

    pub(crate) fn row_count(&self) -> usize {
        locked(&self.rows).len()
    }
}

#[async_trait]
impl ResourcePermissionRepository for InMemoryOverrides {
    async fn upsert(&self, input: ResourcePermissionUpsert) -> AppResult<ResourcePermission> {
        self.put(input.clone());
        let rows = locked(&self.rows);
        rows.iter()
            .find(|row| {
                row.user_id == input.user_id
                    && row.resource_type == input.resource_type
                    && row.resource_id == input.resource_id
                    && row.action == input.action
            })
            .cloned()
            .ok_or_else(|| AppError::Internal("upserted row vanished".to_owned()))
    }

    async fn find_override(
        &self,
        user_id: Uuid,
        resource_type: ResourceType,
        resource_id: &str,
        action: Action,
    ) -> AppResult<Option<ResourcePermission>> {
        Ok(locked(&self.rows)
            .iter()
            .find(|row| {
                row.user_id == user_id
                    && row.resource_type == resource_type
                    && row.resource_id == resource_id
                    && row.action == action
            })
            .cloned())
    }

    async fn find(&self, id: ResourcePermissionId) -> AppResult<Option<ResourcePermission>> {
        Ok(locked(&self.rows).iter().find(|row| row.id == id).cloned())
    }

    async fn list(&self, filter: ResourcePermissionFilter) -> AppResult<Vec<ResourcePermission>> {
        Ok(locked(&self.rows)
            .iter()
            .filter(|row| {
                filter.user_id.is_none_or(|user_id| row.user_id == user_id)
                    && filter
                        .resource_type
                        .is_none_or(|resource_type| row.resource_type == resource_type)
                    && filter
                        .resource_id
                        .as_deref()
                        .is_none_or(|resource_id| row.resource_id == resource_id)
                    && filter.action.is_none_or(|action| row.action == action)
            })
            .cloned()
            .collect())
    }

    async fn delete(&self, id: ResourcePermissionId) -> AppResult<()> {
        let mut rows = locked(&self.rows);
        let before = rows.len();
        rows.retain(|row| row.id != id);
        if rows.len() == before {
            return Err(AppError::NotFound(format!(
                "resource permission '{id}' was not found"
            )));
        }
        Ok(())
    }

    async fn delete_all_for_resource(
        &self,
        resource_type: ResourceType,
        resource_id: &str,
    ) -> AppResult<u64> {
        let mut rows = locked(&self.rows);
        let before = rows.len();
        rows.retain(|row| {
            !(row.resource_type == resource_type && row.resource_id == resource_id)
        });
        Ok((before - rows.len()) as u64)
    }
}

#[derive(Default)]
pub(crate) struct InMemoryAudit {
    events: Mutex<Vec<AuditEvent>>,
}

impl InMemoryAudit {
    pub(crate) fn events(&self) -> Vec<AuditEvent> {
        locked(&self.events).clone()
    }
}

#[async_trait]
impl AuditRepository for InMemoryAudit {
    async fn append_event(&self, event: AuditEvent) -> AppResult<()> {
        locked(&self.events).push(event);
        Ok(())
    }
}
