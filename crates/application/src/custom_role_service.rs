use std::sync::Arc;

use talentgate_core::{ActorIdentity, AppError, AppResult, CompanyId, NonEmptyString};
use talentgate_domain::{AuditAction, CustomRole, CustomRoleId, Permission, PermissionId};
use uuid::Uuid;

use crate::access_ports::{CustomRoleRepository, PermissionCatalogRepository};
use crate::audit::{AuditEvent, AuditRepository};

/// Input payload for custom role creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateCustomRoleInput {
    /// Unique role name in company scope.
    pub name: String,
    /// Free-text description.
    pub description: String,
    /// Explicit owning company; super-admin only, defaults to the actor's.
    pub company_id: Option<CompanyId>,
    /// Initial permission set; must not be empty.
    pub permission_ids: Vec<PermissionId>,
}

/// Input payload for custom role updates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateCustomRoleInput {
    /// New role name.
    pub name: String,
    /// New description.
    pub description: String,
    /// Replacement permission set; the old links are discarded wholesale.
    pub permission_ids: Vec<PermissionId>,
}

/// Application service for tenant-scoped custom role administration.
///
/// Every mutation enforces the tenant isolation contract: a role owned by a
/// different company than the actor's is rejected with `Forbidden` unless the
/// actor is a super-admin. Route-level permission checks happen before these
/// calls; the checks here are the ownership half of the contract.
#[derive(Clone)]
pub struct CustomRoleService {
    repository: Arc<dyn CustomRoleRepository>,
    catalog: Arc<dyn PermissionCatalogRepository>,
    audit_repository: Arc<dyn AuditRepository>,
}

impl CustomRoleService {
    /// Creates the service from its repositories.
    #[must_use]
    pub fn new(
        repository: Arc<dyn CustomRoleRepository>,
        catalog: Arc<dyn PermissionCatalogRepository>,
        audit_repository: Arc<dyn AuditRepository>,
    ) -> Self {
        Self {
            repository,
            catalog,
            audit_repository,
        }
    }

    /// Creates a role in the actor's company and emits an audit event.
    ///
    /// A different owning company may be supplied only by a super-admin.
    pub async fn create(
        &self,
        actor: &ActorIdentity,
        input: CreateCustomRoleInput,
    ) -> AppResult<CustomRole> {
        let name = NonEmptyString::new(input.name.trim())?;

        let company_id = match input.company_id {
            Some(explicit) if explicit != actor.company_id() => {
                if !actor.is_super_admin() {
                    return Err(AppError::Forbidden(
                        "only super-admins may create roles for another company".to_owned(),
                    ));
                }
                explicit
            }
            Some(explicit) => explicit,
            None => actor.company_id(),
        };

        self.validate_permission_ids(&input.permission_ids).await?;

        let role = CustomRole {
            id: CustomRoleId::new(),
            company_id,
            name: name.into(),
            description: input.description,
            is_active: true,
        };
        self.repository.create(&role, &input.permission_ids).await?;

        self.append_role_event(
            actor,
            company_id,
            AuditAction::RoleCreated,
            role.id,
            format!("created role '{}'", role.name),
        )
        .await?;

        Ok(role)
    }

    /// Returns one role of the actor's company.
    pub async fn get(&self, actor: &ActorIdentity, role_id: CustomRoleId) -> AppResult<CustomRole> {
        self.owned_role(actor, role_id).await
    }

    /// Lists the active roles of the actor's company, sorted by name.
    pub async fn list(&self, actor: &ActorIdentity) -> AppResult<Vec<CustomRole>> {
        self.repository
            .list_active_by_company(actor.company_id())
            .await
    }

    /// Renames a role and replaces its permission set wholesale.
    pub async fn update(
        &self,
        actor: &ActorIdentity,
        role_id: CustomRoleId,
        input: UpdateCustomRoleInput,
    ) -> AppResult<CustomRole> {
        let role = self.owned_role(actor, role_id).await?;

        let name = NonEmptyString::new(input.name.trim())?;
        self.validate_permission_ids(&input.permission_ids).await?;

        self.repository
            .update(
                role_id,
                name.as_str(),
                input.description.as_str(),
                &input.permission_ids,
            )
            .await?;

        self.append_role_event(
            actor,
            role.company_id,
            AuditAction::RoleUpdated,
            role_id,
            format!("updated role '{}'", name.as_str()),
        )
        .await?;

        Ok(CustomRole {
            id: role_id,
            company_id: role.company_id,
            name: name.into(),
            description: input.description,
            is_active: role.is_active,
        })
    }

    /// Soft-deletes a role; its link rows stay in place but stop counting.
    pub async fn deactivate(
        &self,
        actor: &ActorIdentity,
        role_id: CustomRoleId,
    ) -> AppResult<()> {
        let role = self.owned_role(actor, role_id).await?;
        self.repository.deactivate(role_id).await?;

        self.append_role_event(
            actor,
            role.company_id,
            AuditAction::RoleDeactivated,
            role_id,
            format!("deactivated role '{}'", role.name),
        )
        .await
    }

    /// Returns exactly the permissions currently linked to a role.
    pub async fn permissions_of(
        &self,
        actor: &ActorIdentity,
        role_id: CustomRoleId,
    ) -> AppResult<Vec<Permission>> {
        self.owned_role(actor, role_id).await?;
        self.repository.list_permissions_for_role(role_id).await
    }

    /// Assigns one role to one user; already-linked pairs are a no-op.
    pub async fn assign(
        &self,
        actor: &ActorIdentity,
        user_id: Uuid,
        role_id: CustomRoleId,
    ) -> AppResult<()> {
        let role = self.owned_role(actor, role_id).await?;
        self.repository.assign_role_to_user(user_id, role_id).await?;

        self.append_role_event(
            actor,
            role.company_id,
            AuditAction::RoleAssigned,
            role_id,
            format!("assigned role '{}' to user '{user_id}'", role.name),
        )
        .await
    }

    /// Replaces a user's custom roles with exactly the given set.
    pub async fn set_user_roles(
        &self,
        actor: &ActorIdentity,
        user_id: Uuid,
        role_ids: Vec<CustomRoleId>,
    ) -> AppResult<()> {
        for role_id in &role_ids {
            self.owned_role(actor, *role_id).await?;
        }
        self.repository.set_user_roles(user_id, &role_ids).await?;

        self.audit_repository
            .append_event(AuditEvent {
                company_id: actor.company_id(),
                actor_user_id: actor.user_id(),
                action: AuditAction::RoleAssignmentsReplaced,
                resource_type: "user".to_owned(),
                resource_id: user_id.to_string(),
                detail: Some(format!(
                    "replaced custom roles of user '{user_id}' with {} role(s)",
                    role_ids.len()
                )),
            })
            .await
    }

    /// Replaces a role's users with exactly the given set.
    pub async fn set_role_users(
        &self,
        actor: &ActorIdentity,
        role_id: CustomRoleId,
        user_ids: Vec<Uuid>,
    ) -> AppResult<()> {
        let role = self.owned_role(actor, role_id).await?;
        self.repository.set_role_users(role_id, &user_ids).await?;

        self.append_role_event(
            actor,
            role.company_id,
            AuditAction::RoleAssignmentsReplaced,
            role_id,
            format!(
                "replaced users of role '{}' with {} user(s)",
                role.name,
                user_ids.len()
            ),
        )
        .await
    }

    /// Lists a user's assigned roles, active ones only.
    pub async fn roles_of_user(
        &self,
        actor: &ActorIdentity,
        user_id: Uuid,
    ) -> AppResult<Vec<CustomRole>> {
        let roles = self.repository.list_active_roles_for_user(user_id).await?;
        if actor.is_super_admin() {
            return Ok(roles);
        }

        Ok(roles
            .into_iter()
            .filter(|role| role.company_id == actor.company_id())
            .collect())
    }

    async fn owned_role(
        &self,
        actor: &ActorIdentity,
        role_id: CustomRoleId,
    ) -> AppResult<CustomRole> {
        let role = self
            .repository
            .find(role_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("custom role '{role_id}' was not found")))?;

        if role.company_id != actor.company_id() && !actor.is_super_admin() {
            return Err(AppError::Forbidden(format!(
                "custom role '{role_id}' belongs to another company"
            )));
        }

        Ok(role)
    }

    async fn validate_permission_ids(&self, permission_ids: &[PermissionId]) -> AppResult<()> {
        if permission_ids.is_empty() {
            return Err(AppError::Validation(
                "permission set must not be empty".to_owned(),
            ));
        }

        let known = self.catalog.find_permissions_by_ids(permission_ids).await?;
        if known.len() != permission_ids.len() {
            return Err(AppError::Validation(
                "permission set references unknown permission ids".to_owned(),
            ));
        }

        Ok(())
    }

    async fn append_role_event(
        &self,
        actor: &ActorIdentity,
        company_id: CompanyId,
        action: AuditAction,
        role_id: CustomRoleId,
        detail: String,
    ) -> AppResult<()> {
        self.audit_repository
            .append_event(AuditEvent {
                company_id,
                actor_user_id: actor.user_id(),
                action,
                resource_type: "custom_role".to_owned(),
                resource_id: role_id.to_string(),
                detail: Some(detail),
            })
            .await
    }
}
