use std::sync::Arc;

use talentgate_core::{ActorIdentity, AppError, AppResult, NonEmptyString};
use talentgate_domain::{
    Action, AuditAction, ResourcePermission, ResourcePermissionId, ResourceType,
};
use uuid::Uuid;

use crate::access_ports::{
    ResourcePermissionFilter, ResourcePermissionRepository, ResourcePermissionUpsert,
};
use crate::audit::{AuditEvent, AuditRepository};

/// Input payload for the override upsert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpsertResourcePermissionInput {
    /// The user the override applies to.
    pub user_id: Uuid,
    /// Resource type of the concrete instance.
    pub resource_type: ResourceType,
    /// Identifier of the concrete instance.
    pub resource_id: String,
    /// The single action the override covers.
    pub action: Action,
    /// Grant or denial; omitted means grant.
    pub is_granted: Option<bool>,
}

/// Application service for per-instance permission overrides.
#[derive(Clone)]
pub struct ResourcePermissionService {
    repository: Arc<dyn ResourcePermissionRepository>,
    audit_repository: Arc<dyn AuditRepository>,
}

impl ResourcePermissionService {
    /// Creates the service from its repositories.
    #[must_use]
    pub fn new(
        repository: Arc<dyn ResourcePermissionRepository>,
        audit_repository: Arc<dyn AuditRepository>,
    ) -> Self {
        Self {
            repository,
            audit_repository,
        }
    }

    /// Creates or overwrites the override for the input's four-part key.
    ///
    /// A second upsert for the same tuple updates `is_granted` in place; the
    /// store never holds two rows for one tuple.
    pub async fn upsert(
        &self,
        actor: &ActorIdentity,
        input: UpsertResourcePermissionInput,
    ) -> AppResult<ResourcePermission> {
        let resource_id = NonEmptyString::new(input.resource_id.trim())?;

        let row = self
            .repository
            .upsert(ResourcePermissionUpsert {
                user_id: input.user_id,
                resource_type: input.resource_type,
                resource_id: resource_id.as_str().to_owned(),
                action: input.action,
                is_granted: input.is_granted.unwrap_or(true),
            })
            .await?;

        self.audit_repository
            .append_event(AuditEvent {
                company_id: actor.company_id(),
                actor_user_id: actor.user_id(),
                action: AuditAction::OverrideSaved,
                resource_type: input.resource_type.as_str().to_owned(),
                resource_id: row.resource_id.clone(),
                detail: Some(format!(
                    "{} '{}' on {} '{}' for user '{}'",
                    if row.is_granted { "granted" } else { "denied" },
                    row.action.as_str(),
                    row.resource_type.as_str(),
                    row.resource_id,
                    row.user_id
                )),
            })
            .await?;

        Ok(row)
    }

    /// Returns one override by id.
    pub async fn get(
        &self,
        id: ResourcePermissionId,
    ) -> AppResult<ResourcePermission> {
        self.repository.find(id).await?.ok_or_else(|| {
            AppError::NotFound(format!("resource permission '{id}' was not found"))
        })
    }

    /// Lists overrides matching the optional filters.
    pub async fn list(
        &self,
        filter: ResourcePermissionFilter,
    ) -> AppResult<Vec<ResourcePermission>> {
        self.repository.list(filter).await
    }

    /// Deletes one override by id.
    pub async fn delete(
        &self,
        actor: &ActorIdentity,
        id: ResourcePermissionId,
    ) -> AppResult<()> {
        let row = self.get(id).await?;
        self.repository.delete(id).await?;

        self.audit_repository
            .append_event(AuditEvent {
                company_id: actor.company_id(),
                actor_user_id: actor.user_id(),
                action: AuditAction::OverrideRemoved,
                resource_type: row.resource_type.as_str().to_owned(),
                resource_id: row.resource_id.clone(),
                detail: Some(format!(
                    "removed '{}' override on {} '{}' for user '{}'",
                    row.action.as_str(),
                    row.resource_type.as_str(),
                    row.resource_id,
                    row.user_id
                )),
            })
            .await
    }

    /// Deletes every override for one resource instance.
    ///
    /// Called when the instance itself is permanently removed, so no orphaned
    /// override rows linger.
    pub async fn delete_all_for_resource(
        &self,
        actor: &ActorIdentity,
        resource_type: ResourceType,
        resource_id: &str,
    ) -> AppResult<u64> {
        let removed = self
            .repository
            .delete_all_for_resource(resource_type, resource_id)
            .await?;

        if removed > 0 {
            self.audit_repository
                .append_event(AuditEvent {
                    company_id: actor.company_id(),
                    actor_user_id: actor.user_id(),
                    action: AuditAction::OverrideRemoved,
                    resource_type: resource_type.as_str().to_owned(),
                    resource_id: resource_id.to_owned(),
                    detail: Some(format!(
                        "removed {removed} override(s) for {} '{resource_id}'",
                        resource_type.as_str()
                    )),
                })
                .await?;
        }

        Ok(removed)
    }
}
