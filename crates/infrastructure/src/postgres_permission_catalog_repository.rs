use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use tracing::info;

use talentgate_application::{PermissionCatalogRepository, SystemRoleGrant};
use talentgate_core::{AppError, AppResult, SystemRole};
use talentgate_domain::{Action, Permission, PermissionId, ResourceType};

use crate::row_decode::{decode_action, decode_resource_type};

/// PostgreSQL-backed repository for the global catalog and role map.
#[derive(Clone)]
pub struct PostgresPermissionCatalogRepository {
    pool: PgPool,
}

impl PostgresPermissionCatalogRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct PermissionRow {
    id: uuid::Uuid,
    action: String,
    resource_type: String,
    name: String,
    description: String,
}

impl PermissionRow {
    fn decode(self) -> AppResult<Permission> {
        Ok(Permission {
            id: PermissionId::from_uuid(self.id),
            action: decode_action(self.action.as_str())?,
            resource_type: decode_resource_type(self.resource_type.as_str())?,
            name: self.name,
            description: self.description,
        })
    }
}

#[derive(Debug, FromRow)]
struct ActionRow {
    action: String,
}

#[async_trait]
impl PermissionCatalogRepository for PostgresPermissionCatalogRepository {
    async fn count_permissions(&self) -> AppResult<u64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM permissions")
            .fetch_one(&self.pool)
            .await
            .map_err(|error| {
                AppError::Internal(format!("failed to count catalog permissions: {error}"))
            })?;

        Ok(count.max(0) as u64)
    }

    async fn seed(
        &self,
        catalog: &[Permission],
        role_grants: &[SystemRoleGrant],
    ) -> AppResult<()> {
        let mut transaction =
            self.pool.begin().await.map_err(|error| {
                AppError::Internal(format!("failed to begin transaction: {error}"))
            })?;

        for permission in catalog {
            sqlx::query(
                r#"
                INSERT INTO permissions (id, action, resource_type, name, description)
                VALUES ($1, $2, $3, $4, $5)
                ON CONFLICT (action, resource_type) DO NOTHING
                "#,
            )
            .bind(permission.id.as_uuid())
            .bind(permission.action.as_str())
            .bind(permission.resource_type.as_str())
            .bind(permission.name.as_str())
            .bind(permission.description.as_str())
            .execute(&mut *transaction)
            .await
            .map_err(|error| {
                AppError::Internal(format!("failed to seed catalog permission: {error}"))
            })?;
        }

        for grant in role_grants {
            let permission_id =
                permission_id_for(catalog, grant.action, grant.resource_type).ok_or_else(|| {
                    AppError::Internal(format!(
                        "role grant '{} {} {}' references no catalog entry",
                        grant.role.as_str(),
                        grant.action.as_str(),
                        grant.resource_type.as_str()
                    ))
                })?;

            sqlx::query(
                r#"
                INSERT INTO system_role_permissions (system_role, permission_id)
                VALUES ($1, $2)
                ON CONFLICT (system_role, permission_id) DO NOTHING
                "#,
            )
            .bind(grant.role.as_str())
            .bind(permission_id.as_uuid())
            .execute(&mut *transaction)
            .await
            .map_err(|error| {
                AppError::Internal(format!("failed to seed role grant: {error}"))
            })?;
        }

        transaction.commit().await.map_err(|error| {
            AppError::Internal(format!("failed to commit transaction: {error}"))
        })?;

        info!(
            permissions = catalog.len(),
            role_grants = role_grants.len(),
            "permission catalog seeded"
        );
        Ok(())
    }

    async fn list_permissions(&self) -> AppResult<Vec<Permission>> {
        let rows = sqlx::query_as::<_, PermissionRow>(
            r#"
            SELECT id, action, resource_type, name, description
            FROM permissions
            ORDER BY resource_type, action
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to list catalog: {error}")))?;

        rows.into_iter().map(PermissionRow::decode).collect()
    }

    async fn find_permissions_by_ids(&self, ids: &[PermissionId]) -> AppResult<Vec<Permission>> {
        let uuids: Vec<uuid::Uuid> = ids.iter().map(PermissionId::as_uuid).collect();

        let rows = sqlx::query_as::<_, PermissionRow>(
            r#"
            SELECT id, action, resource_type, name, description
            FROM permissions
            WHERE id = ANY($1)
            "#,
        )
        .bind(uuids)
        .fetch_all(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to resolve permission ids: {error}"))
        })?;

        rows.into_iter().map(PermissionRow::decode).collect()
    }

    async fn list_role_actions(
        &self,
        role: SystemRole,
        resource_type: ResourceType,
    ) -> AppResult<Vec<Action>> {
        let rows = sqlx::query_as::<_, ActionRow>(
            r#"
            SELECT permissions.action
            FROM system_role_permissions AS role_permissions
            INNER JOIN permissions
                ON permissions.id = role_permissions.permission_id
            WHERE role_permissions.system_role = $1
                AND permissions.resource_type = $2
            "#,
        )
        .bind(role.as_str())
        .bind(resource_type.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to load role grants: {error}")))?;

        rows.into_iter()
            .map(|row| decode_action(row.action.as_str()))
            .collect()
    }
}

fn permission_id_for(
    catalog: &[Permission],
    action: Action,
    resource_type: ResourceType,
) -> Option<PermissionId> {
    catalog
        .iter()
        .find(|permission| {
            permission.action == action && permission.resource_type == resource_type
        })
        .map(|permission| permission.id)
}
