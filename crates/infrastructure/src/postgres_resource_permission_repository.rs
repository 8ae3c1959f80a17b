use async_trait::async_trait;
use sqlx::types::chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use talentgate_application::{
    ResourcePermissionFilter, ResourcePermissionRepository, ResourcePermissionUpsert,
};
use talentgate_core::{AppError, AppResult};
use talentgate_domain::{Action, ResourcePermission, ResourcePermissionId, ResourceType};

use crate::row_decode::{decode_action, decode_resource_type};

#[cfg(test)]
mod tests;

/// PostgreSQL-backed repository for per-instance permission overrides.
#[derive(Clone)]
pub struct PostgresResourcePermissionRepository {
    pool: PgPool,
}

impl PostgresResourcePermissionRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ResourcePermissionRow {
    id: Uuid,
    user_id: Uuid,
    resource_type: String,
    resource_id: String,
    action: String,
    is_granted: bool,
    updated_at: DateTime<Utc>,
}

impl ResourcePermissionRow {
    fn decode(self) -> AppResult<ResourcePermission> {
        Ok(ResourcePermission {
            id: ResourcePermissionId::from_uuid(self.id),
            user_id: self.user_id,
            resource_type: decode_resource_type(self.resource_type.as_str())?,
            resource_id: self.resource_id,
            action: decode_action(self.action.as_str())?,
            is_granted: self.is_granted,
            updated_at: self.updated_at,
        })
    }
}

const ROW_COLUMNS: &str =
    "id, user_id, resource_type, resource_id, action, is_granted, updated_at";

#[async_trait]
impl ResourcePermissionRepository for PostgresResourcePermissionRepository {
    async fn upsert(&self, input: ResourcePermissionUpsert) -> AppResult<ResourcePermission> {
        let row = sqlx::query_as::<_, ResourcePermissionRow>(
            r#"
            INSERT INTO resource_permissions
                (id, user_id, resource_type, resource_id, action, is_granted)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (user_id, resource_type, resource_id, action)
            DO UPDATE SET is_granted = EXCLUDED.is_granted, updated_at = now()
            RETURNING id, user_id, resource_type, resource_id, action, is_granted, updated_at
            "#,
        )
        .bind(ResourcePermissionId::new().as_uuid())
        .bind(input.user_id)
        .bind(input.resource_type.as_str())
        .bind(input.resource_id.as_str())
        .bind(input.action.as_str())
        .bind(input.is_granted)
        .fetch_one(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to upsert override: {error}")))?;

        row.decode()
    }

    async fn find_override(
        &self,
        user_id: Uuid,
        resource_type: ResourceType,
        resource_id: &str,
        action: Action,
    ) -> AppResult<Option<ResourcePermission>> {
        let row = sqlx::query_as::<_, ResourcePermissionRow>(&format!(
            r#"
            SELECT {ROW_COLUMNS}
            FROM resource_permissions
            WHERE user_id = $1
                AND resource_type = $2
                AND resource_id = $3
                AND action = $4
            LIMIT 1
            "#
        ))
        .bind(user_id)
        .bind(resource_type.as_str())
        .bind(resource_id)
        .bind(action.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to find override: {error}")))?;

        row.map(ResourcePermissionRow::decode).transpose()
    }

    async fn find(&self, id: ResourcePermissionId) -> AppResult<Option<ResourcePermission>> {
        let row = sqlx::query_as::<_, ResourcePermissionRow>(&format!(
            r#"
            SELECT {ROW_COLUMNS}
            FROM resource_permissions
            WHERE id = $1
            LIMIT 1
            "#
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to find override: {error}")))?;

        row.map(ResourcePermissionRow::decode).transpose()
    }

    async fn list(&self, filter: ResourcePermissionFilter) -> AppResult<Vec<ResourcePermission>> {
        let rows = sqlx::query_as::<_, ResourcePermissionRow>(&format!(
            r#"
            SELECT {ROW_COLUMNS}
            FROM resource_permissions
            WHERE ($1::uuid IS NULL OR user_id = $1)
                AND ($2::text IS NULL OR resource_type = $2)
                AND ($3::text IS NULL OR resource_id = $3)
                AND ($4::text IS NULL OR action = $4)
            ORDER BY resource_type, resource_id, action
            "#
        ))
        .bind(filter.user_id)
        .bind(filter.resource_type.map(|value| value.as_str()))
        .bind(filter.resource_id)
        .bind(filter.action.map(|value| value.as_str()))
        .fetch_all(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to list overrides: {error}")))?;

        rows.into_iter().map(ResourcePermissionRow::decode).collect()
    }

    async fn delete(&self, id: ResourcePermissionId) -> AppResult<()> {
        let rows_affected = sqlx::query("DELETE FROM resource_permissions WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|error| AppError::Internal(format!("failed to delete override: {error}")))?
            .rows_affected();

        if rows_affected == 0 {
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
        let rows_affected = sqlx::query(
            r#"
            DELETE FROM resource_permissions
            WHERE resource_type = $1 AND resource_id = $2
            "#,
        )
        .bind(resource_type.as_str())
        .bind(resource_id)
        .execute(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to delete resource overrides: {error}"))
        })?
        .rows_affected();

        Ok(rows_affected)
    }
}
