use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use talentgate_application::CustomRoleRepository;
use talentgate_core::{AppError, AppResult, CompanyId};
use talentgate_domain::{
    Action, CustomRole, CustomRoleId, Permission, PermissionId, ResourceType,
};

use crate::row_decode::{decode_action, decode_resource_type};

#[cfg(test)]
mod tests;

/// PostgreSQL-backed repository for custom roles, grants, and assignments.
#[derive(Clone)]
pub struct PostgresCustomRoleRepository {
    pool: PgPool,
}

impl PostgresCustomRoleRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct CustomRoleRow {
    id: Uuid,
    company_id: Uuid,
    name: String,
    description: String,
    is_active: bool,
}

impl From<CustomRoleRow> for CustomRole {
    fn from(row: CustomRoleRow) -> Self {
        Self {
            id: CustomRoleId::from_uuid(row.id),
            company_id: CompanyId::from_uuid(row.company_id),
            name: row.name,
            description: row.description,
            is_active: row.is_active,
        }
    }
}

#[derive(Debug, FromRow)]
struct PermissionRow {
    id: Uuid,
    action: String,
    resource_type: String,
    name: String,
    description: String,
}

#[derive(Debug, FromRow)]
struct ActionRow {
    action: String,
}

#[async_trait]
impl CustomRoleRepository for PostgresCustomRoleRepository {
    async fn create(&self, role: &CustomRole, permission_ids: &[PermissionId]) -> AppResult<()> {
        let mut transaction =
            self.pool.begin().await.map_err(|error| {
                AppError::Internal(format!("failed to begin transaction: {error}"))
            })?;

        sqlx::query(
            r#"
            INSERT INTO custom_roles (id, company_id, name, description, is_active)
            VALUES ($1, $2, $3, $4, TRUE)
            "#,
        )
        .bind(role.id.as_uuid())
        .bind(role.company_id.as_uuid())
        .bind(role.name.as_str())
        .bind(role.description.as_str())
        .execute(&mut *transaction)
        .await
        .map_err(|error| map_name_conflict(error, role.name.as_str()))?;

        for permission_id in permission_ids {
            sqlx::query(
                r#"
                INSERT INTO custom_role_permissions (custom_role_id, permission_id)
                VALUES ($1, $2)
                ON CONFLICT (custom_role_id, permission_id) DO NOTHING
                "#,
            )
            .bind(role.id.as_uuid())
            .bind(permission_id.as_uuid())
            .execute(&mut *transaction)
            .await
            .map_err(|error| {
                AppError::Internal(format!("failed to persist role permissions: {error}"))
            })?;
        }

        transaction.commit().await.map_err(|error| {
            AppError::Internal(format!("failed to commit transaction: {error}"))
        })
    }

    async fn find(&self, role_id: CustomRoleId) -> AppResult<Option<CustomRole>> {
        let row = sqlx::query_as::<_, CustomRoleRow>(
            r#"
            SELECT id, company_id, name, description, is_active
            FROM custom_roles
            WHERE id = $1
            LIMIT 1
            "#,
        )
        .bind(role_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to find custom role: {error}")))?;

        Ok(row.map(CustomRole::from))
    }

    async fn list_active_by_company(&self, company_id: CompanyId) -> AppResult<Vec<CustomRole>> {
        let rows = sqlx::query_as::<_, CustomRoleRow>(
            r#"
            SELECT id, company_id, name, description, is_active
            FROM custom_roles
            WHERE company_id = $1 AND is_active
            ORDER BY name
            "#,
        )
        .bind(company_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to list custom roles: {error}")))?;

        Ok(rows.into_iter().map(CustomRole::from).collect())
    }

    async fn update(
        &self,
        role_id: CustomRoleId,
        name: &str,
        description: &str,
        permission_ids: &[PermissionId],
    ) -> AppResult<()> {
        let mut transaction =
            self.pool.begin().await.map_err(|error| {
                AppError::Internal(format!("failed to begin transaction: {error}"))
            })?;

        let rows_affected = sqlx::query(
            r#"
            UPDATE custom_roles
            SET name = $2, description = $3, updated_at = now()
            WHERE id = $1
            "#,
        )
        .bind(role_id.as_uuid())
        .bind(name)
        .bind(description)
        .execute(&mut *transaction)
        .await
        .map_err(|error| map_name_conflict(error, name))?
        .rows_affected();

        if rows_affected == 0 {
            return Err(AppError::NotFound(format!(
                "custom role '{role_id}' was not found"
            )));
        }

        // Replace-all: discard the old link rows, then insert the new set in
        // the same transaction so the role never observably has no grants.
        sqlx::query("DELETE FROM custom_role_permissions WHERE custom_role_id = $1")
            .bind(role_id.as_uuid())
            .execute(&mut *transaction)
            .await
            .map_err(|error| {
                AppError::Internal(format!("failed to clear role permissions: {error}"))
            })?;

        for permission_id in permission_ids {
            sqlx::query(
                r#"
                INSERT INTO custom_role_permissions (custom_role_id, permission_id)
                VALUES ($1, $2)
                ON CONFLICT (custom_role_id, permission_id) DO NOTHING
                "#,
            )
            .bind(role_id.as_uuid())
            .bind(permission_id.as_uuid())
            .execute(&mut *transaction)
            .await
            .map_err(|error| {
                AppError::Internal(format!("failed to persist role permissions: {error}"))
            })?;
        }

        transaction.commit().await.map_err(|error| {
            AppError::Internal(format!("failed to commit transaction: {error}"))
        })
    }

    async fn deactivate(&self, role_id: CustomRoleId) -> AppResult<()> {
        let rows_affected = sqlx::query(
            r#"
            UPDATE custom_roles
            SET is_active = FALSE, updated_at = now()
            WHERE id = $1
            "#,
        )
        .bind(role_id.as_uuid())
        .execute(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to deactivate custom role: {error}"))
        })?
        .rows_affected();

        if rows_affected == 0 {
            return Err(AppError::NotFound(format!(
                "custom role '{role_id}' was not found"
            )));
        }

        Ok(())
    }

    async fn list_permissions_for_role(
        &self,
        role_id: CustomRoleId,
    ) -> AppResult<Vec<Permission>> {
        let rows = sqlx::query_as::<_, PermissionRow>(
            r#"
            SELECT permissions.id, permissions.action, permissions.resource_type,
                   permissions.name, permissions.description
            FROM custom_role_permissions AS links
            INNER JOIN permissions
                ON permissions.id = links.permission_id
            WHERE links.custom_role_id = $1
            ORDER BY permissions.resource_type, permissions.action
            "#,
        )
        .bind(role_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to load role permissions: {error}"))
        })?;

        rows.into_iter()
            .map(|row| {
                Ok(Permission {
                    id: PermissionId::from_uuid(row.id),
                    action: decode_action(row.action.as_str())?,
                    resource_type: decode_resource_type(row.resource_type.as_str())?,
                    name: row.name,
                    description: row.description,
                })
            })
            .collect()
    }

    async fn assign_role_to_user(&self, user_id: Uuid, role_id: CustomRoleId) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO user_custom_roles (user_id, custom_role_id)
            VALUES ($1, $2)
            ON CONFLICT (user_id, custom_role_id) DO NOTHING
            "#,
        )
        .bind(user_id)
        .bind(role_id.as_uuid())
        .execute(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to assign role: {error}")))?;

        Ok(())
    }

    async fn set_user_roles(&self, user_id: Uuid, role_ids: &[CustomRoleId]) -> AppResult<()> {
        let mut transaction =
            self.pool.begin().await.map_err(|error| {
                AppError::Internal(format!("failed to begin transaction: {error}"))
            })?;

        sqlx::query("DELETE FROM user_custom_roles WHERE user_id = $1")
            .bind(user_id)
            .execute(&mut *transaction)
            .await
            .map_err(|error| {
                AppError::Internal(format!("failed to clear user roles: {error}"))
            })?;

        for role_id in role_ids {
            sqlx::query(
                r#"
                INSERT INTO user_custom_roles (user_id, custom_role_id)
                VALUES ($1, $2)
                ON CONFLICT (user_id, custom_role_id) DO NOTHING
                "#,
            )
            .bind(user_id)
            .bind(role_id.as_uuid())
            .execute(&mut *transaction)
            .await
            .map_err(|error| {
                AppError::Internal(format!("failed to assign user roles: {error}"))
            })?;
        }

        transaction.commit().await.map_err(|error| {
            AppError::Internal(format!("failed to commit transaction: {error}"))
        })
    }

    async fn set_role_users(&self, role_id: CustomRoleId, user_ids: &[Uuid]) -> AppResult<()> {
        let mut transaction =
            self.pool.begin().await.map_err(|error| {
                AppError::Internal(format!("failed to begin transaction: {error}"))
            })?;

        sqlx::query("DELETE FROM user_custom_roles WHERE custom_role_id = $1")
            .bind(role_id.as_uuid())
            .execute(&mut *transaction)
            .await
            .map_err(|error| {
                AppError::Internal(format!("failed to clear role users: {error}"))
            })?;

        for user_id in user_ids {
            sqlx::query(
                r#"
                INSERT INTO user_custom_roles (user_id, custom_role_id)
                VALUES ($1, $2)
                ON CONFLICT (user_id, custom_role_id) DO NOTHING
                "#,
            )
            .bind(user_id)
            .bind(role_id.as_uuid())
            .execute(&mut *transaction)
            .await
            .map_err(|error| {
                AppError::Internal(format!("failed to assign role users: {error}"))
            })?;
        }

        transaction.commit().await.map_err(|error| {
            AppError::Internal(format!("failed to commit transaction: {error}"))
        })
    }

    async fn list_active_roles_for_user(&self, user_id: Uuid) -> AppResult<Vec<CustomRole>> {
        let rows = sqlx::query_as::<_, CustomRoleRow>(
            r#"
            SELECT roles.id, roles.company_id, roles.name, roles.description, roles.is_active
            FROM user_custom_roles AS assignments
            INNER JOIN custom_roles AS roles
                ON roles.id = assignments.custom_role_id
            WHERE assignments.user_id = $1 AND roles.is_active
            ORDER BY roles.name
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to list user roles: {error}")))?;

        Ok(rows.into_iter().map(CustomRole::from).collect())
    }

    async fn list_user_actions(
        &self,
        user_id: Uuid,
        resource_type: ResourceType,
    ) -> AppResult<Vec<Action>> {
        let rows = sqlx::query_as::<_, ActionRow>(
            r#"
            SELECT DISTINCT permissions.action
            FROM user_custom_roles AS assignments
            INNER JOIN custom_roles AS roles
                ON roles.id = assignments.custom_role_id
            INNER JOIN custom_role_permissions AS links
                ON links.custom_role_id = roles.id
            INNER JOIN permissions
                ON permissions.id = links.permission_id
            WHERE assignments.user_id = $1
                AND roles.is_active
                AND permissions.resource_type = $2
            "#,
        )
        .bind(user_id)
        .bind(resource_type.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to load custom role grants: {error}"))
        })?;

        rows.into_iter()
            .map(|row| decode_action(row.action.as_str()))
            .collect()
    }
}

fn map_name_conflict(error: sqlx::Error, role_name: &str) -> AppError {
    if let sqlx::Error::Database(database_error) = &error
        && database_error.code().as_deref() == Some("23505")
    {
        return AppError::Conflict(format!("custom role '{role_name}' already exists"));
    }

    AppError::Internal(format!("failed to persist custom role: {error}"))
}
