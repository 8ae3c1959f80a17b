use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use talentgate_application::UserDirectory;
use talentgate_core::{AppError, AppResult, CompanyId};
use talentgate_domain::UserAccessProfile;

use crate::row_decode::decode_system_role;

/// PostgreSQL-backed lookup of the access-relevant user attributes.
#[derive(Clone)]
pub struct PostgresUserDirectory {
    pool: PgPool,
}

impl PostgresUserDirectory {
    /// Creates a directory with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct AccessProfileRow {
    id: Uuid,
    system_role: String,
    is_super_admin: bool,
    is_company_admin: bool,
    company_id: Uuid,
}

impl AccessProfileRow {
    fn decode(self) -> AppResult<UserAccessProfile> {
        Ok(UserAccessProfile {
            user_id: self.id,
            system_role: decode_system_role(self.system_role.as_str())?,
            is_super_admin: self.is_super_admin,
            is_company_admin: self.is_company_admin,
            company_id: CompanyId::from_uuid(self.company_id),
        })
    }
}

#[async_trait]
impl UserDirectory for PostgresUserDirectory {
    async fn find_access_profile(&self, user_id: Uuid) -> AppResult<Option<UserAccessProfile>> {
        let row = sqlx::query_as::<_, AccessProfileRow>(
            r#"
            SELECT id, system_role, is_super_admin, is_company_admin, company_id
            FROM users
            WHERE id = $1
            LIMIT 1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to load access profile: {error}")))?;

        row.map(AccessProfileRow::decode).transpose()
    }
}
