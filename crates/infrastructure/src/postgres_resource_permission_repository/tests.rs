use sqlx::PgPool;
use sqlx::migrate::Migrator;
use sqlx::postgres::PgPoolOptions;
use uuid::Uuid;

use talentgate_application::{ResourcePermissionRepository, ResourcePermissionUpsert};
use talentgate_core::{CompanyId, SystemRole};
use talentgate_domain::{Action, ResourceType};

use super::PostgresResourcePermissionRepository;

static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

async fn test_pool() -> Option<PgPool> {
    let Ok(database_url) = std::env::var("DATABASE_URL") else {
        return None;
    };

    let pool = match PgPoolOptions::new()
        .max_connections(2)
        .connect(database_url.as_str())
        .await
    {
        Ok(pool) => pool,
        Err(error) => panic!("failed to connect to DATABASE_URL in test: {error}"),
    };

    if let Err(error) = MIGRATOR.run(&pool).await {
        panic!("failed to run migrations for postgres override tests: {error}");
    }

    Some(pool)
}

async fn ensure_user(pool: &PgPool, user_id: Uuid) {
    let insert = sqlx::query(
        r#"
            INSERT INTO users (id, system_role, is_super_admin, is_company_admin, company_id)
            VALUES ($1, $2, FALSE, FALSE, $3)
            ON CONFLICT (id) DO NOTHING
            "#,
    )
    .bind(user_id)
    .bind(SystemRole::Recruiter.as_str())
    .bind(CompanyId::new().as_uuid())
    .execute(pool)
    .await;

    assert!(insert.is_ok());
}

fn override_input(
    user_id: Uuid,
    resource_id: &str,
    action: Action,
    is_granted: bool,
) -> ResourcePermissionUpsert {
    ResourcePermissionUpsert {
        user_id,
        resource_type: ResourceType::JobPosting,
        resource_id: resource_id.to_owned(),
        action,
        is_granted,
    }
}

#[tokio::test]
async fn upsert_overwrites_the_existing_tuple_verdict() {
    let Some(pool) = test_pool().await else {
        return;
    };

    let repository = PostgresResourcePermissionRepository::new(pool.clone());
    let user_id = Uuid::new_v4();
    ensure_user(&pool, user_id).await;
    let resource_id = Uuid::new_v4().to_string();

    let granted = repository
        .upsert(override_input(user_id, &resource_id, Action::Update, true))
        .await;
    assert!(granted.is_ok());
    let Ok(granted) = granted else {
        return;
    };

    let revoked = repository
        .upsert(override_input(user_id, &resource_id, Action::Update, false))
        .await;
    assert!(revoked.is_ok());
    let Ok(revoked) = revoked else {
        return;
    };

    // Same tuple, same row: the second write flips the verdict in place.
    assert_eq!(revoked.id, granted.id);
    assert!(!revoked.is_granted);
    assert!(revoked.updated_at >= granted.updated_at);

    let found = repository
        .find_override(user_id, ResourceType::JobPosting, &resource_id, Action::Update)
        .await;
    assert!(matches!(found, Ok(Some(row)) if !row.is_granted));
}

#[tokio::test]
async fn resource_purge_removes_every_override_of_the_instance() {
    let Some(pool) = test_pool().await else {
        return;
    };

    let repository = PostgresResourcePermissionRepository::new(pool.clone());
    let user_id = Uuid::new_v4();
    ensure_user(&pool, user_id).await;
    let purged_resource = Uuid::new_v4().to_string();
    let kept_resource = Uuid::new_v4().to_string();

    for action in [Action::Read, Action::Delete] {
        let written = repository
            .upsert(override_input(user_id, &purged_resource, action, true))
            .await;
        assert!(written.is_ok());
    }
    let kept = repository
        .upsert(override_input(user_id, &kept_resource, Action::Read, true))
        .await;
    assert!(kept.is_ok());

    let removed = repository
        .delete_all_for_resource(ResourceType::JobPosting, &purged_resource)
        .await;
    assert!(removed.is_ok());
    assert_eq!(removed.unwrap_or(0), 2);

    let gone = repository
        .find_override(user_id, ResourceType::JobPosting, &purged_resource, Action::Read)
        .await;
    assert!(matches!(gone, Ok(None)));

    let survivor = repository
        .find_override(user_id, ResourceType::JobPosting, &kept_resource, Action::Read)
        .await;
    assert!(matches!(survivor, Ok(Some(_))));
}
