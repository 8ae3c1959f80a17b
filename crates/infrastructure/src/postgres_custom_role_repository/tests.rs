use sqlx::PgPool;
use sqlx::migrate::Migrator;
use sqlx::postgres::PgPoolOptions;
use uuid::Uuid;

use talentgate_application::{CustomRoleRepository, PermissionCatalogRepository};
use talentgate_core::{CompanyId, SystemRole};
use talentgate_domain::{
    Action, CustomRole, CustomRoleId, PermissionId, ResourceType, default_catalog,
};

use super::PostgresCustomRoleRepository;
use crate::PostgresPermissionCatalogRepository;

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
        panic!("failed to run migrations for postgres custom role tests: {error}");
    }

    Some(pool)
}

async fn ensure_user(pool: &PgPool, user_id: Uuid, company_id: CompanyId) {
    let insert = sqlx::query(
        r#"
            INSERT INTO users (id, system_role, is_super_admin, is_company_admin, company_id)
            VALUES ($1, $2, FALSE, FALSE, $3)
            ON CONFLICT (id) DO NOTHING
            "#,
    )
    .bind(user_id)
    .bind(SystemRole::Interviewer.as_str())
    .bind(company_id.as_uuid())
    .execute(pool)
    .await;

    assert!(insert.is_ok());
}

async fn seeded_permission_id(
    pool: &PgPool,
    action: Action,
    resource_type: ResourceType,
) -> PermissionId {
    let catalog_repository = PostgresPermissionCatalogRepository::new(pool.clone());

    let seeded = catalog_repository.seed(&default_catalog(), &[]).await;
    assert!(seeded.is_ok());

    let listed = catalog_repository.list_permissions().await;
    assert!(listed.is_ok());

    let Some(permission) = listed
        .unwrap_or_default()
        .into_iter()
        .find(|entry| entry.action == action && entry.resource_type == resource_type)
    else {
        panic!("catalog is missing '{action} {resource_type}' after seeding");
    };

    permission.id
}

fn sample_role(company_id: CompanyId, name_prefix: &str) -> CustomRole {
    CustomRole {
        id: CustomRoleId::new(),
        company_id,
        name: format!("{name_prefix}-{}", Uuid::new_v4()),
        description: "Covers the interview loop".to_owned(),
        is_active: true,
    }
}

#[tokio::test]
async fn assigned_role_grants_surface_in_user_action_lookup() {
    let Some(pool) = test_pool().await else {
        return;
    };

    let repository = PostgresCustomRoleRepository::new(pool.clone());
    let company_id = CompanyId::new();
    let user_id = Uuid::new_v4();
    ensure_user(&pool, user_id, company_id).await;

    let permission_id = seeded_permission_id(&pool, Action::Manage, ResourceType::Interview).await;
    let role = sample_role(company_id, "interview-leads");

    let created = repository.create(&role, &[permission_id]).await;
    assert!(created.is_ok());

    let assigned = repository.assign_role_to_user(user_id, role.id).await;
    assert!(assigned.is_ok());

    let actions = repository
        .list_user_actions(user_id, ResourceType::Interview)
        .await;
    assert!(actions.is_ok());
    assert_eq!(actions.unwrap_or_default(), vec![Action::Manage]);

    let roles = repository.list_active_roles_for_user(user_id).await;
    assert!(roles.is_ok());
    let roles = roles.unwrap_or_default();
    assert_eq!(roles.len(), 1);
    assert_eq!(roles[0].id, role.id);
}

#[tokio::test]
async fn update_replaces_the_permission_link_set() {
    let Some(pool) = test_pool().await else {
        return;
    };

    let repository = PostgresCustomRoleRepository::new(pool.clone());
    let company_id = CompanyId::new();

    let read_id = seeded_permission_id(&pool, Action::Read, ResourceType::Candidate).await;
    let update_id = seeded_permission_id(&pool, Action::Update, ResourceType::Candidate).await;
    let role = sample_role(company_id, "sourcing");

    let created = repository.create(&role, &[read_id]).await;
    assert!(created.is_ok());

    let updated = repository
        .update(role.id, role.name.as_str(), "Edits candidate records", &[update_id])
        .await;
    assert!(updated.is_ok());

    let linked = repository.list_permissions_for_role(role.id).await;
    assert!(linked.is_ok());
    let linked = linked.unwrap_or_default();
    assert_eq!(linked.len(), 1);
    assert_eq!(linked[0].id, update_id);
    assert_eq!(linked[0].action, Action::Update);
}

#[tokio::test]
async fn deactivated_role_stops_granting_actions() {
    let Some(pool) = test_pool().await else {
        return;
    };

    let repository = PostgresCustomRoleRepository::new(pool.clone());
    let company_id = CompanyId::new();
    let user_id = Uuid::new_v4();
    ensure_user(&pool, user_id, company_id).await;

    let permission_id = seeded_permission_id(&pool, Action::Manage, ResourceType::Evaluation).await;
    let role = sample_role(company_id, "evaluators");

    let created = repository.create(&role, &[permission_id]).await;
    assert!(created.is_ok());
    let assigned = repository.assign_role_to_user(user_id, role.id).await;
    assert!(assigned.is_ok());

    let deactivated = repository.deactivate(role.id).await;
    assert!(deactivated.is_ok());

    let actions = repository
        .list_user_actions(user_id, ResourceType::Evaluation)
        .await;
    assert!(actions.is_ok());
    assert!(actions.unwrap_or_default().is_empty());

    let roles = repository.list_active_roles_for_user(user_id).await;
    assert!(roles.is_ok());
    assert!(roles.unwrap_or_default().is_empty());

    // The row itself survives the soft delete.
    let found = repository.find(role.id).await;
    assert!(matches!(found, Ok(Some(row)) if !row.is_active));
}
