//! Talentgate API composition root.

#![forbid(unsafe_code)]

mod auth;
mod dto;
mod error;
mod handlers;
mod middleware;
mod state;

use std::env;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::sync::Arc;

use axum::Router;
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderValue, Method};
use axum::middleware::{from_fn, from_fn_with_state};
use axum::routing::{delete, get, post, put};
use sqlx::postgres::PgPoolOptions;
use talentgate_application::{
    AuditRepository, AuthorizationService, CatalogService, CustomRoleRepository, CustomRoleService,
    PermissionCatalogRepository, ResourcePermissionRepository, ResourcePermissionService,
    UserDirectory,
};
use talentgate_core::AppError;
use talentgate_domain::{Action, ResourceType};
use talentgate_infrastructure::{
    PostgresAuditRepository, PostgresCustomRoleRepository, PostgresPermissionCatalogRepository,
    PostgresResourcePermissionRepository, PostgresUserDirectory,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tower_sessions::cookie::SameSite;
use tower_sessions::cookie::time::Duration;
use tower_sessions::{Expiry, SessionManagerLayer};
use tower_sessions_sqlx_store::PostgresStore;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::middleware::RequiredAccess;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let migrate_only = env::args().nth(1).as_deref() == Some("migrate");

    let database_url = required_env("DATABASE_URL")?;
    let frontend_url =
        env::var("FRONTEND_URL").unwrap_or_else(|_| "http://localhost:3000".to_owned());
    let bootstrap_token = required_env("AUTH_BOOTSTRAP_TOKEN")?;
    let session_secret = required_env("SESSION_SECRET")?;

    if session_secret.len() < 32 {
        return Err(AppError::Validation(
            "SESSION_SECRET must be at least 32 characters".to_owned(),
        ));
    }

    let api_host = env::var("API_HOST").unwrap_or_else(|_| "127.0.0.1".to_owned());
    let api_port = env::var("API_PORT")
        .ok()
        .and_then(|value| value.parse::<u16>().ok())
        .unwrap_or(3001);
    let cookie_secure = env::var("SESSION_COOKIE_SECURE")
        .unwrap_or_else(|_| "false".to_owned())
        .eq_ignore_ascii_case("true");

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&database_url)
        .await
        .map_err(|error| AppError::Internal(format!("failed to connect to database: {error}")))?;

    sqlx::migrate!("../../crates/infrastructure/migrations")
        .run(&pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to run migrations: {error}")))?;

    if migrate_only {
        info!("database migrations applied successfully");
        return Ok(());
    }

    let session_store = PostgresStore::new(pool.clone())
        .with_table_name("tower_sessions")
        .map_err(|error| {
            AppError::Validation(format!("invalid session table name configuration: {error}"))
        })?;
    session_store.migrate().await.map_err(|error| {
        AppError::Internal(format!("failed to initialize session store: {error}"))
    })?;

    let session_layer = SessionManagerLayer::new(session_store)
        .with_secure(cookie_secure)
        .with_same_site(SameSite::Lax)
        .with_http_only(true)
        .with_expiry(Expiry::OnInactivity(Duration::minutes(30)));

    let user_directory: Arc<dyn UserDirectory> =
        Arc::new(PostgresUserDirectory::new(pool.clone()));
    let catalog_repository: Arc<dyn PermissionCatalogRepository> =
        Arc::new(PostgresPermissionCatalogRepository::new(pool.clone()));
    let custom_role_repository: Arc<dyn CustomRoleRepository> =
        Arc::new(PostgresCustomRoleRepository::new(pool.clone()));
    let resource_permission_repository: Arc<dyn ResourcePermissionRepository> =
        Arc::new(PostgresResourcePermissionRepository::new(pool.clone()));
    let audit_repository: Arc<dyn AuditRepository> =
        Arc::new(PostgresAuditRepository::new(pool.clone()));

    let authorization_service = AuthorizationService::new(
        user_directory.clone(),
        catalog_repository.clone(),
        custom_role_repository.clone(),
        resource_permission_repository.clone(),
    );
    let catalog_service = CatalogService::new(catalog_repository.clone());
    let custom_role_service = CustomRoleService::new(
        custom_role_repository,
        catalog_repository,
        audit_repository.clone(),
    );
    let resource_permission_service =
        ResourcePermissionService::new(resource_permission_repository, audit_repository.clone());

    let app_state = AppState {
        authorization_service,
        catalog_service,
        custom_role_service,
        resource_permission_service,
        user_directory,
        audit_repository,
        frontend_url: frontend_url.clone(),
        bootstrap_token,
    };

    let catalog_read_routes = Router::new()
        .route(
            "/api/access/catalog",
            get(handlers::access::list_catalog_handler),
        )
        .route_layer(from_fn_with_state(
            app_state.clone(),
            middleware::enforce_access,
        ))
        .layer(axum::Extension(RequiredAccess::new(
            Action::Read,
            ResourceType::Company,
        )));

    let catalog_admin_routes = Router::new()
        .route(
            "/api/access/catalog/bootstrap",
            post(handlers::access::bootstrap_catalog_handler),
        )
        .route_layer(from_fn_with_state(
            app_state.clone(),
            middleware::enforce_access,
        ))
        .layer(axum::Extension(RequiredAccess::new(
            Action::Manage,
            ResourceType::Company,
        )));

    let access_admin_routes = Router::new()
        .route(
            "/api/access/roles",
            get(handlers::access::list_roles_handler)
                .post(handlers::access::create_role_handler),
        )
        .route(
            "/api/access/roles/{role_id}",
            get(handlers::access::get_role_handler)
                .put(handlers::access::update_role_handler)
                .delete(handlers::access::deactivate_role_handler),
        )
        .route(
            "/api/access/roles/{role_id}/permissions",
            get(handlers::access::list_role_permissions_handler),
        )
        .route(
            "/api/access/roles/{role_id}/users",
            put(handlers::access::set_role_users_handler),
        )
        .route(
            "/api/access/users/{user_id}/roles",
            get(handlers::access::list_user_roles_handler)
                .put(handlers::access::set_user_roles_handler),
        )
        .route(
            "/api/access/role-assignments",
            post(handlers::access::assign_role_handler),
        )
        .route(
            "/api/access/resource-permissions",
            get(handlers::access::list_resource_permissions_handler)
                .post(handlers::access::upsert_resource_permission_handler),
        )
        .route(
            "/api/access/resource-permissions/{permission_id}",
            get(handlers::access::get_resource_permission_handler)
                .delete(handlers::access::delete_resource_permission_handler),
        )
        .route(
            "/api/access/resources/{resource_type}/{resource_id}/permissions",
            delete(handlers::access::delete_resource_overrides_handler),
        )
        .route_layer(from_fn_with_state(
            app_state.clone(),
            middleware::enforce_access,
        ))
        .layer(axum::Extension(RequiredAccess::new(
            Action::Manage,
            ResourceType::User,
        )));

    let protected_routes = Router::new()
        .merge(catalog_read_routes)
        .merge(catalog_admin_routes)
        .merge(access_admin_routes)
        .route(
            "/api/access/check",
            post(handlers::access::check_access_handler),
        )
        .route("/auth/me", get(auth::me_handler))
        .route_layer(from_fn(middleware::require_auth));

    let cors_layer = CorsLayer::new()
        .allow_origin(
            HeaderValue::from_str(&frontend_url)
                .map_err(|error| AppError::Internal(format!("invalid FRONTEND_URL: {error}")))?,
        )
        .allow_credentials(true)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE]);

    let app = Router::new()
        .route("/health", get(handlers::health::health_handler))
        .route("/auth/bootstrap", post(auth::bootstrap_handler))
        .route("/auth/logout", post(auth::logout_handler))
        .merge(protected_routes)
        .route_layer(from_fn_with_state(
            app_state.clone(),
            middleware::require_same_origin_for_mutations,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer)
        .layer(session_layer)
        .with_state(app_state);

    let host = IpAddr::from_str(&api_host)
        .map_err(|error| AppError::Internal(format!("invalid API_HOST '{api_host}': {error}")))?;
    let address = SocketAddr::from((host, api_port));

    let listener = tokio::net::TcpListener::bind(address)
        .await
        .map_err(|error| AppError::Internal(format!("failed to bind listener: {error}")))?;

    info!(%address, "talentgate-api listening");

    axum::serve(listener, app)
        .await
        .map_err(|error| AppError::Internal(format!("api server error: {error}")))
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}

fn required_env(name: &str) -> Result<String, AppError> {
    env::var(name).map_err(|_| AppError::Validation(format!("{name} is required")))
}
