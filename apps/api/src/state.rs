use std::sync::Arc;

use talentgate_application::{
    AuditRepository, AuthorizationService, CatalogService, CustomRoleService,
    ResourcePermissionService, UserDirectory,
};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub authorization_service: AuthorizationService,
    pub catalog_service: CatalogService,
    pub custom_role_service: CustomRoleService,
    pub resource_permission_service: ResourcePermissionService,
    pub user_directory: Arc<dyn UserDirectory>,
    pub audit_repository: Arc<dyn AuditRepository>,
    pub frontend_url: String,
    pub bootstrap_token: String,
}
