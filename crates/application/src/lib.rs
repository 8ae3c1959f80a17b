//! Application services and ports.

#![forbid(unsafe_code)]

mod access_ports;
mod audit;
mod authorization_service;
mod catalog_service;
mod custom_role_service;
mod resource_permission_service;
#[cfg(test)]
mod test_support;

pub use access_ports::{
    CustomRoleRepository, PermissionCatalogRepository, ResourcePermissionFilter,
    ResourcePermissionRepository, ResourcePermissionUpsert, SystemRoleGrant, UserDirectory,
};
pub use audit::{AuditEvent, AuditRepository};
pub use authorization_service::{AccessDecision, AuthorizationService};
pub use catalog_service::CatalogService;
pub use custom_role_service::{CreateCustomRoleInput, CustomRoleService, UpdateCustomRoleInput};
pub use resource_permission_service::{ResourcePermissionService, UpsertResourcePermissionInput};
