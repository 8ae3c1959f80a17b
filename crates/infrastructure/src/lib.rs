//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod postgres_audit_repository;
mod postgres_custom_role_repository;
mod postgres_permission_catalog_repository;
mod postgres_resource_permission_repository;
mod postgres_user_directory;
mod row_decode;

pub use postgres_audit_repository::PostgresAuditRepository;
pub use postgres_custom_role_repository::PostgresCustomRoleRepository;
pub use postgres_permission_catalog_repository::PostgresPermissionCatalogRepository;
pub use postgres_resource_permission_repository::PostgresResourcePermissionRepository;
pub use postgres_user_directory::PostgresUserDirectory;
