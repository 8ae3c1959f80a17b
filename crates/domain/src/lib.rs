//! Domain entities and invariants.

#![forbid(unsafe_code)]

mod access;
mod audit;
mod catalog;
mod custom_role;
mod resource_permission;
mod user;

pub use access::{Action, Permission, PermissionId, ResourceType};
pub use audit::AuditAction;
pub use catalog::{RoleGrant, default_catalog, system_role_grants};
pub use custom_role::{CustomRole, CustomRoleId};
pub use resource_permission::{ResourcePermission, ResourcePermissionId};
pub use user::UserAccessProfile;
