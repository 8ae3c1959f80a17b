use std::sync::Arc;

use talentgate_core::{AppResult, SystemRole};
use talentgate_domain::{Permission, default_catalog, system_role_grants};

use crate::access_ports::{PermissionCatalogRepository, SystemRoleGrant};

/// Application service for the global permission catalog.
#[derive(Clone)]
pub struct CatalogService {
    repository: Arc<dyn PermissionCatalogRepository>,
}

impl CatalogService {
    /// Creates the service from the catalog repository.
    #[must_use]
    pub fn new(repository: Arc<dyn PermissionCatalogRepository>) -> Self {
        Self { repository }
    }

    /// Seeds the catalog and the system-role map exactly once.
    ///
    /// Guarded by an existence check: when the catalog already holds rows the
    /// call is a no-op, so it is safe to run on every boot. Returns whether
    /// seeding actually happened.
    pub async fn bootstrap(&self) -> AppResult<bool> {
        if self.repository.count_permissions().await? > 0 {
            return Ok(false);
        }

        let catalog = default_catalog();
        let mut role_grants = Vec::new();
        for role in SystemRole::all() {
            for grant in system_role_grants(*role) {
                role_grants.push(SystemRoleGrant {
                    role: *role,
                    action: grant.action,
                    resource_type: grant.resource_type,
                });
            }
        }

        self.repository.seed(&catalog, &role_grants).await?;
        Ok(true)
    }

    /// Lists the full catalog for console population.
    pub async fn list_catalog(&self) -> AppResult<Vec<Permission>> {
        self.repository.list_permissions().await
    }
}
