use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use talentgate_core::CompanyId;
use uuid::Uuid;

/// Unique identifier for a tenant-defined custom role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CustomRoleId(Uuid);

impl CustomRoleId {
    /// Creates a new random custom role identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a custom role identifier from an existing UUID value.
    #[must_use]
    pub fn from_uuid(value: Uuid) -> Self {
        Self(value)
    }

    /// Returns the underlying UUID value.
    #[must_use]
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for CustomRoleId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for CustomRoleId {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// Tenant-defined bundle of catalog permissions, assignable to many users.
///
/// Belongs to exactly one company. Deactivated roles stay in storage but are
/// excluded from permission resolution and from assignment listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomRole {
    /// Stable role identifier.
    pub id: CustomRoleId,
    /// Owning company.
    pub company_id: CompanyId,
    /// Unique role name in company scope.
    pub name: String,
    /// Free-text description.
    pub description: String,
    /// Soft-delete flag: inactive roles grant nothing.
    pub is_active: bool,
}
