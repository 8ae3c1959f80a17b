use serde::{Deserialize, Serialize};

/// Stable audit actions emitted by application use-cases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    /// Emitted when the permission catalog is seeded.
    CatalogSeeded,
    /// Emitted when a custom role is created.
    RoleCreated,
    /// Emitted when a custom role is renamed or its permission set replaced.
    RoleUpdated,
    /// Emitted when a custom role is soft-deleted.
    RoleDeactivated,
    /// Emitted when a single role is assigned to a user.
    RoleAssigned,
    /// Emitted when a user's or role's assignment set is replaced in bulk.
    RoleAssignmentsReplaced,
    /// Emitted when a resource-level override is created or updated.
    OverrideSaved,
    /// Emitted when a resource-level override is removed.
    OverrideRemoved,
}

impl AuditAction {
    /// Returns a stable storage value for this action.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CatalogSeeded => "access.catalog.seeded",
            Self::RoleCreated => "access.role.created",
            Self::RoleUpdated => "access.role.updated",
            Self::RoleDeactivated => "access.role.deactivated",
            Self::RoleAssigned => "access.role.assigned",
            Self::RoleAssignmentsReplaced => "access.role.assignments_replaced",
            Self::OverrideSaved => "access.override.saved",
            Self::OverrideRemoved => "access.override.removed",
        }
    }
}
