use std::fmt::{Display, Formatter};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::access::{Action, ResourceType};

/// Unique identifier for a resource-level permission override.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourcePermissionId(Uuid);

impl ResourcePermissionId {
    /// Creates a new random override identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates an override identifier from an existing UUID value.
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

impl Default for ResourcePermissionId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for ResourcePermissionId {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// Per-user, per-instance grant or denial.
///
/// At most one row exists per `(user_id, resource_type, resource_id, action)`
/// tuple. `is_granted = false` is an authoritative denial for that exact
/// tuple, not merely an absent grant: it short-circuits every role-derived
/// grant during resolution. Overrides never subsume across actions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourcePermission {
    /// Stable override identifier.
    pub id: ResourcePermissionId,
    /// The user the override applies to.
    pub user_id: Uuid,
    /// Resource type of the concrete instance.
    pub resource_type: ResourceType,
    /// Identifier of the concrete instance; never dereferenced here.
    pub resource_id: String,
    /// The single action the override covers.
    pub action: Action,
    /// Grant when true, authoritative denial when false.
    pub is_granted: bool,
    /// Last write timestamp.
    pub updated_at: DateTime<Utc>,
}
