//! Actions, resource types, and the global permission catalog entry.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use talentgate_core::AppError;
use uuid::Uuid;

/// Operations a permission can allow on a resource type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Create new instances.
    Create,
    /// Read existing instances.
    Read,
    /// Update existing instances.
    Update,
    /// Delete existing instances.
    Delete,
    /// Full control; subsumes the four CRUD actions in role-derived grants.
    Manage,
}

impl Action {
    /// Returns a stable storage value for this action.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Read => "read",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::Manage => "manage",
        }
    }

    /// Returns all known actions.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[Action] = &[
            Action::Create,
            Action::Read,
            Action::Update,
            Action::Delete,
            Action::Manage,
        ];

        ALL
    }

    /// Returns whether a granted action satisfies a requested one.
    ///
    /// `Manage` satisfies every action on the same resource type; the reverse
    /// never holds. Only used for role-derived grants: explicit per-instance
    /// overrides match their action exactly.
    #[must_use]
    pub fn implies(&self, requested: Action) -> bool {
        *self == requested || *self == Action::Manage
    }
}

impl FromStr for Action {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "create" => Ok(Self::Create),
            "read" => Ok(Self::Read),
            "update" => Ok(Self::Update),
            "delete" => Ok(Self::Delete),
            "manage" => Ok(Self::Manage),
            _ => Err(AppError::Validation(format!(
                "unknown action value '{value}'"
            ))),
        }
    }
}

impl Display for Action {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Closed set of resource types the catalog covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceType {
    /// The tenant itself.
    Company,
    /// User accounts within a company.
    User,
    /// Organizational departments.
    Department,
    /// Teams inside departments.
    Team,
    /// Open and closed job postings.
    JobPosting,
    /// Candidates in the pipeline.
    Candidate,
    /// Scheduled and completed interviews.
    Interview,
    /// Interview evaluations.
    Evaluation,
    /// Reporting and dashboard data.
    Report,
}

impl ResourceType {
    /// Returns a stable storage value for this resource type.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Company => "company",
            Self::User => "user",
            Self::Department => "department",
            Self::Team => "team",
            Self::JobPosting => "job_posting",
            Self::Candidate => "candidate",
            Self::Interview => "interview",
            Self::Evaluation => "evaluation",
            Self::Report => "report",
        }
    }

    /// Returns all known resource types.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[ResourceType] = &[
            ResourceType::Company,
            ResourceType::User,
            ResourceType::Department,
            ResourceType::Team,
            ResourceType::JobPosting,
            ResourceType::Candidate,
            ResourceType::Interview,
            ResourceType::Evaluation,
            ResourceType::Report,
        ];

        ALL
    }
}

impl FromStr for ResourceType {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "company" => Ok(Self::Company),
            "user" => Ok(Self::User),
            "department" => Ok(Self::Department),
            "team" => Ok(Self::Team),
            "job_posting" => Ok(Self::JobPosting),
            "candidate" => Ok(Self::Candidate),
            "interview" => Ok(Self::Interview),
            "evaluation" => Ok(Self::Evaluation),
            "report" => Ok(Self::Report),
            _ => Err(AppError::Validation(format!(
                "unknown resource type value '{value}'"
            ))),
        }
    }
}

impl Display for ResourceType {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Unique identifier for a catalog permission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PermissionId(Uuid);

impl PermissionId {
    /// Creates a new random permission identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a permission identifier from an existing UUID value.
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

impl Default for PermissionId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for PermissionId {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// One entry of the global permission catalog.
///
/// Identity is `(action, resource_type)`; the pair is unique across the
/// catalog and shared by all tenants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permission {
    /// Stable permission identifier.
    pub id: PermissionId,
    /// The allowed operation.
    pub action: Action,
    /// The resource type the operation applies to.
    pub resource_type: ResourceType,
    /// Human-readable permission name.
    pub name: String,
    /// Free-text description; the only mutable attribute after seeding.
    pub description: String,
}
