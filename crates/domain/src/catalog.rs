//! Declarative catalog and system-role grant map consumed by bootstrap.
//!
//! Configuration expressed in code: the bootstrap seeding operation inserts
//! exactly what these functions return, guarded by an existence check so it
//! runs at most once.

use talentgate_core::SystemRole;

use crate::access::{Action, Permission, PermissionId, ResourceType};

/// One role-map entry derived for a system role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RoleGrant {
    /// The granted operation.
    pub action: Action,
    /// The resource type the grant applies to.
    pub resource_type: ResourceType,
}

/// Returns the fixed global catalog: every action on every resource type.
#[must_use]
pub fn default_catalog() -> Vec<Permission> {
    let mut entries = Vec::with_capacity(Action::all().len() * ResourceType::all().len());

    for resource_type in ResourceType::all() {
        for action in Action::all() {
            entries.push(Permission {
                id: PermissionId::new(),
                action: *action,
                resource_type: *resource_type,
                name: format!("{} {}", action.as_str(), resource_type.as_str()),
                description: format!(
                    "Allows {} operations on {} resources",
                    action.as_str(),
                    resource_type.as_str()
                ),
            });
        }
    }

    entries
}

/// Returns the default grant map for a system role.
///
/// `CompanyAdmin` returns no rows: the engine grants it everything by
/// construction and never consults the role map for it.
#[must_use]
pub fn system_role_grants(role: SystemRole) -> Vec<RoleGrant> {
    match role {
        SystemRole::CompanyAdmin => Vec::new(),
        SystemRole::HiringManager => grants(&[
            (Action::Read, ResourceType::Company),
            (Action::Read, ResourceType::User),
            (Action::Manage, ResourceType::Department),
            (Action::Manage, ResourceType::Team),
            (Action::Manage, ResourceType::JobPosting),
            (Action::Manage, ResourceType::Candidate),
            (Action::Manage, ResourceType::Interview),
            (Action::Manage, ResourceType::Evaluation),
            (Action::Manage, ResourceType::Report),
        ]),
        SystemRole::Recruiter => grants(&[
            (Action::Read, ResourceType::Company),
            (Action::Read, ResourceType::User),
            (Action::Manage, ResourceType::Department),
            (Action::Manage, ResourceType::Team),
            (Action::Manage, ResourceType::JobPosting),
            (Action::Manage, ResourceType::Candidate),
            (Action::Manage, ResourceType::Interview),
            (Action::Read, ResourceType::Evaluation),
            (Action::Read, ResourceType::Report),
        ]),
        SystemRole::Interviewer => grants(&[
            (Action::Read, ResourceType::Department),
            (Action::Read, ResourceType::Team),
            (Action::Read, ResourceType::JobPosting),
            (Action::Read, ResourceType::Candidate),
            (Action::Read, ResourceType::Interview),
            (Action::Manage, ResourceType::Evaluation),
        ]),
        SystemRole::Readonly => ResourceType::all()
            .iter()
            .map(|resource_type| RoleGrant {
                action: Action::Read,
                resource_type: *resource_type,
            })
            .collect(),
    }
}

fn grants(entries: &[(Action, ResourceType)]) -> Vec<RoleGrant> {
    entries
        .iter()
        .map(|(action, resource_type)| RoleGrant {
            action: *action,
            resource_type: *resource_type,
        })
        .collect()
}
