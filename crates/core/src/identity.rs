use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{AppError, CompanyId};

/// Fixed global roles every user holds exactly one of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SystemRole {
    /// Tenant administrator, granted everything by construction.
    CompanyAdmin,
    /// Manages postings and the hiring pipeline.
    HiringManager,
    /// Works candidates and interviews day to day.
    Recruiter,
    /// Conducts interviews and writes evaluations.
    Interviewer,
    /// Read-only access to tenant data.
    Readonly,
}

impl SystemRole {
    /// Returns a stable storage value for this role.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CompanyAdmin => "company_admin",
            Self::HiringManager => "hiring_manager",
            Self::Recruiter => "recruiter",
            Self::Interviewer => "interviewer",
            Self::Readonly => "readonly",
        }
    }

    /// Returns all known system roles.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[SystemRole] = &[
            SystemRole::CompanyAdmin,
            SystemRole::HiringManager,
            SystemRole::Recruiter,
            SystemRole::Interviewer,
            SystemRole::Readonly,
        ];

        ALL
    }
}

impl FromStr for SystemRole {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "company_admin" => Ok(Self::CompanyAdmin),
            "hiring_manager" => Ok(Self::HiringManager),
            "recruiter" => Ok(Self::Recruiter),
            "interviewer" => Ok(Self::Interviewer),
            "readonly" => Ok(Self::Readonly),
            _ => Err(AppError::Validation(format!(
                "unknown system role value '{value}'"
            ))),
        }
    }
}

/// User information persisted in the authenticated session.
///
/// Carries exactly the attributes the authorization engine reads; everything
/// else about a user belongs to the identity collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorIdentity {
    user_id: Uuid,
    system_role: SystemRole,
    is_super_admin: bool,
    is_company_admin: bool,
    company_id: CompanyId,
}

impl ActorIdentity {
    /// Creates an actor identity from authentication and tenancy data.
    #[must_use]
    pub fn new(
        user_id: Uuid,
        system_role: SystemRole,
        is_super_admin: bool,
        is_company_admin: bool,
        company_id: CompanyId,
    ) -> Self {
        Self {
            user_id,
            system_role,
            is_super_admin,
            is_company_admin,
            company_id,
        }
    }

    /// Returns the stable user identifier.
    #[must_use]
    pub fn user_id(&self) -> Uuid {
        self.user_id
    }

    /// Returns the fixed system role.
    #[must_use]
    pub fn system_role(&self) -> SystemRole {
        self.system_role
    }

    /// Returns whether the user is a platform super-admin.
    #[must_use]
    pub fn is_super_admin(&self) -> bool {
        self.is_super_admin
    }

    /// Returns whether the user administers their company.
    #[must_use]
    pub fn is_company_admin(&self) -> bool {
        self.is_company_admin
    }

    /// Returns the company the user belongs to.
    #[must_use]
    pub fn company_id(&self) -> CompanyId {
        self.company_id
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::SystemRole;

    #[test]
    fn system_role_roundtrip_storage_value() {
        for role in SystemRole::all() {
            let restored = SystemRole::from_str(role.as_str());
            assert!(restored.is_ok());
            assert_eq!(restored.unwrap_or(SystemRole::Readonly), *role);
        }
    }

    #[test]
    fn unknown_system_role_is_rejected() {
        let parsed = SystemRole::from_str("owner");
        assert!(parsed.is_err());
    }
}
