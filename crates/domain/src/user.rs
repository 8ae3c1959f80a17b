use serde::{Deserialize, Serialize};
use talentgate_core::{CompanyId, SystemRole};
use uuid::Uuid;

/// The user attributes the authorization engine reads, and nothing else.
///
/// Users are owned by the identity collaborator; this projection is resolved
/// through the `UserDirectory` port at decision time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAccessProfile {
    /// Stable user identifier.
    pub user_id: Uuid,
    /// Fixed system role.
    pub system_role: SystemRole,
    /// Platform-wide bypass flag.
    pub is_super_admin: bool,
    /// Tenant-admin bypass flag.
    pub is_company_admin: bool,
    /// Company the user belongs to.
    pub company_id: CompanyId,
}
