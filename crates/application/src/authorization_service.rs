use std::sync::Arc;

use talentgate_core::{AppError, AppResult, SystemRole};
use talentgate_domain::{Action, ResourceType};
use uuid::Uuid;

use crate::access_ports::{
    CustomRoleRepository, PermissionCatalogRepository, ResourcePermissionRepository, UserDirectory,
};

/// Outcome of a permission check.
///
/// An unknown user is not a denial: enforcement points translate `Denied`
/// into a 403 and `UnknownUser` into a 401, so the two must stay distinct
/// all the way out of the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDecision {
    /// The user may perform the action.
    Granted,
    /// The user exists but is not allowed.
    Denied,
    /// The user id does not resolve to any user.
    UnknownUser,
}

impl AccessDecision {
    /// Returns whether the decision allows the request.
    #[must_use]
    pub fn is_granted(&self) -> bool {
        matches!(self, Self::Granted)
    }
}

/// The permission resolution engine.
///
/// A pure read-side decision function over the stores: it never mutates
/// anything and holds no state of its own, so it is safe to share across
/// concurrent requests.
#[derive(Clone)]
pub struct AuthorizationService {
    users: Arc<dyn UserDirectory>,
    catalog: Arc<dyn PermissionCatalogRepository>,
    custom_roles: Arc<dyn CustomRoleRepository>,
    overrides: Arc<dyn ResourcePermissionRepository>,
}

impl AuthorizationService {
    /// Creates the engine from its four lookup ports.
    #[must_use]
    pub fn new(
        users: Arc<dyn UserDirectory>,
        catalog: Arc<dyn PermissionCatalogRepository>,
        custom_roles: Arc<dyn CustomRoleRepository>,
        overrides: Arc<dyn ResourcePermissionRepository>,
    ) -> Self {
        Self {
            users,
            catalog,
            custom_roles,
            overrides,
        }
    }

    /// Resolves whether a user may perform an action on a resource type,
    /// optionally narrowed to one concrete instance.
    ///
    /// Evaluation order is fixed and short-circuits on the first decisive
    /// answer:
    ///
    /// 1. super-admin or company-admin bypass;
    /// 2. the exact per-instance override row when `resource_id` is given,
    ///    whose `is_granted` value is authoritative either way;
    /// 3. grants from the user's active custom roles;
    /// 4. the system-role default map, whose absence is the terminal no.
    ///
    /// `Manage` subsumes the CRUD actions in steps 3 and 4 only; an override
    /// in step 2 matches its action exactly. The admin bypass deliberately
    /// precedes the override lookup, so an explicit per-instance denial never
    /// locks out an administrator.
    pub async fn authorize(
        &self,
        user_id: Uuid,
        action: Action,
        resource_type: ResourceType,
        resource_id: Option<&str>,
    ) -> AppResult<AccessDecision> {
        let Some(profile) = self.users.find_access_profile(user_id).await? else {
            return Ok(AccessDecision::UnknownUser);
        };

        if profile.is_super_admin
            || profile.is_company_admin
            || profile.system_role == SystemRole::CompanyAdmin
        {
            return Ok(AccessDecision::Granted);
        }

        if let Some(resource_id) = resource_id
            && let Some(row) = self
                .overrides
                .find_override(user_id, resource_type, resource_id, action)
                .await?
        {
            return Ok(if row.is_granted {
                AccessDecision::Granted
            } else {
                AccessDecision::Denied
            });
        }

        let custom_actions = self
            .custom_roles
            .list_user_actions(user_id, resource_type)
            .await?;
        if custom_actions.iter().any(|granted| granted.implies(action)) {
            return Ok(AccessDecision::Granted);
        }

        let default_actions = self
            .catalog
            .list_role_actions(profile.system_role, resource_type)
            .await?;
        if default_actions.iter().any(|granted| granted.implies(action)) {
            return Ok(AccessDecision::Granted);
        }

        Ok(AccessDecision::Denied)
    }

    /// Resolves a check and maps the outcome onto the error taxonomy.
    ///
    /// `UnknownUser` becomes `Unauthorized` and `Denied` becomes `Forbidden`;
    /// enforcement points surface them as 401 and 403 respectively.
    pub async fn require(
        &self,
        user_id: Uuid,
        action: Action,
        resource_type: ResourceType,
        resource_id: Option<&str>,
    ) -> AppResult<()> {
        match self
            .authorize(user_id, action, resource_type, resource_id)
            .await?
        {
            AccessDecision::Granted => Ok(()),
            AccessDecision::Denied => Err(AppError::Forbidden(format!(
                "user '{user_id}' may not {} {}",
                action.as_str(),
                resource_type.as_str()
            ))),
            AccessDecision::UnknownUser => Err(AppError::Unauthorized(format!(
                "user '{user_id}' does not resolve to a known user"
            ))),
        }
    }
}
