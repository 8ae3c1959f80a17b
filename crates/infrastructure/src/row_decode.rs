//! Decoding helpers for enum columns stored as stable strings.

use std::str::FromStr;

use talentgate_core::{AppError, SystemRole};
use talentgate_domain::{Action, ResourceType};

pub(crate) fn decode_action(value: &str) -> Result<Action, AppError> {
    Action::from_str(value)
        .map_err(|error| AppError::Internal(format!("invalid stored action '{value}': {error}")))
}

pub(crate) fn decode_resource_type(value: &str) -> Result<ResourceType, AppError> {
    ResourceType::from_str(value).map_err(|error| {
        AppError::Internal(format!("invalid stored resource type '{value}': {error}"))
    })
}

pub(crate) fn decode_system_role(value: &str) -> Result<SystemRole, AppError> {
    SystemRole::from_str(value).map_err(|error| {
        AppError::Internal(format!("invalid stored system role '{value}': {error}"))
    })
}

#[cfg(test)]
mod tests {
    use talentgate_core::AppError;
    use talentgate_domain::Action;

    use super::{decode_action, decode_resource_type};

    #[test]
    fn known_values_decode() {
        assert!(matches!(decode_action("manage"), Ok(Action::Manage)));
        assert!(decode_resource_type("job_posting").is_ok());
    }

    #[test]
    fn corrupt_values_surface_as_internal_errors() {
        assert!(matches!(
            decode_action("approve"),
            Err(AppError::Internal(_))
        ));
    }
}
