use talentgate_application::AccessDecision;
use talentgate_domain::{Action, ResourceType};

use super::*;

pub async fn check_access_handler(
    State(state): State<AppState>,
    Json(payload): Json<AccessCheckRequest>,
) -> ApiResult<Json<AccessCheckResponse>> {
    let user_id = parse_uuid(&payload.user_id, "user id")?;
    let action = payload.action.parse::<Action>()?;
    let resource_type = payload.resource_type.parse::<ResourceType>()?;

    let decision = state
        .authorization_service
        .authorize(user_id, action, resource_type, payload.resource_id.as_deref())
        .await?;

    let label = match decision {
        AccessDecision::Granted => "granted",
        AccessDecision::Denied => "denied",
        AccessDecision::UnknownUser => "unknown_user",
    };

    Ok(Json(AccessCheckResponse {
        decision: label.to_owned(),
        granted: decision.is_granted(),
    }))
}
