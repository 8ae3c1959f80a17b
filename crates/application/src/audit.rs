use async_trait::async_trait;
use talentgate_core::{AppResult, CompanyId};
use talentgate_domain::AuditAction;
use uuid::Uuid;

/// One structured audit record appended by application use-cases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditEvent {
    /// Tenant the event belongs to.
    pub company_id: CompanyId,
    /// User who performed the operation.
    pub actor_user_id: Uuid,
    /// Stable action identifier.
    pub action: AuditAction,
    /// Resource type the event refers to.
    pub resource_type: String,
    /// Resource identifier the event refers to.
    pub resource_id: String,
    /// Optional human-readable detail.
    pub detail: Option<String>,
}

/// Append-only audit sink.
#[async_trait]
pub trait AuditRepository: Send + Sync {
    /// Appends one event; failures propagate, they are never swallowed.
    async fn append_event(&self, event: AuditEvent) -> AppResult<()>;
}
