// src/services/admin_service.rs

use serde_json::json;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::SuperAdminRepository,
    models::{audit::AuditEntry, status::AccountStatus, super_admin::SuperAdmin},
    services::audit_service::AuditService,
};

#[derive(Clone)]
pub struct AdminService {
    super_admin_repo: SuperAdminRepository,
    audit_service: AuditService,
}

impl AdminService {
    pub fn new(super_admin_repo: SuperAdminRepository, audit_service: AuditService) -> Self {
        Self {
            super_admin_repo,
            audit_service,
        }
    }

    // Suspende/reativa outro operador. A suspensão derruba a sessão
    // dele na próxima requisição (logout forçado na autorização).
    pub async fn set_status(
        &self,
        actor: &SuperAdmin,
        target_id: Uuid,
        new_status: AccountStatus,
    ) -> Result<SuperAdmin, AppError> {
        let target = self
            .super_admin_repo
            .find_by_id(target_id)
            .await?
            .ok_or(AppError::NotFound)?;

        if target.status == new_status {
            return Ok(target);
        }
        if !target.status.can_transition_to(new_status) {
            return Err(AppError::InvalidStatusTransition {
                from: target.status.to_string(),
                to: new_status.to_string(),
            });
        }

        self.super_admin_repo.set_status(target_id, new_status).await?;

        self.audit_service.record(AuditEntry {
            shop_owner_id: None,
            actor_user_id: Some(actor.id),
            action: "super_admin_status_changed",
            target_type: "super_admin",
            target_id: Some(target_id),
            metadata: json!({
                "from": target.status.as_str(),
                "to": new_status.as_str(),
            }),
        });

        self.super_admin_repo
            .find_by_id(target_id)
            .await?
            .ok_or(AppError::NotFound)
    }
}
