// src/services/shop_owner_service.rs

use serde_json::json;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{shop_owner_repo::NewShopOwner, ShopOwnerRepository},
    models::{
        audit::AuditEntry,
        shop_owner::{RegisterShopOwnerPayload, ShopOwner},
        status::ShopOwnerStatus,
        super_admin::SuperAdmin,
    },
    services::{audit_service::AuditService, auth::hash_password},
};

#[derive(Clone)]
pub struct ShopOwnerService {
    shop_owner_repo: ShopOwnerRepository,
    audit_service: AuditService,
}

impl ShopOwnerService {
    pub fn new(shop_owner_repo: ShopOwnerRepository, audit_service: AuditService) -> Self {
        Self {
            shop_owner_repo,
            audit_service,
        }
    }

    // Auto-cadastro do dono de loja: entra como 'pending' e só loga
    // depois que um administrador aprovar.
    pub async fn register(&self, payload: &RegisterShopOwnerPayload) -> Result<ShopOwner, AppError> {
        let password_hash = hash_password(&payload.password).await?;

        let owner = self
            .shop_owner_repo
            .create(NewShopOwner {
                first_name: &payload.first_name,
                last_name: &payload.last_name,
                email: &payload.email,
                password_hash: &password_hash,
                business_name: &payload.business_name,
                business_address: &payload.business_address,
                business_type: &payload.business_type,
                registration_type: &payload.registration_type,
                operating_hours: payload.operating_hours.clone().unwrap_or_default(),
            })
            .await?;

        Ok(owner)
    }

    // A fila que o administrador vê
    pub async fn list_pending(&self) -> Result<Vec<ShopOwner>, AppError> {
        self.shop_owner_repo.list_by_status(ShopOwnerStatus::Pending).await
    }

    pub async fn approve(&self, admin: &SuperAdmin, id: Uuid) -> Result<ShopOwner, AppError> {
        self.decide(admin, id, ShopOwnerStatus::Approved, None).await
    }

    pub async fn reject(
        &self,
        admin: &SuperAdmin,
        id: Uuid,
        reason: &str,
    ) -> Result<ShopOwner, AppError> {
        self.decide(admin, id, ShopOwnerStatus::Rejected, Some(reason)).await
    }

    // Persiste a decisão: só 'pending' pode ser decidido, e o UPDATE
    // condicional garante isso mesmo sob decisões concorrentes.
    async fn decide(
        &self,
        admin: &SuperAdmin,
        id: Uuid,
        to: ShopOwnerStatus,
        reason: Option<&str>,
    ) -> Result<ShopOwner, AppError> {
        let current = self
            .shop_owner_repo
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound)?;

        if !current.status.can_transition_to(to) {
            return Err(AppError::InvalidStatusTransition {
                from: current.status.to_string(),
                to: to.to_string(),
            });
        }

        let decided = self
            .shop_owner_repo
            .decide(id, ShopOwnerStatus::Pending, to, reason)
            .await?
            // Alguém decidiu entre o nosso SELECT e o UPDATE
            .ok_or(AppError::InvalidStatusTransition {
                from: current.status.to_string(),
                to: to.to_string(),
            })?;

        let action = match to {
            ShopOwnerStatus::Approved => "shop_owner_approved",
            _ => "shop_owner_rejected",
        };
        self.audit_service.record(AuditEntry {
            shop_owner_id: Some(id),
            actor_user_id: Some(admin.id),
            action,
            target_type: "shop_owner",
            target_id: Some(id),
            metadata: json!({
                "business_name": decided.business_name,
                "rejection_reason": reason,
            }),
        });

        Ok(decided)
    }
}
