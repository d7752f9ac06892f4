// src/models/super_admin.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::principal::{Guard, Principal};
use crate::models::status::AccountStatus;

// Operador da plataforma. Controla a fila de aprovação de lojas.
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SuperAdmin {
    pub id: Uuid,
    pub name: String,
    pub email: String,

    #[serde(skip_serializing)] // IMPORTANTE para segurança
    pub password_hash: String,

    pub status: AccountStatus,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Principal for SuperAdmin {
    fn id(&self) -> Uuid {
        self.id
    }
    fn guard(&self) -> Guard {
        Guard::SuperAdmin
    }
    fn is_active(&self) -> bool {
        self.status.is_active()
    }
    fn status_label(&self) -> &'static str {
        self.status.as_str()
    }
}

// Mudança de status de um operador (suspender/reativar)
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateAdminStatusPayload {
    pub status: AccountStatus,
}
