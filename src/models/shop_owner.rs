// src/models/shop_owner.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::principal::{Guard, Principal};
use crate::models::status::ShopOwnerStatus;

// Horário de um dia da semana. `closed = true` ignora open/close.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct DaySchedule {
    pub open: Option<String>,
    pub close: Option<String>,
    #[serde(default)]
    pub closed: bool,
}

// A grade semanal completa de funcionamento da loja.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WeeklySchedule {
    #[serde(default)]
    pub monday: DaySchedule,
    #[serde(default)]
    pub tuesday: DaySchedule,
    #[serde(default)]
    pub wednesday: DaySchedule,
    #[serde(default)]
    pub thursday: DaySchedule,
    #[serde(default)]
    pub friday: DaySchedule,
    #[serde(default)]
    pub saturday: DaySchedule,
    #[serde(default)]
    pub sunday: DaySchedule,
}

// Representa um dono de loja (a raiz do tenant) vindo do banco.
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ShopOwner {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,

    #[serde(skip_serializing)] // IMPORTANTE para segurança
    pub password_hash: String,

    pub business_name: String,
    pub business_address: String,
    pub business_type: String,
    pub registration_type: String,

    #[schema(value_type = WeeklySchedule)]
    pub operating_hours: sqlx::types::Json<WeeklySchedule>,

    pub status: ShopOwnerStatus,
    // Preenchido apenas quando status = rejected
    pub rejection_reason: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Principal for ShopOwner {
    fn id(&self) -> Uuid {
        self.id
    }
    fn guard(&self) -> Guard {
        Guard::ShopOwner
    }
    fn is_active(&self) -> bool {
        self.status.is_active()
    }
    fn status_label(&self) -> &'static str {
        self.status.as_str()
    }
}

// Auto-cadastro completo do dono de loja. Entra sempre como "pending".
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterShopOwnerPayload {
    #[validate(length(min = 1, max = 255, message = "O primeiro nome é obrigatório."))]
    pub first_name: String,
    #[validate(length(min = 1, max = 255, message = "O sobrenome é obrigatório."))]
    pub last_name: String,
    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email: String,
    #[validate(length(min = 6, message = "A senha deve ter no mínimo 6 caracteres."))]
    pub password: String,
    #[validate(length(min = 1, max = 255, message = "O nome do negócio é obrigatório."))]
    pub business_name: String,
    #[validate(length(min = 1, message = "O endereço do negócio é obrigatório."))]
    pub business_address: String,
    #[validate(length(min = 1, message = "O tipo do negócio é obrigatório."))]
    pub business_type: String,
    #[validate(length(min = 1, message = "O tipo de registro é obrigatório."))]
    pub registration_type: String,
    pub operating_hours: Option<WeeklySchedule>,
}

// Motivo exigido ao rejeitar um cadastro
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RejectShopOwnerPayload {
    #[validate(length(min = 1, message = "O motivo da rejeição é obrigatório."))]
    pub reason: String,
}
