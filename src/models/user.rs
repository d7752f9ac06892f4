// src/models/user.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::principal::{Guard, Principal};
use crate::models::status::AccountStatus;

// Papel de sistema que a credencial carrega. Decide o que o
// funcionário consegue abrir dentro da loja.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(type_name = "VARCHAR", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SystemRole {
    Hr,
    FinanceStaff,
    FinanceManager,
    Crm,
    Manager,
    Staff,
    Scm,
    Mrp,
}

impl SystemRole {
    pub fn as_str(self) -> &'static str {
        match self {
            SystemRole::Hr => "HR",
            SystemRole::FinanceStaff => "FINANCE_STAFF",
            SystemRole::FinanceManager => "FINANCE_MANAGER",
            SystemRole::Crm => "CRM",
            SystemRole::Manager => "MANAGER",
            SystemRole::Staff => "STAFF",
            SystemRole::Scm => "SCM",
            SystemRole::Mrp => "MRP",
        }
    }
}

// Representa um usuário vindo do banco de dados
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,

    #[serde(skip_serializing)] // IMPORTANTE para segurança
    pub password_hash: String,

    pub role: SystemRole,
    pub status: AccountStatus,

    // Obriga a troca de senha no primeiro acesso (senha temporária)
    pub force_password_change: bool,

    pub last_login_at: Option<DateTime<Utc>>,
    pub last_login_ip: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Principal for User {
    fn id(&self) -> Uuid {
        self.id
    }
    fn guard(&self) -> Guard {
        Guard::User
    }
    fn is_active(&self) -> bool {
        self.status.is_active()
    }
    fn status_label(&self) -> &'static str {
        self.status.as_str()
    }
}

// Dados para registro de um novo usuário (cliente)
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterUserPayload {
    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email: String,
    #[validate(length(min = 6, message = "A senha deve ter no mínimo 6 caracteres."))]
    pub password: String,
}
