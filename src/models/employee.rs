// src/models/employee.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::models::principal::{Guard, Principal};
use crate::models::status::EmployeeStatus;
use crate::models::user::SystemRole;

// Especialidade funcional do funcionário dentro da loja.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "VARCHAR", rename_all = "snake_case")]
pub enum FunctionalRole {
    Hr,
    Finance,
    Crm,
    Sales,
}

impl FunctionalRole {
    pub fn as_str(self) -> &'static str {
        match self {
            FunctionalRole::Hr => "hr",
            FunctionalRole::Finance => "finance",
            FunctionalRole::Crm => "crm",
            FunctionalRole::Sales => "sales",
        }
    }
}

// Representa um funcionário vindo do banco de dados.
// Sempre pertence a exatamente um dono de loja (shop_owner_id).
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: Uuid,
    pub shop_owner_id: Uuid,
    pub name: String,
    pub email: String,

    #[serde(skip_serializing)] // IMPORTANTE para segurança
    pub password_hash: String,

    pub phone: Option<String>,
    pub address: Option<String>,
    pub position: Option<String>,
    pub department: Option<String>,
    pub branch: Option<String>,
    pub functional_role: Option<FunctionalRole>,
    pub salary: Decimal,
    pub hire_date: NaiveDate,
    pub status: EmployeeStatus,

    // Soft-delete: nunca apagamos a linha, só marcamos.
    pub deleted_at: Option<DateTime<Utc>>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Principal for Employee {
    fn id(&self) -> Uuid {
        self.id
    }
    fn guard(&self) -> Guard {
        Guard::Employee
    }
    fn is_active(&self) -> bool {
        self.deleted_at.is_none() && self.status.is_active()
    }
    fn status_label(&self) -> &'static str {
        self.status.as_str()
    }
}

// `length(min = 1)` deixaria passar um nome só de espaços
fn validate_not_blank(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        let mut err = ValidationError::new("name_blank");
        err.message = Some("O nome é obrigatório.".into());
        return Err(err);
    }
    Ok(())
}

fn validate_salary(salary: &Decimal) -> Result<(), ValidationError> {
    if salary.is_sign_negative() {
        let mut err = ValidationError::new("salary_negative");
        err.message = Some("O salário não pode ser negativo.".into());
        return Err(err);
    }
    Ok(())
}

// ---
// "Formulário" do provisionamento de funcionário.
// Só o nome, o e-mail e o papel de sistema são obrigatórios.
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateEmployeePayload {
    #[validate(
        length(min = 1, max = 255, message = "O nome é obrigatório (máx. 255 caracteres)."),
        custom(function = validate_not_blank)
    )]
    pub name: String,

    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email: String,

    pub phone: Option<String>,
    pub address: Option<String>,
    pub position: Option<String>,
    pub department: Option<String>,
    pub branch: Option<String>,
    pub functional_role: Option<FunctionalRole>,

    #[validate(custom(function = validate_salary))]
    pub salary: Option<Decimal>,

    pub hire_date: Option<NaiveDate>,
    pub status: Option<EmployeeStatus>,

    // Papel de sistema gravado na credencial (User) do funcionário
    pub role: SystemRole,
}

// Mudança de status de um funcionário existente
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateEmployeeStatusPayload {
    pub status: EmployeeStatus,
}

// ---
// Resultado do provisionamento: devolvido UMA única vez.
// A senha temporária em texto claro não é persistida nem logada.
// ---
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProvisionedEmployee {
    pub employee_id: Uuid,
    pub name: String,
    pub email: String,
    pub user_id: Uuid,
    pub temporary_password: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn salario_negativo_reprova_validacao() {
        let payload = CreateEmployeePayload {
            name: "Juan Dela Cruz".to_string(),
            email: "juan@example.com".to_string(),
            phone: None,
            address: None,
            position: None,
            department: None,
            branch: None,
            functional_role: None,
            salary: Some(Decimal::new(-100, 2)),
            hire_date: None,
            status: None,
            role: SystemRole::Staff,
        };
        assert!(payload.validate().is_err());
    }

    #[test]
    fn nome_vazio_reprova_validacao() {
        let payload = CreateEmployeePayload {
            name: String::new(),
            email: "juan@example.com".to_string(),
            phone: None,
            address: None,
            position: None,
            department: None,
            branch: None,
            functional_role: None,
            salary: None,
            hire_date: None,
            status: None,
            role: SystemRole::Hr,
        };
        let err = payload.validate().unwrap_err();
        assert!(err.field_errors().contains_key("name"));
    }

    #[test]
    fn nome_so_de_espacos_reprova_validacao() {
        let payload = CreateEmployeePayload {
            name: "   ".to_string(),
            email: "juan@example.com".to_string(),
            phone: None,
            address: None,
            position: None,
            department: None,
            branch: None,
            functional_role: None,
            salary: None,
            hire_date: None,
            status: None,
            role: SystemRole::Hr,
        };
        let err = payload.validate().unwrap_err();
        assert!(err.field_errors().contains_key("name"));
    }
}
