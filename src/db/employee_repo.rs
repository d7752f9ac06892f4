// src/db/employee_repo.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::{
        employee::{Employee, FunctionalRole},
        status::EmployeeStatus,
    },
};

// Tudo o que o INSERT de funcionário precisa, já validado pelo serviço.
pub struct NewEmployee<'a> {
    pub shop_owner_id: Uuid,
    pub name: &'a str,
    pub email: &'a str,
    pub password_hash: &'a str,
    pub phone: Option<&'a str>,
    pub address: Option<&'a str>,
    pub position: Option<&'a str>,
    pub department: Option<&'a str>,
    pub branch: Option<&'a str>,
    pub functional_role: Option<FunctionalRole>,
    pub salary: Decimal,
    pub hire_date: NaiveDate,
    pub status: EmployeeStatus,
}

// O repositório de funcionários ('employees')
#[derive(Clone)]
pub struct EmployeeRepository {
    pool: PgPool,
}

impl EmployeeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // Busca por e-mail incluindo soft-deletados: o e-mail continua
    // ocupado mesmo depois do desligamento (a constraint também vale).
    pub async fn find_by_email_any(&self, email: &str) -> Result<Option<Employee>, AppError> {
        let maybe = sqlx::query_as::<_, Employee>("SELECT * FROM employees WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(maybe)
    }

    // Busca por e-mail para autenticação: soft-deletados não entram.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<Employee>, AppError> {
        let maybe = sqlx::query_as::<_, Employee>(
            "SELECT * FROM employees WHERE email = $1 AND deleted_at IS NULL",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(maybe)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Employee>, AppError> {
        let maybe = sqlx::query_as::<_, Employee>(
            "SELECT * FROM employees WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(maybe)
    }

    // Lista os funcionários (vivos) de um dono de loja
    pub async fn list_for_owner(&self, shop_owner_id: Uuid) -> Result<Vec<Employee>, AppError> {
        let employees = sqlx::query_as::<_, Employee>(
            "SELECT * FROM employees WHERE shop_owner_id = $1 AND deleted_at IS NULL ORDER BY created_at",
        )
        .bind(shop_owner_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(employees)
    }

    // Cria o funcionário dentro da transação do provisionamento
    pub async fn create<'e, E>(&self, executor: E, new: NewEmployee<'_>) -> Result<Employee, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let employee = sqlx::query_as::<_, Employee>(
            r#"
            INSERT INTO employees (
                shop_owner_id, name, email, password_hash,
                phone, address, position, department, branch,
                functional_role, salary, hire_date, status
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            RETURNING *
            "#,
        )
        .bind(new.shop_owner_id)
        .bind(new.name)
        .bind(new.email)
        .bind(new.password_hash)
        .bind(new.phone)
        .bind(new.address)
        .bind(new.position)
        .bind(new.department)
        .bind(new.branch)
        .bind(new.functional_role)
        .bind(new.salary)
        .bind(new.hire_date)
        .bind(new.status)
        .fetch_one(executor)
        .await
        .map_err(map_unique_violation)?;

        Ok(employee)
    }

    pub async fn update_status(
        &self,
        id: Uuid,
        shop_owner_id: Uuid,
        status: EmployeeStatus,
    ) -> Result<Employee, AppError> {
        let employee = sqlx::query_as::<_, Employee>(
            r#"
            UPDATE employees SET status = $3, updated_at = NOW()
            WHERE id = $1 AND shop_owner_id = $2 AND deleted_at IS NULL
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(shop_owner_id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AppError::NotFound)?;

        Ok(employee)
    }

    // Soft-delete: marca deleted_at e devolve a linha para o serviço
    // desativar a credencial (User) correspondente na mesma transação.
    pub async fn soft_delete<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        shop_owner_id: Uuid,
    ) -> Result<Employee, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let employee = sqlx::query_as::<_, Employee>(
            r#"
            UPDATE employees SET deleted_at = NOW(), updated_at = NOW()
            WHERE id = $1 AND shop_owner_id = $2 AND deleted_at IS NULL
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(shop_owner_id)
        .fetch_optional(executor)
        .await?
        .ok_or(AppError::NotFound)?;

        Ok(employee)
    }
}

fn map_unique_violation(e: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.is_unique_violation() {
            return match db_err.constraint() {
                Some("employees_email_key") => AppError::EmailAlreadyEmployee,
                Some(constraint) => AppError::UniqueConstraintViolation(constraint.to_string()),
                None => AppError::EmailAlreadyExists,
            };
        }
    }
    e.into()
}
