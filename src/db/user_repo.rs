// src/db/user_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::{status::AccountStatus, user::{SystemRole, User}},
};

// O repositório de usuários, responsável por todas as interações com a tabela 'users'
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // Busca um usuário pelo seu e-mail
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let maybe_user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(maybe_user)
    }

    // Busca um usuário pelo seu ID
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError> {
        let maybe_user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(maybe_user)
    }

    // Cria um novo usuário. Aceita um executor para participar de uma
    // transação maior (caso do provisionamento de funcionário).
    pub async fn create_user<'e, E>(
        &self,
        executor: E,
        first_name: &str,
        last_name: &str,
        email: &str,
        password_hash: &str,
        role: SystemRole,
        force_password_change: bool,
    ) -> Result<User, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (first_name, last_name, email, password_hash, role, force_password_change)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(first_name)
        .bind(last_name)
        .bind(email)
        .bind(password_hash)
        .bind(role)
        .bind(force_password_change)
        .fetch_one(executor)
        .await
        .map_err(map_unique_violation)?;

        Ok(user)
    }

    // Registra o último login (melhor esforço, chamado fora de transação)
    pub async fn record_login(&self, id: Uuid, origin_ip: Option<&str>) -> Result<(), AppError> {
        sqlx::query(
            "UPDATE users SET last_login_at = NOW(), last_login_ip = $2, updated_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .bind(origin_ip)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    // Muda o status da credencial (ex.: inactive no soft-delete do funcionário)
    pub async fn set_status_by_email<'e, E>(
        &self,
        executor: E,
        email: &str,
        status: AccountStatus,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query("UPDATE users SET status = $2, updated_at = NOW() WHERE email = $1")
            .bind(email)
            .bind(status)
            .execute(executor)
            .await?;
        Ok(())
    }
}

// Converte violação de chave única em erro amigável. A constraint é o
// backstop real contra corridas: o pré-check do serviço é só cortesia.
fn map_unique_violation(e: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.is_unique_violation() {
            return match db_err.constraint() {
                Some("users_email_key") => AppError::EmailAlreadyUser,
                Some(constraint) => AppError::UniqueConstraintViolation(constraint.to_string()),
                None => AppError::EmailAlreadyExists,
            };
        }
    }
    e.into()
}
