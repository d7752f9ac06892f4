// src/db/super_admin_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::{status::AccountStatus, super_admin::SuperAdmin},
};

// O repositório de operadores da plataforma ('super_admins')
#[derive(Clone)]
pub struct SuperAdminRepository {
    pool: PgPool,
}

impl SuperAdminRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<SuperAdmin>, AppError> {
        let maybe = sqlx::query_as::<_, SuperAdmin>("SELECT * FROM super_admins WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(maybe)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<SuperAdmin>, AppError> {
        let maybe = sqlx::query_as::<_, SuperAdmin>("SELECT * FROM super_admins WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(maybe)
    }

    pub async fn set_status(&self, id: Uuid, status: AccountStatus) -> Result<(), AppError> {
        sqlx::query("UPDATE super_admins SET status = $2, updated_at = NOW() WHERE id = $1")
            .bind(id)
            .bind(status)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
