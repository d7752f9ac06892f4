// src/db/audit_repo.rs

use sqlx::PgPool;

use crate::{
    common::error::AppError,
    models::audit::{AuditEntry, AuditLog},
};

// O repositório da trilha de auditoria ('audit_logs'). Só insere.
#[derive(Clone)]
pub struct AuditRepository {
    pool: PgPool,
}

impl AuditRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn insert(&self, entry: &AuditEntry) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO audit_logs (shop_owner_id, actor_user_id, action, target_type, target_id, metadata)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(entry.shop_owner_id)
        .bind(entry.actor_user_id)
        .bind(entry.action)
        .bind(entry.target_type)
        .bind(entry.target_id)
        .bind(&entry.metadata)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    // As entradas mais recentes, para a tela do administrador
    pub async fn list_recent(&self, limit: i64) -> Result<Vec<AuditLog>, AppError> {
        let entries = sqlx::query_as::<_, AuditLog>(
            "SELECT * FROM audit_logs ORDER BY created_at DESC LIMIT $1",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(entries)
    }
}
