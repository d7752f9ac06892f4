// src/db/session_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::{principal::Guard, session::Session},
};

// O repositório de sessões ('sessions')
#[derive(Clone)]
pub struct SessionRepository {
    pool: PgPool,
}

impl SessionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // Uma linha nova por login: o id é sempre regenerado.
    pub async fn create(&self, guard: Guard, principal_id: Uuid) -> Result<Session, AppError> {
        let session = sqlx::query_as::<_, Session>(
            "INSERT INTO sessions (guard, principal_id) VALUES ($1, $2) RETURNING *",
        )
        .bind(guard.as_str())
        .bind(principal_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(session)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Session>, AppError> {
        let maybe = sqlx::query_as::<_, Session>("SELECT * FROM sessions WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(maybe)
    }

    // Revoga apenas a sessão do guard que está agindo
    pub async fn revoke(&self, id: Uuid) -> Result<(), AppError> {
        sqlx::query("UPDATE sessions SET revoked_at = NOW() WHERE id = $1 AND revoked_at IS NULL")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    // Faxina: sessões anteriores ao corte já não validam token algum
    // (o JWT expirou antes), então a linha pode sumir.
    pub async fn purge_stale(&self, cutoff: chrono::DateTime<chrono::Utc>) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM sessions WHERE created_at < $1")
            .bind(cutoff)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    #[sqlx::test]
    async fn faxina_remove_so_as_sessoes_anteriores_ao_corte(pool: PgPool) {
        let repo = SessionRepository::new(pool.clone());

        let antiga = repo.create(Guard::User, Uuid::new_v4()).await.unwrap();
        let recente = repo.create(Guard::ShopOwner, Uuid::new_v4()).await.unwrap();

        // Envelhece a primeira para além da vida útil do token
        sqlx::query("UPDATE sessions SET created_at = NOW() - INTERVAL '10 days' WHERE id = $1")
            .bind(antiga.id)
            .execute(&pool)
            .await
            .unwrap();

        let removidas = repo
            .purge_stale(Utc::now() - Duration::days(7))
            .await
            .unwrap();

        assert_eq!(removidas, 1);
        assert!(repo.find_by_id(antiga.id).await.unwrap().is_none());
        assert!(repo.find_by_id(recente.id).await.unwrap().is_some());
    }
}
