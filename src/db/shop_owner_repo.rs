// src/db/shop_owner_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::{
        shop_owner::{ShopOwner, WeeklySchedule},
        status::ShopOwnerStatus,
    },
};

// Tudo o que o INSERT de dono de loja precisa
pub struct NewShopOwner<'a> {
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub email: &'a str,
    pub password_hash: &'a str,
    pub business_name: &'a str,
    pub business_address: &'a str,
    pub business_type: &'a str,
    pub registration_type: &'a str,
    pub operating_hours: WeeklySchedule,
}

// O repositório de donos de loja ('shop_owners')
#[derive(Clone)]
pub struct ShopOwnerRepository {
    pool: PgPool,
}

impl ShopOwnerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<ShopOwner>, AppError> {
        let maybe = sqlx::query_as::<_, ShopOwner>("SELECT * FROM shop_owners WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(maybe)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<ShopOwner>, AppError> {
        let maybe = sqlx::query_as::<_, ShopOwner>("SELECT * FROM shop_owners WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(maybe)
    }

    // Cadastro entra sempre como 'pending' (default da coluna)
    pub async fn create(&self, new: NewShopOwner<'_>) -> Result<ShopOwner, AppError> {
        let owner = sqlx::query_as::<_, ShopOwner>(
            r#"
            INSERT INTO shop_owners (
                first_name, last_name, email, password_hash,
                business_name, business_address, business_type,
                registration_type, operating_hours
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(new.first_name)
        .bind(new.last_name)
        .bind(new.email)
        .bind(new.password_hash)
        .bind(new.business_name)
        .bind(new.business_address)
        .bind(new.business_type)
        .bind(new.registration_type)
        .bind(sqlx::types::Json(new.operating_hours))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::EmailAlreadyExists;
                }
            }
            e.into()
        })?;

        Ok(owner)
    }

    // A fila de aprovação do administrador
    pub async fn list_by_status(&self, status: ShopOwnerStatus) -> Result<Vec<ShopOwner>, AppError> {
        let owners = sqlx::query_as::<_, ShopOwner>(
            "SELECT * FROM shop_owners WHERE status = $1 ORDER BY created_at",
        )
        .bind(status)
        .fetch_all(&self.pool)
        .await?;
        Ok(owners)
    }

    // Persiste a decisão do administrador. O WHERE exige o status de
    // origem: duas decisões concorrentes não sobrescrevem uma à outra.
    pub async fn decide(
        &self,
        id: Uuid,
        from: ShopOwnerStatus,
        to: ShopOwnerStatus,
        rejection_reason: Option<&str>,
    ) -> Result<Option<ShopOwner>, AppError> {
        let maybe = sqlx::query_as::<_, ShopOwner>(
            r#"
            UPDATE shop_owners
            SET status = $3, rejection_reason = $4, updated_at = NOW()
            WHERE id = $1 AND status = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(from)
        .bind(to)
        .bind(rejection_reason)
        .fetch_optional(&self.pool)
        .await?;

        Ok(maybe)
    }
}
