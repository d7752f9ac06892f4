// src/config.rs

use sqlx::{postgres::PgPoolOptions, PgPool};
use std::{env, time::Duration};

use crate::{
    db::{
        AuditRepository, EmployeeRepository, SessionRepository, ShopOwnerRepository,
        SuperAdminRepository, UserRepository,
    },
    services::{
        admin_service::AdminService, audit_service::AuditService, auth::AuthService,
        employee_service::EmployeeService, shop_owner_service::ShopOwnerService,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub auth_service: AuthService,
    pub employee_service: EmployeeService,
    pub shop_owner_service: ShopOwnerService,
    pub admin_service: AdminService,
    pub audit_service: AuditService,
}

impl AppState {
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL deve ser definida");
        let jwt_secret = env::var("JWT_SECRET").expect("JWT_SECRET deve ser definido");

        // Conecta ao banco de dados, usando '?' para propagar erros
        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        // --- Monta o gráfico de dependências ---
        let user_repo = UserRepository::new(db_pool.clone());
        let employee_repo = EmployeeRepository::new(db_pool.clone());
        let shop_owner_repo = ShopOwnerRepository::new(db_pool.clone());
        let super_admin_repo = SuperAdminRepository::new(db_pool.clone());
        let session_repo = SessionRepository::new(db_pool.clone());
        let audit_repo = AuditRepository::new(db_pool.clone());

        let audit_service = AuditService::new(audit_repo);
        let auth_service = AuthService::new(
            user_repo.clone(),
            employee_repo.clone(),
            shop_owner_repo.clone(),
            super_admin_repo.clone(),
            session_repo,
            jwt_secret,
            db_pool.clone(),
        );
        let employee_service = EmployeeService::new(
            employee_repo,
            user_repo,
            audit_service.clone(),
            db_pool.clone(),
        );
        let shop_owner_service = ShopOwnerService::new(shop_owner_repo, audit_service.clone());
        let admin_service = AdminService::new(super_admin_repo, audit_service.clone());

        Ok(Self {
            db_pool,
            auth_service,
            employee_service,
            shop_owner_service,
            admin_service,
            audit_service,
        })
    }
}
