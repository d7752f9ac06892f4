//src/main.rs

use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod common;
mod config;
mod db;
mod docs;
mod handlers;
mod middleware;
mod models;
mod services;

use crate::config::AppState;
use crate::middleware::auth::{admin_guard, employee_guard, shop_owner_guard, user_guard};

#[tokio::main]
async fn main() {
    // Inicializa o logger
    tracing_subscriber::fmt().with_target(false).compact().init();

    // .expect() é bom aqui: se a configuração falhar, a aplicação não deve iniciar.
    let app_state = AppState::new()
        .await
        .expect("Falha ao inicializar o estado da aplicação.");

    // Roda as migrações do SQLx na inicialização
    sqlx::migrate!()
        .run(&app_state.db_pool)
        .await
        .expect("Falha ao rodar as migrações do banco de dados.");

    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

    // Faxina periódica de sessões: revogadas ou não, linhas mais velhas
    // que a vida útil do token são apenas lixo acumulado.
    let session_repo = db::SessionRepository::new(app_state.db_pool.clone());
    tokio::spawn(async move {
        let mut tick = tokio::time::interval(std::time::Duration::from_secs(60 * 60));
        loop {
            tick.tick().await;
            let cutoff = chrono::Utc::now() - chrono::Duration::days(services::auth::TOKEN_TTL_DAYS);
            match session_repo.purge_stale(cutoff).await {
                Ok(0) => {}
                Ok(n) => tracing::info!("Faxina de sessões: {} linhas removidas", n),
                Err(e) => tracing::warn!("Falha na faxina de sessões: {}", e),
            }
        }
    });

    // --- Rotas por guard: cada grupo protegido usa SÓ o seu guard ---

    // Usuário (cliente): registro e login públicos, logout protegido
    let user_auth_routes = Router::new()
        .route("/register", post(handlers::auth::register_user))
        .route("/login", post(handlers::auth::login_user))
        .route(
            "/logout",
            post(handlers::auth::logout_user).layer(axum_middleware::from_fn_with_state(
                app_state.clone(),
                user_guard,
            )),
        );

    // Funcionário: login público, logout protegido
    let employee_auth_routes = Router::new()
        .route("/login", post(handlers::auth::login_employee))
        .route(
            "/logout",
            post(handlers::auth::logout_employee).layer(axum_middleware::from_fn_with_state(
                app_state.clone(),
                employee_guard,
            )),
        );

    // Dono de loja: cadastro completo (entra 'pending') e sessão
    let shop_auth_routes = Router::new()
        .route("/register", post(handlers::shop_owner::register_shop_owner))
        .route("/login", post(handlers::shop_owner::login_shop_owner))
        .route(
            "/logout",
            post(handlers::shop_owner::logout_shop_owner).layer(
                axum_middleware::from_fn_with_state(app_state.clone(), shop_owner_guard),
            ),
        );

    // Gestão de funcionários: tudo atrás do guard de dono de loja
    let employee_routes = Router::new()
        .route(
            "/",
            post(handlers::employees::create_employee).get(handlers::employees::list_employees),
        )
        .route(
            "/{id}/status",
            axum::routing::patch(handlers::employees::update_employee_status),
        )
        .route(
            "/{id}",
            axum::routing::delete(handlers::employees::remove_employee),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            shop_owner_guard,
        ));

    // Admin: login público; fila de aprovação atrás do guard
    let admin_auth_routes = Router::new()
        .route("/login", post(handlers::admin::login_admin))
        .route(
            "/logout",
            post(handlers::admin::logout_admin).layer(axum_middleware::from_fn_with_state(
                app_state.clone(),
                admin_guard,
            )),
        );

    let admin_routes = Router::new()
        .route(
            "/shop-owners/pending",
            get(handlers::admin::list_pending_shop_owners),
        )
        .route(
            "/admins/{id}/status",
            axum::routing::patch(handlers::admin::set_admin_status),
        )
        .route("/audit-logs", get(handlers::admin::list_audit_logs))
        .route(
            "/shop-owners/{id}/approve",
            post(handlers::admin::approve_shop_owner),
        )
        .route(
            "/shop-owners/{id}/reject",
            post(handlers::admin::reject_shop_owner),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            admin_guard,
        ));

    // Combina tudo no router principal
    let app = Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/user/auth", user_auth_routes)
        .nest("/api/employee/auth", employee_auth_routes)
        .nest("/api/shop/auth", shop_auth_routes)
        .nest("/api/shop/employees", employee_routes)
        .nest("/api/admin/auth", admin_auth_routes)
        .nest("/api/admin", admin_routes)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", docs::ApiDoc::openapi()))
        .with_state(app_state);

    // Inicia o servidor
    let addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
    let listener = TcpListener::bind(&addr)
        .await
        .expect("Falha ao iniciar o listener TCP");
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr().unwrap());
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<std::net::SocketAddr>(),
    )
    .await
    .expect("Erro no servidor Axum");
}
