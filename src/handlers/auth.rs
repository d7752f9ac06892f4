// src/handlers/auth.rs

use std::net::SocketAddr;

use axum::{
    extract::{ConnectInfo, State},
    http::HeaderMap,
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::{CurrentEmployee, CurrentUser},
    models::{
        principal::{AuthResponse, Guard, LoginPayload},
        user::RegisterUserPayload,
    },
};

// IP de origem: primeiro o proxy (X-Forwarded-For), senão o peer
// da conexão direta.
fn origin_ip(headers: &HeaderMap, peer: SocketAddr) -> String {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| peer.ip().to_string())
}

// POST /api/user/auth/register
#[utoipa::path(
    post,
    path = "/api/user/auth/register",
    tag = "Auth - Usuário",
    request_body = RegisterUserPayload,
    responses(
        (status = 201, description = "Usuário criado e autenticado", body = AuthResponse),
        (status = 409, description = "E-mail já em uso"),
        (status = 422, description = "Dados inválidos")
    )
)]
pub async fn register_user(
    State(app_state): State<AppState>,
    Json(payload): Json<RegisterUserPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let token = app_state
        .auth_service
        .register_user(&payload.email, &payload.password)
        .await?;

    Ok((StatusCode::CREATED, Json(AuthResponse { token })))
}

// POST /api/user/auth/login
#[utoipa::path(
    post,
    path = "/api/user/auth/login",
    tag = "Auth - Usuário",
    request_body = LoginPayload,
    responses(
        (status = 200, description = "Autenticado", body = AuthResponse),
        (status = 401, description = "Credenciais inválidas"),
        (status = 403, description = "Conta não ativa")
    )
)]
pub async fn login_user(
    State(app_state): State<AppState>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    Json(payload): Json<LoginPayload>,
) -> Result<Json<AuthResponse>, AppError> {
    payload.validate()?;

    let token = app_state
        .auth_service
        .login(
            Guard::User,
            &payload.email,
            &payload.password,
            Some(&origin_ip(&headers, peer)),
        )
        .await?;

    Ok(Json(AuthResponse { token }))
}

// POST /api/user/auth/logout (protegida pelo guard de usuário)
#[utoipa::path(
    post,
    path = "/api/user/auth/logout",
    tag = "Auth - Usuário",
    responses((status = 204, description = "Sessão encerrada")),
    security(("api_jwt" = []))
)]
pub async fn logout_user(
    State(app_state): State<AppState>,
    current: CurrentUser,
) -> Result<StatusCode, AppError> {
    app_state.auth_service.logout(current.session_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// POST /api/employee/auth/login
#[utoipa::path(
    post,
    path = "/api/employee/auth/login",
    tag = "Auth - Funcionário",
    request_body = LoginPayload,
    responses(
        (status = 200, description = "Autenticado", body = AuthResponse),
        (status = 401, description = "Credenciais inválidas"),
        (status = 403, description = "Conta não ativa")
    )
)]
pub async fn login_employee(
    State(app_state): State<AppState>,
    Json(payload): Json<LoginPayload>,
) -> Result<Json<AuthResponse>, AppError> {
    payload.validate()?;

    let token = app_state
        .auth_service
        .login(Guard::Employee, &payload.email, &payload.password, None)
        .await?;

    Ok(Json(AuthResponse { token }))
}

// POST /api/employee/auth/logout
#[utoipa::path(
    post,
    path = "/api/employee/auth/logout",
    tag = "Auth - Funcionário",
    responses((status = 204, description = "Sessão encerrada")),
    security(("api_jwt" = []))
)]
pub async fn logout_employee(
    State(app_state): State<AppState>,
    current: CurrentEmployee,
) -> Result<StatusCode, AppError> {
    app_state.auth_service.logout(current.session_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn peer() -> SocketAddr {
        "203.0.113.9:45210".parse().unwrap()
    }

    #[test]
    fn ip_de_origem_prefere_o_primeiro_do_x_forwarded_for() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-forwarded-for",
            HeaderValue::from_static("198.51.100.7, 10.0.0.1"),
        );
        assert_eq!(origin_ip(&headers, peer()), "198.51.100.7");
    }

    #[test]
    fn sem_proxy_o_ip_de_origem_e_o_peer_da_conexao() {
        let headers = HeaderMap::new();
        assert_eq!(origin_ip(&headers, peer()), "203.0.113.9");
    }

    #[test]
    fn x_forwarded_for_vazio_cai_no_peer() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", HeaderValue::from_static(""));
        assert_eq!(origin_ip(&headers, peer()), "203.0.113.9");
    }
}
