// src/handlers/shop_owner.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::CurrentShopOwner,
    models::{
        principal::{AuthResponse, Guard, LoginPayload},
        shop_owner::{RegisterShopOwnerPayload, ShopOwner},
    },
};

// POST /api/shop/auth/register — cadastro completo, entra como 'pending'
#[utoipa::path(
    post,
    path = "/api/shop/auth/register",
    tag = "Auth - Dono de Loja",
    request_body = RegisterShopOwnerPayload,
    responses(
        (status = 201, description = "Cadastro recebido, aguardando aprovação", body = ShopOwner),
        (status = 409, description = "E-mail já em uso"),
        (status = 422, description = "Dados inválidos")
    )
)]
pub async fn register_shop_owner(
    State(app_state): State<AppState>,
    Json(payload): Json<RegisterShopOwnerPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let owner = app_state.shop_owner_service.register(&payload).await?;

    Ok((StatusCode::CREATED, Json(owner)))
}

// POST /api/shop/auth/login — só 'approved' passa daqui
#[utoipa::path(
    post,
    path = "/api/shop/auth/login",
    tag = "Auth - Dono de Loja",
    request_body = LoginPayload,
    responses(
        (status = 200, description = "Autenticado", body = AuthResponse),
        (status = 401, description = "Credenciais inválidas"),
        (status = 403, description = "Cadastro pendente ou rejeitado")
    )
)]
pub async fn login_shop_owner(
    State(app_state): State<AppState>,
    Json(payload): Json<LoginPayload>,
) -> Result<Json<AuthResponse>, AppError> {
    payload.validate()?;

    let token = app_state
        .auth_service
        .login(Guard::ShopOwner, &payload.email, &payload.password, None)
        .await?;

    Ok(Json(AuthResponse { token }))
}

// POST /api/shop/auth/logout
#[utoipa::path(
    post,
    path = "/api/shop/auth/logout",
    tag = "Auth - Dono de Loja",
    responses((status = 204, description = "Sessão encerrada")),
    security(("api_jwt" = []))
)]
pub async fn logout_shop_owner(
    State(app_state): State<AppState>,
    current: CurrentShopOwner,
) -> Result<StatusCode, AppError> {
    app_state.auth_service.logout(current.session_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
