// src/handlers/admin.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::CurrentAdmin,
    models::{
        audit::AuditLog,
        principal::{AuthResponse, Guard, LoginPayload},
        shop_owner::{RejectShopOwnerPayload, ShopOwner},
        super_admin::{SuperAdmin, UpdateAdminStatusPayload},
    },
};

// POST /api/admin/auth/login
#[utoipa::path(
    post,
    path = "/api/admin/auth/login",
    tag = "Admin",
    request_body = LoginPayload,
    responses(
        (status = 200, description = "Autenticado", body = AuthResponse),
        (status = 401, description = "Credenciais inválidas"),
        (status = 403, description = "Conta suspensa")
    )
)]
pub async fn login_admin(
    State(app_state): State<AppState>,
    Json(payload): Json<LoginPayload>,
) -> Result<Json<AuthResponse>, AppError> {
    payload.validate()?;

    let token = app_state
        .auth_service
        .login(Guard::SuperAdmin, &payload.email, &payload.password, None)
        .await?;

    Ok(Json(AuthResponse { token }))
}

// POST /api/admin/auth/logout
#[utoipa::path(
    post,
    path = "/api/admin/auth/logout",
    tag = "Admin",
    responses((status = 204, description = "Sessão encerrada")),
    security(("api_jwt" = []))
)]
pub async fn logout_admin(
    State(app_state): State<AppState>,
    current: CurrentAdmin,
) -> Result<StatusCode, AppError> {
    app_state.auth_service.logout(current.session_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// GET /api/admin/shop-owners/pending — a fila de aprovação
#[utoipa::path(
    get,
    path = "/api/admin/shop-owners/pending",
    tag = "Admin",
    responses((status = 200, description = "Cadastros aguardando decisão", body = [ShopOwner])),
    security(("api_jwt" = []))
)]
pub async fn list_pending_shop_owners(
    State(app_state): State<AppState>,
    _current: CurrentAdmin,
) -> Result<Json<Vec<ShopOwner>>, AppError> {
    let pending = app_state.shop_owner_service.list_pending().await?;
    Ok(Json(pending))
}

// POST /api/admin/shop-owners/{id}/approve
#[utoipa::path(
    post,
    path = "/api/admin/shop-owners/{id}/approve",
    tag = "Admin",
    params(("id" = Uuid, Path, description = "ID do dono de loja")),
    responses(
        (status = 200, description = "Cadastro aprovado", body = ShopOwner),
        (status = 404, description = "Cadastro não encontrado"),
        (status = 409, description = "Cadastro já decidido")
    ),
    security(("api_jwt" = []))
)]
pub async fn approve_shop_owner(
    State(app_state): State<AppState>,
    current: CurrentAdmin,
    Path(id): Path<Uuid>,
) -> Result<Json<ShopOwner>, AppError> {
    let owner = app_state
        .shop_owner_service
        .approve(&current.admin, id)
        .await?;
    Ok(Json(owner))
}

// POST /api/admin/shop-owners/{id}/reject
#[utoipa::path(
    post,
    path = "/api/admin/shop-owners/{id}/reject",
    tag = "Admin",
    params(("id" = Uuid, Path, description = "ID do dono de loja")),
    request_body = RejectShopOwnerPayload,
    responses(
        (status = 200, description = "Cadastro rejeitado", body = ShopOwner),
        (status = 404, description = "Cadastro não encontrado"),
        (status = 409, description = "Cadastro já decidido"),
        (status = 422, description = "Motivo ausente")
    ),
    security(("api_jwt" = []))
)]
pub async fn reject_shop_owner(
    State(app_state): State<AppState>,
    current: CurrentAdmin,
    Path(id): Path<Uuid>,
    Json(payload): Json<RejectShopOwnerPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let owner = app_state
        .shop_owner_service
        .reject(&current.admin, id, &payload.reason)
        .await?;
    Ok(Json(owner))
}

// PATCH /api/admin/admins/{id}/status — suspender/reativar um operador
#[utoipa::path(
    patch,
    path = "/api/admin/admins/{id}/status",
    tag = "Admin",
    params(("id" = Uuid, Path, description = "ID do operador")),
    request_body = UpdateAdminStatusPayload,
    responses(
        (status = 200, description = "Status atualizado", body = SuperAdmin),
        (status = 404, description = "Operador não encontrado"),
        (status = 409, description = "Transição de status inválida")
    ),
    security(("api_jwt" = []))
)]
pub async fn set_admin_status(
    State(app_state): State<AppState>,
    current: CurrentAdmin,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateAdminStatusPayload>,
) -> Result<Json<SuperAdmin>, AppError> {
    let admin = app_state
        .admin_service
        .set_status(&current.admin, id, payload.status)
        .await?;
    Ok(Json(admin))
}

// GET /api/admin/audit-logs — as últimas entradas da trilha
#[utoipa::path(
    get,
    path = "/api/admin/audit-logs",
    tag = "Admin",
    responses((status = 200, description = "Entradas recentes de auditoria", body = [AuditLog])),
    security(("api_jwt" = []))
)]
pub async fn list_audit_logs(
    State(app_state): State<AppState>,
    _current: CurrentAdmin,
) -> Result<Json<Vec<AuditLog>>, AppError> {
    let entries = app_state.audit_service.recent(100).await?;
    Ok(Json(entries))
}
