// src/middleware/auth.rs

use axum::{
    body::Body,
    extract::{FromRequestParts, State},
    http::{request::Parts, Request},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    config::AppState,
    models::{
        employee::Employee, principal::Guard, shop_owner::ShopOwner, super_admin::SuperAdmin,
        user::User,
    },
    services::auth::AuthPrincipal,
};

// ---
// Um contexto por guard, inserido nos "extensions" da requisição.
// Tipos separados de propósito: um handler que pede CurrentShopOwner
// nunca recebe um SuperAdmin por engano.
// ---

#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub user: User,
    pub session_id: Uuid,
}

#[derive(Debug, Clone)]
pub struct CurrentEmployee {
    pub employee: Employee,
    pub session_id: Uuid,
}

#[derive(Debug, Clone)]
pub struct CurrentShopOwner {
    pub shop_owner: ShopOwner,
    pub session_id: Uuid,
}

#[derive(Debug, Clone)]
pub struct CurrentAdmin {
    pub admin: SuperAdmin,
    pub session_id: Uuid,
}

fn bearer_token(request: &Request<Body>) -> Result<&str, AppError> {
    request
        .headers()
        .get("Authorization")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or(AppError::InvalidToken)
}

// Valida o token para o guard exigido pela rota e injeta o contexto
// tipado correspondente. O status é reavaliado a cada requisição.
async fn run_guard(
    app_state: AppState,
    guard: Guard,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let token = bearer_token(&request)?;
    let (principal, session_id) = app_state.auth_service.authorize(guard, token).await?;

    match principal {
        AuthPrincipal::User(user) => {
            request.extensions_mut().insert(CurrentUser { user, session_id });
        }
        AuthPrincipal::Employee(employee) => {
            request
                .extensions_mut()
                .insert(CurrentEmployee { employee, session_id });
        }
        AuthPrincipal::ShopOwner(shop_owner) => {
            request
                .extensions_mut()
                .insert(CurrentShopOwner { shop_owner, session_id });
        }
        AuthPrincipal::SuperAdmin(admin) => {
            request.extensions_mut().insert(CurrentAdmin { admin, session_id });
        }
    }

    Ok(next.run(request).await)
}

pub async fn user_guard(
    State(app_state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    run_guard(app_state, Guard::User, request, next).await
}

pub async fn employee_guard(
    State(app_state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    run_guard(app_state, Guard::Employee, request, next).await
}

pub async fn shop_owner_guard(
    State(app_state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    run_guard(app_state, Guard::ShopOwner, request, next).await
}

pub async fn admin_guard(
    State(app_state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    run_guard(app_state, Guard::SuperAdmin, request, next).await
}

// Extratores para obter o contexto autenticado diretamente nos handlers

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentUser>()
            .cloned()
            .ok_or(AppError::InvalidToken)
    }
}

impl<S> FromRequestParts<S> for CurrentEmployee
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentEmployee>()
            .cloned()
            .ok_or(AppError::InvalidToken)
    }
}

impl<S> FromRequestParts<S> for CurrentShopOwner
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentShopOwner>()
            .cloned()
            .ok_or(AppError::InvalidToken)
    }
}

impl<S> FromRequestParts<S> for CurrentAdmin
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentAdmin>()
            .cloned()
            .ok_or(AppError::InvalidToken)
    }
}
