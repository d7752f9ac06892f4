// src/handlers/employees.rs

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
    middleware::auth::CurrentShopOwner,
    models::employee::{
        CreateEmployeePayload, Employee, ProvisionedEmployee, UpdateEmployeeStatusPayload,
    },
};

// POST /api/shop/employees — o provisionamento do par (Employee, User).
// A senha temporária aparece SÓ nesta resposta; não volta nunca mais.
#[utoipa::path(
    post,
    path = "/api/shop/employees",
    tag = "Funcionários",
    request_body = CreateEmployeePayload,
    responses(
        (status = 201, description = "Funcionário e credencial criados", body = ProvisionedEmployee),
        (status = 409, description = "E-mail já em uso por funcionário ou usuário"),
        (status = 422, description = "Dados inválidos")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_employee(
    State(app_state): State<AppState>,
    current: CurrentShopOwner,
    Json(payload): Json<CreateEmployeePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let provisioned = app_state
        .employee_service
        .provision(&current.shop_owner, &payload)
        .await?;

    Ok((StatusCode::CREATED, Json(provisioned)))
}

// GET /api/shop/employees
#[utoipa::path(
    get,
    path = "/api/shop/employees",
    tag = "Funcionários",
    responses((status = 200, description = "Funcionários da loja", body = [Employee])),
    security(("api_jwt" = []))
)]
pub async fn list_employees(
    State(app_state): State<AppState>,
    current: CurrentShopOwner,
) -> Result<Json<Vec<Employee>>, AppError> {
    let employees = app_state.employee_service.list(&current.shop_owner).await?;
    Ok(Json(employees))
}

// PATCH /api/shop/employees/{id}/status
#[utoipa::path(
    patch,
    path = "/api/shop/employees/{id}/status",
    tag = "Funcionários",
    params(("id" = Uuid, Path, description = "ID do funcionário")),
    request_body = UpdateEmployeeStatusPayload,
    responses(
        (status = 200, description = "Status atualizado", body = Employee),
        (status = 404, description = "Funcionário não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_employee_status(
    State(app_state): State<AppState>,
    current: CurrentShopOwner,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateEmployeeStatusPayload>,
) -> Result<Json<Employee>, AppError> {
    let employee = app_state
        .employee_service
        .update_status(&current.shop_owner, id, payload.status)
        .await?;
    Ok(Json(employee))
}

// DELETE /api/shop/employees/{id} — soft-delete + credencial inativada
#[utoipa::path(
    delete,
    path = "/api/shop/employees/{id}",
    tag = "Funcionários",
    params(("id" = Uuid, Path, description = "ID do funcionário")),
    responses(
        (status = 204, description = "Funcionário desligado"),
        (status = 404, description = "Funcionário não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn remove_employee(
    State(app_state): State<AppState>,
    current: CurrentShopOwner,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    app_state
        .employee_service
        .remove(&current.shop_owner, id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
