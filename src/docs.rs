// src/docs.rs

use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth (um bloco por guard) ---
        handlers::auth::register_user,
        handlers::auth::login_user,
        handlers::auth::logout_user,
        handlers::auth::login_employee,
        handlers::auth::logout_employee,
        handlers::shop_owner::register_shop_owner,
        handlers::shop_owner::login_shop_owner,
        handlers::shop_owner::logout_shop_owner,
        handlers::admin::login_admin,
        handlers::admin::logout_admin,

        // --- Aprovação de lojas ---
        handlers::admin::list_pending_shop_owners,
        handlers::admin::approve_shop_owner,
        handlers::admin::reject_shop_owner,
        handlers::admin::set_admin_status,
        handlers::admin::list_audit_logs,

        // --- Funcionários ---
        handlers::employees::create_employee,
        handlers::employees::list_employees,
        handlers::employees::update_employee_status,
        handlers::employees::remove_employee,
    ),
    components(schemas(
        models::principal::AuthResponse,
        models::principal::LoginPayload,
        models::user::RegisterUserPayload,
        models::user::User,
        models::user::SystemRole,
        models::employee::Employee,
        models::employee::CreateEmployeePayload,
        models::employee::UpdateEmployeeStatusPayload,
        models::employee::ProvisionedEmployee,
        models::employee::FunctionalRole,
        models::shop_owner::ShopOwner,
        models::shop_owner::RegisterShopOwnerPayload,
        models::shop_owner::RejectShopOwnerPayload,
        models::shop_owner::WeeklySchedule,
        models::shop_owner::DaySchedule,
        models::status::AccountStatus,
        models::status::EmployeeStatus,
        models::status::ShopOwnerStatus,
        models::audit::AuditLog,
        models::super_admin::SuperAdmin,
        models::super_admin::UpdateAdminStatusPayload,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "Auth - Usuário", description = "Registro e sessão do cliente"),
        (name = "Auth - Funcionário", description = "Sessão do funcionário da loja"),
        (name = "Auth - Dono de Loja", description = "Cadastro e sessão do dono de loja"),
        (name = "Admin", description = "Operações do operador da plataforma"),
        (name = "Funcionários", description = "Provisionamento e gestão de funcionários"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "api_jwt",
                SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
            );
        }
    }
}
