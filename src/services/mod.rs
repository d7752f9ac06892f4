pub mod admin_service;
pub mod audit_service;
pub mod auth;
pub mod employee_service;
pub mod shop_owner_service;
