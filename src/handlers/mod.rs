pub mod admin;
pub mod auth;
pub mod employees;
pub mod shop_owner;
