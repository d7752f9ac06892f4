pub mod audit;
pub mod employee;
pub mod principal;
pub mod session;
pub mod shop_owner;
pub mod status;
pub mod super_admin;
pub mod user;
