pub mod audit_repo;
pub mod employee_repo;
pub mod session_repo;
pub mod shop_owner_repo;
pub mod super_admin_repo;
pub mod user_repo;

pub use audit_repo::AuditRepository;
pub use employee_repo::EmployeeRepository;
pub use session_repo::SessionRepository;
pub use shop_owner_repo::ShopOwnerRepository;
pub use super_admin_repo::SuperAdminRepository;
pub use user_repo::UserRepository;
