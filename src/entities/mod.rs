pub mod audit_log;
pub mod medication;
pub mod transaction;
pub mod user;
