//! PostgreSQL persistence adapters built on Diesel and diesel-async.

mod diesel_assignment_repository;
mod diesel_login_service;
mod diesel_project_repository;
mod diesel_user_repository;
mod error_map;
mod models;
mod pool;
pub mod schema;

pub use diesel_assignment_repository::DieselAssignmentRepository;
pub use diesel_login_service::DieselLoginService;
pub use diesel_project_repository::DieselProjectRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use pool::{DbPool, PoolConfig, PoolError};
