//! User accounts and roles

pub mod models;
pub mod repository;

pub use models::{AccessTier, Role, UnknownRole, User, UserRecord};
pub use repository::UserRepository;
