pub mod admin_auth;

pub use admin_auth::{AdminSession, admin_auth_middleware};
