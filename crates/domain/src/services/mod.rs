pub mod user_service;

pub use user_service::{generate_id, UserService, ID_LENGTH};
