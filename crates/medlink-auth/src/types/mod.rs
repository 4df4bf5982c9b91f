//! Domain types for authentication.

pub mod principal;
pub mod session;
pub mod token_user;

pub use principal::{Doctor, License, Patient, Principal, Role};
pub use session::Session;
pub use token_user::TokenUser;
