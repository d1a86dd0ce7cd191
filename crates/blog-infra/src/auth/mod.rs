//! Token and password services.

mod jwt;
mod password;

pub use jwt::{JwtConfig, JwtTokenService};
pub use password::{Argon2Config, Argon2PasswordService};
