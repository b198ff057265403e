//! Authentication utilities

mod jwt;
mod password;
mod policy;

pub use jwt::{AccessClaims, IssuedToken, JwtService, RefreshClaims};
pub use password::{hash_password, verify_password, PasswordService};
pub use policy::{validate_password_strength, validate_username};
