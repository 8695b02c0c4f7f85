pub mod argon2_password_hasher;
pub mod jwt_token_issuer;

pub use argon2_password_hasher::Argon2PasswordHasher;
pub use jwt_token_issuer::{Claims, JwtAuthConfig, JwtTokenIssuer};
