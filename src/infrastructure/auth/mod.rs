//! Credential adapters - argon2 password hashing and HS256 bearer tokens

mod password;
mod token;

pub use password::Argon2PasswordHasher;
pub use token::JwtTokenService;
