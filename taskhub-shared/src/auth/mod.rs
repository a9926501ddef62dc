/// Authentication utilities
///
/// - `password`: Argon2id password hashing and verification
/// - `jwt`: HS256 access token creation and validation

pub mod jwt;
pub mod password;
