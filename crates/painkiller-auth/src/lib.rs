//! PainKiller credential service
//!
//! Two independent pieces, both pure computation with no I/O:
//! - password hashing and verification (Argon2id, PHC strings)
//! - signed, time-limited access tokens (HS256 JWT, subject = username)
//!
//! Callers own persistence; this crate never sees the database.

pub mod error;
pub mod password;
pub mod token;

pub use error::CredentialError;
pub use password::{hash_password, verify_password};
pub use token::TokenKeys;
