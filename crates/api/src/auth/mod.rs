//! Authentication primitives.
//!
//! - [`password`] -- Argon2id password hashing and verification.
//! - [`token`] -- Opaque session token generation and hashing.
//! - [`resolver`] -- Turning request headers into a [`resolver::ResolvedSession`].
//! - [`sweep`] -- Periodic removal of expired sessions.

pub mod password;
pub mod resolver;
pub mod sweep;
pub mod token;
