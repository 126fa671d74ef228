//! Session middleware and the guard extractor.
//!
//! - [`session::attach_session`] -- Resolves the request session and stores it
//!   in request extensions. Never rejects.
//! - [`guard::RequireSession`] -- Rejects with 401 when no session was attached.

pub mod guard;
pub mod session;
