//! Client state layer for plan_vision.
//!
//! Owns the signed-in user, the persisted bearer token and the REST client
//! the app screens call into. Views observe [`session::SessionState`] and
//! never touch the token store directly.

pub mod api;
pub mod color;
pub mod config;
pub mod domain;
pub mod dto;
pub mod error;
pub mod events;
pub mod palette;
pub mod session;
pub mod token_store;

pub use api::ApiClient;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use events::{AuthEvent, AuthEvents};
pub use session::{SessionBackend, SessionState};
pub use token_store::{FileTokenStore, MemoryTokenStore, TokenStore};
