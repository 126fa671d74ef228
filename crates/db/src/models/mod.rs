//! Entity structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` + `Validate` create DTO for inserts
//! - A `Deserialize` + `Validate` update DTO (all `Option` fields) for patches
//!
//! Nullable columns use `Option<Option<T>>` in update DTOs: an absent key
//! keeps the stored value, an explicit `null` clears it.
//!
//! Wire names are camelCase to match what the mobile client sends.

use serde::{Deserialize, Deserializer};

pub mod generation;
pub mod image_type;
pub mod input_image;
pub mod project;
pub mod render_config;
pub mod session;
pub mod style;
pub mod user;

/// Deserializes a present key into `Some(value)`, so `null` becomes
/// `Some(None)`. Pair with `#[serde(default)]` to get `None` for absent keys.
pub(crate) fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
