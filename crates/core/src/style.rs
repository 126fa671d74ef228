//! Style applicability rule shared by the API filter and the client.

use crate::types::DbId;

/// Whether a style restricted to `style_type_ids` can be used with `query`.
///
/// A missing query matches every style, and a style with no listed image
/// types is universal.
pub fn applies_to(style_type_ids: &[DbId], query: Option<DbId>) -> bool {
    match query {
        None => true,
        Some(_) if style_type_ids.is_empty() => true,
        Some(id) => style_type_ids.contains(&id),
    }
}
