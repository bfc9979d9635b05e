//! HTTP span helpers.

use uuid::Uuid;

/// Collapse identifiers in `path` so the route label has bounded cardinality.
///
/// `/orders/42/items/7` becomes `/orders/{id}/items/{id}` and cart UUIDs become `{uuid}`.
pub(super) fn route_label(path: &str) -> String {
    let segments: Vec<&str> = path
        .trim_matches('/')
        .split('/')
        .filter(|segment| !segment.is_empty())
        .map(|segment| {
            if segment.parse::<i64>().is_ok() {
                "{id}"
            } else if Uuid::parse_str(segment).is_ok() {
                "{uuid}"
            } else {
                segment
            }
        })
        .collect();

    format!("/{}", segments.join("/"))
}
