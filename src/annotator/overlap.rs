//! Ordering and cycling among annotations stacked over one pixel.

use serde::{Deserialize, Serialize};

use crate::content::{ContentItem, ItemId};
use crate::geometry::PixelCoordinate;

/// How overlapping annotations stack for hit testing and cycling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OverlapOrdering {
    /// Newest annotation on top.
    #[default]
    Insertion,
    /// Bounding area decides: smaller annotations sit on top of larger
    /// ones, so tight annotations stay reachable under broad ones.
    AreaDescending,
}

/// Ids of the annotations containing `coordinate`, topmost first.
///
/// Ties on equal area break toward the lower id, so the order is stable
/// across runs.
pub fn candidates_at(
    items: &[ContentItem],
    coordinate: PixelCoordinate,
    ordering: OverlapOrdering,
) -> Vec<ItemId> {
    let mut hits: Vec<&ContentItem> =
        items.iter().filter(|item| item.contains(coordinate)).collect();
    match ordering {
        OverlapOrdering::Insertion => hits.reverse(),
        OverlapOrdering::AreaDescending => {
            hits.sort_by_key(|item| (item.bounding_rect().size.area(), item.id));
        }
    }
    hits.into_iter().map(|item| item.id).collect()
}

/// The candidate to select next when cycling through `ordered` (topmost
/// first). With no current member, cycling starts at the top; otherwise it
/// steps down the stack and wraps.
pub fn cycle_next(ordered: &[ItemId], current: Option<ItemId>) -> Option<ItemId> {
    if ordered.is_empty() {
        return None;
    }
    let next = match current.and_then(|id| ordered.iter().position(|c| *c == id)) {
        Some(pos) => (pos + 1) % ordered.len(),
        None => 0,
    };
    Some(ordered[next])
}
