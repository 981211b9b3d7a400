//! The authoritative annotation list, behind a port trait.
//!
//! Gesture code never edits items directly; it calls [`ContentPort`]
//! operations and forwards the returned [`ContentChange`]s as messages.
//! Every mutation either succeeds fully or returns `None` and leaves the
//! list untouched, so a rejected or cancelled gesture cannot leave partial
//! state behind.

mod store;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_IMAGE_HEIGHT, DEFAULT_IMAGE_WIDTH};
use crate::geometry::{PixelCoordinate, PixelRect, PixelSize};

pub use store::ContentStore;

/// Stable identifier of an annotation. Never reused within a document.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct ItemId(pub u32);

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Color sampled from the document at a point annotation's coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PixelColor {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub alpha: u8,
}

impl PixelColor {
    pub const fn new(red: u8, green: u8, blue: u8, alpha: u8) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }
}

impl std::fmt::Display for PixelColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "#{:02X}{:02X}{:02X}{:02X}",
            self.red, self.green, self.blue, self.alpha
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ItemKind {
    /// A single pixel, with the color sampled there at creation or last move.
    Point {
        coordinate: PixelCoordinate,
        color: PixelColor,
    },
    /// A standardized rectangular region, at least 2x2 pixels.
    Area { rect: PixelRect },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentItem {
    pub id: ItemId,
    pub tags: Vec<String>,
    pub kind: ItemKind,
}

impl ContentItem {
    /// Pixel bounds: the area's rect, or the 1x1 cell of a point.
    pub fn bounding_rect(&self) -> PixelRect {
        match &self.kind {
            ItemKind::Point { coordinate, .. } => {
                PixelRect::new(coordinate.x, coordinate.y, 1, 1)
            }
            ItemKind::Area { rect } => *rect,
        }
    }

    pub fn contains(&self, coordinate: PixelCoordinate) -> bool {
        self.bounding_rect().contains_coordinate(coordinate)
    }
}

/// One observable mutation of the annotation list.
#[derive(Message, Debug, Clone, PartialEq)]
pub enum ContentChange {
    /// An item was added or its geometry replaced.
    Refreshed(ContentItem),
    Removed(ItemId),
    SelectionChanged {
        selected: Vec<ItemId>,
        focused: Option<ItemId>,
    },
    /// The whole list was replaced (document opened).
    Reloaded(Vec<ContentItem>),
}

/// Mutation and query surface of the annotation list.
///
/// Mutations are transactional: `Some(change)` means the edit was applied
/// in full, `None` means it was rejected and nothing changed.
pub trait ContentPort {
    fn add_point(&mut self, coordinate: PixelCoordinate) -> Option<ContentChange>;
    fn add_area(&mut self, rect: PixelRect) -> Option<ContentChange>;
    fn update_point(&mut self, id: ItemId, coordinate: PixelCoordinate)
    -> Option<ContentChange>;
    fn update_area(&mut self, id: ItemId, rect: PixelRect) -> Option<ContentChange>;
    /// Replace a live item wholesale (tags included). The id must already
    /// exist and the new geometry must validate.
    fn update_item(&mut self, item: ContentItem) -> Option<ContentChange>;

    /// Replace or extend the selection. `focus` must be among the newly
    /// selected ids if given.
    fn select(
        &mut self,
        ids: &[ItemId],
        extend: bool,
        focus: Option<ItemId>,
    ) -> Option<ContentChange>;
    fn deselect(&mut self, id: ItemId) -> Option<ContentChange>;
    fn deselect_all(&mut self) -> Option<ContentChange>;

    fn delete(&mut self, id: ItemId) -> Option<ContentChange>;

    fn item(&self, id: ItemId) -> Option<&ContentItem>;
    /// All live items in insertion order.
    fn items(&self) -> &[ContentItem];
    fn selected_ids(&self) -> Vec<ItemId>;
    fn focused_id(&self) -> Option<ItemId>;
}

/// Resource owning the active [`ContentPort`].
#[derive(Resource)]
pub struct SceneContent {
    port: Box<dyn ContentPort + Send + Sync>,
}

impl Default for SceneContent {
    fn default() -> Self {
        Self::new(Box::new(ContentStore::new(PixelSize::new(
            DEFAULT_IMAGE_WIDTH,
            DEFAULT_IMAGE_HEIGHT,
        ))))
    }
}

impl SceneContent {
    pub fn new(port: Box<dyn ContentPort + Send + Sync>) -> Self {
        Self { port }
    }

    pub fn port(&self) -> &dyn ContentPort {
        self.port.as_ref()
    }

    pub fn port_mut(&mut self) -> &mut (dyn ContentPort + Send + Sync) {
        self.port.as_mut()
    }
}

pub struct ContentPlugin;

impl Plugin for ContentPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SceneContent>().add_message::<ContentChange>();
    }
}
