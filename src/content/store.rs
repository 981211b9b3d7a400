//! In-memory annotation store.
//!
//! Owns validation: callers hand it whatever geometry a gesture produced
//! and the store decides whether it is acceptable. Rejection leaves the
//! list byte-for-byte unchanged.

use image::RgbaImage;

use crate::geometry::{PixelCoordinate, PixelRect, PixelSize};

use super::{ContentChange, ContentItem, ContentPort, ItemId, ItemKind, PixelColor};

/// Smallest acceptable area annotation, per axis.
const MIN_AREA_SIDE: i32 = 2;

pub struct ContentStore {
    bounds: PixelSize,
    items: Vec<ContentItem>,
    selected: Vec<ItemId>,
    focused: Option<ItemId>,
    next_id: u32,
    image: Option<RgbaImage>,
}

impl ContentStore {
    pub fn new(bounds: PixelSize) -> Self {
        Self {
            bounds,
            items: Vec::new(),
            selected: Vec::new(),
            focused: None,
            next_id: 1,
            image: None,
        }
    }

    /// Store backed by a decoded image, so point annotations carry the
    /// sampled color.
    pub fn with_image(image: RgbaImage) -> Self {
        let bounds = PixelSize::new(image.width() as i32, image.height() as i32);
        let mut store = Self::new(bounds);
        store.image = Some(image);
        store
    }

    pub fn bounds(&self) -> PixelSize {
        self.bounds
    }

    fn bounds_rect(&self) -> PixelRect {
        PixelRect::new(0, 0, self.bounds.width, self.bounds.height)
    }

    fn sample(&self, coordinate: PixelCoordinate) -> PixelColor {
        match &self.image {
            Some(image) => {
                let p = image.get_pixel(coordinate.x as u32, coordinate.y as u32);
                PixelColor::new(p.0[0], p.0[1], p.0[2], p.0[3])
            }
            None => PixelColor::default(),
        }
    }

    fn in_bounds(&self, coordinate: PixelCoordinate) -> bool {
        self.bounds_rect().contains_coordinate(coordinate)
    }

    fn point_exists_at(&self, coordinate: PixelCoordinate, except: Option<ItemId>) -> bool {
        self.items.iter().any(|item| {
            Some(item.id) != except
                && matches!(item.kind, ItemKind::Point { coordinate: c, .. } if c == coordinate)
        })
    }

    fn area_exists_with(&self, rect: PixelRect, except: Option<ItemId>) -> bool {
        self.items.iter().any(|item| {
            Some(item.id) != except
                && matches!(item.kind, ItemKind::Area { rect: r } if r == rect)
        })
    }

    /// Standardize and clamp an area rect, then check the minimum size.
    fn acceptable_area(&self, rect: PixelRect) -> Option<PixelRect> {
        let clamped = rect.standardized().intersection(self.bounds_rect())?;
        if clamped.width() >= MIN_AREA_SIDE && clamped.height() >= MIN_AREA_SIDE {
            Some(clamped)
        } else {
            None
        }
    }

    fn position_of(&self, id: ItemId) -> Option<usize> {
        self.items.iter().position(|item| item.id == id)
    }

    fn selection_change(&self) -> ContentChange {
        ContentChange::SelectionChanged {
            selected: self.selected.clone(),
            focused: self.focused,
        }
    }
}

impl ContentPort for ContentStore {
    fn add_point(&mut self, coordinate: PixelCoordinate) -> Option<ContentChange> {
        if !self.in_bounds(coordinate) || self.point_exists_at(coordinate, None) {
            return None;
        }
        let item = ContentItem {
            id: ItemId(self.next_id),
            tags: Vec::new(),
            kind: ItemKind::Point {
                coordinate,
                color: self.sample(coordinate),
            },
        };
        self.next_id += 1;
        self.items.push(item.clone());
        Some(ContentChange::Refreshed(item))
    }

    fn add_area(&mut self, rect: PixelRect) -> Option<ContentChange> {
        let rect = self.acceptable_area(rect)?;
        if self.area_exists_with(rect, None) {
            return None;
        }
        let item = ContentItem {
            id: ItemId(self.next_id),
            tags: Vec::new(),
            kind: ItemKind::Area { rect },
        };
        self.next_id += 1;
        self.items.push(item.clone());
        Some(ContentChange::Refreshed(item))
    }

    fn update_point(
        &mut self,
        id: ItemId,
        coordinate: PixelCoordinate,
    ) -> Option<ContentChange> {
        if !self.in_bounds(coordinate) || self.point_exists_at(coordinate, Some(id)) {
            return None;
        }
        let color = self.sample(coordinate);
        let pos = self.position_of(id)?;
        match self.items[pos].kind {
            ItemKind::Point { .. } => {
                self.items[pos].kind = ItemKind::Point { coordinate, color };
                Some(ContentChange::Refreshed(self.items[pos].clone()))
            }
            ItemKind::Area { .. } => None,
        }
    }

    fn update_area(&mut self, id: ItemId, rect: PixelRect) -> Option<ContentChange> {
        let rect = self.acceptable_area(rect)?;
        if self.area_exists_with(rect, Some(id)) {
            return None;
        }
        let pos = self.position_of(id)?;
        match self.items[pos].kind {
            ItemKind::Area { .. } => {
                self.items[pos].kind = ItemKind::Area { rect };
                Some(ContentChange::Refreshed(self.items[pos].clone()))
            }
            ItemKind::Point { .. } => None,
        }
    }

    fn update_item(&mut self, item: ContentItem) -> Option<ContentChange> {
        let validated_kind = match item.kind {
            ItemKind::Point { coordinate, .. } => {
                if !self.in_bounds(coordinate)
                    || self.point_exists_at(coordinate, Some(item.id))
                {
                    return None;
                }
                ItemKind::Point {
                    coordinate,
                    color: self.sample(coordinate),
                }
            }
            ItemKind::Area { rect } => {
                let rect = self.acceptable_area(rect)?;
                if self.area_exists_with(rect, Some(item.id)) {
                    return None;
                }
                ItemKind::Area { rect }
            }
        };
        let pos = self.position_of(item.id)?;
        self.items[pos] = ContentItem {
            id: item.id,
            tags: item.tags,
            kind: validated_kind,
        };
        Some(ContentChange::Refreshed(self.items[pos].clone()))
    }

    fn select(
        &mut self,
        ids: &[ItemId],
        extend: bool,
        focus: Option<ItemId>,
    ) -> Option<ContentChange> {
        if ids.is_empty() && focus.is_none() {
            return None;
        }
        if ids.iter().any(|id| self.position_of(*id).is_none()) {
            return None;
        }
        if let Some(focus) = focus
            && !ids.contains(&focus)
            && !(extend && self.selected.contains(&focus))
        {
            return None;
        }
        if !extend {
            self.selected.clear();
        }
        for id in ids {
            if !self.selected.contains(id) {
                self.selected.push(*id);
            }
        }
        self.focused = focus.or_else(|| self.selected.last().copied());
        Some(self.selection_change())
    }

    fn deselect(&mut self, id: ItemId) -> Option<ContentChange> {
        let before = self.selected.len();
        self.selected.retain(|s| *s != id);
        if self.selected.len() == before {
            return None;
        }
        if self.focused == Some(id) {
            self.focused = self.selected.last().copied();
        }
        Some(self.selection_change())
    }

    fn deselect_all(&mut self) -> Option<ContentChange> {
        if self.selected.is_empty() && self.focused.is_none() {
            return None;
        }
        self.selected.clear();
        self.focused = None;
        Some(self.selection_change())
    }

    fn delete(&mut self, id: ItemId) -> Option<ContentChange> {
        let pos = self.position_of(id)?;
        self.items.remove(pos);
        self.selected.retain(|s| *s != id);
        if self.focused == Some(id) {
            self.focused = self.selected.last().copied();
        }
        Some(ContentChange::Removed(id))
    }

    fn item(&self, id: ItemId) -> Option<&ContentItem> {
        self.items.iter().find(|item| item.id == id)
    }

    fn items(&self) -> &[ContentItem] {
        &self.items
    }

    fn selected_ids(&self) -> Vec<ItemId> {
        self.selected.clone()
    }

    fn focused_id(&self) -> Option<ItemId> {
        self.focused
    }
}
