//! Tag registry: named colors annotations can carry.
//!
//! The registry is the lookup collaborators consult when colorizing
//! overlays. Items keep their tag names when a tag disappears; unresolved
//! names fall back to the default color.

use bevy::prelude::*;
use std::collections::HashMap;

pub const DEFAULT_TAG_COLOR: Color = Color::srgb(0.29, 0.56, 0.89);

#[derive(Debug, Clone, PartialEq)]
pub struct TagInfo {
    pub display_name: String,
    pub color: Color,
}

#[derive(Resource, Debug, Clone)]
pub struct TagRegistry {
    tags: HashMap<String, TagInfo>,
}

impl Default for TagRegistry {
    fn default() -> Self {
        let mut registry = Self {
            tags: HashMap::new(),
        };
        for (name, color) in [
            ("red", Color::srgb(0.90, 0.22, 0.21)),
            ("orange", Color::srgb(0.96, 0.55, 0.15)),
            ("yellow", Color::srgb(0.95, 0.83, 0.20)),
            ("green", Color::srgb(0.30, 0.69, 0.31)),
            ("blue", Color::srgb(0.25, 0.47, 0.85)),
            ("purple", Color::srgb(0.56, 0.27, 0.68)),
        ] {
            registry.insert(name, color);
        }
        registry
    }
}

impl TagRegistry {
    pub fn insert(&mut self, name: &str, color: Color) {
        self.tags.insert(
            name.to_string(),
            TagInfo {
                display_name: name.to_string(),
                color,
            },
        );
    }

    pub fn remove(&mut self, name: &str) -> Option<TagInfo> {
        self.tags.remove(name)
    }

    pub fn get(&self, name: &str) -> Option<&TagInfo> {
        self.tags.get(name)
    }

    /// Color for an item's tag list: the first tag that resolves wins,
    /// otherwise the default.
    pub fn color_for(&self, tag_names: &[String]) -> Color {
        tag_names
            .iter()
            .find_map(|name| self.tags.get(name).map(|t| t.color))
            .unwrap_or(DEFAULT_TAG_COLOR)
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

/// Message fired when tag definitions change, so overlays recolor.
#[derive(Message)]
pub struct TagsChanged;

pub struct TagPlugin;

impl Plugin for TagPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<TagRegistry>().add_message::<TagsChanged>();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_resolving_tag_wins() {
        let registry = TagRegistry::default();
        let red = registry.get("red").unwrap().color;
        let color = registry.color_for(&["missing".into(), "red".into(), "blue".into()]);
        assert_eq!(color, red);
    }

    #[test]
    fn test_unresolved_tags_use_default() {
        let registry = TagRegistry::default();
        assert_eq!(registry.color_for(&[]), DEFAULT_TAG_COLOR);
        assert_eq!(registry.color_for(&["nope".into()]), DEFAULT_TAG_COLOR);
    }

    #[test]
    fn test_removed_tag_stops_resolving() {
        let mut registry = TagRegistry::default();
        assert!(registry.remove("green").is_some());
        assert_eq!(registry.color_for(&["green".into()]), DEFAULT_TAG_COLOR);
    }
}
