//! Annotators: the visual companions of content items.
//!
//! The annotation list is authoritative; annotators are derived state,
//! rebuilt from [`ContentChange`] messages and re-laid-out from viewport
//! geometry every frame. Nothing here writes back into the list.

pub mod gizmos;
pub mod overlap;
pub mod overlay;
pub mod rulers;

use bevy::prelude::*;
use std::collections::HashMap;

use crate::content::{ContentChange, ContentItem, ItemId};
use crate::geometry::spaces::SceneSpaces;
use crate::tags::{TagRegistry, TagsChanged};

use overlay::RevealStyle;
use rulers::RulerMarker;

#[derive(Debug, Clone)]
pub struct Annotator {
    pub item: ContentItem,
    pub selected: bool,
    pub focused: bool,
    /// View-space overlay frame, refreshed each frame.
    pub frame: Rect,
    pub style: RevealStyle,
    /// Draw-order ticket; higher draws on top.
    pub z: u64,
    pub color: Color,
    pub markers: Vec<RulerMarker>,
}

#[derive(Resource, Default)]
pub struct AnnotatorIndex {
    by_id: HashMap<u32, Annotator>,
    /// Insertion order of live ids.
    order: Vec<ItemId>,
    z_ticket: u64,
    /// Set while the viewport animates; overlays are not drawn then.
    pub overlays_hidden: bool,
}

impl AnnotatorIndex {
    fn next_z(&mut self) -> u64 {
        self.z_ticket += 1;
        self.z_ticket
    }

    pub fn get(&self, id: ItemId) -> Option<&Annotator> {
        self.by_id.get(&id.0)
    }

    pub fn live_count(&self) -> usize {
        self.order.len()
    }

    /// Annotators in insertion order.
    pub fn iter_ordered(&self) -> impl Iterator<Item = &Annotator> {
        self.order.iter().filter_map(|id| self.by_id.get(&id.0))
    }

    /// Fold one observed mutation into the index.
    pub fn apply_change(
        &mut self,
        change: &ContentChange,
        registry: &TagRegistry,
        spaces: &SceneSpaces,
    ) {
        match change {
            ContentChange::Refreshed(item) => {
                let z = self.next_z();
                match self.by_id.get_mut(&item.id.0) {
                    Some(annotator) => {
                        annotator.item = item.clone();
                        annotator.color = registry.color_for(&item.tags);
                        annotator.markers = rulers::markers_for(item);
                        annotator.z = z;
                    }
                    None => {
                        self.order.push(item.id);
                        self.by_id.insert(item.id.0, Self::build(item, registry, spaces, z));
                    }
                }
                self.refresh_frames(spaces);
            }
            ContentChange::Removed(id) => {
                self.by_id.remove(&id.0);
                self.order.retain(|o| o != id);
            }
            ContentChange::SelectionChanged { selected, focused } => {
                let mut raised: Vec<ItemId> = Vec::new();
                for (raw_id, annotator) in self.by_id.iter_mut() {
                    let id = ItemId(*raw_id);
                    let now_selected = selected.contains(&id);
                    if now_selected && !annotator.selected {
                        raised.push(id);
                    }
                    annotator.selected = now_selected;
                    annotator.focused = *focused == Some(id);
                }
                // Newly selected overlays surface above the rest.
                raised.sort();
                for id in raised {
                    let z = self.next_z();
                    if let Some(annotator) = self.by_id.get_mut(&id.0) {
                        annotator.z = z;
                    }
                }
                if let Some(focused) = focused {
                    let z = self.next_z();
                    if let Some(annotator) = self.by_id.get_mut(&focused.0) {
                        annotator.z = z;
                    }
                }
            }
            ContentChange::Reloaded(items) => {
                self.by_id.clear();
                self.order.clear();
                for item in items {
                    let z = self.next_z();
                    self.order.push(item.id);
                    self.by_id.insert(item.id.0, Self::build(item, registry, spaces, z));
                }
            }
        }
    }

    fn build(
        item: &ContentItem,
        registry: &TagRegistry,
        spaces: &SceneSpaces,
        z: u64,
    ) -> Annotator {
        let (frame, style) = overlay::overlay_frame(item, spaces);
        Annotator {
            item: item.clone(),
            selected: false,
            focused: false,
            frame,
            style,
            z,
            color: registry.color_for(&item.tags),
            markers: rulers::markers_for(item),
        }
    }

    /// Recompute every overlay frame from current viewport geometry.
    pub fn refresh_frames(&mut self, spaces: &SceneSpaces) {
        for annotator in self.by_id.values_mut() {
            let (frame, style) = overlay::overlay_frame(&annotator.item, spaces);
            annotator.frame = frame;
            annotator.style = style;
        }
    }

    pub fn recolor(&mut self, registry: &TagRegistry) {
        for annotator in self.by_id.values_mut() {
            annotator.color = registry.color_for(&annotator.item.tags);
        }
    }
}

fn apply_content_changes(
    mut changes: MessageReader<ContentChange>,
    mut index: ResMut<AnnotatorIndex>,
    registry: Res<TagRegistry>,
    viewport: Res<crate::scene::viewport::SceneViewport>,
) {
    for change in changes.read() {
        index.apply_change(change, &registry, &viewport.spaces);
    }
}

fn refresh_overlay_frames(
    mut index: ResMut<AnnotatorIndex>,
    viewport: Res<crate::scene::viewport::SceneViewport>,
) {
    index.refresh_frames(&viewport.spaces);
}

fn recolor_on_tags_changed(
    mut events: MessageReader<TagsChanged>,
    mut index: ResMut<AnnotatorIndex>,
    registry: Res<TagRegistry>,
) {
    for _ in events.read() {
        index.recolor(&registry);
    }
}

pub struct AnnotatorPlugin;

impl Plugin for AnnotatorPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<AnnotatorIndex>()
            .init_gizmo_group::<gizmos::SceneGizmoGroup>()
            .add_systems(Startup, gizmos::configure_gizmo_group)
            .add_systems(
                Update,
                (
                    apply_content_changes,
                    refresh_overlay_frames,
                    recolor_on_tags_changed.run_if(on_message::<TagsChanged>),
                )
                    .chain(),
            )
            .add_systems(
                Update,
                (gizmos::draw_image_border, gizmos::draw_overlays, gizmos::draw_ruler_markers)
                    .after(refresh_overlay_frames),
            );
    }
}
