#![cfg(test)]

use bevy::prelude::*;

use crate::common::DragHandle;
use crate::config::InteractionSettings;
use crate::content::{
    ContentChange, ContentItem, ContentPort, ContentStore, ItemId, ItemKind,
};
use crate::geometry::spaces::SceneSpaces;
use crate::geometry::{PixelCoordinate, PixelRect, PixelSize};

use super::pointer::{commit_gesture, GestureContext, ViewportCommand};
use super::state::{InputSide, Manipulation, ManipulationOptions};
use super::tools::SceneTool;

/// Port wrapper that records which mutations actually landed.
struct RecordingPort {
    inner: ContentStore,
    mutations: Vec<&'static str>,
}

impl RecordingPort {
    fn new() -> Self {
        Self {
            inner: ContentStore::new(PixelSize::new(1000, 1000)),
            mutations: Vec::new(),
        }
    }

    fn record(
        &mut self,
        name: &'static str,
        change: Option<ContentChange>,
    ) -> Option<ContentChange> {
        if change.is_some() {
            self.mutations.push(name);
        }
        change
    }
}

impl ContentPort for RecordingPort {
    fn add_point(&mut self, coordinate: PixelCoordinate) -> Option<ContentChange> {
        let change = self.inner.add_point(coordinate);
        self.record("add_point", change)
    }
    fn add_area(&mut self, rect: PixelRect) -> Option<ContentChange> {
        let change = self.inner.add_area(rect);
        self.record("add_area", change)
    }
    fn update_point(
        &mut self,
        id: ItemId,
        coordinate: PixelCoordinate,
    ) -> Option<ContentChange> {
        let change = self.inner.update_point(id, coordinate);
        self.record("update_point", change)
    }
    fn update_area(&mut self, id: ItemId, rect: PixelRect) -> Option<ContentChange> {
        let change = self.inner.update_area(id, rect);
        self.record("update_area", change)
    }
    fn update_item(&mut self, item: ContentItem) -> Option<ContentChange> {
        let change = self.inner.update_item(item);
        self.record("update_item", change)
    }
    fn select(
        &mut self,
        ids: &[ItemId],
        extend: bool,
        focus: Option<ItemId>,
    ) -> Option<ContentChange> {
        let change = self.inner.select(ids, extend, focus);
        self.record("select", change)
    }
    fn deselect(&mut self, id: ItemId) -> Option<ContentChange> {
        let change = self.inner.deselect(id);
        self.record("deselect", change)
    }
    fn deselect_all(&mut self) -> Option<ContentChange> {
        let change = self.inner.deselect_all();
        self.record("deselect_all", change)
    }
    fn delete(&mut self, id: ItemId) -> Option<ContentChange> {
        let change = self.inner.delete(id);
        self.record("delete", change)
    }
    fn item(&self, id: ItemId) -> Option<&ContentItem> {
        self.inner.item(id)
    }
    fn items(&self) -> &[ContentItem] {
        self.inner.items()
    }
    fn selected_ids(&self) -> Vec<ItemId> {
        self.inner.selected_ids()
    }
    fn focused_id(&self) -> Option<ItemId> {
        self.inner.focused_id()
    }
}

fn spaces() -> SceneSpaces {
    let mut spaces = SceneSpaces::new(PixelSize::new(1000, 1000));
    spaces.view_size = Vec2::new(800.0, 600.0);
    spaces.magnification = 1.0;
    spaces.visible_origin = Vec2::new(0.0, 400.0);
    spaces
}

fn context<'a>(
    tool: SceneTool,
    settings: &'a InteractionSettings,
    spaces: &'a SceneSpaces,
) -> GestureContext<'a> {
    GestureContext {
        tool,
        settings,
        spaces,
        alt: false,
        command: false,
    }
}

fn commit(
    manipulation: Manipulation,
    release: Vec2,
    ctx: &GestureContext,
    port: &mut RecordingPort,
) -> (Vec<ContentChange>, ViewportCommand) {
    let items = port.items().to_vec();
    commit_gesture(&manipulation, release, ctx, &items, port)
}

#[test]
fn test_annotate_click_adds_point_at_pixel() {
    let settings = InteractionSettings::default();
    let spaces = spaces();
    let mut port = RecordingPort::new();
    let ctx = context(SceneTool::Annotate, &settings, &spaces);

    let begin = Vec2::new(100.5, 100.5);
    let expected = spaces.wrapper_to_pixel(spaces.view_to_wrapper(begin));
    let (changes, command) = commit(
        Manipulation::Generic {
            side: InputSide::Primary,
            begin,
            stage: 0,
        },
        begin,
        &ctx,
        &mut port,
    );
    assert_eq!(command, ViewportCommand::None);
    assert_eq!(port.mutations, vec!["add_point"]);
    let ContentChange::Refreshed(item) = &changes[0] else {
        panic!("expected Refreshed");
    };
    let ItemKind::Point { coordinate, .. } = item.kind else {
        panic!("expected Point");
    };
    assert_eq!(coordinate, expected);
}

#[test]
fn test_area_drag_adds_enclosing_area() {
    let settings = InteractionSettings::default();
    let spaces = spaces();
    let mut port = RecordingPort::new();
    let ctx = context(SceneTool::Annotate, &settings, &spaces);

    let begin = Vec2::new(50.0, 50.0);
    let current = Vec2::new(100.0, 120.0);
    let (changes, _) = commit(
        Manipulation::AreaDragging {
            begin,
            current,
            options: ManipulationOptions::default(),
            stage: 0,
        },
        current,
        &ctx,
        &mut port,
    );
    assert_eq!(port.mutations, vec!["add_area"]);
    let ContentChange::Refreshed(item) = &changes[0] else {
        panic!("expected Refreshed");
    };
    let wrapper = Rect::from_corners(
        spaces.view_to_wrapper(begin),
        spaces.view_to_wrapper(current),
    );
    assert_eq!(
        item.bounding_rect(),
        spaces.wrapper_rect_to_pixel_wrapping(wrapper)
    );
}

#[test]
fn test_tiny_area_drag_degrades_to_click() {
    let settings = InteractionSettings::default();
    let spaces = spaces();
    let mut port = RecordingPort::new();
    let ctx = context(SceneTool::Annotate, &settings, &spaces);

    let begin = Vec2::new(50.0, 50.0);
    let (_, _) = commit(
        Manipulation::AreaDragging {
            begin,
            current: begin + Vec2::new(4.0, 5.0),
            options: ManipulationOptions::default(),
            stage: 0,
        },
        begin + Vec2::new(4.0, 5.0),
        &ctx,
        &mut port,
    );
    assert_eq!(port.mutations, vec!["add_point"]);
}

#[test]
fn test_zoom_area_drag_requests_magnify_to_fit() {
    let settings = InteractionSettings::default();
    let spaces = spaces();
    let mut port = RecordingPort::new();
    let ctx = context(SceneTool::ZoomIn, &settings, &spaces);

    let (changes, command) = commit(
        Manipulation::AreaDragging {
            begin: Vec2::new(50.0, 50.0),
            current: Vec2::new(150.0, 150.0),
            options: ManipulationOptions::default(),
            stage: 0,
        },
        Vec2::new(150.0, 150.0),
        &ctx,
        &mut port,
    );
    assert!(changes.is_empty());
    assert!(port.mutations.is_empty());
    assert!(matches!(command, ViewportCommand::MagnifyToFit(_)));
}

#[test]
fn test_zoom_clicks_step_the_ladder() {
    let settings = InteractionSettings::default();
    let spaces = spaces();
    let mut port = RecordingPort::new();
    let anchor = Vec2::new(10.0, 10.0);
    let gesture = Manipulation::Generic {
        side: InputSide::Primary,
        begin: anchor,
        stage: 0,
    };

    let ctx = context(SceneTool::ZoomIn, &settings, &spaces);
    let (_, command) = commit(gesture.clone(), anchor, &ctx, &mut port);
    assert_eq!(command, ViewportCommand::ZoomIn { anchor });

    // Alt flips to zoom out.
    let mut ctx = context(SceneTool::ZoomIn, &settings, &spaces);
    ctx.alt = true;
    let (_, command) = commit(gesture, anchor, &ctx, &mut port);
    assert_eq!(command, ViewportCommand::ZoomOut { anchor });
    assert!(port.mutations.is_empty());
}

#[test]
fn test_annotator_drag_commits_preview_geometry() {
    let settings = InteractionSettings::default();
    let spaces = spaces();
    let mut port = RecordingPort::new();
    port.add_area(PixelRect::new(100, 100, 40, 40));
    port.mutations.clear();
    let original = port.items()[0].clone();
    let ctx = context(SceneTool::Select, &settings, &spaces);

    let preview = ItemKind::Area {
        rect: PixelRect::new(120, 110, 40, 40),
    };
    let (changes, _) = commit(
        Manipulation::AnnotatorDragging {
            begin: Vec2::new(120.0, 120.0),
            current: Vec2::new(140.0, 130.0),
            options: ManipulationOptions::default(),
            target: original.id,
            handle: DragHandle::Move,
            original,
            preview,
        },
        Vec2::new(140.0, 130.0),
        &ctx,
        &mut port,
    );
    assert_eq!(port.mutations, vec!["update_area"]);
    let ContentChange::Refreshed(item) = &changes[0] else {
        panic!("expected Refreshed");
    };
    assert_eq!(item.bounding_rect(), PixelRect::new(120, 110, 40, 40));
}

#[test]
fn test_release_off_canvas_abandons_annotator_drag() {
    let settings = InteractionSettings::default();
    let spaces = spaces();
    let mut port = RecordingPort::new();
    port.add_area(PixelRect::new(100, 100, 40, 40));
    port.mutations.clear();
    let original = port.items()[0].clone();
    let before = port.items().to_vec();
    let ctx = context(SceneTool::Select, &settings, &spaces);

    let (changes, command) = commit(
        Manipulation::AnnotatorDragging {
            begin: Vec2::new(120.0, 120.0),
            current: Vec2::new(-50.0, 120.0),
            options: ManipulationOptions::default(),
            target: original.id,
            handle: DragHandle::Move,
            original,
            preview: ItemKind::Area {
                rect: PixelRect::new(0, 0, 40, 40),
            },
        },
        // Released left of the content area.
        Vec2::new(-50.0, 120.0),
        &ctx,
        &mut port,
    );
    assert!(changes.is_empty());
    assert_eq!(command, ViewportCommand::None);
    assert!(port.mutations.is_empty());
    assert_eq!(port.items(), &before[..]);
}

#[test]
fn test_release_off_canvas_abandons_rubber_band() {
    let settings = InteractionSettings::default();
    let spaces = spaces();
    let mut port = RecordingPort::new();
    let ctx = context(SceneTool::Annotate, &settings, &spaces);

    // Released left of the content area, span well past the threshold.
    let release = Vec2::new(-20.0, 120.0);
    let (changes, command) = commit(
        Manipulation::AreaDragging {
            begin: Vec2::new(50.0, 50.0),
            current: release,
            options: ManipulationOptions::default(),
            stage: 0,
        },
        release,
        &ctx,
        &mut port,
    );
    assert!(changes.is_empty());
    assert_eq!(command, ViewportCommand::None);
    assert!(port.mutations.is_empty());
    assert!(port.items().is_empty());

    // The zoom tool's marquee aborts the same way.
    let ctx = context(SceneTool::ZoomIn, &settings, &spaces);
    let (_, command) = commit(
        Manipulation::AreaDragging {
            begin: Vec2::new(50.0, 50.0),
            current: release,
            options: ManipulationOptions::default(),
            stage: 0,
        },
        release,
        &ctx,
        &mut port,
    );
    assert_eq!(command, ViewportCommand::None);
}

#[test]
fn test_aborted_gestures_commit_nothing() {
    let settings = InteractionSettings::default();
    let spaces = spaces();
    let mut port = RecordingPort::new();
    port.add_point(PixelCoordinate::new(5, 5));
    port.mutations.clear();
    let ctx = context(SceneTool::Select, &settings, &spaces);

    // A window resignation resets the manipulation to Idle before any
    // release fires; committing Idle must be a no-op. Forbidden and pan
    // gestures are equally mutation-free.
    for manipulation in [
        Manipulation::Idle,
        Manipulation::Forbidden {
            side: InputSide::Primary,
        },
        Manipulation::SceneDragging {
            side: InputSide::Secondary,
            begin: Vec2::ZERO,
            last: Vec2::new(50.0, 50.0),
        },
    ] {
        let (changes, command) = commit(manipulation, Vec2::new(50.0, 50.0), &ctx, &mut port);
        assert!(changes.is_empty());
        assert_eq!(command, ViewportCommand::None);
    }
    assert!(port.mutations.is_empty());
    assert_eq!(port.items().len(), 1);
}

#[test]
fn test_select_click_replaces_selection_with_topmost() {
    let settings = InteractionSettings::default();
    let spaces = spaces();
    let mut port = RecordingPort::new();
    port.add_area(PixelRect::new(100, 100, 50, 50));
    port.add_area(PixelRect::new(110, 110, 20, 20));
    port.mutations.clear();
    let ctx = context(SceneTool::Select, &settings, &spaces);

    // View point over both areas. visible_origin=(0,400): wrapper =
    // (view.x, 400 + 600 - view.y); pixel y = 1000 - wrapper.y.
    let begin = Vec2::new(115.0, 115.0);
    let pixel = spaces.wrapper_to_pixel(spaces.view_to_wrapper(begin));
    assert_eq!(pixel, PixelCoordinate::new(115, 115));

    let (_, _) = commit(
        Manipulation::Generic {
            side: InputSide::Primary,
            begin,
            stage: 0,
        },
        begin,
        &ctx,
        &mut port,
    );
    assert_eq!(port.mutations, vec!["select"]);
    // Insertion ordering: the newest area is on top.
    assert_eq!(port.selected_ids(), vec![ItemId(2)]);
    assert_eq!(port.focused_id(), Some(ItemId(2)));
}

#[test]
fn test_alt_click_cycles_through_the_stack() {
    let settings = InteractionSettings::default();
    let spaces = spaces();
    let mut port = RecordingPort::new();
    port.add_area(PixelRect::new(100, 100, 50, 50));
    port.add_area(PixelRect::new(110, 110, 20, 20));
    port.mutations.clear();
    let mut ctx = context(SceneTool::Select, &settings, &spaces);
    ctx.alt = true;

    let begin = Vec2::new(115.0, 115.0);
    let gesture = Manipulation::Generic {
        side: InputSide::Primary,
        begin,
        stage: 0,
    };

    let mut seen = Vec::new();
    for _ in 0..3 {
        commit(gesture.clone(), begin, &ctx, &mut port);
        seen.push(port.focused_id().unwrap());
    }
    // Top, below it, and wrapping back to the top.
    assert_eq!(seen, vec![ItemId(2), ItemId(1), ItemId(2)]);
}

#[test]
fn test_command_click_selects_whole_stack() {
    let settings = InteractionSettings::default();
    let spaces = spaces();
    let mut port = RecordingPort::new();
    port.add_area(PixelRect::new(100, 100, 50, 50));
    port.add_area(PixelRect::new(110, 110, 20, 20));
    port.add_point(PixelCoordinate::new(500, 500));
    port.select(&[ItemId(3)], false, Some(ItemId(3)));
    port.mutations.clear();
    let mut ctx = context(SceneTool::Select, &settings, &spaces);
    ctx.command = true;

    let begin = Vec2::new(115.0, 115.0);
    commit(
        Manipulation::Generic {
            side: InputSide::Primary,
            begin,
            stage: 0,
        },
        begin,
        &ctx,
        &mut port,
    );
    // Extends: the far-away point stays selected.
    let selected = port.selected_ids();
    assert!(selected.contains(&ItemId(1)));
    assert!(selected.contains(&ItemId(2)));
    assert!(selected.contains(&ItemId(3)));
    assert_eq!(port.focused_id(), Some(ItemId(2)));
}

#[test]
fn test_select_click_on_empty_space_deselects() {
    let settings = InteractionSettings::default();
    let spaces = spaces();
    let mut port = RecordingPort::new();
    port.add_point(PixelCoordinate::new(5, 5));
    port.select(&[ItemId(1)], false, Some(ItemId(1)));
    port.mutations.clear();
    let ctx = context(SceneTool::Select, &settings, &spaces);

    let begin = Vec2::new(700.0, 100.0);
    commit(
        Manipulation::Generic {
            side: InputSide::Primary,
            begin,
            stage: 0,
        },
        begin,
        &ctx,
        &mut port,
    );
    assert_eq!(port.mutations, vec!["deselect_all"]);
    assert!(port.selected_ids().is_empty());
}

#[test]
fn test_secondary_click_deletes_topmost_else_deselects() {
    let settings = InteractionSettings::default();
    let spaces = spaces();
    let mut port = RecordingPort::new();
    port.add_area(PixelRect::new(100, 100, 50, 50));
    port.add_area(PixelRect::new(110, 110, 20, 20));
    port.mutations.clear();
    let ctx = context(SceneTool::Select, &settings, &spaces);

    let begin = Vec2::new(115.0, 115.0);
    let gesture = Manipulation::Generic {
        side: InputSide::Secondary,
        begin,
        stage: 0,
    };
    commit(gesture.clone(), begin, &ctx, &mut port);
    assert_eq!(port.mutations, vec!["delete"]);
    assert!(port.item(ItemId(2)).is_none());
    assert!(port.item(ItemId(1)).is_some());

    // Nothing under an empty corner: clears selection instead.
    port.select(&[ItemId(1)], false, Some(ItemId(1)));
    port.mutations.clear();
    let empty = Vec2::new(700.0, 100.0);
    commit(
        Manipulation::Generic {
            side: InputSide::Secondary,
            begin: empty,
            stage: 0,
        },
        empty,
        &ctx,
        &mut port,
    );
    assert_eq!(port.mutations, vec!["deselect_all"]);
}
