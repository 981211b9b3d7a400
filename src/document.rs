//! The open document: a raster image plus its sprite in the world.
//!
//! Opening an image decodes it twice over: once through the `image` crate
//! for dimensions and pixel sampling, once through the asset server for the
//! GPU texture. The decoded copy goes into a fresh [`ContentStore`] so
//! point annotations can sample colors.

use std::path::PathBuf;

use bevy::asset::AssetServer;
use bevy::prelude::*;

use crate::config::UpdateLastImagePathRequest;
use crate::constants::{DEFAULT_IMAGE_HEIGHT, DEFAULT_IMAGE_WIDTH};
use crate::content::{ContentChange, ContentStore, SceneContent};
use crate::geometry::PixelSize;
use crate::scene::viewport::SceneViewport;

#[derive(Resource, Debug, Clone)]
pub struct Document {
    pub path: Option<PathBuf>,
    pub size: PixelSize,
}

impl Default for Document {
    fn default() -> Self {
        Self {
            path: None,
            size: PixelSize::new(DEFAULT_IMAGE_WIDTH, DEFAULT_IMAGE_HEIGHT),
        }
    }
}

/// Marker for the sprite entity showing the document image.
#[derive(Component)]
pub struct DocumentSprite;

#[derive(Message)]
pub struct OpenImageRequest {
    pub path: PathBuf,
}

/// Decode the requested image, reset the annotation list, and respawn the
/// document sprite. A failed decode leaves the current document untouched.
fn open_image_system(
    mut events: MessageReader<OpenImageRequest>,
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    mut document: ResMut<Document>,
    mut content: ResMut<SceneContent>,
    mut viewport: ResMut<SceneViewport>,
    mut changes: MessageWriter<ContentChange>,
    mut last_path: MessageWriter<UpdateLastImagePathRequest>,
    existing: Query<Entity, With<DocumentSprite>>,
) {
    for event in events.read() {
        let decoded = match image::open(&event.path) {
            Ok(decoded) => decoded.into_rgba8(),
            Err(e) => {
                error!("Failed to open image {:?}: {}", event.path, e);
                continue;
            }
        };
        let size = PixelSize::new(decoded.width() as i32, decoded.height() as i32);
        info!("Opened image {:?} ({})", event.path, size);

        document.path = Some(event.path.clone());
        document.size = size;
        *content = SceneContent::new(Box::new(ContentStore::with_image(decoded)));
        changes.write(ContentChange::Reloaded(Vec::new()));

        for entity in existing.iter() {
            commands.entity(entity).despawn();
        }
        let texture: Handle<Image> = asset_server.load(event.path.to_string_lossy().into_owned());
        // Wrapper space puts the image's bottom-left at the world origin.
        commands.spawn((
            DocumentSprite,
            Sprite::from_image(texture),
            Transform::from_xyz(size.width as f32 / 2.0, size.height as f32 / 2.0, 0.0),
        ));

        viewport.reset_for_image(size);
        last_path.write(UpdateLastImagePathRequest {
            path: event.path.clone(),
        });
    }
}

pub struct DocumentPlugin;

impl Plugin for DocumentPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Document>()
            .add_message::<OpenImageRequest>()
            .add_systems(
                Update,
                open_image_system.run_if(on_message::<OpenImageRequest>),
            );
    }
}
