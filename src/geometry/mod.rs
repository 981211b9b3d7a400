//! Pixel-space geometry and the coordinate-space conversion chain.
//!
//! Annotation geometry is stored in integer pixel space. Everything the
//! pointer does happens in one of the nested continuous spaces (screen,
//! window, view, wrapper); [`spaces::SceneSpaces`] converts between them.

mod pixel;
pub mod spaces;

#[cfg(test)]
mod tests;

pub use pixel::{PixelCoordinate, PixelRect, PixelSize};
