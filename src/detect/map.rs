//! Coordinate mapper: adapter-space boxes to full-frame pixel space.

use crate::detect::adapter::RawDetection;
use crate::detect::result::Detection;
use crate::frame::FrameExtent;
use crate::geometry::PixelRect;

/// Map one raw detection from a tile into full-frame pixel coordinates.
///
/// Three steps, in a fixed order:
///
/// 1. flip the vertical axis (`y = 1 - max_y`), because the adapter reports
///    bottom-left-origin normalized boxes while pixel space is top-left;
/// 2. denormalize by the *tile's* extent, not the frame's;
/// 3. translate by the tile's origin within the frame.
///
/// Reversing steps 1 and 2 only agrees when the tile extent equals the
/// frame extent, so the order is load-bearing for every tiled pass.
pub fn to_full_frame(
    raw: &RawDetection,
    tile_extent: FrameExtent,
    tile_origin: (u32, u32),
) -> Detection {
    let flipped_min_y = 1.0 - raw.bounds.max_y();

    let bounds = PixelRect {
        x: raw.bounds.min_x * tile_extent.width as f32 + tile_origin.0 as f32,
        y: flipped_min_y * tile_extent.height as f32 + tile_origin.1 as f32,
        width: raw.bounds.width * tile_extent.width as f32,
        height: raw.bounds.height * tile_extent.height as f32,
    };

    Detection::new(bounds, raw.confidence, raw.label.clone())
}
