//! Tile generation: partitioning a frame into overlapping crops.
//!
//! Tiles are produced in a fixed raster order (rows outer, columns inner,
//! top-to-bottom then left-to-right). The order is part of the contract:
//! equal-confidence detections keep generation order through NMS, so test
//! fixtures and downstream consumers can rely on it.
//!
//! Edge tiles are clipped to the frame boundary, never padded and never
//! skipped, so the union of all tile rectangles covers the frame exactly.

use anyhow::{anyhow, Result};

use crate::frame::{FrameExtent, FrameImage};

/// Tile placement within a parent frame, integer pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TileRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl TileRect {
    pub fn extent(&self) -> FrameExtent {
        FrameExtent::new(self.width, self.height)
    }
}

/// Tile size and overlap for one tiling pass.
///
/// `overlap` is the fraction of a tile shared with its neighbor along each
/// axis. It must lie in `[0, 1)`; values outside that range are a contract
/// violation and fail at construction, not at tiling time. UI-side clamping
/// belongs to the configuration boundary (see [`crate::config`]).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TilingConfig {
    tile_width: u32,
    tile_height: u32,
    overlap: f32,
}

impl TilingConfig {
    pub fn new(tile_width: u32, tile_height: u32, overlap: f32) -> Result<Self> {
        if tile_width == 0 || tile_height == 0 {
            return Err(anyhow!(
                "tile dimensions must be positive, got {}x{}",
                tile_width,
                tile_height
            ));
        }
        if !overlap.is_finite() || !(0.0..1.0).contains(&overlap) {
            return Err(anyhow!("overlap must be in [0, 1), got {}", overlap));
        }
        Ok(Self {
            tile_width,
            tile_height,
            overlap,
        })
    }

    pub fn tile_width(&self) -> u32 {
        self.tile_width
    }

    pub fn tile_height(&self) -> u32 {
        self.tile_height
    }

    pub fn overlap(&self) -> f32 {
        self.overlap
    }

    /// Sliding-window step along x: `max(1, round(width * (1 - overlap)))`.
    pub fn step_x(&self) -> u32 {
        (self.tile_width as f32 * (1.0 - self.overlap)).round().max(1.0) as u32
    }

    /// Sliding-window step along y.
    pub fn step_y(&self) -> u32 {
        (self.tile_height as f32 * (1.0 - self.overlap)).round().max(1.0) as u32
    }
}

/// One cropped, origin-reset region of a frame.
///
/// `image` starts at its own (0, 0); `rect` records where it came from in
/// the parent frame. Tiles live for one frame's detection pass and are
/// discarded after inference.
pub struct Tile<I> {
    pub image: I,
    pub rect: TileRect,
}

/// Tile placements for a frame extent, in raster order.
///
/// Pure geometry; does not touch pixels. Used directly by the budget
/// controller to count tiles, and by [`make_tiles`] to drive cropping.
pub fn tile_rects(extent: FrameExtent, config: &TilingConfig) -> Vec<TileRect> {
    let step_x = config.step_x();
    let step_y = config.step_y();

    let mut rects = Vec::new();
    let mut y = 0;
    while y < extent.height {
        let mut x = 0;
        while x < extent.width {
            // Clip to the frame boundary; loop bounds keep both >= 1.
            let width = config.tile_width.min(extent.width - x);
            let height = config.tile_height.min(extent.height - y);
            rects.push(TileRect {
                x,
                y,
                width,
                height,
            });
            x += step_x;
        }
        y += step_y;
    }
    rects
}

/// Cut `frame` into overlapping tiles per `config`.
///
/// Each tile's pixel content is translated so its local origin is (0, 0);
/// the frame-relative offset is retained in `Tile::rect`.
pub fn make_tiles<I: FrameImage>(frame: &I, config: &TilingConfig) -> Vec<Tile<I>> {
    tile_rects(frame.extent(), config)
        .into_iter()
        .map(|rect| Tile {
            image: frame.crop(rect),
            rect,
        })
        .collect()
}
