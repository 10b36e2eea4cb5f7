//! Frame abstraction for the tiling pipeline.
//!
//! The core never interprets pixels; it only needs a frame's extent and the
//! ability to produce origin-reset crops to hand to an inference adapter.
//! `FrameImage` is that contract. `PlanarFrame` is a minimal owned RGB
//! implementation used by the demo binary and tests; applications with
//! their own image types implement the trait instead.

use anyhow::{anyhow, Result};

use crate::tile::TileRect;

/// Pixel dimensions of a frame or frame region.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameExtent {
    pub width: u32,
    pub height: u32,
}

impl FrameExtent {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Rectangle covering the whole extent, origin at (0, 0).
    pub fn bounds(&self) -> TileRect {
        TileRect {
            x: 0,
            y: 0,
            width: self.width,
            height: self.height,
        }
    }
}

/// A croppable image region.
///
/// `crop` must reset the crop's local origin to (0, 0): an adapter given
/// the crop sees a self-contained image and reports boxes normalized to it.
/// The caller keeps the crop's offset within the parent separately (see
/// [`crate::tile::Tile`]).
pub trait FrameImage: Sized {
    fn width(&self) -> u32;
    fn height(&self) -> u32;

    fn extent(&self) -> FrameExtent {
        FrameExtent::new(self.width(), self.height())
    }

    /// Extract `rect` as a standalone image. The tile generator only passes
    /// rectangles that lie within the frame bounds.
    fn crop(&self, rect: TileRect) -> Self;
}

/// Owned 8-bit RGB frame, three bytes per pixel, row-major.
#[derive(Clone, Debug)]
pub struct PlanarFrame {
    data: Vec<u8>,
    width: u32,
    height: u32,
}

impl PlanarFrame {
    const BYTES_PER_PIXEL: usize = 3;

    /// Create a frame from raw RGB bytes. `data` must hold exactly
    /// `width * height * 3` bytes.
    pub fn from_rgb(data: Vec<u8>, width: u32, height: u32) -> Result<Self> {
        let expected = width as usize * height as usize * Self::BYTES_PER_PIXEL;
        if data.len() != expected {
            return Err(anyhow!(
                "frame data length {} does not match {}x{} rgb ({} bytes)",
                data.len(),
                width,
                height,
                expected
            ));
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Black frame of the given size.
    pub fn blank(width: u32, height: u32) -> Self {
        Self {
            data: vec![0; width as usize * height as usize * Self::BYTES_PER_PIXEL],
            width,
            height,
        }
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn pixel(&self, x: u32, y: u32) -> [u8; 3] {
        let idx = (y as usize * self.width as usize + x as usize) * Self::BYTES_PER_PIXEL;
        [self.data[idx], self.data[idx + 1], self.data[idx + 2]]
    }

    pub fn set_pixel(&mut self, x: u32, y: u32, rgb: [u8; 3]) {
        let idx = (y as usize * self.width as usize + x as usize) * Self::BYTES_PER_PIXEL;
        self.data[idx..idx + 3].copy_from_slice(&rgb);
    }
}

impl FrameImage for PlanarFrame {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn crop(&self, rect: TileRect) -> Self {
        let mut data =
            Vec::with_capacity(rect.width as usize * rect.height as usize * Self::BYTES_PER_PIXEL);
        let row_bytes = rect.width as usize * Self::BYTES_PER_PIXEL;
        for row in 0..rect.height {
            let src_y = (rect.y + row) as usize;
            let start = (src_y * self.width as usize + rect.x as usize) * Self::BYTES_PER_PIXEL;
            data.extend_from_slice(&self.data[start..start + row_bytes]);
        }
        Self {
            data,
            width: rect.width,
            height: rect.height,
        }
    }
}

#[cfg(feature = "image-frames")]
impl FrameImage for image::RgbImage {
    fn width(&self) -> u32 {
        image::RgbImage::width(self)
    }

    fn height(&self) -> u32 {
        image::RgbImage::height(self)
    }

    fn crop(&self, rect: TileRect) -> Self {
        image::imageops::crop_imm(self, rect.x, rect.y, rect.width, rect.height).to_image()
    }
}
