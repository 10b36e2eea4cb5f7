//! Slicing Aided Hyper Inference (SAHI) core.
//!
//! Detectors trained on fixed input sizes miss small objects in large or
//! wide frames. This crate compensates by cutting a frame into overlapping
//! tiles, running an external detector on each tile, mapping tile-local
//! results back into full-frame pixel coordinates, and merging duplicates
//! with non-maximum suppression.
//!
//! The detector itself is an external collaborator behind the
//! [`InferenceAdapter`] trait; model loading, rendering and video plumbing
//! live outside this crate.
//!
//! # Module Structure
//!
//! - `geometry`: pixel/normalized rectangles and IoU
//! - `frame`: the `FrameImage` crop abstraction and an owned RGB frame
//! - `tile`: tiling configuration and the overlapping-tile generator
//! - `budget`: adaptive per-frame tile cap
//! - `region`: top/bottom region profiles
//! - `detect`: adapter contract, coordinate mapper, NMS, built-in adapters
//! - `pipeline`: the per-frame orchestrator (full-frame attempt, tiled
//!   fallback, merge)
//! - `config`: TOML + env boundary configuration

pub mod budget;
pub mod config;
pub mod detect;
pub mod frame;
pub mod geometry;
pub mod pipeline;
pub mod region;
pub mod tile;

pub use budget::{cap_tiles, BUDGET_OVERLAP};
pub use config::SahiConfig;
pub use detect::{
    suppress, Detection, DetectionThresholds, InferenceAdapter, LumaBlobAdapter, RawDetection,
    StubAdapter, StubResponse,
};
pub use frame::{FrameExtent, FrameImage, PlanarFrame};
pub use geometry::{iou, NormRect, PixelRect};
pub use pipeline::{NoProgress, PipelineConfig, ProgressSink, RegionSplit, SahiPipeline};
pub use region::{split_profiles, RegionProfile, RegionSettings};
pub use tile::{make_tiles, tile_rects, Tile, TileRect, TilingConfig};
