//! Detection orchestrator: full-frame attempt, tiled fallback, merge.
//!
//! Per frame the pipeline runs a cheap full-frame pass first and returns
//! its result when it finds anything, skipping tiling entirely. That is a
//! latency/recall trade for video: any full-frame hit, however low-value,
//! suppresses tiled re-detection for the frame. Callers needing maximum
//! recall set `full_frame_first: false` and always pay for the tiled pass.
//!
//! Tiles are processed sequentially in generation order. They are
//! independent (the mapper uses only the tile's own origin and extent) and
//! could be fanned out across workers as long as the merge waits for all of
//! them; this implementation keeps the per-frame loop serial. Do not run
//! two passes over the same frame concurrently: the fallback decision is
//! not reentrant, and the adapter contract takes `&mut self` anyway.
//!
//! An adapter failure for one tile or region is logged and contributes zero
//! detections; it never aborts the frame. Empty detector output is a normal
//! outcome, not an error: it is what triggers the fallback.

use anyhow::{anyhow, Result};

use crate::budget::cap_tiles;
use crate::detect::map::to_full_frame;
use crate::detect::{suppress, Detection, DetectionThresholds, InferenceAdapter, RawDetection};
use crate::frame::{FrameExtent, FrameImage};
use crate::geometry::PixelRect;
use crate::region::{split_profiles, RegionSettings};
use crate::tile::{make_tiles, TilingConfig};

/// Injected progress observer. The pipeline itself keeps no counters and no
/// shared state; anything UI-shaped hangs off this trait.
pub trait ProgressSink {
    fn full_frame_pass(&mut self, _detections: usize) {}
    fn tiled_pass(&mut self, _tiles: usize, _detections: usize) {}
}

/// Sink that ignores everything.
pub struct NoProgress;

impl ProgressSink for NoProgress {}

/// Per-region settings for the region-aware fallback.
#[derive(Clone, Copy, Debug)]
pub struct RegionSplit {
    /// Upper half: distant objects, typically finer tiles and a lower
    /// score threshold.
    pub top: RegionSettings,
    /// Lower half: near objects, coarser tiles for speed.
    pub bottom: RegionSettings,
}

/// Everything the orchestrator needs for one frame. Passed by value per
/// pipeline; nothing is retained across frames.
#[derive(Clone, Debug)]
pub struct PipelineConfig {
    /// Tiling for the uniform fallback (ignored when `regions` is set).
    pub tiling: TilingConfig,
    pub thresholds: DetectionThresholds,
    /// Budget for the adaptive tile cap, applied per tiled pass.
    pub max_tiles_per_frame: usize,
    /// Try a whole-frame pass first and short-circuit on any hit.
    pub full_frame_first: bool,
    /// Region-aware fallback; `None` selects uniform tiling.
    pub regions: Option<RegionSplit>,
}

/// The per-frame detection strategy, composed from the tile generator,
/// budget controller, coordinate mapper and NMS engine.
pub struct SahiPipeline {
    config: PipelineConfig,
}

impl SahiPipeline {
    pub fn new(config: PipelineConfig) -> Result<Self> {
        if config.max_tiles_per_frame == 0 {
            return Err(anyhow!("max tiles per frame must be positive"));
        }
        Ok(Self { config })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Detect objects in one frame. See the module docs for the strategy.
    pub fn detect_frame<I, A>(&self, adapter: &mut A, frame: &I) -> Result<Vec<Detection>>
    where
        I: FrameImage,
        A: InferenceAdapter<I>,
    {
        self.detect_frame_with(adapter, frame, &mut NoProgress)
    }

    /// `detect_frame` with an injected progress sink.
    pub fn detect_frame_with<I, A, P>(
        &self,
        adapter: &mut A,
        frame: &I,
        progress: &mut P,
    ) -> Result<Vec<Detection>>
    where
        I: FrameImage,
        A: InferenceAdapter<I>,
        P: ProgressSink,
    {
        let extent = frame.extent();

        if self.config.full_frame_first {
            let raws = run_adapter(adapter, frame, "full frame");
            let mapped = map_and_clip(raws, extent, (0, 0), extent);
            let merged = suppress(mapped, &self.config.thresholds);
            progress.full_frame_pass(merged.len());
            if !merged.is_empty() {
                log::debug!(
                    "full-frame pass found {} detection(s), skipping tiled pass",
                    merged.len()
                );
                return Ok(merged);
            }
        }

        match self.config.regions {
            Some(split) => self.tiled_region_pass(adapter, frame, extent, split, progress),
            None => self.tiled_uniform_pass(adapter, frame, extent, progress),
        }
    }

    fn tiled_uniform_pass<I, A, P>(
        &self,
        adapter: &mut A,
        frame: &I,
        extent: FrameExtent,
        progress: &mut P,
    ) -> Result<Vec<Detection>>
    where
        I: FrameImage,
        A: InferenceAdapter<I>,
        P: ProgressSink,
    {
        let tiling = cap_tiles(extent, &self.config.tiling, self.config.max_tiles_per_frame)?;
        let tiles = make_tiles(frame, &tiling);

        let mut collected = Vec::new();
        for tile in &tiles {
            let raws = run_adapter(adapter, &tile.image, "tile");
            collected.extend(map_and_clip(
                raws,
                tile.rect.extent(),
                (tile.rect.x, tile.rect.y),
                extent,
            ));
        }

        let merged = suppress(collected, &self.config.thresholds);
        progress.tiled_pass(tiles.len(), merged.len());
        Ok(merged)
    }

    fn tiled_region_pass<I, A, P>(
        &self,
        adapter: &mut A,
        frame: &I,
        extent: FrameExtent,
        split: RegionSplit,
        progress: &mut P,
    ) -> Result<Vec<Detection>>
    where
        I: FrameImage,
        A: InferenceAdapter<I>,
        P: ProgressSink,
    {
        let profiles = split_profiles(extent, split.top, split.bottom);

        let mut collected = Vec::new();
        let mut tile_count = 0;
        let mut score_floor = 1.0f32;

        for profile in &profiles {
            score_floor = score_floor.min(profile.score_threshold);

            let region_image = frame.crop(profile.region);
            let tiling = cap_tiles(
                profile.region.extent(),
                &profile.tiling,
                self.config.max_tiles_per_frame,
            )?;
            let tiles = make_tiles(&region_image, &tiling);
            tile_count += tiles.len();

            for tile in &tiles {
                let raws = run_adapter(adapter, &tile.image, "region tile");
                // The tile origin is region-relative; offset by the
                // region's own origin to reach full-frame space.
                let origin = (
                    profile.region.x + tile.rect.x,
                    profile.region.y + tile.rect.y,
                );
                collected.extend(
                    map_and_clip(raws, tile.rect.extent(), origin, extent)
                        .into_iter()
                        .filter(|d| d.confidence >= profile.score_threshold),
                );
            }
        }

        // One shared suppression pass over both regions; the per-region
        // floors already applied, so the final floor is their minimum.
        let merged = suppress(collected, &self.config.thresholds.with_score(score_floor));
        progress.tiled_pass(tile_count, merged.len());
        Ok(merged)
    }
}

fn run_adapter<I, A>(adapter: &mut A, image: &I, what: &str) -> Vec<RawDetection>
where
    I: FrameImage,
    A: InferenceAdapter<I>,
{
    match adapter.detect(image) {
        Ok(raws) => raws,
        Err(err) => {
            log::warn!(
                "adapter '{}' failed on {}, treating as empty: {}",
                adapter.name(),
                what,
                err
            );
            Vec::new()
        }
    }
}

/// Map raw detections into full-frame space, clip to the frame extent, and
/// drop anything degenerate after clipping.
fn map_and_clip(
    raws: Vec<RawDetection>,
    tile_extent: FrameExtent,
    tile_origin: (u32, u32),
    frame: FrameExtent,
) -> Vec<Detection> {
    let frame_bounds = PixelRect::new(0.0, 0.0, frame.width as f32, frame.height as f32);
    raws.iter()
        .map(|raw| to_full_frame(raw, tile_extent, tile_origin))
        .filter_map(|mut det| {
            det.bounds = det.bounds.intersection(&frame_bounds);
            (!det.bounds.is_degenerate()).then_some(det)
        })
        .collect()
}
