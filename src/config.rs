//! Boundary configuration for the detection pipeline.
//!
//! This is the application-facing surface: values arrive from a TOML file
//! (path in `SAHI_CONFIG`) and `SAHI_*` environment overrides, and are
//! *clamped* into their recommended ranges here (overlap to `[0, 0.9]`,
//! thresholds to `[0, 1]`), the way an interactive caller would sanitize
//! slider input. The core constructors still reject contract violations;
//! this layer exists so they never see any.

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use std::path::Path;

use crate::detect::DetectionThresholds;
use crate::pipeline::{PipelineConfig, RegionSplit};
use crate::region::RegionSettings;
use crate::tile::TilingConfig;

const DEFAULT_TILE_WIDTH: u32 = 640;
const DEFAULT_TILE_HEIGHT: u32 = 640;
const DEFAULT_OVERLAP: f32 = 0.2;
const DEFAULT_IOU_THRESHOLD: f32 = 0.5;
const DEFAULT_SCORE_THRESHOLD: f32 = 0.2;
const DEFAULT_MAX_TILES_PER_FRAME: usize = 24;

const OVERLAP_CLAMP_MAX: f32 = 0.9;

#[derive(Debug, Deserialize, Default)]
struct SahiConfigFile {
    tile_width: Option<u32>,
    tile_height: Option<u32>,
    overlap: Option<f32>,
    iou_threshold: Option<f32>,
    score_threshold: Option<f32>,
    max_tiles_per_frame: Option<usize>,
    full_frame_first: Option<bool>,
    top_region: Option<TopRegionFile>,
}

/// Optional `[top_region]` section. Its presence switches the pipeline to
/// region-aware mode, with the base tiling serving the bottom region.
#[derive(Debug, Deserialize, Default)]
struct TopRegionFile {
    tile_width: Option<u32>,
    tile_height: Option<u32>,
    overlap: Option<f32>,
    score_threshold: Option<f32>,
}

#[derive(Clone, Debug)]
pub struct SahiConfig {
    pub tile_width: u32,
    pub tile_height: u32,
    pub overlap: f32,
    pub iou_threshold: f32,
    pub score_threshold: f32,
    pub max_tiles_per_frame: usize,
    pub full_frame_first: bool,
    pub top_region: Option<TopRegionConfig>,
}

#[derive(Clone, Copy, Debug)]
pub struct TopRegionConfig {
    pub tile_width: u32,
    pub tile_height: u32,
    pub overlap: f32,
    pub score_threshold: f32,
}

impl Default for SahiConfig {
    fn default() -> Self {
        Self {
            tile_width: DEFAULT_TILE_WIDTH,
            tile_height: DEFAULT_TILE_HEIGHT,
            overlap: DEFAULT_OVERLAP,
            iou_threshold: DEFAULT_IOU_THRESHOLD,
            score_threshold: DEFAULT_SCORE_THRESHOLD,
            max_tiles_per_frame: DEFAULT_MAX_TILES_PER_FRAME,
            full_frame_first: true,
            top_region: None,
        }
    }
}

impl SahiConfig {
    /// Load from the file named by `SAHI_CONFIG` (when set), apply `SAHI_*`
    /// env overrides, then clamp and validate.
    pub fn load() -> Result<Self> {
        let file_cfg = match std::env::var("SAHI_CONFIG").ok() {
            Some(path) => read_config_file(Path::new(&path))?,
            None => SahiConfigFile::default(),
        };
        let mut cfg = Self::from_file(file_cfg);
        cfg.apply_env()?;
        cfg.clamp();
        cfg.validate()?;
        Ok(cfg)
    }

    fn from_file(file: SahiConfigFile) -> Self {
        let defaults = Self::default();
        Self {
            tile_width: file.tile_width.unwrap_or(defaults.tile_width),
            tile_height: file.tile_height.unwrap_or(defaults.tile_height),
            overlap: file.overlap.unwrap_or(defaults.overlap),
            iou_threshold: file.iou_threshold.unwrap_or(defaults.iou_threshold),
            score_threshold: file.score_threshold.unwrap_or(defaults.score_threshold),
            max_tiles_per_frame: file
                .max_tiles_per_frame
                .unwrap_or(defaults.max_tiles_per_frame),
            full_frame_first: file.full_frame_first.unwrap_or(defaults.full_frame_first),
            top_region: file.top_region.map(|top| TopRegionConfig {
                tile_width: top.tile_width.unwrap_or(defaults.tile_width / 2),
                tile_height: top.tile_height.unwrap_or(defaults.tile_height / 2),
                overlap: top.overlap.unwrap_or(defaults.overlap),
                score_threshold: top.score_threshold.unwrap_or(defaults.score_threshold / 2.0),
            }),
        }
    }

    fn apply_env(&mut self) -> Result<()> {
        if let Some(v) = env_parse::<u32>("SAHI_TILE_WIDTH")? {
            self.tile_width = v;
        }
        if let Some(v) = env_parse::<u32>("SAHI_TILE_HEIGHT")? {
            self.tile_height = v;
        }
        if let Some(v) = env_parse::<f32>("SAHI_OVERLAP")? {
            self.overlap = v;
        }
        if let Some(v) = env_parse::<f32>("SAHI_IOU_THRESHOLD")? {
            self.iou_threshold = v;
        }
        if let Some(v) = env_parse::<f32>("SAHI_SCORE_THRESHOLD")? {
            self.score_threshold = v;
        }
        if let Some(v) = env_parse::<usize>("SAHI_MAX_TILES")? {
            self.max_tiles_per_frame = v;
        }
        if let Some(v) = env_parse::<bool>("SAHI_FULL_FRAME_FIRST")? {
            self.full_frame_first = v;
        }
        Ok(())
    }

    fn clamp(&mut self) {
        self.overlap = self.overlap.clamp(0.0, OVERLAP_CLAMP_MAX);
        self.iou_threshold = self.iou_threshold.clamp(0.0, 1.0);
        self.score_threshold = self.score_threshold.clamp(0.0, 1.0);
        if let Some(top) = self.top_region.as_mut() {
            top.overlap = top.overlap.clamp(0.0, OVERLAP_CLAMP_MAX);
            top.score_threshold = top.score_threshold.clamp(0.0, 1.0);
        }
    }

    fn validate(&self) -> Result<()> {
        if self.tile_width == 0 || self.tile_height == 0 {
            return Err(anyhow!(
                "tile dimensions must be positive, got {}x{}",
                self.tile_width,
                self.tile_height
            ));
        }
        if self.max_tiles_per_frame == 0 {
            return Err(anyhow!("max_tiles_per_frame must be positive"));
        }
        if let Some(top) = &self.top_region {
            if top.tile_width == 0 || top.tile_height == 0 {
                return Err(anyhow!(
                    "top region tile dimensions must be positive, got {}x{}",
                    top.tile_width,
                    top.tile_height
                ));
            }
        }
        Ok(())
    }

    /// Build the validated core configuration.
    pub fn pipeline_config(&self) -> Result<PipelineConfig> {
        let tiling = TilingConfig::new(self.tile_width, self.tile_height, self.overlap)?;
        let thresholds = DetectionThresholds::new(self.iou_threshold, self.score_threshold)?;
        let regions = match &self.top_region {
            Some(top) => Some(RegionSplit {
                top: RegionSettings {
                    tiling: TilingConfig::new(top.tile_width, top.tile_height, top.overlap)?,
                    score_threshold: top.score_threshold,
                },
                bottom: RegionSettings {
                    tiling,
                    score_threshold: self.score_threshold,
                },
            }),
            None => None,
        };
        Ok(PipelineConfig {
            tiling,
            thresholds,
            max_tiles_per_frame: self.max_tiles_per_frame,
            full_frame_first: self.full_frame_first,
            regions,
        })
    }
}

fn read_config_file(path: &Path) -> Result<SahiConfigFile> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading config file {}", path.display()))?;
    toml::from_str(&raw).with_context(|| format!("parsing config file {}", path.display()))
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Result<Option<T>>
where
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .parse::<T>()
            .map(Some)
            .map_err(|e| anyhow!("invalid {}: {}", key, e)),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_build_a_valid_pipeline_config() {
        let cfg = SahiConfig::default();
        let pipeline = cfg.pipeline_config().unwrap();
        assert_eq!(pipeline.tiling.tile_width(), DEFAULT_TILE_WIDTH);
        assert!(pipeline.full_frame_first);
        assert!(pipeline.regions.is_none());
    }

    #[test]
    fn out_of_range_values_are_clamped_not_rejected() {
        let mut cfg = SahiConfig {
            overlap: 0.97,
            iou_threshold: 1.4,
            score_threshold: -0.3,
            ..SahiConfig::default()
        };
        cfg.clamp();
        cfg.validate().unwrap();
        assert_eq!(cfg.overlap, OVERLAP_CLAMP_MAX);
        assert_eq!(cfg.iou_threshold, 1.0);
        assert_eq!(cfg.score_threshold, 0.0);
        assert!(cfg.pipeline_config().is_ok());
    }

    #[test]
    fn zero_tile_dimension_fails_validation() {
        let cfg = SahiConfig {
            tile_width: 0,
            ..SahiConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn top_region_section_enables_region_mode() {
        let file: SahiConfigFile = toml::from_str(
            r#"
            tile_width = 512
            score_threshold = 0.3

            [top_region]
            tile_width = 256
            tile_height = 256
            score_threshold = 0.1
            "#,
        )
        .unwrap();
        let cfg = SahiConfig::from_file(file);
        let pipeline = cfg.pipeline_config().unwrap();

        let split = pipeline.regions.expect("region mode");
        assert_eq!(split.top.tiling.tile_width(), 256);
        assert_eq!(split.top.score_threshold, 0.1);
        assert_eq!(split.bottom.tiling.tile_width(), 512);
        assert_eq!(split.bottom.score_threshold, 0.3);
    }
}
