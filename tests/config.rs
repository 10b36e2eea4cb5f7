use std::io::Write;
use std::sync::Mutex;

use tempfile::NamedTempFile;

use sahi_core::SahiConfig;

static ENV_LOCK: Mutex<()> = Mutex::new(());

fn clear_env() {
    for key in [
        "SAHI_CONFIG",
        "SAHI_TILE_WIDTH",
        "SAHI_TILE_HEIGHT",
        "SAHI_OVERLAP",
        "SAHI_IOU_THRESHOLD",
        "SAHI_SCORE_THRESHOLD",
        "SAHI_MAX_TILES",
        "SAHI_FULL_FRAME_FIRST",
    ] {
        std::env::remove_var(key);
    }
}

#[test]
fn loads_config_from_file_and_env_overrides() {
    let _guard = ENV_LOCK.lock().unwrap();
    clear_env();

    let mut file = NamedTempFile::new().expect("temp config");
    let toml = r#"
        tile_width = 512
        tile_height = 384
        overlap = 0.25
        iou_threshold = 0.45
        score_threshold = 0.3
        max_tiles_per_frame = 12
        full_frame_first = false

        [top_region]
        tile_width = 256
        tile_height = 192
        overlap = 0.3
        score_threshold = 0.15
    "#;
    file.write_all(toml.as_bytes()).expect("write config");

    std::env::set_var("SAHI_CONFIG", file.path());
    std::env::set_var("SAHI_OVERLAP", "0.4");
    std::env::set_var("SAHI_MAX_TILES", "20");

    let cfg = SahiConfig::load().expect("load config");

    assert_eq!(cfg.tile_width, 512);
    assert_eq!(cfg.tile_height, 384);
    assert_eq!(cfg.overlap, 0.4);
    assert_eq!(cfg.iou_threshold, 0.45);
    assert_eq!(cfg.score_threshold, 0.3);
    assert_eq!(cfg.max_tiles_per_frame, 20);
    assert!(!cfg.full_frame_first);

    let top = cfg.top_region.expect("top region");
    assert_eq!(top.tile_width, 256);
    assert_eq!(top.tile_height, 192);
    assert_eq!(top.score_threshold, 0.15);

    let pipeline = cfg.pipeline_config().expect("pipeline config");
    let split = pipeline.regions.expect("region mode");
    assert_eq!(split.bottom.tiling.tile_width(), 512);
    assert_eq!(split.top.tiling.tile_height(), 192);

    clear_env();
}

#[test]
fn out_of_range_env_values_are_clamped_at_the_boundary() {
    let _guard = ENV_LOCK.lock().unwrap();
    clear_env();

    std::env::set_var("SAHI_OVERLAP", "0.95");
    std::env::set_var("SAHI_IOU_THRESHOLD", "2.0");
    std::env::set_var("SAHI_SCORE_THRESHOLD", "-1.0");

    let cfg = SahiConfig::load().expect("load config");
    assert_eq!(cfg.overlap, 0.9);
    assert_eq!(cfg.iou_threshold, 1.0);
    assert_eq!(cfg.score_threshold, 0.0);
    // The clamped values satisfy the core constructors.
    cfg.pipeline_config().expect("pipeline config");

    clear_env();
}

#[test]
fn unparsable_env_value_is_an_error_not_a_default() {
    let _guard = ENV_LOCK.lock().unwrap();
    clear_env();

    std::env::set_var("SAHI_MAX_TILES", "lots");
    assert!(SahiConfig::load().is_err());

    clear_env();
}
