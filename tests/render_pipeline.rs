//! End-to-end: config file → SVG drawings on disk, through the real backend.

use std::fs;
use std::path::Path;
use tempfile::TempDir;
use zoomed_image::config::load_jobs;
use zoomed_image::process::{ProcessError, ProcessEvent, process_configs};
use zoomed_image::render::SvgBackend;

fn write_png(path: &Path, width: u32, height: u32) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    image::RgbImage::from_pixel(width, height, image::Rgb([40, 90, 160]))
        .save_with_format(path, image::ImageFormat::Png)
        .unwrap();
}

const CONFIG: &str = r#"[
  {
    "pathSettings": {
      "paths": ["shots/**/*.png"],
      "outputFolder": "zoomed"
    },
    "subregionSettings": {
      "placements": ["South", "West"],
      "mainSizes": [0.3],
      "crossSizeWeights": [[1.0, 2.0]],
      "centers": [[[0.25, 0.25], [0.75, 0.75]]],
      "zoomFactors": [[3.0]],
      "lineWidths": [[1.5, 0.75]],
      "colors": [[[230, 25, 75], [60, 180, 75]]]
    },
    "drawingSettings": {
      "fitImages": ["Horizontal"],
      "paddings": [0.02]
    }
  }
]"#;

#[test]
fn renders_one_svg_per_matched_image() {
    let tmp = TempDir::new().unwrap();
    write_png(&tmp.path().join("shots/a.png"), 64, 32);
    write_png(&tmp.path().join("shots/nested/b.png"), 30, 60);
    let config = tmp.path().join("config.json");
    fs::write(&config, CONFIG).unwrap();

    let (tx, rx) = std::sync::mpsc::channel();
    let summary =
        process_configs(&SvgBackend::new(), &[config], tmp.path(), false, Some(tx)).unwrap();

    assert!(summary.is_success());
    assert_eq!(summary.image_count(), 2);

    let events: Vec<ProcessEvent> = rx.iter().collect();
    assert!(matches!(
        &events[0],
        ProcessEvent::JobStarted { image_count: 2, .. }
    ));
    assert_eq!(events.len(), 3);

    for name in ["a.svg", "b.svg"] {
        let svg = fs::read_to_string(tmp.path().join("zoomed").join(name)).unwrap();
        assert!(svg.starts_with("<?xml"));
        assert_eq!(svg.matches("data:image/png;base64,").count(), 1);
        // full image + two callouts
        assert_eq!(svg.matches(r##"href="#source""##).count(), 3);
        // two outlines per callout
        assert_eq!(svg.matches("<rect").count(), 4);
        assert!(svg.contains("rgb(230,25,75)"));
        assert!(svg.contains("rgb(60,180,75)"));
    }
}

#[test]
fn canvas_covers_band_below_image() {
    let tmp = TempDir::new().unwrap();
    write_png(&tmp.path().join("shots/a.png"), 100, 50);
    let config = tmp.path().join("config.json");
    fs::write(&config, CONFIG).unwrap();

    let summary =
        process_configs(&SvgBackend::new(), &[config], tmp.path(), false, None).unwrap();
    let canvas = summary.completed[0].images[0].canvas;

    // frame 1.0 x 0.5, South band 0.3 deep after a 0.02 gap, 0.02 margin
    assert!((canvas.x + 2.0).abs() < 1e-9);
    assert!((canvas.y + 2.0).abs() < 1e-9);
    assert!((canvas.width - 104.0).abs() < 1e-9);
    assert!((canvas.height - 86.0).abs() < 1e-9);
}

#[test]
fn unreadable_image_fails_the_job() {
    let tmp = TempDir::new().unwrap();
    fs::create_dir_all(tmp.path().join("shots")).unwrap();
    fs::write(tmp.path().join("shots/broken.png"), b"not a png").unwrap();
    let config = tmp.path().join("config.json");
    fs::write(&config, CONFIG).unwrap();

    let result = process_configs(&SvgBackend::new(), &[config], tmp.path(), false, None);
    assert!(matches!(result, Err(ProcessError::Render(_))));
}

#[test]
fn example_config_loads() {
    let tmp = TempDir::new().unwrap();
    let config = tmp.path().join("config.json");
    fs::write(&config, CONFIG).unwrap();

    let jobs = load_jobs(&config).unwrap();
    assert_eq!(jobs.len(), 1);
    assert_eq!(jobs[0].subregion_settings.placements.len(), 2);
}
