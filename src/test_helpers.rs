//! Shared test utilities for the zoomed-image test suite.
//!
//! Provides job builders at the three levels the pipeline works on (raw
//! JSON text, parsed [`JobConfig`], normalized [`ImageEntry`]) and a writer
//! for small synthetic images.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let json = sample_job_json(&["shots/*.png"], "out");
//! let mut job = sample_job();
//! job.subregion_settings.zoom_factors = vec![vec![4.0]];
//!
//! let tmp = tempfile::TempDir::new().unwrap();
//! write_test_png(&tmp.path().join("a.png"), 200, 100);
//! ```
//!
//! All builders describe the same job: one East inset band of depth 0.2,
//! padding 0.05, horizontal fit, and a single 2× callout centered on the image.

use std::path::Path;

use crate::config::JobConfig;
use crate::types::{FitMode, ImageEntry, LineWidths, Placement, Rgb, SubregionEntry};

// =========================================================================
// Job builders
// =========================================================================

/// A single job record as JSON text.
pub fn sample_job_json(paths: &[&str], output_folder: &str) -> String {
    let paths = serde_json::to_string(paths).unwrap();
    let output_folder = serde_json::to_string(output_folder).unwrap();
    format!(
        r#"{{
    "pathSettings": {{
        "paths": {paths},
        "outputFolder": {output_folder}
    }},
    "subregionSettings": {{
        "placements": ["East"],
        "mainSizes": [0.2],
        "crossSizeWeights": [[1.0]],
        "centers": [[[0.5, 0.5]]],
        "zoomFactors": [[2.0]],
        "lineWidths": [[2.0, 1.0]],
        "colors": [[[255, 0, 0]]]
    }},
    "drawingSettings": {{
        "fitImages": ["Horizontal"],
        "paddings": [0.05]
    }}
}}"#
    )
}

/// The sample job, parsed.
pub fn sample_job() -> JobConfig {
    serde_json::from_str(&sample_job_json(&["*.png"], "out")).unwrap()
}

/// The sample job's single image, already normalized.
pub fn sample_entry() -> ImageEntry {
    ImageEntry {
        source: "/in/sample.png".into(),
        fit: FitMode::Horizontal,
        placement: Placement::East,
        main_size: 0.2,
        padding: 0.05,
        line_widths: LineWidths {
            zoomed: 2.0,
            source: 1.0,
        },
        subregions: vec![SubregionEntry {
            cross_weight: 1.0,
            center: [0.5, 0.5],
            zoom_factor: 2.0,
            color: Rgb::new(255, 0, 0),
        }],
    }
}

// =========================================================================
// Synthetic images
// =========================================================================

/// Write a `width`×`height` PNG with a simple gradient.
pub fn write_test_png(path: &Path, width: u32, height: u32) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    let img = image::RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    });
    img.save_with_format(path, image::ImageFormat::Png).unwrap();
}
