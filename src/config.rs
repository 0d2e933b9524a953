//! Job configuration module.
//!
//! Handles loading and validating the JSON job files. A file holds an array of
//! job records (a single bare record is accepted too); each record describes
//! one batch of images and how to annotate them.
//!
//! ## Configuration Format
//!
//! ```json
//! [
//!   {
//!     "pathSettings": {
//!       "paths": ["shots/**/*.png"],
//!       "outputFolder": "out"
//!     },
//!     "subregionSettings": {
//!       "placements": ["East"],
//!       "mainSizes": [0.4],
//!       "crossSizeWeights": [[1.0, 1.0]],
//!       "centers": [[[0.25, 0.25], [0.75, 0.6]]],
//!       "zoomFactors": [[3.0]],
//!       "lineWidths": [[2.0, 1.0]],
//!       "colors": [[[230, 25, 75], [60, 180, 75]]]
//!     },
//!     "drawingSettings": {
//!       "fitImages": ["Horizontal"],
//!       "paddings": [0.02]
//!     }
//!   }
//! ]
//! ```
//!
//! ## Short Lists
//!
//! Every list under `subregionSettings` and `drawingSettings` may be shorter
//! than the number of matched images. Per image, the subregion lists
//! (`crossSizeWeights`, `centers`, `zoomFactors`, `colors`) may be shorter than
//! that image's subregion count. Short lists are repeated cyclically by
//! [`crate::broadcast`]; an empty list has nothing to repeat and is rejected
//! here, at load time.
//!
//! Unknown keys are rejected to catch typos early.

use crate::types::{FitMode, LineWidths, Placement, Rgb};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Config file not found: {0}")]
    NotFound(PathBuf),
    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Cannot expand empty list `{field}`{}", image_suffix(.image))]
    Expansion {
        field: &'static str,
        image: Option<usize>,
    },
    #[error("Config validation error: {0}")]
    Validation(String),
    #[error("Invalid path pattern `{pattern}`: {message}")]
    Pattern { pattern: String, message: String },
    #[error("Failed to read matched path: {0}")]
    Glob(String),
}

fn image_suffix(image: &Option<usize>) -> String {
    match image {
        Some(i) => format!(" for image {}", i + 1),
        None => String::new(),
    }
}

/// One job record: which images to read, where to write, and how to annotate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct JobConfig {
    pub path_settings: PathSettings,
    pub subregion_settings: SubregionSettings,
    pub drawing_settings: DrawingSettings,
}

/// Input patterns and output location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PathSettings {
    /// Glob patterns; `**` matches recursively.
    pub paths: Vec<String>,
    /// Output directory, created if absent.
    pub output_folder: PathBuf,
}

/// Per-image inset band settings and per-subregion callout settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SubregionSettings {
    pub placements: Vec<Placement>,
    pub main_sizes: Vec<f64>,
    /// Per image, one weight per subregion.
    pub cross_size_weights: Vec<Vec<f64>>,
    /// Per image, one normalized `[x, y]` crop center per subregion.
    pub centers: Vec<Vec<[f64; 2]>>,
    /// Per image, one zoom factor per subregion.
    pub zoom_factors: Vec<Vec<f64>>,
    /// Per image, a `[zoomed, source]` outline width pair.
    pub line_widths: Vec<LineWidths>,
    /// Per image, one `[r, g, b]` color per subregion.
    pub colors: Vec<Vec<Rgb>>,
}

/// Per-image drawing settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct DrawingSettings {
    pub fit_images: Vec<FitMode>,
    pub paddings: Vec<f64>,
}

impl JobConfig {
    /// Reject lists that cannot seed a cyclic expansion and values no
    /// layout could use.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.path_settings.paths.is_empty() {
            return Err(ConfigError::Validation(
                "pathSettings.paths must not be empty".into(),
            ));
        }

        let s = &self.subregion_settings;
        let d = &self.drawing_settings;
        require_non_empty("placements", &s.placements, None)?;
        require_non_empty("mainSizes", &s.main_sizes, None)?;
        require_non_empty("crossSizeWeights", &s.cross_size_weights, None)?;
        require_non_empty("centers", &s.centers, None)?;
        require_non_empty("zoomFactors", &s.zoom_factors, None)?;
        require_non_empty("lineWidths", &s.line_widths, None)?;
        require_non_empty("colors", &s.colors, None)?;
        require_non_empty("fitImages", &d.fit_images, None)?;
        require_non_empty("paddings", &d.paddings, None)?;

        for (i, list) in s.cross_size_weights.iter().enumerate() {
            require_non_empty("crossSizeWeights", list, Some(i))?;
        }
        for (i, list) in s.centers.iter().enumerate() {
            require_non_empty("centers", list, Some(i))?;
        }
        for (i, list) in s.zoom_factors.iter().enumerate() {
            require_non_empty("zoomFactors", list, Some(i))?;
        }
        for (i, list) in s.colors.iter().enumerate() {
            require_non_empty("colors", list, Some(i))?;
        }

        for widths in &s.line_widths {
            for w in [widths.zoomed, widths.source] {
                if !w.is_finite() || w < 0.0 {
                    return Err(ConfigError::Validation(format!(
                        "lineWidths values must be finite and >= 0, got {w}"
                    )));
                }
            }
        }

        Ok(())
    }
}

pub(crate) fn require_non_empty<T>(
    field: &'static str,
    list: &[T],
    image: Option<usize>,
) -> Result<(), ConfigError> {
    if list.is_empty() {
        Err(ConfigError::Expansion { field, image })
    } else {
        Ok(())
    }
}

/// Parse a job file's contents: either an array of records or one record.
pub fn parse_jobs(content: &str, path: &Path) -> Result<Vec<JobConfig>, ConfigError> {
    let parse_err = |source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    };
    let value: serde_json::Value = serde_json::from_str(content).map_err(parse_err)?;
    let jobs = if value.is_array() {
        serde_json::from_value::<Vec<JobConfig>>(value).map_err(parse_err)?
    } else {
        vec![serde_json::from_value::<JobConfig>(value).map_err(parse_err)?]
    };
    for job in &jobs {
        job.validate()?;
    }
    Ok(jobs)
}

/// Load and validate all job records from a JSON file.
pub fn load_jobs(path: &Path) -> Result<Vec<JobConfig>, ConfigError> {
    if !path.is_file() {
        return Err(ConfigError::NotFound(path.to_path_buf()));
    }
    let content = fs::read_to_string(path)?;
    parse_jobs(&content, path)
}

/// Returns a complete example job file.
///
/// Used by the `--gen-config` CLI flag.
pub fn stock_config_json() -> &'static str {
    r#"[
  {
    "pathSettings": {
      "paths": ["images/*.png", "figures/**/*.jpg"],
      "outputFolder": "zoomed"
    },
    "subregionSettings": {
      "placements": ["East", "South"],
      "mainSizes": [0.4],
      "crossSizeWeights": [[1.0, 1.0]],
      "centers": [[[0.25, 0.25], [0.7, 0.6]]],
      "zoomFactors": [[3.0]],
      "lineWidths": [[2.0, 1.0]],
      "colors": [[[230, 25, 75], [60, 180, 75]]]
    },
    "drawingSettings": {
      "fitImages": ["Horizontal"],
      "paddings": [0.02]
    }
  }
]
"#
}
