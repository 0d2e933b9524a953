//! Shared types used across the pipeline.
//!
//! The enums and small value types here appear both in the raw JSON model
//! ([`crate::config`]) and in the normalized per-image records produced by
//! [`crate::broadcast::normalize`]. The normalized records are what the layout
//! engine and renderer consume: one [`ImageEntry`] per source image, each
//! owning its [`SubregionEntry`] list, so nothing downstream indexes parallel
//! lists by position.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Border of the image the inset band is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Placement {
    North,
    East,
    South,
    West,
}

impl Placement {
    /// True when insets are stacked horizontally (band above or below the image).
    pub fn is_horizontal_band(self) -> bool {
        matches!(self, Placement::North | Placement::South)
    }
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Placement::North => "North",
            Placement::East => "East",
            Placement::South => "South",
            Placement::West => "West",
        };
        f.write_str(name)
    }
}

/// Which image axis is normalized to length 1.0 in unit space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FitMode {
    Horizontal,
    Vertical,
}

/// An 8-bit RGB color, serialized as `[r, g, b]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Rgb(pub [u8; 3]);

impl Rgb {
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self([r, g, b])
    }

    /// CSS/SVG color notation, e.g. `rgb(255,0,0)`.
    pub fn to_css(self) -> String {
        let [r, g, b] = self.0;
        format!("rgb({r},{g},{b})")
    }
}

/// Outline widths for one image, serialized as `[zoomed, source]`.
///
/// Widths are in output units; they are not scaled with the geometry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct LineWidths {
    /// Outline around the magnified inset.
    pub zoomed: f64,
    /// Outline around the source crop inside the image.
    pub source: f64,
}

impl From<[f64; 2]> for LineWidths {
    fn from([zoomed, source]: [f64; 2]) -> Self {
        Self { zoomed, source }
    }
}

impl From<LineWidths> for [f64; 2] {
    fn from(widths: LineWidths) -> Self {
        [widths.zoomed, widths.source]
    }
}

/// One magnified callout within an image's inset band.
#[derive(Debug, Clone, PartialEq)]
pub struct SubregionEntry {
    /// Relative share of the band's cross-axis length among siblings.
    pub cross_weight: f64,
    /// Crop center in normalized image coordinates (`[0,1] x [0,1]`).
    pub center: [f64; 2],
    /// Magnification; the crop is the inset size divided by this.
    pub zoom_factor: f64,
    pub color: Rgb,
}

/// One fully-populated image to render.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageEntry {
    /// Absolute, de-aliased source path.
    pub source: PathBuf,
    pub fit: FitMode,
    pub placement: Placement,
    /// Depth of the inset band along the placement axis, in unit space.
    pub main_size: f64,
    /// Gap between image and band, and between adjacent insets, in unit space.
    pub padding: f64,
    pub line_widths: LineWidths,
    pub subregions: Vec<SubregionEntry>,
}

/// A job after path resolution and broadcasting.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedJob {
    /// Absolute output directory.
    pub output_folder: PathBuf,
    pub images: Vec<ImageEntry>,
}
