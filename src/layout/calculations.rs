//! Pure geometry for one image.
//!
//! All functions here are pure and testable without any I/O or images. They
//! work in unit space: the image frame sits at the origin with one side of
//! length 1.0 (see [`FitMode`]). Inset bands sit beside the frame, so their
//! rectangles may have negative coordinates.

use super::rect::Rect;
use crate::types::{FitMode, ImageEntry, Placement};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    #[error("Image has zero size ({width}x{height})")]
    EmptyImage { width: u32, height: u32 },
    #[error("Zoom factor must be positive, got {0}")]
    NonPositiveZoom(f64),
    #[error("Cross size weights must sum to a positive value, got {0}")]
    NonPositiveWeightSum(f64),
    #[error("Cross size weight must be positive, got {0}")]
    NonPositiveWeight(f64),
    #[error("Main size must be positive, got {0}")]
    NonPositiveMainSize(f64),
    #[error("Padding must not be negative, got {0}")]
    NegativePadding(f64),
    #[error("No room for {count} insets: cross length {available} minus paddings leaves {remaining}")]
    NoCrossSpace {
        count: usize,
        available: f64,
        remaining: f64,
    },
}

fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

/// Stage A: the image frame in unit space.
///
/// `Horizontal` fixes the width at 1.0, `Vertical` fixes the height at 1.0;
/// the other side follows the pixel aspect ratio.
///
/// # Examples
/// ```
/// # use zoomed_image::layout::{image_frame, Rect};
/// # use zoomed_image::types::FitMode;
/// let frame = image_frame((200, 100), FitMode::Horizontal).unwrap();
/// assert_eq!(frame, Rect::new(0.0, 0.0, 1.0, 0.5));
/// ```
pub fn image_frame(pixels: (u32, u32), fit: FitMode) -> Result<Rect, GeometryError> {
    let (width, height) = pixels;
    if width == 0 || height == 0 {
        return Err(GeometryError::EmptyImage { width, height });
    }
    let (w, h) = (width as f64, height as f64);
    Ok(match fit {
        FitMode::Horizontal => Rect::new(0.0, 0.0, 1.0, h / w),
        FitMode::Vertical => Rect::new(0.0, 0.0, w / h, 1.0),
    })
}

/// Stage B: one inset rectangle per weight, in weight order.
///
/// The band starts one `padding` outside the frame on the `placement` side and
/// is `main_size` deep. Its cross length (frame width for North/South, frame
/// height for East/West) minus one `padding` between neighbours is split in
/// proportion to the weights.
pub fn inset_rects(
    placement: Placement,
    main_size: f64,
    padding: f64,
    frame: Rect,
    weights: &[f64],
) -> Result<Vec<Rect>, GeometryError> {
    if !is_positive(main_size) {
        return Err(GeometryError::NonPositiveMainSize(main_size));
    }
    if !padding.is_finite() || padding < 0.0 {
        return Err(GeometryError::NegativePadding(padding));
    }
    if weights.is_empty() {
        return Ok(Vec::new());
    }

    let weight_sum: f64 = weights.iter().sum();
    if !is_positive(weight_sum) {
        return Err(GeometryError::NonPositiveWeightSum(weight_sum));
    }
    if let Some(&bad) = weights.iter().find(|w| !is_positive(**w)) {
        return Err(GeometryError::NonPositiveWeight(bad));
    }

    let horizontal = placement.is_horizontal_band();
    let available = if horizontal { frame.width } else { frame.height };
    let remaining = available - padding * (weights.len() - 1) as f64;
    if remaining <= 0.0 {
        return Err(GeometryError::NoCrossSpace {
            count: weights.len(),
            available,
            remaining,
        });
    }

    let (origin_x, origin_y) = match placement {
        Placement::North => (frame.x, frame.y - main_size - padding),
        Placement::South => (frame.x, frame.bottom() + padding),
        Placement::East => (frame.right() + padding, frame.y),
        Placement::West => (frame.x - main_size - padding, frame.y),
    };

    let mut cursor = 0.0;
    let rects = weights
        .iter()
        .map(|weight| {
            let cross = weight / weight_sum * remaining;
            let rect = if horizontal {
                Rect::new(origin_x + cursor, origin_y, cross, main_size)
            } else {
                Rect::new(origin_x, origin_y + cursor, main_size, cross)
            };
            cursor += cross + padding;
            rect
        })
        .collect();

    Ok(rects)
}

/// Stage C: the source crop a given inset magnifies.
///
/// The crop is the inset size divided by `zoom_factor` (each axis
/// independently), centered on `center` scaled into the frame. No clamping:
/// the crop may extend past the frame.
pub fn source_rect(
    inset: Rect,
    zoom_factor: f64,
    center: [f64; 2],
    frame: Rect,
) -> Result<Rect, GeometryError> {
    if !is_positive(zoom_factor) {
        return Err(GeometryError::NonPositiveZoom(zoom_factor));
    }
    let width = inset.width / zoom_factor;
    let height = inset.height / zoom_factor;
    Ok(Rect::new(
        frame.x + center[0] * frame.width - width / 2.0,
        frame.y + center[1] * frame.height - height / 2.0,
        width,
        height,
    ))
}

/// Bounds of the drawing: frame and insets, plus `padding` on every side.
pub fn canvas_rect(frame: Rect, insets: &[Rect], padding: f64) -> Rect {
    insets
        .iter()
        .fold(frame, |acc, inset| acc.union(inset))
        .expand(padding)
}

/// Rectangles for one callout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SubregionLayout {
    /// Where the magnified crop is drawn.
    pub inset: Rect,
    /// The crop inside the image frame.
    pub source: Rect,
}

/// Complete unit-space geometry for one image.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageLayout {
    pub frame: Rect,
    pub subregions: Vec<SubregionLayout>,
    pub canvas: Rect,
}

/// Run stages A, B and C for one normalized image.
pub fn layout_image(entry: &ImageEntry, pixels: (u32, u32)) -> Result<ImageLayout, GeometryError> {
    let frame = image_frame(pixels, entry.fit)?;

    let weights: Vec<f64> = entry.subregions.iter().map(|s| s.cross_weight).collect();
    let insets = inset_rects(
        entry.placement,
        entry.main_size,
        entry.padding,
        frame,
        &weights,
    )?;

    let subregions = insets
        .iter()
        .zip(&entry.subregions)
        .map(|(&inset, sub)| {
            Ok(SubregionLayout {
                inset,
                source: source_rect(inset, sub.zoom_factor, sub.center, frame)?,
            })
        })
        .collect::<Result<Vec<_>, GeometryError>>()?;

    Ok(ImageLayout {
        frame,
        subregions,
        canvas: canvas_rect(frame, &insets, entry.padding),
    })
}
