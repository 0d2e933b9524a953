//! Parameter types for drawing operations.
//!
//! These structs describe *what* to draw, not *how*. They are the interface
//! between the planner in [`operations`](super::operations) (which turns a
//! layout into draw commands) and the [`backend`](super::backend) (which
//! produces the output file). A mock backend can record them in tests.
//!
//! ## Types
//!
//! - [`CanvasParams`]: Output canvas bounds, in output units.
//! - [`BlitParams`]: Copy a pixel crop of the source into a target rectangle.
//! - [`StrokeParams`]: Outline an axis-aligned rectangle.
//! - [`DrawCommand`]: One of the two primitives.
//! - [`DrawingPlan`]: Everything needed to produce one output file.

use crate::layout::Rect;
use crate::types::Rgb;
use std::path::PathBuf;

/// Output canvas bounds.
///
/// `viewport.x`/`viewport.y` is the drawing coordinate that lands at the
/// canvas's top-left corner; width and height are the canvas size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasParams {
    pub viewport: Rect,
}

impl CanvasParams {
    pub fn width(&self) -> f64 {
        self.viewport.width
    }

    pub fn height(&self) -> f64 {
        self.viewport.height
    }
}

/// Draw the `crop` region of the source image (in source pixels, fractional
/// allowed) stretched over `target` (in output units).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlitParams {
    pub crop: Rect,
    pub target: Rect,
}

impl BlitParams {
    /// Independent x/y scale factors from source pixels to output units.
    pub fn scale(&self) -> (f64, f64) {
        (
            self.target.width / self.crop.width,
            self.target.height / self.crop.height,
        )
    }
}

/// Outline `rect` (in output units).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeParams {
    pub rect: Rect,
    pub line_width: f64,
    pub color: Rgb,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCommand {
    Blit(BlitParams),
    StrokeRect(StrokeParams),
}

/// A complete drawing for one source image, in draw order.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawingPlan {
    pub source: PathBuf,
    pub output: PathBuf,
    pub canvas: CanvasParams,
    pub commands: Vec<DrawCommand>,
}

impl DrawingPlan {
    pub fn blits(&self) -> impl Iterator<Item = &BlitParams> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Blit(b) => Some(b),
            DrawCommand::StrokeRect(_) => None,
        })
    }

    pub fn strokes(&self) -> impl Iterator<Item = &StrokeParams> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::StrokeRect(s) => Some(s),
            DrawCommand::Blit(_) => None,
        })
    }
}
