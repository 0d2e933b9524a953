//! # Zoomed Image
//!
//! Annotates images with magnified callouts. For each image, a set of small
//! rectangular regions is cut out, enlarged, and drawn side by side in a band
//! next to the image; matching outlines mark every region in the original and
//! its enlargement. The result is one vector drawing (SVG) per image.
//!
//! # Pipeline
//!
//! A run reads one or more JSON job files. Each job goes through:
//!
//! ```text
//! 1. Scan        glob patterns     →  ordered, de-aliased source files
//! 2. Normalize   short lists       →  one ImageEntry per source (cyclic repetition)
//! 3. Layout      ImageEntry + size →  frame, insets, source crops, canvas (unit space)
//! 4. Render      layout            →  <outputFolder>/<stem>.svg
//! ```
//!
//! Stages 2 and 3 are pure; they are tested without touching the filesystem.
//! Stage 4 goes through the [`render::RenderBackend`] trait so the drawing
//! plan can be recorded by a mock backend.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`config`] | JSON job records: loading, validation, stock example |
//! | [`types`] | Placement, fit mode, colors, and the normalized per-image entries |
//! | [`broadcast`] | Cyclic list expansion and job normalization |
//! | [`scan`] | Glob resolution of source paths |
//! | [`naming`] | Output file names and collision detection |
//! | [`layout`] | Unit-space geometry: frame, insets, source crops, canvas |
//! | [`render`] | Drawing plans, the backend trait, and the SVG backend |
//! | [`process`] | Per-job driver with parallel rendering and progress events |
//! | [`output`] | CLI output formatting |
//!
//! # Unit Space
//!
//! All geometry is computed with the image frame at the origin and one side
//! of length 1.0 (the width for `Horizontal` fit, the height for `Vertical`).
//! Inset depths, paddings and crop centers are all fractions of that frame,
//! so a config reads the same whatever the pixel size of the image. Drawings
//! scale unit space by [`render::UNITS_PER_FRAME`].

pub mod broadcast;
pub mod config;
pub mod layout;
pub mod naming;
pub mod output;
pub mod process;
pub mod render;
pub mod scan;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
