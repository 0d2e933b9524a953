//! Rendering backend trait and shared types.
//!
//! The [`RenderBackend`] trait is the boundary to whatever actually decodes
//! images and writes output files. The layout engine only needs two things
//! from it: an image's pixel size, and a way to execute a [`DrawingPlan`]
//! (open a canvas, blit crops, stroke outlines, flush to disk).
//!
//! The production implementation is
//! [`SvgBackend`](super::svg_backend::SvgBackend).

use super::params::DrawingPlan;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to load image {path}: {message}")]
    ImageLoad { path: PathBuf, message: String },
    #[error("Failed to write {path}: {source}")]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result of an identify operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub fn as_tuple(self) -> (u32, u32) {
        (self.width, self.height)
    }
}

/// Trait for rendering backends.
///
/// `Sync` so one backend can serve rayon workers rendering different images.
pub trait RenderBackend: Sync {
    /// Get image dimensions in pixels.
    fn identify(&self, path: &Path) -> Result<Dimensions, BackendError>;

    /// Produce the output file described by `plan`.
    fn draw(&self, plan: &DrawingPlan) -> Result<(), BackendError>;
}
