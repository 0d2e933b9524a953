//! Drawing: geometry → SVG.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Identify** | `image::image_dimensions` |
//! | **Embed source** | `image` re-encode + `base64` data URI |
//! | **Blit** | nested `<svg>` with a pixel `viewBox` |
//! | **Outline** | unfilled `<rect>` |
//!
//! The module is split into:
//! - **Parameters**: Data structures describing draw commands
//! - **Backend**: [`RenderBackend`] trait + [`SvgBackend`]
//! - **Operations**: Layout + planning + backend execution

pub mod backend;
pub mod operations;
mod params;
pub mod svg_backend;

pub use backend::{BackendError, Dimensions, RenderBackend};
pub use operations::{
    PreparedImage, RenderError, RenderedImage, UNITS_PER_FRAME, draw_prepared, plan_drawing,
    prepare_image, render_image,
};
pub use params::{BlitParams, CanvasParams, DrawCommand, DrawingPlan, StrokeParams};
pub use svg_backend::SvgBackend;
