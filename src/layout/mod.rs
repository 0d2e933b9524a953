//! Geometric layout engine.
//!
//! Derives, per image, every rectangle the renderer needs:
//!
//! | Stage | Function | Output |
//! |---|---|---|
//! | **A** | [`image_frame`] | Image frame at the origin, one side 1.0 |
//! | **B** | [`inset_rects`] | One magnified-inset rect per subregion, beside the frame |
//! | **C** | [`source_rect`] | The crop each inset magnifies, inside the frame |
//!
//! plus [`canvas_rect`], the drawing bounds. Everything is unit-agnostic;
//! conversion to output units happens in [`crate::render`].

mod calculations;
mod rect;

pub use calculations::{
    GeometryError, ImageLayout, SubregionLayout, canvas_rect, image_frame, inset_rects,
    layout_image, source_rect,
};
pub use rect::Rect;
