//! High-level drawing operations.
//!
//! These functions combine the layout engine with backend execution: identify
//! the source, compute its geometry, turn the geometry into a
//! [`DrawingPlan`], and hand the plan to the backend.

use super::backend::{BackendError, RenderBackend};
use super::params::{BlitParams, CanvasParams, DrawCommand, DrawingPlan, StrokeParams};
use crate::layout::{GeometryError, ImageLayout, Rect, layout_image};
use crate::types::ImageEntry;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Output units per unit-space length (one frame side of 1.0 → 100 units).
pub const UNITS_PER_FRAME: f64 = 100.0;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Geometry error for {path}: {source}")]
    Geometry {
        path: PathBuf,
        #[source]
        source: GeometryError,
    },
    #[error(transparent)]
    Backend(#[from] BackendError),
}

/// Summary of one written drawing.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedImage {
    pub source: PathBuf,
    pub output: PathBuf,
    pub pixels: (u32, u32),
    pub subregions: usize,
    /// Canvas bounds in output units.
    pub canvas: Rect,
}

/// Map a unit-space region of the frame onto source pixel coordinates.
fn pixel_crop(region: Rect, frame: Rect, pixels: (u32, u32)) -> Rect {
    let sx = pixels.0 as f64 / frame.width;
    let sy = pixels.1 as f64 / frame.height;
    Rect::new(
        (region.x - frame.x) * sx,
        (region.y - frame.y) * sy,
        region.width * sx,
        region.height * sy,
    )
}

/// Plan the drawing for one image without executing it.
///
/// Draw order: the whole image, then for each subregion its magnified crop,
/// the inset outline and the source outline.
pub fn plan_drawing(
    entry: &ImageEntry,
    pixels: (u32, u32),
    layout: &ImageLayout,
    output: &Path,
) -> DrawingPlan {
    let frame = layout.frame;
    let mut commands = Vec::with_capacity(1 + 3 * layout.subregions.len());

    commands.push(DrawCommand::Blit(BlitParams {
        crop: pixel_crop(frame, frame, pixels),
        target: frame * UNITS_PER_FRAME,
    }));

    for (sub, settings) in layout.subregions.iter().zip(&entry.subregions) {
        commands.push(DrawCommand::Blit(BlitParams {
            crop: pixel_crop(sub.source, frame, pixels),
            target: sub.inset * UNITS_PER_FRAME,
        }));
        commands.push(DrawCommand::StrokeRect(StrokeParams {
            rect: sub.inset * UNITS_PER_FRAME,
            line_width: entry.line_widths.zoomed,
            color: settings.color,
        }));
        commands.push(DrawCommand::StrokeRect(StrokeParams {
            rect: sub.source * UNITS_PER_FRAME,
            line_width: entry.line_widths.source,
            color: settings.color,
        }));
    }

    DrawingPlan {
        source: entry.source.clone(),
        output: output.to_path_buf(),
        canvas: CanvasParams {
            viewport: layout.canvas * UNITS_PER_FRAME,
        },
        commands,
    }
}

/// Everything known about one image before anything is written.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedImage {
    pub pixels: (u32, u32),
    pub subregions: usize,
    pub plan: DrawingPlan,
}

/// Identify, lay out and plan one image. Nothing is written.
pub fn prepare_image(
    backend: &impl RenderBackend,
    entry: &ImageEntry,
    output: &Path,
) -> Result<PreparedImage, RenderError> {
    let pixels = backend.identify(&entry.source)?.as_tuple();

    let layout = layout_image(entry, pixels).map_err(|source| RenderError::Geometry {
        path: entry.source.clone(),
        source,
    })?;
    tracing::debug!(
        source = %entry.source.display(),
        frame = ?layout.frame,
        canvas = ?layout.canvas,
        "Computed image geometry"
    );
    for (i, sub) in layout.subregions.iter().enumerate() {
        tracing::debug!(
            subregion = i + 1,
            inset = ?sub.inset,
            source = ?sub.source,
            "Planned subregion"
        );
    }

    Ok(PreparedImage {
        pixels,
        subregions: layout.subregions.len(),
        plan: plan_drawing(entry, pixels, &layout, output),
    })
}

/// Execute a prepared plan.
pub fn draw_prepared(
    backend: &impl RenderBackend,
    prepared: PreparedImage,
) -> Result<RenderedImage, RenderError> {
    backend.draw(&prepared.plan)?;
    Ok(RenderedImage {
        source: prepared.plan.source,
        output: prepared.plan.output,
        pixels: prepared.pixels,
        subregions: prepared.subregions,
        canvas: prepared.plan.canvas.viewport,
    })
}

/// Identify, lay out, plan and draw one image.
pub fn render_image(
    backend: &impl RenderBackend,
    entry: &ImageEntry,
    output: &Path,
) -> Result<RenderedImage, RenderError> {
    let prepared = prepare_image(backend, entry, output)?;
    draw_prepared(backend, prepared)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::backend::tests::{MockBackend, RecordedOp};
    use crate::test_helpers::sample_entry;
    use crate::types::Rgb;

    const EPS: f64 = 1e-9;

    #[test]
    fn pixel_crop_maps_frame_to_full_image() {
        let frame = Rect::new(0.0, 0.0, 1.0, 0.5);
        let crop = pixel_crop(frame, frame, (200, 100));
        assert!(crop.approx_eq(&Rect::new(0.0, 0.0, 200.0, 100.0), EPS));
    }

    #[test]
    fn pixel_crop_scales_each_axis() {
        let frame = Rect::new(0.0, 0.0, 2.0, 1.0);
        let crop = pixel_crop(Rect::new(0.5, 0.25, 0.2, 0.1), frame, (400, 200));
        assert!(crop.approx_eq(&Rect::new(100.0, 50.0, 40.0, 20.0), EPS));
    }

    #[test]
    fn plan_orders_commands() {
        let entry = sample_entry();
        let layout = layout_image(&entry, (200, 100)).unwrap();
        let plan = plan_drawing(&entry, (200, 100), &layout, Path::new("/out/a.svg"));

        assert_eq!(plan.commands.len(), 4);
        assert!(matches!(plan.commands[0], DrawCommand::Blit(_)));
        assert!(matches!(plan.commands[1], DrawCommand::Blit(_)));
        assert!(matches!(plan.commands[2], DrawCommand::StrokeRect(_)));
        assert!(matches!(plan.commands[3], DrawCommand::StrokeRect(_)));
    }

    #[test]
    fn plan_scales_geometry_to_output_units() {
        let entry = sample_entry();
        let layout = layout_image(&entry, (200, 100)).unwrap();
        let plan = plan_drawing(&entry, (200, 100), &layout, Path::new("/out/a.svg"));

        assert!(
            plan.canvas
                .viewport
                .approx_eq(&Rect::new(-5.0, -5.0, 135.0, 60.0), EPS)
        );

        let blits: Vec<_> = plan.blits().collect();
        assert!(blits[0].target.approx_eq(&Rect::new(0.0, 0.0, 100.0, 50.0), EPS));
        assert!(blits[0].crop.approx_eq(&Rect::new(0.0, 0.0, 200.0, 100.0), EPS));
        // inset (1.05, 0, 0.2, 0.5), source (0.45, 0.125, 0.1, 0.25)
        assert!(blits[1].target.approx_eq(&Rect::new(105.0, 0.0, 20.0, 50.0), EPS));
        assert!(blits[1].crop.approx_eq(&Rect::new(90.0, 25.0, 20.0, 50.0), EPS));
    }

    #[test]
    fn plan_strokes_use_line_widths_and_color() {
        let mut entry = sample_entry();
        entry.subregions[0].color = Rgb::new(10, 20, 30);
        entry.line_widths.zoomed = 3.0;
        entry.line_widths.source = 1.5;
        let layout = layout_image(&entry, (200, 100)).unwrap();
        let plan = plan_drawing(&entry, (200, 100), &layout, Path::new("/out/a.svg"));

        let strokes: Vec<_> = plan.strokes().collect();
        assert_eq!(strokes.len(), 2);
        assert_eq!(strokes[0].line_width, 3.0);
        assert_eq!(strokes[1].line_width, 1.5);
        assert!(strokes.iter().all(|s| s.color == Rgb::new(10, 20, 30)));
        assert!(strokes[0].rect.approx_eq(&Rect::new(105.0, 0.0, 20.0, 50.0), EPS));
        assert!(strokes[1].rect.approx_eq(&Rect::new(45.0, 12.5, 10.0, 25.0), EPS));
    }

    #[test]
    fn render_image_identifies_then_draws() {
        let backend = MockBackend::with_dimensions(200, 100);
        let entry = sample_entry();

        let rendered = render_image(&backend, &entry, Path::new("/out/a.svg")).unwrap();
        assert_eq!(rendered.subregions, 1);
        assert_eq!(rendered.pixels, (200, 100));
        assert_eq!(rendered.output, PathBuf::from("/out/a.svg"));

        let ops = backend.get_operations();
        assert_eq!(ops.len(), 2);
        assert!(matches!(&ops[0], RecordedOp::Identify(_)));
        assert!(matches!(
            &ops[1],
            RecordedOp::Draw { output, commands, .. } if output == "/out/a.svg" && commands.len() == 4
        ));
    }

    #[test]
    fn render_image_geometry_error_skips_draw() {
        let backend = MockBackend::with_dimensions(200, 100);
        let mut entry = sample_entry();
        entry.subregions[0].zoom_factor = 0.0;

        let result = render_image(&backend, &entry, Path::new("/out/a.svg"));
        assert!(matches!(
            result,
            Err(RenderError::Geometry {
                source: GeometryError::NonPositiveZoom(_),
                ..
            })
        ));
        assert!(backend.draws().is_empty());
    }

    #[test]
    fn prepare_image_does_not_draw() {
        let backend = MockBackend::with_dimensions(200, 100);
        let prepared = prepare_image(&backend, &sample_entry(), Path::new("/out/a.svg")).unwrap();

        assert_eq!(prepared.subregions, 1);
        assert_eq!(prepared.plan.commands.len(), 4);
        assert!(backend.draws().is_empty());

        let rendered = draw_prepared(&backend, prepared).unwrap();
        assert_eq!(rendered.output, PathBuf::from("/out/a.svg"));
        assert_eq!(backend.draws().len(), 1);
    }

    #[test]
    fn render_image_identify_error_propagates() {
        let backend = MockBackend::new();
        let result = render_image(&backend, &sample_entry(), Path::new("/out/a.svg"));
        assert!(matches!(
            result,
            Err(RenderError::Backend(BackendError::ImageLoad { .. }))
        ));
    }
}
