//! SVG rendering backend.
//!
//! Every drawing is a standalone SVG file with the source image embedded
//! once as a data URI and referenced by each blit.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Identify | `image::image_dimensions` |
//! | Decode (TIFF, WebP) | `image::ImageReader` with guessed format |
//! | Re-encode → PNG | `DynamicImage::write_to` |
//! | Data URI | `base64` standard engine |
//! | Markup | `maud` |
//!
//! JPEG and PNG sources are embedded byte-for-byte; other formats are
//! re-encoded as PNG so any SVG viewer can display them.
//!
//! A blit is a nested `<svg>` whose `viewBox` is the pixel crop and whose
//! position and size are the target rectangle; `preserveAspectRatio="none"`
//! gives the independent x/y scaling and the nested viewport clips the crop.

use super::backend::{BackendError, Dimensions, RenderBackend};
use super::params::{BlitParams, DrawCommand, DrawingPlan, StrokeParams};
use crate::layout::Rect;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use image::{ImageFormat, ImageReader};
use maud::{Markup, PreEscaped, html};
use std::io::Cursor;
use std::path::Path;

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;
const SVG_NS: &str = "http://www.w3.org/2000/svg";
const SOURCE_ID: &str = "source";

/// Backend writing SVG drawings to disk.
pub struct SvgBackend;

impl SvgBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SvgBackend {
    fn default() -> Self {
        Self::new()
    }
}

/// Source image ready to embed.
#[derive(Debug, Clone, PartialEq)]
pub struct EmbeddedImage {
    pub width: u32,
    pub height: u32,
    pub data_uri: String,
}

fn load_error(path: &Path, message: impl ToString) -> BackendError {
    BackendError::ImageLoad {
        path: path.to_path_buf(),
        message: message.to_string(),
    }
}

/// Read an image and produce its data URI.
fn embed_image(path: &Path) -> Result<EmbeddedImage, BackendError> {
    let bytes = std::fs::read(path).map_err(|e| load_error(path, e))?;
    let (width, height) = image::image_dimensions(path).map_err(|e| load_error(path, e))?;

    let (mime, payload) = match image::guess_format(&bytes) {
        Ok(ImageFormat::Png) => ("image/png", bytes),
        Ok(ImageFormat::Jpeg) => ("image/jpeg", bytes),
        _ => {
            let img = ImageReader::new(Cursor::new(&bytes))
                .with_guessed_format()
                .map_err(|e| load_error(path, e))?
                .decode()
                .map_err(|e| load_error(path, e))?;
            let mut png = Vec::new();
            img.write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
                .map_err(|e| load_error(path, e))?;
            ("image/png", png)
        }
    };

    Ok(EmbeddedImage {
        width,
        height,
        data_uri: format!("data:{mime};base64,{}", STANDARD.encode(payload)),
    })
}

fn view_box(rect: &Rect) -> String {
    format!("{} {} {} {}", rect.x, rect.y, rect.width, rect.height)
}

fn blit(params: &BlitParams) -> Markup {
    html! {
        svg x=(params.target.x) y=(params.target.y)
            width=(params.target.width) height=(params.target.height)
            viewBox=(view_box(&params.crop)) preserveAspectRatio="none" {
            use href=(format!("#{SOURCE_ID}")) {}
        }
    }
}

fn stroke_rect(params: &StrokeParams) -> Markup {
    html! {
        rect x=(params.rect.x) y=(params.rect.y)
            width=(params.rect.width) height=(params.rect.height)
            fill="none" stroke=(params.color.to_css())
            stroke-width=(params.line_width) {}
    }
}

/// Build the SVG document for `plan`, embedding `image` as the source.
pub fn render_svg(plan: &DrawingPlan, image: &EmbeddedImage) -> String {
    let viewport = plan.canvas.viewport;
    let document = html! {
        (PreEscaped(XML_DECLARATION))
        svg xmlns=(SVG_NS)
            width=(plan.canvas.width()) height=(plan.canvas.height())
            viewBox=(view_box(&viewport)) {
            defs {
                image id=(SOURCE_ID) width=(image.width) height=(image.height)
                    href=(image.data_uri) {}
            }
            @for command in &plan.commands {
                @match command {
                    DrawCommand::Blit(params) => { (blit(params)) }
                    DrawCommand::StrokeRect(params) => { (stroke_rect(params)) }
                }
            }
        }
    };
    document.into_string()
}

impl RenderBackend for SvgBackend {
    fn identify(&self, path: &Path) -> Result<Dimensions, BackendError> {
        let (width, height) = image::image_dimensions(path).map_err(|e| load_error(path, e))?;
        Ok(Dimensions { width, height })
    }

    fn draw(&self, plan: &DrawingPlan) -> Result<(), BackendError> {
        let image = embed_image(&plan.source)?;
        let svg = render_svg(plan, &image);
        std::fs::write(&plan.output, svg).map_err(|source| BackendError::OutputWrite {
            path: plan.output.clone(),
            source,
        })
    }
}
