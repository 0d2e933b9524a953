//! Cyclic list expansion and config normalization.
//!
//! A job record is an object of parallel lists indexed in lockstep: the n-th
//! placement, main size, padding, ... all belong to the n-th matched image.
//! Lists may be shorter than needed; [`broadcast`] repeats them cyclically
//! (`expanded[i] == original[i % len]`) until they reach the target length.
//!
//! Expansion happens at two granularities:
//!
//! 1. **Per job**: every per-image list is expanded to the image count.
//! 2. **Per image**: that image's subregion lists (weights, centers, zoom
//!    factors, colors) are expanded to its subregion count, which is the
//!    longest of those lists.
//!
//! [`normalize`] runs both passes and folds the result into one
//! [`ImageEntry`] per image, each owning its [`SubregionEntry`] list.

use crate::config::{ConfigError, JobConfig, require_non_empty};
use crate::types::{ImageEntry, NormalizedJob, SubregionEntry};
use std::path::PathBuf;

/// Expand `items` to `len` by cyclic repetition.
///
/// Lists already at or beyond `len` are returned unchanged (never truncated).
/// Returns `None` when `items` is empty but `len > 0`: there is nothing to repeat.
pub fn broadcast<T: Clone>(items: &[T], len: usize) -> Option<Vec<T>> {
    if items.len() >= len {
        return Some(items.to_vec());
    }
    if items.is_empty() {
        return None;
    }
    Some(items.iter().cycle().take(len).cloned().collect())
}

fn broadcast_field<T: Clone>(
    field: &'static str,
    items: &[T],
    len: usize,
    image: Option<usize>,
) -> Result<Vec<T>, ConfigError> {
    require_non_empty(field, items, image)?;
    broadcast(items, len).ok_or(ConfigError::Expansion { field, image })
}

/// Fold a job record and its resolved source paths into per-image entries.
///
/// `sources` is the ordered, de-aliased path list from [`crate::scan`]; its
/// length is the image count every per-image list is expanded to.
///
/// `lineWidths` holds one `[zoomed, source]` pair per image, not one entry per
/// subregion, so it takes no part in an image's subregion count.
pub fn normalize(
    job: &JobConfig,
    sources: Vec<PathBuf>,
    output_folder: PathBuf,
) -> Result<NormalizedJob, ConfigError> {
    let n = sources.len();
    let s = &job.subregion_settings;
    let d = &job.drawing_settings;

    let placements = broadcast_field("placements", &s.placements, n, None)?;
    let main_sizes = broadcast_field("mainSizes", &s.main_sizes, n, None)?;
    let weights = broadcast_field("crossSizeWeights", &s.cross_size_weights, n, None)?;
    let centers = broadcast_field("centers", &s.centers, n, None)?;
    let zooms = broadcast_field("zoomFactors", &s.zoom_factors, n, None)?;
    let line_widths = broadcast_field("lineWidths", &s.line_widths, n, None)?;
    let colors = broadcast_field("colors", &s.colors, n, None)?;
    let fits = broadcast_field("fitImages", &d.fit_images, n, None)?;
    let paddings = broadcast_field("paddings", &d.paddings, n, None)?;

    let images = sources
        .into_iter()
        .enumerate()
        .map(|(i, source)| {
            let count = [
                weights[i].len(),
                centers[i].len(),
                zooms[i].len(),
                colors[i].len(),
            ]
            .into_iter()
            .max()
            .unwrap_or(0);

            let w = broadcast_field("crossSizeWeights", &weights[i], count, Some(i))?;
            let c = broadcast_field("centers", &centers[i], count, Some(i))?;
            let z = broadcast_field("zoomFactors", &zooms[i], count, Some(i))?;
            let k = broadcast_field("colors", &colors[i], count, Some(i))?;

            let subregions = (0..count)
                .map(|j| SubregionEntry {
                    cross_weight: w[j],
                    center: c[j],
                    zoom_factor: z[j],
                    color: k[j],
                })
                .collect();

            Ok(ImageEntry {
                source,
                fit: fits[i],
                placement: placements[i],
                main_size: main_sizes[i],
                padding: paddings[i],
                line_widths: line_widths[i],
                subregions,
            })
        })
        .collect::<Result<Vec<_>, ConfigError>>()?;

    Ok(NormalizedJob {
        output_folder,
        images,
    })
}
