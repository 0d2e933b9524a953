//! Job driver.
//!
//! Runs each job record through the whole pipeline:
//!
//! ```text
//! paths (globs) ──scan──▶ sources ──normalize──▶ ImageEntry per source
//!                                                   │
//!                        <outputFolder>/<stem>.svg ◀┘ layout + render
//! ```
//!
//! ## Ordering
//!
//! Jobs run one after another, in file order. Inside a job, output names are
//! checked for collisions and every image is identified and laid out before
//! anything is written, so an unreadable image or impossible geometry fails
//! the job with no output. Then the output folder is created once and the
//! drawings are written in parallel with [rayon](https://docs.rs/rayon).
//!
//! ## Progress
//!
//! Callers pass an optional [`Sender`] and receive a [`ProcessEvent`] when a
//! job starts and whenever an image is written. With parallel rendering the
//! image events arrive in completion order.

use crate::broadcast::normalize;
use crate::config::{ConfigError, JobConfig, load_jobs};
use crate::naming::{OutputCollision, output_paths};
use crate::render::{RenderBackend, RenderError, RenderedImage, draw_prepared, prepare_image};
use crate::scan::{absolutize, resolve_sources};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProcessError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error("Failed to create output folder {path}: {source}")]
    OutputFolder {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Output name collision: {0}")]
    Collision(#[from] OutputCollision),
}

/// Progress reported while jobs run.
#[derive(Debug, Clone, PartialEq)]
pub enum ProcessEvent {
    JobStarted {
        /// 1-based position of the job in its config file.
        job: usize,
        config: PathBuf,
        image_count: usize,
        output_folder: PathBuf,
    },
    ImageRendered {
        job: usize,
        /// 1-based position of the image within the job.
        index: usize,
        source: PathBuf,
        output: PathBuf,
        subregions: usize,
    },
}

/// Result of one successful job.
#[derive(Debug, Clone, PartialEq)]
pub struct JobSummary {
    pub job: usize,
    pub config: PathBuf,
    pub output_folder: PathBuf,
    pub images: Vec<RenderedImage>,
}

/// A job (or a whole config file, when `job` is `None`) that failed.
#[derive(Debug, Clone, PartialEq)]
pub struct JobFailure {
    pub config: PathBuf,
    pub job: Option<usize>,
    pub error: String,
}

/// Outcome of a whole run across config files.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunSummary {
    pub completed: Vec<JobSummary>,
    pub failed: Vec<JobFailure>,
}

impl RunSummary {
    pub fn image_count(&self) -> usize {
        self.completed.iter().map(|j| j.images.len()).sum()
    }

    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Resolve the effective worker count.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)`, at least 1
pub fn effective_threads(requested: Option<usize>) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    requested.map(|n| n.clamp(1, cores)).unwrap_or(cores)
}

fn send(events: Option<&Sender<ProcessEvent>>, event: ProcessEvent) {
    if let Some(tx) = events {
        // Receiver gone means nobody is printing; rendering carries on.
        let _ = tx.send(event);
    }
}

/// Run one job record.
///
/// Relative `paths` and `outputFolder` are anchored at `base`.
pub fn process_job(
    backend: &impl RenderBackend,
    job_index: usize,
    config_path: &Path,
    job: &JobConfig,
    base: &Path,
    events: Option<&Sender<ProcessEvent>>,
) -> Result<JobSummary, ProcessError> {
    let sources = resolve_sources(&job.path_settings.paths, base)?;
    let output_folder = absolutize(&job.path_settings.output_folder, base);
    if sources.is_empty() {
        tracing::warn!(
            job = job_index,
            patterns = ?job.path_settings.paths,
            "No images matched"
        );
    }

    let outputs = output_paths(&output_folder, &sources)?;
    let normalized = normalize(job, sources, output_folder)?;
    tracing::info!(
        job = job_index,
        images = normalized.images.len(),
        output = %normalized.output_folder.display(),
        "Normalized job"
    );

    // Geometry for every image first: a bad image fails the job before
    // the output folder or any drawing is written.
    let prepared = normalized
        .images
        .par_iter()
        .zip(outputs.par_iter())
        .map(|(entry, output)| prepare_image(backend, entry, output))
        .collect::<Result<Vec<_>, RenderError>>()?;

    std::fs::create_dir_all(&normalized.output_folder).map_err(|source| {
        ProcessError::OutputFolder {
            path: normalized.output_folder.clone(),
            source,
        }
    })?;

    send(
        events,
        ProcessEvent::JobStarted {
            job: job_index,
            config: config_path.to_path_buf(),
            image_count: normalized.images.len(),
            output_folder: normalized.output_folder.clone(),
        },
    );

    let images = prepared
        .into_par_iter()
        .enumerate()
        .map(|(i, image)| {
            let rendered = draw_prepared(backend, image)?;
            tracing::debug!(
                source = %rendered.source.display(),
                output = %rendered.output.display(),
                "Wrote drawing"
            );
            send(
                events,
                ProcessEvent::ImageRendered {
                    job: job_index,
                    index: i + 1,
                    source: rendered.source.clone(),
                    output: rendered.output.clone(),
                    subregions: rendered.subregions,
                },
            );
            Ok(rendered)
        })
        .collect::<Result<Vec<_>, ProcessError>>()?;

    Ok(JobSummary {
        job: job_index,
        config: config_path.to_path_buf(),
        output_folder: normalized.output_folder,
        images,
    })
}

/// Run every job of every config file, in order.
///
/// Without `keep_going` the first failure (unreadable config or failing job)
/// is returned as an error. With it, failures are logged, recorded in the
/// summary, and the run continues with the next job.
pub fn process_configs(
    backend: &impl RenderBackend,
    configs: &[PathBuf],
    base: &Path,
    keep_going: bool,
    events: Option<Sender<ProcessEvent>>,
) -> Result<RunSummary, ProcessError> {
    let mut summary = RunSummary::default();

    for config_path in configs {
        tracing::info!(config = %config_path.display(), "Reading config");
        let jobs = match load_jobs(config_path) {
            Ok(jobs) => jobs,
            Err(e) if keep_going => {
                tracing::error!(config = %config_path.display(), "{e}");
                summary.failed.push(JobFailure {
                    config: config_path.clone(),
                    job: None,
                    error: e.to_string(),
                });
                continue;
            }
            Err(e) => return Err(e.into()),
        };

        for (i, job) in jobs.iter().enumerate() {
            let job_index = i + 1;
            match process_job(backend, job_index, config_path, job, base, events.as_ref()) {
                Ok(done) => summary.completed.push(done),
                Err(e) if keep_going => {
                    tracing::error!(
                        config = %config_path.display(),
                        job = job_index,
                        "{e}"
                    );
                    summary.failed.push(JobFailure {
                        config: config_path.clone(),
                        job: Some(job_index),
                        error: e.to_string(),
                    });
                }
                Err(e) => return Err(e),
            }
        }
    }

    Ok(summary)
}
