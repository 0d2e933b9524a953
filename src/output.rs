//! CLI output formatting.
//!
//! # Output Format
//!
//! While a job runs, the printer thread shows one header per job and one
//! entry per written drawing:
//!
//! ```text
//! Job 001 of config.json (2 images) → /work/zoomed
//!     001 dawn.png → dawn.svg (2 subregions)
//!         Source: /work/shots/dawn.png
//!     002 dusk.png → dusk.svg (1 subregion)
//!         Source: /work/shots/dusk.png
//! ```
//!
//! When everything is done:
//!
//! ```text
//! Job 001 of config.json: 2 drawings
//! Job 002 of config.json: FAILED
//!     Output name collision: ...
//! Rendered 2 drawings in 1 job, 1 failed
//! ```
//!
//! # Architecture
//!
//! Every `format_*` function returns `Vec<String>` for testability and does
//! no I/O; `print_*` wrappers write to stdout.

use crate::process::{JobFailure, JobSummary, ProcessEvent, RunSummary};
use std::path::Path;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        format!("{n} {word}")
    } else {
        format!("{n} {word}s")
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|f| f.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn job_label(job: usize, config: &Path) -> String {
    format!("Job {} of {}", format_index(job), file_name(config))
}

/// Format a single progress event as display lines.
pub fn format_process_event(event: &ProcessEvent) -> Vec<String> {
    match event {
        ProcessEvent::JobStarted {
            job,
            config,
            image_count,
            output_folder,
        } => vec![format!(
            "{} ({}) \u{2192} {}",
            job_label(*job, config),
            plural(*image_count, "image"),
            output_folder.display()
        )],
        ProcessEvent::ImageRendered {
            index,
            source,
            output,
            subregions,
            ..
        } => vec![
            format!(
                "{}{} {} \u{2192} {} ({})",
                indent(1),
                format_index(*index),
                file_name(source),
                file_name(output),
                plural(*subregions, "subregion")
            ),
            format!("{}Source: {}", indent(2), source.display()),
        ],
    }
}

/// One line per completed job.
pub fn format_job_summary(summary: &JobSummary) -> Vec<String> {
    vec![format!(
        "{}: {}",
        job_label(summary.job, &summary.config),
        plural(summary.images.len(), "drawing")
    )]
}

fn format_job_failure(failure: &JobFailure) -> Vec<String> {
    let label = match failure.job {
        Some(job) => job_label(job, &failure.config),
        None => file_name(&failure.config),
    };
    vec![
        format!("{label}: FAILED"),
        format!("{}{}", indent(1), failure.error),
    ]
}

/// Per-job results followed by a totals line.
pub fn format_run_summary(summary: &RunSummary) -> Vec<String> {
    let mut lines: Vec<String> = summary
        .completed
        .iter()
        .flat_map(format_job_summary)
        .collect();
    lines.extend(summary.failed.iter().flat_map(format_job_failure));

    let mut totals = format!(
        "Rendered {} in {}",
        plural(summary.image_count(), "drawing"),
        plural(summary.completed.len(), "job")
    );
    if !summary.failed.is_empty() {
        totals.push_str(&format!(", {} failed", summary.failed.len()));
    }
    lines.push(totals);
    lines
}

pub fn print_run_summary(summary: &RunSummary) {
    for line in format_run_summary(summary) {
        println!("{}", line);
    }
}
