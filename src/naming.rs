//! Output file naming.
//!
//! Each source image produces one drawing in the job's output folder, named
//! after the source's file stem:
//! - `shots/010-dawn.png` → `<outputFolder>/010-dawn.svg`
//! - `figures/plot.v2.jpg` → `<outputFolder>/plot.v2.svg`
//!
//! Sources from different directories can share a stem. Because every job
//! writes into a single flat folder, such pairs would overwrite each other;
//! [`output_paths`] rejects them before anything is rendered.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Extension of every drawing.
pub const OUTPUT_EXTENSION: &str = "svg";

/// Two sources that would be written to the same output file.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{first} and {second} would both be written to {output}")]
pub struct OutputCollision {
    pub first: PathBuf,
    pub second: PathBuf,
    pub output: PathBuf,
}

/// Output file name for `source`: its stem with the drawing extension.
pub fn output_file_name(source: &Path) -> String {
    let stem = source
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    format!("{stem}.{OUTPUT_EXTENSION}")
}

/// Output path for `source` inside `folder`.
pub fn output_path(folder: &Path, source: &Path) -> PathBuf {
    folder.join(output_file_name(source))
}

/// Output paths for all `sources`, in order.
///
/// Fails on the first source whose output path was already claimed by an
/// earlier one.
pub fn output_paths(folder: &Path, sources: &[PathBuf]) -> Result<Vec<PathBuf>, OutputCollision> {
    let mut claimed: HashMap<PathBuf, &PathBuf> = HashMap::new();
    let mut outputs = Vec::with_capacity(sources.len());

    for source in sources {
        let output = output_path(folder, source);
        if let Some(first) = claimed.insert(output.clone(), source) {
            return Err(OutputCollision {
                first: first.clone(),
                second: source.clone(),
                output,
            });
        }
        outputs.push(output);
    }

    Ok(outputs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_name_replaces_extension() {
        assert_eq!(output_file_name(Path::new("/a/b/dawn.png")), "dawn.svg");
    }

    #[test]
    fn file_name_keeps_inner_dots() {
        assert_eq!(output_file_name(Path::new("plot.v2.jpg")), "plot.v2.svg");
    }

    #[test]
    fn file_name_without_extension() {
        assert_eq!(output_file_name(Path::new("/a/README")), "README.svg");
    }

    #[test]
    fn output_path_joins_folder() {
        assert_eq!(
            output_path(Path::new("/out"), Path::new("/in/x.tiff")),
            PathBuf::from("/out/x.svg")
        );
    }

    #[test]
    fn output_paths_preserve_order() {
        let sources = vec![PathBuf::from("/in/b.png"), PathBuf::from("/in/a.png")];
        let outputs = output_paths(Path::new("/out"), &sources).unwrap();
        assert_eq!(
            outputs,
            vec![PathBuf::from("/out/b.svg"), PathBuf::from("/out/a.svg")]
        );
    }

    #[test]
    fn same_stem_in_different_directories_collides() {
        let sources = vec![
            PathBuf::from("/in/one/shot.png"),
            PathBuf::from("/in/two/other.png"),
            PathBuf::from("/in/two/shot.jpg"),
        ];
        let err = output_paths(Path::new("/out"), &sources).unwrap_err();
        assert_eq!(err.first, PathBuf::from("/in/one/shot.png"));
        assert_eq!(err.second, PathBuf::from("/in/two/shot.jpg"));
        assert_eq!(err.output, PathBuf::from("/out/shot.svg"));
    }
}
