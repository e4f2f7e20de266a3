//! Centralized validation and helper functions for command-line paths.

use std::path::{Path, PathBuf};

/// Raster formats the diagram writer can encode, by file extension.
pub const IMAGE_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

/// Path validation error types
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Output directory does not exist: {}", .0.display())]
    MissingParent(PathBuf),
    #[error("Output parent is not a directory: {}", .0.display())]
    ParentNotDirectory(PathBuf),
    #[error("Output path is a directory: {}", .0.display())]
    OutputIsDirectory(PathBuf),
    #[error("Unsupported image format for {}: expected one of .png, .jpg, .jpeg", .0.display())]
    UnsupportedImageFormat(PathBuf),
}

/// Display label for an input file: its final path component.
///
/// Falls back to the full path text when the path has no file name
/// (e.g. `..` or `/`).
///
/// # Examples
///
/// ```
/// use blastn_compare::utils::validation::display_name;
/// use std::path::Path;
///
/// assert_eq!(display_name(Path::new("runs/2024/same1.tsv")), "same1.tsv");
/// assert_eq!(display_name(Path::new("different")), "different");
/// ```
#[must_use]
pub fn display_name(path: &Path) -> String {
    path.file_name().map_or_else(
        || path.display().to_string(),
        |name| name.to_string_lossy().into_owned(),
    )
}

/// Check that a file can be created at `path`: its parent directory must
/// exist and `path` itself must not be a directory.
///
/// # Errors
///
/// Returns `ValidationError::MissingParent` if the parent directory does not
/// exist, `ValidationError::ParentNotDirectory` if the parent is a file, or
/// `ValidationError::OutputIsDirectory` if `path` names a directory.
pub fn check_output_path(path: &Path) -> Result<(), ValidationError> {
    if path.is_dir() {
        return Err(ValidationError::OutputIsDirectory(path.to_path_buf()));
    }

    // A bare file name has an empty parent: the current directory
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => return Ok(()),
    };

    if !parent.exists() {
        return Err(ValidationError::MissingParent(parent.to_path_buf()));
    }
    if !parent.is_dir() {
        return Err(ValidationError::ParentNotDirectory(parent.to_path_buf()));
    }
    Ok(())
}

/// Check that a diagram output path is writable and has a supported raster extension.
///
/// # Errors
///
/// Returns `ValidationError::UnsupportedImageFormat` for unknown or missing
/// extensions, or any error from [`check_output_path`].
pub fn check_image_output_path(path: &Path) -> Result<(), ValidationError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase);

    match ext.as_deref() {
        Some(e) if IMAGE_EXTENSIONS.contains(&e) => check_output_path(path),
        _ => Err(ValidationError::UnsupportedImageFormat(path.to_path_buf())),
    }
}
