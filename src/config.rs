//! Explicit run configuration.
//!
//! The six command-line paths carry both locations and display labels. A
//! [`ReportConfig`] names each role and derives the labels once, so the rest of
//! the pipeline never depends on argument positions.

use std::path::{Path, PathBuf};

use crate::utils::validation::{
    check_image_output_path, check_output_path, display_name, ValidationError,
};

/// Title at the top of every report.
pub const REPORT_TITLE: &str = "BLASTN Result Comparison Summary";

/// A BLAST result file and the label it is shown under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputFile {
    pub path: PathBuf,
    pub label: String,
}

impl InputFile {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let label = display_name(&path);
        Self { path, label }
    }
}

/// All locations a report run reads from and writes to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportConfig {
    /// Reference search; compared against both others
    pub reference: InputFile,
    pub comparison_a: InputFile,
    pub comparison_b: InputFile,

    /// Venn diagram of reference vs. comparison A
    pub diagram_a: PathBuf,

    /// Venn diagram of reference vs. comparison B
    pub diagram_b: PathBuf,

    /// Final PDF report
    pub document: PathBuf,
}

impl ReportConfig {
    #[must_use]
    pub fn new(
        reference: impl Into<PathBuf>,
        comparison_a: impl Into<PathBuf>,
        comparison_b: impl Into<PathBuf>,
        diagram_a: impl Into<PathBuf>,
        diagram_b: impl Into<PathBuf>,
        document: impl Into<PathBuf>,
    ) -> Self {
        Self {
            reference: InputFile::new(reference),
            comparison_a: InputFile::new(comparison_a),
            comparison_b: InputFile::new(comparison_b),
            diagram_a: diagram_a.into(),
            diagram_b: diagram_b.into(),
            document: document.into(),
        }
    }

    /// Inputs in report order: reference, comparison A, comparison B.
    #[must_use]
    pub fn inputs(&self) -> [&InputFile; 3] {
        [&self.reference, &self.comparison_a, &self.comparison_b]
    }

    /// Every file a successful run creates.
    #[must_use]
    pub fn outputs(&self) -> [&Path; 3] {
        [&self.diagram_a, &self.diagram_b, &self.document]
    }

    /// Title of the reference vs. comparison A diagram.
    #[must_use]
    pub fn diagram_a_title(&self) -> String {
        venn_title(&self.reference.label, &self.comparison_a.label)
    }

    /// Title of the reference vs. comparison B diagram.
    #[must_use]
    pub fn diagram_b_title(&self) -> String {
        venn_title(&self.reference.label, &self.comparison_b.label)
    }

    /// Check every output location before any work is done.
    ///
    /// # Errors
    ///
    /// Returns the first `ValidationError` found among the diagram paths
    /// (which must also carry a raster extension) and the document path.
    pub fn validate_outputs(&self) -> Result<(), ValidationError> {
        check_image_output_path(&self.diagram_a)?;
        check_image_output_path(&self.diagram_b)?;
        check_output_path(&self.document)
    }
}

fn venn_title(first: &str, second: &str) -> String {
    format!("Venn Diagram: {first} vs {second}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(dir: &Path) -> ReportConfig {
        ReportConfig::new(
            "runs/same1.tsv",
            "runs/different.tsv",
            "/abs/same2.tsv",
            dir.join("venn1.png"),
            dir.join("venn2.png"),
            dir.join("report.pdf"),
        )
    }

    #[test]
    fn test_labels_from_file_names() {
        let cfg = config(Path::new("out"));
        let labels: Vec<&str> = cfg.inputs().iter().map(|i| i.label.as_str()).collect();
        assert_eq!(labels, vec!["same1.tsv", "different.tsv", "same2.tsv"]);
        assert_eq!(cfg.reference.path, PathBuf::from("runs/same1.tsv"));
    }

    #[test]
    fn test_diagram_titles() {
        let cfg = config(Path::new("out"));
        assert_eq!(
            cfg.diagram_a_title(),
            "Venn Diagram: same1.tsv vs different.tsv"
        );
        assert_eq!(cfg.diagram_b_title(), "Venn Diagram: same1.tsv vs same2.tsv");
    }

    #[test]
    fn test_validate_outputs() {
        let dir = tempfile::tempdir().unwrap();
        assert!(config(dir.path()).validate_outputs().is_ok());

        let cfg = config(&dir.path().join("missing"));
        assert!(matches!(
            cfg.validate_outputs(),
            Err(ValidationError::MissingParent(_))
        ));

        let mut cfg = config(dir.path());
        cfg.diagram_b = dir.path().join("venn2.svg");
        assert!(matches!(
            cfg.validate_outputs(),
            Err(ValidationError::UnsupportedImageFormat(_))
        ));
    }

    #[test]
    fn test_outputs() {
        let cfg = config(Path::new("out"));
        assert_eq!(cfg.outputs()[2], Path::new("out/report.pdf"));
    }
}
