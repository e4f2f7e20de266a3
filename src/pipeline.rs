//! End-to-end report generation.
//!
//! Loads the three inputs, draws the two overlap diagrams, computes the three
//! statistics rows and writes the PDF. Any failure aborts the run; the PDF is
//! only written after every earlier step has succeeded.

use anyhow::Context;
use tracing::{info, warn};

use crate::analysis::overlap::SetOverlap;
use crate::analysis::stats::StatisticsRow;
use crate::config::{InputFile, ReportConfig, REPORT_TITLE};
use crate::core::identifiers::IdentifierSet;
use crate::core::record::BlastHits;
use crate::parsing::blast::parse_blast_file;
use crate::render::write_venn_diagram;
use crate::report::{assemble_report, write_pdf};

/// Per-input results of a run.
#[derive(Debug, Clone)]
pub struct InputSummary {
    pub label: String,
    pub records: usize,
    pub subjects: usize,
    pub stats: StatisticsRow,
}

/// What a successful run computed.
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Reference, comparison A, comparison B
    pub inputs: [InputSummary; 3],
    /// Reference vs. comparison A
    pub overlap_a: SetOverlap,
    /// Reference vs. comparison B
    pub overlap_b: SetOverlap,
}

struct LoadedInput<'a> {
    input: &'a InputFile,
    hits: BlastHits,
    ids: IdentifierSet,
    stats: StatisticsRow,
}

impl LoadedInput<'_> {
    fn summary(&self) -> InputSummary {
        InputSummary {
            label: self.input.label.clone(),
            records: self.hits.len(),
            subjects: self.ids.len(),
            stats: self.stats,
        }
    }
}

fn load(input: &InputFile) -> anyhow::Result<LoadedInput<'_>> {
    let hits = parse_blast_file(&input.path)
        .with_context(|| format!("Failed to load BLAST results from {}", input.path.display()))?;
    let ids = IdentifierSet::from_hits(&hits);
    let stats = StatisticsRow::from_hits(&hits);

    info!(
        "{}: {} alignments, {} distinct subjects",
        input.label,
        hits.len(),
        ids.len()
    );
    if stats.has_undefined_sd() {
        warn!(
            "{}: fewer than two values in a column; its standard deviation is reported as nan",
            input.label
        );
    }

    Ok(LoadedInput {
        input,
        hits,
        ids,
        stats,
    })
}

/// Run the whole comparison described by `config`.
///
/// # Errors
///
/// Returns an error naming the offending path if an output location is
/// unusable, an input cannot be loaded, or a diagram or the report cannot
/// be written.
pub fn run(config: &ReportConfig) -> anyhow::Result<RunSummary> {
    config
        .validate_outputs()
        .context("Invalid output location")?;

    let reference = load(&config.reference)?;
    let comparison_a = load(&config.comparison_a)?;
    let comparison_b = load(&config.comparison_b)?;

    let overlap_a = reference.ids.overlap(&comparison_a.ids);
    let overlap_b = reference.ids.overlap(&comparison_b.ids);

    let title_a = config.diagram_a_title();
    let title_b = config.diagram_b_title();
    for (overlap, other, title, path) in [
        (&overlap_a, &comparison_a, &title_a, &config.diagram_a),
        (&overlap_b, &comparison_b, &title_b, &config.diagram_b),
    ] {
        write_venn_diagram(
            overlap,
            (reference.input.label.as_str(), other.input.label.as_str()),
            title,
            path,
        )
        .with_context(|| format!("Failed to write Venn diagram {}", path.display()))?;
        info!("Wrote {}", path.display());
    }

    let table_headings: Vec<String> = [&reference, &comparison_a, &comparison_b]
        .iter()
        .map(|loaded| format!("{} Summary Table:", loaded.input.label))
        .collect();

    let document = assemble_report(
        REPORT_TITLE,
        &[
            (title_a.as_str(), config.diagram_a.as_path()),
            (title_b.as_str(), config.diagram_b.as_path()),
        ],
        &[
            (table_headings[0].as_str(), &reference.stats),
            (table_headings[1].as_str(), &comparison_a.stats),
            (table_headings[2].as_str(), &comparison_b.stats),
        ],
    );

    write_pdf(&document, &config.document)
        .with_context(|| format!("Failed to write report {}", config.document.display()))?;
    info!("Wrote {}", config.document.display());

    Ok(RunSummary {
        inputs: [
            reference.summary(),
            comparison_a.summary(),
            comparison_b.summary(),
        ],
        overlap_a,
        overlap_b,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn blast_line(subject: &str, pident: f64) -> String {
        format!("q1\t{subject}\t{pident}\t100\t1\t0\t1\t100\t1\t100\t1e-40\t150.0\n")
    }

    fn write_hits(dir: &Path, name: &str, subjects: &[&str]) -> std::path::PathBuf {
        let path = dir.join(name);
        let text: String = subjects.iter().map(|s| blast_line(s, 97.0)).collect();
        std::fs::write(&path, text).unwrap();
        path
    }

    fn config(dir: &Path) -> ReportConfig {
        let r = write_hits(dir, "same1.tsv", &["s1", "s2", "s3", "s4", "s5", "s5"]);
        let a = write_hits(dir, "different.tsv", &["s4", "s5", "s6", "s7", "s8"]);
        let b = write_hits(dir, "same2.tsv", &["s1", "s2", "s3", "s4", "s5"]);
        ReportConfig::new(
            r,
            a,
            b,
            dir.join("venn1.png"),
            dir.join("venn2.png"),
            dir.join("report.pdf"),
        )
    }

    #[test]
    fn test_run_writes_all_outputs() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = config(dir.path());

        let summary = run(&cfg).unwrap();

        for output in cfg.outputs() {
            assert!(std::fs::metadata(output).unwrap().len() > 0);
        }
        assert_eq!(summary.overlap_a, SetOverlap { only_first: 3, only_second: 3, shared: 2 });
        assert_eq!(summary.overlap_b, SetOverlap { only_first: 0, only_second: 0, shared: 5 });
        assert_eq!(summary.inputs[0].records, 6);
        assert_eq!(summary.inputs[0].subjects, 5);
        assert_eq!(summary.inputs[1].label, "different.tsv");
        assert!((summary.inputs[2].stats.mean_pident - 97.0).abs() < 1e-12);
    }

    #[test]
    fn test_bad_input_writes_no_report() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = config(dir.path());
        std::fs::write(&cfg.comparison_b.path, "not\ta\tblast\tline\n").unwrap();

        let err = run(&cfg).unwrap_err();
        assert!(format!("{err:#}").contains("same2.tsv"));
        assert!(!cfg.document.exists());
        assert!(!cfg.diagram_a.exists());
    }

    #[test]
    fn test_missing_output_dir_fails_before_loading() {
        let dir = tempfile::tempdir().unwrap();
        let mut cfg = config(dir.path());
        cfg.document = dir.path().join("missing").join("report.pdf");

        let err = run(&cfg).unwrap_err();
        assert!(format!("{err:#}").contains("does not exist"));
        assert!(!cfg.diagram_a.exists());
    }
}
