//! End-to-end tests of the `blastn-compare` binary.
//!
//! Each test builds small tabular BLAST inputs in a scratch directory and
//! checks the files the binary leaves behind and its exit status.

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;

fn blast_line(query: &str, subject: &str, pident: f64, evalue: &str, bitscore: f64) -> String {
    format!("{query}\t{subject}\t{pident}\t120\t2\t0\t1\t120\t5\t124\t{evalue}\t{bitscore}\n")
}

fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

/// Reference and comparison inputs: five subjects each, two shared with the reference.
fn inputs(dir: &Path) -> [PathBuf; 3] {
    let reference: String = ["s1", "s2", "s3", "s4", "s5"]
        .iter()
        .zip([90.0, 92.0, 94.0, 96.0, 98.0])
        .map(|(s, p)| blast_line("q1", s, p, "1e-50", 200.0))
        .collect();
    let different: String = ["s4", "s5", "s6", "s7", "s8"]
        .iter()
        .map(|s| blast_line("q1", s, 85.5, "3e-12", 90.0))
        .collect();
    let same2 = format!(
        "# BLASTN 2.15.0+\n# Fields: query id, subject id, % identity, ...\n{}",
        ["s1", "s2", "s3", "s4", "s9"]
            .iter()
            .map(|s| blast_line("q2", s, 99.0, "0.0", 400.0))
            .collect::<String>()
    );

    [
        write_file(dir, "same1.txt", &reference),
        write_file(dir, "different.txt", &different),
        write_file(dir, "same2.txt", &same2),
    ]
}

fn count_files(dir: &Path) -> usize {
    std::fs::read_dir(dir).unwrap().count()
}

#[test]
fn test_full_pipeline_writes_five_outputs() {
    let scratch = tempfile::tempdir().unwrap();
    let out_dir = scratch.path().join("out");
    std::fs::create_dir(&out_dir).unwrap();
    let [file1, file2, file3] = inputs(scratch.path());

    let venn1 = out_dir.join("venn_diagram1.png");
    let venn2 = out_dir.join("venn_diagram2.png");
    let pdf = out_dir.join("blastn_summary_report.pdf");

    Command::cargo_bin("blastn-compare")
        .unwrap()
        .args([&file1, &file2, &file3, &venn1, &venn2, &pdf])
        .assert()
        .success();

    // Three inputs plus the output directory holding two images and one report
    assert_eq!(count_files(scratch.path()), 4);
    assert_eq!(count_files(&out_dir), 3);

    for image in [&venn1, &venn2] {
        let bytes = std::fs::read(image).unwrap();
        assert!(bytes.starts_with(b"\x89PNG\r\n\x1a\n"));
    }

    let bytes = std::fs::read(&pdf).unwrap();
    assert!(bytes.starts_with(b"%PDF-"));
    let text = String::from_utf8_lossy(&bytes);
    for heading in [
        "BLASTN Result Comparison Summary",
        "Venn Diagram: same1.txt vs different.txt",
        "Venn Diagram: same1.txt vs same2.txt",
        "same1.txt Summary Table:",
        "different.txt Summary Table:",
        "same2.txt Summary Table:",
    ] {
        assert!(text.contains(heading), "report is missing {heading:?}");
    }
    // Reference statistics: pident 90..98 step 2
    assert!(text.contains("(94.0)"));
    assert!(text.contains("(3.1623)"));
}

#[test]
fn test_verbose_prints_overlap_counts() {
    let scratch = tempfile::tempdir().unwrap();
    let [file1, file2, file3] = inputs(scratch.path());
    let dir = scratch.path();

    Command::cargo_bin("blastn-compare")
        .unwrap()
        .arg("--verbose")
        .args([&file1, &file2, &file3])
        .args([dir.join("v1.png"), dir.join("v2.jpg"), dir.join("r.pdf")])
        .assert()
        .success()
        .stderr(predicate::str::contains(
            "same1.txt vs different.txt: 3 only / 2 shared / 3 only",
        ))
        .stderr(predicate::str::contains(
            "same1.txt vs same2.txt: 1 only / 4 shared / 1 only",
        ));

    let jpg = std::fs::read(dir.join("v2.jpg")).unwrap();
    assert!(jpg.starts_with(&[0xFF, 0xD8]));
}

#[test]
fn test_too_few_arguments() {
    let scratch = tempfile::tempdir().unwrap();
    let [file1, file2, file3] = inputs(scratch.path());
    let before = count_files(scratch.path());

    Command::cargo_bin("blastn-compare")
        .unwrap()
        .args([&file1, &file2, &file3])
        .arg(scratch.path().join("v1.png"))
        .arg(scratch.path().join("v2.png"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));

    assert_eq!(count_files(scratch.path()), before);
}

#[test]
fn test_no_arguments() {
    Command::cargo_bin("blastn-compare")
        .unwrap()
        .assert()
        .failure()
        .stderr(predicate::str::contains("required"));
}

#[test]
fn test_malformed_input_names_path() {
    let scratch = tempfile::tempdir().unwrap();
    let [file1, file2, _] = inputs(scratch.path());
    let broken = write_file(scratch.path(), "broken.txt", "q1\ts1\t99.0\t100\n");
    let dir = scratch.path();

    Command::cargo_bin("blastn-compare")
        .unwrap()
        .args([&file1, &file2, &broken])
        .args([dir.join("v1.png"), dir.join("v2.png"), dir.join("r.pdf")])
        .assert()
        .failure()
        .stderr(predicate::str::contains("broken.txt"))
        .stderr(predicate::str::contains("line 1"));

    assert!(!dir.join("r.pdf").exists());
    assert!(!dir.join("v1.png").exists());
}

#[test]
fn test_missing_input_file() {
    let scratch = tempfile::tempdir().unwrap();
    let [file1, file2, _] = inputs(scratch.path());
    let dir = scratch.path();

    Command::cargo_bin("blastn-compare")
        .unwrap()
        .args([&file1, &file2, &dir.join("absent.txt")])
        .args([dir.join("v1.png"), dir.join("v2.png"), dir.join("r.pdf")])
        .assert()
        .failure()
        .stderr(predicate::str::contains("absent.txt"));

    assert!(!dir.join("r.pdf").exists());
}

#[test]
fn test_missing_output_directory() {
    let scratch = tempfile::tempdir().unwrap();
    let [file1, file2, file3] = inputs(scratch.path());
    let dir = scratch.path();
    let missing = dir.join("no_such_dir");

    Command::cargo_bin("blastn-compare")
        .unwrap()
        .args([&file1, &file2, &file3])
        .args([dir.join("v1.png"), dir.join("v2.png"), missing.join("r.pdf")])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no_such_dir"));

    // Outputs are checked before any diagram is drawn
    assert!(!dir.join("v1.png").exists());
    assert!(!dir.join("v2.png").exists());
}
