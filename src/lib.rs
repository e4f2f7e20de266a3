//! # blastn-compare
//!
//! Summarize how two BLASTN searches differ from a reference search.
//!
//! Given three tabular BLASTN result files (`-outfmt 6`, or `-outfmt 7` with
//! comment lines), `blastn-compare`:
//!
//! - loads each file into typed [`AlignmentRecord`]s,
//! - collects the distinct subject ids hit by each search,
//! - draws two proportional Venn diagrams of subject-id overlap
//!   (reference vs. each comparison file),
//! - computes mean and sample standard deviation of percent identity,
//!   e-value and bit score for each file,
//! - and lays everything out in a single PDF report.
//!
//! ## Example
//!
//! ```rust,no_run
//! use blastn_compare::{parsing::blast::parse_blast_file, IdentifierSet, StatisticsRow};
//! use std::path::Path;
//!
//! let reference = parse_blast_file(Path::new("same1.tsv")).unwrap();
//! let other = parse_blast_file(Path::new("different.tsv")).unwrap();
//!
//! let overlap = IdentifierSet::from_hits(&reference).overlap(&IdentifierSet::from_hits(&other));
//! println!("shared subjects: {}", overlap.shared);
//!
//! let stats = StatisticsRow::from_hits(&reference);
//! println!("mean pident: {}", stats.mean_pident);
//! ```
//!
//! ## Modules
//!
//! - [`parsing`]: Tabular BLAST parser
//! - [`core`]: Alignment records and subject-id sets
//! - [`analysis`]: Descriptive statistics and set partitions
//! - [`render`]: Venn diagram layout and rasterization
//! - [`report`]: Report document model and PDF writer
//! - [`config`]: Explicit run configuration
//! - [`pipeline`]: End-to-end report generation
//! - [`cli`]: Command-line interface implementation

pub mod analysis;
pub mod cli;
pub mod config;
pub mod core;
pub mod parsing;
pub mod pipeline;
pub mod render;
pub mod report;
pub mod utils;

// Re-export commonly used types for convenience
pub use analysis::overlap::SetOverlap;
pub use analysis::stats::StatisticsRow;
pub use config::{InputFile, ReportConfig};
pub use core::identifiers::IdentifierSet;
pub use core::record::{AlignmentRecord, BlastHits};
