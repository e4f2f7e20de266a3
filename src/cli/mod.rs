//! Command-line interface for blastn-compare.
//!
//! This module implements the CLI using clap. The tool takes exactly six
//! positional arguments:
//!
//! 1. **file1**: Reference BLASTN tabular report (compared against both others)
//! 2. **file2**: First comparison report
//! 3. **file3**: Second comparison report
//! 4. **venn_output1**: Image path for the file1 vs. file2 Venn diagram
//! 5. **venn_output2**: Image path for the file1 vs. file3 Venn diagram
//! 6. **pdf_output**: Path of the final PDF report
//!
//! ## Usage
//!
//! ```text
//! blastn-compare same1.txt different.txt same2.txt venn1.png venn2.png summary.pdf
//!
//! # Show progress
//! blastn-compare -v same1.txt different.txt same2.txt venn1.png venn2.png summary.pdf
//! ```

use std::path::PathBuf;

use clap::Parser;

use crate::config::ReportConfig;

pub mod summarize;

#[derive(Parser)]
#[command(name = "blastn-compare")]
#[command(author = "Fulcrum Genomics")]
#[command(version)]
#[command(about = "Create a BLASTN Result Comparison Summary Report")]
#[command(
    long_about = "blastn-compare compares a reference BLASTN tabular report against two others.\n\nIt produces:\n- Venn diagrams of subject ids shared between the reference and each comparison report\n- Mean and standard deviation of percent identity, e-value and bit score for every report\n- A PDF summary combining both diagrams and all three statistics tables"
)]
pub struct Cli {
    /// Path to the reference (SAME-1) blastn report
    pub file1: PathBuf,

    /// Path to the first comparison (DIFFERENT) blastn report
    pub file2: PathBuf,

    /// Path to the second comparison (SAME-2) blastn report
    pub file3: PathBuf,

    /// Path to save the Venn diagram between file1 and file2 (.png, .jpg)
    pub venn_output1: PathBuf,

    /// Path to save the Venn diagram between file1 and file3 (.png, .jpg)
    pub venn_output2: PathBuf,

    /// Path to save the final PDF report
    pub pdf_output: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Map the positional arguments onto their roles.
    #[must_use]
    pub fn to_config(&self) -> ReportConfig {
        ReportConfig::new(
            &self.file1,
            &self.file2,
            &self.file3,
            &self.venn_output1,
            &self.venn_output2,
            &self.pdf_output,
        )
    }
}
