use tracing::debug;

use crate::analysis::stats::format_stat;
use crate::cli::Cli;
use crate::pipeline::{self, RunSummary};

pub fn run(cli: Cli) -> anyhow::Result<()> {
    let config = cli.to_config();
    debug!("Reference: {}", config.reference.path.display());
    debug!("Comparison A: {}", config.comparison_a.path.display());
    debug!("Comparison B: {}", config.comparison_b.path.display());

    let summary = pipeline::run(&config)?;

    if cli.verbose {
        print_summary(&summary);
    }
    Ok(())
}

fn print_summary(summary: &RunSummary) {
    eprintln!("Comparison Summary");
    eprintln!("{}", "=".repeat(60));

    for input in &summary.inputs {
        eprintln!("\n{}", input.label);
        eprintln!("  Alignments: {}", input.records);
        eprintln!("  Distinct subjects: {}", input.subjects);
        eprintln!(
            "  pident: {} ± {}",
            format_stat(input.stats.mean_pident),
            format_stat(input.stats.sd_pident)
        );
        eprintln!(
            "  evalue: {} ± {}",
            format_stat(input.stats.mean_evalue),
            format_stat(input.stats.sd_evalue)
        );
        eprintln!(
            "  bitscore: {} ± {}",
            format_stat(input.stats.mean_bitscore),
            format_stat(input.stats.sd_bitscore)
        );
    }

    let reference = &summary.inputs[0].label;
    eprintln!("\nSubject Overlap:");
    for (overlap, other) in [
        (&summary.overlap_a, &summary.inputs[1].label),
        (&summary.overlap_b, &summary.inputs[2].label),
    ] {
        eprintln!(
            "  {reference} vs {other}: {} only / {} shared / {} only",
            overlap.only_first, overlap.shared, overlap.only_second
        );
    }
}
