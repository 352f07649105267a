use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;

use rnafeat::annotation::header::write_canonical_fasta;
use rnafeat::annotation::load_merged_table;
use rnafeat::cli;
use rnafeat::transcript::rank::group_by_gene;
use rnafeat::transcript::select::select_canonical;

#[derive(Parser)]
#[command(
    name = "select_transcripts",
    about = "Select one canonical protein-coding transcript per gene"
)]
struct Cli {
    /// Transcript feature table (TSV, optionally gzipped)
    #[arg(short = 'f', long = "features")]
    features: PathBuf,

    /// Transcript classification table (TSV, optionally gzipped)
    #[arg(short = 'c', long = "classification")]
    classification: PathBuf,

    /// Output annotated FASTA
    #[arg(short = 'o', long = "out")]
    out: PathBuf,
}

fn main() -> Result<()> {
    let start = Instant::now();
    let cli_args = Cli::parse();

    cli::banner("Select Transcripts");

    // ── Annotation ───────────────────────────────────────
    cli::section("Annotation");

    cli::kv("Features", &cli_args.features.display().to_string());
    cli::kv("Classification", &cli_args.classification.display().to_string());

    let table = load_merged_table(&cli_args.features, &cli_args.classification)
        .context("failed to load annotation tables")?;
    cli::kv("Merged transcripts", &table.len().to_string());

    eprintln!();

    // ── Selection ────────────────────────────────────────
    cli::section("Selection");

    let ranked = group_by_gene(&table);
    let (canonical, stats) = select_canonical(&ranked, &table);

    cli::kv("Genes", &stats.num_genes.to_string());
    cli::kv("Selected", &stats.num_selected.to_string());
    if stats.num_dropped_genes > 0 {
        cli::warning(&format!(
            "{} genes without a complete candidate",
            stats.num_dropped_genes
        ));
    }
    cli::kv("Skipped (incomplete)", &stats.num_skipped_incomplete.to_string());

    eprintln!();

    // ── Output ───────────────────────────────────────────
    cli::section("Output");

    let out_file = File::create(&cli_args.out)
        .with_context(|| format!("failed to create output: {}", cli_args.out.display()))?;
    let mut writer = BufWriter::new(out_file);
    write_canonical_fasta(&mut writer, &canonical)?;
    writer.flush()?;

    cli::success(&format!(
        "wrote {} transcripts to {}",
        canonical.len(),
        cli_args.out.display()
    ));

    cli::print_summary(start);
    Ok(())
}
