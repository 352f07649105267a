use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result, bail};
use clap::Parser;

use rnafeat::annotation::expressed::ExpressedTranscripts;
use rnafeat::annotation::header::read_canonical_fasta;
use rnafeat::cli;
use rnafeat::config::FeatureConfig;
use rnafeat::external::{default_tools, run_tools};
use rnafeat::features::{build_region_batches, extract_all};
use rnafeat::input::open_input;
use rnafeat::output::write_feature_file;

#[derive(Parser)]
#[command(
    name = "extract_features",
    about = "Compute translational-control features of canonical transcripts"
)]
struct Cli {
    /// Annotated FASTA written by select_transcripts (optionally gzipped)
    #[arg(short = 'i', long = "input")]
    input: PathBuf,

    /// Path to the JSON configuration file
    #[arg(short = 'c', long = "config")]
    config: PathBuf,

    /// Output feature table (TSV)
    #[arg(short = 'o', long = "out")]
    out: PathBuf,

    /// Only process transcripts listed in the first column of this file
    #[arg(short = 'e', long = "expressed")]
    expressed: Option<PathBuf>,

    /// Keep the 5'UTR and 3'UTR FASTA batches at these paths
    #[arg(long = "utr-files", value_delimiter = ',')]
    utr_files: Option<Vec<PathBuf>>,

    /// Worker threads (defaults to all cores)
    #[arg(short = 't', long = "threads")]
    threads: Option<usize>,
}

fn main() -> Result<()> {
    let start = Instant::now();
    let cli_args = Cli::parse();

    cli::banner("Extract Features");

    // ── Configuration ────────────────────────────────────
    cli::section("Configuration");

    let config = FeatureConfig::from_file(&cli_args.config)?;

    cli::kv("Config", &cli_args.config.display().to_string());
    cli::kv("3'UTR max length", &config.utr3_max_length.to_string());
    cli::kv(
        "Kozak radius",
        &format!("{} (+{})", config.kozak_radius, config.kozak_context_radius),
    );
    cli::kv("Local score clip", &config.local_score_clip.to_string());
    if config.folding_energy {
        cli::kv("RNAfold", &config.rnafold.display().to_string());
    }

    if let Some(threads) = cli_args.threads {
        if threads == 0 {
            bail!("invalid thread count: must be greater than 0");
        }
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("failed to configure thread pool")?;
    }
    cli::kv("Threads", &rayon::current_num_threads().to_string());

    eprintln!();

    // ── Transcripts ──────────────────────────────────────
    cli::section("Transcripts");

    let mut transcripts = read_canonical_fasta(open_input(&cli_args.input)?)
        .with_context(|| format!("failed to read transcripts: {}", cli_args.input.display()))?;
    cli::kv("Canonical", &transcripts.len().to_string());

    if let Some(ref path) = cli_args.expressed {
        let expressed = ExpressedTranscripts::from_reader(open_input(path)?)
            .with_context(|| format!("failed to read expressed transcripts: {}", path.display()))?;
        transcripts.retain(|t| expressed.contains(&t.transcript_id));
        cli::kv("Expressed", &transcripts.len().to_string());
    }

    eprintln!();

    // ── Features ─────────────────────────────────────────
    cli::section("Features");

    let (features, stats) = extract_all(&transcripts, &config);

    cli::kv("Extracted", &stats.num_extracted.to_string());
    cli::kv("Rejected (3'UTR)", &stats.num_rejected_utr3.to_string());
    if stats.num_malformed_coding > 0 {
        cli::warning(&format!(
            "{} coding lengths not a multiple of 3",
            stats.num_malformed_coding
        ));
    }

    let batches = build_region_batches(&features);
    if let Some(ref paths) = cli_args.utr_files {
        let [utr5_path, utr3_path] = paths.as_slice() else {
            bail!("--utr-files expects two comma-separated paths");
        };
        batches.five_prime_utr.persist(utr5_path)?;
        batches.three_prime_utr.persist(utr3_path)?;
        cli::kv("5'UTR FASTA", &utr5_path.display().to_string());
        cli::kv("3'UTR FASTA", &utr3_path.display().to_string());
    }

    let tools = default_tools(&config);
    let columns = run_tools(&tools, &batches).context("feature tool failed")?;
    for c in &columns {
        cli::kv(c.tool(), &c.names().join(", "));
    }

    eprintln!();

    // ── Output ───────────────────────────────────────────
    cli::section("Output");

    let num_rows = write_feature_file(&cli_args.out, &features, &columns)
        .with_context(|| format!("failed to write output: {}", cli_args.out.display()))?;

    cli::success(&format!(
        "wrote {num_rows} rows to {}",
        cli_args.out.display()
    ));

    cli::print_summary(start);
    Ok(())
}
