use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing::{error, info, warn};

use asme_dimensions::constants::DEFAULT_PAGES;
use asme_dimensions::pipeline::processing::DimensionSchema;
use asme_dimensions::{
    extract_dimensions, logging, metrics, source_for_path, write_csv, Config, PageRange,
};

#[derive(Parser)]
#[command(name = "asme_dimensions")]
#[command(about = "Extract ASME flange and pipe dimension tables from standard PDFs to CSV")]
#[command(version = "0.1.0")]
struct Cli {
    /// TOML configuration file (defaults to ./asme_dimensions.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory for the rolling JSON log file
    #[arg(long, global = true, default_value = "logs")]
    log_dir: PathBuf,

    /// Write Prometheus text metrics for the run to this file
    #[arg(long, global = true)]
    metrics_out: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct SourceArgs {
    /// Source PDF, or a tabula JSON export of it
    #[arg(long)]
    pdf: PathBuf,

    /// Output CSV path
    #[arg(long)]
    output: PathBuf,

    /// Pages to extract: "all" or e.g. "20-60,71"
    #[arg(long, default_value = DEFAULT_PAGES)]
    pages: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract ASME B16.5 flange dimensions
    Flanges {
        #[command(flatten)]
        source: SourceArgs,
        /// Pressure class applied to every row (e.g. 150)
        #[arg(long)]
        rating_class: Option<i64>,
        /// Flange type applied to every row (default WN)
        #[arg(long)]
        flange_type: Option<String>,
        /// Facing applied to every row (default RF)
        #[arg(long)]
        facing: Option<String>,
    },
    /// Extract ASME B36.10M pipe dimensions
    Pipes {
        #[command(flatten)]
        source: SourceArgs,
    },
}

fn run<S: DimensionSchema>(args: &SourceArgs, config: &Config, schema: &S) -> anyhow::Result<usize> {
    let kind = schema.kind();
    let pages = PageRange::parse(&args.pages)?;
    let source = source_for_path(&args.pdf, &config.tabula);

    let outcome = extract_dimensions(source.as_ref(), &args.pdf, &pages, schema)
        .with_context(|| format!("Failed to extract {} tables from {}", kind, args.pdf.display()))?;

    println!("\n📊 {} extraction results:", kind);
    println!("   Tables seen: {}", outcome.tables_seen);
    println!("   Tables accepted: {}", outcome.tables_accepted);
    println!("   Rows dropped (no NPS): {}", outcome.rows_dropped);
    println!("   Duplicates removed: {}", outcome.duplicates_removed);

    if outcome.is_empty() {
        println!("⚠️  No {} dimension rows extracted; nothing written", kind);
        return Ok(0);
    }

    let written = write_csv(&outcome.records, &args.output)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;
    metrics::rows::written(kind, written);
    println!("✅ Saved {} rows to {}", written, args.output.display());
    Ok(written)
}

fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    let _guard = logging::init_logging(&cli.log_dir).context("Failed to initialize logging")?;
    if cli.metrics_out.is_some() {
        metrics::init_metrics();
    }

    let config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;

    let result = match &cli.command {
        Commands::Flanges {
            source,
            rating_class,
            flange_type,
            facing,
        } => {
            let mut flange = config.flange.clone();
            if rating_class.is_some() {
                flange.rating_class = *rating_class;
            }
            if flange_type.is_some() {
                flange.flange_type = flange_type.clone();
            }
            if facing.is_some() {
                flange.facing = facing.clone();
            }
            run(source, &config, &flange.schema())
        }
        Commands::Pipes { source } => run(source, &config, &config.pipe.schema()),
    };

    if let Err(e) = &result {
        error!("Extraction failed: {:#}", e);
    }

    // A metrics failure must not mask the extraction outcome
    if let Some(path) = &cli.metrics_out {
        match metrics::write_metrics(path) {
            Ok(true) => info!(path = %path.display(), "Wrote metrics"),
            Ok(false) => {}
            Err(e) => warn!(path = %path.display(), "Failed to write metrics: {}", e),
        }
    }

    result.map(|_| ())
}
