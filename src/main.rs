mod config;
mod fetcher;
mod listing;
mod output;
mod parser;
mod pipeline;
mod record;

use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;

use crate::config::Settings;
use crate::fetcher::DetailSource;
use crate::output::DumpWriter;

#[derive(Parser)]
#[command(
    name = "projis_dump",
    about = "Dump MassDOT PROJIS project records from a saved listing page to CSV"
)]
struct Cli {
    /// Saved listing page
    #[arg(short, long, default_value = config::DEFAULT_INPUT)]
    input: PathBuf,
    /// Output file (default: ./projis_dump_<month>_<day>_<year>.csv)
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Read detail pages from <DIR>/<PROJ_NUM>.html instead of the portal
    #[arg(short, long, value_name = "DIR")]
    detail_dir: Option<PathBuf>,
    /// Base URL for relative detail links (overrides PROJIS_BASE_URL)
    #[arg(long)]
    base_url: Option<String>,
    /// Blank only the failing field instead of the whole detail record
    #[arg(long)]
    isolate_fields: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();

    let mut settings = Settings::load()?;
    if let Some(base_url) = cli.base_url {
        settings.base_url = base_url;
    }
    if cli.isolate_fields {
        settings.isolate_fields = true;
    }

    let bytes = std::fs::read(&cli.input)
        .with_context(|| format!("Failed to read listing page {}", cli.input.display()))?;
    let listing_html = String::from_utf8_lossy(&bytes);

    let source = match cli.detail_dir {
        Some(dir) => DetailSource::directory(dir),
        None => DetailSource::http(&settings)?,
    };

    let output = cli
        .output
        .unwrap_or_else(|| config::default_output(chrono::Local::now().date_naive()));
    let mut writer = DumpWriter::create(&output)?;

    let summary = pipeline::run(&listing_html, &source, &mut writer, settings.policy()).await?;
    let rows = writer.rows();
    writer.finish()?;
    println!("Wrote {} rows to {}", rows, output.display());
    summary.print();

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("\nDone in {}", format_duration(elapsed));
    }

    Ok(())
}

fn format_duration(d: std::time::Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{:.1}s", d.as_secs_f64())
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m {}s", secs / 3600, (secs % 3600) / 60, secs % 60)
    }
}

// ── Tests ──
