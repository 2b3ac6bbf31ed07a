//! vcf-annotator CLI entry point
//!
//! Annotates a VCF file with read metrics and ExAC population data.

use clap::{Parser, ValueEnum};
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use vcf_annotator::annotation::{ExacClient, DEFAULT_EXAC_API};
use vcf_annotator::{annotate_vcf_echo, CompatMode, DEFAULT_OUTPUT};

/// INFO lookup mode (CLI enum)
#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum CompatModeArg {
    /// Exact INFO keys (TYPE, DP, RO, AO, AF)
    #[default]
    #[value(name = "improved")]
    Improved,
    /// Substring matching, reference reads from the second "RO=" token
    #[value(name = "strict")]
    Strict,
}

impl From<CompatModeArg> for CompatMode {
    fn from(arg: CompatModeArg) -> Self {
        match arg {
            CompatModeArg::Improved => CompatMode::Improved,
            CompatModeArg::Strict => CompatMode::Strict,
        }
    }
}

#[derive(Parser)]
#[command(name = "vcf-annotator")]
#[command(about = "Annotate VCF variants with read metrics and ExAC population data")]
#[command(version)]
struct Cli {
    /// Input VCF file (plain, gzip/bgzip or bzip2)
    input: PathBuf,

    /// Output CSV file
    #[arg(short = 'o', long, default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// ExAC REST API root
    #[arg(long = "api-url", default_value = DEFAULT_EXAC_API)]
    api_url: String,

    /// Timeout in seconds for each bulk request (no timeout if unset)
    #[arg(long)]
    timeout: Option<u64>,

    /// Echo each report row to stdout
    #[arg(long)]
    print: bool,

    /// Ignore HTTP(S)_PROXY settings from the environment
    #[arg(long = "no-proxy")]
    no_proxy: bool,

    /// INFO lookup mode: 'improved' for exact keys, 'strict' for legacy substring matching
    #[arg(long = "compat-mode", default_value = "improved")]
    compat_mode: CompatModeArg,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let start = Instant::now();

    if let CompatModeArg::Strict = cli.compat_mode {
        eprintln!("Compatibility mode: strict (substring INFO matching)");
    }

    let mut builder = ExacClient::builder().with_api_url(cli.api_url);
    if let Some(secs) = cli.timeout {
        builder = builder.with_timeout(Duration::from_secs(secs));
    }
    if cli.no_proxy {
        builder = builder.without_proxy();
    }
    let client = builder
        .finish()
        .map_err(|e| anyhow::anyhow!("Failed to create HTTP client: {}", e))?;

    eprintln!("Annotating VCF file: {:?} -> {:?}", cli.input, cli.output);
    let stdout = io::stdout();
    let mut stdout = stdout.lock();
    let echo = if cli.print {
        Some(&mut stdout as &mut dyn Write)
    } else {
        None
    };
    let stats = annotate_vcf_echo(&cli.input, &cli.output, &client, cli.compat_mode.into(), echo)?;

    eprintln!("\n=== Annotation Statistics ===");
    eprintln!("Sites:           {}", stats.build.sites);
    eprintln!("Records:         {}", stats.build.records);
    eprintln!("Duplicate keys:  {}", stats.build.collisions);
    eprintln!("Zero depth:      {}", stats.build.zero_depth);
    eprintln!("ExAC frequency:  {}", stats.merge.with_frequency);
    eprintln!("  - Missing:     {}", stats.merge.without_frequency);
    eprintln!("Consequence:     {}", stats.merge.known_consequence);
    eprintln!("  - Unknown:     {}", stats.merge.unknown_consequence);
    eprintln!("  - Missing:     {}", stats.merge.missing_consequence);
    eprintln!("Time elapsed:    {:.2}s", start.elapsed().as_secs_f64());

    Ok(())
}
