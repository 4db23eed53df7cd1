use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use certgen::{CertificateConfig, CertificateGenerator, CertificateRecord};
use clap::Parser;
use tracing_subscriber::EnvFilter;

/// certgen - render course certificates to PNG
#[derive(Parser, Debug)]
#[command(name = "certgen")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Student name (required unless --record or --batch is used)
    #[arg(long)]
    student: Option<String>,

    /// Course name (required unless --record or --batch is used)
    #[arg(long)]
    course: Option<String>,

    /// Instructor name; omit to leave out the signature block
    #[arg(long, default_value = "")]
    instructor: String,

    /// Completion date (YYYY-MM-DD); defaults to today
    #[arg(long)]
    date: Option<String>,

    /// Certificate type: completion, achievement, excellence, participation
    #[arg(long = "type", default_value = "completion")]
    kind: String,

    /// Read the record from a JSON file instead of flags
    #[arg(long)]
    record: Option<PathBuf>,

    /// JSON configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output directory (overrides config)
    #[arg(short, long)]
    out_dir: Option<PathBuf>,

    /// Output scale (overrides config)
    #[arg(long)]
    scale: Option<f32>,

    /// Fixed serial number for reproducible output (overrides config)
    #[arg(long)]
    serial: Option<u32>,

    /// Artificial delay before rendering, in milliseconds (overrides config)
    #[arg(long)]
    delay_ms: Option<u64>,

    /// Print a PNG data URL to stdout instead of writing a file
    #[arg(long)]
    data_url: bool,

    /// Read one JSON record per stdin line and write one JSON result per line
    #[arg(long)]
    batch: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn load_config(cli: &Cli) -> Result<CertificateConfig> {
    let mut config = match &cli.config {
        Some(path) => CertificateConfig::from_json_file(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => CertificateConfig::default(),
    };
    if let Some(dir) = &cli.out_dir {
        config.output_dir = dir.clone();
    }
    if let Some(scale) = cli.scale {
        config.scale = scale;
    }
    if let Some(serial) = cli.serial {
        config.serial = Some(serial);
    }
    if let Some(delay) = cli.delay_ms {
        config.generation_delay_ms = delay;
    }
    Ok(config)
}

fn record_from_cli(cli: &Cli) -> Result<CertificateRecord> {
    if let Some(path) = &cli.record {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read record {}", path.display()))?;
        return CertificateRecord::from_json(&raw).context("invalid record JSON");
    }
    let mut record = CertificateRecord::new(
        cli.student.clone().unwrap_or_default(),
        cli.course.clone().unwrap_or_default(),
    )
    .with_instructor(cli.instructor.clone())
    .with_type(cli.kind.as_str());
    if let Some(date) = &cli.date {
        record = record.with_date(date.clone());
    }
    Ok(record)
}

fn batch_main(generator: &CertificateGenerator) -> io::Result<()> {
    use serde::Serialize;

    #[derive(Serialize)]
    struct Res {
        line: usize,
        path: Option<String>,
        error: Option<String>,
    }

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    for (idx, line) in stdin.lock().lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let outcome = CertificateRecord::from_json(&line).and_then(|r| generator.generate_to_dir(&r));
        let res = match outcome {
            Ok(path) => Res { line: idx + 1, path: Some(path.display().to_string()), error: None },
            Err(e) => Res { line: idx + 1, path: None, error: Some(e.to_string()) },
        };
        let js = serde_json::to_string(&res)
            .unwrap_or_else(|_| format!("{{\"line\":{},\"path\":null,\"error\":\"serialization failed\"}}", idx + 1));
        writeln!(out, "{}", js)?;
        out.flush()?;
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let config = load_config(&cli)?;
    let generator = CertificateGenerator::new(config).context("invalid configuration")?;

    if cli.batch {
        return batch_main(&generator).context("batch processing failed");
    }

    let record = record_from_cli(&cli)?;
    if cli.data_url {
        let image = generator.generate(&record).context("failed to generate certificate")?;
        println!("{}", image.to_data_url()?);
        return Ok(());
    }

    let path = generator
        .generate_to_dir(&record)
        .context("failed to generate certificate")?;
    println!("{}", path.display());
    Ok(())
}
