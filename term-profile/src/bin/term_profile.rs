//! Command-line entry point: profile one column of a CSV file.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use term_profile::analyzers::{ColumnProfile, ColumnProfiler};
use term_profile::error::{ErrorContext, ProfileError, Result};
use term_profile::formatters::{
    FormatterConfig, HumanFormatter, JsonFormatter, MarkdownFormatter, ProfileFormatter,
};
use term_profile::logging::setup::{init_logging, LoggingConfig};
use term_profile::sources::{CsvOptions, CsvSource};
use tracing::{error, Level};

#[derive(Parser, Debug)]
#[command(name = "term-profile", version)]
#[command(about = "Profile a single column of a CSV file")]
struct Cli {
    /// CSV file to read
    #[arg(short, long, env = "TERM_PROFILE_FILE")]
    file: PathBuf,
    /// Column to profile (case-sensitive)
    #[arg(short, long, env = "TERM_PROFILE_COLUMN")]
    column: String,
    /// Histogram bin width
    #[arg(short, long, default_value_t = 10.0, env = "TERM_PROFILE_RANGE_SIZE")]
    range_size: f64,
    /// Largest number of histogram bins before giving up
    #[arg(long, default_value_t = 10_000)]
    max_bins: usize,
    /// Number of sample unique values to show
    #[arg(long, default_value_t = 10)]
    samples: usize,
    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
    format: OutputFormat,
    /// Hide histogram bins with a zero count
    #[arg(long)]
    compact: bool,
    /// Disable colored output
    #[arg(long)]
    no_color: bool,
    /// Field delimiter
    #[arg(long, default_value_t = ',')]
    delimiter: char,
    /// Treat the first row as data
    #[arg(long)]
    no_header: bool,
    /// Regex of field values to read as missing (replaces the default NA set)
    #[arg(long, value_name = "REGEX", conflicts_with = "no_default_na")]
    null_regex: Option<String>,
    /// Read only empty fields as missing
    #[arg(long)]
    no_default_na: bool,
    /// Log level for the profiler (RUST_LOG overrides)
    #[arg(long, default_value_t = Level::WARN)]
    log_level: Level,
    /// Emit logs as JSON
    #[arg(long)]
    json_logs: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Human,
    Json,
    Markdown,
}

impl Cli {
    fn csv_source(&self) -> Result<CsvSource> {
        if !self.delimiter.is_ascii() {
            return Err(ProfileError::configuration(format!(
                "delimiter must be a single ASCII character, got '{}'",
                self.delimiter
            )));
        }
        let mut options = CsvOptions {
            has_header: !self.no_header,
            delimiter: self.delimiter as u8,
            ..Default::default()
        };
        if self.no_default_na {
            options.null_regex = None;
        } else if let Some(regex) = &self.null_regex {
            options.null_regex = Some(regex.clone());
        }
        CsvSource::with_options(self.file.to_string_lossy(), options)
    }

    fn formatter_config(&self) -> FormatterConfig {
        FormatterConfig::default()
            .with_colors(!self.no_color && self.format == OutputFormat::Human)
            .with_compact_bins(self.compact)
            .with_samples(self.samples > 0)
    }

    fn render(&self, profile: &ColumnProfile) -> Result<String> {
        let config = self.formatter_config();
        let rendered = match self.format {
            OutputFormat::Human => HumanFormatter::with_config(config).format(profile),
            OutputFormat::Json => JsonFormatter::with_config(config).format(profile),
            OutputFormat::Markdown => MarkdownFormatter::with_config(config).format(profile),
        };
        rendered.context("failed to render report")
    }
}

async fn run(cli: &Cli) -> Result<String> {
    let profiler = ColumnProfiler::builder()
        .range_size(cli.range_size)
        .max_bins(cli.max_bins)
        .sample_size(cli.samples)
        .build()?;

    let source = cli.csv_source()?;
    let profile = profiler.profile_source(&source, &cli.column).await?;
    cli.render(&profile)
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let logging = LoggingConfig::default()
        .with_profile_level(cli.log_level)
        .with_json_format(cli.json_logs)
        .with_ansi(!cli.no_color);
    if let Err(e) = init_logging(logging) {
        eprintln!("warning: failed to initialize logging: {e}");
    }

    match run(&cli).await {
        Ok(output) => {
            print!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "Profiling failed");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
