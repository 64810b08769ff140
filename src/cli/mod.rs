//! Command-line interface module

use anyhow::{anyhow, Context, Result};
use clap::{Parser, ValueEnum};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use walkdir::WalkDir;

use crate::conversion::{ConversionConfig, ConversionEngine, OutputFormat};
use crate::error::ConversionError;

pub mod path_mapping;

/// Main CLI arguments
#[derive(Parser, Debug, Clone)]
#[command(name = "formatflex")]
#[command(about = "Convert text, JSON, YAML, CSV and XLSX files")]
#[command(version)]
pub struct Args {
    /// Input file or directory
    #[arg()]
    pub input: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = FormatArg::Json)]
    pub format: FormatArg,

    /// Output file, or output directory for directory input (default: stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Strip leading/trailing whitespace from each field
    #[arg(long)]
    pub trim: bool,

    /// Infer numbers and booleans (reserved, currently no effect)
    #[arg(long)]
    pub parse_types: bool,

    /// Drop empty fields and rows
    #[arg(long)]
    pub ignore_empty: bool,

    /// Treat the first row as data; joins TXT/CSV rows with commas
    #[arg(long)]
    pub no_header: bool,

    /// Recursively process directories
    #[arg(long)]
    pub recursive: bool,

    /// Continue converting other files when one file fails
    #[arg(long)]
    pub continue_on_error: bool,

    /// Enable verbose logging
    #[arg(long)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(long)]
    pub quiet: bool,
}

/// Output formats accepted on the command line
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatArg {
    Json,
    #[value(alias = "text")]
    Txt,
    #[value(alias = "yml")]
    Yaml,
    Csv,
    Xlsx,
}

impl From<FormatArg> for OutputFormat {
    fn from(format: FormatArg) -> Self {
        match format {
            FormatArg::Json => OutputFormat::Json,
            FormatArg::Txt => OutputFormat::Txt,
            FormatArg::Yaml => OutputFormat::Yaml,
            FormatArg::Csv => OutputFormat::Csv,
            FormatArg::Xlsx => OutputFormat::Xlsx,
        }
    }
}

/// CLI configuration
#[derive(Debug, Clone)]
pub struct CliConfig {
    pub args: Args,
    pub format: OutputFormat,
    pub conversion_config: ConversionConfig,
}

impl CliConfig {
    /// Create CLI configuration from arguments
    pub fn from_args(args: Args) -> Self {
        let conversion_config = ConversionConfig::new()
            .with_trim(args.trim)
            .with_parse_types(args.parse_types)
            .with_ignore_empty(args.ignore_empty)
            .with_no_header(args.no_header);

        Self {
            format: args.format.into(),
            conversion_config,
            args,
        }
    }

    pub fn is_quiet(&self) -> bool {
        self.args.quiet
    }

    pub fn engine(&self) -> ConversionEngine {
        ConversionEngine::new(self.conversion_config)
    }
}

/// Install the stderr log subscriber for the binary
pub fn init_logging(verbose: bool, quiet: bool) {
    let filter = if verbose {
        EnvFilter::new("formatflex=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(if quiet {
                "formatflex=error"
            } else {
                "formatflex=warn"
            })
        })
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Run the conversion described by `config`
pub fn run(config: &CliConfig) -> Result<()> {
    let input = &config.args.input;
    if input.is_dir() {
        convert_directory(input, config)
    } else {
        convert_file(input, config)
    }
}

fn convert_file(input: &Path, config: &CliConfig) -> Result<()> {
    let content = config
        .engine()
        .convert(input, config.format)
        .map_err(|e| anyhow!(handle_error(&e)))?;

    match &config.args.output {
        Some(output_path) => {
            if let Some(parent) = output_path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(output_path, &content)
                .with_context(|| format!("Failed to write {}", output_path.display()))?;
            CliUtils::show_success(
                &format!("Converted to: {}", output_path.display()),
                config.is_quiet(),
            );
        }
        None => println!("{}", content),
    }

    Ok(())
}

fn convert_directory(input_dir: &Path, config: &CliConfig) -> Result<()> {
    let output_dir = config
        .args
        .output
        .as_ref()
        .ok_or_else(|| anyhow!("Output directory required for directory conversion"))?;
    std::fs::create_dir_all(output_dir)?;

    let files = find_input_files(input_dir, config.args.recursive)
        .with_context(|| format!("Failed listing files in {}", input_dir.display()))?;

    if files.is_empty() {
        CliUtils::show_success(
            &format!("No files found in {}", input_dir.display()),
            config.is_quiet(),
        );
        return Ok(());
    }

    let engine = config.engine();
    let progress = if config.is_quiet() {
        indicatif::ProgressBar::hidden()
    } else {
        CliUtils::create_progress_bar(files.len() as u64)
    };
    let mut failures: Vec<(PathBuf, String)> = Vec::new();
    // Output path -> input that produced it
    let mut written: HashMap<PathBuf, PathBuf> = HashMap::new();

    for file in &files {
        let relative = file.strip_prefix(input_dir).unwrap_or(file);
        progress.set_message(relative.display().to_string());

        let output_file = path_mapping::map_input_to_output(
            input_dir,
            file,
            output_dir,
            config.format.output_extension(),
        );

        let outcome = match written.get(&output_file) {
            Some(owner) => Err(format!(
                "output {} already written from {}",
                output_file.display(),
                owner.display()
            )),
            None => engine
                .convert(file, config.format)
                .map_err(|e| e.user_message()),
        };

        match outcome {
            Ok(content) => {
                if let Some(parent) = output_file.parent() {
                    std::fs::create_dir_all(parent)?;
                }
                std::fs::write(&output_file, content)
                    .with_context(|| format!("Failed to write {}", output_file.display()))?;
                written.insert(output_file, relative.to_path_buf());
            }
            Err(message) => {
                if !config.args.continue_on_error {
                    progress.abandon();
                    return Err(anyhow!(
                        "Aborting due to conversion error in {}: {}",
                        relative.display(),
                        message
                    ));
                }
                failures.push((relative.to_path_buf(), message));
            }
        }
        progress.inc(1);
    }
    progress.finish_and_clear();

    for (path, message) in &failures {
        CliUtils::show_error(&format!("{}: {}", path.display(), message));
    }

    if failures.is_empty() {
        CliUtils::show_success(
            &format!("Converted {} files into {}", files.len(), output_dir.display()),
            config.is_quiet(),
        );
        Ok(())
    } else {
        Err(anyhow!(
            "{} of {} files failed to convert",
            failures.len(),
            files.len()
        ))
    }
}

/// Regular files under `dir`, sorted; descends into subdirectories when `recursive`
pub fn find_input_files(dir: &Path, recursive: bool) -> Result<Vec<PathBuf>, walkdir::Error> {
    let walker = WalkDir::new(dir).sort_by_file_name();
    let walker = if recursive {
        walker
    } else {
        walker.max_depth(1)
    };

    let mut files = Vec::new();
    for entry in walker {
        let entry = entry?;
        if entry.file_type().is_file() {
            files.push(entry.into_path());
        }
    }

    Ok(files)
}

/// CLI utilities and helpers
pub struct CliUtils;

impl CliUtils {
    /// Create a progress bar for file processing
    pub fn create_progress_bar(total: u64) -> indicatif::ProgressBar {
        let pb = indicatif::ProgressBar::new(total);
        if let Ok(style) = indicatif::ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} {msg}")
        {
            pb.set_style(style.progress_chars("#>-"));
        }
        pb
    }

    /// Show a success message (if not in quiet mode)
    pub fn show_success(message: &str, quiet: bool) {
        if !quiet {
            println!("✓ {}", message);
        }
    }

    /// Show an error message
    pub fn show_error(message: &str) {
        eprintln!("✗ {}", message);
    }
}

/// Print a conversion error with a hint, returning the user-facing message
pub fn handle_error(error: &ConversionError) -> String {
    let message = error.user_message();
    tracing::debug!(stage = %error.stage, kind = ?error.kind, "conversion error");

    match error.kind {
        crate::error::ConversionErrorKind::CorruptArchive => {
            eprintln!("Tip: --format xlsx expects a .xlsx workbook");
        }
        crate::error::ConversionErrorKind::UnsupportedShape => {
            eprintln!("Tip: --format yaml expects a top-level mapping or sequence");
        }
        _ => {}
    }

    message
}
