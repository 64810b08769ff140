//! Configuration options for format conversion

use std::fmt;
use std::str::FromStr;

/// Requested output format; selects the whole read/parse/write pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputFormat {
    /// Raw text wrapped as a single JSON string
    Json,
    /// Line-oriented plain text
    Txt,
    /// YAML source rendered as JSON
    Yaml,
    /// Comma-separated values
    Csv,
    /// Spreadsheet archive rendered as a text report
    Xlsx,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 5] = [
        OutputFormat::Json,
        OutputFormat::Txt,
        OutputFormat::Yaml,
        OutputFormat::Csv,
        OutputFormat::Xlsx,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Json => "JSON",
            OutputFormat::Txt => "TXT",
            OutputFormat::Yaml => "YAML",
            OutputFormat::Csv => "CSV",
            OutputFormat::Xlsx => "XLSX",
        }
    }

    /// File extension of the rendered output (YAML renders JSON, XLSX a text report)
    pub fn output_extension(&self) -> &'static str {
        match self {
            OutputFormat::Json | OutputFormat::Yaml => "json",
            OutputFormat::Txt | OutputFormat::Xlsx => "txt",
            OutputFormat::Csv => "csv",
        }
    }

    /// Configuration flags this format's pipeline reads
    pub fn honored_flags(&self) -> &'static [ConfigFlag] {
        match self {
            OutputFormat::Json | OutputFormat::Yaml => &[ConfigFlag::IgnoreEmpty],
            OutputFormat::Txt => &[ConfigFlag::IgnoreEmpty, ConfigFlag::NoHeader],
            OutputFormat::Csv => &[
                ConfigFlag::Trim,
                ConfigFlag::ParseTypes,
                ConfigFlag::IgnoreEmpty,
                ConfigFlag::NoHeader,
            ],
            OutputFormat::Xlsx => &[ConfigFlag::Trim, ConfigFlag::IgnoreEmpty],
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "txt" | "text" => Ok(OutputFormat::Txt),
            "yaml" | "yml" => Ok(OutputFormat::Yaml),
            "csv" => Ok(OutputFormat::Csv),
            "xlsx" => Ok(OutputFormat::Xlsx),
            other => Err(format!(
                "Invalid output format '{}'. Use 'json', 'txt', 'yaml', 'csv', or 'xlsx'",
                other
            )),
        }
    }
}

/// Named configuration switches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigFlag {
    Trim,
    ParseTypes,
    IgnoreEmpty,
    NoHeader,
}

/// Conversion configuration options
///
/// TXT and CSV read `no_header` as a row-separator switch: when set, rows are
/// joined with `,` onto one line rather than a header row being suppressed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConversionConfig {
    /// Strip leading/trailing whitespace per field
    pub trim: bool,
    /// Numeric/boolean coercion; accepted but currently a no-op
    pub parse_types: bool,
    /// Drop empty fields and rows
    pub ignore_empty: bool,
    /// Treat the first row as data; flattens TXT/CSV output onto one line
    pub no_header: bool,
}

impl ConversionConfig {
    /// Create a new configuration with every flag off
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_trim(mut self, enabled: bool) -> Self {
        self.trim = enabled;
        self
    }

    pub fn with_parse_types(mut self, enabled: bool) -> Self {
        self.parse_types = enabled;
        self
    }

    pub fn with_ignore_empty(mut self, enabled: bool) -> Self {
        self.ignore_empty = enabled;
        self
    }

    pub fn with_no_header(mut self, enabled: bool) -> Self {
        self.no_header = enabled;
        self
    }

    pub fn is_set(&self, flag: ConfigFlag) -> bool {
        match flag {
            ConfigFlag::Trim => self.trim,
            ConfigFlag::ParseTypes => self.parse_types,
            ConfigFlag::IgnoreEmpty => self.ignore_empty,
            ConfigFlag::NoHeader => self.no_header,
        }
    }

    /// Flags that are set but have no effect on `format`
    pub fn ignored_flags(&self, format: OutputFormat) -> Vec<ConfigFlag> {
        [
            ConfigFlag::Trim,
            ConfigFlag::ParseTypes,
            ConfigFlag::IgnoreEmpty,
            ConfigFlag::NoHeader,
        ]
        .into_iter()
        .filter(|flag| self.is_set(*flag) && !format.honored_flags().contains(flag))
        .collect()
    }
}
