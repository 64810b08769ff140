//! Conversion orchestrator: read, parse and serialize for one output format

use crate::conversion::config::{ConversionConfig, OutputFormat};
use crate::error::{ConversionResult, Stage};
use crate::formatter::{write_csv, write_json, write_report, write_text};
use crate::model::Node;
use crate::parser::{parse_delimited, parse_lines, parse_spreadsheet, parse_yaml};
use crate::reader::{read_raw, read_workbook};
use std::path::Path;
use tracing::{debug, info};

/// States of a single conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    Idle,
    Reading,
    Parsing,
    Serializing,
    Done,
    Failed(Stage),
}

impl PipelineState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, PipelineState::Done | PipelineState::Failed(_))
    }
}

/// States a conversion passed through, starting at `Idle`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineTrace {
    pub states: Vec<PipelineState>,
}

impl PipelineTrace {
    pub fn final_state(&self) -> PipelineState {
        self.states.last().copied().unwrap_or(PipelineState::Idle)
    }
}

/// Per-call state machine; advances only while the current stage succeeds
struct Pipeline {
    trace: PipelineTrace,
}

impl Pipeline {
    fn new() -> Self {
        Self {
            trace: PipelineTrace {
                states: vec![PipelineState::Idle],
            },
        }
    }

    fn transition(&mut self, next: PipelineState) {
        debug!(from = ?self.trace.final_state(), to = ?next, "pipeline transition");
        self.trace.states.push(next);
    }

    fn stage<T>(
        &mut self,
        state: PipelineState,
        step: impl FnOnce() -> ConversionResult<T>,
    ) -> ConversionResult<T> {
        self.transition(state);
        step()
    }
}

/// Main conversion engine
///
/// Holds only its configuration; every file handle is opened and closed
/// within a single call, so one engine can serve many threads.
#[derive(Debug, Clone)]
pub struct ConversionEngine {
    config: ConversionConfig,
}

impl ConversionEngine {
    /// Create a new conversion engine
    pub fn new(config: ConversionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ConversionConfig {
        &self.config
    }

    /// Convert the file at `path` into `format`
    pub fn convert(&self, path: &Path, format: OutputFormat) -> ConversionResult<String> {
        self.run(path, format).0
    }

    /// Convert and also report the pipeline states visited
    pub fn run(
        &self,
        path: &Path,
        format: OutputFormat,
    ) -> (ConversionResult<String>, PipelineTrace) {
        let ignored = self.config.ignored_flags(format);
        if !ignored.is_empty() {
            debug!(%format, ?ignored, "configuration flags have no effect on this format");
        }

        let mut pipeline = Pipeline::new();
        let result = self.execute(&mut pipeline, path, format);

        match &result {
            Ok(output) => {
                pipeline.transition(PipelineState::Done);
                info!(
                    path = %path.display(),
                    %format,
                    bytes = output.len(),
                    "conversion finished"
                );
            }
            Err(e) => {
                pipeline.transition(PipelineState::Failed(e.stage));
                debug!(path = %path.display(), %format, error = %e, "conversion failed");
            }
        }

        (result, pipeline.trace)
    }

    fn execute(
        &self,
        pipeline: &mut Pipeline,
        path: &Path,
        format: OutputFormat,
    ) -> ConversionResult<String> {
        let config = &self.config;

        match format {
            OutputFormat::Json => {
                let content = pipeline.stage(PipelineState::Reading, || read_raw(path))?;
                let node =
                    pipeline.stage(PipelineState::Parsing, || Ok(self.wrap_text(content)))?;
                pipeline.stage(PipelineState::Serializing, || write_json(&node))
            }
            OutputFormat::Txt => {
                let content = pipeline.stage(PipelineState::Reading, || read_raw(path))?;
                let document =
                    pipeline.stage(PipelineState::Parsing, || Ok(parse_lines(&content)))?;
                pipeline.stage(PipelineState::Serializing, || {
                    Ok(write_text(&document, config))
                })
            }
            OutputFormat::Yaml => {
                let content = pipeline.stage(PipelineState::Reading, || read_raw(path))?;
                let node = pipeline.stage(PipelineState::Parsing, || {
                    let node = parse_yaml(&content)?;
                    Ok(if config.ignore_empty {
                        node.prune_empty()
                    } else {
                        node
                    })
                })?;
                pipeline.stage(PipelineState::Serializing, || write_json(&node))
            }
            OutputFormat::Csv => {
                let content = pipeline.stage(PipelineState::Reading, || read_raw(path))?;
                let document =
                    pipeline.stage(PipelineState::Parsing, || parse_delimited(&content))?;
                pipeline.stage(PipelineState::Serializing, || write_csv(&document, config))
            }
            OutputFormat::Xlsx => {
                let workbook = pipeline.stage(PipelineState::Reading, || read_workbook(path))?;
                let document =
                    pipeline.stage(PipelineState::Parsing, || Ok(parse_spreadsheet(workbook)))?;
                pipeline.stage(PipelineState::Serializing, || {
                    Ok(write_report(&document, config))
                })
            }
        }
    }

    /// Unstructured text becomes one JSON string; `ignore_empty` drops blank lines
    fn wrap_text(&self, content: String) -> Node {
        if !self.config.ignore_empty {
            return Node::String(content);
        }

        let kept: Vec<&str> = content
            .lines()
            .filter(|line| !line.trim().is_empty())
            .collect();
        Node::String(kept.join("\n"))
    }
}

/// Convert the file at `path` into `format` using `config`
pub fn convert(
    path: &Path,
    format: OutputFormat,
    config: &ConversionConfig,
) -> ConversionResult<String> {
    ConversionEngine::new(*config).convert(path, format)
}
