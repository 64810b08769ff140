//! Conversion orchestration and configuration

pub mod config;
pub mod engine;

pub use config::{ConfigFlag, ConversionConfig, OutputFormat};
pub use engine::{convert, ConversionEngine, PipelineState, PipelineTrace};

pub use crate::error::ConversionResult;
