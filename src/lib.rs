//! Format conversion core
//!
//! Converts text, JSON, YAML, CSV and XLSX sources through one normalized
//! in-memory model. Callers supply a file path, a target [`OutputFormat`] and a
//! [`ConversionConfig`], and receive the rendered string or a [`ConversionError`].

pub mod cli;
pub mod conversion;
pub mod error;
pub mod formatter;
pub mod model;
pub mod parser;
pub mod reader;

// Re-export commonly used types
pub use conversion::{convert, ConversionConfig, ConversionEngine, OutputFormat};
pub use error::{ConversionError, ConversionErrorKind, ConversionResult, Stage};
pub use model::{Cell, Document, Node, Row, Sheet};
