//! Intermediate model shared by every reader and writer
//!
//! Structured sources (YAML) decode into a [`Node`] tree; line-oriented and
//! spreadsheet sources decode into a [`Document`] of sheets, rows and cells.

pub mod node;
pub mod table;

pub use node::{Node, Number};
pub use table::{Cell, CellValue, Document, Row, Sheet};
