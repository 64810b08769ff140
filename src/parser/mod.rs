//! Format parsers: raw text and archive contents into the intermediate model

pub mod delimited;
pub mod lines;
pub mod spreadsheet;
pub mod yaml;

pub use delimited::parse_delimited;
pub use lines::parse_lines;
pub use spreadsheet::parse_spreadsheet;
pub use yaml::parse_yaml;
