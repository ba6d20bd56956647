//! Console transport helpers for the local driver binary.

mod line_parser;

pub use line_parser::LineParser;
