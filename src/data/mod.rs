//! Data layer - Static mappings and constants
//!
//! This module contains all static data used for LaTeX output generation:
//! - Greek letter and math symbol mappings
//! - Heading command and summary keyword tables
//! - Required package list and built-in document templates

pub mod constants;
pub mod symbols;

// Re-export commonly used items
pub use constants::{
    DEFAULT_POSTAMBLE, DEFAULT_PREAMBLE, HEADING_COMMANDS, MATH_ENVIRONMENTS, REQUIRED_PACKAGES,
    SUMMARY_KEYWORDS,
};
pub use symbols::{FULLWIDTH_PUNCTUATION, GREEK_LETTERS, MATH_SYMBOLS};
