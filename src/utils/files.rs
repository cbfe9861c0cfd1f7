//! File helpers for the CLI
//!
//! Thin wrappers over `std::fs` with stdin/stdout fallbacks, shared by the
//! `md2tex` binary.

use std::fs;
use std::io::{self, Read, Write};

use crate::utils::error::ExportResult;

/// Read the given file, or all of stdin when no path is provided.
pub fn read_input(path: Option<&str>) -> ExportResult<String> {
    match path {
        Some(path) => Ok(fs::read_to_string(path)?),
        None => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Ok(buffer)
        }
    }
}

/// Write content to the given file, or to stdout when no path is provided.
pub fn write_output(path: Option<&str>, content: &str) -> ExportResult<()> {
    match path {
        Some(path) => {
            let mut file = fs::File::create(path)?;
            writeln!(file, "{}", content)?;
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
