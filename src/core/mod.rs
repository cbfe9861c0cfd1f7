//! Core compilation modules
//!
//! This module contains the tree-to-LaTeX engine:
//! - `context`: output buffering and comment mode
//! - `escape`: the ordered text-escaping pipeline
//! - `visitor`: tree walker, dispatch and per-export state
//! - `table`: the table layout engine

pub mod context;
pub mod escape;
pub mod table;
pub mod visitor;

// Re-export main types and functions
pub use context::EmitContext;
pub use escape::escape_text;
pub use visitor::{CompileResult, Compiler, FigureInfo, FloatItem, FloatKind, TableInfo};
