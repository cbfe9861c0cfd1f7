//! # mdtex
//!
//! Markdown document tree to LaTeX exporter core written in Rust.
//!
//! ## Features
//!
//! - **Single-Pass Visitor**: closed node set, exhaustive dispatch, unknown
//!   constructs carried through as commented blocks
//! - **Adaptive Tables**: fixed, multi-page flowing, or two-column split
//!   layout chosen from the grid shape, with summary-row rules
//! - **Safe Text**: ordered escaping pipeline with Greek letter and math
//!   symbol substitution
//! - **Template Repair**: user preamble/postamble validated and repaired,
//!   `{{placeholder}}` substitution against document frontmatter
//! - **Advisory Diagnostics**: nothing in the core is fatal; anomalies are
//!   absorbed and reported through a message sink
//! - **WASM Support**: compiles to WebAssembly for embedding in editors
//!
//! ## Usage Examples
//!
//! ```rust
//! use mdtex::{tree_to_latex, DocumentNode, NodeKind, Settings};
//!
//! let tree = DocumentNode::parent(
//!     NodeKind::Root,
//!     vec![
//!         DocumentNode::parent(
//!             NodeKind::Heading { depth: 1 },
//!             vec![DocumentNode::text("Intro")],
//!         ),
//!         DocumentNode::parent(
//!             NodeKind::Paragraph,
//!             vec![DocumentNode::text("Value: 50%")],
//!         ),
//!     ],
//! );
//!
//! let settings = Settings::default();
//! let body = tree_to_latex(&tree, &settings);
//! assert!(body.contains("\\section{Intro}"));
//! assert!(body.contains("Value: 50\\%"));
//! ```

/// Document tree data model
pub mod ast;

/// Core compilation modules
pub mod core;

/// Data layer - static mappings and constants
pub mod data;

/// Feature modules - references, images, templates
pub mod features;

/// Export settings
pub mod settings;

/// Utility modules
pub mod utils;

/// WASM bindings (feature-gated)
#[cfg(feature = "wasm")]
pub mod wasm;

// Re-export the core compile surface
pub use core::escape::escape_text;
pub use core::visitor::{CompileResult, Compiler, FigureInfo, FloatItem, FloatKind, TableInfo};

// Re-export the data model and configuration
pub use ast::{DocumentNode, NodeKind, Position, Span};
pub use settings::{ImagePathMode, Settings};

// Re-export feature modules
pub use features::images;
pub use features::refs;
pub use features::templates;
pub use features::templates::{assemble_document, Frontmatter};

// Re-export utilities
pub use utils::diagnostics::Message;
pub use utils::error::{ExportError, ExportResult};

/// Compile a document tree to a LaTeX body (no preamble/postamble).
///
/// # Arguments
/// * `root` - the document tree
/// * `settings` - export settings
///
/// # Returns
/// The LaTeX body text
pub fn tree_to_latex(root: &DocumentNode, settings: &Settings) -> String {
    let mut compiler = Compiler::new(settings, "");
    compiler.visit(root);
    compiler.into_body()
}

/// Compile a document tree to a LaTeX body, keeping the advisory messages
/// and the table/figure bookkeeping.
///
/// `source` is the original document text backing the tree's spans; it is
/// only used to recover literal source slices for the bookkeeping.
pub fn compile_tree(root: &DocumentNode, settings: &Settings, source: &str) -> CompileResult {
    let mut compiler = Compiler::new(settings, source);
    compiler.visit(root);
    compiler.finish()
}

/// Compile a document tree into a complete LaTeX document: repaired
/// preamble with substituted placeholders, body, repaired postamble.
pub fn compile_document(
    root: &DocumentNode,
    settings: &Settings,
    source: &str,
    frontmatter: &Frontmatter,
) -> CompileResult {
    let mut result = compile_tree(root, settings, source);
    result.content = assemble_document(&result.content, settings, frontmatter);
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tree() -> DocumentNode {
        DocumentNode::parent(
            NodeKind::Root,
            vec![
                DocumentNode::parent(
                    NodeKind::Heading { depth: 1 },
                    vec![DocumentNode::text("Intro")],
                ),
                DocumentNode::parent(
                    NodeKind::Paragraph,
                    vec![DocumentNode::text("Value: 50%")],
                ),
            ],
        )
    }

    #[test]
    fn test_tree_to_latex_basic() {
        let body = tree_to_latex(&sample_tree(), &Settings::default());
        assert!(body.contains("\\section{Intro}"));
        assert!(body.contains("Value: 50\\%"));
    }

    #[test]
    fn test_compile_tree_bookkeeping_empty() {
        let result = compile_tree(&sample_tree(), &Settings::default(), "");
        assert!(result.messages.is_empty());
        assert!(result.tables.is_empty());
        assert!(result.figures.is_empty());
        assert!(result.items_in_order.is_empty());
    }

    #[test]
    fn test_compile_document_wraps_body() {
        let mut frontmatter = Frontmatter::new();
        frontmatter.insert("title".to_string(), "Study".to_string());
        let result = compile_document(
            &sample_tree(),
            &Settings::default(),
            "",
            &frontmatter,
        );
        assert!(result.content.contains("\\documentclass"));
        assert!(result.content.contains("\\begin{document}"));
        assert!(result.content.contains("\\maketitle"));
        assert!(result.content.contains("\\section{Intro}"));
        assert!(result.content.contains("\\end{document}"));
    }

    #[test]
    fn test_items_in_order_mixed() {
        let table = DocumentNode::parent(
            NodeKind::Table,
            vec![DocumentNode::parent(
                NodeKind::TableRow,
                vec![DocumentNode::parent(
                    NodeKind::TableCell,
                    vec![DocumentNode::text("x")],
                )],
            )],
        );
        let image = DocumentNode::new(NodeKind::Image {
            url: "a.png".to_string(),
            alt: "a".to_string(),
            title: None,
        });
        let root = DocumentNode::parent(NodeKind::Root, vec![image, table]);
        let result = compile_tree(&root, &Settings::default(), "");
        assert_eq!(result.items_in_order.len(), 2);
        assert_eq!(result.items_in_order[0].kind, FloatKind::Figure);
        assert_eq!(result.items_in_order[0].display_index, 0);
        assert_eq!(result.items_in_order[1].kind, FloatKind::Table);
        assert_eq!(result.items_in_order[1].display_index, 0);
    }
}
