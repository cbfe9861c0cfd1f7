//! Tree walker and LaTeX emitter
//!
//! [`Compiler`] drives a single synchronous pass over the document tree,
//! dispatching on node kind and appending LaTeX fragments to its owned
//! [`EmitContext`]. One `Compiler` is created per export and discarded after
//! the body string is read; nothing here is shared or reused across exports.
//!
//! Unknown node kinds are never dropped and never raise: they are rendered
//! as commented passthrough blocks and recorded in the advisory message
//! sink.

use fxhash::FxHashSet;
use indexmap::IndexMap;
use lazy_static::lazy_static;
use regex::Regex;

use crate::ast::{DocumentNode, NodeKind};
use crate::core::context::EmitContext;
use crate::core::escape::escape_text;
use crate::data::constants::{HEADING_COMMANDS, MATH_ENVIRONMENTS};
use crate::features::images::resolve_image_path;
use crate::features::refs::{ref_directive, LabelRegistry};
use crate::settings::Settings;
use crate::utils::diagnostics::Message;

#[cfg(feature = "serde")]
use serde::Serialize;

lazy_static! {
    /// `<br>` variants inside raw HTML nodes
    static ref BR_TAG: Regex = Regex::new(r"(?i)<br\s*/?>").unwrap();
}

/// Bookkeeping for one detected table.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct TableInfo {
    /// Zero-based display index in document order.
    pub index: usize,
    /// Row count including the header row.
    pub rows: usize,
    /// Column count, taken from the header row.
    pub cols: usize,
    /// Literal source slice of the table, when a span was available.
    pub source: Option<String>,
}

/// Bookkeeping for one detected figure.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct FigureInfo {
    /// Zero-based display index in document order.
    pub index: usize,
    pub alt: String,
    pub title: Option<String>,
    /// Literal source slice of the image, when a span was available.
    pub source: Option<String>,
}

/// What a document-order float entry points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum FloatKind {
    Table,
    Figure,
}

/// One entry of the combined table/figure occurrence sequence, in document
/// order. `display_index` indexes into the tables or figures list depending
/// on `kind`.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct FloatItem {
    pub kind: FloatKind,
    pub display_index: usize,
}

/// Everything a compile pass produces: the text plus the advisory messages
/// and the float bookkeeping used by caller-side captioning workflows.
#[derive(Debug)]
pub struct CompileResult {
    pub content: String,
    pub messages: Vec<Message>,
    pub tables: Vec<TableInfo>,
    pub figures: Vec<FigureInfo>,
    pub items_in_order: Vec<FloatItem>,
}

/// Per-export visitor state: settings, source text for slice recovery, the
/// footnote map, the label registry and the float bookkeeping.
pub(crate) struct Visitor<'a> {
    pub(crate) settings: &'a Settings,
    pub(crate) source: &'a str,
    pub(crate) footnotes: IndexMap<String, &'a DocumentNode>,
    pub(crate) labels: LabelRegistry,
    pub(crate) tables: Vec<TableInfo>,
    pub(crate) figures: Vec<FigureInfo>,
    pub(crate) items_in_order: Vec<FloatItem>,
    pub(crate) table_counter: usize,
    pub(crate) figure_counter: usize,
    pub(crate) messages: Vec<Message>,
}

/// The compile state for one export: a [`Visitor`] plus the output buffer
/// it writes into.
pub struct Compiler<'a> {
    visitor: Visitor<'a>,
    ctx: EmitContext,
}

impl<'a> Compiler<'a> {
    /// Create a fresh compile state. `source` is the original document text
    /// backing the tree's spans; pass an empty string when slices are not
    /// needed.
    pub fn new(settings: &'a Settings, source: &'a str) -> Self {
        Compiler {
            visitor: Visitor {
                settings,
                source,
                footnotes: IndexMap::new(),
                labels: LabelRegistry::new(),
                tables: Vec::new(),
                figures: Vec::new(),
                items_in_order: Vec::new(),
                table_counter: 0,
                figure_counter: 0,
                messages: Vec::new(),
            },
            ctx: EmitContext::new(),
        }
    }

    /// Walk a (sub)tree and append its rendering to the output buffer.
    /// Footnote definitions anywhere under `node` are collected before
    /// emission so references resolve regardless of definition order.
    pub fn visit(&mut self, node: &'a DocumentNode) {
        self.visitor.collect_footnotes(node);
        self.visitor.visit(node, &mut self.ctx);
    }

    /// The body text emitted so far (no preamble/postamble).
    pub fn body(&self) -> &str {
        self.ctx.as_str()
    }

    /// Consume the compiler and return the body text.
    pub fn into_body(self) -> String {
        self.ctx.into_string()
    }

    /// Advisory messages recorded so far.
    pub fn messages(&self) -> &[Message] {
        &self.visitor.messages
    }

    /// Detected tables with row/column counts and source slices.
    pub fn tables(&self) -> &[TableInfo] {
        &self.visitor.tables
    }

    /// Detected figures with alt/title and source slices.
    pub fn figures(&self) -> &[FigureInfo] {
        &self.visitor.figures
    }

    /// Combined table/figure occurrences in document order.
    pub fn items_in_order(&self) -> &[FloatItem] {
        &self.visitor.items_in_order
    }

    /// Consume the compiler and return body plus bookkeeping.
    pub fn finish(self) -> CompileResult {
        CompileResult {
            content: self.ctx.into_string(),
            messages: self.visitor.messages,
            tables: self.visitor.tables,
            figures: self.visitor.figures,
            items_in_order: self.visitor.items_in_order,
        }
    }
}

impl<'a> Visitor<'a> {
    /// Dispatch on node kind. Every kind of the closed set has an arm; the
    /// Unknown arm is the explicit passthrough, so adding a node kind
    /// without a handler fails to compile.
    pub(crate) fn visit(&mut self, node: &'a DocumentNode, ctx: &mut EmitContext) {
        match &node.kind {
            NodeKind::Root => self.visit_children(node, ctx),
            NodeKind::Heading { depth } => self.visit_heading(node, *depth, ctx),
            NodeKind::Blockquote => {
                ctx.begin("blockquote");
                self.visit_children(node, ctx);
                ctx.end("blockquote");
            }
            NodeKind::Paragraph => {
                ctx.emit("\n");
                self.visit_children(node, ctx);
                ctx.emit("\n");
            }
            NodeKind::Image { url, alt, title } => {
                self.visit_image(node, url, alt, title.as_deref(), ctx)
            }
            NodeKind::Table => self.visit_table(node, ctx),
            NodeKind::TableRow => self.visit_table_row(node, ctx),
            NodeKind::TableCell => self.visit_table_cell(node, ctx),
            NodeKind::InlineMath { value } => ctx.emit(&format!("${}$", value)),
            NodeKind::Math { value, display } => self.visit_math(value, *display, ctx),
            NodeKind::InlineCode { value } => ctx.emit(&format!("\\verb{{{}}}", value)),
            NodeKind::Code { lang, meta, value } => {
                self.visit_code(lang.as_deref(), meta.as_deref(), value, ctx)
            }
            NodeKind::List { ordered } => {
                let environment = if *ordered { "enumerate" } else { "itemize" };
                ctx.begin(environment);
                self.visit_children(node, ctx);
                ctx.end(environment);
            }
            NodeKind::ListItem => {
                ctx.emit("\\item ");
                self.visit_children(node, ctx);
            }
            NodeKind::WikiLink { value, alias } => {
                self.visit_wiki_link(node, value, alias.as_deref(), ctx)
            }
            NodeKind::Link { url } => {
                ctx.emit(&format!("\\href{{{}}}{{", url));
                self.visit_children(node, ctx);
                ctx.emit("}");
            }
            NodeKind::Emphasis => self.command_children("emph", node, ctx),
            NodeKind::Strong => self.command_children("textbf", node, ctx),
            NodeKind::Text { value } => ctx.emit(&escape_text(value)),
            NodeKind::Break => ctx.emit("\\\\\n"),
            NodeKind::ThematicBreak => ctx.emit("\n\\hrulefill\n"),
            NodeKind::FootnoteDefinition { .. } => {
                // Collected before emission; definitions render nothing of
                // their own.
            }
            NodeKind::FootnoteReference { identifier } => {
                self.visit_footnote_reference(identifier, ctx)
            }
            NodeKind::Html { value } => self.visit_html(value, ctx),
            NodeKind::Unknown { .. } => self.visit_unknown(node, ctx),
        }
    }

    pub(crate) fn visit_children(&mut self, node: &'a DocumentNode, ctx: &mut EmitContext) {
        for child in &node.children {
            self.visit(child, ctx);
        }
    }

    /// Wrap the node's children in `\cmd{...}`.
    fn command_children(&mut self, cmd: &str, node: &'a DocumentNode, ctx: &mut EmitContext) {
        ctx.emit(&format!("\\{}{{", cmd));
        self.visit_children(node, ctx);
        ctx.emit("}");
    }

    /// Render nodes into a fresh buffer without touching the caller's
    /// output. Comment mode starts clear; the caller's emit path re-applies
    /// prefixes when the result is embedded in a commented block.
    pub(crate) fn render_isolated(&mut self, nodes: &'a [DocumentNode]) -> String {
        let mut sub = EmitContext::new();
        for node in nodes {
            self.visit(node, &mut sub);
        }
        sub.into_string()
    }

    fn visit_heading(&mut self, node: &'a DocumentNode, depth: u8, ctx: &mut EmitContext) {
        let command = match depth
            .checked_sub(1)
            .and_then(|index| HEADING_COMMANDS.get(index as usize))
        {
            Some(command) => command,
            // Depths beyond the command table produce no output.
            None => return,
        };
        let command = if self.settings.numbered_sections {
            command.to_string()
        } else {
            format!("{}*", command)
        };
        self.command_children(&command, node, ctx);
        self.label(node, ctx);
    }

    fn visit_image(
        &mut self,
        node: &'a DocumentNode,
        url: &str,
        alt: &str,
        title: Option<&str>,
        ctx: &mut EmitContext,
    ) {
        let index = self.figures.len();
        let source = self.extract_node_source(node);
        self.figures.push(FigureInfo {
            index,
            alt: alt.to_string(),
            title: title.map(|title| title.to_string()),
            source,
        });
        self.items_in_order.push(FloatItem {
            kind: FloatKind::Figure,
            display_index: self.figure_counter,
        });
        self.figure_counter += 1;

        let path = resolve_image_path(url, self.settings);

        if self.settings.generate_captions {
            let caption = if !alt.is_empty() {
                alt
            } else {
                title.unwrap_or("Figure")
            };
            ctx.emit(&format!(
                "\\begin{{figure}}[{}]\n",
                self.settings.figure_position
            ));
            ctx.emit("\\centering\n");
            ctx.emit("\\includegraphics[width=0.8\\textwidth,keepaspectratio]{");
            ctx.emit(&path);
            ctx.emit("}\n");
            ctx.emit(&format!("\\caption{{\\sffamily {}}}\n", caption));
            self.label(node, ctx);
            ctx.emit("\\end{figure}\n");
        } else {
            ctx.begin("center");
            ctx.emit("\\includegraphics[width=0.9\\textwidth,keepaspectratio]{");
            ctx.emit(&path);
            ctx.emit("}\n");
            if title.is_some() || !alt.is_empty() {
                ctx.emit(&format!(
                    "\\captionof{{figure}}{{\\sffamily {} {}}}",
                    title.unwrap_or(""),
                    alt
                ));
                self.label(node, ctx);
                ctx.emit("\n");
            }
            ctx.end("center");
        }
    }

    fn visit_math(&mut self, value: &str, display: bool, ctx: &mut EmitContext) {
        if !display {
            ctx.emit(&format!("${}$", value));
            return;
        }
        ctx.emit(&display_math(self.settings, value));
    }

    fn visit_code(
        &mut self,
        lang: Option<&str>,
        meta: Option<&str>,
        value: &str,
        ctx: &mut EmitContext,
    ) {
        ctx.emit(&format!(
            "% {} {}\n",
            lang.unwrap_or_default(),
            meta.unwrap_or_default()
        ));
        ctx.begin("verbatim");
        ctx.emit(value);
        ctx.emit("\n");
        ctx.end("verbatim");
    }

    fn visit_wiki_link(
        &mut self,
        node: &'a DocumentNode,
        value: &str,
        alias: Option<&str>,
        ctx: &mut EmitContext,
    ) {
        // A link to a sub-heading with a resolvable label renders as a bare
        // reference; everything else falls back to its display text.
        let fallback = if !value.contains('#') || node.label.is_none() {
            value
        } else {
            ""
        };
        let text = alias.unwrap_or(fallback);
        ctx.emit(&text.replace('#', ""));
        self.reference(node, ctx);
    }

    fn visit_footnote_reference(&mut self, identifier: &str, ctx: &mut EmitContext) {
        let definition = self.footnotes.get(identifier).copied();
        match definition {
            Some(definition) => {
                ctx.emit("\\footnote{");
                self.visit_children(definition, ctx);
                ctx.emit("}");
            }
            None => ctx.emit(&format!("[^{}]", identifier)),
        }
    }

    fn visit_html(&mut self, value: &str, ctx: &mut EmitContext) {
        // <br> becomes a LaTeX line break; other markup passes through.
        let html = BR_TAG.replace_all(value, "\\\\");
        ctx.emit(&html);
    }

    fn visit_unknown(&mut self, node: &'a DocumentNode, ctx: &mut EmitContext) {
        let NodeKind::Unknown { kind, raw } = &node.kind else {
            return;
        };
        self.message(format!("Encountered unknown node type {}", kind), node);

        let previous = ctx.set_commenting(true);
        ctx.emit(&format!("Unknown Node :: {}\n", kind));
        match raw {
            Some(raw) => ctx.emit(raw),
            None => self.visit_children(node, ctx),
        }
        if !ctx.as_str().ends_with('\n') {
            ctx.emit("\n");
        }
        ctx.set_commenting(previous);
    }

    /// Emit the label directive for a labeled node; no-op otherwise.
    pub(crate) fn label(&mut self, node: &DocumentNode, ctx: &mut EmitContext) {
        if let Some(id) = &node.label {
            if let Some(directive) = self.labels.define(self.settings, id) {
                ctx.emit(&directive);
            }
        }
    }

    /// Emit the reference command for a labeled node; no-op otherwise.
    fn reference(&mut self, node: &DocumentNode, ctx: &mut EmitContext) {
        if let Some(id) = &node.label {
            ctx.emit(&ref_directive(self.settings, id));
        }
    }

    /// Append an advisory message tied to a node.
    pub(crate) fn message(&mut self, text: impl Into<String>, node: &DocumentNode) {
        self.messages.push(Message::new(text).with_node(node));
    }

    /// Fill the footnote map from every definition under `node`.
    pub(crate) fn collect_footnotes(&mut self, node: &'a DocumentNode) {
        if let NodeKind::FootnoteDefinition { identifier } = &node.kind {
            self.footnotes.insert(identifier.clone(), node);
        }
        for child in &node.children {
            self.collect_footnotes(child);
        }
    }

    /// Recover the literal source text behind a node's span. Columns are
    /// 1-indexed character offsets; the end column is exclusive.
    pub(crate) fn extract_node_source(&self, node: &DocumentNode) -> Option<String> {
        let span = node.span?;
        if self.source.is_empty() {
            return None;
        }
        let lines: Vec<&str> = self.source.split('\n').collect();
        let start_line = span.start.line.checked_sub(1)?;
        let end_line = span.end.line.checked_sub(1)?;
        let start_col = span.start.column.saturating_sub(1);
        let end_col = span.end.column.saturating_sub(1);

        let line_slice = |index: usize, from: usize, to: Option<usize>| -> String {
            let Some(line) = lines.get(index) else {
                return String::new();
            };
            match to {
                Some(to) => line
                    .chars()
                    .skip(from)
                    .take(to.saturating_sub(from))
                    .collect(),
                None => line.chars().skip(from).collect(),
            }
        };

        let mut result = String::new();
        if start_line == end_line {
            result.push_str(&line_slice(start_line, start_col, Some(end_col)));
        } else {
            result.push_str(&line_slice(start_line, start_col, None));
            for index in (start_line + 1)..end_line {
                result.push('\n');
                result.push_str(lines.get(index).copied().unwrap_or_default());
            }
            result.push('\n');
            result.push_str(&line_slice(end_line, 0, Some(end_col)));
        }
        Some(result.trim().to_string())
    }
}

/// Render a display-math block. Content that already opens a recognized
/// environment passes through verbatim; everything else is wrapped.
fn display_math(settings: &Settings, value: &str) -> String {
    let trimmed = value.trim();
    let recognized = MATH_ENVIRONMENTS
        .iter()
        .copied()
        .chain(
            settings
                .additional_math_environments
                .iter()
                .map(String::as_str),
        )
        .collect::<FxHashSet<&str>>();
    if let Some(environment) = opened_environment(trimmed) {
        if recognized.contains(environment) {
            return format!("\n{}\n", trimmed);
        }
    }
    if settings.default_to_equation {
        format!("\n\\begin{{equation}}\n{}\n\\end{{equation}}\n", trimmed)
    } else {
        format!("\n\\[\n{}\n\\]\n", trimmed)
    }
}

/// The environment name a math block opens with, if any.
fn opened_environment(value: &str) -> Option<&str> {
    let rest = value.strip_prefix("\\begin{")?;
    let end = rest.find('}')?;
    Some(&rest[..end])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Span;

    fn compile(node: &DocumentNode, settings: &Settings) -> String {
        let mut compiler = Compiler::new(settings, "");
        compiler.visit(node);
        compiler.into_body()
    }

    fn paragraph(text: &str) -> DocumentNode {
        DocumentNode::parent(NodeKind::Paragraph, vec![DocumentNode::text(text)])
    }

    #[test]
    fn test_heading_numbered() {
        let settings = Settings::default();
        let heading = DocumentNode::parent(
            NodeKind::Heading { depth: 1 },
            vec![DocumentNode::text("Intro")],
        );
        assert_eq!(compile(&heading, &settings), "\\section{Intro}");
    }

    #[test]
    fn test_heading_unnumbered() {
        let settings = Settings {
            numbered_sections: false,
            ..Settings::default()
        };
        let heading = DocumentNode::parent(
            NodeKind::Heading { depth: 3 },
            vec![DocumentNode::text("Details")],
        );
        assert_eq!(compile(&heading, &settings), "\\subsubsection*{Details}");
    }

    #[test]
    fn test_heading_too_deep_is_skipped() {
        let settings = Settings::default();
        let heading = DocumentNode::parent(
            NodeKind::Heading { depth: 6 },
            vec![DocumentNode::text("Deep")],
        );
        assert_eq!(compile(&heading, &settings), "");
    }

    #[test]
    fn test_heading_label() {
        let settings = Settings::default();
        let heading = DocumentNode::parent(
            NodeKind::Heading { depth: 1 },
            vec![DocumentNode::text("Intro")],
        )
        .with_label("sec:intro");
        assert_eq!(
            compile(&heading, &settings),
            "\\section{Intro}\\label{sec:intro}\n"
        );
    }

    #[test]
    fn test_paragraph_and_formatting() {
        let settings = Settings::default();
        let node = DocumentNode::parent(
            NodeKind::Paragraph,
            vec![
                DocumentNode::text("a "),
                DocumentNode::parent(NodeKind::Strong, vec![DocumentNode::text("b")]),
                DocumentNode::text(" "),
                DocumentNode::parent(NodeKind::Emphasis, vec![DocumentNode::text("c")]),
            ],
        );
        assert_eq!(compile(&node, &settings), "\na \\textbf{b} \\emph{c}\n");
    }

    #[test]
    fn test_lists() {
        let settings = Settings::default();
        let list = DocumentNode::parent(
            NodeKind::List { ordered: true },
            vec![DocumentNode::parent(
                NodeKind::ListItem,
                vec![DocumentNode::text("one")],
            )],
        );
        assert_eq!(
            compile(&list, &settings),
            "\\begin{enumerate}\n\\item one\\end{enumerate}\n"
        );
    }

    #[test]
    fn test_link_wraps_children() {
        let settings = Settings::default();
        let link = DocumentNode::parent(
            NodeKind::Link {
                url: "https://example.org".to_string(),
            },
            vec![DocumentNode::text("site")],
        );
        assert_eq!(
            compile(&link, &settings),
            "\\href{https://example.org}{site}"
        );
    }

    #[test]
    fn test_inline_math_and_code() {
        let settings = Settings::default();
        let math = DocumentNode::new(NodeKind::InlineMath {
            value: "E = mc^2".to_string(),
        });
        assert_eq!(compile(&math, &settings), "$E = mc^2$");

        let code = DocumentNode::new(NodeKind::InlineCode {
            value: "let x = 1;".to_string(),
        });
        assert_eq!(compile(&code, &settings), "\\verb{let x = 1;}");
    }

    #[test]
    fn test_display_math_wrapping() {
        let settings = Settings::default();
        let math = DocumentNode::new(NodeKind::Math {
            value: "x^2".to_string(),
            display: true,
        });
        assert_eq!(compile(&math, &settings), "\n\\[\nx^2\n\\]\n");

        let equation = Settings {
            default_to_equation: true,
            ..Settings::default()
        };
        let math = DocumentNode::new(NodeKind::Math {
            value: "x^2".to_string(),
            display: true,
        });
        assert_eq!(
            compile(&math, &equation),
            "\n\\begin{equation}\nx^2\n\\end{equation}\n"
        );
    }

    #[test]
    fn test_display_math_environment_passthrough() {
        let settings = Settings::default();
        let math = DocumentNode::new(NodeKind::Math {
            value: "\\begin{align}\nx &= y\n\\end{align}".to_string(),
            display: true,
        });
        let output = compile(&math, &settings);
        assert_eq!(output, "\n\\begin{align}\nx &= y\n\\end{align}\n");
    }

    #[test]
    fn test_display_math_additional_environment() {
        let settings = Settings {
            additional_math_environments: vec!["empheq".to_string()],
            ..Settings::default()
        };
        let math = DocumentNode::new(NodeKind::Math {
            value: "\\begin{empheq}{align}x\\end{empheq}".to_string(),
            display: true,
        });
        let output = compile(&math, &settings);
        assert!(!output.contains("\\[\n"));
    }

    #[test]
    fn test_code_block() {
        let settings = Settings::default();
        let code = DocumentNode::new(NodeKind::Code {
            lang: Some("rust".to_string()),
            meta: None,
            value: "fn main() {}".to_string(),
        });
        let output = compile(&code, &settings);
        assert!(output.starts_with("% rust \n"));
        assert!(output.contains("\\begin{verbatim}\nfn main() {}\n\\end{verbatim}\n"));
    }

    #[test]
    fn test_footnote_reference_resolves_definition() {
        let settings = Settings::default();
        let root = DocumentNode::parent(
            NodeKind::Root,
            vec![
                DocumentNode::parent(
                    NodeKind::Paragraph,
                    vec![
                        DocumentNode::text("claim"),
                        DocumentNode::new(NodeKind::FootnoteReference {
                            identifier: "1".to_string(),
                        }),
                    ],
                ),
                DocumentNode::parent(
                    NodeKind::FootnoteDefinition {
                        identifier: "1".to_string(),
                    },
                    vec![DocumentNode::text("evidence")],
                ),
            ],
        );
        let output = compile(&root, &settings);
        // Definition follows the reference, yet still resolves.
        assert!(output.contains("claim\\footnote{evidence}"));
        // The definition node itself renders nothing.
        assert_eq!(output.matches("evidence").count(), 1);
    }

    #[test]
    fn test_footnote_reference_missing_definition() {
        let settings = Settings::default();
        let reference = DocumentNode::new(NodeKind::FootnoteReference {
            identifier: "nope".to_string(),
        });
        assert_eq!(compile(&reference, &settings), "[^nope]");
    }

    #[test]
    fn test_html_br_conversion() {
        let settings = Settings::default();
        let html = DocumentNode::new(NodeKind::Html {
            value: "a<br>b<BR />c".to_string(),
        });
        assert_eq!(compile(&html, &settings), "a\\\\b\\\\c");
    }

    #[test]
    fn test_unknown_node_commented_with_message() {
        let settings = Settings::default();
        let root = DocumentNode::parent(
            NodeKind::Root,
            vec![
                DocumentNode::new(NodeKind::Unknown {
                    kind: "video".to_string(),
                    raw: Some("<video>".to_string()),
                }),
                paragraph("after"),
            ],
        );
        let mut compiler = Compiler::new(&settings, "");
        compiler.visit(&root);
        assert_eq!(compiler.messages().len(), 1);
        assert!(compiler.messages()[0]
            .message
            .contains("unknown node type video"));
        let output = compiler.into_body();
        assert!(output.contains("%Unknown Node :: video\n"));
        assert!(output.contains("%<video>"));
        // Siblings render normally after the commented block.
        assert!(output.contains("\nafter\n"));
        assert!(!output.contains("%after"));
    }

    #[test]
    fn test_unknown_node_renders_children_commented() {
        let settings = Settings::default();
        let unknown = DocumentNode::parent(
            NodeKind::Unknown {
                kind: "aside".to_string(),
                raw: None,
            },
            vec![paragraph("inner")],
        );
        let output = compile(&unknown, &settings);
        assert!(output.contains("%Unknown Node :: aside"));
        assert!(output.contains("%inner"));
    }

    #[test]
    fn test_wiki_link_alias_and_reference() {
        let settings = Settings::default();
        let link = DocumentNode::new(NodeKind::WikiLink {
            value: "Note#Section".to_string(),
            alias: Some("the section".to_string()),
        })
        .with_label("sec:target");
        assert_eq!(
            compile(&link, &settings),
            "the section\\cref{sec:target}"
        );
    }

    #[test]
    fn test_wiki_link_plain_value() {
        let settings = Settings::default();
        let link = DocumentNode::new(NodeKind::WikiLink {
            value: "Other Note".to_string(),
            alias: None,
        });
        assert_eq!(compile(&link, &settings), "Other Note");
    }

    #[test]
    fn test_image_with_captions() {
        let settings = Settings::default();
        let image = DocumentNode::new(NodeKind::Image {
            url: "plot.png".to_string(),
            alt: "A plot".to_string(),
            title: None,
        });
        let mut compiler = Compiler::new(&settings, "");
        compiler.visit(&image);
        assert_eq!(compiler.figures().len(), 1);
        assert_eq!(compiler.figures()[0].alt, "A plot");
        let output = compiler.into_body();
        assert!(output.contains("\\begin{figure}[h]\n"));
        assert!(output.contains("\\includegraphics[width=0.8\\textwidth,keepaspectratio]{plot.png}"));
        assert!(output.contains("\\caption{\\sffamily A plot}\n"));
        assert!(output.contains("\\end{figure}\n"));
    }

    #[test]
    fn test_image_without_captions() {
        let settings = Settings {
            generate_captions: false,
            ..Settings::default()
        };
        let image = DocumentNode::new(NodeKind::Image {
            url: "plot.png".to_string(),
            alt: "A plot".to_string(),
            title: None,
        });
        let output = compile(&image, &settings);
        assert!(output.contains("\\begin{center}\n"));
        assert!(output.contains("width=0.9\\textwidth"));
        assert!(output.contains("\\captionof{figure}{\\sffamily  A plot}"));
    }

    #[test]
    fn test_thematic_break_and_break() {
        let settings = Settings::default();
        assert_eq!(
            compile(&DocumentNode::new(NodeKind::ThematicBreak), &settings),
            "\n\\hrulefill\n"
        );
        assert_eq!(
            compile(&DocumentNode::new(NodeKind::Break), &settings),
            "\\\\\n"
        );
    }

    #[test]
    fn test_extract_node_source() {
        let settings = Settings::default();
        let source = "# Title\n\n| a | b |\n| - | - |\n| 1 | 2 |\n";
        let compiler = Compiler::new(&settings, source);
        let node = DocumentNode::new(NodeKind::Table).with_span(Span::new(3, 1, 5, 10));
        let slice = compiler.visitor.extract_node_source(&node).unwrap();
        assert_eq!(slice, "| a | b |\n| - | - |\n| 1 | 2 |");
    }

    #[test]
    fn test_escaped_text_in_paragraph() {
        let settings = Settings::default();
        let output = compile(&paragraph("Value: 50%"), &settings);
        assert_eq!(output, "\nValue: 50\\%\n");
    }
}
