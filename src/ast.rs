//! Document tree data model
//!
//! The exporter consumes a parsed document tree supplied by an external
//! parser. The node set is closed: every kind the parser can hand over has a
//! variant here, and anything outside the set arrives as [`NodeKind::Unknown`]
//! so it can be carried through as a commented passthrough block instead of
//! being dropped.
//!
//! With the `serde` feature enabled the tree (de)serializes in an
//! mdast-shaped JSON form, e.g.:
//!
//! ```json
//! { "type": "heading", "depth": 1, "children": [{ "type": "text", "value": "Intro" }] }
//! ```

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A line/column pair, 1-indexed, as reported by the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

/// Source span of a node. Used only to recover the literal source text for
/// caption lookup and previews, never for compilation correctness.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    pub fn new(start_line: usize, start_column: usize, end_line: usize, end_column: usize) -> Self {
        Span {
            start: Position {
                line: start_line,
                column: start_column,
            },
            end: Position {
                line: end_line,
                column: end_column,
            },
        }
    }
}

/// A single node of the document tree.
///
/// Structural data lives in [`NodeKind`]; children, the optional source span
/// and the optional cross-reference label id are uniform across kinds. For a
/// `Table` node the children are `TableRow`s (row 0 is the header) and each
/// row's children are `TableCell`s owning arbitrary subtrees.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DocumentNode {
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub kind: NodeKind,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Vec::is_empty")
    )]
    pub children: Vec<DocumentNode>,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub span: Option<Span>,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub label: Option<String>,
}

/// The closed set of node kinds the exporter understands.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "camelCase"))]
pub enum NodeKind {
    Root,
    Heading {
        depth: u8,
    },
    Paragraph,
    Blockquote,
    List {
        ordered: bool,
    },
    ListItem,
    Table,
    TableRow,
    TableCell,
    Image {
        url: String,
        #[cfg_attr(feature = "serde", serde(default))]
        alt: String,
        #[cfg_attr(
            feature = "serde",
            serde(default, skip_serializing_if = "Option::is_none")
        )]
        title: Option<String>,
    },
    Link {
        url: String,
    },
    WikiLink {
        value: String,
        #[cfg_attr(
            feature = "serde",
            serde(default, skip_serializing_if = "Option::is_none")
        )]
        alias: Option<String>,
    },
    Text {
        value: String,
    },
    InlineMath {
        value: String,
    },
    Math {
        value: String,
        #[cfg_attr(feature = "serde", serde(default = "default_display"))]
        display: bool,
    },
    Code {
        #[cfg_attr(
            feature = "serde",
            serde(default, skip_serializing_if = "Option::is_none")
        )]
        lang: Option<String>,
        #[cfg_attr(
            feature = "serde",
            serde(default, skip_serializing_if = "Option::is_none")
        )]
        meta: Option<String>,
        value: String,
    },
    InlineCode {
        value: String,
    },
    Emphasis,
    Strong,
    FootnoteDefinition {
        identifier: String,
    },
    FootnoteReference {
        identifier: String,
    },
    Html {
        value: String,
    },
    Break,
    ThematicBreak,
    /// Anything the parser produced that the exporter does not model.
    /// Never dropped, never fatal: rendered as a commented block.
    Unknown {
        kind: String,
        #[cfg_attr(
            feature = "serde",
            serde(default, skip_serializing_if = "Option::is_none")
        )]
        raw: Option<String>,
    },
}

#[cfg(feature = "serde")]
fn default_display() -> bool {
    true
}

impl DocumentNode {
    /// Create a leaf node of the given kind.
    pub fn new(kind: NodeKind) -> Self {
        DocumentNode {
            kind,
            children: Vec::new(),
            span: None,
            label: None,
        }
    }

    /// Create a node of the given kind with children.
    pub fn parent(kind: NodeKind, children: Vec<DocumentNode>) -> Self {
        DocumentNode {
            kind,
            children,
            span: None,
            label: None,
        }
    }

    /// Create a text leaf.
    pub fn text(value: impl Into<String>) -> Self {
        DocumentNode::new(NodeKind::Text {
            value: value.into(),
        })
    }

    /// Attach a cross-reference label id.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Attach a source span.
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    /// The mdast-style name of this node's kind, for diagnostics. Unknown
    /// nodes report the kind string the parser gave them.
    pub fn kind_name(&self) -> &str {
        match &self.kind {
            NodeKind::Root => "root",
            NodeKind::Heading { .. } => "heading",
            NodeKind::Paragraph => "paragraph",
            NodeKind::Blockquote => "blockquote",
            NodeKind::List { .. } => "list",
            NodeKind::ListItem => "listItem",
            NodeKind::Table => "table",
            NodeKind::TableRow => "tableRow",
            NodeKind::TableCell => "tableCell",
            NodeKind::Image { .. } => "image",
            NodeKind::Link { .. } => "link",
            NodeKind::WikiLink { .. } => "wikiLink",
            NodeKind::Text { .. } => "text",
            NodeKind::InlineMath { .. } => "inlineMath",
            NodeKind::Math { .. } => "math",
            NodeKind::Code { .. } => "code",
            NodeKind::InlineCode { .. } => "inlineCode",
            NodeKind::Emphasis => "emphasis",
            NodeKind::Strong => "strong",
            NodeKind::FootnoteDefinition { .. } => "footnoteDefinition",
            NodeKind::FootnoteReference { .. } => "footnoteReference",
            NodeKind::Html { .. } => "html",
            NodeKind::Break => "break",
            NodeKind::ThematicBreak => "thematicBreak",
            NodeKind::Unknown { kind, .. } => kind,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builders() {
        let node = DocumentNode::parent(
            NodeKind::Heading { depth: 2 },
            vec![DocumentNode::text("Title")],
        )
        .with_label("sec:title");
        assert_eq!(node.kind_name(), "heading");
        assert_eq!(node.children.len(), 1);
        assert_eq!(node.label.as_deref(), Some("sec:title"));
    }

    #[test]
    fn test_unknown_kind_name() {
        let node = DocumentNode::new(NodeKind::Unknown {
            kind: "video".to_string(),
            raw: Some("<video>".to_string()),
        });
        assert_eq!(node.kind_name(), "video");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_mdast_shaped_json() {
        let json = r#"{
            "type": "heading",
            "depth": 1,
            "children": [{ "type": "text", "value": "Intro" }]
        }"#;
        let node: DocumentNode = serde_json::from_str(json).expect("valid tree JSON");
        assert!(matches!(node.kind, NodeKind::Heading { depth: 1 }));
        assert_eq!(node.children.len(), 1);
    }
}
