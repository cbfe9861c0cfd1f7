//! Domain constants: heading commands, summary keywords, required packages,
//! recognized math environments and the built-in document templates.

/// LaTeX sectioning commands indexed by heading depth - 1.
/// Depths beyond the table are skipped by the visitor.
pub const HEADING_COMMANDS: [&str; 5] = [
    "section",
    "subsection",
    "subsubsection",
    "paragraph",
    "subparagraph",
];

/// Keywords marking a table row as a summary/aggregate row. Matching is
/// done on the lowercased rendered text of the row's first cell, by
/// substring containment.
pub const SUMMARY_KEYWORDS: &[&str] = &[
    // Japanese
    "合計",
    "平均",
    "小計",
    "計",
    "総計",
    "総和",
    "合算",
    "平均値",
    "中央値",
    // English
    "total",
    "average",
    "sum",
    "mean",
    "subtotal",
    "grand total",
];

/// Packages the generated body relies on. Each is (name, description);
/// preamble repair injects any that are missing.
pub const REQUIRED_PACKAGES: &[(&str, &str)] = &[
    ("float", "Float positioning (table/figure)"),
    ("lscape", "Landscape page orientation"),
    ("adjustbox", "Adjust box sizing"),
    ("tabularx", "Flexible table columns"),
    ("booktabs", "Professional table formatting"),
    ("longtable", "Multi-page tables"),
];

/// Preferred insertion anchors for injected packages, in order. A missing
/// package is inserted right after the first of these found in the preamble.
pub const PACKAGE_ANCHORS: &[&str] = &[
    "float",
    "booktabs",
    "longtable",
    "adjustbox",
    "tabularx",
    "lscape",
    "listings",
    "newunicodechar",
];

/// Display-math environments that already carry their own begin/end and must
/// not be wrapped again. User-defined environments come on top of these via
/// `Settings::additional_math_environments`.
pub const MATH_ENVIRONMENTS: &[&str] = &[
    "align",
    "align*",
    "alignat",
    "alignat*",
    "equation",
    "equation*",
    "gather",
    "gather*",
    "multline",
    "multline*",
    "flalign",
    "flalign*",
];

/// Document class prepended when a preamble lacks one.
pub const DEFAULT_DOCUMENT_CLASS: &str = "\\documentclass[paper=a4]{jlreq}";

/// Built-in preamble template. Placeholders (`{{title}}` etc.) are resolved
/// against the document frontmatter at assembly time.
pub const DEFAULT_PREAMBLE: &str = "\\documentclass[paper=a4]{jlreq}\n\
\\usepackage{amsmath}\n\
\\usepackage{amssymb}\n\
\\usepackage{amsthm}\n\
\\usepackage{amsfonts}\n\
\\usepackage{mathtools}\n\
\\usepackage{graphicx}\n\
\\usepackage{multirow}\n\
\\usepackage{hyperref}\n\
\\usepackage{comment}\n\
\\usepackage[separate-uncertainty]{siunitx}\n\
\\usepackage{newunicodechar}\n\
\\usepackage{listings}\n\
\\usepackage{float}\n\
\\usepackage{lscape}\n\
\\usepackage{adjustbox}\n\
\\usepackage{tabularx}\n\
\\usepackage{booktabs}\n\
\\usepackage{longtable}\n\
%%%%%%%%%%%%%%%%%%%%%%%%%%%%%%%%%%%%%%%%%%%%%%%%%\n\
\\NewDocumentCommand\\degC{}{\\ensuremath{^\\circ\\symup{C}}}\n\
\\NewDocumentCommand\\abs{m}{\\left|#1\\right|}\n\
%%%%%%%%%%%%%%%%%%%%%%%%%%%%%%%%%%%%%%%%%%%%%%%%%\n\
\n\
\\title{{{title}}}\n\
\\author{{{author}}}\n\
\\date{{{date}}}\n\
\n\
\n\\begin{document}\n";

/// Built-in postamble template.
pub const DEFAULT_POSTAMBLE: &str = "\n\\end{document}";
