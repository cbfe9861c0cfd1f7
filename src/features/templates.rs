//! Document template assembly
//!
//! The final document is validated preamble + body + validated postamble.
//! User templates are repaired rather than rejected: a missing document
//! class, `\begin{document}` / `\end{document}` marker or required package
//! is injected, and a comment line records what was auto-added. Repair is
//! idempotent - running it on an already-repaired template changes nothing.
//!
//! Templates may contain `{{identifier}}` placeholders resolved against a
//! flat frontmatter record. An unresolved `date` falls back to the current
//! date in ISO form; any other unresolved placeholder becomes the literal
//! text `undefined`.

use std::collections::HashMap;

use lazy_static::lazy_static;
use regex::{Captures, Regex};

use crate::core::escape::escape_reserved;
use crate::data::constants::{
    DEFAULT_DOCUMENT_CLASS, PACKAGE_ANCHORS, REQUIRED_PACKAGES,
};
use crate::settings::Settings;

/// Flat metadata record backing placeholder substitution.
pub type Frontmatter = HashMap<String, String>;

lazy_static! {
    /// `{{identifier}}` placeholder tokens
    static ref PLACEHOLDER: Regex = Regex::new(r"\{\{(\w+)\}\}").unwrap();
    /// A full `\documentclass...` line including its newline
    static ref DOCUMENT_CLASS_LINE: Regex = Regex::new(r"\\documentclass[^\n]*\n").unwrap();
    /// Any `\usepackage...` line including its newline
    static ref USEPACKAGE_LINE: Regex = Regex::new(r"\\usepackage[^\n]*\n").unwrap();
    /// A `%%%...` separator line, used as a package-block boundary
    static ref COMMENT_BLOCK: Regex = Regex::new(r"\n%+\n").unwrap();
    /// Presence patterns for the required packages, tolerating bracketed
    /// options: `\usepackage{name}` and `\usepackage[opts]{name}`
    static ref PACKAGE_PATTERNS: Vec<(&'static str, Regex)> = REQUIRED_PACKAGES
        .iter()
        .map(|(name, _)| {
            let pattern = format!(r"\\usepackage(?:\[[^\]]*\])?\{{{}\}}", regex::escape(name));
            (*name, Regex::new(&pattern).unwrap())
        })
        .collect();
}

/// Ensure the preamble opens a document: prepend a minimal document class
/// when none is present, inject `amsmath`, and append `\begin{document}`
/// when missing.
pub fn ensure_valid_preamble(preamble: &str) -> String {
    let mut result = preamble.to_string();

    if !result.contains("\\documentclass") {
        result = format!("{}\n{}", DEFAULT_DOCUMENT_CLASS, result);
    }

    if !result.contains("\\usepackage{amsmath}") {
        if let Some(class_line) = DOCUMENT_CLASS_LINE.find(&result) {
            result.insert_str(class_line.end(), "\\usepackage{amsmath}\n");
        }
    }

    if !result.contains("\\begin{document}") {
        if !result.ends_with('\n') {
            result.push('\n');
        }
        result.push_str("\\begin{document}\n");
    }

    result
}

/// Ensure the postamble closes the document.
pub fn ensure_valid_postamble(postamble: &str) -> String {
    let mut result = postamble.to_string();
    if !result.contains("\\end{document}") {
        if !result.ends_with('\n') {
            result.push('\n');
        }
        result.push_str("\\end{document}\n");
    }
    result
}

/// Inject any missing required package and record the additions in a
/// comment line after the document class. Presence checks tolerate
/// bracketed options, so repair never duplicates an existing package.
pub fn ensure_required_packages(preamble: &str) -> String {
    let mut updated = preamble.to_string();
    let mut added: Vec<&str> = Vec::new();

    for (name, pattern) in PACKAGE_PATTERNS.iter() {
        if pattern.is_match(&updated) {
            continue;
        }
        if let Some(at) = insertion_point(&updated) {
            updated.insert_str(at, &format!("\\usepackage{{{}}}\n", name));
            added.push(*name);
        }
    }

    if !added.is_empty() {
        if let Some(class_line) = DOCUMENT_CLASS_LINE.find(&updated) {
            let comment = format!("% Auto-added required packages: {}\n", added.join(", "));
            updated.insert_str(class_line.end(), &comment);
        }
    }

    updated
}

/// Pick the insertion point for an injected package: after the first anchor
/// package found, else before a `%%%` separator, else after the last
/// `\usepackage` line, else right after the document class line.
fn insertion_point(text: &str) -> Option<usize> {
    for anchor in PACKAGE_ANCHORS {
        let needle = format!("\\usepackage{{{}}}\n", anchor);
        if let Some(pos) = text.find(&needle) {
            return Some(pos + needle.len());
        }
    }
    if let Some(block) = COMMENT_BLOCK.find(text) {
        return Some(block.start());
    }
    if let Some(last) = USEPACKAGE_LINE.find_iter(text).last() {
        return Some(last.end());
    }
    DOCUMENT_CLASS_LINE.find(text).map(|line| line.end())
}

/// Replace `{{key}}` placeholders with escaped frontmatter values.
pub fn substitute_placeholders(template: &str, frontmatter: &Frontmatter) -> String {
    PLACEHOLDER
        .replace_all(template, |caps: &Captures| {
            let key = &caps[1];
            match frontmatter.get(key) {
                Some(value) => escape_reserved(value),
                None if key == "date" => chrono::Local::now().format("%Y-%m-%d").to_string(),
                None => "undefined".to_string(),
            }
        })
        .into_owned()
}

/// Collapse every run of blank lines to a single blank line. Trailing blank
/// runs are dropped entirely.
pub fn compress_newlines(tex: &str) -> String {
    let mut output: Vec<&str> = Vec::new();
    let mut was_empty = false;
    for line in tex.split('\n') {
        if line.is_empty() {
            was_empty = true;
            continue;
        }
        if was_empty {
            output.push("");
            was_empty = false;
        }
        output.push(line);
    }
    output.join("\n")
}

/// Compose the final document: repaired preamble with placeholders + body +
/// repaired postamble with placeholders. A non-empty frontmatter title adds
/// a `\maketitle` after the preamble.
pub fn assemble_document(body: &str, settings: &Settings, frontmatter: &Frontmatter) -> String {
    let preamble = ensure_required_packages(&ensure_valid_preamble(&settings.preamble));
    let postamble = ensure_valid_postamble(&settings.postamble);

    let mut preamble = substitute_placeholders(&preamble, frontmatter);
    let has_title = frontmatter
        .get("title")
        .map(|title| !title.trim().is_empty())
        .unwrap_or(false);
    if has_title {
        preamble.push_str("\n\\maketitle");
    }

    let body = if settings.compress_newlines {
        compress_newlines(body)
    } else {
        body.to_string()
    };

    format!(
        "{}{}{}",
        preamble,
        body,
        substitute_placeholders(&postamble, frontmatter)
    )
}
