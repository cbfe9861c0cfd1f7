//! Text escaping pipeline
//!
//! Raw text becomes LaTeX-safe text through four ordered steps:
//!
//! 1. [`normalize_punctuation`] - full-width punctuation to narrow forms
//! 2. [`escape_reserved`] - reserved characters, backslash handled first
//! 3. [`substitute_greek`] - Greek letters to control sequences
//! 4. [`substitute_symbols`] - math/logic symbols to control sequences
//!
//! The pipeline is NOT idempotent: steps 3 and 4 insert backslashes and
//! braces that step 2 would mangle on a second run. [`escape_text`] must be
//! applied exactly once per original text fragment.

use crate::data::symbols::{FULLWIDTH_PUNCTUATION, GREEK_LETTERS, MATH_SYMBOLS};

/// Run the full pipeline, in order, exactly once.
pub fn escape_text(text: &str) -> String {
    substitute_symbols(&substitute_greek(&escape_reserved(&normalize_punctuation(
        text,
    ))))
}

/// Step 1: normalize full-width punctuation.
///
/// Pre: raw text. Post: no full-width punctuation marks remain; no LaTeX
/// syntax has been introduced yet.
pub fn normalize_punctuation(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match FULLWIDTH_PUNCTUATION.iter().find(|(from, _)| *from == ch) {
            Some((_, to)) => out.push(*to),
            None => out.push(ch),
        }
    }
    out
}

/// Step 2: escape the reserved characters `\ % ~ & _ ^ $ # { }`.
///
/// A single pass over the original characters, which is equivalent to
/// escaping the backslash first: control sequences inserted by the
/// replacements are never re-examined, so their backslashes and braces are
/// not escaped again. Must run before steps 3 and 4, which insert control
/// sequences of their own.
pub fn escape_reserved(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\\' => out.push_str("\\textbackslash{}"),
            '%' => out.push_str("\\%"),
            '~' => out.push_str("\\textasciitilde{}"),
            '&' => out.push_str("\\&"),
            '_' => out.push_str("\\_"),
            '^' => out.push_str("\\textasciicircum{}"),
            '$' => out.push_str("\\$"),
            '#' => out.push_str("\\#"),
            '{' => out.push_str("\\{"),
            '}' => out.push_str("\\}"),
            _ => out.push(ch),
        }
    }
    out
}

/// Step 3: substitute Greek letters.
///
/// Pre: reserved characters already escaped. Post: no Greek letters remain;
/// every inserted control sequence ends in `{}` so it cannot swallow the
/// character that follows it.
pub fn substitute_greek(text: &str) -> String {
    substitute_from(text, &GREEK_LETTERS)
}

/// Step 4: substitute mathematical and logical symbols.
///
/// Same invariants as step 3. Runs last; the sequences inserted by step 3
/// contain only ASCII letters and braces, which this step never matches.
pub fn substitute_symbols(text: &str) -> String {
    substitute_from(text, &MATH_SYMBOLS)
}

fn substitute_from(text: &str, map: &phf::Map<char, &'static str>) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match map.get(&ch) {
            Some(command) => {
                out.push_str(command);
                out.push_str("{}");
            }
            None => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_normalize_punctuation() {
        assert_eq!(normalize_punctuation("です、ます。"), "です，ます．");
    }

    #[test]
    fn test_reserved_characters_escaped_once() {
        assert_eq!(escape_reserved("50% & 3_2"), "50\\% \\& 3\\_2");
    }

    #[test]
    fn test_backslash_not_double_escaped() {
        // The backslashes inserted for % and _ must survive untouched.
        assert_eq!(escape_reserved("\\%"), "\\textbackslash{}\\%");
    }

    #[test]
    fn test_inserted_braces_survive() {
        assert_eq!(escape_reserved("~"), "\\textasciitilde{}");
        assert_eq!(escape_reserved("^"), "\\textasciicircum{}");
    }

    #[test]
    fn test_greek_substitution() {
        assert_eq!(escape_text("α"), "\\alpha{}");
        assert_eq!(escape_text("αβ"), "\\alpha{}\\beta{}");
        assert_eq!(escape_text("Ω unit"), "\\Omega{} unit");
    }

    #[test]
    fn test_symbol_substitution() {
        assert_eq!(escape_text("x ≤ y"), "x \\leq{} y");
        assert_eq!(escape_text("a → b"), "a \\to{} b");
    }

    #[test]
    fn test_greek_not_mangled_by_reserved_escaping() {
        // Greek runs after the reserved step, so the inserted backslash
        // survives even when the text also contains reserved characters.
        assert_eq!(escape_text("α_1"), "\\alpha{}\\_1");
    }

    #[test]
    fn test_full_pipeline() {
        assert_eq!(escape_text("Value: 50%"), "Value: 50\\%");
        assert_eq!(escape_text("50% & 3_2"), "50\\% \\& 3\\_2");
    }

    #[test]
    fn test_double_run_is_not_safe() {
        // Documents the non-idempotence: running the pipeline on its own
        // output mangles the inserted control sequences.
        let once = escape_text("α");
        let twice = escape_text(&once);
        assert_ne!(once, twice);
    }
}
