//! Unicode symbol mappings for LaTeX text output
//!
//! Static tables consumed by the escaping pipeline: Greek letters and
//! mathematical/logical symbols that appear in prose text are rewritten to
//! their LaTeX control-sequence equivalents. Every replacement carries an
//! empty-group terminator (`{}`) at the call site so the control sequence
//! cannot swallow adjacent characters.

use phf::phf_map;

/// Greek letters (24 lower case plus the matching upper-case identifiers)
/// mapped to LaTeX control sequences.
pub static GREEK_LETTERS: phf::Map<char, &'static str> = phf_map! {
    'α' => "\\alpha",
    'β' => "\\beta",
    'γ' => "\\gamma",
    'δ' => "\\delta",
    'ε' => "\\epsilon",
    'ζ' => "\\zeta",
    'η' => "\\eta",
    'θ' => "\\theta",
    'ι' => "\\iota",
    'κ' => "\\kappa",
    'λ' => "\\lambda",
    'μ' => "\\mu",
    'ν' => "\\nu",
    'ξ' => "\\xi",
    'ο' => "\\omicron",
    'π' => "\\pi",
    'ρ' => "\\rho",
    'σ' => "\\sigma",
    'τ' => "\\tau",
    'υ' => "\\upsilon",
    'φ' => "\\phi",
    'χ' => "\\chi",
    'ψ' => "\\psi",
    'ω' => "\\omega",
    'Α' => "\\Alpha",
    'Β' => "\\Beta",
    'Γ' => "\\Gamma",
    'Δ' => "\\Delta",
    'Ε' => "\\Epsilon",
    'Ζ' => "\\Zeta",
    'Η' => "\\Eta",
    'Θ' => "\\Theta",
    'Ι' => "\\Iota",
    'Κ' => "\\Kappa",
    'Λ' => "\\Lambda",
    'Μ' => "\\Mu",
    'Ν' => "\\Nu",
    'Ξ' => "\\Xi",
    'Ο' => "\\Omicron",
    'Π' => "\\Pi",
    'Ρ' => "\\Rho",
    'Σ' => "\\Sigma",
    'Τ' => "\\Tau",
    'Υ' => "\\Upsilon",
    'Φ' => "\\Phi",
    'Χ' => "\\Chi",
    'Ψ' => "\\Psi",
    'Ω' => "\\Omega",
};

/// Mathematical and logical symbols mapped to LaTeX control sequences.
pub static MATH_SYMBOLS: phf::Map<char, &'static str> = phf_map! {
    '≤' => "\\leq",
    '≥' => "\\geq",
    '≠' => "\\neq",
    '≈' => "\\approx",
    '≡' => "\\equiv",
    '∞' => "\\infty",
    '∑' => "\\sum",
    '∏' => "\\prod",
    '∫' => "\\int",
    '∮' => "\\oint",
    '√' => "\\sqrt",
    '∂' => "\\partial",
    '∇' => "\\nabla",
    '∆' => "\\Delta",
    '∈' => "\\in",
    '∉' => "\\notin",
    '⊂' => "\\subset",
    '⊆' => "\\subseteq",
    '⊃' => "\\supset",
    '⊇' => "\\supseteq",
    '∩' => "\\cap",
    '∪' => "\\cup",
    '∧' => "\\wedge",
    '∨' => "\\vee",
    '¬' => "\\neg",
    '∀' => "\\forall",
    '∃' => "\\exists",
    '⇒' => "\\implies",
    '⇔' => "\\iff",
    '→' => "\\to",
    '←' => "\\leftarrow",
    '↑' => "\\uparrow",
    '↓' => "\\downarrow",
    '↔' => "\\leftrightarrow",
    '±' => "\\pm",
    '×' => "\\times",
    '÷' => "\\div",
    '⋅' => "\\cdot",
    '°' => "\\degree",
    '′' => "\\prime",
    '″' => "\\dprime",
    '‴' => "\\trprime",
};

/// Full-width punctuation normalized before any escaping happens.
pub const FULLWIDTH_PUNCTUATION: &[(char, char)] = &[('、', '，'), ('。', '．')];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_greek_coverage() {
        // 24 lower + 24 upper
        assert_eq!(GREEK_LETTERS.len(), 48);
        assert_eq!(GREEK_LETTERS.get(&'α'), Some(&"\\alpha"));
        assert_eq!(GREEK_LETTERS.get(&'Ω'), Some(&"\\Omega"));
    }

    #[test]
    fn test_symbol_lookup() {
        assert_eq!(MATH_SYMBOLS.get(&'≤'), Some(&"\\leq"));
        assert_eq!(MATH_SYMBOLS.get(&'→'), Some(&"\\to"));
        assert!(MATH_SYMBOLS.get(&'a').is_none());
    }
}
