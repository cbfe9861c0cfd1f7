//! Export settings
//!
//! Configuration owned by the caller and read-only to the core. A fresh
//! [`crate::Compiler`] borrows one `Settings` value per export; nothing in
//! here is mutated by the compile pass.

use crate::data::constants::{DEFAULT_POSTAMBLE, DEFAULT_PREAMBLE};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How image URLs in the tree are rewritten into `\includegraphics` paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum ImagePathMode {
    /// Keep the path as given, relative to the vault/project root.
    #[default]
    RelativeToRoot,
    /// Resolve against the vault root to an absolute path.
    FullPath,
    /// Strip directories, keep only the file name.
    BaseName,
    /// Rewrite relative to the export directory.
    RelativeToExport,
}

/// Options for a single export.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct Settings {
    /// Command used for cross-references (`cref`, `ref`, `autoref`, ...).
    pub ref_command: String,
    /// Wrap display math without its own environment in `equation` instead
    /// of `\[ ... \]`.
    pub default_to_equation: bool,
    /// Environments (beyond the amsmath ones) whose math blocks pass
    /// through verbatim.
    pub additional_math_environments: Vec<String>,
    /// Emit `\label` directives for labeled nodes.
    pub generate_labels: bool,
    /// Collapse runs of blank lines in the finished body.
    pub compress_newlines: bool,
    /// Image URL rewriting mode.
    pub image_path_mode: ImagePathMode,
    /// Number sections (`\section`) or not (`\section*`).
    pub numbered_sections: bool,
    /// Emit `\caption` commands for tables and figures.
    pub generate_captions: bool,
    /// Float placement for figures (e.g. `h`, `H`, `htbp`).
    pub figure_position: String,
    /// Float placement for tables.
    pub table_position: String,
    /// Template text placed before the generated body.
    pub preamble: String,
    /// Template text placed after the generated body.
    pub postamble: String,
    /// Vault/project root, consulted by some image path modes.
    pub vault_root: Option<String>,
    /// Export target directory, consulted by `RelativeToExport`.
    pub export_dir: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            ref_command: "cref".to_string(),
            default_to_equation: false,
            additional_math_environments: Vec::new(),
            generate_labels: true,
            compress_newlines: false,
            image_path_mode: ImagePathMode::RelativeToRoot,
            numbered_sections: true,
            generate_captions: true,
            figure_position: "h".to_string(),
            table_position: "H".to_string(),
            preamble: DEFAULT_PREAMBLE.to_string(),
            postamble: DEFAULT_POSTAMBLE.to_string(),
            vault_root: None,
            export_dir: None,
        }
    }
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.ref_command, "cref");
        assert!(settings.numbered_sections);
        assert!(settings.generate_captions);
        assert!(settings.preamble.contains("\\documentclass"));
        assert!(settings.postamble.contains("\\end{document}"));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_partial_settings_json() {
        // Missing fields fall back to defaults, mirroring partial settings
        // records stored by older versions.
        let settings: Settings =
            serde_json::from_str(r#"{ "refCommand": "autoref", "numberedSections": false }"#)
                .expect("valid settings JSON");
        assert_eq!(settings.ref_command, "autoref");
        assert!(!settings.numbered_sections);
        assert!(settings.generate_labels);
    }
}
