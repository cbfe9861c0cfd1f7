//! Cross-reference module
//!
//! Labels and references follow one convention: a labeled node emits a
//! `\label{id}` directive right after its own output, and anything pointing
//! at it emits `\<ref_command>{id}` with the command taken from the export
//! settings. Referencing an id that never received a label is not an error
//! at this layer - the caller is responsible for only requesting references
//! to labeled entities.

use fxhash::FxHashSet;

use crate::settings::Settings;

/// Label ids defined during one compile pass. Write-once: ids are recorded
/// when their node is emitted and only ever read back via lookup.
#[derive(Debug, Default)]
pub struct LabelRegistry {
    defined: FxHashSet<String>,
}

impl LabelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a label id and return the directive to emit, or `None` when
    /// label generation is disabled.
    pub fn define(&mut self, settings: &Settings, id: &str) -> Option<String> {
        if !settings.generate_labels {
            return None;
        }
        self.defined.insert(id.to_string());
        Some(label_directive(id))
    }

    /// Whether an id was defined during this pass.
    pub fn is_defined(&self, id: &str) -> bool {
        self.defined.contains(id)
    }
}

/// The label-defining directive for an id.
pub fn label_directive(id: &str) -> String {
    format!("\\label{{{}}}\n", id)
}

/// The reference command for an id, built from the configured convention.
pub fn ref_directive(settings: &Settings, id: &str) -> String {
    format!("\\{}{{{}}}", settings.ref_command, id)
}
