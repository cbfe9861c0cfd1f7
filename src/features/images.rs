//! Image path handling
//!
//! Image URLs arrive from the tree as the author wrote them; the export
//! settings decide how they appear in `\includegraphics`. Remote URLs are
//! never rewritten.

use std::path::Path;

use crate::settings::{ImagePathMode, Settings};

/// Rewrite an image URL according to the configured path mode.
pub fn resolve_image_path(url: &str, settings: &Settings) -> String {
    if is_remote(url) {
        return url.to_string();
    }
    match settings.image_path_mode {
        ImagePathMode::RelativeToRoot => url.to_string(),
        ImagePathMode::FullPath => match &settings.vault_root {
            Some(root) if Path::new(url).is_relative() => {
                join_normalized(root, url)
            }
            _ => url.to_string(),
        },
        ImagePathMode::BaseName => Path::new(url)
            .file_name()
            .and_then(|name| name.to_str())
            .map(|name| name.to_string())
            .unwrap_or_else(|| url.to_string()),
        ImagePathMode::RelativeToExport => {
            let (Some(root), Some(export)) = (&settings.vault_root, &settings.export_dir) else {
                return url.to_string();
            };
            let absolute = if Path::new(url).is_relative() {
                join_normalized(root, url)
            } else {
                url.to_string()
            };
            relative_to(&absolute, export).unwrap_or(absolute)
        }
    }
}

fn is_remote(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://") || url.starts_with("data:")
}

fn join_normalized(base: &str, relative: &str) -> String {
    let joined = Path::new(base).join(relative);
    joined.to_string_lossy().replace('\\', "/")
}

/// Express `path` relative to `base` by stripping the longest common prefix
/// and climbing with `..` for the remainder of `base`.
fn relative_to(path: &str, base: &str) -> Option<String> {
    let path_parts: Vec<&str> = Path::new(path)
        .iter()
        .filter_map(|part| part.to_str())
        .collect();
    let base_parts: Vec<&str> = Path::new(base)
        .iter()
        .filter_map(|part| part.to_str())
        .collect();

    let common = path_parts
        .iter()
        .zip(base_parts.iter())
        .take_while(|(a, b)| a == b)
        .count();
    if common == 0 {
        return None;
    }

    let mut parts: Vec<&str> = Vec::new();
    for _ in common..base_parts.len() {
        parts.push("..");
    }
    parts.extend(&path_parts[common..]);
    Some(parts.join("/"))
}
