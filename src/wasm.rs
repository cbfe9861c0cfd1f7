//! WASM bindings for mdtex
//!
//! This module provides JavaScript-accessible functions for compiling a
//! parsed document tree (mdast-shaped JSON) to LaTeX.

use wasm_bindgen::prelude::*;

use serde::Serialize;

use crate::features::templates::Frontmatter;
use crate::settings::Settings;
use crate::{compile_document, compile_tree, DocumentNode};

/// Compilation result with metadata, mirrored into a plain JS object.
#[derive(Serialize)]
pub struct CompileResponse {
    /// The generated LaTeX
    pub output: String,
    /// Whether compilation succeeded
    pub success: bool,
    /// Error message when it did not
    pub error: Option<String>,
    /// Advisory messages collected during the pass
    pub messages: Vec<String>,
}

impl CompileResponse {
    fn failure(error: String) -> Self {
        CompileResponse {
            output: String::new(),
            success: false,
            error: Some(error),
            messages: Vec::new(),
        }
    }
}

/// Install the panic hook for readable stack traces in the browser console.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

fn parse_inputs(
    tree_json: &str,
    settings: JsValue,
) -> Result<(DocumentNode, Settings), String> {
    let tree: DocumentNode =
        serde_json::from_str(tree_json).map_err(|error| format!("invalid tree: {}", error))?;
    let settings: Settings = if settings.is_undefined() || settings.is_null() {
        Settings::default()
    } else {
        serde_wasm_bindgen::from_value(settings)
            .map_err(|error| format!("invalid settings: {}", error))?
    };
    Ok((tree, settings))
}

fn to_js(response: &CompileResponse) -> JsValue {
    serde_wasm_bindgen::to_value(response).unwrap_or(JsValue::NULL)
}

/// Compile a document tree to a LaTeX body.
#[wasm_bindgen]
pub fn compile(tree_json: &str, settings: JsValue) -> JsValue {
    let (tree, settings) = match parse_inputs(tree_json, settings) {
        Ok(inputs) => inputs,
        Err(error) => return to_js(&CompileResponse::failure(error)),
    };
    let result = compile_tree(&tree, &settings, "");
    to_js(&CompileResponse {
        output: result.content,
        success: true,
        error: None,
        messages: result.messages.iter().map(|m| m.to_string()).collect(),
    })
}

/// Compile a document tree to a complete LaTeX document.
#[wasm_bindgen]
pub fn compile_full_document(
    tree_json: &str,
    source: &str,
    settings: JsValue,
    frontmatter: JsValue,
) -> JsValue {
    let (tree, settings) = match parse_inputs(tree_json, settings) {
        Ok(inputs) => inputs,
        Err(error) => return to_js(&CompileResponse::failure(error)),
    };
    let frontmatter: Frontmatter = if frontmatter.is_undefined() || frontmatter.is_null() {
        Frontmatter::new()
    } else {
        match serde_wasm_bindgen::from_value(frontmatter) {
            Ok(frontmatter) => frontmatter,
            Err(error) => {
                return to_js(&CompileResponse::failure(format!(
                    "invalid frontmatter: {}",
                    error
                )))
            }
        }
    };
    let result = compile_document(&tree, &settings, source, &frontmatter);
    to_js(&CompileResponse {
        output: result.content,
        success: true,
        error: None,
        messages: result.messages.iter().map(|m| m.to_string()).collect(),
    })
}
