use crate::mcp::contracts::MAX_SVG_INPUT_BYTES;
use crate::mcp::errors;
use crate::registry::{DispatchError, ToolRegistry};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde_json::json;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub mod data_uri;
pub mod format;
pub mod metadata;
pub mod optimize;
pub mod react;
pub mod render;
pub mod save;
pub mod to_pdf;
pub mod validate;

/// Process-wide settings handed to every handler.
#[derive(Debug, Clone)]
pub struct ToolContext {
    pub work_dir: PathBuf,
    pub output_dir: PathBuf,
}

impl ToolContext {
    pub fn new(work_dir: PathBuf, output_dir: PathBuf) -> Self {
        let output_dir = if output_dir.is_absolute() {
            output_dir
        } else {
            work_dir.join(output_dir)
        };
        Self {
            work_dir,
            output_dir,
        }
    }

    /// Absolute path for `path`, relative paths being taken from the work dir.
    pub fn resolve(&self, path: &Path) -> io::Result<PathBuf> {
        std::path::absolute(self.work_dir.join(path))
    }
}

pub fn registry() -> Result<ToolRegistry, DispatchError> {
    let mut registry = ToolRegistry::new();
    registry.register(render::descriptor(), render::call)?;
    registry.register(save::descriptor(), save::call)?;
    registry.register(optimize::descriptor(), optimize::call)?;
    registry.register(format::descriptor(), format::call)?;
    registry.register(react::web_descriptor(), react::call_web)?;
    registry.register(react::native_descriptor(), react::call_native)?;
    registry.register(data_uri::descriptor(), data_uri::call)?;
    registry.register(to_pdf::descriptor(), to_pdf::call)?;
    registry.register(validate::descriptor(), validate::call)?;
    registry.register(metadata::descriptor(), metadata::call)?;
    Ok(registry)
}

pub fn text_result(text: impl Into<String>) -> serde_json::Value {
    json!({
        "content": [{"type": "text", "text": text.into()}],
        "isError": false
    })
}

pub fn structured_result(structured: serde_json::Value) -> serde_json::Value {
    json!({
        "content": [{"type": "text", "text": structured.to_string()}],
        "structuredContent": structured,
        "isError": false
    })
}

pub fn image_result(bytes: &[u8], mime_type: &str) -> serde_json::Value {
    json!({
        "content": [{
            "type": "image",
            "data": STANDARD.encode(bytes),
            "mimeType": mime_type
        }],
        "isError": false
    })
}

/// Envelope for a failed handler. `doing` completes "Error <doing>: ...".
pub fn error_result(
    kind: &'static str,
    tool: &str,
    doing: &str,
    message: impl Into<String>,
) -> serde_json::Value {
    let message = message.into();
    tracing::warn!(tool, kind, %message, "tool failed");
    json!({
        "content": [{"type": "text", "text": format!("Error {doing}: {message}")}],
        "structuredContent": {
            "error": {
                "kind": kind,
                "message": message,
                "source": tool
            }
        },
        "isError": true
    })
}

pub(crate) fn reject_oversized(tool: &str, doing: &str, svg: &str) -> Option<serde_json::Value> {
    let len = svg.len();
    (len > MAX_SVG_INPUT_BYTES).then(|| {
        error_result(
            errors::TOO_LARGE,
            tool,
            doing,
            format!("input exceeds limit: {len} bytes (max {MAX_SVG_INPUT_BYTES})"),
        )
    })
}

/// Writes `bytes` to `path`, creating missing parent directories.
pub(crate) fn write_output(path: &Path, bytes: &[u8]) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, bytes)
}
