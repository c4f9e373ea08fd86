use crate::mcp::contracts::{
    PARAM_FILENAME, PARAM_OPTIMIZE, PARAM_SVG_CODE, TOOL_SAVE_SVG, save_svg_params,
};
use crate::mcp::errors;
use crate::params::Arguments;
use crate::registry::{DispatchError, ToolDescriptor};
use crate::svg::minify;
use crate::tools::{ToolContext, error_result, reject_oversized, text_result, write_output};
use serde_json::Value;
use std::path::Path;
use tracing::info;

const DOING: &str = "saving SVG";

pub fn descriptor() -> ToolDescriptor {
    ToolDescriptor {
        name: TOOL_SAVE_SVG,
        title: "Save SVG",
        description: "Save SVG code to a file, optionally minified first. Returns the absolute path written.",
        params: save_svg_params(),
    }
}

pub fn call(args: &Arguments, ctx: &ToolContext) -> Result<Value, DispatchError> {
    let svg = args.require_str(PARAM_SVG_CODE)?;
    let filename = args.require_str(PARAM_FILENAME)?;
    let optimize = args.boolean(PARAM_OPTIMIZE).unwrap_or(true);

    if let Some(rejected) = reject_oversized(TOOL_SAVE_SVG, DOING, svg) {
        return Ok(rejected);
    }
    if filename.trim().is_empty() {
        return Ok(error_result(
            errors::INVALID_INPUT,
            TOOL_SAVE_SVG,
            DOING,
            "filename must not be empty",
        ));
    }

    let contents = if optimize {
        match minify::minify(svg) {
            Ok(minified) => minified,
            Err(err) => {
                return Ok(error_result(
                    errors::PROCESSING_FAILED,
                    TOOL_SAVE_SVG,
                    DOING,
                    err.to_string(),
                ));
            }
        }
    } else {
        svg.to_string()
    };

    let path = match ctx.resolve(Path::new(&with_svg_extension(filename))) {
        Ok(path) => path,
        Err(err) => {
            return Ok(error_result(
                errors::INVALID_INPUT,
                TOOL_SAVE_SVG,
                DOING,
                format!("cannot resolve output path: {err}"),
            ));
        }
    };

    if let Err(err) = write_output(&path, contents.as_bytes()) {
        return Ok(error_result(
            errors::IO_FAILED,
            TOOL_SAVE_SVG,
            DOING,
            format!("failed to write {}: {err}", path.display()),
        ));
    }

    info!(path = %path.display(), bytes = contents.len(), "saved svg");
    Ok(text_result(path.to_string_lossy()))
}

fn with_svg_extension(filename: &str) -> String {
    if filename.to_ascii_lowercase().ends_with(".svg") {
        filename.to_string()
    } else {
        format!("{filename}.svg")
    }
}
