use crate::mcp::contracts::{PARAM_SVG_CODE, TOOL_SVG_TO_PDF, svg_only_params};
use crate::mcp::errors;
use crate::params::Arguments;
use crate::registry::{DispatchError, ToolDescriptor};
use crate::svg::pdf;
use crate::tools::{ToolContext, error_result, reject_oversized, text_result, write_output};
use serde_json::Value;
use std::path::Path;
use tracing::info;
use uuid::Uuid;

const DOING: &str = "converting SVG to PDF";

pub fn descriptor() -> ToolDescriptor {
    ToolDescriptor {
        name: TOOL_SVG_TO_PDF,
        title: "SVG to PDF",
        description: "Convert SVG code to a PDF file in the output directory. Returns the absolute path written.",
        params: svg_only_params(),
    }
}

pub fn call(args: &Arguments, ctx: &ToolContext) -> Result<Value, DispatchError> {
    let svg = args.require_str(PARAM_SVG_CODE)?;
    if let Some(rejected) = reject_oversized(TOOL_SVG_TO_PDF, DOING, svg) {
        return Ok(rejected);
    }

    let document = match pdf::convert(svg) {
        Ok(document) => document,
        Err(err) => {
            return Ok(error_result(
                errors::PROCESSING_FAILED,
                TOOL_SVG_TO_PDF,
                DOING,
                err.to_string(),
            ));
        }
    };

    let filename = format!("svg-{}.pdf", Uuid::new_v4());
    let path = match ctx.resolve(&ctx.output_dir.join(Path::new(&filename))) {
        Ok(path) => path,
        Err(err) => {
            return Ok(error_result(
                errors::IO_FAILED,
                TOOL_SVG_TO_PDF,
                DOING,
                format!("cannot resolve output path: {err}"),
            ));
        }
    };

    if let Err(err) = write_output(&path, &document) {
        return Ok(error_result(
            errors::IO_FAILED,
            TOOL_SVG_TO_PDF,
            DOING,
            format!("failed to write {}: {err}", path.display()),
        ));
    }

    info!(path = %path.display(), bytes = document.len(), "wrote pdf");
    Ok(text_result(path.to_string_lossy()))
}
