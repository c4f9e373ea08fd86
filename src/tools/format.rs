use crate::mcp::contracts::{FORMAT_INDENT, PARAM_SVG_CODE, TOOL_FORMAT_SVG, svg_only_params};
use crate::mcp::errors;
use crate::params::Arguments;
use crate::registry::{DispatchError, ToolDescriptor};
use crate::svg::pretty;
use crate::tools::{ToolContext, error_result, reject_oversized, text_result};
use serde_json::Value;

const DOING: &str = "formatting SVG";

pub fn descriptor() -> ToolDescriptor {
    ToolDescriptor {
        name: TOOL_FORMAT_SVG,
        title: "Format SVG",
        description: "Pretty-print SVG code with two-space indentation.",
        params: svg_only_params(),
    }
}

pub fn call(args: &Arguments, _ctx: &ToolContext) -> Result<Value, DispatchError> {
    let svg = args.require_str(PARAM_SVG_CODE)?;
    if let Some(rejected) = reject_oversized(TOOL_FORMAT_SVG, DOING, svg) {
        return Ok(rejected);
    }

    Ok(match pretty::format(svg, FORMAT_INDENT) {
        Ok(formatted) => text_result(formatted),
        Err(err) => error_result(
            errors::PROCESSING_FAILED,
            TOOL_FORMAT_SVG,
            DOING,
            err.to_string(),
        ),
    })
}
