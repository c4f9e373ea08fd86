use crate::mcp::contracts::{PARAM_SVG_CODE, TOOL_SVG_TO_DATA_URI, svg_only_params};
use crate::params::Arguments;
use crate::registry::{DispatchError, ToolDescriptor};
use crate::tools::{ToolContext, reject_oversized, text_result};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde_json::Value;

pub const DATA_URI_PREFIX: &str = "data:image/svg+xml;base64,";

pub fn descriptor() -> ToolDescriptor {
    ToolDescriptor {
        name: TOOL_SVG_TO_DATA_URI,
        title: "SVG to Data URI",
        description: "Encode SVG code as a base64 data URI.",
        params: svg_only_params(),
    }
}

pub fn call(args: &Arguments, _ctx: &ToolContext) -> Result<Value, DispatchError> {
    let svg = args.require_str(PARAM_SVG_CODE)?;
    if let Some(rejected) =
        reject_oversized(TOOL_SVG_TO_DATA_URI, "converting SVG to data URI", svg)
    {
        return Ok(rejected);
    }
    Ok(text_result(format!(
        "{DATA_URI_PREFIX}{}",
        STANDARD.encode(svg.as_bytes())
    )))
}
