use crate::mcp::contracts::{PARAM_SVG_CODE, TOOL_VALIDATE_SVG, svg_only_params};
use crate::params::Arguments;
use crate::registry::{DispatchError, ToolDescriptor};
use crate::svg::validate;
use crate::tools::{ToolContext, reject_oversized, structured_result};
use serde_json::{Value, json};

pub fn descriptor() -> ToolDescriptor {
    ToolDescriptor {
        name: TOOL_VALIDATE_SVG,
        title: "Validate SVG",
        description: "Check that SVG code is well-formed XML with an <svg> root; non-standard tags are reported as warnings.",
        params: svg_only_params(),
    }
}

pub fn call(args: &Arguments, _ctx: &ToolContext) -> Result<Value, DispatchError> {
    let svg = args.require_str(PARAM_SVG_CODE)?;
    if let Some(rejected) = reject_oversized(TOOL_VALIDATE_SVG, "validating SVG", svg) {
        return Ok(rejected);
    }
    let verdict = validate::validate(svg);
    Ok(structured_result(json!(verdict)))
}
