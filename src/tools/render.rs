use crate::mcp::contracts::{
    PARAM_HEIGHT, PARAM_SVG_CODE, PARAM_WIDTH, TOOL_RENDER_SVG, render_svg_params,
};
use crate::mcp::errors;
use crate::params::Arguments;
use crate::registry::{DispatchError, ToolDescriptor};
use crate::svg::{raster, validate};
use crate::tools::{ToolContext, error_result, image_result, reject_oversized};
use serde_json::Value;

const DOING: &str = "rendering SVG";

pub fn descriptor() -> ToolDescriptor {
    ToolDescriptor {
        name: TOOL_RENDER_SVG,
        title: "Render SVG",
        description: "Render SVG code to a PNG image. The SVG must be well-formed with an <svg> root.",
        params: render_svg_params(),
    }
}

/// Structurally invalid input is rejected as a bad request, before any
/// rasterization is attempted.
pub fn call(args: &Arguments, _ctx: &ToolContext) -> Result<Value, DispatchError> {
    let svg = args.require_str(PARAM_SVG_CODE)?;
    if let Some(rejected) = reject_oversized(TOOL_RENDER_SVG, DOING, svg) {
        return Ok(rejected);
    }

    let verdict = validate::validate(svg);
    if !verdict.valid {
        return Err(DispatchError::InvalidSvgStructure(verdict.errors.join("; ")));
    }

    match raster::rasterize(svg, args.number(PARAM_WIDTH), args.number(PARAM_HEIGHT)) {
        Ok(png) => Ok(image_result(&png, "image/png")),
        Err(err) => Ok(error_result(
            errors::PROCESSING_FAILED,
            TOOL_RENDER_SVG,
            DOING,
            err.to_string(),
        )),
    }
}
