use crate::params::{ParamKind, ParamSpec};
use serde_json::json;

pub const TOOL_RENDER_SVG: &str = "render_svg";
pub const TOOL_SAVE_SVG: &str = "save_svg";
pub const TOOL_OPTIMIZE_SVG: &str = "optimize_svg";
pub const TOOL_FORMAT_SVG: &str = "format_svg";
pub const TOOL_SVG_TO_REACT: &str = "svg_to_react";
pub const TOOL_SVG_TO_REACT_NATIVE: &str = "svg_to_react_native";
pub const TOOL_SVG_TO_DATA_URI: &str = "svg_to_data_uri";
pub const TOOL_SVG_TO_PDF: &str = "svg_to_pdf";
pub const TOOL_VALIDATE_SVG: &str = "validate_svg";
pub const TOOL_GET_SVG_METADATA: &str = "get_svg_metadata";

pub const PARAM_SVG_CODE: &str = "svg_code";
pub const PARAM_WIDTH: &str = "width";
pub const PARAM_HEIGHT: &str = "height";
pub const PARAM_FILENAME: &str = "filename";
pub const PARAM_OPTIMIZE: &str = "optimize";
pub const PARAM_COMPONENT_NAME: &str = "component_name";

pub const DEFAULT_COMPONENT_NAME: &str = "SvgComponent";
pub const FORMAT_INDENT: usize = 2;
pub const MAX_SVG_INPUT_BYTES: usize = 20 * 1024 * 1024;

fn svg_code() -> ParamSpec {
    ParamSpec::required(PARAM_SVG_CODE, ParamKind::String, "SVG source code")
}

fn component_name() -> ParamSpec {
    ParamSpec::with_default(
        PARAM_COMPONENT_NAME,
        ParamKind::String,
        "Name of the generated component",
        json!(DEFAULT_COMPONENT_NAME),
    )
}

pub fn render_svg_params() -> Vec<ParamSpec> {
    vec![
        svg_code(),
        ParamSpec::optional(PARAM_WIDTH, ParamKind::Number, "Output width in pixels"),
        ParamSpec::optional(PARAM_HEIGHT, ParamKind::Number, "Output height in pixels"),
    ]
}

pub fn save_svg_params() -> Vec<ParamSpec> {
    vec![
        svg_code(),
        ParamSpec::required(
            PARAM_FILENAME,
            ParamKind::String,
            "Target file name; '.svg' is appended when missing",
        ),
        ParamSpec::with_default(
            PARAM_OPTIMIZE,
            ParamKind::Boolean,
            "Minify before saving",
            json!(true),
        ),
    ]
}

pub fn svg_only_params() -> Vec<ParamSpec> {
    vec![svg_code()]
}

pub fn react_params() -> Vec<ParamSpec> {
    vec![svg_code(), component_name()]
}
