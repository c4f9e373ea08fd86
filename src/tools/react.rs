use crate::mcp::contracts::{
    DEFAULT_COMPONENT_NAME, PARAM_COMPONENT_NAME, PARAM_SVG_CODE, TOOL_SVG_TO_REACT,
    TOOL_SVG_TO_REACT_NATIVE, react_params,
};
use crate::mcp::errors;
use crate::params::Arguments;
use crate::registry::{DispatchError, ToolDescriptor};
use crate::svg::SvgError;
use crate::svg::jsx::{self, Flavor};
use crate::tools::{ToolContext, error_result, reject_oversized, text_result};
use serde_json::Value;

pub fn web_descriptor() -> ToolDescriptor {
    ToolDescriptor {
        name: TOOL_SVG_TO_REACT,
        title: "SVG to React",
        description: "Convert SVG code into a React function component (JSX).",
        params: react_params(),
    }
}

pub fn native_descriptor() -> ToolDescriptor {
    ToolDescriptor {
        name: TOOL_SVG_TO_REACT_NATIVE,
        title: "SVG to React Native",
        description: "Convert SVG code into a React Native component built on react-native-svg.",
        params: react_params(),
    }
}

pub fn call_web(args: &Arguments, _ctx: &ToolContext) -> Result<Value, DispatchError> {
    convert(args, Flavor::Web)
}

pub fn call_native(args: &Arguments, _ctx: &ToolContext) -> Result<Value, DispatchError> {
    convert(args, Flavor::Native)
}

fn convert(args: &Arguments, flavor: Flavor) -> Result<Value, DispatchError> {
    let (tool, doing) = match flavor {
        Flavor::Web => (TOOL_SVG_TO_REACT, "converting SVG to React component"),
        Flavor::Native => (
            TOOL_SVG_TO_REACT_NATIVE,
            "converting SVG to React Native component",
        ),
    };
    let svg = args.require_str(PARAM_SVG_CODE)?;
    let component_name = args
        .str(PARAM_COMPONENT_NAME)
        .unwrap_or(DEFAULT_COMPONENT_NAME);
    if let Some(rejected) = reject_oversized(tool, doing, svg) {
        return Ok(rejected);
    }

    Ok(match jsx::generate(svg, component_name, flavor) {
        Ok(code) => text_result(code),
        Err(err @ (SvgError::Codegen(_) | SvgError::Syntax { .. })) => {
            error_result(errors::INVALID_INPUT, tool, doing, err.to_string())
        }
        Err(err) => error_result(errors::PROCESSING_FAILED, tool, doing, err.to_string()),
    })
}
