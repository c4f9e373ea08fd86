use crate::mcp::contracts::{PARAM_SVG_CODE, TOOL_GET_SVG_METADATA, svg_only_params};
use crate::mcp::errors;
use crate::params::Arguments;
use crate::registry::{DispatchError, ToolDescriptor};
use crate::svg::metadata;
use crate::tools::{ToolContext, error_result, reject_oversized, structured_result};
use serde_json::{Value, json};

const DOING: &str = "extracting SVG metadata";

pub fn descriptor() -> ToolDescriptor {
    ToolDescriptor {
        name: TOOL_GET_SVG_METADATA,
        title: "Get SVG Metadata",
        description: "Read width, height, viewBox and title from the root <svg> element.",
        params: svg_only_params(),
    }
}

pub fn call(args: &Arguments, _ctx: &ToolContext) -> Result<Value, DispatchError> {
    let svg = args.require_str(PARAM_SVG_CODE)?;
    if let Some(rejected) = reject_oversized(TOOL_GET_SVG_METADATA, DOING, svg) {
        return Ok(rejected);
    }

    Ok(match metadata::extract(svg) {
        Ok(metadata) => structured_result(json!(metadata)),
        Err(err) => error_result(
            errors::INVALID_INPUT,
            TOOL_GET_SVG_METADATA,
            DOING,
            err.to_string(),
        ),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::test_support::{args, context, is_error, text};
    use tempfile::tempdir;

    fn run(svg: &str) -> Value {
        let dir = tempdir().expect("tempdir");
        let descriptor = descriptor();
        call(&args(&descriptor, json!({"svg_code": svg})), &context(dir.path())).expect("call")
    }

    #[test]
    fn returns_metadata_json() {
        let result = run(r#"<svg width="10" height="5"><title>Box</title></svg>"#);
        assert!(!is_error(&result));
        let value: Value = serde_json::from_str(text(&result)).expect("json");
        assert_eq!(value, json!({"width": "10", "height": "5", "title": "Box"}));
    }

    #[test]
    fn malformed_source_is_error_envelope() {
        let result = run("<svg width=10/>");
        assert!(is_error(&result));
        assert!(text(&result).starts_with("Error extracting SVG metadata: "));
    }
}
