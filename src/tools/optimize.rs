use crate::mcp::contracts::{PARAM_SVG_CODE, TOOL_OPTIMIZE_SVG, svg_only_params};
use crate::mcp::errors;
use crate::params::Arguments;
use crate::registry::{DispatchError, ToolDescriptor};
use crate::svg::minify;
use crate::tools::{ToolContext, error_result, reject_oversized, text_result};
use serde_json::Value;

const DOING: &str = "optimizing SVG";

pub fn descriptor() -> ToolDescriptor {
    ToolDescriptor {
        name: TOOL_OPTIMIZE_SVG,
        title: "Optimize SVG",
        description: "Minify SVG code: strip comments, metadata, editor data and insignificant whitespace.",
        params: svg_only_params(),
    }
}

pub fn call(args: &Arguments, _ctx: &ToolContext) -> Result<Value, DispatchError> {
    let svg = args.require_str(PARAM_SVG_CODE)?;
    if let Some(rejected) = reject_oversized(TOOL_OPTIMIZE_SVG, DOING, svg) {
        return Ok(rejected);
    }

    Ok(match minify::minify(svg) {
        Ok(minified) => text_result(minified),
        Err(err) => error_result(
            errors::PROCESSING_FAILED,
            TOOL_OPTIMIZE_SVG,
            DOING,
            err.to_string(),
        ),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::test_support::{args, context, is_error, text};
    use serde_json::json;
    use tempfile::tempdir;

    fn optimize(svg: &str) -> Value {
        let dir = tempdir().expect("tempdir");
        let descriptor = descriptor();
        call(&args(&descriptor, json!({"svg_code": svg})), &context(dir.path())).expect("call")
    }

    #[test]
    fn output_is_stable_under_repetition() {
        let first = optimize(
            "<svg xmlns=\"http://www.w3.org/2000/svg\">\n  <!-- badge -->\n  <g fill=\"#FFFFFF\">\n    <circle cx=\"6\" cy=\"6\" r=\"5.50\"/>\n  </g>\n</svg>",
        );
        assert!(!is_error(&first));
        let once = text(&first).to_string();
        assert!(!once.contains("<!--"));
        let second = optimize(&once);
        assert_eq!(text(&second), once);
    }

    #[test]
    fn malformed_input_is_error_envelope() {
        let result = optimize("<svg><g></svg>");
        assert!(is_error(&result));
        assert!(text(&result).starts_with("Error optimizing SVG: XML syntax error"));
    }
}
