use std::io::{BufRead, BufReader, Write};
use std::process::{Command, Stdio};

#[test]
fn tools_list_advertises_every_tool() -> Result<(), Box<dyn std::error::Error>> {
    let mut child = Command::new(env!("CARGO_BIN_EXE_mcp-svg"))
        .arg("serve")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()?;

    let mut stdin = child.stdin.take().expect("stdin available");
    let mut stdout = BufReader::new(child.stdout.take().expect("stdout available"));

    let request = serde_json::json!({
        "jsonrpc": "2.0",
        "id": 2,
        "method": "tools/list",
        "params": {}
    });
    writeln!(stdin, "{}", serde_json::to_string(&request)?)?;
    stdin.flush()?;

    let mut line = String::new();
    stdout.read_line(&mut line)?;
    let response: serde_json::Value = serde_json::from_str(line.trim())?;

    let tools = response
        .get("result")
        .and_then(|v| v.get("tools"))
        .and_then(|v| v.as_array())
        .expect("tools array present");

    let names: Vec<&str> = tools
        .iter()
        .filter_map(|tool| tool.get("name").and_then(|v| v.as_str()))
        .collect();
    assert_eq!(
        names,
        vec![
            "render_svg",
            "save_svg",
            "optimize_svg",
            "format_svg",
            "svg_to_react",
            "svg_to_react_native",
            "svg_to_data_uri",
            "svg_to_pdf",
            "validate_svg",
            "get_svg_metadata",
        ]
    );

    for tool in tools {
        assert!(tool.get("description").and_then(|v| v.as_str()).is_some());
        let schema = tool.get("inputSchema").expect("inputSchema present");
        assert_eq!(schema.get("type").and_then(|v| v.as_str()), Some("object"));
        let required = schema
            .get("required")
            .and_then(|v| v.as_array())
            .expect("required list");
        assert!(required.iter().any(|v| v.as_str() == Some("svg_code")));
    }

    let _ = child.kill();
    Ok(())
}
