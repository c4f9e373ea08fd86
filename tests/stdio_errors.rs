use std::io::{BufRead, BufReader, Write};
use std::process::{Command, Stdio};

fn send_request(
    stdin: &mut std::process::ChildStdin,
    stdout: &mut BufReader<std::process::ChildStdout>,
    request: serde_json::Value,
) -> Result<serde_json::Value, Box<dyn std::error::Error>> {
    let serialized = serde_json::to_string(&request)?;
    writeln!(stdin, "{serialized}")?;
    stdin.flush()?;

    let mut line = String::new();
    stdout.read_line(&mut line)?;
    let response: serde_json::Value = serde_json::from_str(line.trim())?;
    Ok(response)
}

fn call(id: u64, name: &str, arguments: serde_json::Value) -> serde_json::Value {
    serde_json::json!({
        "jsonrpc": "2.0",
        "id": id,
        "method": "tools/call",
        "params": { "name": name, "arguments": arguments }
    })
}

#[test]
fn dispatch_and_handler_failures() -> Result<(), Box<dyn std::error::Error>> {
    let mut child = Command::new(env!("CARGO_BIN_EXE_mcp-svg"))
        .arg("serve")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()?;

    let mut stdin = child.stdin.take().expect("stdin available");
    let mut stdout = BufReader::new(child.stdout.take().expect("stdout available"));

    // Garbage lines are skipped without a reply.
    writeln!(stdin, "this is not json")?;

    let response = send_request(
        &mut stdin,
        &mut stdout,
        call(1, "save_svg", serde_json::json!({"svg_code": "<svg/>"})),
    )?;
    assert_eq!(response.get("id").and_then(|v| v.as_i64()), Some(1));
    assert_eq!(
        response.pointer("/error/code").and_then(|v| v.as_i64()),
        Some(-32602)
    );
    assert!(
        response
            .pointer("/error/message")
            .and_then(|v| v.as_str())
            .is_some_and(|message| message.contains("filename"))
    );

    let response = send_request(
        &mut stdin,
        &mut stdout,
        call(2, "svg_to_gif", serde_json::json!({"svg_code": "<svg/>"})),
    )?;
    assert_eq!(
        response.pointer("/error/code").and_then(|v| v.as_i64()),
        Some(-32602)
    );

    let response = send_request(
        &mut stdin,
        &mut stdout,
        call(3, "render_svg", serde_json::json!({"svg_code": "<svg/>", "width": "wide"})),
    )?;
    assert_eq!(
        response.pointer("/error/code").and_then(|v| v.as_i64()),
        Some(-32602)
    );

    let response = send_request(
        &mut stdin,
        &mut stdout,
        call(
            4,
            "svg_to_data_uri",
            serde_json::json!({"svg_code": "<svg/>", "unexpected": 1}),
        ),
    )?;
    assert_eq!(
        response.pointer("/result/content/0/text").and_then(|v| v.as_str()),
        Some("data:image/svg+xml;base64,PHN2Zy8+")
    );

    let response = send_request(
        &mut stdin,
        &mut stdout,
        call(5, "optimize_svg", serde_json::json!({"svg_code": "<svg><g></svg>"})),
    )?;
    let result = response.get("result").expect("handler failure is a result");
    assert_eq!(result.get("isError").and_then(|v| v.as_bool()), Some(true));
    assert!(
        result
            .pointer("/content/0/text")
            .and_then(|v| v.as_str())
            .is_some_and(|text| text.starts_with("Error optimizing SVG: "))
    );

    let response = send_request(
        &mut stdin,
        &mut stdout,
        serde_json::json!({"jsonrpc": "2.0", "id": 6, "method": "prompts/list"}),
    )?;
    assert_eq!(
        response.pointer("/error/code").and_then(|v| v.as_i64()),
        Some(-32601)
    );

    let _ = child.kill();
    Ok(())
}
