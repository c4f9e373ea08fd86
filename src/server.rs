//! Newline-delimited JSON-RPC 2.0 serving over stdio or TCP.
//!
//! Every connection runs the same loop: one request per line, one response
//! line per request that carries an `id`. Notifications get no reply.

use crate::mcp::{self, errors};
use crate::registry::{DispatchError, ToolRegistry};
use crate::tools::ToolContext;
use anyhow::{Context, Result};
use serde_json::{Value, json};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::Arc;
use std::thread;
use tracing::{debug, info, warn};

pub struct Server {
    registry: ToolRegistry,
    context: ToolContext,
}

impl Server {
    pub fn new(registry: ToolRegistry, context: ToolContext) -> Self {
        Self { registry, context }
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    pub fn context(&self) -> &ToolContext {
        &self.context
    }

    pub fn run_stdio(&self) -> Result<()> {
        info!("serving MCP over stdio");
        let stdin = io::stdin();
        let stdout = io::stdout();
        self.serve_connection(stdin.lock(), BufWriter::new(stdout.lock()))
    }

    pub fn run_tcp(self: Arc<Self>, host: &str, port: u16) -> Result<()> {
        let listener = TcpListener::bind((host, port))
            .with_context(|| format!("failed to bind {host}:{port}"))?;
        info!(address = %listener.local_addr()?, "serving MCP over tcp");
        self.serve_listener(listener)
    }

    /// Accepts connections forever, one thread each.
    pub fn serve_listener(self: Arc<Self>, listener: TcpListener) -> Result<()> {
        for stream in listener.incoming() {
            let stream = match stream {
                Ok(stream) => stream,
                Err(err) => {
                    warn!(error = %err, "failed to accept connection");
                    continue;
                }
            };
            let server = Arc::clone(&self);
            thread::spawn(move || {
                let peer = stream
                    .peer_addr()
                    .map(|addr| addr.to_string())
                    .unwrap_or_else(|_| "unknown".to_string());
                info!(%peer, "connection opened");
                if let Err(err) = server.serve_stream(stream) {
                    warn!(%peer, error = %err, "connection failed");
                }
                info!(%peer, "connection closed");
            });
        }
        Ok(())
    }

    fn serve_stream(&self, stream: TcpStream) -> Result<()> {
        let reader = BufReader::new(stream.try_clone().context("failed to clone stream")?);
        self.serve_connection(reader, BufWriter::new(stream))
    }

    pub fn serve_connection<R: BufRead, W: Write>(&self, reader: R, mut writer: W) -> Result<()> {
        for line in reader.lines() {
            let line = line.context("failed to read request")?;
            if line.trim().is_empty() {
                continue;
            }

            let request: Value = match serde_json::from_str(&line) {
                Ok(value) => value,
                Err(err) => {
                    warn!(error = %err, "skipping unparseable message");
                    continue;
                }
            };

            if let Some(response) = self.handle_message(&request) {
                let serialized =
                    serde_json::to_string(&response).context("failed to serialize response")?;
                writeln!(writer, "{serialized}").context("failed to write response")?;
                writer.flush().context("failed to flush response")?;
            }
        }
        Ok(())
    }

    /// Response for one decoded message, or `None` for notifications.
    pub fn handle_message(&self, request: &Value) -> Option<Value> {
        let method = request.get("method").and_then(|value| value.as_str());
        let id = request.get("id").cloned();
        let (Some(method), Some(id)) = (method, id) else {
            if let Some(method) = method {
                debug!(method, "ignoring notification");
            }
            return None;
        };

        let response = match method {
            "initialize" => mcp::response(id, mcp::initialize_result()),
            "ping" => mcp::response(id, json!({})),
            "tools/list" => mcp::response(id, json!({"tools": self.registry.definitions()})),
            "tools/call" => match self.call_tool(request.get("params")) {
                Ok(result) => mcp::response(id, result),
                Err(err) => mcp::error_response(id, errors::INVALID_PARAMS, err.to_string()),
            },
            other => {
                warn!(method = other, "unknown method");
                mcp::error_response(
                    id,
                    errors::METHOD_NOT_FOUND,
                    format!("method not found: {other}"),
                )
            }
        };
        Some(response)
    }

    fn call_tool(&self, params: Option<&Value>) -> Result<Value, DispatchError> {
        let Some(params) = params.and_then(|value| value.as_object()) else {
            return Err(DispatchError::MalformedArguments(
                "params must be an object".to_string(),
            ));
        };
        let Some(name) = params.get("name").and_then(|value| value.as_str()) else {
            return Err(DispatchError::MalformedArguments(
                "params.name must be a string".to_string(),
            ));
        };
        self.registry
            .dispatch(name, params.get("arguments"), &self.context)
    }
}
