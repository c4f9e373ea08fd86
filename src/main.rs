use anyhow::{Context, Result};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use clap::{Args, Parser, Subcommand, ValueEnum};
use mcp::contracts::{
    PARAM_COMPONENT_NAME, PARAM_HEIGHT, PARAM_SVG_CODE, PARAM_WIDTH, TOOL_FORMAT_SVG,
    TOOL_GET_SVG_METADATA, TOOL_OPTIMIZE_SVG, TOOL_RENDER_SVG, TOOL_SVG_TO_DATA_URI,
    TOOL_SVG_TO_REACT, TOOL_SVG_TO_REACT_NATIVE, TOOL_VALIDATE_SVG,
};
use serde_json::{Map, Value, json};
use server::Server;
use std::fs;
use std::path::PathBuf;
use std::process;
use std::sync::Arc;
use tools::ToolContext;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

mod mcp;
mod params;
mod registry;
mod server;
mod svg;
mod tools;

#[derive(Parser)]
#[command(name = "mcp-svg")]
#[command(version, about = "SVG tools served over MCP, plus one-shot CLI utilities")]
struct Cli {
    /// Base directory for relative save paths
    #[arg(long, global = true, env = "SVG_MCP_WORK_DIR", default_value = ".")]
    work_dir: PathBuf,
    /// Directory receiving generated PDFs (relative to the work dir)
    #[arg(long, global = true, env = "SVG_MCP_OUTPUT_DIR", default_value = "output")]
    output_dir: PathBuf,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum Transport {
    Stdio,
    Tcp,
}

#[derive(Args, Clone)]
struct ServeArgs {
    #[arg(long, value_enum, env = "MCP_TRANSPORT", default_value_t = Transport::Stdio)]
    transport: Transport,
    /// Listen address for the tcp transport
    #[arg(long, env = "MCP_HOST", default_value = "127.0.0.1")]
    host: String,
    /// Listen port for the tcp transport
    #[arg(long, env = "MCP_PORT", default_value_t = 3000)]
    port: u16,
}

#[derive(Args, Clone)]
#[command(
    group(
        clap::ArgGroup::new("source")
            .required(true)
            .multiple(false)
            .args(["path", "svg"])
    )
)]
struct SourceArgs {
    /// Path to an SVG file
    #[arg(long)]
    path: Option<PathBuf>,
    /// Inline SVG source
    #[arg(long)]
    svg: Option<String>,
}

impl SourceArgs {
    fn arguments(&self) -> Result<Map<String, Value>> {
        let source = match (&self.path, &self.svg) {
            (Some(path), _) => fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?,
            (None, Some(svg)) => svg.clone(),
            (None, None) => anyhow::bail!("one of --path or --svg is required"),
        };
        let mut map = Map::new();
        map.insert(PARAM_SVG_CODE.to_string(), json!(source));
        Ok(map)
    }
}

#[derive(Args, Clone)]
struct ToolArgs {
    #[command(flatten)]
    source: SourceArgs,
    /// Output JSON structuredContent
    #[arg(long)]
    json: bool,
}

#[derive(Args, Clone)]
struct ReactArgs {
    #[command(flatten)]
    source: SourceArgs,
    /// Component name (a JavaScript identifier)
    #[arg(long)]
    component_name: Option<String>,
}

#[derive(Args, Clone)]
struct RenderArgs {
    #[command(flatten)]
    source: SourceArgs,
    /// Output width in pixels
    #[arg(long)]
    width: Option<f64>,
    /// Output height in pixels
    #[arg(long)]
    height: Option<f64>,
    /// Where to write the PNG
    #[arg(long)]
    output: PathBuf,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the MCP server
    Serve(ServeArgs),
    /// Check SVG structure
    Validate(ToolArgs),
    /// Minify SVG
    Optimize(ToolArgs),
    /// Pretty-print SVG
    Format(ToolArgs),
    /// Show width, height, viewBox and title
    Metadata(ToolArgs),
    /// Encode SVG as a base64 data URI
    DataUri(ToolArgs),
    /// Generate a React component
    ToReact(ReactArgs),
    /// Generate a React Native component
    ToReactNative(ReactArgs),
    /// Rasterize SVG to a PNG file
    Render(RenderArgs),
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let context = ToolContext::new(cli.work_dir, cli.output_dir);
    let server = Server::new(tools::registry()?, context);

    match cli.command {
        Commands::Serve(args) => serve(server, args),
        Commands::Validate(args) => run_tool(&server, TOOL_VALIDATE_SVG, args),
        Commands::Optimize(args) => run_tool(&server, TOOL_OPTIMIZE_SVG, args),
        Commands::Format(args) => run_tool(&server, TOOL_FORMAT_SVG, args),
        Commands::Metadata(args) => run_tool(&server, TOOL_GET_SVG_METADATA, args),
        Commands::DataUri(args) => run_tool(&server, TOOL_SVG_TO_DATA_URI, args),
        Commands::ToReact(args) => run_react(&server, TOOL_SVG_TO_REACT, args),
        Commands::ToReactNative(args) => run_react(&server, TOOL_SVG_TO_REACT_NATIVE, args),
        Commands::Render(args) => run_render(&server, args),
    }
}

fn init_tracing() {
    // stdout carries protocol traffic.
    let stderr_layer = fmt::layer().with_writer(std::io::stderr).with_ansi(false);
    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
}

fn serve(server: Server, args: ServeArgs) -> Result<()> {
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "starting mcp-svg");
    match args.transport {
        Transport::Stdio => server.run_stdio(),
        Transport::Tcp => Arc::new(server).run_tcp(&args.host, args.port),
    }
}

fn call(server: &Server, tool: &str, arguments: Map<String, Value>) -> Result<Value> {
    server
        .registry()
        .dispatch(tool, Some(&Value::Object(arguments)), server.context())
        .with_context(|| format!("{tool} rejected the request"))
}

fn run_tool(server: &Server, tool: &str, args: ToolArgs) -> Result<()> {
    let result = call(server, tool, args.source.arguments()?)?;
    print_tool_result(result, args.json)
}

fn run_react(server: &Server, tool: &str, args: ReactArgs) -> Result<()> {
    let mut arguments = args.source.arguments()?;
    if let Some(component_name) = args.component_name {
        arguments.insert(PARAM_COMPONENT_NAME.to_string(), json!(component_name));
    }
    let result = call(server, tool, arguments)?;
    print_tool_result(result, false)
}

fn run_render(server: &Server, args: RenderArgs) -> Result<()> {
    let mut arguments = args.source.arguments()?;
    if let Some(width) = args.width {
        arguments.insert(PARAM_WIDTH.to_string(), json!(width));
    }
    if let Some(height) = args.height {
        arguments.insert(PARAM_HEIGHT.to_string(), json!(height));
    }
    let result = call(server, TOOL_RENDER_SVG, arguments)?;
    exit_on_error(&result);

    let data = result
        .pointer("/content/0/data")
        .and_then(|value| value.as_str())
        .context("render returned no image")?;
    let png = STANDARD
        .decode(data)
        .context("render returned invalid base64")?;
    fs::write(&args.output, png)
        .with_context(|| format!("failed to write {}", args.output.display()))?;
    println!("{}", args.output.display());
    Ok(())
}

fn exit_on_error(result: &Value) {
    let is_error = result
        .get("isError")
        .and_then(|value| value.as_bool())
        .unwrap_or(false);

    if is_error {
        let message = result
            .get("structuredContent")
            .and_then(|value| value.get("error"))
            .and_then(|value| value.get("message"))
            .and_then(|value| value.as_str())
            .unwrap_or("tool error");
        eprintln!("{message}");
        process::exit(1);
    }
}

fn print_tool_result(result: Value, json_output: bool) -> Result<()> {
    exit_on_error(&result);

    if json_output {
        let structured = result
            .get("structuredContent")
            .cloned()
            .unwrap_or_else(|| json!({}));
        let output = serde_json::to_string_pretty(&structured)?;
        println!("{output}");
        return Ok(());
    }

    let text = result
        .get("content")
        .and_then(|value| value.as_array())
        .and_then(|arr| arr.first())
        .and_then(|value| value.get("text"))
        .and_then(|value| value.as_str())
        .unwrap_or("");
    println!("{text}");
    Ok(())
}
