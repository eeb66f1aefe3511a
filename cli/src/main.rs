//! mcp-teleport binary: serve Teleport's `tsh` as MCP tools over stdio.
//!
//! Subcommands: `serve` (default), `version`, `tool` (list/show/call tools).

mod logging;

use std::sync::Arc;

use clap::{Parser, Subcommand, ValueEnum};
use cli::{
    call_tool, list_tools, parse_call_args, show_tool, CliError, Overrides, Runtime,
    ToolShowFormat,
};
use teleport::ServerContext;
use tokio::signal;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "mcp-teleport", version)]
#[command(about = "MCP server exposing Teleport's tsh CLI as tools")]
struct Args {
    #[command(subcommand)]
    cmd: Option<Command>,

    #[command(flatten)]
    runtime: RuntimeArgs,
}

/// Accepted anywhere on the command line; they override config and environment.
#[derive(clap::Args, Debug, Clone, Default)]
struct RuntimeArgs {
    /// Describe tsh commands instead of running them
    #[arg(long, global = true)]
    dry_run: bool,

    /// Log built command lines and default the log level to debug
    #[arg(long, global = true)]
    debug: bool,

    /// Non-destructive mode (true/false)
    #[arg(long, global = true, value_name = "BOOL", value_parser = parse_bool_arg)]
    non_destructive: Option<bool>,

    /// Path of the tsh binary (default: tsh on PATH)
    #[arg(long, global = true, value_name = "PATH")]
    tsh_binary: Option<String>,

    /// Per-command timeout in seconds (default 30)
    #[arg(long, global = true, value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..))]
    timeout_secs: Option<u64>,
}

impl RuntimeArgs {
    fn overrides(&self) -> Overrides {
        Overrides {
            dry_run: self.dry_run,
            debug: self.debug,
            non_destructive: self.non_destructive,
            tsh_binary: self.tsh_binary.clone(),
            timeout_secs: self.timeout_secs,
        }
    }
}

fn parse_bool_arg(s: &str) -> Result<bool, String> {
    config::parse_bool("--non-destructive", s).map_err(|e| e.to_string())
}

#[derive(Subcommand, Debug, Clone)]
enum Command {
    /// Serve the Teleport tools over MCP (default)
    Serve(ServeArgs),
    /// Print the version
    Version,
    /// List, show or call tools without a client
    Tool(ToolArgs),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
enum Transport {
    #[default]
    Stdio,
}

#[derive(clap::Args, Debug, Clone, Default)]
struct ServeArgs {
    /// Transport to serve on
    #[arg(long, value_enum, default_value = "stdio", env = "MCP_TELEPORT_TRANSPORT")]
    transport: Transport,
}

#[derive(clap::Args, Debug, Clone)]
struct ToolArgs {
    #[command(subcommand)]
    sub: ToolCommand,
}

#[derive(Subcommand, Debug, Clone)]
enum ToolCommand {
    /// List all tools (name and description)
    List,
    /// Show full definition of one tool (name, description, input_schema)
    Show(ShowToolArgs),
    /// Run one invocation and print the response
    Call(CallToolArgs),
}

#[derive(clap::Args, Debug, Clone)]
struct ShowToolArgs {
    /// Tool name (e.g. teleport_ssh)
    name: String,
    /// Output format
    #[arg(long, value_enum, value_name = "FORMAT", default_value = "yaml")]
    output: ToolShowFormat,
}

#[derive(clap::Args, Debug, Clone)]
struct CallToolArgs {
    /// Tool name (e.g. teleport_status)
    name: String,
    /// Arguments as a JSON object
    #[arg(long, value_name = "JSON")]
    args: Option<String>,
}

/// Cancels `context` on SIGINT or SIGTERM.
fn spawn_signal_handler(context: Arc<ServerContext>) {
    tokio::spawn(async move {
        tokio::select! {
            _ = signal::ctrl_c() => info!("received SIGINT, shutting down"),
            _ = terminate() => info!("received SIGTERM, shutting down"),
        }
        context.shutdown();
    });
}

#[cfg(unix)]
async fn terminate() {
    match signal::unix::signal(signal::unix::SignalKind::terminate()) {
        Ok(mut term) => {
            term.recv().await;
        }
        Err(e) => {
            warn!("cannot install SIGTERM handler: {}", e);
            std::future::pending::<()>().await;
        }
    }
}

#[cfg(not(unix))]
async fn terminate() {
    std::future::pending::<()>().await;
}

async fn run_tool(runtime: &Runtime, cmd: &ToolCommand) -> Result<bool, CliError> {
    let registry = runtime.registry();
    match cmd {
        ToolCommand::List => print!("{}", list_tools(&registry)),
        ToolCommand::Show(show) => print!("{}", show_tool(&registry, &show.name, show.output)?),
        ToolCommand::Call(call) => {
            let args = parse_call_args(call.args.as_deref())?;
            let out = call_tool(&registry, &call.name, args).await?;
            println!("{}", out.text());
            return Ok(!out.is_error);
        }
    }
    Ok(true)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let cmd = args.cmd.clone().unwrap_or(Command::Serve(ServeArgs::default()));
    if let Command::Version = cmd {
        println!("mcp-teleport {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let settings = match config::load_settings(config::APP_NAME, None) {
        Ok(s) => args.runtime.overrides().apply(s),
        Err(e) => {
            eprintln!("mcp-teleport: {}", CliError::from(e));
            std::process::exit(1);
        }
    };
    logging::init(settings.debug)?;

    let runtime = Runtime::new(settings);
    spawn_signal_handler(runtime.context().clone());

    match cmd {
        Command::Serve(serve_args) => {
            let s = runtime.settings();
            info!(
                transport = ?serve_args.transport,
                dry_run = s.dry_run,
                debug = s.debug,
                non_destructive = s.non_destructive,
                tsh = %s.tsh_binary,
                timeout_secs = s.timeout.as_secs(),
                "starting mcp-teleport"
            );
            match serve_args.transport {
                Transport::Stdio => {
                    if let Err(e) = serve::run_stdio(Arc::new(runtime.app_state())).await {
                        eprintln!("mcp-teleport: {}", CliError::from(e));
                        std::process::exit(1);
                    }
                }
            }
            if runtime.context().is_shutting_down() {
                // The stdin reader thread cannot be interrupted; leave without joining it.
                std::process::exit(0);
            }
        }
        Command::Tool(tool_args) => match run_tool(&runtime, &tool_args.sub).await {
            Ok(true) => {}
            Ok(false) => std::process::exit(1),
            Err(e) => {
                eprintln!("mcp-teleport: {}", e);
                std::process::exit(1);
            }
        },
        Command::Version => {}
    }
    Ok(())
}
