use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rmcp::{ServiceExt, transport::stdio};

mod invoke;
mod tools;
mod utils;

use tools::XcodeServer;

/// mcp-xcode - MCP server for Xcode developer tooling
///
/// Commands:
///   mcp-xcode serve            Serve MCP over stdio (what MCP clients launch)
///   mcp-xcode tools [--json]   Print the registered tool names
///
/// Global flags:
///   -v / -vv        Increase verbosity (logs go to stderr)
///   -q / --quiet    Errors only
///
/// Every tool shells out to a fixed developer binary (xcrun, simctl,
/// xctrace, xcodebuild, altool, otool, nm, swift-demangle), so this server
/// is only useful on a machine with Xcode command line tools installed.
#[derive(Parser, Debug)]
#[command(
    name = "mcp-xcode",
    version,
    about = "MCP server exposing Xcode developer tooling",
    propagate_version = true,
    disable_help_subcommand = true
)]
pub struct Cli {
    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Silence all non-error output
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Serve the MCP protocol over stdio
    Serve,

    /// List registered tool names without starting the server
    Tools {
        /// Output JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = utils::derive_level(cli.verbose, cli.quiet);
    utils::init_logging(level);

    match cli.command {
        Commands::Serve => serve().await,
        Commands::Tools { json } => {
            let names = XcodeServer::new().tool_names();
            if json {
                println!("{}", serde_json::json!({ "tools": names }));
            } else {
                for name in names {
                    println!("{name}");
                }
            }
            Ok(())
        }
    }
}

async fn serve() -> Result<()> {
    utils::logging::info("mcp-xcode serving MCP over stdio");
    let service = XcodeServer::new()
        .serve(stdio())
        .await
        .context("Failed to start MCP stdio service")?;
    service.waiting().await.context("MCP service terminated")?;
    Ok(())
}
