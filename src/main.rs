//! Total Nutrition Therapy calculator (TNT)
//!
//! An MCP server for clinical nutrition targets.

use rmcp::ServiceExt;
use tokio::io::{stdin, stdout};

mod build_info;
mod config;
mod mcp;
mod models;
mod nutrition;
mod tools;

use config::ManualLinkConfig;
use mcp::TntService;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging (output to stderr to not interfere with MCP stdio)
    tracing_subscriber::fmt()
        .with_env_filter(config::env_filter())
        .with_writer(std::io::stderr)
        .init();

    // Print startup banner to stderr
    build_info::print_startup_banner();
    eprintln!("Starting MCP server on stdio...");

    let manual_link = ManualLinkConfig::from_env();
    if manual_link.enabled {
        eprintln!("Manual link: {}", manual_link.url.as_deref().unwrap_or_default());
    }

    // Create the TNT service
    let service = TntService::new(manual_link);

    // Create stdio transport
    let transport = (stdin(), stdout());

    // Start the MCP server
    let server = service.serve(transport).await?;

    // Wait for the server to complete
    server.waiting().await?;

    Ok(())
}
