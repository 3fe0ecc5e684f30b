//! Airdrop Discovery server CLI
//!
//! Starts the HTTP server for tweet ingestion and airdrop listing.

use airdrop_server::{config::ServerConfig, init_tracing, start_server, ServerError};
use std::env;
use std::process;
use tracing::warn;

#[tokio::main]
async fn main() {
    init_tracing();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

async fn run() -> Result<(), ServerError> {
    let args: Vec<String> = env::args().collect();

    let config = if args.len() > 2 && args[1] == "--config" {
        ServerConfig::from_file(&args[2])?
    } else if args.len() > 1 && args[1] == "--help" {
        print_help();
        process::exit(0);
    } else {
        warn!("No config file specified, using in-memory defaults");
        eprintln!("Usage: airdrop-server --config <path-to-config.toml>");
        eprintln!();
        ServerConfig::ephemeral()
    };

    start_server(config).await?;

    Ok(())
}

fn print_help() {
    println!("Airdrop Discovery Server - Tweet classification and airdrop listing");
    println!();
    println!("USAGE:");
    println!("    airdrop-server --config <path-to-config.toml>");
    println!();
    println!("OPTIONS:");
    println!("    --config <file>    Load configuration from TOML file");
    println!("    --help             Print this help message");
    println!();
    println!("ENDPOINTS:");
    println!("    POST /airdrops/ingest            {{\"text\", \"source\", \"link\"}}");
    println!("    GET  /airdrops/filtered          Records matching the keyword rule");
    println!("    GET  /airdrops/search?keyword=k  Records containing a keyword");
    println!("    GET  /health                     Liveness and record count");
    println!();
    println!("CONFIGURATION:");
    println!("    bind_address, bind_port, enabled");
    println!("    [keywords]     positive, negative");
    println!("    [database]     path, table_name");
    println!("    [integration]  webhook_enabled, webhook_url");
    println!();
    println!("Set RUST_LOG to adjust log verbosity (default: info).");
}
