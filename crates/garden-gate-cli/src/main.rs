// crates/garden-gate-cli/src/main.rs
// ============================================================================
// Module: Garden Gate CLI Entry Point
// Description: Command dispatcher for the Garden Gate tool gateway.
// Purpose: Run the gateway server and inspect the published tool catalog.
// Dependencies: clap, garden-gate-config, garden-gate-mcp, tokio
// ============================================================================

//! ## Overview
//! The CLI wires configuration loading to the gateway server and offers an
//! offline view of the tool catalog per surface. Configuration resolution
//! follows the config crate rules: explicit `--config` path, then the
//! `GARDEN_GATE_CONFIG` environment variable, then `garden-gate.toml` in the
//! working directory.

#![allow(clippy::print_stdout, clippy::print_stderr, reason = "CLI user output.")]

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use clap::Subcommand;
use garden_gate_config::GardenGateConfig;
use garden_gate_contract::Surface;
use garden_gate_contract::tool_definitions;
use garden_gate_core::InMemoryCommerceStore;
use garden_gate_core::InMemoryDirectoryStore;
use garden_gate_core::InMemoryGardenStore;
use garden_gate_mcp::GatewayServer;
use garden_gate_mcp::GatewayStores;
use serde_json::json;

// ============================================================================
// SECTION: CLI Definition
// ============================================================================

/// Garden Gate machine-tool gateway.
#[derive(Debug, Parser)]
#[command(name = "garden-gate", version, about = "Garden Gate machine-tool gateway")]
struct Cli {
    /// Command to run.
    #[command(subcommand)]
    command: Command,
}

/// Top-level commands.
#[derive(Debug, Subcommand)]
enum Command {
    /// Run the gateway server over the configured bind address.
    Serve {
        /// Path to the configuration file.
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Print the published tool catalog as JSON.
    Tools {
        /// Restrict output to one surface.
        #[arg(long)]
        surface: Option<String>,
    },
}

// ============================================================================
// SECTION: Entry Point
// ============================================================================

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match cli.command {
        Command::Serve {
            config,
        } => serve(config.as_deref()).await,
        Command::Tools {
            surface,
        } => print_tools(surface.as_deref()),
    }
}

/// Loads configuration and serves the gateway until shutdown.
async fn serve(config_path: Option<&std::path::Path>) -> ExitCode {
    let config = match GardenGateConfig::load(config_path) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("garden-gate: {err}");
            return ExitCode::FAILURE;
        }
    };
    let stores = GatewayStores {
        directories: Arc::new(InMemoryDirectoryStore::seeded()),
        gardens: Arc::new(InMemoryGardenStore::new()),
        commerce: Arc::new(InMemoryCommerceStore::seeded()),
    };
    let server = match GatewayServer::from_config(config, stores) {
        Ok(server) => server,
        Err(err) => {
            eprintln!("garden-gate: {err}");
            return ExitCode::FAILURE;
        }
    };
    match server.serve().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("garden-gate: {err}");
            ExitCode::FAILURE
        }
    }
}

/// Prints the tool catalog for one or all surfaces.
fn print_tools(surface: Option<&str>) -> ExitCode {
    let surfaces: Vec<Surface> = match surface {
        Some(segment) => match Surface::parse(segment) {
            Some(parsed) => vec![parsed],
            None => {
                eprintln!("garden-gate: unknown surface: {segment}");
                return ExitCode::FAILURE;
            }
        },
        None => Surface::ALL.to_vec(),
    };
    let catalog: Vec<serde_json::Value> = surfaces
        .into_iter()
        .map(|surface| {
            json!({
                "surface": surface.as_str(),
                "tools": tool_definitions(surface),
            })
        })
        .collect();
    match serde_json::to_string_pretty(&catalog) {
        Ok(rendered) => {
            println!("{rendered}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("garden-gate: {err}");
            ExitCode::FAILURE
        }
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    #![allow(
        clippy::panic,
        clippy::unwrap_used,
        clippy::expect_used,
        reason = "Test-only panic-based assertions."
    )]

    use clap::Parser;

    use super::Cli;
    use super::Command;

    #[test]
    fn serve_accepts_config_path() {
        let cli = Cli::parse_from(["garden-gate", "serve", "--config", "custom.toml"]);
        let Command::Serve {
            config,
        } = cli.command
        else {
            panic!("expected serve command");
        };
        assert_eq!(config.unwrap().to_str(), Some("custom.toml"));
    }

    #[test]
    fn tools_accepts_surface_filter() {
        let cli = Cli::parse_from(["garden-gate", "tools", "--surface", "commerce"]);
        let Command::Tools {
            surface,
        } = cli.command
        else {
            panic!("expected tools command");
        };
        assert_eq!(surface.as_deref(), Some("commerce"));
    }
}
