//! Command-line configuration.
//!
//! Servers come from a JSON file (`--servers-file`, an array of
//! `{"addr": ..., "weight": ...}`), from repeated `--server addr[=weight]`
//! flags, or both; file entries come first.

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use ketama::{Continuum, ServerSpec};
use tracing::{debug, info};

use crate::commands::Command;

#[derive(Parser, Debug)]
#[command(name = "ketama", version, about = "Ketama consistent hashing ring tool")]
pub struct CliConfig {
    /// JSON file holding the server list.
    #[arg(short = 'f', long, global = true)]
    pub servers_file: Option<PathBuf>,

    /// Server as `addr` or `addr=weight`. Repeatable.
    #[arg(short = 's', long = "server", global = true)]
    pub servers: Vec<ServerSpec>,

    /// Log level used when `RUST_LOG` is not set.
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,

    /// Print results as JSON.
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl CliConfig {
    pub fn run(self) -> Result<()> {
        setup_tracing(&self.log_level);

        let servers = self.load_servers()?;
        info!(servers = servers.len(), "building continuum");
        let ring = Continuum::build(&servers).context("failed to build continuum")?;

        let result = self.command.execute(&ring)?;
        let stdout = io::stdout();
        let mut out = stdout.lock();
        result.write(&mut out, self.json)?;
        out.flush()?;
        Ok(())
    }

    /// Collects servers from the file (if any) followed by `--server` flags.
    pub fn load_servers(&self) -> Result<Vec<ServerSpec>> {
        let mut servers = Vec::new();
        if let Some(path) = &self.servers_file {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            let from_file: Vec<ServerSpec> = serde_json::from_str(&raw)
                .with_context(|| format!("failed to parse server list {}", path.display()))?;
            debug!(path = %path.display(), count = from_file.len(), "loaded servers file");
            servers.extend(from_file);
        }
        servers.extend(self.servers.iter().cloned());
        Ok(servers)
    }
}

/// Installs the fmt subscriber. `RUST_LOG` takes precedence over `level`.
fn setup_tracing(level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}
