//! Subcommands and their output.

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use clap::Subcommand;
use ketama::{Continuum, Token};
use serde::Serialize;

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Print the owning server for each key (reads stdin, one key per line,
    /// when no keys are given).
    Pick { keys: Vec<String> },
    /// Summarize the ring: point count and ownership per server.
    Inspect,
    /// Dump ring points in token order.
    Points {
        /// Only print the first N points.
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Pick {
    pub key: String,
    pub hash: u32,
    pub server: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServerShare {
    pub server: String,
    pub points: usize,
    pub share: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PointRow {
    pub token: u32,
    pub server: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum CommandResult {
    Picks(Vec<Pick>),
    Summary {
        points: usize,
        servers: Vec<ServerShare>,
    },
    Points(Vec<PointRow>),
}

impl Command {
    pub fn execute(&self, ring: &Continuum) -> Result<CommandResult> {
        match self {
            Command::Pick { keys } if keys.is_empty() => {
                let stdin = io::stdin();
                let keys = stdin
                    .lock()
                    .lines()
                    .collect::<io::Result<Vec<_>>>()
                    .context("failed to read keys from stdin")?;
                pick(ring, &keys)
            }
            Command::Pick { keys } => pick(ring, keys),
            Command::Inspect => Ok(summary(ring)),
            Command::Points { limit } => {
                let limit = limit.unwrap_or(usize::MAX);
                let rows = ring
                    .points()
                    .iter()
                    .take(limit)
                    .map(|p| PointRow {
                        token: p.token.0,
                        server: p.server.to_string(),
                    })
                    .collect();
                Ok(CommandResult::Points(rows))
            }
        }
    }
}

fn pick(ring: &Continuum, keys: &[String]) -> Result<CommandResult> {
    let picks = keys
        .iter()
        .map(|key| {
            let server = ring
                .pick_server(key)
                .with_context(|| format!("failed to route key {key:?}"))?;
            Ok(Pick {
                key: key.clone(),
                hash: Token::from_key(key.as_bytes()).0,
                server: server.to_string(),
            })
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(CommandResult::Picks(picks))
}

fn summary(ring: &Continuum) -> CommandResult {
    let servers = ring
        .ownership()
        .into_iter()
        .map(|(server, share)| ServerShare {
            points: ring.points().iter().filter(|p| p.server == server).count(),
            server: server.to_string(),
            share,
        })
        .collect();
    CommandResult::Summary {
        points: ring.point_count(),
        servers,
    }
}

impl CommandResult {
    pub fn write<W: Write>(&self, out: &mut W, json: bool) -> Result<()> {
        if json {
            serde_json::to_writer_pretty(&mut *out, self)?;
            writeln!(out)?;
            return Ok(());
        }

        match self {
            CommandResult::Picks(picks) => {
                for p in picks {
                    writeln!(out, "{}\t{:08x}\t{}", p.key, p.hash, p.server)?;
                }
            }
            CommandResult::Summary { points, servers } => {
                writeln!(out, "points: {points}")?;
                for s in servers {
                    writeln!(
                        out,
                        "{}\t{} points\t{:.2}%",
                        s.server,
                        s.points,
                        s.share * 100.0
                    )?;
                }
            }
            CommandResult::Points(rows) => {
                for r in rows {
                    writeln!(out, "{:08x}\t{}", r.token, r.server)?;
                }
            }
        }
        Ok(())
    }
}
