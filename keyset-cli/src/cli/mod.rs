pub mod config;

use anyhow::Context;
use clap::{Parser, Subcommand};
use keyset_cursor::CursorEncoding;

use std::{io::Read, path::PathBuf};

use self::config::{Config, EnvOverride};
use crate::command;

#[derive(Parser)]
#[clap(version, long_about = None)]
struct Cli {
    #[clap(short, long, env = "KEYSET_CONFIG", value_name = "FILE")]
    config: Option<PathBuf>,
    #[clap(long, env = "KEYSET_JSON_LOGS")]
    json_logs: bool,
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the decoded contents of a cursor token
    Inspect {
        token: String,
        /// Fail unless the cursor was issued for this kind
        #[clap(long)]
        kind: Option<String>,
    },
    /// Encode a cursor given as json ('-' reads stdin)
    Encode {
        json: String,
        /// Emit the plain json form instead of the compressed token
        #[clap(long)]
        plain: bool,
    },
    /// List the configured order-by options
    OrderBy { kind: Option<String> },
}

pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let has_config = cli.config.is_some();

    let config = Config::load_config(
        cli.config,
        EnvOverride {
            json_logs: cli.json_logs,
        },
    )?;
    keyset_tracing::init_tracer(config.tracing.clone())?;
    if !has_config {
        tracing::info!("No config file provided, using default config.");
    }

    let output = run_cmd(&config, cli.command)?;
    println!("{output}");
    Ok(())
}

fn run_cmd(config: &Config, cmd: Command) -> anyhow::Result<String> {
    match cmd {
        Command::Inspect { token, kind } => command::inspect(&token, kind.as_deref()),
        Command::Encode { json, plain } => {
            let json = if json == "-" {
                let mut buf = String::new();
                std::io::stdin()
                    .read_to_string(&mut buf)
                    .context("Couldn't read stdin")?;
                buf
            } else {
                json
            };
            let encoding = if plain {
                CursorEncoding::Plain
            } else {
                config.pagination.encoding
            };
            command::encode(&json, encoding)
        }
        Command::OrderBy { kind } => command::order_by(&config.registries, kind.as_deref()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_subcommands() {
        let cli = Cli::try_parse_from(["keyset", "encode", "--plain", "-"]).unwrap();
        assert!(matches!(cli.command, Command::Encode { plain: true, ref json } if json == "-"));

        let cli = Cli::try_parse_from(["keyset", "inspect", "abc", "--kind", "post"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Inspect { ref kind, .. } if kind.as_deref() == Some("post")
        ));
    }

    #[test]
    fn encode_uses_configured_encoding() -> anyhow::Result<()> {
        let mut config = Config::default();
        config.pagination.encoding = CursorEncoding::Plain;
        let json = r#"{"name":"post","value":[{"key":"id","value":1}]}"#;
        let out = run_cmd(
            &config,
            Command::Encode {
                json: json.to_string(),
                plain: false,
            },
        )?;
        assert_eq!(out, json);
        Ok(())
    }
}
