//! fungible: replay call scripts against a fungible-token ledger.

use anyhow::Context;
use clap::Parser;
use fungible_cli::{replay, Script};
use fungible_token::LedgerConfig;
use fungible_types::SystemClock;
use fungible_utils::{init_logging, LogFormat};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "fungible", about = "Fungible-token ledger tool")]
struct Cli {
    /// Path to a TOML ledger configuration. Defaults apply when omitted.
    #[arg(long, global = true, env = "FUNGIBLE_CONFIG")]
    config: Option<PathBuf>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    /// Overrides the config file's `log_level`.
    #[arg(long, global = true, env = "FUNGIBLE_LOG_LEVEL")]
    log_level: Option<String>,

    /// Log format: "human" or "json". Overrides the config file's `log_format`.
    #[arg(long, global = true, env = "FUNGIBLE_LOG_FORMAT")]
    log_format: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Deploy a ledger from the config, replay a call script against it and
    /// print the resulting events and balances as JSON.
    Run {
        /// TOML file with `[[call]]` entries.
        #[arg(long)]
        script: PathBuf,

        /// Exit with an error if any call was rejected.
        #[arg(long)]
        strict: bool,
    },

    /// Print the default configuration as TOML.
    DefaultConfig,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => LedgerConfig::from_toml_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => LedgerConfig::default(),
    };

    let level = cli.log_level.as_deref().unwrap_or(&config.log_level);
    let format: LogFormat = cli
        .log_format
        .as_deref()
        .unwrap_or(&config.log_format)
        .parse()?;
    init_logging(format, level)?;

    match cli.command {
        Command::Run { script, strict } => {
            let steps = Script::from_toml_file(&script)?;
            let mut ledger = config.build().context("deploying ledger")?;
            tracing::info!(
                name = ledger.name(),
                symbol = ledger.symbol(),
                supply = %ledger.total_supply(),
                steps = steps.len(),
                "replaying {}",
                script.display()
            );

            let report = replay(&mut ledger, &steps, &SystemClock);
            ledger.audit().context("post-replay audit")?;
            println!("{}", report.to_json_pretty()?);

            let rejected = report.rejected_count();
            if rejected > 0 {
                tracing::warn!(rejected, "some calls were rejected");
                if strict {
                    anyhow::bail!("{rejected} of {} calls rejected", steps.len());
                }
            }
        }
        Command::DefaultConfig => {
            print!("{}", LedgerConfig::default().to_toml_string()?);
        }
    }

    Ok(())
}
