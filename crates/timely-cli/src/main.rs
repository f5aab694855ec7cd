// crates/timely-cli/src/main.rs
//
// CLI entrypoint for the Timely Reward vesting engine.
//
// Runs the contract actions (setpaused, settoken, addreward, claim) against
// RocksDB tables in the configured data directory, inspects those tables,
// and manages the local token ledger rewards are paid from.

mod commands;
mod config;
mod output;
mod session;

use clap::{Parser, Subcommand};

use commands::actions::{AddRewardCmd, ClaimCmd, SetPausedCmd, SetTokenCmd};
use commands::ledger::LedgerCmd;
use commands::tables::{PendingCmd, RewardsCmd};
use commands::Context;
use config::CliConfig;
use output::OutputFormat;
use timely_core::name::AccountName;
use timely_core::time::TimePointSec;

/// Timely Reward CLI: linear token vesting with day-granular unlocks.
#[derive(Parser, Debug)]
#[command(
    name = "timely",
    version = "0.1.0",
    about = "Timely Reward CLI: grant, vest, and claim token rewards"
)]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(long, global = true, default_value = "~/.timely/config.toml")]
    config: String,

    /// Account authorizing the action. Defaults to the contract account for
    /// administrative actions and to the user for `claim`.
    #[arg(long, global = true)]
    auth: Option<AccountName>,

    /// Pin the current time, e.g. 2022-01-02T10:00:00 (UTC).
    #[arg(long, global = true)]
    now: Option<TimePointSec>,

    /// Emit JSON instead of tables.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level subcommands.
#[derive(Debug, Subcommand)]
enum Commands {
    /// Pause or resume issuance and claims (admin).
    Setpaused(SetPausedCmd),

    /// Set the reward token contract and symbol (admin).
    Settoken(SetTokenCmd),

    /// Grant vesting rewards to recipients (admin).
    Addreward(AddRewardCmd),

    /// Claim accrued rewards.
    Claim(ClaimCmd),

    /// Preview what a claim would settle right now.
    Pending(PendingCmd),

    /// Show the effective contract configuration.
    Config,

    /// List reward schedules.
    Rewards(RewardsCmd),

    /// Local token ledger: accounts, tokens, balances.
    #[command(subcommand)]
    Ledger(LedgerCmd),
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Load configuration from TOML file, falling back to defaults if the file
    // is not found. Logging is set up first so the fallback is reported.
    let loaded = CliConfig::load(&cli.config);
    let level = match &loaded {
        Ok(cfg) => cfg.log_level.clone(),
        Err(_) => CliConfig::default().log_level,
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&level)),
        )
        .init();

    let config = match loaded {
        Ok(cfg) => {
            tracing::debug!("Loaded configuration from {}", cli.config);
            cfg
        }
        Err(e) => {
            tracing::warn!(
                "Could not load config from {}: {}. Using defaults.",
                cli.config,
                e
            );
            CliConfig::default()
        }
    };

    let ctx = Context {
        config,
        auth: cli.auth,
        now: cli.now,
        format: OutputFormat::from_json_flag(cli.json),
    };

    match &cli.command {
        Commands::Setpaused(cmd) => commands::actions::setpaused(&ctx, cmd)?,
        Commands::Settoken(cmd) => commands::actions::settoken(&ctx, cmd)?,
        Commands::Addreward(cmd) => commands::actions::addreward(&ctx, cmd)?,
        Commands::Claim(cmd) => commands::actions::claim(&ctx, cmd)?,
        Commands::Pending(cmd) => commands::tables::pending(&ctx, cmd)?,
        Commands::Config => commands::tables::config(&ctx)?,
        Commands::Rewards(cmd) => commands::tables::rewards(&ctx, cmd)?,
        Commands::Ledger(cmd) => commands::ledger::run(&ctx, cmd)?,
    }

    Ok(())
}
