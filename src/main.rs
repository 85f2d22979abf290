//! dexcalc - Entry Point
//!
//! Runs the terminal calculator page by default, or a one-shot lookup or
//! calculation printed to stdout.

use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;

use clap::{Parser, Subcommand, ValueEnum};
use tokio::runtime::Runtime;
use tracing_subscriber::EnvFilter;

use dexcalc::api::client::PokeApiClient;
use dexcalc::calc::formula::StandardCalculator;
use dexcalc::core::config::CalcConfig;
use dexcalc::core::error::Result;
use dexcalc::core::types::Role;
use dexcalc::render::text::details_lines;
use dexcalc::session::{lookup_creature, run_calculation, Controller};
use dexcalc::ui::{self, terminal, TerminalGuard};

const DEFAULT_LOG_FILTER: &str = "dexcalc=info";

/// Creature lookup and damage range calculator
#[derive(Parser, Debug)]
#[command(name = "dexcalc")]
#[command(about = "Look up two creatures and calculate the damage range of a move")]
struct Cli {
    /// TOML config file (defaults and DEXCALC_* variables apply otherwise)
    #[arg(long, short = 'c', global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Interactive terminal page (default)
    Tui,
    /// Print the details of one creature
    Lookup {
        name: String,
        /// Which side the lookup is for
        #[arg(long, value_enum, default_value_t = RoleArg::Attacker)]
        role: RoleArg,
    },
    /// Print the damage and percentage range of one move
    Calc {
        attacker: String,
        defender: String,
        #[arg(value_name = "MOVE")]
        move_name: String,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum RoleArg {
    Attacker,
    Defender,
}

impl From<RoleArg> for Role {
    fn from(arg: RoleArg) -> Self {
        match arg {
            RoleArg::Attacker => Role::Attacker,
            RoleArg::Defender => Role::Defender,
        }
    }
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
}

/// Log to stderr for one-shot commands
fn init_stderr_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .init();
}

/// Log to a file while the terminal page owns the screen
fn init_file_logging(config: &CalcConfig) -> Result<()> {
    let file = File::create(&config.log_file)?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = CalcConfig::load(cli.config.as_deref())?;

    // Create the async runtime for lookups and debounce timers
    let rt = Runtime::new()?;

    match cli.command.unwrap_or(Command::Tui) {
        Command::Tui => {
            init_file_logging(&config)?;
            rt.block_on(run_tui(&config))
        }
        Command::Lookup { name, role } => {
            init_stderr_logging();
            rt.block_on(run_lookup(&config, role.into(), &name))
        }
        Command::Calc {
            attacker,
            defender,
            move_name,
        } => {
            init_stderr_logging();
            rt.block_on(run_calc(&config, &attacker, &defender, &move_name))
        }
    }
}

async fn run_tui(config: &CalcConfig) -> Result<()> {
    tracing::info!(api = %config.api_base_url, "dexcalc starting");

    let controller = Controller::new(
        PokeApiClient::from_config(config)?,
        StandardCalculator::new(),
        config.calc_settings()?,
        config.debounce_interval(),
    );

    let mut tui = terminal::init()?;
    let _guard = TerminalGuard;
    let outcome = ui::run(&mut tui, &controller).await;
    controller.shutdown();

    tracing::info!("dexcalc stopped");
    outcome
}

async fn run_lookup(config: &CalcConfig, role: Role, name: &str) -> Result<()> {
    let client = PokeApiClient::from_config(config)?;
    let summary = lookup_creature(&client, role, name).await?;
    for line in details_lines(&summary) {
        println!("{}", line);
    }
    Ok(())
}

async fn run_calc(config: &CalcConfig, attacker: &str, defender: &str, move_name: &str) -> Result<()> {
    let client = PokeApiClient::from_config(config)?;
    let settings = config.calc_settings()?;
    let report = run_calculation(
        &client,
        &StandardCalculator::new(),
        &settings,
        attacker,
        defender,
        move_name,
    )
    .await?;

    println!("{}", report.damage_line);
    println!("{}", report.roll_line);
    Ok(())
}
