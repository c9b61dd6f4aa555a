#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that plays a Lane Defence match over stdin and stdout.

mod host;

use std::{fs, io, path::PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use lane_defence_strategy::{ProfileVersion, Strategy, StrategyProfile};
use tracing_subscriber::EnvFilter;

/// Lane Defence decision engine speaking the game engine's line protocol.
#[derive(Debug, Parser)]
#[command(name = "lane-defence", version, about)]
struct Args {
    /// Built-in strategy bundle (`baseline` or `fortified`).
    #[arg(long, default_value_t = ProfileVersion::Fortified)]
    profile: ProfileVersion,
    /// TOML file replacing the built-in bundle.
    #[arg(long, value_name = "PATH")]
    profile_file: Option<PathBuf>,
    /// Seed for attack direction draws. Drawn from entropy when omitted.
    #[arg(long)]
    seed: Option<u64>,
    /// Log filter directive used when `RUST_LOG` is unset.
    #[arg(long, default_value = "info")]
    log_filter: String,
    /// Prints the selected bundle as TOML and exits.
    #[arg(long)]
    dump_profile: bool,
}

/// Entry point for the Lane Defence command-line interface.
fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(&args.log_filter)?;

    let profile = load_profile(&args)?;
    if args.dump_profile {
        print!("{}", profile.to_toml_string()?);
        return Ok(());
    }

    let seed = args.seed.unwrap_or_else(rand::random);
    tracing::info!(seed, version = %profile.version, "starting match");

    let mut strategy = Strategy::new(profile, seed);
    let stdin = io::stdin();
    let stdout = io::stdout();
    let _ = host::run(&mut strategy, stdin.lock(), stdout.lock())?;
    Ok(())
}

fn init_tracing(fallback: &str) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(fallback)
            .with_context(|| format!("invalid log filter `{fallback}`"))?,
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
    Ok(())
}

fn load_profile(args: &Args) -> Result<StrategyProfile> {
    let Some(path) = &args.profile_file else {
        return Ok(StrategyProfile::for_version(args.profile));
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read profile {}", path.display()))?;
    let profile = StrategyProfile::from_toml_str(&text)
        .with_context(|| format!("failed to load profile {}", path.display()))?;
    tracing::info!(path = %path.display(), version = %profile.version, "loaded profile file");
    Ok(profile)
}
