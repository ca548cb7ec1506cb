/// Start a UCI engine, apply option changes through a supervised session and
/// print the resulting option state as JSON.
///
/// # Usage
///
/// ```shell
/// cargo run -p uci-supervisor -- \
///   --engine /usr/bin/stockfish \
///   --option "Threads=4" --option "Hash=256" \
///   --elo 1800
/// ```
///
/// or with a config file:
///
/// ```shell
/// cargo run -p uci-supervisor -- --config engine.toml --fen "8/8/8/8/8/8/8/K6k w - - 0 1"
/// ```
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser as _;
use log::info;

use uci_supervisor::uci_options::RestrictionTable;
use uci_supervisor::{EngineConfig, Session, SupervisorConfig, parse_option_assignment};

#[derive(clap::Parser, Debug)]
#[command(about = "apply UCI options to a chess engine and print the resulting option state")]
struct Cli {
    /// Config file (TOML) with an [engine] section and optional [options]
    #[arg(long, conflicts_with = "engine")]
    config: Option<PathBuf>,

    /// Engine binary path
    #[arg(long)]
    engine: Option<PathBuf>,

    /// Extra argument passed to the engine binary (can be repeated)
    #[arg(long = "engine-arg", num_args = 1, allow_hyphen_values = true)]
    engine_args: Vec<String>,

    /// Option change (format: "Name=Value", can be repeated)
    #[arg(long = "option", num_args = 1)]
    options: Vec<String>,

    /// Skill level (0-20), disables Elo limiting
    #[arg(long, conflicts_with = "elo")]
    skill_level: Option<i64>,

    /// Target Elo rating, enables Elo limiting
    #[arg(long)]
    elo: Option<i64>,

    /// Position to assert after the options are applied
    #[arg(long)]
    fen: Option<String>,

    /// Log every command sent to the engine
    #[arg(long)]
    debug_view: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut engine_cfg = match (&cli.config, &cli.engine) {
        (Some(path), _) => SupervisorConfig::load(path)?.into_engine_config(),
        (None, Some(engine)) => EngineConfig::new(engine),
        (None, None) => bail!("either --config or --engine is required"),
    };
    engine_cfg.args.extend(cli.engine_args.iter().cloned());
    engine_cfg.debug_view |= cli.debug_view;

    // Bad assignments are reported before the engine is started.
    let table = RestrictionTable::stockfish();
    for spec in &cli.options {
        let (name, value) = parse_option_assignment(table, spec)
            .with_context(|| format!("invalid --option '{spec}'"))?;
        engine_cfg.overrides.insert(name, value);
    }

    let mut session =
        Session::initialize(&engine_cfg).context("failed to start engine session")?;
    if let Some(name) = session.engine_name() {
        info!("engine: {name} (released {})", session.engine_release_date().unwrap_or("unknown"));
    }

    if let Some(level) = cli.skill_level {
        session.set_skill_level(level).context("failed to set skill level")?;
    }
    if let Some(elo) = cli.elo {
        session.set_elo_rating(elo).context("failed to set Elo rating")?;
    }
    if let Some(fen) = &cli.fen {
        session.set_fen_position(fen, true).context("failed to set position")?;
    }

    println!("{}", serde_json::to_string_pretty(&session.current_options())?);
    Ok(())
}
