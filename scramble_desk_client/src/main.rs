//! Operator command line for the scramble desk.
//!
//! Each flag is one operation on the competition snapshot. Flags combine and
//! run in a fixed order: reload competitors, ip, debug, open, start from,
//! init, close, next, export.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use scramble_desk::{
    build_competition, export, load_passcodes, CloseOutcome, Config, Desk, JsonFileStore, SnapshotStore, StartOutcome,
    SystemClock,
};
use tracing::{info, warn};
use wca_wcif::Registry;

mod avatars;
mod operator;
mod process;
mod publisher;
mod scramble_sets;
mod telemetry;

use operator::TerminalOperator;
use publisher::StagePublisher;

type StageDesk = Desk<TerminalOperator, SystemClock, Registry, StagePublisher>;

#[derive(Parser, Debug)]
#[command(name = "scramble-desk")]
#[command(about = "Opens and closes scramble sets for the groups of a WCA competition")]
#[command(version)]
struct Args {
    /// Data directory holding the snapshot, certificates, templates and avatars
    #[arg(long, env = "SCRAMBLE_DESK_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Base URL of the WCA registry
    #[arg(long, env = "SCRAMBLE_DESK_REGISTRY_URL")]
    registry_url: Option<String>,

    /// Reload the registered competitors
    #[arg(long)]
    reload_competitors: bool,

    /// Store the display server IP for future use
    #[arg(long)]
    ip: Option<String>,

    /// List rounds and groups with their progress
    #[arg(long)]
    debug: bool,

    /// Open a specific scramble set by activity code, e.g. 333-r1-g2
    #[arg(short = 'o', long = "open", value_name = "ACTIVITY_CODE")]
    open: Option<String>,

    /// Mark everything before the given group as finished
    #[arg(long, value_name = "ACTIVITY_CODE")]
    start_from: Option<String>,

    /// Load a competition from the registry
    #[arg(long, value_name = "COMPETITION_ID")]
    init: Option<String>,

    /// Close the active scramble set and call up the next group
    #[arg(short, long)]
    close: bool,

    /// Open the next group's scramble set
    #[arg(short, long)]
    next: bool,

    /// Write an archive copy of the competition without personal data
    #[arg(long)]
    export: bool,
}

fn desk(config: &Config, registry: &Registry) -> StageDesk {
    Desk::new(
        TerminalOperator,
        SystemClock,
        registry.clone(),
        StagePublisher::new(config.clone()),
        config.policy.clone(),
    )
}

async fn init(id: &str, config: &Config, registry: &Registry, store: &JsonFileStore) -> Result<()> {
    let wcif = registry.get_wcif(id).await
        .with_context(|| format!("could not fetch competition {id}"))?;
    let scramble_sets = scramble_sets::list_scramble_sets(&config.scramble_dir(&wcif.name))?;
    let passcodes = load_passcodes(&config.passcode_file(&wcif.name))?;
    let competition = build_competition(&wcif, &scramble_sets, &passcodes)
        .with_context(|| format!("could not build competition {id}"))?;

    if let Err(err) = avatars::load_avatars(registry, &competition.persons, &config.avatar_dir()).await {
        warn!(%err, "could not load avatars");
        println!("Could not load avatars: {err}");
    }
    store.save(&competition)?;
    println!("Loaded {} with {} rounds", competition.name, competition.rounds.len());
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    telemetry::init();
    let args = Args::parse();

    let mut config = Config::load(args.data_dir.clone(), args.registry_url.clone())
        .context("could not load configuration")?;
    config.prepare_dirs()
        .with_context(|| format!("could not create data directory {}", config.data_dir.display()))?;
    let store = JsonFileStore::new(config.snapshot_path());
    let registry = Registry::new(config.registry_url.clone());
    info!(data_dir = %config.data_dir.display(), "scramble desk ready");

    if args.reload_competitors {
        let mut competition = store.load()?;
        let wcif = registry.get_wcif(&competition.id).await
            .context("could not fetch competitors")?;
        competition.reload_persons(&wcif)?;
        store.save(&competition)?;
        println!("Reloaded {} competitors", competition.persons.len());
    }

    if let Some(ip) = &args.ip {
        config.save_server_ip(ip).context("could not save server IP")?;
    }

    if args.debug {
        let mut competition = store.load()?;
        competition.sort_rounds();
        print!("{}", competition.progress_report());
    }

    if let Some(code) = &args.open {
        let mut competition = store.load()?;
        desk(&config, &registry).open_scramble_set(&mut competition, code).await
            .with_context(|| format!("could not open scramble set {code}"))?;
        store.save(&competition)?;
    }

    if let Some(code) = &args.start_from {
        let mut competition = store.load()?;
        competition.sort_rounds();
        competition.start_from(code)?;
        store.save(&competition)?;
        println!("Starting from {code}");
    }

    if let Some(id) = &args.init {
        init(id, &config, &registry, &store).await?;
    }

    if args.close {
        let mut competition = store.load()?;
        competition.sort_rounds();
        match desk(&config, &registry).close_active(&mut competition).await.context("could not close scramble set")? {
            CloseOutcome::HandIn { activity_code } => println!("Closed; {activity_code} is up next"),
            CloseOutcome::Intermission => println!("Closed; no groups left"),
        }
        store.save(&competition)?;
    }

    if args.next {
        let mut competition = store.load()?;
        competition.sort_rounds();
        match desk(&config, &registry).start_next_group(&mut competition).await.context("could not start next group")? {
            StartOutcome::Started { activity_code } => {
                store.save(&competition)?;
                println!("Started {activity_code}");
            }
            StartOutcome::NoNewRounds => println!("No new rounds"),
            StartOutcome::Declined => println!("Aborted"),
        }
    }

    if args.export {
        let competition = store.load()?;
        let path = export(&competition, &config.archive_dir()).context("could not export competition")?;
        println!("Exported to {}", path.display());
    }

    Ok(())
}
