//! # Robot Service - Player-owned robots on a planet map
//!
//! This is the main entry point that wires everything together.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  main.rs (this file) - Dependency Injection & Wiring           │
//! │    │                                                            │
//! │    ├── Creates: robot repository (in-memory or JSON files)     │
//! │    ├── Creates: game map client (HTTP or static demo map)      │
//! │    ├── Creates: RobotApplicationService (usecase)              │
//! │    └── Runs: A scripted command session                        │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use robot_adapter::config::AppConfig;
use robot_adapter::gateway::http_game_map::HttpGameMapClient;
use robot_adapter::gateway::static_game_map::StaticGameMap;
use robot_adapter::repository::in_memory::{InMemoryLocationBlockStore, InMemoryRobotRepository};
use robot_adapter::repository::json_file::JsonFileRobotRepository;
use robot_domain::{
    Location, LocationId, LocationType, PlayerId, Robot, RobotRepository, UpgradeType,
};
use robot_usecase::{
    BlockCommand, GameMapClient, LocationBlockStore, MoveCommand, RegenerateEnergyCommand,
    RobotApplicationService, RobotServiceError, UpgradeCommand,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

type Service = RobotApplicationService<
    Box<dyn RobotRepository>,
    Box<dyn GameMapClient>,
    InMemoryLocationBlockStore,
>;

#[derive(Parser)]
#[command(name = "robot")]
#[command(about = "Robot service - runs a scripted command session against the wired adapters")]
#[command(version)]
struct Cli {
    /// JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Player who owns the demo robot
    #[arg(short, long, default_value = "player-1")]
    player: String,
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let player = PlayerId::new(cli.player);

    let config = match &cli.config {
        Some(path) => AppConfig::from_file(path)?,
        None => AppConfig::default(),
    }
    .with_env_overrides();

    info!("🤖 Robot Service");
    info!("   Hexagonal Architecture + DDD");
    info!("");

    // ========================================
    // Dependency Injection - Wire up the system
    // ========================================

    let repository: Box<dyn RobotRepository> = match &config.storage.directory {
        Some(directory) => {
            info!("💾 Storage: JSON files in {}", directory.display());
            Box::new(JsonFileRobotRepository::open(directory.clone())?)
        }
        None => {
            info!("💾 Storage: in-memory");
            Box::new(InMemoryRobotRepository::new())
        }
    };

    let game_map: Box<dyn GameMapClient> = match &config.game_map {
        Some(game_map) => {
            info!(
                "🗺️  Game map: {} (timeout {} ms)",
                game_map.base_url, game_map.timeout_ms
            );
            Box::new(HttpGameMapClient::new(game_map)?)
        }
        None => {
            info!("🗺️  Game map: static demo map");
            Box::new(StaticGameMap::demo(player.clone()))
        }
    };

    let service = RobotApplicationService::new(
        repository,
        game_map,
        InMemoryLocationBlockStore::new(),
    );

    run_session(&service, &player)
}

/// Drive one robot through every command, including the rejected paths
fn run_session(service: &Service, player: &PlayerId) -> anyhow::Result<()> {
    info!("");
    info!("🚀 Spawning robot...");

    let spawn = Location::new(
        LocationId::new("spawn"),
        LocationType::Spawn,
        Some(player.clone()),
    )?;
    let robot = service
        .spawn_robot(player.clone(), spawn)
        .context("spawning the demo robot")?;
    let id = robot.id().clone();
    describe(&robot);

    info!("");
    info!("🎮 Running commands...");

    step(
        "move to planet-a",
        service.move_robot(&MoveCommand::new(
            id.clone(),
            player.clone(),
            LocationId::new("planet-a"),
        )),
    );
    step(
        "upgrade max energy",
        service.upgrade(&UpgradeCommand::new(
            id.clone(),
            player.clone(),
            UpgradeType::MaxEnergy,
        )),
    );
    step(
        "regenerate energy",
        service.regenerate_energy(&RegenerateEnergyCommand::new(id.clone(), player.clone())),
    );
    step(
        "block planet-a",
        service.block(&BlockCommand::new(id.clone(), player.clone())),
    );

    // Still on the blocked planet: the attempt costs energy and fails
    step(
        "escape to planet-b",
        service.move_robot(&MoveCommand::new(
            id.clone(),
            player.clone(),
            LocationId::new("planet-b"),
        )),
    );

    info!("   → Releasing block on planet-a");
    service.blocks().release(&LocationId::new("planet-a"))?;

    step(
        "move to planet-b",
        service.move_robot(&MoveCommand::new(
            id.clone(),
            player.clone(),
            LocationId::new("planet-b"),
        )),
    );
    step(
        "move to spawn (not adjacent)",
        service.move_robot(&MoveCommand::new(
            id.clone(),
            player.clone(),
            LocationId::new("spawn"),
        )),
    );
    step(
        "stranger moves the robot",
        service.move_robot(&MoveCommand::new(
            id.clone(),
            PlayerId::new("intruder"),
            LocationId::new("station"),
        )),
    );

    // ========================================
    // Summary
    // ========================================

    info!("");
    info!("📊 Final Status");
    let stored = service
        .repository()
        .find_by_id(&id)?
        .context("demo robot disappeared from the repository")?;
    describe(&stored);
    info!(
        "   Robots owned by {}: {}",
        player,
        service.repository().find_by_owner(player)?.len()
    );

    info!("");
    info!("🤖 Robot session complete!");
    Ok(())
}

fn step(label: &str, result: Result<Robot, RobotServiceError>) {
    match result {
        Ok(robot) => info!(
            "   ✓ {}: at {} with {}/{} energy",
            label,
            robot.location().id(),
            robot.energy(),
            robot.max_energy()
        ),
        Err(e) => warn!("   ✗ {}: {} ({})", label, e, e.kind()),
    }
}

fn describe(robot: &Robot) {
    info!("   Robot: {}", robot.id());
    info!("   Owner: {}", robot.owner());
    info!("   Location: {}", robot.location().id());
    info!(
        "   Health: {}/{}  Energy: {}/{}",
        robot.health(),
        robot.max_health(),
        robot.energy(),
        robot.max_energy()
    );
    for kind in UpgradeType::all() {
        info!("   {:<13} level {}", kind.name(), robot.level(*kind));
    }
}
