//! harbor — a ferry crossing between two maps and a barge circling the dock.
//!
//! The ferry (path 1) docks on map 1, crosses to map 2 through a teleport
//! frame and returns.  The barge (path 2) loops on map 1.  A handful of
//! players stand around the docks, some walk onto the decks, and one rides
//! a horse that is itself carried by the ferry.
//!
//! Run with `RUST_LOG=debug` to follow every boarding and handoff.

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tracing::info;

use mp_behavior::{CarrierBehavior, NoopMovement};
use mp_carrier::{SeatDefinition, StaticSpawn};
use mp_core::{CarrierId, MapId, Pose, Tick, WorldConfig};
use mp_entity::{EntityKind, EntitySpawn, EntityStore};
use mp_output::{CsvWriter, OutputWriter, TraceObserver};
use mp_path::load_paths_csv;
use mp_sim::{TickSummary, WorldBuilder, WorldObserver};
use mp_spatial::ProximityRegions;

// ── Constants ─────────────────────────────────────────────────────────────────

const PLAYER_COUNT: usize = 12;
const FERRY_PATH:   u32   = 1;
const BARGE_PATH:   u32   = 2;
const OUTPUT_DIR:   &str  = "output/harbor";

// ── Behavior ──────────────────────────────────────────────────────────────────

/// Counts dock calls and crossings.
#[derive(Default)]
struct HarborMaster {
    dockings:  usize,
    crossings: usize,
}

impl CarrierBehavior for HarborMaster {
    fn on_arrival(&mut self, carrier: CarrierId, frame: usize, event: Option<u32>) {
        if let Some(id) = event {
            self.dockings += 1;
            info!(%carrier, frame, event = id, "docked");
        }
    }

    fn on_teleport(&mut self, _carrier: CarrierId, _from: MapId, _to: MapId) {
        self.crossings += 1;
    }
}

// ── Observer wrapper to count rows ────────────────────────────────────────────

struct CountingObserver<W: OutputWriter> {
    inner:      TraceObserver<W>,
    snapshots:  usize,
    summaries:  usize,
    teleports:  usize,
}

impl<W: OutputWriter> CountingObserver<W> {
    fn new(inner: TraceObserver<W>) -> Self {
        Self { inner, snapshots: 0, summaries: 0, teleports: 0 }
    }
}

impl<W: OutputWriter> WorldObserver for CountingObserver<W> {
    fn on_tick_end(&mut self, summary: &TickSummary) {
        self.summaries += 1;
        self.teleports += summary.teleports;
        self.inner.on_tick_end(summary);
    }

    fn on_snapshot(&mut self, tick: Tick, carriers: &mp_carrier::CarrierStore, entities: &EntityStore) {
        self.snapshots += 1;
        self.inner.on_snapshot(tick, carriers, entities);
    }

    fn on_world_end(&mut self, final_tick: Tick) {
        self.inner.on_world_end(final_tick);
    }
}

// ── Setup ─────────────────────────────────────────────────────────────────────

fn ferry_statics() -> Vec<StaticSpawn> {
    vec![
        StaticSpawn { map: MapId(1), kind: EntityKind::Creature, local: Pose::new(4.0, 0.0, 0.0, 0.0) },
        StaticSpawn { map: MapId(2), kind: EntityKind::Creature, local: Pose::new(-4.0, 0.0, 0.0, 0.0) },
        StaticSpawn { map: MapId(2), kind: EntityKind::GameObject, local: Pose::new(0.0, 3.0, 0.0, 0.0) },
    ]
}

fn barge_statics() -> Vec<StaticSpawn> {
    vec![StaticSpawn { map: MapId(1), kind: EntityKind::GameObject, local: Pose::new(0.0, -2.0, 0.0, 0.0) }]
}

/// Players scattered around the map-1 docks.
fn scatter_players(store: &mut EntityStore, rng: &mut SmallRng) {
    for _ in 0..PLAYER_COUNT {
        let x = rng.gen_range(-20.0..80.0);
        let y = rng.gen_range(-10.0..60.0);
        let heading = rng.gen_range(0.0..std::f32::consts::TAU);
        store.spawn(EntitySpawn::player(MapId(1), Pose::new(x, y, 0.0, heading)));
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,mp_carrier=warn".into()),
        )
        .with_target(false)
        .init();

    let root = Path::new(env!("CARGO_MANIFEST_DIR"));

    // 1. Configuration and paths.
    let config = WorldConfig::load(&root.join("config.toml")).context("loading config.toml")?;
    let mut templates = load_paths_csv(&root.join("paths.csv")).context("loading paths.csv")?;
    let ferry = templates.remove(&FERRY_PATH).context("paths.csv has no ferry path")?;
    let barge = templates.remove(&BARGE_PATH).context("paths.csv has no barge path")?;
    println!("=== harbor ===");
    println!(
        "Ticks: {} × {} ms  |  Players: {PLAYER_COUNT}  |  Seed: {}",
        config.total_ticks, config.tick_ms, config.seed
    );

    // 2. Population.
    let mut rng = SmallRng::seed_from_u64(config.seed);
    let mut entities = EntityStore::new();
    scatter_players(&mut entities, &mut rng);
    let horse = entities.spawn(EntitySpawn::creature(MapId(1), Pose::new(2.0, 1.0, 0.0, 0.0)));

    // 3. World.
    let regions = ProximityRegions::from_config(&config);
    let mut world = WorldBuilder::new(config, HarborMaster::default(), regions, NoopMovement)
        .entities(entities)
        .platform(ferry, ferry_statics())
        .platform(barge, barge_statics())
        .build()?;
    let (ferry_id, barge_id) = (CarrierId(0), CarrierId(1));

    // Half the players walk onto a deck; the horse boards the ferry.
    let players: Vec<_> = world.entities.players_on(MapId(1)).map(|e| e.id).collect();
    for (i, p) in players.iter().enumerate().take(PLAYER_COUNT / 2) {
        let deck = if i % 2 == 0 { ferry_id } else { barge_id };
        world.board_platform(deck, *p)?;
    }
    world.board_platform(ferry_id, horse)?;
    world.install_mount(
        horse,
        vec![SeatDefinition::passenger(Pose::new(0.0, 0.0, 1.5, 0.0)).controlling()],
        &[],
    )?;
    if let Some(rider) = players.last() {
        world.apply_ride_effect(horse, *rider, None)?;
    }

    // 4. Output.
    std::fs::create_dir_all(OUTPUT_DIR)?;
    let writer = CsvWriter::new(Path::new(OUTPUT_DIR))?;
    let mut obs = CountingObserver::new(TraceObserver::new(writer));

    // 5. Run.
    let t0 = Instant::now();
    world.run(&mut obs)?;
    let elapsed = t0.elapsed();
    if let Some(e) = obs.inner.take_error() {
        eprintln!("output error: {e}");
    }
    world.check_consistency()?;

    // 6. Summary.
    println!("Run complete in {:.3} s", elapsed.as_secs_f64());
    println!("  tick_summaries.csv : {} rows", obs.summaries);
    println!("  pose snapshots     : {}", obs.snapshots);
    println!("  crossings          : {} (observer) / {} (behavior)", obs.teleports, world.behavior.crossings);
    println!("  dock calls         : {}", world.behavior.dockings);
    println!();

    println!("{:<10} {:<5} {:>9} {:>9} {:>11}", "Carrier", "Map", "X", "Y", "Passengers");
    println!("{}", "-".repeat(48));
    for p in world.carriers.platforms() {
        println!(
            "{:<10} {:<5} {:>9.2} {:>9.2} {:>11}",
            p.id.0,
            p.map.0,
            p.pose.x,
            p.pose.y,
            p.registry.len(),
        );
    }

    Ok(())
}
