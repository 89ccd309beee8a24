//! Headless combat simulation.
//!
//! Loads content, places a scenario on the in-memory sandbox and runs the
//! behavior scheduler for a fixed number of frames, logging what happens.
//!
//! ```bash
//! COMBAT_SCENARIO=skirmish COMBAT_FRAMES=300 RUST_LOG=debug cargo run -p combat-sim
//! ```

use anyhow::{Context, Result};
use combat_content::ContentFactory;
use combat_core::{PcgRng, Phase};
use combat_runtime::{RuntimeConfig, SandboxWorld, Scenario, Scheduler};

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = RuntimeConfig::from_env();
    tracing::info!("Starting combat simulation: {:?}", config);

    // 1. Content
    let factory = match &config.content_dir {
        Some(dir) => ContentFactory::new(dir.clone()),
        None => ContentFactory::bundled(),
    };
    let behavior = config.apply(factory.load_config()?);
    let actions = factory.load_actions()?;
    let archetypes = factory.load_archetypes(&actions)?;
    tracing::info!(
        "Loaded {} actions and {} archetypes from {}",
        actions.len(),
        archetypes.len(),
        factory.data_dir().display()
    );

    // 2. Scheduler and scenario
    let mut scheduler = Scheduler::builder()
        .config(behavior)
        .seed(config.seed)
        .build();
    let world = SandboxWorld::new();
    let scenario_path = factory.scenario_path(&config.scenario);
    let scenario = Scenario::load_from_file(&scenario_path)
        .with_context(|| format!("loading scenario {}", scenario_path.display()))?;
    let placed = scenario.populate(&mut scheduler, &world, &archetypes)?;
    tracing::info!("Scenario '{}' placed {} agents", scenario.name, placed.len());

    // 3. Frame loop
    let rng = PcgRng;
    let mut failures = 0usize;
    for _ in 0..config.frames {
        let env = world.env(&actions, &rng);
        let report = scheduler.tick(&env)?;
        failures += report.failed.len();
        world.advance();
    }

    // 4. Summary
    let mut keys: Vec<_> = placed.iter().collect();
    keys.sort_by_key(|(_, id)| **id);
    for (key, id) in keys {
        match scheduler.agent(*id) {
            Some(agent) => tracing::info!(
                "{:>8} {}: phase={} target={:?} at {} hp={:?}",
                key,
                id,
                agent.phase,
                agent.current_target,
                agent.position,
                world.hp(agent.entity)
            ),
            None => tracing::info!("{:>8} {}: removed", key, id),
        }
    }

    let engaged = scheduler
        .registry()
        .all_agents()
        .into_iter()
        .filter_map(|id| scheduler.agent(id))
        .filter(|agent| agent.phase != Phase::Idle)
        .count();
    tracing::info!(
        "Simulated {} frames: {} actions executed, {} agents still engaged, {} dispatch failures",
        scheduler.frame(),
        world.executions().len(),
        engaged,
        failures
    );

    Ok(())
}
