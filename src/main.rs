use std::sync::Arc;

use anyhow::{Context, Result};
use sr_actors::{
    cli::config_path_from_args,
    config::Config,
    director::{DirectorTelemetryPort, FixedPointDirector, TracingDirectorTelemetry},
    logging::init_tracing,
};

fn main() -> Result<()> {
    let config_path = config_path_from_args()?;
    let config = Config::load(&config_path)
        .with_context(|| format!("failed to load config from {}", config_path.display()))?;
    let logging_guard = init_tracing(&config.logging)?;

    let telemetry: Arc<dyn DirectorTelemetryPort> = Arc::new(TracingDirectorTelemetry);
    let network = config
        .network
        .build_with_telemetry(&telemetry)
        .context("failed to build network")?;
    let mut director = FixedPointDirector::new(network, config.director.clone())
        .with_telemetry(Arc::clone(&telemetry));

    let schedule = director.schedule();
    if !schedule.is_acyclic() {
        let cyclic: Vec<&str> = schedule
            .cyclic()
            .iter()
            .map(|id| director.network().actor_name(*id))
            .collect();
        tracing::warn!(
            target: "sr::run",
            actors = ?cyclic,
            "schedule_has_cycles"
        );
    }

    let ticks = config.tick_count();
    tracing::info!(
        target: "sr::run",
        run_id = %logging_guard.run_id(),
        network = %config.network.name,
        actors = director.network().actor_count(),
        ticks,
        "run_started"
    );

    director
        .initialize()
        .context("failed to initialize network")?;

    for tick in 1..=ticks {
        let report = director
            .iterate(&config.stimuli_for_tick(tick))
            .with_context(|| format!("tick {tick} failed"))?;
        println!("{}", serde_json::to_string(&report)?);
        if !report.proceed {
            tracing::info!(target: "sr::run", tick, "run_finished_early");
            break;
        }
    }

    tracing::info!(target: "sr::run", ticks = director.tick(), "run_completed");
    Ok(())
}
