//! Periodic program refresh.
//!
//! One pipeline run at a time: the interval task and manual `/refresh`
//! requests share a lock, so a slow fetch cannot race a newer one into the
//! snapshot.

use std::sync::Arc;

use tokio::time::{interval, Duration, MissedTickBehavior};
use tracing::info;

use crate::generate;
use crate::pipeline;
use crate::routes::AppState;
use crate::types::RaceProgram;

/// Run the pipeline once and replace the shared snapshot.
pub async fn refresh_program(state: &AppState) -> Arc<RaceProgram> {
    let _guard = state.fetch_lock.lock().await;

    let mut rng = generate::rng_from(state.config.generator.seed);
    let program = Arc::new(pipeline::fetch_race_program(&state.fetcher, &state.config, &mut rng).await);

    *state.program.write().await = Arc::clone(&program);
    program
}

/// Periodic refresh loop; runs until the server shuts down.
pub async fn run(state: Arc<AppState>) {
    let mut ticker = interval(Duration::from_secs(state.config.refresh.interval_secs));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    // The first tick completes immediately and the startup fetch already
    // happened, so consume it before entering the cycle.
    ticker.tick().await;

    loop {
        ticker.tick().await;
        let program = refresh_program(&state).await;
        info!(
            "program refreshed: {} races via {:?}",
            program.races.len(),
            program.source
        );
    }
}
