// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Carbon Tracker API Server
//!
//! Logs user activities, scores their carbon footprint and serves the
//! dashboard and leaderboard.

use carbon_tracker::{
    config::Config,
    db::Db,
    services::{EmissionFactors, FootprintCalculator},
    time_utils::SystemClock,
    AppState,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging()?;

    // Load configuration from environment
    let config = Config::from_env()?;
    tracing::info!(
        port = config.port,
        backend = ?config.storage_backend,
        "Starting Carbon Tracker API"
    );

    let db = Db::connect(&config).await?;

    // Emission factors: built-in table unless a file is configured
    let factors = match &config.emission_factors_path {
        Some(path) => {
            tracing::info!(path = %path.display(), "Loading emission factors");
            EmissionFactors::load_from_file(path)?
        }
        None => EmissionFactors::default(),
    };
    tracing::info!(
        transport_modes = factors.transport.len(),
        meal_types = factors.food.len(),
        "Emission factors loaded"
    );

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        db,
        calculator: FootprintCalculator::new(factors),
        clock: Arc::new(SystemClock),
    });

    // Build router
    let app = carbon_tracker::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() -> Result<(), Box<dyn std::error::Error>> {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("carbon_tracker=debug".parse()?)
                .add_directive("info".parse()?),
        )
        .with(format)
        .init();
    Ok(())
}
