use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use scenecast_core::{AppConfig, AppState};
use scenecast_obs::{ObsConfig, ObsSession};

mod cli;
mod config;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("scenecast=info,tower_http=debug")),
        )
        .init();

    let args = cli::Args::parse();
    let config = config::Config::load(&args.config)?;

    let obs = Arc::new(ObsSession::new(ObsConfig {
        url: config.obs.url.clone(),
        password: config.obs.password.clone(),
        connect_timeout: Duration::from_secs(config.obs.connect_timeout_secs),
        request_timeout: Duration::from_secs(config.obs.request_timeout_secs),
    }));

    let state = AppState {
        config: AppConfig {
            default_scene: config.playback.scene.clone(),
            default_layer: config.playback.layer,
            mute_sources: config.playback.mute_sources.clone(),
        },
        obs,
    };

    let router = scenecast_api::build_router().with_state(state);

    let listener = tokio::net::TcpListener::bind(&config.server.bind_address).await?;

    print_startup_banner(&config);

    // The OBS session itself is dialed lazily by the first request.
    axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
            println!();
            tracing::info!("Shutting down (ctrl-c)...");
        })
        .await?;

    Ok(())
}

fn print_startup_banner(config: &config::Config) {
    println!();
    println!("  Scenecast OBS control gateway");
    println!();
    println!("  Listening:    http://{}", config.server.bind_address);
    println!("  OBS:          {}", config.obs.url);
    println!("  Scene:        {}", config.playback.scene);
    println!("  Layer:        {}", config.playback.layer);
    if config.playback.mute_sources.is_empty() {
        println!("  Mute list:    (none)");
    } else {
        println!("  Mute list:    {}", config.playback.mute_sources.join(", "));
    }
    println!();
}
