//! # Main Entry Point
//!
//! Initializes the bot:
//! - Domain: Configuration and Types
//! - Infrastructure: Webex, Open Notify, Geoapify, SpaceX
//! - Application: Router, Parsing, Reporting, Logging
//!
//! Then polls the configured room until interrupted.

mod application;
mod domain;
mod infrastructure;
mod strings;

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::application::router::{CommandRouter, Providers, resolve_room, run_until};
use crate::domain::config::AppConfig;
use crate::infrastructure::clock::TokioClock;
use crate::infrastructure::geoapify::GeoapifyService;
use crate::infrastructure::open_notify::OpenNotifyService;
use crate::infrastructure::spacex::SpaceXService;
use crate::infrastructure::webex::WebexService;
use crate::strings::logs;

#[derive(Debug, Parser)]
#[command(name = "orbit-herald", version, about = "Answers ISS and launch commands in a Webex room")]
struct Args {
    /// Path to the YAML configuration file
    #[arg(short, long, default_value = "data/config.yaml")]
    config: PathBuf,

    /// Room id to monitor (overrides the config file)
    #[arg(long)]
    room: Option<String>,

    /// Monitor the first room whose title contains this text
    #[arg(long)]
    room_title: Option<String>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();

    // 1. Load Configuration
    let mut config = AppConfig::load(&args.config)?;
    if args.room.is_some() {
        config.services.webex.room = args.room;
    }
    if args.room_title.is_some() {
        config.services.webex.room_title = args.room_title;
    }

    // 2. Logging Setup
    let _guard = application::logging::init(&config.logging)?;
    tracing::info!("{}", logs::STARTING);
    tracing::info!("{}", logs::config_loaded(&args.config.display().to_string()));

    // 3. Initialize Infrastructure
    let webex = &config.services.webex;
    let token = webex.resolve_token()?;
    let geo_key = config.services.geocode.resolve_api_key()?;
    let http = infrastructure::http::build_client(Duration::from_secs(
        config.bot.request_timeout_secs,
    ))?;

    let chat = Arc::new(WebexService::new(http.clone(), &webex.base_url, token));
    let providers = Providers {
        chat: chat.clone(),
        orbital: Arc::new(OpenNotifyService::new(http.clone(), &config.services.iss.url)),
        geocoder: Arc::new(GeoapifyService::new(
            http.clone(),
            &config.services.geocode.url,
            geo_key,
        )),
        launches: Arc::new(SpaceXService::new(http, &config.services.launches.base_url)),
    };

    // 4. Select the room
    let room_id = resolve_room(
        chat.as_ref(),
        webex.room.as_deref(),
        webex.room_title.as_deref(),
    )
    .await?;

    // 5. Poll until interrupted; an in-flight command is dropped with the loop.
    let mut router = CommandRouter::new(providers, Arc::new(TokioClock), room_id, &config.bot);
    run_until(&mut router, async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("{}", logs::shutdown_fail(&e.to_string()));
        }
    })
    .await;

    Ok(())
}
