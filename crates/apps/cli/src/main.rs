use std::collections::HashMap;
use std::env;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tokio::sync::watch;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use basemap::{CascadeConfig, CascadeState, LayerCommand, TileCascade, TileEvent};
use client::{ApiClient, ApiConfig, CaseSource, PointCache, PrefsStore};
use dataset::{build_world_dataset, CancelToken, SeriesBuilder, WorldOptions, WorldSnapshot};
use model::{Coordinate, DateSpan, Place};

#[derive(Parser)]
#[command(name = "casemap", about = "Case metrics over place and time")]
struct Cli {
    /// Backend base URL; overrides the stored preference and environment.
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Preferences file location.
    #[arg(long, global = true)]
    prefs_path: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Daily (or bucketed) series for a place and date range.
    Series {
        #[arg(long)]
        start: NaiveDate,
        #[arg(long)]
        end: NaiveDate,
        /// Country name; omit for the aggregate World scope.
        #[arg(long)]
        place: Option<String>,
    },
    /// Aggregate totals for a place and date range.
    Totals {
        #[arg(long)]
        start: NaiveDate,
        #[arg(long)]
        end: NaiveDate,
        #[arg(long)]
        place: Option<String>,
    },
    /// Ranked leaderboard and map points across every known country.
    World {
        #[arg(long)]
        start: NaiveDate,
        #[arg(long)]
        end: NaiveDate,
        /// Leaderboard rows to print.
        #[arg(long, default_value_t = 15)]
        top: usize,
    },
    /// List the countries the backend knows about.
    Places,
    /// Probe tile providers and report which one the map would use.
    Basemap,
    /// Backend health check.
    Ping,
    /// Read or write persisted preferences.
    Prefs {
        #[command(subcommand)]
        action: PrefsAction,
    },
}

#[derive(Subcommand)]
enum PrefsAction {
    Get { key: String },
    Set { key: String, value: String },
    List,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    if let Err(err) = run(cli).await {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn prefs_path(cli_path: Option<PathBuf>) -> PathBuf {
    cli_path
        .or_else(|| env::var("CASEMAP_PREFS").ok().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(".casemap/prefs.json"))
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let prefs = PrefsStore::new(prefs_path(cli.prefs_path));
    let config = ApiConfig::resolve(cli.api_url.as_deref(), &prefs).await;

    match cli.command {
        Command::Series { start, end, place } => {
            series(&config, DateSpan::new(start, end), place).await
        }
        Command::Totals { start, end, place } => {
            totals(&config, DateSpan::new(start, end), place).await
        }
        Command::World { start, end, top } => {
            world(&config, DateSpan::new(start, end), top).await
        }
        Command::Places => places(&config).await,
        Command::Basemap => basemap_probe().await,
        Command::Ping => {
            let message = ApiClient::new(&config).ping().await?;
            println!("{message}");
            Ok(())
        }
        Command::Prefs { action } => prefs_cmd(&prefs, action).await,
    }
}

async fn series(
    config: &ApiConfig,
    span: DateSpan,
    place: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let place = Place::from_arg(place.as_deref());
    let builder = SeriesBuilder::new(
        Arc::new(ApiClient::new(config)),
        Arc::new(PointCache::new()),
    );

    let points = builder.build(span, &place).await?;
    if points.is_empty() {
        println!("no data for {place} over {span}");
        return Ok(());
    }

    println!("{:<12} {:>12} {:>10} {:>12}", "date", "confirmed", "deaths", "recovered");
    for point in &points {
        println!(
            "{:<12} {:>12} {:>10} {:>12}",
            point.date, point.confirmed, point.deaths, point.recovered
        );
    }
    Ok(())
}

async fn totals(
    config: &ApiConfig,
    span: DateSpan,
    place: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let place = Place::from_arg(place.as_deref());
    let builder = SeriesBuilder::new(
        Arc::new(ApiClient::new(config)),
        Arc::new(PointCache::new()),
    );

    match builder.range_totals(span, &place).await? {
        Some(totals) => {
            println!("{place}, {span}");
            println!("confirmed: {}", totals.confirmed);
            println!("deaths:    {}", totals.deaths);
            println!("recovered: {}", totals.recovered);
        }
        None => println!("no data for {place} over {span}"),
    }
    Ok(())
}

async fn world(
    config: &ApiConfig,
    span: DateSpan,
    top: usize,
) -> Result<(), Box<dyn std::error::Error>> {
    let client = Arc::new(ApiClient::new(config));
    let countries = client.places().await?.countries();
    info!(countries = countries.len(), "building world dataset");

    let cancel = CancelToken::new();
    let interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("interrupted; abandoning world dataset build");
            interrupt.cancel();
        }
    });

    let (snapshot_tx, mut snapshot_rx) = watch::channel(WorldSnapshot::default());
    let progress = tokio::spawn(async move {
        while snapshot_rx.changed().await.is_ok() {
            let snap = snapshot_rx.borrow_and_update().clone();
            if !snap.complete {
                eprint!("\r{:>3}% ({} places ranked)", snap.progress, snap.leaderboard.len());
            }
        }
        eprintln!();
    });

    // The backend supplies no coordinate table in this API; the static
    // reference table carries the map projection on its own.
    let primary_coords: Arc<HashMap<String, Coordinate>> = Arc::new(HashMap::new());
    let dataset = build_world_dataset(
        client,
        countries,
        span,
        Place::World,
        primary_coords,
        WorldOptions::default(),
        cancel,
        snapshot_tx,
    )
    .await;
    let _ = progress.await;

    let Some(dataset) = dataset else {
        println!("cancelled");
        return Ok(());
    };

    println!(
        "ranked {} places ({} skipped), {} map points",
        dataset.successes,
        dataset.skipped,
        dataset.map_points.len()
    );
    println!("{:<5} {:<28} {:>12} {:>10}", "rank", "place", "confirmed", "deaths");
    for (rank, entry) in dataset.leaderboard.iter().take(top).enumerate() {
        println!(
            "{:<5} {:<28} {:>12} {:>10}",
            rank + 1,
            entry.place,
            entry.confirmed,
            entry.deaths
        );
    }
    Ok(())
}

async fn places(config: &ApiConfig) -> Result<(), Box<dyn std::error::Error>> {
    let tree = ApiClient::new(config).places().await?;
    let countries = tree.countries();
    for name in &countries {
        println!("{name}");
    }
    eprintln!("{} countries", countries.len());
    Ok(())
}

/// Probe each candidate with a few sample tiles, feeding outcomes into the
/// cascade until it settles on a provider.
async fn basemap_probe() -> Result<(), Box<dyn std::error::Error>> {
    const SAMPLE_TILES: [(u8, u32, u32); 3] = [(2, 1, 1), (2, 2, 1), (3, 4, 2)];

    let http = reqwest::Client::new();
    let (mut cascade, mut commands) = TileCascade::new(
        basemap::providers::default_candidates(),
        basemap::providers::fallback_provider(),
        CascadeConfig::default(),
        Instant::now(),
    );

    loop {
        for command in commands.drain(..) {
            match command {
                LayerCommand::Attach(provider) => info!(provider = %provider.name, "attaching"),
                LayerCommand::ApplyOverlayFilter => info!("applying darkening overlay"),
                LayerCommand::RemoveOverlayFilter => info!("removing darkening overlay"),
            }
        }

        if !matches!(cascade.state(), CascadeState::Trying(_)) {
            break;
        }

        let probing = cascade.state();
        let provider = cascade.active_provider().clone();
        for (z, x, y) in SAMPLE_TILES {
            let url = provider.tile_url(z, x, y);
            let loaded = match http
                .get(&url)
                .timeout(Duration::from_secs(5))
                .send()
                .await
            {
                Ok(resp) => resp.status().is_success(),
                Err(_) => false,
            };
            let event = if loaded {
                TileEvent::Loaded
            } else {
                TileEvent::Error
            };
            commands.extend(cascade.on_event(event, Instant::now()));
            if cascade.state() != probing {
                break;
            }
        }

        // Still on probation after the samples: treat it as the overall
        // window expiring with nothing served.
        if cascade.state() == probing {
            if let Some(deadline) = cascade.next_deadline() {
                commands.extend(cascade.on_deadline(deadline));
            }
        }
    }

    let (loads, errors) = cascade.load_counts();
    match cascade.state() {
        CascadeState::Steady(_) => println!(
            "using {} ({loads} loads, {errors} errors)",
            cascade.active_provider().name
        ),
        CascadeState::FilteredFallback => println!(
            "all candidates failed; using {} with darkening overlay",
            cascade.active_provider().name
        ),
        CascadeState::Trying(_) => unreachable!("probe loop exits only on settled states"),
    }
    Ok(())
}

async fn prefs_cmd(
    prefs: &PrefsStore,
    action: PrefsAction,
) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        PrefsAction::Get { key } => match prefs.get(&key).await? {
            Some(value) => println!("{value}"),
            None => println!("(unset)"),
        },
        PrefsAction::Set { key, value } => {
            prefs.set(&key, &value).await?;
            println!("{key} = {value}");
        }
        PrefsAction::List => {
            for (key, value) in prefs.list().await? {
                println!("{key} = {value}");
            }
        }
    }
    Ok(())
}
