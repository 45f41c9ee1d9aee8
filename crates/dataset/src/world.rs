//! World dataset orchestration.
//!
//! Builds the ranked leaderboard and map-point set for a date range by
//! fanning range-aggregate queries over every known place with a bounded
//! worker pool. Workers claim places off a shared atomic cursor and report
//! each completed or skipped item over a channel to a single-owner
//! collector, which owns the accumulator and publishes partial snapshots
//! as the batch progresses. One place failing never aborts the batch.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tracing::{debug, warn};

use client::{ApiError, CaseSource};
use model::{Coordinate, DateSpan, LeaderboardEntry, MapPoint, Place};

use crate::cancel::CancelToken;

pub const DEFAULT_WORKERS: usize = 8;
/// Full leaderboard/map snapshots are recomputed every this many appends.
pub const SNAPSHOT_EVERY: usize = 20;

const DEFAULT_ITEM_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone)]
pub struct WorldOptions {
    pub workers: usize,
    pub snapshot_every: usize,
    /// Upper bound on one place's fetch; a slow backend must not pin a
    /// worker slot for the rest of the batch. `None` waits indefinitely.
    pub per_item_timeout: Option<Duration>,
}

impl Default for WorldOptions {
    fn default() -> Self {
        Self {
            workers: DEFAULT_WORKERS,
            snapshot_every: SNAPSHOT_EVERY,
            per_item_timeout: Some(DEFAULT_ITEM_TIMEOUT),
        }
    }
}

/// One published state of an in-progress (or finished) build.
///
/// `progress` stays below 100 until the final publish, which carries the
/// complete dataset and `complete = true`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorldSnapshot {
    pub leaderboard: Vec<LeaderboardEntry>,
    pub map_points: Vec<MapPoint>,
    pub progress: u8,
    pub complete: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorldDataset {
    pub leaderboard: Vec<LeaderboardEntry>,
    pub map_points: Vec<MapPoint>,
    pub successes: usize,
    pub skipped: usize,
}

#[derive(Debug)]
struct WorldItem {
    place: String,
    confirmed: u64,
    deaths: u64,
    coord: Option<Coordinate>,
}

#[derive(Debug)]
enum ItemOutcome {
    Completed(WorldItem),
    Skipped,
}

/// Build the world dataset for `span` over `places`.
///
/// Partial snapshots are published on `snapshots` while the build runs.
/// Returns `None` if `cancel` fires first; the final snapshot is then
/// never published and accumulated results are discarded.
#[allow(clippy::too_many_arguments)]
pub async fn build_world_dataset(
    source: Arc<dyn CaseSource>,
    places: Vec<String>,
    span: DateSpan,
    scope: Place,
    primary_coords: Arc<HashMap<String, Coordinate>>,
    opts: WorldOptions,
    cancel: CancelToken,
    snapshots: watch::Sender<WorldSnapshot>,
) -> Option<WorldDataset> {
    let total = places.len();
    if total == 0 {
        if cancel.is_cancelled() {
            return None;
        }
        let _ = snapshots.send(WorldSnapshot {
            progress: 100,
            complete: true,
            ..WorldSnapshot::default()
        });
        return Some(WorldDataset::default());
    }

    let places = Arc::new(places);
    let cursor = Arc::new(AtomicUsize::new(0));
    let workers = opts.workers.clamp(1, total);
    let (outcome_tx, mut outcome_rx) = mpsc::channel::<ItemOutcome>(workers);

    let mut handles = Vec::with_capacity(workers);
    for _ in 0..workers {
        handles.push(tokio::spawn(worker(
            source.clone(),
            places.clone(),
            cursor.clone(),
            span,
            primary_coords.clone(),
            opts.per_item_timeout,
            cancel.clone(),
            outcome_tx.clone(),
        )));
    }
    drop(outcome_tx);

    // Single-owner collector: the accumulator never crosses a thread.
    let mut items: Vec<WorldItem> = Vec::new();
    let mut skipped = 0usize;
    let mut since_snapshot = 0usize;

    while let Some(outcome) = outcome_rx.recv().await {
        match outcome {
            ItemOutcome::Completed(item) => {
                items.push(item);
                since_snapshot += 1;
                if cancel.is_cancelled() {
                    continue;
                }

                let progress = partial_progress(items.len(), total);
                if since_snapshot >= opts.snapshot_every.max(1) {
                    since_snapshot = 0;
                    let (leaderboard, map_points) = project(&items, &scope);
                    let _ = snapshots.send(WorldSnapshot {
                        leaderboard,
                        map_points,
                        progress,
                        complete: false,
                    });
                } else {
                    snapshots.send_modify(|snap| snap.progress = progress);
                }
            }
            ItemOutcome::Skipped => skipped += 1,
        }
    }

    for handle in handles {
        let _ = handle.await;
    }

    if cancel.is_cancelled() {
        debug!("world dataset build cancelled; discarding results");
        return None;
    }

    debug_assert_eq!(items.len() + skipped, total);
    let (leaderboard, map_points) = project(&items, &scope);
    let _ = snapshots.send(WorldSnapshot {
        leaderboard: leaderboard.clone(),
        map_points: map_points.clone(),
        progress: 100,
        complete: true,
    });

    Some(WorldDataset {
        leaderboard,
        map_points,
        successes: items.len(),
        skipped,
    })
}

#[allow(clippy::too_many_arguments)]
async fn worker(
    source: Arc<dyn CaseSource>,
    places: Arc<Vec<String>>,
    cursor: Arc<AtomicUsize>,
    span: DateSpan,
    primary_coords: Arc<HashMap<String, Coordinate>>,
    item_timeout: Option<Duration>,
    cancel: CancelToken,
    outcomes: mpsc::Sender<ItemOutcome>,
) {
    loop {
        if cancel.is_cancelled() {
            break;
        }
        let idx = cursor.fetch_add(1, Ordering::SeqCst);
        let Some(name) = places.get(idx) else {
            break;
        };

        let fetch = fetch_item(source.as_ref(), span, name, &primary_coords);
        let result = tokio::select! {
            _ = cancel.cancelled() => break,
            result = async {
                match item_timeout {
                    Some(limit) => tokio::time::timeout(limit, fetch).await,
                    None => Ok(fetch.await),
                }
            } => result,
        };

        let outcome = match result {
            Ok(Ok(Some(item))) => ItemOutcome::Completed(item),
            Ok(Ok(None)) => {
                debug!(place = %name, "no data for range; skipping");
                ItemOutcome::Skipped
            }
            Ok(Err(err)) => {
                warn!(place = %name, error = %err, "place fetch failed; skipping");
                ItemOutcome::Skipped
            }
            Err(_) => {
                warn!(place = %name, "place fetch timed out; skipping");
                ItemOutcome::Skipped
            }
        };

        if outcomes.send(outcome).await.is_err() {
            break;
        }
    }
}

async fn fetch_item(
    source: &dyn CaseSource,
    span: DateSpan,
    name: &str,
    primary_coords: &HashMap<String, Coordinate>,
) -> Result<Option<WorldItem>, ApiError> {
    let place = Place::Country(name.to_string());
    let Some(point) = source.range_totals(span, &place).await? else {
        return Ok(None);
    };

    Ok(Some(WorldItem {
        place: name.to_string(),
        confirmed: point.confirmed,
        deaths: point.deaths,
        coord: geo::resolve(name, primary_coords),
    }))
}

/// Progress for a partial publish. Clamped to 99 so that 100 is published
/// exactly once, by the completion snapshot.
fn partial_progress(appended: usize, total: usize) -> u8 {
    let rounded = ((100 * appended) as f64 / total as f64).round() as u8;
    rounded.min(99)
}

/// Rank a snapshot of the accumulator.
///
/// The sort is stable and recomputed from scratch on every publish; map
/// points exist only for the aggregate scope, and only for items whose
/// coordinate resolved.
fn project(items: &[WorldItem], scope: &Place) -> (Vec<LeaderboardEntry>, Vec<MapPoint>) {
    let mut ranked: Vec<&WorldItem> = items.iter().collect();
    ranked.sort_by(|a, b| b.confirmed.cmp(&a.confirmed));

    let leaderboard = ranked
        .iter()
        .map(|item| LeaderboardEntry {
            place: item.place.clone(),
            confirmed: item.confirmed,
            deaths: item.deaths,
        })
        .collect();

    let map_points = if matches!(scope, Place::World) {
        ranked
            .iter()
            .filter_map(|item| {
                item.coord.map(|coord| MapPoint {
                    lat: coord.lat,
                    lon: coord.lon,
                    value: item.confirmed,
                    deaths: item.deaths,
                    place: item.place.clone(),
                })
            })
            .collect()
    } else {
        Vec::new()
    };

    (leaderboard, map_points)
}
