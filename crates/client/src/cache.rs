//! Point-query fetch cache.
//!
//! Deduplicates in-flight and completed single-day queries keyed by
//! `date|place`. Each key owns one shared one-shot slot: the first caller
//! runs the producer, every concurrent and later caller receives the same
//! stored outcome. Not-found (already normalized to `None`) and failures
//! are cached exactly like successes. Nothing is ever evicted implicitly;
//! `clear` is the only eviction mechanism.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use chrono::NaiveDate;
use parking_lot::Mutex;
use tokio::sync::OnceCell;
use tracing::debug;

use model::{DataPoint, Place};

use crate::error::ApiError;

type PointResult = Result<Option<DataPoint>, ApiError>;
type Slot = Arc<OnceCell<PointResult>>;

#[derive(Default)]
pub struct PointCache {
    entries: Mutex<HashMap<String, Slot>>,
}

impl PointCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn key(date: NaiveDate, place: &Place) -> String {
        format!("{date}|{}", place.cache_token())
    }

    /// Number of keys with an installed slot (pending or resolved).
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// Fetch through the cache.
    ///
    /// `producer` runs at most once per distinct key for the lifetime of
    /// this cache; concurrent callers for the same key coalesce onto the
    /// one pending run and all observe its outcome.
    pub async fn get_or_fetch<F, Fut>(
        &self,
        date: NaiveDate,
        place: &Place,
        producer: F,
    ) -> PointResult
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = PointResult>,
    {
        let slot = {
            let mut entries = self.entries.lock();
            entries
                .entry(Self::key(date, place))
                .or_insert_with(|| Arc::new(OnceCell::new()))
                .clone()
        };
        slot.get_or_init(producer).await.clone()
    }

    /// Drop every entry, pending and resolved alike.
    ///
    /// Callers already waiting on a pending slot still receive its outcome;
    /// the next `get_or_fetch` for that key starts a fresh request.
    pub fn clear(&self) {
        let mut entries = self.entries.lock();
        debug!(entries = entries.len(), "clearing point cache");
        entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    use model::{DataPoint, Place};

    use super::PointCache;
    use crate::error::ApiError;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2021, 1, 1).unwrap()
    }

    fn point(confirmed: u64) -> DataPoint {
        DataPoint {
            place: None,
            date: Some(date()),
            date_range: None,
            confirmed,
            deaths: 0,
            recovered: 0,
        }
    }

    #[tokio::test]
    async fn concurrent_callers_share_one_producer_run() {
        let cache = Arc::new(PointCache::new());
        let calls = Arc::new(AtomicUsize::new(0));

        let fetch = |cache: Arc<PointCache>, calls: Arc<AtomicUsize>| async move {
            cache
                .get_or_fetch(date(), &Place::World, || async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    tokio::time::sleep(Duration::from_millis(20)).await;
                    Ok(Some(point(5)))
                })
                .await
        };

        let (a, b) = tokio::join!(
            fetch(cache.clone(), calls.clone()),
            fetch(cache.clone(), calls.clone())
        );

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(a.unwrap().unwrap().confirmed, 5);
        assert_eq!(b.unwrap().unwrap().confirmed, 5);
    }

    #[tokio::test]
    async fn distinct_places_are_distinct_keys() {
        let cache = PointCache::new();
        let world = cache
            .get_or_fetch(date(), &Place::World, || async { Ok(Some(point(1))) })
            .await
            .unwrap()
            .unwrap();
        let france = cache
            .get_or_fetch(date(), &Place::Country("France".into()), || async {
                Ok(Some(point(2)))
            })
            .await
            .unwrap()
            .unwrap();

        assert_eq!(world.confirmed, 1);
        assert_eq!(france.confirmed, 2);
        assert_eq!(cache.len(), 2);
    }

    #[tokio::test]
    async fn not_found_is_cached_as_none() {
        let cache = PointCache::new();
        let calls = Arc::new(AtomicUsize::new(0));

        for _ in 0..2 {
            let calls = calls.clone();
            let result = cache
                .get_or_fetch(date(), &Place::World, || async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok(None)
                })
                .await;
            assert!(result.unwrap().is_none());
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn failures_are_cached_and_shared() {
        let cache = PointCache::new();
        let calls = Arc::new(AtomicUsize::new(0));

        for _ in 0..2 {
            let calls = calls.clone();
            let result = cache
                .get_or_fetch(date(), &Place::World, || async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Err(ApiError::Status { status: 500 })
                })
                .await;
            assert!(matches!(result, Err(ApiError::Status { status: 500 })));
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn clear_allows_a_fresh_fetch() {
        let cache = PointCache::new();
        let calls = Arc::new(AtomicUsize::new(0));

        for expected in [1usize, 1, 2] {
            if expected == 2 {
                cache.clear();
                assert!(cache.is_empty());
            }
            let calls_in = calls.clone();
            cache
                .get_or_fetch(date(), &Place::World, || async move {
                    calls_in.fetch_add(1, Ordering::SeqCst);
                    Ok(Some(point(9)))
                })
                .await
                .unwrap();
            assert_eq!(calls.load(Ordering::SeqCst), expected);
        }
    }
}
