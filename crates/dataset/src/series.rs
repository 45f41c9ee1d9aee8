//! Time-series construction over the backend's point and range queries.
//!
//! Short spans resolve every day individually through the point cache;
//! long spans trade resolution for request count by partitioning the span
//! into evenly sized buckets and issuing one range-aggregate query each.

use std::sync::Arc;

use futures_util::future::join_all;

use client::{ApiError, CaseSource, PointCache};
use model::{DateSpan, Place, SeriesPoint, Totals};

/// Spans at most this long fetch one point per day.
pub const DAILY_SPAN_MAX_DAYS: i64 = 31;

const MIN_BUCKETS: i64 = 20;
const MAX_BUCKETS: i64 = 60;

/// Bucket count for a long span: one point per week, clamped so charts
/// stay readable without flooding the backend.
pub fn target_points(total_days: i64) -> i64 {
    (total_days / 7).clamp(MIN_BUCKETS, MAX_BUCKETS)
}

/// Partition `span` into `target_points` contiguous buckets.
///
/// Bucket *i* covers day indices `[i*total/target, (i+1)*total/target - 1]`;
/// the final bucket is clamped to the span's end and degenerate buckets are
/// discarded. The surviving buckets are disjoint, chronologically ordered,
/// and cover the span with no gaps.
pub fn partition(span: DateSpan) -> Vec<DateSpan> {
    let total = span.total_days();
    let target = target_points(total);

    let mut buckets = Vec::with_capacity(target as usize);
    for i in 0..target {
        let start_idx = i * total / target;
        let end_idx = ((i + 1) * total / target - 1).min(total - 1);
        if start_idx > end_idx {
            continue;
        }

        let bucket = span.slice_days(start_idx, end_idx);
        if bucket.start > span.end {
            continue;
        }
        buckets.push(DateSpan::new(bucket.start, bucket.end.min(span.end)));
    }
    buckets
}

/// Builds chronological series and range totals for one place scope.
///
/// The point cache is injected once per session; range-aggregate queries
/// bypass it (each long-span bucket is queried at most once per build).
pub struct SeriesBuilder {
    source: Arc<dyn CaseSource>,
    cache: Arc<PointCache>,
}

impl SeriesBuilder {
    pub fn new(source: Arc<dyn CaseSource>, cache: Arc<PointCache>) -> Self {
        Self { source, cache }
    }

    /// Aggregate totals over `span`, `None` when the backend has no data.
    pub async fn range_totals(
        &self,
        span: DateSpan,
        place: &Place,
    ) -> Result<Option<Totals>, ApiError> {
        if span.is_inverted() {
            return Ok(None);
        }
        Ok(self
            .source
            .range_totals(span, place)
            .await?
            .map(|point| Totals::from(&point)))
    }

    /// Build the series for `span`, chronologically ordered.
    ///
    /// Output order matches date order regardless of request completion
    /// order; dates (or buckets) the backend has no data for are dropped.
    /// The first transport failure aborts the build.
    pub async fn build(
        &self,
        span: DateSpan,
        place: &Place,
    ) -> Result<Vec<SeriesPoint>, ApiError> {
        if span.is_inverted() {
            return Ok(Vec::new());
        }

        if span.total_days() <= DAILY_SPAN_MAX_DAYS {
            let fetches = span.iter_days().map(|date| async move {
                let outcome = self
                    .cache
                    .get_or_fetch(date, place, || self.source.point(date, place))
                    .await?;
                Ok(outcome.map(|point| SeriesPoint::new(date, Totals::from(&point))))
            });
            collect(join_all(fetches).await)
        } else {
            let fetches = partition(span).into_iter().map(|bucket| async move {
                let outcome = self.source.range_totals(bucket, place).await?;
                Ok(outcome.map(|point| SeriesPoint::new(bucket.end, Totals::from(&point))))
            });
            collect(join_all(fetches).await)
        }
    }
}

fn collect(
    results: Vec<Result<Option<SeriesPoint>, ApiError>>,
) -> Result<Vec<SeriesPoint>, ApiError> {
    let mut points = Vec::with_capacity(results.len());
    for result in results {
        if let Some(point) = result? {
            points.push(point);
        }
    }
    Ok(points)
}
