//! Database metrics.
//!
//! Every repository query is wrapped in a [`QueryTimer`]; pool gauges are
//! refreshed when the Prometheus endpoint is scraped.

use metrics::{gauge, histogram};
use sqlx::PgPool;
use std::borrow::Cow;
use std::time::Instant;

/// Times one query and records it under `database_query_duration_seconds`.
///
/// ```ignore
/// let timer = QueryTimer::new("find_event_by_id");
/// let result = sqlx::query_as::<_, EventEntity>(...).fetch_optional(&pool).await;
/// timer.record();
/// result
/// ```
pub struct QueryTimer {
    query_name: Cow<'static, str>,
    start: Instant,
}

impl QueryTimer {
    pub fn new(query_name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            query_name: query_name.into(),
            start: Instant::now(),
        }
    }

    /// Records the elapsed time and returns it in seconds.
    pub fn record(self) -> f64 {
        let elapsed = self.start.elapsed().as_secs_f64();
        histogram!("database_query_duration_seconds", "query" => self.query_name.into_owned())
            .record(elapsed);
        elapsed
    }
}

/// Publish connection pool gauges.
pub fn record_pool_metrics(pool: &PgPool) {
    let size = pool.size() as usize;
    let idle = pool.num_idle();

    gauge!("database_connections_active").set(size.saturating_sub(idle) as f64);
    gauge!("database_connections_idle").set(idle as f64);
    gauge!("database_connections_total").set(size as f64);
}
