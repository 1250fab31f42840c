//! Ambient context collection: weather plus the local clock.

use std::sync::Arc;

use chrono::{Local, NaiveDateTime};
use tracing::debug;

use moodflow_core::types::{ContextSnapshot, Stage, Trace};

use crate::weather::WeatherProvider;

pub struct ContextCollector {
    weather: Arc<dyn WeatherProvider>,
    fixed_time: Option<NaiveDateTime>,
}

impl ContextCollector {
    pub fn new(weather: Arc<dyn WeatherProvider>) -> Self {
        Self {
            weather,
            fixed_time: None,
        }
    }

    /// Pin the clock, for reproducible runs.
    pub fn at_fixed_time(mut self, now: NaiveDateTime) -> Self {
        self.fixed_time = Some(now);
        self
    }

    /// Snapshot for `city` at the current local time.
    pub async fn collect(&self, city: &str) -> ContextSnapshot {
        let now = self.fixed_time.unwrap_or_else(|| Local::now().naive_local());
        self.collect_at(city, now).await
    }

    /// Snapshot for `city` at `now`.
    pub async fn collect_at(&self, city: &str, now: NaiveDateTime) -> ContextSnapshot {
        let report = self.weather.lookup(city).await;
        debug!(city, category = ?report.category, temperature_c = report.temperature_c, "weather");
        ContextSnapshot::from_parts(city, report, now)
    }

    pub async fn collect_traced(&self, city: &str, trace: &mut Trace) -> ContextSnapshot {
        let snapshot = self.collect(city).await;
        trace.push(
            Stage::Context,
            format!(
                "context: {} {:?} {:.1}C dark={} {:?} {:?}",
                snapshot.city,
                snapshot.weather,
                snapshot.temperature_c,
                snapshot.is_dark,
                snapshot.time_of_day,
                snapshot.day_type
            ),
        );
        snapshot
    }
}
