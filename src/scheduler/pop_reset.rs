//! Nightly popularity reset.
//!
//! The first reset fires at the next local midnight. After that the task
//! repeats on a fixed 24 hour period and is never re-anchored, so DST
//! changes and clock adjustments shift later firings away from midnight.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Days, Local, NaiveTime, TimeZone};
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

use crate::service::VenueService;

/// Period between resets after the first one.
pub const RESET_PERIOD: Duration = Duration::from_secs(24 * 60 * 60);

/// Time remaining from `now` until the next midnight in `now`'s zone.
///
/// When midnight does not exist on the next day (a DST gap), the first
/// valid instant after it is used.
pub fn duration_until_next_midnight<Tz: TimeZone>(now: &DateTime<Tz>) -> Duration {
    let tz = now.timezone();
    let Some(next_day) = now.date_naive().checked_add_days(Days::new(1)) else {
        return RESET_PERIOD;
    };
    let midnight = next_day.and_time(NaiveTime::MIN);

    let target = tz.from_local_datetime(&midnight).earliest().or_else(|| {
        // Gaps are at most a few hours; probe forward an hour at a time.
        (1..=3).find_map(|h| {
            tz.from_local_datetime(&(midnight + chrono::Duration::hours(h)))
                .earliest()
        })
    });

    target
        .and_then(|t| t.signed_duration_since(now.clone()).to_std().ok())
        .unwrap_or(RESET_PERIOD)
}

/// Starts the reset task anchored to the next local midnight.
///
/// The returned handle is normally dropped: the task lives as long as the
/// runtime.
pub fn spawn_pop_reset(service: Arc<VenueService>) -> JoinHandle<()> {
    let delay = duration_until_next_midnight(&Local::now());
    tracing::info!(
        first_reset_in_secs = delay.as_secs(),
        "pop reset scheduled"
    );
    spawn_pop_reset_with(service, delay, RESET_PERIOD)
}

/// Starts the reset task with an explicit first delay and period.
///
/// A failed reset is logged and the schedule carries on.
pub fn spawn_pop_reset_with(
    service: Arc<VenueService>,
    initial_delay: Duration,
    period: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval_at(Instant::now() + initial_delay, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            run_reset(&service).await;
        }
    })
}

async fn run_reset(service: &VenueService) {
    match service.reset_pop_counts().await {
        Ok(rows) => tracing::info!(rows, "pop counts reset"),
        Err(e) => tracing::error!(error = %e, "error resetting pop counts"),
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::{Venue, VenueId};
    use crate::persistence::{InMemoryVenueStore, VenueStore};
    use crate::storage::DirectoryPhotoStorage;
    use chrono::{FixedOffset, Utc};

    fn at(tz: FixedOffset, y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<FixedOffset> {
        let Some(t) = tz.with_ymd_and_hms(y, mo, d, h, mi, 0).single() else {
            panic!("valid timestamp");
        };
        t
    }

    #[test]
    fn delay_reaches_next_midnight() {
        let Some(tz) = FixedOffset::east_opt(2 * 3600) else {
            panic!("valid offset");
        };
        let now = at(tz, 2024, 5, 10, 22, 30);
        assert_eq!(duration_until_next_midnight(&now), Duration::from_secs(90 * 60));
    }

    #[test]
    fn delay_at_midnight_is_a_full_day() {
        let now = Utc.with_ymd_and_hms(2024, 5, 10, 0, 0, 0).single();
        let Some(now) = now else {
            panic!("valid timestamp");
        };
        assert_eq!(duration_until_next_midnight(&now), RESET_PERIOD);
    }

    #[test]
    fn delay_crosses_month_and_year_boundaries() {
        let Some(tz) = FixedOffset::west_opt(5 * 3600) else {
            panic!("valid offset");
        };
        let now = at(tz, 2023, 12, 31, 23, 59);
        assert_eq!(duration_until_next_midnight(&now), Duration::from_secs(60));
    }

    async fn service_with_pops(pops: &[i64]) -> (Arc<VenueService>, Arc<InMemoryVenueStore>) {
        let venues = pops
            .iter()
            .zip(1..)
            .map(|(&pop, id)| Venue {
                pop,
                ..Venue::new(VenueId::new(id), format!("venue {id}"))
            })
            .collect();
        let store = Arc::new(InMemoryVenueStore::with_venues(venues));
        let Ok(tmp) = tempfile::tempdir() else {
            panic!("tempdir failed");
        };
        let Ok(photos) = DirectoryPhotoStorage::new(tmp.path()).await else {
            panic!("storage init failed");
        };
        let service = VenueService::new(
            Arc::clone(&store) as Arc<dyn VenueStore>,
            Arc::new(photos),
            "http://localhost:3000",
        );
        (Arc::new(service), store)
    }

    async fn pops(store: &InMemoryVenueStore) -> Vec<i64> {
        let Ok(venues) = store.list_venues().await else {
            panic!("list failed");
        };
        venues.iter().map(|v| v.pop).collect()
    }

    #[tokio::test(start_paused = true)]
    async fn first_reset_waits_for_initial_delay() {
        let (service, store) = service_with_pops(&[3, 8]).await;
        let _task = spawn_pop_reset_with(
            service,
            Duration::from_secs(60),
            Duration::from_secs(3600),
        );

        tokio::time::sleep(Duration::from_secs(59)).await;
        assert_eq!(pops(&store).await, vec![3, 8]);

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(pops(&store).await, vec![0, 0]);
    }

    #[tokio::test(start_paused = true)]
    async fn resets_repeat_every_period() {
        let (service, store) = service_with_pops(&[1]).await;
        let _task = spawn_pop_reset_with(
            service,
            Duration::from_secs(10),
            Duration::from_secs(100),
        );

        tokio::time::sleep(Duration::from_secs(11)).await;
        assert_eq!(pops(&store).await, vec![0]);

        let _ = store.increment_pop(VenueId::new(1)).await;
        tokio::time::sleep(Duration::from_secs(50)).await;
        assert_eq!(pops(&store).await, vec![1]);

        tokio::time::sleep(Duration::from_secs(60)).await;
        assert_eq!(pops(&store).await, vec![0]);
    }

    #[tokio::test(start_paused = true)]
    async fn failed_reset_does_not_stop_schedule() {
        let (service, store) = service_with_pops(&[4]).await;
        store.set_unavailable(true);
        let task = spawn_pop_reset_with(
            service,
            Duration::from_secs(10),
            Duration::from_secs(100),
        );

        tokio::time::sleep(Duration::from_secs(11)).await;
        assert!(!task.is_finished());

        store.set_unavailable(false);
        assert_eq!(pops(&store).await, vec![4]);

        tokio::time::sleep(Duration::from_secs(100)).await;
        assert_eq!(pops(&store).await, vec![0]);
    }
}
