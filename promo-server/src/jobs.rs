//! Scheduled jobs
//!
//! One periodic job: a weekly inventory reminder, fired every Saturday at
//! 09:00 in the configured business timezone. The job writes a task row
//! addressed to promoters with no creator (system-generated).

use chrono::{DateTime, Datelike, Duration, NaiveTime, TimeZone, Utc, Weekday};
use chrono_tz::Tz;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use crate::db::models::{Task, UserRole};
use crate::db::repository::TaskRepository;
use crate::utils::AppResult;

const REMINDER_TITLE: &str = "Обновите остатки";
const REMINDER_DESCRIPTION: &str = "Пожалуйста, обновите остатки";

/// Create the weekly reminder task row. Also callable on demand through the
/// maintenance endpoint.
pub async fn run_inventory_reminder(tasks: &TaskRepository) -> AppResult<Task> {
    let task = tasks
        .create(Task {
            id: None,
            title: REMINDER_TITLE.to_string(),
            description: Some(REMINDER_DESCRIPTION.to_string()),
            audience_roles: vec![UserRole::Promoter],
            network: None,
            region: None,
            store: None,
            created_by: None,
            created_at: Utc::now(),
        })
        .await?;
    info!(
        task = %task.id.as_ref().map(|r| r.to_string()).unwrap_or_default(),
        "inventory reminder task created"
    );
    Ok(task)
}

/// The next Saturday 09:00 in `tz` strictly after `after`
pub fn next_reminder_run(after: DateTime<Utc>, tz: Tz) -> DateTime<Utc> {
    let local = after.with_timezone(&tz);
    let nine = NaiveTime::from_hms_opt(9, 0, 0).unwrap_or_default();

    let mut date = local.date_naive();
    loop {
        if date.weekday() == Weekday::Sat {
            let candidate = tz
                .from_local_datetime(&date.and_time(nine))
                .earliest()
                .map(|dt| dt.with_timezone(&Utc));
            if let Some(candidate) = candidate {
                if candidate > after {
                    return candidate;
                }
            }
        }
        date += Duration::days(1);
    }
}

/// Weekly reminder loop. Sleeps until the next Saturday 09:00, fires, and
/// repeats until the shutdown token cancels.
pub async fn reminder_loop(tasks: TaskRepository, tz: Tz, shutdown: CancellationToken) {
    loop {
        let now = Utc::now();
        let next = next_reminder_run(now, tz);
        let wait = (next - now).to_std().unwrap_or_default();
        info!(next = %next, tz = %tz, "inventory reminder scheduled");

        tokio::select! {
            _ = shutdown.cancelled() => {
                info!("inventory reminder loop stopped");
                return;
            }
            _ = tokio::time::sleep(wait) => {
                if let Err(e) = run_inventory_reminder(&tasks).await {
                    error!(error = %e, "inventory reminder failed");
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utc(s: &str) -> DateTime<Utc> {
        s.parse().unwrap()
    }

    #[test]
    fn fires_next_saturday_morning() {
        // Wednesday 2025-06-18 12:00 Almaty (06:00 UTC, Almaty is UTC+5)
        let after = utc("2025-06-18T07:00:00Z");
        let next = next_reminder_run(after, chrono_tz::Asia::Almaty);
        // Saturday 2025-06-21 09:00 Almaty = 04:00 UTC
        assert_eq!(next, utc("2025-06-21T04:00:00Z"));
    }

    #[test]
    fn saturday_after_nine_rolls_to_next_week() {
        // Saturday 2025-06-21 10:00 Almaty
        let after = utc("2025-06-21T05:00:00Z");
        let next = next_reminder_run(after, chrono_tz::Asia::Almaty);
        assert_eq!(next, utc("2025-06-28T04:00:00Z"));
    }

    #[test]
    fn saturday_before_nine_fires_same_day() {
        // Saturday 2025-06-21 08:00 Almaty
        let after = utc("2025-06-21T03:00:00Z");
        let next = next_reminder_run(after, chrono_tz::Asia::Almaty);
        assert_eq!(next, utc("2025-06-21T04:00:00Z"));
    }
}
