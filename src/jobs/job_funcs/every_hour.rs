use std::sync::Arc;

use anyhow::{Result, anyhow};
use chrono::{DateTime, Duration, SecondsFormat, Timelike, Utc};
use tracing::{error, info};

use crate::{init::state::ServerState, util::time::duration_formatter::format_duration};

/// Next instant at `XX:minute_offset:second_offset` strictly after `now`.
pub fn next_scheduled_hour_mark(
    now: DateTime<Utc>,
    minute_offset: u32,
    second_offset: u32,
) -> Result<DateTime<Utc>> {
    if minute_offset > 59 || second_offset > 59 {
        return Err(anyhow!(
            "Invalid hourly offset {minute_offset}m {second_offset}s"
        ));
    }

    let truncated_to_hour = now
        .with_minute(0)
        .and_then(|dt| dt.with_second(0))
        .and_then(|dt| dt.with_nanosecond(0))
        .ok_or_else(|| anyhow!("Could not truncate to hour."))?;

    let mut target_time = truncated_to_hour
        + Duration::minutes(minute_offset as i64)
        + Duration::seconds(second_offset as i64);

    if target_time <= now {
        target_time += Duration::hours(1);
    }

    Ok(target_time)
}

fn next_scheduled_hourly_delay(
    minute_offset: u32,
    second_offset: u32,
) -> Result<(tokio::time::Duration, DateTime<Utc>)> {
    let now = Utc::now();
    let next_mark = next_scheduled_hour_mark(now, minute_offset, second_offset)?;

    let delay = (next_mark - now).to_std().map_err(|e| {
        anyhow!(
            "Could not schedule job at next_scheduled_hour_mark(). Chrono->Std error: {:?}",
            e
        )
    })?;

    Ok((delay, next_mark))
}

/// Runs `task` once per hour at a fixed minute+second offset, forever.
pub async fn schedule_task_every_hour_at<F, Fut>(
    state: Arc<ServerState>,
    task: F,
    task_descriptor: String,
    minute_offset: u32,
    second_offset: u32,
) where
    F: Fn(Arc<ServerState>) -> Fut + Send + Sync + 'static,
    Fut: std::future::Future<Output = ()> + Send + 'static,
{
    let mut initialized: bool = false;
    loop {
        let (delay, scheduled_run_time) =
            match next_scheduled_hourly_delay(minute_offset, second_offset) {
                Ok((d, nm)) => (d, nm),
                Err(e) => {
                    error!(
                        task_name = %task_descriptor,
                        error = ?e,
                        "Could not calculate next scheduled time"
                    );
                    tokio::time::sleep(std::time::Duration::from_secs(10)).await;
                    continue;
                }
            };

        if !initialized {
            info!(
                task_name = %task_descriptor,
                initial_run_time = %scheduled_run_time.to_rfc3339_opts(SecondsFormat::AutoSi, true),
                "Scheduled task initialized. First run upcoming in {}",
                format_duration(delay)
            );
            initialized = true;
        }

        tokio::time::sleep(delay).await;

        let start = tokio::time::Instant::now();
        task(Arc::clone(&state)).await;

        info!(
            task_name = %task_descriptor,
            duration = %format_duration(start.elapsed()),
            next_run_time = %(scheduled_run_time + Duration::hours(1)).to_rfc3339_opts(SecondsFormat::AutoSi, true),
            "Scheduled task ran."
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_mark_later_in_same_hour() {
        let now = Utc.with_ymd_and_hms(2026, 3, 1, 10, 5, 0).unwrap();
        let mark = next_scheduled_hour_mark(now, 30, 0).unwrap();
        assert_eq!(mark, Utc.with_ymd_and_hms(2026, 3, 1, 10, 30, 0).unwrap());
    }

    #[test]
    fn test_mark_rolls_over_to_next_hour() {
        let now = Utc.with_ymd_and_hms(2026, 3, 1, 23, 30, 0).unwrap();
        let mark = next_scheduled_hour_mark(now, 30, 0).unwrap();
        assert_eq!(mark, Utc.with_ymd_and_hms(2026, 3, 2, 0, 30, 0).unwrap());
    }

    #[test]
    fn test_invalid_offset() {
        assert!(next_scheduled_hour_mark(Utc::now(), 60, 0).is_err());
    }
}
