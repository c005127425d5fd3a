//! Notification content construction.

use std::time::Duration;

use chrono::{DateTime, Local, TimeZone};

use crate::types::Phase;

/// Title shown on every desktop popup.
pub const NOTIFICATION_TITLE: &str = "Tomatick";

/// Application name reported to the notification service.
pub const APP_NAME: &str = "tomatick";

/// Composes the message fired when a phase starts.
///
/// Format: `Start work, tag: 'Coding', round:1/4, end time: 14:25:00`
pub fn phase_message<Tz>(
    phase: Phase,
    tag: &str,
    round: u32,
    total_rounds: u32,
    end_time: &DateTime<Tz>,
) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    format!(
        "{}, tag: '{}', round:{}/{}, end time: {}",
        phase.start_message(),
        tag,
        round,
        total_rounds,
        end_time.format("%H:%M:%S")
    )
}

/// Returns the local wall-clock time `duration` from now.
pub fn wall_clock_end(duration: Duration) -> DateTime<Local> {
    let now = Local::now();
    chrono::Duration::from_std(duration)
        .ok()
        .and_then(|delta| now.checked_add_signed(delta))
        .unwrap_or(now)
}
