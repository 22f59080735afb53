use std::time::Duration;

use chrono::{DateTime, FixedOffset, Timelike, Utc};
use rand::Rng;

/// The bot posts on Indian Standard Time, UTC+05:30.
const IST_OFFSET_SECS: i32 = 5 * 3600 + 30 * 60;

/// Posting window opens at 09:00 and the last eligible minute is 09:15.
const WINDOW_HOUR: u32 = 9;
const WINDOW_LAST_MINUTE: u32 = 15;

pub fn ist() -> FixedOffset {
    FixedOffset::east_opt(IST_OFFSET_SECS).expect("+05:30 is a valid offset")
}

pub fn now_ist() -> DateTime<FixedOffset> {
    Utc::now().with_timezone(&ist())
}

/// True iff `t` falls inside the daily posting window.
pub fn in_posting_window(t: &DateTime<FixedOffset>) -> bool {
    t.hour() == WINDOW_HOUR && t.minute() <= WINDOW_LAST_MINUTE
}

/// Random whole-minute delay in [0, 15] minutes, so the actual posting
/// time is not perfectly predictable.
pub fn jitter() -> Duration {
    let minutes: u64 = rand::thread_rng().gen_range(0..=WINDOW_LAST_MINUTE as u64);
    Duration::from_secs(minutes * 60)
}

/// Start of the next day's posting window, 09:00:00 IST.
pub fn next_window_start(after: DateTime<FixedOffset>) -> DateTime<FixedOffset> {
    let tomorrow = after.date_naive().succ_opt().expect("date in range");
    tomorrow
        .and_hms_opt(WINDOW_HOUR, 0, 0)
        .expect("09:00:00 is a valid time")
        .and_local_timezone(ist())
        .single()
        .expect("fixed offsets are unambiguous")
}

/// How long to sleep from `now` until `target`, saturating at zero if the
/// instant already passed.
pub fn until(now: DateTime<FixedOffset>, target: DateTime<FixedOffset>) -> Duration {
    (target - now).to_std().unwrap_or(Duration::ZERO)
}
