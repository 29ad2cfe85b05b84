#![forbid(unsafe_code)]

use std::sync::atomic::{AtomicI64, Ordering};
use time::OffsetDateTime;
use time::macros::format_description;

const EPOCH_ISO: &str = "1970-01-01T00:00:00.000Z";

static LAST_ISSUED_MS: AtomicI64 = AtomicI64::new(i64::MIN);

pub fn wall_clock_ms() -> i64 {
    let nanos = OffsetDateTime::now_utc().unix_timestamp_nanos();
    let ms = nanos / 1_000_000i128;
    if ms <= 0 {
        0
    } else if ms >= i64::MAX as i128 {
        i64::MAX
    } else {
        ms as i64
    }
}

/// Millisecond instant for a new write; never repeats within the process.
///
/// When the wall clock has not moved past the previous instant, the previous
/// instant plus one is issued instead.
pub fn now_ms() -> i64 {
    let wall = wall_clock_ms();
    let mut last = LAST_ISSUED_MS.load(Ordering::Relaxed);
    loop {
        let next = if wall > last {
            wall
        } else {
            last.saturating_add(1)
        };
        match LAST_ISSUED_MS.compare_exchange_weak(last, next, Ordering::Relaxed, Ordering::Relaxed)
        {
            Ok(_) => return next,
            Err(observed) => last = observed,
        }
    }
}

pub fn now_iso() -> String {
    format_iso_ms(now_ms())
}

/// `YYYY-MM-DDTHH:MM:SS.mmmZ` in UTC.
pub fn format_iso_ms(ts_ms: i64) -> String {
    let nanos = (ts_ms as i128) * 1_000_000i128;
    let dt = OffsetDateTime::from_unix_timestamp_nanos(nanos).unwrap_or(OffsetDateTime::UNIX_EPOCH);
    dt.format(format_description!(
        "[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:3]Z"
    ))
    .unwrap_or_else(|_| EPOCH_ISO.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_epoch_and_known_instant() {
        assert_eq!(format_iso_ms(0), EPOCH_ISO);
        assert_eq!(format_iso_ms(1_700_000_000_123), "2023-11-14T22:13:20.123Z");
    }

    #[test]
    fn issued_instants_strictly_increase() {
        let mut previous = now_ms();
        for _ in 0..1_000 {
            let next = now_ms();
            assert!(next > previous, "{next} <= {previous}");
            previous = next;
        }
    }

    #[test]
    fn iso_strings_sort_like_instants() {
        let first = now_iso();
        let second = now_iso();
        assert_eq!(first.len(), 24);
        assert!(second > first, "{second} <= {first}");
    }
}
