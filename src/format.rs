const SECONDS_PER_DAY: u64 = 86_400;
const SECONDS_PER_HOUR: u64 = 3_600;
const SECONDS_PER_MINUTE: u64 = 60;

/// Joins values with ", ". No "and" before the last item.
pub fn to_english_list<I, T>(values: I) -> String
where
    I: IntoIterator<Item = T>,
    T: ToString,
{
    values
        .into_iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

fn unit(count: u64, name: &str) -> String {
    if count == 1 {
        format!("{} {}", count, name)
    } else {
        format!("{} {}s", count, name)
    }
}

/// Renders elapsed seconds as e.g. "1 day, 1 hour, 1 minute, 1 second".
///
/// Fractional seconds are floored first. Zero-valued units are left out, and
/// once a remainder reaches zero the finer units are not shown at all. A
/// duration of zero renders as "0 seconds".
pub fn humanize_duration(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u64
    } else {
        0
    };
    if total == 0 {
        return unit(0, "second");
    }

    let mut parts = Vec::new();
    let days = total / SECONDS_PER_DAY;
    let mut remainder = total % SECONDS_PER_DAY;
    if days > 0 {
        parts.push(unit(days, "day"));
    }

    if remainder > 0 {
        let hours = remainder / SECONDS_PER_HOUR;
        remainder %= SECONDS_PER_HOUR;
        if hours > 0 {
            parts.push(unit(hours, "hour"));
        }

        if remainder > 0 {
            let minutes = remainder / SECONDS_PER_MINUTE;
            let secs = remainder % SECONDS_PER_MINUTE;
            if minutes > 0 {
                parts.push(unit(minutes, "minute"));
            }
            if secs > 0 {
                parts.push(unit(secs, "second"));
            }
        }
    }

    to_english_list(parts)
}

/// Converts a 24-hour clock hour (and minutes) to "H:MM AM/PM".
pub fn twelve_hour(hour: u32, minutes: u32) -> String {
    let (display_hour, suffix) = match hour {
        0 => (12, "AM"),
        1..=11 => (hour, "AM"),
        12 => (12, "PM"),
        _ => (hour - 12, "PM"),
    };
    format!("{}:{:02} {}", display_hour, minutes, suffix)
}
