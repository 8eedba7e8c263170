use crate::error::{DaylogError, Result};
use chrono::{DateTime, Datelike, Duration, Local, NaiveTime, TimeZone};

/// Start of the window a timeframe like `1h`, `2h30m`, `today` or `3` describes.
///
/// A bare number counts hours.
pub fn parse_timeframe(input: &str, now: DateTime<Local>) -> Result<DateTime<Local>> {
    let input = input.trim().to_lowercase();
    match input.as_str() {
        "today" => return start_of_day(now, 0),
        "yesterday" => return start_of_day(now, 1),
        _ => {}
    }

    let duration = match input.parse::<i64>() {
        Ok(hours) => Duration::try_hours(hours),
        Err(_) => parse_duration(&input),
    }
    .ok_or_else(|| DaylogError::Timeframe(format!("unsupported timeframe: {}", input)))?;

    now.checked_sub_signed(duration)
        .ok_or_else(|| DaylogError::Timeframe(format!("timeframe out of range: {}", input)))
}

fn parse_duration(input: &str) -> Option<Duration> {
    let mut total = Duration::zero();
    let mut digits = String::new();
    let mut seen_unit = false;

    for c in input.chars() {
        if c.is_ascii_digit() {
            digits.push(c);
            continue;
        }
        let value: i64 = digits.parse().ok()?;
        digits.clear();
        let part = match c {
            'h' => Duration::try_hours(value)?,
            'm' => Duration::try_minutes(value)?,
            _ => return None,
        };
        total = total.checked_add(&part)?;
        seen_unit = true;
    }

    (seen_unit && digits.is_empty()).then_some(total)
}

fn start_of_day(now: DateTime<Local>, days_back: i64) -> Result<DateTime<Local>> {
    let day = now.date_naive() - Duration::days(days_back);
    Local
        .from_local_datetime(&day.and_time(NaiveTime::MIN))
        .earliest()
        .ok_or_else(|| DaylogError::Timeframe(format!("no local midnight on {}", day)))
}

/// Human-readable span from `since` to `now`.
pub fn format_time_range(since: DateTime<Local>, now: DateTime<Local>) -> String {
    let elapsed = now - since;
    let clock = |t: DateTime<Local>| t.format("%-I:%M%p").to_string();

    if elapsed < Duration::hours(1) {
        return format!(
            "{} - {} ({}m)",
            clock(since),
            clock(now),
            elapsed.num_minutes()
        );
    }

    if since.date_naive() == now.date_naive() {
        return format!("{} - {}", clock(since), clock(now));
    }

    let stamp = |t: DateTime<Local>| {
        format!("{} {} {}", t.format("%b"), t.day(), clock(t))
    };
    format!("{} - {}", stamp(since), stamp(now))
}
