//! Booking times as people type them: `Monday at 6pm`, `tomorrow 7:30pm`,
//! `18:00 on friday` or an ISO-like `2024-01-08 18:00`.
//!
//! Wall-clock times are read in the club's home timezone and returned as UTC.

use chrono::{Datelike, Days, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Weekday};
use chrono_tz::Europe::London;
use chrono_tz::Tz;

pub const HOME_TIMEZONE: Tz = London;

const ISO_FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S"];

/// Words that carry no date or time
const FILLER: [&str; 4] = ["at", "on", "this", "for"];

#[derive(Debug, Clone, Copy, PartialEq)]
enum Day {
    Today,
    Tomorrow,
    Weekday(Weekday),
}

/// Parses `when` relative to `now` (UTC) and returns the UTC start time
pub fn parse_when(when: &str, now: NaiveDateTime) -> Option<NaiveDateTime> {
    let trimmed = when.trim();
    let local = match ISO_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
    {
        Some(local) => local,
        None => parse_relative(&trimmed.to_lowercase(), to_local(now))?,
    };
    from_local(local)
}

/// UTC to wall-clock time in the home timezone
pub fn to_local(utc: NaiveDateTime) -> NaiveDateTime {
    HOME_TIMEZONE.from_utc_datetime(&utc).naive_local()
}

/// Times skipped by a clock change do not exist; repeated ones take the first
fn from_local(local: NaiveDateTime) -> Option<NaiveDateTime> {
    HOME_TIMEZONE
        .from_local_datetime(&local)
        .earliest()
        .map(|at| at.naive_utc())
}

/// `[today|tomorrow|<weekday>] [at] <time>`, in either order
fn parse_relative(when: &str, now: NaiveDateTime) -> Option<NaiveDateTime> {
    let words: Vec<&str> = when
        .split_whitespace()
        .filter(|word| !FILLER.contains(word))
        .collect();

    let mut day = None;
    let mut time = None;
    let mut index = 0;
    while index < words.len() {
        let word = words[index];
        index += 1;

        if let Some(parsed) = parse_day(word) {
            if day.replace(parsed).is_some() {
                return None;
            }
            continue;
        }

        // "6 pm"
        let word = match words.get(index) {
            Some(&suffix) if suffix == "am" || suffix == "pm" => {
                index += 1;
                format!("{word}{suffix}")
            }
            _ => word.to_string(),
        };
        if time.replace(parse_time(&word)?).is_some() {
            return None;
        }
    }

    let time = time?;
    let today = now.date();
    let date = match day {
        None | Some(Day::Today) => today,
        Some(Day::Tomorrow) => today.succ_opt()?,
        Some(Day::Weekday(weekday)) => next_weekday(today, weekday, time, now)?,
    };
    Some(date.and_time(time))
}

fn parse_day(word: &str) -> Option<Day> {
    match word {
        "today" | "tonight" => Some(Day::Today),
        "tomorrow" => Some(Day::Tomorrow),
        _ => word.parse::<Weekday>().ok().map(Day::Weekday),
    }
}

/// `6pm`, `6:30pm`, `12am` or a 24 hour `18:00`; a bare `6` is ambiguous
fn parse_time(word: &str) -> Option<NaiveTime> {
    let (clock, meridiem_offset) = if let Some(clock) = word.strip_suffix("am") {
        (clock, Some(0))
    } else if let Some(clock) = word.strip_suffix("pm") {
        (clock, Some(12))
    } else {
        (word, None)
    };

    let (hour, minute) = match clock.split_once(':') {
        Some((hour, minute)) if minute.len() == 2 => (hour.parse::<u32>().ok()?, minute.parse().ok()?),
        Some(_) => return None,
        None => (clock.parse::<u32>().ok()?, 0),
    };

    let hour = match meridiem_offset {
        Some(offset) if (1..=12).contains(&hour) => hour % 12 + offset,
        Some(_) => return None,
        None if clock.contains(':') => hour,
        None => return None,
    };
    NaiveTime::from_hms_opt(hour, minute, 0)
}

/// The next `weekday` on or after `today`; today only counts while `time` is still ahead
fn next_weekday(
    today: NaiveDate,
    weekday: Weekday,
    time: NaiveTime,
    now: NaiveDateTime,
) -> Option<NaiveDate> {
    let ahead = (7 + weekday.num_days_from_monday() - today.weekday().num_days_from_monday()) % 7;
    let date = today.checked_add_days(Days::new(u64::from(ahead)))?;
    if ahead == 0 && date.and_time(time) <= now {
        return date.checked_add_days(Days::new(7));
    }
    Some(date)
}
