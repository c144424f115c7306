use std::fmt;
use std::str::FromStr;

pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// A time of day with minute precision (`HH:MM`).
///
/// Arithmetic wraps at midnight: an item starting at 23:30 and lasting 90
/// minutes ends at 01:00.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClockTime {
    minutes: u16, // minutes since midnight, < MINUTES_PER_DAY
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid time '{0}', expected HH:MM")]
pub struct TimeParseError(pub String);

impl ClockTime {
    pub const MIDNIGHT: ClockTime = ClockTime { minutes: 0 };

    pub fn new(hours: u32, minutes: u32) -> Option<Self> {
        if hours < 24 && minutes < 60 {
            Some(Self { minutes: (hours * 60 + minutes) as u16 })
        } else {
            None
        }
    }

    /// Build from minutes since midnight, wrapping past 24h.
    pub fn from_minutes(total: u32) -> Self {
        Self { minutes: (total % MINUTES_PER_DAY) as u16 }
    }

    pub fn hours(self) -> u32 {
        u32::from(self.minutes) / 60
    }

    pub fn minute(self) -> u32 {
        u32::from(self.minutes) % 60
    }

    pub fn minutes_since_midnight(self) -> u32 {
        u32::from(self.minutes)
    }

    pub fn add_minutes(self, duration: u32) -> Self {
        Self::from_minutes(self.minutes_since_midnight() + duration % MINUTES_PER_DAY)
    }
}

impl FromStr for ClockTime {
    type Err = TimeParseError;

    /// Accepts `HH:MM` and `HH:MM:SS`; seconds are dropped.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || TimeParseError(s.to_string());
        let parts: Vec<&str> = s.trim().split(':').collect();
        if !(2..=3).contains(&parts.len()) {
            return Err(err());
        }

        let number = |part: &str, max_len: usize| -> Option<u32> {
            if part.is_empty() || part.len() > max_len || !part.bytes().all(|b| b.is_ascii_digit()) {
                return None;
            }
            part.parse().ok()
        };

        let hours = number(parts[0], 2).ok_or_else(err)?;
        if parts[1].len() != 2 {
            return Err(err());
        }
        let minutes = number(parts[1], 2).ok_or_else(err)?;
        if let Some(seconds) = parts.get(2) {
            match number(seconds, 2) {
                Some(s) if seconds.len() == 2 && s < 60 => {}
                _ => return Err(err()),
            }
        }

        ClockTime::new(hours, minutes).ok_or_else(err)
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hours(), self.minute())
    }
}

/// End time of a slot starting at `start` lasting `duration` minutes.
pub fn end_time(start: &str, duration: u32) -> Result<String, TimeParseError> {
    let start: ClockTime = start.parse()?;
    Ok(start.add_minutes(duration).to_string())
}

/// `"HH:MM - HH:MM"` for a slot, or the raw start if it does not parse.
pub fn time_range(start: &str, duration: u32) -> String {
    match start.parse::<ClockTime>() {
        Ok(t) => format!("{} - {}", t, t.add_minutes(duration)),
        Err(_) => start.to_string(),
    }
}

/// Strip seconds from a stored time (`08:00:00` -> `08:00`).
pub fn display_time(time: &str) -> &str {
    time.get(..5).unwrap_or(time)
}

/// Human duration: `45min`, `2h`, `1h30`.
pub fn format_duration(minutes: u32) -> String {
    let hours = minutes / 60;
    let mins = minutes % 60;
    match (hours, mins) {
        (0, m) => format!("{m}min"),
        (h, 0) => format!("{h}h"),
        (h, m) => format!("{h}h{m:02}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_with_and_without_seconds() {
        assert_eq!("08:05".parse::<ClockTime>().unwrap(), ClockTime::new(8, 5).unwrap());
        assert_eq!("8:05".parse::<ClockTime>().unwrap(), ClockTime::new(8, 5).unwrap());
        assert_eq!("14:30:00".parse::<ClockTime>().unwrap().to_string(), "14:30");
    }

    #[test]
    fn rejects_malformed_times() {
        for bad in ["", "24:00", "12:60", "12:5", "12", "ab:cd", "12:00:61", "1:2:3:4", "-1:00"] {
            assert!(bad.parse::<ClockTime>().is_err(), "{bad} should not parse");
        }
    }

    #[test]
    fn end_time_adds_duration() {
        assert_eq!(end_time("14:00", 30).unwrap(), "14:30");
        assert_eq!(end_time("09:45", 75).unwrap(), "11:00");
        assert_eq!(end_time("10:00", 0).unwrap(), "10:00");
    }

    #[test]
    fn end_time_wraps_past_midnight() {
        assert_eq!(end_time("23:30", 90).unwrap(), "01:00");
        assert_eq!(end_time("00:00", MINUTES_PER_DAY).unwrap(), "00:00");
        assert_eq!(end_time("22:00", 3 * MINUTES_PER_DAY + 60).unwrap(), "23:00");
    }

    #[test]
    fn formats_durations() {
        assert_eq!(format_duration(45), "45min");
        assert_eq!(format_duration(120), "2h");
        assert_eq!(format_duration(90), "1h30");
        assert_eq!(format_duration(65), "1h05");
    }

    #[test]
    fn display_time_strips_seconds() {
        assert_eq!(display_time("08:00:00"), "08:00");
        assert_eq!(display_time("08:00"), "08:00");
        assert_eq!(display_time("8"), "8");
    }

    #[test]
    fn time_range_formats_both_ends() {
        assert_eq!(time_range("18:00:00", 150), "18:00 - 20:30");
        assert_eq!(time_range("garbage", 10), "garbage");
    }
}
