use std::fmt::{Display, Formatter};

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, Duration, OffsetDateTime, PrimitiveDateTime, Time, UtcOffset};

/// Timestamp normalized to UTC.
///
/// Accepts RFC3339 with any offset, offset-less `YYYY-MM-DDTHH:MM:SS` (read as
/// UTC, which is how the marketplace reports local event times) and bare
/// `YYYY-MM-DD` dates (midnight UTC).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(OffsetDateTime);

impl Timestamp {
    pub fn now() -> Self {
        Self(OffsetDateTime::now_utc())
    }

    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        if let Ok(parsed) = OffsetDateTime::parse(input, &Rfc3339) {
            return Some(Self(parsed.to_offset(UtcOffset::UTC)));
        }
        if let Ok(parsed) =
            PrimitiveDateTime::parse(input, format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]"))
        {
            return Some(Self(parsed.assume_utc()));
        }
        Date::parse(input, format_description!("[year]-[month]-[day]"))
            .ok()
            .map(Self::start_of)
    }

    /// Midnight UTC at the start of `date`.
    pub fn start_of(date: Date) -> Self {
        Self(PrimitiveDateTime::new(date, Time::MIDNIGHT).assume_utc())
    }

    pub fn from_offset_datetime(value: OffsetDateTime) -> Self {
        Self(value.to_offset(UtcOffset::UTC))
    }

    pub fn into_inner(self) -> OffsetDateTime {
        self.0
    }

    pub fn date(self) -> Date {
        self.0.date()
    }

    pub fn checked_add(self, duration: Duration) -> Option<Self> {
        self.0.checked_add(duration).map(Self)
    }

    pub fn checked_sub(self, duration: Duration) -> Option<Self> {
        self.0.checked_sub(duration).map(Self)
    }

    /// `YYYY-MM-DDTHH:MM:SSZ`, the form sent in `occurs_at.*` filters.
    pub fn format_rfc3339(self) -> String {
        let (year, month, day) = self.0.to_calendar_date();
        let (hour, minute, second) = self.0.to_hms();
        format!(
            "{year:04}-{:02}-{day:02}T{hour:02}:{minute:02}:{second:02}Z",
            u8::from(month)
        )
    }
}

/// Half-open `[start, end)` interval of event start times.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateWindow {
    pub start: Timestamp,
    pub end: Timestamp,
}

impl DateWindow {
    pub fn new(start: Timestamp, end: Timestamp) -> Self {
        Self { start, end }
    }

    /// `[date - days_before, date + days_after)` in whole UTC days.
    pub fn around(date: Date, days_before: i64, days_after: i64) -> Self {
        let midnight = Timestamp::start_of(date);
        Self {
            start: midnight
                .checked_sub(Duration::days(days_before))
                .unwrap_or(midnight),
            end: midnight
                .checked_add(Duration::days(days_after))
                .unwrap_or(midnight),
        }
    }

    /// `[from, from + weeks)`.
    pub fn weeks_from(from: Timestamp, weeks: i64) -> Self {
        Self {
            start: from,
            end: from.checked_add(Duration::weeks(weeks)).unwrap_or(from),
        }
    }

    pub fn contains(&self, timestamp: Timestamp) -> bool {
        self.start <= timestamp && timestamp < self.end
    }

    /// Same start, `factor` times the length.
    pub fn widened(&self, factor: u32) -> Self {
        let length = self.end.into_inner() - self.start.into_inner();
        let widened = length.checked_mul(i32::try_from(factor).unwrap_or(i32::MAX));
        Self {
            start: self.start,
            end: widened
                .and_then(|length| self.start.checked_add(length))
                .unwrap_or(self.end),
        }
    }

    /// `occurs_at.gte` / `occurs_at.lt` filter parameters.
    pub fn query_params(&self) -> [(&'static str, String); 2] {
        [
            ("occurs_at.gte", self.start.format_rfc3339()),
            ("occurs_at.lt", self.end.format_rfc3339()),
        ]
    }
}

impl Display for Timestamp {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.format_rfc3339())
    }
}

impl Serialize for Timestamp {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.format_rfc3339())
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Self::parse(&value)
            .ok_or_else(|| D::Error::custom(format!("unrecognized timestamp '{value}'")))
    }
}
