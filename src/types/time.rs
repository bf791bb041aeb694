//! Date and timestamp values with an explicit "zero" state.
//!
//! The domain model never uses `Option` for dates. An unset value is the zero
//! sentinel instead, which serializes as JSON `null` and is stored as SQL NULL.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

const DATE_FORMAT: &str = "%Y-%m-%d";
const DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// A date of birth, optionally carrying a time of day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BirthDate(NaiveDateTime);

impl BirthDate {
    /// The unset value
    pub fn zero() -> Self {
        Self(NaiveDateTime::MIN)
    }

    pub fn is_zero(&self) -> bool {
        self.0 == NaiveDateTime::MIN
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self(date.and_time(NaiveTime::MIN))
    }

    pub fn from_naive(value: NaiveDateTime) -> Self {
        Self(value)
    }

    pub fn as_naive(&self) -> NaiveDateTime {
        self.0
    }

    pub fn date(&self) -> NaiveDate {
        self.0.date()
    }

    /// Accepts `YYYY-MM-DD`, `YYYY-MM-DDTHH:MM:SS` or RFC 3339. An empty
    /// string parses to the zero value. RFC 3339 offsets are dropped and the
    /// written wall-clock time is kept.
    pub fn parse(input: &str) -> Result<Self, String> {
        let input = input.trim();
        if input.is_empty() {
            return Ok(Self::zero());
        }
        if let Ok(date) = NaiveDate::parse_from_str(input, DATE_FORMAT) {
            return Ok(Self::from_date(date));
        }
        if let Ok(value) = NaiveDateTime::parse_from_str(input, DATE_TIME_FORMAT) {
            return Ok(Self(value));
        }
        if let Ok(value) = DateTime::parse_from_rfc3339(input) {
            return Ok(Self(value.naive_local()));
        }
        Err(format!("'{}' is not a valid date (expected YYYY-MM-DD)", input))
    }
}

impl Default for BirthDate {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for BirthDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return Ok(());
        }
        if self.0.time() == NaiveTime::MIN {
            write!(f, "{}", self.0.format(DATE_FORMAT))
        } else {
            write!(f, "{}", self.0.format(DATE_TIME_FORMAT))
        }
    }
}

impl Serialize for BirthDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.is_zero() {
            serializer.serialize_none()
        } else {
            serializer.collect_str(self)
        }
    }
}

impl<'de> Deserialize<'de> for BirthDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Option::<String>::deserialize(deserializer)? {
            None => Ok(Self::zero()),
            Some(raw) => Self::parse(&raw).map_err(de::Error::custom),
        }
    }
}

/// A server-assigned UTC instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// The unset value
    pub fn zero() -> Self {
        Self(DateTime::<Utc>::MIN_UTC)
    }

    pub fn is_zero(&self) -> bool {
        self.0 == DateTime::<Utc>::MIN_UTC
    }

    pub fn now() -> Self {
        Self(Utc::now())
    }

    pub fn from_utc(value: DateTime<Utc>) -> Self {
        Self(value)
    }

    pub fn as_utc(&self) -> DateTime<Utc> {
        self.0
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Self::zero()
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.is_zero() {
            serializer.serialize_none()
        } else {
            self.0.serialize(serializer)
        }
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(Option::<DateTime<Utc>>::deserialize(deserializer)?
            .map(Self)
            .unwrap_or_else(Self::zero))
    }
}
