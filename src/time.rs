use chrono::{DateTime, Utc};
use serde::de::{Deserializer, Error as _};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

/// Nullable timestamp with second precision
///
/// Decodes from whole seconds since the Unix epoch. A `null` or missing value
/// (paired with `#[serde(default)]`) decodes to the zero value, which is
/// distinct from the epoch itself.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Time(Option<DateTime<Utc>>);

impl Time {
    /// Timestamp at `secs` seconds after the epoch, `None` if out of range
    pub fn from_unix(secs: i64) -> Option<Self> {
        DateTime::from_timestamp(secs, 0).map(|dt| Self(Some(dt)))
    }

    /// True when no timestamp was present
    pub fn is_zero(&self) -> bool {
        self.0.is_none()
    }

    /// The wrapped instant, if present
    pub fn get(&self) -> Option<DateTime<Utc>> {
        self.0
    }

    /// Seconds since the epoch, if present
    pub fn unix(&self) -> Option<i64> {
        self.0.map(|dt| dt.timestamp())
    }
}

impl From<DateTime<Utc>> for Time {
    /// Sub-second precision is dropped
    fn from(dt: DateTime<Utc>) -> Self {
        Self(DateTime::from_timestamp(dt.timestamp(), 0))
    }
}

impl<'de> Deserialize<'de> for Time {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Value::deserialize(deserializer)? {
            Value::Null => Ok(Self::default()),
            Value::Number(n) => {
                // Fractional values are truncated to whole seconds
                let secs = n
                    .as_i64()
                    .or_else(|| n.as_f64().map(|f| f.trunc() as i64))
                    .ok_or_else(|| D::Error::custom(format!("invalid timestamp: {}", n)))?;
                Self::from_unix(secs)
                    .ok_or_else(|| D::Error::custom(format!("timestamp out of range: {}", secs)))
            }
            other => Err(D::Error::custom(format!(
                "expected epoch seconds or null, found {}",
                other
            ))),
        }
    }
}

impl Serialize for Time {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self.unix() {
            Some(secs) => serializer.serialize_i64(secs),
            None => serializer.serialize_none(),
        }
    }
}
