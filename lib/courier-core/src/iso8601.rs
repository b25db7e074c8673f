//! ISO 8601 timestamps for response types.
//!
//! Use with `#[serde(with = "courier_core::iso8601")]` on a [`DateTime`] field.
//! Only the internet date/time profile (RFC 3339, date-time with an offset)
//! is accepted, e.g. `2023-10-17T09:30:00Z` or `2023-10-17T11:30:00+02:00`.
//!
//! ```
//! use chrono::{DateTime, Utc};
//! use serde::Deserialize;
//!
//! #[derive(Deserialize)]
//! struct Event {
//!     #[serde(with = "courier_core::iso8601")]
//!     at: DateTime<Utc>,
//! }
//!
//! let event: Event = courier_core::from_json(br#"{"at":"2023-10-17T09:30:00Z"}"#).expect("decode");
//! assert_eq!(event.at.to_rfc3339(), "2023-10-17T09:30:00+00:00");
//! ```

use std::fmt;

use chrono::{DateTime, FixedOffset, TimeZone};
use serde::{Deserialize, Deserializer, Serializer, de};

/// Serialize a timestamp as RFC 3339 text.
pub fn serialize<S, Tz>(value: &DateTime<Tz>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    serializer.serialize_str(&value.to_rfc3339())
}

/// Deserialize a timestamp from RFC 3339 text.
pub fn deserialize<'de, D, Tz>(deserializer: D) -> Result<DateTime<Tz>, D::Error>
where
    D: Deserializer<'de>,
    Tz: TimeZone,
    DateTime<Tz>: From<DateTime<FixedOffset>>,
{
    let text = String::deserialize(deserializer)?;
    parse(&text).map(DateTime::from).map_err(de::Error::custom)
}

fn parse(text: &str) -> Result<DateTime<FixedOffset>, String> {
    DateTime::parse_from_rfc3339(text)
        .map_err(|err| format!("invalid ISO 8601 timestamp `{text}`: {err}"))
}

/// Same as the parent module, for `Option<DateTime<_>>` fields.
pub mod option {
    use std::fmt;

    use chrono::{DateTime, FixedOffset, TimeZone};
    use serde::{Deserialize, Deserializer, Serializer, de};

    /// Serialize an optional timestamp as RFC 3339 text or `null`.
    #[allow(clippy::ref_option)]
    pub fn serialize<S, Tz>(value: &Option<DateTime<Tz>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        match value {
            Some(value) => serializer.serialize_some(&value.to_rfc3339()),
            None => serializer.serialize_none(),
        }
    }

    /// Deserialize an optional timestamp from RFC 3339 text or `null`.
    pub fn deserialize<'de, D, Tz>(deserializer: D) -> Result<Option<DateTime<Tz>>, D::Error>
    where
        D: Deserializer<'de>,
        Tz: TimeZone,
        DateTime<Tz>: From<DateTime<FixedOffset>>,
    {
        Option::<String>::deserialize(deserializer)?
            .map(|text| super::parse(&text).map(DateTime::from))
            .transpose()
            .map_err(de::Error::custom)
    }
}
