use chrono::{DateTime, Timelike, Utc};

/// Timestamps are persisted as ISO-8601 at seconds precision.
pub const FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Current UTC time, truncated to whole seconds so that an in-memory
/// value round-trips through its persisted form unchanged.
pub fn now() -> DateTime<Utc> {
    let now = Utc::now();
    now.with_nanosecond(0).unwrap_or(now)
}

/// Serde adapter for `DateTime<Utc>` in the seconds-precision format.
pub mod iso_seconds {
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    use super::FORMAT;

    pub fn serialize<S>(dt: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&dt.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&s, FORMAT)
            .map(|ndt| ndt.and_utc())
            .map_err(serde::de::Error::custom)
    }
}

/// Serde adapter for `Option<DateTime<Utc>>` in the same format.
pub mod iso_seconds_opt {
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    use super::FORMAT;

    pub fn serialize<S>(dt: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match dt {
            Some(dt) => serializer.serialize_some(&dt.format(FORMAT).to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<String>::deserialize(deserializer)? {
            Some(s) => NaiveDateTime::parse_from_str(&s, FORMAT)
                .map(|ndt| Some(ndt.and_utc()))
                .map_err(serde::de::Error::custom),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_now_has_no_subsecond_part() {
        assert_eq!(now().nanosecond(), 0);
    }

    #[test]
    fn test_format_roundtrip() {
        let dt = now();
        let s = dt.format(FORMAT).to_string();
        let parsed = chrono::NaiveDateTime::parse_from_str(&s, FORMAT)
            .unwrap()
            .and_utc();
        assert_eq!(dt, parsed);
    }
}
