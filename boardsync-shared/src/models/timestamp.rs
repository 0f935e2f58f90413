/// Forgiving timestamp deserialization
///
/// The backend serializes its timestamps from a store where the timezone
/// flag is a no-op, so they arrive naive ("2026-08-30T12:00:00", with or
/// without fractional seconds) rather than RFC 3339. Offset-carrying
/// forms still appear in other deployments, so both are accepted: a
/// present offset is honored, an absent one means UTC. Serialization is
/// untouched and stays RFC 3339.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer};

fn parse(raw: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    match DateTime::parse_from_rfc3339(raw) {
        Ok(dt) => Ok(dt.with_timezone(&Utc)),
        Err(_) => raw.parse::<NaiveDateTime>().map(|naive| naive.and_utc()),
    }
}

pub(crate) fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse(&raw).map_err(serde::de::Error::custom)
}

pub(crate) fn deserialize_optional<'de, D>(
    deserializer: D,
) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(raw) => parse(&raw).map(Some).map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_naive_timestamp_is_read_as_utc() {
        let parsed = parse("2026-08-30T12:00:00").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2026, 8, 30, 12, 0, 0).unwrap());
    }

    #[test]
    fn test_naive_timestamp_with_microseconds() {
        let parsed = parse("2026-08-30T12:00:00.123456").unwrap();
        assert_eq!(parsed.timestamp_subsec_micros(), 123456);
    }

    #[test]
    fn test_offset_is_honored_when_present() {
        let parsed = parse("2026-08-30T15:00:00+03:00").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2026, 8, 30, 12, 0, 0).unwrap());

        let zulu = parse("2026-08-30T12:00:00Z").unwrap();
        assert_eq!(zulu, parsed);
    }

    #[test]
    fn test_garbage_is_rejected() {
        assert!(parse("not a timestamp").is_err());
        assert!(parse("").is_err());
    }
}
