//! Activation-window timestamp conversion.
//!
//! Route activation and expiration times are edited as local wall-clock
//! strings (`YYYY-MM-DDTHH:MM`) and sent to the backend as ISO-8601 with
//! an explicit signed `±HH:MM` offset. The offset comes from chrono's
//! local time zone resolution, never from reformatting locale strings.

use chrono::{DateTime, Local, LocalResult, NaiveDateTime, TimeZone};

use crate::errors::{Error, Result};

/// The `datetime-local` input shape the console edits
const LOCAL_INPUT_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Local input with seconds, accepted but not produced
const LOCAL_INPUT_FORMAT_SECONDS: &str = "%Y-%m-%dT%H:%M:%S";

/// The wire shape: local time with an explicit `±HH:MM` offset
const OFFSET_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%:z";

/// Convert a local wall-clock string to its ISO-8601 form with an explicit
/// UTC offset, e.g. `2024-03-10T14:30` → `2024-03-10T14:30:00+03:00`.
///
/// A wall-clock time skipped by a DST transition is a validation error;
/// an ambiguous one (fall-back overlap) resolves to the earlier offset.
pub fn local_to_offset(input: &str) -> Result<String> {
    let naive = NaiveDateTime::parse_from_str(input, LOCAL_INPUT_FORMAT_SECONDS)
        .or_else(|_| NaiveDateTime::parse_from_str(input, LOCAL_INPUT_FORMAT))
        .map_err(|_| {
            Error::validation(format!(
                "invalid local timestamp '{input}', expected YYYY-MM-DDTHH:MM"
            ))
        })?;

    let resolved = match Local.from_local_datetime(&naive) {
        LocalResult::Single(dt) => dt,
        LocalResult::Ambiguous(earlier, _) => earlier,
        LocalResult::None => {
            return Err(Error::validation(format!(
                "local time '{input}' does not exist in this time zone"
            )))
        }
    };

    Ok(resolved.format(OFFSET_FORMAT).to_string())
}

/// Convert an ISO-8601 timestamp with offset back to the local wall-clock
/// input shape, truncating seconds. Inverse of [`local_to_offset`].
pub fn offset_to_local(value: &str) -> Result<String> {
    let parsed = DateTime::parse_from_rfc3339(value)
        .map_err(|_| Error::validation(format!("invalid timestamp '{value}'")))?;

    Ok(parsed.with_timezone(&Local).format(LOCAL_INPUT_FORMAT).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_to_offset_shape() {
        let converted = local_to_offset("2024-03-10T14:30").unwrap();
        // local time spliced with the zone's signed offset
        assert!(converted.starts_with("2024-03-10T14:30:00"));
        let offset = &converted["2024-03-10T14:30:00".len()..];
        assert_eq!(offset.len(), 6, "offset should be ±HH:MM, got '{offset}'");
        assert!(offset.starts_with('+') || offset.starts_with('-'));
        assert_eq!(&offset[3..4], ":");
    }

    #[test]
    fn test_local_to_offset_accepts_seconds() {
        let converted = local_to_offset("2024-03-10T14:30:45").unwrap();
        assert!(converted.starts_with("2024-03-10T14:30:45"));
    }

    #[test]
    fn test_round_trip_is_identity() {
        let original = "2024-03-10T14:30";
        let wire = local_to_offset(original).unwrap();
        assert_eq!(offset_to_local(&wire).unwrap(), original);
    }

    #[test]
    fn test_offset_to_local_truncates_seconds() {
        let wire = local_to_offset("2024-07-01T09:15:42").unwrap();
        assert_eq!(offset_to_local(&wire).unwrap(), "2024-07-01T09:15");
    }

    #[test]
    fn test_invalid_input_rejected() {
        assert!(local_to_offset("2024-03-10 14:30").is_err());
        assert!(local_to_offset("not-a-timestamp").is_err());
        assert!(offset_to_local("2024-03-10T14:30").is_err());
    }
}
