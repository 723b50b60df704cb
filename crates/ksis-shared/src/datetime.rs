use chrono::{
  DateTime,
  NaiveDate,
  NaiveDateTime
};
use chrono_tz::Tz;

pub const INVALID_DATE: &str =
  "Invalid date";
pub const DEFAULT_DISPLAY_TIMEZONE:
  &str = "Asia/Seoul";

const NAIVE_DATETIME_FORMATS: &[&str] = &[
  "%Y-%m-%dT%H:%M:%S%.f",
  "%Y-%m-%d %H:%M:%S%.f",
  "%Y-%m-%dT%H:%M",
  "%Y-%m-%d %H:%M"
];

/// `%#z` accepts `+09`, `+0900` and `+09:00`.
const OFFSET_DATETIME_FORMATS: &[&str] = &[
  "%Y-%m-%dT%H:%M:%S%.f%#z",
  "%Y-%m-%d %H:%M:%S%.f%#z",
  "%Y-%m-%dT%H:%M%#z",
  "%Y-%m-%d %H:%M%#z"
];

#[derive(
  Debug, Clone, PartialEq, Eq, thiserror::Error,
)]
pub enum DateError {
  #[error("timestamp is empty")]
  Empty,
  #[error("unrecognized timestamp `{0}`")]
  Unrecognized(String),
  #[error("unknown timezone `{0}`")]
  UnknownTimezone(String)
}

pub fn parse_timezone(
  raw: &str
) -> Result<Tz, DateError> {
  let trimmed = raw.trim();
  trimmed.parse::<Tz>().map_err(|_| {
    DateError::UnknownTimezone(
      trimmed.to_string()
    )
  })
}

fn utc_suffix_as_offset(
  raw: &str
) -> String {
  match raw
    .strip_suffix('Z')
    .or_else(|| raw.strip_suffix('z'))
  {
    | Some(stem) => format!("{stem}+00:00"),
    | None => raw.to_string()
  }
}

/// Resolves a registration timestamp to the calendar day it falls on in
/// `tz`.
///
/// Timestamps carrying an offset are converted into `tz`. Timestamps
/// without one are taken as wall-clock time already local to `tz`.
pub fn parse_registered_at(
  raw: &str,
  tz: Tz
) -> Result<NaiveDate, DateError> {
  let trimmed = raw.trim();
  if trimmed.is_empty() {
    return Err(DateError::Empty);
  }

  if let Ok(parsed) =
    DateTime::parse_from_rfc3339(trimmed)
  {
    return Ok(
      parsed
        .with_timezone(&tz)
        .date_naive()
    );
  }

  let with_offset = utc_suffix_as_offset(
    trimmed
  );
  for format in OFFSET_DATETIME_FORMATS {
    if let Ok(parsed) =
      DateTime::parse_from_str(
        &with_offset,
        format
      )
    {
      return Ok(
        parsed
          .with_timezone(&tz)
          .date_naive()
      );
    }
  }

  for format in NAIVE_DATETIME_FORMATS {
    if let Ok(parsed) =
      NaiveDateTime::parse_from_str(
        trimmed, format
      )
    {
      return Ok(parsed.date());
    }
  }

  NaiveDate::parse_from_str(
    trimmed, "%Y-%m-%d"
  )
  .map_err(|_| {
    DateError::Unrecognized(
      trimmed.to_string()
    )
  })
}

/// Formats a registration timestamp as `yyyy-MM-dd`, falling back to
/// [`INVALID_DATE`] when it cannot be parsed.
#[must_use]
pub fn format_registered_at(
  raw: &str,
  tz: Tz
) -> String {
  match parse_registered_at(raw, tz) {
    | Ok(date) => {
      date
        .format("%Y-%m-%d")
        .to_string()
    }
    | Err(error) => {
      tracing::warn!(
        %error,
        raw,
        "failed to format registration \
         date"
      );
      INVALID_DATE.to_string()
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn seoul() -> Tz {
    parse_timezone(
      DEFAULT_DISPLAY_TIMEZONE
    )
    .expect("valid timezone")
  }

  #[test]
  fn formats_iso_timestamp_as_day() {
    assert_eq!(
      format_registered_at(
        "2024-03-15T10:20:30Z",
        seoul()
      ),
      "2024-03-15"
    );
    assert_eq!(
      format_registered_at(
        "2024-03-15T10:20:30.123+09:00",
        seoul()
      ),
      "2024-03-15"
    );
  }

  #[test]
  fn formats_minute_precision_and_short_offsets(
  ) {
    for raw in [
      "2024-03-15T10:20Z",
      "2024-03-15T10:20+09:00",
      "2024-03-15 10:20+09:00",
      "2024-03-15T10:20:30+09",
      "2024-03-15T10:20:30+0900"
    ] {
      assert_eq!(
        format_registered_at(raw, seoul()),
        "2024-03-15",
        "{raw}"
      );
    }
    assert_eq!(
      format_registered_at(
        "2024-03-15T20:30Z",
        seoul()
      ),
      "2024-03-16"
    );
  }

  #[test]
  fn converts_offset_timestamps_into_display_zone(
  ) {
    assert_eq!(
      format_registered_at(
        "2024-03-15T20:00:00Z",
        seoul()
      ),
      "2024-03-16"
    );
    assert_eq!(
      format_registered_at(
        "2024-03-15T20:00:00Z",
        chrono_tz::UTC
      ),
      "2024-03-15"
    );
  }

  #[test]
  fn keeps_naive_timestamps_as_wall_clock(
  ) {
    assert_eq!(
      format_registered_at(
        "2024-12-31T23:59:59",
        chrono_tz::UTC
      ),
      "2024-12-31"
    );
    assert_eq!(
      format_registered_at(
        "2024-12-31 08:00:00",
        seoul()
      ),
      "2024-12-31"
    );
    assert_eq!(
      format_registered_at(
        "2025-01-02",
        seoul()
      ),
      "2025-01-02"
    );
  }

  #[test]
  fn invalid_input_renders_fallback() {
    assert_eq!(
      format_registered_at(
        "not-a-date",
        seoul()
      ),
      INVALID_DATE
    );
    assert_eq!(
      format_registered_at("", seoul()),
      INVALID_DATE
    );
    assert_eq!(
      format_registered_at(
        "2024-13-40",
        seoul()
      ),
      INVALID_DATE
    );
  }

  #[test]
  fn unknown_timezone_is_an_error() {
    assert_eq!(
      parse_timezone("Mars/Olympus"),
      Err(DateError::UnknownTimezone(
        "Mars/Olympus".to_string()
      ))
    );
  }
}
