// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Parsers for temporal and identity leaf types.

use std::any::{Any, TypeId};

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, Utc};
use pyxis_core::Version;
use uuid::Uuid;

use super::{ParseError, TypeParser};

/// Parses `DateTime<Utc>` values.
///
/// Accepted shapes, tried in order: RFC 3339 (`2024-05-01T10:30:00Z`),
/// a naive date-time (`2024-05-01 10:30:00`, `T` separator also accepted,
/// optional fractional seconds, interpreted as UTC), and a bare date
/// (`2024-05-01`, midnight UTC).
#[derive(Debug, Default, Clone, Copy)]
pub struct DateTimeParser;

impl DateTimeParser {
    /// Parses a date-time literal.
    pub fn parse_literal(raw: &str) -> Result<DateTime<Utc>, ParseError> {
        let trimmed = raw.trim();
        if let Ok(value) = DateTime::parse_from_rfc3339(trimmed) {
            return Ok(value.with_timezone(&Utc));
        }
        for format in ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"] {
            if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
                return Ok(naive.and_utc());
            }
        }
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
            if let Some(naive) = date.and_hms_opt(0, 0, 0) {
                return Ok(naive.and_utc());
            }
        }
        Err(ParseError::invalid_literal::<DateTime<Utc>>(raw))
    }
}

impl TypeParser for DateTimeParser {
    fn target_type(&self) -> TypeId {
        TypeId::of::<DateTime<Utc>>()
    }

    fn target_name(&self) -> &'static str {
        "DateTime<Utc>"
    }

    fn can_be_array_element(&self) -> bool {
        true
    }

    fn parse(&self, raw: &str) -> Result<Box<dyn Any>, ParseError> {
        Self::parse_literal(raw).map(|value| Box::new(value) as Box<dyn Any>)
    }
}

/// Parses `chrono::Duration` values from the time-span grammar
/// `[-][d.]hh:mm[:ss[.frac]]`.
///
/// Hours must stay below 24 and minutes/seconds below 60; the optional day
/// count carries any larger span.
#[derive(Debug, Default, Clone, Copy)]
pub struct DurationParser;

impl DurationParser {
    /// Parses a time-span literal.
    pub fn parse_literal(raw: &str) -> Result<Duration, ParseError> {
        let trimmed = raw.trim();
        let (negative, body) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed),
        };

        let parts: Vec<&str> = body.split(':').collect();
        if parts.len() < 2 || parts.len() > 3 {
            return Err(ParseError::invalid_literal::<Duration>(raw));
        }

        let field = |text: &str| -> Result<i64, ParseError> {
            text.parse::<i64>()
                .map_err(|_| ParseError::invalid_literal::<Duration>(raw))
        };

        let (days, hours_text) = match parts[0].split_once('.') {
            Some((days_text, hours_text)) => (field(days_text)?, hours_text),
            None => (0, parts[0]),
        };
        let hours = field(hours_text)?;
        let minutes = field(parts[1])?;
        let (seconds, nanos) = if parts.len() == 3 {
            match parts[2].split_once('.') {
                Some((seconds_text, fraction)) => {
                    (field(seconds_text)?, Self::fraction_nanos(fraction, raw)?)
                }
                None => (field(parts[2])?, 0),
            }
        } else {
            (0, 0)
        };

        if days < 0 || !(0..24).contains(&hours) || !(0..60).contains(&minutes)
            || !(0..60).contains(&seconds)
        {
            return Err(ParseError::invalid_literal::<Duration>(raw));
        }

        let total_seconds = days * 86_400 + hours * 3_600 + minutes * 60 + seconds;
        let span = Duration::try_seconds(total_seconds)
            .and_then(|span| span.checked_add(&Duration::nanoseconds(nanos)))
            .ok_or_else(|| ParseError::invalid_literal::<Duration>(raw))?;
        Ok(if negative { -span } else { span })
    }

    // A fraction of up to nine digits, right-padded: ".5" is half a second.
    fn fraction_nanos(fraction: &str, raw: &str) -> Result<i64, ParseError> {
        if fraction.is_empty()
            || fraction.len() > 9
            || !fraction.bytes().all(|byte| byte.is_ascii_digit())
        {
            return Err(ParseError::invalid_literal::<Duration>(raw));
        }
        let digits = fraction
            .parse::<i64>()
            .map_err(|_| ParseError::invalid_literal::<Duration>(raw))?;
        Ok(digits * 10_i64.pow(9 - fraction.len() as u32))
    }
}

impl TypeParser for DurationParser {
    fn target_type(&self) -> TypeId {
        TypeId::of::<Duration>()
    }

    fn target_name(&self) -> &'static str {
        "Duration"
    }

    fn can_be_array_element(&self) -> bool {
        true
    }

    fn parse(&self, raw: &str) -> Result<Box<dyn Any>, ParseError> {
        Self::parse_literal(raw).map(|value| Box::new(value) as Box<dyn Any>)
    }
}

/// Parses `Uuid` values in hyphenated or simple form.
#[derive(Debug, Default, Clone, Copy)]
pub struct GuidParser;

impl TypeParser for GuidParser {
    fn target_type(&self) -> TypeId {
        TypeId::of::<Uuid>()
    }

    fn target_name(&self) -> &'static str {
        "Uuid"
    }

    fn can_be_array_element(&self) -> bool {
        true
    }

    fn parse(&self, raw: &str) -> Result<Box<dyn Any>, ParseError> {
        Uuid::parse_str(raw.trim())
            .map(|value| Box::new(value) as Box<dyn Any>)
            .map_err(|_| ParseError::invalid_literal::<Uuid>(raw))
    }
}

/// Parses semantic [`Version`] values, e.g. `1.2.3-rc.1`.
#[derive(Debug, Default, Clone, Copy)]
pub struct VersionParser;

impl TypeParser for VersionParser {
    fn target_type(&self) -> TypeId {
        TypeId::of::<Version>()
    }

    fn target_name(&self) -> &'static str {
        "Version"
    }

    fn can_be_array_element(&self) -> bool {
        true
    }

    fn parse(&self, raw: &str) -> Result<Box<dyn Any>, ParseError> {
        Version::try_parse(raw)
            .map(|value| Box::new(value) as Box<dyn Any>)
            .ok_or_else(|| ParseError::invalid_literal::<Version>(raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_time_shapes() {
        let rfc = DateTimeParser::parse_literal("2024-05-01T10:30:00Z").unwrap();
        let naive = DateTimeParser::parse_literal("2024-05-01 10:30:00").unwrap();
        assert_eq!(rfc, naive);

        let midnight = DateTimeParser::parse_literal("2024-05-01").unwrap();
        assert_eq!(midnight.to_rfc3339(), "2024-05-01T00:00:00+00:00");

        assert!(DateTimeParser::parse_literal("yesterday").is_err());
    }

    #[test]
    fn test_duration_shapes() {
        assert_eq!(
            DurationParser::parse_literal("01:30").unwrap(),
            Duration::minutes(90)
        );
        assert_eq!(
            DurationParser::parse_literal("1.02:00:00").unwrap(),
            Duration::hours(26)
        );
        assert_eq!(
            DurationParser::parse_literal("00:00:01.5").unwrap(),
            Duration::milliseconds(1500)
        );
        assert_eq!(
            DurationParser::parse_literal("-00:10:00").unwrap(),
            Duration::minutes(-10)
        );
    }

    #[test]
    fn test_duration_rejects_out_of_range_fields() {
        assert!(DurationParser::parse_literal("24:00").is_err());
        assert!(DurationParser::parse_literal("00:60:00").is_err());
        assert!(DurationParser::parse_literal("10").is_err());
    }

    #[test]
    fn test_guid_parses_both_forms() {
        let hyphenated = GuidParser
            .parse("6c351541-17f3-4a41-b9f8-a2c171f5ea8f")
            .unwrap();
        let simple = GuidParser.parse("6c35154117f34a41b9f8a2c171f5ea8f").unwrap();
        assert_eq!(
            hyphenated.downcast_ref::<Uuid>(),
            simple.downcast_ref::<Uuid>()
        );
        assert!(GuidParser.parse("not-a-guid").is_err());
    }

    #[test]
    fn test_version_parser_errors_instead_of_degrading() {
        assert!(VersionParser.parse("1.2.3-beta.2").is_ok());
        assert!(VersionParser.parse("1.2").is_err());
    }
}
