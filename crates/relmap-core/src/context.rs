//! # Session Context
//!
//! The per-call collaborator threaded through `wrap`, `unwrap`,
//! `disassemble` and `assemble`. Descriptors never retain it beyond the call.

use chrono::{FixedOffset, Offset, Utc};

use crate::error::ConversionError;
use crate::settings::TypeSettings;

/// Options a session exposes to value coercions.
pub trait SessionContext: Send + Sync {
    /// Offset used when a zoned value is bound to, or read from, a zone-less
    /// relational representation.
    fn jdbc_time_zone(&self) -> FixedOffset {
        utc()
    }
}

/// A context with no session behind it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DefaultSessionContext {
    jdbc_time_zone: FixedOffset,
}

impl DefaultSessionContext {
    /// A context binding zone-less values in UTC.
    pub fn new() -> Self {
        Self {
            jdbc_time_zone: utc(),
        }
    }

    /// A context binding zone-less values at `offset`.
    pub fn with_time_zone(offset: FixedOffset) -> Self {
        Self {
            jdbc_time_zone: offset,
        }
    }

    /// A context carrying the configured JDBC offset, or UTC when the
    /// configured text is not a valid offset.
    pub fn from_settings(settings: &TypeSettings) -> Self {
        Self {
            jdbc_time_zone: settings.jdbc_offset().unwrap_or_else(|_| utc()),
        }
    }
}

impl Default for DefaultSessionContext {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionContext for DefaultSessionContext {
    fn jdbc_time_zone(&self) -> FixedOffset {
        self.jdbc_time_zone
    }
}

/// The zero offset.
pub fn utc() -> FixedOffset {
    Utc.fix()
}

const MAX_OFFSET_SECONDS: i32 = 18 * 3600;

/// Parse a UTC offset: `Z`, `+h`, `+hh`, `+hh:mm`, `+hhmm`, `+hh:mm:ss` or
/// `+hhmmss` (and the `-` forms). Offsets beyond ±18:00 are rejected.
pub fn parse_offset(text: &str) -> Result<FixedOffset, ConversionError> {
    const NAME: &str = "zone_offset";
    if text == "Z" {
        return Ok(utc());
    }
    let sign = match text.chars().next() {
        Some('+') => 1,
        Some('-') => -1,
        _ => return Err(ConversionError::invalid_literal(NAME, text, "must start with '+', '-' or be 'Z'")),
    };
    let body = &text[1..];
    let digits: String = body.chars().filter(|c| *c != ':').collect();
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(ConversionError::invalid_literal(NAME, text, "expected digits after the sign"));
    }
    let colon_form = body.contains(':');
    let colons_placed = body.len() >= 5
        && body.as_bytes()[2] == b':'
        && (body.len() == 5 || (body.len() == 8 && body.as_bytes()[5] == b':'));
    if colon_form && !colons_placed {
        return Err(ConversionError::invalid_literal(NAME, text, "expected hh:mm or hh:mm:ss"));
    }
    let field = |range: std::ops::Range<usize>| -> i32 {
        digits[range].parse::<i32>().unwrap_or(0)
    };
    let (hours, minutes, seconds) = match digits.len() {
        1 | 2 => (field(0..digits.len()), 0, 0),
        4 => (field(0..2), field(2..4), 0),
        6 => (field(0..2), field(2..4), field(4..6)),
        _ => return Err(ConversionError::invalid_literal(NAME, text, "unrecognised offset layout")),
    };
    if minutes > 59 || seconds > 59 {
        return Err(ConversionError::invalid_literal(NAME, text, "minutes and seconds must be below 60"));
    }
    let total = sign * (hours * 3600 + minutes * 60 + seconds);
    if total.abs() > MAX_OFFSET_SECONDS {
        return Err(ConversionError::out_of_range(NAME, text));
    }
    FixedOffset::east_opt(total).ok_or_else(|| ConversionError::out_of_range(NAME, text))
}

/// Render an offset the way [`parse_offset`] reads it: `Z` for zero,
/// otherwise `+hh:mm` with a `:ss` suffix only when seconds are present.
pub fn format_offset(offset: &FixedOffset) -> String {
    let total = offset.local_minus_utc();
    if total == 0 {
        return "Z".to_string();
    }
    let sign = if total < 0 { '-' } else { '+' };
    let abs = total.abs();
    let (hours, minutes, seconds) = (abs / 3600, (abs / 60) % 60, abs % 60);
    if seconds == 0 {
        format!("{sign}{hours:02}:{minutes:02}")
    } else {
        format!("{sign}{hours:02}:{minutes:02}:{seconds:02}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_context_is_utc() {
        assert_eq!(DefaultSessionContext::new().jdbc_time_zone().local_minus_utc(), 0);
    }

    #[test]
    fn explicit_offset_is_kept() {
        let offset = FixedOffset::east_opt(2 * 3600).unwrap();
        let ctx = DefaultSessionContext::with_time_zone(offset);
        assert_eq!(ctx.jdbc_time_zone(), offset);
    }

    #[test]
    fn parse_offset_layouts() {
        assert_eq!(parse_offset("Z").unwrap().local_minus_utc(), 0);
        assert_eq!(parse_offset("+2").unwrap().local_minus_utc(), 7200);
        assert_eq!(parse_offset("+02").unwrap().local_minus_utc(), 7200);
        assert_eq!(parse_offset("-05:30").unwrap().local_minus_utc(), -(5 * 3600 + 30 * 60));
        assert_eq!(parse_offset("+0530").unwrap().local_minus_utc(), 5 * 3600 + 30 * 60);
        assert_eq!(parse_offset("+01:00:30").unwrap().local_minus_utc(), 3630);
    }

    #[test]
    fn parse_offset_rejects_garbage() {
        assert!(parse_offset("").is_err());
        assert!(parse_offset("05:00").is_err());
        assert!(parse_offset("+5:00").is_err());
        assert!(parse_offset("+aa").is_err());
        assert!(parse_offset("+01:75").is_err());
        assert!(matches!(
            parse_offset("+19:00"),
            Err(ConversionError::OutOfRange { .. })
        ));
    }

    #[test]
    fn format_offset_roundtrip() {
        for text in ["Z", "+02:00", "-05:30", "+01:00:30", "+18:00"] {
            assert_eq!(format_offset(&parse_offset(text).unwrap()), text);
        }
    }

    #[test]
    fn from_settings_reads_offset() {
        let settings = TypeSettings {
            jdbc_time_zone: "-05:00".to_string(),
            ..TypeSettings::default()
        };
        let ctx = DefaultSessionContext::from_settings(&settings);
        assert_eq!(ctx.jdbc_time_zone().local_minus_utc(), -5 * 3600);
    }
}
