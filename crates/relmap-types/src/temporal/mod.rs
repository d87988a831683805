//! # Temporal Types
//!
//! - [`local`]: `local_date_time`, `local_date`, `local_time`.
//! - [`instant`]: `instant` and `offset_date_time`, points on the timeline.
//! - [`jdbc`]: the `timestamp` / `date` / `time` family sharing
//!   `NaiveDateTime` as their value, resolvable into one another.
//! - [`duration`]: `duration`, a signed span stored as nanoseconds.
//! - [`offset_time`]: `offset_time`, a time of day at a fixed offset.
//! - [`zoned`]: `zoned_date_time`, an instant in a named IANA zone.
//!
//! Zone-less relational values (`Timestamp`) are read and written in the
//! session's JDBC offset whenever a zoned value crosses them.

pub mod duration;
pub mod instant;
pub mod jdbc;
pub mod local;
pub mod offset_time;
pub mod zoned;

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use relmap_core::{ConversionError, SessionContext};

pub use duration::DurationDescriptor;
pub use instant::{InstantDescriptor, OffsetDateTimeDescriptor};
pub use jdbc::JdbcTemporalDescriptor;
pub use local::{LocalDateDescriptor, LocalDateTimeDescriptor, LocalTimeDescriptor};
pub use offset_time::{OffsetTime, OffsetTimeDescriptor};
pub use zoned::ZonedDateTimeDescriptor;

/// Text layout of a date-time without zone.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";
/// Text layout of a date.
pub const DATE_FORMAT: &str = "%Y-%m-%d";
/// Text layout of a wall-clock time.
pub const TIME_FORMAT: &str = "%H:%M:%S%.f";

/// 1970-01-01, the date a bare time is anchored on.
pub fn epoch_date() -> NaiveDate {
    NaiveDate::default()
}

/// Start of `date`.
pub fn midnight(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveDateTime::default().time())
}

/// The instant a zone-less timestamp denotes in the session's JDBC offset.
pub(crate) fn naive_to_utc(
    type_name: &str,
    naive: NaiveDateTime,
    session: &dyn SessionContext,
) -> Result<DateTime<Utc>, ConversionError> {
    session
        .jdbc_time_zone()
        .from_local_datetime(&naive)
        .single()
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| ConversionError::out_of_range(type_name, naive))
}

/// The zone-less timestamp an instant shows in the session's JDBC offset.
pub(crate) fn utc_to_naive(instant: &DateTime<Utc>, session: &dyn SessionContext) -> NaiveDateTime {
    instant.with_timezone(&session.jdbc_time_zone()).naive_local()
}
