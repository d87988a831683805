//! # relmap-types — Standard Type Descriptors
//!
//! Concrete [`TypeDescriptor`](relmap_core::TypeDescriptor)s for the scalar
//! types a persistence layer stores out of the box, and the
//! [`standard`] registry that names them.
//!
//! | Module | Logical types |
//! |---|---|
//! | [`boolean`] | `boolean`, `yes_no`, `true_false`, `numeric_boolean` |
//! | [`numeric`] | `byte`, `short`, `integer`, `long`, `float`, `double` |
//! | [`big`] | `big_integer`, `big_decimal` |
//! | [`character`] | `character`, `string`, `characters` |
//! | [`binary`] | `binary` |
//! | [`identifier`] | `uuid`, `url` |
//! | [`locale`] | `currency`, `locale` |
//! | [`zone`] | `zone_offset`, `time_zone` |
//! | [`year`] | `year` |
//! | [`temporal`] | `instant`, `offset_date_time`, `local_*`, `offset_time`, `zoned_date_time`, `timestamp`, `date`, `time`, `duration` |
//! | [`json`] | `json` |
//! | [`object`] | `object` |
//! | [`enumerated`] | application enums |
//!
//! ## Crate Policy
//!
//! - Descriptors are unit-like and `const`-constructible where their plan
//!   allows it.
//! - No `.unwrap()` outside tests.

pub mod big;
pub mod binary;
pub mod boolean;
pub mod character;
pub mod enumerated;
pub mod identifier;
pub mod json;
pub mod locale;
pub mod numeric;
pub mod object;
pub mod standard;
pub mod temporal;
pub mod year;
pub mod zone;

pub use big::{BigDecimalDescriptor, BigIntegerDescriptor};
pub use binary::BinaryDescriptor;
pub use boolean::BooleanDescriptor;
pub use character::{CharacterDescriptor, CharactersDescriptor, StringDescriptor};
pub use enumerated::{EnumDescriptor, PersistentEnum};
pub use identifier::{UrlDescriptor, UuidDescriptor};
pub use json::JsonDescriptor;
pub use locale::{CurrencyCode, CurrencyDescriptor, Locale, LocaleDescriptor};
pub use numeric::{
    ByteDescriptor, DoubleDescriptor, FloatDescriptor, IntegerDescriptor, LongDescriptor,
    NumericDescriptor, ShortDescriptor,
};
pub use object::ObjectDescriptor;
pub use standard::{global, register_standard, standard_registry};
pub use temporal::{
    DurationDescriptor, InstantDescriptor, JdbcTemporalDescriptor, LocalDateDescriptor,
    LocalDateTimeDescriptor, LocalTimeDescriptor, OffsetDateTimeDescriptor, OffsetTime,
    OffsetTimeDescriptor, ZonedDateTimeDescriptor,
};
pub use year::{Year, YearDescriptor};
pub use zone::{TimeZoneDescriptor, ZoneOffsetDescriptor};
