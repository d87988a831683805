//! # Standard Registry
//!
//! Every built-in logical type, registered under its name. Applications add
//! their own enums and descriptors on top of [`register_standard`] before
//! building.
//!
//! Registration order decides the default descriptor per value type:
//! `boolean` for `bool`, `string` for `String`, `local_date_time` for
//! `NaiveDateTime`.

use std::sync::OnceLock;

use relmap_core::{TypeRegistry, TypeRegistryBuilder};

use crate::big::{BigDecimalDescriptor, BigIntegerDescriptor};
use crate::binary::BinaryDescriptor;
use crate::boolean::BooleanDescriptor;
use crate::character::{CharacterDescriptor, CharactersDescriptor, StringDescriptor};
use crate::identifier::{UrlDescriptor, UuidDescriptor};
use crate::json::JsonDescriptor;
use crate::locale::{CurrencyDescriptor, LocaleDescriptor};
use crate::numeric::{
    ByteDescriptor, DoubleDescriptor, FloatDescriptor, IntegerDescriptor, LongDescriptor,
    ShortDescriptor,
};
use crate::object::ObjectDescriptor;
use crate::temporal::{
    DurationDescriptor, InstantDescriptor, JdbcTemporalDescriptor, LocalDateDescriptor,
    LocalDateTimeDescriptor, LocalTimeDescriptor, OffsetDateTimeDescriptor, OffsetTimeDescriptor,
    ZonedDateTimeDescriptor,
};
use crate::year::YearDescriptor;
use crate::zone::{TimeZoneDescriptor, ZoneOffsetDescriptor};

/// Add every built-in type to `builder`.
pub fn register_standard(builder: TypeRegistryBuilder) -> TypeRegistryBuilder {
    builder
        .register(BooleanDescriptor::boolean())
        .register(BooleanDescriptor::yes_no())
        .register(BooleanDescriptor::true_false())
        .register(BooleanDescriptor::numeric_boolean())
        .register(ByteDescriptor::new())
        .register(ShortDescriptor::new())
        .register(IntegerDescriptor::new())
        .register(LongDescriptor::new())
        .register(FloatDescriptor::new())
        .register(DoubleDescriptor::new())
        .register(BigIntegerDescriptor::new())
        .register(BigDecimalDescriptor::new())
        .register(CharacterDescriptor::new())
        .register(StringDescriptor::new())
        .register(CharactersDescriptor::new())
        .register(BinaryDescriptor::new())
        .register(UuidDescriptor::new())
        .register(UrlDescriptor::new())
        .register(CurrencyDescriptor::new())
        .register(LocaleDescriptor::new())
        .register(ZoneOffsetDescriptor::new())
        .register(TimeZoneDescriptor::new())
        .register(YearDescriptor::new())
        .register(DurationDescriptor::new())
        .register_temporal(InstantDescriptor::new())
        .register_temporal(OffsetDateTimeDescriptor::new())
        .register_temporal(ZonedDateTimeDescriptor::new())
        .register_temporal(OffsetTimeDescriptor::new())
        .register_temporal(LocalDateTimeDescriptor::new())
        .register_temporal(LocalDateDescriptor::new())
        .register_temporal(LocalTimeDescriptor::new())
        .register_temporal(JdbcTemporalDescriptor::timestamp())
        .register_temporal(JdbcTemporalDescriptor::date())
        .register_temporal(JdbcTemporalDescriptor::time())
        .register(JsonDescriptor::new())
        .register(ObjectDescriptor::new())
}

/// A fresh registry holding the built-in types.
pub fn standard_registry() -> TypeRegistry {
    register_standard(TypeRegistry::builder()).build()
}

/// The process-wide standard registry, built on first use.
pub fn global() -> &'static TypeRegistry {
    static REGISTRY: OnceLock<TypeRegistry> = OnceLock::new();
    REGISTRY.get_or_init(|| {
        let registry = standard_registry();
        tracing::debug!(types = registry.len(), "standard type registry initialized");
        registry
    })
}
