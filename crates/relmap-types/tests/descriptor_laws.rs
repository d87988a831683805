//! # Descriptor Laws
//!
//! Property tests run against every built-in descriptor:
//!
//! 1. A value survives `disassemble` then `assemble` through the type's plan.
//! 2. A value survives `to_string` then `from_string`.
//! 3. A value survives `unwrap` then `wrap` for every kind it fits in.
//! 4. Equal values hash equally.
//! 5. `None` passes through every coercion and the cache.

use std::sync::Arc;

use bigdecimal::BigDecimal;
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, TimeDelta, Utc};
use chrono_tz::Tz;
use num_bigint::BigInt;
use proptest::prelude::*;
use proptest::test_runner::TestCaseError;
use relmap_core::{
    ArrayMutabilityPlan, DefaultSessionContext, ImmutableMutabilityPlan, MutabilityPlan,
    TypeDescriptor, ValueKind,
};
use relmap_types::*;
use serde_json::Value;

relmap_types::persistent_enum! {
    enum Color as "color" { Red = "RED", Green = "GREEN", Blue = "BLUE" }
}

fn fail(e: impl std::fmt::Display) -> TestCaseError {
    TestCaseError::fail(e.to_string())
}

/// Laws 1, 2, 4 and 5, plus law 3 over `kinds`.
fn check_laws<T: std::fmt::Debug>(
    d: &dyn TypeDescriptor<T>,
    value: &T,
    kinds: &[ValueKind],
) -> Result<(), TestCaseError> {
    let ctx = DefaultSessionContext::new();
    let name = d.type_name();

    let plan = d.mutability_plan();
    let cached = plan.disassemble(Some(value), &ctx);
    let assembled = plan.assemble(cached.as_ref(), &ctx).map_err(fail)?;
    prop_assert!(d.are_equal(Some(value), assembled.as_ref()), "{name}: cache changed {value:?}");
    prop_assert!(plan.disassemble(None, &ctx).is_none());
    prop_assert!(plan.assemble(None, &ctx).map_err(fail)?.is_none());

    let text = d.to_string(value);
    let parsed = d.from_string(&text).map_err(fail)?;
    prop_assert!(d.are_equal(Some(value), Some(&parsed)), "{name}: text {text:?} changed {value:?}");
    prop_assert_eq!(d.extract_hash_code(value), d.extract_hash_code(&parsed));

    for kind in kinds {
        prop_assert!(d.supports(*kind), "{name} does not support {kind}");
        let wire = d.unwrap(Some(value), *kind, &ctx).map_err(fail)?;
        prop_assert!(wire.as_ref().is_some_and(|w| w.kind() == *kind), "{name}: unwrap to {kind} gave {wire:?}");
        let back = d.wrap(wire, &ctx).map_err(fail)?;
        prop_assert!(d.are_equal(Some(value), back.as_ref()), "{name} via {kind}: {value:?} became {back:?}");
        prop_assert!(d.unwrap(None, *kind, &ctx).map_err(fail)?.is_none());
    }
    prop_assert!(d.wrap(None, &ctx).map_err(fail)?.is_none());
    Ok(())
}

fn json_value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(|n| serde_json::json!(n)),
        "[a-zA-Z0-9_ ]{0,20}".prop_map(Value::String),
    ];
    leaf.prop_recursive(3, 32, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
            prop::collection::btree_map("[a-z]{1,8}", inner, 0..6)
                .prop_map(|m| Value::Object(m.into_iter().collect())),
        ]
    })
}

fn naive_date_time() -> impl Strategy<Value = chrono::NaiveDateTime> {
    (-2_000_000_000i64..4_000_000_000, 0u32..1_000_000_000).prop_map(|(secs, nanos)| {
        DateTime::from_timestamp(secs, nanos)
            .unwrap_or_default()
            .naive_utc()
    })
}

fn time_zone() -> impl Strategy<Value = Tz> {
    prop::sample::select(chrono_tz::TZ_VARIANTS.to_vec())
}

/// Instants between 2000 and 2037, where every zone has fixed rules.
fn recent_instant() -> impl Strategy<Value = DateTime<Utc>> {
    (946_684_800i64..2_114_380_800, 0u32..1_000_000_000).prop_map(|(secs, nanos)| {
        DateTime::from_timestamp(secs, nanos).unwrap_or_default()
    })
}

proptest! {
    #[test]
    fn boolean_laws(v in any::<bool>()) {
        for d in [
            BooleanDescriptor::boolean(),
            BooleanDescriptor::yes_no(),
            BooleanDescriptor::true_false(),
            BooleanDescriptor::numeric_boolean(),
        ] {
            check_laws(&d, &v, d.supported_kinds())?;
        }
    }

    #[test]
    fn byte_laws(v in any::<i8>()) {
        let d = ByteDescriptor::new();
        check_laws(&d, &v, d.supported_kinds())?;
    }

    #[test]
    fn short_laws(v in any::<i16>()) {
        let d = ShortDescriptor::new();
        check_laws(&d, &v, &[
            ValueKind::SmallInt,
            ValueKind::Integer,
            ValueKind::BigInt,
            ValueKind::Real,
            ValueKind::Double,
            ValueKind::String,
        ])?;
    }

    #[test]
    fn integer_laws(v in any::<i32>()) {
        let d = IntegerDescriptor::new();
        check_laws(&d, &v, &[ValueKind::Integer, ValueKind::BigInt, ValueKind::Double, ValueKind::String])?;
    }

    #[test]
    fn long_laws(v in any::<i64>()) {
        let d = LongDescriptor::new();
        check_laws(&d, &v, &[ValueKind::BigInt, ValueKind::String])?;
    }

    #[test]
    fn float_laws(v in any::<f32>()) {
        let d = FloatDescriptor::new();
        check_laws(&d, &v, &[ValueKind::Real, ValueKind::Double, ValueKind::String])?;
    }

    #[test]
    fn double_laws(v in any::<f64>()) {
        let d = DoubleDescriptor::new();
        check_laws(&d, &v, &[ValueKind::Double, ValueKind::String])?;
    }

    #[test]
    fn big_integer_laws(text in "-?[1-9][0-9]{0,40}|0") {
        let d = BigIntegerDescriptor::new();
        let v = d.from_string(&text).map_err(fail)?;
        check_laws(&d, &v, &[ValueKind::String])?;
    }

    #[test]
    fn big_integer_widening_laws(n in any::<i64>()) {
        let d = BigIntegerDescriptor::new();
        check_laws(&d, &BigInt::from(n), &[ValueKind::BigInt, ValueKind::String])?;
    }

    #[test]
    fn big_decimal_laws(mantissa in any::<i64>(), exponent in -40i32..40) {
        let d = BigDecimalDescriptor::new();
        let v = d.from_string(&format!("{mantissa}E{exponent}")).map_err(fail)?;
        check_laws(&d, &v, &[ValueKind::String])?;
    }

    #[test]
    fn big_decimal_widening_laws(n in any::<i32>()) {
        let d = BigDecimalDescriptor::new();
        check_laws(&d, &BigDecimal::from(n), &[
            ValueKind::Integer,
            ValueKind::BigInt,
            ValueKind::Double,
            ValueKind::String,
        ])?;
    }

    #[test]
    fn character_laws(v in any::<char>()) {
        let d = CharacterDescriptor::new();
        check_laws(&d, &v, d.supported_kinds())?;
    }

    #[test]
    fn string_laws(v in "\\PC{0,40}") {
        let d = StringDescriptor::new();
        check_laws(&d, &v, d.supported_kinds())?;
    }

    #[test]
    fn characters_laws(v in prop::collection::vec(any::<char>(), 0..32)) {
        let d = CharactersDescriptor::new();
        check_laws(&d, &v, d.supported_kinds())?;
    }

    #[test]
    fn binary_laws(v in prop::collection::vec(any::<u8>(), 0..64)) {
        let d = BinaryDescriptor::new();
        check_laws(&d, &v, d.supported_kinds())?;
    }

    #[test]
    fn uuid_laws(bits in any::<u128>()) {
        let d = UuidDescriptor::new();
        check_laws(&d, &uuid::Uuid::from_u128(bits), d.supported_kinds())?;
    }

    #[test]
    fn url_laws(host in "[a-z]{1,12}", path in "[a-z0-9]{0,12}") {
        let d = UrlDescriptor::new();
        let v = d.from_string(&format!("https://{host}.example/{path}")).map_err(fail)?;
        check_laws(&d, &v, d.supported_kinds())?;
    }

    #[test]
    fn currency_laws(code in "[A-Z]{3}") {
        let d = CurrencyDescriptor::new();
        let v = d.from_string(&code).map_err(fail)?;
        check_laws(&d, &v, d.supported_kinds())?;
    }

    #[test]
    fn locale_laws(language in "[a-z]{2}", country in "[A-Z]{2}", variant in "[A-Za-z0-9]{0,6}") {
        let d = LocaleDescriptor::new();
        let v = Locale::new(&language, &country, &variant).map_err(fail)?;
        check_laws(&d, &v, d.supported_kinds())?;
    }

    #[test]
    fn zone_offset_laws(seconds in -64_800i32..=64_800) {
        let d = ZoneOffsetDescriptor::new();
        let v = FixedOffset::east_opt(seconds).ok_or_else(|| fail("offset"))?;
        check_laws(&d, &v, d.supported_kinds())?;
    }

    #[test]
    fn time_zone_laws(v in time_zone()) {
        let d = TimeZoneDescriptor::new();
        check_laws(&d, &v, d.supported_kinds())?;
    }

    #[test]
    fn year_laws(n in i64::from(Year::MIN)..=i64::from(Year::MAX)) {
        let d = YearDescriptor::new();
        let v = Year::new(n).map_err(fail)?;
        check_laws(&d, &v, &[ValueKind::Integer, ValueKind::BigInt, ValueKind::String])?;
    }

    #[test]
    fn duration_laws(nanos in any::<i64>()) {
        let d = DurationDescriptor::new();
        check_laws(&d, &TimeDelta::nanoseconds(nanos), d.supported_kinds())?;
    }

    #[test]
    fn instant_laws(millis in -62_000_000_000_000i64..250_000_000_000_000) {
        let d = InstantDescriptor::new();
        let v = DateTime::from_timestamp_millis(millis).ok_or_else(|| fail("millis"))?;
        check_laws(&d, &v, d.supported_kinds())?;
    }

    #[test]
    fn offset_date_time_laws(v in naive_date_time(), minutes in -840i32..=840) {
        let d = OffsetDateTimeDescriptor::new();
        let offset = FixedOffset::east_opt(minutes * 60).ok_or_else(|| fail("offset"))?;
        let v = v.and_utc().with_timezone(&offset);
        check_laws(&d, &v, d.supported_kinds())?;
    }

    #[test]
    fn zoned_date_time_laws(instant in recent_instant(), zone in time_zone()) {
        let d = ZonedDateTimeDescriptor::new();
        check_laws(&d, &instant.with_timezone(&zone), &[ValueKind::String])?;
        check_laws(&d, &instant.with_timezone(&Tz::UTC), d.supported_kinds())?;
    }

    #[test]
    fn offset_time_laws(
        secs in 0u32..86_400,
        nanos in 0u32..1_000_000_000,
        minutes in -1_080i32..=1_080,
    ) {
        let d = OffsetTimeDescriptor::new();
        let time = NaiveTime::from_num_seconds_from_midnight_opt(secs, nanos).ok_or_else(|| fail("time"))?;
        let offset = FixedOffset::east_opt(minutes * 60).ok_or_else(|| fail("offset"))?;
        check_laws(&d, &OffsetTime::new(time, offset), &[ValueKind::TimestampWithOffset, ValueKind::String])?;
        let utc = FixedOffset::east_opt(0).ok_or_else(|| fail("offset"))?;
        check_laws(&d, &OffsetTime::new(time, utc), d.supported_kinds())?;
    }

    #[test]
    fn local_date_time_laws(v in naive_date_time()) {
        let d = LocalDateTimeDescriptor::new();
        check_laws(&d, &v, d.supported_kinds())?;
    }

    #[test]
    fn local_date_laws(days in 1i32..3_000_000) {
        let d = LocalDateDescriptor::new();
        let v = NaiveDate::from_num_days_from_ce_opt(days).ok_or_else(|| fail("days"))?;
        check_laws(&d, &v, d.supported_kinds())?;
    }

    #[test]
    fn local_time_laws(secs in 0u32..86_400, nanos in 0u32..1_000_000_000) {
        let d = LocalTimeDescriptor::new();
        let v = NaiveTime::from_num_seconds_from_midnight_opt(secs, nanos).ok_or_else(|| fail("time"))?;
        check_laws(&d, &v, d.supported_kinds())?;
    }

    #[test]
    fn jdbc_family_laws(v in naive_date_time()) {
        for d in [
            JdbcTemporalDescriptor::timestamp(),
            JdbcTemporalDescriptor::date(),
            JdbcTemporalDescriptor::time(),
        ] {
            check_laws(&d, &v, d.supported_kinds())?;
        }
    }

    #[test]
    fn json_laws(v in json_value()) {
        let d = JsonDescriptor::new();
        check_laws(&d, &v, d.supported_kinds())?;
    }

    #[test]
    fn enum_laws(i in 0usize..3) {
        let d = EnumDescriptor::<Color>::new();
        let v = Color::variants()[i];
        check_laws(&d, &v, d.supported_kinds())?;
    }
}

// ─── Mutability ──────────────────────────────────────────────────────

#[test]
fn immutable_copy_is_the_same_value() {
    let shared = Arc::new(String::from("shared"));
    let plan = ImmutableMutabilityPlan::<Arc<String>>::new();
    let copy = plan.deep_copy(Some(&shared)).unwrap();
    assert!(Arc::ptr_eq(&shared, &copy));

    let ctx = DefaultSessionContext::new();
    let cached = plan.disassemble(Some(&shared), &ctx);
    let restored = plan.assemble(cached.as_ref(), &ctx).unwrap().unwrap();
    assert!(Arc::ptr_eq(&shared, &restored));
}

#[test]
fn mutable_copies_are_independent() {
    let ctx = DefaultSessionContext::new();

    let binary = BinaryDescriptor::new();
    let mut bytes = vec![1u8, 2, 3];
    let copy = binary.mutability_plan().deep_copy(Some(&bytes)).unwrap();
    let cached = binary.mutability_plan().disassemble(Some(&bytes), &ctx);
    bytes[0] = 9;
    assert_eq!(copy, vec![1, 2, 3]);
    assert_eq!(
        binary.mutability_plan().assemble(cached.as_ref(), &ctx).unwrap(),
        Some(vec![1, 2, 3])
    );

    let json = JsonDescriptor::new();
    let mut doc = serde_json::json!({"items": [1, 2]});
    let copy = json.mutability_plan().deep_copy(Some(&doc)).unwrap();
    doc["items"][0] = serde_json::json!(7);
    assert_eq!(copy, serde_json::json!({"items": [1, 2]}));
}

#[test]
fn plans_report_mutability() {
    assert!(!StringDescriptor::new().mutability_plan().is_mutable());
    assert!(JsonDescriptor::new().mutability_plan().is_mutable());
    assert!(ArrayMutabilityPlan::<u8>::new().is_mutable());
}
