//! Temporal precision resolution over the standard registry.
//!
//! For every temporal type and every precision it supports, resolution lands
//! on a registered descriptor of that precision, resolving that descriptor
//! at its own precision is the identity, and unsupported precisions fail.

use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime};
use relmap_core::{
    resolve_precision, TemporalPrecision, TemporalTypeDescriptor, TypeError, TypeRegistry,
};
use relmap_types::standard::global;
use relmap_types::{JdbcTemporalDescriptor, LocalDateDescriptor};

const TEMPORAL_TYPES: &[&str] = &[
    "instant",
    "offset_date_time",
    "zoned_date_time",
    "offset_time",
    "local_date_time",
    "local_date",
    "local_time",
    "timestamp",
    "date",
    "time",
];

#[test]
fn resolution_is_closed() {
    let registry = global();
    for name in TEMPORAL_TYPES {
        let descriptor = registry.lookup(name).unwrap();
        let native = descriptor.temporal_precision().unwrap();
        assert_eq!(descriptor.resolve_for_precision(None, registry).unwrap(), *name);
        assert_eq!(
            descriptor.resolve_for_precision(Some(native), registry).unwrap(),
            *name
        );

        for precision in TemporalPrecision::all() {
            let result = descriptor.resolve_for_precision(Some(*precision), registry);
            if descriptor.supported_precisions().contains(precision) {
                let target = registry.lookup(result.unwrap()).unwrap();
                assert_eq!(target.temporal_precision(), Some(*precision), "{name} at {precision}");
                assert_eq!(
                    target.resolve_for_precision(Some(*precision), registry).unwrap(),
                    target.type_name()
                );
            } else {
                assert!(
                    matches!(result, Err(TypeError::UnsupportedPrecision { .. })),
                    "{name} at {precision}"
                );
            }
        }
    }
}

#[test]
fn supported_precisions_per_type() {
    let registry = global();
    let precisions = |name: &str| registry.lookup(name).unwrap().supported_precisions();
    assert_eq!(precisions("instant"), vec![TemporalPrecision::Timestamp]);
    assert_eq!(precisions("local_date"), vec![TemporalPrecision::Date]);
    assert_eq!(precisions("local_time"), vec![TemporalPrecision::Time]);
    assert_eq!(precisions("offset_time"), vec![TemporalPrecision::Time]);
    assert_eq!(precisions("zoned_date_time"), vec![TemporalPrecision::Timestamp]);
    assert_eq!(precisions("timestamp").len(), 3);
    assert!(precisions("string").is_empty());
}

#[test]
fn non_temporal_types_reject_resolution() {
    let registry = global();
    let descriptor = registry.lookup("integer").unwrap();
    assert!(matches!(
        descriptor.resolve_for_precision(Some(TemporalPrecision::Date), registry),
        Err(TypeError::UnsupportedPrecision { .. })
    ));
}

#[test]
fn resolution_returns_the_registered_instance() {
    let registry = global();
    let timestamp = registry.temporal::<NaiveDateTime>("timestamp").unwrap();
    let resolved = resolve_precision(&timestamp, Some(TemporalPrecision::Date), registry).unwrap();
    let registered = registry.temporal::<NaiveDateTime>("date").unwrap();
    assert!(Arc::ptr_eq(&resolved, &registered));
}

#[test]
fn date_sibling_works_on_the_date_portion() {
    let registry = global();
    let timestamp = registry.temporal::<NaiveDateTime>("timestamp").unwrap();
    let date = resolve_precision(&timestamp, Some(TemporalPrecision::Date), registry).unwrap();
    let value: NaiveDateTime = "2024-02-29T23:59:58".parse().unwrap();
    assert_eq!(date.to_string(&value), "2024-02-29");
    let midnight = NaiveDate::from_ymd_opt(2024, 2, 29)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    assert!(date.are_equal(Some(&value), Some(&midnight)));
    assert!(!timestamp.are_equal(Some(&value), Some(&midnight)));
}

#[test]
fn local_types_cannot_change_precision() {
    let registry = global();
    let local = registry.temporal::<NaiveDateTime>("local_date_time").unwrap();
    let err = resolve_precision(&local, Some(TemporalPrecision::Date), registry)
        .err()
        .unwrap();
    assert!(matches!(
        err,
        TypeError::UnsupportedPrecision { precision: TemporalPrecision::Date, .. }
    ));
}

#[test]
fn native_precision_resolves_without_registration() {
    let empty = TypeRegistry::builder().build();
    let local_date = LocalDateDescriptor::new();
    for requested in [None, Some(TemporalPrecision::Date)] {
        let resolved = local_date.resolve_type_for_precision(requested, &empty).unwrap();
        assert_eq!(resolved.type_name(), "local_date");
    }

    let time = JdbcTemporalDescriptor::time();
    assert_eq!(time.resolve_type_for_precision(None, &empty).unwrap().type_name(), "time");
    assert!(matches!(
        time.resolve_type_for_precision(Some(TemporalPrecision::Date), &empty),
        Err(TypeError::UnknownType { .. })
    ));
}
