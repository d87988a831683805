//! # Numeric Types
//!
//! `byte`, `short`, `integer`, `long`, `float` and `double`, one generic
//! descriptor over the primitive value type.
//!
//! ## Coercion policy
//!
//! Numeric to numeric conversion always goes through the value's own cast
//! (`as`), never through text:
//!
//! - integer narrowing keeps the low bits (two's complement), so
//!   `300_i32` unwrapped as `TinyInt` is `44`;
//! - float to integer saturates at the target's bounds, NaN becomes `0`;
//! - widening is exact.
//!
//! A `String` target uses the canonical text form. Text to number uses the
//! standard literal grammar: no surrounding whitespace, no `_` separators.
//! Integer literals beyond the type's range fail with `OutOfRange`.

use std::cmp::Ordering;
use std::fmt::Display;
use std::marker::PhantomData;
use std::num::{IntErrorKind, ParseIntError};
use std::str::FromStr;

use relmap_core::{
    hash_of, parse_literal, unknown_unwrap, unknown_wrap, Comparator, ConversionError,
    ImmutableMutabilityPlan, JdbcValue, MutabilityPlan, SessionContext, TypeDescriptor, TypeError,
    ValueKind, WireTypeCode, WireTypeIndicators,
};

const KINDS: &[ValueKind] = &[
    ValueKind::TinyInt,
    ValueKind::SmallInt,
    ValueKind::Integer,
    ValueKind::BigInt,
    ValueKind::Real,
    ValueKind::Double,
    ValueKind::String,
];

/// Cast between a primitive number and the numeric [`JdbcValue`] shapes.
pub trait NumericCast: Copy {
    /// The value as the numeric shape `kind`, or `None` for a non-numeric kind.
    fn to_numeric(self, kind: ValueKind) -> Option<JdbcValue>;

    /// The value held by a numeric shape, or `None` for a non-numeric value.
    fn from_numeric(value: &JdbcValue) -> Option<Self>;
}

macro_rules! impl_numeric_cast {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl NumericCast for $ty {
                fn to_numeric(self, kind: ValueKind) -> Option<JdbcValue> {
                    match kind {
                        ValueKind::TinyInt => Some(JdbcValue::TinyInt(self as i8)),
                        ValueKind::SmallInt => Some(JdbcValue::SmallInt(self as i16)),
                        ValueKind::Integer => Some(JdbcValue::Integer(self as i32)),
                        ValueKind::BigInt => Some(JdbcValue::BigInt(self as i64)),
                        ValueKind::Real => Some(JdbcValue::Real(self as f32)),
                        ValueKind::Double => Some(JdbcValue::Double(self as f64)),
                        _ => None,
                    }
                }

                fn from_numeric(value: &JdbcValue) -> Option<Self> {
                    match *value {
                        JdbcValue::TinyInt(v) => Some(v as $ty),
                        JdbcValue::SmallInt(v) => Some(v as $ty),
                        JdbcValue::Integer(v) => Some(v as $ty),
                        JdbcValue::BigInt(v) => Some(v as $ty),
                        JdbcValue::Real(v) => Some(v as $ty),
                        JdbcValue::Double(v) => Some(v as $ty),
                        _ => None,
                    }
                }
            }
        )+
    };
}

impl_numeric_cast!(i8, i16, i32, i64, f32, f64);

/// A primitive number with a logical type of its own.
pub trait Numeric: NumericCast + Display + Send + Sync + 'static {
    /// Registry name of the logical type.
    const TYPE_NAME: &'static str;

    /// Recommended column type.
    const WIRE_TYPE: WireTypeCode;

    fn parse(text: &str) -> Result<Self, ConversionError>;

    fn equal(a: &Self, b: &Self) -> bool;

    fn hash_code(value: &Self) -> u64;

    fn compare(a: &Self, b: &Self) -> Ordering;
}

/// Parse an integer literal, reporting overflow as `OutOfRange`.
pub fn parse_integer<N>(type_name: &str, text: &str) -> Result<N, ConversionError>
where
    N: FromStr<Err = ParseIntError>,
{
    text.parse::<N>().map_err(|e| match e.kind() {
        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => {
            ConversionError::out_of_range(type_name, text)
        }
        _ => ConversionError::invalid_literal(type_name, text, e),
    })
}

macro_rules! impl_integer {
    ($ty:ty, $name:literal, $wire:expr) => {
        impl Numeric for $ty {
            const TYPE_NAME: &'static str = $name;
            const WIRE_TYPE: WireTypeCode = $wire;

            fn parse(text: &str) -> Result<Self, ConversionError> {
                parse_integer(Self::TYPE_NAME, text)
            }

            fn equal(a: &Self, b: &Self) -> bool {
                a == b
            }

            fn hash_code(value: &Self) -> u64 {
                hash_of(value)
            }

            fn compare(a: &Self, b: &Self) -> Ordering {
                a.cmp(b)
            }
        }
    };
}

impl_integer!(i8, "byte", WireTypeCode::TinyInt);
impl_integer!(i16, "short", WireTypeCode::SmallInt);
impl_integer!(i32, "integer", WireTypeCode::Integer);
impl_integer!(i64, "long", WireTypeCode::BigInt);

// Floats compare by bit pattern with every NaN collapsed to one value, so
// NaN equals itself and 0.0 differs from -0.0. Hash and order follow the
// same bits.
macro_rules! impl_float {
    ($ty:ty, $name:literal, $wire:expr) => {
        impl Numeric for $ty {
            const TYPE_NAME: &'static str = $name;
            const WIRE_TYPE: WireTypeCode = $wire;

            fn parse(text: &str) -> Result<Self, ConversionError> {
                parse_literal(Self::TYPE_NAME, text)
            }

            fn equal(a: &Self, b: &Self) -> bool {
                canonical(*a).to_bits() == canonical(*b).to_bits()
            }

            fn hash_code(value: &Self) -> u64 {
                hash_of(&canonical(*value).to_bits())
            }

            fn compare(a: &Self, b: &Self) -> Ordering {
                canonical(*a).total_cmp(&canonical(*b))
            }
        }

        impl Canonical for $ty {
            fn canonical(self) -> Self {
                if self.is_nan() {
                    <$ty>::NAN
                } else {
                    self
                }
            }
        }
    };
}

trait Canonical {
    fn canonical(self) -> Self;
}

fn canonical<F: Canonical>(value: F) -> F {
    value.canonical()
}

impl_float!(f32, "float", WireTypeCode::Float);
impl_float!(f64, "double", WireTypeCode::Double);

/// Descriptor for the numeric logical type of `N`.
pub struct NumericDescriptor<N> {
    plan: ImmutableMutabilityPlan<N>,
    _value: PhantomData<fn() -> N>,
}

pub type ByteDescriptor = NumericDescriptor<i8>;
pub type ShortDescriptor = NumericDescriptor<i16>;
pub type IntegerDescriptor = NumericDescriptor<i32>;
pub type LongDescriptor = NumericDescriptor<i64>;
pub type FloatDescriptor = NumericDescriptor<f32>;
pub type DoubleDescriptor = NumericDescriptor<f64>;

impl<N> NumericDescriptor<N> {
    pub const fn new() -> Self {
        Self {
            plan: ImmutableMutabilityPlan::new(),
            _value: PhantomData,
        }
    }
}

impl<N> Default for NumericDescriptor<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: Numeric> std::fmt::Debug for NumericDescriptor<N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("NumericDescriptor").field(&N::TYPE_NAME).finish()
    }
}

impl<N: Numeric + Clone> TypeDescriptor<N> for NumericDescriptor<N> {
    fn type_name(&self) -> &'static str {
        N::TYPE_NAME
    }

    fn to_string(&self, value: &N) -> String {
        value.to_string()
    }

    fn from_string(&self, text: &str) -> Result<N, ConversionError> {
        N::parse(text)
    }

    fn are_equal(&self, a: Option<&N>, b: Option<&N>) -> bool {
        match (a, b) {
            (Some(a), Some(b)) => N::equal(a, b),
            (None, None) => true,
            _ => false,
        }
    }

    fn extract_hash_code(&self, value: &N) -> u64 {
        N::hash_code(value)
    }

    fn unwrap(
        &self,
        value: Option<&N>,
        kind: ValueKind,
        _session: &dyn SessionContext,
    ) -> Result<Option<JdbcValue>, TypeError> {
        let Some(&v) = value else { return Ok(None) };
        if kind == ValueKind::String {
            return Ok(Some(JdbcValue::String(v.to_string())));
        }
        v.to_numeric(kind)
            .map(Some)
            .ok_or_else(|| unknown_unwrap(N::TYPE_NAME, kind))
    }

    fn wrap(
        &self,
        value: Option<JdbcValue>,
        _session: &dyn SessionContext,
    ) -> Result<Option<N>, TypeError> {
        let Some(value) = value else { return Ok(None) };
        if let JdbcValue::String(text) = &value {
            return Ok(Some(N::parse(text)?));
        }
        N::from_numeric(&value)
            .map(Some)
            .ok_or_else(|| unknown_wrap(N::TYPE_NAME, &value))
    }

    fn supported_kinds(&self) -> &'static [ValueKind] {
        KINDS
    }

    fn comparator(&self) -> Comparator<N> {
        Comparator::by(N::compare)
    }

    fn mutability_plan(&self) -> &dyn MutabilityPlan<N> {
        &self.plan
    }

    fn recommended_wire_type(&self, _indicators: &dyn WireTypeIndicators) -> WireTypeCode {
        N::WIRE_TYPE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use relmap_core::DefaultSessionContext;

    #[test]
    fn narrowing_truncates() {
        let d = IntegerDescriptor::new();
        let ctx = DefaultSessionContext::new();
        assert!(matches!(
            d.unwrap(Some(&300), ValueKind::TinyInt, &ctx).unwrap(),
            Some(JdbcValue::TinyInt(44))
        ));
        assert!(matches!(
            d.unwrap(Some(&70_000), ValueKind::SmallInt, &ctx).unwrap(),
            Some(JdbcValue::SmallInt(4464))
        ));
        assert!(matches!(
            d.unwrap(Some(&300), ValueKind::String, &ctx).unwrap(),
            Some(JdbcValue::String(ref s)) if s == "300"
        ));
    }

    #[test]
    fn widening_is_exact() {
        let d = ByteDescriptor::new();
        let ctx = DefaultSessionContext::new();
        assert!(matches!(
            d.unwrap(Some(&-128), ValueKind::BigInt, &ctx).unwrap(),
            Some(JdbcValue::BigInt(-128))
        ));
        assert_eq!(d.wrap(Some(JdbcValue::BigInt(-128)), &ctx).unwrap(), Some(-128));
    }

    #[test]
    fn float_to_integer_saturates() {
        let d = ByteDescriptor::new();
        let ctx = DefaultSessionContext::new();
        assert_eq!(d.wrap(Some(JdbcValue::Double(1e9)), &ctx).unwrap(), Some(127));
        assert_eq!(d.wrap(Some(JdbcValue::Double(f64::NAN)), &ctx).unwrap(), Some(0));
    }

    #[test]
    fn parse_errors() {
        let d = ByteDescriptor::new();
        assert!(matches!(d.from_string(""), Err(ConversionError::InvalidLiteral { .. })));
        assert!(matches!(d.from_string("12a"), Err(ConversionError::InvalidLiteral { .. })));
        assert!(matches!(d.from_string("300"), Err(ConversionError::OutOfRange { .. })));
        assert!(matches!(d.from_string("-129"), Err(ConversionError::OutOfRange { .. })));
        assert!(d.from_string(" 1").is_err());
        assert_eq!(d.from_string("-128").unwrap(), -128);
    }

    #[test]
    fn wrap_string_uses_literal_grammar() {
        let d = LongDescriptor::new();
        let ctx = DefaultSessionContext::new();
        assert_eq!(
            d.wrap(Some(JdbcValue::String("9223372036854775807".into())), &ctx).unwrap(),
            Some(i64::MAX)
        );
        assert!(matches!(
            d.wrap(Some(JdbcValue::String("x".into())), &ctx),
            Err(TypeError::Conversion(_))
        ));
    }

    #[test]
    fn float_equality_is_bitwise() {
        let d = DoubleDescriptor::new();
        assert!(d.are_equal(Some(&f64::NAN), Some(&f64::NAN)));
        assert!(!d.are_equal(Some(&0.0), Some(&-0.0)));
        assert_eq!(d.extract_hash_code(&f64::NAN), d.extract_hash_code(&-f64::NAN));
        assert_eq!(d.comparator().compare(&-0.0, &0.0), Ordering::Less);
    }

    #[test]
    fn float_text_roundtrip() {
        let d = FloatDescriptor::new();
        for v in [1.5_f32, -0.0, f32::MAX, f32::MIN_POSITIVE, f32::INFINITY] {
            let back = d.from_string(&d.to_string(&v)).unwrap();
            assert!(d.are_equal(Some(&v), Some(&back)));
        }
    }

    #[test]
    fn unsupported_kinds() {
        let d = ShortDescriptor::new();
        let ctx = DefaultSessionContext::new();
        assert!(matches!(
            d.unwrap(Some(&1), ValueKind::Boolean, &ctx),
            Err(TypeError::UnsupportedConversion { .. })
        ));
        assert!(d.wrap(Some(JdbcValue::Bytes(vec![1])), &ctx).is_err());
    }

    #[test]
    fn type_names_and_wire_types() {
        struct Defaults;
        impl WireTypeIndicators for Defaults {}
        assert_eq!(ByteDescriptor::new().type_name(), "byte");
        assert_eq!(LongDescriptor::new().recommended_wire_type(&Defaults), WireTypeCode::BigInt);
        assert_eq!(FloatDescriptor::new().recommended_wire_type(&Defaults), WireTypeCode::Float);
    }
}
