//! # Arbitrary-Precision Numbers
//!
//! `big_integer` ([`BigInt`]) and `big_decimal` ([`BigDecimal`]), both
//! stored as `NUMERIC`.
//!
//! Unlike the primitive numerics, a big number never wraps around: widening
//! from a primitive is exact, and narrowing to a primitive kind that cannot
//! hold the value fails with `OutOfRange`. Decimals lose their fraction when
//! narrowed to an integer kind. A float read into `big_integer` truncates
//! toward zero; NaN and the infinities are out of range.
//!
//! Literals are plain decimal text: an optional sign and digits, plus for
//! decimals a fraction and an `e`/`E` exponent. No whitespace and no `_`.
//! Decimals compare by value, so `1.0` equals `1.00`.

use std::fmt::Display;

use bigdecimal::BigDecimal;
use num_bigint::BigInt;
use num_traits::{FromPrimitive, ToPrimitive};
use relmap_core::{
    default_are_equal, hash_of, unknown_unwrap, unknown_wrap, Comparator, ConversionError,
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

/// Whether `text` is a plain numeric literal. `fractional` admits a
/// fraction and an exponent.
fn is_plain_literal(text: &str, fractional: bool) -> bool {
    let digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    fn unsigned(s: &str) -> &str {
        s.strip_prefix(|c: char| c == '+' || c == '-').unwrap_or(s)
    }

    let body = unsigned(text);
    if !fractional {
        return digits(body);
    }
    let (mantissa, exponent) = match body.split_once(|c: char| c == 'e' || c == 'E') {
        Some((m, e)) => (m, Some(e)),
        None => (body, None),
    };
    let mantissa_ok = match mantissa.split_once('.') {
        Some((int, frac)) => {
            (digits(int) || digits(frac))
                && (int.is_empty() || digits(int))
                && (frac.is_empty() || digits(frac))
        }
        None => digits(mantissa),
    };
    mantissa_ok && exponent.map_or(true, |e| digits(unsigned(e)))
}

fn parse_plain<V>(type_name: &str, text: &str, fractional: bool) -> Result<V, ConversionError>
where
    V: std::str::FromStr,
    V::Err: Display,
{
    if !is_plain_literal(text, fractional) {
        return Err(ConversionError::invalid_literal(
            type_name,
            text,
            "not a plain decimal literal",
        ));
    }
    text.parse::<V>()
        .map_err(|e| ConversionError::invalid_literal(type_name, text, e))
}

/// Narrow a big number to a numeric kind, or render it as text.
fn unwrap_number<V: ToPrimitive + Display>(
    type_name: &str,
    value: &V,
    kind: ValueKind,
) -> Result<JdbcValue, TypeError> {
    let out = match kind {
        ValueKind::TinyInt => value.to_i8().map(JdbcValue::TinyInt),
        ValueKind::SmallInt => value.to_i16().map(JdbcValue::SmallInt),
        ValueKind::Integer => value.to_i32().map(JdbcValue::Integer),
        ValueKind::BigInt => value.to_i64().map(JdbcValue::BigInt),
        ValueKind::Real => value.to_f32().filter(|f| f.is_finite()).map(JdbcValue::Real),
        ValueKind::Double => value.to_f64().filter(|f| f.is_finite()).map(JdbcValue::Double),
        ValueKind::String => Some(JdbcValue::String(value.to_string())),
        other => return Err(unknown_unwrap(type_name, other)),
    };
    out.ok_or_else(|| ConversionError::out_of_range(type_name, value).into())
}

/// Build a big number from a numeric shape. `None` for non-numeric shapes.
fn wrap_number<V: From<i64> + FromPrimitive>(
    type_name: &str,
    value: &JdbcValue,
) -> Option<Result<V, TypeError>> {
    let integral = match *value {
        JdbcValue::TinyInt(v) => Some(i64::from(v)),
        JdbcValue::SmallInt(v) => Some(i64::from(v)),
        JdbcValue::Integer(v) => Some(i64::from(v)),
        JdbcValue::BigInt(v) => Some(v),
        _ => None,
    };
    if let Some(n) = integral {
        return Some(Ok(V::from(n)));
    }
    let float = match *value {
        JdbcValue::Real(v) => f64::from(v),
        JdbcValue::Double(v) => v,
        _ => return None,
    };
    Some(V::from_f64(float).ok_or_else(|| ConversionError::out_of_range(type_name, float).into()))
}

// ─── big_integer ─────────────────────────────────────────────────────

/// Descriptor for `big_integer`.
#[derive(Debug, Default)]
pub struct BigIntegerDescriptor {
    plan: ImmutableMutabilityPlan<BigInt>,
}

impl BigIntegerDescriptor {
    pub const fn new() -> Self {
        Self {
            plan: ImmutableMutabilityPlan::new(),
        }
    }
}

impl TypeDescriptor<BigInt> for BigIntegerDescriptor {
    fn type_name(&self) -> &'static str {
        "big_integer"
    }

    fn to_string(&self, value: &BigInt) -> String {
        value.to_string()
    }

    fn from_string(&self, text: &str) -> Result<BigInt, ConversionError> {
        parse_plain(self.type_name(), text, false)
    }

    fn are_equal(&self, a: Option<&BigInt>, b: Option<&BigInt>) -> bool {
        default_are_equal(a, b)
    }

    fn extract_hash_code(&self, value: &BigInt) -> u64 {
        hash_of(value)
    }

    fn unwrap(
        &self,
        value: Option<&BigInt>,
        kind: ValueKind,
        _session: &dyn SessionContext,
    ) -> Result<Option<JdbcValue>, TypeError> {
        value
            .map(|v| unwrap_number(self.type_name(), v, kind))
            .transpose()
    }

    fn wrap(
        &self,
        value: Option<JdbcValue>,
        _session: &dyn SessionContext,
    ) -> Result<Option<BigInt>, TypeError> {
        let Some(value) = value else { return Ok(None) };
        if let JdbcValue::String(text) = &value {
            return Ok(Some(self.from_string(text)?));
        }
        match wrap_number::<BigInt>(self.type_name(), &value) {
            Some(result) => result.map(Some),
            None => Err(unknown_wrap(self.type_name(), &value)),
        }
    }

    fn supported_kinds(&self) -> &'static [ValueKind] {
        KINDS
    }

    fn comparator(&self) -> Comparator<BigInt> {
        Comparator::natural()
    }

    fn mutability_plan(&self) -> &dyn MutabilityPlan<BigInt> {
        &self.plan
    }

    fn recommended_wire_type(&self, _indicators: &dyn WireTypeIndicators) -> WireTypeCode {
        WireTypeCode::Numeric
    }
}

// ─── big_decimal ─────────────────────────────────────────────────────

/// Descriptor for `big_decimal`.
#[derive(Debug, Default)]
pub struct BigDecimalDescriptor {
    plan: ImmutableMutabilityPlan<BigDecimal>,
}

impl BigDecimalDescriptor {
    pub const fn new() -> Self {
        Self {
            plan: ImmutableMutabilityPlan::new(),
        }
    }
}

impl TypeDescriptor<BigDecimal> for BigDecimalDescriptor {
    fn type_name(&self) -> &'static str {
        "big_decimal"
    }

    fn to_string(&self, value: &BigDecimal) -> String {
        value.to_string()
    }

    fn from_string(&self, text: &str) -> Result<BigDecimal, ConversionError> {
        parse_plain(self.type_name(), text, true)
    }

    fn are_equal(&self, a: Option<&BigDecimal>, b: Option<&BigDecimal>) -> bool {
        default_are_equal(a, b)
    }

    // Trailing zeros are stripped first so that `1.0` and `1.00` agree.
    fn extract_hash_code(&self, value: &BigDecimal) -> u64 {
        hash_of(&value.normalized().as_bigint_and_exponent())
    }

    fn unwrap(
        &self,
        value: Option<&BigDecimal>,
        kind: ValueKind,
        _session: &dyn SessionContext,
    ) -> Result<Option<JdbcValue>, TypeError> {
        value
            .map(|v| unwrap_number(self.type_name(), v, kind))
            .transpose()
    }

    fn wrap(
        &self,
        value: Option<JdbcValue>,
        _session: &dyn SessionContext,
    ) -> Result<Option<BigDecimal>, TypeError> {
        let Some(value) = value else { return Ok(None) };
        if let JdbcValue::String(text) = &value {
            return Ok(Some(self.from_string(text)?));
        }
        match wrap_number::<BigDecimal>(self.type_name(), &value) {
            Some(result) => result.map(Some),
            None => Err(unknown_wrap(self.type_name(), &value)),
        }
    }

    fn supported_kinds(&self) -> &'static [ValueKind] {
        KINDS
    }

    fn comparator(&self) -> Comparator<BigDecimal> {
        Comparator::natural()
    }

    fn mutability_plan(&self) -> &dyn MutabilityPlan<BigDecimal> {
        &self.plan
    }

    fn recommended_wire_type(&self, _indicators: &dyn WireTypeIndicators) -> WireTypeCode {
        WireTypeCode::Numeric
    }
}
