//! # Enumerated Types
//!
//! Application enums persist either by ordinal or by variant name,
//! depending on the column's [`EnumStorage`]. Any fieldless enum can take
//! part by implementing [`PersistentEnum`], usually through
//! [`persistent_enum!`](crate::persistent_enum).
//!
//! Ordinals follow declaration order starting at zero, and the comparator
//! orders by ordinal.

use std::cmp::Ordering;
use std::hash::Hash;
use std::marker::PhantomData;

use relmap_core::{
    default_are_equal, hash_of, unknown_unwrap, unknown_wrap, Comparator, ConversionError,
    EnumStorage, ImmutableMutabilityPlan, JdbcValue, MutabilityPlan, SessionContext,
    TypeDescriptor, TypeError, ValueKind, WireTypeCode, WireTypeIndicators,
};

/// Largest variant count whose ordinals fit a `TINYINT`.
const TINYINT_VARIANTS: usize = 128;

/// A fieldless enum with stable names and ordinals.
pub trait PersistentEnum: Copy + Eq + Hash + Send + Sync + 'static {
    /// Registry name of the enum's logical type.
    const TYPE_NAME: &'static str;

    /// All variants in declaration order.
    fn variants() -> &'static [Self];

    /// The variant's persistent name.
    fn name(&self) -> &'static str;

    /// Zero-based position in [`variants`](Self::variants).
    fn ordinal(&self) -> usize;

    fn from_name(name: &str) -> Option<Self> {
        Self::variants().iter().copied().find(|v| v.name() == name)
    }

    fn from_ordinal(ordinal: usize) -> Option<Self> {
        Self::variants().get(ordinal).copied()
    }
}

/// Declare a fieldless enum together with its [`PersistentEnum`] impl.
///
/// ```
/// relmap_types::persistent_enum! {
///     pub enum Color as "color" { Red = "RED", Green = "GREEN", Blue = "BLUE" }
/// }
/// use relmap_types::PersistentEnum;
/// assert_eq!(Color::Green.ordinal(), 1);
/// assert_eq!(Color::from_name("BLUE"), Some(Color::Blue));
/// ```
#[macro_export]
macro_rules! persistent_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident as $type_name:literal {
            $($variant:ident = $text:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $($variant),+
        }

        impl $crate::enumerated::PersistentEnum for $name {
            const TYPE_NAME: &'static str = $type_name;

            fn variants() -> &'static [Self] {
                &[$(Self::$variant),+]
            }

            fn name(&self) -> &'static str {
                match self {
                    $(Self::$variant => $text),+
                }
            }

            fn ordinal(&self) -> usize {
                *self as usize
            }
        }
    };
}

fn by_ordinal<E: PersistentEnum>(a: &E, b: &E) -> Ordering {
    a.ordinal().cmp(&b.ordinal())
}

/// Descriptor for a [`PersistentEnum`].
pub struct EnumDescriptor<E> {
    plan: ImmutableMutabilityPlan<E>,
    _enum: PhantomData<fn() -> E>,
}

impl<E> EnumDescriptor<E> {
    pub const fn new() -> Self {
        Self {
            plan: ImmutableMutabilityPlan::new(),
            _enum: PhantomData,
        }
    }
}

impl<E> Default for EnumDescriptor<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: PersistentEnum> std::fmt::Debug for EnumDescriptor<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EnumDescriptor")
            .field("type_name", &E::TYPE_NAME)
            .finish()
    }
}

impl<E: PersistentEnum> EnumDescriptor<E> {
    fn from_ordinal(&self, ordinal: i64) -> Result<E, ConversionError> {
        usize::try_from(ordinal)
            .ok()
            .and_then(E::from_ordinal)
            .ok_or_else(|| ConversionError::out_of_range(E::TYPE_NAME, ordinal))
    }

    fn ordinal_as<N: TryFrom<usize>>(&self, value: &E) -> Result<N, ConversionError> {
        N::try_from(value.ordinal())
            .map_err(|_| ConversionError::out_of_range(E::TYPE_NAME, value.ordinal()))
    }
}

impl<E: PersistentEnum> TypeDescriptor<E> for EnumDescriptor<E> {
    fn type_name(&self) -> &'static str {
        E::TYPE_NAME
    }

    fn to_string(&self, value: &E) -> String {
        value.name().to_string()
    }

    fn from_string(&self, text: &str) -> Result<E, ConversionError> {
        E::from_name(text)
            .ok_or_else(|| ConversionError::invalid_literal(E::TYPE_NAME, text, "no such variant"))
    }

    fn are_equal(&self, a: Option<&E>, b: Option<&E>) -> bool {
        default_are_equal(a, b)
    }

    fn extract_hash_code(&self, value: &E) -> u64 {
        hash_of(value)
    }

    fn unwrap(
        &self,
        value: Option<&E>,
        kind: ValueKind,
        _session: &dyn SessionContext,
    ) -> Result<Option<JdbcValue>, TypeError> {
        let Some(v) = value else { return Ok(None) };
        let out = match kind {
            ValueKind::String => JdbcValue::String(v.name().to_string()),
            ValueKind::TinyInt => JdbcValue::TinyInt(self.ordinal_as(v)?),
            ValueKind::SmallInt => JdbcValue::SmallInt(self.ordinal_as(v)?),
            ValueKind::Integer => JdbcValue::Integer(self.ordinal_as(v)?),
            ValueKind::BigInt => JdbcValue::BigInt(self.ordinal_as(v)?),
            other => return Err(unknown_unwrap(self.type_name(), other)),
        };
        Ok(Some(out))
    }

    fn wrap(
        &self,
        value: Option<JdbcValue>,
        _session: &dyn SessionContext,
    ) -> Result<Option<E>, TypeError> {
        let Some(value) = value else { return Ok(None) };
        let out = match value {
            JdbcValue::String(s) => self.from_string(&s)?,
            JdbcValue::TinyInt(n) => self.from_ordinal(i64::from(n))?,
            JdbcValue::SmallInt(n) => self.from_ordinal(i64::from(n))?,
            JdbcValue::Integer(n) => self.from_ordinal(i64::from(n))?,
            JdbcValue::BigInt(n) => self.from_ordinal(n)?,
            other => return Err(unknown_wrap(self.type_name(), &other)),
        };
        Ok(Some(out))
    }

    fn supported_kinds(&self) -> &'static [ValueKind] {
        &[
            ValueKind::String,
            ValueKind::TinyInt,
            ValueKind::SmallInt,
            ValueKind::Integer,
            ValueKind::BigInt,
        ]
    }

    fn comparator(&self) -> Comparator<E> {
        Comparator::by(by_ordinal::<E>)
    }

    fn mutability_plan(&self) -> &dyn MutabilityPlan<E> {
        &self.plan
    }

    fn recommended_wire_type(&self, indicators: &dyn WireTypeIndicators) -> WireTypeCode {
        match indicators.enum_storage() {
            EnumStorage::Ordinal if E::variants().len() <= TINYINT_VARIANTS => WireTypeCode::TinyInt,
            EnumStorage::Ordinal => WireTypeCode::SmallInt,
            EnumStorage::String if indicators.is_nationalized() => WireTypeCode::NVarChar,
            EnumStorage::String => WireTypeCode::VarChar,
        }
    }
}
