//! Capability Traits
//!
//! Each concrete data type implements only the small capability traits it
//! supports, so generic node code is written once per capability rather
//! than once per type. Reductions over many values are defined as
//! "combine two, fold over many" with the capability's identity as the
//! seed. Additive and multiplicative capabilities additionally declare
//! whether their binary combine is commutative; the flag informs the
//! optimizer and overload tie-breaking, never correctness.
//!
//! The hot evaluation path uses these traits with static dispatch; the
//! dynamic [`Value`](super::Value) layer only appears at the overload
//! resolution boundary where concrete types are not known until runtime.

use std::cmp::Ordering;
use std::fmt::Debug;

use super::value::{DataType, Value};

/// Base capability shared by every concrete data type: a runtime type tag
/// and lossless conversion to and from the dynamic [`Value`] layer.
pub trait Data: Clone + PartialEq + Default + Debug + 'static {
    /// The runtime tag for this type.
    const TYPE: DataType;

    /// Extract this type from a dynamic value, `None` on a type mismatch.
    fn from_value(value: &Value) -> Option<Self>;

    /// Wrap this value back into the dynamic layer.
    fn into_value(self) -> Value;
}

/// Totally ordered data.
pub trait Comparable: Data {
    /// Compare two values. Floats use a total order so the comparison is
    /// defined for every pair.
    fn compare(&self, other: &Self) -> Ordering;

    /// Largest of the given values, `None` when empty.
    fn max_of<I: IntoIterator<Item = Self>>(values: I) -> Option<Self> {
        values
            .into_iter()
            .reduce(|a, b| if b.compare(&a) == Ordering::Greater { b } else { a })
    }

    /// Smallest of the given values, `None` when empty.
    fn min_of<I: IntoIterator<Item = Self>>(values: I) -> Option<Self> {
        values
            .into_iter()
            .reduce(|a, b| if b.compare(&a) == Ordering::Less { b } else { a })
    }

    /// This value clamped to the inclusive `[min, max]` range.
    fn clamp_to(self, min: Self, max: Self) -> Self {
        if self.compare(&min) == Ordering::Less {
            min
        } else if self.compare(&max) == Ordering::Greater {
            max
        } else {
            self
        }
    }
}

/// Identity elements for numeric data.
pub trait Identities: Data {
    /// The additive identity.
    fn zero() -> Self;
    /// The multiplicative identity, also the default counter step.
    fn one() -> Self;
}

/// Data that can be summed. The fold seed is the type's default, which is
/// the additive identity for every type that carries this capability.
pub trait Additive: Data {
    /// Whether `add` is commutative; string concatenation is not.
    const COMMUTATIVE_SUM: bool;

    /// Combine two values.
    fn add(self, other: Self) -> Self;

    /// Fold a sequence, seeded with the default value.
    fn sum<I: IntoIterator<Item = Self>>(values: I) -> Self {
        values.into_iter().fold(Self::default(), Self::add)
    }
}

/// Data that can be multiplied.
pub trait Multiplicative: Identities {
    /// Whether `mul` is commutative.
    const COMMUTATIVE_MUL: bool;

    /// Combine two values.
    fn mul(self, other: Self) -> Self;

    /// Fold a sequence, seeded with one.
    fn product<I: IntoIterator<Item = Self>>(values: I) -> Self {
        values.into_iter().fold(Self::one(), Self::mul)
    }
}

/// Data with a subtraction operation.
pub trait Subtractive: Data {
    fn sub(self, other: Self) -> Self;
}

/// Data with division and remainder.
pub trait Divisible: Data {
    fn div(self, other: Self) -> Self;
    fn rem(self, other: Self) -> Self;
}

/// Data with a sign.
pub trait Signed: Data {
    fn abs(self) -> Self;
    fn neg(self) -> Self;
    fn is_negative(&self) -> bool;
}

/// Data supporting bitwise operations.
pub trait Bitwise: Data {
    fn bit_not(self) -> Self;
    fn bit_and(self, other: Self) -> Self;
    fn bit_or(self, other: Self) -> Self;
    fn bit_xor(self, other: Self) -> Self;
    fn shift_left(self, bits: Self) -> Self;
    fn shift_right(self, bits: Self) -> Self;

    /// Fold a sequence with AND; `None` when empty.
    fn and_of<I: IntoIterator<Item = Self>>(values: I) -> Option<Self> {
        values.into_iter().reduce(Self::bit_and)
    }

    /// Fold a sequence with OR; `None` when empty.
    fn or_of<I: IntoIterator<Item = Self>>(values: I) -> Option<Self> {
        values.into_iter().reduce(Self::bit_or)
    }

    /// Fold a sequence with XOR; `None` when empty.
    fn xor_of<I: IntoIterator<Item = Self>>(values: I) -> Option<Self> {
        values.into_iter().reduce(Self::bit_xor)
    }
}

/// Data backed by an IEEE 754 double, so arbitrary float functions can be
/// lifted onto it.
pub trait FloatMath: Data {
    /// Apply a unary float function to this value.
    fn map(self, f: fn(f64) -> f64) -> Self;

    /// Apply a binary float function to this and another value.
    fn map2(self, other: Self, f: fn(f64, f64) -> f64) -> Self;
}

/// Declares that `Self` may be silently promoted from `S`. Casts not
/// declared through this trait must be requested explicitly.
pub trait CastFrom<S: Data>: Data {
    fn cast_from(value: S) -> Self;
}
