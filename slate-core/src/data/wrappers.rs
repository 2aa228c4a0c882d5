//! Concrete Data Types
//!
//! The four value wrappers the engine ships: `Bool`, `Int`, `Float`, and
//! `Str`. Each implements exactly the capability traits its underlying
//! representation supports: `Int` is the only bitwise type, `Float` the
//! only one with float math, `Str` carries a non-commutative sum
//! (concatenation) and no other arithmetic.
//!
//! Integer arithmetic wraps on overflow, and division by zero yields zero
//! rather than unwinding in the middle of an evaluation pass.

use std::cmp::Ordering;

use super::caps::{
    Additive, Bitwise, CastFrom, Comparable, Data, Divisible, FloatMath, Identities,
    Multiplicative, Signed, Subtractive,
};
use super::value::{DataType, Value};

/// Boolean data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Bool(pub bool);

/// 64-bit signed integer data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Int(pub i64);

/// IEEE 754 double data.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Float(pub f64);

/// String data.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Str(pub String);

impl Data for Bool {
    const TYPE: DataType = DataType::Bool;

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Bool(v) => Some(Bool(*v)),
            _ => None,
        }
    }

    fn into_value(self) -> Value {
        Value::Bool(self.0)
    }
}

impl Comparable for Bool {
    fn compare(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }
}

impl Data for Int {
    const TYPE: DataType = DataType::Int;

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Int(v) => Some(Int(*v)),
            _ => None,
        }
    }

    fn into_value(self) -> Value {
        Value::Int(self.0)
    }
}

impl Comparable for Int {
    fn compare(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }
}

impl Identities for Int {
    fn zero() -> Self {
        Int(0)
    }

    fn one() -> Self {
        Int(1)
    }
}

impl Additive for Int {
    const COMMUTATIVE_SUM: bool = true;

    fn add(self, other: Self) -> Self {
        Int(self.0.wrapping_add(other.0))
    }
}

impl Multiplicative for Int {
    const COMMUTATIVE_MUL: bool = true;

    fn mul(self, other: Self) -> Self {
        Int(self.0.wrapping_mul(other.0))
    }
}

impl Subtractive for Int {
    fn sub(self, other: Self) -> Self {
        Int(self.0.wrapping_sub(other.0))
    }
}

impl Divisible for Int {
    fn div(self, other: Self) -> Self {
        if other.0 == 0 {
            Int(0)
        } else {
            Int(self.0.wrapping_div(other.0))
        }
    }

    fn rem(self, other: Self) -> Self {
        if other.0 == 0 {
            Int(0)
        } else {
            Int(self.0.wrapping_rem(other.0))
        }
    }
}

impl Signed for Int {
    fn abs(self) -> Self {
        Int(self.0.wrapping_abs())
    }

    fn neg(self) -> Self {
        Int(self.0.wrapping_neg())
    }

    fn is_negative(&self) -> bool {
        self.0 < 0
    }
}

impl Bitwise for Int {
    fn bit_not(self) -> Self {
        Int(!self.0)
    }

    fn bit_and(self, other: Self) -> Self {
        Int(self.0 & other.0)
    }

    fn bit_or(self, other: Self) -> Self {
        Int(self.0 | other.0)
    }

    fn bit_xor(self, other: Self) -> Self {
        Int(self.0 ^ other.0)
    }

    fn shift_left(self, bits: Self) -> Self {
        Int(self.0.wrapping_shl(bits.0 as u32))
    }

    fn shift_right(self, bits: Self) -> Self {
        Int(self.0.wrapping_shr(bits.0 as u32))
    }
}

impl Data for Float {
    const TYPE: DataType = DataType::Float;

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Float(v) => Some(Float(*v)),
            _ => None,
        }
    }

    fn into_value(self) -> Value {
        Value::Float(self.0)
    }
}

impl Comparable for Float {
    fn compare(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl Identities for Float {
    fn zero() -> Self {
        Float(0.0)
    }

    fn one() -> Self {
        Float(1.0)
    }
}

impl Additive for Float {
    const COMMUTATIVE_SUM: bool = true;

    fn add(self, other: Self) -> Self {
        Float(self.0 + other.0)
    }
}

impl Multiplicative for Float {
    const COMMUTATIVE_MUL: bool = true;

    fn mul(self, other: Self) -> Self {
        Float(self.0 * other.0)
    }
}

impl Subtractive for Float {
    fn sub(self, other: Self) -> Self {
        Float(self.0 - other.0)
    }
}

impl Divisible for Float {
    fn div(self, other: Self) -> Self {
        Float(self.0 / other.0)
    }

    fn rem(self, other: Self) -> Self {
        Float(self.0 % other.0)
    }
}

impl Signed for Float {
    fn abs(self) -> Self {
        Float(self.0.abs())
    }

    fn neg(self) -> Self {
        Float(-self.0)
    }

    fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && self.0 != 0.0
    }
}

impl FloatMath for Float {
    fn map(self, f: fn(f64) -> f64) -> Self {
        Float(f(self.0))
    }

    fn map2(self, other: Self, f: fn(f64, f64) -> f64) -> Self {
        Float(f(self.0, other.0))
    }
}

impl CastFrom<Int> for Float {
    fn cast_from(value: Int) -> Self {
        Float(value.0 as f64)
    }
}

impl Data for Str {
    const TYPE: DataType = DataType::Str;

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Str(v) => Some(Str(v.clone())),
            _ => None,
        }
    }

    fn into_value(self) -> Value {
        Value::Str(self.0)
    }
}

impl Comparable for Str {
    fn compare(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }
}

impl Additive for Str {
    // Concatenation order matters.
    const COMMUTATIVE_SUM: bool = false;

    fn add(mut self, other: Self) -> Self {
        self.0.push_str(&other.0);
        self
    }
}

impl CastFrom<Bool> for Str {
    fn cast_from(value: Bool) -> Self {
        Str(value.0.to_string())
    }
}

impl CastFrom<Int> for Str {
    fn cast_from(value: Int) -> Self {
        Str(value.0.to_string())
    }
}

impl CastFrom<Float> for Str {
    fn cast_from(value: Float) -> Self {
        Str(value.0.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn int_sum_folds_from_zero() {
        assert_eq!(Int::sum([Int(1), Int(2), Int(3)]), Int(6));
        assert_eq!(Int::sum([]), Int(0));
    }

    #[test]
    fn float_product_folds_from_one() {
        assert_eq!(Float::product([Float(2.0), Float(3.0)]), Float(6.0));
        assert_eq!(Float::product([]), Float(1.0));
    }

    #[test]
    fn str_sum_concatenates_in_order() {
        assert_eq!(
            Str::sum([Str("a".into()), Str("b".into()), Str("c".into())]),
            Str("abc".into())
        );
        assert!(!Str::COMMUTATIVE_SUM);
    }

    #[test]
    fn int_division_by_zero_is_zero() {
        assert_eq!(Int(7).div(Int(0)), Int(0));
        assert_eq!(Int(7).rem(Int(0)), Int(0));
    }

    #[test]
    fn comparable_folds() {
        assert_eq!(Int::max_of([Int(3), Int(9), Int(4)]), Some(Int(9)));
        assert_eq!(Int::min_of([Int(3), Int(9), Int(4)]), Some(Int(3)));
        assert_eq!(Int::max_of([]), None);
        assert_eq!(Int(12).clamp_to(Int(0), Int(10)), Int(10));
    }

    #[test]
    fn float_total_order_handles_nan() {
        assert_eq!(
            Float(f64::NAN).compare(&Float(1.0)),
            std::cmp::Ordering::Greater
        );
    }

    #[test]
    fn declared_casts() {
        assert_eq!(Float::cast_from(Int(3)), Float(3.0));
        assert_eq!(Str::cast_from(Bool(true)), Str("true".into()));
        assert_eq!(Str::cast_from(Float(1.5)), Str("1.5".into()));
    }

    #[test]
    fn bitwise_folds() {
        assert_eq!(Int::and_of([Int(0b110), Int(0b011)]), Some(Int(0b010)));
        assert_eq!(Int::or_of([Int(0b100), Int(0b001)]), Some(Int(0b101)));
        assert_eq!(Int::xor_of([Int(0b110), Int(0b011)]), Some(Int(0b101)));
        assert_eq!(Int::and_of([]), None);
    }
}
