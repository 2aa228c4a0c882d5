//! Data Capability Model
//!
//! This module defines what a node's value *is* and what can be done with
//! it, split into three layers:
//!
//! - [`value`]: the dynamically typed `Value`/`DataType` pair that crosses
//!   node boundaries and drives overload resolution.
//! - [`caps`]: small capability traits (additive, comparable, bitwise,
//!   ...) that generic node code is written against with static dispatch.
//! - [`wrappers`]: the four concrete types (`Bool`, `Int`, `Float`,
//!   `Str`), each implementing only the capabilities it supports.
//!
//! Implicit casts are declared once, in both layers: `CastFrom` impls on
//! the wrappers, and the `DataType::implicit_casts_to` table the dynamic
//! layer consults. The two must agree; the overload resolver relies on
//! the table, and cast nodes apply the conversion through `Value`.

mod caps;
mod value;
mod wrappers;

pub use caps::{
    Additive, Bitwise, CastFrom, Comparable, Data, Divisible, FloatMath, Identities,
    Multiplicative, Signed, Subtractive,
};
pub use value::{DataType, Value};
pub use wrappers::{Bool, Float, Int, Str};
