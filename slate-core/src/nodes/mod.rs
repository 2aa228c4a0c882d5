//! Node Abstractions
//!
//! Typed constructors layered over the raw [`crate::graph`] arena. Each
//! constructor validates its parents' kinds and types up front, then
//! installs a rule closure so the scheduler never needs to know which
//! operator a node performs.
//!
//! # Organization
//!
//! - [`value`] — inputs, literals, generic unary/binary/ternary/n-ary
//!   value combinators, cast nodes, and select.
//! - [`trigger`] — input and literal triggers, fired-flag combinators,
//!   value observers, and the latch.
//! - [`counter`] — the accumulating counter.

pub mod counter;
pub mod trigger;
pub mod value;

pub use counter::{counter, CounterSlots};
pub use trigger::{
    all, any, latch, multitrigger, on_change, on_false, on_true, only_one, select_trigger,
    trigger_input, trigger_literal,
};
pub use value::{
    binary, cast_explicit, cast_implicit, literal, nary, promote, select, ternary, unary,
    value_input,
};
