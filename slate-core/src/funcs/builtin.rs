//! Builtin Catalog
//!
//! The standard operations every namespace starts with. One generic
//! helper per shape (unary, binary, variadic reduction, comparison)
//! instantiates a definition per concrete type, and [`catalog`] lists
//! the groups in their registration order. That order is a contract:
//! within a group, ties in cast count resolve to the earlier entry.

use std::cmp::Ordering;

use crate::data::{
    Additive, Bitwise, Bool, Comparable, Data, DataType, Divisible, Float, FloatMath, Int,
    Multiplicative, Signed, Str, Subtractive, Value,
};
use crate::nodes::{self, CounterSlots};

use super::def::{ArgKind, FuncDef};
use super::group::FuncGroup;

fn unary_def<I, O, F>(name: &'static str, label: &'static str, f: F) -> FuncDef
where
    I: Data,
    O: Data,
    F: Fn(I) -> O + Clone + 'static,
{
    FuncDef::fixed(
        name,
        vec![ArgKind::Value(I::TYPE)],
        Box::new(move |g, args| nodes::unary(g, label, args[0], f.clone())),
    )
}

fn binary_def<A, B, O, F>(name: &'static str, label: &'static str, f: F) -> FuncDef
where
    A: Data,
    B: Data,
    O: Data,
    F: Fn(A, B) -> O + Clone + 'static,
{
    FuncDef::fixed(
        name,
        vec![ArgKind::Value(A::TYPE), ArgKind::Value(B::TYPE)],
        Box::new(move |g, args| nodes::binary(g, label, args[0], args[1], f.clone())),
    )
}

/// A reduction over one or more same-typed arguments. A single argument
/// that already has the right type passes through untouched.
fn reduce_def<T, O>(name: &'static str, label: &'static str, f: fn(Vec<T>) -> O) -> FuncDef
where
    T: Data,
    O: Data,
{
    FuncDef::variadic(
        name,
        vec![ArgKind::Value(T::TYPE)],
        1,
        usize::MAX,
        Box::new(move |g, args| nodes::nary(g, label, args, f)),
    )
    .passthrough_one()
}

fn compare_def<T: Comparable>(
    name: &'static str,
    label: &'static str,
    f: fn(Ordering) -> bool,
) -> FuncDef {
    FuncDef::fixed(
        name,
        vec![ArgKind::Value(T::TYPE), ArgKind::Value(T::TYPE)],
        Box::new(move |g, args| {
            nodes::binary(g, label, args[0], args[1], move |a: T, b: T| {
                Bool(f(a.compare(&b)))
            })
        }),
    )
}

fn clamp_def<T: Comparable>(name: &'static str) -> FuncDef {
    FuncDef::fixed(
        name,
        vec![
            ArgKind::Value(T::TYPE),
            ArgKind::Value(T::TYPE),
            ArgKind::Value(T::TYPE),
        ],
        Box::new(|g, args| {
            nodes::ternary(g, "Clamp", args[0], args[1], args[2], |v: T, lo: T, hi: T| {
                v.clamp_to(lo, hi)
            })
        }),
    )
}

fn float_fn(name: &'static str, label: &'static str, f: fn(f64) -> f64) -> FuncDef {
    unary_def(name, label, move |v: Float| v.map(f))
}

fn float_fn2(name: &'static str, label: &'static str, f: fn(f64, f64) -> f64) -> FuncDef {
    binary_def(name, label, move |a: Float, b: Float| a.map2(b, f))
}

fn select_def<T: Data>() -> FuncDef {
    FuncDef::fixed(
        "select",
        vec![
            ArgKind::Value(DataType::Bool),
            ArgKind::Value(T::TYPE),
            ArgKind::Value(T::TYPE),
        ],
        Box::new(|g, args| nodes::select::<T>(g, args[0], args[1], args[2])),
    )
}

fn latch_def<T: Data>() -> FuncDef {
    FuncDef::fixed(
        "latch",
        vec![ArgKind::Trigger, ArgKind::Value(T::TYPE)],
        Box::new(|g, args| nodes::latch::<T>(g, args[0], args[1])),
    )
}

fn trigger_def(
    name: &'static str,
    build: fn(&mut crate::graph::Graph, &[crate::graph::NodeId]) -> crate::error::Result<crate::graph::NodeId>,
) -> FuncDef {
    FuncDef::variadic(
        name,
        vec![ArgKind::Trigger],
        1,
        usize::MAX,
        Box::new(move |g, args| build(g, args)),
    )
    .passthrough_one()
}

fn counter_defs(group: &mut FuncGroup) {
    let t = ArgKind::Trigger;
    group.register(FuncDef::fixed(
        "counter",
        vec![t],
        Box::new(|g, args| nodes::counter::<Int>(g, args[0], CounterSlots::default())),
    ));
    group.register(FuncDef::fixed(
        "counter",
        vec![t, t],
        Box::new(|g, args| {
            nodes::counter::<Int>(
                g,
                args[0],
                CounterSlots {
                    decrement: Some(args[1]),
                    ..CounterSlots::default()
                },
            )
        }),
    ));
    group.register(FuncDef::fixed(
        "counter",
        vec![t, t, t],
        Box::new(|g, args| {
            nodes::counter::<Int>(
                g,
                args[0],
                CounterSlots {
                    decrement: Some(args[1]),
                    reset: Some(args[2]),
                    ..CounterSlots::default()
                },
            )
        }),
    ));
    counter_typed::<Int>(group);
    counter_typed::<Float>(group);
}

fn counter_typed<T>(group: &mut FuncGroup)
where
    T: Data + Additive + Subtractive + crate::data::Identities,
{
    let t = ArgKind::Trigger;
    let v = ArgKind::Value(T::TYPE);
    group.register(FuncDef::fixed(
        "counter",
        vec![t, t, t, v],
        Box::new(|g, args| {
            nodes::counter::<T>(
                g,
                args[0],
                CounterSlots {
                    decrement: Some(args[1]),
                    reset: Some(args[2]),
                    delta: Some(args[3]),
                    ..CounterSlots::default()
                },
            )
        }),
    ));
    group.register(FuncDef::fixed(
        "counter",
        vec![t, t, t, v, v],
        Box::new(|g, args| {
            nodes::counter::<T>(
                g,
                args[0],
                CounterSlots {
                    decrement: Some(args[1]),
                    reset: Some(args[2]),
                    delta: Some(args[3]),
                    reset_value: Some(args[4]),
                },
            )
        }),
    ));
}

fn group(name: &'static str, defs: impl IntoIterator<Item = FuncDef>) -> FuncGroup {
    let mut group = FuncGroup::new(name);
    for def in defs {
        group.register(def);
    }
    group
}

/// Every comparison instantiated for the four types in a fixed order, so
/// tie-breaking prefers the narrower type.
fn comparisons(name: &'static str, label: &'static str, f: fn(Ordering) -> bool) -> FuncGroup {
    group(
        name,
        [
            compare_def::<Bool>(name, label, f),
            compare_def::<Int>(name, label, f),
            compare_def::<Float>(name, label, f),
            compare_def::<Str>(name, label, f),
        ],
    )
}

/// The full builtin function catalog.
pub fn catalog() -> Vec<FuncGroup> {
    let mut groups = vec![
        group(
            "sum",
            [
                reduce_def("sum", "Sum", |v: Vec<Int>| Int::sum(v)),
                reduce_def("sum", "Sum", |v: Vec<Float>| Float::sum(v)),
                reduce_def("sum", "Sum", |v: Vec<Str>| Str::sum(v)).needs_one_no_cast(),
            ],
        ),
        group(
            "subtract",
            [
                binary_def("subtract", "Subtract", |a: Int, b: Int| a.sub(b)),
                binary_def("subtract", "Subtract", |a: Float, b: Float| a.sub(b)),
            ],
        ),
        group(
            "multiply",
            [
                reduce_def("multiply", "Multiply", |v: Vec<Int>| Int::product(v)),
                reduce_def("multiply", "Multiply", |v: Vec<Float>| Float::product(v)),
            ],
        ),
        group(
            "divide",
            [
                binary_def("divide", "Divide", |a: Int, b: Int| a.div(b)),
                binary_def("divide", "Divide", |a: Float, b: Float| a.div(b)),
            ],
        ),
        group(
            "modulo",
            [
                binary_def("modulo", "Modulo", |a: Int, b: Int| a.rem(b)),
                binary_def("modulo", "Modulo", |a: Float, b: Float| a.rem(b)),
            ],
        ),
        group(
            "negate",
            [
                unary_def("negate", "Negate", |v: Int| v.neg()),
                unary_def("negate", "Negate", |v: Float| v.neg()),
            ],
        ),
        group(
            "abs",
            [
                unary_def("abs", "Abs", |v: Int| v.abs()),
                unary_def("abs", "Abs", |v: Float| v.abs()),
            ],
        ),
        group(
            "min",
            [
                reduce_def("min", "Min", |v: Vec<Int>| {
                    Int::min_of(v).unwrap_or_default()
                }),
                reduce_def("min", "Min", |v: Vec<Float>| {
                    Float::min_of(v).unwrap_or_default()
                }),
                reduce_def("min", "Min", |v: Vec<Str>| {
                    Str::min_of(v).unwrap_or_default()
                }),
            ],
        ),
        group(
            "max",
            [
                reduce_def("max", "Max", |v: Vec<Int>| {
                    Int::max_of(v).unwrap_or_default()
                }),
                reduce_def("max", "Max", |v: Vec<Float>| {
                    Float::max_of(v).unwrap_or_default()
                }),
                reduce_def("max", "Max", |v: Vec<Str>| {
                    Str::max_of(v).unwrap_or_default()
                }),
            ],
        ),
        group("clamp", [clamp_def::<Int>("clamp"), clamp_def::<Float>("clamp")]),
        comparisons("equal", "Equal", |o| o == Ordering::Equal),
        comparisons("not_equal", "NotEqual", |o| o != Ordering::Equal),
        comparisons("greater", "Greater", |o| o == Ordering::Greater),
        comparisons("greater_equal", "GreaterEqual", |o| o != Ordering::Less),
        comparisons("less", "Less", |o| o == Ordering::Less),
        comparisons("less_equal", "LessEqual", |o| o != Ordering::Greater),
        group(
            "and",
            [
                reduce_def("and", "And", |v: Vec<Bool>| Bool(v.iter().all(|b| b.0))),
                reduce_def("and", "BitwiseAnd", |v: Vec<Int>| {
                    Int::and_of(v).unwrap_or_default()
                }),
                trigger_def("and", |g, args| nodes::all(g, args)),
            ],
        ),
        group(
            "or",
            [
                reduce_def("or", "Or", |v: Vec<Bool>| Bool(v.iter().any(|b| b.0))),
                reduce_def("or", "BitwiseOr", |v: Vec<Int>| {
                    Int::or_of(v).unwrap_or_default()
                }),
                trigger_def("or", |g, args| nodes::any(g, args)),
            ],
        ),
        group(
            "xor",
            [
                reduce_def("xor", "Xor", |v: Vec<Bool>| {
                    Bool(v.iter().filter(|b| b.0).count() % 2 == 1)
                }),
                reduce_def("xor", "BitwiseXor", |v: Vec<Int>| {
                    Int::xor_of(v).unwrap_or_default()
                }),
                trigger_def("xor", |g, args| nodes::only_one(g, args)),
            ],
        ),
        group("not", [unary_def("not", "Not", |v: Bool| Bool(!v.0))]),
        group(
            "implies",
            [binary_def("implies", "Implies", |a: Bool, b: Bool| {
                Bool(!a.0 || b.0)
            })],
        ),
        group(
            "invert",
            [unary_def("invert", "Invert", |v: Int| v.bit_not())],
        ),
        group(
            "shift_left",
            [binary_def("shift_left", "ShiftLeft", |a: Int, b: Int| {
                a.shift_left(b)
            })],
        ),
        group(
            "shift_right",
            [binary_def("shift_right", "ShiftRight", |a: Int, b: Int| {
                a.shift_right(b)
            })],
        ),
        group("sqrt", [float_fn("sqrt", "Sqrt", f64::sqrt)]),
        group("cbrt", [float_fn("cbrt", "Cbrt", f64::cbrt)]),
        group("sin", [float_fn("sin", "Sin", f64::sin)]),
        group("cos", [float_fn("cos", "Cos", f64::cos)]),
        group("tan", [float_fn("tan", "Tan", f64::tan)]),
        group("asin", [float_fn("asin", "Asin", f64::asin)]),
        group("acos", [float_fn("acos", "Acos", f64::acos)]),
        group("atan", [float_fn("atan", "Atan", f64::atan)]),
        group("sinh", [float_fn("sinh", "Sinh", f64::sinh)]),
        group("cosh", [float_fn("cosh", "Cosh", f64::cosh)]),
        group("tanh", [float_fn("tanh", "Tanh", f64::tanh)]),
        group("exp", [float_fn("exp", "Exp", f64::exp)]),
        group("log", [float_fn("log", "Log", f64::ln)]),
        group("log2", [float_fn("log2", "Log2", f64::log2)]),
        group("log10", [float_fn("log10", "Log10", f64::log10)]),
        group("floor", [float_fn("floor", "Floor", f64::floor)]),
        group("ceiling", [float_fn("ceiling", "Ceiling", f64::ceil)]),
        group("round", [float_fn("round", "Round", f64::round)]),
        group("truncate", [float_fn("truncate", "Truncate", f64::trunc)]),
        group("pow", [float_fn2("pow", "Pow", f64::powf)]),
        group("atan2", [float_fn2("atan2", "Atan2", f64::atan2)]),
        group(
            "average",
            [reduce_def("average", "Average", |v: Vec<Float>| {
                if v.is_empty() {
                    Float(0.0)
                } else {
                    let total: f64 = v.iter().map(|f| f.0).sum();
                    Float(total / v.len() as f64)
                }
            })],
        ),
        group(
            "lerp",
            [FuncDef::fixed(
                "lerp",
                vec![
                    ArgKind::Value(DataType::Float),
                    ArgKind::Value(DataType::Float),
                    ArgKind::Value(DataType::Float),
                ],
                Box::new(|g, args| {
                    nodes::ternary(
                        g,
                        "Lerp",
                        args[0],
                        args[1],
                        args[2],
                        |i: Float, min: Float, max: Float| {
                            if i.0 <= 0.0 {
                                min
                            } else if i.0 >= 1.0 {
                                max
                            } else {
                                Float((1.0 - i.0) * min.0 + i.0 * max.0)
                            }
                        },
                    )
                }),
            )],
        ),
        group(
            "select",
            [
                select_def::<Bool>(),
                select_def::<Int>(),
                select_def::<Float>(),
                select_def::<Str>(),
                FuncDef::fixed(
                    "select",
                    vec![ArgKind::Value(DataType::Bool), ArgKind::Trigger, ArgKind::Trigger],
                    Box::new(|g, args| nodes::select_trigger(g, args[0], args[1], args[2])),
                ),
            ],
        ),
        group(
            "latch",
            [
                latch_def::<Bool>(),
                latch_def::<Int>(),
                latch_def::<Float>(),
                latch_def::<Str>(),
            ],
        ),
        group(
            "on_true",
            [FuncDef::fixed(
                "on_true",
                vec![ArgKind::Value(DataType::Bool)],
                Box::new(|g, args| nodes::on_true(g, args[0])),
            )],
        ),
        group(
            "on_false",
            [FuncDef::fixed(
                "on_false",
                vec![ArgKind::Value(DataType::Bool)],
                Box::new(|g, args| nodes::on_false(g, args[0])),
            )],
        ),
        group(
            "on_change",
            [DataType::Bool, DataType::Int, DataType::Float, DataType::Str]
                .into_iter()
                .map(|ty| {
                    FuncDef::fixed(
                        "on_change",
                        vec![ArgKind::Value(ty)],
                        Box::new(|g, args| nodes::on_change(g, args[0])),
                    )
                }),
        ),
        group(
            "cast_int",
            [
                FuncDef::fixed(
                    "cast_int",
                    vec![ArgKind::Value(DataType::Int)],
                    Box::new(|_, args| Ok(args[0])),
                )
                .passthrough_one(),
                FuncDef::fixed(
                    "cast_int",
                    vec![ArgKind::Value(DataType::Float)],
                    Box::new(|g, args| nodes::cast_explicit(g, DataType::Int, args[0])),
                )
                .needs_one_no_cast(),
            ],
        ),
        group(
            "cast_float",
            [
                FuncDef::fixed(
                    "cast_float",
                    vec![ArgKind::Value(DataType::Float)],
                    Box::new(|_, args| Ok(args[0])),
                )
                .passthrough_one(),
                FuncDef::fixed(
                    "cast_float",
                    vec![ArgKind::Value(DataType::Int)],
                    Box::new(|g, args| nodes::promote::<Int, Float>(g, args[0])),
                ),
            ],
        ),
        group(
            "cast_string",
            [FuncDef::fixed(
                "cast_string",
                vec![ArgKind::Value(DataType::Str)],
                Box::new(|_, args| Ok(args[0])),
            )
            .passthrough_one()],
        ),
    ];
    let mut counter = FuncGroup::new("counter");
    counter_defs(&mut counter);
    groups.push(counter);
    groups.push(group("all", [trigger_def("all", |g, args| nodes::all(g, args))]));
    groups.push(group("any", [trigger_def("any", |g, args| nodes::any(g, args))]));
    groups.push(group(
        "only_one",
        [trigger_def("only_one", |g, args| nodes::only_one(g, args))],
    ));
    groups
}

/// Named constants installed alongside the catalog.
pub fn constants() -> impl Iterator<Item = (&'static str, Value)> {
    [
        ("e", Value::Float(std::f64::consts::E)),
        ("pi", Value::Float(std::f64::consts::PI)),
        ("tau", Value::Float(std::f64::consts::TAU)),
        ("sqrt2", Value::Float(std::f64::consts::SQRT_2)),
    ]
    .into_iter()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Graph;
    use crate::nodes::literal;

    fn find(groups: &[FuncGroup], name: &str) -> usize {
        groups
            .iter()
            .position(|g| g.name() == name)
            .unwrap_or_else(|| panic!("missing group {name}"))
    }

    #[test]
    fn integer_sum_stays_integer() {
        let mut g = Graph::new();
        let groups = catalog();
        let a = literal(&mut g, Value::Int(3));
        let b = literal(&mut g, Value::Int(4));
        let node = groups[find(&groups, "sum")].build(&mut g, &[a, b]).unwrap();
        assert_eq!(g.current_value(node).unwrap(), &Value::Int(7));
    }

    #[test]
    fn string_sum_concatenates_in_order() {
        let mut g = Graph::new();
        let groups = catalog();
        let a = literal(&mut g, Value::Str("ab".into()));
        let b = literal(&mut g, Value::Str("cd".into()));
        let node = groups[find(&groups, "sum")].build(&mut g, &[a, b]).unwrap();
        assert_eq!(g.current_value(node).unwrap(), &Value::Str("abcd".into()));
    }

    #[test]
    fn equality_prefers_the_unpromoted_type() {
        let mut g = Graph::new();
        let groups = catalog();
        let a = literal(&mut g, Value::Int(2));
        let b = literal(&mut g, Value::Int(2));
        let node = groups[find(&groups, "equal")]
            .build(&mut g, &[a, b])
            .unwrap();
        assert_eq!(g.current_value(node).unwrap(), &Value::Bool(true));
    }

    #[test]
    fn and_dispatches_on_argument_kind() {
        let mut g = Graph::new();
        let groups = catalog();
        let and = find(&groups, "and");

        let a = literal(&mut g, Value::Bool(true));
        let b = literal(&mut g, Value::Bool(false));
        let logical = groups[and].build(&mut g, &[a, b]).unwrap();
        assert_eq!(g.current_value(logical).unwrap(), &Value::Bool(false));

        let x = literal(&mut g, Value::Int(0b1100));
        let y = literal(&mut g, Value::Int(0b1010));
        let bitwise = groups[and].build(&mut g, &[x, y]).unwrap();
        assert_eq!(g.current_value(bitwise).unwrap(), &Value::Int(0b1000));
    }

    #[test]
    fn cast_int_truncates_floats() {
        let mut g = Graph::new();
        let groups = catalog();
        let v = literal(&mut g, Value::Float(9.9));
        let node = groups[find(&groups, "cast_int")]
            .build(&mut g, &[v])
            .unwrap();
        assert_eq!(g.current_value(node).unwrap(), &Value::Int(9));
    }

    #[test]
    fn cast_float_promotes_ints() {
        let mut g = Graph::new();
        let groups = catalog();
        let v = literal(&mut g, Value::Int(4));
        let node = groups[find(&groups, "cast_float")]
            .build(&mut g, &[v])
            .unwrap();
        assert_eq!(g.current_value(node).unwrap(), &Value::Float(4.0));
    }

    #[test]
    fn cast_string_promotes_any_value() {
        let mut g = Graph::new();
        let groups = catalog();
        let v = literal(&mut g, Value::Float(2.5));
        let node = groups[find(&groups, "cast_string")]
            .build(&mut g, &[v])
            .unwrap();
        assert_eq!(g.current_value(node).unwrap(), &Value::Str("2.5".into()));
    }

    #[test]
    fn sqrt_builds_from_promoted_int() {
        let mut g = Graph::new();
        let groups = catalog();
        let v = literal(&mut g, Value::Int(9));
        let node = groups[find(&groups, "sqrt")].build(&mut g, &[v]).unwrap();
        assert_eq!(g.current_value(node).unwrap(), &Value::Float(3.0));
    }

    #[test]
    fn pow_raises_to_the_exponent() {
        let mut g = Graph::new();
        let groups = catalog();
        let base = literal(&mut g, Value::Float(2.0));
        let exp = literal(&mut g, Value::Float(10.0));
        let node = groups[find(&groups, "pow")]
            .build(&mut g, &[base, exp])
            .unwrap();
        assert_eq!(g.current_value(node).unwrap(), &Value::Float(1024.0));
    }

    #[test]
    fn sum_refuses_arguments_that_all_need_promotion() {
        let mut g = Graph::new();
        let groups = catalog();
        let a = literal(&mut g, Value::Bool(false));
        let b = literal(&mut g, Value::Bool(false));
        let err = groups[find(&groups, "sum")]
            .build(&mut g, &[a, b])
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "no overload of `sum` accepts (bool, bool)"
        );
    }

    #[test]
    fn string_sum_still_promotes_beside_a_string() {
        let mut g = Graph::new();
        let groups = catalog();
        let a = literal(&mut g, Value::Str("n = ".into()));
        let b = literal(&mut g, Value::Int(5));
        let node = groups[find(&groups, "sum")].build(&mut g, &[a, b]).unwrap();
        assert_eq!(g.current_value(node).unwrap(), &Value::Str("n = 5".into()));
    }

    #[test]
    fn average_divides_by_the_argument_count() {
        let mut g = Graph::new();
        let groups = catalog();
        let a = literal(&mut g, Value::Float(1.0));
        let b = literal(&mut g, Value::Float(2.0));
        let c = literal(&mut g, Value::Float(9.0));
        let node = groups[find(&groups, "average")]
            .build(&mut g, &[a, b, c])
            .unwrap();
        assert_eq!(g.current_value(node).unwrap(), &Value::Float(4.0));
    }

    #[test]
    fn lerp_clamps_the_factor() {
        let mut g = Graph::new();
        let groups = catalog();
        let lerp = find(&groups, "lerp");

        let half = literal(&mut g, Value::Float(0.5));
        let lo = literal(&mut g, Value::Float(10.0));
        let hi = literal(&mut g, Value::Float(20.0));
        let mid = groups[lerp].build(&mut g, &[half, lo, hi]).unwrap();
        assert_eq!(g.current_value(mid).unwrap(), &Value::Float(15.0));

        let over = literal(&mut g, Value::Float(1.5));
        let capped = groups[lerp].build(&mut g, &[over, lo, hi]).unwrap();
        assert_eq!(g.current_value(capped).unwrap(), &Value::Float(20.0));
    }

    #[test]
    fn implies_is_false_only_for_true_then_false() {
        let mut g = Graph::new();
        let groups = catalog();
        let t = literal(&mut g, Value::Bool(true));
        let f = literal(&mut g, Value::Bool(false));
        let node = groups[find(&groups, "implies")]
            .build(&mut g, &[t, f])
            .unwrap();
        assert_eq!(g.current_value(node).unwrap(), &Value::Bool(false));

        let vacuous = groups[find(&groups, "implies")]
            .build(&mut g, &[f, t])
            .unwrap();
        assert_eq!(g.current_value(vacuous).unwrap(), &Value::Bool(true));
    }

    #[test]
    fn hyperbolic_and_inverse_trig_are_registered() {
        let mut g = Graph::new();
        let groups = catalog();
        for name in ["asin", "acos", "atan", "sinh", "cosh", "tanh", "cbrt"] {
            let v = literal(&mut g, Value::Float(0.0));
            let node = groups[find(&groups, name)].build(&mut g, &[v]).unwrap();
            assert!(
                matches!(g.current_value(node).unwrap(), Value::Float(_)),
                "{name} should produce a float"
            );
        }
    }
}
