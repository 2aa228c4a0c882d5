//! Value Node Constructors
//!
//! Generic building blocks for value-bearing nodes. Each constructor
//! takes an operator-supplied pure function over the parents' current
//! values and wraps it into a rule closure; the typed function is
//! statically dispatched inside the closure, and only the dynamic
//! [`Value`] layer crosses the node boundary.
//!
//! A required parent that is absent, or whose value does not extract to
//! the expected type, leaves the node's value unchanged.

use crate::data::{Bool, Data, DataType, Value};
use crate::error::{Error, Result};
use crate::graph::{Behavior, Graph, NodeId, NodeState, Parents, ValueRule};

/// Verify that a node bears a value of the given type.
pub(crate) fn expect_value(graph: &Graph, id: NodeId, ty: DataType) -> Result<()> {
    match graph.node(id)?.state().data_type() {
        Some(found) if found == ty => Ok(()),
        Some(found) => Err(Error::ValueTypeMismatch {
            node: id,
            expected: ty,
            found,
        }),
        None => Err(Error::NotAValueNode { node: id }),
    }
}

/// Create a leaf input node holding the type's default value.
pub fn value_input(graph: &mut Graph, ty: DataType) -> NodeId {
    graph.insert_root("Input", NodeState::Value(ty.default_value()), Behavior::Input)
}

/// Create a literal node whose value never changes.
pub fn literal(graph: &mut Graph, value: Value) -> NodeId {
    graph.insert_root("Literal", NodeState::Value(value), Behavior::Literal)
}

/// A value node with one typed parent.
pub fn unary<I, O, F>(
    graph: &mut Graph,
    label: &'static str,
    parent: NodeId,
    f: F,
) -> Result<NodeId>
where
    I: Data,
    O: Data,
    F: Fn(I) -> O + 'static,
{
    expect_value(graph, parent, I::TYPE)?;
    let rule: ValueRule = Box::new(move |current, signals| {
        match signals.first().and_then(|s| s.value()).and_then(I::from_value) {
            Some(value) => f(value).into_value(),
            None => current.clone(),
        }
    });
    graph.insert(
        label,
        NodeState::Value(O::default().into_value()),
        Behavior::ValueRule(rule),
        Parents::fixed([Some(parent)]),
    )
}

/// A value node with two typed parents, both required.
pub fn binary<A, B, O, F>(
    graph: &mut Graph,
    label: &'static str,
    left: NodeId,
    right: NodeId,
    f: F,
) -> Result<NodeId>
where
    A: Data,
    B: Data,
    O: Data,
    F: Fn(A, B) -> O + 'static,
{
    expect_value(graph, left, A::TYPE)?;
    expect_value(graph, right, B::TYPE)?;
    let rule: ValueRule = Box::new(move |current, signals| {
        let a = signals.first().and_then(|s| s.value()).and_then(A::from_value);
        let b = signals.get(1).and_then(|s| s.value()).and_then(B::from_value);
        match (a, b) {
            (Some(a), Some(b)) => f(a, b).into_value(),
            _ => current.clone(),
        }
    });
    graph.insert(
        label,
        NodeState::Value(O::default().into_value()),
        Behavior::ValueRule(rule),
        Parents::fixed([Some(left), Some(right)]),
    )
}

/// A value node with three typed parents, all required.
pub fn ternary<A, B, C, O, F>(
    graph: &mut Graph,
    label: &'static str,
    first: NodeId,
    second: NodeId,
    third: NodeId,
    f: F,
) -> Result<NodeId>
where
    A: Data,
    B: Data,
    C: Data,
    O: Data,
    F: Fn(A, B, C) -> O + 'static,
{
    expect_value(graph, first, A::TYPE)?;
    expect_value(graph, second, B::TYPE)?;
    expect_value(graph, third, C::TYPE)?;
    let rule: ValueRule = Box::new(move |current, signals| {
        let a = signals.first().and_then(|s| s.value()).and_then(A::from_value);
        let b = signals.get(1).and_then(|s| s.value()).and_then(B::from_value);
        let c = signals.get(2).and_then(|s| s.value()).and_then(C::from_value);
        match (a, b, c) {
            (Some(a), Some(b), Some(c)) => f(a, b, c).into_value(),
            _ => current.clone(),
        }
    });
    graph.insert(
        label,
        NodeState::Value(O::default().into_value()),
        Behavior::ValueRule(rule),
        Parents::fixed([Some(first), Some(second), Some(third)]),
    )
}

/// A value node over a variable-length ordered list of same-typed
/// parents. Absent entries are skipped rather than failing; the supplied
/// function must define its result for zero, one, and many values.
pub fn nary<T, O, F>(
    graph: &mut Graph,
    label: &'static str,
    parents: &[NodeId],
    f: F,
) -> Result<NodeId>
where
    T: Data,
    O: Data,
    F: Fn(Vec<T>) -> O + 'static,
{
    for &parent in parents {
        expect_value(graph, parent, T::TYPE)?;
    }
    let rule: ValueRule = Box::new(move |_, signals| {
        let values: Vec<T> = signals
            .iter()
            .filter_map(|s| s.value())
            .filter_map(T::from_value)
            .collect();
        f(values).into_value()
    });
    graph.insert(
        label,
        NodeState::Value(O::default().into_value()),
        Behavior::ValueRule(rule),
        Parents::variable(parents.iter().copied()),
    )
}

/// A statically typed promotion node; [`cast_implicit`] is its dynamic
/// counterpart for when the source type is only known at runtime.
pub fn promote<S, T>(graph: &mut Graph, parent: NodeId) -> Result<NodeId>
where
    S: Data,
    T: crate::data::CastFrom<S>,
{
    unary(graph, "Implicit", parent, |v: S| T::cast_from(v))
}

/// A node applying a declared implicit promotion to its parent's value.
pub fn cast_implicit(graph: &mut Graph, to: DataType, parent: NodeId) -> Result<NodeId> {
    let from = match graph.node(parent)?.state().data_type() {
        Some(ty) => ty,
        None => return Err(Error::NotAValueNode { node: parent }),
    };
    if !from.implicit_casts_to(to) {
        return Err(Error::NoImplicitCast { from, to });
    }
    cast_node(graph, "Implicit", to, parent, Value::cast_implicit)
}

/// A node applying an explicit cast to its parent's value.
pub fn cast_explicit(graph: &mut Graph, to: DataType, parent: NodeId) -> Result<NodeId> {
    let from = match graph.node(parent)?.state().data_type() {
        Some(ty) => ty,
        None => return Err(Error::NotAValueNode { node: parent }),
    };
    if !from.explicit_casts_to(to) {
        return Err(Error::NoExplicitCast { from, to });
    }
    cast_node(graph, "Explicit", to, parent, Value::cast_explicit)
}

fn cast_node(
    graph: &mut Graph,
    label: &'static str,
    to: DataType,
    parent: NodeId,
    cast: fn(&Value, DataType) -> Option<Value>,
) -> Result<NodeId> {
    let rule: ValueRule = Box::new(move |current, signals| {
        signals
            .first()
            .and_then(|s| s.value())
            .and_then(|v| cast(v, to))
            .unwrap_or_else(|| current.clone())
    });
    graph.insert(
        label,
        NodeState::Value(to.default_value()),
        Behavior::ValueRule(rule),
        Parents::fixed([Some(parent)]),
    )
}

/// The ternary select: a boolean condition choosing between two values of
/// the same type.
pub fn select<T: Data>(
    graph: &mut Graph,
    condition: NodeId,
    on_true: NodeId,
    on_false: NodeId,
) -> Result<NodeId> {
    ternary(
        graph,
        "Select",
        condition,
        on_true,
        on_false,
        |cond: Bool, left: T, right: T| if cond.0 { left } else { right },
    )
}
