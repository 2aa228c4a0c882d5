//! Trigger Node Constructors
//!
//! Triggers carry a transient provoked flag instead of a value. The
//! combinators here fold the fired flags of trigger parents, and the
//! `on_*` observers derive a trigger from a value-bearing parent.

use smallvec::SmallVec;

use crate::data::{Data, DataType, Value};
use crate::error::{Error, Result};
use crate::graph::{Behavior, Graph, NodeId, NodeState, Parents, TriggerRule};

use super::value::expect_value;

/// Verify that a node is a trigger.
pub(crate) fn expect_trigger(graph: &Graph, id: NodeId) -> Result<()> {
    if graph.node(id)?.state().is_trigger() {
        Ok(())
    } else {
        Err(Error::NotATriggerNode { node: id })
    }
}

/// Create a leaf input trigger, initially not provoked.
pub fn trigger_input(graph: &mut Graph) -> NodeId {
    graph.insert_root(
        "Input",
        NodeState::Trigger { provoked: false },
        Behavior::Input,
    )
}

/// Create a trigger whose provoked flag is fixed forever.
pub fn trigger_literal(graph: &mut Graph, provoked: bool) -> NodeId {
    graph.insert_root(
        "Literal",
        NodeState::Trigger { provoked },
        Behavior::Literal,
    )
}

/// A trigger folding the fired flags of a variable list of trigger
/// parents. Absent entries are skipped.
pub fn multitrigger<F>(
    graph: &mut Graph,
    label: &'static str,
    parents: &[NodeId],
    f: F,
) -> Result<NodeId>
where
    F: Fn(&[bool]) -> bool + 'static,
{
    for &parent in parents {
        expect_trigger(graph, parent)?;
    }
    let rule: TriggerRule = Box::new(move |signals| {
        let fired: SmallVec<[bool; 8]> = signals
            .iter()
            .filter(|s| !s.is_absent())
            .map(|s| s.fired())
            .collect();
        f(&fired)
    });
    graph.insert(
        label,
        NodeState::Trigger { provoked: false },
        Behavior::TriggerRule(rule),
        Parents::variable(parents.iter().copied()),
    )
}

/// Fires when every parent fired in the same pass.
pub fn all(graph: &mut Graph, parents: &[NodeId]) -> Result<NodeId> {
    multitrigger(graph, "All", parents, |fired| {
        !fired.is_empty() && fired.iter().all(|f| *f)
    })
}

/// Fires when at least one parent fired.
pub fn any(graph: &mut Graph, parents: &[NodeId]) -> Result<NodeId> {
    multitrigger(graph, "Any", parents, |fired| fired.iter().any(|f| *f))
}

/// Fires when exactly one parent fired.
pub fn only_one(graph: &mut Graph, parents: &[NodeId]) -> Result<NodeId> {
    multitrigger(graph, "OnlyOne", parents, |fired| {
        fired.iter().filter(|f| **f).count() == 1
    })
}

/// Fires whenever its boolean parent evaluates to true.
pub fn on_true(graph: &mut Graph, parent: NodeId) -> Result<NodeId> {
    expect_value(graph, parent, DataType::Bool)?;
    let rule: TriggerRule = Box::new(|signals| {
        matches!(signals.first().and_then(|s| s.value()), Some(Value::Bool(true)))
    });
    value_observer(graph, "OnTrue", parent, rule)
}

/// Fires whenever its boolean parent evaluates to false.
pub fn on_false(graph: &mut Graph, parent: NodeId) -> Result<NodeId> {
    expect_value(graph, parent, DataType::Bool)?;
    let rule: TriggerRule = Box::new(|signals| {
        matches!(signals.first().and_then(|s| s.value()), Some(Value::Bool(false)))
    });
    value_observer(graph, "OnFalse", parent, rule)
}

/// Fires whenever its value parent is re-evaluated. The scheduler only
/// visits children of nodes that changed, so every visit is a change.
pub fn on_change(graph: &mut Graph, parent: NodeId) -> Result<NodeId> {
    if graph.node(parent)?.state().is_trigger() {
        return Err(Error::NotAValueNode { node: parent });
    }
    let rule: TriggerRule = Box::new(|_| true);
    value_observer(graph, "OnChange", parent, rule)
}

fn value_observer(
    graph: &mut Graph,
    label: &'static str,
    parent: NodeId,
    rule: TriggerRule,
) -> Result<NodeId> {
    graph.insert(
        label,
        NodeState::Trigger { provoked: false },
        Behavior::TriggerRule(rule),
        Parents::fixed([Some(parent)]),
    )
}

/// A boolean condition choosing which of two trigger parents to follow.
pub fn select_trigger(
    graph: &mut Graph,
    condition: NodeId,
    on_true: NodeId,
    on_false: NodeId,
) -> Result<NodeId> {
    expect_value(graph, condition, DataType::Bool)?;
    expect_trigger(graph, on_true)?;
    expect_trigger(graph, on_false)?;
    let rule: TriggerRule = Box::new(|signals| {
        let pick_left = matches!(
            signals.first().and_then(|s| s.value()),
            Some(Value::Bool(true))
        );
        let slot = if pick_left { 1 } else { 2 };
        signals.get(slot).map_or(false, |s| s.fired())
    });
    graph.insert(
        "Select",
        NodeState::Trigger { provoked: false },
        Behavior::TriggerRule(rule),
        Parents::fixed([Some(condition), Some(on_true), Some(on_false)]),
    )
}

/// A latch samples its value parent each time its trigger parent fires,
/// and holds that sample until the next firing.
pub fn latch<T: Data>(graph: &mut Graph, trigger: NodeId, source: NodeId) -> Result<NodeId> {
    expect_trigger(graph, trigger)?;
    expect_value(graph, source, T::TYPE)?;
    let rule: crate::graph::ValueRule = Box::new(|current, signals| {
        if signals.first().map_or(false, |s| s.fired()) {
            signals
                .get(1)
                .and_then(|s| s.value())
                .cloned()
                .unwrap_or_else(|| current.clone())
        } else {
            current.clone()
        }
    });
    graph.insert(
        "Latch",
        NodeState::Value(T::default().into_value()),
        Behavior::ValueRule(rule),
        Parents::fixed([Some(trigger), Some(source)]),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Int;
    use crate::nodes::value::literal;

    #[test]
    fn combinator_checks_parent_kind() {
        let mut g = Graph::new();
        let v = literal(&mut g, Value::Int(1));
        let err = any(&mut g, &[v]).unwrap_err();
        assert_eq!(err, Error::NotATriggerNode { node: v });
    }

    #[test]
    fn all_requires_every_parent_fired() {
        let mut g = Graph::new();
        let a = trigger_input(&mut g);
        let b = trigger_input(&mut g);
        let both = all(&mut g, &[a, b]).unwrap();

        g.provoke_input(a, true).unwrap();
        assert!(!g.evaluate_node(both).unwrap());

        g.provoke_input(b, true).unwrap();
        assert!(g.evaluate_node(both).unwrap());
        assert!(g.is_provoked(both).unwrap());
    }

    #[test]
    fn only_one_rejects_zero_and_two() {
        let mut g = Graph::new();
        let a = trigger_input(&mut g);
        let b = trigger_input(&mut g);
        let one = only_one(&mut g, &[a, b]).unwrap();

        assert!(!g.evaluate_node(one).unwrap());
        g.provoke_input(a, true).unwrap();
        assert!(g.evaluate_node(one).unwrap());
        g.provoke_input(b, true).unwrap();
        assert!(!g.evaluate_node(one).unwrap());
    }

    #[test]
    fn latch_samples_only_when_fired() {
        let mut g = Graph::new();
        let t = trigger_input(&mut g);
        let src = literal(&mut g, Value::Int(10));
        let held = latch::<Int>(&mut g, t, src).unwrap();

        // Not fired yet: keeps its default.
        assert_eq!(g.current_value(held).unwrap(), &Value::Int(0));

        g.provoke_input(t, true).unwrap();
        g.evaluate_node(held).unwrap();
        assert_eq!(g.current_value(held).unwrap(), &Value::Int(10));
    }

    #[test]
    fn select_trigger_follows_condition() {
        let mut g = Graph::new();
        let cond = literal(&mut g, Value::Bool(false));
        let left = trigger_input(&mut g);
        let right = trigger_input(&mut g);
        let sel = select_trigger(&mut g, cond, left, right).unwrap();

        g.provoke_input(right, true).unwrap();
        assert!(g.evaluate_node(sel).unwrap());
        g.reset_trigger(right).unwrap();
        g.provoke_input(left, true).unwrap();
        assert!(!g.evaluate_node(sel).unwrap());
    }
}
