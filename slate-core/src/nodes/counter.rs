//! Accumulating counter node.

use crate::data::{Additive, Data, Identities, Subtractive};
use crate::error::Result;
use crate::graph::{Behavior, Graph, NodeId, NodeState, Parents, ValueRule};

use super::trigger::expect_trigger;
use super::value::expect_value;

/// Optional wiring for a [`counter`] beyond its increment trigger.
#[derive(Default, Clone, Copy)]
pub struct CounterSlots {
    /// Trigger that subtracts the delta.
    pub decrement: Option<NodeId>,
    /// Trigger that resets the tally.
    pub reset: Option<NodeId>,
    /// Value parent giving the step size. Defaults to one.
    pub delta: Option<NodeId>,
    /// Value parent giving the tally after a reset. Defaults to zero.
    pub reset_value: Option<NodeId>,
}

/// A counter accumulates a running tally driven by trigger parents.
///
/// Within a single pass the adjustments apply in a fixed order:
/// increment, then decrement, then reset. A reset therefore wins over
/// any increment or decrement that fired in the same pass.
pub fn counter<T>(graph: &mut Graph, increment: NodeId, slots: CounterSlots) -> Result<NodeId>
where
    T: Data + Additive + Subtractive + Identities,
{
    expect_trigger(graph, increment)?;
    for trigger in [slots.decrement, slots.reset].into_iter().flatten() {
        expect_trigger(graph, trigger)?;
    }
    for value in [slots.delta, slots.reset_value].into_iter().flatten() {
        expect_value(graph, value, T::TYPE)?;
    }

    let rule: ValueRule = Box::new(|current, signals| {
        let Some(mut tally) = T::from_value(current) else {
            return current.clone();
        };
        let delta = signals
            .get(3)
            .and_then(|s| s.value())
            .and_then(T::from_value)
            .unwrap_or_else(T::one);
        if signals.first().map_or(false, |s| s.fired()) {
            tally = tally.add(delta.clone());
        }
        if signals.get(1).map_or(false, |s| s.fired()) {
            tally = tally.sub(delta);
        }
        if signals.get(2).map_or(false, |s| s.fired()) {
            tally = signals
                .get(4)
                .and_then(|s| s.value())
                .and_then(T::from_value)
                .unwrap_or_default();
        }
        tally.into_value()
    });

    graph.insert(
        "Counter",
        NodeState::Value(T::default().into_value()),
        Behavior::ValueRule(rule),
        Parents::fixed([
            Some(increment),
            slots.decrement,
            slots.reset,
            slots.delta,
            slots.reset_value,
        ]),
    )
}
