//! Graph Nodes
//!
//! This module defines the vertex type of the dependency graph and the
//! pieces it is assembled from: the per-graph [`NodeId`], the stored
//! [`NodeState`] (a typed value or a one-shot provoked flag), the
//! [`Behavior`] that decides how the node recomputes, and the two-segment
//! [`Parents`] view (a fixed tuple of optional slots plus a variable
//! ordered tail).
//!
//! Nodes own their state; parents and children are non-owning id lists
//! resolved through the arena in [`super::Graph`].

use std::fmt;

use smallvec::SmallVec;

use crate::data::{DataType, Value};

/// Unique identifier for a node, assigned sequentially by the graph that
/// owns it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u64);

impl NodeId {
    /// Get the raw id value.
    pub fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What a node holds: a persistent typed value, or a transient provoked
/// flag that is true only for the evaluation pass in which it was set.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeState {
    Value(Value),
    Trigger { provoked: bool },
}

impl NodeState {
    /// The value's type, `None` for triggers.
    pub fn data_type(&self) -> Option<DataType> {
        match self {
            NodeState::Value(v) => Some(v.data_type()),
            NodeState::Trigger { .. } => None,
        }
    }

    /// True when this state is a trigger flag.
    pub fn is_trigger(&self) -> bool {
        matches!(self, NodeState::Trigger { .. })
    }

    /// True when the two states are the same kind of state over the same
    /// data type, which is the condition for one node to stand in for
    /// another as a parent.
    pub fn compatible_with(&self, other: &NodeState) -> bool {
        match (self, other) {
            (NodeState::Value(a), NodeState::Value(b)) => a.data_type() == b.data_type(),
            (NodeState::Trigger { .. }, NodeState::Trigger { .. }) => true,
            _ => false,
        }
    }
}

/// A snapshot of one parent slot handed to a node's rule during
/// evaluation: the parent's current value, its provoked flag, or nothing
/// for an unfilled optional slot.
#[derive(Debug, Clone, Copy)]
pub enum ParentSignal<'a> {
    Value(&'a Value),
    Fired(bool),
    Absent,
}

impl<'a> ParentSignal<'a> {
    /// The parent's value, `None` for triggers and absent slots.
    pub fn value(&self) -> Option<&'a Value> {
        match self {
            ParentSignal::Value(v) => Some(v),
            _ => None,
        }
    }

    /// The parent's provoked flag; absent slots and values read as not
    /// fired.
    pub fn fired(&self) -> bool {
        matches!(self, ParentSignal::Fired(true))
    }

    /// True when the slot is unfilled.
    pub fn is_absent(&self) -> bool {
        matches!(self, ParentSignal::Absent)
    }
}

/// Recomputation rule for a derived value node: given the node's current
/// value and its parents' signals, produce the prospective new value.
pub type ValueRule = Box<dyn Fn(&Value, &[ParentSignal<'_>]) -> Value>;

/// Recomputation rule for a derived trigger node: given the parents'
/// signals, decide whether the trigger fires this pass.
pub type TriggerRule = Box<dyn Fn(&[ParentSignal<'_>]) -> bool>;

/// How a node participates in evaluation.
pub enum Behavior {
    /// A leaf mutated directly by an external caller; never recomputed.
    Input,
    /// A frozen node whose state never changes after construction.
    Literal,
    /// A derived value node driven by a rule closure.
    ValueRule(ValueRule),
    /// A derived trigger node driven by a rule closure.
    TriggerRule(TriggerRule),
}

impl Behavior {
    /// True for nodes the scheduler may evaluate.
    pub fn is_evaluable(&self) -> bool {
        matches!(self, Behavior::ValueRule(_) | Behavior::TriggerRule(_))
    }
}

impl fmt::Debug for Behavior {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Behavior::Input => f.write_str("Input"),
            Behavior::Literal => f.write_str("Literal"),
            Behavior::ValueRule(_) => f.write_str("ValueRule"),
            Behavior::TriggerRule(_) => f.write_str("TriggerRule"),
        }
    }
}

/// The parents of a node, split into a fixed segment of optional typed
/// slots and a variable-length ordered tail, exposed through one view.
#[derive(Debug, Clone, Default)]
pub struct Parents {
    fixed: SmallVec<[Option<NodeId>; 4]>,
    variable: SmallVec<[NodeId; 4]>,
}

impl Parents {
    /// No parents at all (inputs and literals).
    pub fn none() -> Self {
        Self::default()
    }

    /// A fixed tuple of slots, some of which may be unfilled.
    pub fn fixed<I: IntoIterator<Item = Option<NodeId>>>(slots: I) -> Self {
        Parents {
            fixed: slots.into_iter().collect(),
            variable: SmallVec::new(),
        }
    }

    /// A variable-length ordered list.
    pub fn variable<I: IntoIterator<Item = NodeId>>(parents: I) -> Self {
        Parents {
            fixed: SmallVec::new(),
            variable: parents.into_iter().collect(),
        }
    }

    /// All slots in order, unfilled ones included, fixed segment first.
    pub fn slots(&self) -> impl Iterator<Item = Option<NodeId>> + '_ {
        self.fixed
            .iter()
            .copied()
            .chain(self.variable.iter().map(|id| Some(*id)))
    }

    /// All present parents in order. May contain repeats when one parent
    /// fills several slots.
    pub fn iter(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.slots().flatten()
    }

    /// True when no slot is filled.
    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }

    /// True when the given node fills any slot.
    pub fn contains(&self, id: NodeId) -> bool {
        self.iter().any(|p| p == id)
    }

    /// Append a parent to the variable segment.
    pub(crate) fn push_variable(&mut self, id: NodeId) {
        self.variable.push(id);
    }

    /// Clear every slot holding the given parent: fixed slots are
    /// unfilled, variable entries removed. Returns true when any slot
    /// changed.
    pub(crate) fn remove_all(&mut self, id: NodeId) -> bool {
        let mut removed = false;
        for slot in self.fixed.iter_mut() {
            if *slot == Some(id) {
                *slot = None;
                removed = true;
            }
        }
        let before = self.variable.len();
        self.variable.retain(|p| *p != id);
        removed || self.variable.len() != before
    }

    /// Replace every occurrence of `old` with `new`. Returns true when at
    /// least one slot changed.
    pub fn replace(&mut self, old: NodeId, new: NodeId) -> bool {
        let mut replaced = false;
        for slot in self.fixed.iter_mut() {
            if *slot == Some(old) {
                *slot = Some(new);
                replaced = true;
            }
        }
        for slot in self.variable.iter_mut() {
            if *slot == old {
                *slot = new;
                replaced = true;
            }
        }
        replaced
    }
}

/// A vertex in the dependency graph.
#[derive(Debug)]
pub struct Node {
    id: NodeId,
    /// Short kind label used by inspection ("Sum", "Latch", "Input", ...).
    label: &'static str,
    /// Distance from the graph's shallowest inputs; 0 with no parents,
    /// otherwise one more than the deepest parent.
    depth: i32,
    state: NodeState,
    behavior: Behavior,
    parents: Parents,
    children: SmallVec<[NodeId; 4]>,
}

impl Node {
    pub(crate) fn new(
        id: NodeId,
        label: &'static str,
        state: NodeState,
        behavior: Behavior,
        parents: Parents,
    ) -> Self {
        Node {
            id,
            label,
            depth: 0,
            state,
            behavior,
            parents,
            children: SmallVec::new(),
        }
    }

    /// The node's id.
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// The node's kind label.
    pub fn label(&self) -> &'static str {
        self.label
    }

    /// The node's depth.
    pub fn depth(&self) -> i32 {
        self.depth
    }

    pub(crate) fn set_depth(&mut self, depth: i32) {
        self.depth = depth;
    }

    /// The node's current state.
    pub fn state(&self) -> &NodeState {
        &self.state
    }

    pub(crate) fn state_mut(&mut self) -> &mut NodeState {
        &mut self.state
    }

    /// How the node participates in evaluation.
    pub fn behavior(&self) -> &Behavior {
        &self.behavior
    }

    /// True when the scheduler may evaluate this node.
    pub fn is_evaluable(&self) -> bool {
        self.behavior.is_evaluable()
    }

    /// True for externally mutated leaves.
    pub fn is_input(&self) -> bool {
        matches!(self.behavior, Behavior::Input)
    }

    /// True for frozen nodes.
    pub fn is_literal(&self) -> bool {
        matches!(self.behavior, Behavior::Literal)
    }

    /// True for trigger-bearing nodes of any behavior.
    pub fn is_trigger(&self) -> bool {
        self.state.is_trigger()
    }

    /// The two-segment parents view.
    pub fn parents(&self) -> &Parents {
        &self.parents
    }

    pub(crate) fn parents_mut(&mut self) -> &mut Parents {
        &mut self.parents
    }

    /// Non-owning back-references to this node's children, used only for
    /// propagation and depth maintenance. Set semantics per child.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Add a child back-reference. Returns false when already present.
    pub(crate) fn add_child(&mut self, child: NodeId) -> bool {
        if self.children.contains(&child) {
            return false;
        }
        self.children.push(child);
        true
    }

    /// Remove a child back-reference. Returns false when absent.
    pub(crate) fn remove_child(&mut self, child: NodeId) -> bool {
        match self.children.iter().position(|c| *c == child) {
            Some(index) => {
                self.children.remove(index);
                true
            }
            None => false,
        }
    }
}

/// Closed read-only view of a node for printers and debuggers; keeps
/// reflection out of the core.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeSummary {
    pub id: NodeId,
    pub label: &'static str,
    pub depth: i32,
    /// The value rendered as text, `None` for triggers.
    pub value: Option<String>,
    /// The provoked flag, `None` for value-bearing nodes.
    pub provoked: Option<bool>,
}
