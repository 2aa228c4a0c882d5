//! Node Arena and Structural Operations
//!
//! The [`Graph`] owns every node, indexed by id, with parent and child
//! edges stored as id lists. All structural mutation goes through it:
//!
//! - `insert` wires a new node beneath existing parents (a fresh node can
//!   never close a cycle) and primes derived value nodes once so they
//!   reflect their parents' current values.
//! - `add_children` / `remove_children` edit edges on existing nodes,
//!   rejecting edits that would close a cycle before any partial change
//!   is applied, and renormalizing depths afterwards.
//! - `replace_parent` swaps one parent for a kind-compatible other, used
//!   by the constant folder to splice literals in.
//!
//! Depth maintenance follows a worklist popped in ascending-depth order:
//! recompute `depth = max(parent depths) + 1`, and only when the number
//! changed push the node's children, which bounds the work on an acyclic
//! graph.

use indexmap::IndexMap;
use smallvec::SmallVec;

use crate::data::Value;
use crate::error::{Error, Result};

use super::node::{Behavior, Node, NodeId, NodeState, NodeSummary, ParentSignal, Parents};

/// The dependency graph: an arena of nodes addressed by id.
#[derive(Debug, Default)]
pub struct Graph {
    nodes: IndexMap<NodeId, Node>,
    next_id: u64,
}

impl Graph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of nodes in the graph.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True when the graph holds no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// True when the id resolves to a node.
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// A marker separating nodes that exist now from nodes inserted
    /// later: every id handed out after this call satisfies
    /// `id.raw() >= checkpoint`.
    pub fn checkpoint(&self) -> u64 {
        self.next_id
    }

    /// Borrow a node, failing on an unknown id.
    pub fn node(&self, id: NodeId) -> Result<&Node> {
        self.nodes.get(&id).ok_or(Error::UnknownNode { node: id })
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut Node> {
        self.nodes.get_mut(&id).ok_or(Error::UnknownNode { node: id })
    }

    /// Borrow a node without the error wrapping.
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    /// Iterate all nodes in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// Insert a parentless node. Cannot fail: there are no edges to check.
    pub fn insert_root(
        &mut self,
        label: &'static str,
        state: NodeState,
        behavior: Behavior,
    ) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        self.nodes
            .insert(id, Node::new(id, label, state, behavior, Parents::none()));
        tracing::debug!(node = %id, label, "inserted root node");
        id
    }

    /// Insert a node beneath existing parents. The new node cannot close
    /// a cycle since nothing depends on it yet. Derived value nodes are
    /// evaluated once so their stored value reflects the parents' current
    /// values; derived triggers start not provoked.
    pub fn insert(
        &mut self,
        label: &'static str,
        state: NodeState,
        behavior: Behavior,
        parents: Parents,
    ) -> Result<NodeId> {
        let mut depth = 0;
        for pid in parents.iter() {
            depth = depth.max(self.node(pid)?.depth() + 1);
        }

        let id = NodeId(self.next_id);
        self.next_id += 1;
        let prime = behavior.is_evaluable() && !state.is_trigger();
        let mut node = Node::new(id, label, state, behavior, parents);
        node.set_depth(depth);
        let parent_ids: SmallVec<[NodeId; 4]> = node.parents().iter().collect();
        self.nodes.insert(id, node);
        for pid in parent_ids {
            self.node_mut(pid)?.add_child(id);
        }
        tracing::debug!(node = %id, label, depth, "inserted node");

        if prime {
            self.evaluate_node(id)?;
        }
        Ok(id)
    }

    /// Walk upward from `start` through parent edges and report the first
    /// of `targets` encountered, if any is reachable.
    fn reachable_upward(&self, start: NodeId, targets: &[NodeId]) -> Option<NodeId> {
        let mut touched: Vec<NodeId> = Vec::new();
        let mut pending: Vec<NodeId> = vec![start];
        while let Some(id) = pending.pop() {
            if touched.contains(&id) {
                continue;
            }
            touched.push(id);
            if targets.contains(&id) {
                return Some(id);
            }
            if let Some(node) = self.nodes.get(&id) {
                for parent in node.parents().iter() {
                    if !touched.contains(&parent) {
                        pending.push(parent);
                    }
                }
            }
        }
        None
    }

    /// Add the given nodes as children of `parent`, creating the full
    /// edge (the parent is appended to each child's variable parent
    /// segment). Children already present are skipped; an edit that would
    /// make `parent` its own transitive ancestor is rejected with no
    /// partial change applied.
    pub fn add_children(&mut self, parent: NodeId, children: &[NodeId]) -> Result<()> {
        self.node(parent)?;
        for &child in children {
            self.node(child)?;
        }
        if let Some(child) = self.reachable_upward(parent, children) {
            return Err(Error::CycleDetected { parent, child });
        }

        let mut stale = Vec::new();
        for &child in children {
            if self.node_mut(parent)?.add_child(child) {
                self.node_mut(child)?.parents_mut().push_variable(parent);
                self.sort_insert(&mut stale, child);
                tracing::debug!(parent = %parent, child = %child, "added edge");
            }
        }
        self.update_depths(stale)
    }

    /// Remove the given children from `parent` where the edge exists.
    /// Every occurrence of `parent` in the child's parent slots is
    /// cleared, and depths are renormalized bottom-up.
    pub fn remove_children(&mut self, parent: NodeId, children: &[NodeId]) -> Result<()> {
        self.node(parent)?;
        let mut stale = Vec::new();
        for &child in children {
            if self.node_mut(parent)?.remove_child(child) {
                self.node_mut(child)?.parents_mut().remove_all(parent);
                self.sort_insert(&mut stale, child);
                tracing::debug!(parent = %parent, child = %child, "removed edge");
            }
        }
        self.update_depths(stale)
    }

    /// Replace every occurrence of `old` in `child`'s parent slots with
    /// `new`, preserving depth invariants. The two parents must be kind
    /// compatible (both triggers, or values of the same type). Returns
    /// whether anything was replaced.
    pub fn replace_parent(&mut self, child: NodeId, old: NodeId, new: NodeId) -> Result<bool> {
        self.node(child)?;
        let compatible = self
            .node(old)?
            .state()
            .compatible_with(self.node(new)?.state());
        if !compatible {
            return Err(Error::IncompatibleReplacement { child, old, new });
        }
        if new != old && self.reachable_upward(new, &[child]).is_some() {
            return Err(Error::CycleDetected { parent: new, child });
        }

        if !self.node_mut(child)?.parents_mut().replace(old, new) {
            return Ok(false);
        }
        self.node_mut(old)?.remove_child(child);
        self.node_mut(new)?.add_child(child);
        tracing::debug!(child = %child, old = %old, new = %new, "replaced parent");
        self.update_depths(vec![child])?;
        Ok(true)
    }

    /// Renormalize depths starting from the given stale nodes, processed
    /// in ascending depth order; propagation continues into a node's
    /// children only when its depth actually changed.
    fn update_depths(&mut self, mut pending: Vec<NodeId>) -> Result<()> {
        while !pending.is_empty() {
            let id = pending.remove(0);
            let node = self.node(id)?;
            let mut depth = -1;
            for parent in node.parents().iter() {
                depth = depth.max(self.node(parent)?.depth());
            }
            let depth = depth + 1;
            if depth != node.depth() {
                let children: SmallVec<[NodeId; 4]> = node.children().iter().copied().collect();
                self.node_mut(id)?.set_depth(depth);
                for child in children {
                    self.sort_insert(&mut pending, child);
                }
            }
        }
        Ok(())
    }

    /// Insert a node id into a list kept sorted by (depth, id), skipping
    /// duplicates.
    pub fn sort_insert(&self, list: &mut Vec<NodeId>, id: NodeId) {
        let key = |n: &NodeId| (self.nodes.get(n).map_or(0, Node::depth), *n);
        if let Err(position) = list.binary_search_by_key(&key(&id), key) {
            list.insert(position, id);
        }
    }

    /// Snapshot the signals of a node's parent slots for its rule.
    fn parent_signals<'a>(&'a self, node: &'a Node) -> Result<SmallVec<[ParentSignal<'a>; 8]>> {
        let mut signals = SmallVec::new();
        for slot in node.parents().slots() {
            signals.push(match slot {
                None => ParentSignal::Absent,
                Some(pid) => match self.node(pid)?.state() {
                    NodeState::Value(v) => ParentSignal::Value(v),
                    NodeState::Trigger { provoked } => ParentSignal::Fired(*provoked),
                },
            });
        }
        Ok(signals)
    }

    /// Evaluate one node: run its rule against the parents' current
    /// signals and store the result. For value nodes the return reports
    /// whether the stored value changed; for triggers it reports whether
    /// the trigger fired this pass. Inputs and literals never change here.
    pub fn evaluate_node(&mut self, id: NodeId) -> Result<bool> {
        let new_state = {
            let node = self.node(id)?;
            match node.behavior() {
                Behavior::Input | Behavior::Literal => return Ok(false),
                Behavior::ValueRule(rule) => {
                    let current = match node.state() {
                        NodeState::Value(v) => v,
                        NodeState::Trigger { .. } => {
                            return Err(Error::NotAValueNode { node: id })
                        }
                    };
                    let signals = self.parent_signals(node)?;
                    NodeState::Value(rule(current, &signals))
                }
                Behavior::TriggerRule(rule) => {
                    let signals = self.parent_signals(node)?;
                    NodeState::Trigger {
                        provoked: rule(&signals),
                    }
                }
            }
        };

        match new_state {
            NodeState::Value(new_value) => match self.node_mut(id)?.state_mut() {
                NodeState::Value(current) => {
                    if *current == new_value {
                        Ok(false)
                    } else {
                        tracing::trace!(node = %id, value = %new_value, "value changed");
                        *current = new_value;
                        Ok(true)
                    }
                }
                NodeState::Trigger { .. } => Err(Error::NotAValueNode { node: id }),
            },
            NodeState::Trigger { provoked: fired } => match self.node_mut(id)?.state_mut() {
                NodeState::Trigger { provoked } => {
                    *provoked = fired;
                    if fired {
                        tracing::trace!(node = %id, "trigger fired");
                    }
                    Ok(fired)
                }
                NodeState::Value(_) => Err(Error::NotATriggerNode { node: id }),
            },
        }
    }

    /// Set the value of a value-bearing input node. The value must have
    /// the node's exact runtime type. Returns whether the value changed.
    pub fn set_input_value(&mut self, id: NodeId, value: Value) -> Result<bool> {
        let node = self.node_mut(id)?;
        if !node.is_input() {
            return Err(Error::NotAnInput { node: id });
        }
        match node.state_mut() {
            NodeState::Value(current) => {
                if current.data_type() != value.data_type() {
                    return Err(Error::ValueTypeMismatch {
                        node: id,
                        expected: current.data_type(),
                        found: value.data_type(),
                    });
                }
                if *current == value {
                    Ok(false)
                } else {
                    *current = value;
                    Ok(true)
                }
            }
            NodeState::Trigger { .. } => Err(Error::NotAValueNode { node: id }),
        }
    }

    /// Set the provoked flag of a trigger input node. Returns whether the
    /// flag changed.
    pub fn provoke_input(&mut self, id: NodeId, value: bool) -> Result<bool> {
        let node = self.node_mut(id)?;
        if !node.is_input() {
            return Err(Error::NotAnInput { node: id });
        }
        match node.state_mut() {
            NodeState::Trigger { provoked } => {
                if *provoked == value {
                    Ok(false)
                } else {
                    *provoked = value;
                    Ok(true)
                }
            }
            NodeState::Value(_) => Err(Error::NotATriggerNode { node: id }),
        }
    }

    /// The current value of a value-bearing node.
    pub fn current_value(&self, id: NodeId) -> Result<&Value> {
        match self.node(id)?.state() {
            NodeState::Value(v) => Ok(v),
            NodeState::Trigger { .. } => Err(Error::NotAValueNode { node: id }),
        }
    }

    /// The provoked flag of a trigger node.
    pub fn is_provoked(&self, id: NodeId) -> Result<bool> {
        match self.node(id)?.state() {
            NodeState::Trigger { provoked } => Ok(*provoked),
            NodeState::Value(_) => Err(Error::NotATriggerNode { node: id }),
        }
    }

    /// Consume a trigger's provoked flag at the end of a pass.
    pub fn reset_trigger(&mut self, id: NodeId) -> Result<()> {
        match self.node_mut(id)?.state_mut() {
            NodeState::Trigger { provoked } => {
                *provoked = false;
                Ok(())
            }
            NodeState::Value(_) => Err(Error::NotATriggerNode { node: id }),
        }
    }

    /// Whether a node is provably constant: a literal, or a parentless
    /// derived non-trigger, or a node all of whose parents are constant.
    /// Inputs are never constant.
    pub fn is_constant(&self, id: NodeId) -> bool {
        let Some(node) = self.nodes.get(&id) else {
            return false;
        };
        if node.is_literal() {
            return true;
        }
        if node.is_input() {
            return false;
        }
        if node.parents().is_empty() {
            return !node.is_trigger();
        }
        node.parents().iter().all(|parent| self.is_constant(parent))
    }

    /// A read-only summary for inspection.
    pub fn summary(&self, id: NodeId) -> Result<NodeSummary> {
        let node = self.node(id)?;
        let (value, provoked) = match node.state() {
            NodeState::Value(v) => (Some(v.value_string()), None),
            NodeState::Trigger { provoked } => (None, Some(*provoked)),
        };
        Ok(NodeSummary {
            id,
            label: node.label(),
            depth: node.depth(),
            value,
            provoked,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int_input(g: &mut Graph, value: i64) -> NodeId {
        g.insert_root("Input", NodeState::Value(Value::Int(value)), Behavior::Input)
    }

    fn passthrough(g: &mut Graph, parent: NodeId) -> NodeId {
        g.insert(
            "Pass",
            NodeState::Value(Value::Int(0)),
            Behavior::ValueRule(Box::new(|current, signals| {
                signals[0].value().cloned().unwrap_or_else(|| current.clone())
            })),
            Parents::fixed([Some(parent)]),
        )
        .expect("insert")
    }

    #[test]
    fn depth_follows_parents() {
        let mut g = Graph::new();
        let a = int_input(&mut g, 1);
        let b = passthrough(&mut g, a);
        let c = passthrough(&mut g, b);

        assert_eq!(g.node(a).unwrap().depth(), 0);
        assert_eq!(g.node(b).unwrap().depth(), 1);
        assert_eq!(g.node(c).unwrap().depth(), 2);
    }

    #[test]
    fn insert_primes_value_nodes() {
        let mut g = Graph::new();
        let a = int_input(&mut g, 42);
        let b = passthrough(&mut g, a);
        assert_eq!(g.current_value(b).unwrap(), &Value::Int(42));
    }

    #[test]
    fn add_children_rejects_cycles_without_partial_change() {
        let mut g = Graph::new();
        let a = int_input(&mut g, 1);
        let b = passthrough(&mut g, a);
        let c = passthrough(&mut g, b);

        // c -> a would make a its own ancestor.
        let err = g.add_children(c, &[a]).unwrap_err();
        assert_eq!(err, Error::CycleDetected { parent: c, child: a });
        assert!(g.node(c).unwrap().children().is_empty());
        assert!(!g.node(a).unwrap().parents().contains(c));

        // Self edge.
        let err = g.add_children(b, &[b]).unwrap_err();
        assert_eq!(err, Error::CycleDetected { parent: b, child: b });
    }

    #[test]
    fn remove_children_renormalizes_depth() {
        let mut g = Graph::new();
        let a = int_input(&mut g, 1);
        let b = passthrough(&mut g, a);
        assert_eq!(g.node(b).unwrap().depth(), 1);

        g.remove_children(a, &[b]).unwrap();
        assert_eq!(g.node(b).unwrap().depth(), 0);
        assert!(g.node(b).unwrap().parents().is_empty());
    }

    #[test]
    fn replace_parent_checks_kind() {
        let mut g = Graph::new();
        let a = int_input(&mut g, 1);
        let b = passthrough(&mut g, a);
        let f = g.insert_root(
            "Input",
            NodeState::Value(Value::Float(0.5)),
            Behavior::Input,
        );

        let err = g.replace_parent(b, a, f).unwrap_err();
        assert!(matches!(err, Error::IncompatibleReplacement { .. }));

        let a2 = int_input(&mut g, 9);
        assert!(g.replace_parent(b, a, a2).unwrap());
        assert!(g.node(b).unwrap().parents().contains(a2));
        assert!(!g.node(a).unwrap().children().contains(&b));
        assert!(g.node(a2).unwrap().children().contains(&b));
    }

    #[test]
    fn evaluate_short_circuits_on_unchanged_value() {
        let mut g = Graph::new();
        let a = int_input(&mut g, 5);
        let b = passthrough(&mut g, a);

        // Value already matches the parent after priming.
        assert!(!g.evaluate_node(b).unwrap());

        g.set_input_value(a, Value::Int(6)).unwrap();
        assert!(g.evaluate_node(b).unwrap());
        assert_eq!(g.current_value(b).unwrap(), &Value::Int(6));
    }

    #[test]
    fn input_type_is_enforced() {
        let mut g = Graph::new();
        let a = int_input(&mut g, 5);
        let err = g.set_input_value(a, Value::Float(1.0)).unwrap_err();
        assert_eq!(
            err,
            Error::ValueTypeMismatch {
                node: a,
                expected: crate::data::DataType::Int,
                found: crate::data::DataType::Float,
            }
        );
    }

    #[test]
    fn constant_detection() {
        let mut g = Graph::new();
        let lit = g.insert_root("Literal", NodeState::Value(Value::Int(2)), Behavior::Literal);
        let input = int_input(&mut g, 1);
        let from_lit = passthrough(&mut g, lit);
        let from_input = passthrough(&mut g, input);

        assert!(g.is_constant(lit));
        assert!(!g.is_constant(input));
        assert!(g.is_constant(from_lit));
        assert!(!g.is_constant(from_input));
    }

    #[test]
    fn sort_insert_orders_by_depth_and_dedupes() {
        let mut g = Graph::new();
        let a = int_input(&mut g, 1);
        let b = passthrough(&mut g, a);
        let c = passthrough(&mut g, b);

        let mut list = Vec::new();
        g.sort_insert(&mut list, c);
        g.sort_insert(&mut list, a);
        g.sort_insert(&mut list, b);
        g.sort_insert(&mut list, c);
        assert_eq!(list, vec![a, b, c]);
    }
}
