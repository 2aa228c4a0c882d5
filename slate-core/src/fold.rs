//! Constant-Fold Optimizer
//!
//! After a build, subtrees whose leaves are all literals can never
//! change again. The folder walks the newly created nodes, evaluates
//! each provably constant subtree bottom-up, and splices a literal
//! holding the settled value in its place via `replace_parent`. Nodes
//! that existed before the build are never rewritten or re-evaluated:
//! they may be shared with other expressions, so the walk stops at the
//! build checkpoint. A node with a mix of constant and dynamic parents
//! keeps its rule, with only the constant parents folded beneath it.
//!
//! Derived triggers with all-constant parents fold to a never-provoked
//! trigger literal: with no dynamic parent left, nothing can ever fire
//! them.

use crate::error::Result;
use crate::graph::{Graph, NodeId, NodeState};
use crate::nodes;

/// Fold the constant subtrees among nodes created at or after
/// `checkpoint` (see [`Graph::checkpoint`]), starting from `root`.
/// Returns the node to use in place of `root`: a literal when the whole
/// subtree folded, otherwise `root` itself with its constant parents
/// replaced underneath.
pub fn fold_constants(graph: &mut Graph, root: NodeId, checkpoint: u64) -> Result<NodeId> {
    reduce(graph, root, checkpoint)
}

fn is_new(id: NodeId, checkpoint: u64) -> bool {
    id.raw() >= checkpoint
}

fn reduce(graph: &mut Graph, id: NodeId, checkpoint: u64) -> Result<NodeId> {
    if !is_new(id, checkpoint) {
        return Ok(id);
    }
    if graph.is_constant(id) {
        return bake(graph, id, checkpoint);
    }
    // A parent filling several slots appears once here: `replace_parent`
    // swaps every occurrence, so baking it again would only mint an
    // orphaned duplicate literal.
    let mut parents: Vec<NodeId> = Vec::new();
    for parent in graph.node(id)?.parents().iter() {
        if !parents.contains(&parent) {
            parents.push(parent);
        }
    }
    for parent in parents {
        let folded = reduce(graph, parent, checkpoint)?;
        if folded != parent {
            graph.replace_parent(id, parent, folded)?;
        }
    }
    Ok(id)
}

/// Settle a constant node's state and return the literal that replaces
/// it. Literals are already their own replacement.
fn bake(graph: &mut Graph, id: NodeId, checkpoint: u64) -> Result<NodeId> {
    if graph.node(id)?.is_literal() {
        return Ok(id);
    }
    settle(graph, id, checkpoint)?;
    let replacement = match graph.node(id)?.state() {
        NodeState::Value(value) => {
            let value = value.clone();
            tracing::debug!(node = %id, value = %value, "folded to literal");
            nodes::literal(graph, value)
        }
        NodeState::Trigger { .. } => {
            tracing::debug!(node = %id, "folded to unprovoked trigger literal");
            nodes::trigger_literal(graph, false)
        }
    };
    Ok(replacement)
}

/// Evaluate a constant subtree parents-first so the baked value reflects
/// its leaves. Only nodes inside the new-node set are re-evaluated.
fn settle(graph: &mut Graph, id: NodeId, checkpoint: u64) -> Result<()> {
    let parents: Vec<NodeId> = graph.node(id)?.parents().iter().collect();
    for parent in parents {
        if is_new(parent, checkpoint) {
            settle(graph, parent, checkpoint)?;
        }
    }
    graph.evaluate_node(id)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{DataType, Value};
    use crate::driver::Driver;

    #[test]
    fn all_literal_expression_folds_to_one_literal() {
        let mut d = Driver::new();
        let g = d.graph_mut();
        let checkpoint = g.checkpoint();
        let a = nodes::literal(g, Value::Float(21.0));
        let b = nodes::literal(g, Value::Float(2.0));
        let product = nodes::binary(
            g,
            "Multiply",
            a,
            b,
            |x: crate::data::Float, y: crate::data::Float| crate::data::Float(x.0 * y.0),
        )
        .unwrap();

        let folded = fold_constants(d.graph_mut(), product, checkpoint).unwrap();
        assert_ne!(folded, product);
        let node = d.graph().node(folded).unwrap();
        assert!(node.is_literal());
        assert!(node.parents().is_empty());
        assert_eq!(d.graph().current_value(folded).unwrap(), &Value::Float(42.0));
    }

    #[test]
    fn dynamic_parent_blocks_folding_above_it() {
        let mut d = Driver::new();
        let x = d.define_value_input("x", DataType::Float);
        let c = nodes::literal(d.graph_mut(), Value::Float(1.5));
        let sum = d.call("sum", &[x, c]).unwrap();

        // The sum itself must survive: one parent is an input.
        assert!(!d.graph().node(sum).unwrap().is_literal());
        d.set_float("x", 2.5).unwrap();
        d.evaluate(None).unwrap();
        assert_eq!(d.graph().current_value(sum).unwrap(), &Value::Float(4.0));
    }

    #[test]
    fn nested_constant_branch_folds_inside_dynamic_expression() {
        // x + (2 * 3): the inner product bakes to 6, the sum keeps x.
        let mut d = Driver::new();
        let x = d.define_value_input("x", DataType::Int);
        let two = nodes::literal(d.graph_mut(), Value::Int(2));
        let three = nodes::literal(d.graph_mut(), Value::Int(3));
        let product = d.call("multiply", &[two, three]).unwrap();
        assert!(d.graph().node(product).unwrap().is_literal());
        assert_eq!(d.graph().current_value(product).unwrap(), &Value::Int(6));

        let sum = d.call("sum", &[x, product]).unwrap();
        assert!(!d.graph().node(sum).unwrap().is_literal());
        d.set_int("x", 10).unwrap();
        d.evaluate(None).unwrap();
        assert_eq!(d.graph().current_value(sum).unwrap(), &Value::Int(16));
    }

    #[test]
    fn shared_preexisting_nodes_are_left_alone() {
        let mut d = Driver::new();
        let a = nodes::literal(d.graph_mut(), Value::Int(5));
        let b = nodes::literal(d.graph_mut(), Value::Int(7));
        let first = d.call("sum", &[a, b]).unwrap();

        // Both literals predate the second call's checkpoint, so the
        // second fold may not rewrite them or the first result.
        let second = d.call("sum", &[a, first]).unwrap();
        assert_eq!(d.graph().current_value(first).unwrap(), &Value::Int(12));
        assert_eq!(d.graph().current_value(second).unwrap(), &Value::Int(17));
    }

    #[test]
    fn a_constant_parent_in_two_slots_bakes_once() {
        use crate::data::Int;

        let mut d = Driver::new();
        let g = d.graph_mut();
        let x = nodes::value_input(g, DataType::Int);
        let five = nodes::literal(g, Value::Int(5));
        let checkpoint = g.checkpoint();
        let neg = nodes::unary(g, "Negate", five, |v: Int| Int(-v.0)).unwrap();
        let total = nodes::nary(g, "Sum", &[x, neg, neg], |v: Vec<Int>| {
            Int(v.iter().map(|i| i.0).sum())
        })
        .unwrap();

        let folded = fold_constants(g, total, checkpoint).unwrap();
        assert_eq!(folded, total);
        // x + neg + neg: one literal replaces both constant slots, so the
        // fold adds exactly one node beside the two built above.
        let added = g.iter().filter(|n| n.id().raw() >= checkpoint).count();
        assert_eq!(added, 3);
        assert_eq!(g.current_value(total).unwrap(), &Value::Int(-10));
    }

    #[test]
    fn constant_trigger_combinator_folds_to_unprovoked() {
        let mut d = Driver::new();
        let g = d.graph_mut();
        let checkpoint = g.checkpoint();
        let t = nodes::trigger_literal(g, false);
        let combined = nodes::any(g, &[t]).unwrap();
        let folded = fold_constants(g, combined, checkpoint).unwrap();
        assert!(g.node(folded).unwrap().is_literal());
        assert!(!g.is_provoked(folded).unwrap());
    }
}
