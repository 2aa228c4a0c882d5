//! Node Graph Model
//!
//! This module implements the dependency graph every other component
//! builds on.
//!
//! # Overview
//!
//! The graph is a directed acyclic graph (DAG) where:
//!
//! - Nodes hold either a typed value or a one-shot trigger flag
//! - Edges run from parents (the nodes read from) to children (the nodes
//!   that recompute from them)
//!
//! Every node carries a depth: 0 for parentless nodes, otherwise one more
//! than its deepest parent. The scheduler evaluates pending nodes in
//! non-decreasing depth order, which is the acyclic-graph analogue of a
//! topological order: a node's parents always settle before it does.
//!
//! # Design Decisions
//!
//! 1. A centralized arena (`Graph`) owns every node, addressed by integer
//!    id. Parents and children are non-owning id lists, which sidesteps
//!    ownership cycles between the two edge directions.
//!
//! 2. Both edge directions are maintained: parent slots drive evaluation
//!    and the cycle check; child back-references drive propagation and
//!    depth renormalization.
//!
//! 3. Structural mutations that would introduce a cycle are rejected
//!    before any part of the edit is applied.

mod node;
mod store;

pub use node::{
    Behavior, Node, NodeId, NodeState, NodeSummary, ParentSignal, Parents, TriggerRule, ValueRule,
};
pub use store::Graph;
