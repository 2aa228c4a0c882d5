//! Error Types
//!
//! Every fallible operation in the engine surfaces one of three error
//! families:
//!
//! - Graph integrity: a structural edit would close a cycle or address a
//!   parent slot that does not exist. These are raised before any partial
//!   mutation is applied.
//! - Type mismatch: overload resolution found no applicable definition, a
//!   cast was requested between incompatible types, or an input was set to
//!   a value of the wrong runtime type.
//! - Lookup failure: a name is unbound, or bound to something other than
//!   what the caller asked for.
//!
//! Each variant carries enough structured context (node ids, names,
//! expected vs. found types) for the caller to build an actionable message.

use thiserror::Error;

use crate::data::DataType;
use crate::graph::NodeId;

/// Errors raised by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Adding the edge would make the node (transitively) its own parent.
    #[error("adding child {child} to node {parent} would close a cycle")]
    CycleDetected { parent: NodeId, child: NodeId },

    /// A node id did not resolve to a node in the graph.
    #[error("node {node} does not exist in this graph")]
    UnknownNode { node: NodeId },

    /// No implicit promotion is declared between the two types.
    #[error("no implicit cast from {from} to {to}")]
    NoImplicitCast { from: DataType, to: DataType },

    /// No cast at all, implicit or explicit, exists between the two types.
    #[error("no explicit cast from {from} to {to}")]
    NoExplicitCast { from: DataType, to: DataType },

    /// A value of the wrong runtime type was offered to a node.
    #[error("node {node} holds {found}, expected {expected}")]
    ValueTypeMismatch {
        node: NodeId,
        expected: DataType,
        found: DataType,
    },

    /// The node does not carry a value (it is a trigger).
    #[error("node {node} is not a value-bearing node")]
    NotAValueNode { node: NodeId },

    /// The node does not carry a provoked flag (it is value-bearing).
    #[error("node {node} is not a trigger node")]
    NotATriggerNode { node: NodeId },

    /// The node is derived; only leaf inputs may be mutated directly.
    #[error("node {node} is not an input node")]
    NotAnInput { node: NodeId },

    /// `replace_parent` was asked to swap in a node of a different kind.
    #[error(
        "cannot replace parent {old} with {new} on node {child}: incompatible node kinds"
    )]
    IncompatibleReplacement {
        child: NodeId,
        old: NodeId,
        new: NodeId,
    },

    /// No registered definition under the name accepts the argument types.
    #[error("no overload of `{name}` accepts ({signature})")]
    NoOverload { name: String, signature: String },

    /// A matched definition required a cast that does not actually exist.
    /// `match` guarantees castability, so hitting this is an internal
    /// inconsistency in the definition's declared argument types.
    #[error(
        "building `{name}`: argument {index} cannot be implicitly cast from {from} to {to}"
    )]
    BuildCastMissing {
        name: String,
        index: usize,
        from: DataType,
        to: DataType,
    },

    /// The name is not bound in the namespace.
    #[error("`{name}` is not bound")]
    NameNotFound { name: String },

    /// The name resolved, but to the wrong kind of binding.
    #[error("`{name}` is bound to {found}, expected {expected}")]
    WrongBinding {
        name: String,
        expected: &'static str,
        found: &'static str,
    },
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
