//! Evaluation Scheduler
//!
//! The [`Driver`] owns a [`Graph`] plus the root [`Namespace`] of names
//! visible to callers, and runs the incremental evaluation loop:
//!
//! 1. Mutating an input (or touching a node directly) inserts the
//!    affected nodes into a pending set kept sorted by depth, duplicate
//!    free.
//! 2. [`Driver::evaluate`] drains the set in non-decreasing depth order.
//!    Each visited node re-runs its rule; only when its value changed
//!    (or its trigger fired) are its children queued in turn, so
//!    unaffected regions of the graph are never visited.
//! 3. Every trigger observed provoked during the pass, including input
//!    triggers provoked directly, is reset once the set drains. Provoked
//!    is a statement about one pass, never a persistent value.
//!
//! Because parents are always shallower than their children, a node is
//! visited at most once per pass and sees only settled parent values.
//!
//! [`Driver::call`] resolves a named function group against argument
//! nodes, builds the subtree, and constant-folds the newly created
//! nodes before handing the root back.

use indexmap::IndexMap;
use smallvec::SmallVec;

use crate::data::{DataType, Value};
use crate::error::{Error, Result};
use crate::fold;
use crate::funcs::{builtin, FuncGroup};
use crate::graph::{Graph, NodeId};
use crate::nodes;

/// What a name in the namespace resolves to.
pub enum Binding {
    /// A node in the graph.
    Node(NodeId),
    /// A group of function overloads.
    Funcs(FuncGroup),
}

impl Binding {
    fn kind(&self) -> &'static str {
        match self {
            Binding::Node(_) => "a node",
            Binding::Funcs(_) => "a function group",
        }
    }
}

/// The root scope mapping caller-visible names to bindings.
#[derive(Default)]
pub struct Namespace {
    bindings: IndexMap<String, Binding>,
}

impl Namespace {
    /// Bind a name to a node, replacing any previous binding.
    pub fn define(&mut self, name: impl Into<String>, id: NodeId) {
        self.bindings.insert(name.into(), Binding::Node(id));
    }

    /// Bind a function group under its own name.
    pub fn define_group(&mut self, group: FuncGroup) {
        self.bindings
            .insert(group.name().to_string(), Binding::Funcs(group));
    }

    /// Resolve a name to a node.
    pub fn node(&self, name: &str) -> Result<NodeId> {
        match self.bindings.get(name) {
            Some(Binding::Node(id)) => Ok(*id),
            Some(other) => Err(Error::WrongBinding {
                name: name.to_string(),
                expected: "a node",
                found: other.kind(),
            }),
            None => Err(Error::NameNotFound {
                name: name.to_string(),
            }),
        }
    }

    /// Resolve a name to a function group.
    pub fn group(&self, name: &str) -> Result<&FuncGroup> {
        match self.bindings.get(name) {
            Some(Binding::Funcs(group)) => Ok(group),
            Some(other) => Err(Error::WrongBinding {
                name: name.to_string(),
                expected: "a function group",
                found: other.kind(),
            }),
            None => Err(Error::NameNotFound {
                name: name.to_string(),
            }),
        }
    }

    /// Iterate bound names in definition order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.bindings.keys().map(String::as_str)
    }
}

/// Observer for one evaluation pass. All methods default to no-ops so
/// implementors override only what they record.
pub trait EvalTrace {
    /// The pending set at the start of the pass, in visit order.
    fn start(&mut self, _pending: &[NodeId]) {}

    /// A node was visited, with whether it changed (or fired).
    fn visited(&mut self, _node: NodeId, _changed: bool) {}

    /// The triggers reset at the end of the pass.
    fn finish(&mut self, _reset: &[NodeId]) {}
}

/// The engine facade: graph, namespace, and the pending evaluation set.
pub struct Driver {
    graph: Graph,
    names: Namespace,
    /// Sorted by (depth, id), duplicate free.
    touched: Vec<NodeId>,
    /// Input triggers provoked since the last pass, in provoke order.
    provoked_inputs: Vec<NodeId>,
}

impl Default for Driver {
    fn default() -> Self {
        Self::new()
    }
}

impl Driver {
    /// A driver with the builtin functions and constants installed.
    pub fn new() -> Self {
        let mut graph = Graph::new();
        let mut names = Namespace::default();
        for group in builtin::catalog() {
            names.define_group(group);
        }
        for (name, value) in builtin::constants() {
            names.define(name, nodes::literal(&mut graph, value));
        }
        Driver {
            graph,
            names,
            touched: Vec::new(),
            provoked_inputs: Vec::new(),
        }
    }

    /// A driver with an empty namespace.
    pub fn bare() -> Self {
        Driver {
            graph: Graph::new(),
            names: Namespace::default(),
            touched: Vec::new(),
            provoked_inputs: Vec::new(),
        }
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn graph_mut(&mut self) -> &mut Graph {
        &mut self.graph
    }

    pub fn namespace(&self) -> &Namespace {
        &self.names
    }

    /// Resolve a bound node name.
    pub fn node(&self, name: &str) -> Result<NodeId> {
        self.names.node(name)
    }

    /// Bind a name to an existing node.
    pub fn define(&mut self, name: impl Into<String>, id: NodeId) {
        self.names.define(name, id);
    }

    /// Create and bind a value input of the given type.
    pub fn define_value_input(&mut self, name: impl Into<String>, ty: DataType) -> NodeId {
        let id = nodes::value_input(&mut self.graph, ty);
        self.names.define(name, id);
        id
    }

    /// Create and bind an input trigger.
    pub fn define_trigger_input(&mut self, name: impl Into<String>) -> NodeId {
        let id = nodes::trigger_input(&mut self.graph);
        self.names.define(name, id);
        id
    }

    /// Create and bind a literal.
    pub fn define_literal(&mut self, name: impl Into<String>, value: Value) -> NodeId {
        let id = nodes::literal(&mut self.graph, value);
        self.names.define(name, id);
        id
    }

    /// Resolve a named function group against argument nodes, build the
    /// subtree, and constant-fold the nodes the build created. Returns
    /// the subtree root (or the literal it folded to).
    pub fn call(&mut self, name: &str, args: &[NodeId]) -> Result<NodeId> {
        let checkpoint = self.graph.checkpoint();
        let built = self.names.group(name)?.build(&mut self.graph, args)?;
        fold::fold_constants(&mut self.graph, built, checkpoint)
    }

    /// Set a named value input. On change the input's children are
    /// queued for the next pass. Returns whether the value changed.
    pub fn set_value(&mut self, name: &str, value: Value) -> Result<bool> {
        let id = self.names.node(name)?;
        let changed = self.graph.set_input_value(id, value)?;
        if changed {
            self.touch_children(id)?;
        }
        Ok(changed)
    }

    /// Provoke (or with `false`, retract) a named input trigger before a
    /// pass. Returns whether the flag changed.
    pub fn provoke(&mut self, name: &str, provoked: bool) -> Result<bool> {
        let id = self.names.node(name)?;
        let changed = self.graph.provoke_input(id, provoked)?;
        if changed {
            if provoked {
                if !self.provoked_inputs.contains(&id) {
                    self.provoked_inputs.push(id);
                }
            } else {
                self.provoked_inputs.retain(|p| *p != id);
            }
            self.touch_children(id)?;
        }
        Ok(changed)
    }

    /// The current value of a named node.
    pub fn value_of(&self, name: &str) -> Result<&Value> {
        self.graph.current_value(self.names.node(name)?)
    }

    /// The provoked flag of a named trigger.
    pub fn provoked(&self, name: &str) -> Result<bool> {
        self.graph.is_provoked(self.names.node(name)?)
    }

    pub fn set_bool(&mut self, name: &str, value: bool) -> Result<bool> {
        self.set_value(name, Value::Bool(value))
    }

    pub fn set_int(&mut self, name: &str, value: i64) -> Result<bool> {
        self.set_value(name, Value::Int(value))
    }

    pub fn set_float(&mut self, name: &str, value: f64) -> Result<bool> {
        self.set_value(name, Value::Float(value))
    }

    pub fn set_str(&mut self, name: &str, value: impl Into<String>) -> Result<bool> {
        self.set_value(name, Value::Str(value.into()))
    }

    pub fn get_bool(&self, name: &str) -> Result<bool> {
        match self.value_of(name)? {
            Value::Bool(v) => Ok(*v),
            other => Err(self.type_error(name, DataType::Bool, other)),
        }
    }

    pub fn get_int(&self, name: &str) -> Result<i64> {
        match self.value_of(name)? {
            Value::Int(v) => Ok(*v),
            other => Err(self.type_error(name, DataType::Int, other)),
        }
    }

    pub fn get_float(&self, name: &str) -> Result<f64> {
        match self.value_of(name)? {
            Value::Float(v) => Ok(*v),
            other => Err(self.type_error(name, DataType::Float, other)),
        }
    }

    pub fn get_str(&self, name: &str) -> Result<String> {
        match self.value_of(name)? {
            Value::Str(v) => Ok(v.clone()),
            other => Err(self.type_error(name, DataType::Str, other)),
        }
    }

    fn type_error(&self, name: &str, expected: DataType, found: &Value) -> Error {
        // The name resolved or value_of would have failed already.
        let node = self.names.node(name).unwrap_or(NodeId(0));
        Error::ValueTypeMismatch {
            node,
            expected,
            found: found.data_type(),
        }
    }

    /// Queue a node for the next pass regardless of input changes.
    pub fn touch(&mut self, id: NodeId) -> Result<()> {
        self.graph.node(id)?;
        self.graph.sort_insert(&mut self.touched, id);
        Ok(())
    }

    fn touch_children(&mut self, id: NodeId) -> Result<()> {
        let children: SmallVec<[NodeId; 4]> =
            self.graph.node(id)?.children().iter().copied().collect();
        for child in children {
            self.graph.sort_insert(&mut self.touched, child);
        }
        Ok(())
    }

    /// Whether a pass would visit anything.
    pub fn has_pending(&self) -> bool {
        !self.touched.is_empty() || !self.provoked_inputs.is_empty()
    }

    /// Drain the pending set in non-decreasing depth order, then reset
    /// every trigger observed provoked during the pass. With nothing
    /// pending this is a no-op.
    pub fn evaluate(&mut self, mut trace: Option<&mut dyn EvalTrace>) -> Result<()> {
        if !self.has_pending() {
            return Ok(());
        }
        if let Some(t) = trace.as_deref_mut() {
            t.start(&self.touched);
        }
        tracing::debug!(pending = self.touched.len(), "evaluation pass");

        let mut needs_reset = std::mem::take(&mut self.provoked_inputs);
        while !self.touched.is_empty() {
            let id = self.touched.remove(0);
            let changed = self.graph.evaluate_node(id)?;
            if let Some(t) = trace.as_deref_mut() {
                t.visited(id, changed);
            }
            if !changed {
                continue;
            }
            if self.graph.node(id)?.state().is_trigger() {
                needs_reset.push(id);
            }
            self.touch_children(id)?;
        }

        for id in &needs_reset {
            self.graph.reset_trigger(*id)?;
        }
        if let Some(t) = trace.as_deref_mut() {
            t.finish(&needs_reset);
        }
        tracing::debug!(reset = needs_reset.len(), "pass complete");
        Ok(())
    }
}
