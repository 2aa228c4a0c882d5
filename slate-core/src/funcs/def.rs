//! Function Definitions
//!
//! A [`FuncDef`] is one concrete signature of a named operation: the
//! argument kinds it accepts, the arity bounds, and a builder that wires
//! the node subtree once the arguments have been adapted. Matching is
//! separate from building so a [`super::FuncGroup`] can score every
//! definition before committing to one.

use crate::data::DataType;
use crate::error::{Error, Result};
use crate::graph::{Graph, NodeId};
use crate::nodes;

/// The kind of node a function argument slot accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgKind {
    /// A value-bearing node of the given type.
    Value(DataType),
    /// A trigger node. Triggers admit no implicit casts.
    Trigger,
}

impl ArgKind {
    /// The kind of an existing node.
    pub fn of(graph: &Graph, id: NodeId) -> Result<ArgKind> {
        Ok(match graph.node(id)?.state().data_type() {
            Some(ty) => ArgKind::Value(ty),
            None => ArgKind::Trigger,
        })
    }

    /// Number of implicit casts needed to pass an `actual` argument into
    /// this slot: zero for an exact match, one for an implicit
    /// promotion, `None` when the argument is inadmissible.
    fn accepts(&self, actual: ArgKind) -> Option<u32> {
        match (*self, actual) {
            (ArgKind::Trigger, ArgKind::Trigger) => Some(0),
            (ArgKind::Value(want), ArgKind::Value(have)) if want == have => Some(0),
            (ArgKind::Value(want), ArgKind::Value(have)) if have.implicit_casts_to(want) => {
                Some(1)
            }
            _ => None,
        }
    }

    fn name(&self) -> &'static str {
        match self {
            ArgKind::Value(ty) => ty.name(),
            ArgKind::Trigger => "trigger",
        }
    }
}

/// How well a definition fits a concrete argument list. Lower is better;
/// ties are broken by registration order in the group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct MatchScore {
    /// Total implicit casts the definition would insert.
    pub casts: u32,
}

/// Wires the node subtree for a definition once arguments are adapted.
pub type Builder = Box<dyn Fn(&mut Graph, &[NodeId]) -> Result<NodeId>>;

/// One overload of a named operation.
pub struct FuncDef {
    name: &'static str,
    args: Vec<ArgKind>,
    min_args: usize,
    max_args: usize,
    /// The last declared slot accepts any number of further arguments.
    repeat_last: bool,
    /// With exactly one argument, return it directly (or its implicit
    /// cast) instead of building a node around it.
    passthrough_one: bool,
    /// Require at least one argument to match its slot without a cast,
    /// so promotion alone cannot select this definition.
    needs_one_no_cast: bool,
    builder: Builder,
}

impl FuncDef {
    /// A fixed-arity definition.
    pub fn fixed(name: &'static str, args: Vec<ArgKind>, builder: Builder) -> Self {
        let arity = args.len();
        FuncDef {
            name,
            args,
            min_args: arity,
            max_args: arity,
            repeat_last: false,
            passthrough_one: false,
            needs_one_no_cast: false,
            builder,
        }
    }

    /// A variadic definition: `args` lists the leading slots and the last
    /// one repeats up to `max_args`.
    pub fn variadic(
        name: &'static str,
        args: Vec<ArgKind>,
        min_args: usize,
        max_args: usize,
        builder: Builder,
    ) -> Self {
        FuncDef {
            name,
            args,
            min_args,
            max_args,
            repeat_last: true,
            passthrough_one: false,
            needs_one_no_cast: false,
            builder,
        }
    }

    /// Enable single-argument pass-through.
    pub fn passthrough_one(mut self) -> Self {
        self.passthrough_one = true;
        self
    }

    /// Require one cast-free argument for the definition to match.
    pub fn needs_one_no_cast(mut self) -> Self {
        self.needs_one_no_cast = true;
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The slot an argument at `index` binds to.
    fn slot(&self, index: usize) -> Option<ArgKind> {
        if index < self.args.len() {
            self.args.get(index).copied()
        } else if self.repeat_last {
            self.args.last().copied()
        } else {
            None
        }
    }

    /// Score this definition against a concrete argument list, or `None`
    /// when it cannot accept it.
    pub fn matches(&self, graph: &Graph, args: &[NodeId]) -> Result<Option<MatchScore>> {
        if args.len() < self.min_args || args.len() > self.max_args {
            return Ok(None);
        }
        let mut casts = 0;
        let mut any_exact = args.is_empty();
        for (index, &arg) in args.iter().enumerate() {
            let Some(slot) = self.slot(index) else {
                return Ok(None);
            };
            match slot.accepts(ArgKind::of(graph, arg)?) {
                Some(0) => any_exact = true,
                Some(n) => casts += n,
                None => return Ok(None),
            }
        }
        if self.needs_one_no_cast && !any_exact {
            return Ok(None);
        }
        Ok(Some(MatchScore { casts }))
    }

    /// Build the subtree for a matched argument list, inserting implicit
    /// cast nodes where the slots require them.
    pub fn build(&self, graph: &mut Graph, args: &[NodeId]) -> Result<NodeId> {
        if self.passthrough_one && args.len() == 1 {
            if let Some(slot) = self.slot(0) {
                match slot.accepts(ArgKind::of(graph, args[0])?) {
                    Some(0) => return Ok(args[0]),
                    Some(_) => {
                        // A promoted lone argument becomes just the cast
                        // node, with no reducer wrapped around it.
                        if let ArgKind::Value(want) = slot {
                            return nodes::cast_implicit(graph, want, args[0]);
                        }
                    }
                    None => {}
                }
            }
        }
        let mut adapted = Vec::with_capacity(args.len());
        for (index, &arg) in args.iter().enumerate() {
            let actual = ArgKind::of(graph, arg)?;
            let Some(slot) = self.slot(index) else {
                return Err(self.cast_error(index, actual, ArgKind::Trigger));
            };
            if slot.accepts(actual) == Some(0) {
                adapted.push(arg);
            } else if let (ArgKind::Value(want), ArgKind::Value(_)) = (slot, actual) {
                adapted.push(nodes::cast_implicit(graph, want, arg)?);
            } else {
                return Err(self.cast_error(index, actual, slot));
            }
        }
        (self.builder)(graph, &adapted)
    }

    fn cast_error(&self, index: usize, actual: ArgKind, slot: ArgKind) -> Error {
        let as_type = |kind| match kind {
            ArgKind::Value(ty) => ty,
            ArgKind::Trigger => DataType::Bool,
        };
        Error::BuildCastMissing {
            name: self.name.to_string(),
            index,
            from: as_type(actual),
            to: as_type(slot),
        }
    }
}

/// Human-readable description of an argument list, for error messages.
pub fn signature_of(graph: &Graph, args: &[NodeId]) -> Result<String> {
    let mut parts = Vec::with_capacity(args.len());
    for &arg in args {
        parts.push(ArgKind::of(graph, arg)?.name());
    }
    Ok(parts.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Float, Int, Value};
    use crate::nodes::{binary, literal, trigger_input};

    fn sum_def() -> FuncDef {
        FuncDef::fixed(
            "sum",
            vec![ArgKind::Value(DataType::Int), ArgKind::Value(DataType::Int)],
            Box::new(|g, args| {
                binary(g, "Sum", args[0], args[1], |a: Int, b: Int| {
                    Int(a.0.wrapping_add(b.0))
                })
            }),
        )
    }

    #[test]
    fn exact_match_scores_zero_casts() {
        let mut g = Graph::new();
        let a = literal(&mut g, Value::Int(1));
        let b = literal(&mut g, Value::Int(2));
        let def = sum_def();
        assert_eq!(
            def.matches(&g, &[a, b]).unwrap(),
            Some(MatchScore { casts: 0 })
        );
    }

    #[test]
    fn promotion_counts_one_cast_per_argument() {
        let mut g = Graph::new();
        let a = literal(&mut g, Value::Int(1));
        let b = literal(&mut g, Value::Int(2));
        let def = FuncDef::fixed(
            "sum",
            vec![
                ArgKind::Value(DataType::Float),
                ArgKind::Value(DataType::Float),
            ],
            Box::new(|g, args| {
                binary(g, "Sum", args[0], args[1], |a: Float, b: Float| {
                    Float(a.0 + b.0)
                })
            }),
        );
        assert_eq!(
            def.matches(&g, &[a, b]).unwrap(),
            Some(MatchScore { casts: 2 })
        );

        // Building inserts the promotions.
        let node = def.build(&mut g, &[a, b]).unwrap();
        assert_eq!(g.current_value(node).unwrap(), &Value::Float(3.0));
    }

    #[test]
    fn trigger_slots_admit_no_promotion() {
        let mut g = Graph::new();
        let v = literal(&mut g, Value::Bool(true));
        let t = trigger_input(&mut g);
        let def = FuncDef::fixed(
            "any",
            vec![ArgKind::Trigger],
            Box::new(|g, args| crate::nodes::any(g, args)),
        );
        assert_eq!(def.matches(&g, &[v]).unwrap(), None);
        assert!(def.matches(&g, &[t]).unwrap().is_some());
    }

    #[test]
    fn needs_one_no_cast_rejects_all_promoted() {
        let mut g = Graph::new();
        let a = literal(&mut g, Value::Int(1));
        let def = FuncDef::fixed(
            "round",
            vec![ArgKind::Value(DataType::Float)],
            Box::new(|g, args| {
                crate::nodes::unary(g, "Round", args[0], |v: Float| Float(v.0.round()))
            }),
        )
        .needs_one_no_cast();
        assert_eq!(def.matches(&g, &[a]).unwrap(), None);
    }

    #[test]
    fn passthrough_returns_the_argument_itself() {
        let mut g = Graph::new();
        let a = literal(&mut g, Value::Int(7));
        let def = FuncDef::variadic(
            "max",
            vec![ArgKind::Value(DataType::Int)],
            1,
            usize::MAX,
            Box::new(|g, args| {
                crate::nodes::nary(g, "Max", args, |values: Vec<Int>| {
                    values.into_iter().max_by(|a, b| a.0.cmp(&b.0)).unwrap_or(Int(0))
                })
            }),
        )
        .passthrough_one();
        assert_eq!(def.build(&mut g, &[a]).unwrap(), a);
    }

    #[test]
    fn passthrough_of_a_promoted_argument_is_just_the_cast() {
        let mut g = Graph::new();
        let a = literal(&mut g, Value::Int(7));
        let def = FuncDef::variadic(
            "sum",
            vec![ArgKind::Value(DataType::Float)],
            1,
            usize::MAX,
            Box::new(|g, args| {
                crate::nodes::nary(g, "Sum", args, |values: Vec<Float>| {
                    Float(values.iter().map(|v| v.0).sum())
                })
            }),
        )
        .passthrough_one();

        let before = g.len();
        let node = def.build(&mut g, &[a]).unwrap();
        assert_eq!(g.len() - before, 1);
        assert_eq!(g.node(node).unwrap().label(), "Implicit");
        assert!(g.node(node).unwrap().parents().contains(a));
        assert_eq!(g.current_value(node).unwrap(), &Value::Float(7.0));
    }
}
