//! Overload Groups
//!
//! A [`FuncGroup`] holds every definition registered under one name and
//! resolves calls to the definition needing the fewest implicit casts.
//! Ties go to the earliest-registered definition, so registration order
//! is part of a group's contract.

use crate::error::{Error, Result};
use crate::graph::{Graph, NodeId};

use super::def::{signature_of, FuncDef, MatchScore};

/// A named collection of function overloads.
pub struct FuncGroup {
    name: &'static str,
    defs: Vec<FuncDef>,
}

impl FuncGroup {
    pub fn new(name: &'static str) -> Self {
        FuncGroup {
            name,
            defs: Vec::new(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Append a definition. Later registrations lose ties.
    pub fn register(&mut self, def: FuncDef) -> &mut Self {
        self.defs.push(def);
        self
    }

    /// The best-scoring definition for the argument list, if any accepts
    /// it.
    pub fn find_best(&self, graph: &Graph, args: &[NodeId]) -> Result<Option<&FuncDef>> {
        let mut best: Option<(MatchScore, &FuncDef)> = None;
        for def in &self.defs {
            if let Some(score) = def.matches(graph, args)? {
                // Strictly-better only, so the earliest registration
                // keeps a tied score.
                if best.map_or(true, |(b, _)| score < b) {
                    best = Some((score, def));
                }
            }
        }
        Ok(best.map(|(_, def)| def))
    }

    /// Resolve and build in one step.
    pub fn build(&self, graph: &mut Graph, args: &[NodeId]) -> Result<NodeId> {
        match self.find_best(graph, args)? {
            Some(def) => {
                tracing::debug!(name = self.name, args = args.len(), "resolved overload");
                def.build(graph, args)
            }
            None => Err(Error::NoOverload {
                name: self.name.to_string(),
                signature: signature_of(graph, args)?,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{DataType, Float, Int, Value};
    use crate::funcs::def::ArgKind;
    use crate::nodes::{binary, literal};

    fn sum_group() -> FuncGroup {
        let mut group = FuncGroup::new("sum");
        group.register(FuncDef::fixed(
            "sum",
            vec![ArgKind::Value(DataType::Int), ArgKind::Value(DataType::Int)],
            Box::new(|g, args| {
                binary(g, "Sum", args[0], args[1], |a: Int, b: Int| {
                    Int(a.0.wrapping_add(b.0))
                })
            }),
        ));
        group.register(FuncDef::fixed(
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
        ));
        group
    }

    #[test]
    fn exact_overload_beats_promoted_one() {
        let mut g = Graph::new();
        let a = literal(&mut g, Value::Int(1));
        let b = literal(&mut g, Value::Int(2));
        let node = sum_group().build(&mut g, &[a, b]).unwrap();
        assert_eq!(g.current_value(node).unwrap(), &Value::Int(3));
    }

    #[test]
    fn mixed_arguments_promote_to_float() {
        let mut g = Graph::new();
        let a = literal(&mut g, Value::Int(1));
        let b = literal(&mut g, Value::Float(2.5));
        let node = sum_group().build(&mut g, &[a, b]).unwrap();
        assert_eq!(g.current_value(node).unwrap(), &Value::Float(3.5));
    }

    #[test]
    fn unresolvable_call_names_the_signature() {
        let mut g = Graph::new();
        let a = literal(&mut g, Value::Str("x".into()));
        let b = literal(&mut g, Value::Int(2));
        let err = sum_group().build(&mut g, &[a, b]).unwrap_err();
        assert_eq!(
            err,
            Error::NoOverload {
                name: "sum".into(),
                signature: "string, int".into()
            }
        );
    }
}
