//! Function Resolution
//!
//! Named operations are collections of typed overloads. Resolution picks
//! the definition with the fewest implicit casts for the concrete
//! argument nodes, inserts the cast nodes it needs, and delegates node
//! construction to the winning definition's builder.

pub mod builtin;
pub mod def;
pub mod group;

pub use def::{ArgKind, Builder, FuncDef, MatchScore};
pub use group::FuncGroup;
