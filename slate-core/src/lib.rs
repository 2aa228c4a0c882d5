//! Slate Core
//!
//! This crate provides the core runtime for the Slate reactive
//! computation engine. It implements:
//!
//! - A typed dependency graph of value and trigger nodes
//! - Depth-ordered incremental evaluation with change short-circuiting
//! - Capability-based data types with implicit and explicit casts
//! - Function overload resolution with a builtin operator catalog
//! - Constant folding over newly built subtrees
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - `data`: Concrete data types and the capability traits over them
//! - `graph`: The node arena, structural edits, and depth maintenance
//! - `nodes`: Typed constructors for value and trigger nodes
//! - `funcs`: Overload definitions, resolution, and the builtin catalog
//! - `fold`: The constant folder applied after builds
//! - `driver`: The namespace, pending set, and evaluation loop
//!
//! # Example
//!
//! ```rust
//! use slate_core::{DataType, Driver};
//!
//! let mut driver = Driver::new();
//!
//! // Wire total = a + b over two named integer inputs.
//! let a = driver.define_value_input("a", DataType::Int);
//! let b = driver.define_value_input("b", DataType::Int);
//! let total = driver.call("sum", &[a, b]).unwrap();
//! driver.define("total", total);
//!
//! // Change the inputs, then run one evaluation pass.
//! driver.set_int("a", 3).unwrap();
//! driver.set_int("b", 4).unwrap();
//! driver.evaluate(None).unwrap();
//! assert_eq!(driver.get_int("total").unwrap(), 7);
//! ```

pub mod data;
pub mod driver;
pub mod error;
pub mod fold;
pub mod funcs;
pub mod graph;
pub mod nodes;

pub use data::{DataType, Value};
pub use driver::{Driver, EvalTrace, Namespace};
pub use error::{Error, Result};
pub use graph::{Graph, NodeId};
