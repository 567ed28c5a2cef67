/*!
A non-validating, standalone implementation of the W3C DOM Level 3 Core and
Load-Save recommendations: a node tree, a hand-rolled XML parser, and a
configurable serializer, with no dependency on an external XML validator or
a wrapped C library.

More Information:

* [Document Object Model (DOM) Level 3 Core Specification](https://www.w3.org/TR/DOM-Level-3-Core/)
* [Document Object Model (DOM) Level 3 Load and Save Specification](https://www.w3.org/TR/DOM-Level-3-LS/)

*/

#![warn(
    missing_debug_implementations,
    missing_docs,
    unused_extern_crates,
    rust_2018_idioms
)]
#![allow(clippy::large_enum_variant)]

#[macro_use]
extern crate tracing;

// ------------------------------------------------------------------------------------------------
// Modules
// ------------------------------------------------------------------------------------------------

mod syntax;

pub mod error;

mod rc_cell;

pub mod name;

pub mod config;

pub mod node;

pub mod convert;

pub mod tree;

pub mod dom_impl;

pub mod parser;

pub mod serializer;

pub use dom_impl::{get_implementation, get_implementation_version};
pub use tree::namespaced::Namespaced;
