//! Tree-based (DOM) decoding for parsely.
//!
//! Decoding runs in two phases:
//!
//! 1. The [`TreeBuilder`] drains a [`DomParser`] into a [`Document`]: a tree
//!    of [`Node`]s where repeated sibling tags collapse into sequences and
//!    empty elements are dropped.
//! 2. The decode engine walks that tree guided by a
//!    [`Shape`](parsely_core::Shape), coercing scalars and checking
//!    structure, and produces a [`Value`](parsely_core::Value) or the first
//!    failure.
//!
//! Format crates implement [`DomParser`]; `parsely-xml` does so for XML.

#![deny(missing_docs, rustdoc::broken_intra_doc_links)]

mod builder;
mod deserializer;
mod error;
mod event;
mod node;
mod observer;
mod options;
mod parser;
mod tracing_macros;

pub use builder::*;
pub use deserializer::*;
pub use error::*;
pub use event::*;
pub use node::*;
pub use observer::*;
pub use options::*;
pub use parser::*;
