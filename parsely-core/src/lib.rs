//! Core vocabulary for parsely: scalar kinds and their coercion rules, shape
//! descriptors, dynamic values, field paths, and the decode error taxonomy.
//!
//! Format crates (like `parsely-xml`) and the tree decoder in `parsely-dom`
//! build on these types; most users only touch [`Shape`], [`Value`] and
//! [`FromValue`].

#![deny(missing_docs, rustdoc::broken_intra_doc_links)]

mod error;
mod from_value;
mod path;
mod scalar;
mod shape;
mod value;

pub use error::*;
pub use from_value::*;
pub use path::*;
pub use scalar::*;
pub use shape::*;
pub use value::*;
