//! Just enough JSON-LD
//!
//! Documents are read either in compacted or in expanded form, against a
//! fixed vocabulary. Remote contexts are never fetched.

mod node;
pub(crate) mod vocab;

pub(crate) use node::{Form, Node};
