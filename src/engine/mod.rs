//! Engine - view index registry.
//!
//! Views are identified by a small integer index. Focus and other
//! thread-local state is keyed by it; string ids map onto indices.

mod registry;

pub use registry::*;
