//! Petling Server - SpacetimeDB Module
//!
//! Pet engagement engine running as a SpacetimeDB module. All mutation
//! happens in reducers; clients are thin views over the public tables.

mod reducers;
mod tables;

pub use reducers::*;
pub use tables::*;
