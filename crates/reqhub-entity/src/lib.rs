//! # reqhub-entity
//!
//! Entity models for ReqHub. Every struct here is either a table row
//! (deriving `sqlx::FromRow`) or a value object used in responses. The
//! closure propagation rule and the tree node shapes also live here so
//! that every store backend and the assembler agree on them.

pub mod collection;
pub mod folder;
pub mod protocol;
pub mod request;
