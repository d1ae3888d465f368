//! Core type definitions used across the ReqHub workspace.

pub mod id;
pub mod response;

pub use id::*;
pub use response::ResponseCode;
