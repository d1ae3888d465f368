//! Business response codes carried in the `code` field of every envelope.

use serde::{Serialize, Serializer};

/// Business outcome code. The HTTP status is always 200; callers read this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResponseCode {
    /// The operation succeeded.
    Success,
    /// Malformed or missing input.
    InvalidParams,
    /// A referenced collection, folder or request does not exist.
    NotFound,
    /// The store or the server failed.
    ServerError,
}

impl ResponseCode {
    /// Numeric value written to the wire.
    pub fn as_i32(self) -> i32 {
        match self {
            Self::Success => 200,
            Self::InvalidParams => 400,
            Self::NotFound => 404,
            Self::ServerError => 500,
        }
    }

    /// Generic user-facing message for the code.
    pub fn message(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::InvalidParams => "invalid request parameters",
            Self::NotFound => "resource not found",
            Self::ServerError => "internal server error",
        }
    }
}

impl Serialize for ResponseCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i32(self.as_i32())
    }
}
