//! Protocol and method enumerations shared by collections and requests.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use reqhub_core::AppError;

/// Wire protocol of a collection or request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "request_protocol")]
pub enum Protocol {
    /// Plain HTTP.
    #[default]
    #[sqlx(rename = "HTTP")]
    #[serde(rename = "HTTP")]
    Http,
    /// WebSocket.
    #[sqlx(rename = "WebSocket")]
    #[serde(rename = "WebSocket")]
    WebSocket,
    /// gRPC.
    #[sqlx(rename = "gRPC")]
    #[serde(rename = "gRPC")]
    Grpc,
}

impl Protocol {
    /// Canonical spelling.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Http => "HTTP",
            Self::WebSocket => "WebSocket",
            Self::Grpc => "gRPC",
        }
    }

    /// Lenient parse used for collections: unknown or empty input is HTTP.
    pub fn parse_or_default(s: &str) -> Self {
        s.parse().unwrap_or_default()
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Protocol {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "http" => Ok(Self::Http),
            "websocket" => Ok(Self::WebSocket),
            "grpc" => Ok(Self::Grpc),
            _ => Err(AppError::validation(format!(
                "Invalid protocol: '{s}'. Expected one of: HTTP, WebSocket, gRPC"
            ))),
        }
    }
}

/// HTTP method of a request definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "request_method", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    /// GET.
    Get,
    /// POST.
    Post,
    /// PUT.
    Put,
    /// DELETE.
    Delete,
}

impl Method {
    /// Canonical spelling.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Method {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(Self::Get),
            "POST" => Ok(Self::Post),
            "PUT" => Ok(Self::Put),
            "DELETE" => Ok(Self::Delete),
            _ => Err(AppError::validation(format!(
                "Invalid method: '{s}'. Expected one of: GET, POST, PUT, DELETE"
            ))),
        }
    }
}
