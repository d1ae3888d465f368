//! Request definition entities.

pub mod model;

pub use model::{
    CreateRequest, DEFAULT_REQUEST_NAME, REQUEST_NAME_MAX_CHARS, REQUEST_PATH_MAX_CHARS, Request,
};
