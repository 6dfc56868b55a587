//! State version module - newest state version metadata

mod api;
mod models;

pub use models::{StateVersion, StateVersionAttributes, StateVersionReport};
