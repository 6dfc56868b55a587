//! Runs module

mod api;
mod models;

pub use models::{
    Milestone, Run, RunAttributes, RunRelationships, RunStatus, StatusTimestamps,
};
