//! Workspace module

mod api;
mod models;

pub use api::index_by_name;
pub use models::{
    RelationshipData, RelationshipId, Workspace, WorkspaceAttributes, WorkspacePermissions,
};
