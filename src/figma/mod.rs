// Figma API module.
// Provides the client, endpoint seam, and types for the Figma REST API.

pub mod client;
pub mod endpoints;
pub mod types;

use std::future::Future;

use crate::error::Result;

pub use client::FigmaClient;
pub use types::*;

/// Read operations the fetcher needs from the remote API.
pub trait FigmaApi: Send + Sync + 'static {
    /// `GET /teams/{team_id}/projects`
    fn team_projects(&self, team_id: &str) -> impl Future<Output = Result<TeamProjects>> + Send;

    /// `GET /projects/{project_id}/files`
    fn project_files(&self, project_id: &str) -> impl Future<Output = Result<Vec<File>>> + Send;

    /// `GET /files/{file_key}?depth=1`, returning the document root.
    fn file_document(&self, file_key: &str) -> impl Future<Output = Result<Node>> + Send;
}
