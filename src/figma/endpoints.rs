// Figma API endpoint functions.
// Typed calls for the team, project, and file endpoints.

use crate::error::Result;

use super::FigmaApi;
use super::client::FigmaClient;
use super::types::{File, FileDetail, Node, ProjectFilesResponse, TeamProjects};

impl FigmaClient {
    /// Get the projects of a team.
    pub async fn get_team_projects(&self, team_id: &str) -> Result<TeamProjects> {
        let response = self.get(&format!("/teams/{}/projects", team_id)).await?;
        Self::json(response).await
    }

    /// Get the files of a project.
    pub async fn get_project_files(&self, project_id: &str) -> Result<Vec<File>> {
        let response = self.get(&format!("/projects/{}/files", project_id)).await?;
        let wrapper: ProjectFilesResponse = Self::json(response).await?;
        Ok(wrapper.files)
    }

    /// Get a file's document tree, one level deep.
    pub async fn get_file_document(&self, file_key: &str) -> Result<Node> {
        let params = [("depth", "1")];
        let response = self
            .get_with_params(&format!("/files/{}", file_key), &params)
            .await?;
        let detail: FileDetail = Self::json(response).await?;
        Ok(detail.document)
    }
}

impl FigmaApi for FigmaClient {
    async fn team_projects(&self, team_id: &str) -> Result<TeamProjects> {
        self.get_team_projects(team_id).await
    }

    async fn project_files(&self, project_id: &str) -> Result<Vec<File>> {
        self.get_project_files(project_id).await
    }

    async fn file_document(&self, file_key: &str) -> Result<Node> {
        self.get_file_document(file_key).await
    }
}
