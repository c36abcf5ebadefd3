// Remote fetcher.
// Chains the team, project, and file requests, degrading every failure to an
// empty result plus a notification.

use std::sync::Arc;

use futures::future::join_all;
use tracing::{error, info};

use crate::figma::{FigmaApi, File, Node, Project, ProjectFiles, TeamProjects};
use crate::notify::{NotificationSink, Toast};

/// Result of a fetch that may have fallen back to a placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fetched<T> {
    pub value: T,
    /// The request failed and `value` is an empty stand-in.
    pub degraded: bool,
}

impl<T> Fetched<T> {
    fn ok(value: T) -> Self {
        Self {
            value,
            degraded: false,
        }
    }

    fn degraded(value: T) -> Self {
        Self {
            value,
            degraded: true,
        }
    }
}

/// Fetches listings for one team. Every operation always yields a value.
pub struct Fetcher<A, N> {
    api: Arc<A>,
    notifier: Arc<N>,
    team_id: String,
}

impl<A: FigmaApi, N: NotificationSink> Fetcher<A, N> {
    pub fn new(api: Arc<A>, notifier: Arc<N>, team_id: impl Into<String>) -> Self {
        Self {
            api,
            notifier,
            team_id: team_id.into(),
        }
    }

    /// Fetch the team's projects, or an empty "No team found" team.
    pub async fn fetch_team(&self) -> TeamProjects {
        self.load_team().await.value
    }

    async fn load_team(&self) -> Fetched<TeamProjects> {
        match self.api.team_projects(&self.team_id).await {
            Ok(team) => {
                info!(team = %team.name, projects = team.projects.len(), "loaded team");
                Fetched::ok(team)
            }
            Err(e) => {
                error!(team_id = %self.team_id, error = %e, "failed loading team");
                self.notifier
                    .notify(Toast::failure("Could not load team").with_message(e.to_string()));
                Fetched::degraded(TeamProjects::not_found())
            }
        }
    }

    /// Fetch every project's files concurrently.
    ///
    /// The result has one entry per project, in project order. A project whose
    /// request fails contributes an empty section.
    pub async fn fetch_files_for_projects(&self, projects: &[Project]) -> Vec<ProjectFiles> {
        let requests = projects.iter().map(|project| async move {
            match self.api.project_files(&project.id).await {
                Ok(files) => ProjectFiles {
                    name: project.name.clone(),
                    files,
                },
                Err(e) => {
                    error!(project = %project.name, error = %e, "failed loading project files");
                    self.notifier
                        .notify(Toast::failure("Could not load files").with_message(e.to_string()));
                    ProjectFiles::empty(project.name.clone())
                }
            }
        });

        join_all(requests).await
    }

    /// Fetch the team and then the files of all its projects.
    pub async fn fetch_files(&self) -> Vec<ProjectFiles> {
        self.load_files().await.value
    }

    /// Like [`Self::fetch_files`], reporting whether the team itself failed.
    pub async fn load_files(&self) -> Fetched<Vec<ProjectFiles>> {
        let team = self.load_team().await;
        let files = self.fetch_files_for_projects(&team.value.projects).await;
        info!(
            sections = files.len(),
            files = files.iter().map(|p| p.files.len()).sum::<usize>(),
            "loaded files"
        );
        Fetched {
            value: files,
            degraded: team.degraded,
        }
    }

    /// Fetch the pages (direct children of the document root) of a file.
    pub async fn fetch_pages_for_file(&self, file: &File) -> Vec<Node> {
        self.load_pages(file).await.value
    }

    /// Like [`Self::fetch_pages_for_file`], reporting whether the request failed.
    pub async fn load_pages(&self, file: &File) -> Fetched<Vec<Node>> {
        match self.api.file_document(&file.key).await {
            Ok(document) => {
                info!(file = %file.key, pages = document.children.len(), "loaded pages");
                Fetched::ok(document.children)
            }
            Err(e) => {
                error!(file = %file.key, error = %e, "failed loading pages");
                self.notifier
                    .notify(Toast::failure("Could not load pages").with_message(e.to_string()));
                Fetched::degraded(Vec::new())
            }
        }
    }
}
