// Figma API response types.
// Defines structs for deserializing Figma REST API responses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Project within a team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub name: String,
}

/// Team name and its projects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamProjects {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub projects: Vec<Project>,
}

impl TeamProjects {
    /// Placeholder used when the team could not be loaded.
    pub fn not_found() -> Self {
        Self {
            name: "No team found".to_string(),
            projects: Vec::new(),
        }
    }
}

/// Files of one project, shown as a list section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectFiles {
    pub name: String,
    #[serde(default)]
    pub files: Vec<File>,
}

impl ProjectFiles {
    pub fn empty(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            files: Vec::new(),
        }
    }
}

/// Design file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct File {
    pub key: String,
    pub name: String,
    pub last_modified: DateTime<Utc>,
    pub thumbnail_url: Option<String>,
}

/// Document node. Only the document's direct children (pages) are used.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub children: Vec<Node>,
}

/// File document returned by `GET /files/{key}`.
#[derive(Debug, Clone, Deserialize)]
pub struct FileDetail {
    pub document: Node,
}

/// Response wrapper for a project's files list.
#[derive(Debug, Deserialize)]
pub(crate) struct ProjectFilesResponse {
    #[serde(default)]
    pub files: Vec<File>,
}

/// Accept IDs the API sends either as strings or as numbers.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Text(String),
        Number(u64),
    }

    Ok(match Id::deserialize(deserializer)? {
        Id::Text(s) => s,
        Id::Number(n) => n.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_team_projects_accepts_numeric_ids() {
        let json = r#"{"name":"Design","projects":[{"id":123,"name":"Web"},{"id":"456","name":"App"}]}"#;
        let team: TeamProjects = serde_json::from_str(json).unwrap();

        assert_eq!(team.name, "Design");
        assert_eq!(team.projects[0].id, "123");
        assert_eq!(team.projects[1].id, "456");
    }

    #[test]
    fn test_file_detail_pages_without_children() {
        let json = r#"{
            "name": "Landing",
            "document": {
                "id": "0:0",
                "name": "Document",
                "type": "DOCUMENT",
                "children": [
                    {"id": "0:1", "name": "Cover", "type": "CANVAS"},
                    {"id": "1:2", "name": "Screens", "type": "CANVAS"}
                ]
            }
        }"#;
        let detail: FileDetail = serde_json::from_str(json).unwrap();

        let names: Vec<_> = detail.document.children.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, ["Cover", "Screens"]);
        assert!(detail.document.children[0].children.is_empty());
    }

    #[test]
    fn test_project_files_response() {
        let json = r#"{
            "name": "Web",
            "files": [{
                "key": "abc",
                "name": "Homepage",
                "thumbnail_url": "https://example.com/thumb.png",
                "last_modified": "2024-03-01T12:30:00Z"
            }]
        }"#;
        let response: ProjectFilesResponse = serde_json::from_str(json).unwrap();

        assert_eq!(response.files.len(), 1);
        assert_eq!(response.files[0].key, "abc");
        assert_eq!(
            response.files[0].last_modified.to_rfc3339(),
            "2024-03-01T12:30:00+00:00"
        );
    }
}
