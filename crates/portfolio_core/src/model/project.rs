//! Project gallery record.

use serde::{Deserialize, Serialize};

/// One project card; `id` is the natural key.
///
/// Field names follow the stored camelCase layout (`demoUrl`, `githubUrl`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: u32,
    pub title: String,
    pub description: String,
    /// Cover image URL.
    pub image: String,
    pub tags: Vec<String>,
    pub demo_url: String,
    pub github_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::Project;

    #[test]
    fn decodes_camel_case_layout_with_optional_category() {
        let project: Project = serde_json::from_str(
            r#"{
                "id": 2,
                "title": "Another Test Project",
                "description": "Another test project",
                "image": "/test-image-2.png",
                "tags": ["WordPress", "PHP"],
                "demoUrl": "https://example2.com",
                "githubUrl": "https://github.com/test/project2",
                "category": "wordpress"
            }"#,
        )
        .unwrap();
        assert_eq!(project.demo_url, "https://example2.com");
        assert_eq!(project.category.as_deref(), Some("wordpress"));

        let without_category = Project {
            category: None,
            ..project
        };
        let json = serde_json::to_value(&without_category).unwrap();
        assert!(json.get("category").is_none());
        assert!(json.get("githubUrl").is_some());
    }
}
