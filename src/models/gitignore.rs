use serde::{Deserialize, Serialize};

use crate::client::GitHubClient;
use crate::error::Result;
use crate::models::common::segment;
use crate::validate::require;

/// A `.gitignore` template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GitIgnore {
    pub name: String,
    pub source: String,
}

impl GitHubClient {
    /// Names of every available template.
    pub async fn list_gitignore_templates(&self) -> Result<Vec<String>> {
        self.get("/gitignore/templates").await
    }

    pub async fn get_gitignore_template(&self, name: &str) -> Result<GitIgnore> {
        require("name", name)?;
        self.get(&format!("/gitignore/templates/{}", segment(name)))
            .await
    }
}
