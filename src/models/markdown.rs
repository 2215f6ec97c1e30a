//! Markdown rendering.

use reqwest::{Method, StatusCode};
use serde::Serialize;
use serde_with::skip_serializing_none;

use crate::client::{unexpected_status, GitHubClient, RequestBody};
use crate::error::Result;
use crate::validate::require;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkdownMode {
    #[default]
    Markdown,
    /// GitHub Flavored Markdown; links issues and users relative to `context`.
    Gfm,
}

#[skip_serializing_none]
#[derive(Debug, Clone, Default, Serialize)]
pub struct MarkdownRequest {
    #[serde(rename = "text")]
    pub markdown: String,
    pub mode: Option<MarkdownMode>,
    /// `owner/repo` used by `gfm` mode.
    pub context: Option<String>,
}

impl MarkdownRequest {
    pub fn new(markdown: impl Into<String>) -> Self {
        Self {
            markdown: markdown.into(),
            ..Default::default()
        }
    }

    pub fn gfm(mut self, context: impl Into<String>) -> Self {
        self.mode = Some(MarkdownMode::Gfm);
        self.context = Some(context.into());
        self
    }
}

impl GitHubClient {
    /// Render a document to HTML.
    pub async fn render_markdown(&self, request: &MarkdownRequest) -> Result<String> {
        require("markdown", &request.markdown)?;
        self.render("/markdown", RequestBody::json(request)?).await
    }

    /// Render plain text in `markdown` mode, with no JSON wrapper.
    pub async fn render_markdown_raw(&self, text: &str) -> Result<String> {
        require("markdown", text)?;
        self.render("/markdown/raw", RequestBody::Text(text.to_string()))
            .await
    }

    async fn render(&self, path: &str, body: RequestBody) -> Result<String> {
        let response = self.send(Method::POST, path, body).await?;
        if response.status() == StatusCode::OK {
            self.read_text(response).await
        } else {
            Err(unexpected_status(response, &[StatusCode::OK]).await)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_body() {
        let request = MarkdownRequest::new("Hello **world** \"quoted\"").gfm("octocat/Hello-World");
        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body["text"], "Hello **world** \"quoted\"");
        assert_eq!(body["mode"], "gfm");
        assert_eq!(body["context"], "octocat/Hello-World");
    }

    #[test]
    fn test_plain_request_omits_mode() {
        let body = serde_json::to_string(&MarkdownRequest::new("# Title")).unwrap();
        assert_eq!(body, r##"{"text":"# Title"}"##);
    }
}
