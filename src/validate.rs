//! Input checks run before any request is built.

use crate::error::{GitHubError, Result};

/// True when `value` holds something other than whitespace.
pub fn is_present(value: &str) -> bool {
    !value.trim().is_empty()
}

/// Fail with [`GitHubError::Validation`] when `value` is blank.
pub fn require(field: &str, value: &str) -> Result<()> {
    require_all(&[(field, value)])
}

/// Fail when any of `fields` is blank. The error names every blank field.
pub fn require_all(fields: &[(&str, &str)]) -> Result<()> {
    let missing: Vec<&str> = fields
        .iter()
        .filter(|(_, value)| !is_present(value))
        .map(|(name, _)| *name)
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(GitHubError::Validation(format!(
            "missing required value for {}",
            missing.join(", ")
        )))
    }
}

/// Fail when a collection that must carry at least one entry is empty.
pub fn require_non_empty<T>(field: &str, values: &[T]) -> Result<()> {
    if values.is_empty() {
        Err(GitHubError::Validation(format!(
            "{field} must contain at least one entry"
        )))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_present() {
        assert!(is_present("octocat"));
        assert!(is_present("  x "));
        assert!(!is_present(""));
        assert!(!is_present(" \t\n"));
    }

    #[test]
    fn test_require_all_names_every_blank_field() {
        let err = require_all(&[("owner", "octocat"), ("repo", " "), ("branch", "")])
            .unwrap_err();
        let text = err.to_string();
        assert!(text.contains("repo, branch"), "{text}");
        assert!(!text.contains("owner"));
    }

    #[test]
    fn test_require_passes_present_value() {
        assert!(require("title", "Bug").is_ok());
        assert!(matches!(require("title", ""), Err(GitHubError::Validation(_))));
    }

    #[test]
    fn test_require_non_empty() {
        assert!(require_non_empty::<String>("labels", &[]).is_err());
        assert!(require_non_empty("labels", &["bug"]).is_ok());
    }
}
