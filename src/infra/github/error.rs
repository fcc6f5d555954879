//! GitHub API error types.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GitHubError {
    #[error("{}", format_octocrab_error(.0))]
    ApiError(#[from] octocrab::Error),

    #[error("GitHub returned a repository without {0}")]
    IncompleteRepository(&'static str),
}

impl GitHubError {
    /// HTTP status reported by GitHub, if the request reached the API.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::ApiError(octocrab::Error::GitHub { source, .. }) => {
                Some(source.status_code.as_u16())
            }
            _ => None,
        }
    }

    /// Whether GitHub answered 404 Not Found.
    pub fn is_not_found(&self) -> bool {
        self.status_code() == Some(404)
    }
}

/// Format octocrab::Error to extract detailed error information from GitHub API responses.
fn format_octocrab_error(err: &octocrab::Error) -> String {
    match err {
        octocrab::Error::GitHub { source, .. } => {
            let mut msg = format!(
                "GitHub API error: {} (HTTP {})",
                source.message,
                source.status_code.as_u16()
            );

            if let Some(errors) = &source.errors {
                msg.push_str(&format_error_details(errors));
            }

            msg
        }
        _ => format!("GitHub API error: {err}"),
    }
}

pub type Result<T> = std::result::Result<T, GitHubError>;

/// Format error details from GitHub API errors array.
/// Returns a formatted string like "[field1 is code1, field2 is code2]" or empty string.
fn format_error_details(errors: &[serde_json::Value]) -> String {
    let error_details: Vec<String> = errors
        .iter()
        .filter_map(|e| {
            let field = e.get("field").and_then(|v| v.as_str());
            let code = e.get("code").and_then(|v| v.as_str());
            let message = e.get("message").and_then(|v| v.as_str());
            match (field, code) {
                (Some(f), Some(c)) => Some(format!("{f} is {c}")),
                (Some(f), None) => Some(f.to_string()),
                (None, Some(c)) => Some(c.to_string()),
                (None, None) => message.map(str::to_string),
            }
        })
        .collect();

    if error_details.is_empty() {
        String::new()
    } else {
        format!(" [{}]", error_details.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case::field_and_code(
        vec![json!({"resource": "Repository", "field": "name", "code": "already_exists"})],
        " [name is already_exists]"
    )]
    #[case::multiple_errors(
        vec![
            json!({"field": "squash_merge_commit_title", "code": "invalid"}),
            json!({"field": "name", "code": "missing_field"})
        ],
        " [squash_merge_commit_title is invalid, name is missing_field]"
    )]
    #[case::field_only(
        vec![json!({"field": "name"})],
        " [name]"
    )]
    #[case::code_only(
        vec![json!({"code": "custom"})],
        " [custom]"
    )]
    #[case::message_only(
        vec![json!({"message": "name already exists on this account"})],
        " [name already exists on this account]"
    )]
    #[case::empty_object(
        vec![json!({})],
        ""
    )]
    #[case::empty_array(
        vec![],
        ""
    )]
    fn test_format_error_details(#[case] errors: Vec<serde_json::Value>, #[case] expected: &str) {
        assert_eq!(format_error_details(&errors), expected);
    }

    #[test]
    fn test_incomplete_repository_display() {
        let err = GitHubError::IncompleteRepository("node_id");
        assert_eq!(
            err.to_string(),
            "GitHub returned a repository without node_id"
        );
        assert!(!err.is_not_found());
        assert_eq!(err.status_code(), None);
    }
}
