//! Stored state and plan shape of the `github_repository` resource.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::provider::diagnostics::{Diagnostic, Diagnostics};

pub const SQUASH_MERGE_COMMIT_TITLES: &[&str] = &["PR_TITLE", "COMMIT_OR_PR_TITLE"];
pub const SQUASH_MERGE_COMMIT_MESSAGES: &[&str] = &["PR_BODY", "COMMIT_MESSAGES", "BLANK"];
pub const MERGE_COMMIT_TITLES: &[&str] = &["PR_TITLE", "MERGE_MESSAGE"];
pub const MERGE_COMMIT_MESSAGES: &[&str] = &["PR_BODY", "PR_TITLE", "BLANK"];

/// A GitHub repository.
///
/// Used both as the plan a practitioner declares and as the state persisted
/// after every successful operation. `null` means unset in a plan and unknown
/// before the first create.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, deny_unknown_fields)]
pub struct RepositoryResourceModel {
    /// The name of the repository.
    pub name: Option<String>,
    /// A short description of the repository.
    pub description: Option<String>,
    /// A URL with more information about the repository.
    pub homepage: Option<String>,
    /// Whether the repository is private.
    pub private: Option<bool>,
    /// Whether issues are enabled. Defaults to `true`.
    pub has_issues: Option<bool>,
    /// Whether projects are enabled. Defaults to `true`.
    pub has_projects: Option<bool>,
    /// Whether the wiki is enabled.
    pub has_wiki: Option<bool>,
    /// Whether discussions are enabled.
    pub has_discussions: Option<bool>,
    /// Whether this repository acts as a template that can be used to generate new repositories.
    pub is_template: Option<bool>,
    /// Whether to allow squash merges for pull requests. Defaults to `true`.
    pub allow_squash_merge: Option<bool>,
    /// Whether to allow merge commits for pull requests. Defaults to `true`.
    pub allow_merge_commit: Option<bool>,
    /// Whether to allow rebase merges for pull requests. Defaults to `true`.
    pub allow_rebase_merge: Option<bool>,
    /// Whether to allow Auto-merge to be used on pull requests.
    pub allow_auto_merge: Option<bool>,
    /// Whether to delete head branches when pull requests are merged.
    pub delete_branch_on_merge: Option<bool>,
    /// The default value for a squash merge commit title: `PR_TITLE` or
    /// `COMMIT_OR_PR_TITLE`. Only sent when `allow_squash_merge` is `true`.
    pub squash_merge_commit_title: Option<String>,
    /// The default value for a squash merge commit message: `PR_BODY`,
    /// `COMMIT_MESSAGES` or `BLANK`. Only sent when `allow_squash_merge` is `true`.
    pub squash_merge_commit_message: Option<String>,
    /// The default value for a merge commit title: `PR_TITLE` or
    /// `MERGE_MESSAGE`. Only sent when `allow_merge_commit` is `true`.
    pub merge_commit_title: Option<String>,
    /// The default value for a merge commit message: `PR_BODY`, `PR_TITLE`
    /// or `BLANK`. Only sent when `allow_merge_commit` is `true`.
    pub merge_commit_message: Option<String>,
    /// Whether the repository is initialized with a minimal README. Only used at creation.
    pub auto_init: Option<bool>,
    /// The desired language or platform `.gitignore` template to apply. Only used at creation.
    pub gitignore_template: Option<String>,
    /// The desired license template to apply. Only used at creation.
    pub license_template: Option<String>,
    /// The name of the template repository to generate this repository from.
    pub template_repository: Option<String>,
    /// The owner of the template repository. Defaults to the provider owner.
    pub template_owner: Option<String>,
    /// The numeric ID of the repository.
    pub id: Option<i64>,
    /// The GraphQL node ID of the repository.
    pub node_id: Option<String>,
}

impl RepositoryResourceModel {
    /// Fill the attributes that carry a static default when left null.
    pub fn apply_defaults(&mut self) {
        for flag in [
            &mut self.has_issues,
            &mut self.has_projects,
            &mut self.allow_squash_merge,
            &mut self.allow_merge_commit,
            &mut self.allow_rebase_merge,
        ] {
            flag.get_or_insert(true);
        }
    }

    /// Check attribute values before anything is sent to GitHub.
    pub fn validate(&self) -> Diagnostics {
        let mut diagnostics = Diagnostics::new();

        if self.name.as_deref().is_none_or(str::is_empty) {
            diagnostics.push(
                Diagnostic::error(
                    "Invalid Attribute Value",
                    "Attribute name must not be empty",
                )
                .with_attribute("name"),
            );
        }

        let selectors = [
            (
                "squash_merge_commit_title",
                &self.squash_merge_commit_title,
                SQUASH_MERGE_COMMIT_TITLES,
            ),
            (
                "squash_merge_commit_message",
                &self.squash_merge_commit_message,
                SQUASH_MERGE_COMMIT_MESSAGES,
            ),
            (
                "merge_commit_title",
                &self.merge_commit_title,
                MERGE_COMMIT_TITLES,
            ),
            (
                "merge_commit_message",
                &self.merge_commit_message,
                MERGE_COMMIT_MESSAGES,
            ),
        ];
        for (attribute, value, allowed) in selectors {
            if let Some(value) = value
                && !allowed.contains(&value.as_str())
            {
                diagnostics.push(
                    Diagnostic::error(
                        "Invalid Attribute Value",
                        format!(
                            "Attribute {attribute} value must be one of: {}, got: \"{value}\"",
                            allowed
                                .iter()
                                .map(|v| format!("\"{v}\""))
                                .collect::<Vec<_>>()
                                .join(", ")
                        ),
                    )
                    .with_attribute(attribute),
                );
            }
        }

        diagnostics
    }
}
