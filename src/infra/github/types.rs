//! Wire types for the GitHub repositories REST API.
//!
//! The typed models shipped with octocrab do not expose every repository
//! setting (merge commit message formats, discussions), so requests and
//! responses are (de)serialized through these structs instead.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A user or organization as embedded in API responses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteAccount {
    pub login: String,
}

/// Permissions of the authenticated user on a repository.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RemotePermissions {
    pub admin: bool,
    pub maintain: bool,
    pub push: bool,
    pub triage: bool,
    pub pull: bool,
}

/// Enablement of one security feature, e.g. `{"status": "enabled"}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteFeatureStatus {
    pub status: String,
}

/// The `security_and_analysis` block, present only for callers with admin access.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteSecurityAndAnalysis {
    pub advanced_security: Option<RemoteFeatureStatus>,
    pub secret_scanning: Option<RemoteFeatureStatus>,
    pub secret_scanning_push_protection: Option<RemoteFeatureStatus>,
    pub secret_scanning_validity_checks: Option<RemoteFeatureStatus>,
    pub dependabot_security_updates: Option<RemoteFeatureStatus>,
}

/// Invoke `$callback!` with the API URL attributes of a repository object.
macro_rules! for_each_repository_url {
    ($callback:ident) => {
        $callback! {
            url,
            archive_url,
            assignees_url,
            blobs_url,
            branches_url,
            collaborators_url,
            comments_url,
            commits_url,
            compare_url,
            contents_url,
            contributors_url,
            deployments_url,
            downloads_url,
            events_url,
            forks_url,
            git_commits_url,
            git_refs_url,
            git_tags_url,
            hooks_url,
            issue_comment_url,
            issue_events_url,
            issues_url,
            keys_url,
            labels_url,
            languages_url,
            merges_url,
            milestones_url,
            notifications_url,
            pulls_url,
            releases_url,
            stargazers_url,
            statuses_url,
            subscribers_url,
            subscription_url,
            tags_url,
            teams_url,
            trees_url,
        }
    };
}
pub(crate) use for_each_repository_url;

macro_rules! remote_urls {
    ($($field:ident),* $(,)?) => {
        /// Hypermedia URLs of a repository. Most are URI templates.
        #[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
        #[serde(default)]
        pub struct RemoteUrls {
            $(pub $field: Option<String>,)*
        }
    };
}

for_each_repository_url!(remote_urls);

/// Repository object returned by `GET /repos/{owner}/{repo}` and by every
/// mutating repository endpoint.
///
/// Settings are optional because GitHub omits some of them depending on the
/// caller's permissions and on the endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteRepository {
    pub id: i64,
    pub node_id: String,
    pub name: Option<String>,
    pub full_name: Option<String>,
    pub owner: Option<RemoteAccount>,
    pub organization: Option<RemoteAccount>,
    pub description: Option<String>,
    pub homepage: Option<String>,
    pub private: Option<bool>,
    pub visibility: Option<String>,
    pub default_branch: Option<String>,
    pub master_branch: Option<String>,
    pub language: Option<String>,

    pub has_issues: Option<bool>,
    pub has_projects: Option<bool>,
    pub has_wiki: Option<bool>,
    pub has_pages: Option<bool>,
    pub has_downloads: Option<bool>,
    pub has_discussions: Option<bool>,
    pub is_template: Option<bool>,

    pub allow_squash_merge: Option<bool>,
    pub allow_merge_commit: Option<bool>,
    pub allow_rebase_merge: Option<bool>,
    pub allow_auto_merge: Option<bool>,
    pub allow_update_branch: Option<bool>,
    pub allow_forking: Option<bool>,
    pub web_commit_signoff_required: Option<bool>,
    pub delete_branch_on_merge: Option<bool>,
    pub squash_merge_commit_title: Option<String>,
    pub squash_merge_commit_message: Option<String>,
    pub merge_commit_title: Option<String>,
    pub merge_commit_message: Option<String>,

    // Accepted on create only; GitHub does not echo them back.
    pub auto_init: Option<bool>,
    pub gitignore_template: Option<String>,
    pub license_template: Option<String>,

    pub fork: Option<bool>,
    pub archived: Option<bool>,
    pub disabled: Option<bool>,
    pub forks_count: Option<i64>,
    pub network_count: Option<i64>,
    pub subscribers_count: Option<i64>,
    pub stargazers_count: Option<i64>,
    pub watchers_count: Option<i64>,
    pub open_issues_count: Option<i64>,
    pub size: Option<i64>,
    pub topics: Option<Vec<String>>,
    pub team_id: Option<i64>,

    pub html_url: Option<String>,
    pub clone_url: Option<String>,
    pub git_url: Option<String>,
    pub ssh_url: Option<String>,
    pub svn_url: Option<String>,
    pub mirror_url: Option<String>,
    #[serde(flatten)]
    pub urls: RemoteUrls,

    pub created_at: Option<DateTime<Utc>>,
    pub pushed_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,

    pub parent: Option<Box<RemoteRepository>>,
    pub source: Option<Box<RemoteRepository>>,
    pub template_repository: Option<Box<RemoteRepository>>,
    pub permissions: Option<RemotePermissions>,
    pub security_and_analysis: Option<RemoteSecurityAndAnalysis>,
}

impl RemoteRepository {
    /// Login of the owning account, or an empty string when GitHub left it out.
    pub fn owner_login(&self) -> String {
        self.owner
            .as_ref()
            .map(|owner| owner.login.clone())
            .unwrap_or_default()
    }
}

/// Body of `POST /user/repos`, `POST /orgs/{org}/repos` and
/// `PATCH /repos/{owner}/{repo}`.
///
/// Unset fields are left out of the JSON body entirely so GitHub keeps its
/// current value instead of receiving a zero value.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RepositoryRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub homepage: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub private: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_issues: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_projects: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_wiki: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_discussions: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_template: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_squash_merge: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_merge_commit: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_rebase_merge: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_auto_merge: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delete_branch_on_merge: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub squash_merge_commit_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub squash_merge_commit_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merge_commit_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merge_commit_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_init: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gitignore_template: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license_template: Option<String>,
}

/// Body of `POST /repos/{template_owner}/{template_repo}/generate`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemplateRequest {
    pub owner: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub private: Option<bool>,
    pub include_all_branches: bool,
}
