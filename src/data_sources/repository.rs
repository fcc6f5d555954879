//! The `github_repository` data source.

use chrono::SecondsFormat;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::infra::github::{
    RemoteAccount, RemoteFeatureStatus, RemotePermissions, RemoteRepository,
    RemoteSecurityAndAnalysis, RemoteUrls, for_each_repository_url,
};
use crate::provider::ProviderData;
use crate::provider::diagnostics::{Diagnostic, Diagnostics};

pub const TYPE_NAME: &str = "github_repository";

/// Arguments of the data source.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct RepositoryDataSourceConfig {
    /// The account owner of the repository. The name is not case sensitive.
    pub owner: String,
    /// The name of the repository without the `.git` extension. The name is not case sensitive.
    pub name: String,
}

/// A repository referenced from another repository.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct LinkedRepositoryModel {
    pub owner: String,
    pub name: String,
    pub full_name: String,
}

impl From<&RemoteRepository> for LinkedRepositoryModel {
    fn from(repository: &RemoteRepository) -> Self {
        Self {
            owner: repository.owner_login(),
            name: repository.name.clone().unwrap_or_default(),
            full_name: repository.full_name.clone().unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct OrganizationModel {
    pub name: String,
}

impl From<&RemoteAccount> for OrganizationModel {
    fn from(account: &RemoteAccount) -> Self {
        Self {
            name: account.login.clone(),
        }
    }
}

/// Permissions of the authenticated user on the repository.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PermissionsModel {
    pub admin: bool,
    pub maintain: bool,
    pub push: bool,
    pub triage: bool,
    pub pull: bool,
}

impl From<&RemotePermissions> for PermissionsModel {
    fn from(permissions: &RemotePermissions) -> Self {
        Self {
            admin: permissions.admin,
            maintain: permissions.maintain,
            push: permissions.push,
            triage: permissions.triage,
            pull: permissions.pull,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FeatureStatusModel {
    /// `enabled` or `disabled`.
    pub status: String,
}

impl From<Option<&RemoteFeatureStatus>> for FeatureStatusModel {
    fn from(feature: Option<&RemoteFeatureStatus>) -> Self {
        Self {
            status: feature.map(|f| f.status.clone()).unwrap_or_default(),
        }
    }
}

/// Security and analysis features. Only reported to repository admins.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SecurityAndAnalysisModel {
    pub advanced_security: FeatureStatusModel,
    pub secret_scanning: FeatureStatusModel,
    pub secret_scanning_push_protection: FeatureStatusModel,
    pub secret_scanning_validity_checks: FeatureStatusModel,
    pub dependabot_security_updates: FeatureStatusModel,
}

impl From<&RemoteSecurityAndAnalysis> for SecurityAndAnalysisModel {
    fn from(remote: &RemoteSecurityAndAnalysis) -> Self {
        Self {
            advanced_security: remote.advanced_security.as_ref().into(),
            secret_scanning: remote.secret_scanning.as_ref().into(),
            secret_scanning_push_protection: remote.secret_scanning_push_protection.as_ref().into(),
            secret_scanning_validity_checks: remote.secret_scanning_validity_checks.as_ref().into(),
            dependabot_security_updates: remote.dependabot_security_updates.as_ref().into(),
        }
    }
}

macro_rules! repository_urls_model {
    ($($field:ident),* $(,)?) => {
        /// API URLs of the repository, empty when GitHub left one out.
        #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
        pub struct RepositoryUrlsModel {
            $(pub $field: String,)*
        }

        impl From<&RemoteUrls> for RepositoryUrlsModel {
            fn from(urls: &RemoteUrls) -> Self {
                Self {
                    $($field: urls.$field.clone().unwrap_or_default(),)*
                }
            }
        }
    };
}

for_each_repository_url!(repository_urls_model);

/// Everything GitHub reports about a repository.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RepositoryDataSourceModel {
    pub owner: String,
    pub name: String,

    /// The numeric ID of the repository.
    pub id: i64,
    /// The GraphQL node ID of the repository.
    pub node_id: String,
    /// `owner/name`.
    pub full_name: String,
    pub description: String,
    pub homepage: String,
    pub default_branch: String,
    pub master_branch: String,
    /// RFC 3339 timestamp, `null` when GitHub did not report it.
    pub created_at: Option<String>,
    /// RFC 3339 timestamp of the last push.
    pub pushed_at: Option<String>,
    pub updated_at: Option<String>,
    pub html_url: String,
    pub clone_url: String,
    pub git_url: String,
    pub ssh_url: String,
    pub svn_url: String,
    pub mirror_url: String,
    pub language: String,
    pub fork: bool,
    pub forks_count: i64,
    pub network_count: i64,
    pub stargazers_count: i64,
    pub subscribers_count: i64,
    pub watchers_count: i64,
    pub open_issues_count: i64,
    /// Size in kilobytes.
    pub size: i64,
    pub auto_init: bool,
    pub gitignore_template: String,
    pub license_template: String,
    pub archived: bool,
    pub disabled: bool,
    pub private: bool,
    /// `public`, `private` or `internal`.
    pub visibility: String,
    pub has_issues: bool,
    pub has_projects: bool,
    pub has_wiki: bool,
    pub has_pages: bool,
    pub has_downloads: bool,
    pub has_discussions: bool,
    pub is_template: bool,
    pub allow_squash_merge: bool,
    pub allow_merge_commit: bool,
    pub allow_rebase_merge: bool,
    pub allow_auto_merge: bool,
    pub allow_update_branch: bool,
    pub allow_forking: bool,
    pub web_commit_signoff_required: bool,
    pub delete_branch_on_merge: bool,
    pub squash_merge_commit_title: String,
    pub squash_merge_commit_message: String,
    pub merge_commit_title: String,
    pub merge_commit_message: String,
    pub topics: Vec<String>,
    pub team_id: i64,
    #[serde(flatten)]
    pub urls: RepositoryUrlsModel,
    /// The repository this one was forked from.
    pub parent: Option<LinkedRepositoryModel>,
    /// The root of the fork network.
    pub source: Option<LinkedRepositoryModel>,
    /// The template this repository was generated from.
    pub template_repository: Option<LinkedRepositoryModel>,
    pub organization: Option<OrganizationModel>,
    pub permissions: Option<PermissionsModel>,
    pub security_and_analysis: Option<SecurityAndAnalysisModel>,
}

impl RepositoryDataSourceModel {
    fn flatten(config: RepositoryDataSourceConfig, remote: &RemoteRepository) -> Self {
        let timestamp = |t: Option<chrono::DateTime<chrono::Utc>>| {
            t.map(|t| t.to_rfc3339_opts(SecondsFormat::Secs, true))
        };
        let text = |v: &Option<String>| v.clone().unwrap_or_default();
        let flag = |v: Option<bool>| v.unwrap_or_default();
        let count = |v: Option<i64>| v.unwrap_or_default();

        Self {
            owner: config.owner,
            name: remote.name.clone().unwrap_or(config.name),
            id: remote.id,
            node_id: remote.node_id.clone(),
            full_name: text(&remote.full_name),
            description: text(&remote.description),
            homepage: text(&remote.homepage),
            default_branch: text(&remote.default_branch),
            master_branch: text(&remote.master_branch),
            created_at: timestamp(remote.created_at),
            pushed_at: timestamp(remote.pushed_at),
            updated_at: timestamp(remote.updated_at),
            html_url: text(&remote.html_url),
            clone_url: text(&remote.clone_url),
            git_url: text(&remote.git_url),
            ssh_url: text(&remote.ssh_url),
            svn_url: text(&remote.svn_url),
            mirror_url: text(&remote.mirror_url),
            language: text(&remote.language),
            fork: flag(remote.fork),
            forks_count: count(remote.forks_count),
            network_count: count(remote.network_count),
            stargazers_count: count(remote.stargazers_count),
            subscribers_count: count(remote.subscribers_count),
            watchers_count: count(remote.watchers_count),
            open_issues_count: count(remote.open_issues_count),
            size: count(remote.size),
            auto_init: flag(remote.auto_init),
            gitignore_template: text(&remote.gitignore_template),
            license_template: text(&remote.license_template),
            archived: flag(remote.archived),
            disabled: flag(remote.disabled),
            private: flag(remote.private),
            visibility: text(&remote.visibility),
            has_issues: flag(remote.has_issues),
            has_projects: flag(remote.has_projects),
            has_wiki: flag(remote.has_wiki),
            has_pages: flag(remote.has_pages),
            has_downloads: flag(remote.has_downloads),
            has_discussions: flag(remote.has_discussions),
            is_template: flag(remote.is_template),
            allow_squash_merge: flag(remote.allow_squash_merge),
            allow_merge_commit: flag(remote.allow_merge_commit),
            allow_rebase_merge: flag(remote.allow_rebase_merge),
            allow_auto_merge: flag(remote.allow_auto_merge),
            allow_update_branch: flag(remote.allow_update_branch),
            allow_forking: flag(remote.allow_forking),
            web_commit_signoff_required: flag(remote.web_commit_signoff_required),
            delete_branch_on_merge: flag(remote.delete_branch_on_merge),
            squash_merge_commit_title: text(&remote.squash_merge_commit_title),
            squash_merge_commit_message: text(&remote.squash_merge_commit_message),
            merge_commit_title: text(&remote.merge_commit_title),
            merge_commit_message: text(&remote.merge_commit_message),
            topics: remote.topics.clone().unwrap_or_default(),
            team_id: count(remote.team_id),
            urls: RepositoryUrlsModel::from(&remote.urls),
            parent: remote.parent.as_deref().map(LinkedRepositoryModel::from),
            source: remote.source.as_deref().map(LinkedRepositoryModel::from),
            template_repository: remote
                .template_repository
                .as_deref()
                .map(LinkedRepositoryModel::from),
            organization: remote.organization.as_ref().map(OrganizationModel::from),
            permissions: remote.permissions.as_ref().map(PermissionsModel::from),
            security_and_analysis: remote
                .security_and_analysis
                .as_ref()
                .map(SecurityAndAnalysisModel::from),
        }
    }
}

pub struct RepositoryDataSource {
    data: ProviderData,
}

impl RepositoryDataSource {
    pub fn new(data: ProviderData) -> Self {
        Self { data }
    }

    #[instrument(skip_all, fields(owner = %config.owner, name = %config.name))]
    pub async fn read(
        &self,
        config: RepositoryDataSourceConfig,
    ) -> Result<RepositoryDataSourceModel, Diagnostics> {
        let remote = self
            .data
            .client
            .get_repository(&config.owner, &config.name)
            .await
            .map_err(|err| Diagnostic::api_error("get repository", &err))?;
        Ok(RepositoryDataSourceModel::flatten(config, &remote))
    }
}
