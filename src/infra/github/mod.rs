//! GitHub API client module using octocrab.
//!
//! Provides OctocrabClient for the repository endpoints the provider manages,
//! authenticated with a personal access token.

mod client;
pub(crate) mod error;
#[cfg(test)]
pub(crate) mod mock;
mod repo;
mod types;

pub use client::OctocrabClient;
pub use error::GitHubError;
pub use repo::RepoClient;
pub(crate) use types::for_each_repository_url;
pub use types::{
    RemoteAccount, RemoteFeatureStatus, RemotePermissions, RemoteRepository,
    RemoteSecurityAndAnalysis, RemoteUrls, RepositoryRequest, TemplateRequest,
};
