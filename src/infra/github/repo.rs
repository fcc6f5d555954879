//! Repository operations.

use tracing::{debug, instrument};

use super::client::OctocrabClient;
use super::error::{GitHubError, Result};
use super::types::{RemoteAccount, RemoteRepository, RepositoryRequest, TemplateRequest};

/// Trait for repository operations.
#[async_trait::async_trait]
pub trait RepoClient: Send + Sync {
    /// Login of the user the token belongs to.
    async fn authenticated_login(&self) -> Result<String>;

    /// Get a repository by owner and name.
    async fn get_repository(&self, owner: &str, name: &str) -> Result<RemoteRepository>;

    /// Get a repository by its numeric ID, which survives renames and transfers.
    async fn get_repository_by_id(&self, id: i64) -> Result<RemoteRepository>;

    /// Create a repository under `org`, or under the authenticated user when `None`.
    async fn create_repository(
        &self,
        org: Option<&str>,
        request: &RepositoryRequest,
    ) -> Result<RemoteRepository>;

    /// Generate a new repository from a template repository.
    async fn create_from_template(
        &self,
        template_owner: &str,
        template_name: &str,
        request: &TemplateRequest,
    ) -> Result<RemoteRepository>;

    /// Edit a repository. `name` is the current name; a rename goes in the request.
    async fn edit_repository(
        &self,
        owner: &str,
        name: &str,
        request: &RepositoryRequest,
    ) -> Result<RemoteRepository>;

    /// Delete a repository.
    async fn delete_repository(&self, owner: &str, name: &str) -> Result<()>;
}

/// Reject responses missing the identifiers state is keyed on.
fn ensure_identified(repository: RemoteRepository) -> Result<RemoteRepository> {
    if repository.id == 0 {
        return Err(GitHubError::IncompleteRepository("id"));
    }
    if repository.node_id.is_empty() {
        return Err(GitHubError::IncompleteRepository("node_id"));
    }
    Ok(repository)
}

#[async_trait::async_trait]
impl RepoClient for OctocrabClient {
    #[instrument(skip(self))]
    async fn authenticated_login(&self) -> Result<String> {
        let user: RemoteAccount = self.client.get("/user", None::<&()>).await?;
        debug!(login = %user.login, "resolved authenticated user");
        Ok(user.login)
    }

    #[instrument(skip(self))]
    async fn get_repository(&self, owner: &str, name: &str) -> Result<RemoteRepository> {
        let repository = self
            .client
            .get(format!("/repos/{owner}/{name}"), None::<&()>)
            .await?;
        ensure_identified(repository)
    }

    #[instrument(skip(self))]
    async fn get_repository_by_id(&self, id: i64) -> Result<RemoteRepository> {
        let repository = self
            .client
            .get(format!("/repositories/{id}"), None::<&()>)
            .await?;
        ensure_identified(repository)
    }

    #[instrument(skip(self, request))]
    async fn create_repository(
        &self,
        org: Option<&str>,
        request: &RepositoryRequest,
    ) -> Result<RemoteRepository> {
        let route = match org {
            Some(org) => format!("/orgs/{org}/repos"),
            None => "/user/repos".to_string(),
        };
        let repository = self.client.post(route, Some(request)).await?;
        ensure_identified(repository)
    }

    #[instrument(skip(self, request))]
    async fn create_from_template(
        &self,
        template_owner: &str,
        template_name: &str,
        request: &TemplateRequest,
    ) -> Result<RemoteRepository> {
        let repository = self
            .client
            .post(
                format!("/repos/{template_owner}/{template_name}/generate"),
                Some(request),
            )
            .await?;
        ensure_identified(repository)
    }

    #[instrument(skip(self, request))]
    async fn edit_repository(
        &self,
        owner: &str,
        name: &str,
        request: &RepositoryRequest,
    ) -> Result<RemoteRepository> {
        let repository = self
            .client
            .patch(format!("/repos/{owner}/{name}"), Some(request))
            .await?;
        ensure_identified(repository)
    }

    #[instrument(skip(self))]
    async fn delete_repository(&self, owner: &str, name: &str) -> Result<()> {
        self.client.repos(owner, name).delete().await?;
        Ok(())
    }
}
