//! Provider configuration and the state shared with resources and data sources.

pub mod diagnostics;
pub mod service;

use std::future::Future;
use std::sync::Arc;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tokio::time::Instant;
use tracing::{debug, info, instrument};

use crate::infra::github::{OctocrabClient, RepoClient};
use crate::shared::env_var::EnvVars;

use diagnostics::{Diagnostic, Diagnostics};

pub const PROVIDER_TYPE_NAME: &str = "github";

/// Provider configuration block.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, deny_unknown_fields)]
pub struct ProviderModel {
    /// The target GitHub organization or individual user account to manage.
    /// Alternatively, can be configured using the `GITHUB_OWNER` environment variable.
    pub owner: Option<String>,
    /// The GitHub personal access token used to authenticate with the API.
    /// Alternatively, can be configured using the `GITHUB_TOKEN` environment variable.
    pub token: Option<String>,
    /// The GitHub API root, for GitHub Enterprise Server.
    /// Alternatively, can be configured using the `GITHUB_BASE_URL` environment variable.
    pub base_url: Option<String>,
}

/// Everything a configured resource or data source needs.
#[derive(Clone)]
pub struct ProviderData {
    pub client: Arc<dyn RepoClient>,
    /// Account repositories are managed under.
    pub owner: String,
    /// Login of the token's user. `None` until something needs it.
    pub authenticated_login: Option<String>,
    /// Remote calls still running at this instant are abandoned.
    pub deadline: Option<Instant>,
}

impl ProviderData {
    /// Organization to create repositories under, or `None` when the owner is
    /// the token's own account.
    ///
    /// Resolves the token's login on first use when the owner was configured.
    pub async fn create_target(&self) -> Result<Option<&str>, Diagnostics> {
        let login = match &self.authenticated_login {
            Some(login) => login.clone(),
            None => {
                self.within_deadline(async {
                    self.client
                        .authenticated_login()
                        .await
                        .map_err(|err| Diagnostic::api_error("get user", &err))
                })
                .await?
            }
        };
        if self.owner.eq_ignore_ascii_case(&login) {
            Ok(None)
        } else {
            Ok(Some(&self.owner))
        }
    }

    /// Run a remote call under the operation deadline.
    pub async fn within_deadline<T, E, F>(&self, call: F) -> Result<T, Diagnostics>
    where
        F: Future<Output = Result<T, E>>,
        E: Into<Diagnostics>,
    {
        within_deadline(self.deadline, call).await
    }
}

/// Await `call`, giving up with "Operation Timed Out" once `deadline` passes.
pub async fn within_deadline<T, E, F>(
    deadline: Option<Instant>,
    call: F,
) -> Result<T, Diagnostics>
where
    F: Future<Output = Result<T, E>>,
    E: Into<Diagnostics>,
{
    let result = match deadline {
        Some(deadline) => match tokio::time::timeout_at(deadline, call).await {
            Ok(result) => result,
            Err(_) => return Err(Diagnostic::timed_out().into()),
        },
        None => call.await,
    };
    result.map_err(Into::into)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Unconfigured provider.
pub struct GitHubProvider {
    env: EnvVars,
    deadline: Option<Instant>,
}

impl GitHubProvider {
    pub fn new(env: EnvVars) -> Self {
        Self {
            env,
            deadline: None,
        }
    }

    /// Bound configuration and every later remote call by `deadline`.
    pub fn with_deadline(mut self, deadline: Option<Instant>) -> Self {
        self.deadline = deadline;
        self
    }

    /// Resolve credentials and the owner, then build the API client.
    ///
    /// Attributes win over environment variables. The token's login is only
    /// looked up here when no owner is configured.
    #[instrument(skip_all)]
    pub async fn configure(&self, model: ProviderModel) -> Result<ConfiguredProvider, Diagnostics> {
        let Some(token) = non_empty(model.token).or_else(|| self.env.token.clone()) else {
            return Err(Diagnostic::error(
                "Missing Personal Access Token Configuration",
                format!(
                    "While configuring the provider, a GitHub token was not found in the {} \
                     environment variable or provider configuration block token attribute.",
                    EnvVars::token_name()
                ),
            )
            .into());
        };

        let base_url = non_empty(model.base_url).or_else(|| self.env.base_url.clone());
        let client = match &base_url {
            Some(base_url) => OctocrabClient::with_base_url(base_url, &token),
            None => OctocrabClient::new(&token),
        }
        .map_err(|err| {
            Diagnostic::error(
                "Unable to Create GitHub API Client",
                format!("An unexpected error occurred when creating the GitHub API client: {err}"),
            )
        })?;

        self.configure_with_client(Arc::new(client), non_empty(model.owner))
            .await
    }

    /// Finish configuration with an already built client.
    pub async fn configure_with_client(
        &self,
        client: Arc<dyn RepoClient>,
        owner: Option<String>,
    ) -> Result<ConfiguredProvider, Diagnostics> {
        let configured_owner = owner.or_else(|| self.env.owner.clone());
        let (owner, authenticated_login) = match configured_owner {
            Some(owner) => (owner, None),
            None => {
                let login = within_deadline(self.deadline, async {
                    client
                        .authenticated_login()
                        .await
                        .map_err(|err| Diagnostic::api_error("get user", &err))
                })
                .await?;
                (login.clone(), Some(login))
            }
        };
        info!(
            %owner,
            login_resolved = authenticated_login.is_some(),
            "configured GitHub provider"
        );
        debug!(deadline = ?self.deadline, "operation deadline");

        Ok(ConfiguredProvider {
            data: ProviderData {
                client,
                owner,
                authenticated_login,
                deadline: self.deadline,
            },
        })
    }
}

/// Provider after a successful configure step.
pub struct ConfiguredProvider {
    data: ProviderData,
}

impl ConfiguredProvider {
    pub fn data(&self) -> &ProviderData {
        &self.data
    }
}
