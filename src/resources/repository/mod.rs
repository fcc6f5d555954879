//! The `github_repository` resource.
//!
//! Each lifecycle operation validates its input, issues the remote calls in
//! order and only then produces new state. A failed call leaves the caller's
//! prior state untouched.

pub mod fields;
pub mod model;

use std::time::Duration;

use tokio::time::Instant;
use tracing::{info, instrument, warn};

use crate::infra::github::{RemoteRepository, TemplateRequest};
use crate::provider::diagnostics::{API_ERROR_SUMMARY, Diagnostic, Diagnostics};
use crate::provider::{ProviderData, within_deadline};

use fields::{ExpandMode, expand, flatten};
pub use model::RepositoryResourceModel;

pub const TYPE_NAME: &str = "github_repository";

/// Budget for deleting a generated repository after a failed edit.
const CLEANUP_TIMEOUT: Duration = Duration::from_secs(30);

pub struct RepositoryResource {
    data: ProviderData,
}

/// Apply defaults and validate a plan before any remote call.
fn prepare(mut plan: RepositoryResourceModel) -> Result<RepositoryResourceModel, Diagnostics> {
    plan.apply_defaults();
    let diagnostics = plan.validate();
    if diagnostics.has_error() {
        return Err(diagnostics);
    }
    Ok(plan)
}

fn missing_id() -> Diagnostics {
    Diagnostic::error(
        "Missing Repository ID",
        "The stored state has no repository ID. Import the repository or recreate it.",
    )
    .into()
}

impl RepositoryResource {
    pub fn new(data: ProviderData) -> Self {
        Self { data }
    }

    /// Create the repository directly, or generate it from a template and
    /// then apply the remaining settings.
    ///
    /// Remote calls are bounded by the provider deadline here rather than by
    /// the caller, so a generated repository is still removed when the
    /// follow-up edit runs out of time.
    #[instrument(skip_all, fields(name = plan.name.as_deref().unwrap_or_default()))]
    pub async fn create(
        &self,
        plan: RepositoryResourceModel,
    ) -> Result<RepositoryResourceModel, Diagnostics> {
        let mut plan = prepare(plan)?;

        let remote = match plan.template_repository.clone().filter(|t| !t.is_empty()) {
            Some(template) => {
                let template_owner = plan
                    .template_owner
                    .clone()
                    .filter(|o| !o.is_empty())
                    .unwrap_or_else(|| self.data.owner.clone());
                let remote = self
                    .create_from_template(&plan, &template_owner, &template)
                    .await?;
                plan.template_owner = Some(template_owner);
                remote
            }
            None => {
                let target = self.data.create_target().await?;
                let request = expand(&plan, ExpandMode::Create);
                self.data
                    .within_deadline(async {
                        self.data
                            .client
                            .create_repository(target, &request)
                            .await
                            .map_err(|err| Diagnostic::api_error("create the repository", &err))
                    })
                    .await?
            }
        };

        info!(id = remote.id, full_name = ?remote.full_name, "created repository");
        let mut state = plan;
        flatten(&remote, &mut state);
        Ok(state)
    }

    async fn create_from_template(
        &self,
        plan: &RepositoryResourceModel,
        template_owner: &str,
        template: &str,
    ) -> Result<RemoteRepository, Diagnostics> {
        let client = &self.data.client;
        let name = plan.name.clone().unwrap_or_default();
        let request = TemplateRequest {
            owner: self.data.owner.clone(),
            name: name.clone(),
            description: plan.description.clone(),
            private: plan.private,
            include_all_branches: false,
        };

        let generated = self
            .data
            .within_deadline(async {
                client
                    .create_from_template(template_owner, template, &request)
                    .await
                    .map_err(|err| Diagnostic::api_error("create the repository", &err))
            })
            .await?;

        let owner = Some(generated.owner_login())
            .filter(|o| !o.is_empty())
            .unwrap_or_else(|| self.data.owner.clone());
        let generated_name = generated.name.clone().unwrap_or(name);
        info!(
            %template_owner, %template, repository = %generated_name,
            "generated repository from template"
        );

        let edit = expand(plan, ExpandMode::Update);
        let edited = self
            .data
            .within_deadline(async {
                client
                    .edit_repository(&owner, &generated_name, &edit)
                    .await
                    .map_err(|err| {
                        Diagnostic::api_error(
                            "update the repository generated from the template",
                            &err,
                        )
                    })
            })
            .await;
        match edited {
            Ok(remote) => Ok(remote),
            Err(cause) => Err(self.discard_generated(&owner, &generated_name, cause).await),
        }
    }

    /// Remove a generated repository whose settings could not be applied.
    ///
    /// Runs on its own budget since the operation deadline may already be spent.
    async fn discard_generated(&self, owner: &str, name: &str, cause: Diagnostics) -> Diagnostics {
        let mut diagnostics = cause;

        let cleanup = within_deadline(Some(Instant::now() + CLEANUP_TIMEOUT), async {
            self.data
                .client
                .delete_repository(owner, name)
                .await
                .map_err(|err| Diagnostic::error(API_ERROR_SUMMARY, err.to_string()))
        })
        .await;

        match cleanup {
            Ok(()) => info!(%owner, %name, "deleted generated repository after failed update"),
            Err(err) => {
                let err = err
                    .iter()
                    .map(|d| d.detail.as_str())
                    .collect::<Vec<_>>()
                    .join("; ");
                warn!(%owner, %name, error = %err, "generated repository left behind");
                diagnostics.push(Diagnostic::warning(
                    "Generated Repository Not Cleaned Up",
                    format!(
                        "The repository {owner}/{name} was generated from the template but \
                         could not be deleted after the failed update, got error: {err}"
                    ),
                ));
            }
        }
        diagnostics
    }

    /// Refresh state from GitHub. `Ok(None)` means the repository is gone.
    #[instrument(skip_all, fields(id = ?state.id))]
    pub async fn read(
        &self,
        state: RepositoryResourceModel,
    ) -> Result<Option<RepositoryResourceModel>, Diagnostics> {
        let Some(id) = state.id else {
            return Err(missing_id());
        };

        match self.data.client.get_repository_by_id(id).await {
            Ok(remote) => {
                let mut state = state;
                flatten(&remote, &mut state);
                Ok(Some(state))
            }
            Err(err) if err.is_not_found() => {
                warn!(id, "repository no longer exists, removing from state");
                Ok(None)
            }
            Err(err) => Err(Diagnostic::api_error("get repository", &err).into()),
        }
    }

    /// Apply a changed plan. The edit is keyed by the name held in `prior`,
    /// so a new name in the plan renames the repository.
    #[instrument(skip_all, fields(id = ?prior.id))]
    pub async fn update(
        &self,
        plan: RepositoryResourceModel,
        prior: RepositoryResourceModel,
    ) -> Result<RepositoryResourceModel, Diagnostics> {
        let mut plan = prepare(plan)?;
        let current_name = prior
            .name
            .clone()
            .filter(|n| !n.is_empty())
            .or_else(|| plan.name.clone())
            .unwrap_or_default();

        let request = expand(&plan, ExpandMode::Update);
        let remote = self
            .data
            .client
            .edit_repository(&self.data.owner, &current_name, &request)
            .await
            .map_err(|err| Diagnostic::api_error("update the repository", &err))?;

        if plan.template_owner.is_none() {
            plan.template_owner = prior.template_owner;
        }
        let mut state = plan;
        flatten(&remote, &mut state);
        Ok(state)
    }

    /// Delete the repository. A repository that is already gone is an error.
    #[instrument(skip_all, fields(name = ?state.name))]
    pub async fn delete(&self, state: RepositoryResourceModel) -> Result<(), Diagnostics> {
        let name = state.name.unwrap_or_default();
        self.data
            .client
            .delete_repository(&self.data.owner, &name)
            .await
            .map_err(|err| Diagnostic::api_error("delete the repository", &err))?;
        info!(owner = %self.data.owner, %name, "deleted repository");
        Ok(())
    }

    /// Start tracking an existing repository by numeric ID. Follow with `read`.
    pub fn import(&self, id: &str) -> Result<RepositoryResourceModel, Diagnostics> {
        let id: i64 = id.trim().parse().map_err(|err: std::num::ParseIntError| {
            Diagnostic::error(
                "Error importing item",
                format!("Could not import the repository, the ID should be an integer: {err}"),
            )
        })?;
        Ok(RepositoryResourceModel {
            id: Some(id),
            ..Default::default()
        })
    }
}
