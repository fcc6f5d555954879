//! Field table shared by expansion (plan to request) and flattening
//! (response to state).
//!
//! Every synced attribute is listed once in `repository_fields!` together
//! with the rule deciding when it may be sent. Both directions are generated
//! from that list, so a field cannot be expanded without also being
//! flattened.

use crate::infra::github::{RemoteRepository, RepositoryRequest};

use super::model::RepositoryResourceModel;

/// Which remote call a request is built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpandMode {
    Create,
    Update,
}

/// Merge strategies that gate their commit message format selectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeStrategy {
    Squash,
    MergeCommit,
}

impl MergeStrategy {
    fn enabled(self, plan: &RepositoryResourceModel) -> bool {
        let flag = match self {
            Self::Squash => plan.allow_squash_merge,
            Self::MergeCommit => plan.allow_merge_commit,
        };
        flag == Some(true)
    }
}

/// When a field is admitted into a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRule {
    Always,
    /// Sent on create only. GitHub never reports it back.
    CreateOnly,
    /// Sent only while the merge strategy is enabled in the plan.
    RequiresStrategy(MergeStrategy),
}

impl FieldRule {
    pub fn admits(self, plan: &RepositoryResourceModel, mode: ExpandMode) -> bool {
        match self {
            Self::Always => true,
            Self::CreateOnly => mode == ExpandMode::Create,
            Self::RequiresStrategy(strategy) => strategy.enabled(plan),
        }
    }

    /// Whether GitHub reports the field in repository responses.
    pub fn is_echoed(self) -> bool {
        self != Self::CreateOnly
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub rule: FieldRule,
}

macro_rules! repository_fields {
    ($($field:ident => $rule:expr),* $(,)?) => {
        /// Synced attributes, in request order.
        pub const FIELDS: &[FieldSpec] = &[
            $(FieldSpec { name: stringify!($field), rule: $rule }),*
        ];

        /// Build the request body for `mode` from a plan.
        ///
        /// Fields are first filtered by their rule, then the admitted ones
        /// are copied. Null plan values stay unset in the request.
        pub fn expand(plan: &RepositoryResourceModel, mode: ExpandMode) -> RepositoryRequest {
            let admitted = admitted_fields(plan, mode);
            let mut request = RepositoryRequest::default();
            $(
                if admitted.contains(&stringify!($field)) {
                    request.$field = plan.$field.clone();
                }
            )*
            request
        }

        /// Copy a repository response into state.
        ///
        /// Missing values become zero values. Create-only fields keep
        /// whatever `state` already holds.
        pub fn flatten(remote: &RemoteRepository, state: &mut RepositoryResourceModel) {
            state.id = Some(remote.id);
            state.node_id = Some(remote.node_id.clone());
            $(
                if $rule.is_echoed() {
                    state.$field = Some(remote.$field.clone().unwrap_or_default());
                }
            )*
        }
    };
}

repository_fields! {
    name => FieldRule::Always,
    description => FieldRule::Always,
    homepage => FieldRule::Always,
    private => FieldRule::Always,
    has_issues => FieldRule::Always,
    has_projects => FieldRule::Always,
    has_wiki => FieldRule::Always,
    has_discussions => FieldRule::Always,
    is_template => FieldRule::Always,
    allow_squash_merge => FieldRule::Always,
    allow_merge_commit => FieldRule::Always,
    allow_rebase_merge => FieldRule::Always,
    allow_auto_merge => FieldRule::Always,
    delete_branch_on_merge => FieldRule::Always,
    squash_merge_commit_title => FieldRule::RequiresStrategy(MergeStrategy::Squash),
    squash_merge_commit_message => FieldRule::RequiresStrategy(MergeStrategy::Squash),
    merge_commit_title => FieldRule::RequiresStrategy(MergeStrategy::MergeCommit),
    merge_commit_message => FieldRule::RequiresStrategy(MergeStrategy::MergeCommit),
    auto_init => FieldRule::CreateOnly,
    gitignore_template => FieldRule::CreateOnly,
    license_template => FieldRule::CreateOnly,
}

/// Names of the fields `mode` may send for this plan.
pub fn admitted_fields(plan: &RepositoryResourceModel, mode: ExpandMode) -> Vec<&'static str> {
    FIELDS
        .iter()
        .filter(|field| field.rule.admits(plan, mode))
        .map(|field| field.name)
        .collect()
}
