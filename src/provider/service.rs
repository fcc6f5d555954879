//! Host boundary: JSON payloads in, JSON payloads or diagnostics out.
//!
//! A protocol server decodes the host's wire messages into
//! `serde_json::Value` and dispatches them through `ProviderService`; the
//! local CLI drives the same trait.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::diagnostics::{Diagnostic, Diagnostics};
use super::{ConfiguredProvider, PROVIDER_TYPE_NAME};
use crate::data_sources::repository::{self as repository_data_source, RepositoryDataSource};
use crate::functions;
use crate::resources::repository::{self as repository_resource, RepositoryResource};

/// Names of everything the provider serves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProviderMetadata {
    pub type_name: &'static str,
    pub resources: Vec<&'static str>,
    pub data_sources: Vec<&'static str>,
    pub functions: Vec<&'static str>,
}

#[async_trait::async_trait]
pub trait ProviderService: Send + Sync {
    fn metadata(&self) -> ProviderMetadata;

    async fn create_resource(&self, type_name: &str, planned_state: Value)
    -> Result<Value, Diagnostics>;

    /// `Ok(None)` when the remote object no longer exists.
    async fn read_resource(
        &self,
        type_name: &str,
        current_state: Value,
    ) -> Result<Option<Value>, Diagnostics>;

    async fn update_resource(
        &self,
        type_name: &str,
        prior_state: Value,
        planned_state: Value,
    ) -> Result<Value, Diagnostics>;

    async fn delete_resource(&self, type_name: &str, current_state: Value)
    -> Result<(), Diagnostics>;

    async fn import_resource(&self, type_name: &str, id: &str) -> Result<Value, Diagnostics>;

    async fn read_data_source(&self, type_name: &str, config: Value)
    -> Result<Value, Diagnostics>;

    async fn call_function(&self, name: &str, arguments: Vec<Value>) -> Result<Value, Diagnostics>;
}

fn decode<T: DeserializeOwned>(what: &str, value: Value) -> Result<T, Diagnostics> {
    serde_json::from_value(value).map_err(|err| {
        Diagnostic::error(
            "Value Conversion Error",
            format!("Unable to decode the {what}: {err}"),
        )
        .into()
    })
}

fn encode<T: Serialize>(what: &str, value: &T) -> Result<Value, Diagnostics> {
    serde_json::to_value(value).map_err(|err| {
        Diagnostic::error(
            "Value Conversion Error",
            format!("Unable to encode the {what}: {err}"),
        )
        .into()
    })
}

fn expect_type(kind: &str, expected: &str, actual: &str) -> Result<(), Diagnostics> {
    if expected == actual {
        return Ok(());
    }
    Err(Diagnostic::error(
        "Unexpected Resource Type",
        format!("Expected {kind} type {expected}, got: {actual}"),
    )
    .into())
}

impl ConfiguredProvider {
    fn repository(&self, type_name: &str) -> Result<RepositoryResource, Diagnostics> {
        expect_type("resource", repository_resource::TYPE_NAME, type_name)?;
        Ok(RepositoryResource::new(self.data().clone()))
    }
}

#[async_trait::async_trait]
impl ProviderService for ConfiguredProvider {
    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            type_name: PROVIDER_TYPE_NAME,
            resources: vec![repository_resource::TYPE_NAME],
            data_sources: vec![repository_data_source::TYPE_NAME],
            functions: functions::FUNCTIONS.iter().map(|f| f.name).collect(),
        }
    }

    async fn create_resource(
        &self,
        type_name: &str,
        planned_state: Value,
    ) -> Result<Value, Diagnostics> {
        let resource = self.repository(type_name)?;
        let plan = decode("planned state", planned_state)?;
        // Deadline handled inside so a half-finished template create is cleaned up.
        let state = resource.create(plan).await?;
        encode("new state", &state)
    }

    async fn read_resource(
        &self,
        type_name: &str,
        current_state: Value,
    ) -> Result<Option<Value>, Diagnostics> {
        let resource = self.repository(type_name)?;
        let state = decode("current state", current_state)?;
        match self.data().within_deadline(resource.read(state)).await? {
            Some(state) => encode("new state", &state).map(Some),
            None => Ok(None),
        }
    }

    async fn update_resource(
        &self,
        type_name: &str,
        prior_state: Value,
        planned_state: Value,
    ) -> Result<Value, Diagnostics> {
        let resource = self.repository(type_name)?;
        let prior = decode("prior state", prior_state)?;
        let plan = decode("planned state", planned_state)?;
        let state = self
            .data()
            .within_deadline(resource.update(plan, prior))
            .await?;
        encode("new state", &state)
    }

    async fn delete_resource(
        &self,
        type_name: &str,
        current_state: Value,
    ) -> Result<(), Diagnostics> {
        let resource = self.repository(type_name)?;
        let state = decode("current state", current_state)?;
        self.data().within_deadline(resource.delete(state)).await
    }

    async fn import_resource(&self, type_name: &str, id: &str) -> Result<Value, Diagnostics> {
        let resource = self.repository(type_name)?;
        let state = resource.import(id)?;
        encode("imported state", &state)
    }

    async fn read_data_source(&self, type_name: &str, config: Value) -> Result<Value, Diagnostics> {
        expect_type("data source", repository_data_source::TYPE_NAME, type_name)?;
        let config = decode("data source configuration", config)?;
        let data_source = RepositoryDataSource::new(self.data().clone());
        let model = self
            .data()
            .within_deadline(data_source.read(config))
            .await?;
        encode("data source state", &model)
    }

    async fn call_function(&self, name: &str, arguments: Vec<Value>) -> Result<Value, Diagnostics> {
        functions::call(name, &arguments)
            .map_err(|err| Diagnostic::error("Function Error", err.to_string()).into())
    }
}
