use schemars::{Schema, schema_for};
use serde::Serialize;

use super::print_json;
use crate::data_sources::repository::{
    self as repository_data_source, RepositoryDataSourceConfig, RepositoryDataSourceModel,
};
use crate::functions::{FUNCTIONS, FunctionDefinition};
use crate::provider::{PROVIDER_TYPE_NAME, ProviderModel};
use crate::resources::repository::{self as repository_resource, RepositoryResourceModel};

#[derive(Serialize)]
pub struct DataSourceSchema {
    pub arguments: Schema,
    pub attributes: Schema,
}

/// JSON Schemas of everything the provider serves, keyed by type name.
#[derive(Serialize)]
pub struct ProviderSchema {
    pub type_name: &'static str,
    pub provider: Schema,
    pub resources: serde_json::Map<String, serde_json::Value>,
    pub data_sources: serde_json::Map<String, serde_json::Value>,
    pub functions: &'static [FunctionDefinition],
}

pub fn generate_schema() -> anyhow::Result<ProviderSchema> {
    let mut resources = serde_json::Map::new();
    resources.insert(
        repository_resource::TYPE_NAME.to_string(),
        serde_json::to_value(schema_for!(RepositoryResourceModel))?,
    );

    let mut data_sources = serde_json::Map::new();
    data_sources.insert(
        repository_data_source::TYPE_NAME.to_string(),
        serde_json::to_value(DataSourceSchema {
            arguments: schema_for!(RepositoryDataSourceConfig),
            attributes: schema_for!(RepositoryDataSourceModel),
        })?,
    );

    Ok(ProviderSchema {
        type_name: PROVIDER_TYPE_NAME,
        provider: schema_for!(ProviderModel),
        resources,
        data_sources,
        functions: FUNCTIONS,
    })
}

pub fn run() -> anyhow::Result<()> {
    print_json(&generate_schema()?)
}
