//! Data sources exposed by the provider.

pub mod repository;
