//! # DynamoDB Module
//!
//! Table model and administrative access to Amazon DynamoDB.
//!
//! ## Components
//!
//! - `TableAdmin`: the two administrative capabilities the provisioner needs.
//! - `DynamoDb`: the `aws-sdk-dynamodb` implementation of `TableAdmin`.
//! - `TableDefinition` / `SecondaryIndex`: what a `CreateTable` request carries.
//! - `Attribute`, `FieldType`, `KeySchema`, `Capacity`, `Projection`: building blocks.
//!
//! ## Usage
//!
//! Build a `DynamoDb` from the `SdkConfig` returned by
//! [`crate::config::StoreConfig::load_sdk_config`].

mod client;
mod schema;
mod table;

use anyhow::Result;
use async_trait::async_trait;

pub use client::DynamoDb;
pub use schema::{Attribute, Capacity, FieldType, KeySchema, Projection};
pub use table::{SecondaryIndex, TableDefinition, DEFAULT_CAPACITY};

/// Administrative operations of the backing store.
#[async_trait]
pub trait TableAdmin: Send + Sync {
    /// Returns the names of every table visible to the caller.
    async fn list_table_names(&self) -> Result<Vec<String>>;

    /// Issues a single `CreateTable` request. Does not wait for the table to become active.
    async fn create_table(&self, table: &TableDefinition) -> Result<()>;
}
