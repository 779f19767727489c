use anyhow::{anyhow, Result};
use async_trait::async_trait;
use aws_sdk_dynamodb::{
    error::DisplayErrorContext,
    types::{
        AttributeDefinition, BillingMode, GlobalSecondaryIndex, KeySchemaElement, KeyType,
        Projection as SdkProjection, ProvisionedThroughput,
    },
    Client,
};
use tracing::debug;

use crate::dynamodb::{Capacity, KeySchema, SecondaryIndex, TableAdmin, TableDefinition};

/// DynamoDB client wrapper for table administration.
///
/// Owns an `aws_sdk_dynamodb::Client` built from an explicit `SdkConfig`.
/// Only the two administrative operations the provisioner needs are exposed:
///
/// - **ListTables**: every page is drained, following `LastEvaluatedTableName`.
/// - **CreateTable**: one request per definition, provisioned billing, with
///   every secondary index created as a global secondary index.
///
/// `CreateTable` returns as soon as DynamoDB accepts the request. The table is
/// still `CREATING` at that point and nothing here waits for it to become active.
#[derive(Debug, Clone)]
pub struct DynamoDb {
    client: Client,
}

impl DynamoDb {
    /// Creates a new `DynamoDb` instance.
    pub fn new(sdk_config: &aws_config::SdkConfig) -> Self {
        Self {
            client: Client::new(sdk_config),
        }
    }
}

/// One page of a `ListTables` response.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub(crate) struct TablePage {
    pub names: Vec<String>,
    pub last_evaluated_table_name: Option<String>,
}

/// Source of `ListTables` pages.
#[async_trait]
pub(crate) trait ListTablesPages: Send + Sync {
    async fn list_tables_page(&self, exclusive_start_table_name: Option<String>)
        -> Result<TablePage>;
}

#[async_trait]
impl ListTablesPages for Client {
    async fn list_tables_page(
        &self,
        exclusive_start_table_name: Option<String>,
    ) -> Result<TablePage> {
        let response = self
            .list_tables()
            .set_exclusive_start_table_name(exclusive_start_table_name)
            .send()
            .await
            .map_err(|e| anyhow!("{}", DisplayErrorContext(e)))?;

        Ok(TablePage {
            names: response.table_names().to_vec(),
            last_evaluated_table_name: response.last_evaluated_table_name,
        })
    }
}

/// Follows `LastEvaluatedTableName` until the last page.
pub(crate) async fn collect_table_names(pages: &dyn ListTablesPages) -> Result<Vec<String>> {
    let mut names = Vec::new();
    let mut last_evaluated_table_name = None;

    loop {
        let page = pages.list_tables_page(last_evaluated_table_name).await?;

        names.extend(page.names);
        debug!("Listed {} table names so far", names.len());

        last_evaluated_table_name = page.last_evaluated_table_name;

        if last_evaluated_table_name.is_none() {
            break;
        }
    }

    Ok(names)
}

#[async_trait]
impl TableAdmin for DynamoDb {
    async fn list_table_names(&self) -> Result<Vec<String>> {
        collect_table_names(&self.client).await
    }

    async fn create_table(&self, table: &TableDefinition) -> Result<()> {
        let indexes = global_secondary_indexes(table)?;

        self.client
            .create_table()
            .table_name(table.name())
            .billing_mode(BillingMode::Provisioned)
            .set_attribute_definitions(Some(attribute_definitions(table)?))
            .set_key_schema(Some(key_schema(table.key_schema())?))
            .provisioned_throughput(provisioned_throughput(table.capacity())?)
            .set_global_secondary_indexes((!indexes.is_empty()).then_some(indexes))
            .send()
            .await
            .map_err(|e| anyhow!("{}", DisplayErrorContext(e)))?;

        Ok(())
    }
}

fn attribute_definitions(table: &TableDefinition) -> Result<Vec<AttributeDefinition>> {
    table
        .attributes()
        .iter()
        .map(|attr| {
            AttributeDefinition::builder()
                .attribute_name(attr.name())
                .attribute_type(attr.field_type().scalar_type())
                .build()
                .map_err(Into::into)
        })
        .collect()
}

fn key_schema(key: &KeySchema) -> Result<Vec<KeySchemaElement>> {
    let mut elements = vec![KeySchemaElement::builder()
        .attribute_name(key.partition_key())
        .key_type(KeyType::Hash)
        .build()?];

    if let Some(sort_key) = key.sort_key() {
        elements.push(
            KeySchemaElement::builder()
                .attribute_name(sort_key)
                .key_type(KeyType::Range)
                .build()?,
        );
    }

    Ok(elements)
}

fn provisioned_throughput(capacity: Capacity) -> Result<ProvisionedThroughput> {
    Ok(ProvisionedThroughput::builder()
        .read_capacity_units(capacity.read_units)
        .write_capacity_units(capacity.write_units)
        .build()?)
}

fn global_secondary_index(index: &SecondaryIndex) -> Result<GlobalSecondaryIndex> {
    Ok(GlobalSecondaryIndex::builder()
        .index_name(index.name())
        .set_key_schema(Some(key_schema(index.key_schema())?))
        .projection(
            SdkProjection::builder()
                .projection_type(index.projection().projection_type())
                .build(),
        )
        .provisioned_throughput(provisioned_throughput(index.capacity())?)
        .build()?)
}

fn global_secondary_indexes(table: &TableDefinition) -> Result<Vec<GlobalSecondaryIndex>> {
    table.indexes().iter().map(global_secondary_index).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{list_definitions, Entity};
    use aws_sdk_dynamodb::types::{ProjectionType, ScalarAttributeType};
    use std::collections::HashMap;
    use tokio::sync::Mutex;

    fn definition(entity: Entity) -> TableDefinition {
        entity.definition("Test")
    }

    /// Serves canned pages keyed by the exclusive start table name.
    #[derive(Default)]
    struct CannedPages {
        pages: HashMap<Option<String>, Result<TablePage, String>>,
        requested: Mutex<Vec<Option<String>>>,
    }

    impl CannedPages {
        fn page(mut self, start: Option<&str>, names: &[&str], last: Option<&str>) -> Self {
            self.pages.insert(
                start.map(str::to_string),
                Ok(TablePage {
                    names: names.iter().map(|n| n.to_string()).collect(),
                    last_evaluated_table_name: last.map(str::to_string),
                }),
            );
            self
        }

        fn failing(mut self, start: Option<&str>, message: &str) -> Self {
            self.pages
                .insert(start.map(str::to_string), Err(message.to_string()));
            self
        }
    }

    #[async_trait]
    impl ListTablesPages for CannedPages {
        async fn list_tables_page(
            &self,
            exclusive_start_table_name: Option<String>,
        ) -> Result<TablePage> {
            self.requested
                .lock()
                .await
                .push(exclusive_start_table_name.clone());
            match self.pages.get(&exclusive_start_table_name) {
                Some(Ok(page)) => Ok(page.clone()),
                Some(Err(message)) => Err(anyhow!("{message}")),
                None => Err(anyhow!("unexpected start key {exclusive_start_table_name:?}")),
            }
        }
    }

    #[tokio::test]
    async fn single_page_listing_stops_after_one_request() {
        let pages = CannedPages::default().page(None, &["TestApi", "TestUser"], None);

        let names = collect_table_names(&pages).await.unwrap();

        assert_eq!(names, vec!["TestApi", "TestUser"]);
        assert_eq!(*pages.requested.lock().await, vec![None]);
    }

    #[tokio::test]
    async fn listing_follows_last_evaluated_table_name() {
        let pages = CannedPages::default()
            .page(None, &["TestApi", "TestApiKey"], Some("TestApiKey"))
            .page(Some("TestApiKey"), &["TestRole"], Some("TestRole"))
            .page(Some("TestRole"), &["TestUser"], None);

        let names = collect_table_names(&pages).await.unwrap();

        assert_eq!(names, vec!["TestApi", "TestApiKey", "TestRole", "TestUser"]);
        assert_eq!(
            *pages.requested.lock().await,
            vec![
                None,
                Some("TestApiKey".to_string()),
                Some("TestRole".to_string())
            ]
        );
    }

    #[tokio::test]
    async fn failure_on_a_later_page_fails_the_listing() {
        let pages = CannedPages::default()
            .page(None, &["TestApi"], Some("TestApi"))
            .failing(Some("TestApi"), "ProvisionedThroughputExceededException");

        let err = collect_table_names(&pages).await.unwrap_err();

        assert!(err.to_string().contains("ProvisionedThroughputExceededException"));
    }

    #[test]
    fn attribute_definitions_carry_scalar_types() {
        let attrs = attribute_definitions(&definition(Entity::ApiKey)).unwrap();
        let types: Vec<(&str, &ScalarAttributeType)> = attrs
            .iter()
            .map(|a| (a.attribute_name(), a.attribute_type()))
            .collect();

        assert_eq!(
            types,
            vec![
                ("key", &ScalarAttributeType::S),
                ("subscription", &ScalarAttributeType::S),
                ("plan", &ScalarAttributeType::S),
                ("updatedAt", &ScalarAttributeType::N),
            ]
        );
    }

    #[test]
    fn key_schema_marks_hash_then_range() {
        let elements = key_schema(&KeySchema::composite("userId", "referenceType")).unwrap();

        assert_eq!(elements.len(), 2);
        assert_eq!(elements[0].attribute_name(), "userId");
        assert_eq!(elements[0].key_type(), &KeyType::Hash);
        assert_eq!(elements[1].attribute_name(), "referenceType");
        assert_eq!(elements[1].key_type(), &KeyType::Range);
    }

    #[test]
    fn global_secondary_index_projects_all_with_capacity() {
        let indexes = global_secondary_indexes(&definition(Entity::Api)).unwrap();

        assert_eq!(indexes.len(), 1);
        let gsi = &indexes[0];
        assert_eq!(gsi.index_name(), "ApiVisibility");
        assert_eq!(gsi.key_schema().len(), 1);
        assert_eq!(gsi.key_schema()[0].attribute_name(), "visibility");
        assert_eq!(
            gsi.projection().and_then(|p| p.projection_type()),
            Some(&ProjectionType::All)
        );
        let throughput = gsi.provisioned_throughput().expect("throughput is set");
        assert_eq!(throughput.read_capacity_units(), 5);
        assert_eq!(throughput.write_capacity_units(), 5);
    }

    #[test]
    fn every_catalog_entry_converts_to_a_request() {
        for table in list_definitions("Test") {
            assert!(attribute_definitions(&table).is_ok(), "{}", table.name());
            assert!(key_schema(table.key_schema()).is_ok(), "{}", table.name());
            assert!(global_secondary_indexes(&table).is_ok(), "{}", table.name());
        }
    }
}
