//! Creates whichever catalog tables are missing from the backing store.
//!
//! A run is a single linear pass: list the existing tables, expand the
//! catalog with the prefix, keep the definitions that are not there yet,
//! then dispatch one creation task per missing table. The tasks run
//! independently; one failing never cancels the others. The run returns
//! once every task has reported back.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use tokio::task::{JoinError, JoinSet};
use tracing::{error, info};

use crate::catalog::{list_definitions, Entity};
use crate::dynamodb::{TableAdmin, TableDefinition};
use crate::error::ProvisionError;

/// Result of one `CreateTable` request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableOutcome {
    pub table_name: String,
    pub result: Result<(), ProvisionError>,
}

/// Aggregated result of a provisioning run.
#[derive(Debug, Clone)]
pub struct ProvisionReport {
    pub prefix: String,
    pub existing: BTreeSet<String>,
    /// One entry per table that was missing, in catalog order.
    pub outcomes: Vec<TableOutcome>,
}

impl ProvisionReport {
    /// Names of the tables created during this run.
    pub fn created(&self) -> impl Iterator<Item = &str> {
        self.outcomes
            .iter()
            .filter(|outcome| outcome.result.is_ok())
            .map(|outcome| outcome.table_name.as_str())
    }

    /// Every creation failure of this run.
    pub fn failures(&self) -> impl Iterator<Item = &ProvisionError> {
        self.outcomes
            .iter()
            .filter_map(|outcome| outcome.result.as_ref().err())
    }

    pub fn is_success(&self) -> bool {
        self.failures().next().is_none()
    }

    pub fn log_summary(&self) {
        let created = self.created().count();
        let failed = self.failures().count();
        let present = Entity::ALL.len().saturating_sub(self.outcomes.len());

        if failed == 0 {
            info!(
                "Done ({}): {created} table(s) created, {present} already present",
                self.prefix
            );
        } else {
            error!(
                "Done with errors ({}): {created} table(s) created, {failed} failed, {present} already present",
                self.prefix
            );
        }
    }
}

/// Keeps the definitions whose table does not exist yet, preserving their order.
pub fn compute_missing(
    desired: Vec<TableDefinition>,
    existing: &BTreeSet<String>,
) -> Vec<TableDefinition> {
    desired
        .into_iter()
        .filter(|table| !existing.contains(table.name()))
        .collect()
}

/// Drives a provisioning run against a `TableAdmin`.
pub struct Provisioner {
    admin: Arc<dyn TableAdmin>,
}

impl Provisioner {
    pub fn new(admin: Arc<dyn TableAdmin>) -> Self {
        Self { admin }
    }

    /// Lists every existing table name.
    ///
    /// Any failure maps to `BackendUnavailable`; the caller must not go on
    /// creating tables after it.
    pub async fn list_existing_table_names(&self) -> Result<BTreeSet<String>, ProvisionError> {
        let names = self
            .admin
            .list_table_names()
            .await
            .map_err(|e| ProvisionError::BackendUnavailable(format!("{e:#}")))?;

        Ok(names.into_iter().collect())
    }

    /// Issues a single creation request.
    pub async fn create_table(&self, table: &TableDefinition) -> Result<(), ProvisionError> {
        create_with(self.admin.as_ref(), table).await
    }

    /// Dispatches one task per table and waits for all of them.
    ///
    /// Outcomes are logged as they arrive and returned in input order. A
    /// creation that panics or is cancelled counts as a failure of its table,
    /// with the panic message as the cause.
    pub async fn create_tables(&self, tables: Vec<TableDefinition>) -> Vec<TableOutcome> {
        let mut pending = BTreeMap::new();
        let mut join_set = JoinSet::new();

        for (position, table) in tables.into_iter().enumerate() {
            let table_name = table.name().to_string();
            pending.insert(position, table_name.clone());

            let admin = Arc::clone(&self.admin);
            let creation = tokio::spawn(async move { create_with(admin.as_ref(), &table).await });
            join_set.spawn(async move {
                let result = creation.await.unwrap_or_else(|e| {
                    Err(ProvisionError::CreateFailed {
                        table_name: table_name.clone(),
                        cause: join_failure_cause(e),
                    })
                });
                (position, TableOutcome { table_name, result })
            });
        }

        let mut outcomes = BTreeMap::new();

        while let Some(joined) = join_set.join_next().await {
            match joined {
                Ok((position, outcome)) => {
                    match &outcome.result {
                        Ok(()) => info!("  - SUCCESS: {}", outcome.table_name),
                        Err(e) => error!("  - ERROR: {e}"),
                    }
                    pending.remove(&position);
                    outcomes.insert(position, outcome);
                }
                Err(e) => error!("Table creation task did not complete: {e}"),
            }
        }

        // Only reachable when the runtime shuts down mid-run.
        for (position, table_name) in pending {
            let error = ProvisionError::CreateFailed {
                table_name: table_name.clone(),
                cause: "creation task was cancelled".to_string(),
            };
            error!("  - ERROR: {error}");
            outcomes.insert(
                position,
                TableOutcome {
                    table_name,
                    result: Err(error),
                },
            );
        }

        outcomes.into_values().collect()
    }

    /// Runs List -> Diff -> Create* for `prefix`.
    pub async fn run(&self, prefix: &str) -> Result<ProvisionReport, ProvisionError> {
        let existing = self.list_existing_table_names().await?;

        info!("Existing tables:");
        if existing.is_empty() {
            info!("  - no existing tables.");
        }
        for name in &existing {
            info!("  - {name}");
        }

        let missing = compute_missing(list_definitions(prefix), &existing);

        info!("Create missing tables:");
        if missing.is_empty() {
            info!("  - nothing to create.");
        }
        for table in &missing {
            info!("  - creating {}", table.name());
        }

        let outcomes = self.create_tables(missing).await;

        Ok(ProvisionReport {
            prefix: prefix.to_string(),
            existing,
            outcomes,
        })
    }
}

async fn create_with(admin: &dyn TableAdmin, table: &TableDefinition) -> Result<(), ProvisionError> {
    admin
        .create_table(table)
        .await
        .map_err(|e| ProvisionError::CreateFailed {
            table_name: table.name().to_string(),
            cause: format!("{e:#}"),
        })
}

/// Describes why a creation task ended without a result.
fn join_failure_cause(e: JoinError) -> String {
    if e.is_cancelled() {
        return "creation task was cancelled".to_string();
    }

    match e.try_into_panic() {
        Ok(payload) => {
            let message = payload
                .downcast_ref::<String>()
                .map(String::as_str)
                .or_else(|| payload.downcast_ref::<&str>().copied())
                .unwrap_or("non-string panic payload");
            format!("creation task panicked: {message}")
        }
        Err(e) => e.to_string(),
    }
}
