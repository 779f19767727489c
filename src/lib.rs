//! Provisions the Gravitee.io APIM management tables in DynamoDB.
//!
//! The catalog describes the 19 tables; the provisioner lists what already
//! exists and creates the rest, one independent request per table.

pub mod catalog;
pub mod command_line;
pub mod config;
pub mod dynamodb;
pub mod error;
pub mod exit_status;
pub mod logging;
pub mod provisioner;
