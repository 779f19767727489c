//! The fixed set of API-management tables.
//!
//! Every table name is the run prefix followed by the entity suffix, e.g.
//! `GraviteeioApimApiKey`. Definitions are rebuilt on every call and depend
//! on nothing but the prefix.

use crate::dynamodb::{FieldType, KeySchema, SecondaryIndex, TableDefinition};

/// Prefix used when none is given on the command line.
pub const DEFAULT_PREFIX: &str = "GraviteeioApim";

/// A logical table of the management repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Entity {
    Api,
    ApiKey,
    Application,
    Event,
    EventSearchIndex,
    Group,
    Membership,
    Metadata,
    Page,
    Plan,
    Subscription,
    Tag,
    Tenant,
    User,
    View,
    Role,
    Rating,
    RatingAnswer,
    Audit,
}

impl Entity {
    /// Every entity, in provisioning order.
    pub const ALL: [Entity; 19] = [
        Entity::Api,
        Entity::ApiKey,
        Entity::Application,
        Entity::Event,
        Entity::EventSearchIndex,
        Entity::Group,
        Entity::Membership,
        Entity::Metadata,
        Entity::Page,
        Entity::Plan,
        Entity::Subscription,
        Entity::Tag,
        Entity::Tenant,
        Entity::User,
        Entity::View,
        Entity::Role,
        Entity::Rating,
        Entity::RatingAnswer,
        Entity::Audit,
    ];

    /// The fixed part of the table name.
    pub fn suffix(self) -> &'static str {
        match self {
            Entity::Api => "Api",
            Entity::ApiKey => "ApiKey",
            Entity::Application => "Application",
            Entity::Event => "Event",
            Entity::EventSearchIndex => "EventSearchIndex",
            Entity::Group => "Group",
            Entity::Membership => "Membership",
            Entity::Metadata => "Metadata",
            Entity::Page => "Page",
            Entity::Plan => "Plan",
            Entity::Subscription => "Subscription",
            Entity::Tag => "Tag",
            Entity::Tenant => "Tenant",
            Entity::User => "User",
            Entity::View => "View",
            Entity::Role => "Role",
            Entity::Rating => "Rating",
            Entity::RatingAnswer => "RatingAnswer",
            Entity::Audit => "Audit",
        }
    }

    pub fn table_name(self, prefix: &str) -> String {
        format!("{prefix}{}", self.suffix())
    }

    /// Builds the table definition for this entity under `prefix`.
    pub fn definition(self, prefix: &str) -> TableDefinition {
        let name = self.table_name(prefix);

        match self {
            Entity::Api => id_table(name)
                .with_attribute("visibility", FieldType::String)
                .with_index(SecondaryIndex::new(
                    "ApiVisibility",
                    KeySchema::partition("visibility"),
                )),
            Entity::ApiKey => TableDefinition::new(name, KeySchema::partition("key"))
                .with_attribute("key", FieldType::String)
                .with_attribute("subscription", FieldType::String)
                .with_attribute("plan", FieldType::String)
                .with_attribute("updatedAt", FieldType::Number)
                .with_index(SecondaryIndex::new(
                    "ApiKeySubscription",
                    KeySchema::partition("subscription"),
                ))
                .with_index(SecondaryIndex::new(
                    "ApiKeyPlan",
                    KeySchema::composite("plan", "updatedAt"),
                )),
            Entity::Application => id_table(name)
                .with_attribute("status", FieldType::String)
                .with_index(SecondaryIndex::new(
                    "ApplicationStatus",
                    KeySchema::partition("status"),
                )),
            Entity::Event => id_table(name)
                .with_attribute("updatedAt", FieldType::Number)
                .with_index(SecondaryIndex::new(
                    "EventKeyAndUpdateDate",
                    KeySchema::composite("id", "updatedAt"),
                )),
            Entity::Membership => id_table(name)
                .with_attribute("userId", FieldType::String)
                .with_attribute("referenceType", FieldType::String)
                .with_attribute("referenceId", FieldType::String)
                .with_index(SecondaryIndex::new(
                    "UserAndReferenceType",
                    KeySchema::composite("userId", "referenceType"),
                ))
                .with_index(SecondaryIndex::new(
                    "ReferenceTypeAndId",
                    KeySchema::composite("referenceId", "referenceType"),
                )),
            Entity::Metadata => id_table(name)
                .with_attribute("referenceType", FieldType::String)
                .with_attribute("referenceId", FieldType::String)
                .with_index(SecondaryIndex::new(
                    "Reference",
                    KeySchema::composite("referenceType", "referenceId"),
                )),
            Entity::User => TableDefinition::new(name, KeySchema::partition("username"))
                .with_attribute("username", FieldType::String),
            // scope is stored as a number
            Entity::Role => id_table(name)
                .with_attribute("scope", FieldType::Number)
                .with_index(SecondaryIndex::new(
                    "RoleScope",
                    KeySchema::partition("scope"),
                )),
            Entity::Rating => id_table(name)
                .with_attribute("api", FieldType::String)
                .with_attribute("user", FieldType::String)
                .with_index(SecondaryIndex::new(
                    "RatingApiAndUser",
                    KeySchema::composite("api", "user"),
                )),
            Entity::RatingAnswer => id_table(name)
                .with_attribute("rating", FieldType::String)
                .with_index(SecondaryIndex::new(
                    "RatingAnswer",
                    KeySchema::partition("rating"),
                )),
            Entity::EventSearchIndex
            | Entity::Group
            | Entity::Page
            | Entity::Plan
            | Entity::Subscription
            | Entity::Tag
            | Entity::Tenant
            | Entity::View
            | Entity::Audit => id_table(name),
        }
    }
}

/// A table keyed on a single string `id`.
fn id_table(name: String) -> TableDefinition {
    TableDefinition::new(name, KeySchema::partition("id")).with_attribute("id", FieldType::String)
}

/// Returns the definitions of every table for `prefix`, in provisioning order.
pub fn list_definitions(prefix: &str) -> Vec<TableDefinition> {
    Entity::ALL
        .iter()
        .map(|entity| entity.definition(prefix))
        .collect()
}
