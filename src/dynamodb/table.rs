use crate::dynamodb::{Attribute, Capacity, FieldType, KeySchema, Projection};

/// Capacity applied to every table and index unless overridden.
pub const DEFAULT_CAPACITY: Capacity = Capacity::new(5, 5);

/// A global secondary index declared on a table.
///
/// The index has its own key schema, drawn from the attributes declared on
/// the owning table, its own projection and its own provisioned capacity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecondaryIndex {
    name: String,
    key_schema: KeySchema,
    projection: Projection,
    capacity: Capacity,
}

impl SecondaryIndex {
    /// Creates an index projecting all attributes with the default capacity.
    pub fn new(name: impl Into<String>, key_schema: KeySchema) -> Self {
        Self {
            name: name.into(),
            key_schema,
            projection: Projection::All,
            capacity: DEFAULT_CAPACITY,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn key_schema(&self) -> &KeySchema {
        &self.key_schema
    }

    pub fn projection(&self) -> Projection {
        self.projection
    }

    pub fn capacity(&self) -> Capacity {
        self.capacity
    }
}

/// Everything needed to issue a `CreateTable` request for one table.
///
/// # Table Structure
///
/// - **Table Name**: prefix + the entity suffix, unique within the account and region.
/// - **Attribute Definitions**: the typed attributes used by any key schema.
/// - **Key Schema**: a partition key and an optional sort key.
/// - **Capacity**: provisioned read and write units.
/// - **Secondary Indexes**: zero or more global secondary indexes.
///
/// # Example
///
/// ```
/// use apim_dynamodb_setup::dynamodb::{FieldType, KeySchema, SecondaryIndex, TableDefinition};
///
/// let table = TableDefinition::new("TestApi", KeySchema::partition("id"))
///     .with_attribute("id", FieldType::String)
///     .with_attribute("visibility", FieldType::String)
///     .with_index(SecondaryIndex::new("ApiVisibility", KeySchema::partition("visibility")));
///
/// assert_eq!(table.indexes().len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableDefinition {
    name: String,
    attributes: Vec<Attribute>,
    key_schema: KeySchema,
    capacity: Capacity,
    indexes: Vec<SecondaryIndex>,
}

impl TableDefinition {
    /// Creates a definition with no declared attributes and the default capacity.
    ///
    /// # Arguments
    ///
    /// * `name` - The full table name, prefix included.
    /// * `key_schema` - The table's primary key.
    pub fn new(name: impl Into<String>, key_schema: KeySchema) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            key_schema,
            capacity: DEFAULT_CAPACITY,
            indexes: Vec::new(),
        }
    }

    /// Declares a typed attribute and returns the modified definition.
    pub fn with_attribute(mut self, name: impl Into<String>, field_type: FieldType) -> Self {
        self.attributes.push(Attribute::new(name, field_type));
        self
    }

    /// Adds a global secondary index and returns the modified definition.
    pub fn with_index(mut self, index: SecondaryIndex) -> Self {
        self.indexes.push(index);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    pub fn key_schema(&self) -> &KeySchema {
        &self.key_schema
    }

    pub fn capacity(&self) -> Capacity {
        self.capacity
    }

    pub fn indexes(&self) -> &[SecondaryIndex] {
        &self.indexes
    }

    /// Looks up a declared attribute by name.
    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|attr| attr.name() == name)
    }

    /// Looks up a secondary index by name.
    pub fn index(&self, name: &str) -> Option<&SecondaryIndex> {
        self.indexes.iter().find(|index| index.name() == name)
    }
}
