use aws_sdk_dynamodb::types::{ProjectionType, ScalarAttributeType};

/// Represents the type of a key attribute in a DynamoDB table.
///
/// DynamoDB only requires types for attributes that take part in a key
/// schema (the table's primary key or a secondary index key). Every other
/// attribute of an item stays schemaless.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    /// Represents a string field (`S`).
    String,
    /// Represents a number field (`N`).
    Number,
}

impl FieldType {
    /// Returns the DynamoDB scalar type for this field.
    pub fn scalar_type(self) -> ScalarAttributeType {
        match self {
            FieldType::String => ScalarAttributeType::S,
            FieldType::Number => ScalarAttributeType::N,
        }
    }
}

/// A named, typed attribute declared in a table's attribute definitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    name: String,
    field_type: FieldType,
}

impl Attribute {
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn field_type(&self) -> FieldType {
        self.field_type
    }
}

/// The key schema of a table or of a secondary index.
///
/// # Primary Key
///
/// A key schema is either:
/// - **Simple**: just a partition (`HASH`) key.
/// - **Composite**: a partition key plus a sort (`RANGE`) key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeySchema {
    partition_key: String,
    sort_key: Option<String>,
}

impl KeySchema {
    /// Creates a simple key schema with only a partition key.
    pub fn partition(partition_key: impl Into<String>) -> Self {
        Self {
            partition_key: partition_key.into(),
            sort_key: None,
        }
    }

    /// Creates a composite key schema.
    pub fn composite(partition_key: impl Into<String>, sort_key: impl Into<String>) -> Self {
        Self {
            partition_key: partition_key.into(),
            sort_key: Some(sort_key.into()),
        }
    }

    pub fn partition_key(&self) -> &str {
        &self.partition_key
    }

    pub fn sort_key(&self) -> Option<&str> {
        self.sort_key.as_deref()
    }

    /// Returns every attribute name the key schema references, partition key first.
    pub fn attribute_names(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.partition_key.as_str()).chain(self.sort_key.as_deref())
    }
}

/// Provisioned read/write capacity units for a table or an index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capacity {
    pub read_units: i64,
    pub write_units: i64,
}

impl Capacity {
    pub const fn new(read_units: i64, write_units: i64) -> Self {
        Self {
            read_units,
            write_units,
        }
    }
}

/// Which attributes a secondary index copies from the base table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Projection {
    /// Every attribute of the base item is projected into the index.
    All,
}

impl Projection {
    pub fn projection_type(self) -> ProjectionType {
        match self {
            Projection::All => ProjectionType::All,
        }
    }
}
