use uuid::Uuid;

/// Identifies entities that expose a stable unique identifier.
pub trait Identifiable {
    fn id(&self) -> &str;
}

/// Provides access to a human-friendly entity name.
pub trait NamedEntity {
    fn name(&self) -> &str;
}

/// Generates a fresh identifier for user-created entities.
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// Locates an entity by id within a slice.
pub fn find_by_id<'a, T: Identifiable>(items: &'a [T], id: &str) -> Option<&'a T> {
    items.iter().find(|item| item.id() == id)
}

/// Serde helpers for amounts persisted as JSON numbers.
///
/// Stored data may carry fractional or negative numbers written by older
/// clients; these are read back as whole non-negative dollars.
pub(crate) mod whole_dollars {
    use serde::{Deserialize, Deserializer};

    use crate::utils::input::whole_dollars;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<u64, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = f64::deserialize(deserializer)?;
        Ok(whole_dollars(value))
    }
}

/// Accepts identifiers stored either as strings or as numbers.
pub(crate) mod flexible_id {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(match value {
            Value::String(id) => id,
            Value::Number(id) => id.to_string(),
            _ => super::new_id(),
        })
    }
}
