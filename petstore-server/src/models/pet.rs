//! Pet record

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A pet as stored in the `pets` table and sent over the wire.
///
/// `id` stays `None` until the database assigns one on insert, and is left
/// out of the JSON encoding while unset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Pet {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: String,
}

impl Pet {
    /// An unsaved pet.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
        }
    }

    /// Same pet, carrying the id the database assigned.
    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn unsaved_pet_omits_id() {
        let body = serde_json::to_string(&Pet::new("Oliver")).unwrap();
        assert_eq!(body, r#"{"name":"Oliver"}"#);
    }

    #[test]
    fn saved_pet_encodes_id_first() {
        let body = serde_json::to_string(&Pet::new("Oliver").with_id(1)).unwrap();
        assert_eq!(body, r#"{"id":1,"name":"Oliver"}"#);
    }

    #[test]
    fn decodes_with_and_without_id() {
        let pet: Pet = serde_json::from_value(json!({ "name": "Oliver" })).unwrap();
        assert_eq!(pet, Pet::new("Oliver"));

        let pet: Pet = serde_json::from_value(json!({ "id": 1, "name": "Jemima" })).unwrap();
        assert_eq!(pet, Pet::new("Jemima").with_id(1));

        let pet: Pet = serde_json::from_value(json!({ "id": null, "name": "Rex" })).unwrap();
        assert_eq!(pet.id, None);
    }

    #[test]
    fn rejects_wrong_types() {
        assert!(serde_json::from_value::<Pet>(json!({ "id": "one", "name": "Rex" })).is_err());
        assert!(serde_json::from_value::<Pet>(json!({ "name": 7 })).is_err());
        assert!(serde_json::from_value::<Pet>(json!({})).is_err());
    }
}
