//! Toy entity model, DTOs and write-result shapes.
//!
//! JSON field names follow the storefront's document shape (`_id`,
//! camelCase attributes) rather than the snake_case column names.

use serde::de::{self, Unexpected};
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;
use toybox_core::types::{Timestamp, ToyId};

/// A row from the `toys_collection` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Toy {
    #[serde(rename = "_id")]
    pub id: ToyId,
    pub toy_name: Option<String>,
    pub photo: Option<String>,
    pub price: Option<f64>,
    pub quantity: Option<f64>,
    pub category: Option<String>,
    pub rating: Option<f64>,
    pub description: Option<String>,
    /// Owner of the listing. Never changed by an update.
    pub seller_email: Option<String>,
    /// Set once when the row is created.
    pub created_at: Timestamp,
}

impl Toy {
    /// Build a freshly inserted toy from client-supplied fields.
    pub fn from_new(id: ToyId, input: &NewToy, created_at: Timestamp) -> Self {
        Self {
            id,
            toy_name: input.fields.toy_name.clone(),
            photo: input.fields.photo.clone(),
            price: input.fields.price,
            quantity: input.fields.quantity,
            category: input.fields.category.clone(),
            rating: input.fields.rating,
            description: input.fields.description.clone(),
            seller_email: input.seller_email.clone(),
            created_at,
        }
    }

    /// Build the row an upsert creates when no toy with `id` exists.
    pub fn from_fields(id: ToyId, fields: &ToyFields, created_at: Timestamp) -> Self {
        Self {
            id,
            toy_name: fields.toy_name.clone(),
            photo: fields.photo.clone(),
            price: fields.price,
            quantity: fields.quantity,
            category: fields.category.clone(),
            rating: fields.rating,
            description: fields.description.clone(),
            seller_email: None,
            created_at,
        }
    }

    /// The current values of the mutable display fields.
    pub fn fields(&self) -> ToyFields {
        ToyFields {
            toy_name: self.toy_name.clone(),
            photo: self.photo.clone(),
            price: self.price,
            quantity: self.quantity,
            category: self.category.clone(),
            rating: self.rating,
            description: self.description.clone(),
        }
    }

    /// Overwrite every mutable display field. `id`, `seller_email` and
    /// `created_at` are left alone.
    pub fn apply(&mut self, fields: &ToyFields) {
        self.toy_name = fields.toy_name.clone();
        self.photo = fields.photo.clone();
        self.price = fields.price;
        self.quantity = fields.quantity;
        self.category = fields.category.clone();
        self.rating = fields.rating;
        self.description = fields.description.clone();
    }
}

/// The mutable display fields of a toy.
///
/// Used as the body of `PUT /updateToy/{id}`, which replaces all of them.
/// A field missing from the body is stored as null. Keys outside this set
/// (`_id`, `sellerEmail`, `createdAt`) are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToyFields {
    #[serde(default)]
    pub toy_name: Option<String>,
    #[serde(default)]
    pub photo: Option<String>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub price: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub quantity: Option<f64>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub rating: Option<f64>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Read a numeric field that the storefront may send as a number, a numeric
/// string, or null. A blank string counts as null.
fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Loose {
        Number(f64),
        Text(String),
    }

    match Option::<Loose>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Loose::Number(n)) => Ok(Some(n)),
        Some(Loose::Text(text)) if text.trim().is_empty() => Ok(None),
        Some(Loose::Text(text)) => text
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|n| n.is_finite())
            .map(Some)
            .ok_or_else(|| de::Error::invalid_value(Unexpected::Str(&text), &"a number")),
    }
}

/// DTO for `POST /addToys`: the display fields plus the owning seller.
///
/// `_id` and `createdAt` are assigned by the store; client values for them
/// are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewToy {
    #[serde(flatten)]
    pub fields: ToyFields,
    #[serde(default)]
    pub seller_email: Option<String>,
}

// ---------------------------------------------------------------------------
// Write results
// ---------------------------------------------------------------------------

/// Outcome of an insert.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertOneResult {
    pub acknowledged: bool,
    pub inserted_id: ToyId,
}

impl InsertOneResult {
    pub fn new(inserted_id: ToyId) -> Self {
        Self {
            acknowledged: true,
            inserted_id,
        }
    }
}

/// Outcome of a full-field replace with upsert.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateResult {
    pub acknowledged: bool,
    pub matched_count: u64,
    pub modified_count: u64,
    pub upserted_count: u64,
    pub upserted_id: Option<ToyId>,
}

impl UpdateResult {
    /// An existing toy was found and at least one field changed.
    pub fn modified() -> Self {
        Self {
            acknowledged: true,
            matched_count: 1,
            modified_count: 1,
            upserted_count: 0,
            upserted_id: None,
        }
    }

    /// An existing toy was found but already held the given values.
    pub fn unchanged() -> Self {
        Self {
            acknowledged: true,
            matched_count: 1,
            modified_count: 0,
            upserted_count: 0,
            upserted_id: None,
        }
    }

    /// No toy matched, so a new one was created under `id`.
    pub fn upserted(id: ToyId) -> Self {
        Self {
            acknowledged: true,
            matched_count: 0,
            modified_count: 0,
            upserted_count: 1,
            upserted_id: Some(id),
        }
    }
}

/// Outcome of a delete by id.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteResult {
    pub acknowledged: bool,
    pub deleted_count: u64,
}

impl DeleteResult {
    pub fn new(deleted_count: u64) -> Self {
        Self {
            acknowledged: true,
            deleted_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use toybox_core::types::new_toy_id;

    use super::*;

    #[test]
    fn toy_serializes_with_document_field_names() {
        let id = new_toy_id();
        let toy = Toy {
            id,
            toy_name: Some("Teddy Bear".into()),
            photo: None,
            price: Some(12.5),
            quantity: Some(3.0),
            category: Some("plush".into()),
            rating: Some(4.5),
            description: None,
            seller_email: Some("seller@example.com".into()),
            created_at: chrono::Utc::now(),
        };

        let value = serde_json::to_value(&toy).unwrap();
        assert_eq!(value["_id"], json!(id.to_string()));
        assert_eq!(value["toyName"], "Teddy Bear");
        assert_eq!(value["sellerEmail"], "seller@example.com");
        assert!(value["createdAt"].is_string());
        assert!(value["photo"].is_null());
    }

    #[test]
    fn new_toy_ignores_server_assigned_keys() {
        let input: NewToy = serde_json::from_value(json!({
            "_id": "not-used",
            "createdAt": "2020-01-01T00:00:00Z",
            "toyName": "Robot",
            "price": 20,
            "sellerEmail": "a@b.c"
        }))
        .unwrap();

        assert_eq!(input.fields.toy_name.as_deref(), Some("Robot"));
        assert_eq!(input.fields.price, Some(20.0));
        assert_eq!(input.seller_email.as_deref(), Some("a@b.c"));
    }

    #[test]
    fn numeric_fields_accept_fractions_and_numeric_strings() {
        let fields: ToyFields = serde_json::from_value(json!({
            "price": "9.5",
            "quantity": 2.5,
            "rating": " 4 "
        }))
        .unwrap();

        assert_eq!(fields.price, Some(9.5));
        assert_eq!(fields.quantity, Some(2.5));
        assert_eq!(fields.rating, Some(4.0));
    }

    #[test]
    fn blank_or_null_numbers_are_missing() {
        let fields: ToyFields =
            serde_json::from_value(json!({"price": "", "quantity": null})).unwrap();
        assert_eq!(fields.price, None);
        assert_eq!(fields.quantity, None);
    }

    #[test]
    fn non_numeric_text_is_rejected() {
        let result = serde_json::from_value::<ToyFields>(json!({"price": "cheap"}));
        assert!(result.is_err());

        let result = serde_json::from_value::<NewToy>(json!({"quantity": "NaN"}));
        assert!(result.is_err());
    }

    #[test]
    fn fields_ignore_seller_email() {
        let fields: ToyFields = serde_json::from_value(json!({
            "toyName": "Kite",
            "sellerEmail": "intruder@example.com"
        }))
        .unwrap();

        assert_eq!(fields.toy_name.as_deref(), Some("Kite"));
        assert_eq!(fields.price, None);
    }

    #[test]
    fn apply_keeps_identity_and_owner() {
        let created_at = chrono::Utc::now();
        let id = new_toy_id();
        let mut toy = Toy::from_new(
            id,
            &NewToy {
                fields: ToyFields {
                    toy_name: Some("Old".into()),
                    ..ToyFields::default()
                },
                seller_email: Some("owner@example.com".into()),
            },
            created_at,
        );

        toy.apply(&ToyFields {
            toy_name: Some("New".into()),
            price: Some(9.0),
            ..ToyFields::default()
        });

        assert_eq!(toy.id, id);
        assert_eq!(toy.toy_name.as_deref(), Some("New"));
        assert_eq!(toy.price, Some(9.0));
        assert_eq!(toy.seller_email.as_deref(), Some("owner@example.com"));
        assert_eq!(toy.created_at, created_at);
    }

    #[test]
    fn update_result_uses_driver_field_names() {
        let id = new_toy_id();
        let value = serde_json::to_value(UpdateResult::upserted(id)).unwrap();
        assert_eq!(
            value,
            json!({
                "acknowledged": true,
                "matchedCount": 0,
                "modifiedCount": 0,
                "upsertedCount": 1,
                "upsertedId": id.to_string(),
            })
        );
    }

    #[test]
    fn delete_result_uses_driver_field_names() {
        let value = serde_json::to_value(DeleteResult::new(0)).unwrap();
        assert_eq!(value, json!({"acknowledged": true, "deletedCount": 0}));
    }
}
