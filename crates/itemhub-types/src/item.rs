//! Item types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Identifier assigned to an item by its store
pub type ItemId = i32;

/// The single managed resource.
///
/// Timestamps are only tracked by the relational backends; the in-memory
/// store leaves them unset and they are then omitted from the JSON body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Body of `POST /api/items` as sent by the client
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateItemRequest {
    pub name: Option<String>,
    pub description: Option<String>,
}

/// A validated item ready to be inserted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewItem {
    pub name: String,
    pub description: Option<String>,
}

impl NewItem {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Partial update, `PUT /api/items/:id`.
///
/// Absent (or null) fields keep their stored value. An explicitly empty
/// `name` is accepted here, unlike on create.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemPatch {
    pub name: Option<String>,
    pub description: Option<String>,
}

impl ItemPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ItemValidationError {
    #[error("Name is required")]
    NameRequired,
}

impl TryFrom<CreateItemRequest> for NewItem {
    type Error = ItemValidationError;

    fn try_from(req: CreateItemRequest) -> Result<Self, Self::Error> {
        match req.name {
            Some(name) if !name.is_empty() => Ok(NewItem {
                name,
                description: req.description,
            }),
            _ => Err(ItemValidationError::NameRequired),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_item_serializes_camel_case_timestamps() {
        let ts = Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap();
        let item = Item {
            id: 7,
            name: "Widget".to_string(),
            description: None,
            created_at: Some(ts),
            updated_at: Some(ts),
        };

        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["description"], serde_json::Value::Null);
        assert_eq!(json["createdAt"], "2024-05-01T12:30:00Z");
        assert_eq!(json["updatedAt"], "2024-05-01T12:30:00Z");
        assert!(json.get("created_at").is_none());
    }

    #[test]
    fn test_item_without_timestamps_omits_them() {
        let item = Item {
            id: 1,
            name: "Widget".to_string(),
            description: Some(String::new()),
            created_at: None,
            updated_at: None,
        };

        let json = serde_json::to_value(&item).unwrap();
        let obj = json.as_object().unwrap();
        assert_eq!(obj.len(), 3);
        assert_eq!(json["description"], "");
    }

    #[test]
    fn test_create_request_requires_name() {
        let missing: CreateItemRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(
            NewItem::try_from(missing),
            Err(ItemValidationError::NameRequired)
        );

        let null: CreateItemRequest = serde_json::from_str(r#"{"name": null}"#).unwrap();
        assert!(NewItem::try_from(null).is_err());

        let empty: CreateItemRequest = serde_json::from_str(r#"{"name": ""}"#).unwrap();
        assert!(NewItem::try_from(empty).is_err());
    }

    #[test]
    fn test_create_request_keeps_description() {
        let req: CreateItemRequest =
            serde_json::from_str(r#"{"name": "Widget", "description": "blue"}"#).unwrap();
        let item = NewItem::try_from(req).unwrap();
        assert_eq!(item, NewItem::new("Widget").with_description("blue"));
    }

    #[test]
    fn test_patch_treats_null_as_absent() {
        let patch: ItemPatch = serde_json::from_str(r#"{"name": null}"#).unwrap();
        assert!(patch.is_empty());

        let patch: ItemPatch = serde_json::from_str(r#"{"description": "new"}"#).unwrap();
        assert_eq!(patch.name, None);
        assert_eq!(patch.description.as_deref(), Some("new"));
    }

    #[test]
    fn test_validation_error_message() {
        assert_eq!(
            ItemValidationError::NameRequired.to_string(),
            "Name is required"
        );
    }
}
