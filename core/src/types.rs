//! Schema types for pet-store payloads.
//!
//! # Design
//! `Pet` fields are private: a value is either built through `Pet::new` or
//! validated through `Pet::from_value`, and "updates" always yield a new
//! value via `Pet::updated`. Mappings use `BTreeMap` so that `to_value` is
//! deterministic. Absent optional fields are omitted on the way out and
//! accepted as either missing or `null` on the way in.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::SchemaError;

/// Free-form classification tag: string key to optional integer.
pub type Category = BTreeMap<String, Option<i64>>;

/// A single entry of `Pet::tags`; same shape as `Category`.
pub type Tag = BTreeMap<String, Option<i64>>;

/// Status values the service conventionally uses. Not enforced.
pub mod status {
    pub const AVAILABLE: &str = "available";
    pub const PENDING: &str = "pending";
    pub const SOLD: &str = "sold";
}

/// A pet record as sent to and returned by the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pet {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    category: Option<Category>,
    name: String,
    photo_urls: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    tags: Option<Vec<Tag>>,
    status: String,
}

impl Pet {
    pub fn new(name: impl Into<String>, photo_urls: Vec<String>, status: impl Into<String>) -> Self {
        Self {
            id: None,
            category: None,
            name: name.into(),
            photo_urls,
            tags: None,
            status: status.into(),
        }
    }

    #[must_use]
    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    #[must_use]
    pub fn with_tags(mut self, tags: Vec<Tag>) -> Self {
        self.tags = Some(tags);
        self
    }

    /// Validate a plain JSON mapping into a `Pet`.
    ///
    /// Fails when `name`, `photoUrls` or `status` is missing or has the wrong
    /// type, or when an optional field is present with the wrong type.
    /// Unknown keys are ignored.
    pub fn from_value(value: Value) -> Result<Self, SchemaError> {
        serde_json::from_value(value).map_err(|e| SchemaError::Invalid {
            entity: "pet",
            message: e.to_string(),
        })
    }

    /// Convert to a plain JSON mapping suitable for a request body.
    pub fn to_value(&self) -> Result<Value, SchemaError> {
        serde_json::to_value(self).map_err(|e| SchemaError::Encode {
            entity: "pet",
            message: e.to_string(),
        })
    }

    /// Copy of `self` with the fields set in `update` replaced.
    pub fn updated(&self, update: PetUpdate) -> Self {
        Self {
            id: update.id.or(self.id),
            category: update.category.or_else(|| self.category.clone()),
            name: update.name.unwrap_or_else(|| self.name.clone()),
            photo_urls: update.photo_urls.unwrap_or_else(|| self.photo_urls.clone()),
            tags: update.tags.or_else(|| self.tags.clone()),
            status: update.status.unwrap_or_else(|| self.status.clone()),
        }
    }

    pub const fn id(&self) -> Option<i64> {
        self.id
    }

    pub const fn category(&self) -> Option<&Category> {
        self.category.as_ref()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn photo_urls(&self) -> &[String] {
        &self.photo_urls
    }

    pub fn tags(&self) -> Option<&[Tag]> {
        self.tags.as_deref()
    }

    pub fn status(&self) -> &str {
        &self.status
    }
}

/// Field overrides for `Pet::updated`. `None` keeps the original value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PetUpdate {
    pub id: Option<i64>,
    pub category: Option<Category>,
    pub name: Option<String>,
    pub photo_urls: Option<Vec<String>>,
    pub tags: Option<Vec<Tag>>,
    pub status: Option<String>,
}

/// Result object returned by operation-style endpoints such as the form
/// status update and image upload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<i64>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ApiResponse {
    pub fn from_value(value: Value) -> Result<Self, SchemaError> {
        serde_json::from_value(value).map_err(|e| SchemaError::Invalid {
            entity: "api response",
            message: e.to_string(),
        })
    }
}
