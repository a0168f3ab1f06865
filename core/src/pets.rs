//! Typed operations for the `/pet` endpoints.
//!
//! Each operation serializes through the schema types on the way out and
//! re-validates the reply on the way in, so a payload that drifts from the
//! expected shape fails as `ApiError::Schema` instead of leaking through as
//! raw JSON.

use serde_json::Value;

use crate::client::ApiClient;
use crate::error::{ApiError, SchemaError};
use crate::http::{FilePart, MultipartField, RequestBody};
use crate::transport::Transport;
use crate::types::{ApiResponse, Pet};

impl<T: Transport> ApiClient<T> {
    /// `POST /pet`
    pub fn add_pet(&self, pet: &Pet) -> Result<Pet, ApiError> {
        let value = self.post("/pet", Some(RequestBody::Json(pet.to_value()?)))?;
        Ok(Pet::from_value(value)?)
    }

    /// `GET /pet/{id}`
    pub fn get_pet(&self, id: i64) -> Result<Pet, ApiError> {
        let value = self.get(&format!("/pet/{id}"), &[])?;
        Ok(Pet::from_value(value)?)
    }

    /// `PUT /pet`, replacing the stored record with `pet`.
    pub fn update_pet(&self, pet: &Pet) -> Result<Pet, ApiError> {
        let value = self.put("/pet", pet.to_value()?)?;
        Ok(Pet::from_value(value)?)
    }

    /// `DELETE /pet/{id}`; returns the status code.
    pub fn delete_pet(&self, id: i64) -> Result<u16, ApiError> {
        self.delete(&format!("/pet/{id}"))
    }

    /// `GET /pet/findByStatus`, one `status` parameter per entry.
    pub fn find_pets_by_status(&self, statuses: &[&str]) -> Result<Vec<Pet>, ApiError> {
        let params: Vec<(&str, &str)> = statuses.iter().map(|s| ("status", *s)).collect();
        match self.get("/pet/findByStatus", &params)? {
            Value::Array(items) => items
                .into_iter()
                .map(|item| Pet::from_value(item).map_err(ApiError::from))
                .collect(),
            other => Err(SchemaError::Invalid {
                entity: "pet list",
                message: format!("expected an array, got {other}"),
            }
            .into()),
        }
    }

    /// `POST /pet/{id}` form-encoded. Only the provided fields are sent.
    pub fn update_pet_with_form(
        &self,
        id: i64,
        name: Option<&str>,
        status: Option<&str>,
    ) -> Result<ApiResponse, ApiError> {
        let mut pairs = Vec::new();
        if let Some(name) = name {
            pairs.push(("name", name));
        }
        if let Some(status) = status {
            pairs.push(("status", status));
        }
        let value = self.post(&format!("/pet/{id}"), Some(RequestBody::form(&pairs)))?;
        Ok(ApiResponse::from_value(value)?)
    }

    /// `POST /pet/{id}/uploadImage` as multipart, with the file under `file`.
    pub fn upload_image(
        &self,
        id: i64,
        file: FilePart,
        additional_metadata: Option<&str>,
    ) -> Result<ApiResponse, ApiError> {
        let mut fields = Vec::with_capacity(2);
        if let Some(metadata) = additional_metadata {
            fields.push(MultipartField::Text {
                name: "additionalMetadata".to_string(),
                value: metadata.to_string(),
            });
        }
        fields.push(MultipartField::File {
            name: "file".to_string(),
            file,
        });
        let value = self.post(
            &format!("/pet/{id}/uploadImage"),
            Some(RequestBody::Multipart(fields)),
        )?;
        Ok(ApiResponse::from_value(value)?)
    }
}
