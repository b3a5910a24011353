use serde::{Deserialize, Serialize};

/// A single address-book entry, serialized as a flat camelCase JSON object.
///
/// Attribute fields are free-form strings and carry no validation; missing
/// fields in an input payload deserialize to empty strings. `id` is the
/// primary key: absent on create input, always populated on persisted
/// records.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub labels: String,
}
