use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// A review as stored: foreign keys to the toy and the author are kept as
/// hex strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub user_id: String,
    pub toy_id: String,
    pub txt: String,
    pub rating: f64,
    /// Derived from the id's embedded timestamp; not persisted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<i64>,
}

/// A review joined with its referenced toy and author.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewView {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub txt: String,
    pub rating: f64,
    pub toy: ToyRef,
    pub user: UserRef,
    /// Millis since epoch, extracted from the review id.
    pub created_at: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToyRef {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRef {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub username: String,
}
