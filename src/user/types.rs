use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// A user account as stored, password included. This type never leaves the
/// user/auth services; everything outward-facing is a [`UserView`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub username: String,
    pub password: String,
    pub fullname: String,
    #[serde(default)]
    pub is_admin: bool,
    #[serde(default)]
    pub img_url: String,
}

/// Outward projection of a user: no password, creation time derived from the
/// id's embedded timestamp.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserView {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub username: String,
    pub fullname: String,
    pub is_admin: bool,
    pub img_url: String,
    /// Millis since epoch.
    pub created_at: i64,
}

impl UserView {
    pub(crate) fn from_user(user: &User) -> Option<Self> {
        let id = user.id?;
        Some(Self {
            id,
            username: user.username.clone(),
            fullname: user.fullname.clone(),
            is_admin: user.is_admin,
            img_url: user.img_url.clone(),
            created_at: id.timestamp().timestamp_millis(),
        })
    }
}

/// Signup credentials.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewUser {
    pub username: String,
    pub password: String,
    pub fullname: String,
    pub img_url: Option<String>,
}
