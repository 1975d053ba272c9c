use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Toy {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    #[serde(default)]
    pub img_urls: Vec<String>,
    pub price: f64,
    #[serde(default)]
    pub brands: Vec<String>,
    #[serde(default)]
    pub product_types: Vec<String>,
    #[serde(default)]
    pub companies: Vec<String>,
    pub in_stock: bool,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub msgs: Vec<ToyMsg>,
}

/// A chat-style message pinned to a toy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToyMsg {
    pub id: String,
    pub txt: String,
    pub by: MsgAuthor,
    /// Millis since epoch.
    pub at: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MsgAuthor {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub username: String,
}

/// The label vocabulary offered by the shop UI.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelSets {
    pub brands: Vec<String>,
    pub product_types: Vec<String>,
    pub companies: Vec<String>,
}

pub(crate) const BRANDS: [&str; 5] =
    ["Naruto", "Dragon Ball", "One Piece", "My Hero Academia", "Demon Slayer"];

pub(crate) const PRODUCT_TYPES: [&str; 5] =
    ["Action Figure", "Nendoroid", "Model Kit", "Plush Toy", "Statue"];

pub(crate) const COMPANIES: [&str; 5] =
    ["Bandai", "Good Smile Company", "Banpresto", "Kotobukiya", "Funko"];
