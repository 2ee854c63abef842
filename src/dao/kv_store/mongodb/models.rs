use mongodb::bson::{Document, doc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::dao::kv_store::CollectionKey;

/// One document per collection key: `{ _id: "players", value: [...] }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MongoValueDocument {
    /// Collection key, used as the document id.
    #[serde(rename = "_id")]
    pub key: String,
    /// The whole collection.
    pub value: Value,
}

impl MongoValueDocument {
    /// Document storing `value` under `key`.
    pub fn new(key: CollectionKey, value: Value) -> Self {
        Self {
            key: key.as_str().to_owned(),
            value,
        }
    }
}

/// Filter matching the document for `key`.
pub fn doc_id(key: CollectionKey) -> Document {
    doc! {"_id": key.as_str()}
}
